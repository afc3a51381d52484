use crate::i18n::Language;
use crate::model::{RiskLevel, ServiceRecord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Normal,
}

impl RiskFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "" => Some(Self::All),
            "high" => Some(Self::High),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Normal => "normal",
        }
    }

    pub fn admits(self, level: RiskLevel) -> bool {
        match self {
            Self::All => true,
            Self::High => level == RiskLevel::High,
            Self::Normal => level == RiskLevel::Normal,
        }
    }
}

/// Snapshot of what the user is looking at. Never mutated; each change
/// produces a new value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: RiskFilter,
    pub search: String,
    pub language: Language,
}

impl ViewState {
    pub fn with_filter(&self, filter: RiskFilter) -> Self {
        Self {
            filter,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: &str) -> Self {
        Self {
            search: search.to_string(),
            ..self.clone()
        }
    }

    pub fn with_language(&self, language: Language) -> Self {
        Self {
            language,
            ..self.clone()
        }
    }
}

pub fn matches_search(record: &ServiceRecord, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    let mut haystack = String::with_capacity(record.department.len() + record.service_name.len());
    haystack.push_str(&record.department);
    haystack.push_str(&record.service_name);
    haystack.to_lowercase().contains(needle_lower)
}

pub fn apply_view<'a>(
    records: &'a [ServiceRecord],
    filter: RiskFilter,
    search: &str,
) -> Vec<&'a ServiceRecord> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| filter.admits(r.risk_level()))
        .filter(|r| matches_search(r, &needle))
        .collect()
}

pub fn visible<'a>(records: &'a [ServiceRecord], state: &ViewState) -> Vec<&'a ServiceRecord> {
    apply_view(records, state.filter, &state.search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{map_to_records, RawRecord};

    fn dataset() -> Vec<ServiceRecord> {
        let raw = [
            ("Revenue", "Income Certificate", "High Delay Risk"),
            ("Civil Supplies", "New Rice Card", "Normal"),
            ("PR&RD & MAUD", "Marriage Certificate", "Normal"),
            ("Revenue", "No Property Application Service", "High Delay Risk"),
        ]
        .iter()
        .map(|(d, s, r)| RawRecord {
            department: Some(d.to_string()),
            service_name: Some(s.to_string()),
            workflow_risk: Some(r.to_string()),
            ..Default::default()
        })
        .collect::<Vec<_>>();
        map_to_records(&raw)
    }

    fn indices(v: &[&ServiceRecord]) -> Vec<usize> {
        v.iter().map(|r| r.index).collect()
    }

    #[test]
    fn all_and_empty_search_is_identity() {
        let data = dataset();
        assert_eq!(indices(&apply_view(&data, RiskFilter::All, "")), vec![0, 1, 2, 3]);
    }

    #[test]
    fn high_filter_keeps_high_subsequence() {
        let data = dataset();
        assert_eq!(indices(&apply_view(&data, RiskFilter::High, "")), vec![0, 3]);
        assert_eq!(indices(&apply_view(&data, RiskFilter::Normal, "")), vec![1, 2]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let data = dataset();
        assert_eq!(indices(&apply_view(&data, RiskFilter::All, "reven")), vec![0, 3]);
        assert_eq!(indices(&apply_view(&data, RiskFilter::All, "RICE")), vec![1]);
    }

    #[test]
    fn search_spans_department_and_service_without_separator() {
        let data = dataset();
        assert_eq!(
            indices(&apply_view(&data, RiskFilter::All, "suppliesnew")),
            vec![1]
        );
        assert!(apply_view(&data, RiskFilter::All, "supplies new").is_empty());
    }

    #[test]
    fn stages_are_conjunctive() {
        let data = dataset();
        assert!(apply_view(&data, RiskFilter::Normal, "revenue").is_empty());
        assert_eq!(indices(&apply_view(&data, RiskFilter::High, "income")), vec![0]);
    }

    #[test]
    fn view_state_builders_leave_original_untouched() {
        let base = ViewState::default();
        let next = base.with_filter(RiskFilter::High).with_search("rev");
        assert_eq!(base, ViewState::default());
        assert_eq!(next.filter, RiskFilter::High);
        assert_eq!(next.search, "rev");
        assert_eq!(next.language, Language::English);
    }

    #[test]
    fn parse_filter() {
        assert_eq!(RiskFilter::parse("HIGH"), Some(RiskFilter::High));
        assert_eq!(RiskFilter::parse("bogus"), None);
    }
}
