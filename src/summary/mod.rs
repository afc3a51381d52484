pub mod chart;

use colored::Colorize;
use serde::Serialize;

use crate::i18n::{Locale, UiKey};
use crate::model::{RiskLevel, ServiceRecord};

pub use chart::RiskChart;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub high_risk: usize,
    pub normal_risk: usize,
}

/// Headline counters. Always computed over the full dataset, never the
/// filtered view.
pub fn compute_stats(records: &[ServiceRecord]) -> Stats {
    let high_risk = records
        .iter()
        .filter(|r| r.risk_level() == RiskLevel::High)
        .count();
    Stats {
        total: records.len(),
        high_risk,
        normal_risk: records.len() - high_risk,
    }
}

pub fn render_counters(stats: &Stats, locale: &Locale, color: bool) -> String {
    let cells = [
        (UiKey::TotalApplications, stats.total),
        (UiKey::HighRisk, stats.high_risk),
        (UiKey::NormalRisk, stats.normal_risk),
    ];
    let mut parts: Vec<String> = Vec::with_capacity(cells.len());
    for (key, count) in cells {
        let value = count.to_string();
        let value = if !color {
            value
        } else {
            match key {
                UiKey::HighRisk => value.red().bold().to_string(),
                UiKey::NormalRisk => value.green().bold().to_string(),
                _ => value.bold().to_string(),
            }
        };
        parts.push(format!("{}: {}", locale.ui(key), value));
    }
    let mut out = parts.join("   ");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{map_to_records, RawRecord};

    #[test]
    fn empty_dataset_is_all_zero() {
        assert_eq!(compute_stats(&[]), Stats::default());
    }

    #[test]
    fn counters_line_is_plain_without_color() {
        let line = render_counters(
            &Stats {
                total: 1,
                high_risk: 1,
                normal_risk: 0,
            },
            &Locale::default(),
            false,
        );
        assert_eq!(line, "Total Applications: 1   High Risk: 1   Normal: 0\n");
    }

    #[test]
    fn counts_split_by_level() {
        let raw = ["High Delay Risk", "Normal", "weird", "High Delay Risk"]
            .iter()
            .map(|r| RawRecord {
                workflow_risk: Some(r.to_string()),
                ..Default::default()
            })
            .collect::<Vec<_>>();
        let stats = compute_stats(&map_to_records(&raw));
        assert_eq!(
            stats,
            Stats {
                total: 4,
                high_risk: 2,
                normal_risk: 2
            }
        );
    }
}
