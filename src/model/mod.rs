use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend risk string that marks a workflow as high risk. Anything else is normal.
pub const HIGH_DELAY_RISK: &str = "High Delay Risk";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    High,
    Normal,
}

impl RiskLevel {
    pub fn from_workflow_risk(raw: &str) -> Self {
        if raw == HIGH_DELAY_RISK {
            Self::High
        } else {
            Self::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Normal => "Normal",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AiExplanation {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub what_if: String,
}

// one element of the `/services/explain` array, exactly as the backend sends it.
// A malformed optional field degrades to None for that record only.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub workflow_risk: Option<String>,
    #[serde(default, deserialize_with = "lenient_roles")]
    pub delayed_roles: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_explanation")]
    pub ai_explanation: Option<AiExplanation>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sla_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub workflow_steps: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sla_risk: Option<String>,
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_of))
}

fn lenient_roles<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(Some(items.iter().filter_map(text_of).collect())),
        _ => Ok(None),
    }
}

/// Inner strings that are null or missing become empty. Anything other than
/// an object counts as no explanation.
fn lenient_explanation<'de, D>(deserializer: D) -> Result<Option<AiExplanation>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = |map: &serde_json::Map<String, Value>, key: &str| {
        map.get(key).and_then(text_of).unwrap_or_default()
    };
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => Ok(Some(AiExplanation {
            summary: field(&map, "summary"),
            details: field(&map, "details"),
            what_if: field(&map, "what_if"),
        })),
        _ => Ok(None),
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_of).filter(|n| n.is_finite()))
}

// whole, non-negative values only; `4.0` is accepted as 4
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_of)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

/// Normalized, read-only view of one service workflow.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceRecord {
    pub index: usize,
    pub department: String,
    pub service_name: String,
    risk_source: String,
    pub delayed_roles: Vec<String>,
    pub ai_explanation: Option<AiExplanation>,
    pub sla_days: Option<f64>,
    pub workflow_steps: Option<u32>,
    pub sla_risk: Option<String>,
}

impl ServiceRecord {
    /// Always derived from the backend string, so the two can never disagree.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_workflow_risk(&self.risk_source)
    }

    pub fn workflow_risk(&self) -> &str {
        &self.risk_source
    }

    pub fn roles_display(&self) -> String {
        if self.delayed_roles.is_empty() {
            "-".to_string()
        } else {
            self.delayed_roles.join(", ")
        }
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.department, self.service_name)
    }
}

pub fn map_record(index: usize, raw: &RawRecord) -> ServiceRecord {
    ServiceRecord {
        index,
        department: raw.department.clone().unwrap_or_default(),
        service_name: raw.service_name.clone().unwrap_or_default(),
        risk_source: raw.workflow_risk.clone().unwrap_or_default(),
        delayed_roles: raw.delayed_roles.clone().unwrap_or_default(),
        ai_explanation: raw.ai_explanation.clone(),
        sla_days: raw.sla_days,
        workflow_steps: raw.workflow_steps,
        sla_risk: raw.sla_risk.clone(),
    }
}

pub fn map_to_records(raw: &[RawRecord]) -> Vec<ServiceRecord> {
    raw.iter()
        .enumerate()
        .map(|(index, r)| map_record(index, r))
        .collect()
}
