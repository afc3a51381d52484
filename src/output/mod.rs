pub mod report;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::i18n::Locale;
use crate::model::{AiExplanation, ServiceRecord};
use crate::render;
use crate::summary::{self, RiskChart};

pub const CSV_HEADER: &str = "Department,Service Name,Risk Level,SLA Days,Steps";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".csv") {
        return Some(OutputFormat::Csv);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to open output file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub index: usize,
    pub department: String,
    pub service_name: String,
    pub workflow_risk: String,
    pub risk_level: &'static str,
    pub delayed_roles: Vec<String>,
    pub ai_explanation: Option<AiExplanation>,
    pub sla_days: Option<f64>,
    pub workflow_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_risk: Option<String>,
}

pub fn build_records(records: &[ServiceRecord]) -> Vec<OutputRecord> {
    records
        .iter()
        .map(|r| OutputRecord {
            index: r.index,
            department: r.department.clone(),
            service_name: r.service_name.clone(),
            workflow_risk: r.workflow_risk().to_string(),
            risk_level: r.risk_level().label(),
            delayed_roles: r.delayed_roles.clone(),
            ai_explanation: r.ai_explanation.clone(),
            sla_days: r.sla_days,
            workflow_steps: r.workflow_steps,
            sla_risk: r.sla_risk.clone(),
        })
        .collect()
}

fn optional_cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Fields are joined as-is: commas or quotes inside a value are not escaped.
pub fn render_csv(records: &[ServiceRecord]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in records {
        let row = [
            r.department.clone(),
            r.service_name.clone(),
            r.risk_level().label().to_string(),
            optional_cell(r.sla_days),
            optional_cell(r.workflow_steps),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(records: &[ServiceRecord]) -> Result<Vec<u8>, ExportError> {
    serde_json::to_vec_pretty(&build_records(records))
        .map_err(|e| ExportError::Serialize { source: e })
}

pub fn render_text(records: &[ServiceRecord], locale: &Locale) -> Vec<u8> {
    let stats = summary::compute_stats(records);
    let all: Vec<&ServiceRecord> = records.iter().collect();
    let mut out = String::new();
    out.push_str(&summary::render_counters(&stats, locale, false));
    out.push('\n');
    out.push_str(&RiskChart::from_stats(&stats).render(locale, false));
    out.push('\n');
    out.push_str(&render::render_table(
        &render::table_rows(&all, locale),
        locale,
        false,
    ));
    out.into_bytes()
}

pub fn render_html(records: &[ServiceRecord], locale: &Locale) -> Result<Vec<u8>, ExportError> {
    report::render_html(&build_records(records), locale.language)
        .map_err(|e| ExportError::Serialize { source: e })
}

/// Nothing is written by the caller when this fails, so a serialization
/// error never leaves an empty report behind.
pub fn render(
    format: OutputFormat,
    records: &[ServiceRecord],
    locale: &Locale,
) -> Result<Vec<u8>, ExportError> {
    match format {
        OutputFormat::Text => Ok(render_text(records, locale)),
        OutputFormat::Json => render_json(records),
        OutputFormat::Csv => Ok(render_csv(records)),
        OutputFormat::Html => render_html(records, locale),
    }
}

pub async fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    let mut outfile = tokio::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| ExportError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
    outfile
        .write_all(contents)
        .await
        .map_err(|e| ExportError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
    outfile.flush().await.map_err(|e| ExportError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
