pub mod detail;

use colored::Colorize;

use crate::i18n::{Locale, UiKey};
use crate::model::{RiskLevel, ServiceRecord};

pub const COLUMN_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    /// Index of the record in the loaded dataset.
    pub index: usize,
    pub department: String,
    pub service_name: String,
    pub risk: RiskLevel,
    pub risk_label: String,
    pub roles: String,
    pub action: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableBody {
    Rows(Vec<TableRow>),
    NoData,
    Error(String),
}

impl TableBody {
    /// Number of drawn body lines; placeholders count as one.
    pub fn len(&self) -> usize {
        match self {
            Self::Rows(rows) => rows.len(),
            Self::NoData | Self::Error(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn badge_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "high",
        RiskLevel::Normal => "normal",
    }
}

pub fn table_row(record: &ServiceRecord, locale: &Locale) -> TableRow {
    let risk = record.risk_level();
    let roles = if record.delayed_roles.is_empty() {
        "-".to_string()
    } else {
        locale.data_list(&record.delayed_roles).join(", ")
    };
    TableRow {
        index: record.index,
        department: locale.data(&record.department).to_string(),
        service_name: locale.data(&record.service_name).to_string(),
        risk,
        risk_label: locale.data(risk.label()).to_string(),
        roles,
        action: locale.ui(UiKey::ViewDetails).to_string(),
    }
}

pub fn table_rows(visible: &[&ServiceRecord], locale: &Locale) -> TableBody {
    if visible.is_empty() {
        return TableBody::NoData;
    }
    TableBody::Rows(visible.iter().map(|r| table_row(r, locale)).collect())
}

fn width_of(value: &str) -> usize {
    value.chars().count()
}

fn pad(value: &str, width: usize) -> String {
    let mut out = value.to_string();
    for _ in width_of(value)..width {
        out.push(' ');
    }
    out
}

fn center(value: &str, width: usize) -> String {
    let w = width_of(value);
    if w >= width {
        return value.to_string();
    }
    let left = (width - w) / 2;
    format!("{}{}", " ".repeat(left), pad(value, width - left))
}

fn badge(row: &TableRow, width: usize, color: bool) -> String {
    let text = pad(&row.risk_label, width);
    if !color {
        return text;
    }
    match row.risk {
        RiskLevel::High => text.white().on_red().bold().to_string(),
        RiskLevel::Normal => text.black().on_green().to_string(),
    }
}

pub fn render_table(body: &TableBody, locale: &Locale, color: bool) -> String {
    let headers = [
        locale.ui(UiKey::Department).to_string(),
        locale.ui(UiKey::ServiceName).to_string(),
        locale.ui(UiKey::RiskLevel).to_string(),
        locale.ui(UiKey::DelayedRoles).to_string(),
        locale.ui(UiKey::Action).to_string(),
    ];
    let mut widths: [usize; COLUMN_COUNT] = [0; COLUMN_COUNT];
    for (i, h) in headers.iter().enumerate() {
        widths[i] = width_of(h);
    }

    let mut cells: Vec<[String; COLUMN_COUNT]> = Vec::new();
    if let TableBody::Rows(rows) = body {
        for (pos, row) in rows.iter().enumerate() {
            let line = [
                row.department.clone(),
                row.service_name.clone(),
                row.risk_label.clone(),
                row.roles.clone(),
                format!("[{}] {}", pos + 1, row.action),
            ];
            for (i, c) in line.iter().enumerate() {
                widths[i] = widths[i].max(width_of(c));
            }
            cells.push(line);
        }
    }

    let total_width = widths.iter().sum::<usize>() + 3 * (COLUMN_COUNT - 1);
    let mut out = String::new();

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect::<Vec<_>>()
        .join(" | ");
    if color {
        out.push_str(&header_line.bold().to_string());
    } else {
        out.push_str(&header_line);
    }
    out.push('\n');
    out.push_str(&"-".repeat(total_width));
    out.push('\n');

    match body {
        TableBody::Rows(rows) => {
            for (row, line) in rows.iter().zip(cells.iter()) {
                let rendered = [
                    pad(&line[0], widths[0]),
                    pad(&line[1], widths[1]),
                    badge(row, widths[2], color),
                    pad(&line[3], widths[3]),
                    if color {
                        pad(&line[4], widths[4]).blue().to_string()
                    } else {
                        pad(&line[4], widths[4])
                    },
                ];
                out.push_str(rendered.join(" | ").trim_end());
                out.push('\n');
            }
        }
        TableBody::NoData => {
            out.push_str(center(locale.ui(UiKey::NoData), total_width).trim_end());
            out.push('\n');
        }
        TableBody::Error(message) => {
            let text = format!("{}: {}", locale.ui(UiKey::LoadFailed), message);
            let text = center(&text, total_width);
            if color {
                out.push_str(&text.trim_end().red().to_string());
            } else {
                out.push_str(text.trim_end());
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::model::{map_to_records, RawRecord};

    fn records() -> Vec<ServiceRecord> {
        map_to_records(&[
            RawRecord {
                department: Some("Revenue".to_string()),
                service_name: Some("Income Certificate".to_string()),
                workflow_risk: Some("High Delay Risk".to_string()),
                delayed_roles: Some(vec!["VRO".to_string(), "Clerk".to_string()]),
                ..Default::default()
            },
            RawRecord {
                department: Some("Civil Supplies".to_string()),
                service_name: Some("New Rice Card".to_string()),
                workflow_risk: Some("Normal".to_string()),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn empty_view_is_single_placeholder() {
        let body = table_rows(&[], &Locale::default());
        assert_eq!(body, TableBody::NoData);
        assert_eq!(body.len(), 1);
        let text = render_table(&body, &Locale::default(), false);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("No data found"));
    }

    #[test]
    fn rows_join_roles_and_use_dash_when_empty() {
        let data = records();
        let visible: Vec<&ServiceRecord> = data.iter().collect();
        let TableBody::Rows(rows) = table_rows(&visible, &Locale::default()) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].roles, "VRO, Clerk");
        assert_eq!(rows[1].roles, "-");
        assert_eq!(badge_class(rows[0].risk), "high");
        assert_eq!(badge_class(rows[1].risk), "normal");
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn telugu_translates_data_cells() {
        let data = records();
        let visible: Vec<&ServiceRecord> = data.iter().collect();
        let locale = Locale::new(Language::Telugu);
        let TableBody::Rows(rows) = table_rows(&visible, &locale) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].department, "రెవెన్యూ");
        assert_eq!(rows[0].risk_label, "అధికం");
        assert_eq!(rows[0].roles, "వీఆర్వో, గుమస్తా");
    }

    #[test]
    fn plain_render_has_one_line_per_row() {
        let data = records();
        let visible: Vec<&ServiceRecord> = data.iter().collect();
        let body = table_rows(&visible, &Locale::default());
        let text = render_table(&body, &Locale::default(), false);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("[2] View Details →"));
    }

    #[test]
    fn error_body_renders_one_row() {
        let body = TableBody::Error("HTTP 500".to_string());
        let text = render_table(&body, &Locale::default(), false);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Failed to load data: HTTP 500"));
    }
}
