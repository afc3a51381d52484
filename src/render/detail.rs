use colored::Colorize;

use crate::i18n::{Locale, UiKey};
use crate::model::ServiceRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPanel {
    pub index: usize,
    pub department: String,
    pub service_name: String,
    pub summary: String,
    pub details: String,
    pub what_if: String,
}

/// Where a pointer event landed while the panel is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Backdrop,
    Content,
}

impl PointerTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "backdrop" | "background" | "outside" => Some(Self::Backdrop),
            "content" | "inside" => Some(Self::Content),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailModal {
    panel: Option<DetailPanel>,
}

impl DetailModal {
    /// Returns false and leaves the modal untouched when there is nothing to show.
    pub fn open(&mut self, record: Option<&ServiceRecord>) -> bool {
        let Some(record) = record else {
            return false;
        };
        let Some(ai) = record.ai_explanation.as_ref() else {
            return false;
        };
        self.panel = Some(DetailPanel {
            index: record.index,
            department: record.department.clone(),
            service_name: record.service_name.clone(),
            summary: ai.summary.clone(),
            details: ai.details.clone(),
            what_if: ai.what_if.clone(),
        });
        true
    }

    pub fn close(&mut self) {
        self.panel = None;
    }

    pub fn handle_pointer(&mut self, target: PointerTarget) {
        if target == PointerTarget::Backdrop {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        self.panel.as_ref()
    }
}

pub fn render_detail(panel: &DetailPanel, locale: &Locale, color: bool) -> String {
    let title = format!(
        "{} - {}",
        locale.data(&panel.department),
        locale.data(&panel.service_name)
    );
    let rule = "=".repeat(title.chars().count().max(24));
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    if color {
        out.push_str(&title.bold().to_string());
    } else {
        out.push_str(&title);
    }
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for (key, text) in [
        (UiKey::Summary, &panel.summary),
        (UiKey::Details, &panel.details),
        (UiKey::WhatIf, &panel.what_if),
    ] {
        let label = format!("{}:", locale.ui(key));
        if color {
            out.push_str(&label.cyan().bold().to_string());
        } else {
            out.push_str(&label);
        }
        out.push('\n');
        out.push_str("  ");
        out.push_str(text);
        out.push('\n');
    }
    out
}
