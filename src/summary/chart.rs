use colored::Colorize;
use serde::Serialize;

use super::Stats;
use crate::i18n::{Locale, UiKey};
use crate::model::RiskLevel;

const BAR_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Slice {
    pub level: RiskLevel,
    pub count: usize,
    pub share: f64,
}

/// Two-slice High/Normal breakdown.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiskChart {
    pub slices: [Slice; 2],
}

impl RiskChart {
    pub fn from_stats(stats: &Stats) -> Self {
        let share = |count: usize| {
            if stats.total == 0 {
                0.0
            } else {
                count as f64 / stats.total as f64
            }
        };
        Self {
            slices: [
                Slice {
                    level: RiskLevel::High,
                    count: stats.high_risk,
                    share: share(stats.high_risk),
                },
                Slice {
                    level: RiskLevel::Normal,
                    count: stats.normal_risk,
                    share: share(stats.normal_risk),
                },
            ],
        }
    }

    pub fn render(&self, locale: &Locale, color: bool) -> String {
        let mut out = String::new();
        out.push_str(locale.ui(UiKey::RiskBreakdown));
        out.push('\n');
        let label_width = self
            .slices
            .iter()
            .map(|s| locale.data(s.level.label()).chars().count())
            .max()
            .unwrap_or(0);
        for slice in self.slices.iter() {
            let filled = (slice.share * BAR_WIDTH as f64).round() as usize;
            let bar = "█".repeat(filled.min(BAR_WIDTH));
            let bar = if color {
                match slice.level {
                    RiskLevel::High => bar.red().to_string(),
                    RiskLevel::Normal => bar.green().to_string(),
                }
            } else {
                bar
            };
            let label = locale.data(slice.level.label());
            let pad = label_width.saturating_sub(label.chars().count());
            out.push_str(&format!(
                "  {}{} | {}{} {} ({:.0}%)\n",
                label,
                " ".repeat(pad),
                bar,
                " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                slice.count,
                slice.share * 100.0
            ));
        }
        out
    }
}
