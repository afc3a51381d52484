use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tracing::{debug, error, info};

use crate::fetcher::FetchError;
use crate::i18n::{Language, Locale, UiKey};
use crate::model::{self, RawRecord, ServiceRecord};
use crate::output::{self, ExportError, OutputFormat};
use crate::render::detail::{self, DetailModal, PointerTarget};
use crate::render::{self, TableBody};
use crate::summary::{self, RiskChart, Stats};
use crate::view::{self, RiskFilter, ViewState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loaded { count: usize },
    Failed(String),
}

/// Owns the loaded dataset and everything derived from it.
///
/// The dataset is swapped as a whole on every successful load. All rows are
/// recomputed from `(dataset, view state)` on demand, so nothing drawn can
/// drift from the data it came from.
#[derive(Clone, Debug)]
pub struct Dashboard {
    records: Arc<[ServiceRecord]>,
    view: ViewState,
    status: LoadStatus,
    load_error: Option<String>,
    stats: Stats,
    chart: Option<RiskChart>,
    modal: DetailModal,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl Dashboard {
    pub fn new(view: ViewState) -> Self {
        Self {
            records: Arc::from(Vec::<ServiceRecord>::new()),
            view,
            status: LoadStatus::Idle,
            load_error: None,
            stats: Stats::default(),
            chart: None,
            modal: DetailModal::default(),
        }
    }

    /// Returns true when the load succeeded. A failure keeps the previous
    /// dataset and shows a single error row until the view changes.
    pub fn apply_load(&mut self, result: Result<Vec<RawRecord>, FetchError>) -> bool {
        match result {
            Ok(raw) => {
                let records = model::map_to_records(&raw);
                self.stats = summary::compute_stats(&records);
                self.chart = Some(RiskChart::from_stats(&self.stats));
                self.records = Arc::from(records);
                self.status = LoadStatus::Loaded {
                    count: self.records.len(),
                };
                self.load_error = None;
                self.modal.close();
                info!(
                    total = self.stats.total,
                    high = self.stats.high_risk,
                    "dataset replaced"
                );
                true
            }
            Err(e) => {
                error!(kind = ?e.kind(), "failed to load data: {e}");
                let message = e.to_string();
                self.status = LoadStatus::Failed(message.clone());
                self.load_error = Some(message);
                false
            }
        }
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn snapshot(&self) -> Arc<[ServiceRecord]> {
        Arc::clone(&self.records)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn chart(&self) -> Option<&RiskChart> {
        self.chart.as_ref()
    }

    pub fn modal(&self) -> &DetailModal {
        &self.modal
    }

    pub fn locale(&self) -> Locale {
        Locale::new(self.view.language)
    }

    pub fn set_view(&mut self, next: ViewState) {
        if next != self.view {
            debug!(filter = next.filter.as_str(), search = %next.search, lang = next.language.code(), "view changed");
        }
        self.view = next;
        self.load_error = None;
    }

    pub fn set_filter(&mut self, filter: RiskFilter) {
        let next = self.view.with_filter(filter);
        self.set_view(next);
    }

    pub fn set_search(&mut self, search: &str) {
        let next = self.view.with_search(search);
        self.set_view(next);
    }

    pub fn set_language(&mut self, language: Language) {
        let next = self.view.with_language(language);
        self.set_view(next);
    }

    pub fn toggle_language(&mut self) -> Language {
        let language = self.view.language.toggled();
        self.set_language(language);
        language
    }

    pub fn visible(&self) -> Vec<&ServiceRecord> {
        view::visible(&self.records, &self.view)
    }

    pub fn body(&self) -> TableBody {
        if let Some(message) = self.load_error.as_ref() {
            return TableBody::Error(message.clone());
        }
        render::table_rows(&self.visible(), &self.locale())
    }

    /// Opens the detail panel for the record drawn at `position` (0-based) in
    /// the current view. Out-of-range positions and records without an
    /// explanation are ignored.
    pub fn select_row(&mut self, position: usize) -> bool {
        let record = if self.load_error.is_some() {
            None
        } else {
            view::visible(&self.records, &self.view)
                .get(position)
                .copied()
        };
        self.modal.open(record)
    }

    pub fn close_detail(&mut self) {
        self.modal.close();
    }

    pub fn handle_pointer(&mut self, target: PointerTarget) {
        self.modal.handle_pointer(target);
    }

    pub fn render(&self, color: bool) -> String {
        let locale = self.locale();
        let mut out = String::new();
        let title = locale.ui(UiKey::Title);
        if color {
            out.push_str(&title.bold().to_string());
        } else {
            out.push_str(title);
        }
        out.push('\n');
        out.push('\n');
        out.push_str(&summary::render_counters(&self.stats, &locale, color));
        out.push('\n');
        if let Some(chart) = self.chart.as_ref() {
            out.push_str(&chart.render(&locale, color));
            out.push('\n');
        }
        out.push_str(&render::render_table(&self.body(), &locale, color));
        if let Some(panel) = self.modal.panel() {
            out.push('\n');
            out.push_str(&detail::render_detail(panel, &locale, color));
        }
        out
    }

    pub async fn export_csv(&self, path: &Path) -> Result<usize, ExportError> {
        output::write_file(path, &output::render_csv(&self.records)).await?;
        info!(path = %path.display(), rows = self.records.len(), "csv exported");
        Ok(self.records.len())
    }

    pub async fn write_report(&self, path: &Path, format: OutputFormat) -> Result<(), ExportError> {
        let rendered = output::render(format, &self.records, &self.locale())?;
        output::write_file(path, &rendered).await?;
        info!(path = %path.display(), ?format, "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AiExplanation;

    fn raw(department: &str, service: &str, risk: &str, ai: bool) -> RawRecord {
        RawRecord {
            department: Some(department.to_string()),
            service_name: Some(service.to_string()),
            workflow_risk: Some(risk.to_string()),
            ai_explanation: ai.then(|| AiExplanation {
                summary: format!("{service} summary"),
                details: "details".to_string(),
                what_if: "what if".to_string(),
            }),
            ..Default::default()
        }
    }

    fn loaded() -> Dashboard {
        let mut dash = Dashboard::default();
        assert!(dash.apply_load(Ok(vec![
            raw("Revenue", "Income Certificate", "High Delay Risk", true),
            raw("Civil Supplies", "New Rice Card", "Normal", true),
            raw("Revenue", "No Property Application Service", "Normal", false),
        ])));
        dash
    }

    fn failure() -> FetchError {
        FetchError::Status {
            url: "http://localhost/services/explain".to_string(),
            status: 500,
        }
    }

    #[test]
    fn stats_ignore_filter_and_search() {
        let mut dash = loaded();
        let before = dash.stats();
        dash.set_filter(RiskFilter::High);
        dash.set_search("rice");
        assert_eq!(dash.stats(), before);
        assert_eq!(before.total, 3);
        assert_eq!(before.high_risk, 1);
        assert_eq!(dash.body(), TableBody::NoData);
    }

    #[test]
    fn failed_first_load_shows_one_error_row_and_empty_store() {
        let mut dash = Dashboard::default();
        assert!(!dash.apply_load(Err(failure())));
        assert!(dash.records().is_empty());
        assert!(matches!(dash.body(), TableBody::Error(_)));
        assert_eq!(dash.body().len(), 1);
        assert!(matches!(dash.status(), LoadStatus::Failed(_)));
    }

    #[test]
    fn failed_reload_keeps_previous_dataset() {
        let mut dash = loaded();
        let before = dash.snapshot();
        dash.apply_load(Err(failure()));
        assert!(Arc::ptr_eq(&before, &dash.snapshot()));
        assert_eq!(dash.stats().total, 3);
    }

    #[test]
    fn still_interactive_after_failure() {
        let mut dash = Dashboard::default();
        dash.apply_load(Err(failure()));
        dash.set_search("anything");
        assert_eq!(dash.body(), TableBody::NoData);
        assert!(!dash.select_row(0));
    }

    #[test]
    fn selecting_row_routes_visible_record() {
        let mut dash = loaded();
        dash.set_filter(RiskFilter::Normal);
        assert!(dash.select_row(0));
        let panel = dash.modal().panel().unwrap();
        assert_eq!(panel.index, 1);
        assert_eq!(panel.summary, "New Rice Card summary");
    }

    #[test]
    fn selecting_row_without_explanation_does_nothing() {
        let mut dash = loaded();
        dash.set_search("property");
        assert!(!dash.select_row(0));
        assert!(!dash.modal().is_open());
        assert!(!dash.select_row(7));
    }

    #[test]
    fn reload_replaces_chart_and_dataset() {
        let mut dash = loaded();
        dash.apply_load(Ok(vec![raw("Revenue", "X", "High Delay Risk", false)]));
        assert_eq!(dash.records().len(), 1);
        let chart = dash.chart().unwrap();
        assert_eq!(chart.slices[0].count, 1);
        assert_eq!(chart.slices[1].count, 0);
    }

    #[test]
    fn language_toggle_relabels_rendered_output() {
        let mut dash = loaded();
        assert_eq!(dash.toggle_language(), Language::Telugu);
        let text = dash.render(false);
        assert!(text.contains("మొత్తం దరఖాస్తులు"));
        assert!(text.contains("రెవెన్యూ"));
        assert_eq!(dash.toggle_language(), Language::English);
        assert!(dash.render(false).contains("Total Applications: 3"));
    }

    #[tokio::test]
    async fn export_csv_writes_full_dataset() {
        let mut dash = loaded();
        dash.set_filter(RiskFilter::High);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("services.csv");
        let rows = dash.export_csv(&path).await.unwrap();
        assert_eq!(rows, 3);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
    }
}
