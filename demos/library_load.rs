//! Loads the feed once through the library API and prints the high-risk rows.
//!
//! cargo run --example library_load -- [BASE_URL]

use govpulse::dashboard::Dashboard;
use govpulse::fetcher::{Fetcher, FetcherOptions, Source, DEFAULT_BASE_URL};
use govpulse::view::{RiskFilter, ViewState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let source = Source::Http(Fetcher::new(&FetcherOptions {
        base_url,
        ..Default::default()
    })?);

    let mut dashboard = Dashboard::new(ViewState::default().with_filter(RiskFilter::High));
    if !dashboard.apply_load(source.load().await) {
        return Err(format!("could not load {}", source.describe()).into());
    }

    let stats = dashboard.stats();
    println!(
        "{} services, {} high risk, {} normal",
        stats.total, stats.high_risk, stats.normal_risk
    );
    for record in dashboard.visible() {
        println!(
            "{:>3}  {} / {}  roles: {}",
            record.index + 1,
            record.department,
            record.service_name,
            record.roles_display()
        );
    }
    Ok(())
}
