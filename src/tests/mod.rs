use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::dashboard::{Dashboard, LoadStatus};
use crate::fetcher::{FetchErrorKind, Fetcher, FetcherOptions, Source};
use crate::i18n::Language;
use crate::model::RiskLevel;
use crate::render::detail::PointerTarget;
use crate::render::TableBody;
use crate::summary::Stats;
use crate::view::RiskFilter;

const FEED: &str = r#"[
  {
    "department": "Revenue",
    "service_name": "Income Certificate",
    "sla_days": 7,
    "sla_risk": "Low",
    "workflow_steps": 4,
    "workflow_risk": "High Delay Risk",
    "delayed_roles": ["VRO"],
    "is_high_risk": true,
    "ai_explanation": {
      "summary": "Multiple approval levels slow this service down.",
      "details": "Four workflow steps with the VRO as the usual bottleneck.",
      "what_if": "Removing one approval step would cut the delay risk."
    }
  },
  {
    "department": "Civil Supplies",
    "service_name": "New Rice Card",
    "workflow_steps": 2,
    "workflow_risk": "Normal",
    "delayed_roles": [],
    "ai_explanation": {
      "summary": "Short workflow.",
      "details": "Two steps.",
      "what_if": "No change needed."
    }
  },
  {
    "department": "Revenue",
    "service_name": "No Property Application Service",
    "workflow_risk": "Normal"
  }
]"#;

/// Answers a single HTTP request with the given status line and body, then
/// closes the connection. Returns the base URL to point a fetcher at.
async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut seen = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
            if seen.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

fn fetcher_for(base_url: String) -> Fetcher {
    Fetcher::new(&FetcherOptions {
        base_url,
        timeout_seconds: 5,
        proxy: None,
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_maps_backend_feed() {
    let base = serve_once("200 OK", "application/json", FEED).await;
    let fetcher = fetcher_for(base);
    assert!(fetcher.url().ends_with("/services/explain"));

    let mut dash = Dashboard::default();
    assert!(dash.apply_load(fetcher.fetch_services().await));
    assert_eq!(
        dash.stats(),
        Stats {
            total: 3,
            high_risk: 1,
            normal_risk: 2
        }
    );
    assert_eq!(dash.status(), &LoadStatus::Loaded { count: 3 });
    let first = &dash.records()[0];
    assert_eq!(first.index, 0);
    assert_eq!(first.workflow_steps, Some(4));
    assert_eq!(first.delayed_roles, vec!["VRO".to_string()]);
    assert!(dash.records()[2].ai_explanation.is_none());
}

#[tokio::test]
async fn server_error_is_network_failure() {
    let base = serve_once("500 Internal Server Error", "text/plain", "boom").await;
    let err = fetcher_for(base).fetch_services().await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Network);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn html_body_is_parse_failure() {
    let base = serve_once("200 OK", "text/html", "<html>maintenance</html>").await;
    let err = fetcher_for(base).fetch_services().await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Parse);
}

#[tokio::test]
async fn refused_connection_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = fetcher_for(format!("http://{addr}"))
        .fetch_services()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Network);
}

#[tokio::test]
async fn missing_feed_file_is_network_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = Source::File(dir.path().join("absent.json"));
    let err = source.load().await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Network);
}

#[tokio::test]
async fn single_high_risk_revenue_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.json");
    std::fs::write(
        &path,
        r#"[{"department":"Revenue","service_name":"Income Certificate","workflow_risk":"High Delay Risk","delayed_roles":["VRO"],"ai_explanation":{"summary":"s","details":"d","what_if":"w"}}]"#,
    )
    .unwrap();

    let mut dash = Dashboard::default();
    dash.apply_load(Source::File(path).load().await);
    assert_eq!(
        dash.stats(),
        Stats {
            total: 1,
            high_risk: 1,
            normal_risk: 0
        }
    );
    match dash.body() {
        TableBody::Rows(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].risk, RiskLevel::High);
            assert_eq!(rows[0].roles, "VRO");
        }
        other => panic!("unexpected body {other:?}"),
    }
    let text = dash.render(false);
    assert!(text.contains("Total Applications: 1"));
    assert!(text.contains("[1]"));
}

#[test]
fn empty_feed_renders_no_data_row() {
    let mut dash = Dashboard::default();
    assert!(dash.apply_load(Ok(Vec::new())));
    assert_eq!(dash.stats(), Stats::default());
    assert_eq!(dash.body(), TableBody::NoData);
    assert_eq!(dash.body().len(), 1);
    assert!(dash.render(false).contains("No data found"));
}

#[tokio::test]
async fn failed_fetch_shows_single_error_row() {
    let base = serve_once("503 Service Unavailable", "text/plain", "").await;
    let mut dash = Dashboard::default();
    assert!(!dash.apply_load(fetcher_for(base).fetch_services().await));
    assert!(matches!(dash.body(), TableBody::Error(_)));
    assert_eq!(dash.body().len(), 1);
    assert_eq!(dash.stats(), Stats::default());
}

#[tokio::test]
async fn full_session_in_telugu() {
    let base = serve_once("200 OK", "application/json", FEED).await;
    let mut dash = Dashboard::default();
    dash.apply_load(fetcher_for(base).fetch_services().await);

    dash.set_filter(RiskFilter::High);
    dash.set_language(Language::Telugu);
    assert!(dash.select_row(0));
    dash.handle_pointer(PointerTarget::Content);
    assert!(dash.modal().is_open());
    let text = dash.render(false);
    assert!(text.contains("రెవెన్యూ"));
    assert!(text.contains("Multiple approval levels"));
    dash.handle_pointer(PointerTarget::Backdrop);
    assert!(!dash.modal().is_open());

    dash.set_search("civil");
    assert_eq!(dash.body(), TableBody::NoData);
    dash.set_filter(RiskFilter::All);
    assert_eq!(dash.body().len(), 1);
}
