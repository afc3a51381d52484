use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::dashboard::Dashboard;
use crate::fetcher::Source;
use crate::i18n::Language;
use crate::output::{self, OutputFormat};
use crate::render::detail::PointerTarget;
use crate::summary;
use crate::view::RiskFilter;

pub const HELP: &str = "commands:
  search <text>          filter rows by department/service (no text clears)
  filter <all|high|normal>
  open <n>               show the AI explanation for row n
  close                  hide the detail panel
  click <backdrop|content>
  lang [en|te]           switch language (toggles without argument)
  export <file>          write the full dataset as CSV
  report <file>          write a report, format taken from the extension
  reload                 fetch the feed again
  stats                  print the headline counters
  show                   redraw the dashboard
  help
  quit
";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Filter(RiskFilter),
    Open(usize),
    Close,
    Click(PointerTarget),
    Lang(Option<Language>),
    Export(PathBuf),
    Report(PathBuf),
    Reload,
    Stats,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };
        match head.to_lowercase().as_str() {
            "" | "show" | "ls" => Ok(Self::Show),
            "search" | "/" => Ok(Self::Search(rest.to_string())),
            "filter" => RiskFilter::parse(rest)
                .map(Self::Filter)
                .ok_or_else(|| format!("unknown filter '{rest}', expected all, high or normal")),
            "open" | "view" => {
                let n: usize = rest
                    .parse()
                    .map_err(|_| format!("expected a row number, got '{rest}'"))?;
                if n == 0 {
                    return Err("rows are numbered from 1".to_string());
                }
                Ok(Self::Open(n))
            }
            "close" => Ok(Self::Close),
            "click" => PointerTarget::parse(rest)
                .map(Self::Click)
                .ok_or_else(|| format!("unknown click target '{rest}'")),
            "lang" | "language" => {
                if rest.is_empty() {
                    return Ok(Self::Lang(None));
                }
                Language::parse(rest)
                    .map(|l| Self::Lang(Some(l)))
                    .ok_or_else(|| format!("unknown language '{rest}', expected en or te"))
            }
            "export" | "csv" => {
                if rest.is_empty() {
                    return Err("export needs a file path".to_string());
                }
                Ok(Self::Export(PathBuf::from(rest)))
            }
            "report" => {
                if rest.is_empty() {
                    return Err("report needs a file path".to_string());
                }
                Ok(Self::Report(PathBuf::from(rest)))
            }
            "reload" | "refresh" => Ok(Self::Reload),
            "stats" => Ok(Self::Stats),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

pub enum Step {
    Continue(String),
    Quit,
}

fn redraw(dashboard: &Dashboard, color: bool) -> Step {
    Step::Continue(dashboard.render(color))
}

pub async fn execute(
    dashboard: &mut Dashboard,
    source: &Source,
    command: Command,
    color: bool,
) -> Result<Step, String> {
    match command {
        Command::Search(text) => {
            dashboard.set_search(&text);
            Ok(redraw(dashboard, color))
        }
        Command::Filter(filter) => {
            dashboard.set_filter(filter);
            Ok(redraw(dashboard, color))
        }
        Command::Open(n) => {
            if dashboard.select_row(n - 1) {
                return Ok(redraw(dashboard, color));
            }
            let shown = dashboard.visible().len();
            let notice = if n > shown {
                format!("no row {n}, {shown} rows shown\n")
            } else {
                format!("row {n} has no AI explanation\n")
            };
            Ok(Step::Continue(notice))
        }
        Command::Close => {
            dashboard.close_detail();
            Ok(redraw(dashboard, color))
        }
        Command::Click(target) => {
            dashboard.handle_pointer(target);
            Ok(redraw(dashboard, color))
        }
        Command::Lang(language) => {
            match language {
                Some(l) => dashboard.set_language(l),
                None => {
                    dashboard.toggle_language();
                }
            }
            Ok(redraw(dashboard, color))
        }
        Command::Export(path) => {
            let rows = dashboard
                .export_csv(&path)
                .await
                .map_err(|e| e.to_string())?;
            Ok(Step::Continue(format!(
                "exported {rows} rows to {}\n",
                path.display()
            )))
        }
        Command::Report(path) => {
            let format = output::infer_format_from_path(&path.to_string_lossy())
                .unwrap_or(OutputFormat::Text);
            dashboard
                .write_report(&path, format)
                .await
                .map_err(|e| e.to_string())?;
            Ok(Step::Continue(format!("report written to {}\n", path.display())))
        }
        Command::Reload => {
            dashboard.apply_load(source.load().await);
            Ok(redraw(dashboard, color))
        }
        Command::Stats => Ok(Step::Continue(summary::render_counters(
            &dashboard.stats(),
            &dashboard.locale(),
            color,
        ))),
        Command::Show => Ok(redraw(dashboard, color)),
        Command::Help => Ok(Step::Continue(HELP.to_string())),
        Command::Quit => Ok(Step::Quit),
    }
}

/// Reads one command per line until `quit` or end of input. Each command
/// completes, including any reload, before the next line is read.
pub async fn run<R, W>(
    dashboard: &mut Dashboard,
    source: &Source,
    reader: R,
    out: &mut W,
    color: bool,
) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    loop {
        write!(out, "govpulse> ").map_err(|e| e.to_string())?;
        out.flush().map_err(|e| e.to_string())?;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read command: {e}")),
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}").map_err(|e| e.to_string())?;
                continue;
            }
        };
        match execute(dashboard, source, command, color).await {
            Ok(Step::Continue(text)) => {
                write!(out, "{text}").map_err(|e| e.to_string())?;
            }
            Ok(Step::Quit) => break,
            Err(e) => {
                warn!("command failed: {e}");
                writeln!(out, "{e}").map_err(|e| e.to_string())?;
            }
        }
    }
    writeln!(out).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AiExplanation, RawRecord};

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("filter HIGH"),
            Ok(Command::Filter(RiskFilter::High))
        );
        assert_eq!(
            Command::parse("search  Income Cert "),
            Ok(Command::Search("Income Cert".to_string()))
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(Command::parse("open 2"), Ok(Command::Open(2)));
        assert!(Command::parse("open 0").is_err());
        assert!(Command::parse("open x").is_err());
        assert_eq!(Command::parse("lang"), Ok(Command::Lang(None)));
        assert_eq!(
            Command::parse("lang te"),
            Ok(Command::Lang(Some(Language::Telugu)))
        );
        assert_eq!(
            Command::parse("click backdrop"),
            Ok(Command::Click(PointerTarget::Backdrop))
        );
        assert!(Command::parse("export").is_err());
        assert!(Command::parse("dance").is_err());
        assert_eq!(Command::parse(""), Ok(Command::Show));
    }

    #[tokio::test]
    async fn session_filters_opens_and_dismisses() {
        let dir = tempfile::tempdir().unwrap();
        let feed = dir.path().join("feed.json");
        std::fs::write(&feed, "[]").unwrap();
        let source = Source::File(feed);

        let mut dash = Dashboard::default();
        dash.apply_load(Ok(vec![RawRecord {
            department: Some("Revenue".to_string()),
            service_name: Some("Income Certificate".to_string()),
            workflow_risk: Some("High Delay Risk".to_string()),
            ai_explanation: Some(AiExplanation {
                summary: "multi-level approval".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }]));

        let script = b"filter high\nopen 1\nclick content\nbogus\nclick backdrop\nquit\nfilter normal\n";
        let mut out: Vec<u8> = Vec::new();
        run(&mut dash, &source, &script[..], &mut out, false)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("multi-level approval"));
        assert!(text.contains("unknown command 'bogus'"));
        assert!(!dash.modal().is_open());
        assert_eq!(dash.view().filter, RiskFilter::High);
    }

    #[tokio::test]
    async fn open_without_panel_prints_notice() {
        let source = Source::File(PathBuf::from("unused.json"));
        let mut dash = Dashboard::default();
        dash.apply_load(Ok(vec![RawRecord {
            department: Some("Revenue".to_string()),
            service_name: Some("No Property Application Service".to_string()),
            ..Default::default()
        }]));

        let text = match execute(&mut dash, &source, Command::Open(1), false).await {
            Ok(Step::Continue(text)) => text,
            _ => panic!("expected a notice"),
        };
        assert_eq!(text, "row 1 has no AI explanation\n");

        let text = match execute(&mut dash, &source, Command::Open(4), false).await {
            Ok(Step::Continue(text)) => text,
            _ => panic!("expected a notice"),
        };
        assert_eq!(text, "no row 4, 1 rows shown\n");
        assert!(!dash.modal().is_open());
    }

    #[tokio::test]
    async fn reload_replaces_dataset_from_source() {
        let dir = tempfile::tempdir().unwrap();
        let feed = dir.path().join("feed.json");
        std::fs::write(
            &feed,
            r#"[{"department":"Revenue","service_name":"A","workflow_risk":"Normal"}]"#,
        )
        .unwrap();
        let source = Source::File(feed);
        let mut dash = Dashboard::default();
        let step = execute(&mut dash, &source, Command::Reload, false)
            .await
            .unwrap();
        assert!(matches!(step, Step::Continue(_)));
        assert_eq!(dash.stats().total, 1);
    }
}
