use std::path::PathBuf;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::BufReader;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::dashboard::Dashboard;
use crate::fetcher::{Fetcher, FetcherOptions, Source, DEFAULT_BASE_URL};
use crate::i18n::{Language, UiKey};
use crate::output::{self, OutputFormat};
use crate::repl;
use crate::view::{RiskFilter, ViewState};

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<8}: {}", label, value);
}

/// Help text grouped by `help_heading`, in declaration order.
fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = format!(
        "{} {}\n",
        cmd.get_name(),
        cmd.get_version().unwrap_or_default()
    );
    if let Some(about) = cmd.get_about() {
        out.push_str(&format!("{about}\n"));
    }
    if let Some(long_about) = cmd.get_long_about() {
        out.push_str(&format!("\n{long_about}\n"));
    }
    out.push_str(&format!("\nUsage: {} [OPTIONS]\n\n", cmd.get_name()));

    let mut headings: Vec<&str> = Vec::new();
    for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
        let heading = arg.get_help_heading().unwrap_or("Options");
        if !headings.contains(&heading) {
            headings.push(heading);
        }
    }

    for heading in headings {
        out.push_str(&format!("{heading}:\n"));
        let args = cmd
            .get_arguments()
            .filter(|a| !a.is_hide_set())
            .filter(|a| a.get_help_heading().unwrap_or("Options") == heading);
        for arg in args {
            let mut flags: Vec<String> = Vec::new();
            if let Some(short) = arg.get_short() {
                flags.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                flags.push(format!("--{long}"));
            }
            for alias in arg.get_visible_aliases().unwrap_or_default() {
                flags.push(format!("--{alias}"));
            }
            let mut line = flags.join(", ");
            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                line.push_str(&format!(" <{value_name}>"));
            }
            out.push_str(&format!("  {line}\n"));
            if let Some(help) = arg.get_help() {
                out.push_str(&format!("          {}\n", help.to_string().trim()));
            }
            out.push('\n');
        }
    }
    out
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub base_url: String,
    pub input_file: Option<PathBuf>,
    pub timeout: u64,
    pub proxy: Option<String>,
    pub view: ViewState,
    pub output: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub no_color: bool,
    pub interactive: bool,
    pub verbose: u8,
}

impl RunConfig {
    pub fn source(&self) -> Result<Source, String> {
        if let Some(path) = self.input_file.as_ref() {
            return Ok(Source::File(path.clone()));
        }
        let fetcher = Fetcher::new(&FetcherOptions {
            base_url: self.base_url.clone(),
            timeout_seconds: self.timeout,
            proxy: self.proxy.clone(),
        })
        .map_err(|e| e.to_string())?;
        Ok(Source::Http(fetcher))
    }

    /// The explicit format wins, then the file extension, then plain text.
    pub fn report_format(&self) -> OutputFormat {
        self.output_format
            .or_else(|| {
                self.output
                    .as_ref()
                    .and_then(|p| output::infer_format_from_path(&p.to_string_lossy()))
            })
            .unwrap_or(OutputFormat::Text)
    }
}

pub fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };
    let interactive = args.interactive || cfg.interactive.unwrap_or(false);

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(30);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let proxy = args
        .proxy
        .or(cfg.proxy)
        .filter(|p| !p.trim().is_empty());

    // a source given on the command line replaces the configured one
    let (url, input_file) = if args.url.is_some() || args.input_file.is_some() {
        (args.url, args.input_file)
    } else {
        (cfg.url, cfg.input_file)
    };
    if url.is_some() && input_file.is_some() {
        return Err("use either url or input_file, not both".to_string());
    }
    let base_url = url
        .map(|u| u.trim().to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    reqwest::Url::parse(&base_url).map_err(|e| format!("invalid url '{base_url}': {e}"))?;
    let input_file = input_file.map(|p| config::expand_tilde(&p));

    let filter_raw = args
        .filter
        .or(cfg.filter)
        .unwrap_or_else(|| "all".to_string());
    let filter = RiskFilter::parse(&filter_raw)
        .ok_or_else(|| format!("invalid filter '{filter_raw}', expected all, high or normal"))?;
    let search = args.search.or(cfg.search).unwrap_or_default();
    let language_raw = args
        .language
        .or(cfg.language)
        .unwrap_or_else(|| "en".to_string());
    let language = Language::parse(&language_raw)
        .ok_or_else(|| format!("invalid language '{language_raw}', expected en or te"))?;

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => Some(OutputFormat::parse(&raw).ok_or_else(|| {
            format!("invalid output format '{raw}', expected text, json, csv or html")
        })?),
        None => None,
    };

    Ok(RunConfig {
        base_url,
        input_file,
        timeout,
        proxy,
        view: ViewState::default()
            .with_filter(filter)
            .with_search(&search)
            .with_language(language),
        output,
        output_format,
        no_color,
        interactive,
        verbose: args.verbose,
    })
}

/// `RUST_LOG` takes precedence over `-v`. Logs go to stderr so the dashboard
/// on stdout stays clean.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("govpulse={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn loading_spinner(message: &str) -> Result<ProgressBar, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} {msg} [{elapsed}]")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

pub async fn load_into(dashboard: &mut Dashboard, source: &Source) -> Result<bool, String> {
    let pb = loading_spinner(dashboard.locale().ui(UiKey::Loading))?;
    let result = source.load().await;
    pb.finish_and_clear();
    Ok(dashboard.apply_load(result))
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    let color = !run.no_color;
    colored::control::set_override(color);

    let source = run.source()?;
    format_kv_line("Source", &source.describe());
    format_kv_line(
        "View",
        &format!(
            "filter={} search={} lang={}",
            run.view.filter.as_str(),
            if run.view.search.is_empty() {
                "none"
            } else {
                run.view.search.as_str()
            },
            run.view.language.code()
        ),
    );

    let mut dashboard = Dashboard::new(run.view.clone());
    let loaded = load_into(&mut dashboard, &source).await?;
    print!("{}", dashboard.render(color));

    if let Some(path) = run.output.as_ref() {
        if loaded {
            dashboard
                .write_report(path, run.report_format())
                .await
                .map_err(|e| e.to_string())?;
            format_kv_line("Report", &path.display().to_string());
        } else {
            // an existing report from an earlier run stays untouched
            warn!(path = %path.display(), "load failed, report not written");
            format_kv_line("Report", "skipped (load failed)");
        }
    }

    if run.interactive {
        info!("interactive mode");
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        repl::run(&mut dashboard, &source, stdin, &mut stdout, color).await?;
        return Ok(());
    }

    if !loaded {
        return Err(format!(
            "could not load services from {}",
            source.describe()
        ));
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                print!("{}", CliArgs::command().render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_logging(args.verbose);

    let explicit_config = args.config.as_deref().map(config::expand_tilde);
    if args.init_config {
        let path = explicit_config
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine a config location, pass --config".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!("config written to {}", path.display());
        return Ok(());
    }

    let cfg = match explicit_config.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };
    debug!(?cfg, "config loaded");

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
