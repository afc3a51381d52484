use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "govpulse",
    version,
    about = "terminal dashboard for the GovPulse SLA workflow-risk feed",
    long_about = "GovPulse loads service workflows from the risk backend and shows counters, a risk chart and a filterable table with AI explanations.\n\nExamples:\n  govpulse\n  govpulse -f high -s revenue\n  govpulse -i ./services.json -o report.html\n  govpulse --interactive --lang te\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'u',
        long = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "Backend base URL; services are read from <URL>/services/explain."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'i',
        long = "input-file",
        visible_alias = "if",
        value_name = "FILE",
        help_heading = "Input",
        help = "Load the services feed from a local JSON file instead of the backend."
    )]
    pub input_file: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        visible_alias = "cfg",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.govpulse/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file (at --config or the default location) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'f',
        long = "filter",
        value_name = "RISK",
        help_heading = "View",
        help = "Risk filter: all, high or normal."
    )]
    pub filter: Option<String>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "View",
        help = "Case-insensitive search over department and service name."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'l',
        long = "lang",
        visible_alias = "language",
        value_name = "LANG",
        help_heading = "View",
        help = "Interface language: en or te."
    )]
    pub language: Option<String>,

    #[arg(
        long = "interactive",
        visible_alias = "it",
        help_heading = "View",
        help = "Keep the dashboard open and read commands from stdin."
    )]
    pub interactive: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write a report of the full dataset to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Report format (text, json, csv, html). Inferred from the file extension when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,
}
