use crate::cli::args::CliArgs;
use crate::i18n::Language;
use crate::output::OutputFormat;
use crate::view::RiskFilter;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.filter.as_deref() {
        RiskFilter::parse(raw)
            .ok_or_else(|| format!("invalid --filter '{raw}', expected all, high or normal"))?;
    }
    if let Some(raw) = args.language.as_deref() {
        Language::parse(raw).ok_or_else(|| format!("invalid --lang '{raw}', expected en or te"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw).ok_or_else(|| {
            format!("invalid --output-format '{raw}', expected text, json, csv or html")
        })?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(url) = args.url.as_deref() {
        reqwest::Url::parse(url).map_err(|e| format!("invalid --url '{url}': {e}"))?;
    }
    if args.url.is_some() && args.input_file.is_some() {
        return Err("use either --url or --input-file, not both".to_string());
    }
    Ok(())
}
