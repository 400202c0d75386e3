//! `udur`: print durations in human-readable form.
//!
//! ```text
//! $ udur 3600 54000
//! 3s 600ms
//! 54s
//!
//! $ udur -l --unit=s 3600
//! 1 hour
//!
//! $ udur --parse -m "90 minutes" -- "-2h"
//! 1 hr 30 mins
//! 2 hrs ago
//! ```

use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use udur::{Duration, Formatter, Locale, Style, Totals};

/// Display durations in short, medium, long, JSON, or tabular form.
#[derive(Parser, Debug)]
#[command(
    name = "udur",
    version,
    disable_version_flag = true,
    allow_negative_numbers = true,
    args_override_self = true,
    after_help = "Negative durations print as their absolute value followed by \"ago\".\n\
                  Use `--` before duration text that starts with a dash."
)]
struct Cli {
    /// Duration values: numbers in `--unit`, or duration text with `--parse`
    #[arg(value_name = "VALUE")]
    values: Vec<String>,

    /// Display durations in short format (e.g., 1h 30m)
    #[arg(short, long)]
    short: bool,

    /// Display durations in medium format (e.g., 1 hr 30 mins)
    #[arg(short, long)]
    medium: bool,

    /// Display durations in long format (e.g., 1 hour 30 minutes)
    #[arg(short, long)]
    long: bool,

    /// Display the total of every unit as JSON
    #[arg(long, conflicts_with = "table")]
    json: bool,

    /// Display the total of every unit as a table
    #[arg(long)]
    table: bool,

    /// Read values as duration text such as "1h 30m" instead of numbers
    #[arg(short, long)]
    parse: bool,

    /// Unit of numeric values (ms, s, m, h, d, or any longer spelling)
    #[arg(short, long, env = "DURATION_UNIT", default_value = "ms")]
    unit: String,

    /// Locale to format in (en, es, fr, de); others fall back to en
    #[arg(long, env = "DURATION_LOCALE", default_value = "en")]
    locale: String,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    fn styles(&self) -> Vec<Style> {
        let selected = [(self.short, Style::Short), (self.medium, Style::Medium), (self.long, Style::Long)];
        let styles: Vec<Style> = selected.into_iter()
            .filter_map(|(on, style)| on.then_some(style))
            .collect();

        if styles.is_empty() {
            vec![Style::Short]
        } else {
            styles
        }
    }

    fn durations(&self) -> Result<Vec<Duration>> {
        if self.values.is_empty() {
            bail!("provide a duration value as an argument");
        }

        let locale = Locale::from_code(&self.locale);

        self.values.iter()
            .map(|value| -> Result<Duration> {
                let duration = if self.parse {
                    Duration::parse(value)?
                } else {
                    let number = value.trim().parse::<f64>().ok().filter(|n| n.is_finite());
                    match number {
                        Some(number) => Duration::from_unit(number, &self.unit),
                        None => bail!("provide a number as an argument, found {:?}", value),
                    }
                };

                Ok(duration.with_locale(locale))
            })
            .collect()
    }
}

fn run(cli: &Cli) -> Result<String> {
    let durations = cli.durations()?;

    if cli.json {
        let json = durations.iter()
            .map(|d| serde_json::to_string_pretty(&d.to_json()))
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(json.join("\n"));
    }

    if cli.table {
        let totals: Vec<Totals> = durations.iter().map(Duration::to_json).collect();
        return Ok(table(&totals));
    }

    let formatter = Formatter::default();
    let mut lines = vec![];
    for style in cli.styles() {
        for duration in &durations {
            let line = if duration.is_negative() {
                format!("{} ago", formatter.styled(&duration.negate(), style))
            } else {
                formatter.styled(duration, style)
            };

            lines.push(if line.is_empty() { "0".into() } else { line });
        }
    }

    Ok(lines.join("\n"))
}

/// Renders `rows` as an ASCII grid with one column per [`Totals`] field, all
/// columns as wide as the widest cell.
fn table(rows: &[Totals]) -> String {
    let cells: Vec<Vec<String>> = rows.iter()
        .map(|totals| totals.values().iter().map(f64::to_string).collect())
        .collect();

    let width = Totals::FIELDS.iter()
        .map(|field| field.len())
        .chain(cells.iter().flatten().map(String::len))
        .max()
        .unwrap_or(0);

    let header = row(Totals::FIELDS.iter().copied(), width);
    let rule = |c: char| format!("+{}+", c.to_string().repeat(header.len() - 2));

    let mut out = vec![rule('-'), header.clone(), rule('=')];
    out.extend(cells.iter().map(|cells| row(cells.iter().map(String::as_str), width)));
    out.push(rule('-'));
    out.join("\n")
}

fn row<'a>(values: impl Iterator<Item = &'a str>, width: usize) -> String {
    let padded: Vec<String> = values.map(|v| format!("{:width$}", v)).collect();
    format!("| {} |", padded.join(" | "))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let args = ["udur", "--unit", "ms", "--locale", "en"].iter().chain(args);
        Cli::try_parse_from(args).unwrap()
    }

    fn run_args(args: &[&str]) -> Result<String> {
        run(&cli(args))
    }

    #[test]
    fn default_is_short() {
        assert_eq!(run_args(&["3600", "54000"]).unwrap(), "3s 600ms\n54s");
    }

    #[test]
    fn styles_and_units() {
        assert_eq!(run_args(&["-m", "3600"]).unwrap(), "3 secs 600 ms");
        assert_eq!(run_args(&["-l", "--unit=s", "3600"]).unwrap(), "1 hour");
        assert_eq!(run_args(&["-s", "-l", "-u", "m", "90"]).unwrap(), "1h 30m\n1 hour 30 minutes");
    }

    #[test]
    fn negative_and_zero() {
        assert_eq!(run_args(&["-90000"]).unwrap(), "1m 30s ago");
        assert_eq!(run_args(&["0", "1"]).unwrap(), "0\n1ms");
        assert_eq!(run_args(&["0.5"]).unwrap(), "0");
    }

    #[test]
    fn parsed_values() {
        assert_eq!(run_args(&["--parse", "-m", "90 minutes", "1 day"]).unwrap(), "1 hr 30 mins\n1 day");
        assert_eq!(run_args(&["--parse", "--", "-2h"]).unwrap(), "2h ago");
        assert!(run_args(&["--parse", "2 invalid units"]).is_err());
    }

    #[test]
    fn localized() {
        assert_eq!(run_args(&["--locale", "es", "-l", "7200000"]).unwrap(), "2 horas");
        assert_eq!(run_args(&["--locale", "xx", "-l", "7200000"]).unwrap(), "2 hours");
        assert_eq!(run_args(&["--locale", "fr-CA", "-s", "86400000"]).unwrap(), "1j");
    }

    #[test]
    fn version_flag() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["udur", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        }

        assert!(Cli::try_parse_from(["udur", "-V"]).is_err());
    }

    #[test]
    fn errors() {
        let err = run_args(&[]).unwrap_err();
        assert_eq!(err.to_string(), "provide a duration value as an argument");

        let err = run_args(&["ten"]).unwrap_err();
        assert_eq!(err.to_string(), "provide a number as an argument, found \"ten\"");

        assert!(run_args(&["inf"]).is_err());
    }

    #[test]
    fn json() {
        let out = run_args(&["--json", "-u", "d", "1"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["hours"], 24.0);
        assert_eq!(value["milliseconds"], 86_400_000.0);
        assert!(out.contains('\n'));
    }

    #[test]
    fn tables() {
        let out = run_args(&["--table", "1000"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("+---") && lines[0].ends_with('+'));
        assert!(lines[1].starts_with("| milliseconds "));
        assert!(lines[1].contains(" | seconds ") && lines[1].ends_with(" |"));
        assert!(lines[2].starts_with("+===="));
        assert!(lines[3].starts_with("| 1000 ") && lines[3].contains(" | 1 "));
        assert_eq!(lines[0].len(), lines[1].len());
        assert_eq!(lines[1].len(), lines[3].len());
    }
}
