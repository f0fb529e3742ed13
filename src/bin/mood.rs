//! Mood CLI - Command-line interface for Mood Insights
//!
//! Commands:
//! - analyze: Analyze mood entries from a file or stdin
//! - log: Interactively log daily moods and print a report
//! - validate: Check mood entries without analyzing them

use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

use mood_insights::report::render_text;
use mood_insights::{
    AnalysisConfig, EntryParser, LexiconSentiment, MoodAnalyzer, MoodEntry, MoodReport, VERSION,
};

/// Mood - Turn daily mood journals into insights
#[derive(Parser)]
#[command(name = "mood")]
#[command(version = VERSION)]
#[command(about = "Analyze daily mood entries for patterns and trends", long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable info logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze mood entries from a file
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Analysis configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Interactively log moods, most recent day first
    Log {
        /// Save collected entries to a JSON file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Analysis configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate mood entries
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one entry per line)
    Ndjson,
    /// JSON array of entries
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Icon and text per insight
    Text,
    /// Newline-delimited JSON (one insight per line)
    Ndjson,
    /// Full report as JSON
    Json,
    /// Full report as pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("mood_insights={},mood={}", log_level, log_level))
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), MoodCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            input_format,
            output_format,
            config,
        } => cmd_analyze(&input, input_format, output_format, config.as_deref()),

        Commands::Log {
            save,
            output_format,
            config,
        } => cmd_log(save.as_deref(), output_format, config.as_deref()),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),
    }
}

fn cmd_analyze(
    input: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), MoodCliError> {
    let analyzer = load_analyzer(config)?;
    let entries = read_entries(input, &input_format)?;

    if entries.is_empty() {
        return Err(MoodCliError::NoEntries);
    }

    info!(entries = entries.len(), "Analyzing mood entries");
    let report = analyzer.analyze_report(&entries, &LexiconSentiment::new())?;
    print!("{}", format_output(&report, &output_format)?);

    Ok(())
}

fn cmd_log(
    save: Option<&Path>,
    output_format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), MoodCliError> {
    let analyzer = load_analyzer(config)?;
    let interactive = atty::is(atty::Stream::Stdin);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let entries = collect_entries(
        stdin.lock(),
        &mut stdout,
        &mut stderr,
        Local::now().date_naive(),
        interactive,
    )?;

    if entries.is_empty() {
        if interactive {
            println!("No data entered. Exiting.");
        }
        return nothing_logged(interactive);
    }

    if let Some(path) = save {
        fs::write(path, serde_json::to_string_pretty(&entries)?)?;
        debug!(path = %path.display(), "Saved entries");
    }

    if interactive {
        println!("\nInput complete. Generating your report...");
    }

    let report = analyzer.analyze_report(&entries, &LexiconSentiment::new())?;
    print!("{}", format_output(&report, &output_format)?);

    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), MoodCliError> {
    let entries = read_entries(input, &input_format)?;
    let problems = EntryParser::validate_entries(&entries);

    let report = ValidationReport {
        total_entries: entries.len(),
        valid_entries: entries.len() - problems.len(),
        invalid_entries: problems.len(),
        errors: problems
            .into_iter()
            .map(|p| ValidationErrorDetail {
                index: p.index,
                date: p.date,
                error: p.problem,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total entries:   {}", report.total_entries);
        println!("Valid entries:   {}", report.valid_entries);
        println!("Invalid entries: {}", report.invalid_entries);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Entry {} ({}): {}", err.index, err.date, err.error);
            }
        }
    }

    if report.invalid_entries > 0 {
        Err(MoodCliError::ValidationFailed(report.invalid_entries))
    } else {
        Ok(())
    }
}

// Helper functions

fn load_analyzer(config: Option<&Path>) -> Result<MoodAnalyzer, MoodCliError> {
    let config = match config {
        Some(path) => AnalysisConfig::from_json(&fs::read_to_string(path)?)?,
        None => AnalysisConfig::default(),
    };
    Ok(MoodAnalyzer::with_config(config)?)
}

fn read_entries(input: &Path, format: &InputFormat) -> Result<Vec<MoodEntry>, MoodCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let entries = match format {
        InputFormat::Ndjson => EntryParser::parse_ndjson(&input_data)?,
        InputFormat::Json => EntryParser::parse_array(&input_data)?,
    };
    Ok(entries)
}

fn format_output(report: &MoodReport, format: &OutputFormat) -> Result<String, MoodCliError> {
    match format {
        OutputFormat::Text => Ok(format!("\n{}", render_text(&report.insights))),
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for insight in &report.insights {
                lines.push(serde_json::to_string(insight)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(report)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)? + "\n"),
    }
}

/// An interactive session ended with "done" before any entry is a normal exit;
/// piped input with no entries is an error.
fn nothing_logged(interactive: bool) -> Result<(), MoodCliError> {
    if interactive {
        Ok(())
    } else {
        Err(MoodCliError::NoEntries)
    }
}

/// Collect entries starting at `start` and walking back one day per entry,
/// until "done" or end of input. Returned entries are in chronological order.
///
/// Rejected lines are reported on `out` while prompting, otherwise on `diag`.
fn collect_entries<R: BufRead, W: Write, D: Write>(
    mut input: R,
    out: &mut W,
    diag: &mut D,
    start: NaiveDate,
    prompts: bool,
) -> io::Result<Vec<MoodEntry>> {
    let mut entries = Vec::new();
    let mut current = start;

    if prompts {
        writeln!(out, "--- Welcome to Mindful Metrics ---")?;
        writeln!(out, "Let's log your mood for the past few days.")?;
        writeln!(out, "When you're finished entering data, just type 'done'.\n")?;
    }

    loop {
        if prompts {
            write!(
                out,
                "Enter mood score for {} [1-10] (or type 'done' to finish): ",
                current.format("%Y-%m-%d")
            )?;
            out.flush()?;
        }
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        if line.eq_ignore_ascii_case("done") {
            break;
        }

        let mood_score = match line.parse::<i64>() {
            Ok(score) if (1..=10).contains(&score) => score,
            Ok(_) => {
                let msg = "Invalid score. Please enter a number between 1 and 10.";
                if prompts {
                    writeln!(out, "{msg}")?;
                } else {
                    writeln!(diag, "{msg}")?;
                }
                continue;
            }
            Err(_) => {
                let msg = "Invalid input. Please enter a number or 'done'.";
                if prompts {
                    writeln!(out, "{msg}")?;
                } else {
                    writeln!(diag, "{msg}")?;
                }
                continue;
            }
        };

        if prompts {
            write!(out, "Enter any relevant tags, separated by commas (e.g., work, exercise): ")?;
            out.flush()?;
        }
        let tags = read_line(&mut input)?
            .map(|line| parse_tags(&line))
            .unwrap_or_default();

        if prompts {
            write!(out, "Enter a journal entry (optional, press Enter to skip): ")?;
            out.flush()?;
        }
        let journal = read_line(&mut input)?.unwrap_or_default();

        entries.push(MoodEntry::new(
            current.format("%Y-%m-%d").to_string(),
            mood_score,
            tags,
            journal,
        ));

        current = current.checked_sub_days(Days::new(1)).unwrap_or(current);
        if prompts {
            writeln!(out, "{}", "-".repeat(20))?;
        }
    }

    entries.reverse();
    Ok(entries)
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_tags(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// Error types

#[derive(Debug)]
enum MoodCliError {
    Io(io::Error),
    Analysis(mood_insights::AnalysisError),
    Json(serde_json::Error),
    NoEntries,
    ValidationFailed(usize),
}

impl From<io::Error> for MoodCliError {
    fn from(e: io::Error) -> Self {
        MoodCliError::Io(e)
    }
}

impl From<mood_insights::AnalysisError> for MoodCliError {
    fn from(e: mood_insights::AnalysisError) -> Self {
        MoodCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for MoodCliError {
    fn from(e: serde_json::Error) -> Self {
        MoodCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MoodCliError> for CliError {
    fn from(e: MoodCliError) -> Self {
        match e {
            MoodCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MoodCliError::Analysis(e) => CliError {
                code: "ANALYSIS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'mood validate' to find invalid entries".to_string()),
            },
            MoodCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            MoodCliError::NoEntries => CliError {
                code: "NO_ENTRIES".to_string(),
                message: "No mood entries found in input".to_string(),
                hint: Some("Log at least one day".to_string()),
            },
            MoodCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} entries failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_entries: usize,
    valid_entries: usize,
    invalid_entries: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    date: String,
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_entries_walks_back_and_reverses() {
        let script = "7\nwork, coffee ,\ntired but fine\nabc\n11\n9\n\n\ndone\n";
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let entries =
            collect_entries(script.as_bytes(), &mut out, &mut diag, start, false).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "2024-03-09");
        assert_eq!(entries[0].mood_score, 9);
        assert_eq!(entries[0].tags, Some(vec![]));
        assert_eq!(entries[0].journal.as_deref(), Some(""));
        assert_eq!(entries[1].date, "2024-03-10");
        assert_eq!(
            entries[1].tags,
            Some(vec!["work".to_string(), "coffee".to_string()])
        );
        assert_eq!(entries[1].journal.as_deref(), Some("tired but fine"));

        assert!(out.is_empty());
        let rejected = String::from_utf8(diag).unwrap();
        assert!(rejected.contains("Invalid input"));
        assert!(rejected.contains("Invalid score"));
    }

    #[test]
    fn test_collect_entries_reports_rejections_inline_when_prompting() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let entries =
            collect_entries("x\n5\n\n\n".as_bytes(), &mut out, &mut diag, start, true).unwrap();

        assert_eq!(entries.len(), 1);
        assert!(diag.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("Invalid input"));
    }

    #[test]
    fn test_nothing_logged_is_clean_exit_only_when_interactive() {
        assert!(nothing_logged(true).is_ok());
        assert!(matches!(nothing_logged(false), Err(MoodCliError::NoEntries)));
    }

    #[test]
    fn test_collect_entries_stops_at_eof() {
        let mut out = Vec::new();
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let entries =
            collect_entries("5\n".as_bytes(), &mut out, &mut io::sink(), start, true).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(String::from_utf8(out).unwrap().contains("Welcome to Mindful Metrics"));
    }
}
