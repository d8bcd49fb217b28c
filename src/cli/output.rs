use crate::{Correction, Report, Verdict};
use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonResult<'a> {
    word: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    suggestions: &'a [String],
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    queries: usize,
    ok: usize,
    corrected: usize,
    unknown: usize,
    results: Vec<JsonResult<'a>>,
}

/// One output line: `word - ok`, `word -> a, b` or `word -?`.
pub fn format_correction(correction: &Correction, colored_output: bool) -> String {
    let word = &correction.word;

    match (&correction.verdict, colored_output) {
        (Verdict::Ok, false) => format!("{} - ok", word),
        (Verdict::Ok, true) => format!("{} {}", word, "- ok".green()),
        (Verdict::Suggestions(words), false) => format!("{} -> {}", word, words.join(", ")),
        (Verdict::Suggestions(words), true) => {
            let suggestions = words
                .iter()
                .map(|s| s.yellow().bold().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} {} {}", word, "->".dimmed(), suggestions)
        }
        (Verdict::Unknown, false) => format!("{} -?", word),
        (Verdict::Unknown, true) => format!("{} {}", word, "-?".red().bold()),
    }
}

pub fn format_json(report: &Report) -> Result<String> {
    let results = report
        .corrections
        .iter()
        .map(|c| {
            let (status, suggestions) = match &c.verdict {
                Verdict::Ok => ("ok", &[][..]),
                Verdict::Suggestions(words) => ("corrected", words.as_slice()),
                Verdict::Unknown => ("unknown", &[][..]),
            };
            JsonResult {
                word: &c.word,
                status,
                suggestions,
            }
        })
        .collect();

    let output = JsonOutput {
        queries: report.corrections.len(),
        ok: report.ok_count(),
        corrected: report.corrected_count(),
        unknown: report.unknown_count(),
        results,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    colored_output: bool,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for correction in &report.corrections {
                writeln!(out, "{}", format_correction(correction, colored_output))?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", format_json(report)?)?,
    }
    out.flush()?;
    Ok(())
}

pub fn print_report(report: &Report, colored_output: bool, format: &OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_report(&mut out, report, colored_output, format)
}

/// Summary counts, written to stderr so stdout stays machine-readable.
pub fn print_summary(report: &Report, colored: bool) {
    let total = report.corrections.len();
    let query_word = if total == 1 { "query" } else { "queries" };
    let (ok, corrected, unknown) = (
        report.ok_count(),
        report.corrected_count(),
        report.unknown_count(),
    );

    eprintln!();
    if colored {
        eprintln!(
            "{} {}: {} ok, {} corrected, {} unknown",
            total.to_string().bold(),
            query_word,
            ok.to_string().green().bold(),
            corrected.to_string().yellow().bold(),
            unknown.to_string().red().bold()
        );
    } else {
        eprintln!(
            "{} {}: {} ok, {} corrected, {} unknown",
            total, query_word, ok, corrected, unknown
        );
    }
}
