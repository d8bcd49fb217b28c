use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use spellfix::cli::output::{self, OutputFormat};
use spellfix::config::Overrides;
use spellfix::{parser, Config, Corrector, Report};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spellfix")]
#[command(version, about = "Suggest corrections for words with a single typo", long_about = None)]
struct Cli {
    /// Session files: a word count, that many dictionary words, then the
    /// words to check. Reads stdin when empty or "-"
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Word list loaded into the dictionary before each session
    #[arg(short, long, global = true, env = "SPELLFIX_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Check words on all cores
    #[arg(short, long)]
    parallel: bool,

    /// Print ok/corrected/unknown counts to stderr
    #[arg(long)]
    summary: bool,

    /// Exit with code 1 if any word has no suggestion
    #[arg(long)]
    fail_on_unknown: bool,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check words given as arguments against the --dictionary word list
    Check {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print every word of the --dictionary word list, sorted
    Words,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spellfix={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellfix", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let config = Config::load(Overrides {
        dictionary: cli.dictionary.clone(),
        format: cli.format,
        no_color: cli.no_color,
        parallel: cli.parallel,
    })?;
    let colored = config.color && io::stdout().is_terminal();

    let mut total = Report::default();

    match &cli.command {
        Some(command) => {
            if config.dictionary.is_none() {
                anyhow::bail!("No word list given. Use --dictionary or set `dictionary` in the config file.");
            }
            let corrector = build_corrector(&config, Vec::<String>::new())?;

            match command {
                Commands::Check { words } => {
                    total = corrector.correct_all(words, config.parallel);
                    output::print_report(&total, colored, &config.format)?;
                }
                Commands::Words => {
                    for word in corrector.dictionary().words() {
                        println!("{}", word);
                    }
                }
            }
        }
        None => {
            let stdin = [PathBuf::from("-")];
            let files = if cli.files.is_empty() { &stdin[..] } else { &cli.files[..] };

            // Text streams per session; JSON is one document for the whole run.
            for file in files {
                let report = run_session(file, &config)?;
                if config.format == OutputFormat::Text {
                    output::print_report(&report, colored, &config.format)?;
                }
                total.corrections.extend(report.corrections);
            }
            if config.format == OutputFormat::Json {
                output::print_report(&total, colored, &config.format)?;
            }
        }
    }

    if cli.summary {
        output::print_summary(&total, config.color && io::stderr().is_terminal());
    }

    if cli.fail_on_unknown && total.unknown_count() > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Parse one session, build its dictionary and check its queries.
fn run_session(path: &Path, config: &Config) -> Result<Report> {
    let (name, content) = if path == Path::new("-") {
        let content = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
        ("<stdin>".to_string(), content)
    } else {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        (path.display().to_string(), content)
    };

    let session = parser::parse_session(&content)
        .with_context(|| format!("Invalid session input: {}", name))?;
    info!(
        session = %name,
        dictionary = session.dictionary.len(),
        queries = session.queries.len(),
        "running session"
    );

    let corrector = build_corrector(config, &session.dictionary)?;

    Ok(corrector.correct_all(&session.queries, config.parallel))
}

fn build_corrector<I, S>(config: &Config, words: I) -> Result<Corrector>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Some(path) = &config.dictionary else {
        return Corrector::from_config(config, words);
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message(format!("Loading {}", path.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let corrector = Corrector::from_config(config, words);
    pb.finish_and_clear();

    corrector
}
