use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use jdmatch::{
    CandidateRecord, Criteria, FitSummary, Matcher, MatcherConfig, ScoreStats, StructuralMatches,
    VectorMatches,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Match job descriptions to candidate profiles
#[derive(Parser, Debug)]
#[command(name = "jdmatch")]
#[command(about = "Rank candidates against a job description", long_about = None)]
struct Args {
    /// JSON config file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank candidates against free job-description text
    Rank {
        /// JSON array of candidate records
        #[arg(long)]
        candidates: PathBuf,

        /// Override the configured number of results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Read the job description from a file instead of the argument
        #[arg(long, conflicts_with = "text")]
        text_file: Option<PathBuf>,

        /// Job description text
        text: Option<String>,
    },
    /// Score every candidate against structural must-have criteria
    Score {
        #[arg(long)]
        candidates: PathBuf,

        /// JSON object with skills, soft_skills, languages and domain
        #[arg(long)]
        criteria: PathBuf,
    },
    /// Summarize the fit of a candidate corpus
    Inspect {
        #[arg(long)]
        candidates: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => MatcherConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatcherConfig::default(),
    };

    match args.command {
        Command::Rank {
            candidates,
            top_k,
            text_file,
            text,
        } => {
            if let Some(k) = top_k {
                config.top_k = k;
            }
            let text = match (text, text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => anyhow::bail!("provide job description text or --text-file"),
            };
            let matcher = load_matcher(config, &candidates)?;
            let matches = matcher.rank_text(&text)?;
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
                Format::Table => print_vector_matches(&matches),
            }
        }
        Command::Score {
            candidates,
            criteria: criteria_path,
        } => {
            let raw = std::fs::read_to_string(&criteria_path)
                .with_context(|| format!("reading {}", criteria_path.display()))?;
            let criteria: Criteria = serde_json::from_str(&raw)
                .with_context(|| format!("parsing criteria {}", criteria_path.display()))?;
            let matcher = load_matcher(config, &candidates)?;
            let matches = matcher.score_criteria(&criteria)?;
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
                Format::Table => print_structural_matches(&matches),
            }
        }
        Command::Inspect { candidates } => {
            let matcher = load_matcher(config, &candidates)?;
            let summary = matcher.summary()?;
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                Format::Table => print_summary(&summary),
            }
        }
    }

    Ok(())
}

fn load_matcher(config: MatcherConfig, candidates: &Path) -> anyhow::Result<Matcher> {
    let raw = std::fs::read_to_string(candidates)
        .with_context(|| format!("reading candidates {}", candidates.display()))?;
    let records: Vec<CandidateRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing candidates {}", candidates.display()))?;
    info!("Loaded {} candidate records", records.len());

    let matcher = Matcher::new(config)?;
    let version = matcher.load(records)?;
    info!("Fitted corpus version {}", version);
    Ok(matcher)
}

fn print_vector_matches(matches: &VectorMatches) {
    if matches.matched.is_empty() {
        println!("No vocabulary tokens found in the job description");
    }
    for (field, tokens) in &matches.matched {
        println!("{}: {}", field, tokens.join(", "));
    }
    println!();
    println!("{:<6} {:<24} {:>8}", "RANK", "CANDIDATE", "SCORE");
    for (rank, result) in matches.results.iter().enumerate() {
        println!("{:<6} {:<24} {:>8.4}", rank + 1, result.id.to_string(), result.score);
    }
}

fn print_structural_matches(matches: &StructuralMatches) {
    println!(
        "{:<6} {:<24} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "RANK", "CANDIDATE", "SCORE", "SKILLS", "SOFT", "LANG", "DOMAIN"
    );
    for (rank, result) in matches.results.iter().enumerate() {
        let s = &result.sub_scores;
        println!(
            "{:<6} {:<24} {:>8.4} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            rank + 1,
            result.id.to_string(),
            result.score,
            s.skills,
            s.soft_skills,
            s.languages,
            s.domain
        );
    }

    let stats = ScoreStats::compute(&matches.results);
    println!();
    println!(
        "{} candidates, {} matched, avg {:.4}, best {:.4}",
        stats.candidates_count, stats.matched_count, stats.avg_score, stats.best_score
    );
    if let Some(axis) = stats.top_contributing_axis {
        println!("Top contributing axis: {}", axis);
    }
}

fn print_summary(summary: &FitSummary) {
    println!("Version:    {}", summary.version);
    println!("Records:    {}", summary.records);
    println!("Dimensions: {}", summary.dim);
    println!();
    for (field, size) in &summary.vocabularies {
        println!("{:<28} {:>6} tokens", field, size);
    }
    for bounds in &summary.bounds {
        println!(
            "{:<28} min {} max {} ({} values)",
            bounds.field, bounds.min, bounds.max, bounds.observed
        );
    }
    if !summary.warnings.is_empty() {
        println!();
        for warning in &summary.warnings {
            println!("warning: {}", warning);
        }
    }
}
