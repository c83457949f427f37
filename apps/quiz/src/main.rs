use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quiz::models::Answers;
use quiz::quiz::scoring::{boundary_notes, score_all};
use quiz::quiz::selection::{dimension_counts, select_balanced, ALLOWED_TOTALS};
use quiz::report::{splits_from_summary, ReportBuilder};
use quiz::security::tokens::{DEFAULT_RESUME_CODE_LENGTH, DEFAULT_URL_TOKEN_BYTES};
use quiz::security::{hash_token, new_resume_code, new_url_token, ExpiryChoice};
use quiz::Config;

#[derive(Parser)]
#[command(name = "quiz", version, about = "Balanced personality quiz: draw, score, report")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report question pool health and report-table coverage
    Check {
        #[arg(long)]
        questions: Option<PathBuf>,
        #[arg(long)]
        reports: Option<PathBuf>,
    },
    /// Draw a balanced quiz and print it as JSON
    Draw {
        #[arg(long)]
        total: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        questions: Option<PathBuf>,
    },
    /// Score an answers file (`{"q1": 5, ...}`) and print the Markdown report
    Score {
        #[arg(long)]
        answers: PathBuf,
        #[arg(long)]
        questions: Option<PathBuf>,
        #[arg(long)]
        reports: Option<PathBuf>,
    },
    /// Issue a resume token, resume code and token digest
    Token {
        #[arg(long, default_value = "7d")]
        expiry: ExpiryChoice,
    },
}

fn main() -> Result<()> {
    // Load configuration first (malformed env values abort here)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting quiz v{}", env!("CARGO_PKG_VERSION"));
    if config.uses_dev_secret() {
        warn!("MBTI_APP_SECRET not set; using the development secret");
    }

    match Cli::parse().command {
        Command::Check { questions, reports } => {
            run_check(&config, questions.as_deref(), reports.as_deref())
        }
        Command::Draw {
            total,
            seed,
            questions,
        } => run_draw(&config, total, seed, questions.as_deref()),
        Command::Score {
            answers,
            questions,
            reports,
        } => run_score(
            &config,
            &answers,
            questions.as_deref(),
            reports.as_deref(),
        ),
        Command::Token { expiry } => run_token(&config, expiry),
    }
}

fn run_check(
    config: &Config,
    questions: Option<&Path>,
    reports: Option<&Path>,
) -> Result<()> {
    let bank = config.load_question_bank(questions)?;
    let table = config.load_report_table(reports)?;
    let active = bank.active();
    let counts = dimension_counts(&active);
    let smallest = counts.values().copied().min().unwrap_or(0);

    println!("Questions: {} total, {} active", bank.len(), active.len());
    for (dim, count) in &counts {
        println!("  {dim}: {count}");
    }
    for total in ALLOWED_TOTALS {
        let per_dim = total / counts.len();
        let status = if smallest >= per_dim { "ok" } else { "insufficient" };
        println!("  {total} questions ({per_dim} per dimension): {status}");
    }

    let missing = table.missing_type_codes();
    if missing.is_empty() {
        println!("Type reports: all 16 type codes covered");
    } else {
        let codes: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
        warn!(missing = missing.len(), "Type report table is incomplete");
        println!("Type reports: missing {}", codes.join(", "));
    }
    Ok(())
}

fn run_draw(
    config: &Config,
    total: usize,
    seed: Option<u64>,
    questions: Option<&Path>,
) -> Result<()> {
    let bank = config.load_question_bank(questions)?;
    let drawn = select_balanced(&bank.active(), total, seed)?;
    info!(total, ?seed, "Drew balanced quiz");

    let out = json!({
        "total": total,
        "seed": seed,
        "questions": drawn,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_score(
    config: &Config,
    answers_path: &Path,
    questions: Option<&Path>,
    reports: Option<&Path>,
) -> Result<()> {
    let bank = config.load_question_bank(questions)?;
    let raw = std::fs::read_to_string(answers_path)
        .with_context(|| format!("Failed to read answers from {}", answers_path.display()))?;
    let answers: Answers = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid answers file {}", answers_path.display()))?;

    let summary = score_all(bank.questions(), &answers);
    let notes = boundary_notes(&summary, config.boundary_gap_percent);
    info!(
        type_code = %summary.type_code,
        answered = answers.len(),
        near_boundary = notes.len(),
        "Scored answers"
    );

    let builder = ReportBuilder::new(config.load_report_table(reports)?);
    let report = builder.build_report(
        summary.type_code.as_str(),
        &splits_from_summary(&summary),
        &notes,
    );
    print!("{report}");
    Ok(())
}

fn run_token(config: &Config, expiry: ExpiryChoice) -> Result<()> {
    let token = new_url_token(DEFAULT_URL_TOKEN_BYTES);
    let out = json!({
        "token": token,
        "resume_code": new_resume_code(DEFAULT_RESUME_CODE_LENGTH),
        "token_hash": hash_token(&token, &config.app_secret),
        "expiry": expiry.as_str(),
        "expires_at": expiry.expires_at(Utc::now()),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
