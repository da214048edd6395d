use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use resume_rank_core::{
    extract_page_texts, load_folder, load_uploads, normalize_whitespace, RankingOptions,
    RankingOrchestrator, RankingReport, DEFAULT_KEY_TERMS,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "resume-rank", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct JobArgs {
    /// Job description text
    #[arg(long, conflicts_with = "job_file")]
    job: Option<String>,

    /// File holding the job description
    #[arg(long)]
    job_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Rank PDF résumés against a job description.
    Rank {
        #[command(flatten)]
        job: JobArgs,
        /// Folder that contains PDFs recursively.
        #[arg(long, conflicts_with = "files")]
        folder: Option<PathBuf>,
        /// Individual PDF files, ranked in the order given.
        files: Vec<PathBuf>,
        /// Seed for the score offset stream.
        #[arg(long, env = "RESUME_RANK_SEED", default_value_t = RankingOptions::default().seed)]
        seed: u32,
        /// Number of job key terms quoted in suggestions.
        #[arg(long, env = "RESUME_RANK_KEY_TERMS", default_value_t = DEFAULT_KEY_TERMS)]
        key_terms: usize,
        /// Give up when ranking takes longer than this many seconds.
        #[arg(long, default_value = "60")]
        timeout_secs: u64,
        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the most distinctive terms of a job description.
    KeyTerms {
        #[command(flatten)]
        job: JobArgs,
        /// Number of terms to print.
        #[arg(long, env = "RESUME_RANK_KEY_TERMS", default_value_t = DEFAULT_KEY_TERMS)]
        top_k: usize,
    },
    /// Print the extracted text of a PDF page by page.
    Extract {
        /// PDF file to read.
        path: PathBuf,
        /// Maximum number of pages to print.
        #[arg(long, default_value = "2")]
        max_pages: usize,
    },
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    seed: u32,
    #[serde(flatten)]
    report: &'a RankingReport,
}

impl JobArgs {
    async fn load(&self) -> anyhow::Result<String> {
        let text = match (&self.job, &self.job_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading job description {}", path.display()))?,
            (None, None) => bail!("either --job or --job-file is required"),
        };

        if text.trim().is_empty() {
            bail!("job description is empty");
        }
        Ok(text)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    let result = runtime.block_on(run(cli));
    // A ranking abandoned by its deadline is still running on a blocking
    // thread; exit without joining it.
    runtime.shutdown_background();
    result
}

/// Runs `work` on the blocking pool and gives up once `deadline` passes.
async fn with_deadline<T, F>(deadline: Duration, work: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let task = tokio::task::spawn_blocking(work);
    let output = tokio::time::timeout(deadline, task)
        .await
        .map_err(|_| anyhow!("ranking timed out after {}s", deadline.as_secs_f64()))??;
    Ok(output)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "resume-rank boot"
    );

    match cli.command {
        Command::Rank {
            job,
            folder,
            files,
            seed,
            key_terms,
            timeout_secs,
            json,
        } => {
            let job_description = job.load().await?;
            let uploads = match folder {
                Some(folder) => load_folder(&folder)?,
                None if files.is_empty() => bail!("pass --folder or at least one PDF file"),
                None => load_uploads(&files)?,
            };
            info!(resumes = uploads.len(), "ranking resumes");

            let options = RankingOptions {
                seed,
                key_term_count: key_terms,
                ..RankingOptions::default()
            };
            let orchestrator = RankingOrchestrator::pdf(options)?;
            let report = with_deadline(Duration::from_secs(timeout_secs), move || {
                orchestrator.rank(&job_description, &uploads)
            })
            .await??;

            for skipped in &report.skipped {
                warn!(identifier = %skipped.identifier, reason = %skipped.reason, "skipped resume");
            }

            if json {
                let payload = JsonReport {
                    generated_at: Utc::now().to_rfc3339(),
                    seed,
                    report: &report,
                };
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_report(&report);
            }
        }
        Command::KeyTerms { job, top_k } => {
            let job_description = job.load().await?;
            let orchestrator = RankingOrchestrator::pdf(RankingOptions::default())?;
            for (position, term) in orchestrator
                .key_terms(&job_description, top_k)?
                .iter()
                .enumerate()
            {
                println!("{:>2}. {term}", position + 1);
            }
        }
        Command::Extract { path, max_pages } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let pages = extract_page_texts(&bytes)?;

            for page in pages.iter().take(max_pages) {
                let text = normalize_whitespace(&page.text);
                if !text.is_empty() {
                    println!("[page {}]\n{text}", page.number);
                }
            }
            if pages.len() > max_pages {
                println!("... output truncated to first {max_pages} page(s)");
            }
        }
    }

    Ok(())
}

fn print_report(report: &RankingReport) {
    println!("{:<6}{:<40}{:>12}", "Rank", "Resume", "Match Score");
    for entry in &report.entries {
        println!(
            "{:<6}{:<40}{:>12}",
            entry.rank,
            entry.identifier,
            entry.score_label()
        );
    }

    println!();
    println!("Resume Improvement Suggestions");
    for entry in &report.entries {
        println!();
        println!("{} - Match Score: {}", entry.identifier, entry.score_label());
        println!("{}", entry.band.heading());
        for line in entry.bulleted() {
            println!("  {line}");
        }
    }

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped");
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.identifier, skipped.reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::with_deadline;
    use std::time::{Duration, Instant};
    use tokio::runtime::Builder;

    #[test]
    fn deadline_returns_without_waiting_for_blocking_work() -> Result<(), Box<dyn std::error::Error>> {
        let started = Instant::now();
        let runtime = Builder::new_multi_thread().enable_all().build()?;

        let result = runtime.block_on(with_deadline(Duration::from_millis(100), || {
            std::thread::sleep(Duration::from_secs(5));
        }));
        runtime.shutdown_background();

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(2));
        Ok(())
    }

    #[test]
    fn work_within_deadline_returns_its_output() -> Result<(), Box<dyn std::error::Error>> {
        let runtime = Builder::new_multi_thread().enable_all().build()?;
        let output = runtime.block_on(with_deadline(Duration::from_secs(5), || 42))?;
        runtime.shutdown_background();
        assert_eq!(output, 42);
        Ok(())
    }
}
