//! Vitals CLI - project health tracker.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vitals_core::Project;
use vitals_progress::{AnalysisConfig, HealthAnalyzer, HealthReport};
use vitals_report::{
    report_file_name, ConsoleSummary, DocumentLayout, PdfRenderer, RenderError, Timeline,
    DEFAULT_CHART_WIDTH,
};
use vitals_storage::{JsonFileSource, ProjectSource};

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Project health tracker", long_about = None)]
struct Cli {
    /// Reference date for the analysis (defaults to the local date)
    #[arg(long, global = true, env = "VITALS_TODAY", value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,
    /// Days without an update before an active task is stagnant
    #[arg(long, global = true, env = "VITALS_STAGNANT_DAYS", default_value_t = 7)]
    stagnant_days: u32,
    /// In-progress tasks one person may hold
    #[arg(long, global = true, env = "VITALS_ACTIVE_TASK_LIMIT", default_value_t = 2)]
    active_task_limit: u32,
    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the health summary
    Summary {
        /// Project file
        file: PathBuf,
    },
    /// Print the ASCII timeline
    Timeline {
        /// Project file
        file: PathBuf,
        /// Chart width in columns
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,
    },
    /// Write the client PDF report
    Report {
        /// Project file
        file: PathBuf,
        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Summary, timeline and PDF report in one pass
    Run {
        /// Project file
        file: PathBuf,
        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Chart width in columns
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,
    },
    /// Print the analysis as JSON
    Json {
        /// Project file
        file: PathBuf,
    },
}

impl Commands {
    fn file(&self) -> &Path {
        match self {
            Commands::Summary { file }
            | Commands::Timeline { file, .. }
            | Commands::Report { file, .. }
            | Commands::Run { file, .. }
            | Commands::Json { file } => file,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let analyzer = HealthAnalyzer::new().with_config(AnalysisConfig {
        stagnant_days_threshold: cli.stagnant_days,
        active_task_limit: cli.active_task_limit,
    });

    let project = load_project(cli.command.file()).await?;
    let report = analyzer.analyze(&project, today);

    let failures = match &cli.command {
        Commands::Summary { .. } => collect([print_summary(&project, &report)]),
        Commands::Timeline { width, .. } => collect([print_timeline(&project, *width)]),
        Commands::Report { output_dir, .. } => collect([write_report(&project, &report, output_dir)]),
        Commands::Run {
            output_dir, width, ..
        } => collect([
            print_summary(&project, &report),
            print_timeline(&project, *width),
            write_report(&project, &report, output_dir),
        ]),
        Commands::Json { .. } => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
            Vec::new()
        }
    };

    if !failures.is_empty() {
        let artifacts: Vec<&str> = failures.iter().map(RenderError::artifact).collect();
        bail!("failed to produce: {}", artifacts.join(", "));
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

async fn load_project(path: &Path) -> Result<Project> {
    let source = JsonFileSource::new(path);
    source
        .load()
        .await
        .with_context(|| format!("could not load project from {}", source.describe()))
}

/// Log every adapter failure and keep them for the exit status.
fn collect<const N: usize>(results: [vitals_report::Result<()>; N]) -> Vec<RenderError> {
    results
        .into_iter()
        .filter_map(|result| result.err())
        .inspect(|err| error!(artifact = err.artifact(), "{}", err))
        .collect()
}

fn print_summary(project: &Project, report: &HealthReport<'_>) -> vitals_report::Result<()> {
    ConsoleSummary::new(project, report).write_to(&mut io::stdout().lock())?;
    println!();
    Ok(())
}

fn print_timeline(project: &Project, width: usize) -> vitals_report::Result<()> {
    Timeline::new(width).write_to(project, &mut io::stdout().lock())?;
    println!();
    Ok(())
}

fn write_report(
    project: &Project,
    report: &HealthReport<'_>,
    output_dir: &Path,
) -> vitals_report::Result<()> {
    let path = output_dir.join(report_file_name(project));
    let layout = DocumentLayout::build(project, report);
    let written = PdfRenderer::default().write(&layout, &path)?;

    info!(pages = layout.pages.len(), "Report written");
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "[SUCCESS] Client-ready PDF summary saved as: {}",
        written.display()
    )
    .map_err(|source| RenderError::Write {
        artifact: "console summary".to_string(),
        source,
    })
}
