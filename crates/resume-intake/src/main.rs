use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use resume_intake::pipeline::LoggingObserver;
use resume_intake::{
    load_config, telemetry, CandidateFile, Config, IntakePipeline, IntakeStatus, PipelineConfig,
    SimulatedAnalyzer, StatusBroadcaster, StatusObserver,
};

/// Submit a resume for (simulated) ATS analysis.
#[derive(Parser, Debug)]
#[command(name = "resume-intake", version, about)]
struct Cli {
    /// Path to a JSON config file.
    #[arg(short, long, env = "RESUME_INTAKE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the analysis timeout in milliseconds (0 disables it).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,

    /// The resume to analyze (PDF or DOCX). Exactly one is accepted.
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init_logging("info", cli.json_logs) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let mut pipeline_config = PipelineConfig::from_config(&config);
    if let Some(ms) = cli.timeout_ms {
        pipeline_config = pipeline_config.with_timeout((ms > 0).then_some(Duration::from_millis(ms)));
    }
    let pipeline_config = Arc::new(pipeline_config);

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match CandidateFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let broadcaster = StatusBroadcaster::new(pipeline_config.event_capacity);
    let mut events = broadcaster.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => println!("[{}] {} ({})", event.status, event.message, event.filename),
                Err(RecvError::Lagged(skipped)) => info!("Skipped {} status events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let observers: Vec<Arc<dyn StatusObserver>> =
        vec![Arc::new(broadcaster), Arc::new(LoggingObserver)];
    let provider = Arc::new(SimulatedAnalyzer::new(pipeline_config.simulated_delay));
    let pipeline = IntakePipeline::with_observers(Arc::clone(&pipeline_config), provider, observers);

    if let Err(e) = pipeline.submit(files) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let status = pipeline.wait_until_settled().await;
    let outcome = match status {
        IntakeStatus::Completed => {
            tokio::time::sleep(pipeline_config.handoff_delay).await;
            match pipeline.result().map(|r| serde_json::to_string_pretty(&r.payload)) {
                Some(Ok(report)) => {
                    println!("{}", report);
                    ExitCode::SUCCESS
                }
                Some(Err(e)) => {
                    error!("Failed to render report: {}", e);
                    ExitCode::FAILURE
                }
                None => ExitCode::FAILURE,
            }
        }
        _ => {
            if let Some(cause) = pipeline.failure() {
                error!("{}", cause);
            }
            ExitCode::FAILURE
        }
    };

    // Dropping the pipeline closes the broadcast channel and ends the printer.
    drop(pipeline);
    if !join_printer(printer).await {
        return ExitCode::FAILURE;
    }

    outcome
}

/// Waits for the status printer; a panic or cancellation there is logged.
async fn join_printer(printer: JoinHandle<()>) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            error!("Status printer task failed: {}", e);
            false
        }
    }
}
