//! Job execution under the application runtime

use crate::app::{config::AppConfig, logging::init_logging};
use crate::config::JobConfig;
use crate::engine::{discard_output, JobSummary, LocalJobRunner};
use crate::error::{Result, WordCountError};
use std::future::Future;
use tracing::warn;

/// Initialize the application with proper logging and configuration
pub fn initialize_app(config: &AppConfig) {
    init_logging(config);
}

/// Run `job` to completion, or stop at the first Ctrl+C
///
/// On interrupt the partial output directory is removed and
/// [`WordCountError::interrupted`] is returned.
pub async fn run_job(job: JobConfig) -> Result<JobSummary> {
    run_until_interrupted(job, tokio::signal::ctrl_c()).await
}

/// Like [`run_job`], stopping when `interrupt` completes instead of on Ctrl+C
pub async fn run_until_interrupted<F>(job: JobConfig, interrupt: F) -> Result<JobSummary>
where
    F: Future<Output = std::io::Result<()>>,
{
    let output_path = job.output_path.clone();
    let output_existed = output_path.exists();
    let runner = LocalJobRunner::new(job);

    tokio::select! {
        result = runner.run() => result,
        signal = interrupt => {
            if let Err(err) = signal {
                warn!("Failed to listen for interrupt: {}", err);
            }
            warn!("Interrupted, discarding partial output");
            if !output_existed {
                discard_output(&output_path);
            }
            Err(WordCountError::interrupted())
        }
    }
}
