use clap::Parser;
use tracing::info;
use wordcount_replace::app::{self, AppConfig};
use wordcount_replace::cli::{normalize_legacy_args, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));
    let config = AppConfig::new(cli.verbose).with_json_summary(cli.json);
    app::initialize_app(&config);

    if let Err(e) = run(cli, &config).await {
        app::handle_fatal_error(e, config.verbose);
    }
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let job = cli.into_job_config()?;
    if !job.replaces_words() {
        info!("No replacement dictionary given, counting words unchanged");
    }

    let summary = app::run_job(job).await?;
    if config.json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
