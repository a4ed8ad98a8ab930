use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use qna_admin::configuration::get_configuration;
use qna_admin::questions::HttpQuestionSource;
use qna_admin::server::app::{run_server, AppState};
use qna_admin::telemetry::init_tracing;
use qna_admin::view::TracingDiagnostics;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding base.yaml
    #[clap(long, default_value = "configuration")]
    config_dir: PathBuf,
    /// Overrides application.port
    #[clap(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing()?;
    let cli = Cli::parse();

    let mut settings =
        get_configuration(&cli.config_dir).context("Failed to read configuration")?;
    if let Some(port) = cli.port {
        settings.application.port = port;
    }

    let source = HttpQuestionSource::from_settings(&settings.upstream)
        .context("Failed to set up questions client")?;
    tracing::info!("Fetching questions from {}", source.endpoint());

    let state = AppState::new(Arc::new(source), Arc::new(TracingDiagnostics));
    run_server(&settings.application, state).await
}
