// Melancholy Notes - personal notes kept in a local SQLite file
// Entry point and application setup

use anyhow::Context;
use melancholy_notes::{app, config, console::Console};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stderr keeps it apart from the console
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Melancholy Notes");

    let app_data_dir = config::default_app_data_dir()?;
    let state = app::setup(app_data_dir.clone())
        .await
        .with_context(|| format!("failed to open notes in {}", app_data_dir.display()))?;

    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        state.notes_service.clone(),
    );
    console.run().await?;

    tracing::info!("Melancholy Notes closed");
    Ok(())
}
