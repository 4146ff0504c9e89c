use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use voiceroom::{create_router, AppState, Config};

#[derive(Debug, Parser)]
#[command(name = "voiceroom", about = "Real-time voice transcription relay for a shared room")]
struct Cli {
    /// Configuration file, without extension
    #[arg(long, default_value = "config/voiceroom")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Room channel: {}", cfg.room.channel);
    info!("Transcription engine: {}", cfg.engine.url);

    let state = AppState::new(&cfg);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        "Listening on {}",
        listener.local_addr().context("failed to read local listener address")?
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
