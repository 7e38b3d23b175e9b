use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tube_tutor::{
    create_router, AppState, Config, OpenAiProvider, QuizSettings, SessionConfig,
    TranscriptCondenser, YouTubeTranscriptFetcher,
};

#[derive(Debug, Parser)]
#[command(name = "tube-tutor", about = "Video transcript tutor and quiz relay")]
struct Args {
    /// Config file path (extension optional)
    #[arg(long, default_value = "config/tube-tutor")]
    config: String,

    /// Override the HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Tube Tutor v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);

    let provider = Arc::new(OpenAiProvider::with_base_url(
        cfg.openai.api_key.clone(),
        cfg.openai.base_url.clone(),
    ));
    let fetcher = Arc::new(
        YouTubeTranscriptFetcher::new(cfg.tutor.caption_lang.clone())
            .context("Failed to create transcript fetcher")?,
    );

    let session = SessionConfig {
        system_prompt: cfg.tutor.system_prompt.clone(),
        model: cfg.openai.chat_model.clone(),
        completion_timeout: cfg.openai.timeout(),
        ..SessionConfig::default()
    };
    let quiz = QuizSettings {
        model: cfg.openai.quiz_model.clone(),
        system_prompt: cfg.quiz.system_prompt.clone(),
        timeout: cfg.openai.timeout(),
    };

    let state = AppState::new(provider, fetcher, session, quiz, cfg.quiz.default_video.clone())
        .with_condenser(TranscriptCondenser::new(cfg.tutor.transcript_cap));

    let port = args.port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", cfg.service.http.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Running on: http://{}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
