//! Standalone server binary.

use anyhow::Context;
use grounded::db::PgVectorStore;
use grounded::llm::{GenerationClient, OllamaGenerator};
use grounded::rag::{AnswerSynthesizer, OllamaEmbedder, Retriever};
use grounded::{api, AppState, Config};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grounded=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("loading configuration")?;

    let http = reqwest::Client::new();
    let store = Arc::new(
        PgVectorStore::connect_lazy(&config.database.url, config.embedding.dimension)
            .map_err(|e| anyhow::anyhow!(e.to_string()))
            .context("configuring document store")?,
    );
    let embedder = Arc::new(OllamaEmbedder::new(
        http.clone(),
        config.llm.ollama_url.clone(),
        config.embedding.model.clone(),
        config.embedding.dimension,
    ));
    let generator: Arc<dyn GenerationClient> = Arc::new(OllamaGenerator::new(
        http,
        config.llm.ollama_url.clone(),
        config.llm.model.clone(),
    ));

    let synthesizer = Arc::new(AnswerSynthesizer::new(
        Retriever::new(embedder, store),
        generator.clone(),
        config.llm.mode,
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        synthesizer,
        generator,
    };

    let app = api::create_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "grounded server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
