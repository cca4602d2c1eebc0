// Flashquiz API - Local Server

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use flashquiz_app::{body_limit_layer, build_cors_layer, create_app};
use flashquiz_common::config::{Config, LogFormat};
use flashquiz_llm::{LlmConfig, LlmServiceFactory};
use flashquiz_quiz::QuizConfig;
use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let subscriber =
        tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    info!("Starting Flashquiz API server");

    let llm_config = LlmConfig::from_env().map_err(|e| {
        error!("Failed to load LLM configuration: {}", e);
        e
    })?;
    let quiz_config = QuizConfig::from_env().map_err(|e| {
        error!("Failed to load quiz configuration: {}", e);
        e
    })?;

    info!(
        provider = %llm_config.provider,
        model = %llm_config.default_model,
        turn_timeout_secs = quiz_config.turn_timeout.as_secs(),
        model_retries = quiz_config.model_retries,
        "Configuration loaded successfully"
    );

    let pool = PgPool::connect(&config.database_url).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        anyhow::anyhow!("Database connection failed: {}", e)
    })?;

    info!("Database connection established");

    sqlx::migrate!("../../migrations").run(&pool).await?;

    info!("Database migrations applied");

    let llm = LlmServiceFactory::create(llm_config)?;

    // Router::layer applies outermost last: trace -> cors -> body limit
    let app = create_app(pool, Arc::from(llm), quiz_config)
        .layer(body_limit_layer())
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

#[mutants::skip] // Only reachable from a live process receiving OS signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
