//! `vislog-worker` -- analyzes a fixed batch of images and records every
//! attempt in `ai_analysis_log`.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                  |
//! |-------------------------|----------|--------------------------|
//! | `MYSQL_HOST`            | yes      | --                       |
//! | `MYSQL_PORT`            | no       | driver default (3306)    |
//! | `MYSQL_USER`            | yes      | --                       |
//! | `MYSQL_PASSWORD`        | yes      | --                       |
//! | `MYSQL_DATABASE`        | yes      | --                       |
//! | `ANALYSIS_API_URL`      | no       | `http://localhost:8000/` |
//! | `ANALYSIS_TIMEOUT_SECS` | no       | `10`                     |
//! | `DB_RUN_MIGRATIONS`     | no       | `false`                  |

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vislog_client::AnalysisApi;
use vislog_core::config::{DbConfig, ServiceConfig};
use vislog_db::{ConnectionScope, MySqlLogStore};
use vislog_pipeline::AnalysisOrchestrator;
use vislog_worker::{migrations_requested, run_batch, BatchSummary, SAMPLE_IMAGE_PATHS};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vislog_worker=info,vislog_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(summary) => {
            tracing::info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Batch complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Worker aborted: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<BatchSummary> {
    let db_config = DbConfig::from_env()?;
    let service_config = ServiceConfig::from_env()?;
    tracing::info!(
        db = ?db_config,
        api_url = %service_config.api_url,
        timeout_secs = service_config.timeout.as_secs(),
        "Loaded configuration"
    );

    if migrations_requested(|key| std::env::var(key).ok()) {
        let mut scope = ConnectionScope::acquire(&db_config).await?;
        vislog_db::health_check(scope.connection()).await?;
        vislog_db::run_migrations(scope.connection()).await?;
        scope.release().await;
        tracing::info!("Database migrations applied");
    }

    let api = AnalysisApi::new(&service_config)?;
    let orchestrator = AnalysisOrchestrator::new(api, MySqlLogStore::new(db_config));

    let summary = run_batch(&orchestrator, SAMPLE_IMAGE_PATHS).await?;
    Ok(summary)
}
