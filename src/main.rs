use anyhow::{Context, Result};
use log::info;
use pricing_kpi::{storage, AnnotationService, StoreConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; the process environment still applies without it
    let env_file = dotenv::dotenv().ok();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("pricing_kpi", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    if let Some(path) = env_file {
        info!("loaded environment from {}", path.display());
    }

    let scenario_id: i32 = std::env::args()
        .nth(1)
        .context("usage: pricing-kpi <scenario_id>")?
        .parse()
        .context("scenario_id must be an integer")?;

    let config = StoreConfig::from_env()?;
    let db = storage::establish_connection(&config)
        .await
        .with_context(|| format!("cannot connect to {}", config.database_url))?;

    let service = AnnotationService::new(Arc::new(db));
    let annotation = service
        .annotate_scenario(scenario_id)
        .await
        .with_context(|| format!("annotating scenario {scenario_id}"))?;

    println!("{}", serde_json::to_string_pretty(&annotation.scopes)?);
    Ok(())
}
