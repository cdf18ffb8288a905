#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> anyhow::Result<configs::DatabaseConfig> {
    let mut cfg = configs::AppConfig::load_or_env(&configs::config_path())?.database;
    cfg.normalize_from_env();
    cfg.min_connections = cfg.min_connections.clamp(1, 2);
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.acquire_timeout_secs = 10;
    Ok(cfg)
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = test_config()?;
    cfg.validate()?;

    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}
