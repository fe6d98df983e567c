use std::{path::{Path, PathBuf}, time::Duration};

use tracing::{error, info};
use tokio_postgres_rustls::MakeRustlsConnect;
use deadpool_postgres::{
    Config as PoolConfig, ManagerConfig, Pool, RecyclingMethod, Runtime, Timeouts,
};

use crate::utils::{
    config::Config,
    error::{ApiError, Result},
};

pub type DbPool = Pool;

const MIGRATION_PATHS: [&str; 3] = ["../migrations", "./migrations", "migrations"];

fn tls_connector(config: &Config) -> Result<MakeRustlsConnect> {
    // Already installed when a binary set it up first.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(path) = config.database_ca_cert.as_deref() {
        let pem = std::fs::read(path)
            .map_err(|e| ApiError::Config(format!("Failed to read DATABASE_CA_CERT {path}: {e}")))?;
        let mut cert_reader = pem.as_slice();
        let mut added = 0usize;
        for cert in rustls_pemfile::certs(&mut cert_reader).flatten() {
            if root_store.add(cert).is_ok() {
                added += 1;
            }
        }
        info!("Loaded {} certificates from {}", added, path);
    }

    Ok(MakeRustlsConnect::new(
        rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth(),
    ))
}

/// Builds the pool without opening a connection.
pub fn build_pool(config: &Config) -> Result<DbPool> {
    let mut cfg = PoolConfig::new();
    cfg.url = Some(config.database_url.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Verified,
    });

    cfg.pool = Some(deadpool_postgres::PoolConfig {
        max_size: config.max_db_connections as usize,
        timeouts: Timeouts {
            wait: Some(Duration::from_secs(10)),
            create: Some(Duration::from_secs(5)),
            recycle: Some(Duration::from_secs(10)),
        },
        ..Default::default()
    });

    cfg.create_pool(Some(Runtime::Tokio1), tls_connector(config)?)
        .map_err(|e| ApiError::Database(format!("Failed to create database pool: {}", e)))
}

pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let pool = build_pool(config)?;

    let _ = pool.get()
        .await
        .map_err(|e| ApiError::Database(format!("Database connection test failed: {}", e)))?;

    Ok(pool)
}

/// An explicit directory wins; otherwise the first of `MIGRATION_PATHS` that exists.
pub fn find_migrations_dir(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = configured {
        let path = PathBuf::from(dir);
        return if path.is_dir() {
            Ok(path)
        } else {
            Err(ApiError::Config(format!("MIGRATIONS_DIR {dir} is not a directory")))
        };
    }

    MIGRATION_PATHS
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| ApiError::Database("No migrations directory found".to_owned()))
}

/// Applies every pending `*.sql` file in filename order. Safe to re-run.
pub async fn run_migrations(pool: &DbPool, migrations_dir: Option<&str>) -> Result<usize> {
    let migration_dir = find_migrations_dir(migrations_dir)?;
    info!("Using migrations from {}", migration_dir.display());

    let client = pool
        .get()
        .await
        .map_err(|e| ApiError::Database(format!("Failed to get client: {e}")))?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS __migrations (
            filename TEXT PRIMARY KEY,
            applied_at TIMESTAMPTZ DEFAULT NOW()
        )",
            &[],
        )
        .await
        .map_err(|e| ApiError::Database(format!("Failed to create migrations table: {e}")))?;

    let mut migrations = std::fs::read_dir(&migration_dir)
        .map_err(|e| ApiError::Database(format!("Failed to read migrations directory: {e}")))?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension()? == "sql" {
                Some(path)
            } else {
                None
            }
        })
        .collect::<Vec<_>>();

    migrations.sort();

    let mut applied = 0;
    for migration_path in migrations {
        let migration_name = migration_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Database("Invalid migration filename".to_owned()))?;

        let already_applied = client
            .query_opt(
                "SELECT 1 FROM __migrations WHERE filename = $1",
                &[&migration_name],
            )
            .await
            .map_err(|e| ApiError::Database(format!("Failed to check migration status: {e}")))?;

        if already_applied.is_some() {
            info!("Skipping already applied migration: {}", migration_name);
            continue;
        }

        let migration_sql = std::fs::read_to_string(&migration_path).map_err(|e| {
            ApiError::Database(format!(
                "Failed to read migration {migration_name}: {e}"
            ))
        })?;

        info!("Running migration: {}", migration_name);

        match client.batch_execute(&migration_sql).await {
            Ok(()) => {
                // Concurrent runners race here; the primary key keeps the record unique.
                client
                    .execute(
                        "INSERT INTO __migrations (filename) VALUES ($1) ON CONFLICT DO NOTHING",
                        &[&migration_name],
                    )
                    .await
                    .map_err(|e| {
                        ApiError::Database(format!("Failed to mark migration as applied: {e}"))
                    })?;

                applied += 1;
                info!("Successfully applied migration: {}", migration_name);
            }
            Err(e) => {
                error!("Migration {} failed: {}", migration_name, e);
                return Err(ApiError::Database(format!(
                    "Migration {migration_name} failed: {e}"
                )));
            }
        }
    }

    info!("All migrations completed successfully");
    Ok(applied)
}
