use std::{fs, path::Path, str::FromStr};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

const DEMO_SEED: &str = include_str!("../seeds/demo.sql");

pub async fn connect(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Directory that has to exist before SQLite can create the database file,
/// or `None` for in-memory and non-SQLite URLs.
fn sqlite_parent_dir(db_url: &str) -> Option<&Path> {
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return None;
    }
    let path = path.strip_prefix("file:").unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    if let Some(parent) = sqlite_parent_dir(db_url) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Inserts the bundled demo content unless the site already has a layout.
/// Returns whether anything was written.
pub async fn seed_demo_content(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM home_page_components")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    sqlx::raw_sql(DEMO_SEED).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(true)
}
