mod carousel;
mod color;
mod config;
mod db;
mod error;
mod hero;
mod icons;
mod loaders;
mod models;
mod routes;
mod sections;
mod state;
mod store;
mod style;
mod templates;

use std::sync::Arc;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};

use crate::{config::SiteConfig, state::AppState, store::SqliteStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = SiteConfig::from_env();
    db::ensure_sqlite_dir(&config.database_url)?;

    let pool = db::connect(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    if config.seed_demo_content && db::seed_demo_content(&pool).await? {
        log::info!("Seeded demo content");
    }

    let address = format!("0.0.0.0:{}", config.port);
    let static_dir = config.static_dir.clone();
    let state = AppState::new(Arc::new(SqliteStore::new(pool)), config);

    log::info!("Starting Tatame on http://{address}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
            .configure(routes::public::configure)
            .configure(routes::hero::configure)
    })
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
