use std::time::Duration;
use config::{Config, File};
use log::info;
use tokio::signal;
use tokio::sync::broadcast;
use url::Url;
use sitelist_downloader::BoxError;
use sitelist_downloader::downloader::{Downloader, spawn_download_scheduler};
use sitelist_downloader::service::site_service::SiteService;

const CONFIG_YAML : &'static str = "conf/application.yaml";

const DEFAULT_DB_PATH : &'static str = "sitelist.db";
const DEFAULT_STORAGE_DIR : &'static str = "data";
const DEFAULT_PERIOD : i64 = 3600;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    env_logger::init();
    let config = Config::builder()
        .add_source(File::with_name(CONFIG_YAML))
        .build()?;

    let sitelist_url = Url::parse(&config.get_string("sitelist.url").expect(CONFIG_YAML))?;
    let db_path = config.get_string("database.path").unwrap_or(DEFAULT_DB_PATH.to_string());
    let storage_dir = config.get_string("download.storage_dir").unwrap_or(DEFAULT_STORAGE_DIR.to_string());
    let period = Duration::from_secs(config.get_int("download.period").unwrap_or(DEFAULT_PERIOD) as u64);

    let (tx, rx) = broadcast::channel(1);

    let service = SiteService::new(&db_path)?;
    let downloader = Downloader::new(service, sitelist_url, storage_dir);
    let scheduler = spawn_download_scheduler(downloader, rx, period);

    await_shutdown().await;
    info!("Termination signal received");
    tx.send(())?;

    scheduler.await?;
    info!("Download scheduler terminated");

    Ok(())
}

// See https://github.com/tokio-rs/axum/blob/main/examples/graceful-shutdown/src/main.rs
async fn await_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
