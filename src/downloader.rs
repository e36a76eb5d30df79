use log::{debug, info, warn};
use std::time::Duration;
use tokio::sync::broadcast::Receiver;
use tokio::task::JoinHandle;
use tokio::time;
use url::Url;
use crate::BoxError;
use crate::parser::sitelist::SiteListParser;
use crate::service::site_service::SiteService;
use crate::store::write_facility::write_facility;

pub struct Downloader {
    service: SiteService,
    sitelist_url: Url,
    storage_dir: String
}

impl Downloader {
    pub fn new(service: SiteService, sitelist_url: Url, storage_dir: String) -> Self {
        Self { service, sitelist_url, storage_dir }
    }
}

async fn fetch_text(url: Url) -> Result<String, BoxError> {
    let text = reqwest::Client::new()
        .get(url)
        .send().await?
        .error_for_status()?
        .text().await?;
    Ok(text)
}

/// Downloads a facility document and stores it below the storage directory.
/// Facility links may be relative, so they are resolved against the site
/// list URL.
async fn facility_task(downloader: &mut Downloader, link: &str) -> Result<(), BoxError> {
    let url = downloader.sitelist_url.join(link)?;
    debug!("Fetch facility data from {url}");
    let xml = fetch_text(url).await?;
    write_facility(&downloader.storage_dir, link, &xml)?;
    Ok(())
}

/// Downloads the site list and all facility documents modified after the
/// most recent modification time seen in an earlier run. The new modification
/// times are committed once all facilities of this run are stored, so an
/// aborted run is re-fetched as a whole.
async fn sitelist_task(downloader: &mut Downloader) -> Result<(), BoxError> {
    let cutoff = downloader.service.get_max_modified()?;
    debug!("Fetch site list from {} with cutoff {:?}", downloader.sitelist_url, cutoff);
    let xml = fetch_text(downloader.sitelist_url.clone()).await?;
    let parser = SiteListParser::new(&xml)?;
    let sites = parser.get_sites(cutoff);

    if sites.is_empty() {
        info!("No facilities modified since last download");
        return Ok(())
    }
    info!("Download {} facilities modified since last download", sites.len());
    for link in sites.keys() {
        facility_task(downloader, link).await?;
    }
    downloader.service.add(&sites)?;
    Ok(())
}

// Must be async as required by tokio::select!
async fn repeat(mut downloader: Downloader, period: Duration, mut rx: Receiver<()>) {
    let mut interval = time::interval(period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = sitelist_task(&mut downloader).await {
                    warn!("Task failed: {:?}, leave downloader", e);
                    break;
                }
            },
            _ = rx.recv() => {
                debug!("Termination signal received, leave downloader");
                break;
            }
        }
    }
}

pub fn spawn_download_scheduler(downloader: Downloader, rx: Receiver<()>, period: Duration) -> JoinHandle<()> {
    info!("Spawn download scheduler");
    tokio::spawn(async move {
        repeat(downloader, period, rx).await;
    })
}
