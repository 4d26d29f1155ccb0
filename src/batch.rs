use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::ScrapeConfig;
use crate::metadata::{self, Extraction, Preview};
use crate::scrape::{FetchError, Transport};

pub const COMPLETED_MESSAGE: &str = "Scraping completed successfully";

#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    #[error("Please provide a list of URLs")]
    MissingInput,

    #[error(transparent)]
    Transport(#[from] FetchError),
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub status: u16,
    /// Keyed by trimmed url, in first-seen order
    pub output: IndexMap<String, Extraction>,
    /// Every non-empty title-like value, duplicates included
    pub input: Vec<String>,
    pub message: String,
}

/// Sentinel-free counterpart of [`Extraction`]
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RawEntry {
    Preview(Preview),
    Error {
        #[serde(rename = "Error")]
        error: String,
    },
}

fn trimmed(urls: &[String]) -> Vec<String> {
    urls.iter().map(|url| url.trim().to_string()).collect()
}

/// Runs `work` for every url on a pool of `workers` threads.
/// Output order always matches input order.
fn for_each_url<T, F>(urls: &[String], workers: usize, work: F) -> Vec<(String, T)>
where
    T: Send,
    F: Fn(&str) -> T + Sync + Send,
{
    let run = |url: &String| (url.clone(), work(url.as_str()));

    if workers <= 1 || urls.len() <= 1 {
        return urls.iter().map(run).collect();
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(workers.min(urls.len()))
        .build()
    {
        Ok(pool) => pool.install(|| urls.par_iter().map(run).collect()),
        Err(err) => {
            log::warn!("failed to start worker pool, scraping sequentially: {err}");
            urls.iter().map(run).collect()
        }
    }
}

pub fn run(urls: Option<Vec<String>>, config: &ScrapeConfig) -> Result<BatchResponse, BatchError> {
    let urls = trimmed(&urls.ok_or(BatchError::MissingInput)?);
    let transport = Transport::new(config)?;

    log::info!("scraping {} urls with {} workers", urls.len(), config.workers);
    let results = for_each_url(&urls, config.workers, |url| metadata::extract(url, &transport));

    let mut output = IndexMap::with_capacity(results.len());
    let mut input = Vec::new();

    for (url, extraction) in results {
        log::info!("URL: {url}");
        input.extend(extraction.titles().into_iter().map(str::to_string));

        // a repeated url keeps its first position, latest result wins
        output.insert(url, extraction);
    }

    log::debug!("captured titles: {input:?}");

    Ok(BatchResponse {
        status: 200,
        output,
        input,
        message: COMPLETED_MESSAGE.to_string(),
    })
}

/// Like [`run`] but without placeholder strings: missing values stay null
pub fn run_raw(
    urls: Option<Vec<String>>,
    config: &ScrapeConfig,
) -> Result<IndexMap<String, RawEntry>, BatchError> {
    let urls = trimmed(&urls.ok_or(BatchError::MissingInput)?);
    let transport = Transport::new(config)?;

    let results = for_each_url(&urls, config.workers, |url| {
        match metadata::preview(url, &transport) {
            Ok(preview) => RawEntry::Preview(preview),
            Err(err) => {
                log::warn!("{url}: {err}");
                RawEntry::Error {
                    error: err.to_string(),
                }
            }
        }
    });

    Ok(results.into_iter().collect())
}
