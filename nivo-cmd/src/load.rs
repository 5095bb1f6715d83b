//! Fetching the info and nivo tables from files or HTTP.

use anyhow::Context;
use flate2::read::GzDecoder;
use log::info;
use nivo_core::{Dataset, Observation, StationInfo};
use std::io::Read;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn is_gzipped(source: &str) -> bool {
    source.ends_with(".gz")
}

fn gunzip(compressed: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(compressed);
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer)?;
    Ok(buffer)
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> anyhow::Result<Vec<u8>> {
    let response = client.get(url).timeout(REQUEST_TIMEOUT).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("Request failed ({}) for {url}", response.status().as_u16());
    }
    Ok(response.bytes().await?.to_vec())
}

/// Read a table from a local path or an http(s) URL, gunzipping `.gz` sources.
pub async fn fetch_table(client: &reqwest::Client, source: &str) -> anyhow::Result<String> {
    let raw = if is_remote(source) {
        fetch_bytes(client, source).await?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("Failed to read {}", source))?
    };
    let bytes = if is_gzipped(source) {
        gunzip(&raw).with_context(|| format!("Failed to decompress {}", source))?
    } else {
        raw
    };
    info!("load: Fetched {} bytes from {}", bytes.len(), source);
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", source))
}

/// Fetch and parse both tables concurrently.
///
/// Nothing is returned unless both tables load; the first failure aborts.
pub async fn load_dataset(info_source: &str, nivo_source: &str) -> anyhow::Result<Dataset> {
    let client = reqwest::Client::new();
    let (info_csv, nivo_csv) = tokio::try_join!(
        fetch_table(&client, info_source),
        fetch_table(&client, nivo_source)
    )?;

    let stations = StationInfo::parse_station_csv(&info_csv)
        .with_context(|| format!("Failed to parse station table {}", info_source))?;
    let observations = Observation::parse_observation_csv(&nivo_csv)
        .with_context(|| format!("Failed to parse observation table {}", nivo_source))?;
    let dataset = Dataset::new(stations, observations);
    let unmapped = dataset.unmapped_observations();
    if unmapped > 0 {
        log::warn!(
            "load: {} observations reference stations missing from {}",
            unmapped,
            info_source
        );
    }
    Ok(dataset)
}
