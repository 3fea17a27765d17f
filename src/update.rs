//! Tells the operator when a newer pyskel has been published.
//!
//! The last answer from crates.io is kept in `update_check.json` under the
//! user cache directory and is only refreshed once it is a day old, or when
//! the running version differs from the one that wrote it. A pending update
//! found in the cache is reported without touching the network.
//!
//! The check is best effort: a network failure, a malformed response or an
//! unparsable version all end it without a word. Set `PYSKEL_NO_UPDATE_CHECK=1`
//! to skip it entirely.

use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::Context;
use semver::Version;
use serde::{Deserialize, Serialize};

const CRATES_IO_API: &str = "https://crates.io/api/v1/crates";
const ENV_VAR_DISABLE: &str = "PYSKEL_NO_UPDATE_CHECK";
const TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_FILENAME: &str = "update_check.json";
const CHECK_INTERVAL_SECS: u64 = 86400; // 24 hours

/// Name and version of the running generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub version: &'static str,
}

impl Package {
    #[must_use]
    pub const fn current() -> Self {
        Package {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCheckCache {
    pub latest_version: String,
    pub current_version: String,
    pub update_available: bool,
    pub checked_at: u64,
}

#[derive(Deserialize)]
struct CratesIoResponse {
    #[serde(rename = "crate")]
    crate_info: CrateInfo,
}

#[derive(Deserialize)]
struct CrateInfo {
    newest_version: String,
}

fn fetch_latest_version(package: &Package) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("{}/{}", package.name, package.version))
        .timeout(TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    let response: CratesIoResponse = client
        .get(format!("{CRATES_IO_API}/{}", package.name))
        .send()
        .context("Failed to query crates.io")?
        .error_for_status()?
        .json()
        .context("Failed to parse crates.io response")?;

    Ok(response.crate_info.newest_version)
}

fn cache_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.cache_dir().join(CACHE_FILENAME))
}

fn read_cache(path: &Path) -> Option<UpdateCheckCache> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn write_cache(path: &Path, cache: &UpdateCheckCache) {
    let Ok(content) = serde_json::to_string_pretty(cache) else {
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    if let Err(e) = std::fs::write(path, content) {
        crate::trace!("Could not write {}: {e}", path.display());
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn is_cache_fresh(cache: &UpdateCheckCache, current: &str) -> bool {
    let elapsed = now_unix().saturating_sub(cache.checked_at);
    elapsed < CHECK_INTERVAL_SECS && cache.current_version == current
}

/// Whether `latest` is a strictly higher semver than `current`. Unparsable
/// versions never count as newer.
#[must_use]
pub fn is_newer(latest: &str, current: &str) -> bool {
    match (Version::parse(latest), Version::parse(current)) {
        (Ok(latest), Ok(current)) => latest > current,
        _ => false,
    }
}

fn is_disabled_by_env() -> bool {
    std::env::var(ENV_VAR_DISABLE)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// The newer version to report, if any. `fetch` is only called when the
/// cache at `cache` is missing or stale, and a successful fetch rewrites it.
fn latest_release<F>(package: &Package, cache: Option<&Path>, fetch: F) -> Option<String>
where
    F: FnOnce(&Package) -> anyhow::Result<String>,
{
    if let Some(cached) = cache.and_then(read_cache) {
        if is_cache_fresh(&cached, package.version) {
            crate::trace!("Using update check cached at {}", cached.checked_at);
            return cached.update_available.then_some(cached.latest_version);
        }
    }

    let latest = match fetch(package) {
        Ok(latest) => latest,
        Err(e) => {
            crate::trace!("Skipping update check: {e:#}");
            return None;
        }
    };

    let update_available = is_newer(&latest, package.version);

    if let Some(path) = cache {
        write_cache(
            path,
            &UpdateCheckCache {
                latest_version: latest.clone(),
                current_version: package.version.to_owned(),
                update_available,
                checked_at: now_unix(),
            },
        );
    }

    update_available.then_some(latest)
}

/// Prints a hint if the registry knows a newer release than `package`.
pub fn notify(package: &Package) {
    if is_disabled_by_env() {
        crate::trace!("Update check disabled by {ENV_VAR_DISABLE}");
        return;
    }

    let cache = cache_path();

    if let Some(latest) = latest_release(package, cache.as_deref(), fetch_latest_version) {
        crate::info!(
            "{name} {latest} is available (current: {current}). Run `cargo install {name}` to update.",
            name = package.name,
            current = package.version,
        );
    }
}
