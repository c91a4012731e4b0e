//! Version reporting and release check against GitHub.

use std::time::Duration;

use serde::Deserialize;

use crate::core::types::UpdateInfo;
use crate::error::{Result, SyswardError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct LatestRelease {
    #[serde(default)]
    tag_name: String,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    body: Option<String>,
}

/// Version of this build
pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Ask GitHub for the latest release of `repo` ("owner/name")
pub fn check_update(repo: &str) -> Result<UpdateInfo> {
    let url = format!("https://api.github.com/repos/{}/releases/latest", repo);

    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let response = client
        .get(&url)
        .header("User-Agent", concat!("sysward/", env!("CARGO_PKG_VERSION")))
        .send()?;

    if !response.status().is_success() {
        return Err(SyswardError::other(format!(
            "GitHub API returned status {}",
            response.status()
        )));
    }

    let release: LatestRelease = response.json()?;
    Ok(compare(app_version(), release))
}

fn compare(current: &str, release: LatestRelease) -> UpdateInfo {
    let latest = release.tag_name.trim_start_matches('v').to_string();
    UpdateInfo {
        current_version: current.to_string(),
        has_update: !latest.is_empty() && latest != current,
        latest_version: latest,
        release_url: release.html_url,
        release_notes: release.body.unwrap_or_default(),
    }
}
