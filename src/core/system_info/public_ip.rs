//! Best-effort public IP / geolocation lookup with a time-bounded cache.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Deserialize;

use crate::error::{Result, SyswardError};

/// Public address details; all fields empty when never resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpDetails {
    pub ip: String,
    pub location: String,
    pub operator: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    query: String,
    #[serde(default)]
    country: String,
    #[serde(default, rename = "regionName")]
    region_name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    isp: String,
}

impl From<LookupResponse> for IpDetails {
    fn from(r: LookupResponse) -> Self {
        let location = [r.country, r.region_name, r.city]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            ip: r.query,
            location,
            operator: r.isp,
        }
    }
}

/// Resolves and caches the public address.
///
/// A failed lookup never clears the cache; callers get the last good value
/// or empty strings.
pub struct PublicIpResolver {
    url: String,
    timeout: Duration,
    ttl: Duration,
    cache: Mutex<Option<(IpDetails, Instant)>>,
}

impl PublicIpResolver {
    pub fn new(url: impl Into<String>, timeout: Duration, ttl: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn resolve(&self) -> IpDetails {
        self.resolve_with(|| self.fetch())
    }

    /// Cache logic around an arbitrary fetcher.
    ///
    /// The cache lock is not held while `fetch` runs.
    pub fn resolve_with<F>(&self, fetch: F) -> IpDetails
    where
        F: FnOnce() -> Result<IpDetails>,
    {
        if let Some((details, at)) = self.cache.lock().as_ref() {
            if at.elapsed() < self.ttl {
                return details.clone();
            }
        }

        let fetched = fetch();
        let mut cache = self.cache.lock();

        match fetched {
            Ok(details) if !details.ip.is_empty() => {
                *cache = Some((details.clone(), Instant::now()));
                details
            }
            Ok(_) => {
                log::debug!("Public IP lookup returned no address");
                cached_or_empty(&cache)
            }
            Err(e) => {
                log::debug!("Public IP lookup failed: {}", e);
                cached_or_empty(&cache)
            }
        }
    }

    fn fetch(&self) -> Result<IpDetails> {
        let response = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?
            .get(&self.url)
            .header("User-Agent", "sysward")
            .send()?;

        if !response.status().is_success() {
            return Err(SyswardError::other(format!(
                "IP lookup returned status {}",
                response.status()
            )));
        }

        let body: LookupResponse = response.json()?;
        Ok(body.into())
    }
}

fn cached_or_empty(cache: &Option<(IpDetails, Instant)>) -> IpDetails {
    cache
        .as_ref()
        .map(|(details, _)| details.clone())
        .unwrap_or_default()
}
