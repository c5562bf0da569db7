//! npm registry HTTP API client

use crate::client::{validate_package_name, RegistryClient};
use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Public npm registry
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// The part of the packument we care about
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags")]
    dist_tags: DistTags,
}

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: Option<String>,
}

/// Reads `dist-tags.latest` from `<registry>/<package>`
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRegistry {
    /// Client for the public npm registry
    pub fn new() -> Result<Self> {
        Self::with_base_url(NPM_REGISTRY_URL)
    }

    /// Client for a custom registry (mirror, Verdaccio, ...)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::other(format!(
                "Unsupported registry URL scheme: {}",
                base_url.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(format!("modules-check/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Registry this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn package_url(&self, package: &str) -> String {
        // Scoped packages like @scope/name are requested as @scope%2Fname
        let encoded_name = if package.starts_with('@') {
            package.replace('/', "%2F")
        } else {
            package.to_string()
        };
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            encoded_name
        )
    }
}

#[async_trait::async_trait]
impl RegistryClient for HttpRegistry {
    async fn latest_version(&self, package: &str) -> Result<String> {
        validate_package_name(package)?;

        let url = self.package_url(package);
        debug!(%url, "querying registry");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::PackageNotFound(
                package.to_string(),
                self.base_url.to_string(),
            ));
        }
        if !response.status().is_success() {
            return Err(Error::other(format!(
                "HTTP request failed with status {}: {}",
                response.status(),
                url
            )));
        }

        let body: NpmPackageResponse = response.json().await?;
        body.dist_tags
            .latest
            .ok_or_else(|| Error::EmptyVersion(package.to_string()))
    }
}
