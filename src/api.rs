//! Homebrew JSON API client with in-memory caching.
//!
//! Only the fields needed to put a package into a Brewfile are decoded: its
//! names, its tap and its description.
//!
//! The cache lives as long as the [`BrewApi`] value, which is one invocation.
//! Nothing is persisted between runs, so a Brewfile edited by hand (or a
//! package renamed upstream) is always seen as it is now.
//!
//! # Examples
//!
//! ```no_run
//! use brufile::BrewApi;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = BrewApi::new()?;
//!     let formula = api.fetch_formula("ripgrep").await?;
//!     println!("{} from {}", formula.full_name, formula.tap);
//!     Ok(())
//! }
//! ```

use crate::config::DEFAULT_API_BASE;
use crate::entry::PackageKind;
use crate::error::{BrufileError, Result};
use crate::resolver::PackageReference;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Formula metadata from the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formula {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub tap: String,
    #[serde(default)]
    pub desc: Option<String>,
}

/// Cask metadata from the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cask {
    pub token: String,
    #[serde(default)]
    pub full_token: String,
    #[serde(default)]
    pub tap: String,
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

fn reference(
    kind: PackageKind,
    short_name: String,
    full_name: String,
    tap: String,
    desc: Option<String>,
) -> PackageReference {
    PackageReference {
        kind,
        full_name: if full_name.is_empty() {
            short_name.clone()
        } else {
            full_name
        },
        short_name,
        namespace: if tap.is_empty() {
            kind.core_tap().to_string()
        } else {
            tap
        },
        description: desc.filter(|d| !d.is_empty()),
    }
}

impl From<Formula> for PackageReference {
    fn from(formula: Formula) -> Self {
        reference(
            PackageKind::Formula,
            formula.name,
            formula.full_name,
            formula.tap,
            formula.desc,
        )
    }
}

impl From<Cask> for PackageReference {
    fn from(cask: Cask) -> Self {
        reference(
            PackageKind::Cask,
            cask.token,
            cask.full_token,
            cask.tap,
            cask.desc,
        )
    }
}

/// Homebrew API client with in-memory caching
#[derive(Clone)]
pub struct BrewApi {
    client: reqwest::Client,
    base_url: String,
    formula_cache: moka::future::Cache<String, Formula>,
    cask_cache: moka::future::Cache<String, Cask>,
}

impl BrewApi {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Client against a different API root (`HOMEBREW_API_DOMAIN`)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(10) // Lookups for one batch run concurrently
            .user_agent(format!("brufile/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            formula_cache: moka::future::Cache::new(256),
            cask_cache: moka::future::Cache::new(256),
        })
    }

    fn url(&self, kind: PackageKind, name: &str) -> String {
        let segment = match kind {
            PackageKind::Formula => "formula",
            PackageKind::Cask => "cask",
        };
        format!("{}/{}/{}.json", self.base_url, segment, name)
    }

    /// Fetch a formula by name.
    ///
    /// # Errors
    ///
    /// Returns [`BrufileError::FormulaNotFound`] on a 404.
    pub async fn fetch_formula(&self, name: &str) -> Result<Formula> {
        if let Some(cached) = self.formula_cache.get(name).await {
            return Ok(cached);
        }

        let response = self
            .client
            .get(self.url(PackageKind::Formula, name))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BrufileError::FormulaNotFound(name.to_string()));
        }

        let formula: Formula = response.error_for_status()?.json().await?;
        self.formula_cache
            .insert(name.to_string(), formula.clone())
            .await;
        Ok(formula)
    }

    /// Fetch a cask by token.
    ///
    /// # Errors
    ///
    /// Returns [`BrufileError::CaskNotFound`] on a 404.
    pub async fn fetch_cask(&self, token: &str) -> Result<Cask> {
        if let Some(cached) = self.cask_cache.get(token).await {
            return Ok(cached);
        }

        let response = self
            .client
            .get(self.url(PackageKind::Cask, token))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BrufileError::CaskNotFound(token.to_string()));
        }

        let cask: Cask = response.error_for_status()?.json().await?;
        self.cask_cache.insert(token.to_string(), cask.clone()).await;
        Ok(cask)
    }

    /// Fetch either kind as a [`PackageReference`]
    pub async fn fetch_package(&self, kind: PackageKind, name: &str) -> Result<PackageReference> {
        match kind {
            PackageKind::Formula => self.fetch_formula(name).await.map(Into::into),
            PackageKind::Cask => self.fetch_cask(name).await.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_reference_from_json() {
        let json = r#"{
            "name": "wget",
            "full_name": "wget",
            "tap": "homebrew/core",
            "desc": "Internet file retriever",
            "versions": {"stable": "1.24.5"}
        }"#;
        let formula: Formula = serde_json::from_str(json).unwrap();
        let package = PackageReference::from(formula);
        assert_eq!(package.kind, PackageKind::Formula);
        assert_eq!(package.full_name, "wget");
        assert_eq!(package.namespace, "homebrew/core");
        assert_eq!(package.description.as_deref(), Some("Internet file retriever"));
    }

    #[test]
    fn test_cask_reference_defaults() {
        let json = r#"{"token": "firefox", "name": ["Mozilla Firefox"], "desc": ""}"#;
        let cask: Cask = serde_json::from_str(json).unwrap();
        let package = PackageReference::from(cask);
        assert_eq!(package.full_name, "firefox");
        assert_eq!(package.namespace, "homebrew/cask");
        assert_eq!(package.description, None);
    }

    #[test]
    fn test_urls() {
        let api = BrewApi::with_base_url("https://example.test/api/").unwrap();
        assert_eq!(
            api.url(PackageKind::Formula, "jq"),
            "https://example.test/api/formula/jq.json"
        );
        assert_eq!(
            api.url(PackageKind::Cask, "iterm2"),
            "https://example.test/api/cask/iterm2.json"
        );
    }
}
