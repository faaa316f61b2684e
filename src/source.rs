use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use reqwest::Client;

use crate::config::Style;
use crate::error::Error;

pub const REMOTE_BASE_URL: &str =
    "https://raw.githubusercontent.com/phosphor-icons/core/main/assets";

/// Sub-directory of the user cache directory holding downloaded SVGs.
pub const CACHE_DIR_NAME: &str = "phosphor-uikit";

/// Resolves an icon to a local SVG path, fetching it first if necessary.
#[allow(async_fn_in_trait)]
pub trait SourceProvider {
    async fn resolve(&mut self, name: &str, style: Style) -> Result<PathBuf>;
}

/// File name of an icon inside Phosphor's `assets/{style}/` directories.
///
/// Regular icons carry no style suffix: `person.svg`, `person-bold.svg`.
pub fn svg_file_name(name: &str, style: Style) -> String {
    match style {
        Style::Regular => format!("{}.svg", name),
        style => format!("{}-{}.svg", name, style),
    }
}

/// Looks in a local Phosphor core checkout, then the user cache, then GitHub.
pub struct PhosphorSources {
    client: Client,
    checkout: Option<PathBuf>,
    cache_dir: PathBuf,
    base_url: String,
    warned_missing_checkout: bool,
}

impl PhosphorSources {
    pub fn new(checkout: Option<PathBuf>) -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(CACHE_DIR_NAME);
        Self::with_cache_dir(checkout, cache_dir)
    }

    pub fn with_cache_dir(checkout: Option<PathBuf>, cache_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .gzip(true)
                .build()
                .context("Failed to build HTTP client")?,
            checkout,
            cache_dir,
            base_url: REMOTE_BASE_URL.to_string(),
            warned_missing_checkout: false,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn checkout_path(&self, name: &str, style: Style) -> Option<PathBuf> {
        self.checkout.as_ref().map(|root| {
            root.join("assets")
                .join(style.as_str())
                .join(svg_file_name(name, style))
        })
    }

    pub fn cache_path(&self, name: &str, style: Style) -> PathBuf {
        self.cache_dir
            .join(style.as_str())
            .join(svg_file_name(name, style))
    }

    pub fn remote_url(&self, name: &str, style: Style) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            style,
            svg_file_name(name, style)
        )
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, Error> {
        let fetch_error = |reason: String| Error::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl SourceProvider for PhosphorSources {
    async fn resolve(&mut self, name: &str, style: Style) -> Result<PathBuf> {
        if let Some(local) = self.checkout_path(name, style) {
            if local.is_file() {
                return Ok(local);
            }
            if !self.warned_missing_checkout {
                println!(
                    "{} {} not found in local checkout, falling back to cache",
                    "!".yellow(),
                    local.display()
                );
                self.warned_missing_checkout = true;
            }
        }

        let cached = self.cache_path(name, style);
        if cached.is_file() {
            return Ok(cached);
        }

        let url = self.remote_url(name, style);
        println!("    {} {}", "fetch".cyan(), url);
        let bytes = self.download(&url).await?;
        write_cached(&cached, &bytes).await?;
        Ok(cached)
    }
}

async fn write_cached(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
