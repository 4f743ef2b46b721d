use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{MergeError, Result};

/// One entry of the product catalog.
///
/// The column `code` carries the purchase flag in the input table. Codes
/// without a display `label` still get an aggregated flag column in the
/// output but never appear in the human-readable `products` cell.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Deployment-specific merge configuration.
///
/// The product catalog (codes, display order, localized labels) and the
/// placeholder phrases that disqualify a name are deployment data, not
/// business logic, so they load from a TOML file. `[[product]]` order in the
/// file is the display order of both the output columns and the `products`
/// label list.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    #[serde(rename = "product")]
    pub products: Vec<CatalogProduct>,
    /// Case-insensitive phrases meaning "no name provided"; a name cell
    /// containing one anywhere is invalid
    #[serde(default = "default_placeholder_names")]
    pub placeholder_names: Vec<String>,
    /// Case-insensitive null-ish literals; a name cell is invalid only when
    /// it equals one exactly after trimming
    #[serde(default = "default_null_tokens")]
    pub null_tokens: Vec<String>,
}

impl MergeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MergeError::Config(format!(
                "Failed to read catalog file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: MergeConfig = toml::from_str(&content)?;
        if config.products.is_empty() {
            return Err(MergeError::Config(
                "catalog must define at least one [[product]] entry".to_string(),
            ));
        }
        Ok(config)
    }

    /// Product codes in display order.
    pub fn product_codes(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.code.as_str())
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

fn default_placeholder_names() -> Vec<String> {
    DEFAULT_PLACEHOLDER_NAMES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_null_tokens() -> Vec<String> {
    DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect()
}

/// Phrases that mark a name cell as "no name provided".
const DEFAULT_PLACEHOLDER_NAMES: &[&str] = &["بدون نام", "no name", "name missing"];

/// Null-ish literals that exports leave behind for missing names. Matched as
/// the whole cell, never as a substring.
const DEFAULT_NULL_TOKENS: &[&str] = &["nan", "null", "none"];

/// The built-in catalog: product codes in their historical display order.
/// `azmoon`, `ghabooli` and `garage` are tracked flags without a customer
/// facing label.
static DEFAULT_CONFIG: Lazy<MergeConfig> = Lazy::new(|| {
    let labeled = |code: &str, label: &str| CatalogProduct {
        code: code.to_string(),
        label: Some(label.to_string()),
    };
    let unlabeled = |code: &str| CatalogProduct {
        code: code.to_string(),
        label: None,
    };

    MergeConfig {
        products: vec![
            labeled("chini", "دوره آنلاین چینی"),
            labeled("dakheli", "دوره آنلاین داخلی"),
            labeled("zaban", "دوره زبان فنی"),
            labeled("book", "کتاب زبان فنی"),
            labeled("carman", "دستگاه دیاگ"),
            unlabeled("azmoon"),
            unlabeled("ghabooli"),
            unlabeled("garage"),
            labeled("hoz", "دوره حضوری"),
            labeled("kia", "دوره آنلاین کره ای"),
            labeled("milyarder", "دوره تعمیرکار میلیاردر"),
            labeled("gds", "دوره GDS"),
            labeled("tpms-tuts", "دوره TPMS"),
            labeled("zed", "دوره ضد سرقت"),
            labeled("kmc", "وبینار KMC"),
            labeled("carmap", "کارمپ"),
            labeled("escl", "فرمان برقی حضوری"),
        ],
        placeholder_names: default_placeholder_names(),
        null_tokens: default_null_tokens(),
    }
});
