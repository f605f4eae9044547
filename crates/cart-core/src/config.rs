//! # Catalog Configuration
//!
//! Parsing of discount catalog documents.
//!
//! ## Configuration File Format
//! ```toml
//! # discounts.toml
//! [[discounts]]
//! code = "SAMUEL10"
//! expiration_date = "2025-12-25T00:00:00Z"
//! type = "percentage"
//! percentage = 10
//!
//! [[discounts]]
//! code = "REMI5"
//! expiration_date = "2026-12-25T00:00:00Z"
//! type = "amount"
//! amount = 5
//! ```
//!
//! The same document may be given as JSON (`{"discounts": [...]}`).
//! A document without a `discounts` key means "nothing configured".

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::discount::{DiscountCode, DiscountKind, InMemoryCatalog};
use crate::error::{CatalogError, CatalogResult};

/// On-disk shape of a discount catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounts: Option<Vec<DiscountCode>>,
}

impl CatalogConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        let config: CatalogConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        let config: CatalogConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a catalog document from `path`.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        info!(?path, "Loading discount catalog from file");
        let contents = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };

        debug!(
            count = config.discounts.as_ref().map_or(0, Vec::len),
            "Discount catalog loaded"
        );
        Ok(config)
    }

    /// Validates every discount entry.
    ///
    /// ## Rules
    /// - code must not be empty
    /// - percentage must be finite and within 0..=100
    /// - amount must be finite and non-negative
    pub fn validate(&self) -> CatalogResult<()> {
        for discount in self.discounts.iter().flatten() {
            let invalid = |reason: &str| CatalogError::InvalidDiscount {
                code: discount.code.clone(),
                reason: reason.to_string(),
            };

            if discount.code.trim().is_empty() {
                return Err(invalid("code is required"));
            }

            match discount.kind {
                DiscountKind::Percentage { percentage } => {
                    if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
                        return Err(invalid("percentage must be between 0 and 100"));
                    }
                }
                DiscountKind::Amount { amount } => {
                    if !amount.is_finite() || amount < 0.0 {
                        return Err(invalid("amount must not be negative"));
                    }
                }
            }
        }

        Ok(())
    }
}

impl InMemoryCatalog {
    /// Builds a catalog from a TOML document.
    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        CatalogConfig::from_toml_str(contents).map(InMemoryCatalog::from_config)
    }

    /// Builds a catalog from a JSON document.
    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        CatalogConfig::from_json_str(contents).map(InMemoryCatalog::from_config)
    }

    /// Builds a catalog from a TOML or JSON file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        CatalogConfig::load(path).map(InMemoryCatalog::from_config)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
