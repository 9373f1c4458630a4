use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{AllocationRule, PerformanceMetric, VendorId, WeightRange};
use crate::vendors::Vendor;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidRow { line: u64, detail: String },
    InvalidRule { position: usize, detail: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read routing catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid allocation rule CSV: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid routing catalog JSON: {}", err),
            CatalogImportError::InvalidRow { line, detail } => {
                write!(f, "allocation rule on line {}: {}", line, detail)
            }
            CatalogImportError::InvalidRule { position, detail } => {
                write!(f, "allocation rule #{} in catalog: {}", position, detail)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            CatalogImportError::InvalidRow { .. } | CatalogImportError::InvalidRule { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Vendors, allocation rules and metric snapshots handed to the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingCatalog {
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub rules: Vec<AllocationRule>,
    #[serde(default)]
    pub metrics: HashMap<VendorId, PerformanceMetric>,
}

impl RoutingCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let catalog: Self = serde_json::from_reader(reader)?;

        for (position, rule) in catalog.rules.iter().enumerate() {
            if let Some(range) = rule.weight.filter(WeightRange::is_inverted) {
                return Err(CatalogImportError::InvalidRule {
                    position,
                    detail: format!(
                        "weight.from {} exceeds weight.to {}",
                        range.from.unwrap_or_default(),
                        range.to.unwrap_or_default()
                    ),
                });
            }
        }

        Ok(catalog)
    }

    /// Replace the rule list, e.g. with rules imported from CSV.
    pub fn with_rules(mut self, rules: Vec<AllocationRule>) -> Self {
        self.rules = rules;
        self
    }
}
