use std::collections::HashMap;

use super::catalog::RoutingCatalog;
use super::domain::{AllocationRule, PerformanceMetric, VendorId};
use crate::vendors::Vendor;

/// Data-access boundary supplying the simulator with its inputs.
pub trait CatalogRepository: Send + Sync {
    fn vendors(&self) -> Result<Vec<Vendor>, RepositoryError>;
    fn rules(&self) -> Result<Vec<AllocationRule>, RepositoryError>;
    fn metrics(&self) -> Result<HashMap<VendorId, PerformanceMetric>, RepositoryError>;
}

/// Error enumeration for catalog lookups.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// A loaded catalog is a read-only snapshot repository.
impl CatalogRepository for RoutingCatalog {
    fn vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Ok(self.vendors.clone())
    }

    fn rules(&self) -> Result<Vec<AllocationRule>, RepositoryError> {
        Ok(self.rules.clone())
    }

    fn metrics(&self) -> Result<HashMap<VendorId, PerformanceMetric>, RepositoryError> {
        Ok(self.metrics.clone())
    }
}
