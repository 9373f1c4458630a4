use std::sync::Arc;

use tracing::{debug, warn};

use super::config::{RoutingConfig, RoutingConfigError};
use super::domain::{PerformanceMetric, QueryError, ShipmentQuery, VendorId};
use super::repository::{CatalogRepository, RepositoryError};
use super::{explain, SimulationReport};
use crate::performance::PerformanceOverview;
use crate::vendors::VendorOverview;

/// Service composing the catalog repository with the allocation scorer.
pub struct RoutingSimulationService<R> {
    repository: Arc<R>,
    default_config: RoutingConfig,
}

impl<R> RoutingSimulationService<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>, default_config: RoutingConfig) -> Self {
        Self {
            repository,
            default_config,
        }
    }

    pub fn default_config(&self) -> RoutingConfig {
        self.default_config
    }

    /// Score the catalog's rules for `query`, using `config` when supplied.
    pub fn simulate(
        &self,
        query: ShipmentQuery,
        config: Option<RoutingConfig>,
    ) -> Result<SimulationReport, RoutingServiceError> {
        query.validate()?;
        let config = config.unwrap_or(self.default_config);
        config.validate()?;

        let rules = self.repository.rules()?;
        let metrics = self.repository.metrics()?;
        let report = explain(&rules, &metrics, &config, &query);

        debug!(
            city = %query.city,
            weight = query.weight,
            seller = %query.seller,
            candidates = report.candidates.len(),
            excluded = report.excluded.len(),
            "routing simulation complete"
        );

        if !report.is_empty() && report.selected().is_none() {
            warn!(
                city = %query.city,
                candidates = report.candidates.len(),
                "no active vendor available for shipment"
            );
        }

        Ok(report)
    }

    pub fn vendor_overview(&self) -> Result<VendorOverview, RoutingServiceError> {
        let vendors = self.repository.vendors()?;
        Ok(VendorOverview::from_vendors(vendors))
    }

    pub fn performance_overview(&self) -> Result<PerformanceOverview, RoutingServiceError> {
        let metrics = self.repository.metrics()?;
        Ok(PerformanceOverview::from_metrics(metrics.values()))
    }

    pub fn vendor_metric(
        &self,
        vendor_id: &VendorId,
    ) -> Result<PerformanceMetric, RoutingServiceError> {
        let metrics = self.repository.metrics()?;
        let metric = metrics
            .get(vendor_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;
        Ok(metric)
    }
}

/// Error raised by the routing simulation service.
#[derive(Debug, thiserror::Error)]
pub enum RoutingServiceError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
    #[error(transparent)]
    InvalidConfig(#[from] RoutingConfigError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
