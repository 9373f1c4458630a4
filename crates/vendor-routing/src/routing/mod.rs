//! Smart routing: hard-constraint filtering and weighted ranking of
//! warehouse vendors for a candidate shipment.
//!
//! [`score`] is the pure core. Everything else in this module feeds it
//! validated inputs (catalog loading, the simulation service) or exposes it
//! over HTTP.

mod catalog;
mod config;
pub mod domain;
mod eligibility;
mod import;
pub mod repository;
pub mod router;
mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use catalog::{CatalogImportError, RoutingCatalog};
pub use config::{RoutingConfig, RoutingConfigError, MAX_WEIGHT};
pub use domain::{
    AllocationRule, CandidateStatus, HealthStatus, PerformanceMetric, QueryError, ScoreBreakdown,
    ScoredCandidate, ShipmentQuery, VendorId, WeightRange,
};
pub use eligibility::ExclusionReason;
pub use import::RuleImporter;
pub use repository::{CatalogRepository, RepositoryError};
pub use router::routing_router;
pub use scoring::{round1, CIRCUIT_BREAKER_SCORE, NO_METRICS_SCORE};
pub use service::{RoutingServiceError, RoutingSimulationService};

/// Filter `rules` against `query`, score the survivors and rank them.
///
/// Deterministic for fixed inputs. An empty result means no rule matched.
pub fn score(
    rules: &[AllocationRule],
    metrics: &HashMap<VendorId, PerformanceMetric>,
    config: &RoutingConfig,
    query: &ShipmentQuery,
) -> Vec<ScoredCandidate> {
    let candidates = rules
        .iter()
        .filter(|rule| eligibility::check(rule, query).is_ok())
        .map(|rule| scoring::score_rule(rule, metrics, config))
        .collect();

    scoring::rank(candidates)
}

/// Same ranking as [`score`], plus the rules the filter dropped and why.
pub fn explain(
    rules: &[AllocationRule],
    metrics: &HashMap<VendorId, PerformanceMetric>,
    config: &RoutingConfig,
    query: &ShipmentQuery,
) -> SimulationReport {
    let mut eligible = Vec::new();
    let mut excluded = Vec::new();

    for rule in rules {
        match eligibility::check(rule, query) {
            Ok(()) => eligible.push(scoring::score_rule(rule, metrics, config)),
            Err(reason) => excluded.push(ExcludedRule {
                rule: rule.clone(),
                reason,
            }),
        }
    }

    SimulationReport {
        query: query.clone(),
        config: *config,
        candidates: scoring::rank(eligible),
        excluded,
    }
}

/// Stateless scorer bound to a single weight configuration.
#[derive(Debug, Clone)]
pub struct AllocationScorer {
    config: RoutingConfig,
}

impl AllocationScorer {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn score(
        &self,
        rules: &[AllocationRule],
        metrics: &HashMap<VendorId, PerformanceMetric>,
        query: &ShipmentQuery,
    ) -> Vec<ScoredCandidate> {
        score(rules, metrics, &self.config, query)
    }

    pub fn explain(
        &self,
        rules: &[AllocationRule],
        metrics: &HashMap<VendorId, PerformanceMetric>,
        query: &ShipmentQuery,
    ) -> SimulationReport {
        explain(rules, metrics, &self.config, query)
    }
}

/// Rule dropped by the hard-constraint filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRule {
    pub rule: AllocationRule,
    #[serde(flatten)]
    pub reason: ExclusionReason,
}

/// Ranked candidates for one simulated shipment, with the filter's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub query: ShipmentQuery,
    pub config: RoutingConfig,
    pub candidates: Vec<ScoredCandidate>,
    pub excluded: Vec<ExcludedRule>,
}

impl SimulationReport {
    /// Highest-ranked candidate that is neither circuit-broken nor missing metrics.
    pub fn selected(&self) -> Option<&ScoredCandidate> {
        self.candidates
            .iter()
            .find(|candidate| candidate.status == CandidateStatus::Active)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
