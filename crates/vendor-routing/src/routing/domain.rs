use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for warehouse vendors referenced by rules and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VendorId(pub String);

impl VendorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VendorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Inclusive package weight bounds in kilograms. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
}

impl WeightRange {
    pub fn from(minimum: f64) -> Self {
        Self {
            from: Some(minimum),
            to: None,
        }
    }

    pub fn between(minimum: f64, maximum: f64) -> Self {
        Self {
            from: Some(minimum),
            to: Some(maximum),
        }
    }

    /// Both bounds present with the minimum above the maximum.
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }
}

/// Static allocation entry mapping a city/service scope to a target vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRule {
    pub partner: String,
    pub city_id: String,
    pub group_service: String,
    pub enabled: bool,
    /// Static priority; lower values rank higher.
    pub index: i32,
    /// Seller the rule is pinned to. Blank means any seller.
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub seller: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub seller_name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub rule_type: Option<String>,
    pub vendor_id: VendorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<WeightRange>,
}

pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Categorical vendor health shown on the performance view. Never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }
}

/// Point-in-time performance snapshot for a single vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    /// Outbound on-time percentage, 0-100.
    pub outbound_otp: f64,
    /// Inbound on-time percentage, 0-100.
    pub inbound_otp: f64,
    /// Hours.
    pub avg_processing_time: f64,
    /// Hours.
    pub return_tat: f64,
    pub backlog: u32,
    pub status: HealthStatus,
}

/// Candidate shipment submitted to the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentQuery {
    pub city: String,
    /// Kilograms.
    pub weight: f64,
    #[serde(default)]
    pub seller: String,
}

impl ShipmentQuery {
    pub fn new(city: impl Into<String>, weight: f64, seller: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            weight,
            seller: seller.into(),
        }
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.city.trim().is_empty() {
            return Err(QueryError::MissingCity);
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(QueryError::InvalidWeight(self.weight));
        }
        Ok(())
    }
}

/// Rejections raised before a query reaches the scorer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("destination city is required")]
    MissingCity,
    #[error("package weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),
}

/// Outcome tag attached to every scored candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "No Metrics")]
    NoMetrics,
    #[serde(rename = "Circuit Breaker: Backlog Exceeded")]
    CircuitBreaker,
}

impl CandidateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateStatus::Active => "Active",
            CandidateStatus::NoMetrics => "No Metrics",
            CandidateStatus::CircuitBreaker => "Circuit Breaker: Backlog Exceeded",
        }
    }
}

/// Unrounded contributions behind an active candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub otp_bonus: f64,
    pub backlog_penalty: f64,
    pub priority_bonus: f64,
}

/// A rule that survived the hard-constraint filter, with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub rule: AllocationRule,
    pub metric: Option<PerformanceMetric>,
    pub score: f64,
    pub breakdown: Option<ScoreBreakdown>,
    pub status: CandidateStatus,
    pub circuit_breaker: bool,
}
