use std::cmp::Ordering;
use std::collections::HashMap;

use super::config::RoutingConfig;
use super::domain::{
    AllocationRule, CandidateStatus, PerformanceMetric, ScoreBreakdown, ScoredCandidate, VendorId,
};

pub const NO_METRICS_SCORE: f64 = -1.0;
pub const CIRCUIT_BREAKER_SCORE: f64 = -999.0;

const BASE_SCORE: f64 = 100.0;
const OTP_TARGET: f64 = 90.0;
const BACKLOG_BUCKET: f64 = 10.0;
const PRIORITY_PIVOT: i32 = 5;
const PRIORITY_MULTIPLIER: f64 = 5.0;

/// Round to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn score_rule(
    rule: &AllocationRule,
    metrics: &HashMap<VendorId, PerformanceMetric>,
    config: &RoutingConfig,
) -> ScoredCandidate {
    let Some(metric) = metrics.get(&rule.vendor_id) else {
        return ScoredCandidate {
            rule: rule.clone(),
            metric: None,
            score: NO_METRICS_SCORE,
            breakdown: None,
            status: CandidateStatus::NoMetrics,
            circuit_breaker: false,
        };
    };

    if metric.backlog > config.backlog_threshold {
        return ScoredCandidate {
            rule: rule.clone(),
            metric: Some(metric.clone()),
            score: CIRCUIT_BREAKER_SCORE,
            breakdown: None,
            status: CandidateStatus::CircuitBreaker,
            circuit_breaker: true,
        };
    }

    let breakdown = breakdown(rule, metric, config);
    let raw =
        BASE_SCORE + breakdown.otp_bonus - breakdown.backlog_penalty + breakdown.priority_bonus;

    ScoredCandidate {
        rule: rule.clone(),
        metric: Some(metric.clone()),
        score: round1(raw),
        breakdown: Some(breakdown),
        status: CandidateStatus::Active,
        circuit_breaker: false,
    }
}

fn breakdown(
    rule: &AllocationRule,
    metric: &PerformanceMetric,
    config: &RoutingConfig,
) -> ScoreBreakdown {
    let otp_bonus = (metric.outbound_otp - OTP_TARGET) * f64::from(config.weight_otp);
    let backlog_penalty =
        (f64::from(metric.backlog) / BACKLOG_BUCKET) * f64::from(config.weight_backlog);
    let priority_bonus = f64::from(PRIORITY_PIVOT - rule.index)
        * f64::from(config.weight_static)
        * PRIORITY_MULTIPLIER;

    ScoreBreakdown {
        otp_bonus,
        backlog_penalty,
        priority_bonus,
    }
}

/// Stable descending sort; equal scores keep their input order.
pub(crate) fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates
}
