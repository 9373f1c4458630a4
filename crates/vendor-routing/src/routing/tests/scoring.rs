use super::common::*;
use crate::routing::domain::{CandidateStatus, VendorId, WeightRange};
use crate::routing::{explain, score, AllocationScorer, ExclusionReason};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn open_rule_scores_with_breakdown() {
    let rules = vec![rule("SGN", 1, "flexichain")];

    let ranked = score(&rules, &metrics(), &config(), &query("SGN", 25.0, "x"));

    assert_eq!(ranked.len(), 1);
    let candidate = &ranked[0];
    assert_eq!(candidate.score, 132.8);
    assert_eq!(candidate.status, CandidateStatus::Active);
    assert!(!candidate.circuit_breaker);
    let breakdown = candidate.breakdown.expect("active candidates carry a breakdown");
    assert!(close(breakdown.otp_bonus, 40.8));
    assert!(close(breakdown.backlog_penalty, 48.0));
    assert!(close(breakdown.priority_bonus, 40.0));
}

#[test]
fn backlog_over_threshold_trips_circuit_breaker() {
    let rules = vec![rule("SGN", 1, "flexichain")];
    let mut metrics = metrics();
    metrics
        .get_mut(&VendorId::from("flexichain"))
        .expect("fixture present")
        .backlog = 120;

    let ranked = score(&rules, &metrics, &config(), &query("SGN", 25.0, "x"));

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].score, -999.0);
    assert!(ranked[0].circuit_breaker);
    assert!(ranked[0].breakdown.is_none());
    assert_eq!(
        ranked[0].status.label(),
        "Circuit Breaker: Backlog Exceeded"
    );
    assert!(ranked[0].metric.is_some());
}

#[test]
fn backlog_equal_to_threshold_is_still_active() {
    let rules = vec![rule("SGN", 1, "flexichain")];
    let mut metrics = metrics();
    metrics
        .get_mut(&VendorId::from("flexichain"))
        .expect("fixture present")
        .backlog = 100;

    let ranked = score(&rules, &metrics, &config(), &query("SGN", 25.0, "x"));

    assert_eq!(ranked[0].status, CandidateStatus::Active);
    assert!(!ranked[0].circuit_breaker);
}

#[test]
fn vendor_without_metrics_scores_minus_one() {
    let rules = vec![rule("SGN", 1, "ghost")];

    let ranked = score(&rules, &metrics(), &config(), &query("SGN", 25.0, "x"));

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].score, -1.0);
    assert_eq!(ranked[0].status.label(), "No Metrics");
    assert!(ranked[0].metric.is_none());
    assert!(ranked[0].breakdown.is_none());
    assert!(!ranked[0].circuit_breaker);
}

#[test]
fn city_mismatch_removes_rule() {
    let rules = vec![rule("SGN", 1, "flexichain")];

    let ranked = score(&rules, &metrics(), &config(), &query("HAN", 25.0, "x"));

    assert!(ranked.is_empty());
}

#[test]
fn pinned_seller_excludes_other_sellers() {
    let rules = vec![seller_rule()];

    let ranked = score(&rules, &metrics(), &config(), &query("SGN", 25.0, "000"));

    assert!(ranked.is_empty());
}

#[test]
fn disabled_rule_is_never_scored() {
    let mut disabled = rule("SGN", 0, "aura");
    disabled.enabled = false;

    let ranked = score(&[disabled], &metrics(), &config(), &query("SGN", 25.0, "x"));

    assert!(ranked.is_empty());
}

#[test]
fn weight_outside_range_is_excluded() {
    let mut bounded = rule("SGN", 1, "flexichain");
    bounded.weight = Some(WeightRange::between(5.0, 20.0));
    let rules = vec![bounded];

    assert!(score(&rules, &metrics(), &config(), &query("SGN", 25.0, "x")).is_empty());
    assert!(score(&rules, &metrics(), &config(), &query("SGN", 4.0, "x")).is_empty());
    assert_eq!(
        score(&rules, &metrics(), &config(), &query("SGN", 20.0, "x")).len(),
        1
    );
}

#[test]
fn console_defaults_rank_pinned_vendor_first() {
    let ranked = score(
        &rules(),
        &metrics(),
        &config(),
        &query("SGN", 25.0, PINNED_SELLER),
    );

    let vendors: Vec<&str> = ranked
        .iter()
        .map(|candidate| candidate.rule.vendor_id.as_str())
        .collect();
    assert_eq!(vendors, vec!["aura", "flexichain"]);
    assert_eq!(ranked[0].score, 158.6);
    assert_eq!(ranked[1].score, 132.8);
}

#[test]
fn circuit_broken_vendor_ranks_below_missing_metrics() {
    let rules = vec![
        rule("HAN", 2, "teraco"),
        rule("HAN", 1, "ghost"),
        rule("HAN", 4, "aura"),
    ];

    let ranked = score(&rules, &metrics(), &config(), &query("HAN", 10.0, "x"));

    let statuses: Vec<CandidateStatus> = ranked.iter().map(|candidate| candidate.status).collect();
    assert_eq!(
        statuses,
        vec![
            CandidateStatus::Active,
            CandidateStatus::NoMetrics,
            CandidateStatus::CircuitBreaker
        ]
    );
}

#[test]
fn duplicate_vendor_rules_are_scored_independently_and_keep_order() {
    let mut first = rule("SGN", 2, "flexichain");
    first.partner = "first".to_string();
    let mut second = rule("SGN", 2, "flexichain");
    second.partner = "second".to_string();
    let mut third = rule("SGN", 2, "flexichain");
    third.partner = "third".to_string();

    let ranked = score(
        &[first, second, third],
        &metrics(),
        &config(),
        &query("SGN", 25.0, "x"),
    );

    let partners: Vec<&str> = ranked
        .iter()
        .map(|candidate| candidate.rule.partner.as_str())
        .collect();
    assert_eq!(partners, vec!["first", "second", "third"]);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].score == pair[1].score));
}

#[test]
fn high_index_produces_negative_priority_bonus() {
    let rules = vec![rule("SGN", 8, "flexichain")];

    let ranked = score(&rules, &metrics(), &config(), &query("SGN", 25.0, "x"));

    let breakdown = ranked[0].breakdown.expect("breakdown");
    assert!(close(breakdown.priority_bonus, -30.0));
    assert_eq!(ranked[0].score, 62.8);
}

#[test]
fn repeated_calls_are_identical() {
    let rules = rules();
    let metrics = metrics();
    let query = query("SGN", 25.0, PINNED_SELLER);

    let first = score(&rules, &metrics, &config(), &query);
    let second = score(&rules, &metrics, &config(), &query);

    assert_eq!(first, second);
}

#[test]
fn explain_matches_score_and_lists_exclusions() {
    let rules = rules();
    let query = query("SGN", 25.0, "000");

    let report = explain(&rules, &metrics(), &config(), &query);

    assert_eq!(report.candidates, score(&rules, &metrics(), &config(), &query));
    let reasons: Vec<ExclusionReason> = report.excluded.iter().map(|entry| entry.reason).collect();
    assert_eq!(
        reasons,
        vec![ExclusionReason::SellerMismatch, ExclusionReason::CityMismatch]
    );
    assert_eq!(
        report.selected().map(|candidate| candidate.rule.vendor_id.as_str()),
        Some("flexichain")
    );
}

#[test]
fn scorer_uses_its_bound_config() {
    let mut heavy_static = config();
    heavy_static.weight_static = 10;
    let scorer = AllocationScorer::new(heavy_static);

    let ranked = scorer.score(&rules(), &metrics(), &query("SGN", 25.0, PINNED_SELLER));

    // (5 - 1) * 10 * 5 outweighs aura's OTP advantage.
    assert_eq!(ranked[0].rule.vendor_id.as_str(), "flexichain");
    assert_eq!(scorer.config().weight_static, 10);
}
