use std::collections::HashMap;

use proptest::prelude::*;
use vendor_routing::routing::{
    explain, score, AllocationRule, CandidateStatus, HealthStatus, PerformanceMetric,
    RoutingConfig, ShipmentQuery, VendorId, WeightRange, CIRCUIT_BREAKER_SCORE,
    NO_METRICS_SCORE,
};

const CITIES: [&str; 2] = ["SGN", "HAN"];
const VENDORS: [&str; 4] = ["aura", "teraco", "flexichain", "saoviet"];
const SELLERS: [&str; 2] = ["111", "222"];

fn weight_range() -> impl Strategy<Value = Option<WeightRange>> {
    prop_oneof![
        Just(None),
        (0.0f64..50.0).prop_map(|from| Some(WeightRange::from(from))),
        (0.0f64..50.0, 0.0f64..50.0)
            .prop_map(|(from, span)| Some(WeightRange::between(from, from + span))),
    ]
}

fn allocation_rule() -> impl Strategy<Value = AllocationRule> {
    (
        prop::sample::select(CITIES.to_vec()),
        any::<bool>(),
        -2i32..10,
        prop::option::of(prop::sample::select(SELLERS.to_vec())),
        prop::sample::select(VENDORS.to_vec()),
        weight_range(),
    )
        .prop_map(|(city, enabled, index, seller, vendor, weight)| AllocationRule {
            partner: String::new(),
            city_id: city.to_string(),
            group_service: "WAREHOUSE".to_string(),
            enabled,
            index,
            seller: seller.map(str::to_string),
            seller_name: None,
            rule_type: None,
            vendor_id: VendorId::from(vendor),
            weight,
        })
}

/// Rules tagged with their input position through `partner`.
fn rule_set() -> impl Strategy<Value = Vec<AllocationRule>> {
    prop::collection::vec(allocation_rule(), 0..12).prop_map(|rules| {
        rules
            .into_iter()
            .enumerate()
            .map(|(position, mut rule)| {
                rule.partner = position.to_string();
                rule
            })
            .collect()
    })
}

fn metric_table() -> impl Strategy<Value = HashMap<VendorId, PerformanceMetric>> {
    prop::collection::vec(
        (
            prop::sample::select(VENDORS.to_vec()),
            50.0f64..100.0,
            0u32..300,
        ),
        0..4,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(vendor, outbound_otp, backlog)| {
                let metric = PerformanceMetric {
                    vendor_id: VendorId::from(vendor),
                    vendor_name: vendor.to_string(),
                    outbound_otp,
                    inbound_otp: 95.0,
                    avg_processing_time: 2.0,
                    return_tat: 24.0,
                    backlog,
                    status: HealthStatus::Healthy,
                };
                (metric.vendor_id.clone(), metric)
            })
            .collect()
    })
}

fn routing_config() -> impl Strategy<Value = RoutingConfig> {
    (0u8..=10, 0u8..=10, 0u8..=10, 0u32..300).prop_map(
        |(weight_otp, weight_backlog, weight_static, backlog_threshold)| RoutingConfig {
            weight_otp,
            weight_backlog,
            weight_static,
            backlog_threshold,
        },
    )
}

fn shipment_query() -> impl Strategy<Value = ShipmentQuery> {
    (
        prop::sample::select(CITIES.to_vec()),
        0.1f64..80.0,
        prop::sample::select(SELLERS.to_vec()),
    )
        .prop_map(|(city, weight, seller)| ShipmentQuery::new(city, weight, seller))
}

fn position(rule: &AllocationRule) -> usize {
    rule.partner.parse().unwrap_or(usize::MAX)
}

proptest! {
    #[test]
    fn ranking_is_non_increasing_and_stable(
        rules in rule_set(),
        metrics in metric_table(),
        config in routing_config(),
        query in shipment_query(),
    ) {
        let ranked = score(&rules, &metrics, &config, &query);

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(position(&pair[0].rule) < position(&pair[1].rule));
            }
        }
    }

    #[test]
    fn candidates_satisfy_every_hard_constraint(
        rules in rule_set(),
        metrics in metric_table(),
        config in routing_config(),
        query in shipment_query(),
    ) {
        for candidate in score(&rules, &metrics, &config, &query) {
            let rule = &candidate.rule;
            prop_assert!(rule.enabled);
            prop_assert_eq!(&rule.city_id, &query.city);
            if let Some(seller) = &rule.seller {
                prop_assert_eq!(seller, &query.seller);
            }
            if let Some(range) = rule.weight {
                prop_assert!(range.from.map_or(true, |from| query.weight >= from));
                prop_assert!(range.to.map_or(true, |to| query.weight <= to));
            }
        }
    }

    #[test]
    fn statuses_match_sentinel_scores(
        rules in rule_set(),
        metrics in metric_table(),
        config in routing_config(),
        query in shipment_query(),
    ) {
        for candidate in score(&rules, &metrics, &config, &query) {
            match candidate.status {
                CandidateStatus::NoMetrics => {
                    prop_assert!(candidate.metric.is_none());
                    prop_assert_eq!(candidate.score, NO_METRICS_SCORE);
                }
                CandidateStatus::CircuitBreaker => {
                    prop_assert!(candidate.circuit_breaker);
                    prop_assert_eq!(candidate.score, CIRCUIT_BREAKER_SCORE);
                    let backlog = candidate.metric.as_ref().map_or(0, |metric| metric.backlog);
                    prop_assert!(backlog > config.backlog_threshold);
                }
                CandidateStatus::Active => {
                    prop_assert!(!candidate.circuit_breaker);
                    prop_assert!(candidate.breakdown.is_some());
                    let backlog = candidate
                        .metric
                        .as_ref()
                        .map_or(u32::MAX, |metric| metric.backlog);
                    prop_assert!(backlog <= config.backlog_threshold);
                }
            }
        }
    }

    #[test]
    fn scoring_is_deterministic_and_explain_partitions_rules(
        rules in rule_set(),
        metrics in metric_table(),
        config in routing_config(),
        query in shipment_query(),
    ) {
        let first = score(&rules, &metrics, &config, &query);
        let second = score(&rules, &metrics, &config, &query);
        prop_assert_eq!(&first, &second);

        let report = explain(&rules, &metrics, &config, &query);
        prop_assert_eq!(&report.candidates, &first);
        prop_assert_eq!(report.candidates.len() + report.excluded.len(), rules.len());
    }
}
