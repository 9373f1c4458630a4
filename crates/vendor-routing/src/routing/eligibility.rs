use serde::{Deserialize, Serialize};

use super::domain::{AllocationRule, ShipmentQuery};

/// First hard constraint a rule failed, reported in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    Disabled,
    CityMismatch,
    BelowMinimumWeight { minimum: f64 },
    AboveMaximumWeight { maximum: f64 },
    SellerMismatch,
}

impl ExclusionReason {
    pub fn summary(&self) -> String {
        match self {
            ExclusionReason::Disabled => "rule disabled".to_string(),
            ExclusionReason::CityMismatch => "destination city does not match".to_string(),
            ExclusionReason::BelowMinimumWeight { minimum } => {
                format!("package lighter than {minimum} kg minimum")
            }
            ExclusionReason::AboveMaximumWeight { maximum } => {
                format!("package heavier than {maximum} kg maximum")
            }
            ExclusionReason::SellerMismatch => "rule is pinned to another seller".to_string(),
        }
    }
}

pub(crate) fn check(
    rule: &AllocationRule,
    query: &ShipmentQuery,
) -> Result<(), ExclusionReason> {
    if !rule.enabled {
        return Err(ExclusionReason::Disabled);
    }

    if rule.city_id != query.city {
        return Err(ExclusionReason::CityMismatch);
    }

    if let Some(range) = &rule.weight {
        if let Some(minimum) = range.from {
            if query.weight < minimum {
                return Err(ExclusionReason::BelowMinimumWeight { minimum });
            }
        }
        if let Some(maximum) = range.to {
            if query.weight > maximum {
                return Err(ExclusionReason::AboveMaximumWeight { maximum });
            }
        }
    }

    // A rule without a seller applies to every seller.
    if let Some(seller) = &rule.seller {
        if *seller != query.seller {
            return Err(ExclusionReason::SellerMismatch);
        }
    }

    Ok(())
}
