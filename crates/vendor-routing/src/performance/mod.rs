//! Aggregations behind the performance monitor view.

use serde::{Deserialize, Serialize};

use crate::routing::{round1, HealthStatus, PerformanceMetric};

/// Vendor counts per health status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
}

impl HealthBreakdown {
    fn record(&mut self, status: HealthStatus) {
        match status {
            HealthStatus::Healthy => self.healthy += 1,
            HealthStatus::Warning => self.warning += 1,
            HealthStatus::Critical => self.critical += 1,
        }
    }
}

/// KPI row plus the detailed vendor table.
///
/// Averages are `None` when there are no metrics to average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceOverview {
    pub avg_outbound_otp: Option<f64>,
    pub avg_inbound_otp: Option<f64>,
    pub avg_processing_time: Option<f64>,
    pub avg_return_tat: Option<f64>,
    pub total_backlog: u64,
    pub health: HealthBreakdown,
    pub vendors: Vec<PerformanceMetric>,
}

impl PerformanceOverview {
    pub fn from_metrics<'a, I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = &'a PerformanceMetric>,
    {
        let mut vendors: Vec<PerformanceMetric> = metrics.into_iter().cloned().collect();
        vendors.sort_by(|a, b| {
            a.vendor_name
                .cmp(&b.vendor_name)
                .then_with(|| a.vendor_id.cmp(&b.vendor_id))
        });

        let mut health = HealthBreakdown::default();
        for metric in &vendors {
            health.record(metric.status);
        }

        Self {
            avg_outbound_otp: average(&vendors, |metric| metric.outbound_otp),
            avg_inbound_otp: average(&vendors, |metric| metric.inbound_otp),
            avg_processing_time: average(&vendors, |metric| metric.avg_processing_time),
            avg_return_tat: average(&vendors, |metric| metric.return_tat),
            total_backlog: vendors.iter().map(|metric| u64::from(metric.backlog)).sum(),
            health,
            vendors,
        }
    }
}

fn average(
    metrics: &[PerformanceMetric],
    field: impl Fn(&PerformanceMetric) -> f64,
) -> Option<f64> {
    if metrics.is_empty() {
        return None;
    }
    let total: f64 = metrics.iter().map(field).sum();
    Some(round1(total / metrics.len() as f64))
}
