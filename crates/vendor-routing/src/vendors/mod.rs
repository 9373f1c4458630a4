//! Warehouse vendor configuration table.

use serde::{Deserialize, Serialize};

use crate::routing::VendorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatus {
    Enabled,
    Disabled,
}

impl VendorStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VendorStatus::Enabled => "ENABLED",
            VendorStatus::Disabled => "DISABLED",
        }
    }
}

/// Configured warehouse vendor with its transit partners and warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    /// Routing tag; matches the `vendor_id` used by allocation rules.
    pub tag: VendorId,
    #[serde(default)]
    pub transit_vendors: Vec<String>,
    #[serde(default)]
    pub warehouse_ids: Vec<String>,
    pub status: VendorStatus,
}

impl Vendor {
    pub fn is_enabled(&self) -> bool {
        self.status == VendorStatus::Enabled
    }
}

/// Headline counts and rows for the vendor configuration view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOverview {
    pub active_vendors: usize,
    pub total_vendors: usize,
    pub transit_connections: usize,
    pub vendors: Vec<Vendor>,
}

impl VendorOverview {
    pub fn from_vendors(vendors: Vec<Vendor>) -> Self {
        let active_vendors = vendors.iter().filter(|vendor| vendor.is_enabled()).count();
        let transit_connections = vendors
            .iter()
            .map(|vendor| vendor.transit_vendors.len())
            .sum();

        Self {
            active_vendors,
            total_vendors: vendors.len(),
            transit_connections,
            vendors,
        }
    }
}
