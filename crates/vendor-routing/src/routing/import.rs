use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::catalog::CatalogImportError;
use super::domain::{blank_as_none, AllocationRule, VendorId, WeightRange};

/// Loads allocation rules from the operations CSV export.
pub struct RuleImporter;

impl RuleImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AllocationRule>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<AllocationRule>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut rules = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or_default();
            let row: RuleRow = record.deserialize(Some(&headers))?;
            let rule = row
                .into_rule()
                .map_err(|detail| CatalogImportError::InvalidRow { line, detail })?;
            rules.push(rule);
        }

        Ok(rules)
    }
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    partner: String,
    city_id: String,
    group_service: String,
    enabled: String,
    index: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    seller: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    seller_name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "blank_as_none")]
    rule_type: Option<String>,
    vendor_id: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    weight_from: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    weight_to: Option<String>,
}

impl RuleRow {
    fn into_rule(self) -> Result<AllocationRule, String> {
        if self.city_id.is_empty() {
            return Err("city_id is required".to_string());
        }
        if self.vendor_id.is_empty() {
            return Err("vendor_id is required".to_string());
        }

        let enabled = parse_flag(&self.enabled)?;
        let index = self
            .index
            .parse::<i32>()
            .map_err(|_| format!("index '{}' is not an integer", self.index))?;
        let from = parse_kilograms("weight_from", self.weight_from.as_deref())?;
        let to = parse_kilograms("weight_to", self.weight_to.as_deref())?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(format!("weight_from {from} exceeds weight_to {to}"));
            }
        }

        let weight = if from.is_none() && to.is_none() {
            None
        } else {
            Some(WeightRange { from, to })
        };

        Ok(AllocationRule {
            partner: self.partner,
            city_id: self.city_id,
            group_service: self.group_service,
            enabled,
            index,
            seller: self.seller,
            seller_name: self.seller_name,
            rule_type: self.rule_type,
            vendor_id: VendorId(self.vendor_id),
            weight,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(format!("enabled '{other}' is not a boolean")),
    }
}

fn parse_kilograms(column: &str, value: Option<&str>) -> Result<Option<f64>, String> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(kg) if kg.is_finite() && kg >= 0.0 => Ok(Some(kg)),
        _ => Err(format!("{column} '{raw}' is not a non-negative weight")),
    }
}
