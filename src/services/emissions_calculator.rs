use crate::{
    models::{
        emissions::{EmissionSource, EmissionsResult, MonthlyEmission},
        usage::UsageRecord,
    },
    services::emission_factors::EmissionCategory,
};

pub const NO_EMISSIONS_LABEL: &str = "No Emissions";
const NO_EMISSIONS_COLOR: &str = "#d1d5db";

/// Static trend series shown next to the breakdown.
/// Not derived from the usage record.
const REFERENCE_SERIES: [(&str, f64); 6] = [
    ("Jun", 200.0 * 0.85),
    ("Jul", 200.0 * 0.92),
    ("Aug", 200.0 * 0.78),
    ("Sep", 200.0 * 0.95),
    ("Oct", 200.0 * 0.88),
    ("Nov", 100.0),
];

pub fn reference_history() -> Vec<MonthlyEmission> {
    REFERENCE_SERIES
        .iter()
        .map(|(month, value)| MonthlyEmission {
            month: month.to_string(),
            value: *value,
        })
        .collect()
}

/// Convert a usage record into a categorized breakdown.
///
/// Sources keep the fixed category order and zero contributions are dropped.
/// When nothing remains a single "No Emissions" placeholder is returned.
/// The total is summed over the retained sources only.
///
/// Inputs are expected to be validated (non-negative) by the caller.
pub fn calculate_emissions(usage: &UsageRecord) -> EmissionsResult {
    let mut sources: Vec<EmissionSource> = EmissionCategory::ALL
        .iter()
        .map(|category| EmissionSource {
            name: category.label().to_string(),
            value: usage.amount(*category) * category.factor(),
            color: category.color().to_string(),
        })
        .filter(|source| source.value > 0.0)
        .collect();

    if sources.is_empty() {
        sources.push(EmissionSource {
            name: NO_EMISSIONS_LABEL.to_string(),
            value: 0.0,
            color: NO_EMISSIONS_COLOR.to_string(),
        });
    }

    let total: f64 = sources.iter().map(|s| s.value).sum();

    tracing::debug!(
        "Calculated {:.2} kg CO2 across {} sources",
        total,
        sources.len()
    );

    EmissionsResult {
        sources,
        total,
        historical: reference_history(),
    }
}
