use std::collections::BTreeMap;

use crate::{
    models::{
        calculations::{
            CalculatedEmissions, CategoryTotals, EmissionsContext, EntryDetail, FlightSegment,
        },
        trips::{DeliveryEntry, FlightEntry, RideEntry, TripLog},
    },
    services::trip_utils::{duration_minutes, haversine_miles},
};

// Receipt-scoring factors, kg CO2 per mile. Separate from the dashboard
// factor table, which scores monthly form input.
pub const RIDE_FACTOR: f64 = 0.4;
pub const DELIVERY_FACTOR: f64 = 0.4;
pub const FLIGHT_FACTOR: f64 = 0.25;

/// kg CO2 one mature tree sequesters per year
const TREE_SEQUESTRATION_KG: f64 = 22.0;
/// London to New York, used as a comparison flight
const LONDON_NY_MILES: f64 = 3500.0;

fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn ride_detail(ride: &RideEntry) -> EntryDetail {
    let distance = non_negative(ride.distance);
    EntryDetail {
        distance,
        emissions: distance * RIDE_FACTOR,
        time_minutes: Some(ride.time.as_ref().map(duration_minutes).unwrap_or(0)),
        ..Default::default()
    }
}

fn delivery_detail(delivery: &DeliveryEntry) -> EntryDetail {
    if delivery.distance.is_some() {
        let distance = non_negative(delivery.distance);
        return EntryDetail {
            distance,
            emissions: distance * DELIVERY_FACTOR,
            direct_distance: true,
            ..Default::default()
        };
    }

    let error = match (&delivery.restaurant, &delivery.delivery_address) {
        (Some(from), Some(to)) => format!(
            "Address lookup not available for '{}' -> '{}'",
            from, to
        ),
        _ => "No distance or address information provided".to_string(),
    };

    EntryDetail {
        error: Some(error),
        ..Default::default()
    }
}

fn flight_detail(flight: &FlightEntry) -> EntryDetail {
    if flight.distance.is_some() {
        let distance = non_negative(flight.distance);
        return EntryDetail {
            distance,
            emissions: distance * FLIGHT_FACTOR,
            direct_distance: true,
            airport_a: flight.airport_a.clone(),
            airport_b: flight.airport_b.clone(),
            ..Default::default()
        };
    }

    match (flight.from, flight.to) {
        (Some(from), Some(to)) => {
            let distance = haversine_miles(from, to);
            EntryDetail {
                distance,
                emissions: distance * FLIGHT_FACTOR,
                airport_a: flight.airport_a.clone(),
                airport_b: flight.airport_b.clone(),
                ..Default::default()
            }
        }
        _ => {
            let error = match (&flight.airport_a, &flight.airport_b) {
                (Some(a), Some(b)) => format!("No coordinates for airports {} -> {}", a, b),
                _ => "No distance or airport information provided".to_string(),
            };
            EntryDetail {
                airport_a: flight.airport_a.clone(),
                airport_b: flight.airport_b.clone(),
                error: Some(error),
                ..Default::default()
            }
        }
    }
}

fn totals(details: &[EntryDetail]) -> CategoryTotals {
    CategoryTotals {
        distance: details.iter().map(|d| d.distance).sum(),
        emissions: details.iter().map(|d| d.emissions).sum(),
        segments: None,
    }
}

/// Trees needed to absorb a total within one year, to the nearest tree.
/// Exact halves round to even.
pub fn trees_needed(total_emissions: f64) -> u64 {
    let trees = (total_emissions / TREE_SEQUESTRATION_KG).round_ties_even();
    if trees.is_finite() && trees > 0.0 { trees as u64 } else { 0 }
}

/// Total as a percentage of one London-New York flight
pub fn london_ny_percentage(total_emissions: f64) -> f64 {
    total_emissions / (LONDON_NY_MILES * FLIGHT_FACTOR) * 100.0
}

/// Score a trip log into the categorized shape the dashboard consumes.
///
/// Only sources with at least one non-empty entry get a category. Entries
/// that cannot be resolved to a distance contribute 0 and carry an error in
/// their detail.
pub fn aggregate_trips(log: &TripLog) -> CalculatedEmissions {
    let mut categories = BTreeMap::new();
    let mut entry_details = BTreeMap::new();

    let rides: [(&str, &Vec<RideEntry>); 2] = [("uber_rides", &log.uber_rides), ("lyft", &log.lyft)];
    for (source, entries) in rides {
        let details: Vec<EntryDetail> = entries
            .iter()
            .filter(|e| !e.is_empty())
            .map(ride_detail)
            .collect();
        if details.is_empty() {
            continue;
        }
        categories.insert(source.to_string(), totals(&details));
        entry_details.insert(source.to_string(), details);
    }

    let deliveries: [(&str, &Vec<DeliveryEntry>); 2] =
        [("uber_eats", &log.uber_eats), ("doordash", &log.doordash)];
    for (source, entries) in deliveries {
        let details: Vec<EntryDetail> = entries
            .iter()
            .filter(|e| !e.is_empty())
            .map(delivery_detail)
            .collect();
        if details.is_empty() {
            continue;
        }
        categories.insert(source.to_string(), totals(&details));
        entry_details.insert(source.to_string(), details);
    }

    let details: Vec<EntryDetail> = log
        .flights
        .iter()
        .filter(|f| !f.is_empty())
        .map(flight_detail)
        .collect();
    if !details.is_empty() {
        let mut flight_totals = totals(&details);
        flight_totals.segments = Some(
            details
                .iter()
                .map(|d| FlightSegment {
                    distance: d.distance,
                    emissions: d.emissions,
                    airport_a: d.airport_a.clone(),
                    airport_b: d.airport_b.clone(),
                    error: d.error.clone(),
                })
                .collect(),
        );
        categories.insert("flights".to_string(), flight_totals);
        entry_details.insert("flights".to_string(), details);
    }

    let unresolved = entry_details
        .values()
        .flatten()
        .filter(|d: &&EntryDetail| d.error.is_some())
        .count();
    if unresolved > 0 {
        tracing::warn!("{} trip entries could not be resolved to a distance", unresolved);
    }

    let total_emissions: f64 = categories.values().map(|c: &CategoryTotals| c.emissions).sum();

    tracing::debug!(
        "Aggregated {} categories, total {:.2} kg CO2",
        categories.len(),
        total_emissions
    );

    CalculatedEmissions {
        categories,
        context: EmissionsContext {
            london_ny_percentage: london_ny_percentage(total_emissions),
            trees_needed: trees_needed(total_emissions),
        },
        success: true,
        total_emissions,
        entry_details,
    }
}
