use crate::models::emissions::ImpactMetrics;

/// kg CO2 absorbed by one tree over an absorption cycle
const TREE_ABSORPTION_KG: f64 = 21.0;
/// Liters of water per kg CO2, midpoint of the 36-46 L range
const WATER_LITERS_PER_KG: f64 = (36.0 + 46.0) / 2.0;
/// kg CO2 per mile for an average passenger car
const CAR_KG_PER_MILE: f64 = 0.404;
/// Offset price in USD per metric ton
const OFFSET_USD_PER_TONNE: f64 = 12.0;

fn to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

impl ImpactMetrics {
    /// Derive the four equivalents from a total in kg CO2.
    /// Negative or non-finite totals are treated as 0.
    pub fn from_total(total_kg: f64) -> Self {
        let total = if total_kg.is_finite() { total_kg.max(0.0) } else { 0.0 };

        Self {
            trees_needed: to_count((total / TREE_ABSORPTION_KG).ceil()),
            water_footprint_liters: to_count((total * WATER_LITERS_PER_KG).round()),
            driving_equivalent_miles: to_count((total / CAR_KG_PER_MILE).round()),
            offset_cost_usd: to_count((total / 1000.0 * OFFSET_USD_PER_TONNE).round()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_total() {
        let metrics = ImpactMetrics::from_total(0.0);
        assert_eq!(
            metrics,
            ImpactMetrics {
                trees_needed: 0,
                water_footprint_liters: 0,
                driving_equivalent_miles: 0,
                offset_cost_usd: 0,
            }
        );
    }

    #[test]
    fn test_twenty_kg() {
        let metrics = ImpactMetrics::from_total(20.0);
        assert_eq!(metrics.trees_needed, 1);
        assert_eq!(metrics.water_footprint_liters, 820);
        assert_eq!(metrics.driving_equivalent_miles, 50); // 49.50 -> 50
        assert_eq!(metrics.offset_cost_usd, 0); // 0.24 -> 0
    }

    #[test]
    fn test_trees_round_up() {
        assert_eq!(ImpactMetrics::from_total(21.0).trees_needed, 1);
        assert_eq!(ImpactMetrics::from_total(21.01).trees_needed, 2);
        assert_eq!(ImpactMetrics::from_total(0.01).trees_needed, 1);
    }

    #[test]
    fn test_offset_cost_one_tonne() {
        assert_eq!(ImpactMetrics::from_total(1000.0).offset_cost_usd, 12);
        assert_eq!(ImpactMetrics::from_total(2500.0).offset_cost_usd, 30);
    }

    #[test]
    fn test_negative_total_clamped() {
        assert_eq!(ImpactMetrics::from_total(-50.0), ImpactMetrics::from_total(0.0));
        assert_eq!(ImpactMetrics::from_total(f64::NAN), ImpactMetrics::from_total(0.0));
    }

    #[test]
    fn test_monotonic_in_total() {
        let mut previous = ImpactMetrics::from_total(0.0);
        for step in 1..=2000 {
            let current = ImpactMetrics::from_total(step as f64 * 0.75);
            assert!(current.trees_needed >= previous.trees_needed);
            assert!(current.water_footprint_liters >= previous.water_footprint_liters);
            assert!(current.driving_equivalent_miles >= previous.driving_equivalent_miles);
            assert!(current.offset_cost_usd >= previous.offset_cost_usd);
            previous = current;
        }
    }
}
