use serde::{Deserialize, Serialize};

/// Activity category tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    Flight,
    Car,
    FoodDelivery,
    RideShare,
    Electricity,
}

impl EmissionCategory {
    /// Fixed breakdown order: Air Travel, Car Travel, Food Delivery, Ride Share, Electricity
    pub const ALL: [EmissionCategory; 5] = [
        EmissionCategory::Flight,
        EmissionCategory::Car,
        EmissionCategory::FoodDelivery,
        EmissionCategory::RideShare,
        EmissionCategory::Electricity,
    ];

    /// kg CO2 per unit of activity
    pub fn factor(&self) -> f64 {
        match self {
            EmissionCategory::Flight => 0.2,       // per mile
            EmissionCategory::Car => 0.4,          // per mile
            EmissionCategory::FoodDelivery => 3.5, // per delivery
            EmissionCategory::RideShare => 0.45,   // per mile
            EmissionCategory::Electricity => 0.5,  // per kWh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmissionCategory::Flight => "Air Travel",
            EmissionCategory::Car => "Car Travel",
            EmissionCategory::FoodDelivery => "Food Delivery",
            EmissionCategory::RideShare => "Ride Share",
            EmissionCategory::Electricity => "Electricity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            EmissionCategory::Flight | EmissionCategory::Car | EmissionCategory::RideShare => "mile",
            EmissionCategory::FoodDelivery => "delivery",
            EmissionCategory::Electricity => "kWh",
        }
    }

    /// Chart color, display only
    pub fn color(&self) -> &'static str {
        match self {
            EmissionCategory::Flight => "#047857",
            EmissionCategory::Car => "#059669",
            EmissionCategory::FoodDelivery => "#10b981",
            EmissionCategory::RideShare => "#34d399",
            EmissionCategory::Electricity => "#6ee7b7",
        }
    }
}

/// One row of the published factor table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub category: EmissionCategory,
    pub label: String,
    pub unit: String,
    pub kg_co2_per_unit: f64,
    pub color: String,
}

/// Factor table in breakdown order
pub fn emission_factor_table() -> Vec<EmissionFactor> {
    EmissionCategory::ALL
        .iter()
        .map(|category| EmissionFactor {
            category: *category,
            label: category.label().to_string(),
            unit: category.unit().to_string(),
            kg_co2_per_unit: category.factor(),
            color: category.color().to_string(),
        })
        .collect()
}
