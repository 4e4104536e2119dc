use lazy_static::lazy_static;
use regex::Regex;

use crate::models::trips::{Coordinates, TripDuration};

/// Mean earth radius in miles
const EARTH_RADIUS_MILES: f64 = 3956.0;

lazy_static! {
    static ref HOURS_RE: Regex = Regex::new(r"(\d+)\s*(?:hours?|hrs?)\b").unwrap();
    static ref MINUTES_RE: Regex = Regex::new(r"(\d+)\s*(?:minutes?|mins?)\b").unwrap();
}

/// Great-circle distance between two points, in miles
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Parse "56 minutes", "1 hour 5 minutes" or "2 hrs" into whole minutes.
/// Unrecognized text yields 0. Huge values saturate at `u32::MAX`.
pub fn parse_duration_minutes(text: &str) -> u32 {
    let text = text.to_lowercase();

    let capture = |re: &Regex| -> u32 {
        re.captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };

    capture(&HOURS_RE)
        .saturating_mul(60)
        .saturating_add(capture(&MINUTES_RE))
}

/// Minutes for either duration representation
pub fn duration_minutes(duration: &TripDuration) -> u32 {
    match duration {
        TripDuration::Minutes(m) if m.is_finite() && *m > 0.0 => *m as u32,
        TripDuration::Minutes(_) => 0,
        TripDuration::Text(text) => parse_duration_minutes(text),
    }
}
