//! Deterministic quote generation.
//!
//! Prices are fixed for a given location and room or car type so repeated
//! turns of the same conversation quote the same amount.

/// Per-location cost derived from the location's letters.
pub fn location_cost(location: &str) -> i64 {
    location
        .to_lowercase()
        .chars()
        .map(|c| c as i64 - 'a' as i64)
        .sum()
}

/// Price of a hotel stay.
pub fn hotel_price(location: &str, nights: u32, room_index: usize) -> f64 {
    let nightly = 100 + location_cost(location) + (100 + room_index as i64);
    f64::from(nights) * nightly as f64
}

/// Price of a car rental. Drivers under 25 pay a surcharge on the car class.
pub fn car_price(location: &str, days: i64, driver_age: i64, car_index: usize) -> f64 {
    let age_multiplier = if driver_age < 25 { 1.10 } else { 1.0 };
    let base = (100 + location_cost(location)) as f64;
    let class = (car_index as f64 * 50.0) * age_multiplier;
    days as f64 * (base + class)
}

/// Render a price the way it is stored in session attributes.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}
