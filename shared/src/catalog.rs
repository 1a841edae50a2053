//! Fixed allow-lists for cities, room types and car types.

/// Cities where hotels and cars can be booked, lowercase.
pub const CITIES: &[&str] = &[
    "nueva york",
    "new york",
    "los angeles",
    "chicago",
    "houston",
    "philadelphia",
    "phoenix",
    "san antonio",
    "san diego",
    "dallas",
    "san jose",
    "austin",
    "jacksonville",
    "san francisco",
    "indianapolis",
    "columbus",
    "fort worth",
    "charlotte",
    "detroit",
    "el paso",
    "seattle",
    "denver",
    "washington dc",
    "memphis",
    "boston",
    "nashville",
    "baltimore",
    "portland",
];

/// Room types in price order.
pub const ROOM_TYPES: &[&str] = &["queen", "king", "deluxe"];

/// Car types in price order.
pub const CAR_TYPES: &[&str] = &[
    "economy",
    "standard",
    "midsize",
    "full size",
    "minivan",
    "luxury",
];

/// Spanish names accepted for car types, mapped to their English counterpart.
const CAR_TYPE_ALIASES: &[(&str, &str)] = &[
    ("economico", "economy"),
    ("mediano", "midsize"),
    ("lujo", "luxury"),
];

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn is_known_city(city: &str) -> bool {
    CITIES.contains(&normalize(city).as_str())
}

/// Position of a room type in [`ROOM_TYPES`].
pub fn room_type_index(room_type: &str) -> Option<usize> {
    let room_type = normalize(room_type);
    ROOM_TYPES.iter().position(|r| *r == room_type)
}

/// Position of a car type in [`CAR_TYPES`], resolving Spanish aliases.
pub fn car_type_index(car_type: &str) -> Option<usize> {
    let car_type = normalize(car_type);
    let canonical = CAR_TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == car_type)
        .map(|(_, english)| *english)
        .unwrap_or(car_type.as_str());
    CAR_TYPES.iter().position(|c| *c == canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_city_is_case_insensitive() {
        assert!(is_known_city("Seattle"));
        assert!(is_known_city("  SAN FRANCISCO "));
        assert!(is_known_city("Nueva York"));
        assert!(!is_known_city("Gotham"));
        assert!(!is_known_city(""));
    }

    #[test]
    fn test_room_type_index() {
        assert_eq!(room_type_index("Queen"), Some(0));
        assert_eq!(room_type_index("deluxe"), Some(2));
        assert_eq!(room_type_index("suite"), None);
    }

    #[test]
    fn test_car_type_aliases() {
        assert_eq!(car_type_index("Economy"), Some(0));
        assert_eq!(car_type_index("economico"), Some(0));
        assert_eq!(car_type_index("Mediano"), Some(2));
        assert_eq!(car_type_index("lujo"), Some(5));
        assert_eq!(car_type_index("full size"), Some(3));
        assert_eq!(car_type_index("spaceship"), None);
    }
}
