//! Slot validation for the BookHotel and BookCar intents.
//!
//! Validation walks the intent's slots in elicitation order and stops at the
//! first violation. Bad input never produces an [`Error`](crate::Error); it
//! produces a [`ValidationResult`] naming the slot to re-elicit.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog;
use crate::lex::Slots;
use crate::messages::{fill, Messages};
use crate::slots::{self, slot_text, IntentName};

/// Longest hotel stay or car rental, in nights or days.
pub const MAX_BOOKING_DAYS: i64 = 30;

/// Date format the engine uses for date slots.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// When in the dialog validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Unset slots are skipped; they have not been asked for yet.
    Dialog,
    /// Every required slot must be present.
    Fulfillment,
}

/// Outcome of validating an intent's slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violated_slot: Option<String>,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violated_slot: None,
            message: None,
        }
    }

    pub fn invalid(slot: &str, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            violated_slot: Some(slot.to_string()),
            message: Some(message.into()),
        }
    }
}

/// Parse an ISO calendar date slot.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parse a whole-number slot.
pub fn parse_count(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Validator Dispatch. Pure: the same inputs always yield the same result.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    messages: &'static Messages,
    today: NaiveDate,
    min_driver_age: u32,
}

impl Validator {
    pub fn new(messages: &'static Messages, today: NaiveDate, min_driver_age: u32) -> Self {
        Self {
            messages,
            today,
            min_driver_age,
        }
    }

    /// Validate the intent's slots, stopping at the first violation.
    pub fn validate(&self, intent: IntentName, slots: &Slots, mode: Mode) -> ValidationResult {
        for spec in intent.slot_order() {
            let result = match slot_text(slots, spec.name) {
                Some(value) => self.check_slot(spec.name, value, slots),
                None if mode == Mode::Fulfillment && spec.required => Err(fill(
                    self.messages.missing_slot,
                    &[("slot", spec.name)],
                )),
                None => Ok(()),
            };

            if let Err(message) = result {
                debug!(intent = %intent, slot = spec.name, ?mode, "Slot failed validation");
                return ValidationResult::invalid(spec.name, message);
            }
        }

        ValidationResult::valid()
    }

    fn check_slot(&self, name: &str, value: &str, collected: &Slots) -> Result<(), String> {
        let m = self.messages;
        match name {
            slots::LOCATION | slots::PICK_UP_CITY | slots::RETURN_CITY => check_city(m, value),
            slots::CHECK_IN_DATE => self.check_future_date(value, m.invalid_check_in_date),
            slots::NIGHTS => check_nights(m, value),
            slots::ROOM_TYPE => match catalog::room_type_index(value) {
                Some(_) => Ok(()),
                None => Err(m.invalid_room_type.to_string()),
            },
            slots::PICK_UP_DATE => self.check_future_date(value, m.invalid_pick_up_date),
            slots::RETURN_DATE => {
                self.check_return_date(value, slot_text(collected, slots::PICK_UP_DATE))
            }
            slots::DRIVER_AGE => self.check_driver_age(value),
            slots::CAR_TYPE => match catalog::car_type_index(value) {
                Some(_) => Ok(()),
                None => Err(m.invalid_car_type.to_string()),
            },
            _ => Ok(()),
        }
    }

    fn check_future_date(&self, value: &str, unparsable: &str) -> Result<(), String> {
        let date = parse_date(value).ok_or_else(|| unparsable.to_string())?;
        if date < self.today {
            return Err(self.messages.past_date.to_string());
        }
        Ok(())
    }

    fn check_return_date(&self, value: &str, pick_up: Option<&str>) -> Result<(), String> {
        let m = self.messages;
        let return_date = parse_date(value).ok_or_else(|| m.invalid_return_date.to_string())?;

        // Ordering is only checkable once the pick up date is usable.
        match pick_up.and_then(parse_date) {
            Some(pick_up) => {
                if return_date <= pick_up {
                    return Err(m.return_not_after_pick_up.to_string());
                }
                if (return_date - pick_up).num_days() > MAX_BOOKING_DAYS {
                    return Err(m.rental_too_long.to_string());
                }
                Ok(())
            }
            None if return_date < self.today => Err(m.past_date.to_string()),
            None => Ok(()),
        }
    }

    fn check_driver_age(&self, value: &str) -> Result<(), String> {
        let m = self.messages;
        let age = parse_count(value).ok_or_else(|| m.invalid_driver_age.to_string())?;
        if age < i64::from(self.min_driver_age) {
            let min_age = self.min_driver_age.to_string();
            return Err(fill(m.driver_too_young, &[("age", &min_age)]));
        }
        Ok(())
    }
}

fn check_city(m: &Messages, value: &str) -> Result<(), String> {
    if catalog::is_known_city(value) {
        Ok(())
    } else {
        Err(fill(m.unsupported_city, &[("city", value)]))
    }
}

fn check_nights(m: &Messages, value: &str) -> Result<(), String> {
    match parse_count(value) {
        Some(nights) if (1..=MAX_BOOKING_DAYS).contains(&nights) => Ok(()),
        _ => Err(m.invalid_nights.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Slot;
    use crate::messages::Locale;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn validator() -> Validator {
        Validator::new(Locale::English.messages(), today(), 18)
    }

    fn slots(values: &[(&str, &str)]) -> Slots {
        values
            .iter()
            .map(|(name, value)| (name.to_string(), Some(Slot::scalar(*value))))
            .collect()
    }

    fn hotel(location: &str, check_in: &str, nights: &str, room_type: &str) -> Slots {
        slots(&[
            ("Location", location),
            ("CheckInDate", check_in),
            ("Nights", nights),
            ("RoomType", room_type),
        ])
    }

    fn car(pick_up: &str, return_date: &str) -> Slots {
        slots(&[
            ("PickUpCity", "Chicago"),
            ("PickUpDate", pick_up),
            ("ReturnDate", return_date),
            ("DriverAge", "30"),
            ("CarType", "midsize"),
        ])
    }

    #[test]
    fn test_valid_hotel() {
        let result = validator().validate(
            IntentName::BookHotel,
            &hotel("Seattle", "2025-06-01", "3", "King"),
            Mode::Fulfillment,
        );
        assert_eq!(result, ValidationResult::valid());
    }

    #[test]
    fn test_check_in_today_is_valid() {
        let result = validator().validate(
            IntentName::BookHotel,
            &hotel("Seattle", "2025-05-01", "1", "queen"),
            Mode::Fulfillment,
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_check_in_in_the_past() {
        let result = validator().validate(
            IntentName::BookHotel,
            &slots(&[("CheckInDate", "2019-01-01")]),
            Mode::Dialog,
        );
        assert!(!result.is_valid);
        assert_eq!(result.violated_slot.as_deref(), Some("CheckInDate"));
        assert_eq!(result.message.as_deref(), Some(Locale::English.messages().past_date));
    }

    #[test]
    fn test_malformed_check_in_date() {
        let result = validator().validate(
            IntentName::BookHotel,
            &slots(&[("CheckInDate", "next tuesday-ish")]),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("CheckInDate"));
        assert_eq!(
            result.message.as_deref(),
            Some(Locale::English.messages().invalid_check_in_date)
        );
    }

    #[test]
    fn test_nights_out_of_range_or_not_numeric() {
        for nights in ["0", "31", "-2", "three", "2.5"] {
            let result = validator().validate(
                IntentName::BookHotel,
                &slots(&[("Nights", nights)]),
                Mode::Dialog,
            );
            assert_eq!(result.violated_slot.as_deref(), Some("Nights"), "nights={}", nights);
        }
    }

    #[test]
    fn test_unknown_room_type() {
        let result = validator().validate(
            IntentName::BookHotel,
            &hotel("Boston", "2025-06-01", "2", "penthouse"),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("RoomType"));
    }

    #[test]
    fn test_unknown_city_mentions_city() {
        let result = validator().validate(
            IntentName::BookHotel,
            &slots(&[("Location", "Gotham")]),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("Location"));
        assert!(result.message.unwrap().contains("Gotham"));
    }

    #[test]
    fn test_first_violation_wins() {
        let result = validator().validate(
            IntentName::BookHotel,
            &hotel("Gotham", "2019-01-01", "99", "penthouse"),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("Location"));
    }

    #[test]
    fn test_dialog_mode_skips_unset_slots() {
        let result = validator().validate(
            IntentName::BookHotel,
            &slots(&[("Location", "Denver")]),
            Mode::Dialog,
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_fulfillment_mode_requires_every_slot() {
        let result = validator().validate(
            IntentName::BookHotel,
            &slots(&[("Location", "Denver"), ("CheckInDate", "2025-06-01")]),
            Mode::Fulfillment,
        );
        assert!(!result.is_valid);
        assert_eq!(result.violated_slot.as_deref(), Some("Nights"));
        assert!(result.message.unwrap().contains("Nights"));
    }

    #[test]
    fn test_return_city_is_optional() {
        let result = validator().validate(
            IntentName::BookCar,
            &car("2025-06-01", "2025-06-05"),
            Mode::Fulfillment,
        );
        assert!(result.is_valid);

        let mut with_return = car("2025-06-01", "2025-06-05");
        with_return.insert("ReturnCity".to_string(), Some(Slot::scalar("Atlantis")));
        let result = validator().validate(IntentName::BookCar, &with_return, Mode::Dialog);
        assert_eq!(result.violated_slot.as_deref(), Some("ReturnCity"));
    }

    #[test]
    fn test_return_before_pick_up() {
        let result = validator().validate(
            IntentName::BookCar,
            &slots(&[("PickUpDate", "2025-06-10"), ("ReturnDate", "2025-06-05")]),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("ReturnDate"));
        assert_eq!(
            result.message.as_deref(),
            Some(Locale::English.messages().return_not_after_pick_up)
        );
    }

    #[test]
    fn test_same_day_return_is_rejected() {
        let result = validator().validate(
            IntentName::BookCar,
            &car("2025-06-10", "2025-06-10"),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("ReturnDate"));
    }

    #[test]
    fn test_rental_longer_than_thirty_days() {
        let result = validator().validate(
            IntentName::BookCar,
            &car("2025-06-01", "2025-07-02"),
            Mode::Dialog,
        );
        assert_eq!(
            result.message.as_deref(),
            Some(Locale::English.messages().rental_too_long)
        );

        let result = validator().validate(
            IntentName::BookCar,
            &car("2025-06-01", "2025-07-01"),
            Mode::Dialog,
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_return_date_without_pick_up() {
        let result = validator().validate(
            IntentName::BookCar,
            &slots(&[("ReturnDate", "2020-01-01")]),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("ReturnDate"));

        let result = validator().validate(
            IntentName::BookCar,
            &slots(&[("ReturnDate", "2025-08-01")]),
            Mode::Dialog,
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_driver_age() {
        let check = |age: &str| {
            validator().validate(IntentName::BookCar, &slots(&[("DriverAge", age)]), Mode::Dialog)
        };
        assert!(check("18").is_valid);
        assert!(check("64").is_valid);

        let young = check("17");
        assert_eq!(young.violated_slot.as_deref(), Some("DriverAge"));
        assert!(young.message.unwrap().contains("at least 18"));

        let garbled = check("old enough");
        assert_eq!(
            garbled.message.as_deref(),
            Some(Locale::English.messages().invalid_driver_age)
        );
    }

    #[test]
    fn test_min_driver_age_is_configurable() {
        let validator = Validator::new(Locale::English.messages(), today(), 21);
        let result = validator.validate(IntentName::BookCar, &slots(&[("DriverAge", "19")]), Mode::Dialog);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_car_type_accepts_spanish_names() {
        let result = validator().validate(
            IntentName::BookCar,
            &slots(&[("CarType", "Lujo")]),
            Mode::Dialog,
        );
        assert!(result.is_valid);

        let result = validator().validate(
            IntentName::BookCar,
            &slots(&[("CarType", "tank")]),
            Mode::Dialog,
        );
        assert_eq!(result.violated_slot.as_deref(), Some("CarType"));
    }

    #[test]
    fn test_spanish_messages() {
        let validator = Validator::new(Locale::Spanish.messages(), today(), 18);
        let result = validator.validate(
            IntentName::BookHotel,
            &slots(&[("Location", "Gotham")]),
            Mode::Dialog,
        );
        assert!(result.message.unwrap().starts_with("Por ahora no tenemos servicio en Gotham"));
    }

    fn city() -> impl Strategy<Value = &'static str> {
        proptest::sample::select(catalog::CITIES)
    }

    proptest! {
        #[test]
        fn prop_valid_hotel_sets_pass(
            city in city(),
            offset in 0i64..365,
            nights in 1u32..=30,
            room in proptest::sample::select(catalog::ROOM_TYPES),
            upper in any::<bool>(),
        ) {
            let check_in = (today() + chrono::Duration::days(offset)).format(DATE_FORMAT).to_string();
            let room = if upper { room.to_uppercase() } else { room.to_string() };
            let slots = hotel(city, &check_in, &nights.to_string(), &room);

            let result = validator().validate(IntentName::BookHotel, &slots, Mode::Fulfillment);
            prop_assert!(result.is_valid);
        }

        #[test]
        fn prop_return_before_pick_up_is_rejected(
            pick_up_offset in 0i64..365,
            gap in 1i64..60,
        ) {
            let pick_up = today() + chrono::Duration::days(pick_up_offset);
            let return_date = pick_up - chrono::Duration::days(gap);
            let slots = car(
                &pick_up.format(DATE_FORMAT).to_string(),
                &return_date.format(DATE_FORMAT).to_string(),
            );

            let result = validator().validate(IntentName::BookCar, &slots, Mode::Dialog);
            prop_assert!(!result.is_valid);
            prop_assert_eq!(result.violated_slot.as_deref(), Some("ReturnDate"));
        }

        #[test]
        fn prop_validation_is_idempotent(
            location in "[A-Za-z ]{0,12}",
            check_in in "[0-9-]{0,10}",
            nights in "[0-9a-z]{0,3}",
            room in "[a-z]{0,7}",
        ) {
            let slots = hotel(&location, &check_in, &nights, &room);
            let first = validator().validate(IntentName::BookHotel, &slots, Mode::Dialog);
            let second = validator().validate(IntentName::BookHotel, &slots, Mode::Dialog);
            prop_assert_eq!(first, second);
        }
    }
}
