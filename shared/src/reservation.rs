//! Fully collected reservations, built once every required slot validates.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::catalog;
use crate::lex::Slots;
use crate::pricing;
use crate::slots::{self, slot_text, IntentName};
use crate::validation::{parse_count, parse_date, DATE_FORMAT, MAX_BOOKING_DAYS};

/// Key under which the reservation kind is stored in context attributes.
pub const RESERVATION_TYPE: &str = "ReservationType";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotelReservation {
    pub location: String,
    pub check_in_date: NaiveDate,
    pub nights: u32,
    pub room_type: String,
}

impl HotelReservation {
    /// `None` when the stay runs past the last representable date.
    pub fn check_out_date(&self) -> Option<NaiveDate> {
        self.check_in_date
            .checked_add_signed(Duration::days(i64::from(self.nights)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarReservation {
    pub pick_up_city: String,
    pub return_city: String,
    pub pick_up_date: NaiveDate,
    pub return_date: NaiveDate,
    pub driver_age: i64,
    pub car_type: String,
}

impl CarReservation {
    pub fn days(&self) -> i64 {
        (self.return_date - self.pick_up_date).num_days()
    }
}

/// A reservation ready to be quoted, confirmed or fulfilled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "ReservationType")]
pub enum Reservation {
    Hotel(HotelReservation),
    Car(CarReservation),
}

impl Reservation {
    /// Build from slots that have already passed validation.
    ///
    /// Returns `None` while any required slot is still missing or unparsable.
    pub fn from_slots(intent: IntentName, slots: &Slots) -> Option<Self> {
        match intent {
            IntentName::BookHotel => {
                let nights = parse_count(slot_text(slots, slots::NIGHTS)?)?;
                Some(Reservation::Hotel(HotelReservation {
                    location: slot_text(slots, slots::LOCATION)?.to_string(),
                    check_in_date: parse_date(slot_text(slots, slots::CHECK_IN_DATE)?)?,
                    nights: u32::try_from(nights).ok()?,
                    room_type: slot_text(slots, slots::ROOM_TYPE)?.to_string(),
                }))
            }
            IntentName::BookCar => {
                let pick_up_city = slot_text(slots, slots::PICK_UP_CITY)?.to_string();
                let return_city = slot_text(slots, slots::RETURN_CITY)
                    .map(str::to_string)
                    .unwrap_or_else(|| pick_up_city.clone());
                Some(Reservation::Car(CarReservation {
                    pick_up_city,
                    return_city,
                    pick_up_date: parse_date(slot_text(slots, slots::PICK_UP_DATE)?)?,
                    return_date: parse_date(slot_text(slots, slots::RETURN_DATE)?)?,
                    driver_age: parse_count(slot_text(slots, slots::DRIVER_AGE)?)?,
                    car_type: slot_text(slots, slots::CAR_TYPE)?.to_string(),
                }))
            }
        }
    }

    /// Rebuild a hotel reservation carried in a context's attributes.
    ///
    /// Context attributes arrive with the event, so a stay outside the
    /// bookable range is treated as absent.
    pub fn hotel_from_context(attributes: &BTreeMap<String, String>) -> Option<HotelReservation> {
        if attributes.get(RESERVATION_TYPE).map(String::as_str) != Some("Hotel") {
            return None;
        }
        let nights = parse_count(attributes.get(slots::NIGHTS)?)?;
        if !(1..=MAX_BOOKING_DAYS).contains(&nights) {
            return None;
        }
        Some(HotelReservation {
            location: attributes.get(slots::LOCATION)?.clone(),
            check_in_date: parse_date(attributes.get(slots::CHECK_IN_DATE)?)?,
            nights: u32::try_from(nights).ok()?,
            room_type: attributes.get(slots::ROOM_TYPE).cloned().unwrap_or_default(),
        })
    }

    pub fn intent(&self) -> IntentName {
        match self {
            Reservation::Hotel(_) => IntentName::BookHotel,
            Reservation::Car(_) => IntentName::BookCar,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            Reservation::Hotel(hotel) => pricing::hotel_price(
                &hotel.location,
                hotel.nights,
                catalog::room_type_index(&hotel.room_type).unwrap_or(0),
            ),
            Reservation::Car(car) => pricing::car_price(
                &car.pick_up_city,
                car.days(),
                car.driver_age,
                catalog::car_type_index(&car.car_type).unwrap_or(0),
            ),
        }
    }

    /// Attributes stored on the reservation context for later intents.
    pub fn context_attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            RESERVATION_TYPE.to_string(),
            self.intent().reservation_type().to_string(),
        );
        let mut put = |name: &str, value: String| {
            attributes.insert(name.to_string(), value);
        };
        match self {
            Reservation::Hotel(hotel) => {
                put(slots::LOCATION, hotel.location.clone());
                put(slots::CHECK_IN_DATE, format_date(hotel.check_in_date));
                put(slots::NIGHTS, hotel.nights.to_string());
                put(slots::ROOM_TYPE, hotel.room_type.clone());
            }
            Reservation::Car(car) => {
                put(slots::PICK_UP_CITY, car.pick_up_city.clone());
                put(slots::RETURN_CITY, car.return_city.clone());
                put(slots::PICK_UP_DATE, format_date(car.pick_up_date));
                put(slots::RETURN_DATE, format_date(car.return_date));
                put(slots::DRIVER_AGE, car.driver_age.to_string());
                put(slots::CAR_TYPE, car.car_type.clone());
            }
        }
        attributes
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
