//! User-facing message tables.
//!
//! One table per supported language. The active table is chosen once from
//! [`Config`](crate::Config) and handed to the router; validators never branch
//! on language themselves.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Language of the deployed bot variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl Locale {
    /// Message table for this locale.
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::English => &ENGLISH,
            Locale::Spanish => &SPANISH,
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_lowercase();
        match normalized.as_str() {
            "en" | "en_us" | "en_gb" => Ok(Locale::English),
            "es" | "es_us" | "es_419" | "es_es" | "es_mx" => Ok(Locale::Spanish),
            _ => Err(Error::Config(format!("Unsupported locale: {}", s))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en_US"),
            Locale::Spanish => write!(f, "es_US"),
        }
    }
}

/// Message templates. Placeholders are written `{name}` and filled by [`fill`].
#[derive(Debug)]
pub struct Messages {
    pub unsupported_city: &'static str,
    pub past_date: &'static str,
    pub invalid_check_in_date: &'static str,
    pub invalid_nights: &'static str,
    pub invalid_room_type: &'static str,
    pub invalid_pick_up_date: &'static str,
    pub invalid_return_date: &'static str,
    pub return_not_after_pick_up: &'static str,
    pub rental_too_long: &'static str,
    pub invalid_driver_age: &'static str,
    pub driver_too_young: &'static str,
    pub invalid_car_type: &'static str,
    pub missing_slot: &'static str,
    pub confirm_hotel: &'static str,
    pub confirm_car: &'static str,
    pub hotel_booked: &'static str,
    pub car_booked: &'static str,
    pub booking_failed: &'static str,
    pub start_over_hotel: &'static str,
    pub start_over_car: &'static str,
    pub reuse_hotel_for_car: &'static str,
}

static ENGLISH: Messages = Messages {
    unsupported_city: "We currently do not support {city} as a valid destination.  Can you try a different city?",
    past_date: "Reservations cannot be scheduled in the past.  Can you try a different date?",
    invalid_check_in_date: "I did not understand your check in date.  When would you like to check in?",
    invalid_nights: "You can make a reservation from one to thirty nights.  How many nights would you like to stay for?",
    invalid_room_type: "I did not recognize that room type.  Would you like to stay in a queen, king, or deluxe room?",
    invalid_pick_up_date: "I did not understand your departure date.  When would you like to pick up your car rental?",
    invalid_return_date: "I did not understand your return date.  When would you like to return your car rental?",
    return_not_after_pick_up: "Your return date must be after your pick up date.  Can you try a different return date?",
    rental_too_long: "You can reserve a car for up to thirty days.  Can you try a different return date?",
    invalid_driver_age: "I did not understand the driver's age.  How old is the driver?",
    driver_too_young: "Your driver must be at least {age} to rent a car.  Can you provide the age of a different driver?",
    invalid_car_type: "I did not recognize that model.  What type of car would you like to rent?  Popular cars are economy, midsize, or luxury",
    missing_slot: "I still need a value for {slot} before I can place your reservation.",
    confirm_hotel: "Okay, I have you down for a {nights} night stay in {location} starting {check_in}, in a {room_type} room, for ${price}.  Shall I book the reservation?",
    confirm_car: "Okay, I have you down for a {car_type} rental in {city} from {pick_up} to {return}, for ${price}.  Shall I book the reservation?",
    hotel_booked: "Thanks, I have placed your reservation for {nights} nights in {location} starting {check_in}.  Please let me know if you would like to book a car rental, or another hotel.",
    car_booked: "Thanks, I have placed your {car_type} car reservation in {city} from {pick_up} to {return}.",
    booking_failed: "I could not place your reservation.  {reason}",
    start_over_hotel: "Okay, let's start over.  What city will you be staying in?",
    start_over_car: "Okay, let's start over.  In what city do you need to rent a car?",
    reuse_hotel_for_car: "Is this car rental for {city}, starting {pick_up} and ending {return}?",
};

static SPANISH: Messages = Messages {
    unsupported_city: "Por ahora no tenemos servicio en {city}.  ¿Puede intentar con otra ciudad?",
    past_date: "Las reservaciones no pueden hacerse en el pasado.  ¿Puede intentar con otra fecha?",
    invalid_check_in_date: "No entendí su fecha de llegada.  ¿Cuándo le gustaría registrarse?",
    invalid_nights: "Puede reservar de una a treinta noches.  ¿Cuántas noches le gustaría quedarse?",
    invalid_room_type: "No reconocí ese tipo de habitación.  ¿Le gustaría una habitación queen, king o deluxe?",
    invalid_pick_up_date: "No entendí su fecha de salida.  ¿Cuándo le gustaría recoger su auto?",
    invalid_return_date: "No entendí su fecha de regreso.  ¿Cuándo le gustaría devolver su auto?",
    return_not_after_pick_up: "La fecha de regreso debe ser posterior a la fecha de recogida.  ¿Puede intentar con otra fecha de regreso?",
    rental_too_long: "Puede reservar un auto hasta por treinta días.  ¿Puede intentar con otra fecha de regreso?",
    invalid_driver_age: "No entendí la edad del conductor.  ¿Qué edad tiene el conductor?",
    driver_too_young: "El conductor debe tener al menos {age} años para rentar un auto.  ¿Puede indicar la edad de otro conductor?",
    invalid_car_type: "No reconocí ese modelo.  ¿Qué tipo de auto le gustaría rentar?  Los más populares son economico, mediano o lujo",
    missing_slot: "Todavía necesito un valor para {slot} antes de hacer su reservación.",
    confirm_hotel: "Muy bien, tengo una estancia de {nights} noches en {location} a partir del {check_in}, en una habitación {room_type}, por ${price}.  ¿Confirmo la reservación?",
    confirm_car: "Muy bien, tengo un auto {car_type} en {city} del {pick_up} al {return}, por ${price}.  ¿Confirmo la reservación?",
    hotel_booked: "Gracias, he realizado su reservación de {nights} noches en {location} a partir del {check_in}.  Indíqueme si desea reservar un auto u otro hotel.",
    car_booked: "Gracias, he realizado su reservación de auto {car_type} en {city} del {pick_up} al {return}.",
    booking_failed: "No pude realizar su reservación.  {reason}",
    start_over_hotel: "Muy bien, empecemos de nuevo.  ¿En qué ciudad se hospedará?",
    start_over_car: "Muy bien, empecemos de nuevo.  ¿En qué ciudad necesita rentar un auto?",
    reuse_hotel_for_car: "Indíqueme si la reservación de auto es para {city}, empezando {pick_up} y terminando {return}",
};

/// Substitute `{name}` placeholders in a template.
pub fn fill<V: AsRef<str>>(template: &str, values: &[(&str, V)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value.as_ref())
        })
}
