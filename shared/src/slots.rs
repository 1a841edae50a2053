//! Intents, invocation sources and slot elicitation order.

use std::fmt;
use std::str::FromStr;

use crate::lex::Slots;
use crate::Error;

pub const LOCATION: &str = "Location";
pub const CHECK_IN_DATE: &str = "CheckInDate";
pub const NIGHTS: &str = "Nights";
pub const ROOM_TYPE: &str = "RoomType";

pub const PICK_UP_CITY: &str = "PickUpCity";
pub const RETURN_CITY: &str = "ReturnCity";
pub const PICK_UP_DATE: &str = "PickUpDate";
pub const RETURN_DATE: &str = "ReturnDate";
pub const DRIVER_AGE: &str = "DriverAge";
pub const CAR_TYPE: &str = "CarType";

/// A slot in elicitation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub required: bool,
}

const fn required(name: &'static str) -> SlotSpec {
    SlotSpec {
        name,
        required: true,
    }
}

const fn optional(name: &'static str) -> SlotSpec {
    SlotSpec {
        name,
        required: false,
    }
}

const BOOK_HOTEL_ORDER: &[SlotSpec] = &[
    required(LOCATION),
    required(CHECK_IN_DATE),
    required(NIGHTS),
    required(ROOM_TYPE),
];

const BOOK_CAR_ORDER: &[SlotSpec] = &[
    required(PICK_UP_CITY),
    optional(RETURN_CITY),
    required(PICK_UP_DATE),
    required(RETURN_DATE),
    required(DRIVER_AGE),
    required(CAR_TYPE),
];

/// Intents served by this hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentName {
    BookHotel,
    BookCar,
}

impl IntentName {
    pub fn as_str(self) -> &'static str {
        match self {
            IntentName::BookHotel => "BookHotel",
            IntentName::BookCar => "BookCar",
        }
    }

    /// Slots in the order they are validated and elicited.
    pub fn slot_order(self) -> &'static [SlotSpec] {
        match self {
            IntentName::BookHotel => BOOK_HOTEL_ORDER,
            IntentName::BookCar => BOOK_CAR_ORDER,
        }
    }

    /// First slot the bot asks for.
    pub fn first_slot(self) -> &'static str {
        self.slot_order()[0].name
    }

    /// Label stored as `ReservationType` in the reservation context.
    pub fn reservation_type(self) -> &'static str {
        match self {
            IntentName::BookHotel => "Hotel",
            IntentName::BookCar => "Car",
        }
    }
}

impl FromStr for IntentName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BookHotel" => Ok(IntentName::BookHotel),
            "BookCar" => Ok(IntentName::BookCar),
            "" => Err(Error::MissingField("sessionState.intent.name")),
            other => Err(Error::UnknownIntent(other.to_string())),
        }
    }
}

impl fmt::Display for IntentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point in the dialog at which the engine called us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationSource {
    DialogCodeHook,
    FulfillmentCodeHook,
}

impl FromStr for InvocationSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DialogCodeHook" => Ok(InvocationSource::DialogCodeHook),
            "FulfillmentCodeHook" => Ok(InvocationSource::FulfillmentCodeHook),
            "" => Err(Error::MissingField("invocationSource")),
            other => Err(Error::UnsupportedInvocationSource(other.to_string())),
        }
    }
}

/// Value of `name`, if the slot is present and non-blank.
pub fn slot_text<'a>(slots: &'a Slots, name: &str) -> Option<&'a str> {
    slots.get(name).and_then(Option::as_ref).and_then(|s| s.text())
}

/// Whether no slot of the intent carries a value yet.
pub fn all_unset(intent: IntentName, slots: &Slots) -> bool {
    intent
        .slot_order()
        .iter()
        .all(|spec| slot_text(slots, spec.name).is_none())
}
