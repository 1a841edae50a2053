//! Turn Router: the single entry point from a code hook event to a response.
//!
//! Each call handles one snapshot of one conversation. The engine owns the
//! dialog state machine; this only decides the next instruction.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::lex::{ActiveContext, ConfirmationState, Intent, LexEvent, LexResponse, Slot, TimeToLive};
use crate::messages::{fill, Messages};
use crate::pricing::format_price;
use crate::reservation::{format_date, HotelReservation, Reservation};
use crate::responses::{self, SessionUpdate};
use crate::slots::{self, all_unset, IntentName, InvocationSource};
use crate::validation::{Mode, Validator};
use crate::Result;

/// Name of the context carrying the last valid reservation.
pub const RESERVATION_CONTEXT: &str = "intentContext";

/// Session attribute holding the current quote.
pub const PRICE_ATTRIBUTE: &str = "currentReservationPrice";

/// Session attribute holding the engine's session id.
pub const SESSION_ID_ATTRIBUTE: &str = "sessionId";

/// Turns a suggested car reservation stays available while the user answers.
const SUGGESTION_TURNS_TO_LIVE: u32 = 20;

/// Routes code hook events to validation and response building.
#[derive(Debug, Clone)]
pub struct TurnRouter {
    messages: &'static Messages,
    require_confirmation: bool,
    min_driver_age: u32,
    context_ttl_seconds: u32,
}

/// Event parts a single turn works on.
struct Turn {
    intent_name: IntentName,
    intent: Intent,
    session: SessionUpdate,
    inbound_contexts: Vec<ActiveContext>,
    validator: Validator,
}

impl TurnRouter {
    pub fn new(config: &Config) -> Self {
        Self {
            messages: config.locale.messages(),
            require_confirmation: config.require_confirmation,
            min_driver_age: config.min_driver_age,
            context_ttl_seconds: config.context_ttl_seconds,
        }
    }

    /// Handle one turn. `today` is the current date in the business time zone.
    ///
    /// Fails only when the event itself does not fit this bot.
    pub fn handle(&self, event: LexEvent, today: NaiveDate) -> Result<LexResponse> {
        let source: InvocationSource = event.invocation_source.parse()?;
        let intent_name: IntentName = event.session_state.intent.name.parse()?;

        info!(
            intent = %intent_name,
            ?source,
            session_id = event.session_id.as_deref().unwrap_or_default(),
            "Handling code hook turn"
        );
        debug!(
            transcript = event.input_transcript.as_deref().unwrap_or_default(),
            "User input for turn"
        );

        let mut attributes = event.session_state.session_attributes.unwrap_or_default();
        if let Some(session_id) = event.session_id {
            attributes.insert(SESSION_ID_ATTRIBUTE.to_string(), session_id);
        }

        let turn = Turn {
            intent_name,
            intent: event.session_state.intent,
            session: SessionUpdate {
                attributes,
                active_contexts: Vec::new(),
            },
            inbound_contexts: event.session_state.active_contexts.unwrap_or_default(),
            validator: Validator::new(self.messages, today, self.min_driver_age),
        };

        let response = match source {
            InvocationSource::DialogCodeHook => self.dialog_turn(turn),
            InvocationSource::FulfillmentCodeHook => self.fulfillment_turn(turn),
        };

        debug!(
            action = ?response.session_state.dialog_action.action_type,
            slot_to_elicit = response.session_state.dialog_action.slot_to_elicit.as_deref(),
            "Turn handled"
        );

        Ok(response)
    }

    fn dialog_turn(&self, mut turn: Turn) -> LexResponse {
        let confirmation = turn.intent.confirmation_state;

        if confirmation == ConfirmationState::Denied {
            return self.start_over(turn);
        }

        if turn.intent_name == IntentName::BookCar
            && all_unset(IntentName::BookCar, &turn.intent.slots)
        {
            if let Some(response) = self.suggest_car_from_hotel(&turn) {
                return response;
            }
        }

        let verdict = turn
            .validator
            .validate(turn.intent_name, &turn.intent.slots, Mode::Dialog);

        if !verdict.is_valid {
            if let Some(slot) = verdict.violated_slot {
                turn.intent.slots.insert(slot.clone(), None);
                turn.session.attributes.remove(PRICE_ATTRIBUTE);
                return responses::elicit_slot(turn.intent, &slot, turn.session, verdict.message);
            }
        }

        let Some(reservation) = Reservation::from_slots(turn.intent_name, &turn.intent.slots) else {
            turn.session.attributes.remove(PRICE_ATTRIBUTE);
            return responses::delegate(turn.intent, turn.session);
        };

        self.track_reservation(&mut turn.session, &reservation);

        if confirmation == ConfirmationState::None && self.require_confirmation {
            let summary = self.summary(&reservation);
            return responses::confirm_intent(turn.intent, turn.session, summary);
        }

        responses::delegate(turn.intent, turn.session)
    }

    fn fulfillment_turn(&self, mut turn: Turn) -> LexResponse {
        let verdict = turn
            .validator
            .validate(turn.intent_name, &turn.intent.slots, Mode::Fulfillment);

        let reservation = match Reservation::from_slots(turn.intent_name, &turn.intent.slots) {
            Some(reservation) if verdict.is_valid => reservation,
            _ => {
                let reason = verdict.message.unwrap_or_default();
                turn.session.attributes.remove(PRICE_ATTRIBUTE);
                let message = fill(self.messages.booking_failed, &[("reason", &reason)])
                    .trim_end()
                    .to_string();
                return responses::close(turn.intent, false, turn.session, message);
            }
        };

        self.track_reservation(&mut turn.session, &reservation);

        // Booking itself is not performed; the reservation is only recorded.
        match serde_json::to_string(&reservation) {
            Ok(json) => debug!(reservation = %json, "Placing reservation"),
            Err(e) => debug!(error = %e, "Reservation not serializable for logging"),
        }

        let message = self.booked(&reservation);
        responses::close(turn.intent, true, turn.session, message)
    }

    /// Clear the intent and ask for its first slot again.
    fn start_over(&self, mut turn: Turn) -> LexResponse {
        let first = turn.intent_name.first_slot();
        for slot in turn.intent.slots.values_mut() {
            *slot = None;
        }
        turn.intent.confirmation_state = ConfirmationState::None;
        turn.session.attributes.remove(PRICE_ATTRIBUTE);

        let message = match turn.intent_name {
            IntentName::BookHotel => self.messages.start_over_hotel,
            IntentName::BookCar => self.messages.start_over_car,
        };
        responses::elicit_slot(turn.intent, first, turn.session, Some(message.to_string()))
    }

    /// Offer to rent a car for the stay that was just booked.
    ///
    /// Context attributes come in with the event, so the suggestion is only
    /// made when the slots it would fill pass validation.
    fn suggest_car_from_hotel(&self, turn: &Turn) -> Option<LexResponse> {
        let (mut context, hotel) = hotel_context(&turn.inbound_contexts)?;
        let pick_up = format_date(hotel.check_in_date);
        let return_date = format_date(hotel.check_out_date()?);

        let mut intent = turn.intent.clone();
        let suggested = [
            (slots::PICK_UP_CITY, hotel.location.clone()),
            (slots::PICK_UP_DATE, pick_up.clone()),
            (slots::RETURN_DATE, return_date.clone()),
        ];
        for (name, value) in suggested {
            intent.slots.insert(name.to_string(), Some(Slot::scalar(value)));
        }

        let verdict = turn
            .validator
            .validate(IntentName::BookCar, &intent.slots, Mode::Dialog);
        if !verdict.is_valid {
            debug!(
                slot = verdict.violated_slot.as_deref(),
                "Hotel reservation context not usable for a car rental"
            );
            return None;
        }

        let mut session = turn.session.clone();
        context.time_to_live.turns_to_live = SUGGESTION_TURNS_TO_LIVE;
        session.active_contexts.push(context);

        let message = fill(
            self.messages.reuse_hotel_for_car,
            &[
                ("city", &hotel.location),
                ("pick_up", &pick_up),
                ("return", &return_date),
            ],
        );
        debug!(location = %hotel.location, "Suggesting car rental from hotel reservation");
        Some(responses::confirm_intent(intent, session, message))
    }

    /// Quote the reservation and expose it to later intents.
    fn track_reservation(&self, session: &mut SessionUpdate, reservation: &Reservation) {
        session
            .attributes
            .insert(PRICE_ATTRIBUTE.to_string(), format_price(reservation.price()));
        session.active_contexts.push(ActiveContext {
            name: RESERVATION_CONTEXT.to_string(),
            context_attributes: reservation.context_attributes(),
            time_to_live: TimeToLive {
                time_to_live_in_seconds: self.context_ttl_seconds,
                turns_to_live: 1,
            },
        });
    }

    fn summary(&self, reservation: &Reservation) -> String {
        let price = format_price(reservation.price());
        match reservation {
            Reservation::Hotel(hotel) => fill(
                self.messages.confirm_hotel,
                &[
                    ("nights", &hotel.nights.to_string()),
                    ("location", &hotel.location),
                    ("check_in", &format_date(hotel.check_in_date)),
                    ("room_type", &hotel.room_type),
                    ("price", &price),
                ],
            ),
            Reservation::Car(car) => fill(
                self.messages.confirm_car,
                &[
                    ("car_type", &car.car_type),
                    ("city", &car.pick_up_city),
                    ("pick_up", &format_date(car.pick_up_date)),
                    ("return", &format_date(car.return_date)),
                    ("price", &price),
                ],
            ),
        }
    }

    fn booked(&self, reservation: &Reservation) -> String {
        match reservation {
            Reservation::Hotel(hotel) => fill(
                self.messages.hotel_booked,
                &[
                    ("nights", &hotel.nights.to_string()),
                    ("location", &hotel.location),
                    ("check_in", &format_date(hotel.check_in_date)),
                ],
            ),
            Reservation::Car(car) => fill(
                self.messages.car_booked,
                &[
                    ("car_type", &car.car_type),
                    ("city", &car.pick_up_city),
                    ("pick_up", &format_date(car.pick_up_date)),
                    ("return", &format_date(car.return_date)),
                ],
            ),
        }
    }
}

/// The inbound reservation context, if it holds a hotel stay.
fn hotel_context(contexts: &[ActiveContext]) -> Option<(ActiveContext, HotelReservation)> {
    contexts
        .iter()
        .filter(|context| context.name == RESERVATION_CONTEXT)
        .find_map(|context| {
            Reservation::hotel_from_context(&context.context_attributes)
                .map(|hotel| (context.clone(), hotel))
        })
}
