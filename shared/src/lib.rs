//! Shared library for the Book Trip code hook Lambda.
//!
//! Validates hotel and car reservation slots and decides the next dialog
//! action for the bot engine.

pub mod catalog;
pub mod config;
pub mod error;
pub mod lex;
pub mod messages;
pub mod pricing;
pub mod reservation;
pub mod responses;
pub mod router;
pub mod slots;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use lex::{LexEvent, LexResponse};
pub use messages::Locale;
pub use reservation::Reservation;
pub use router::TurnRouter;
pub use slots::{IntentName, InvocationSource};
pub use validation::{Mode, ValidationResult, Validator};
