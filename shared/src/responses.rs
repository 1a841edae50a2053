//! Builders for the four dialog actions returned to the bot engine.

use crate::lex::{
    ActiveContext, DialogAction, DialogActionType, Intent, IntentState, LexResponse, Message,
    ResponseSessionState, SessionAttributes,
};

/// Session state written back alongside the dialog action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    pub attributes: SessionAttributes,
    pub active_contexts: Vec<ActiveContext>,
}

fn respond(
    mut intent: Intent,
    state: IntentState,
    action: DialogAction,
    session: SessionUpdate,
    message: Option<String>,
) -> LexResponse {
    intent.state = Some(state);
    LexResponse {
        session_state: ResponseSessionState {
            active_contexts: session.active_contexts,
            session_attributes: session.attributes,
            dialog_action: action,
            intent,
        },
        messages: message.into_iter().map(Message::plain_text).collect(),
    }
}

/// Re-ask for `slot_to_elicit`, optionally explaining why.
pub fn elicit_slot(
    intent: Intent,
    slot_to_elicit: &str,
    session: SessionUpdate,
    message: Option<String>,
) -> LexResponse {
    let action = DialogAction {
        action_type: DialogActionType::ElicitSlot,
        slot_to_elicit: Some(slot_to_elicit.to_string()),
    };
    respond(intent, IntentState::InProgress, action, session, message)
}

/// Ask the user to confirm the intent as it stands.
pub fn confirm_intent(intent: Intent, session: SessionUpdate, message: String) -> LexResponse {
    let action = DialogAction {
        action_type: DialogActionType::ConfirmIntent,
        slot_to_elicit: None,
    };
    respond(intent, IntentState::InProgress, action, session, Some(message))
}

/// Let the engine pick the next step from its own slot configuration.
pub fn delegate(intent: Intent, session: SessionUpdate) -> LexResponse {
    let state = intent.state.unwrap_or(IntentState::InProgress);
    let action = DialogAction {
        action_type: DialogActionType::Delegate,
        slot_to_elicit: None,
    };
    respond(intent, state, action, session, None)
}

/// End the intent, fulfilled or failed, with a final message.
pub fn close(intent: Intent, fulfilled: bool, session: SessionUpdate, message: String) -> LexResponse {
    let state = if fulfilled {
        IntentState::Fulfilled
    } else {
        IntentState::Failed
    };
    let action = DialogAction {
        action_type: DialogActionType::Close,
        slot_to_elicit: None,
    };
    respond(intent, state, action, session, Some(message))
}
