//! Wire model for the bot engine's code hook events and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Slot values keyed by slot name. `None` means the engine sent `null`.
pub type Slots = BTreeMap<String, Option<Slot>>;

/// Opaque string attributes carried by the engine across turns.
pub type SessionAttributes = BTreeMap<String, String>;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inbound code hook event, one per dialog turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexEvent {
    #[serde(default)]
    pub session_id: Option<String>,
    pub invocation_source: String,
    #[serde(default)]
    pub input_transcript: Option<String>,
    pub session_state: SessionState,
}

/// Session snapshot sent with the event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub intent: Intent,
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
    #[serde(default)]
    pub active_contexts: Option<Vec<ActiveContext>>,
}

/// Intent as seen by the engine. Echoed back, possibly updated, in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: Slots,
    #[serde(default)]
    pub confirmation_state: ConfirmationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IntentState>,
}

/// Whether the user has confirmed the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfirmationState {
    #[default]
    None,
    Confirmed,
    Denied,
}

/// Fulfillment state of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentState {
    Failed,
    Fulfilled,
    FulfillmentInProgress,
    InProgress,
    ReadyForFulfillment,
    Waiting,
}

/// A single slot entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default)]
    pub value: Option<SlotValue>,
}

impl Slot {
    /// Scalar slot resolved to exactly `value`.
    pub fn scalar(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            shape: Some("Scalar".to_string()),
            value: Some(SlotValue {
                original_value: Some(value.clone()),
                interpreted_value: Some(value.clone()),
                resolved_values: vec![value],
            }),
        }
    }

    /// The value validators should look at, if any.
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(SlotValue::effective)
    }
}

/// Collected value of a slot.
///
/// Accepts either the engine's nested object or a bare string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SlotValueRepr")]
pub struct SlotValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreted_value: Option<String>,
    pub resolved_values: Vec<String>,
}

impl SlotValue {
    /// Interpreted value, falling back to what the user said. Blank counts as unset.
    pub fn effective(&self) -> Option<&str> {
        self.interpreted_value
            .as_deref()
            .or(self.original_value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotValueRepr {
    Text(String),
    #[serde(rename_all = "camelCase")]
    Full {
        #[serde(default)]
        original_value: Option<String>,
        #[serde(default)]
        interpreted_value: Option<String>,
        #[serde(default)]
        resolved_values: Vec<String>,
    },
}

impl From<SlotValueRepr> for SlotValue {
    fn from(repr: SlotValueRepr) -> Self {
        match repr {
            SlotValueRepr::Text(text) => Self {
                original_value: Some(text.clone()),
                interpreted_value: Some(text),
                resolved_values: Vec::new(),
            },
            SlotValueRepr::Full {
                original_value,
                interpreted_value,
                resolved_values,
            } => Self {
                original_value,
                interpreted_value,
                resolved_values,
            },
        }
    }
}

/// Context the engine keeps alive between intents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveContext {
    pub name: String,
    #[serde(default)]
    pub context_attributes: BTreeMap<String, String>,
    pub time_to_live: TimeToLive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeToLive {
    pub time_to_live_in_seconds: u32,
    pub turns_to_live: u32,
}

/// Outbound code hook response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LexResponse {
    pub session_state: ResponseSessionState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSessionState {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_contexts: Vec<ActiveContext>,
    pub session_attributes: SessionAttributes,
    pub dialog_action: DialogAction,
    pub intent: Intent,
}

/// Next step the engine should take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogAction {
    #[serde(rename = "type")]
    pub action_type: DialogActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_to_elicit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogActionType {
    ElicitSlot,
    ConfirmIntent,
    Delegate,
    Close,
}

/// Message shown or spoken to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: String,
    pub content: String,
}

impl Message {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: "PlainText".to_string(),
            content: content.into(),
        }
    }
}
