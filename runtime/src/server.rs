//! HTTP front for the skill.
//!
//! The platform side posts one [`TurnEvent`] per turn to `/turn` and gets a
//! [`TurnReply`] back. Turn failures are already folded into an apology by
//! the manager, so a well-formed event always gets a 200.

use axum::{extract::State, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use skill::{ContextManager, Intent, SkillRequest, SkillResponse};
use std::collections::HashMap;
use std::sync::Arc;

/// Intent name reported for request types outside [`RequestEnvelope`].
pub const UNKNOWN_REQUEST: &str = "UnknownRequest";

#[derive(Debug, Deserialize)]
pub struct TurnEvent {
    pub user_id: String,
    pub request: RequestEnvelope,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum RequestEnvelope {
    LaunchRequest,
    IntentRequest {
        intent: IntentEnvelope,
    },
    SessionEndedRequest {
        #[serde(default)]
        reason: Option<String>,
    },
    /// Any request type the skill does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct IntentEnvelope {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, String>,
}

impl From<RequestEnvelope> for SkillRequest {
    fn from(envelope: RequestEnvelope) -> Self {
        match envelope {
            RequestEnvelope::LaunchRequest => SkillRequest::Launch,
            RequestEnvelope::IntentRequest { intent } => {
                SkillRequest::Intent(Intent::from_platform(&intent.name, &intent.slots))
            }
            RequestEnvelope::SessionEndedRequest { reason } => SkillRequest::SessionEnded { reason },
            RequestEnvelope::Unknown => {
                SkillRequest::Intent(Intent::Unhandled(UNKNOWN_REQUEST.to_string()))
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnReply {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub should_end_session: bool,
}

impl From<SkillResponse> for TurnReply {
    fn from(response: SkillResponse) -> Self {
        Self {
            speech: response.speech,
            reprompt: response.reprompt,
            should_end_session: response.end_session,
        }
    }
}

pub fn router(manager: Arc<ContextManager>) -> Router {
    Router::new()
        .route("/turn", post(turn))
        .route("/health", get(health))
        .with_state(manager)
}

async fn turn(
    State(manager): State<Arc<ContextManager>>,
    Json(event): Json<TurnEvent>,
) -> Json<TurnReply> {
    let response = manager.handle(&event.user_id, event.request.into()).await;
    Json(response.into())
}

async fn health() -> &'static str {
    "ok"
}
