//! Inbound transport webhook handler.

use axum::Json;
use axum::extract::State;
use tracing::{debug, warn};

use argus_transport::ConnectionEvent;

use crate::dto::response::EventAck;
use crate::state::AppState;

/// POST /api/events
///
/// The transport redelivers any event it could not hand off, so every
/// outcome here answers HTTP 200 — a malformed body or an unknown user
/// must not start a retry storm. Failures ride in the body instead.
pub async fn receive_event(State(state): State<AppState>, body: String) -> Json<EventAck> {
    let event: ConnectionEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Discarding malformed connection event");
            return Json(EventAck::error(format!("Malformed event payload: {e}")));
        }
    };

    debug!(
        identity = %event.user_id,
        connection_id = event.connection_id.as_deref().unwrap_or("-"),
        hub = event.hub.as_deref().unwrap_or("-"),
        "Connection event received"
    );

    let normalized = event.normalize();
    match state.events.handle(&normalized).await {
        Ok(()) => Json(EventAck::ok(normalized.phase)),
        Err(e) => {
            warn!(
                error = %e,
                identity = %normalized.identity,
                label = %normalized.label,
                "Connection event not applied"
            );
            Json(EventAck::error(e.message))
        }
    }
}
