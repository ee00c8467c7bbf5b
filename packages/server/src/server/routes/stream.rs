//! SSE streaming endpoint.
//!
//! GET /api/chats/:chat_id/stream?token=JWT
//!
//! Forwards new-message events for one chat as SSE. Auth comes from a
//! `?token=` query param because EventSource cannot send custom headers;
//! an Authorization header is accepted as a fallback. Only the chat's two
//! participants may subscribe.

use std::convert::Infallible;

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;

use crate::common::{ChatId, UserId};
use crate::domains::chats::models::ChatRecord;
use crate::server::app::AxumAppState;

#[derive(Deserialize)]
pub struct StreamQuery {
    /// JWT token for authentication
    token: Option<String>,
}

pub async fn chat_stream_handler(
    Extension(state): Extension<AxumAppState>,
    Path(chat_id): Path<String>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    let chat_id = ChatId::parse(&chat_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let token = query.token.or_else(|| extract_bearer_token(&headers));
    let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
    let claims = state
        .jwt_service
        .verify_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let user_id = UserId::from_uuid(claims.user_id);

    let chat = ChatRecord::find_by_id(chat_id, &state.db_pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    if !chat.is_participant(user_id) {
        return Err(StatusCode::FORBIDDEN);
    }

    let rx = state.deps.chat_hub.subscribe(chat_id).await;

    // Connected event first, then messages, with lag reported rather than
    // silently dropped.
    let connected =
        stream::once(async { Ok::<_, Infallible>(Event::default().event("connected").data("ok")) });

    let events = BroadcastStream::new(rx).filter_map(|result| async {
        match result {
            Ok(value) => Event::default()
                .event("message")
                .json_data(&value)
                .ok()
                .map(Ok),
            Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
                Event::default()
                    .event("lagged")
                    .json_data(&serde_json::json!({"missed": n}))
                    .ok()
                    .map(Ok)
            }
        }
    });

    Ok(Sse::new(connected.chain(events)).keep_alive(KeepAlive::default()))
}

/// Extract Bearer token from Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    auth.strip_prefix("Bearer ").map(|t| t.to_string())
}
