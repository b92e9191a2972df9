//! Handler for the URL registration endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a URL under a caller-supplied or generated alias.
///
/// # Endpoint
///
/// `POST /url` (Basic auth required)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "a1B2c3" }
/// ```
///
/// `alias` is optional.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "alias": "a1B2c3" }
/// ```
///
/// # Errors
///
/// - `400` - malformed body, invalid URL or alias
/// - `409` - alias already taken
/// - `500` - storage failure or alias allocation exhausted
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state
        .registration_service
        .register(payload.url, payload.alias)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveResponse {
            alias: mapping.alias,
        }),
    ))
}
