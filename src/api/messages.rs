use crate::api::AppState;
use crate::api::schemas::messages::{CreateMessageRequest, MessageResponse};
use crate::domain::message::NewMessage;
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};

/// Stores a new message.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not valid JSON or the text is missing or empty.
pub async fn create_message(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload?;
    let message = NewMessage::new(request.text)?;

    let created = state.message_service.create(message).await?;
    let location = format!("/message/{}", created.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(MessageResponse::from(created))))
}

/// Fetches a single message.
///
/// # Errors
/// Returns `AppError::BadRequest` if the id is not an integer.
/// Returns `AppError::NotFound` if no message has that id.
pub async fn get_message(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let Path(id) = id?;

    let message = state.message_service.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(message.into()))
}

/// Deletes a message.
///
/// # Errors
/// Returns `AppError::BadRequest` if the id is not an integer.
/// Returns `AppError::NotFound` if no message has that id.
pub async fn delete_message(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;

    if state.message_service.delete_by_id(id).await? { Ok(StatusCode::OK) } else { Err(AppError::NotFound) }
}

/// Lists every stored message.
///
/// # Errors
/// Returns `AppError::Database` if the messages cannot be read.
pub async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<MessageResponse>>> {
    let messages = state.message_service.list_all().await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
