use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use imgvoice_core::validation::sanitize_filename;
use imgvoice_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::views;

/// Forward a previously stored file. Only mounted in `deferred` mode.
///
/// The path parameter must already be a sanitized key; anything the sanitizer would
/// change is refused rather than silently rewritten.
#[tracing::instrument(
    skip(state),
    fields(request_id = %Uuid::new_v4(), operation = "process_file")
)]
pub async fn process_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let key = match sanitize_filename(&filename) {
        Some(key) if key == filename => key,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "'{}' is not a valid stored file name",
                filename
            ))
            .into())
        }
    };

    let reference = state.pipeline.reference(&key);
    state.pipeline.forward(&reference).await?;

    Ok(views::success().into_response())
}
