use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use imgvoice_core::validation::{validate_upload_filename, UploadRejection};
use imgvoice_core::PipelineMode;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{extract_upload_field, UPLOAD_FIELD};
use crate::views;

/// Receive the upload form.
///
/// Submissions that fail validation are sent back to the form without an error body.
/// Accepted files are stored, then either forwarded right away (`direct`) or handed
/// to `/process_file/{key}` by redirect (`deferred`).
#[tracing::instrument(
    skip(state, multipart),
    fields(request_id = %Uuid::new_v4(), operation = "upload")
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let upload = match multipart {
        Ok(multipart) => extract_upload_field(multipart, UPLOAD_FIELD).await?,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Request is not a multipart form");
            None
        }
    };

    let Some(upload) = upload else {
        return Ok(back_to_form(UploadRejection::MissingField, ""));
    };

    let key = match validate_upload_filename(&upload.filename, state.config.allowed_extensions())
    {
        Ok(key) => key,
        Err(rejection) => return Ok(back_to_form(rejection, &upload.filename)),
    };

    tracing::debug!(
        filename = %upload.filename,
        key = %key,
        size_bytes = upload.size(),
        mode = %state.config.mode(),
        "Upload accepted"
    );

    let reference = state.pipeline.store(&key, upload).await?;

    match state.config.mode() {
        PipelineMode::Direct => {
            state.pipeline.forward(&reference).await?;
            Ok(views::success().into_response())
        }
        PipelineMode::Deferred => {
            Ok(Redirect::to(&format!("/process_file/{}", reference.key)).into_response())
        }
    }
}

fn back_to_form(rejection: UploadRejection, filename: &str) -> Response {
    tracing::debug!(reason = %rejection, filename = %filename, "Upload rejected");
    Redirect::to("/").into_response()
}
