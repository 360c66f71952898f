//! Note edit quota handler.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use note_quota_core::DomainError;
use note_quota_core::domain::NoteEditRequest;
use note_quota_shared::dto::{CanUpdateNoteRequest, CanUpdateNoteResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// POST /api/notes/can-update
///
/// Returns the edits left to the author, consuming one unless the request is
/// read-only or continues a recent session on the same note.
pub async fn can_update_note(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CanUpdateNoteRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let request = NoteEditRequest {
        author_id: req.author_id,
        target: req.target,
        public_identifier: req.public_identifier,
        read_only: req.read_only,
    };

    let decision = state
        .notes
        .decide(&request, &state.free_tier.notes, Utc::now());

    // Timing out drops the decision, and any store call in flight with it.
    let outcome = match tokio::time::timeout(state.request_timeout, decision).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!(
                request_id = %request_id.as_str(),
                author_id = %request.author_id,
                timeout_ms = state.request_timeout.as_millis() as u64,
                "Note edit decision timed out"
            );
            return Err(AppError::NotConfirmed);
        }
    };

    match outcome {
        Ok(remaining_edits) => {
            tracing::info!(
                request_id = %request_id.as_str(),
                author_id = %request.author_id,
                read_only = request.read_only,
                remaining_edits,
                "CanUpdateNote"
            );
            Ok(HttpResponse::Ok().json(CanUpdateNoteResponse::new(remaining_edits)))
        }
        Err(err) => {
            match &err {
                DomainError::Store(_) => tracing::error!(
                    request_id = %request_id.as_str(),
                    author_id = %request.author_id,
                    error = %err,
                    "CanUpdateNote failed"
                ),
                _ => tracing::info!(
                    request_id = %request_id.as_str(),
                    author_id = %request.author_id,
                    error = %err,
                    "CanUpdateNote denied"
                ),
            }
            Err(err.into())
        }
    }
}
