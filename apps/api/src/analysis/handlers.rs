//! Axum route handlers for resume analysis.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::models::{ResultEnvelope, UploadedDocument};
use crate::errors::AnalysisError;
use crate::render::render_page;
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

/// POST /api/v1/resume/analyze
///
/// Always answers with a `ResultEnvelope`; failures carry a matching status code.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultEnvelope>, AnalysisError> {
    let request_id = Uuid::new_v4();
    async move {
        let document = read_upload(multipart).await?;
        let analysis = state.analyzer.run(document).await?;
        info!("Resume analysis succeeded");
        Ok::<_, AnalysisError>(Json(ResultEnvelope::success(analysis)))
    }
    .instrument(info_span!("analyze", %request_id))
    .await
}

/// GET /
pub async fn handle_form() -> Html<String> {
    Html(render_page(None))
}

/// POST /
///
/// Same pipeline as the JSON route, rendered as HTML.
pub async fn handle_form_submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Html<String> {
    let request_id = Uuid::new_v4();
    let envelope = async move {
        match read_upload(multipart).await {
            Ok(document) => state.analyzer.analyze(document).await,
            Err(e) => ResultEnvelope::failure(e.to_string()),
        }
    }
    .instrument(info_span!("analyze_form", %request_id))
    .await;

    Html(render_page(Some(&envelope)))
}

/// Pulls the `resume` part out of a multipart body.
///
/// `Ok(None)` means no file was sent: no `resume` part, or an empty part with
/// no file name (a browser form submitted without a selection). A body that
/// overflows the request limit is `FileTooLarge`; any other malformed body is
/// treated as missing.
pub async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Option<UploadedDocument>, AnalysisError> {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            warn!("Rejected non-multipart upload: {rejection}");
            return Ok(None);
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => return Err(map_multipart_error(e.status(), &e.body_text())),
        };

        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let media_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| map_multipart_error(e.status(), &e.body_text()))?;

        if bytes.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
            return Ok(None);
        }

        let mut document = UploadedDocument::new(bytes, media_type);
        if let Some(name) = file_name {
            document = document.with_file_name(name);
        }
        return Ok(Some(document));
    }
}

fn map_multipart_error(status: StatusCode, detail: &str) -> AnalysisError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeded request body limit");
        AnalysisError::FileTooLarge { size: None }
    } else {
        warn!("Malformed multipart body: {detail}");
        AnalysisError::MissingFile
    }
}
