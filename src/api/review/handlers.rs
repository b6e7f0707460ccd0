use crate::api::models::*;
use crate::ingest;
use crate::sentiment::{parse_model_output, AverageScores};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{info, warn};

const FILE_FIELD: &str = "file";

pub async fn read_reviews_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReadReviewsResponse>, AppError> {
    let mut multipart = multipart?;

    // Find the upload
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            upload = Some((filename, bytes));
            break;
        }
    }
    let (filename, bytes) = upload.ok_or(AppError::MissingFile)?;

    info!(filename = %filename, size = bytes.len(), "Reading reviews");

    // Parse & extract
    let reviews = ingest::read_reviews(&filename, &bytes)?;
    info!(reviews = reviews.len(), "Extracted review column");

    // Score
    let content = state.model.score(&reviews).await?;
    let entries = parse_model_output(&content)?;

    if entries.len() != reviews.len() {
        warn!(
            submitted = reviews.len(),
            returned = entries.len(),
            "Model returned a different number of entries"
        );
    }

    let data = AverageScores::from_entries(&entries)?;

    info!(
        entries = entries.len(),
        positive = data.positive,
        negative = data.negative,
        neutral = data.neutral,
        "Sentiment averaged"
    );

    Ok(Json(ReadReviewsResponse { data }))
}
