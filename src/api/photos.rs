//! Photo upload and download endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap},
    response::IntoResponse,
};
use serde::Deserialize;

use super::{base_url, parse_id, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Query parameters of the upload endpoint.
#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    pub id: String,
}

/// PUT /contacts/photo?id= - Upload a contact photo, returns its URL as plain text.
pub async fn upload_photo(
    State(state): State<AppState>,
    Query(params): Query<PhotoQuery>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<String> {
    let id = parse_id(&params.id)?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        let base = base_url(state.config.public_url.as_deref(), &headers);

        return state
            .contacts
            .upload_photo(id, &bytes, &filename, &base)
            .await;
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// GET /contacts/image/{filename} - Serve a stored photo.
pub async fn get_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let (bytes, content_type) = state.contacts.read_photo(&filename).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
