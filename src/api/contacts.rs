//! Contact API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{parse_id, ApiResult};
use crate::models::{Contact, CreateContactRequest, Page};
use crate::AppState;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index (default: 0).
    #[serde(default)]
    pub page: u32,
    /// Page size (default: 10).
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    10
}

/// POST /contacts - Create a new contact.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> ApiResult<impl IntoResponse> {
    let contact = state.contacts.create_contact(request).await?;
    let location = format!("/contacts/{}", contact.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(contact),
    ))
}

/// GET /contacts - List contacts sorted by name.
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<Page<Contact>>> {
    let page = state
        .contacts
        .list_contacts(params.page, params.size)
        .await?;
    Ok(Json(page))
}

/// GET /contacts/{id} - Get a single contact.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Contact>> {
    let id = parse_id(&id)?;
    let contact = state.contacts.get_contact(id).await?;
    Ok(Json(contact))
}
