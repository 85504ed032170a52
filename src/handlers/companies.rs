use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Company;
use crate::validation;

/// GET /companies/ - All companies
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Company>> {
    let companies = state.companies.find("").await?;
    Ok(ApiResponse::success(companies))
}

/// GET /companies/:id - One company, as a single-element list
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<Company>> {
    let companies = state.companies.find(&id).await?;
    Ok(ApiResponse::success(companies))
}

/// POST /companies - Create a company (Basic auth)
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> ApiResult<Company> {
    let payload = validation::parse_body(&body)?;
    let company = state.companies.create(&payload).await?;

    tracing::info!(user = %user.username, company_id = %company.id, "POST /companies");
    Ok(ApiResponse::created(company))
}

/// PATCH /companies/:id - Partially update a company (Basic auth)
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Value> {
    // Identifier first, so a bad id is reported before a bad body
    validation::require_identifier(&id)?;
    let payload = validation::parse_body(&body)?;
    let updated = state.companies.update(&id, &payload).await?;

    tracing::info!(user = %user.username, company_id = %updated, "PATCH /companies/:id");
    Ok(ApiResponse::accepted(json!({ "id": updated })))
}

/// DELETE /companies/:id - Delete a company (Basic auth)
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let deleted = state.companies.delete(&id).await?;

    tracing::info!(user = %user.username, company_id = %deleted, "DELETE /companies/:id");
    Ok(ApiResponse::success(json!({ "id": deleted })))
}
