use axum::{
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Form, Json,
};
use tracing::info;

use common::types::Message;
use models::user_record;
use service::errors::ServiceError;

use crate::errors::{FieldError, JsonApiError};
use crate::routes::AppState;

pub const STATUS_UPDATED: &str = "Status atualizado com sucesso";

/// Creation parameters; accepted from the query string or an urlencoded form body.
#[derive(Debug, Default)]
pub struct CreateUserParams {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

type Pairs = Vec<(String, String)>;

impl CreateUserParams {
    /// Fold raw key/value pairs; a repeated key keeps its last value, unknown keys are ignored.
    fn from_pairs(pairs: Pairs) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => params.name = Some(value),
                "address" => params.address = Some(value),
                "phone" => params.phone = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Query values win; the form fills whatever the query left out.
    fn merge(self, other: Self) -> Self {
        Self {
            name: self.name.or(other.name),
            address: self.address.or(other.address),
            phone: self.phone.or(other.phone),
        }
    }

    fn require(self) -> Result<(String, String, String), JsonApiError> {
        let mut missing = Vec::new();
        if self.name.is_none() { missing.push(FieldError::missing("query", "name")); }
        if self.address.is_none() { missing.push(FieldError::missing("query", "address")); }
        if self.phone.is_none() { missing.push(FieldError::missing("query", "phone")); }
        match (self.name, self.address, self.phone) {
            (Some(n), Some(a), Some(p)) => Ok((n, a, p)),
            _ => Err(JsonApiError::validation(missing)),
        }
    }
}

fn query_params(query: Result<Query<Pairs>, QueryRejection>) -> Result<CreateUserParams, JsonApiError> {
    let Query(pairs) = query
        .map_err(|e| JsonApiError::validation(vec![FieldError::malformed("query", e.body_text())]))?;
    Ok(CreateUserParams::from_pairs(pairs))
}

/// A request without an urlencoded body contributes nothing; a broken body is a 422.
fn form_params(form: Result<Form<Pairs>, FormRejection>) -> Result<CreateUserParams, JsonApiError> {
    match form {
        Ok(Form(pairs)) => Ok(CreateUserParams::from_pairs(pairs)),
        Err(FormRejection::InvalidFormContentType(_)) => Ok(CreateUserParams::default()),
        Err(e) => Err(JsonApiError::validation(vec![FieldError::malformed("body", e.body_text())])),
    }
}

/// Integers outside the id column's range cannot name a record, so they are not found.
fn record_id(path: Result<Path<i64>, PathRejection>) -> Result<i32, JsonApiError> {
    let Path(id) = path
        .map_err(|_| JsonApiError::validation(vec![FieldError::invalid_integer("path", "id")]))?;
    i32::try_from(id).map_err(|_| ServiceError::not_found("user").into())
}

#[utoipa::path(
    post, path = "/usuarios", tag = "usuarios",
    params(
        ("name" = String, Query, description = "Full name"),
        ("address" = String, Query, description = "Delivery address"),
        ("phone" = String, Query, description = "Phone number, unique"),
    ),
    responses(
        (status = 200, description = "Created", body = crate::openapi::UserRecordDoc),
        (status = 422, description = "Validation Error"),
        (status = 500, description = "Constraint Violation")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    query: Result<Query<Pairs>, QueryRejection>,
    form: Result<Form<Pairs>, FormRejection>,
) -> Result<Json<user_record::Model>, JsonApiError> {
    let from_query = query_params(query)?;
    let from_form = form_params(form)?;
    let (name, address, phone) = from_query.merge(from_form).require()?;
    let rec = state.records.create(&name, &address, &phone).await?;
    Ok(Json(rec))
}

#[utoipa::path(
    get, path = "/usuarios/{id}", tag = "usuarios",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserRecordDoc),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<user_record::Model>, JsonApiError> {
    let id = record_id(path)?;
    Ok(Json(state.records.get(id).await?))
}

#[utoipa::path(
    patch, path = "/usuarios/{id}", tag = "usuarios",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn mark_picked_up(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let id = record_id(path)?;
    state.records.mark_picked_up(id).await?;
    Ok(Json(Message::new(STATUS_UPDATED)))
}

#[utoipa::path(
    get, path = "/usuarios", tag = "usuarios",
    responses(
        (status = 200, description = "All records", body = [crate::openapi::UserRecordDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<user_record::Model>>, JsonApiError> {
    let list = state.records.list().await?;
    info!(count = list.len(), "list user records");
    Ok(Json(list))
}
