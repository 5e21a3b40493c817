use crate::controller::ApiResponse;
use crate::params::application::{FilterParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::{http::StatusCode, response::IntoResponse, Json};
use domain::{application as ApplicationApi, applications, Id};

use log::*;

/// CREATE a new Application
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = applications::Model,
    responses(
        (status = 201, description = "Successfully created a new Application", body = applications::Model),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "An Application with the same name already exists"),
        (status = 422, description = "Unprocessable Entity"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(application_model): Json<applications::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new Application from: {application_model:?}");

    let application = ApplicationApi::create(app_state.db_conn_ref(), application_model).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        application,
    )))
}

/// GET all Applications, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/applications",
    params(FilterParams),
    responses(
        (status = 200, description = "Successfully retrieved all Applications", body = [applications::Model]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Applications with filters: {params:?}");

    let applications = if params.is_empty() {
        ApplicationApi::find_all(app_state.db_conn_ref()).await?
    } else {
        ApplicationApi::find_by(app_state.db_conn_ref(), params).await?
    };

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), applications)))
}

/// GET an Application by id
#[utoipa::path(
    get,
    path = "/api/v1/applications/{id}",
    params(
        ("id" = String, Path, description = "Application id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Application", body = applications::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Application by id: {id}");

    let application = ApplicationApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), application)))
}

/// UPDATE an Application by id
#[utoipa::path(
    put,
    path = "/api/v1/applications/{id}",
    params(
        ("id" = String, Path, description = "Application id to update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the Application", body = applications::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("UPDATE Application {id} with: {params:?}");

    let application = ApplicationApi::update(app_state.db_conn_ref(), id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), application)))
}

/// DELETE an Application by id (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{id}",
    params(
        ("id" = String, Path, description = "Application id to delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted the Application"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Application by id: {id}");

    ApplicationApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
