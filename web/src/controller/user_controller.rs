use crate::controller::ApiResponse;
use crate::params::user::{FilterParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::{http::StatusCode, response::IntoResponse, Json};
use domain::{user as UserApi, users, Id};

use log::*;

/// CREATE a new User
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = users::Model,
    responses(
        (status = 201, description = "Successfully created a new User", body = users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A User with the same username or email already exists"),
        (status = 422, description = "Unprocessable Entity"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(user_model): Json<users::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new User from: {user_model:?}");

    let user = UserApi::create(app_state.db_conn_ref(), user_model).await?;

    debug!("Newly created User: {:?}", &user);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), user)))
}

/// GET all Users, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(FilterParams),
    responses(
        (status = 200, description = "Successfully retrieved all Users", body = [users::Model]),
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
    debug!("GET all Users with filters: {params:?}");

    let users = if params.is_empty() {
        UserApi::find_all(app_state.db_conn_ref()).await?
    } else {
        UserApi::find_by(app_state.db_conn_ref(), params).await?
    };

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), users)))
}

/// GET a User by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the User", body = users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET User by id: {id}");

    let user = UserApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user)))
}

/// UPDATE a User by id
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User id to update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the User", body = users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
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
    debug!("UPDATE User {id} with: {params:?}");

    let user = UserApi::update(app_state.db_conn_ref(), id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user)))
}

/// DELETE a User by id (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User id to delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted the User"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE User by id: {id}");

    UserApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::router::define_routes;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use clap::Parser;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_user() -> users::Model {
        let now = Utc::now();
        users::Model {
            id: "b1GlMQGYCzqW3EVhZtZg81Nps".to_string(),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password: "hashed".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone_number: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            zip_code: "62701".to_string(),
            is_active: true,
            is_superuser: false,
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    fn test_app(db: sea_orm::DatabaseConnection) -> axum::Router {
        let config = Config::parse_from(["relay_platform_rs", "--api-key-1", "test-key"]);
        let app_state = AppState::new(config, &Arc::new(db));
        define_routes(app_state)
    }

    #[tokio::test]
    async fn index_returns_users_as_json() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user()]])
            .into_connection();

        let request = Request::builder()
            .uri("/api/v1/users")
            .header("x-api-key", "test-key")
            .body(Body::empty())
            .unwrap();
        let response = test_app(db).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["data"][0]["username"], "jdoe");
        // Passwords never serialize
        assert!(value["data"][0].get("password").is_none());
    }

    #[tokio::test]
    async fn read_of_a_missing_user_returns_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let request = Request::builder()
            .uri("/api/v1/users/missing")
            .header("x-api-key", "test-key")
            .body(Body::empty())
            .unwrap();
        let response = test_app(db).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn index_without_an_api_key_returns_401() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let request = Request::builder()
            .uri("/api/v1/users")
            .body(Body::empty())
            .unwrap();
        let response = test_app(db).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
