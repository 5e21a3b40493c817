use crate::controller::{application_controller, health_check_controller, user_controller};
use crate::middleware::auth::require_api_key;
use crate::{params, ws, AppState};
use axum::{
    http::{
        header::{HeaderName, HeaderValue, CONTENT_TYPE},
        Method,
    },
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use log::warn;
use tower_http::cors::CorsLayer;

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Relay Platform API"
        ),
        paths(
            health_check_controller::health_check,
            user_controller::create,
            user_controller::index,
            user_controller::read,
            user_controller::update,
            user_controller::delete,
            application_controller::create,
            application_controller::index,
            application_controller::read,
            application_controller::update,
            application_controller::delete,
        ),
        components(
            schemas(
                domain::users::Model,
                domain::applications::Model,
                params::user::UpdateParams,
                params::application::UpdateParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "relay_platform", description = "Relay Platform API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our static API key authentication requirement for gaining access to
// our API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "x-api-key",
                    "Static API key; also accepted as an `api_key` query parameter",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(user_routes(app_state.clone()))
        .merge(application_routes(app_state.clone()))
        .merge(chat_routes(app_state.clone()))
        // **** FIXME: protect the OpenAPI web UI
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors_layer(&app_state))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/users",
            post(user_controller::create).get(user_controller::index),
        )
        .route(
            "/api/v1/users/{id}",
            get(user_controller::read)
                .put(user_controller::update)
                .delete(user_controller::delete),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_api_key))
        .with_state(app_state)
}

fn application_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/applications",
            post(application_controller::create).get(application_controller::index),
        )
        .route(
            "/api/v1/applications/{id}",
            get(application_controller::read)
                .put(application_controller::update)
                .delete(application_controller::delete),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_api_key))
        .with_state(app_state)
}

fn chat_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/v1/ws/{client_id}", get(ws::handler::chat_handler))
        .route_layer(from_fn_with_state(app_state.clone(), require_api_key))
        .merge(
            // The demo page itself is public; the socket it opens is not.
            Router::new().route("/api/v1/ws", get(ws::chat_page)),
        )
        .with_state(app_state)
}

fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!("Skipping invalid allowed origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-api-key")])
        .allow_origin(origins)
}
