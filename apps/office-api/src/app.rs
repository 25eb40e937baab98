use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::get,
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::MiddlewareConfig;
use crate::methods::create_user::{__path_create_user, create_user};
use crate::methods::delete_user::{__path_delete_user, delete_user};
use crate::methods::entities::{
    CreateUserRequest, EnvelopeResponse, HeaderResponse, PaginatedResponse, RoleResponse,
    UpdateUserRequest, UserResponse,
};
use crate::methods::get_roles::{__path_get_roles, get_roles};
use crate::methods::get_user_by_id::{__path_get_user_by_id, get_user_by_id};
use crate::methods::get_users::{__path_get_users, get_users};
use crate::methods::health_check::{__path_health_check, health_check, HealthResponse};
use crate::methods::routes::{
    API_V1_PREFIX, OPENAPI_JSON_PATH, ROLES_PATH, SERVICE_DOCS_PATH, SERVICE_HEALTH_PATH,
    USERS_BY_ID_PATH, USERS_PATH,
};
use crate::methods::update_user::{__path_update_user, update_user};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(
        get_users, get_user_by_id, create_user, update_user, delete_user,
        get_roles, health_check
    ),
    components(schemas(
        CreateUserRequest, UpdateUserRequest, UserResponse, RoleResponse, HeaderResponse,
        EnvelopeResponse<UserResponse>, EnvelopeResponse<bool>,
        PaginatedResponse<UserResponse>, PaginatedResponse<RoleResponse>,
        HealthResponse
    )),
    tags(
        (name = "users", description = "Office user management endpoints"),
        (name = "roles", description = "Assignable roles"),
        (name = "health", description = "Service liveness")
    )
)]
pub struct ApiDoc;

/// Routes and docs, without the network middleware stack.
pub fn build_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(USERS_PATH, get(get_users).post(create_user))
        .route(
            USERS_BY_ID_PATH,
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
        .route(ROLES_PATH, get(get_roles));

    let root_routes = Router::new()
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    Router::new()
        .nest(API_V1_PREFIX, v1_routes)
        .merge(root_routes)
        .with_state(state)
}

/// Wraps the router with the middleware stack, applied inner to outer:
/// trace, request id, body limit, CORS, timeout, rate limit.
///
/// The rate limiter keys on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn apply_middleware(mut app: Router, config: &MiddlewareConfig) -> Result<Router, String> {
    app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid));

    app = app.layer(RequestBodyLimitLayer::new(config.max_body_size));

    let cors_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id]);
    let cors_layer = if config.allows_any_origin() {
        cors_layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors_layer.allow_origin(origins)
    };
    app = app.layer(cors_layer);

    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        config.request_timeout,
    ));

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(config.replenish_interval_ms())
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| "invalid rate limit configuration".to_string())?;
    app = app.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    Ok(app)
}
