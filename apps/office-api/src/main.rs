use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use office_api::app::{apply_middleware, build_router};
use office_api::config::{MiddlewareConfig, ServerConfig};
use office_api::constants::{LOCAL_ENV, SERVICE};
use office_api::methods::routes::{API_V1_PREFIX, SERVICE_DOCS_PATH};
use office_api::shutdown::shutdown_signal;
use office_api::state::AppState;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};
use office_lib::repository::{RoleRepository, UserRepository};
use office_lib::user_service::UserService;
use office_lib::util::connect_with_retry;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(env: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let server_config = ServerConfig::from_env()?;
    init_tracing(&server_config.env);

    tracing::info!(service = SERVICE, env = %server_config.env, "tracing initialized");

    let middleware_config = MiddlewareConfig::from_env();
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    let pool = connect_with_retry(
        &server_config.database_url,
        server_config.db_connect_retries,
    )
    .await?;

    let user_repo: Arc<dyn UserRepositoryTrait> = Arc::new(UserRepository::new(pool.clone()));
    let role_repo: Arc<dyn RoleRepositoryTrait> = Arc::new(RoleRepository::new(pool));
    let user_service = UserService::with_repos(user_repo, role_repo);

    let app_state = AppState::new(Arc::new(user_service), server_config.env.clone());
    tracing::info!(prod_like = app_state.is_prod_like(), "service state ready");

    let app = apply_middleware(build_router(app_state), &middleware_config)?;

    let addr = format!("0.0.0.0:{}", server_config.port);
    let public_url = format!("http://127.0.0.1:{}", server_config.port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("{} is ready to accept requests at: {}", SERVICE, public_url);
    tracing::info!("API v1 endpoints available at: {}{}", public_url, API_V1_PREFIX);
    tracing::info!("API docs available at: {}{}", public_url, SERVICE_DOCS_PATH);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(middleware_config.shutdown_timeout))
    .await
    .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
