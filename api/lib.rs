pub mod models;
pub mod handlers;
pub mod middleware;

use axum::{
    Json, Router,
    response::Html,
    routing::get,
};
use tower::ServiceBuilder;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;
use tower_http::cors::CorsLayer;

use common::database::connection::DbPool;

use handlers::{
    status::{health, welcome},
    projects::{create_project, get_project, list_projects},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CraftHub API",
        description = "Backend for the CraftHub hobby-project marketplace.",
        version = "1.0.0"
    ),
    paths(
        handlers::status::welcome,
        handlers::status::health,
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::create_project,
    ),
    components(
        schemas(
            common::models::project::Project,
            common::models::project::NewProject,
            models::status::Welcome,
            models::status::HealthStatus,
        )
    ),
    tags(
        (name = "status", description = "Welcome and health endpoints"),
        (name = "projects", description = "Project endpoints"),
    )
)]
pub struct ApiDoc;

async fn serve_docs() -> Html<String> {
    Html(Scalar::new(ApiDoc::openapi()).to_html())
}

async fn serve_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/test", get(health))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project))
        .route("/api-docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_docs))
        .layer(axum::middleware::from_fn(middleware::request_logger))
        // TODO: restrict origins once the frontend has a fixed deployment URL.
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}

pub fn app(state: AppState) -> Router {
    create_router().with_state(state)
}
