use axum::Json;
use axum::http::StatusCode;
use axum::extract::{Path, State, rejection::JsonRejection};

use common::database::projects;
use common::models::project::{NewProject, Project};
use common::utils::error::Result;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "Every stored project", body = [Project])
    ),
    tag = "projects"
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    let client = state.pool.get().await?;
    let projects = projects::list_projects(&client).await?;

    Ok(Json(projects))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = Project),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Project>> {
    let client = state.pool.get().await?;
    let project = projects::get_project(&client, id).await?;

    Ok(Json(project))
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body = NewProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Invalid project")
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>)> {
    let Json(request) = payload?;
    let new_project = request.validated()?;

    let mut client = state.pool.get().await?;
    let project = projects::insert_project(&mut client, &new_project).await?;

    tracing::info!(id = project.id, creator = %project.creator, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}
