use tokio_postgres::Client;

use crate::models::project::{NewProject, Project};
use crate::utils::error::{ApiError, Result};

const PROJECT_COLUMNS: &str = "id, title, description, creator";

/// Full scan of `projects`, oldest first.
pub async fn list_projects(client: &Client) -> Result<Vec<Project>> {
    let rows = client
        .query(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"),
            &[],
        )
        .await?;

    Ok(rows.iter().map(Project::from_row).collect())
}

pub async fn get_project(client: &Client, id: i32) -> Result<Project> {
    let row = client
        .query_opt(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"),
            &[&id],
        )
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Project".to_string(),
            id: id.to_string(),
        })?;

    Ok(Project::from_row(&row))
}

/// Inserts an already validated project inside its own transaction and
/// returns the stored row.
pub async fn insert_project(client: &mut Client, project: &NewProject) -> Result<Project> {
    let tx = client.transaction().await?;

    let row = tx
        .query_one(
            &format!(
                "INSERT INTO projects (title, description, creator)
                 VALUES ($1, $2, $3)
                 RETURNING {PROJECT_COLUMNS}"
            ),
            &[&project.title, &project.description, &project.creator],
        )
        .await?;

    tx.commit().await?;

    Ok(Project::from_row(&row))
}

pub async fn count_projects(client: &Client) -> Result<i64> {
    let row = client
        .query_one("SELECT COUNT(*) FROM projects", &[])
        .await?;

    Ok(row.get(0))
}
