use common::{
    DbPool, NewProject,
    database::projects,
    utils::error::Result,
};

pub const SEED_CREATOR: &str = "crafthub";

/// The sample projects the first frontend mockups were built against.
pub fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject::new(
            "Lasergravur-Projekt",
            Some("Gravierte Holzschilder, in Arbeit"),
            SEED_CREATOR,
        ),
        NewProject::new(
            "Halsband-Kollektion",
            Some("Handgemachte Halsbänder, abgeschlossen"),
            SEED_CREATOR,
        ),
    ]
}

/// Inserts the samples into an empty table. Returns how many rows were written.
pub async fn seed_projects(pool: &DbPool, force: bool) -> Result<usize> {
    let mut client = pool.get().await?;

    let existing = projects::count_projects(&client).await?;
    if existing > 0 && !force {
        tracing::info!("projects already holds {} rows, skipping seed", existing);
        return Ok(0);
    }

    let mut inserted = 0;
    for sample in sample_projects() {
        let project = projects::insert_project(&mut client, &sample.validated()?).await?;
        tracing::info!(id = project.id, title = %project.title, "Seeded project");
        inserted += 1;
    }

    Ok(inserted)
}
