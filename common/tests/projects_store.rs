//! Runs against a real Postgres when `CRAFTHUB_TEST_DATABASE_URL` is set.

use std::time::{SystemTime, UNIX_EPOCH};

use common::{
    Config, NewProject,
    database::{create_pool, projects, run_migrations},
};

fn test_config() -> Option<Config> {
    let url = std::env::var("CRAFTHUB_TEST_DATABASE_URL").ok()?;
    Some(Config {
        database_url: url,
        max_db_connections: 2,
        ..Config::default()
    })
}

fn unique_title(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    format!("{prefix}-{}-{nanos}", std::process::id())
}

#[tokio::test]
async fn migrated_store_persists_and_lists_projects() {
    let Some(config) = test_config() else {
        eprintln!("CRAFTHUB_TEST_DATABASE_URL not set, skipping");
        return;
    };

    let pool = create_pool(&config).await.expect("failed to connect");
    run_migrations(&pool, None).await.expect("first migration run failed");
    let second = run_migrations(&pool, None).await.expect("second migration run failed");
    assert_eq!(second, 0);

    let mut client = pool.get().await.expect("failed to get client");
    let tables: i64 = client
        .query_one(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'projects'",
            &[],
        )
        .await
        .expect("table lookup failed")
        .get(0);
    assert_eq!(tables, 1);

    let title = unique_title("Lasergravur");
    let new_project = NewProject::new(title.clone(), Some("Holzschild mit Gravur"), "anna")
        .validated()
        .unwrap();
    let stored = projects::insert_project(&mut client, &new_project)
        .await
        .expect("insert failed");

    assert_eq!(stored.title, title);
    assert_eq!(stored.description.as_deref(), Some("Holzschild mit Gravur"));
    assert_eq!(stored.creator, "anna");

    let fetched = projects::get_project(&client, stored.id)
        .await
        .expect("lookup failed");
    assert_eq!(fetched, stored);

    let listed = projects::list_projects(&client).await.expect("list failed");
    assert!(listed.contains(&stored));
    assert!(listed.windows(2).all(|pair| pair[0].id < pair[1].id));

    let err = projects::get_project(&client, -1).await.unwrap_err();
    assert!(matches!(err, common::ApiError::NotFound { .. }));
}

