mod seed;

use clap::{Arg, ArgMatches, Command};

use common::{
    DbPool,
    database::{connection::{create_pool, run_migrations}, projects},
    utils::{config::Config, error::Result},
};

fn cli() -> Command {
    Command::new("crafthub-admin")
        .about("CraftHub database administration")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("migrate").about("Apply pending SQL migrations"))
        .subcommand(
            Command::new("seed")
                .about("Migrate, then insert the sample projects into an empty table")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Insert the samples even if projects already has rows")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("status").about("Show applied migrations and the project count"))
}

async fn migrate(pool: &DbPool, config: &Config) -> Result<()> {
    tracing::info!("Running database migrations");
    let applied = run_migrations(pool, config.migrations_dir.as_deref()).await?;
    tracing::info!("{} migration(s) applied", applied);
    Ok(())
}

async fn status(pool: &DbPool) -> Result<()> {
    let client = pool.get().await?;

    let tracked = client
        .query_one(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = '__migrations'",
            &[],
        )
        .await?
        .get::<_, i64>(0)
        > 0;

    if !tracked {
        println!("No migrations applied yet. Run `crafthub-admin migrate`.");
        return Ok(());
    }

    let rows = client
        .query(
            "SELECT filename, applied_at::TEXT AS applied_at FROM __migrations ORDER BY filename",
            &[],
        )
        .await?;

    println!("Applied migrations:");
    for row in &rows {
        let filename: String = row.get("filename");
        let applied_at: Option<String> = row.get("applied_at");
        println!("  {:<32} {}", filename, applied_at.unwrap_or_default());
    }

    println!("Projects: {}", projects::count_projects(&client).await?);
    Ok(())
}

async fn run(matches: &ArgMatches, config: &Config) -> Result<()> {
    let pool = create_pool(config).await?;

    match matches.subcommand() {
        Some(("migrate", _)) => migrate(&pool, config).await,
        Some(("seed", sub)) => {
            migrate(&pool, config).await?;
            let inserted = seed::seed_projects(&pool, sub.get_flag("force")).await?;
            tracing::info!("{} sample project(s) inserted", inserted);
            Ok(())
        }
        Some(("status", _)) => status(&pool).await,
        _ => unreachable!("clap requires a subcommand"),
    }
}

#[tokio::main]
async fn main() {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install crypto provider");

    let matches = cli().get_matches();

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .init();

    let result = match Config::from_env() {
        Ok(config) => run(&matches, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("crafthub-admin failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn seed_accepts_force_flag() {
        let matches = cli().try_get_matches_from(["crafthub-admin", "seed", "--force"]).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "seed");
        assert!(sub.get_flag("force"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(cli().try_get_matches_from(["crafthub-admin"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(cli().try_get_matches_from(["crafthub-admin", "wipe"]).is_err());
    }
}
