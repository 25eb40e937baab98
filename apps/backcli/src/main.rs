// apps/backcli/src/main.rs

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::process;
use tracing_subscriber::EnvFilter;

use office_lib::entities::PaginatedRequest;
use office_lib::repository::{RoleRepository, UserRepository};
use office_lib::user_service::UserService;
use office_lib::util::{connect_with_retry, run_migrations};

const CONNECT_RETRIES: u32 = 3;

fn cli() -> Command {
    Command::new("backcli")
        .about("Office backend CLI utility")
        .arg(
            Arg::new("database-url")
                .long("database-url")
                .env("DATABASE_URL")
                .help("MySQL connection string (required by --migrations and --list-users)"),
        )
        .arg(
            Arg::new("migrations")
                .long("migrations")
                .action(ArgAction::SetTrue)
                .help("Apply office-lib schema and seed migrations"),
        )
        .arg(
            Arg::new("list-users")
                .long("list-users")
                .action(ArgAction::SetTrue)
                .help("Print the first page of users with their roles"),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .value_parser(value_parser!(u32))
                .requires("list-users")
                .help("Page size for --list-users (1-100, default 10)"),
        )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = cli().get_matches();

    if let Err(e) = run(&matches).await {
        eprintln!("backcli failed: {}", e);
        process::exit(1);
    }
}

fn database_url(matches: &ArgMatches) -> Result<&str, &'static str> {
    matches
        .get_one::<String>("database-url")
        .map(String::as_str)
        .ok_or("DATABASE_URL must be set")
}

async fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let migrations = matches.get_flag("migrations");
    let list_users = matches.get_flag("list-users");
    if !migrations && !list_users {
        cli().print_help()?;
        return Ok(());
    }

    let db_url = database_url(matches)?;
    let pool = connect_with_retry(db_url, CONNECT_RETRIES).await?;

    if migrations {
        println!("Running migrations for office-lib...");
        run_migrations(&pool).await?;
        println!("Migrations applied successfully.");
    }

    if list_users {
        let limit = matches.get_one::<u32>("limit").copied();
        let service = UserService::new(UserRepository::new(pool.clone()), RoleRepository::new(pool));
        let page = service.find_users(PaginatedRequest::new(limit, None)).await?;

        println!("{} users (showing {})", page.total, page.data.len());
        for user in page.data {
            let roles: Vec<&str> = user.roles.iter().map(|r| r.name.as_str()).collect();
            println!(
                "{:>5}  {:<24} {:<32} {} {}  [{}]",
                user.id,
                user.username,
                user.email,
                user.name,
                user.last_name,
                roles.join(", ")
            );
        }
    }

    Ok(())
}
