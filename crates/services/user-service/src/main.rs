//! User Service - administration CLI for user records.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{UserFilter, ROLE_USER};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User record administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users matching all given constraints
    List {
        #[arg(long)]
        id: Option<Uuid>,
        #[arg(long)]
        backend: Option<String>,
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Show a single user
    Show { id: Uuid },
    /// Register a local account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        account: String,
        #[arg(long, default_value = ROLE_USER)]
        role: String,
        #[arg(long, env = "USER_SERVICE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Set a new password for a local account
    Passwd {
        #[arg(long)]
        account: String,
        #[arg(long, env = "USER_SERVICE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Verify a local account's password
    Check {
        #[arg(long)]
        account: String,
        #[arg(long, env = "USER_SERVICE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Check database connectivity
    Ping,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = UserServiceConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!(service = %config.service.service_name, "Starting");

    match run(cli.command, &config).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            error!(code = err.code(), "{}", err);
            eprintln!(
                "{}",
                json!({ "error": { "code": err.code(), "message": err.to_string() } })
            );
            std::process::exit(1);
        }
    }
}

/// Execute one command. `Ok(false)` means the command ran but failed its check.
async fn run(command: Commands, config: &UserServiceConfig) -> AppResult<bool> {
    let (db, service) = user_service_lib::bootstrap(config).await?;

    match command {
        Commands::List {
            id,
            backend,
            account,
            limit,
        } => {
            let filter = UserFilter {
                id,
                backend,
                account,
                limit,
            };
            let users = service.list_users(&filter).await?;
            print_json(&users)?;
        }
        Commands::Show { id } => {
            let user = service.get_user(id).await?;
            print_json(&user)?;
        }
        Commands::Register {
            name,
            account,
            role,
            password,
        } => {
            let user = service
                .register_local(name, account, role, &password)
                .await?;
            print_json(&user)?;
        }
        Commands::Passwd { account, password } => {
            service.change_password(&account, &password).await?;
        }
        Commands::Check { account, password } => {
            let user = service.authenticate(&account, &password).await?;
            let authenticated = user.is_some();
            println!("{}", json!({ "account": account, "authenticated": authenticated }));
            return Ok(authenticated);
        }
        Commands::Ping => {
            db.ping().await?;
            println!("ok");
        }
    }

    Ok(true)
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
