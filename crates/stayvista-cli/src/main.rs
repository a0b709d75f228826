use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use stayvista_auth::{Identity, issue_session_token};
use stayvista_cli::{RoleChange, set_user_role};
use stayvista_config::{DatabaseConfig, JwtConfig};
use stayvista_db::init_db_pool;
use stayvista_models::Role;

#[derive(Parser)]
#[command(name = "stayvista-cli")]
#[command(about = "StayVista CLI - Administrative tools for StayVista", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a role (guest, host, admin) to a user, creating the user if needed
    SetRole {
        /// Email address of the user
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Role to assign
        #[arg(short = 'r', long)]
        role: Role,
    },
    /// Print a signed session token for a user
    IssueToken {
        /// Email address to embed in the token
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::SetRole { email, role } => handle_set_role(email, role).await,
        Commands::IssueToken { email } => handle_issue_token(email),
    }
}

fn prompt_email(email: Option<String>) -> String {
    email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read email", e))
    })
}

async fn handle_set_role(email: Option<String>, role: Role) {
    let email = prompt_email(email);

    let pool = init_db_pool(&DatabaseConfig::from_env())
        .await
        .unwrap_or_else(|e| fail("Failed to connect to database", e));

    match set_user_role(&pool, &email, role).await {
        Ok(RoleChange::Created) => {
            println!("\n✅ User created");
            println!("   Email: {}", email);
            println!("   Role: {}", role);
        }
        Ok(RoleChange::Updated) => {
            println!("\n✅ Role updated");
            println!("   Email: {}", email);
            println!("   Role: {}", role);
        }
        Err(e) => fail("Error setting role", e),
    }
}

fn handle_issue_token(email: Option<String>) {
    let email = prompt_email(email);
    let jwt_config = JwtConfig::from_env();

    if jwt_config.uses_default_secret() {
        eprintln!("⚠️  ACCESS_TOKEN_SECRET is not set; the token is signed with the development secret");
    }

    match issue_session_token(&Identity::new(email), &jwt_config) {
        Ok(token) => println!("{}", token),
        Err(e) => fail("Error issuing token", e.error),
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}
