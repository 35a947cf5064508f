//! CLI administration tool for devcamper-api.
//!
//! Manages user accounts and checks the database without going through the
//! HTTP API. This is the only way to create an `admin` account.
//!
//! # Usage
//!
//! ```bash
//! # Create an account interactively
//! cargo run --bin admin -- user create
//!
//! # Create an admin without prompts, generating the password
//! cargo run --bin admin -- user create -n "Site Admin" -e admin@example.com -r admin --generate-password -y
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Change a role
//! cargo run --bin admin -- user role john@gmail.com publisher
//!
//! # Check database connection / show row counts
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db info
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BCRYPT_COST` (optional): password hashing cost, default 10

use devcamper_api::application::services::{AdvancedResults, NewAccount, UserService};
use devcamper_api::config::DEFAULT_BCRYPT_COST;
use devcamper_api::domain::entities::{UpdateUser, User};
use devcamper_api::domain::identity::Role;
use devcamper_api::domain::pagination::{PageRequest, PagingDefaults};
use devcamper_api::domain::query::QueryDescriptor;
use devcamper_api::state::Repositories;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password, Select};
use sqlx::PgPool;
use std::sync::Arc;

/// Accounts shown per `user list` page.
const LIST_LIMIT: u32 = 100;

/// CLI tool for managing devcamper-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account with any role
    Create {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// user, publisher or admin
        #[arg(short, long)]
        role: Option<Role>,

        /// Generate a random password instead of prompting for one
        #[arg(long)]
        generate_password: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List accounts, newest first
    List {
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Change the role of the account with this email
    Role { email: String, role: Role },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show row counts per table
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> UserService {
    let repos = Repositories::postgres(Arc::new(pool.clone()));
    let results = Arc::new(AdvancedResults::new(
        repos.bootcamps,
        repos.courses,
        repos.users.clone(),
    ));
    let cost = std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_BCRYPT_COST);

    UserService::new(repos.users, results, cost)
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = user_service(pool);

    match action {
        UserAction::Create {
            name,
            email,
            role,
            generate_password,
            yes,
        } => create_user(&service, name, email, role, generate_password, yes).await,
        UserAction::List { page } => list_users(&service, page).await,
        UserAction::Role { email, role } => change_role(&service, &email, role).await,
    }
}

/// Creates an account with interactive prompts for anything not passed as
/// a flag. A generated password is printed once.
async fn create_user(
    service: &UserService,
    name: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    generate_password: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create account".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let role = match role {
        Some(r) => r,
        None => {
            let labels: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
            let index = Select::new()
                .with_prompt("Role")
                .items(&labels)
                .default(0)
                .interact()?;
            Role::ALL[index]
        }
    };

    let password = if generate_password {
        let generated = generate_password_value();
        println!("{}", "✨ Generated password".green());
        generated
    } else {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .validate_with(|p: &String| {
                if p.len() >= 6 {
                    Ok(())
                } else {
                    Err("Password must be at least 6 characters")
                }
            })
            .interact()?
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Name:  {}", name.cyan());
    println!("  Email: {}", email.cyan());
    println!("  Role:  {}", role_label(role));
    if generate_password {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  Save this password now! It is stored only as a hash."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .create(NewAccount {
            name,
            email,
            password,
            role,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {e}"))?;

    println!(
        "{} (id {})",
        "✅ Account created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists accounts.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID    Name                      Email                          Role       Created
///   ───────────────────────────────────────────────────────────────────────────────────
///   1     John Doe                  john@gmail.com                 publisher  2024-01-15 10:30
/// ```
async fn list_users(service: &UserService, page: u32) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let paging = PagingDefaults {
        default_limit: LIST_LIMIT,
        max_limit: LIST_LIMIT,
    };
    let query = QueryDescriptor::<User>::new(paging).with_page(PageRequest::new(page, LIST_LIMIT));
    let result = service
        .list(&query)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {e}"))?;

    if result.items.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<25} {:<30} {:<10} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(88).bright_black());

    for user in &result.items {
        let field = |key: &str| user.get(key).and_then(|v| v.as_str()).unwrap_or_default().to_string();
        let created = field("createdAt");

        println!(
            "  {:<5} {:<25} {:<30} {:<10} {}",
            user.get("id").map(ToString::to_string).unwrap_or_default().bright_black(),
            field("name").cyan(),
            field("email"),
            field("role"),
            created.get(..16).unwrap_or(&created).replace('T', " ").bright_black()
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        result.items.len().to_string().bright_white().bold(),
        result.total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn change_role(service: &UserService, email: &str, role: Role) -> Result<()> {
    let user = service
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if user.role == role {
        println!("{} already has role {}", user.email.cyan(), role_label(role));
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Change {} from {} to {}?",
            user.email,
            user.role,
            role
        ))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    service
        .update(
            user.id,
            UpdateUser {
                role: Some(role),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update role: {e}"))?;

    println!("{}", "✅ Role updated".green().bold());
    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("  PostgreSQL: {}", version.bright_white());
            println!();

            for table in ["bootcamps", "courses", "reviews", "users"] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;
                println!(
                    "  {:<10} {}",
                    table,
                    count.to_string().bright_green().bold()
                );
            }
            println!();
        }
    }

    Ok(())
}

fn role_label(role: Role) -> ColoredString {
    match role {
        Role::Admin => role.as_str().red().bold(),
        Role::Publisher => role.as_str().yellow(),
        Role::User => role.as_str().normal(),
    }
}

/// Generates a random 20-character alphanumeric password.
fn generate_password_value() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
