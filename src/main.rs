//! Terminal front end for the login flow.
//!
//! # Usage
//!
//! ```bash
//! # Interactive login page
//! cargo run -- login
//!
//! # Pre-fill the identifier
//! cargo run -- login --identifier user@example.com
//!
//! # One-shot submission for scripts (notices go to the log)
//! cargo run -- submit --identifier user@example.com --password secret1
//!
//! # Validate values without logging in
//! cargo run -- check --identifier 555-123-4567 --password secret1 --json
//!
//! # Show the route table
//! cargo run -- routes
//! ```
//!
//! # Environment Variables
//!
//! See [`login_gate::config`]. Logs go to stderr so they do not interleave
//! with the prompts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use login_gate::application::services::{
    AuthContext, SubmissionController, SubmitOutcome, validate,
};
use login_gate::config::{self, Config};
use login_gate::domain::entities::{Credentials, Field, FieldErrors};
use login_gate::domain::ports::{Notice, Notifier};
use login_gate::infrastructure::auth::SimulatedAuthenticator;
use login_gate::infrastructure::notify::TracingNotifier;
use login_gate::routes::{Navigation, Route, RouteGuard};

/// Login page and form tools.
#[derive(Parser)]
#[command(name = "login-gate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive login page
    Login {
        /// Pre-filled mobile number or email
        #[arg(short, long)]
        identifier: Option<String>,
    },

    /// Submit once without prompts
    Submit {
        /// Mobile number or email
        #[arg(short, long)]
        identifier: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Validate field values without logging in
    Check {
        /// Mobile number or email
        #[arg(short, long, default_value = "")]
        identifier: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Print the error mapping as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the route table
    Routes,
}

/// Prints notices in color on stdout.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        let message = notice.message();
        match notice {
            Notice::LoggingIn => println!("{}", message.bright_blue()),
            Notice::LoginSucceeded { .. } => println!("{}", message.green().bold()),
            Notice::LoginFailed => println!("{}", message.red().bold()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    init_tracing(&config)?;
    config.print_summary();

    match cli.command {
        Commands::Login { identifier } => run_login(&config, identifier).await?,
        Commands::Submit {
            identifier,
            password,
        } => run_submit(&config, identifier, password).await?,
        Commands::Check {
            identifier,
            password,
            json,
        } => run_check(identifier, password, json)?,
        Commands::Routes => print_routes(),
    }

    Ok(())
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

/// Runs the login page until the user is authenticated or gives up.
///
/// # Flow
///
/// 1. Prompt for every field that is empty or has an error
/// 2. Submit; on validation errors show them and re-prompt only those fields
/// 3. On failure offer a retry with the identifier kept
/// 4. On success follow the route guard into the authenticated area
/// 5. Tear the auth context down on exit
async fn run_login(config: &Config, identifier: Option<String>) -> Result<()> {
    let session = Arc::new(AuthContext::new());
    let authenticator = Arc::new(SimulatedAuthenticator::new(
        config.simulated_latency(),
        config.simulated_outcome,
    ));
    let controller = SubmissionController::new(
        authenticator,
        Arc::new(TerminalNotifier),
        Arc::clone(&session),
        config.attempt_timeout(),
    );

    // The router reacts to session changes on its own.
    let mut router = RouteGuard::new(session.reader());
    let router_task = tokio::spawn(async move {
        let mut current = Route::Login;
        while let Some(navigation) = router.follow(current).await {
            if let Navigation::Redirect(target) = navigation {
                tracing::info!(from = %current, to = %target, "Router redirect");
                current = target;
            }
        }
    });

    println!();
    println!("{}", "Log in".bright_white().bold());
    println!("{}", "You must log in to continue.".yellow());
    println!();

    let mut pending: Vec<Field> = Field::ALL.to_vec();
    if let Some(identifier) = identifier {
        controller.set_field(Field::Identifier, identifier);
        pending.retain(|field| *field != Field::Identifier);
    }

    loop {
        for field in &pending {
            controller.set_field(*field, prompt(*field)?);
        }

        println!("[ {} ]", controller.state().button_label().bright_white());

        match controller.submit().await {
            SubmitOutcome::Invalid(errors) => {
                print_errors(&errors);
                pending = errors.iter().map(|(field, _)| field).collect();
            }
            SubmitOutcome::Succeeded { identity, redirect } => {
                let page = RouteGuard::new(session.reader()).resolve(redirect);
                println!();
                println!(
                    "{} {}",
                    page.target().title().bright_white().bold(),
                    page.target().path().dimmed()
                );
                println!("  Signed in as {}", identity.to_string().cyan());
                break;
            }
            SubmitOutcome::Failed(_) => {
                let retry = Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    break;
                }
                pending = vec![Field::Password];
            }
            SubmitOutcome::Ignored => {}
        }
    }

    drop(controller);
    match Arc::try_unwrap(session) {
        Ok(context) => context.shutdown(),
        Err(_) => tracing::warn!("Auth context still shared at exit"),
    }
    router_task.await?;

    Ok(())
}

/// Submits the given values once. Notices go to the log instead of the
/// terminal, and any outcome other than success is an error.
async fn run_submit(config: &Config, identifier: String, password: String) -> Result<()> {
    let session = Arc::new(AuthContext::new());
    let controller = SubmissionController::new(
        Arc::new(SimulatedAuthenticator::new(
            config.simulated_latency(),
            config.simulated_outcome,
        )),
        Arc::new(TracingNotifier),
        Arc::clone(&session),
        config.attempt_timeout(),
    );
    controller.set_field(Field::Identifier, identifier);
    controller.set_field(Field::Password, password);

    match controller.submit().await {
        SubmitOutcome::Succeeded { identity, redirect } => {
            println!("{} {}", "✓ Logged in, continue at".green(), redirect.path().cyan());
            println!("  Identity: {}", identity);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            print_errors(&errors);
            anyhow::bail!("Form is invalid")
        }
        SubmitOutcome::Failed(reason) => anyhow::bail!("Login failed: {}", reason),
        SubmitOutcome::Ignored => anyhow::bail!("Submission ignored"),
    }
}

fn prompt(field: Field) -> Result<String> {
    let value = match field {
        Field::Identifier => Input::<String>::new()
            .with_prompt("Mobile number or email")
            .allow_empty(true)
            .interact_text()?,
        Field::Password => Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };
    Ok(value)
}

fn run_check(identifier: String, password: Option<String>, json: bool) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };

    let errors = validate(&Credentials::new(identifier, password));

    if json {
        println!("{}", serde_json::to_string_pretty(&errors)?);
    } else if errors.is_empty() {
        println!("{}", "✓ Form is valid".green());
    } else {
        print_errors(&errors);
    }

    Ok(())
}

fn print_errors(errors: &FieldErrors) {
    for (field, error) in errors.iter() {
        println!(
            "  {} {}: {}",
            "✗".red(),
            field.name().bright_white(),
            error.message(field).red()
        );
    }
}

fn print_routes() {
    println!("{}", "Routes:".bright_white().bold());
    for route in Route::ALL {
        let access = if route.requires_auth() {
            "session required".yellow()
        } else {
            "public".green()
        };
        println!("  {:<12} {:<10} {}", route.path().cyan(), route.title(), access);
    }
}
