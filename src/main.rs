
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use spas_session::config::{ClientConfig, ConfigError};
use spas_session::net::api::{AuthError, HttpAuthApi};
use spas_session::net::types::{Identity, RegisterRequest, Role};
use spas_session::pages::login::LoginPage;
use spas_session::pages::register::RegisterPage;
use spas_session::services::auth::AuthGateway;
use spas_session::state::session::{SessionState, SessionStore};
use spas_session::util::guard::redirect_for;
use spas_session::util::routing::{Area, Navigator};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Rejected(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "spas-session", about = "Spa booking session client")]
struct Cli {
    /// Backend API root; overrides `SPAS_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the backend reports an active session.
    Status {
        /// Also evaluate access to an area (admin, client, user).
        #[arg(long)]
        require: Option<Area>,
    },
    Login(LoginArgs),
    Register(RegisterArgs),
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "SPAS_PASSWORD", hide_env_values = true)]
    password: String,

    /// Log out again once signed in.
    #[arg(long, default_value_t = false)]
    logout: bool,
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "SPAS_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long)]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "user")]
    role: Role,

    /// Log out again once registered.
    #[arg(long, default_value_t = false)]
    logout: bool,
}

struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, path: &str) {
        println!("navigate: {path}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    tracing::debug!(base_url = %config.base_url, "using backend");

    let store = SessionStore::new();
    let mut transitions = store.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(state) = transitions.next().await {
            print_transition(&state);
        }
    });

    let api = Arc::new(HttpAuthApi::new(&config)?);
    let gateway = AuthGateway::connect(api, store.clone()).await;
    drop(store);

    let outcome = match cli.command {
        Command::Status { require } => run_status(&gateway, require),
        Command::Login(args) => run_login(&gateway, args).await,
        Command::Register(args) => run_register(&gateway, args).await,
    };

    // Printer drains remaining transitions once the last store handle is gone.
    drop(gateway);
    finish_printer(printer).await;
    outcome
}

/// Wait for the transition printer; returns false if it panicked or was aborted.
async fn finish_printer(printer: tokio::task::JoinHandle<()>) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "transition printer did not finish cleanly");
            false
        }
    }
}

fn run_status(gateway: &AuthGateway, require: Option<Area>) -> Result<(), CliError> {
    let state = gateway.store().current_state();
    match state.identity() {
        Some(identity) => print_identity(identity)?,
        None => println!("no session"),
    }
    if let Some(area) = require {
        match redirect_for(&state, area) {
            None => println!("access to {area}: allowed"),
            Some(target) => println!("access to {area}: redirect to {target}"),
        }
    }
    Ok(())
}

async fn run_login(gateway: &AuthGateway, args: LoginArgs) -> Result<(), CliError> {
    let page = LoginPage::new(gateway.clone(), Arc::new(StdoutNavigator));
    if page.submit(&args.email, &args.password).await.is_none() {
        return Err(CliError::Rejected(page.status().error));
    }
    if let Some(identity) = gateway.store().current_identity() {
        print_identity(&identity)?;
    }
    if args.logout {
        gateway.logout().await?;
    }
    Ok(())
}

async fn run_register(gateway: &AuthGateway, args: RegisterArgs) -> Result<(), CliError> {
    let page = RegisterPage::new(gateway.clone(), Arc::new(StdoutNavigator));
    let details = RegisterRequest {
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
        role: args.role,
    };
    if page.submit(details).await.is_none() {
        return Err(CliError::Rejected(page.status().error));
    }
    if let Some(identity) = gateway.store().current_identity() {
        print_identity(&identity)?;
    }
    if args.logout {
        gateway.logout().await?;
    }
    Ok(())
}

fn print_identity(identity: &Identity) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(identity)?);
    Ok(())
}

fn print_transition(state: &SessionState) {
    match state {
        SessionState::Authenticated(identity) => {
            println!("session: {} <{}> as {}", identity.display_name(), identity.email, identity.role);
        }
        SessionState::Unauthenticated => println!("session: none"),
    }
}
