use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use moneyconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for moneyconv::AppCommand {
    fn from(cmd: Commands) -> moneyconv::AppCommand {
        match cmd {
            Commands::Rates => moneyconv::AppCommand::Rates,
            Commands::Convert { amount, from, to } => {
                moneyconv::AppCommand::Convert { amount, from, to }
            }
            Commands::SignUp { email, password } => {
                moneyconv::AppCommand::SignUp { email, password }
            }
            Commands::SignIn { email, password } => {
                moneyconv::AppCommand::SignIn { email, password }
            }
            Commands::SignOut => moneyconv::AppCommand::SignOut,
            Commands::ResetPassword { email } => moneyconv::AppCommand::ResetPassword { email },
            Commands::Save { amount, from } => moneyconv::AppCommand::Save { amount, from },
            Commands::Ledger => moneyconv::AppCommand::Ledger,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the exchange-rate table
    Rates,
    /// Convert an amount between two currencies
    Convert {
        amount: String,
        #[arg(short, long, default_value = "EUR")]
        from: String,
        #[arg(short, long, default_value = "USD")]
        to: String,
    },
    /// Create an account and sign in
    SignUp { email: String, password: String },
    /// Sign in with an existing account
    SignIn { email: String, password: String },
    /// Forget the signed-in account
    SignOut,
    /// Request a password reset email
    ResetPassword { email: String },
    /// Save an amount to your ledger in the reference currency
    Save {
        amount: String,
        #[arg(short, long, default_value = "EUR")]
        from: String,
    },
    /// Display the sum of saved amounts
    Ledger,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => moneyconv::cli::setup::setup(),
        Some(cmd) => moneyconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
