pub mod cli;
pub mod core;
pub mod store;

pub use crate::core::config;

use crate::cli::ui;
use crate::config::AppConfig;
use crate::core::identity::{AuthError, IdentityProvider};
use crate::core::input::InputError;
use crate::core::ledger::LedgerClient;
use crate::core::Normalizer;
use crate::store::{SessionStore, Store};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates,
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    SignUp {
        email: String,
        password: String,
    },
    SignIn {
        email: String,
        password: String,
    },
    SignOut,
    ResetPassword {
        email: String,
    },
    Save {
        amount: String,
        from: String,
    },
    Ledger,
}

/// Everything a command needs: the converter configuration and the local
/// ledger, identity and session stores.
pub struct App {
    normalizer: Normalizer,
    ledger: Arc<dyn LedgerClient>,
    identity: Box<dyn IdentityProvider>,
    session: SessionStore,
}

impl App {
    pub fn open(config: &AppConfig) -> Result<Self> {
        let normalizer = config.normalizer()?;
        let data_path = config.default_data_path()?;
        let store = Store::open(&data_path)?;
        debug!("Using data path {}", data_path.display());

        Ok(Self {
            normalizer,
            ledger: Arc::new(store.ledger()?),
            identity: Box::new(store.identity()?),
            session: store.session()?,
        })
    }

    pub fn ledger(&self) -> Arc<dyn LedgerClient> {
        Arc::clone(&self.ledger)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Runs `command` and returns what should be shown to the user.
    ///
    /// Input, authentication and sign-in errors are rendered as a message
    /// instead of being returned.
    pub async fn execute(&self, command: AppCommand) -> Result<String> {
        recover(self.dispatch(command).await)
    }

    async fn dispatch(&self, command: AppCommand) -> Result<String> {
        match command {
            AppCommand::Rates => Ok(cli::convert::display_rates(
                self.normalizer.converter().rates(),
            )),
            AppCommand::Convert { amount, from, to } => {
                cli::convert::run(self.normalizer.converter(), &amount, &from, &to)
            }
            AppCommand::SignUp { email, password } => {
                cli::auth::sign_up(self.identity.as_ref(), &self.session, &email, &password).await
            }
            AppCommand::SignIn { email, password } => {
                cli::auth::sign_in(self.identity.as_ref(), &self.session, &email, &password).await
            }
            AppCommand::SignOut => cli::auth::sign_out(&self.session),
            AppCommand::ResetPassword { email } => {
                cli::auth::reset_password(self.identity.as_ref(), &email).await
            }
            AppCommand::Save { amount, from } => {
                let user = cli::auth::current_user(&self.session)?;
                cli::ledger::save(&self.normalizer, self.ledger.as_ref(), &user, &amount, &from)
                    .await
            }
            AppCommand::Ledger => {
                let user = cli::auth::current_user(&self.session)?;
                cli::ledger::show(self.ledger(), &user, self.normalizer.reference()).await
            }
        }
    }
}

fn recover(result: Result<String>) -> Result<String> {
    match result {
        Err(e) if e.is::<AuthError>() || e.is::<InputError>() => {
            warn!("{}", e);
            Ok(ui::style_text(&e.to_string(), ui::StyleType::Error))
        }
        other => other,
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("moneyconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let app = App::open(&config)?;
    let output = app.execute(command).await?;
    println!("{output}");
    Ok(())
}
