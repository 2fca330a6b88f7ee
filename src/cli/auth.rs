use super::ui;
use crate::core::identity::{AuthError, AuthUser, Credentials, IdentityProvider};
use crate::store::SessionStore;
use anyhow::Result;
use tracing::info;

pub async fn sign_up(
    identity: &dyn IdentityProvider,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<String> {
    let credentials = Credentials::new(email, password)?;
    let user = identity.sign_up(&credentials).await?;
    session.set(&user)?;
    info!("Signed up {}", user.email);
    Ok(ui::style_text(
        &format!("Account created, signed in as {}", user.email),
        ui::StyleType::Success,
    ))
}

pub async fn sign_in(
    identity: &dyn IdentityProvider,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<String> {
    let credentials = Credentials::new(email, password)?;
    let user = identity.sign_in(&credentials).await?;
    session.set(&user)?;
    info!("Signed in {}", user.email);
    Ok(ui::style_text(
        &format!("Signed in as {}", user.email),
        ui::StyleType::Success,
    ))
}

pub fn sign_out(session: &SessionStore) -> Result<String> {
    let message = if session.clear()? {
        "Signed out"
    } else {
        "Nobody is signed in"
    };
    Ok(ui::style_text(message, ui::StyleType::Subtle))
}

pub async fn reset_password(identity: &dyn IdentityProvider, email: &str) -> Result<String> {
    identity.reset_password(email).await?;
    Ok(ui::style_text(
        &format!("Password reset email sent to {}", email.trim()),
        ui::StyleType::Success,
    ))
}

/// The signed-in user, or [`AuthError::NotSignedIn`].
pub fn current_user(session: &SessionStore) -> Result<AuthUser> {
    session.current()?.ok_or_else(|| AuthError::NotSignedIn.into())
}
