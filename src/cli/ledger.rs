use super::ui;
use crate::core::aggregate::format_amount;
use crate::core::currency::CurrencyCode;
use crate::core::identity::AuthUser;
use crate::core::input::parse_amount;
use crate::core::ledger::{LedgerClient, LedgerPath};
use crate::core::{LedgerState, LedgerSubscription, Normalizer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Normalizes `amount` to the reference currency and appends it to the
/// user's ledger as a two-decimal string.
pub async fn save(
    normalizer: &Normalizer,
    ledger: &dyn LedgerClient,
    user: &AuthUser,
    amount: &str,
    from: &str,
) -> Result<String> {
    let amount = parse_amount(amount)?;
    let from: CurrencyCode = from.parse()?;
    let normalized = format_amount(normalizer.to_reference(amount, from));
    let path = LedgerPath::for_user(&user.uid);

    let key = ledger.append(&path, normalized.clone()).await?;
    info!("Saved {} under {}/{}", normalized, path, key);

    Ok(ui::style_text(
        &format!(
            "Saved {normalized} {} ({} {from})",
            normalizer.reference(),
            format_amount(amount)
        ),
        ui::StyleType::Success,
    ))
}

/// Subscribes to the user's ledger for one delivery and renders the totals.
pub async fn show(
    ledger: Arc<dyn LedgerClient>,
    user: &AuthUser,
    reference: CurrencyCode,
) -> Result<String> {
    let mut subscription = LedgerSubscription::new(ledger, LedgerPath::for_user(&user.uid));
    let mut updates = subscription.watch();
    subscription.start();
    let state = updates
        .wait_for(|state| state.loaded)
        .await
        .context("Ledger feed closed")?
        .clone();
    subscription.stop();
    Ok(display(&state, reference))
}

pub fn display(state: &LedgerState, reference: CurrencyCode) -> String {
    let mut output = String::new();
    if let Some(error) = &state.error {
        output.push_str(&ui::style_text(error, ui::StyleType::Error));
        output.push_str("\n\n");
    }

    output.push_str(&ui::style_text(
        &format!("Sum of expenses ({reference}):"),
        ui::StyleType::TotalLabel,
    ));
    output.push('\n');
    if state.totals.count > 0 {
        output.push_str(&ui::style_text(
            &format_amount(state.totals.total),
            ui::StyleType::TotalValue,
        ));
    } else {
        output.push_str(&ui::style_text("(No data)", ui::StyleType::Subtle));
    }
    output.push('\n');
    output.push_str(&ui::style_text(
        &format!("{} expenses recorded", state.totals.count),
        ui::StyleType::Subtle,
    ));
    output
}
