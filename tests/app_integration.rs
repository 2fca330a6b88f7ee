use moneyconv::config::AppConfig;
use moneyconv::core::ledger::LedgerPath;
use moneyconv::{App, AppCommand};
use std::fs;
use tracing::info;

mod test_utils {
    use moneyconv::config::AppConfig;
    use tempfile::TempDir;

    pub fn config_in(dir: &TempDir) -> AppConfig {
        AppConfig {
            data_path: Some(dir.path().join("data").to_string_lossy().into_owned()),
            ..AppConfig::default()
        }
    }

    pub fn sign_up(email: &str, password: &str) -> moneyconv::AppCommand {
        moneyconv::AppCommand::SignUp {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn save(amount: &str, from: &str) -> moneyconv::AppCommand {
        moneyconv::AppCommand::Save {
            amount: amount.to_string(),
            from: from.to_string(),
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_sign_up_save_and_show_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::open(&test_utils::config_in(&dir)).unwrap();

    let output = app
        .execute(test_utils::sign_up("alice@example.com", "hunter22"))
        .await
        .unwrap();
    info!(?output, "Signed up");
    assert!(output.contains("alice@example.com"));

    let saved = app.execute(test_utils::save("100", "USD")).await.unwrap();
    assert!(saved.contains("Saved 93.00 EUR"));
    app.execute(test_utils::save("7", "EUR")).await.unwrap();

    let user = app.session().current().unwrap().expect("signed in");
    let path = LedgerPath::for_user(&user.uid);
    let ledger = app.ledger();
    let mut sub = moneyconv::core::LedgerSubscription::new(ledger, path);
    sub.start();
    assert_eq!(sub.state().totals.count, 2);
    assert!((sub.state().totals.total - 100.0).abs() < 1e-9);
    sub.stop();

    let summary = app.execute(AppCommand::Ledger).await.unwrap();
    assert!(summary.contains("100.00"));
    assert!(summary.contains("2 expenses recorded"));
}

#[test_log::test(tokio::test)]
async fn test_ledger_requires_sign_in() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::open(&test_utils::config_in(&dir)).unwrap();

    let output = app.execute(test_utils::save("10", "EUR")).await.unwrap();
    assert!(output.contains("Not signed in"));

    let output = app.execute(AppCommand::Ledger).await.unwrap();
    assert!(output.contains("Not signed in"));
}

#[test_log::test(tokio::test)]
async fn test_auth_errors_are_reported_not_returned() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::open(&test_utils::config_in(&dir)).unwrap();

    let weak = app
        .execute(test_utils::sign_up("bob@example.com", "12345"))
        .await
        .unwrap();
    assert!(weak.contains("Password too weak"));

    let blank = app.execute(test_utils::sign_up("", "")).await.unwrap();
    assert!(blank.contains("Please fill in all fields"));

    app.execute(test_utils::sign_up("bob@example.com", "123456"))
        .await
        .unwrap();
    let duplicate = app
        .execute(test_utils::sign_up("bob@example.com", "654321"))
        .await
        .unwrap();
    assert!(duplicate.contains("already in use"));

    app.execute(AppCommand::SignOut).await.unwrap();
    let wrong = app
        .execute(AppCommand::SignIn {
            email: "bob@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .unwrap();
    assert!(wrong.contains("Incorrect email or password"));
    assert!(app.session().current().unwrap().is_none());

    let reset = app
        .execute(AppCommand::ResetPassword {
            email: "bob@example.com".to_string(),
        })
        .await
        .unwrap();
    assert!(reset.contains("Password reset email sent"));

    let blank_reset = app
        .execute(AppCommand::ResetPassword {
            email: " ".to_string(),
        })
        .await
        .unwrap();
    assert!(blank_reset.contains("Please enter your email"));
}

#[test_log::test(tokio::test)]
async fn test_ledgers_are_separate_per_user() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::open(&test_utils::config_in(&dir)).unwrap();

    app.execute(test_utils::sign_up("alice@example.com", "hunter22"))
        .await
        .unwrap();
    app.execute(test_utils::save("50", "EUR")).await.unwrap();

    app.execute(test_utils::sign_up("carol@example.com", "hunter22"))
        .await
        .unwrap();
    let summary = app.execute(AppCommand::Ledger).await.unwrap();
    assert!(summary.contains("(No data)"));

    app.execute(AppCommand::SignIn {
        email: "alice@example.com".to_string(),
        password: "hunter22".to_string(),
    })
    .await
    .unwrap();
    let summary = app.execute(AppCommand::Ledger).await.unwrap();
    assert!(summary.contains("50.00"));
    assert!(summary.contains("1 expenses recorded"));
}

#[test_log::test(tokio::test)]
async fn test_convert_with_config_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    let config_content = format!(
        r#"
        reference_currency: "EUR"
        rates:
          EUR-USD: 1.25
        data_path: "{}"
    "#,
        dir.path().join("data").display()
    );
    fs::write(&config_path, &config_content).expect("Failed to write config file");

    let config = AppConfig::load_from_path(&config_path).unwrap();
    let normalizer = config.normalizer().unwrap();
    let output =
        moneyconv::cli::convert::run(normalizer.converter(), "100", "EUR", "USD").unwrap();
    assert!(output.contains("100.00 EUR = 125.00 USD"));
    assert!(output.contains("Rate: 1 EUR = 1.2500 USD"));

    let result = moneyconv::run_command(AppCommand::Rates, config_path.to_str()).await;
    assert!(
        result.is_ok(),
        "run_command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_run_command_with_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let result = moneyconv::run_command(AppCommand::Rates, missing.to_str()).await;
    assert!(result.is_err());
}
