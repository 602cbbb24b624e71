//! # Command Handlers
//!
//! One `cmd_*` function per CLI verb. Handlers write to the given writer
//! instead of stdout so tests can capture what a user would see.
//!
//! Data commands follow the same shape: build the [`Endpoint`], execute it,
//! then print either the raw body (`--json`) or the resource table.

use crate::api::ObClient;
use crate::error::Error;
use crate::store::ConfigStore;
use obcli_core::views::{self, View};
use obcli_core::{Config, ConfigKey, ConsentRequest, DateRange, Endpoint, MISSING, Table};
use serde_json::Value;
use std::io::Write;
use tracing::info;

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Pretty-print a body; an empty body prints `{}`.
fn write_json(out: &mut impl Write, body: Option<&Value>) -> Result<(), Error> {
    let text = match body {
        Some(value) => serde_json::to_string_pretty(value)?,
        None => String::from("{}"),
    };
    writeln!(out, "{}", text)?;
    Ok(())
}

fn write_view(
    out: &mut impl Write,
    view: &View,
    body: Option<&Value>,
    json: bool,
) -> Result<(), Error> {
    if json {
        return write_json(out, body);
    }
    let rendered = view.render(body.unwrap_or(&Value::Null));
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

async fn fetch(
    client: &ObClient,
    endpoint: Endpoint,
    view: &View,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let body = client.execute(&endpoint).await?;
    write_view(out, view, body.as_ref(), json)
}

// =============================================================================
// CONFIG
// =============================================================================

/// `config set`: update the given keys and persist.
///
/// An unparseable config file is replaced rather than blocking the fix.
pub fn cmd_config_set(
    store: &ConfigStore,
    base_url: Option<&str>,
    access_token: Option<&str>,
    sandbox_id: Option<&str>,
    out: &mut impl Write,
) -> Result<Config, Error> {
    let mut config = store.load_or_default()?;

    let updates = [
        (ConfigKey::BaseUrl, base_url),
        (ConfigKey::AccessToken, access_token),
        (ConfigKey::SandboxId, sandbox_id),
    ];
    for (key, value) in updates {
        if let Some(value) = value {
            config.set(key, value)?;
            info!(key = %key, "config value updated");
        }
    }

    store.save(&config)?;
    writeln!(out, "Configuration saved to {}", store.path().display())?;
    Ok(config)
}

/// `config show`: print the persisted values.
pub fn cmd_config_show(store: &ConfigStore, json: bool, out: &mut impl Write) -> Result<(), Error> {
    let config = store.load()?;

    if json {
        writeln!(out, "{}", config.to_json_pretty()?)?;
        return Ok(());
    }

    let mut table = Table::new(["Key", "Value"]);
    for (key, value) in config.entries() {
        table.push_row(vec![
            key.as_str().to_string(),
            value.unwrap_or(MISSING).to_string(),
        ]);
    }
    out.write_all(table.render().as_bytes())?;
    Ok(())
}

/// `config unset <key>`: clear one key and persist.
pub fn cmd_config_unset(
    store: &ConfigStore,
    key: ConfigKey,
    out: &mut impl Write,
) -> Result<Config, Error> {
    let mut config = store.load_or_default()?;
    config.unset(key);
    store.save(&config)?;
    writeln!(out, "Removed {} from {}", key, store.path().display())?;
    Ok(config)
}

/// `config path`: print where the config lives.
pub fn cmd_config_path(store: &ConfigStore, out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "{}", store.path().display())?;
    Ok(())
}

// =============================================================================
// CONSENTS
// =============================================================================

pub async fn cmd_consents_create(
    client: &ObClient,
    request: &ConsentRequest,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let endpoint = Endpoint::create_consent(request)?;
    fetch(client, endpoint, &views::CONSENT, json, out).await
}

pub async fn cmd_consents_get(
    client: &ObClient,
    consent_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::get_consent(consent_id), &views::CONSENT, json, out).await
}

pub async fn cmd_consents_delete(
    client: &ObClient,
    consent_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let body = client.execute(&Endpoint::delete_consent(consent_id)).await?;
    if json {
        return write_json(out, body.as_ref());
    }
    writeln!(out, "Consent {} deleted", consent_id)?;
    Ok(())
}

// =============================================================================
// ACCOUNTS, BALANCES, TRANSACTIONS
// =============================================================================

pub async fn cmd_accounts_list(
    client: &ObClient,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::accounts(), &views::ACCOUNT, json, out).await
}

pub async fn cmd_accounts_get(
    client: &ObClient,
    account_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::account(account_id), &views::ACCOUNT, json, out).await
}

pub async fn cmd_balances_get(
    client: &ObClient,
    account_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::account_balances(account_id), &views::BALANCE, json, out).await
}

pub async fn cmd_balances_list(
    client: &ObClient,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::balances(), &views::BALANCE, json, out).await
}

pub async fn cmd_transactions_get(
    client: &ObClient,
    account_id: &str,
    range: &DateRange,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let endpoint = Endpoint::account_transactions(account_id, range);
    fetch(client, endpoint, &views::TRANSACTION, json, out).await
}

pub async fn cmd_transactions_list(
    client: &ObClient,
    range: &DateRange,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::transactions(range), &views::TRANSACTION, json, out).await
}

// =============================================================================
// PER-ACCOUNT RESOURCES
// =============================================================================

pub async fn cmd_beneficiaries_get(
    client: &ObClient,
    account_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::beneficiaries(account_id), &views::BENEFICIARY, json, out).await
}

pub async fn cmd_standing_orders_get(
    client: &ObClient,
    account_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let endpoint = Endpoint::standing_orders(account_id);
    fetch(client, endpoint, &views::STANDING_ORDER, json, out).await
}

pub async fn cmd_scheduled_payments_get(
    client: &ObClient,
    account_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let endpoint = Endpoint::scheduled_payments(account_id);
    fetch(client, endpoint, &views::SCHEDULED_PAYMENT, json, out).await
}

pub async fn cmd_statements_get(
    client: &ObClient,
    account_id: &str,
    range: &DateRange,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::statements(account_id, range), &views::STATEMENT, json, out).await
}

pub async fn cmd_party_get(
    client: &ObClient,
    account_id: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    fetch(client, Endpoint::party(account_id), &views::PARTY, json, out).await
}

// =============================================================================
// SANDBOX
// =============================================================================

/// `sandbox create <id>`: create the sandbox, then remember its id.
pub async fn cmd_sandbox_create(
    client: &ObClient,
    store: &ConfigStore,
    sandbox_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let body = client.execute(&Endpoint::create_sandbox(sandbox_id)).await?;

    let mut config = store.load()?;
    config.set(ConfigKey::SandboxId, sandbox_id)?;
    store.save(&config)?;
    info!(sandbox_id, "sandbox id stored in config");

    if json {
        return write_json(out, body.as_ref());
    }
    writeln!(out, "Sandbox {} created", sandbox_id)?;
    Ok(())
}
