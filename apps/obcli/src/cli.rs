//! # CLI
//!
//! Argument definitions and dispatch.
//!
//! ```bash
//! obcli config set --access-token "$TOKEN" --sandbox-id my-sandbox
//! obcli consents create --permission ReadAccountsBasic,ReadBalances
//! obcli accounts list
//! obcli transactions get 22289 --from 2024-01-01T00:00:00 --json
//! ```

use crate::api::ObClient;
use crate::commands::*;
use crate::error::Error;
use crate::store::ConfigStore;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use obcli_core::{ConfigKey, ConsentRequest, DateRange};
use std::io::Write;
use std::path::PathBuf;

/// Command-line client for the NBG Open Banking (UK v3.1) API
#[derive(Debug, Parser)]
#[command(name = "obcli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print the raw API response as pretty JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or change the persisted configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(flatten)]
    Api(ApiCommand),
}

/// Commands that call the API.
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Account access consents
    Consents {
        #[command(subcommand)]
        action: ConsentsAction,
    },
    /// Accounts the consent grants access to
    Accounts {
        #[command(subcommand)]
        action: AccountsAction,
    },
    /// Account balances
    Balances {
        #[command(subcommand)]
        action: BalancesAction,
    },
    /// Booked and pending transactions
    Transactions {
        #[command(subcommand)]
        action: TransactionsAction,
    },
    /// Trusted beneficiaries of an account
    Beneficiaries {
        #[command(subcommand)]
        action: AccountResourceAction,
    },
    /// Standing orders of an account
    StandingOrders {
        #[command(subcommand)]
        action: AccountResourceAction,
    },
    /// Scheduled payments of an account
    ScheduledPayments {
        #[command(subcommand)]
        action: AccountResourceAction,
    },
    /// Account statements
    Statements {
        #[command(subcommand)]
        action: StatementsAction,
    },
    /// Party (account holder) information
    Party {
        #[command(subcommand)]
        action: PartyAction,
    },
    /// Sandbox environments
    Sandbox {
        #[command(subcommand)]
        action: SandboxAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Set one or more configuration values
    #[command(group(
        ArgGroup::new("values")
            .required(true)
            .multiple(true)
            .args(["base_url", "access_token", "sandbox_id"])
    ))]
    Set {
        /// API root, e.g. https://apis.nbg.gr/uk/v3_1
        #[arg(long)]
        base_url: Option<String>,
        /// Bearer token obtained from the OAuth flow
        #[arg(long)]
        access_token: Option<String>,
        /// Sandbox id sent as the sandbox-id header
        #[arg(long)]
        sandbox_id: Option<String>,
    },
    /// Show the configured values
    Show,
    /// Remove a configuration value
    Unset {
        /// baseUrl, accessToken or sandboxId
        #[arg(value_parser = parse_config_key)]
        key: ConfigKey,
    },
    /// Print the config file location
    Path,
}

#[derive(Debug, Subcommand)]
pub enum ConsentsAction {
    /// Create an account access consent
    Create {
        /// Permission to request (repeatable or comma-separated); defaults to all
        #[arg(long = "permission", value_name = "PERMISSION", value_delimiter = ',')]
        permissions: Vec<String>,
        /// When the consent expires (ISO 8601)
        #[arg(long)]
        expiration_date_time: Option<String>,
        /// Earliest transaction date the consent covers (ISO 8601)
        #[arg(long)]
        transaction_from_date_time: Option<String>,
        /// Latest transaction date the consent covers (ISO 8601)
        #[arg(long)]
        transaction_to_date_time: Option<String>,
    },
    /// Show a consent
    Get { consent_id: String },
    /// Delete a consent
    Delete { consent_id: String },
}

#[derive(Debug, Subcommand)]
pub enum AccountsAction {
    /// List all accounts
    List,
    /// Show one account
    Get { account_id: String },
}

#[derive(Debug, Subcommand)]
pub enum BalancesAction {
    /// Balances of one account
    Get { account_id: String },
    /// Balances of all accounts
    List,
}

/// Optional booking/statement date bounds.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// Lower bound (ISO 8601)
    #[arg(long)]
    pub from: Option<String>,
    /// Upper bound (ISO 8601)
    #[arg(long)]
    pub to: Option<String>,
}

impl From<RangeArgs> for DateRange {
    fn from(args: RangeArgs) -> Self {
        DateRange::new(args.from, args.to)
    }
}

#[derive(Debug, Subcommand)]
pub enum TransactionsAction {
    /// Transactions of one account
    Get {
        account_id: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Transactions of all accounts
    List {
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccountResourceAction {
    /// Fetch for one account
    Get { account_id: String },
}

#[derive(Debug, Subcommand)]
pub enum StatementsAction {
    /// Statements of one account
    Get {
        account_id: String,
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum PartyAction {
    /// Party of an account, or of the logged-in user when no account is given
    Get { account_id: Option<String> },
}

#[derive(Debug, Subcommand)]
pub enum SandboxAction {
    /// Create a sandbox and store its id in the config
    Create { sandbox_id: String },
}

fn parse_config_key(s: &str) -> Result<ConfigKey, String> {
    s.parse().map_err(|e: obcli_core::Error| e.to_string())
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Execute a parsed command line, writing user-facing output to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<(), Error> {
    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::at_default_location(),
    };

    // Config commands never build a client, so a bad token or URL can't block them.
    match cli.command {
        Commands::Config { action } => run_config(&store, action, cli.json, out),
        Commands::Api(command) => run_api(&store, command, cli.json, out).await,
    }
}

async fn run_api(
    store: &ConfigStore,
    command: ApiCommand,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let mut config = store.load()?;
    config.apply_env(|name| std::env::var(name).ok())?;
    let client = ObClient::new(&config)?;

    match command {
        ApiCommand::Consents { action } => match action {
            ConsentsAction::Create {
                permissions,
                expiration_date_time,
                transaction_from_date_time,
                transaction_to_date_time,
            } => {
                let mut request = ConsentRequest {
                    expiration_date_time,
                    transaction_from_date_time,
                    transaction_to_date_time,
                    ..ConsentRequest::default()
                };
                if !permissions.is_empty() {
                    request.permissions = permissions;
                }
                cmd_consents_create(&client, &request, json, out).await
            }
            ConsentsAction::Get { consent_id } => {
                cmd_consents_get(&client, &consent_id, json, out).await
            }
            ConsentsAction::Delete { consent_id } => {
                cmd_consents_delete(&client, &consent_id, json, out).await
            }
        },

        ApiCommand::Accounts { action } => match action {
            AccountsAction::List => cmd_accounts_list(&client, json, out).await,
            AccountsAction::Get { account_id } => {
                cmd_accounts_get(&client, &account_id, json, out).await
            }
        },

        ApiCommand::Balances { action } => match action {
            BalancesAction::Get { account_id } => {
                cmd_balances_get(&client, &account_id, json, out).await
            }
            BalancesAction::List => cmd_balances_list(&client, json, out).await,
        },

        ApiCommand::Transactions { action } => match action {
            TransactionsAction::Get { account_id, range } => {
                cmd_transactions_get(&client, &account_id, &range.into(), json, out).await
            }
            TransactionsAction::List { range } => {
                cmd_transactions_list(&client, &range.into(), json, out).await
            }
        },

        ApiCommand::Beneficiaries {
            action: AccountResourceAction::Get { account_id },
        } => cmd_beneficiaries_get(&client, &account_id, json, out).await,

        ApiCommand::StandingOrders {
            action: AccountResourceAction::Get { account_id },
        } => cmd_standing_orders_get(&client, &account_id, json, out).await,

        ApiCommand::ScheduledPayments {
            action: AccountResourceAction::Get { account_id },
        } => cmd_scheduled_payments_get(&client, &account_id, json, out).await,

        ApiCommand::Statements {
            action: StatementsAction::Get { account_id, range },
        } => cmd_statements_get(&client, &account_id, &range.into(), json, out).await,

        ApiCommand::Party {
            action: PartyAction::Get { account_id },
        } => cmd_party_get(&client, account_id.as_deref(), json, out).await,

        ApiCommand::Sandbox {
            action: SandboxAction::Create { sandbox_id },
        } => cmd_sandbox_create(&client, store, &sandbox_id, json, out).await,
    }
}

fn run_config(
    store: &ConfigStore,
    action: ConfigAction,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    match action {
        ConfigAction::Set {
            base_url,
            access_token,
            sandbox_id,
        } => cmd_config_set(
            store,
            base_url.as_deref(),
            access_token.as_deref(),
            sandbox_id.as_deref(),
            out,
        )
        .map(|_| ()),
        ConfigAction::Show => cmd_config_show(store, json, out),
        ConfigAction::Unset { key } => cmd_config_unset(store, key, out).map(|_| ()),
        ConfigAction::Path => cmd_config_path(store, out),
    }
}

// =============================================================================
// TESTS
// =============================================================================
