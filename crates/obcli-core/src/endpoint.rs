//! # Endpoint Module
//!
//! Catalogue of the Open Banking v3.1 calls the client can make.
//!
//! An [`Endpoint`] is a plain description of one request: method, path
//! segments, query parameters and an optional JSON body. The app crate turns
//! it into a reqwest request; keeping it data-only lets every command's
//! method/path/query be checked without a server.

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

// =============================================================================
// METHOD
// =============================================================================

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DATE RANGE
// =============================================================================

/// Optional lower/upper bound for transaction and statement listings.
///
/// Values are forwarded verbatim; the server validates the ISO 8601 format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }

    /// `fromBookingDateTime` / `toBookingDateTime` parameters.
    pub fn booking_query(&self) -> Vec<(String, String)> {
        self.query("fromBookingDateTime", "toBookingDateTime")
    }

    /// `fromStatementDateTime` / `toStatementDateTime` parameters.
    pub fn statement_query(&self) -> Vec<(String, String)> {
        self.query("fromStatementDateTime", "toStatementDateTime")
    }

    fn query(&self, from_key: &str, to_key: &str) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(from) = &self.from {
            params.push((from_key.to_string(), from.clone()));
        }
        if let Some(to) = &self.to {
            params.push((to_key.to_string(), to.clone()));
        }
        params
    }
}

// =============================================================================
// CONSENT REQUEST
// =============================================================================

/// Every account-information permission the API understands.
pub const DEFAULT_PERMISSIONS: &[&str] = &[
    "ReadAccountsBasic",
    "ReadAccountsDetail",
    "ReadBalances",
    "ReadBeneficiariesBasic",
    "ReadBeneficiariesDetail",
    "ReadParty",
    "ReadPartyPSU",
    "ReadScheduledPaymentsBasic",
    "ReadScheduledPaymentsDetail",
    "ReadStandingOrdersBasic",
    "ReadStandingOrdersDetail",
    "ReadStatementsBasic",
    "ReadStatementsDetail",
    "ReadTransactionsBasic",
    "ReadTransactionsCredits",
    "ReadTransactionsDebits",
    "ReadTransactionsDetail",
];

/// Parameters of a new account-access consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentRequest {
    pub permissions: Vec<String>,
    pub expiration_date_time: Option<String>,
    pub transaction_from_date_time: Option<String>,
    pub transaction_to_date_time: Option<String>,
}

impl Default for ConsentRequest {
    fn default() -> Self {
        Self {
            permissions: DEFAULT_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
            expiration_date_time: None,
            transaction_from_date_time: None,
            transaction_to_date_time: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConsentBody<'a> {
    data: ConsentData<'a>,
    risk: serde_json::Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConsentData<'a> {
    permissions: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_from_date_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_to_date_time: Option<&'a str>,
}

impl ConsentRequest {
    /// Build the `OBReadConsent1` request body.
    pub fn to_body(&self) -> Result<Value> {
        let body = ConsentBody {
            data: ConsentData {
                permissions: &self.permissions,
                expiration_date_time: self.expiration_date_time.as_deref(),
                transaction_from_date_time: self.transaction_from_date_time.as_deref(),
                transaction_to_date_time: self.transaction_to_date_time.as_deref(),
            },
            risk: serde_json::Map::new(),
        };
        Ok(serde_json::to_value(body)?)
    }
}

// =============================================================================
// ENDPOINT
// =============================================================================

/// One API request, independent of any HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    /// Path segments below the base URL, unencoded.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Endpoint {
    fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    fn get(segments: &[&str]) -> Self {
        Self::new(Method::Get, segments)
    }

    fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The path relative to the base URL, e.g. `/accounts/123/balances`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    /// Whether the call reads account data and therefore needs a bearer token.
    pub fn requires_token(&self) -> bool {
        self.segments.first().map(String::as_str) != Some("sandbox")
    }

    // --- Consents ---

    pub fn create_consent(request: &ConsentRequest) -> Result<Self> {
        Ok(Self::new(Method::Post, &["account-access-consents"]).with_body(request.to_body()?))
    }

    pub fn get_consent(consent_id: &str) -> Self {
        Self::get(&["account-access-consents", consent_id])
    }

    pub fn delete_consent(consent_id: &str) -> Self {
        Self::new(Method::Delete, &["account-access-consents", consent_id])
    }

    // --- Accounts ---

    pub fn accounts() -> Self {
        Self::get(&["accounts"])
    }

    pub fn account(account_id: &str) -> Self {
        Self::get(&["accounts", account_id])
    }

    // --- Balances ---

    pub fn account_balances(account_id: &str) -> Self {
        Self::get(&["accounts", account_id, "balances"])
    }

    pub fn balances() -> Self {
        Self::get(&["balances"])
    }

    // --- Transactions ---

    pub fn account_transactions(account_id: &str, range: &DateRange) -> Self {
        Self::get(&["accounts", account_id, "transactions"]).with_query(range.booking_query())
    }

    pub fn transactions(range: &DateRange) -> Self {
        Self::get(&["transactions"]).with_query(range.booking_query())
    }

    // --- Per-account resources ---

    pub fn beneficiaries(account_id: &str) -> Self {
        Self::get(&["accounts", account_id, "beneficiaries"])
    }

    pub fn standing_orders(account_id: &str) -> Self {
        Self::get(&["accounts", account_id, "standing-orders"])
    }

    pub fn scheduled_payments(account_id: &str) -> Self {
        Self::get(&["accounts", account_id, "scheduled-payments"])
    }

    pub fn statements(account_id: &str, range: &DateRange) -> Self {
        Self::get(&["accounts", account_id, "statements"]).with_query(range.statement_query())
    }

    /// `/accounts/{id}/party` for an account's owner, `/party` for the PSU.
    pub fn party(account_id: Option<&str>) -> Self {
        match account_id {
            Some(id) => Self::get(&["accounts", id, "party"]),
            None => Self::get(&["party"]),
        }
    }

    // --- Sandbox ---

    pub fn create_sandbox(sandbox_id: &str) -> Self {
        Self::new(Method::Post, &["sandbox"])
            .with_body(serde_json::json!({ "sandboxId": sandbox_id }))
    }
}

// =============================================================================
// TESTS
// =============================================================================
