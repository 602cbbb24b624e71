//! # Views Module
//!
//! Which fields of an Open Banking response show up in a table.
//!
//! Every v3.1 read response wraps its records as `{"Data": {"<Key>": [...]}}`
//! (consents put the record directly under `Data`). A [`View`] knows where
//! the records live and which JSON pointers become columns.

use crate::table::{Table, cell_text};
use serde_json::Value;

/// One table column: header text and JSON pointer into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub pointer: &'static str,
}

const fn col(header: &'static str, pointer: &'static str) -> Column {
    Column { header, pointer }
}

/// Table layout for one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    /// Plural noun used in "No ... found." messages.
    pub title: &'static str,
    /// Key under `Data` holding the records; `None` means `Data` itself.
    pub data_key: Option<&'static str>,
    pub columns: &'static [Column],
}

impl View {
    /// The records of a response body.
    ///
    /// An array yields each element, an object yields itself, anything
    /// else (including a missing key) yields nothing.
    pub fn records<'a>(&self, body: &'a Value) -> Vec<&'a Value> {
        let data = body.get("Data");
        let target = match self.data_key {
            Some(key) => data.and_then(|d| d.get(key)),
            None => data,
        };

        match target {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(record @ Value::Object(_)) => vec![record],
            _ => Vec::new(),
        }
    }

    /// Build the table for a response body.
    pub fn table(&self, body: &Value) -> Table {
        let mut table = Table::new(self.columns.iter().map(|c| c.header));
        for record in self.records(body) {
            let row = self
                .columns
                .iter()
                .map(|c| cell_text(record.pointer(c.pointer)))
                .collect();
            table.push_row(row);
        }
        table
    }

    /// The table as text, or `No <title> found.` when there are no records.
    pub fn render(&self, body: &Value) -> String {
        let table = self.table(body);
        if table.is_empty() {
            format!("No {} found.\n", self.title)
        } else {
            table.render()
        }
    }
}

// =============================================================================
// RESOURCE VIEWS
// =============================================================================

pub const CONSENT: View = View {
    title: "consents",
    data_key: None,
    columns: &[
        col("ConsentId", "/ConsentId"),
        col("Status", "/Status"),
        col("Created", "/CreationDateTime"),
        col("Expires", "/ExpirationDateTime"),
        col("Permissions", "/Permissions"),
    ],
};

pub const ACCOUNT: View = View {
    title: "accounts",
    data_key: Some("Account"),
    columns: &[
        col("AccountId", "/AccountId"),
        col("Currency", "/Currency"),
        col("Type", "/AccountType"),
        col("SubType", "/AccountSubType"),
        col("Nickname", "/Nickname"),
        col("Identification", "/Account/0/Identification"),
        col("Name", "/Account/0/Name"),
    ],
};

pub const BALANCE: View = View {
    title: "balances",
    data_key: Some("Balance"),
    columns: &[
        col("AccountId", "/AccountId"),
        col("Type", "/Type"),
        col("Amount", "/Amount/Amount"),
        col("Currency", "/Amount/Currency"),
        col("CreditDebit", "/CreditDebitIndicator"),
        col("DateTime", "/DateTime"),
    ],
};

pub const TRANSACTION: View = View {
    title: "transactions",
    data_key: Some("Transaction"),
    columns: &[
        col("AccountId", "/AccountId"),
        col("TransactionId", "/TransactionId"),
        col("Booked", "/BookingDateTime"),
        col("Amount", "/Amount/Amount"),
        col("Currency", "/Amount/Currency"),
        col("CreditDebit", "/CreditDebitIndicator"),
        col("Status", "/Status"),
        col("Information", "/TransactionInformation"),
    ],
};

pub const BENEFICIARY: View = View {
    title: "beneficiaries",
    data_key: Some("Beneficiary"),
    columns: &[
        col("AccountId", "/AccountId"),
        col("BeneficiaryId", "/BeneficiaryId"),
        col("Reference", "/Reference"),
        col("Name", "/CreditorAccount/Name"),
        col("Scheme", "/CreditorAccount/SchemeName"),
        col("Identification", "/CreditorAccount/Identification"),
    ],
};

pub const STANDING_ORDER: View = View {
    title: "standing orders",
    data_key: Some("StandingOrder"),
    columns: &[
        col("AccountId", "/AccountId"),
        col("StandingOrderId", "/StandingOrderId"),
        col("Frequency", "/Frequency"),
        col("Reference", "/Reference"),
        col("NextPayment", "/NextPaymentDateTime"),
        col("Amount", "/NextPaymentAmount/Amount"),
        col("Currency", "/NextPaymentAmount/Currency"),
        col("Status", "/StandingOrderStatusCode"),
    ],
};

pub const SCHEDULED_PAYMENT: View = View {
    title: "scheduled payments",
    data_key: Some("ScheduledPayment"),
    columns: &[
        col("AccountId", "/AccountId"),
        col("ScheduledPaymentId", "/ScheduledPaymentId"),
        col("Date", "/ScheduledPaymentDateTime"),
        col("Type", "/ScheduledType"),
        col("Reference", "/Reference"),
        col("Amount", "/InstructedAmount/Amount"),
        col("Currency", "/InstructedAmount/Currency"),
    ],
};

pub const STATEMENT: View = View {
    title: "statements",
    data_key: Some("Statement"),
    columns: &[
        col("AccountId", "/AccountId"),
        col("StatementId", "/StatementId"),
        col("Type", "/Type"),
        col("Start", "/StartDateTime"),
        col("End", "/EndDateTime"),
        col("Created", "/CreationDateTime"),
    ],
};

pub const PARTY: View = View {
    title: "parties",
    data_key: Some("Party"),
    columns: &[
        col("PartyId", "/PartyId"),
        col("Type", "/PartyType"),
        col("Name", "/Name"),
        col("Email", "/EmailAddress"),
        col("Phone", "/Phone"),
        col("Mobile", "/Mobile"),
    ],
};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accounts_body() -> Value {
        json!({
            "Data": {
                "Account": [
                    {
                        "AccountId": "22289",
                        "Currency": "GBP",
                        "AccountType": "Personal",
                        "AccountSubType": "CurrentAccount",
                        "Nickname": "Bills",
                        "Account": [{
                            "SchemeName": "UK.OBIE.SortCodeAccountNumber",
                            "Identification": "80200110203345",
                            "Name": "Mr Kevin"
                        }]
                    },
                    {
                        "AccountId": "31820",
                        "Currency": "EUR"
                    }
                ]
            },
            "Links": { "Self": "/accounts" },
            "Meta": { "TotalPages": 1 }
        })
    }

    #[test]
    fn records_from_array() {
        let body = accounts_body();
        assert_eq!(ACCOUNT.records(&body).len(), 2);
    }

    #[test]
    fn records_from_single_object() {
        let body = json!({ "Data": { "Party": { "PartyId": "P1", "Name": "Alice" } } });
        let table = PARTY.table(&body);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "P1");
        assert_eq!(table.rows[0][2], "Alice");
    }

    #[test]
    fn consent_reads_data_directly() {
        let body = json!({
            "Data": {
                "ConsentId": "urn-1",
                "Status": "AwaitingAuthorisation",
                "CreationDateTime": "2024-05-01T10:00:00Z",
                "Permissions": ["ReadAccountsBasic", "ReadBalances"]
            },
            "Risk": {}
        });
        let table = CONSENT.table(&body);
        assert_eq!(
            table.rows[0],
            vec![
                "urn-1",
                "AwaitingAuthorisation",
                "2024-05-01T10:00:00Z",
                "N/A",
                "ReadAccountsBasic, ReadBalances",
            ]
        );
    }

    #[test]
    fn missing_fields_render_na() {
        let body = accounts_body();
        let table = ACCOUNT.table(&body);
        assert_eq!(table.rows[0][5], "80200110203345");
        assert_eq!(
            table.rows[1],
            vec!["31820", "EUR", "N/A", "N/A", "N/A", "N/A", "N/A"]
        );
    }

    #[test]
    fn nested_amounts_are_extracted() {
        let body = json!({
            "Data": {
                "Balance": [{
                    "AccountId": "22289",
                    "Amount": { "Amount": "1230.00", "Currency": "GBP" },
                    "CreditDebitIndicator": "Credit",
                    "Type": "InterimAvailable",
                    "DateTime": "2024-05-01T00:00:00Z"
                }]
            }
        });
        let table = BALANCE.table(&body);
        assert_eq!(
            table.rows[0],
            vec![
                "22289",
                "InterimAvailable",
                "1230.00",
                "GBP",
                "Credit",
                "2024-05-01T00:00:00Z"
            ]
        );
    }

    #[test]
    fn missing_data_renders_empty_message() {
        let body = json!({ "Data": {} });
        assert_eq!(TRANSACTION.render(&body), "No transactions found.\n");
        assert_eq!(STANDING_ORDER.render(&json!({})), "No standing orders found.\n");
    }

    #[test]
    fn render_includes_headers() {
        let rendered = ACCOUNT.render(&accounts_body());
        let first = rendered.lines().next().unwrap();
        assert!(first.starts_with("AccountId"));
        assert!(first.contains("Identification"));
    }
}
