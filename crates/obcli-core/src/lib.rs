//! # obcli-core
//!
//! The pure half of the Open Banking client.
//!
//! Nothing in here touches the network or the filesystem. The binary in
//! `apps/obcli` loads the configuration, turns an [`Endpoint`] into an HTTP
//! request and hands the decoded body back to a [`View`] for rendering.
//!
//! ```text
//! ┌──────────────┐   Endpoint    ┌──────────────┐   serde_json::Value   ┌──────────────┐
//! │  CLI command │ ────────────► │  HTTP (app)  │ ────────────────────► │ View + Table │
//! └──────────────┘               └──────────────┘                       └──────────────┘
//! ```

pub mod config;
pub mod endpoint;
pub mod error;
pub mod response;
pub mod table;
pub mod views;

pub use config::{Config, ConfigKey, DEFAULT_BASE_URL};
pub use endpoint::{ConsentRequest, DEFAULT_PERMISSIONS, DateRange, Endpoint, Method};
pub use error::{Error, Result};
pub use response::server_error_message;
pub use table::{MAX_COLUMN_WIDTH, MISSING, Table, cell_text};
pub use views::{Column, View};
