//! Error type for the obcli binary and library.

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can make a command fail.
///
/// `main` prints [`Error::report`] after `Error: ` and exits with status 1.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure, timeout or TLS problem.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-2xx status; holds its message.
    #[error("{0}")]
    Server(String),

    /// A configuration value was rejected.
    #[error(transparent)]
    Config(#[from] obcli_core::Error),

    /// The config file exists but could not be parsed.
    #[error("Invalid config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        source: obcli_core::Error,
    },

    /// Reading or writing the config file failed.
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The base URL cannot be used to build request URLs.
    #[error("Invalid base URL '{0}'")]
    Url(String),

    /// An account-information call was attempted without a bearer token.
    #[error("No access token configured; run 'obcli config set --access-token <TOKEN>'")]
    MissingToken,

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// The message followed by every underlying cause it doesn't already show.
    ///
    /// reqwest's own message stops at "error sending request"; the connect,
    /// DNS or TLS failure is further down the chain.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = StdError::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("error sending request")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn report_does_not_repeat_causes_already_shown() {
        let err = Error::ConfigFile {
            path: PathBuf::from("/tmp/config.json"),
            source: obcli_core::Error::InvalidConfig("bad".to_string()),
        };
        assert_eq!(err.report(), err.to_string());
    }

    #[test]
    fn report_appends_hidden_causes() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = Error::Io {
            path: PathBuf::from("/tmp/config.json"),
            source: std::io::Error::other(Outer(inner)),
        };
        assert_eq!(
            err.report(),
            "Cannot access /tmp/config.json: error sending request: connection refused"
        );
    }
}
