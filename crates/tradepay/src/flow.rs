//! Payment flow kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flow Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown flow name
    #[error("Unknown payment flow: `{0}`")]
    UnknownFlow(String),
}

/// Which payment page the form belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Send a payment to a receiver
    #[default]
    Send,
    /// Request a payment from a customer
    Request,
}

impl FlowKind {
    /// How the counterparty is called in fee labels
    pub fn counterparty_label(&self) -> &'static str {
        match self {
            FlowKind::Send => "receiver",
            FlowKind::Request => "customer",
        }
    }

    /// Whether the form needs an "expires after" value
    pub fn requires_expiry(&self) -> bool {
        matches!(self, FlowKind::Request)
    }
}

impl FromStr for FlowKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "send" | "send-payment" => Ok(Self::Send),
            "request" | "request-payment" => Ok(Self::Request),
            other => Err(Error::UnknownFlow(other.to_string())),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Send => write!(f, "send"),
            FlowKind::Request => write!(f, "request"),
        }
    }
}
