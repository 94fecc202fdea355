//! Demo stage
//!
//! A bounded integer milestone (1 to 6) persisted across sessions. Downstream
//! screens read it to pick which canned data to show.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

mod counterparties;
pub mod storage;
mod store;

pub use counterparties::{
    verified_only, CounterpartyContact, CounterpartyItem, CounterpartyList, CounterpartyStatus,
};
pub use storage::{MemoryStorage, StageStorage};
pub use store::{ListenerError, StageStore, Subscription};

/// Storage key the stage is persisted under
pub const STAGE_STORAGE_KEY: &str = "tradepay.state.v1";

/// Lowest stage value
pub const MIN_STAGE: i64 = 1;

/// Highest stage value
pub const MAX_STAGE: i64 = 6;

/// Stage Error
#[derive(Debug, Error)]
pub enum Error {
    /// Value outside `MIN_STAGE..=MAX_STAGE`
    #[error("Stage out of range: {0}")]
    OutOfRange(i64),
    /// Value is not an integer
    #[error("Invalid stage value: `{0}`")]
    InvalidValue(String),
    /// Storage error
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

/// Demo milestone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// No customers yet
    #[default]
    NoCustomers = 1,
    /// A customer has been invited
    CustomerInvited = 2,
    /// The invited customer completed verification
    CustomerVerified = 3,
    /// A payment request is outstanding
    AwaitingPayment = 4,
    /// Part of the requested amount arrived
    PartiallyPaid = 5,
    /// The payment completed
    Completed = 6,
}

impl Stage {
    /// Lowest stage
    pub const MIN: Stage = Stage::NoCustomers;

    /// Highest stage
    pub const MAX: Stage = Stage::Completed;

    /// All stages in order
    pub const ALL: [Stage; 6] = [
        Stage::NoCustomers,
        Stage::CustomerInvited,
        Stage::CustomerVerified,
        Stage::AwaitingPayment,
        Stage::PartiallyPaid,
        Stage::Completed,
    ];

    /// Integer value of the stage
    pub fn value(&self) -> i64 {
        *self as i64
    }

    /// Clamp any integer into range
    pub fn clamp(value: i64) -> Self {
        let clamped = value.clamp(MIN_STAGE, MAX_STAGE);
        Self::ALL
            .into_iter()
            .find(|stage| stage.value() == clamped)
            .unwrap_or(Stage::MIN)
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Stage::NoCustomers => "No customers",
            Stage::CustomerInvited => "Customer invited",
            Stage::CustomerVerified => "Customer verified",
            Stage::AwaitingPayment => "Awaiting payment",
            Stage::PartiallyPaid => "Partially paid",
            Stage::Completed => "Completed",
        }
    }

    /// Pending request shown on the home screen, if any
    pub fn pending_request(&self) -> Option<PendingRequest> {
        match self {
            Stage::CustomerInvited => Some(PendingRequest {
                title: "Customer invitation requests",
                status: "Awaiting response",
            }),
            Stage::AwaitingPayment | Stage::PartiallyPaid => Some(PendingRequest {
                title: "Payment requests",
                status: "Awaiting payment",
            }),
            _ => None,
        }
    }

    /// Share of the requested payment received, from 0 to 1
    pub fn payment_progress(&self) -> Decimal {
        match self {
            Stage::PartiallyPaid => Decimal::new(25, 2),
            Stage::Completed => Decimal::ONE,
            _ => Decimal::ZERO,
        }
    }

    /// Status of the transaction tied to the payment request
    pub fn transaction_status(&self) -> TransactionStatus {
        if *self >= Stage::PartiallyPaid {
            TransactionStatus::Sent
        } else {
            TransactionStatus::Processing
        }
    }

    /// Whether a step up is possible
    pub fn can_step_up(&self) -> bool {
        *self < Stage::MAX
    }

    /// Whether a step down is possible
    pub fn can_step_down(&self) -> bool {
        *self > Stage::MIN
    }
}

impl TryFrom<i64> for Stage {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.value() == value)
            .ok_or(Error::OutOfRange(value))
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let number = value
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidValue(value.to_string()))?;
        Self::try_from(number)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Stage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.value())
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Request awaiting action from the counterparty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingRequest {
    /// Section title
    pub title: &'static str,
    /// Status badge
    pub status: &'static str,
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Still processing
    Processing,
    /// Funds sent
    Sent,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Processing => write!(f, "Processing"),
            TransactionStatus::Sent => write!(f, "Sent"),
        }
    }
}
