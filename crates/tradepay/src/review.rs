//! Review screen error scenarios
//!
//! Simulated payout creation failures the review screen can be switched into
//! for demos. Pure data: nothing here executes a payment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snackbar shown for every failed payout
pub const FAILED_PAYOUT_SNACKBAR: &str = "Payment failed: No charge applied";

/// Inline hint shown under the review error
pub const INLINE_ERROR_HINT: &str =
    "Go back and try again, or Contact Support for further assistance.";

/// Review scenario Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown scenario key
    #[error("Unknown review scenario: `{0}`")]
    UnknownScenario(String),
}

/// Simulated payout creation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewScenario {
    /// Connection timed out
    CreateUnexpected,
    /// API timed out
    ApiGeneral,
    /// KYC not approved
    KycStatus,
    /// Receiver bank account rejected
    CounterpartyBankInvalid,
    /// Counterparty rejected
    CounterpartyInvalid,
    /// Uploaded document cannot be found
    DocumentNotFound,
    /// Pre-shipment document missing
    PreShipmentDocumentRequired,
    /// Commercial invoice missing
    CommercialInvoiceRequired,
    /// Transport document missing
    TransportDocumentRequired,
    /// Packing list missing
    PackingListRequired,
    /// Previewed amount differs from the server's
    PreviewAmountMismatch,
    /// Previewed fee differs from the server's
    PreviewFeeMismatch,
    /// Payable amount outside the limits
    PayableOutOfRange,
    /// Fee rate differs from the server's
    FeeRateMismatch,
}

impl ReviewScenario {
    /// Every scenario in display order
    pub const ALL: [ReviewScenario; 14] = [
        ReviewScenario::CreateUnexpected,
        ReviewScenario::ApiGeneral,
        ReviewScenario::KycStatus,
        ReviewScenario::CounterpartyBankInvalid,
        ReviewScenario::CounterpartyInvalid,
        ReviewScenario::DocumentNotFound,
        ReviewScenario::PreShipmentDocumentRequired,
        ReviewScenario::CommercialInvoiceRequired,
        ReviewScenario::TransportDocumentRequired,
        ReviewScenario::PackingListRequired,
        ReviewScenario::PreviewAmountMismatch,
        ReviewScenario::PreviewFeeMismatch,
        ReviewScenario::PayableOutOfRange,
        ReviewScenario::FeeRateMismatch,
    ];

    /// Every scenario in display order
    pub fn all() -> impl Iterator<Item = ReviewScenario> {
        Self::ALL.into_iter()
    }

    /// Scenario key
    pub fn key(&self) -> &'static str {
        match self {
            ReviewScenario::CreateUnexpected => "create-unexpected",
            ReviewScenario::ApiGeneral => "api-general",
            ReviewScenario::KycStatus => "kyc-status",
            ReviewScenario::CounterpartyBankInvalid => "cp-bank-invalid",
            ReviewScenario::CounterpartyInvalid => "cp-invalid",
            ReviewScenario::DocumentNotFound => "doc-not-found",
            ReviewScenario::PreShipmentDocumentRequired => "doc-pre-required",
            ReviewScenario::CommercialInvoiceRequired => "doc-post-ci",
            ReviewScenario::TransportDocumentRequired => "doc-post-transport",
            ReviewScenario::PackingListRequired => "doc-post-packing",
            ReviewScenario::PreviewAmountMismatch => "order-preview-amount",
            ReviewScenario::PreviewFeeMismatch => "order-preview-fee",
            ReviewScenario::PayableOutOfRange => "order-payable-range",
            ReviewScenario::FeeRateMismatch => "order-fee-rate",
        }
    }

    /// Error code reported by the payout service
    pub fn code(&self) -> u32 {
        match self {
            ReviewScenario::CreateUnexpected => 10001,
            ReviewScenario::ApiGeneral => 10015,
            _ => 202512,
        }
    }

    /// Error description
    pub fn description(&self) -> &'static str {
        match self {
            ReviewScenario::CreateUnexpected => "Unexpected error (Connection timed out)",
            ReviewScenario::ApiGeneral => "API error (API timed out)",
            ReviewScenario::KycStatus => "KYC status error",
            ReviewScenario::CounterpartyBankInvalid => {
                "Payout create failed (Receiver bank account is not valid)"
            }
            ReviewScenario::CounterpartyInvalid => {
                "Payout create failed (Counterparty is not valid)"
            }
            ReviewScenario::DocumentNotFound => {
                "Payout create failed (Document not found for documentUploadId: XXX)"
            }
            ReviewScenario::PreShipmentDocumentRequired => {
                "Payout create failed (pre-shipment requires file PROFORMA_INVOICE or PURCHASE_ORDER)"
            }
            ReviewScenario::CommercialInvoiceRequired => {
                "Payout create failed (post-shipment requires file COMMERCIAL_INVOICE)"
            }
            ReviewScenario::TransportDocumentRequired => {
                "Payout create failed (post-shipment requires file TRANSPORT_DOCUMENT)"
            }
            ReviewScenario::PackingListRequired => {
                "Payout create failed (post-shipment requires file PACKING_LIST)"
            }
            ReviewScenario::PreviewAmountMismatch => {
                "Payout create failed (preview amount is not correct)"
            }
            ReviewScenario::PreviewFeeMismatch => {
                "Payout create failed (preview fee amount is not correct)"
            }
            ReviewScenario::PayableOutOfRange => {
                "Payout create failed (payable amount should between min/max limit)"
            }
            ReviewScenario::FeeRateMismatch => "Payout create failed (fee rate is not correct)",
        }
    }

    /// Title shown on the review screen, code first
    pub fn title(&self) -> String {
        format!("{} {}", self.code(), self.description())
    }

    /// Short label for the scenario picker
    pub fn badge_label(&self) -> &'static str {
        match self {
            ReviewScenario::CreateUnexpected => "Unexpected error",
            ReviewScenario::ApiGeneral => "General API error",
            ReviewScenario::KycStatus => "KYC blocked",
            ReviewScenario::CounterpartyBankInvalid => "Bank invalid",
            ReviewScenario::CounterpartyInvalid => "Counterparty invalid",
            ReviewScenario::DocumentNotFound => "Document missing",
            ReviewScenario::PreShipmentDocumentRequired => "Pre-shipment doc",
            ReviewScenario::CommercialInvoiceRequired => "Commercial invoice",
            ReviewScenario::TransportDocumentRequired => "Transport document",
            ReviewScenario::PackingListRequired => "Packing list",
            ReviewScenario::PreviewAmountMismatch => "Preview amount",
            ReviewScenario::PreviewFeeMismatch => "Preview fee",
            ReviewScenario::PayableOutOfRange => "Out of range",
            ReviewScenario::FeeRateMismatch => "Fee rate mismatch",
        }
    }

    /// Snackbar text
    pub fn snackbar(&self) -> &'static str {
        FAILED_PAYOUT_SNACKBAR
    }

    /// Whether the confirm button is disabled
    pub fn disables_primary(&self) -> bool {
        true
    }

    /// Blocking alert shown instead of the inline hint
    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            ReviewScenario::KycStatus => Some(
                "Your KYC status is not approved. Please complete verification before using payments.",
            ),
            _ => None,
        }
    }

    /// Message shown under the title: the alert when there is one
    pub fn message(&self) -> &'static str {
        self.alert_message().unwrap_or(INLINE_ERROR_HINT)
    }

    /// Flattened view, used for listings
    pub fn info(&self) -> ReviewScenarioInfo {
        ReviewScenarioInfo {
            key: self.key().to_string(),
            code: self.code(),
            title: self.title(),
            badge_label: self.badge_label().to_string(),
            message: self.message().to_string(),
            snackbar: self.snackbar().to_string(),
            disable_primary: self.disables_primary(),
            alert_message: self.alert_message().map(str::to_string),
        }
    }
}

impl FromStr for ReviewScenario {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|scenario| scenario.key() == value.trim())
            .ok_or_else(|| Error::UnknownScenario(value.to_string()))
    }
}

impl fmt::Display for ReviewScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for ReviewScenario {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for ReviewScenario {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Self::from_str(&key).map_err(serde::de::Error::custom)
    }
}

/// Serializable description of a [`ReviewScenario`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewScenarioInfo {
    /// Scenario key
    pub key: String,
    /// Error code
    pub code: u32,
    /// Title
    pub title: String,
    /// Picker label
    pub badge_label: String,
    /// Message under the title
    pub message: String,
    /// Snackbar text
    pub snackbar: String,
    /// Confirm button disabled
    pub disable_primary: bool,
    /// Blocking alert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_message: Option<String>,
}
