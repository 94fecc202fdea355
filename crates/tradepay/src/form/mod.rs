//! Payment form state
//!
//! [`PaymentFormState`] is a snapshot of the raw field values of a send or
//! request payment form. The presentation layer owns and mutates it; the
//! validator and the summary only read it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fees::FeeMode;
use crate::{Amount, Currency};

pub mod documents;

pub use documents::{
    DocumentSlot, DocumentType, MissingDeclaration, PostShipmentDocument, PostShipmentDocuments,
    SupportingDocuments,
};

/// Purpose value that unlocks the free-text purpose field
pub const PURPOSE_OTHERS: &str = "others";

/// Form Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown nature of payment
    #[error("Unknown nature of payment: `{0}`")]
    UnknownNature(String),
}

/// Business-purpose category of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nature {
    /// Paid before the goods ship
    PreShipment,
    /// Paid after the goods ship
    PostShipment,
}

impl Nature {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Nature::PreShipment => "Pre-shipment",
            Nature::PostShipment => "Post-shipment",
        }
    }
}

impl FromStr for Nature {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pre_shipment" => Ok(Self::PreShipment),
            "post_shipment" => Ok(Self::PostShipment),
            _ => Err(Error::UnknownNature(value.to_string())),
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nature::PreShipment => write!(f, "pre_shipment"),
            Nature::PostShipment => write!(f, "post_shipment"),
        }
    }
}

/// Account the payment is deducted from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerAccount {
    /// Settlement currency of the account
    pub currency: Currency,
    /// Available balance
    pub balance: Amount,
}

/// Snapshot of every field that affects validity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentFormState {
    /// Amount text as typed, thousands separators included
    pub amount: String,
    /// Raw nature-of-payment selection
    pub nature: String,
    /// Raw purpose selection
    pub purpose: String,
    /// Free-text purpose, used when `purpose` is [`PURPOSE_OTHERS`]
    pub purpose_other: String,
    /// Supporting documents
    pub documents: SupportingDocuments,
    /// Selected payer account
    pub payer_account: Option<PayerAccount>,
    /// Conversion terms checkbox
    pub conversion_consent: bool,
    /// "Expires after" value, request flow only
    pub expires_after: String,
    /// Who bears the service fee
    pub fee_mode: FeeMode,
}

impl PaymentFormState {
    /// Parsed nature, `None` when empty or unknown
    pub fn nature(&self) -> Option<Nature> {
        Nature::from_str(&self.nature).ok()
    }

    /// Whether the purpose selection is the "others" sentinel
    pub fn is_purpose_other(&self) -> bool {
        self.purpose.trim().eq_ignore_ascii_case(PURPOSE_OTHERS)
    }

    /// Purpose as it should be displayed
    pub fn effective_purpose(&self) -> &str {
        if self.is_purpose_other() {
            self.purpose_other.trim()
        } else {
            self.purpose.trim()
        }
    }

    /// Amount for summary figures: unparsable or negative input counts as zero
    pub fn amount_or_zero(&self) -> Amount {
        Amount::parse_input(&self.amount)
            .map(Amount::non_negative)
            .unwrap_or(Amount::ZERO)
    }

    /// Change the nature of payment.
    ///
    /// Switching to pre-shipment clears the document type so the user picks it
    /// again.
    pub fn select_nature(&mut self, nature: &str) {
        if self.nature == nature {
            return;
        }
        self.nature = nature.to_string();
        if self.nature() == Some(Nature::PreShipment) {
            self.documents.select_document_type("");
        }
    }

    /// Change the purpose; leaving "others" clears the free text
    pub fn select_purpose(&mut self, purpose: &str) {
        self.purpose = purpose.to_string();
        if !self.is_purpose_other() {
            self.purpose_other.clear();
        }
    }

    /// Change the payer account.
    ///
    /// The conversion consent is unchecked whenever the newly selected
    /// currency does not require it.
    pub fn select_payer_account(
        &mut self,
        account: Option<PayerAccount>,
        disclosure_currency: &Currency,
    ) {
        let requires_consent = account
            .as_ref()
            .is_some_and(|account| account.currency == *disclosure_currency);
        if !requires_consent {
            self.conversion_consent = false;
        }
        self.payer_account = account;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_nature_parsing() {
        assert_eq!(Nature::from_str("pre_shipment").unwrap(), Nature::PreShipment);
        assert_eq!(Nature::from_str("POST_SHIPMENT").unwrap(), Nature::PostShipment);
        assert!(Nature::from_str("").is_err());
        assert!(Nature::from_str("in_transit").is_err());
    }

    #[test]
    fn test_deselecting_disclosure_currency_resets_consent() {
        let mut form = PaymentFormState::default();
        let usdt = PayerAccount {
            currency: Currency::Usdt,
            balance: Amount::from(dec!(5000)),
        };
        form.select_payer_account(Some(usdt.clone()), &Currency::Usdt);
        form.conversion_consent = true;

        form.select_payer_account(Some(usdt), &Currency::Usdt);
        assert!(form.conversion_consent);

        form.select_payer_account(
            Some(PayerAccount {
                currency: Currency::Usd,
                balance: Amount::from(dec!(5000)),
            }),
            &Currency::Usdt,
        );
        assert!(!form.conversion_consent);
    }

    #[test]
    fn test_purpose_other_cleared_when_leaving_others() {
        let mut form = PaymentFormState::default();
        form.select_purpose("others");
        form.purpose_other = "Samples".to_string();
        assert_eq!(form.effective_purpose(), "Samples");

        form.select_purpose("goods");
        assert!(form.purpose_other.is_empty());
        assert_eq!(form.effective_purpose(), "goods");
    }

    #[test]
    fn test_switching_to_pre_shipment_clears_document_type() {
        let mut form = PaymentFormState::default();
        form.select_nature("pre_shipment");
        form.documents.select_document_type("CC");
        form.documents.upload_pre_shipment("contract.pdf").unwrap();

        form.select_nature("post_shipment");
        form.select_nature("pre_shipment");
        assert!(form.documents.document_type.is_empty());
        assert!(!form.documents.pre_shipment.is_uploaded());
    }

    #[test]
    fn test_amount_or_zero() {
        let mut form = PaymentFormState {
            amount: "1,500.25".to_string(),
            ..Default::default()
        };
        assert_eq!(form.amount_or_zero(), Amount::from(dec!(1500.25)));

        form.amount = "-3".to_string();
        assert_eq!(form.amount_or_zero(), Amount::ZERO);

        form.amount = "abc".to_string();
        assert_eq!(form.amount_or_zero(), Amount::ZERO);
    }

    #[test]
    fn test_form_deserializes_from_partial_json() {
        let form: PaymentFormState = serde_json::from_str(
            r#"{
                "amount": "100,000",
                "nature": "post_shipment",
                "fee_mode": "split",
                "payer_account": {"currency": "USDT", "balance": "250000"},
                "documents": {"post_shipment": {"ci": {"status": "uploaded", "file_name": "ci.pdf"}}}
            }"#,
        )
        .unwrap();

        assert_eq!(form.fee_mode, FeeMode::Split);
        assert_eq!(form.nature(), Some(Nature::PostShipment));
        assert!(form.documents.post_shipment.commercial_invoice.is_uploaded());
        assert_eq!(
            form.payer_account.map(|a| a.currency),
            Some(Currency::Usdt)
        );
    }
}
