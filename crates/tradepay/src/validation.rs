//! Payment form validation
//!
//! Every rule is evaluated on every pass and produces at most one
//! [`ErrorReason`] per [`FieldId`]. The form is valid only when no rule
//! produced an error. Whether an error is *shown* is a separate presentation
//! decision, see [`Validation::displayed_errors`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::amount::Error as AmountError;
use crate::fees::FeeBreakdown;
use crate::form::{DocumentType, Nature, PaymentFormState, PostShipmentDocument};
use crate::settings::Settings;
use crate::summary::payer_total;
use crate::{Amount, FlowKind};

/// Field Id Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown field identifier
    #[error("Unknown field: `{0}`")]
    UnknownField(String),
}

/// Form field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    /// Nature of payment select
    Nature,
    /// Purpose select
    Purpose,
    /// Free-text purpose
    PurposeOther,
    /// Amount input
    Amount,
    /// Expires-after input (request flow)
    ExpiresAfter,
    /// Pre-shipment document type
    DocumentType,
    /// Pre-shipment upload
    DocumentUpload,
    /// One post-shipment slot
    PostShipment(PostShipmentDocument),
    /// Conversion terms checkbox
    ConversionConsent,
    /// Payer account selection
    PayerAccount,
    /// Amount plus fee against the account balance
    Balance,
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Nature => write!(f, "nature"),
            FieldId::Purpose => write!(f, "purpose"),
            FieldId::PurposeOther => write!(f, "purpose_other"),
            FieldId::Amount => write!(f, "amount"),
            FieldId::ExpiresAfter => write!(f, "expires_after"),
            FieldId::DocumentType => write!(f, "document_type"),
            FieldId::DocumentUpload => write!(f, "document_upload"),
            FieldId::PostShipment(doc) => write!(f, "post_shipment_{}", doc.key()),
            FieldId::ConversionConsent => write!(f, "conversion_consent"),
            FieldId::PayerAccount => write!(f, "payer_account"),
            FieldId::Balance => write!(f, "balance"),
        }
    }
}

impl FromStr for FieldId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "nature" => Ok(Self::Nature),
            "purpose" => Ok(Self::Purpose),
            "purpose_other" => Ok(Self::PurposeOther),
            "amount" => Ok(Self::Amount),
            "expires_after" => Ok(Self::ExpiresAfter),
            "document_type" => Ok(Self::DocumentType),
            "document_upload" => Ok(Self::DocumentUpload),
            "conversion_consent" => Ok(Self::ConversionConsent),
            "payer_account" => Ok(Self::PayerAccount),
            "balance" => Ok(Self::Balance),
            other => other
                .strip_prefix("post_shipment_")
                .and_then(|key| PostShipmentDocument::from_str(key).ok())
                .map(Self::PostShipment)
                .ok_or_else(|| Error::UnknownField(other.to_string())),
        }
    }
}

impl Serialize for FieldId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let field: String = String::deserialize(deserializer)?;
        Self::from_str(&field).map_err(serde::de::Error::custom)
    }
}

/// Why a field is invalid
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ErrorReason {
    /// Field is empty
    #[error("This field is required")]
    Required,
    /// Field holds a value outside the accepted set
    #[error("Invalid value: `{value}`")]
    Invalid {
        /// Offending raw value
        value: String,
    },
    /// Amount is under the flow's per-transaction minimum
    #[error("Amount is below {} minimum per transaction", .minimum.to_limit_string())]
    BelowMinimum {
        /// Minimum for the flow
        minimum: Amount,
    },
    /// Amount is at or over the per-transaction maximum
    #[error("Amount exceeds {} maximum per transaction", .maximum.to_limit_string())]
    AboveMaximum {
        /// Per-transaction maximum
        maximum: Amount,
    },
    /// Amount plus the payer's fee share exceeds the account balance
    #[error("Amount + fee ({}) exceeds balance", .total.to_display_string())]
    InsufficientBalance {
        /// Amount plus fee
        total: Amount,
        /// Account balance
        balance: Amount,
    },
}

impl ErrorReason {
    /// Errors shown live, before the user tries to submit
    pub fn is_always_visible(&self) -> bool {
        matches!(
            self,
            ErrorReason::BelowMinimum { .. }
                | ErrorReason::AboveMaximum { .. }
                | ErrorReason::InsufficientBalance { .. }
        )
    }

    fn invalid(value: &str) -> Self {
        ErrorReason::Invalid {
            value: value.to_string(),
        }
    }
}

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    /// No rule failed
    pub is_valid: bool,
    /// Every failed rule, keyed by field
    pub field_errors: BTreeMap<FieldId, ErrorReason>,
}

impl ValidationVerdict {
    fn from_errors(field_errors: BTreeMap<FieldId, ErrorReason>) -> Self {
        Self {
            is_valid: field_errors.is_empty(),
            field_errors,
        }
    }

    /// Error for a field, if any
    pub fn error(&self, field: FieldId) -> Option<&ErrorReason> {
        self.field_errors.get(&field)
    }
}

/// Verdict together with the fee breakdown it was computed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Validity and per-field errors
    pub verdict: ValidationVerdict,
    /// Fees used for the balance check
    pub fees: FeeBreakdown,
    /// Whether the user already tried to submit
    pub has_attempted_submit: bool,
}

impl Validation {
    /// Shorthand for `verdict.is_valid`
    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid
    }

    /// Errors the presentation layer should render right now.
    ///
    /// Before the first submit attempt only the always-visible errors are
    /// returned; afterwards every error is.
    pub fn displayed_errors(&self) -> BTreeMap<FieldId, &ErrorReason> {
        self.verdict
            .field_errors
            .iter()
            .filter(|(_, reason)| self.has_attempted_submit || reason.is_always_visible())
            .map(|(field, reason)| (*field, reason))
            .collect()
    }

    /// Whether the "Please check all required fields/errors" banner shows
    pub fn shows_submit_error(&self) -> bool {
        self.has_attempted_submit && !self.verdict.is_valid
    }
}

/// Validates payment forms against a set of [`Settings`]
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    settings: Settings,
}

impl FormValidator {
    /// Create a validator
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Settings in use
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fee breakdown for the current amount and fee mode
    pub fn fees(&self, state: &PaymentFormState, flow: FlowKind) -> FeeBreakdown {
        let fee_rate = self.settings.rates.for_flow(flow);
        self.settings.fees.compute(
            state.amount_or_zero(),
            state.fee_mode.shares(fee_rate),
            fee_rate,
        )
    }

    /// Validate a form snapshot
    #[instrument(skip(self, state))]
    pub fn validate(
        &self,
        state: &PaymentFormState,
        flow: FlowKind,
        has_attempted_submit: bool,
    ) -> Validation {
        let fees = self.fees(state, flow);
        let mut errors = BTreeMap::new();

        self.check_nature_and_documents(state, &mut errors);
        self.check_purpose(state, &mut errors);
        self.check_amount(state, flow, &mut errors);
        self.check_expiry(state, flow, &mut errors);
        self.check_conversion_consent(state, &mut errors);
        self.check_balance(state, flow, &fees, &mut errors);

        let verdict = ValidationVerdict::from_errors(errors);
        tracing::debug!(
            "Payment form valid: {}, {} field errors",
            verdict.is_valid,
            verdict.field_errors.len()
        );

        Validation {
            verdict,
            fees,
            has_attempted_submit,
        }
    }

    fn check_nature_and_documents(
        &self,
        state: &PaymentFormState,
        errors: &mut BTreeMap<FieldId, ErrorReason>,
    ) {
        if state.nature.trim().is_empty() {
            errors.insert(FieldId::Nature, ErrorReason::Required);
            return;
        }

        let nature = match Nature::from_str(&state.nature) {
            Ok(nature) => nature,
            Err(_) => {
                errors.insert(FieldId::Nature, ErrorReason::invalid(&state.nature));
                return;
            }
        };

        let documents = &state.documents;
        match nature {
            Nature::PreShipment => {
                let document_type = documents.document_type.trim();
                if document_type.is_empty() {
                    errors.insert(FieldId::DocumentType, ErrorReason::Required);
                } else if DocumentType::from_str(document_type).is_err() {
                    errors.insert(FieldId::DocumentType, ErrorReason::invalid(document_type));
                }

                if !documents.pre_shipment.is_uploaded() {
                    errors.insert(FieldId::DocumentUpload, ErrorReason::Required);
                }
            }
            Nature::PostShipment => {
                for (document, slot) in documents.post_shipment.iter() {
                    if !slot.is_settled() {
                        errors.insert(FieldId::PostShipment(document), ErrorReason::Required);
                    }
                }
            }
        }
    }

    fn check_purpose(&self, state: &PaymentFormState, errors: &mut BTreeMap<FieldId, ErrorReason>) {
        if state.purpose.trim().is_empty() {
            errors.insert(FieldId::Purpose, ErrorReason::Required);
        } else if state.is_purpose_other() && state.purpose_other.trim().is_empty() {
            errors.insert(FieldId::PurposeOther, ErrorReason::Required);
        }
    }

    fn check_amount(
        &self,
        state: &PaymentFormState,
        flow: FlowKind,
        errors: &mut BTreeMap<FieldId, ErrorReason>,
    ) {
        let amount = match Amount::parse_input(&state.amount) {
            Ok(amount) => amount,
            Err(AmountError::Empty) => {
                errors.insert(FieldId::Amount, ErrorReason::Required);
                return;
            }
            Err(AmountError::InvalidAmount(raw)) => {
                errors.insert(FieldId::Amount, ErrorReason::Invalid { value: raw });
                return;
            }
        };

        if amount.value().is_zero() {
            errors.insert(FieldId::Amount, ErrorReason::Required);
            return;
        }
        if !amount.is_positive() {
            errors.insert(FieldId::Amount, ErrorReason::invalid(&state.amount));
            return;
        }

        let limits = &self.settings.limits;
        let minimum = limits.min_for_flow(flow);
        if amount < minimum {
            errors.insert(FieldId::Amount, ErrorReason::BelowMinimum { minimum });
        } else if amount >= limits.max_per_transaction {
            errors.insert(
                FieldId::Amount,
                ErrorReason::AboveMaximum {
                    maximum: limits.max_per_transaction,
                },
            );
        }
    }

    fn check_expiry(
        &self,
        state: &PaymentFormState,
        flow: FlowKind,
        errors: &mut BTreeMap<FieldId, ErrorReason>,
    ) {
        if flow.requires_expiry() && state.expires_after.trim().is_empty() {
            errors.insert(FieldId::ExpiresAfter, ErrorReason::Required);
        }
    }

    fn check_conversion_consent(
        &self,
        state: &PaymentFormState,
        errors: &mut BTreeMap<FieldId, ErrorReason>,
    ) {
        let requires_consent = state
            .payer_account
            .as_ref()
            .is_some_and(|account| self.settings.requires_conversion_consent(&account.currency));

        if requires_consent && !state.conversion_consent {
            errors.insert(FieldId::ConversionConsent, ErrorReason::Required);
        }
    }

    fn check_balance(
        &self,
        state: &PaymentFormState,
        flow: FlowKind,
        fees: &FeeBreakdown,
        errors: &mut BTreeMap<FieldId, ErrorReason>,
    ) {
        let Some(account) = state.payer_account.as_ref() else {
            errors.insert(FieldId::PayerAccount, ErrorReason::Required);
            return;
        };

        let Some(total) = payer_total(state.amount_or_zero(), fees, flow) else {
            // cannot be represented, so it is over any limit
            errors
                .entry(FieldId::Amount)
                .or_insert(ErrorReason::AboveMaximum {
                    maximum: self.settings.limits.max_per_transaction,
                });
            errors.insert(
                FieldId::Balance,
                ErrorReason::InsufficientBalance {
                    total: Amount::MAX,
                    balance: account.balance,
                },
            );
            return;
        };

        if total > account.balance {
            errors.insert(
                FieldId::Balance,
                ErrorReason::InsufficientBalance {
                    total,
                    balance: account.balance,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::fees::FeeMode;
    use crate::form::PayerAccount;
    use crate::Currency;

    fn usd_account(balance: u64) -> Option<PayerAccount> {
        Some(PayerAccount {
            currency: Currency::Usd,
            balance: Amount::from(balance),
        })
    }

    fn valid_post_shipment_form() -> PaymentFormState {
        let mut form = PaymentFormState {
            amount: "10,000".to_string(),
            nature: "post_shipment".to_string(),
            purpose: "goods".to_string(),
            payer_account: usd_account(1_000_000),
            ..Default::default()
        };
        let post = &mut form.documents.post_shipment;
        post.upload(PostShipmentDocument::CommercialInvoice, "ci.pdf")
            .unwrap();
        post.upload(PostShipmentDocument::TransportDocument, "bl.pdf")
            .unwrap();
        post.set_declared_missing(PostShipmentDocument::PackingList, true)
            .unwrap();
        form
    }

    #[test]
    fn test_empty_form_is_invalid() {
        let validation =
            FormValidator::default().validate(&PaymentFormState::default(), FlowKind::Send, false);

        assert!(!validation.is_valid());
        let errors = &validation.verdict.field_errors;
        assert_eq!(errors.get(&FieldId::Nature), Some(&ErrorReason::Required));
        assert_eq!(errors.get(&FieldId::Purpose), Some(&ErrorReason::Required));
        assert_eq!(errors.get(&FieldId::Amount), Some(&ErrorReason::Required));
        assert_eq!(errors.get(&FieldId::PayerAccount), Some(&ErrorReason::Required));
        // no document errors until a nature is chosen
        assert!(errors.get(&FieldId::DocumentType).is_none());
    }

    #[test]
    fn test_complete_post_shipment_form_is_valid() {
        let validation =
            FormValidator::default().validate(&valid_post_shipment_form(), FlowKind::Send, true);

        assert!(validation.is_valid(), "{:?}", validation.verdict);
        assert!(validation.displayed_errors().is_empty());
        assert!(!validation.shows_submit_error());
        assert_eq!(validation.fees.payer_fee, Amount::from(dec!(100.00)));
    }

    #[test]
    fn test_post_shipment_slot_must_be_settled() {
        let mut form = valid_post_shipment_form();
        form.documents
            .post_shipment
            .set_declared_missing(PostShipmentDocument::PackingList, false)
            .unwrap();

        let validation = FormValidator::default().validate(&form, FlowKind::Send, true);
        assert!(!validation.is_valid());
        assert_eq!(
            validation
                .verdict
                .error(FieldId::PostShipment(PostShipmentDocument::PackingList)),
            Some(&ErrorReason::Required)
        );
        assert_eq!(validation.verdict.field_errors.len(), 1);
    }

    #[test]
    fn test_pre_shipment_requires_type_and_upload() {
        let mut form = valid_post_shipment_form();
        form.select_nature("pre_shipment");

        let validator = FormValidator::default();
        let validation = validator.validate(&form, FlowKind::Send, true);
        assert_eq!(
            validation.verdict.error(FieldId::DocumentType),
            Some(&ErrorReason::Required)
        );
        assert_eq!(
            validation.verdict.error(FieldId::DocumentUpload),
            Some(&ErrorReason::Required)
        );

        form.documents.select_document_type("XX");
        let validation = validator.validate(&form, FlowKind::Send, true);
        assert_eq!(
            validation.verdict.error(FieldId::DocumentType),
            Some(&ErrorReason::Invalid {
                value: "XX".to_string()
            })
        );

        form.documents.select_document_type("PI");
        form.documents.upload_pre_shipment("Invoice123.pdf").unwrap();
        assert!(validator.validate(&form, FlowKind::Send, true).is_valid());
    }

    #[test]
    fn test_unknown_nature_is_invalid() {
        let mut form = valid_post_shipment_form();
        form.nature = "in_transit".to_string();

        let validation = FormValidator::default().validate(&form, FlowKind::Send, false);
        assert_eq!(
            validation.verdict.error(FieldId::Nature),
            Some(&ErrorReason::Invalid {
                value: "in_transit".to_string()
            })
        );
    }

    #[test]
    fn test_purpose_others_requires_free_text() {
        let mut form = valid_post_shipment_form();
        form.select_purpose("others");
        form.purpose_other = "   ".to_string();

        let validator = FormValidator::default();
        let validation = validator.validate(&form, FlowKind::Send, true);
        assert_eq!(
            validation.verdict.error(FieldId::PurposeOther),
            Some(&ErrorReason::Required)
        );
        assert!(validation.verdict.error(FieldId::Purpose).is_none());

        form.purpose_other = "Trade show samples".to_string();
        assert!(validator.validate(&form, FlowKind::Send, true).is_valid());
    }

    #[test]
    fn test_request_flow_amount_below_minimum() {
        let mut form = valid_post_shipment_form();
        form.amount = "40".to_string();
        form.expires_after = "7 days".to_string();

        let validation = FormValidator::default().validate(&form, FlowKind::Request, false);
        assert!(!validation.is_valid());
        let reason = validation.verdict.error(FieldId::Amount).unwrap();
        assert_eq!(
            reason,
            &ErrorReason::BelowMinimum {
                minimum: Amount::from(60u64)
            }
        );
        assert_eq!(reason.to_string(), "Amount is below 60 minimum per transaction");
        // visible before any submit attempt
        assert!(validation.displayed_errors().contains_key(&FieldId::Amount));
    }

    #[test]
    fn test_send_flow_minimum_is_fifty() {
        let mut form = valid_post_shipment_form();
        let validator = FormValidator::default();

        form.amount = "50".to_string();
        assert!(validator.validate(&form, FlowKind::Send, false).is_valid());

        form.amount = "49.99".to_string();
        let validation = validator.validate(&form, FlowKind::Send, false);
        assert!(matches!(
            validation.verdict.error(FieldId::Amount),
            Some(ErrorReason::BelowMinimum { .. })
        ));
    }

    #[test]
    fn test_amount_at_maximum_is_rejected() {
        let mut form = valid_post_shipment_form();
        form.amount = "1,000,000".to_string();
        form.payer_account = usd_account(10_000_000);

        let validation = FormValidator::default().validate(&form, FlowKind::Send, false);
        let reason = validation.verdict.error(FieldId::Amount).unwrap();
        assert_eq!(
            reason.to_string(),
            "Amount exceeds 1,000,000 maximum per transaction"
        );
        assert!(validation.fees.is_above_maximum);
    }

    #[test]
    fn test_malformed_and_non_positive_amounts() {
        let mut form = valid_post_shipment_form();
        let validator = FormValidator::default();

        form.amount = "12abc".to_string();
        assert!(matches!(
            validator
                .validate(&form, FlowKind::Send, true)
                .verdict
                .error(FieldId::Amount),
            Some(ErrorReason::Invalid { .. })
        ));

        form.amount = "0".to_string();
        assert_eq!(
            validator
                .validate(&form, FlowKind::Send, true)
                .verdict
                .error(FieldId::Amount),
            Some(&ErrorReason::Required)
        );

        form.amount = "-100".to_string();
        assert!(matches!(
            validator
                .validate(&form, FlowKind::Send, true)
                .verdict
                .error(FieldId::Amount),
            Some(ErrorReason::Invalid { .. })
        ));
    }

    #[test]
    fn test_expiry_required_only_for_request_flow() {
        let form = valid_post_shipment_form();
        let validator = FormValidator::default();

        assert!(validator.validate(&form, FlowKind::Send, true).is_valid());

        let validation = validator.validate(&form, FlowKind::Request, true);
        assert_eq!(
            validation.verdict.error(FieldId::ExpiresAfter),
            Some(&ErrorReason::Required)
        );
    }

    #[test]
    fn test_conversion_consent_required_for_usdt() {
        let mut form = valid_post_shipment_form();
        let validator = FormValidator::default();
        form.select_payer_account(
            Some(PayerAccount {
                currency: Currency::Usdt,
                balance: Amount::from(1_000_000u64),
            }),
            &Currency::Usdt,
        );

        let validation = validator.validate(&form, FlowKind::Send, true);
        assert_eq!(
            validation.verdict.error(FieldId::ConversionConsent),
            Some(&ErrorReason::Required)
        );

        form.conversion_consent = true;
        assert!(validator.validate(&form, FlowKind::Send, true).is_valid());
    }

    #[test]
    fn test_insufficient_balance_counts_payer_fee() {
        let mut form = valid_post_shipment_form();
        // 10,000 + 100 fee > 10,050
        form.payer_account = usd_account(10_050);

        let validator = FormValidator::default();
        let validation = validator.validate(&form, FlowKind::Send, false);
        let reason = validation.verdict.error(FieldId::Balance).unwrap();
        assert_eq!(reason.to_string(), "Amount + fee (10,100.00) exceeds balance");
        assert!(validation.displayed_errors().contains_key(&FieldId::Balance));

        // receiver pays: 10,000 fits
        form.fee_mode = FeeMode::ReceiverPays;
        assert!(validator.validate(&form, FlowKind::Send, false).is_valid());
    }

    #[test]
    fn test_largest_amount_does_not_overflow_total() {
        let mut form = valid_post_shipment_form();
        form.amount = "79,228,162,514,264,337,593,543,950,335".to_string();
        form.payer_account = usd_account(1);

        for flow in [FlowKind::Send, FlowKind::Request] {
            let validation = FormValidator::default().validate(&form, flow, true);
            assert!(!validation.is_valid());
            assert!(validation.fees.is_above_maximum);
            assert_eq!(validation.fees.actual_service_fee, Amount::from(2500u64));
            assert!(matches!(
                validation.verdict.error(FieldId::Amount),
                Some(ErrorReason::AboveMaximum { .. })
            ));
            assert!(matches!(
                validation.verdict.error(FieldId::Balance),
                Some(ErrorReason::InsufficientBalance { .. })
            ));
        }

        let summary = FormValidator::default().derive_summary(&form, FlowKind::Send);
        assert_eq!(summary.payer_total, Amount::MAX);
    }

    #[test]
    fn test_errors_hidden_until_submit_attempt() {
        let mut form = valid_post_shipment_form();
        form.purpose.clear();

        let validator = FormValidator::default();
        let before = validator.validate(&form, FlowKind::Send, false);
        assert!(!before.is_valid());
        assert!(before.displayed_errors().is_empty());
        assert!(!before.shows_submit_error());

        let after = validator.validate(&form, FlowKind::Send, true);
        assert_eq!(after.verdict, before.verdict);
        assert!(after.displayed_errors().contains_key(&FieldId::Purpose));
        assert!(after.shows_submit_error());
    }

    #[test]
    fn test_field_id_text_round_trip() {
        for field in [
            FieldId::Nature,
            FieldId::PurposeOther,
            FieldId::PostShipment(PostShipmentDocument::TransportDocument),
            FieldId::Balance,
        ] {
            assert_eq!(FieldId::from_str(&field.to_string()).unwrap(), field);
        }
        assert!(FieldId::from_str("post_shipment_bogus").is_err());
    }

    #[test]
    fn test_verdict_serializes_with_string_keys() {
        let validation =
            FormValidator::default().validate(&PaymentFormState::default(), FlowKind::Request, true);
        let json = serde_json::to_value(&validation.verdict).unwrap();

        assert_eq!(json["is_valid"], false);
        assert_eq!(json["field_errors"]["amount"]["reason"], "required");
        assert_eq!(json["field_errors"]["expires_after"]["reason"], "required");
    }
}
