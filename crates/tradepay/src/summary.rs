//! Payment summary
//!
//! Read-only figures and labels shown next to the payment form and on the
//! review screen. Nothing here affects validity.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::fees::FeeBreakdown;
use crate::form::{DocumentType, Nature, PaymentFormState};
use crate::validation::FormValidator;
use crate::{Amount, Currency, FlowKind};

/// Render an amount with its currency, e.g. `1,234.50 USD`
pub fn format_amount(amount: Amount, currency: &Currency) -> String {
    format!("{} {}", amount.to_display_string(), currency)
}

/// Render a rate as a percentage with two decimals, e.g. `0.50%`
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", (rate * Decimal::ONE_HUNDRED).round_dp(2))
}

/// What the paying side is charged
///
/// Send: amount plus the payer's fee share. Request: amount plus the
/// receiver's share, the customer being the one who pays. `None` when the
/// total does not fit in an [`Amount`].
pub fn payer_total(amount: Amount, fees: &FeeBreakdown, flow: FlowKind) -> Option<Amount> {
    match flow {
        FlowKind::Send => amount.checked_add(fees.payer_fee),
        FlowKind::Request => amount.checked_add(fees.receiver_fee),
    }
}

/// What the receiving side gets
///
/// Send: amount minus the receiver's fee share. Request: amount minus the
/// requester's share, never below zero.
pub fn payee_receives(amount: Amount, fees: &FeeBreakdown, flow: FlowKind) -> Amount {
    match flow {
        FlowKind::Send => amount.saturating_sub(fees.receiver_fee),
        FlowKind::Request => amount.saturating_sub(fees.payer_fee).non_negative(),
    }
}

/// Currency conversion applied between payer and payee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionQuote {
    /// Payer currency
    pub from: Currency,
    /// Payee currency
    pub to: Currency,
    /// Units of `to` per unit of `from`
    pub rate: Decimal,
    /// Conversion fee rate
    pub fee_rate: Decimal,
}

impl ConversionQuote {
    /// Fixed 1:1 quote with no conversion fee
    pub fn at_par(from: Currency, to: Currency) -> Self {
        Self {
            from,
            to,
            rate: Decimal::ONE,
            fee_rate: Decimal::ZERO,
        }
    }
}

impl fmt::Display for ConversionQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.from, self.rate.normalize(), self.to)
    }
}

/// A supporting document as listed on the review screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedDocument {
    /// Document title
    pub title: String,
    /// Uploaded file, if any
    pub file_name: Option<String>,
    /// The user declared the document missing
    pub declared_missing: bool,
}

/// Summary derived from a form snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Flow the summary was derived for
    pub flow: FlowKind,
    /// Parsed amount, zero when not parseable
    pub subtotal: Amount,
    /// Nominal fee rate of the flow
    pub fee_rate: Decimal,
    /// Fee breakdown
    pub fees: FeeBreakdown,
    /// Charged to the paying side
    pub payer_total: Amount,
    /// Credited to the receiving side
    pub payee_receives: Amount,
    /// Currency of the paying account
    pub payer_currency: Currency,
    /// Currency the payee is paid in
    pub payee_currency: Currency,
    /// Label of the payer's fee share
    pub payer_share_label: String,
    /// Label of the counterparty's fee share
    pub receiver_share_label: String,
    /// Present when payer and payee currencies differ
    pub conversion: Option<ConversionQuote>,
    /// Per-transaction limit hint shown under the amount field
    pub limit_hint: String,
    /// Purpose as displayed
    pub purpose: String,
    /// Nature of payment, when valid
    pub nature: Option<Nature>,
    /// Supporting documents to list
    pub attached_documents: Vec<AttachedDocument>,
    /// Confirmation for post-shipment documents declared missing
    pub missing_declaration: Option<String>,
}

impl PaymentSummary {
    /// `payer_total` with its currency
    pub fn payer_total_display(&self) -> String {
        format_amount(self.payer_total, &self.payer_currency)
    }

    /// `payee_receives` with its currency
    pub fn payee_receives_display(&self) -> String {
        format_amount(self.payee_receives, &self.payee_currency)
    }
}

impl FormValidator {
    /// Derive the summary for a form snapshot
    #[instrument(skip(self, state))]
    pub fn derive_summary(&self, state: &PaymentFormState, flow: FlowKind) -> PaymentSummary {
        let settings = self.settings();
        let subtotal = state.amount_or_zero();
        let fee_rate = settings.rates.for_flow(flow);
        let shares = state.fee_mode.shares(fee_rate);
        let fees = self.fees(state, flow);

        let payee_currency = settings.currencies.payee.clone();
        let payer_currency = state
            .payer_account
            .as_ref()
            .map(|account| account.currency.clone())
            .unwrap_or_else(|| payee_currency.clone());

        let counterparty = flow.counterparty_label();
        let (payer_share_label, receiver_share_label) = match flow {
            FlowKind::Request => (
                "• Paid by you".to_string(),
                format!("• Paid by {counterparty}"),
            ),
            FlowKind::Send if fees.is_clamped() => (
                "Paid by you".to_string(),
                format!("Paid by {counterparty}"),
            ),
            FlowKind::Send => (
                format!("{} paid by you", format_rate(shares.payer_rate)),
                format!(
                    "{} paid by {counterparty}",
                    format_rate(shares.receiver_rate)
                ),
            ),
        };

        let conversion = (payer_currency != payee_currency)
            .then(|| ConversionQuote::at_par(payer_currency.clone(), payee_currency.clone()));

        let limits = &settings.limits;
        let limit_hint = format!(
            "Min/max per transaction {} - {}",
            limits.min_for_flow(flow).to_limit_string(),
            limits.max_per_transaction.to_limit_string()
        );

        PaymentSummary {
            flow,
            subtotal,
            fee_rate,
            payer_total: payer_total(subtotal, &fees, flow).unwrap_or(Amount::MAX),
            payee_receives: payee_receives(subtotal, &fees, flow),
            fees,
            payer_currency,
            payee_currency,
            payer_share_label,
            receiver_share_label,
            conversion,
            limit_hint,
            purpose: state.effective_purpose().to_string(),
            nature: state.nature(),
            attached_documents: attached_documents(state),
            missing_declaration: match state.nature() {
                Some(Nature::PostShipment) => state
                    .documents
                    .post_shipment
                    .missing_declaration()
                    .map(|declaration| declaration.title()),
                _ => None,
            },
        }
    }
}

fn attached_documents(state: &PaymentFormState) -> Vec<AttachedDocument> {
    let documents = &state.documents;
    match state.nature() {
        Some(Nature::PreShipment) => {
            let Ok(document_type) = documents.document_type.parse::<DocumentType>() else {
                return Vec::new();
            };
            match documents.pre_shipment.file_name() {
                Some(file_name) => vec![AttachedDocument {
                    title: document_type.title().to_string(),
                    file_name: Some(file_name.to_string()),
                    declared_missing: false,
                }],
                None => Vec::new(),
            }
        }
        Some(Nature::PostShipment) => documents
            .post_shipment
            .iter()
            .filter(|(_, slot)| slot.is_settled())
            .map(|(document, slot)| AttachedDocument {
                title: document.title().to_string(),
                file_name: slot.file_name().map(str::to_string),
                declared_missing: slot.is_declared_missing(),
            })
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::fees::FeeMode;
    use crate::form::{PayerAccount, PostShipmentDocument};

    fn form(amount: &str, fee_mode: FeeMode) -> PaymentFormState {
        PaymentFormState {
            amount: amount.to_string(),
            fee_mode,
            payer_account: Some(PayerAccount {
                currency: Currency::Usd,
                balance: Amount::from(1_000_000u64),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(
            format_amount(Amount::from(dec!(1234.5)), &Currency::Usd),
            "1,234.50 USD"
        );
        assert_eq!(format_amount(Amount::ZERO, &Currency::Usdt), "0.00 USDT");
        assert_eq!(format_rate(dec!(0.005)), "0.50%");
    }

    #[test]
    fn test_send_split_summary() {
        let summary =
            FormValidator::default().derive_summary(&form("10,000", FeeMode::Split), FlowKind::Send);

        assert_eq!(summary.subtotal, Amount::from(10_000u64));
        assert_eq!(summary.payer_total, Amount::from(dec!(10050)));
        assert_eq!(summary.payee_receives, Amount::from(dec!(9950)));
        assert_eq!(summary.payer_share_label, "0.50% paid by you");
        assert_eq!(summary.receiver_share_label, "0.50% paid by receiver");
        assert_eq!(summary.limit_hint, "Min/max per transaction 50 - 1,000,000");
        assert_eq!(summary.payer_total_display(), "10,050.00 USD");
        assert!(summary.conversion.is_none());
    }

    #[test]
    fn test_clamped_fee_hides_percentages() {
        let summary =
            FormValidator::default().derive_summary(&form("100", FeeMode::PayerPays), FlowKind::Send);

        assert!(summary.fees.is_below_minimum);
        assert_eq!(summary.payer_share_label, "Paid by you");
        assert_eq!(summary.receiver_share_label, "Paid by receiver");
        assert_eq!(summary.payer_total, Amount::from(125u64));
    }

    #[test]
    fn test_request_summary_uses_customer_labels_and_floors() {
        let summary = FormValidator::default()
            .derive_summary(&form("10", FeeMode::PayerPays), FlowKind::Request);

        assert_eq!(summary.payer_share_label, "• Paid by you");
        assert_eq!(summary.receiver_share_label, "• Paid by customer");
        // requester carries the 25 minimum fee on a 10 request
        assert_eq!(summary.payee_receives, Amount::ZERO);
        assert_eq!(summary.payer_total, Amount::from(10u64));
        assert_eq!(summary.limit_hint, "Min/max per transaction 60 - 1,000,000");
    }

    #[test]
    fn test_usdt_account_shows_conversion() {
        let mut state = form("500", FeeMode::PayerPays);
        state.payer_account = Some(PayerAccount {
            currency: Currency::Usdt,
            balance: Amount::from(1_000u64),
        });

        let summary = FormValidator::default().derive_summary(&state, FlowKind::Send);
        let quote = summary.conversion.as_ref().unwrap();
        assert_eq!(quote.to_string(), "1 USDT = 1 USD");
        assert_eq!(quote.fee_rate, Decimal::ZERO);
        assert_eq!(summary.payee_receives_display(), "500.00 USD");
    }

    #[test]
    fn test_attached_post_shipment_documents() {
        let mut state = form("500", FeeMode::PayerPays);
        state.nature = "post_shipment".to_string();
        let post = &mut state.documents.post_shipment;
        post.upload(PostShipmentDocument::CommercialInvoice, "ci.pdf")
            .unwrap();
        post.set_declared_missing(PostShipmentDocument::PackingList, true)
            .unwrap();

        let summary = FormValidator::default().derive_summary(&state, FlowKind::Send);
        assert_eq!(summary.attached_documents.len(), 2);
        assert_eq!(
            summary.attached_documents[0].file_name.as_deref(),
            Some("ci.pdf")
        );
        assert!(summary.attached_documents[1].declared_missing);
        assert!(summary.attached_documents[1].file_name.is_none());
        assert_eq!(
            summary.missing_declaration.as_deref(),
            Some("By proceeding, I confirm that this payment does not involve any packing lists")
        );

        // only post-shipment payments carry the declaration
        state.nature = "pre_shipment".to_string();
        let summary = FormValidator::default().derive_summary(&state, FlowKind::Send);
        assert!(summary.missing_declaration.is_none());
    }

    #[test]
    fn test_attached_pre_shipment_document() {
        let mut state = form("500", FeeMode::PayerPays);
        state.select_nature("pre_shipment");
        state.documents.select_document_type("PI");
        state.documents.upload_pre_shipment("Invoice123.pdf").unwrap();

        let summary = FormValidator::default().derive_summary(&state, FlowKind::Send);
        assert_eq!(
            summary.attached_documents,
            vec![AttachedDocument {
                title: "Proforma invoice (PI)".to_string(),
                file_name: Some("Invoice123.pdf".to_string()),
                declared_missing: false,
            }]
        );
    }
}
