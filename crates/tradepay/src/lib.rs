//! Tradepay engine
//!
//! Service fee computation, send and request payment form validation, and the
//! persisted demo stage of a B2B cross-border payment product.
//!
//! The fee and validation functions are pure: they take raw field values and
//! return structured results for the presentation layer to render.

pub mod amount;
pub mod currency;
pub mod error;
pub mod fees;
pub mod flow;
pub mod form;
pub mod review;
pub mod settings;
pub mod stage;
pub mod summary;
pub mod validation;

pub use self::amount::Amount;
pub use self::currency::Currency;
pub use self::error::Error;
pub use self::fees::{compute_fees, FeeBreakdown, FeeMode, FeeSchedule, FeeShares};
pub use self::flow::FlowKind;
pub use self::form::{PayerAccount, PaymentFormState};
pub use self::review::ReviewScenario;
pub use self::settings::Settings;
pub use self::stage::{Stage, StageStorage, StageStore, Subscription};
pub use self::summary::{format_amount, PaymentSummary};
pub use self::validation::{ErrorReason, FieldId, FormValidator, Validation, ValidationVerdict};
