use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tradepay::{
    FieldId, FlowKind, FormValidator, PaymentFormState, PaymentSummary, Settings,
    ValidationVerdict,
};

/// Banner shown when a submit attempt is blocked
const SUBMIT_ERROR: &str = "Please check all required fields/errors";

#[derive(Args)]
pub struct ValidateSubCommand {
    /// JSON file with the form snapshot
    #[arg(long)]
    form: PathBuf,
    /// Payment flow: send or request
    #[arg(short, long, default_value = "send")]
    flow: FlowKind,
    /// Validate as if the user already pressed submit
    #[arg(long)]
    submitted: bool,
}

#[derive(Serialize)]
struct ValidateOutput {
    verdict: ValidationVerdict,
    displayed_errors: BTreeMap<FieldId, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    submit_error: Option<&'static str>,
    summary: PaymentSummary,
}

pub fn validate(settings: Settings, sub_command_args: &ValidateSubCommand) -> Result<()> {
    let contents = fs::read_to_string(&sub_command_args.form)?;
    let state: PaymentFormState = serde_json::from_str(&contents)?;

    let validator = FormValidator::new(settings);
    let validation = validator.validate(&state, sub_command_args.flow, sub_command_args.submitted);

    let output = ValidateOutput {
        displayed_errors: validation
            .displayed_errors()
            .into_iter()
            .map(|(field, reason)| (field, reason.to_string()))
            .collect(),
        submit_error: validation.shows_submit_error().then_some(SUBMIT_ERROR),
        summary: validator.derive_summary(&state, sub_command_args.flow),
        verdict: validation.verdict,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
