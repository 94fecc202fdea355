use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tradepay::{
    Amount, FeeBreakdown, FeeMode, FlowKind, FormValidator, PaymentFormState, PaymentSummary,
    Settings,
};

#[derive(Args)]
pub struct FeesSubCommand {
    /// Amount, thousands separators allowed
    #[arg(short, long)]
    amount: String,
    /// Who pays the fee: you, receiver or split
    #[arg(short, long, default_value = "you")]
    mode: FeeMode,
    /// Payment flow: send or request
    #[arg(short, long, default_value = "send")]
    flow: FlowKind,
}

#[derive(Serialize)]
struct FeesOutput {
    fees: FeeBreakdown,
    summary: PaymentSummary,
}

pub fn fees(settings: Settings, sub_command_args: &FeesSubCommand) -> Result<()> {
    // reject typos instead of quoting a zero amount
    Amount::parse_input(&sub_command_args.amount)?;

    let state = PaymentFormState {
        amount: sub_command_args.amount.clone(),
        fee_mode: sub_command_args.mode,
        ..Default::default()
    };

    let validator = FormValidator::new(settings);
    let output = FeesOutput {
        fees: validator.fees(&state, sub_command_args.flow),
        summary: validator.derive_summary(&state, sub_command_args.flow),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
