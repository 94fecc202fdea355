use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use tradepay::review::ReviewScenarioInfo;
use tradepay::ReviewScenario;

#[derive(Args)]
pub struct ScenariosSubCommand {
    /// Only show the scenario with this key
    #[arg(short, long)]
    key: Option<String>,
}

pub fn scenarios(sub_command_args: &ScenariosSubCommand) -> Result<()> {
    let scenarios: Vec<ReviewScenarioInfo> = match &sub_command_args.key {
        Some(key) => vec![ReviewScenario::from_str(key)?.info()],
        None => ReviewScenario::all().map(|scenario| scenario.info()).collect(),
    };

    println!("{}", serde_json::to_string_pretty(&scenarios)?);
    Ok(())
}
