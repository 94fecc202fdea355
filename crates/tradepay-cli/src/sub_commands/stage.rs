use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use tradepay::stage::{verified_only, CounterpartyContact, CounterpartyList};
use tradepay::{Stage, StageStore};

use crate::file_storage::FileStorage;

#[derive(Args)]
pub struct StageSubCommand {
    #[command(subcommand)]
    command: StageCommand,
}

#[derive(Subcommand)]
enum StageCommand {
    /// Print the current stage
    Get,
    /// Set the stage, clamped to 1..=6
    Set {
        /// New stage
        #[arg(allow_hyphen_values = true)]
        stage: i64,
        /// Notify listeners even if the stage does not change
        #[arg(long)]
        force: bool,
    },
    /// Move the stage up or down
    Step {
        /// Number of steps, negative to go down
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// List every stage with its label
    Labels,
    /// List the counterparties shown at the current stage
    Counterparties {
        /// Show the customer list instead of bank accounts
        #[arg(long)]
        customers: bool,
        /// Only verified counterparties
        #[arg(long)]
        verified: bool,
    },
}

fn print_stage(stage: Stage) {
    println!("{} {}", stage, stage.label());
}

pub fn stage(work_dir: &Path, sub_command_args: &StageSubCommand) -> Result<()> {
    let store = StageStore::new(FileStorage::new(work_dir));

    match &sub_command_args.command {
        StageCommand::Get => {
            let stage = store.get();
            print_stage(stage);
            if let Some(request) = stage.pending_request() {
                println!("{}: {}", request.title, request.status);
            }
            println!("Transaction: {}", stage.transaction_status());
        }
        StageCommand::Set { stage, force } => {
            let _subscription = store.subscribe(|current| {
                tracing::info!("Stage is {} ({})", current, current.label());
                Ok(())
            });
            print_stage(store.set(*stage, *force));
        }
        StageCommand::Step { delta } => {
            let current = store.get();
            if (*delta > 0 && !current.can_step_up()) || (*delta < 0 && !current.can_step_down()) {
                tracing::warn!("Stage {} is already at the bound", current);
            }
            print_stage(store.delta(*delta));
        }
        StageCommand::Labels => {
            for stage in Stage::ALL {
                print_stage(stage);
            }
        }
        StageCommand::Counterparties {
            customers,
            verified,
        } => {
            let list = if *customers {
                CounterpartyList::Customers
            } else {
                CounterpartyList::Counterparties
            };
            let mut items = store.get().counterparties(list);
            if items.is_empty() {
                println!("{}", list.empty_title());
                println!("{}", list.empty_text());
                return Ok(());
            }
            if *verified {
                items = verified_only(&items);
            }
            if items.is_empty() {
                println!("No verified accounts");
            }
            for item in items {
                let contact = match item.contact {
                    CounterpartyContact::Email { email } => email.to_string(),
                    CounterpartyContact::BankAccount { bank, account } => {
                        format!("({bank}) {account}")
                    }
                };
                println!("{} {} {}", item.title, contact, item.status.label(list));
            }
        }
    }

    Ok(())
}
