use anyhow::Context;
use clap::{Parser, Subcommand};

use satchel_app::{AppConfig, Session};
use satchel_core::{ItemId, Quantity};
use satchel_events::Event;
use satchel_inventory::SlotRef;

#[derive(Parser)]
#[command(name = "satchel")]
#[command(version)]
#[command(about = "Move items between inventory, equipment and action bar slots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every occupied slot
    Show,

    /// Add catalog items to the inventory
    Give {
        item_id: ItemId,
        quantity: Quantity,
    },

    /// Drag a stack from one slot onto another (e.g. `inv:0 action:2`)
    Move { from: SlotRef, to: SlotRef },

    /// Trigger the action docked in a slot
    Use { slot: usize },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("invalid configuration")?;
    satchel_observability::init_with_filter(&config.log_filter);

    let mut session = Session::open(&config).context("could not open session")?;
    let events = session.subscribe();

    let mutated = match cli.command {
        Command::Show => {
            print!("{}", session.render());
            false
        }
        Command::Give { item_id, quantity } => {
            let added = session.give(item_id, quantity)?;
            if !added {
                println!("inventory cannot hold {quantity} of {item_id}");
            }
            added
        }
        Command::Move { from, to } => {
            let outcome = session.drag(from, to)?;
            if let Some(reason) = outcome.no_op_reason() {
                println!("nothing moved: {}", reason.as_str());
            }
            outcome.moved()
        }
        Command::Use { slot } => {
            match session.use_action(slot)? {
                Some(item) => println!("used {}", item.display_name),
                None => println!("action slot {slot} is empty"),
            }
            true
        }
    };

    for envelope in events.drain() {
        tracing::info!(
            event_type = envelope.payload().event_type(),
            sequence = envelope.sequence_number(),
            touched = ?envelope.payload().touched(),
            "transfer event"
        );
    }

    tracing::debug!(transfers = session.last_sequence(), mutated, "command finished");
    if mutated {
        session.save().context("could not write save")?;
    }
    Ok(())
}
