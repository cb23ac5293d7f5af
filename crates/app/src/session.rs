//! A player's loadout bound to a save and an event bus.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use satchel_catalog::{Item, ItemCatalog};
use satchel_core::{DomainError, Entity, ItemId, Quantity};
use satchel_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use satchel_inventory::{Loadout, SlotRef};
use satchel_persistence::{JsonFileSaveStore, PersistenceError, SaveStore, SavingSystem};
use satchel_transfer::{Container, TransferEngine, TransferEvent, TransferOutcome, TransferRequest};

use crate::config::AppConfig;

pub type TransferEnvelope = EventEnvelope<TransferEvent<SlotRef>>;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not read catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// One run against a save.
///
/// Envelope sequence numbers count the transfers of this session only and
/// start again at 1 in the next one; the save does not record them.
pub struct Session<S> {
    catalog: ItemCatalog,
    loadout: Loadout,
    saving: SavingSystem<S>,
    save_name: String,
    engine: TransferEngine,
    bus: Arc<InMemoryEventBus<TransferEnvelope>>,
    sequence: u64,
}

impl Session<JsonFileSaveStore> {
    /// Load the catalog, build the loadout and restore it from the save.
    pub fn open(config: &AppConfig) -> SessionResult<Self> {
        let json = std::fs::read_to_string(&config.catalog_path).map_err(|source| SessionError::Catalog {
            path: config.catalog_path.clone(),
            source,
        })?;
        let catalog = ItemCatalog::from_json(&json)?;
        let loadout = Loadout::new(config.player_id, &config.loadout)?;
        let saving = SavingSystem::new(JsonFileSaveStore::new(&config.save_dir));

        let mut session = Session::new(catalog, loadout, saving, config.save_name.clone());
        session.load()?;
        Ok(session)
    }
}

impl<S: SaveStore> Session<S> {
    pub fn new(catalog: ItemCatalog, loadout: Loadout, saving: SavingSystem<S>, save_name: String) -> Self {
        Self {
            catalog,
            loadout,
            saving,
            save_name,
            engine: TransferEngine::new(),
            bus: Arc::new(InMemoryEventBus::new()),
            sequence: 0,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    /// Sequence number of the last published envelope, `0` before any.
    pub fn last_sequence(&self) -> u64 {
        self.sequence
    }

    pub fn subscribe(&self) -> Subscription<TransferEnvelope> {
        self.bus.subscribe()
    }

    /// Restore the loadout from the save. Returns `false` when the save has
    /// nothing for it yet.
    pub fn load(&mut self) -> SessionResult<bool> {
        let restored = self
            .saving
            .load(&self.save_name, &mut [&mut self.loadout], &self.catalog)?;
        Ok(restored > 0)
    }

    pub fn save(&self) -> SessionResult<()> {
        self.saving.save(&self.save_name, &[&self.loadout])?;
        Ok(())
    }

    /// Complete a drag from `source` onto `destination` and announce it.
    pub fn drag(&mut self, source: SlotRef, destination: SlotRef) -> SessionResult<TransferOutcome> {
        let request = TransferRequest::new(source, destination);
        let outcome = self.engine.execute(&mut self.loadout, request)?;
        self.publish(TransferEvent::from_outcome(request, &outcome, Utc::now()));
        Ok(outcome)
    }

    /// Put catalog item `item_id` into the inventory, as a pickup would.
    /// Returns `false` if the inventory cannot hold all of it.
    pub fn give(&mut self, item_id: ItemId, quantity: Quantity) -> SessionResult<bool> {
        let item = self.catalog.require(&item_id)?;
        let added = self
            .loadout
            .inventory_mut()
            .add_to_first_empty_slot(&item, quantity);
        if added {
            tracing::info!(item = %item.display_name, quantity, "item given");
        } else {
            tracing::warn!(item = %item.display_name, quantity, "inventory full");
        }
        Ok(added)
    }

    pub fn use_action(&mut self, slot: usize) -> SessionResult<Option<Item>> {
        Ok(self.loadout.action_bar_mut().use_action(slot)?)
    }

    fn publish(&mut self, event: TransferEvent<SlotRef>) {
        self.sequence += 1;
        let event_type = event.event_type();
        let envelope = EventEnvelope::new(*self.loadout.id(), self.sequence, event);
        match self.bus.publish(envelope) {
            Ok(()) => tracing::debug!(event_type, sequence = self.sequence, "published"),
            Err(e) => tracing::warn!(event_type, error = ?e, "event not published"),
        }
    }

    /// Text view of every occupied slot.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut line = |slot: SlotRef| {
            if let Some(stack) = self.loadout.content(slot) {
                let label = slot.to_string();
                let _ = writeln!(out, "{label:<16} {} x{}", stack.item.display_name, stack.quantity);
            }
        };

        for cell in 0..self.loadout.inventory().len() {
            line(SlotRef::Inventory(cell));
        }
        for (location, _) in self.loadout.equipment().equipped() {
            line(SlotRef::Equipment(location));
        }
        for slot in 0..self.loadout.action_bar().len() {
            line(SlotRef::Action(slot));
        }
        for record in self.loadout.world().drops() {
            let name = self
                .catalog
                .get(&record.item_id)
                .map(|item| item.display_name.clone())
                .unwrap_or_else(|| record.item_id.to_string());
            let _ = writeln!(out, "{:<16} {} x{}", SlotRef::World.to_string(), name, record.quantity);
        }
        if out.is_empty() {
            out.push_str("(empty)\n");
        }
        out
    }
}
