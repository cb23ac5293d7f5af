use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use satchel_catalog::ItemCatalog;
use satchel_core::{Entity, EntityId};

use crate::error::{PersistenceError, PersistenceResult};

/// A component whose state can be captured into, and restored from, an
/// opaque JSON value.
pub trait Saveable {
    /// Key of this component inside its entity's state.
    fn state_key(&self) -> &'static str;

    fn capture_state(&self) -> PersistenceResult<JsonValue>;

    /// Replace the component's state. Item ids are resolved through
    /// `catalog`; ids it does not know are skipped.
    fn restore_state(&mut self, state: JsonValue, catalog: &ItemCatalog) -> PersistenceResult<()>;
}

/// Decode a component's captured value into its typed record.
pub fn decode_state<T: DeserializeOwned>(key: &str, state: JsonValue) -> PersistenceResult<T> {
    serde_json::from_value(state).map_err(|e| PersistenceError::invalid_state(key, e.to_string()))
}

/// Captured state of one entity: component key → component state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityState {
    components: BTreeMap<String, JsonValue>,
}

impl EntityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every component.
    pub fn capture(components: &[&dyn Saveable]) -> PersistenceResult<Self> {
        let mut state = Self::new();
        for component in components {
            state
                .components
                .insert(component.state_key().to_string(), component.capture_state()?);
        }
        Ok(state)
    }

    /// Restore the components this state has an entry for; the others keep
    /// their current state.
    pub fn restore(
        &self,
        components: &mut [&mut dyn Saveable],
        catalog: &ItemCatalog,
    ) -> PersistenceResult<usize> {
        let mut restored = 0;
        for component in components.iter_mut() {
            if let Some(value) = self.components.get(component.state_key()) {
                component.restore_state(value.clone(), catalog)?;
                restored += 1;
            }
        }
        Ok(restored)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.components.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) {
        self.components.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// An owner of saveable components with a stable identity.
pub trait SaveableEntity: Entity<Id = EntityId> {
    fn capture(&self) -> PersistenceResult<EntityState>;

    fn restore(&mut self, state: &EntityState, catalog: &ItemCatalog) -> PersistenceResult<()>;
}

/// Everything one save holds: entity id → entity state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default)]
    entities: BTreeMap<EntityId, EntityState>,
}

impl SaveFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, id: &EntityId) -> Option<&EntityState> {
        self.entities.get(id)
    }

    pub fn put(&mut self, id: EntityId, state: EntityState) {
        self.entities.insert(id, state);
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<EntityState> {
        self.entities.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
