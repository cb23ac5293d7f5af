use satchel_catalog::ItemCatalog;

use crate::error::PersistenceResult;
use crate::saveable::SaveableEntity;
use crate::store::SaveStore;

/// Saves and restores a set of entities through a [`SaveStore`].
///
/// Saving merges into the existing file, so entities that are not part of
/// this call keep whatever state the save already had for them.
#[derive(Debug)]
pub struct SavingSystem<S> {
    store: S,
}

impl<S: SaveStore> SavingSystem<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&self, name: &str, entities: &[&dyn SaveableEntity]) -> PersistenceResult<()> {
        let mut file = self.store.load(name)?;
        for entity in entities {
            file.put(*entity.id(), entity.capture()?);
        }
        self.store.write(name, &file)?;
        tracing::info!(save = name, entities = entities.len(), "saved");
        Ok(())
    }

    /// Restore every entity the save has state for. Returns how many were
    /// restored; the rest are left as they are.
    pub fn load(
        &self,
        name: &str,
        entities: &mut [&mut dyn SaveableEntity],
        catalog: &ItemCatalog,
    ) -> PersistenceResult<usize> {
        let file = self.store.load(name)?;
        let mut restored = 0;
        for entity in entities.iter_mut() {
            if let Some(state) = file.entity(entity.id()) {
                entity.restore(state, catalog)?;
                restored += 1;
            }
        }
        tracing::info!(save = name, restored, "loaded");
        Ok(restored)
    }

    pub fn delete(&self, name: &str) -> PersistenceResult<()> {
        self.store.delete(name)?;
        tracing::info!(save = name, "deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::saveable::{EntityState, SaveFile, decode_state};
    use crate::store::InMemorySaveStore;
    use satchel_core::{Entity, EntityId};
    use serde_json::json;

    struct Chest {
        id: EntityId,
        coins: u32,
    }

    impl Entity for Chest {
        type Id = EntityId;

        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    impl SaveableEntity for Chest {
        fn capture(&self) -> PersistenceResult<EntityState> {
            let mut state = EntityState::new();
            state.insert("coins", json!(self.coins));
            Ok(state)
        }

        fn restore(&mut self, state: &EntityState, _catalog: &ItemCatalog) -> PersistenceResult<()> {
            if let Some(v) = state.get("coins") {
                self.coins = decode_state("coins", v.clone())?;
            }
            Ok(())
        }
    }

    #[test]
    fn save_then_load_restores_matching_entities() {
        let system = SavingSystem::new(InMemorySaveStore::new());
        let a = Chest { id: EntityId::new(), coins: 5 };
        let b = Chest { id: EntityId::new(), coins: 9 };
        system.save("quick", &[&a, &b]).unwrap();

        let mut a2 = Chest { id: a.id, coins: 0 };
        let mut stranger = Chest { id: EntityId::new(), coins: 42 };
        let restored = system
            .load("quick", &mut [&mut a2, &mut stranger], &ItemCatalog::new())
            .unwrap();

        assert_eq!(restored, 1);
        assert_eq!(a2.coins, 5);
        assert_eq!(stranger.coins, 42);
    }

    #[test]
    fn save_merges_with_existing_file() {
        let system = SavingSystem::new(InMemorySaveStore::new());
        let a = Chest { id: EntityId::new(), coins: 1 };
        let b = Chest { id: EntityId::new(), coins: 2 };
        system.save("slot", &[&a]).unwrap();
        system.save("slot", &[&b]).unwrap();

        let file: SaveFile = system.store().load("slot").unwrap();
        assert_eq!(file.len(), 2);
    }

    #[test]
    fn delete_forgets_the_save() {
        let system = SavingSystem::new(InMemorySaveStore::new());
        let a = Chest { id: EntityId::new(), coins: 3 };
        system.save("gone", &[&a]).unwrap();
        system.delete("gone").unwrap();

        let mut a2 = Chest { id: a.id, coins: 0 };
        let restored = system
            .load("gone", &mut [&mut a2], &ItemCatalog::new())
            .unwrap();
        assert_eq!(restored, 0);
        assert_eq!(a2.coins, 0);
    }

    #[test]
    fn invalid_name_propagates() {
        let system = SavingSystem::new(InMemorySaveStore::new());
        let err = system.delete("../etc").unwrap_err();
        match err {
            PersistenceError::InvalidName(_) => {}
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }
}
