//! Owned, read-only lookup of item descriptors by id.

use std::collections::HashMap;
use std::sync::Arc;

use satchel_core::{DomainError, DomainResult, ItemId};

use crate::descriptor::{Item, ItemDescriptor};

/// Item catalog.
///
/// Built once by whoever loads item definitions and passed by reference to
/// anything that must turn a persisted [`ItemId`] back into an [`Item`].
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemId, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting invalid descriptors and duplicate ids.
    pub fn from_descriptors<I>(descriptors: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = ItemDescriptor>,
    {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.insert(descriptor)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of descriptors.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let descriptors: Vec<ItemDescriptor> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("item catalog: {e}")))?;
        let catalog = Self::from_descriptors(descriptors)?;
        tracing::debug!(items = catalog.len(), "item catalog loaded");
        Ok(catalog)
    }

    /// Add a descriptor and return its shared handle.
    pub fn insert(&mut self, descriptor: ItemDescriptor) -> DomainResult<Item> {
        descriptor.validate()?;
        if let Some(existing) = self.items.get(&descriptor.id) {
            return Err(DomainError::conflict(format!(
                "duplicate item id {} ('{}' and '{}')",
                descriptor.id, existing.display_name, descriptor.display_name
            )));
        }
        let item = Arc::new(descriptor);
        self.items.insert(item.id, Arc::clone(&item));
        Ok(item)
    }

    pub fn get(&self, id: &ItemId) -> Option<Item> {
        self.items.get(id).cloned()
    }

    /// Like [`get`](Self::get) but a missing id is an error.
    pub fn require(&self, id: &ItemId) -> DomainResult<Item> {
        self.get(id)
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ItemKind;

    #[test]
    fn insert_then_get_returns_shared_handle() {
        let mut catalog = ItemCatalog::new();
        let id = ItemId::new();
        let inserted = catalog
            .insert(ItemDescriptor::new(id, "Rope").stackable(true))
            .unwrap();

        let fetched = catalog.get(&id).unwrap();
        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn duplicate_ids_are_a_conflict() {
        let id = ItemId::new();
        let err = ItemCatalog::from_descriptors([
            ItemDescriptor::new(id, "Rope"),
            ItemDescriptor::new(id, "Other rope"),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn require_reports_missing_ids() {
        let catalog = ItemCatalog::new();
        let err = catalog.require(&ItemId::new()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn from_json_reads_descriptor_array() {
        let potion = ItemId::new();
        let helm = ItemId::new();
        let json = serde_json::json!([
            { "id": potion, "display_name": "Potion", "stackable": true,
              "kind": { "kind": "action", "consumable": true } },
            { "id": helm, "display_name": "Helm",
              "kind": { "kind": "equipable", "locations": ["helm"] } }
        ])
        .to_string();

        let catalog = ItemCatalog::from_json(&json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get(&potion).unwrap().is_consumable());
        assert_eq!(
            catalog.get(&helm).unwrap().kind,
            ItemKind::Equipable { locations: vec![crate::EquipLocation::Helm] }
        );
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = ItemCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
