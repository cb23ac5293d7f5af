use std::sync::Arc;

use serde::{Deserialize, Serialize};

use satchel_core::{DomainError, DomainResult, ItemId};

/// Shared handle to an immutable item descriptor.
pub type Item = Arc<ItemDescriptor>;

/// Body location an equipable item can be worn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipLocation {
    Helm,
    Chest,
    Cape,
    Legs,
    Feet,
    Glove,
    Shoulders,
    Necklace,
    LeftRing,
    RightRing,
    MainHand,
    OffHand,
}

impl EquipLocation {
    pub const ALL: [EquipLocation; 12] = [
        EquipLocation::Helm,
        EquipLocation::Chest,
        EquipLocation::Cape,
        EquipLocation::Legs,
        EquipLocation::Feet,
        EquipLocation::Glove,
        EquipLocation::Shoulders,
        EquipLocation::Necklace,
        EquipLocation::LeftRing,
        EquipLocation::RightRing,
        EquipLocation::MainHand,
        EquipLocation::OffHand,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EquipLocation::Helm => "helm",
            EquipLocation::Chest => "chest",
            EquipLocation::Cape => "cape",
            EquipLocation::Legs => "legs",
            EquipLocation::Feet => "feet",
            EquipLocation::Glove => "glove",
            EquipLocation::Shoulders => "shoulders",
            EquipLocation::Necklace => "necklace",
            EquipLocation::LeftRing => "left_ring",
            EquipLocation::RightRing => "right_ring",
            EquipLocation::MainHand => "main_hand",
            EquipLocation::OffHand => "off_hand",
        }
    }
}

impl core::fmt::Display for EquipLocation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for EquipLocation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EquipLocation::ALL
            .into_iter()
            .find(|location| location.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown equip location '{wanted}'")))
    }
}

/// What an item can be used for, beyond sitting in an inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Plain inventory item (materials, quest items, ...).
    #[default]
    Plain,
    /// Can be worn at any of `locations`.
    Equipable { locations: Vec<EquipLocation> },
    /// Can be docked on the action bar; consumables lose one unit per use.
    Action { consumable: bool },
}

/// Immutable description of an item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// If true, several units share one slot.
    #[serde(default)]
    pub stackable: bool,
    #[serde(default)]
    pub kind: ItemKind,
}

impl ItemDescriptor {
    /// Plain, non-stackable item.
    pub fn new(id: ItemId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            description: String::new(),
            stackable: false,
            kind: ItemKind::Plain,
        }
    }

    pub fn stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Reject descriptors that cannot be catalogued.
    pub fn validate(&self) -> DomainResult<()> {
        if self.display_name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "item {} has an empty display name",
                self.id
            )));
        }
        if let ItemKind::Equipable { locations } = &self.kind {
            if locations.is_empty() {
                return Err(DomainError::validation(format!(
                    "equipable item '{}' has no equip locations",
                    self.display_name
                )));
            }
        }
        Ok(())
    }

    /// Whether this item may be worn at `location`.
    pub fn fits(&self, location: EquipLocation) -> bool {
        match &self.kind {
            ItemKind::Equipable { locations } => locations.contains(&location),
            _ => false,
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, ItemKind::Action { .. })
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Action { consumable: true })
    }

    pub fn into_item(self) -> Item {
        Arc::new(self)
    }
}
