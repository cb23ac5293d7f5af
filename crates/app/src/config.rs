//! Environment-driven configuration.

use core::str::FromStr;
use std::path::PathBuf;

use uuid::Uuid;

use satchel_core::{DomainError, DomainResult, EntityId};
use satchel_inventory::LoadoutConfig;

/// Loadout id used when `SATCHEL_PLAYER_ID` is not set, so that successive
/// runs find their own state in the save.
pub const DEFAULT_PLAYER_ID: Uuid = Uuid::from_u128(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub save_dir: PathBuf,
    pub save_name: String,
    pub catalog_path: PathBuf,
    pub player_id: EntityId,
    pub loadout: LoadoutConfig,
    pub log_filter: String,
}

impl AppConfig {
    /// Read `SATCHEL_*` variables from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = LoadoutConfig::default();

        let catalog_path = get("SATCHEL_CATALOG")
            .map(PathBuf::from)
            .ok_or_else(|| DomainError::validation("SATCHEL_CATALOG must point at an item catalog"))?;

        let loadout = LoadoutConfig {
            inventory_size: parse_or(&get, "SATCHEL_INVENTORY_SIZE", defaults.inventory_size)?,
            inventory_stack_limit: parse_or(&get, "SATCHEL_STACK_LIMIT", defaults.inventory_stack_limit)?,
            action_slots: parse_or(&get, "SATCHEL_ACTION_SLOTS", defaults.action_slots)?,
            action_stack_limit: parse_or(&get, "SATCHEL_ACTION_STACK_LIMIT", defaults.action_stack_limit)?,
        };
        loadout.validate()?;

        let player_id = match get("SATCHEL_PLAYER_ID") {
            Some(raw) => raw.parse()?,
            None => EntityId::from_uuid(DEFAULT_PLAYER_ID),
        };

        Ok(Self {
            save_dir: get("SATCHEL_SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./saves")),
            save_name: get("SATCHEL_SAVE_FILE").unwrap_or_else(|| "save".to_string()),
            catalog_path,
            player_id,
            loadout,
            log_filter: get("SATCHEL_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> DomainResult<T>
where
    T: FromStr,
    T::Err: core::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DomainError::validation(format!("{key}='{raw}': {e}"))),
        None => Ok(default),
    }
}
