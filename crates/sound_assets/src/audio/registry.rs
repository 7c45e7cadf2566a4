//! Name-keyed asset registry
//!
//! Assets live in a generational slot map; names map to slot keys. Removing
//! an asset frees its slot, so every handle handed out for it stops resolving.

use crate::audio::AudioError;
use crate::foundation::collections::{DefaultKey, HandleMap, TypedHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do when an asset is loaded under a name that is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Release the old asset and register the new one under the name
    #[default]
    Replace,
    /// Keep the old asset and fail with `DuplicateName`
    Reject,
}

/// Outcome of a successful registration
#[derive(Debug)]
pub struct Registered<T> {
    /// Handle to the newly registered asset
    pub handle: TypedHandle<T>,
    /// Asset that previously held the name, already unregistered
    pub replaced: Option<T>,
}

/// Registry mapping unique names to owned assets
pub struct AssetRegistry<T> {
    assets: HandleMap<T>,
    names: HashMap<String, DefaultKey>,
}

impl<T> AssetRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            assets: HandleMap::new(),
            names: HashMap::new(),
        }
    }

    /// Register `asset` under `name`
    ///
    /// # Errors
    /// - `DuplicateName` if the name is taken and `policy` is `Reject`
    pub fn insert(&mut self, name: &str, asset: T, policy: DuplicatePolicy) -> Result<Registered<T>, AudioError> {
        let replaced = match (self.names.get(name).copied(), policy) {
            (Some(_), DuplicatePolicy::Reject) => {
                return Err(AudioError::DuplicateName(name.to_string()));
            }
            (Some(old_key), DuplicatePolicy::Replace) => self.assets.remove(old_key),
            (None, _) => None,
        };

        let key = self.assets.insert(asset);
        self.names.insert(name.to_string(), key);

        Ok(Registered {
            handle: TypedHandle::new(key),
            replaced,
        })
    }

    /// Handle registered under `name`
    ///
    /// # Errors
    /// - `NotFound` if nothing is registered under `name`
    pub fn handle(&self, name: &str) -> Result<TypedHandle<T>, AudioError> {
        self.names
            .get(name)
            .map(|key| TypedHandle::new(*key))
            .ok_or_else(|| AudioError::NotFound(name.to_string()))
    }

    /// Resolve a handle; `None` once the asset has been released
    pub fn get(&self, handle: TypedHandle<T>) -> Option<&T> {
        self.assets.get(handle.key())
    }

    /// Resolve a name directly to its asset
    ///
    /// # Errors
    /// - `NotFound` if nothing is registered under `name`
    pub fn get_by_name(&self, name: &str) -> Result<&T, AudioError> {
        let handle = self.handle(name)?;
        self.get(handle)
            .ok_or_else(|| AudioError::NotFound(name.to_string()))
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Number of registered assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Release every asset, returning how many were released
    pub fn clear(&mut self) -> usize {
        let released = self.assets.len();
        self.names.clear();
        self.assets.clear();
        released
    }
}

impl<T> Default for AssetRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
