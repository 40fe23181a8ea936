//! Image asset registry
//!
//! Loading happens outside the core (the browser fetches images
//! asynchronously). The store only tracks what is ready; every lookup
//! returns `Option` so draw code always has a shape fallback.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Handle to a decoded image owned by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    /// Slot in the surface's image table
    pub id: usize,
    /// Natural size in pixels
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    /// Height / width, or None for degenerate images
    pub fn aspect(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.height as f32 / self.width as f32)
        }
    }
}

/// A named image a mini-game may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetRef {
    pub name: &'static str,
    pub url: &'static str,
}

impl AssetRef {
    pub const fn new(name: &'static str, url: &'static str) -> Self {
        Self { name, url }
    }
}

/// Load state of one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready(ImageHandle),
    Failed,
}

#[derive(Debug)]
struct AssetEntry {
    name: String,
    status: AssetStatus,
}

/// Name -> image handle registry
#[derive(Debug, Default)]
pub struct AssetStore {
    entries: Vec<AssetEntry>,
    by_name: HashMap<String, usize>,
    /// Names already reported as unavailable (log once per name)
    warned: RefCell<HashSet<String>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset as pending; returns its slot id (idempotent)
    pub fn request(&mut self, name: &str) -> usize {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = self.entries.len();
        self.entries.push(AssetEntry {
            name: name.to_string(),
            status: AssetStatus::Pending,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn mark_ready(&mut self, id: usize, width: u32, height: u32) {
        if let Some(entry) = self.entries.get_mut(id) {
            log::info!("Asset loaded: {} ({}x{})", entry.name, width, height);
            entry.status = AssetStatus::Ready(ImageHandle { id, width, height });
        }
    }

    pub fn mark_failed(&mut self, id: usize) {
        if let Some(entry) = self.entries.get_mut(id) {
            log::warn!("Asset failed to load: {} (using fallback shapes)", entry.name);
            entry.status = AssetStatus::Failed;
        }
    }

    pub fn status(&self, name: &str) -> Option<AssetStatus> {
        self.by_name.get(name).map(|&id| self.entries[id].status)
    }

    /// Ready image for `name`, if any
    pub fn image(&self, name: &str) -> Option<ImageHandle> {
        match self.status(name) {
            Some(AssetStatus::Ready(handle)) => Some(handle),
            Some(AssetStatus::Pending) => None,
            Some(AssetStatus::Failed) | None => {
                if self.warned.borrow_mut().insert(name.to_string()) {
                    log::warn!("Image '{}' unavailable, drawing fallback", name);
                }
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
