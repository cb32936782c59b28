use std::collections::HashMap;

use crate::{
    foundation::core::Size,
    foundation::error::{SceneryError, SceneryResult},
    graph::atlas::ImageAtlas,
};

/// Attempts made for one resource before it is counted as failed.
pub const MAX_LOAD_ATTEMPTS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Bitmap,
    Sound,
    Font,
    Raw,
}

/// What a loader hands back for a successfully loaded resource.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourcePayload {
    Bitmap { size: Size },
    Sound { duration: f64 },
    Font { family: String },
    Raw(serde_json::Value),
}

/// Performs the actual I/O for resources; the runtime only tracks state.
pub trait ResourceLoader {
    fn load(&mut self, kind: ResourceKind, location: &str) -> anyhow::Result<ResourcePayload>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

#[derive(Clone, Debug)]
pub struct Resource {
    pub name: String,
    pub kind: ResourceKind,
    pub location: String,
    pub preload: bool,
    state: LoadState,
    attempts: u32,
    payload: Option<ResourcePayload>,
}

impl Resource {
    pub fn new(kind: ResourceKind, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            location: location.into(),
            preload: true,
            state: LoadState::Pending,
            attempts: 0,
            payload: None,
        }
    }

    pub fn with_preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn payload(&self) -> Option<&ResourcePayload> {
        self.payload.as_ref()
    }

    /// Intrinsic size of a loaded bitmap.
    pub fn bitmap_size(&self) -> Option<Size> {
        match self.payload {
            Some(ResourcePayload::Bitmap { size }) => Some(size),
            _ => None,
        }
    }
}

/// Named resource table plus the sprite atlases built on top of bitmaps.
#[derive(Debug, Default)]
pub struct Resources {
    items: HashMap<String, Resource>,
    atlases: HashMap<String, ImageAtlas>,
    loaded: usize,
    failed: usize,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource, replacing any previous entry with the same name.
    pub fn add(&mut self, resource: Resource) {
        if let Some(old) = self.items.insert(resource.name.clone(), resource) {
            match old.state {
                LoadState::Loaded => self.loaded -= 1,
                LoadState::Failed => self.failed -= 1,
                LoadState::Pending => {}
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.items.get(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    /// True once every preload resource is loaded. Failed resources keep this false.
    pub fn all_loaded(&self) -> bool {
        self.items
            .values()
            .filter(|r| r.preload)
            .all(Resource::is_loaded)
    }

    /// Loads one resource, retrying up to [`MAX_LOAD_ATTEMPTS`] times.
    pub fn load(&mut self, name: &str, loader: &mut dyn ResourceLoader) -> SceneryResult<LoadState> {
        let res = self
            .items
            .get_mut(name)
            .ok_or_else(|| SceneryError::not_found(format!("resource \"{name}\"")))?;
        if res.state != LoadState::Pending {
            return Ok(res.state);
        }
        while res.attempts < MAX_LOAD_ATTEMPTS {
            res.attempts += 1;
            match loader.load(res.kind, &res.location) {
                Ok(payload) => {
                    res.payload = Some(payload);
                    res.state = LoadState::Loaded;
                    self.loaded += 1;
                    return Ok(LoadState::Loaded);
                }
                Err(err) => {
                    tracing::debug!(resource = %res.name, attempt = res.attempts, %err, "resource load failed");
                }
            }
        }
        tracing::warn!(resource = %res.name, location = %res.location, "giving up on resource");
        res.state = LoadState::Failed;
        self.failed += 1;
        Ok(LoadState::Failed)
    }

    /// Loads every pending preload resource. Failures are counted, never returned.
    #[tracing::instrument(skip_all)]
    pub fn load_all(&mut self, loader: &mut dyn ResourceLoader) {
        let mut names: Vec<String> = self
            .items
            .values()
            .filter(|r| r.preload && r.state == LoadState::Pending)
            .map(|r| r.name.clone())
            .collect();
        names.sort();
        for name in names {
            // The name came from the table, so lookup cannot miss.
            let _ = self.load(&name, loader);
        }
    }

    pub fn add_atlas(&mut self, atlas: ImageAtlas) {
        self.atlases.insert(atlas.name.clone(), atlas);
    }

    pub fn atlas(&self, name: &str) -> Option<&ImageAtlas> {
        self.atlases.get(name)
    }
}

#[cfg(test)]
#[path = "../tests/unit/resources.rs"]
mod tests;
