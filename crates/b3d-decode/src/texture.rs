//! Texture references and the caches that collect them.
//!
//! Materials only name their textures; fetching and uploading the images is
//! left to whoever consumes the cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

/// A texture referenced by a material map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Texture {
    /// Image location as written in the stream. Empty when the map chunk
    /// carried no filename.
    pub url: String,
}

impl Texture {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Destination for textures discovered while decoding materials.
pub trait TextureCache {
    /// Register a texture, replacing any previous entry with the same url.
    fn insert(&mut self, texture: Texture);
}

impl<C: TextureCache + ?Sized> TextureCache for &mut C {
    fn insert(&mut self, texture: Texture) {
        (**self).insert(texture);
    }
}

/// In-memory cache keyed by url, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTextureCache {
    textures: IndexMap<String, Texture>,
}

impl MemoryTextureCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Texture> {
        self.textures.get(url)
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.textures.contains_key(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Texture> {
        self.textures.values()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

impl TextureCache for MemoryTextureCache {
    fn insert(&mut self, texture: Texture) {
        self.textures.insert(texture.url.clone(), texture);
    }
}

/// Cache that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextureCache;

impl TextureCache for NoTextureCache {
    fn insert(&mut self, _texture: Texture) {}
}

/// A [`MemoryTextureCache`] behind a mutex, shareable across decode sessions
/// running on different threads.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SharedTextureCache {
    inner: Arc<Mutex<MemoryTextureCache>>,
}

impl SharedTextureCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the shared map for reading or clearing.
    ///
    /// Poisoning is ignored: every write is a single insert.
    pub fn lock(&self) -> MutexGuard<'_, MemoryTextureCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> MemoryTextureCache {
        self.lock().clone()
    }
}

impl TextureCache for SharedTextureCache {
    fn insert(&mut self, texture: Texture) {
        self.lock().insert(texture);
    }
}
