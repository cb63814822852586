//! Runtime decoder dispatch
//!
//! The registry maps pixel format identifiers to decoder factories and keeps
//! one decoder per `(identifier, width, height)` so that streaming the same
//! geometry reuses the decoder and its output buffer.

mod builtin;
mod plugin;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::pixel_pipeline::color::ColorConversionAdapter;
use crate::pixel_pipeline::common::error::{RegistryError, Result};
use crate::pixel_pipeline::config::DecoderConfig;
use crate::pixel_pipeline::decoder::Decoder;
use crate::pixel_pipeline::format::{FormatDescriptor, PixelFormatId};

pub use builtin::standard_factory;
pub use plugin::DecoderPlugin;

/// Builds a decoder for a format and frame geometry.
pub type DecoderFactory =
    Arc<dyn Fn(&FormatDescriptor, u32, u32) -> Result<Box<dyn Decoder>> + Send + Sync>;

/// Cached decoder handed out by [`DecoderRegistry::resolve`].
///
/// The mutex serializes decodes on one instance; distinct geometries get
/// distinct instances and decode concurrently.
pub type SharedDecoder = Arc<Mutex<Box<dyn Decoder>>>;

type CacheKey = (PixelFormatId, u32, u32);

struct Registration {
    format: FormatDescriptor,
    factory: DecoderFactory,
}

#[derive(Default)]
struct RegistryState {
    registrations: HashMap<PixelFormatId, Registration>,
    cache: HashMap<CacheKey, SharedDecoder>,
}

/// Identifier to decoder dispatch table with a per-geometry decoder cache.
#[derive(Default)]
pub struct DecoderRegistry {
    state: RwLock<RegistryState>,
}

impl DecoderRegistry {
    /// Empty registry, for callers that register everything themselves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in format.
    ///
    /// Chroma formats decode to RGB24 through `adapter` when one is given and
    /// the configuration asks for color, and to luma-only Gray8 otherwise.
    pub fn with_builtin(
        config: &DecoderConfig,
        adapter: Option<Arc<dyn ColorConversionAdapter>>,
    ) -> std::result::Result<Self, RegistryError> {
        let registry = Self::new();
        builtin::register_builtin(&registry, config, adapter)?;
        info!(
            "Decoder registry initialized with {} formats",
            registry.list_supported_formats().len()
        );
        Ok(registry)
    }

    /// Adds `factory` as the decoder source for `format`.
    ///
    /// Fails with `DuplicateIdentifier` if the identifier is already taken; the
    /// existing registration is left untouched.
    pub fn register(
        &self,
        format: FormatDescriptor,
        factory: DecoderFactory,
    ) -> std::result::Result<(), RegistryError> {
        format.validate()?;
        let mut state = self.write();
        if state.registrations.contains_key(&format.id) {
            return Err(RegistryError::DuplicateIdentifier(format.id));
        }
        debug!("Registered decoder for {}", format);
        state.registrations.insert(format.id, Registration { format, factory });
        Ok(())
    }

    /// Convenience form of [`register`](Self::register) taking a closure.
    pub fn register_fn<F>(&self, format: FormatDescriptor, factory: F) -> std::result::Result<(), RegistryError>
    where
        F: Fn(&FormatDescriptor, u32, u32) -> Result<Box<dyn Decoder>> + Send + Sync + 'static,
    {
        self.register(format, Arc::new(factory))
    }

    /// Registers a third-party decoder plugin.
    pub fn register_plugin(&self, plugin: Arc<dyn DecoderPlugin>) -> std::result::Result<(), RegistryError> {
        let format = plugin.format();
        self.register_fn(format, move |_, width, height| plugin.make_decoder(width, height))
    }

    /// Returns the cached decoder for `(format.id, width, height)`, building it
    /// on first use.
    ///
    /// Only the identifier of `format` is looked at; the decoder is built from
    /// the registered descriptor. Repeated calls with the same key return the
    /// same instance until [`teardown`](Self::teardown).
    pub fn resolve(
        &self,
        format: &FormatDescriptor,
        width: u32,
        height: u32,
    ) -> std::result::Result<SharedDecoder, RegistryError> {
        let id = format.id;
        let key = (id, width, height);
        if let Some(decoder) = self.read().cache.get(&key) {
            return Ok(Arc::clone(decoder));
        }

        let mut state = self.write();
        // Another thread may have built it between the two locks.
        if let Some(decoder) = state.cache.get(&key) {
            return Ok(Arc::clone(decoder));
        }
        let registration = state
            .registrations
            .get(&id)
            .ok_or(RegistryError::UnknownFormat(id))?;
        let decoder = (registration.factory)(&registration.format, width, height)?;
        debug!(
            "Cached new {} decoder for {}x{} ({} cached)",
            registration.format,
            width,
            height,
            state.cache.len() + 1
        );
        let decoder: SharedDecoder = Arc::new(Mutex::new(decoder));
        state.cache.insert(key, Arc::clone(&decoder));
        Ok(decoder)
    }

    /// Registered identifiers in ascending order.
    pub fn list_supported_formats(&self) -> Vec<PixelFormatId> {
        let mut ids: Vec<PixelFormatId> = self.read().registrations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Registered descriptors in ascending identifier order.
    pub fn supported_descriptors(&self) -> Vec<FormatDescriptor> {
        let state = self.read();
        let mut formats: Vec<FormatDescriptor> = state.registrations.values().map(|r| r.format).collect();
        formats.sort_unstable_by_key(|f| f.id);
        formats
    }

    pub fn is_registered(&self, id: PixelFormatId) -> bool {
        self.read().registrations.contains_key(&id)
    }

    pub fn cached_decoders(&self) -> usize {
        self.read().cache.len()
    }

    /// Drops every cached decoder; registrations stay in place.
    ///
    /// Decoders still held by callers stay alive until their last handle is
    /// dropped.
    pub fn teardown(&self) {
        let evicted = std::mem::take(&mut self.write().cache);
        if !evicted.is_empty() {
            debug!("Evicted {} cached decoders", evicted.len());
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
