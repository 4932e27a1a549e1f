//! Field codec registry
//!
//! Maps a [`RecordKind`] to the field codec the compact strategy uses for it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = CodecRegistry::new();
//! registry.register(AnimalCodec);
//!
//! let codec = registry.lookup(RecordKind::Animal)?;
//! ```
//!
//! Registration takes `&mut self`, so a registry is fully built before it is
//! shared. The process-wide registry is published once through
//! [`install_global_registry`] (or defaulted on first use by
//! [`global_registry`]) and is read-only from then on.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use kvcodec_core::{CodecError, CodecResult, RecordKind};

use super::field::{ErasedFieldCodec, FieldCodec};
use super::records::{AddressCodec, AnimalCodec, PersonCodec};

/// Registry of field codecs keyed by record kind
#[derive(Default, Clone)]
pub struct CodecRegistry {
    codecs: FxHashMap<RecordKind, Arc<dyn ErasedFieldCodec>>,
}

impl CodecRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in codecs for every record kind
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AddressCodec);
        registry.register(PersonCodec);
        registry.register(AnimalCodec);
        registry
    }

    /// Register a codec, replacing any codec already held for its kind
    pub fn register<C: FieldCodec>(&mut self, codec: C) {
        self.register_erased(Arc::new(codec));
    }

    /// Register an already type-erased codec
    pub fn register_erased(&mut self, codec: Arc<dyn ErasedFieldCodec>) {
        let kind = codec.kind();
        if self.codecs.insert(kind, codec).is_some() {
            debug!(%kind, "Replaced field codec");
        } else {
            debug!(%kind, "Registered field codec");
        }
    }

    /// Look up the codec for a kind
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` if no codec is registered for `kind`.
    pub fn lookup(&self, kind: RecordKind) -> CodecResult<Arc<dyn ErasedFieldCodec>> {
        self.codecs
            .get(&kind)
            .cloned()
            .ok_or(CodecError::UnsupportedType(kind))
    }

    /// Check if a kind has a codec
    pub fn contains(&self, kind: RecordKind) -> bool {
        self.codecs.contains_key(&kind)
    }

    /// Registered kinds, in tag order
    pub fn kinds(&self) -> Vec<RecordKind> {
        let mut kinds: Vec<RecordKind> = self.codecs.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// True if no codecs are registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Process-wide registry, published once
static GLOBAL_REGISTRY: OnceCell<Arc<CodecRegistry>> = OnceCell::new();

/// Install the process-wide registry
///
/// Call once during initialization, before any compact encode or decode.
/// Returns the registry back if one was already installed (including the
/// default installed by an earlier [`global_registry`] call).
pub fn install_global_registry(registry: CodecRegistry) -> Result<(), CodecRegistry> {
    let kinds = registry.kinds();
    match GLOBAL_REGISTRY.set(Arc::new(registry)) {
        Ok(()) => {
            info!(?kinds, "Installed global codec registry");
            Ok(())
        }
        Err(rejected) => {
            warn!("Global codec registry already installed");
            Err(Arc::try_unwrap(rejected).unwrap_or_else(|shared| (*shared).clone()))
        }
    }
}

/// The process-wide registry
///
/// Installs [`CodecRegistry::with_defaults`] if nothing was installed yet.
pub fn global_registry() -> Arc<CodecRegistry> {
    GLOBAL_REGISTRY
        .get_or_init(|| {
            info!("Installing default global codec registry");
            Arc::new(CodecRegistry::with_defaults())
        })
        .clone()
}
