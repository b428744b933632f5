// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Model capability: typed domain values and the tag -> type lookup.
//!
//! A model is a typed domain value that can describe its own preferred codec,
//! serialize itself, and be reconstructed from a decoded primitive. Serialized
//! models embed a type tag (the [`NAMESPACE_FIELD`] field of their
//! struct-shaped representation) naming the concrete type that produced them,
//! so polymorphic channels can carry several model types over one stream:
//! the serialization registry consults the [`ModelRegistry`] at decode time
//! and rehydrates whichever type the tag names.
//!
//! Concrete model types live with the application. They are registered in the
//! [`ModelRegistry`] at startup, before the first decode, and the registry is
//! read-only afterwards from the decode path's perspective.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use crate::codec::{CodecId, CodecRegistry};
use crate::core::{Result, Value};

/// Reserved field naming the concrete model type inside a struct-shaped
/// primitive.
pub const NAMESPACE_FIELD: &str = "_ns";

/// A typed domain value.
///
/// `to_value` must produce the instance's full primitive representation,
/// including the [`NAMESPACE_FIELD`] tag, so that a decode on the other side
/// of the transport can find its way back to the concrete type.
pub trait Model: fmt::Debug + Send + Sync {
    /// Type tag identifying this model's concrete type.
    fn tag(&self) -> &str;

    /// This model type's declared preferred codec, if any.
    fn codec(&self) -> Option<&CodecId> {
        None
    }

    /// Primitive representation of this instance, tag included.
    fn to_value(&self) -> Value;

    /// Serialize this instance with the given codec.
    fn dumps(&self, codec: Option<&CodecId>, codecs: &CodecRegistry) -> Result<Vec<u8>> {
        codecs.dumps(codec, &self.to_value())
    }
}

/// Descriptor for a model type: how to identify and construct it.
pub trait ModelType: fmt::Debug + Send + Sync {
    /// Type tag under which instances serialize.
    fn tag(&self) -> &str;

    /// This model type's declared preferred codec, if any.
    ///
    /// On encode it beats both per-call and channel-default codecs; on the
    /// model-reconstruction decode path it beats the caller's codec.
    fn codec(&self) -> Option<&CodecId> {
        None
    }

    /// Construct an instance from a decoded primitive.
    fn construct(&self, value: Value) -> Result<Box<dyn Model>>;
}

// =============================================================================
// Model Registry
// =============================================================================

/// Thread-safe tag -> model type lookup.
///
/// Populated at startup; the decode path only takes the read lock.
pub struct ModelRegistry {
    types: RwLock<HashMap<String, Arc<dyn ModelType>>>,
}

impl ModelRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Register a model type under its own tag, replacing any previous
    /// registration.
    pub fn register(&self, model_type: Arc<dyn ModelType>) {
        let tag = model_type.tag().to_string();
        self.types.write().unwrap().insert(tag, model_type);
    }

    /// Look up a model type by tag.
    pub fn get(&self, tag: &str) -> Option<Arc<dyn ModelType>> {
        self.types.read().unwrap().get(tag).cloned()
    }

    /// Check if a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.types.read().unwrap().contains_key(tag)
    }

    /// Get all registered tags.
    pub fn tags(&self) -> Vec<String> {
        self.types.read().unwrap().keys().cloned().collect()
    }

    /// Get the number of registered model types.
    pub fn len(&self) -> usize {
        self.types.read().unwrap().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a decoded primitive carries a recognized type tag.
    ///
    /// Returns the tagged model type for a struct whose [`NAMESPACE_FIELD`]
    /// names a registered type. An unregistered tag is simply "not
    /// recognized": the primitive stays as it is and the caller's requested
    /// target applies.
    pub fn maybe_namespace(&self, value: &Value) -> Option<Arc<dyn ModelType>> {
        let Value::Struct(fields) = value else {
            return None;
        };
        match fields.get(NAMESPACE_FIELD) {
            Some(Value::Text(tag)) => self.get(tag),
            Some(other) => {
                tracing::warn!(
                    field = NAMESPACE_FIELD,
                    kind = other.kind_name(),
                    "ignoring non-text type tag"
                );
                None
            }
            None => None,
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global model registry.
///
/// Applications register their model types here at startup; the serialization
/// registry resolves it lazily on first decode unless a custom registry was
/// injected.
static GLOBAL_MODELS: OnceLock<Arc<ModelRegistry>> = OnceLock::new();

/// Get the global model registry.
pub fn global_models() -> Arc<ModelRegistry> {
    GLOBAL_MODELS
        .get_or_init(|| Arc::new(ModelRegistry::new()))
        .clone()
}
