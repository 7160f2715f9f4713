//! Registry for named type descriptors.
//!
//! This module provides [`TypeRegistry`], a thread-safe store mapping stable
//! names to descriptors. A new registry comes pre-seeded with the primitive
//! descriptors, which is how external callers (e.g. a source rewriter
//! emitting calls into this engine) resolve `string`, `number` and friends
//! without holding Rust references.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::descriptor::primitive;
use crate::descriptor::Descriptor;
use crate::dispatch::{self, Mode};
use crate::path::Context;
use crate::value::Value;
use crate::ValidationResult;

/// Type alias for the descriptor storage map.
type TypeMap = Arc<RwLock<HashMap<String, Descriptor>>>;

/// A thread-safe registry of named type descriptors.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for shared access: any number of
/// threads can resolve and validate concurrently, while registrations are
/// serialized.
///
/// # Example
///
/// ```rust
/// use typegate::{list, TypeRegistry, Value};
/// use serde_json::json;
///
/// let registry = TypeRegistry::new();
///
/// // Primitives are pre-registered under their stable names.
/// assert!(registry.get("number").is_some());
///
/// registry.register("Ids", list(registry.get("number").unwrap())).unwrap();
///
/// let ids = Value::from(json!([1, 2, 3]));
/// assert!(registry.is("Ids", &ids).unwrap());
/// ```
pub struct TypeRegistry {
    types: TypeMap,
}

impl TypeRegistry {
    /// Creates a registry pre-seeded with the primitive descriptors under
    /// their stable names: `any`, `mixed`, `void`, `string`, `number`,
    /// `boolean`, `array`, `object`, `function`.
    pub fn new() -> Self {
        let registry = Self::empty();
        for ty in [
            primitive::any(),
            primitive::mixed(),
            primitive::void_(),
            primitive::string(),
            primitive::number(),
            primitive::boolean(),
            primitive::array(),
            primitive::object(),
            primitive::function(),
        ] {
            let name = ty.name().to_string();
            registry.types.write().insert(name, Descriptor::from(ty));
        }
        registry
    }

    /// Creates an empty registry with no pre-registered names.
    pub fn empty() -> Self {
        Self {
            types: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a descriptor under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is already
    /// registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use typegate::{string, TypeRegistry};
    ///
    /// let registry = TypeRegistry::empty();
    /// registry.register("Email", string()).unwrap();
    /// assert!(registry.register("Email", string()).is_err());
    /// ```
    pub fn register(
        &self,
        name: impl Into<String>,
        descriptor: impl Into<Descriptor>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut types = self.types.write();

        if types.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        types.insert(name, descriptor.into());
        Ok(())
    }

    /// Retrieves a descriptor by name.
    pub fn get(&self, name: &str) -> Option<Descriptor> {
        self.types.read().get(name).cloned()
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Validates a value against a named descriptor, in collect mode with an
    /// empty context.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TypeNotFound`] if the name is not registered.
    pub fn validate<'v>(
        &self,
        name: &str,
        value: &'v Value,
    ) -> Result<ValidationResult<'v>, RegistryError> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| RegistryError::TypeNotFound(name.to_string()))?;
        Ok(dispatch::validate(
            value,
            descriptor,
            &Context::root(),
            Mode::Collect,
        ))
    }

    /// Fast membership test against a named descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TypeNotFound`] if the name is not registered.
    pub fn is(&self, name: &str, value: &Value) -> Result<bool, RegistryError> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| RegistryError::TypeNotFound(name.to_string()))?;
        Ok(descriptor.is(value))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TypeRegistry {
    fn clone(&self) -> Self {
        Self {
            types: Arc::clone(&self.types),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a descriptor under a name that already exists.
    #[error("type '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to look up a name that doesn't exist.
    #[error("type '{0}' not found")]
    TypeNotFound(String),
}
