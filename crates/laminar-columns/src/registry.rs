//! Type tag registry for column type names.
//!
//! Maps canonical type names (e.g., `"int"`, `"varchar"`, `"timestamp"`) to
//! compact [`TypeTag`] codes so each column stores a single byte instead of
//! a string. Tags are handed out densely in first-seen order and never
//! change for the lifetime of the process.
//!
//! # Architecture
//!
//! - **Schema load**: [`TypeRegistry::register_or_get`] mints a tag the first
//!   time a type name is seen. Check and insert happen under one write lock,
//!   so two concurrent schema loads cannot mint two tags for one name.
//! - **Row conversion**: [`TypeRegistry::resolve`] and
//!   [`TypeRegistry::lookup`] only take the read lock.
//!
//! # Example
//!
//! ```rust
//! use laminar_columns::registry::TypeRegistry;
//!
//! let registry = TypeRegistry::new();
//! let int_tag = registry.register_or_get("int").unwrap();
//! let ts_tag = registry.register_or_get("timestamp").unwrap();
//! assert_ne!(int_tag, ts_tag);
//!
//! assert_eq!(registry.register_or_get("int").unwrap(), int_tag);
//! assert_eq!(&*registry.resolve(ts_tag).unwrap(), "timestamp");
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::error::{ColumnError, ColumnResult};

/// Maximum number of distinct type names, bounded by the one-byte tag.
pub const MAX_TAGS: usize = i8::MAX as usize;

/// Compact identifier of a canonical type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(u8);

impl TypeTag {
    /// Returns the raw tag value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Tags {
    name_to_tag: FxHashMap<Arc<str>, TypeTag>,
    tag_to_name: Vec<Arc<str>>,
}

/// Append-only, thread-safe registry of type tags.
///
/// A process-wide instance is available via [`TYPE_REGISTRY`]; separate
/// instances are only useful for tests or tools with their own universe.
pub struct TypeRegistry {
    tags: RwLock<Tags>,
    capacity: usize,
}

impl TypeRegistry {
    /// Creates an empty registry holding up to [`MAX_TAGS`] names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_TAGS)
    }

    /// Creates an empty registry with a smaller ceiling.
    ///
    /// The ceiling is clamped to [`MAX_TAGS`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_TAGS);
        Self {
            tags: RwLock::new(Tags {
                name_to_tag: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
                tag_to_name: Vec::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Returns the tag for `name`, minting a new one on first sight.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::CapacityExceeded`] if `name` is new and the
    /// registry is full.
    pub fn register_or_get(&self, name: &str) -> ColumnResult<TypeTag> {
        if let Some(tag) = self.lookup(name) {
            return Ok(tag);
        }

        let mut tags = self.tags.write();
        // Another writer may have won the race between the two locks.
        if let Some(&tag) = tags.name_to_tag.get(name) {
            return Ok(tag);
        }
        let next = tags.tag_to_name.len();
        if next >= self.capacity {
            tracing::warn!(type_name = name, max = self.capacity, "type registry exhausted");
            return Err(ColumnError::CapacityExceeded { max: self.capacity });
        }
        let tag = TypeTag(u8::try_from(next).map_err(|_| ColumnError::CapacityExceeded {
            max: self.capacity,
        })?);
        let name: Arc<str> = Arc::from(name);
        tags.name_to_tag.insert(Arc::clone(&name), tag);
        tags.tag_to_name.push(name);
        tracing::debug!(type_name = %tags.tag_to_name[next], %tag, "registered column type");
        Ok(tag)
    }

    /// Returns the tag for `name` without registering it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeTag> {
        self.tags.read().name_to_tag.get(name).copied()
    }

    /// Resolves a tag back to its type name.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::UnknownTag`] if the tag was never issued by
    /// this registry.
    pub fn resolve(&self, tag: TypeTag) -> ColumnResult<Arc<str>> {
        self.tags
            .read()
            .tag_to_name
            .get(usize::from(tag.0))
            .cloned()
            .ok_or(ColumnError::UnknownTag(tag.0))
    }

    /// Returns the number of registered type names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.read().tag_to_name.len()
    }

    /// Returns true if no type has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of type names this registry accepts.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Process-wide registry shared by every column definition.
pub static TYPE_REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);
