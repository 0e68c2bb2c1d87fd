//! `$ref` resolution against the root document.
//!
//! Pointers use JSON-Pointer syntax behind a `#` fragment marker
//! (`#/components/schemas/Pet`). Resolution is a plain lookup into the
//! already-parsed document; nothing is cached.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use super::spec::{Parameter, RequestBody, Response, Schema};
use crate::error::{GenerateError, GenerateResult};

/// Document nodes that may be replaced by a `$ref`.
pub trait Referenceable {
    /// The `$ref` pointer, if this node is a reference.
    fn ref_path(&self) -> Option<&str>;
}

impl Referenceable for Schema {
    fn ref_path(&self) -> Option<&str> {
        self.ref_path.as_deref()
    }
}

impl Referenceable for Parameter {
    fn ref_path(&self) -> Option<&str> {
        self.ref_path.as_deref()
    }
}

impl Referenceable for RequestBody {
    fn ref_path(&self) -> Option<&str> {
        self.ref_path.as_deref()
    }
}

impl Referenceable for Response {
    fn ref_path(&self) -> Option<&str> {
        self.ref_path.as_deref()
    }
}

/// Looks up `$ref` pointers in the root document.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    root: &'a Value,
}

impl<'a> Resolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Return the raw node a pointer designates.
    pub fn lookup(&self, pointer: &str) -> GenerateResult<&'a Value> {
        pointer
            .strip_prefix('#')
            .and_then(|path| self.root.pointer(path))
            .ok_or_else(|| GenerateError::UnresolvedRef {
                pointer: pointer.to_string(),
            })
    }

    /// Resolve a pointer and read the node as `T`.
    pub fn resolve<T: DeserializeOwned>(&self, pointer: &str) -> GenerateResult<T> {
        trace!(pointer = %pointer, "Resolving reference.");
        let node = self.lookup(pointer)?;
        Ok(T::deserialize(node)?)
    }

    /// Follow a chain of references until a concrete node is reached.
    pub fn deref<T>(&self, item: &T) -> GenerateResult<T>
    where
        T: Referenceable + Clone + DeserializeOwned,
    {
        let mut current = item.clone();
        let mut seen: Vec<String> = Vec::new();
        while let Some(pointer) = current.ref_path().map(str::to_string) {
            if seen.contains(&pointer) {
                return Err(GenerateError::CyclicSchema { pointer });
            }
            current = self.resolve(&pointer)?;
            seen.push(pointer);
        }
        Ok(current)
    }
}

/// Name of the schema a pointer designates (its last path segment).
pub fn ref_name(pointer: &str) -> String {
    pointer
        .rsplit('/')
        .next()
        .unwrap_or(pointer)
        .replace("~1", "/")
        .replace("~0", "~")
}

/// Pointers currently being expanded by one synthesis pass.
#[derive(Debug, Default)]
pub struct RefStack {
    active: Vec<String>,
}

impl RefStack {
    /// Mark a pointer as being expanded; fails if it already is.
    pub fn enter(&mut self, pointer: &str) -> GenerateResult<()> {
        if self.active.iter().any(|p| p == pointer) {
            return Err(GenerateError::CyclicSchema {
                pointer: pointer.to_string(),
            });
        }
        self.active.push(pointer.to_string());
        Ok(())
    }

    /// Finish expanding the innermost pointer.
    pub fn exit(&mut self) {
        self.active.pop();
    }
}
