//! Dirty tracking for patch-based updates.
//!
//! This module provides [`TrackedResource<S>`], a wrapper that remembers a
//! resource's attributes as last loaded or saved and turns local edits into
//! a [`PatchDocument`].
//!
//! # How It Works
//!
//! The original attributes are captured on load. [`changes`] compares
//! top-level fields and emits one operation per difference:
//!
//! - a field only in the current state becomes `add`
//! - a field whose value changed becomes `replace`
//! - a field only in the original state becomes `remove`
//!
//! [`changes`]: TrackedResource::changes
//!
//! # Example
//!
//! ```rust
//! use billing_api::{Plan, TrackedResource};
//! use serde_json::json;
//!
//! let plan = Plan::from_json(r#"{"id":"P-1","name":"Basic","description":"Old"}"#).unwrap();
//! let mut tracked = TrackedResource::from_existing(plan);
//! assert!(!tracked.is_dirty());
//!
//! tracked.set_description("New");
//! tracked.unset_attribute("name");
//!
//! let patch = tracked.changes();
//! assert_eq!(
//!     serde_json::to_value(&patch).unwrap(),
//!     json!([
//!         {"op": "replace", "path": "/description", "value": "New"},
//!         {"op": "remove", "path": "/name"}
//!     ])
//! );
//! ```

use std::ops::{Deref, DerefMut};

use crate::clients::{CallExecutor, Transport};
use crate::config::ApiContext;
use crate::model::{AttributeBag, JsonPointer, PatchDocument, PatchOperation};
use crate::rest::{Resource, ResourceError, ResourceSchema};

/// A resource plus the attributes it had when loaded or last saved.
///
/// Implements `Deref<Target = Resource<S>>` and `DerefMut`, so accessors
/// work on the wrapper directly.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedResource<S> {
    resource: Resource<S>,
    original: Option<AttributeBag>,
}

impl<S: ResourceSchema> TrackedResource<S> {
    /// Tracks a resource that does not exist on the server yet.
    ///
    /// New resources are always dirty, and every field is a change.
    #[must_use]
    pub const fn new(resource: Resource<S>) -> Self {
        Self {
            resource,
            original: None,
        }
    }

    /// Tracks a resource loaded from the server. It starts clean.
    #[must_use]
    pub fn from_existing(resource: Resource<S>) -> Self {
        let original = Some(resource.attributes().clone());
        Self { resource, original }
    }

    /// Returns `true` if the resource differs from its original state.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.original
            .as_ref()
            .map_or(true, |original| original != self.resource.attributes())
    }

    /// Returns the patch turning the original state into the current one.
    #[must_use]
    pub fn changes(&self) -> PatchDocument {
        let empty = AttributeBag::new();
        let original = self.original.as_ref().unwrap_or(&empty);
        diff_bags(original, self.resource.attributes())
    }

    /// Captures the current state as the original.
    pub fn mark_clean(&mut self) {
        self.original = Some(self.resource.attributes().clone());
    }

    /// Sends the pending changes as a PATCH and marks the resource clean.
    ///
    /// Returns the number of operations sent; a clean resource sends nothing
    /// and returns `0`.
    ///
    /// # Errors
    ///
    /// See [`Resource::update`]. On error the resource stays dirty.
    pub async fn save_changes<T: Transport>(
        &mut self,
        executor: &CallExecutor<T>,
        context: Option<&ApiContext>,
    ) -> Result<usize, ResourceError> {
        if !self.is_dirty() {
            return Ok(0);
        }

        let patch = self.changes();
        if patch.is_empty() {
            self.mark_clean();
            return Ok(0);
        }

        self.resource.update(executor, &patch, context).await?;
        tracing::debug!(
            "Saved {} change(s) to {} {}",
            patch.len(),
            S::NAME,
            self.resource.id().unwrap_or_default()
        );
        self.mark_clean();
        Ok(patch.len())
    }

    /// Returns a reference to the inner resource.
    #[must_use]
    pub const fn inner(&self) -> &Resource<S> {
        &self.resource
    }

    /// Consumes the wrapper and returns the resource.
    #[must_use]
    pub fn into_inner(self) -> Resource<S> {
        self.resource
    }
}

impl<S> Deref for TrackedResource<S> {
    type Target = Resource<S>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl<S> DerefMut for TrackedResource<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.resource
    }
}

fn diff_bags(original: &AttributeBag, current: &AttributeBag) -> PatchDocument {
    let mut patch = PatchDocument::new();

    for (key, value) in current.iter() {
        let path = JsonPointer::field(key).to_string();
        match original.get(key) {
            None => {
                patch.add_operation(PatchOperation::add(path, value.clone()));
            }
            Some(before) if before != value => {
                patch.add_operation(PatchOperation::replace(path, value.clone()));
            }
            Some(_) => {}
        }
    }

    for key in original.keys().filter(|key| !current.contains(key)) {
        patch.add_operation(PatchOperation::remove(JsonPointer::field(key).to_string()));
    }

    patch
}
