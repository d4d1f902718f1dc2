//! Patch documents for partial updates.
//!
//! A [`PatchDocument`] is an ordered list of JSON-Patch style operations sent
//! as the body of a `PATCH` request. The client only checks structure
//! (operation shape and pointer syntax); whether a path applies to the
//! target resource is decided by the server.
//!
//! # Example
//!
//! ```rust
//! use billing_api::{PatchDocument, PatchOperation};
//! use serde_json::json;
//!
//! let mut patch = PatchDocument::new();
//! patch
//!     .add_operation(PatchOperation::replace("/description", json!("Gold tier")))
//!     .add_operation(PatchOperation::remove("/quantity_supported"));
//!
//! assert_eq!(
//!     serde_json::to_value(&patch).unwrap(),
//!     json!([
//!         {"op": "replace", "path": "/description", "value": "Gold tier"},
//!         {"op": "remove", "path": "/quantity_supported"}
//!     ])
//! );
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{AttributeBag, JsonPointer};

/// Error raised while checking or locally applying a patch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A path is not a syntactically valid pointer.
    #[error("Invalid JSON pointer '{path}'")]
    InvalidPointer {
        /// The offending path.
        path: String,
    },

    /// The path does not address an existing location.
    #[error("Path '{path}' does not exist in the target document")]
    PathNotFound {
        /// The missing path.
        path: String,
    },

    /// An array index is malformed or out of bounds.
    #[error("Invalid array index '{index}' in path '{path}'")]
    InvalidIndex {
        /// The path containing the index.
        path: String,
        /// The index token.
        index: String,
    },

    /// A `test` operation did not match.
    #[error("Test operation failed at '{path}'")]
    TestFailed {
        /// The tested path.
        path: String,
    },

    /// A value cannot be moved into one of its own children.
    #[error("Cannot move '{from}' into its own child '{path}'")]
    InvalidMove {
        /// The source path.
        from: String,
        /// The destination path.
        path: String,
    },

    /// The document root cannot be removed.
    #[error("The document root cannot be removed")]
    RemoveRoot,
}

/// A single patch operation.
///
/// Serialized with an `op` tag, e.g. `{"op":"replace","path":"/","value":{...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    /// Adds a value at `path`.
    Add {
        /// Target location.
        path: String,
        /// Value to add.
        value: Value,
    },
    /// Removes the value at `path`.
    Remove {
        /// Target location.
        path: String,
    },
    /// Replaces the value at `path`.
    Replace {
        /// Target location.
        path: String,
        /// Replacement value.
        value: Value,
    },
    /// Moves the value at `from` to `path`.
    Move {
        /// Source location.
        from: String,
        /// Target location.
        path: String,
    },
    /// Copies the value at `from` to `path`.
    Copy {
        /// Source location.
        from: String,
        /// Target location.
        path: String,
    },
    /// Asserts that the value at `path` equals `value`.
    Test {
        /// Target location.
        path: String,
        /// Expected value.
        value: Value,
    },
}

impl PatchOperation {
    /// Creates an `add` operation.
    #[must_use]
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Add {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Creates a `remove` operation.
    #[must_use]
    pub fn remove(path: impl Into<String>) -> Self {
        Self::Remove { path: path.into() }
    }

    /// Creates a `replace` operation.
    #[must_use]
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Replace {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Creates a `move` operation.
    #[must_use]
    pub fn move_value(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Move {
            from: from.into(),
            path: path.into(),
        }
    }

    /// Creates a `copy` operation.
    #[must_use]
    pub fn copy(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Copy {
            from: from.into(),
            path: path.into(),
        }
    }

    /// Creates a `test` operation.
    #[must_use]
    pub fn test(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Test {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Returns the operation name as it appears on the wire.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
            Self::Move { .. } => "move",
            Self::Copy { .. } => "copy",
            Self::Test { .. } => "test",
        }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Move { path, .. }
            | Self::Copy { path, .. }
            | Self::Test { path, .. } => path,
        }
    }

    /// Returns the source path of `move` and `copy` operations.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        match self {
            Self::Move { from, .. } | Self::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Returns the operation value, if it carries one.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Add { value, .. } | Self::Replace { value, .. } | Self::Test { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Checks the syntax of every pointer in the operation.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidPointer`] for a malformed path.
    pub fn verify(&self) -> Result<(), PatchError> {
        JsonPointer::parse(self.path())?;
        if let Some(from) = self.from() {
            JsonPointer::parse(from)?;
        }
        Ok(())
    }

    fn apply(&self, doc: &mut Value) -> Result<(), PatchError> {
        let path = JsonPointer::parse(self.path())?;
        match self {
            Self::Add { value, .. } => add_at(doc, &path, value.clone()),
            Self::Remove { .. } => remove_at(doc, &path).map(|_| ()),
            Self::Replace { value, .. } => replace_at(doc, &path, value.clone()),
            Self::Move { from, .. } => {
                let source = JsonPointer::parse(from)?;
                if source == path {
                    return Ok(());
                }
                if source.is_proper_prefix_of(&path) {
                    return Err(PatchError::InvalidMove {
                        from: from.clone(),
                        path: self.path().to_string(),
                    });
                }
                let value = remove_at(doc, &source)?;
                add_at(doc, &path, value)
            }
            Self::Copy { from, .. } => {
                let source = JsonPointer::parse(from)?;
                let value = lookup(doc, &source)
                    .cloned()
                    .ok_or_else(|| PatchError::PathNotFound { path: from.clone() })?;
                add_at(doc, &path, value)
            }
            Self::Test { value, .. } => {
                if lookup(doc, &path) == Some(value) {
                    Ok(())
                } else {
                    Err(PatchError::TestFailed {
                        path: self.path().to_string(),
                    })
                }
            }
        }
    }
}

/// An ordered sequence of patch operations.
///
/// Serializes as a JSON array. Operations apply in order, each against the
/// document left by the previous one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument {
    operations: Vec<PatchOperation>,
}

impl PatchDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation, returning the document for chaining.
    pub fn add_operation(&mut self, operation: PatchOperation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Appends an operation to an owned document.
    #[must_use]
    pub fn with_operation(mut self, operation: PatchOperation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Returns the operations in order.
    #[must_use]
    pub fn operations(&self) -> &[PatchOperation] {
        &self.operations
    }

    /// Iterates over the operations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PatchOperation> {
        self.operations.iter()
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the document has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Checks the pointer syntax of every operation.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatchError::InvalidPointer`] found.
    pub fn verify(&self) -> Result<(), PatchError> {
        self.operations.iter().try_for_each(PatchOperation::verify)
    }

    /// Applies the operations to a JSON document.
    ///
    /// Application is all-or-nothing: on error `target` is left unchanged.
    /// A `replace` at the root with an object merges its keys into the
    /// existing object, which is how the billing API treats `path: "/"`.
    ///
    /// # Errors
    ///
    /// Returns the [`PatchError`] of the first operation that fails.
    pub fn apply(&self, target: &mut Value) -> Result<(), PatchError> {
        let mut working = target.clone();
        for operation in &self.operations {
            operation.apply(&mut working)?;
        }
        *target = working;
        Ok(())
    }

    /// Applies the operations to a copy of a bag.
    ///
    /// # Errors
    ///
    /// Returns a [`PatchError`] if an operation fails, or
    /// [`PatchError::InvalidPointer`] with path `/` if the result is no
    /// longer an object.
    pub fn apply_to_bag(&self, bag: &AttributeBag) -> Result<AttributeBag, PatchError> {
        let mut value = Value::from(bag.clone());
        self.apply(&mut value)?;
        match value {
            Value::Object(map) => Ok(AttributeBag::from(map)),
            _ => Err(PatchError::InvalidPointer {
                path: "/".to_string(),
            }),
        }
    }
}

impl From<Vec<PatchOperation>> for PatchDocument {
    fn from(operations: Vec<PatchOperation>) -> Self {
        Self { operations }
    }
}

impl FromIterator<PatchOperation> for PatchDocument {
    fn from_iter<I: IntoIterator<Item = PatchOperation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PatchDocument {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

fn lookup<'a>(doc: &'a Value, pointer: &JsonPointer) -> Option<&'a Value> {
    pointer
        .tokens()
        .iter()
        .try_fold(doc, |current, token| match current {
            Value::Object(map) => map.get(token),
            Value::Array(items) => parse_index(token).and_then(|i| items.get(i)),
            _ => None,
        })
}

fn lookup_mut<'a>(doc: &'a mut Value, pointer: &JsonPointer) -> Option<&'a mut Value> {
    pointer
        .tokens()
        .iter()
        .try_fold(doc, |current, token| match current {
            Value::Object(map) => map.get_mut(token),
            Value::Array(items) => parse_index(token).and_then(move |i| items.get_mut(i)),
            _ => None,
        })
}

fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty()
        || !token.bytes().all(|b| b.is_ascii_digit())
        || (token.len() > 1 && token.starts_with('0'))
    {
        return None;
    }
    token.parse().ok()
}

fn not_found(pointer: &JsonPointer) -> PatchError {
    PatchError::PathNotFound {
        path: pointer.to_string(),
    }
}

fn add_at(doc: &mut Value, pointer: &JsonPointer, value: Value) -> Result<(), PatchError> {
    let Some((parent, last)) = pointer.split_last() else {
        *doc = value;
        return Ok(());
    };
    match lookup_mut(doc, &parent).ok_or_else(|| not_found(pointer))? {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            if last == "-" {
                items.push(value);
                return Ok(());
            }
            let index = parse_index(last)
                .filter(|i| *i <= items.len())
                .ok_or_else(|| PatchError::InvalidIndex {
                    path: pointer.to_string(),
                    index: last.to_string(),
                })?;
            items.insert(index, value);
            Ok(())
        }
        _ => Err(not_found(pointer)),
    }
}

fn remove_at(doc: &mut Value, pointer: &JsonPointer) -> Result<Value, PatchError> {
    let (parent, last) = pointer.split_last().ok_or(PatchError::RemoveRoot)?;
    match lookup_mut(doc, &parent).ok_or_else(|| not_found(pointer))? {
        Value::Object(map) => map.shift_remove(last).ok_or_else(|| not_found(pointer)),
        Value::Array(items) => {
            let index = parse_index(last)
                .filter(|i| *i < items.len())
                .ok_or_else(|| PatchError::InvalidIndex {
                    path: pointer.to_string(),
                    index: last.to_string(),
                })?;
            Ok(items.remove(index))
        }
        _ => Err(not_found(pointer)),
    }
}

fn replace_at(doc: &mut Value, pointer: &JsonPointer, value: Value) -> Result<(), PatchError> {
    if pointer.is_root() {
        match (doc, value) {
            (Value::Object(target), Value::Object(fields)) => {
                for (key, field) in fields {
                    target.insert(key, field);
                }
            }
            (doc, value) => *doc = value,
        }
        return Ok(());
    }
    let target = lookup_mut(doc, pointer).ok_or_else(|| not_found(pointer))?;
    *target = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_wire_shape() {
        let op = PatchOperation::replace("/", json!({"state": "DELETED"}));
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "replace", "path": "/", "value": {"state": "DELETED"}})
        );

        let op = PatchOperation::move_value("/a", "/b");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "move", "from": "/a", "path": "/b"})
        );
    }

    #[test]
    fn test_operation_deserializes_from_wire() {
        let op: PatchOperation =
            serde_json::from_value(json!({"op": "test", "path": "/x", "value": 1})).unwrap();
        assert_eq!(op, PatchOperation::test("/x", 1));
        assert_eq!(op.op(), "test");
        assert_eq!(op.path(), "/x");
        assert_eq!(op.value(), Some(&json!(1)));
        assert!(op.from().is_none());
    }

    #[test]
    fn test_document_preserves_operation_order() {
        let mut patch = PatchDocument::new();
        patch
            .add_operation(PatchOperation::add("/a", 1))
            .add_operation(PatchOperation::remove("/b"))
            .add_operation(PatchOperation::copy("/a", "/c"));

        let ops: Vec<&str> = patch.iter().map(PatchOperation::op).collect();
        assert_eq!(ops, vec!["add", "remove", "copy"]);
        assert_eq!(patch.len(), 3);
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_verify_rejects_bad_pointers() {
        let patch = PatchDocument::new()
            .with_operation(PatchOperation::replace("/ok", 1))
            .with_operation(PatchOperation::replace("no-slash", 2));
        assert!(matches!(
            patch.verify(),
            Err(PatchError::InvalidPointer { path }) if path == "no-slash"
        ));

        let patch = PatchDocument::new().with_operation(PatchOperation::copy("bad", "/ok"));
        assert!(patch.verify().is_err());
    }

    #[test]
    fn test_apply_sequences_against_evolving_document() {
        let mut doc = json!({"name": "Plan", "cycles": [1, 3]});
        let patch: PatchDocument = vec![
            PatchOperation::add("/cycles/1", 2),
            PatchOperation::add("/cycles/-", 4),
            PatchOperation::copy("/name", "/title"),
            PatchOperation::move_value("/title", "/label"),
            PatchOperation::replace("/name", "Gold"),
            PatchOperation::test("/label", "Plan"),
            PatchOperation::remove("/cycles/0"),
        ]
        .into();

        patch.apply(&mut doc).unwrap();
        assert_eq!(
            doc,
            json!({"name": "Gold", "cycles": [2, 3, 4], "label": "Plan"})
        );
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut doc = json!({"name": "Plan"});
        let patch = PatchDocument::new()
            .with_operation(PatchOperation::replace("/name", "Changed"))
            .with_operation(PatchOperation::test("/name", "Other"));

        assert!(matches!(
            patch.apply(&mut doc),
            Err(PatchError::TestFailed { .. })
        ));
        assert_eq!(doc, json!({"name": "Plan"}));
    }

    #[test]
    fn test_root_replace_merges_object_fields() {
        let mut doc = json!({"id": "P-1", "state": "ACTIVE"});
        let patch =
            PatchDocument::new().with_operation(PatchOperation::replace("/", json!({"state": "DELETED"})));

        patch.apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"id": "P-1", "state": "DELETED"}));
    }

    #[test]
    fn test_apply_errors() {
        let mut doc = json!({"a": {"b": 1}, "list": [1]});

        let missing = PatchDocument::new().with_operation(PatchOperation::replace("/nope", 1));
        assert!(matches!(
            missing.apply(&mut doc),
            Err(PatchError::PathNotFound { .. })
        ));

        let bad_index = PatchDocument::new().with_operation(PatchOperation::add("/list/5", 1));
        assert!(matches!(
            bad_index.apply(&mut doc),
            Err(PatchError::InvalidIndex { .. })
        ));

        let leading_zero = PatchDocument::new().with_operation(PatchOperation::remove("/list/00"));
        assert!(matches!(
            leading_zero.apply(&mut doc),
            Err(PatchError::InvalidIndex { .. })
        ));

        let into_child =
            PatchDocument::new().with_operation(PatchOperation::move_value("/a", "/a/b/c"));
        assert!(matches!(
            into_child.apply(&mut doc),
            Err(PatchError::InvalidMove { .. })
        ));

        let root = PatchDocument::new().with_operation(PatchOperation::remove("/"));
        assert!(matches!(root.apply(&mut doc), Err(PatchError::RemoveRoot)));
    }

    #[test]
    fn test_apply_to_bag() {
        let bag: AttributeBag = [("name", "Plan")].into_iter().collect();
        let patch = PatchDocument::new().with_operation(PatchOperation::add("/state", "ACTIVE"));

        let patched = patch.apply_to_bag(&bag).unwrap();
        assert_eq!(patched.get_str("state"), Some("ACTIVE"));
        assert!(bag.get("state").is_none());
    }
}
