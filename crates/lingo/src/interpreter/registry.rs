//! Operation registry for user-supplied template functions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::interpreter::builtins::Builtin;
use crate::types::Value;

/// Operation function signature.
///
/// Takes:
/// - `args`: the evaluated arguments of the template call, in order
/// - `params`: the raw positional parameters of the whole evaluation
///
/// The returned value is used as a leaf in the output.
pub type OperationFn = Arc<dyn Fn(&[Value], &[Value]) -> Value + Send + Sync>;

/// Registry of plugin operations, keyed by lower-cased name.
///
/// Plugins are consulted before built-ins, so registering a built-in's
/// name replaces it. Registration needs `&mut`, which keeps it out of the
/// way of concurrent evaluation.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    operations: BTreeMap<String, OperationFn>,
}

impl OperationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace an operation.
    pub fn insert(
        &mut self,
        name: &str,
        operation: impl Fn(&[Value], &[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.operations
            .insert(name.to_lowercase(), Arc::new(operation));
    }

    /// Get a plugin operation by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&OperationFn> {
        self.operations.get(&name.to_lowercase())
    }

    /// Check if a plugin operation exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of every callable operation, plugins and built-ins, sorted
    /// and without duplicates.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .operations
            .keys()
            .cloned()
            .chain(Builtin::ALL.iter().map(|b| b.name().to_string()))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .finish()
    }
}
