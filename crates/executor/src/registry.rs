//! Function registries
//!
//! The static set is built once and never changes. The dynamic set is a
//! snapshot computed from provider configuration; `ConfigureProvider`
//! replaces it with a single pointer swap, so readers see either the old set
//! or the new one, never a mix.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tfjq_core::DynamicValue;

use crate::types::{Function, FunctionError};

/// Implementation bound to a function name.
///
/// Implementations are shared across concurrent calls.
pub trait FunctionImpl: Send + Sync {
    /// Invoke with the host's argument list.
    fn call(&self, args: &[DynamicValue]) -> std::result::Result<DynamicValue, FunctionError>;
}

/// A function descriptor with its implementation.
#[derive(Clone)]
pub struct RegisteredFunction {
    /// Unique name within the registry
    pub name: String,
    /// Declared signature
    pub definition: Function,
    /// Bound implementation
    pub implementation: Arc<dyn FunctionImpl>,
}

impl std::fmt::Debug for RegisteredFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredFunction")
            .field("name", &self.name)
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Immutable name -> function map.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, RegisteredFunction>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredFunction> {
        self.functions.get(name)
    }

    /// Function names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Name -> signature pairs.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Function)> {
        self.functions
            .iter()
            .map(|(name, f)| (name.as_str(), &f.definition))
    }

    /// Number of functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// True when no function is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FromIterator<RegisteredFunction> for FunctionRegistry {
    /// Later entries with a duplicate name replace earlier ones.
    fn from_iter<I: IntoIterator<Item = RegisteredFunction>>(iter: I) -> Self {
        FunctionRegistry {
            functions: iter.into_iter().map(|f| (f.name.clone(), f)).collect(),
        }
    }
}

/// The replaceable, configuration-driven function set.
///
/// `None` until the first configure; afterwards always `Some`, possibly empty.
#[derive(Debug, Default)]
pub struct DynamicRegistry {
    current: RwLock<Option<Arc<FunctionRegistry>>>,
}

impl DynamicRegistry {
    /// An unconfigured registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. The lock is released before returning, so callers
    /// may invoke functions from it without blocking a concurrent replace.
    pub fn snapshot(&self) -> Option<Arc<FunctionRegistry>> {
        self.current.read().clone()
    }

    /// Replace the whole set.
    pub fn replace(&self, registry: FunctionRegistry) {
        *self.current.write() = Some(Arc::new(registry));
    }

    /// True once `replace` has been called.
    pub fn is_configured(&self) -> bool {
        self.current.read().is_some()
    }

    /// Look up `name` in the current snapshot.
    pub fn get(&self, name: &str) -> Option<RegisteredFunction> {
        self.snapshot().and_then(|r| r.get(name).cloned())
    }
}
