//! Binding registry
//!
//! Merges the binding tables of an ordered module sequence into one flat
//! qualified-name registry. Each module may only register names in its own
//! namespace and namespaces are deduplicated upstream, so a collision here
//! always means a module broke its contract and the composition fails.
//!
//! The registry treats binding descriptors as opaque values; it never
//! inspects how a binding parses or encodes.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{CompositionError, Result};
use crate::module::{Binding, NamespaceModule};
use crate::names::QName;

/// Collects one module's own-namespace binding table during composition.
///
/// Handed to [`NamespaceModule::register_bindings`]; entries for any
/// namespace other than the module's own are rejected.
pub struct BindingRegistrar {
    namespace: String,
    entries: Vec<(QName, Arc<dyn Binding>)>,
}

impl BindingRegistrar {
    fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            entries: Vec::new(),
        }
    }

    /// The namespace this registrar is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register a binding for `name`.
    ///
    /// Fails with [`CompositionError::ForeignBinding`] when `name` lies
    /// outside the module's own namespace.
    pub fn register(&mut self, name: QName, binding: Arc<dyn Binding>) -> Result<()> {
        if name.namespace() != self.namespace {
            return Err(CompositionError::ForeignBinding {
                module: self.namespace.clone(),
                name: name.to_string(),
            }
            .into());
        }
        self.entries.push((name, binding));
        Ok(())
    }

    /// Register a binding for a local name in the module's own namespace.
    pub fn register_local(
        &mut self,
        local_name: impl Into<String>,
        binding: Arc<dyn Binding>,
    ) -> Result<()> {
        self.register(QName::new(self.namespace.clone(), local_name), binding)
    }
}

/// The composed binding table of one session.
///
/// Built once by [`merge`](BindingRegistry::merge), immutable afterwards
/// and safe for unsynchronized concurrent reads. Iteration order is the
/// registration order (composed module order, then per-module order).
#[derive(Debug)]
pub struct BindingRegistry {
    bindings: IndexMap<QName, BindingEntry>,
}

#[derive(Debug)]
struct BindingEntry {
    binding: Arc<dyn Binding>,
    /// Namespace of the module that contributed the binding
    module: String,
}

impl BindingRegistry {
    /// Merge the binding tables of `modules`, in order, into one registry.
    pub(crate) fn merge(modules: &[Arc<dyn NamespaceModule>]) -> Result<Self> {
        let mut bindings: IndexMap<QName, BindingEntry> = IndexMap::new();

        for module in modules {
            let mut registrar = BindingRegistrar::new(module.namespace());
            module.register_bindings(&mut registrar)?;

            for (name, binding) in registrar.entries {
                if let Some(existing) = bindings.get(&name) {
                    return Err(CompositionError::BindingCollision {
                        name: name.to_string(),
                        first: existing.module.clone(),
                        second: module.namespace().to_string(),
                    }
                    .into());
                }
                bindings.insert(
                    name,
                    BindingEntry {
                        binding,
                        module: module.namespace().to_string(),
                    },
                );
            }
        }

        Ok(Self { bindings })
    }

    /// Get the binding registered for `name`.
    pub fn get(&self, name: &QName) -> Option<&Arc<dyn Binding>> {
        self.bindings.get(name).map(|entry| &entry.binding)
    }

    /// Whether a binding is registered for `name`.
    pub fn contains(&self, name: &QName) -> bool {
        self.bindings.contains_key(name)
    }

    /// Namespace of the module that contributed the binding for `name`.
    pub fn source_module(&self, name: &QName) -> Option<&str> {
        self.bindings.get(name).map(|entry| entry.module.as_str())
    }

    /// All registered qualified names, in registration order.
    pub fn qualified_names(&self) -> impl Iterator<Item = &QName> {
        self.bindings.keys()
    }

    /// Number of registered bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry holds no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Debug)]
    struct Probe;

    impl Binding for Probe {}

    struct Table {
        namespace: String,
        locals: Vec<&'static str>,
    }

    impl Table {
        fn new(namespace: &str, locals: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                namespace: namespace.to_string(),
                locals,
            })
        }
    }

    impl NamespaceModule for Table {
        fn namespace(&self) -> &str {
            &self.namespace
        }

        fn register_bindings(&self, registrar: &mut BindingRegistrar) -> Result<()> {
            for local in &self.locals {
                registrar.register_local(*local, Arc::new(Probe))?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_merge_preserves_module_order() {
        let modules: Vec<Arc<dyn NamespaceModule>> = vec![
            Table::new("urn:a", vec!["one", "two"]),
            Table::new("urn:b", vec!["three"]),
        ];

        let registry = BindingRegistry::merge(&modules).unwrap();
        assert_eq!(registry.len(), 3);

        let names: Vec<String> = registry.qualified_names().map(|q| q.to_string()).collect();
        assert_eq!(names, vec!["{urn:a}one", "{urn:a}two", "{urn:b}three"]);
        assert_eq!(
            registry.source_module(&QName::new("urn:b", "three")),
            Some("urn:b")
        );
    }

    #[test]
    fn test_lookup() {
        let modules: Vec<Arc<dyn NamespaceModule>> = vec![Table::new("urn:a", vec!["one"])];
        let registry = BindingRegistry::merge(&modules).unwrap();

        assert!(registry.contains(&QName::new("urn:a", "one")));
        assert!(registry.get(&QName::new("urn:a", "one")).is_some());
        assert!(registry.get(&QName::new("urn:a", "missing")).is_none());
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_collision_within_module() {
        let modules: Vec<Arc<dyn NamespaceModule>> = vec![Table::new("urn:a", vec!["dup", "dup"])];

        let err = BindingRegistry::merge(&modules).unwrap_err();
        assert!(matches!(
            err,
            Error::Composition(CompositionError::BindingCollision { ref name, ref first, ref second })
                if name == "{urn:a}dup" && first == "urn:a" && second == "urn:a"
        ));
    }

    #[test]
    fn test_foreign_binding_rejected() {
        struct Trespasser;

        impl NamespaceModule for Trespasser {
            fn namespace(&self) -> &str {
                "urn:own"
            }

            fn register_bindings(&self, registrar: &mut BindingRegistrar) -> Result<()> {
                registrar.register(QName::new("urn:other", "stolen"), Arc::new(Probe))
            }
        }

        let modules: Vec<Arc<dyn NamespaceModule>> = vec![Arc::new(Trespasser)];
        let err = BindingRegistry::merge(&modules).unwrap_err();
        assert!(matches!(
            err,
            Error::Composition(CompositionError::ForeignBinding { ref module, ref name })
                if module == "urn:own" && name == "{urn:other}stolen"
        ));
    }
}
