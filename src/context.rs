//! Runtime context assembly
//!
//! The runtime context is the shared service registry available to all
//! bindings during one session: factories and singletons keyed by service
//! type. Contributions are applied module by module in composed order and
//! registration is last-write-wins, so the root module, composed last, has
//! final say - it can replace a dependency's default service (e.g. supply a
//! custom geometry factory).
//!
//! A factory contribution is invoked during assembly against the context as
//! assembled so far, never against a later override; construction order is
//! therefore deterministic and a construction failure aborts the whole
//! composition. There is no removal operation; overriding is the only
//! mutation, and none after assembly.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CompositionError, Error, Result};
use crate::module::NamespaceModule;

type Service = Arc<dyn Any + Send + Sync>;

/// Shared service registry of one parsing/encoding session.
///
/// Immutable after composition. Services are shared by reference across all
/// readers; a service must itself be immutable or internally thread-safe if
/// the session parses or encodes concurrently - the assembler documents
/// this contract but cannot enforce it.
#[derive(Default)]
pub struct RuntimeContext {
    services: HashMap<TypeId, Service>,
}

impl std::fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("services", &self.services.len())
            .finish()
    }
}

impl RuntimeContext {
    /// Get the service registered for type `T`.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|service| Arc::clone(service).downcast::<T>().ok())
    }

    /// Get the service registered for type `T`, failing when absent.
    ///
    /// Intended for factories resolving their own dependencies during
    /// assembly.
    pub fn require<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.get::<T>()
            .ok_or_else(|| Error::Other(format!("service not registered: {}", type_name::<T>())))
    }

    /// Whether a service is registered for type `T`.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the context holds no services
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Applies one module's context contribution during composition.
///
/// Handed to [`NamespaceModule::configure_context`].
pub struct ContextBuilder<'a> {
    context: &'a mut RuntimeContext,
    module: &'a str,
}

impl ContextBuilder<'_> {
    /// Register a concrete service instance, overriding any prior entry
    /// for the same type.
    pub fn register<T: Any + Send + Sync>(&mut self, service: T) {
        self.register_arc(Arc::new(service));
    }

    /// Register an already-shared service instance, overriding any prior
    /// entry for the same type.
    pub fn register_arc<T: Any + Send + Sync>(&mut self, service: Arc<T>) {
        self.context.services.insert(TypeId::of::<T>(), service);
    }

    /// Register a service built by `factory`, overriding any prior entry
    /// for the same type.
    ///
    /// The factory runs against the context as assembled so far, so it may
    /// [`require`](RuntimeContext::require) anything the module's
    /// dependencies already contributed. A factory failure fails the
    /// composition with [`CompositionError::ContextInstantiation`].
    pub fn register_with<T, F>(&mut self, factory: F) -> Result<()>
    where
        T: Any + Send + Sync,
        F: FnOnce(&RuntimeContext) -> Result<T>,
    {
        let service = factory(self.context).map_err(|source| {
            CompositionError::ContextInstantiation {
                service: type_name::<T>().to_string(),
                module: self.module.to_string(),
                reason: source.to_string(),
            }
        })?;
        self.register(service);
        Ok(())
    }
}

/// Assemble the runtime context by applying each module's contribution in
/// composed order.
pub(crate) fn assemble(modules: &[Arc<dyn NamespaceModule>]) -> Result<RuntimeContext> {
    let mut context = RuntimeContext::default();
    for module in modules {
        let mut builder = ContextBuilder {
            context: &mut context,
            module: module.namespace(),
        };
        module.configure_context(&mut builder)?;
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BindingRegistrar;

    #[derive(Debug, PartialEq)]
    struct CoordinateFactory {
        dimensions: usize,
    }

    #[derive(Debug)]
    struct GeometryFactory {
        coordinates: Arc<CoordinateFactory>,
    }

    struct Contributor<F>
    where
        F: Fn(&mut ContextBuilder<'_>) -> Result<()> + Send + Sync,
    {
        namespace: String,
        contribute: F,
    }

    impl<F> Contributor<F>
    where
        F: Fn(&mut ContextBuilder<'_>) -> Result<()> + Send + Sync,
    {
        fn new(namespace: &str, contribute: F) -> Arc<Self> {
            Arc::new(Self {
                namespace: namespace.to_string(),
                contribute,
            })
        }
    }

    impl<F> NamespaceModule for Contributor<F>
    where
        F: Fn(&mut ContextBuilder<'_>) -> Result<()> + Send + Sync,
    {
        fn namespace(&self) -> &str {
            &self.namespace
        }

        fn register_bindings(&self, _registrar: &mut BindingRegistrar) -> Result<()> {
            Ok(())
        }

        fn configure_context(&self, context: &mut ContextBuilder<'_>) -> Result<()> {
            (self.contribute)(context)
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let dependency = Contributor::new("urn:dep", |ctx: &mut ContextBuilder<'_>| {
            ctx.register(CoordinateFactory { dimensions: 2 });
            Ok(())
        });
        let root = Contributor::new("urn:root", |ctx: &mut ContextBuilder<'_>| {
            ctx.register(CoordinateFactory { dimensions: 3 });
            Ok(())
        });

        let modules: Vec<Arc<dyn NamespaceModule>> = vec![dependency, root];
        let context = assemble(&modules).unwrap();

        assert_eq!(context.len(), 1);
        assert_eq!(context.get::<CoordinateFactory>().unwrap().dimensions, 3);
    }

    #[test]
    fn test_factory_sees_context_so_far() {
        let dependency = Contributor::new("urn:dep", |ctx: &mut ContextBuilder<'_>| {
            ctx.register(CoordinateFactory { dimensions: 2 });
            Ok(())
        });
        let root = Contributor::new("urn:root", |ctx: &mut ContextBuilder<'_>| {
            ctx.register_with(|assembled| {
                Ok(GeometryFactory {
                    coordinates: assembled.require::<CoordinateFactory>()?,
                })
            })
        });

        let modules: Vec<Arc<dyn NamespaceModule>> = vec![dependency, root];
        let context = assemble(&modules).unwrap();

        let geometry = context.get::<GeometryFactory>().unwrap();
        assert_eq!(geometry.coordinates.dimensions, 2);
        // the instance is shared by reference with the registered service
        assert!(Arc::ptr_eq(
            &geometry.coordinates,
            &context.get::<CoordinateFactory>().unwrap()
        ));
    }

    #[test]
    fn test_factory_failure_aborts_assembly() {
        let root = Contributor::new("urn:root", |ctx: &mut ContextBuilder<'_>| {
            ctx.register_with(|assembled| {
                Ok(GeometryFactory {
                    coordinates: assembled.require::<CoordinateFactory>()?,
                })
            })
        });

        let modules: Vec<Arc<dyn NamespaceModule>> = vec![root];
        let err = assemble(&modules).unwrap_err();
        assert!(matches!(
            err,
            Error::Composition(CompositionError::ContextInstantiation { ref module, ref reason, .. })
                if module == "urn:root" && reason.contains("service not registered")
        ));
    }

    #[test]
    fn test_missing_service() {
        let context = RuntimeContext::default();
        assert!(context.is_empty());
        assert!(!context.contains::<CoordinateFactory>());
        assert!(context.get::<CoordinateFactory>().is_none());
        assert!(context.require::<CoordinateFactory>().is_err());
    }
}
