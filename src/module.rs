//! Namespace module declaration interface
//!
//! A namespace module is the unit of configuration for one XML namespace:
//! it declares the modules it depends on, supplies the binding table for
//! its own namespace, locates its schema document and may contribute shared
//! services to the runtime context. This trait is the only interface
//! external module authors implement; everything else in the crate consumes
//! modules.
//!
//! Modules are immutable once constructed. A module shared by several
//! dependents must be shared as one `Arc` instance - the composition engine
//! deduplicates by namespace and treats a second distinct instance for the
//! same namespace as an error.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::context::ContextBuilder;
use crate::error::Result;
use crate::registry::BindingRegistrar;

/// Opaque handle to the parse/encode logic for one qualified name.
///
/// The composition engine never inspects a binding's structure; it only
/// keys bindings by qualified name and hands them to the parser/encoder.
pub trait Binding: fmt::Debug + Send + Sync {}

/// Configuration of one XML namespace for a parsing/encoding session.
pub trait NamespaceModule: Send + Sync {
    /// The namespace URI this module is the sole authority for.
    fn namespace(&self) -> &str;

    /// Modules this module depends on, in declaration order.
    ///
    /// Declaration order is significant: it is the tie-break for the
    /// composed order, which in turn decides schema-location precedence
    /// and context override order.
    fn dependencies(&self) -> Vec<Arc<dyn NamespaceModule>> {
        Vec::new()
    }

    /// Register this module's own-namespace binding table.
    ///
    /// The registrar is scoped to [`namespace`](Self::namespace); an entry
    /// for any other namespace fails the composition.
    fn register_bindings(&self, registrar: &mut BindingRegistrar) -> Result<()>;

    /// Resolve the schema document location for `target_namespace`.
    ///
    /// Returns `None` when this module does not claim the namespace. The
    /// returned URL must be absolute and directly dereferenceable; a module
    /// bundling its schema locally should return the bundled resource in
    /// preference to any remote fallback. Relative hints must be anchored
    /// before returning (see [`crate::locations::anchor`]).
    fn schema_location(&self, target_namespace: &str, hint: Option<&str>) -> Option<Url> {
        let _ = (target_namespace, hint);
        None
    }

    /// Contribute shared services to the runtime context.
    ///
    /// Called once per composition, after every dependency has contributed.
    /// Registering a service type that is already present overrides it, so
    /// a composing module can replace a dependency's default service.
    fn configure_context(&self, context: &mut ContextBuilder<'_>) -> Result<()> {
        let _ = context;
        Ok(())
    }
}

impl fmt::Debug for dyn NamespaceModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceModule")
            .field("namespace", &self.namespace())
            .finish()
    }
}
