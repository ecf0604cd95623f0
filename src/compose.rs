//! Composition entry point
//!
//! Turns one root module plus its dependency closure into the artifacts a
//! parsing/encoding session consumes: the binding registry, the schema
//! location chain and the runtime context. Composition is a synchronous,
//! single-threaded computation performed once per session; it either yields
//! all artifacts or fails, and no partially-usable artifact is ever exposed.

use std::sync::Arc;

use crate::context::{self, RuntimeContext};
use crate::error::Result;
use crate::graph;
use crate::locations::SchemaLocationChain;
use crate::module::NamespaceModule;
use crate::registry::BindingRegistry;

/// The composed artifacts of one parsing/encoding session.
///
/// Held for the session's duration and discarded together at session end.
/// The binding registry and location chain are immutable and safe for
/// unsynchronized concurrent reads; the runtime context shares its services
/// by reference (see [`RuntimeContext`]).
#[derive(Debug)]
pub struct Composition {
    modules: Vec<Arc<dyn NamespaceModule>>,
    bindings: BindingRegistry,
    locations: SchemaLocationChain,
    context: RuntimeContext,
}

impl Composition {
    /// Compose `root` and its transitive dependencies.
    ///
    /// Resolves the dependency graph, merges the binding tables, builds the
    /// schema location chain and assembles the runtime context, in that
    /// order. Any composition error aborts the session.
    pub fn compose(root: Arc<dyn NamespaceModule>) -> Result<Self> {
        let modules = graph::resolve_order(root)?;
        let bindings = BindingRegistry::merge(&modules)?;
        let context = context::assemble(&modules)?;
        let locations = SchemaLocationChain::new(modules.clone());

        Ok(Self {
            modules,
            bindings,
            locations,
            context,
        })
    }

    /// Modules in composed order: dependencies first, root last.
    pub fn modules(&self) -> &[Arc<dyn NamespaceModule>] {
        &self.modules
    }

    /// The composed binding registry
    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    /// The composed schema location chain
    pub fn locations(&self) -> &SchemaLocationChain {
        &self.locations
    }

    /// The assembled runtime context
    pub fn context(&self) -> &RuntimeContext {
        &self.context
    }
}
