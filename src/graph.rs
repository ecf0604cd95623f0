//! Dependency graph resolution
//!
//! Walks a root module's declared dependencies depth-first and produces a
//! deduplicated topological order: every module appears after all modules
//! it depends on, and the root appears last. The order is deterministic for
//! a fixed root and declaration order - the merge stages rely on it for
//! override precedence.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CompositionError, Result};
use crate::module::NamespaceModule;

/// Resolve the composition order for `root` and its dependency closure.
///
/// Fails with [`CompositionError::CyclicDependency`] when the declared
/// dependencies form a cycle, and with
/// [`CompositionError::DuplicateNamespaceModule`] when two distinct module
/// instances claim the same namespace. A single instance reachable via
/// several paths is composed exactly once.
pub fn resolve_order(root: Arc<dyn NamespaceModule>) -> Result<Vec<Arc<dyn NamespaceModule>>> {
    let mut walk = Walk::default();
    walk.visit(&root)?;
    Ok(walk.order)
}

#[derive(Default)]
struct Walk {
    /// Namespace -> the instance composed for it (identity for dedup)
    seen: HashMap<String, Arc<dyn NamespaceModule>>,
    /// Namespaces on the current depth-first path
    visiting: Vec<String>,
    /// Post-order output: dependencies first, root last
    order: Vec<Arc<dyn NamespaceModule>>,
}

impl Walk {
    fn visit(&mut self, module: &Arc<dyn NamespaceModule>) -> Result<()> {
        let namespace = module.namespace().to_string();

        if let Some(start) = self.visiting.iter().position(|ns| *ns == namespace) {
            let mut cycle = self.visiting[start..].to_vec();
            cycle.push(namespace);
            return Err(CompositionError::CyclicDependency { cycle }.into());
        }

        if let Some(composed) = self.seen.get(&namespace) {
            if Arc::ptr_eq(composed, module) {
                // shared dependency, already in the order
                return Ok(());
            }
            return Err(CompositionError::DuplicateNamespaceModule { namespace }.into());
        }
        self.seen.insert(namespace.clone(), Arc::clone(module));

        self.visiting.push(namespace);
        for dependency in module.dependencies() {
            self.visit(&dependency)?;
        }
        self.visiting.pop();

        self.order.push(Arc::clone(module));
        Ok(())
    }
}
