//! Schema location resolution
//!
//! Chains the location resolvers of the composed modules: resolution asks
//! each module in composed order whether it claims the target namespace and
//! returns the first positive match. Whether an unresolved namespace is
//! fatal (strict validation) or ignorable (lenient parsing) is the external
//! schema loader's policy choice, so both a strict and a lenient entry
//! point are provided.

use std::path::Path;
use std::sync::Arc;

use url::Url;

use crate::error::{CompositionError, Error, Result};
use crate::module::NamespaceModule;

/// Composed schema-location resolver of one session.
///
/// Immutable after composition and safe for unsynchronized concurrent
/// reads. Handed to the external schema loader to locate the XSD document
/// backing any namespace referenced (directly or via import) from the root.
#[derive(Debug)]
pub struct SchemaLocationChain {
    modules: Vec<Arc<dyn NamespaceModule>>,
}

impl SchemaLocationChain {
    pub(crate) fn new(modules: Vec<Arc<dyn NamespaceModule>>) -> Self {
        Self { modules }
    }

    /// Resolve the schema document URL for `target_namespace`.
    ///
    /// Modules are tried in composed order; the first one claiming the
    /// namespace wins. `requesting_namespace` identifies the schema whose
    /// import triggered the lookup and is carried into the error for
    /// diagnostics. Fails with
    /// [`CompositionError::UnresolvedSchemaLocation`] when no module claims
    /// the namespace.
    pub fn resolve(
        &self,
        requesting_namespace: &str,
        target_namespace: &str,
        hint: Option<&str>,
    ) -> Result<Url> {
        self.try_resolve(target_namespace, hint).ok_or_else(|| {
            Error::Composition(CompositionError::UnresolvedSchemaLocation {
                namespace: target_namespace.to_string(),
                hint: hint.map(str::to_string),
                requested_by: requesting_namespace.to_string(),
            })
        })
    }

    /// Lenient variant of [`resolve`](Self::resolve): `None` when no module
    /// claims the namespace.
    pub fn try_resolve(&self, target_namespace: &str, hint: Option<&str>) -> Option<Url> {
        self.modules
            .iter()
            .find_map(|module| module.schema_location(target_namespace, hint))
    }
}

/// Anchor a relative schema location hint against an absolute base URL.
pub fn anchor(base: &Url, hint: &str) -> Result<Url> {
    Ok(base.join(hint)?)
}

/// URL for a schema document bundled on the local filesystem.
///
/// The path must be absolute; `file://` URLs cannot carry relative paths.
pub fn file_url(path: impl AsRef<Path>) -> Result<Url> {
    let path = path.as_ref();
    Url::from_file_path(path).map_err(|_| {
        Error::Other(format!(
            "cannot build file URL from non-absolute path '{}'",
            path.display()
        ))
    })
}
