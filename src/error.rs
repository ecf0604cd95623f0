//! Error types for xmlbind-rs
//!
//! Composition errors indicate a static configuration defect: they are
//! fail-fast and non-retryable, and abort the whole session before any
//! parsing starts. Errors raised later by the parser, encoder or schema
//! loader belong to those collaborators, so a caller can always tell
//! "configuration is broken" apart from "this document is malformed".

use thiserror::Error;

/// Result type alias using xmlbind Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xmlbind operations
#[derive(Error, Debug)]
pub enum Error {
    /// Module composition error
    #[error("composition error: {0}")]
    Composition(#[from] CompositionError),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error was raised while composing modules.
    ///
    /// Composition errors abort the session; nothing built from the root
    /// module is usable after one.
    pub fn is_composition(&self) -> bool {
        matches!(self, Error::Composition(_))
    }
}

/// Errors raised while composing a root module into session artifacts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// Two distinct module instances claim the same namespace.
    ///
    /// The framework cannot have two competing authorities for one
    /// namespace; a module shared by several dependents must be shared as
    /// one instance.
    #[error("duplicate module for namespace '{namespace}'")]
    DuplicateNamespaceModule {
        /// The namespace claimed twice
        namespace: String,
    },

    /// The dependency graph contains a cycle.
    #[error("cyclic module dependency: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// Namespaces of the cycle's members, in visit order; the first
        /// namespace is repeated at the end to close the loop.
        cycle: Vec<String>,
    },

    /// A module registered a binding outside its own namespace.
    #[error("module '{module}' registered foreign binding '{name}'")]
    ForeignBinding {
        /// Namespace of the offending module
        module: String,
        /// The foreign qualified name, in Clark notation
        name: String,
    },

    /// Two modules registered a binding for the same qualified name.
    #[error("binding collision on '{name}' between modules '{first}' and '{second}'")]
    BindingCollision {
        /// The colliding qualified name, in Clark notation
        name: String,
        /// Namespace of the module that registered the name first
        first: String,
        /// Namespace of the module that registered the name second
        second: String,
    },

    /// No module in the chain resolves the requested namespace.
    ///
    /// The schema loader decides whether this is fatal (strict validation)
    /// or ignorable (lenient parsing).
    #[error("no schema location for namespace '{namespace}' (hint: {}, requested by '{requested_by}')", .hint.as_deref().unwrap_or("none"))]
    UnresolvedSchemaLocation {
        /// The namespace no module claims
        namespace: String,
        /// The schemaLocation hint supplied by the instance document, if any
        hint: Option<String>,
        /// Namespace of the schema requesting the import
        requested_by: String,
    },

    /// A service factory failed during runtime context assembly.
    #[error("failed to instantiate service '{service}' from module '{module}': {reason}")]
    ContextInstantiation {
        /// Type name of the service being constructed
        service: String,
        /// Namespace of the contributing module
        module: String,
        /// Why construction failed
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let err = CompositionError::CyclicDependency {
            cycle: vec![
                "urn:a".to_string(),
                "urn:b".to_string(),
                "urn:a".to_string(),
            ],
        };
        assert_eq!(
            format!("{}", err),
            "cyclic module dependency: urn:a -> urn:b -> urn:a"
        );
    }

    #[test]
    fn test_unresolved_location_display() {
        let err = CompositionError::UnresolvedSchemaLocation {
            namespace: "urn:missing".to_string(),
            hint: None,
            requested_by: "urn:root".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("urn:missing"));
        assert!(msg.contains("hint: none"));
        assert!(msg.contains("urn:root"));
    }

    #[test]
    fn test_error_conversion() {
        let comp = CompositionError::DuplicateNamespaceModule {
            namespace: "urn:x".to_string(),
        };
        let err: Error = comp.into();
        assert!(err.is_composition());
        assert!(!Error::Other("boom".to_string()).is_composition());
    }
}
