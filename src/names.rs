//! Qualified names
//!
//! A qualified name pairs a namespace URI with a local name and identifies
//! one XML element or type across the composed binding registry. NCName
//! validation is provided for module authors registering bindings.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

// Simplified NCName pattern (ASCII subset of the XML spec ranges)
static NCNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-\.]*$").unwrap());

/// Qualified name - a (namespace URI, local name) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    namespace: String,
    local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// The namespace URI
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The local name within the namespace
    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

impl fmt::Display for QName {
    /// Clark notation: `{namespace}local-name`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local_name)
    }
}

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}

// TODO: extend NCNAME to the full Unicode NameStartChar/NameChar ranges
