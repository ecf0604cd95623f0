//! # xmlbind-rs
//!
//! Dependency-aware composition of multi-namespace XML Schema binding
//! modules.
//!
//! A document instance may mix elements from several XML namespaces; each
//! namespace is handled by an independently developed schema module that
//! knows how to parse and encode its own elements and types. This crate is
//! the composition layer that turns one root module plus its dependency
//! closure into the artifacts a parsing/encoding session consumes:
//!
//! - a flat **binding registry** mapping qualified names to binding
//!   descriptors, with collision detection,
//! - a **schema location chain** that resolves any participating namespace
//!   to the URL of its schema document,
//! - a shared **runtime context** of services (factories/singletons) with
//!   deterministic last-write-wins override rules.
//!
//! The actual binding logic, the XSD document model and the parser/encoder
//! are external collaborators; the engine treats them as opaque.
//!
//! ## Example
//!
//! ```rust,ignore
//! use xmlbind::Composition;
//!
//! // `GeometryModule` implements `NamespaceModule` and declares its
//! // dependencies (e.g. the XLink module) at construction time.
//! let root = std::sync::Arc::new(GeometryModule::new());
//! let composition = Composition::compose(root)?;
//!
//! let binding = composition.bindings().get(&qname);
//! let location = composition.locations().try_resolve(ns, None);
//! let factory = composition.context().get::<GeometryFactory>();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod names;

pub mod module;

pub mod graph;
pub mod registry;
pub mod locations;
pub mod context;

pub mod compose;

// Re-exports for convenience
pub use compose::Composition;
pub use context::{ContextBuilder, RuntimeContext};
pub use error::{CompositionError, Error, Result};
pub use locations::SchemaLocationChain;
pub use module::{Binding, NamespaceModule};
pub use names::QName;
pub use registry::{BindingRegistrar, BindingRegistry};

/// Version of the xmlbind-rs library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// XLink namespace
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
