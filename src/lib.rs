//! A thin node wrapper over parsed YAML documents.
//!
//! Parsing itself is delegated to [`yaml_rust`]; this crate wraps the
//! parsed values in a list-oriented [`Node`] with lazily-built child
//! nodes, and reports failures through a typed [`Error`] with formatted,
//! attribute-parameterized messages.
//!
//! ```
//! use yamlnode::Node;
//!
//! let node = Node::parse("key: value").unwrap();
//! assert!(node.exists());
//! assert_eq!(Some("value"), node.primary().unwrap()["key"].as_str());
//! ```

mod error;
mod node;

pub use error::{Attribute, Error, Result};
pub use node::Node;

// Re-export the delegate parser's value type, which appears in the public API.
pub use yaml_rust::Yaml;
