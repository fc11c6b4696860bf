use crate::error::{Error, Result};
use log::debug;
use once_cell::unsync::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

/// A read-only wrapper around zero or more parsed YAML values.
///
/// A `Node` holds one value per top-level document of the parsed source
/// (or whatever values it was explicitly constructed from) and exposes
/// them as a homogeneous collection. It owns no open resource: streams
/// and files are parsed eagerly during construction and released before
/// the constructor returns.
#[derive(Debug, Clone)]
pub struct Node {
    values: Vec<Yaml>,
    label: Option<String>,
    children: OnceCell<Vec<Node>>,
}

impl Node {
    const LOG_TARGET: &str = "yamlnode::Node";

    /// A node holding no values. `exists()` is false.
    pub fn empty() -> Self {
        Self::from_values(Vec::new())
    }

    /// Wrap a single already-parsed value. No parsing occurs.
    pub fn from_value(value: Yaml) -> Self {
        Self::from_values(vec![value])
    }

    /// Wrap an ordered sequence of already-parsed values. No parsing occurs.
    pub fn from_values(values: Vec<Yaml>) -> Self {
        Self {
            values,
            label: None,
            children: OnceCell::new(),
        }
    }

    /// Attach a caller-supplied label. The label is purely informational
    /// and never derived from the YAML content.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Parse YAML text. Each top-level document becomes one value of the
    /// resulting node.
    pub fn parse(text: &str) -> Result<Self> {
        debug!(target: Self::LOG_TARGET, "parse text ({} bytes)", text.len());
        let docs = YamlLoader::load_from_str(text).map_err(|e| {
            Error::invalid_parse(e, "cannot parse YAML '%(yaml_string)'", &[(
                "yaml_string",
                &text,
            )])
        })?;
        Ok(Self::from_values(docs))
    }

    /// Parse YAML from a byte stream. The stream is read to completion and
    /// released before parsing begins, on the success and failure paths
    /// alike; a read failure is therefore reported as an environment
    /// problem and can never be superseded by a later parse failure.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        let read = reader
            .read_to_string(&mut text)
            .map_err(|e| Error::environment_failure(e, "could not read YAML stream", &[]));
        drop(reader);
        read?;
        debug!(target: Self::LOG_TARGET, "parse stream ({} bytes)", text.len());
        let docs = YamlLoader::load_from_str(&text)
            .map_err(|e| Error::invalid_parse(e, "cannot parse YAML stream", &[]))?;
        Ok(Self::from_values(docs))
    }

    /// Parse a YAML file. A path that cannot be opened for reading is a
    /// usage error, distinct from a malformed document.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::precondition_violation(
                e,
                "file '%(file)' does not exist (while creating YAML node)",
                &[("file", &path.display())],
            )
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// The underlying parsed values, unwrapped.
    pub fn values(&self) -> &[Yaml] {
        &self.values
    }

    /// The first value, used as the node's representative value.
    /// `None` iff the node holds no values.
    pub fn primary(&self) -> Option<&Yaml> {
        self.values.first()
    }

    /// One child node per value, built on first call and cached for the
    /// node's lifetime. Subsequent calls return the same slice.
    pub fn children(&self) -> &[Node] {
        self.children
            .get_or_init(|| self.values.iter().cloned().map(Node::from_value).collect())
    }

    /// The caller-supplied label, or `""` if none was ever supplied.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    /// True iff the node has a primary value and that value is not null.
    /// A parsed empty or null document does not count as existing.
    pub fn exists(&self) -> bool {
        self.primary().is_some_and(|value| !value.is_null())
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children().iter()
    }
}
