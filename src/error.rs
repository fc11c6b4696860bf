use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Display;
use std::io;
use thiserror::Error;
use yaml_rust::ScanError;

pub type Result<T> = std::result::Result<T, Error>;

/// Matches `%(name)` placeholders in a message template.
static REG_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\((?P<name>[a-zA-Z_][a-zA-Z0-9_]*)\)").unwrap());

const DEFAULT_MESSAGE: &str = "(no details)";

/// A named attribute substituted into a message template.
pub type Attribute<'a> = (&'a str, &'a dyn Display);

#[derive(Debug, Error)]
pub enum Error {
    /// The YAML source was not parseable by the delegate parser.
    #[error("{message}")]
    InvalidParse {
        message: String,
        #[source]
        cause: ScanError,
    },

    /// A caller-supplied input violated a precondition before any parsing
    /// was attempted, e.g. a file path that does not reference a readable
    /// file.
    #[error("{message}")]
    PreconditionViolation {
        message: String,
        #[source]
        cause: io::Error,
    },

    /// An input resource could not be read or released. Signals an
    /// environment problem, not a malformed document.
    #[error("{message}")]
    EnvironmentFailure {
        message: String,
        #[source]
        cause: io::Error,
    },
}

impl Error {
    const LOG_TARGET: &str = "yamlnode::Error";

    pub fn invalid_parse(cause: ScanError, template: &str, attributes: &[Attribute]) -> Self {
        let message = render_message(template, attributes);
        debug!(target: Self::LOG_TARGET, "returning InvalidParse: {message}");
        Error::InvalidParse { message, cause }
    }

    pub fn precondition_violation(
        cause: io::Error,
        template: &str,
        attributes: &[Attribute],
    ) -> Self {
        let message = render_message(template, attributes);
        debug!(target: Self::LOG_TARGET, "returning PreconditionViolation: {message}");
        Error::PreconditionViolation { message, cause }
    }

    pub fn environment_failure(cause: io::Error, template: &str, attributes: &[Attribute]) -> Self {
        let message = render_message(template, attributes);
        debug!(target: Self::LOG_TARGET, "returning EnvironmentFailure: {message}");
        Error::EnvironmentFailure { message, cause }
    }

    /// The resolved, human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Error::InvalidParse { message, .. }
            | Error::PreconditionViolation { message, .. }
            | Error::EnvironmentFailure { message, .. } => message,
        }
    }
}

/// Substitute `%(name)` placeholders in `template` with the matching
/// attribute values. Placeholders without a matching attribute are left
/// verbatim. An empty template renders as a fixed placeholder text.
fn render_message(template: &str, attributes: &[Attribute]) -> String {
    if template.is_empty() {
        return DEFAULT_MESSAGE.to_string();
    }
    REG_ATTRIBUTE
        .replace_all(template, |caps: &Captures| {
            let name = &caps["name"];
            attributes
                .iter()
                .find(|(attr_name, _)| *attr_name == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod test {
    use super::{render_message, Error};
    use std::error::Error as _;
    use std::io;
    use yaml_rust::YamlLoader;

    #[test]
    fn test_render_message_no_attributes() {
        assert_eq!("plain text", render_message("plain text", &[]));
    }

    #[test]
    fn test_render_message_substitutes_attributes() {
        assert_eq!(
            "cannot open 'a.yaml' (attempt 3)",
            render_message(
                "cannot open '%(file)' (attempt %(count))",
                &[("file", &"a.yaml"), ("count", &3)],
            )
        );
    }

    #[test]
    fn test_render_message_keeps_unknown_placeholders() {
        assert_eq!(
            "missing %(what)",
            render_message("missing %(what)", &[("other", &"x")])
        );
    }

    #[test]
    fn test_render_message_empty_template() {
        assert_eq!("(no details)", render_message("", &[("file", &"a.yaml")]));
    }

    #[test]
    fn test_invalid_parse_keeps_cause() {
        let scan_err = YamlLoader::load_from_str("key: \"unterminated").unwrap_err();
        let err = Error::invalid_parse(scan_err, "cannot parse YAML '%(yaml_string)'", &[
            ("yaml_string", &"key: \"unterminated"),
        ]);
        assert_eq!("cannot parse YAML 'key: \"unterminated'", err.message());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_environment_failure_message() {
        let err = Error::environment_failure(
            io::Error::new(io::ErrorKind::BrokenPipe, "gone"),
            "could not read YAML stream",
            &[],
        );
        assert_eq!("could not read YAML stream", err.message());
        assert!(matches!(err, Error::EnvironmentFailure { .. }));
    }
}
