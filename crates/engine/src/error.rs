//! crates/engine/src/error.rs
//!
//! Errors raised while configuring file name mappers.

use crate::mapper::MapperKind;

/// Failure to build a mapper.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// No mapper is registered under this name.
    #[error("unknown mapper type '{name}'")]
    UnknownMapper {
        /// Requested name.
        name: String,
    },
    /// A required `from` or `to` parameter was not supplied.
    #[error("the {kind} mapper requires a '{attribute}' attribute")]
    MissingAttribute {
        /// Mapper being configured.
        kind: MapperKind,
        /// Name of the missing parameter.
        attribute: &'static str,
    },
    /// The `from` expression of a regexp mapper does not compile.
    #[error("invalid regular expression '{pattern}'")]
    InvalidRegex {
        /// Offending expression.
        pattern: String,
        /// Parser diagnostic.
        #[source]
        source: regex::Error,
    },
}

impl MapperError {
    pub(crate) const fn missing(kind: MapperKind, attribute: &'static str) -> Self {
        Self::MissingAttribute { kind, attribute }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_problem() {
        let error = MapperError::missing(MapperKind::Glob, "from");
        assert_eq!(error.to_string(), "the glob mapper requires a 'from' attribute");

        let error = MapperError::UnknownMapper { name: "package".to_owned() };
        assert_eq!(error.to_string(), "unknown mapper type 'package'");
    }

    #[test]
    fn regex_errors_keep_their_source() {
        let source = regex::Regex::new("(").expect_err("unbalanced");
        let error = MapperError::InvalidRegex { pattern: "(".to_owned(), source };
        assert!(error.source().is_some());
    }
}
