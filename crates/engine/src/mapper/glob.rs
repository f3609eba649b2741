use super::FileNameMapper;

/// A pattern split at its first `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Template {
    /// No `*`: the text is used literally.
    Literal(String),
    Wildcard { prefix: String, suffix: String },
}

impl Template {
    fn parse(pattern: &str) -> Self {
        match pattern.split_once('*') {
            Some((prefix, suffix)) => Self::Wildcard {
                prefix: prefix.to_owned(),
                suffix: suffix.to_owned(),
            },
            None => Self::Literal(pattern.to_owned()),
        }
    }
}

/// Rewrites names matching `prefix*suffix` by substituting the part matched
/// by `*` into the `to` template.
///
/// Only the first `*` of each pattern is special. A `from` without `*`
/// matches exactly that name; a `to` without `*` is used verbatim.
#[derive(Clone, Debug)]
pub struct GlobMapper {
    from: Template,
    to: Template,
}

impl GlobMapper {
    /// Creates a mapper from the two templates.
    #[must_use]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: Template::parse(from),
            to: Template::parse(to),
        }
    }

    /// The part of `source` matched by the `*` of `from`, if it matches.
    fn variable_part<'s>(&self, source: &'s str) -> Option<&'s str> {
        match &self.from {
            Template::Literal(text) => (source == text).then_some(""),
            Template::Wildcard { prefix, suffix } => {
                if source.len() < prefix.len() + suffix.len() {
                    return None;
                }
                source.strip_prefix(prefix.as_str())?.strip_suffix(suffix.as_str())
            }
        }
    }
}

impl FileNameMapper for GlobMapper {
    fn map_file_name(&self, source: &str) -> Vec<String> {
        let Some(middle) = self.variable_part(source) else {
            return Vec::new();
        };
        let target = match &self.to {
            Template::Literal(text) => text.clone(),
            Template::Wildcard { prefix, suffix } => format!("{prefix}{middle}{suffix}"),
        };
        vec![target]
    }
}
