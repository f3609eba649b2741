use regex::{Captures, Regex};

use super::FileNameMapper;
use crate::error::MapperError;

/// Maps names matching a regular expression to a template with `\0`..`\9`
/// back-references.
///
/// The expression may match anywhere in the name. Groups that did not
/// participate in the match, or that do not exist, expand to nothing. A
/// backslash before any other character yields that character.
#[derive(Clone, Debug)]
pub struct RegexpMapper {
    from: Regex,
    to: String,
}

impl RegexpMapper {
    /// Compiles `from`.
    ///
    /// # Errors
    ///
    /// [`MapperError::InvalidRegex`] when `from` does not compile.
    pub fn new(from: &str, to: &str) -> Result<Self, MapperError> {
        let from = Regex::new(from).map_err(|source| MapperError::InvalidRegex {
            pattern: from.to_owned(),
            source,
        })?;
        Ok(Self {
            from,
            to: to.to_owned(),
        })
    }

    fn expand(&self, captures: &Captures<'_>) -> String {
        let mut result = String::with_capacity(self.to.len());
        let mut chars = self.to.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                result.push(ch);
                continue;
            }
            match chars.next() {
                Some(next) => match next.to_digit(10) {
                    Some(group) => {
                        if let Some(value) = captures.get(group as usize) {
                            result.push_str(value.as_str());
                        }
                    }
                    None => result.push(next),
                },
                None => result.push('\\'),
            }
        }
        result
    }
}

impl FileNameMapper for RegexpMapper {
    fn map_file_name(&self, source: &str) -> Vec<String> {
        self.from
            .captures(source)
            .map(|captures| vec![self.expand(&captures)])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(from: &str, to: &str) -> RegexpMapper {
        RegexpMapper::new(from, to).expect("valid expression")
    }

    #[test]
    fn groups_are_substituted() {
        let mapper = mapper(r"^(.*)\.java$", r"\1.class");
        assert_eq!(mapper.map_file_name("a/B.java"), ["a/B.class"]);
        assert!(mapper.map_file_name("a/B.javax").is_empty());
    }

    #[test]
    fn whole_match_and_missing_groups() {
        let mapper = mapper(r"(x)?y(z)", r"[\0|\1|\2|\7]");
        assert_eq!(mapper.map_file_name("ayz"), ["[yz||z|]"]);
    }

    #[test]
    fn escaped_characters_and_trailing_backslash() {
        let mapper = mapper("a", r"\q\");
        assert_eq!(mapper.map_file_name("a"), ["q\\"]);
    }

    #[test]
    fn match_is_unanchored() {
        let mapper = mapper("b+", "found");
        assert_eq!(mapper.map_file_name("abbbc"), ["found"]);
    }
}
