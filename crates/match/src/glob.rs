//! crates/match/src/glob.rs
//! Segment and path glob matching.
//!
//! Both levels share one wildcard algorithm. A segment pattern is a sequence
//! of characters where `*` is the star and `?` matches any single
//! character; a path pattern is a sequence of segments where `**` is the
//! star and every other segment is compared with [`match_segment`].

/// Returns `true` when `c` separates path segments.
///
/// Both separators are recognised regardless of platform so patterns
/// written with either convention behave the same.
#[inline]
pub const fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// The recursive wildcard segment.
pub const RECURSIVE_WILDCARD: &str = "**";

/// Matches a single path segment against a pattern containing `*` and `?`.
///
/// `*` matches zero or more characters and `?` exactly one. When
/// `case_sensitive` is false, characters are compared by their upper-case
/// forms.
///
/// # Examples
///
/// ```
/// use matching::match_segment;
///
/// assert!(match_segment("*.class", "Foo.class", true));
/// assert!(match_segment("a??.java", "abc.java", true));
/// assert!(!match_segment("a??.java", "ab.java", true));
/// assert!(match_segment("*.JAVA", "Main.java", false));
/// ```
#[must_use]
pub fn match_segment(pattern: &str, text: &str, case_sensitive: bool) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    wildcard_match(
        pattern.as_slice(),
        text.as_slice(),
        |c| *c == '*',
        |p, t| *p == '?' || chars_equal(*p, *t, case_sensitive),
    )
}

/// Matches a multi-segment path against a pattern that may contain `**`.
///
/// Pattern and text must agree on whether they start with a separator.
/// Empty segments (doubled separators) are ignored on both sides.
///
/// # Examples
///
/// ```
/// use matching::match_path;
///
/// assert!(match_path("**/*.class", "a/b/Foo.class", true));
/// assert!(match_path("**/test/**/XYZ*", "abc/test/def/ghi/XYZ123", true));
/// assert!(match_path("modules/*/**", "modules/x/y/z", true));
/// assert!(!match_path("/src/**", "src/main", true));
/// ```
#[must_use]
pub fn match_path(pattern: &str, text: &str, case_sensitive: bool) -> bool {
    if is_anchored(pattern) != is_anchored(text) {
        return false;
    }

    let pattern = segments(pattern);
    let text = segments(text);
    wildcard_match(
        pattern.as_slice(),
        text.as_slice(),
        |segment| *segment == RECURSIVE_WILDCARD,
        |p, t| match_segment(p, t, case_sensitive),
    )
}

/// Reports whether entries beneath directory `text` could match `pattern`.
///
/// Only the leading segments before the first `**` are compared. The result
/// over-approximates: `true` may be returned for a subtree that turns out to
/// hold no matches, but a subtree that does hold matches always yields
/// `true`.
///
/// # Examples
///
/// ```
/// use matching::match_prefix;
///
/// assert!(match_prefix("src/**/*.rs", "src", true));
/// assert!(match_prefix("src/main/*.rs", "src/main", true));
/// assert!(!match_prefix("src/main/*.rs", "test", true));
/// assert!(!match_prefix("src/*.rs", "src/main/deep", true));
/// ```
#[must_use]
pub fn match_prefix(pattern: &str, text: &str, case_sensitive: bool) -> bool {
    if is_anchored(pattern) != is_anchored(text) {
        return false;
    }

    let pattern = segments(pattern);
    let text = segments(text);
    let mut p = pattern.as_slice();
    let mut t = text.as_slice();

    while let (Some(head), Some(name)) = (p.first(), t.first()) {
        if *head == RECURSIVE_WILDCARD {
            return true;
        }
        if !match_segment(head, name, case_sensitive) {
            return false;
        }
        p = &p[1..];
        t = &t[1..];
    }

    // Text exhausted: deeper entries may still match. Pattern exhausted
    // first: nothing below the text can match.
    t.is_empty()
}

/// Splits `path` into its non-empty segments.
pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split(is_separator)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn is_anchored(path: &str) -> bool {
    path.starts_with(is_separator)
}

fn chars_equal(p: char, t: char, case_sensitive: bool) -> bool {
    p == t || (!case_sensitive && p.to_uppercase().eq(t.to_uppercase()))
}

/// Generic star matcher shared by the segment and path levels.
///
/// Consumes a literal prefix, then a literal suffix, then places each
/// star-delimited block in the remaining text at its leftmost position.
fn wildcard_match<P, T>(
    pattern: &[P],
    text: &[T],
    is_star: impl Fn(&P) -> bool,
    matches: impl Fn(&P, &T) -> bool,
) -> bool {
    let only_stars = |rest: &[P]| rest.iter().all(&is_star);
    let mut p = pattern;
    let mut t = text;

    while let (Some(head), Some(item)) = (p.first(), t.first()) {
        if is_star(head) {
            break;
        }
        if !matches(head, item) {
            return false;
        }
        p = &p[1..];
        t = &t[1..];
    }
    if t.is_empty() {
        return only_stars(p);
    }
    if p.is_empty() {
        return false;
    }

    while let (Some(tail), Some(item)) = (p.last(), t.last()) {
        if is_star(tail) {
            break;
        }
        if !matches(tail, item) {
            return false;
        }
        p = &p[..p.len() - 1];
        t = &t[..t.len() - 1];
    }
    if t.is_empty() {
        return only_stars(p);
    }

    // `p` now starts and ends with a star.
    while p.len() > 1 && !t.is_empty() {
        let Some(next_star) = p[1..].iter().position(&is_star).map(|index| index + 1) else {
            break;
        };
        if next_star == 1 {
            p = &p[1..];
            continue;
        }

        let block = &p[1..next_star];
        if block.len() > t.len() {
            return false;
        }
        let found = (0..=t.len() - block.len()).find(|&offset| {
            block
                .iter()
                .zip(&t[offset..])
                .all(|(pattern_item, text_item)| matches(pattern_item, text_item))
        });
        let Some(offset) = found else {
            return false;
        };

        p = &p[next_star..];
        t = &t[offset + block.len()..];
    }

    only_stars(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_without_stars_requires_equal_length() {
        assert!(match_segment("abc", "abc", true));
        assert!(match_segment("a?c", "abc", true));
        assert!(!match_segment("abc", "abcd", true));
        assert!(!match_segment("abcd", "abc", true));
        assert!(!match_segment("abc", "abd", true));
    }

    #[test]
    fn segment_star_forms() {
        assert!(match_segment("*", "", true));
        assert!(match_segment("*", "anything", true));
        assert!(match_segment("**", "anything", true));
        assert!(match_segment("*.java", ".java", true));
        assert!(match_segment("Foo*", "Foo", true));
        assert!(match_segment("*a*b*", "xxaxxbxx", true));
        assert!(match_segment("a*b*c", "abc", true));
        assert!(match_segment("a*b*c", "aXbYbZc", true));
        assert!(!match_segment("a*b*c", "acb", true));
        assert!(!match_segment("*abc*", "ab", true));
        assert!(match_segment("?*", "x", true));
        assert!(!match_segment("?*", "", true));
    }

    #[test]
    fn segment_middle_block_uses_question_marks() {
        assert!(match_segment("*x?z*", "aaxyzbb", true));
        assert!(!match_segment("*x?z*", "aaxzbb", true));
    }

    #[test]
    fn segment_case_folding() {
        assert!(!match_segment("*.JAVA", "Main.java", true));
        assert!(match_segment("*.JAVA", "Main.java", false));
        assert!(match_segment("ÄBC", "äbc", false));
    }

    #[test]
    fn path_examples() {
        assert!(match_path("**/*.class", "a/b/Foo.class", true));
        assert!(match_path("**/*.class", "Foo.class", true));
        assert!(match_path("**/test/**/XYZ*", "abc/test/def/ghi/XYZ123", true));
        assert!(match_path("modules/*/**", "modules/x/y/z", true));
        assert!(match_path("modules/*/**", "modules/x", true));
        assert!(!match_path("modules/*/**", "modules", true));
        assert!(match_path("**", "", true));
        assert!(match_path("**", "any/depth/at/all", true));
    }

    #[test]
    fn path_requires_matching_anchor() {
        assert!(!match_path("/a/**", "a/b", true));
        assert!(!match_path("a/**", "/a/b", true));
        assert!(match_path("/a/**", "/a/b", true));
        assert!(match_path("\\a\\*", "/a/b", true));
    }

    #[test]
    fn path_fails_when_pattern_exhausted_first() {
        assert!(!match_path("a/b", "a/b/c", true));
        assert!(!match_path("a/*", "a/b/c", true));
        assert!(match_path("a/b/c", "a//b/c/", true));
    }

    #[test]
    fn path_middle_search() {
        assert!(match_path("**/a/b/**/c", "x/a/b/y/c", true));
        assert!(match_path("**/a/b/**/c", "a/b/c", true));
        assert!(!match_path("**/a/b/**/c", "x/a/y/b/c", true));
        assert!(match_path("**/**/a", "x/y/a", true));
        assert!(match_path("a/**/**/b", "a/b", true));
    }

    #[test]
    fn path_default_exclude_shapes() {
        assert!(match_path("**/CVS/**", "src/CVS/Entries", true));
        assert!(match_path("**/CVS/**", "CVS", true));
        assert!(match_path("**/CVS", "src/CVS", true));
        assert!(match_path("**/*~", "src/file.txt~", true));
        assert!(!match_path("**/CVS", "src/cvs", true));
        assert!(match_path("**/CVS", "src/cvs", false));
    }

    #[test]
    fn prefix_decisions() {
        assert!(match_prefix("**/*.class", "anything", true));
        assert!(match_prefix("a/b/*.txt", "a", true));
        assert!(match_prefix("a/b/*.txt", "a/b", true));
        assert!(!match_prefix("a/b/*.txt", "a/c", true));
        assert!(!match_prefix("a/*.txt", "a/b/c", true));
        assert!(match_prefix("a/**/z", "a/b/c", true));
        assert!(!match_prefix("/a/**", "a", true));
        assert!(match_prefix("a/b", "", true));
    }

    #[test]
    fn segments_drop_empty_parts() {
        assert_eq!(segments("/a//b\\c/"), ["a", "b", "c"]);
        assert!(segments("").is_empty());
    }
}
