//! Compilation of the restricted glob syntax used by `sideEffects`.
//!
//! Supported syntax: literal characters, `?` (any character except
//! `/`), `*` (within one path segment), and `**` as a globstar when it
//! is aligned to `/` boundaries. Everything else is matched literally,
//! with regex metacharacters escaped.

use crate::error::{Error, Result};

/// Translate a glob into an anchored regex source string.
///
/// Returns the regex and whether the glob contained any wildcard.
/// Patterns without wildcards can be matched with a plain string
/// comparison instead of a compiled regex.
#[must_use]
pub fn globstar_to_regex(glob: &str) -> (String, bool) {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() + 8);
    let mut had_wildcard = false;

    out.push('^');
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' | '^' | '$' | '.' | '+' | '|' | '(' | ')' | '[' | ']' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }

            '?' => {
                out.push('.');
                had_wildcard = true;
            }

            '*' => {
                // Move over all consecutive "*"'s, keeping track of the
                // characters on either side of the run
                let prev = if i > 0 { Some(chars[i - 1]) } else { None };
                let mut star_count = 1;
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    star_count += 1;
                    i += 1;
                }
                let next = chars.get(i + 1).copied();

                // A globstar must span a whole segment
                let is_globstar = star_count > 1
                    && (prev == Some('/') || prev.is_none())
                    && (next == Some('/') || next.is_none());

                if is_globstar {
                    // Match zero or more path segments
                    out.push_str("(?:[^/]*(?:/|$))*");
                    i += 1; // Move over the "/"
                } else {
                    // Match one path segment
                    out.push_str("[^/]*");
                }

                had_wildcard = true;
            }

            _ => out.push(c),
        }
        i += 1;
    }
    out.push('$');

    (out, had_wildcard)
}

/// Compile a glob into a matcher.
///
/// # Errors
///
/// Returns [`Error::PatternCompile`] if the translated regex fails to
/// compile.
pub fn compile(glob: &str) -> Result<(regex::Regex, bool)> {
    let (source, had_wildcard) = globstar_to_regex(glob);
    let regex = regex::Regex::new(&source).map_err(|source| Error::PatternCompile {
        pattern: glob.to_string(),
        source,
    })?;
    Ok((regex, had_wildcard))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(glob: &str) -> regex::Regex {
        compile(glob).unwrap().0
    }

    #[test]
    fn literal_pattern_has_no_wildcard() {
        let (source, had_wildcard) = globstar_to_regex("/pkg/a.js");
        assert!(!had_wildcard);
        assert_eq!(source, "^/pkg/a\\.js$");
    }

    #[test]
    fn question_mark_matches_one_char() {
        let re = matcher("/pkg/a?.js");
        assert!(re.is_match("/pkg/ab.js"));
        assert!(!re.is_match("/pkg/a.js"));
        assert!(!re.is_match("/pkg/a/.js"));
    }

    #[test]
    fn single_star_stays_within_segment() {
        let re = matcher("/pkg/*.js");
        assert!(re.is_match("/pkg/a.js"));
        assert!(!re.is_match("/pkg/nested/a.js"));
    }

    #[test]
    fn globstar_matches_zero_or_more_segments() {
        let re = matcher("/pkg/**/a.js");
        assert!(re.is_match("/pkg/a.js"));
        assert!(re.is_match("/pkg/x/a.js"));
        assert!(re.is_match("/pkg/x/y/a.js"));
        assert!(!re.is_match("/pkg/x/b.js"));
    }

    #[test]
    fn unaligned_star_run_is_not_a_globstar() {
        // "a**" is not segment-aligned, so it matches within a segment
        let re = matcher("/pkg/a**.js");
        assert!(re.is_match("/pkg/abc.js"));
        assert!(!re.is_match("/pkg/a/b.js"));
    }

    #[test]
    fn metacharacters_are_escaped() {
        let re = matcher("/pkg/a+(b).js");
        assert!(re.is_match("/pkg/a+(b).js"));
        assert!(!re.is_match("/pkg/aab.js"));
    }

    #[test]
    fn leading_globstar_matches_zero_segments() {
        let re = matcher("**/a.js");
        assert!(re.is_match("a.js"));
        assert!(re.is_match("x/a.js"));
        assert!(re.is_match("x/y/a.js"));
        assert!(!re.is_match("b.js"));
    }

    #[test]
    fn trailing_globstar_matches_everything_below() {
        let re = matcher("/pkg/dist/**");
        assert!(re.is_match("/pkg/dist/a.js"));
        assert!(re.is_match("/pkg/dist/x/y.js"));
        assert!(!re.is_match("/pkg/src/a.js"));
    }
}
