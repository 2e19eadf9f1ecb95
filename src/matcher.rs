use regex::Regex;

/// Matches a single path component (a file or directory name) against a single glob element.
///
/// A `Matcher` never sees more than one path component at a time and never looks across a path
/// separator: crossing separators is [`crate::Section`]'s job.
#[derive(Debug, Clone)]
pub(crate) struct Matcher {
    /// The normalized glob element this matcher was built from, kept around so the pattern it
    /// belongs to can be re-serialized (see [`crate::Pattern::to_glob_string`]).
    source: String,
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    /// No `?` or `*` in the element: matched with a plain string comparison.
    Literal,

    /// Compiled to a regex so that repeated matching against many candidates (e.g. during a
    /// [`crate::Section::match_iter`] scan) doesn't re-parse the wildcard every time.
    Wildcard(Regex),
}

impl Matcher {
    /// Builds the matcher best suited to `element`: a literal comparison when there is nothing
    /// to wildcard-match, or a compiled regex otherwise.
    ///
    /// `element` must already be case-normalized by the caller; `case_insensitive` only controls
    /// whether matching against candidates folds case.
    pub(crate) fn create(element: &str, case_insensitive: bool) -> Self {
        let kind = if element.contains('?') || element.contains('*') {
            MatcherKind::Wildcard(wildcard_regex(element, case_insensitive))
        } else {
            MatcherKind::Literal
        };

        Matcher {
            source: element.to_owned(),
            kind,
        }
    }

    /// Returns `true` if `candidate` (not yet normalized) matches this matcher.
    pub(crate) fn is_match(&self, candidate: &str, case_insensitive: bool) -> bool {
        match &self.kind {
            MatcherKind::Literal => {
                if case_insensitive {
                    self.source.eq_ignore_ascii_case(candidate)
                } else {
                    self.source == candidate
                }
            }
            MatcherKind::Wildcard(regex) => regex.is_match(candidate),
        }
    }

    /// The original normalized glob element, for re-serializing a compiled pattern.
    pub(crate) fn source(&self) -> &str {
        &self.source
    }
}

/// Translates shell-style `?`/`*` wildcard syntax into an anchored regular expression.
///
/// `?` becomes `.` (exactly one character) and `*` becomes `.*` (any run, including empty);
/// everything else is escaped literally. Path separators never appear in `element` since
/// [`crate::Pattern`] splits on `/` before matchers are built, so there's no risk of `*`
/// accidentally crossing a directory boundary.
fn wildcard_regex(element: &str, case_insensitive: bool) -> Regex {
    let mut pattern = String::with_capacity(element.len() + 8);

    if case_insensitive {
        pattern.push_str("(?i)");
    }

    pattern.push('^');

    for c in element.chars() {
        match c {
            '?' => pattern.push('.'),
            '*' => pattern.push_str(".*"),
            _ => pattern.push_str(&regex::escape(&c.to_string())),
        }
    }

    pattern.push('$');

    // The pattern is built entirely from escaped literals plus `.`/`.*`, so it always compiles.
    Regex::new(&pattern).expect("wildcard-derived regex must always be valid")
}
