use std::collections::HashSet;

use crate::{error::PatternError, matcher::Matcher, section::Section, verdict::MatchVerdict};

/// Options controlling how a glob is compiled and later matched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternOpts {
    /// Fold case when comparing path components, both at compile time (pattern elements) and at
    /// match time (candidate components). Disabled by default, matching case-sensitive
    /// filesystems.
    pub case_insensitive: bool,
}

/// A single glob compiled into matchers, or, for globs ending in `**`, the pair of patterns Ant
/// FileSet semantics requires.
///
/// A glob like `foo/**` must match both `foo` itself and everything below it; a single
/// [`Pattern`] can't express "this directory, and separately, all its descendants" because
/// `bound_end` is one flag. [`Pattern::compile`] therefore expands such globs into two patterns up
/// front, and callers are expected to add both to the same [`crate::PatternSet`].
#[derive(Debug)]
pub enum CompiledGlob {
    /// The common case: the glob compiled to exactly one pattern.
    One(Pattern),

    /// The glob ended in `**` with more than one element: `.0` matches descendants, `.1` matches
    /// the anchor directory itself.
    Two(Pattern, Pattern),
}

impl CompiledGlob {
    /// Flattens into the one or two patterns produced by compilation.
    pub fn into_patterns(self) -> Vec<Pattern> {
        match self {
            CompiledGlob::One(p) => vec![p],
            CompiledGlob::Two(a, b) => vec![a, b],
        }
    }

    /// Borrows the one or two patterns produced by compilation.
    pub fn patterns(&self) -> Vec<&Pattern> {
        match self {
            CompiledGlob::One(p) => vec![p],
            CompiledGlob::Two(a, b) => vec![a, b],
        }
    }
}

/// A compiled Ant FileSet glob: an ordered run of directory [`Section`]s plus a file name
/// sub-pattern.
///
/// Once compiled, a `Pattern` is immutable and safe to share (by reference, or cheaply by
/// cloning) across threads and across multiple [`crate::PatternSet`]s.
///
/// # Syntax
///
/// * `?` matches exactly one character within a single path component.
/// * `*` matches any run of characters (including none) within a single path component; it never
///   crosses a `/`.
/// * `**` as a whole path component matches zero or more directory levels.
/// * A trailing `/` is sugar for a trailing `/**`.
/// * A leading `/` anchors the pattern to the root of whatever the caller is walking.
/// * `..` is rejected at compile time; `.` components are silently dropped.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// True iff the original glob was anchored with a leading `/`.
    bound_start: bool,

    /// True iff the glob's final directory token (before the file pattern) was not `**`.
    bound_end: bool,

    /// The directory portion, split on `**`. Empty means the directory portion was absent or
    /// degenerate (a bare `**` plus a file pattern).
    sections: Vec<Section>,

    /// The normalized final glob component; `"*"` when the glob ended in `**` or `/`.
    file_pattern: String,

    file_filter: FileFilter,

    case_insensitive: bool,
}

#[derive(Debug, Clone)]
enum FileFilter {
    /// `file_pattern == "*"`: every candidate name passes.
    All,
    Matcher(Matcher),
}

impl FileFilter {
    fn is_match(&self, name: &str, case_insensitive: bool) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Matcher(m) => m.is_match(name, case_insensitive),
        }
    }
}

impl Pattern {
    /// Compiles `glob` with default options (case-sensitive).
    pub fn compile(glob: &str) -> Result<CompiledGlob, PatternError> {
        Self::compile_with_opts(glob, PatternOpts::default())
    }

    /// Compiles `glob`, normalizing it and splitting it into directory [`Section`]s and a file
    /// sub-pattern.
    ///
    /// Returns [`PatternError::ParentDirNotAllowed`] if any component of the glob is `..`, or
    /// [`PatternError::EmptyGlob`] if `glob` is the empty string.
    pub fn compile_with_opts(glob: &str, opts: PatternOpts) -> Result<CompiledGlob, PatternError> {
        if glob.is_empty() {
            return Err(PatternError::EmptyGlob {
                glob: glob.to_owned(),
            });
        }

        let elements = normalize(glob, opts.case_insensitive)?;

        // A glob ending in "**" with more than one element expands into two patterns: one
        // keeping the trailing "**" (matches descendants), one with it stripped (matches the
        // anchor directory itself). This is what makes "foo/**" match both "foo/" and its
        // contents, per Ant FileSet semantics.
        if elements.len() > 1 && elements.last().map(String::as_str) == Some("**") {
            let with_descendants = Pattern::from_elements(elements.clone(), opts.case_insensitive);

            let mut anchor_elements = elements;
            anchor_elements.pop();
            let anchor_only = Pattern::from_elements(anchor_elements, opts.case_insensitive);

            Ok(CompiledGlob::Two(with_descendants, anchor_only))
        } else {
            Ok(CompiledGlob::One(Pattern::from_elements(
                elements,
                opts.case_insensitive,
            )))
        }
    }

    fn from_elements(mut elements: Vec<String>, case_insensitive: bool) -> Pattern {
        assert!(!elements.is_empty(), "normalize() never returns an empty list");

        let bound_start = elements[0] != "**";

        let file_pattern = if elements.last().map(String::as_str) == Some("**") {
            "*".to_string()
        } else {
            elements.pop().expect("elements is non-empty")
        };

        let bound_end = match elements.last() {
            None => bound_start,
            Some(last) => last != "**",
        };

        let mut sections = Vec::new();
        let mut fragment: Vec<String> = Vec::new();

        for element in elements {
            if element == "**" {
                if !fragment.is_empty() {
                    sections.push(Section::new(&fragment, case_insensitive));
                    fragment.clear();
                }
            } else {
                fragment.push(element);
            }
        }
        if !fragment.is_empty() {
            sections.push(Section::new(&fragment, case_insensitive));
        }

        if bound_start {
            if let Some(first) = sections.first_mut() {
                first.bound_start = true;
            }
        }
        if bound_end {
            if let Some(last) = sections.last_mut() {
                last.bound_end = true;
            }
        }

        let file_filter = if file_pattern == "*" {
            FileFilter::All
        } else {
            FileFilter::Matcher(Matcher::create(&file_pattern, case_insensitive))
        };

        Pattern {
            bound_start,
            bound_end,
            sections,
            file_pattern,
            file_filter,
            case_insensitive,
        }
    }

    /// Whether the glob was anchored with a leading `/`.
    pub fn bound_start(&self) -> bool {
        self.bound_start
    }

    /// Whether the glob's directory portion is bound to the file's immediate parent directory.
    pub fn bound_end(&self) -> bool {
        self.bound_end
    }

    /// The normalized file name sub-pattern (`"*"` when the glob had none).
    pub fn file_pattern(&self) -> &str {
        &self.file_pattern
    }

    /// Decides whether `path_elements` (an ordered list of directory names from the root of the
    /// walk down to the candidate directory) matches this pattern's directory portion, and
    /// whether the walker should keep descending.
    pub fn match_directory(&self, path_elements: &[String]) -> MatchVerdict {
        if self.sections.is_empty() {
            // Degenerate: the glob's directory portion is absent (e.g. "*.py" or "/*.py").
            return if self.bound_start {
                if path_elements.is_empty() {
                    MatchVerdict::MATCH_BUT_NO_SUBDIRECTORIES
                } else {
                    MatchVerdict::NO_MATCH_NO_SUBDIRECTORIES
                }
            } else {
                MatchVerdict::MATCH_ALL_SUBDIRECTORIES
            };
        }

        self.match_recurse(true, &self.sections, path_elements, 0)
    }

    /// Depth-first search across sections, consuming one per recursive call.
    ///
    /// Each section's `match_iter` yields candidate end indices in ascending order, so the first
    /// recursive call whose continuation matches is a valid witness: later sections can only
    /// narrow the set of positions that work, never widen it below a predecessor's start.
    fn match_recurse(
        &self,
        is_start: bool,
        sections: &[Section],
        path_elements: &[String],
        location: usize,
    ) -> MatchVerdict {
        let Some((section, rest)) = sections.split_first() else {
            return self.terminal_verdict();
        };

        let mut any_match = false;

        for end in section.match_iter(path_elements, location, self.case_insensitive) {
            any_match = true;

            let verdict = self.match_recurse(false, rest, path_elements, end);
            if verdict.is_match() {
                return verdict;
            }
        }

        if !(is_start && self.bound_start && !any_match) {
            return MatchVerdict::NO_MATCH;
        }

        // The pattern is anchored and its very first section failed to match at all: we may be
        // able to tell the walker no descendant can recover this failure.
        let path_len = path_elements.len();
        let section_len = section.len();

        if path_len >= section_len {
            // There was enough room for the anchored section to match and it didn't: descending
            // further only adds more path elements after an already-failed anchor, which can
            // never help.
            MatchVerdict::NO_MATCH_NO_SUBDIRECTORIES
        } else if path_len > 0 {
            // Not enough room yet. Check whether the available prefix still agrees with the
            // pattern: if it diverges already, no amount of descending can fix it.
            if section.element_matches(path_len - 1, &path_elements[path_len - 1], self.case_insensitive) {
                MatchVerdict::NO_MATCH
            } else {
                MatchVerdict::NO_MATCH_NO_SUBDIRECTORIES
            }
        } else {
            MatchVerdict::NO_MATCH
        }
    }

    /// The verdict once all sections have been consumed, i.e. a match witness exists.
    fn terminal_verdict(&self) -> MatchVerdict {
        if self.sections.len() == 1 && self.bound_start && self.bound_end {
            // A pattern like "/test/*" names exactly this directory.
            MatchVerdict::MATCH_BUT_NO_SUBDIRECTORIES
        } else if self.bound_end {
            MatchVerdict::MATCH
        } else {
            MatchVerdict::MATCH_ALL_SUBDIRECTORIES
        }
    }

    /// Whether this pattern's file sub-pattern admits every file name (i.e. `file_pattern == "*"`).
    pub fn all_files(&self) -> bool {
        matches!(self.file_filter, FileFilter::All)
    }

    /// Moves every name in `unmatched` that passes this pattern's file filter into `matched`.
    pub fn match_files(&self, matched: &mut HashSet<String>, unmatched: &mut HashSet<String>) {
        if matches!(self.file_filter, FileFilter::All) {
            matched.extend(unmatched.drain());
            return;
        }

        let newly_matched: Vec<String> = unmatched
            .iter()
            .filter(|name| self.file_filter.is_match(name, self.case_insensitive))
            .cloned()
            .collect();

        for name in newly_matched {
            unmatched.remove(&name);
            matched.insert(name);
        }
    }

    /// Whether `elements` (a full path, directory components followed by the file name) matches
    /// this pattern end to end.
    pub fn match_file(&self, elements: &[String]) -> bool {
        let Some((file_name, dir_elements)) = elements.split_last() else {
            return false;
        };

        self.match_directory(dir_elements).is_match()
            && self.file_filter.is_match(file_name, self.case_insensitive)
    }

    /// Re-serializes this pattern back to glob syntax.
    ///
    /// Compiling the result again yields an equal pattern: this is the round-trip used to check
    /// idempotence of normalization.
    pub fn to_glob_string(&self) -> String {
        if self.sections.is_empty() {
            let start = "";
            let end = if self.bound_end { "" } else { "**" };
            return format!("{start}{end}/{}", self.file_pattern);
        }

        let start = if self.bound_start { "/" } else { "**/" };
        let sections = self
            .sections
            .iter()
            .map(Section::to_glob_fragment)
            .collect::<Vec<_>>()
            .join("/**/");
        let end = if self.bound_end { "" } else { "/**" };

        format!("{start}{sections}{end}/{}", self.file_pattern)
    }
}

/// Collapses runs of repeated `/`, splits on `/`, rejects `..`, drops `.`, collapses adjacent
/// `**`, case-normalizes, and applies the trailing/leading-slash sugar described in
/// [`Pattern`]'s docs.
///
/// Returns the normalized element list, which always begins with `**` unless the original glob
/// was anchored (see [`Pattern::bound_start`]), and is never empty.
fn normalize(glob: &str, case_insensitive: bool) -> Result<Vec<String>, PatternError> {
    let collapsed = collapse_separators(glob);

    let mut simplified: Vec<String> = Vec::new();
    let mut previous: Option<&str> = None;

    for part in collapsed.split('/') {
        if part == ".." {
            return Err(PatternError::ParentDirNotAllowed {
                glob: glob.to_owned(),
            });
        }

        if part == "." {
            continue;
        }

        if part == "**" && previous == Some("**") {
            continue;
        }

        simplified.push(normalize_case(part, case_insensitive));
        previous = Some(part);
    }

    // A glob made entirely of "." components (or nothing) carries no constraint at all, which is
    // the same thing "**" means.
    if simplified.is_empty() {
        simplified.push("**".to_string());
    }

    if simplified.last().map(String::as_str) == Some("") {
        let last = simplified.len() - 1;
        simplified[last] = "**".to_string();
    }

    if simplified[0].is_empty() {
        simplified.remove(0);
        if simplified.is_empty() {
            simplified.push("**".to_string());
        }
    } else if simplified[0] != "**" {
        simplified.insert(0, "**".to_string());
    }

    Ok(simplified)
}

fn collapse_separators(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());
    let mut last_was_sep = false;

    for c in glob.chars() {
        if c == '/' {
            if last_was_sep {
                continue;
            }
            last_was_sep = true;
            out.push('/');
        } else {
            last_was_sep = false;
            out.push(c);
        }
    }

    out
}

fn normalize_case(element: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        element.to_lowercase()
    } else {
        element.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(glob: &str) -> Pattern {
        match Pattern::compile(glob).unwrap_or_else(|err| panic!("failed to compile '{glob}': {err:?}")) {
            CompiledGlob::One(p) => p,
            CompiledGlob::Two(..) => panic!("'{glob}' unexpectedly expanded into two patterns"),
        }
    }

    fn comps(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_parent_dir_anywhere() {
        for glob in ["a/../b", "../a", "a/..", ".."] {
            assert!(matches!(
                Pattern::compile(glob),
                Err(PatternError::ParentDirNotAllowed { .. })
            ));
        }
    }

    #[test]
    fn rejects_empty_glob() {
        assert!(matches!(
            Pattern::compile(""),
            Err(PatternError::EmptyGlob { .. })
        ));
    }

    #[test]
    fn bare_double_star_matches_everything() {
        let p = compile("**");
        assert!(!p.bound_start());
        assert!(!p.bound_end());
        assert_eq!(p.match_directory(&[]), MatchVerdict::MATCH_ALL_SUBDIRECTORIES);
        assert_eq!(
            p.match_directory(&comps(&["a", "b"])),
            MatchVerdict::MATCH_ALL_SUBDIRECTORIES
        );
    }

    #[test]
    fn anchored_root_only() {
        let p = compile("/");
        assert!(p.bound_start());
        assert_eq!(p.match_directory(&[]), MatchVerdict::MATCH_BUT_NO_SUBDIRECTORIES);
        assert_eq!(
            p.match_directory(&comps(&["a"])),
            MatchVerdict::NO_MATCH_NO_SUBDIRECTORIES
        );
    }

    #[test]
    fn recursive_glob_under_any_directory() {
        let p = compile("**/*.py");
        assert_eq!(
            p.match_directory(&comps(&["src", "pkg"])),
            MatchVerdict::MATCH_ALL_SUBDIRECTORIES
        );
    }

    #[test]
    fn bound_start_and_end_matches_only_named_directory() {
        let p = compile("/test/*");
        assert_eq!(
            p.match_directory(&comps(&["test"])),
            MatchVerdict::MATCH_BUT_NO_SUBDIRECTORIES
        );
        assert_eq!(
            p.match_directory(&comps(&["test", "inner"])),
            MatchVerdict::NO_MATCH_NO_SUBDIRECTORIES
        );
    }

    #[test]
    fn anchored_pattern_not_yet_complete_returns_no_match_not_pruned() {
        // "/a/b/*" against just "a": not enough path yet, but the prefix still agrees.
        let p = compile("/a/b/*");
        assert_eq!(p.match_directory(&comps(&["a"])), MatchVerdict::NO_MATCH);
        assert_eq!(
            p.match_directory(&comps(&["x"])),
            MatchVerdict::NO_MATCH_NO_SUBDIRECTORIES
        );
    }

    #[test]
    fn deep_recursive_section_may_match_deeper() {
        let p = compile("**/foo/bar/*.c");
        assert_eq!(p.match_directory(&comps(&["x", "foo"])), MatchVerdict::NO_MATCH);
    }

    #[test]
    fn trailing_double_star_expands_to_two_patterns() {
        let compiled = Pattern::compile("/src/**").unwrap();
        let patterns = compiled.patterns();
        assert_eq!(patterns.len(), 2);

        let verdicts: Vec<_> = patterns
            .iter()
            .map(|p| p.match_directory(&comps(&["src"])))
            .collect();

        assert!(verdicts.iter().any(|v| v.is_match() && v.all_subdirectories_match()));

        // The anchor-only pattern (directory portion stripped of its trailing "**") has an empty
        // section list, so it names exactly the root itself, not "src" as a directory one level
        // down: MATCH_BUT_NO_SUBDIRECTORIES only shows up against the empty path.
        assert!(patterns
            .iter()
            .any(|p| p.match_directory(&[]) == MatchVerdict::MATCH_BUT_NO_SUBDIRECTORIES));
        assert!(patterns.iter().any(|p| p.match_file(&comps(&["src"]))));
    }

    #[test]
    fn single_element_trailing_double_star_does_not_expand() {
        // "**" alone has length 1, so the ">1 element" expansion condition doesn't apply.
        assert!(matches!(Pattern::compile("**").unwrap(), CompiledGlob::One(_)));
    }

    #[test]
    fn match_files_selects_by_file_pattern() {
        let p = compile("**/*.py");
        let mut matched = HashSet::new();
        let mut unmatched: HashSet<String> = ["a.py", "b.txt"].iter().map(|s| s.to_string()).collect();

        p.match_files(&mut matched, &mut unmatched);

        assert_eq!(matched, HashSet::from(["a.py".to_string()]));
        assert_eq!(unmatched, HashSet::from(["b.txt".to_string()]));
    }

    #[test]
    fn match_file_combines_directory_and_file_filter() {
        let p = compile("/test/*");
        assert!(p.match_file(&comps(&["test", "a"])));
        assert!(!p.match_file(&comps(&["test", "inner", "a"])));
    }

    #[test]
    fn case_insensitive_option_applies_to_both_sides() {
        let p = Pattern::compile_with_opts("README.md", PatternOpts { case_insensitive: true })
            .unwrap();
        let p = match p {
            CompiledGlob::One(p) => p,
            CompiledGlob::Two(..) => unreachable!(),
        };
        assert!(p.match_file(&comps(&["readme.md"])));
    }

    #[test]
    fn idempotent_round_trip_through_to_glob_string() {
        for glob in ["**/*.py", "/src/**", "/test/*", "**/foo/bar/*.c", "**"] {
            let first = compile_non_expanding(glob);
            let serialized = first.to_glob_string();
            let second = compile_non_expanding(&serialized);
            assert_eq!(
                first.to_glob_string(),
                second.to_glob_string(),
                "re-compiling '{serialized}' (from '{glob}') did not round-trip"
            );
        }
    }

    fn compile_non_expanding(glob: &str) -> Pattern {
        match Pattern::compile(glob).unwrap() {
            CompiledGlob::One(p) => p,
            CompiledGlob::Two(_, anchor_only) => anchor_only,
        }
    }
}
