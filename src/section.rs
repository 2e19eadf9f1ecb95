use crate::matcher::Matcher;

/// A maximal run of path components containing no `**`.
///
/// A [`crate::Pattern`]'s directory portion is a sequence of `Section`s, each separated from its
/// neighbours by a `**`. `Section`s are built once during [`crate::Pattern`] compilation and
/// never mutated afterwards; only the two `bound_*` flags are assigned, and only once,
/// immediately after construction.
#[derive(Debug, Clone)]
pub(crate) struct Section {
    elements: Vec<Matcher>,

    /// This section must match starting at index 0 of the path component list.
    ///
    /// Set by the enclosing [`crate::Pattern`] on the first section when the glob was anchored
    /// (began with a path separator).
    pub(crate) bound_start: bool,

    /// This section must match ending at the last index of the path component list.
    ///
    /// Set by the enclosing [`crate::Pattern`] on the last section when the glob's final
    /// directory token is not `**`.
    pub(crate) bound_end: bool,

    /// Cached `elements.len()`, checked on every `match_iter` call.
    length: usize,
}

impl Section {
    /// Builds a section from a non-empty ordered run of normalized path components.
    ///
    /// Panics if `elements` is empty: a `Section` with no elements would be a programmer error,
    /// since [`crate::Pattern`] compilation never produces empty runs between adjacent `**`s.
    pub(crate) fn new(elements: &[String], case_insensitive: bool) -> Self {
        assert!(
            !elements.is_empty(),
            "Section must be constructed with at least one element"
        );

        let elements = elements
            .iter()
            .map(|e| Matcher::create(e, case_insensitive))
            .collect::<Vec<_>>();

        let length = elements.len();

        Section {
            elements,
            bound_start: false,
            bound_end: false,
            length,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.length
    }

    /// Tests the matcher at `index` against `candidate` directly, without searching.
    ///
    /// Used by [`crate::Pattern::match_directory`] to decide, after an anchored section fails to
    /// match a too-short path, whether the available prefix still agrees with the pattern (in
    /// which case descending further might still succeed).
    pub(crate) fn element_matches(&self, index: usize, candidate: &str, case_insensitive: bool) -> bool {
        self.elements[index].is_match(candidate, case_insensitive)
    }

    /// Re-serializes this section back to glob syntax (the elements it was built from, joined by
    /// `/`), for round-tripping a compiled [`crate::Pattern`] back through [`crate::Pattern::compile`].
    pub(crate) fn to_glob_fragment(&self) -> String {
        self.elements
            .iter()
            .map(Matcher::source)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Searches `path_elements` (starting no earlier than `start_at`) for contiguous runs that
    /// match this section's matchers, yielding the index just past each match in ascending
    /// order.
    ///
    /// The returned index is where the *next* section should resume its own search: if this
    /// section matched `path_elements[j..j + len()]`, the yielded value is `j + len()`.
    pub(crate) fn match_iter(
        &self,
        path_elements: &[String],
        start_at: usize,
        case_insensitive: bool,
    ) -> Vec<usize> {
        if self.length == 1 {
            self.match_iter_single(path_elements, start_at, case_insensitive)
        } else {
            self.match_iter_generic(path_elements, start_at, case_insensitive)
        }
    }

    /// General-case search, used when this section spans more than one component.
    ///
    /// The bookkeeping is done in `i64` rather than `usize` because the candidate window
    /// (`start`/`end`) can legitimately go negative when the path is shorter than this section —
    /// that's precisely the "not enough room yet" case the range check below needs to detect.
    fn match_iter_generic(
        &self,
        path_elements: &[String],
        start_at: usize,
        case_insensitive: bool,
    ) -> Vec<usize> {
        let total = path_elements.len() as i64;
        let seclen = self.length as i64;
        let start_at = start_at as i64;

        let end = if self.bound_start { 1 } else { total - seclen + 1 };
        let start = if self.bound_end { total - seclen } else { start_at };

        if start > end || start < start_at || end > total - seclen + 1 {
            return vec![];
        }

        let (start, end) = (start as usize, end as usize);
        let mut matches = Vec::new();

        for index in start..end {
            let window = &path_elements[index..index + self.length];
            let all_match = self
                .elements
                .iter()
                .zip(window)
                .all(|(matcher, candidate)| matcher.is_match(candidate, case_insensitive));

            if all_match {
                matches.push(index + self.length);
            }
        }

        matches
    }

    /// Fast path for single-element sections: skips the inner per-matcher loop.
    fn match_iter_single(
        &self,
        path_elements: &[String],
        start_at: usize,
        case_insensitive: bool,
    ) -> Vec<usize> {
        let total = path_elements.len() as i64;
        let start_at = start_at as i64;

        if total == 0 {
            return vec![];
        }

        let start = if self.bound_end {
            let start = total - 1;
            if start < start_at {
                return vec![];
            }
            start
        } else {
            start_at
        };

        let end = if self.bound_start {
            1
        } else {
            if start > total {
                return vec![];
            }
            total
        };

        if start > end {
            return vec![];
        }

        let (start, end) = (start as usize, end as usize);
        let mut matches = Vec::new();

        for index in start..end {
            if self.elements[0].is_match(&path_elements[index], case_insensitive) {
                matches.push(index + 1);
            }
        }

        matches
    }
}
