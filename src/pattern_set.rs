use std::collections::HashSet;

use crate::{
    error::PatternError,
    pattern::{Pattern, PatternOpts},
};

/// A lazily-memoized tri-state cache for [`PatternSet::all_files`].
///
/// Whether every pattern in a set admits all file names is expensive to recompute (it has to
/// walk every pattern), but cheap to invalidate, so the set only recomputes it on demand and
/// remembers the answer until the next mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AllFilesCache {
    Unknown,
    True,
    False,
}

/// An ordered collection of [`Pattern`]s matched together, as Ant's `<fileset>` matches a list of
/// `<include>`/`<exclude>` globs.
///
/// `PatternSet` itself carries no include/exclude polarity: callers combine two sets (or walk one
/// set twice) to implement inclusion and exclusion. What it provides is aggregate matching,
/// duplicate-safe mutation, and the `all_files` memoization that lets a caller skip building a
/// candidate name set entirely when every pattern in the set would accept it anyway.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    all_files_cache: AllFilesCache,
}

impl Default for AllFilesCache {
    fn default() -> Self {
        AllFilesCache::Unknown
    }
}

impl PatternSet {
    /// Builds an empty set.
    pub fn new() -> Self {
        PatternSet {
            patterns: Vec::new(),
            all_files_cache: AllFilesCache::Unknown,
        }
    }

    /// Compiles `glob` and appends the resulting pattern (or patterns, for a glob expanding into
    /// two per [`crate::CompiledGlob`]) to this set.
    pub fn insert_glob(&mut self, glob: &str, opts: PatternOpts) -> Result<(), PatternError> {
        let compiled = Pattern::compile_with_opts(glob, opts)?;
        for pattern in compiled.into_patterns() {
            self.append(pattern);
        }
        Ok(())
    }

    /// Appends a single pattern.
    ///
    /// If the cache is already known to be `true`, it stays `true` regardless of what's added
    /// (adding a pattern can only broaden a set's coverage). If it's known `false`, a new pattern
    /// might itself admit all files, so the cache is only updated, never cleared to `Unknown`: a
    /// single append is cheap enough to check directly.
    pub fn append(&mut self, pattern: Pattern) {
        self.all_files_cache = match self.all_files_cache {
            AllFilesCache::True => AllFilesCache::True,
            AllFilesCache::Unknown | AllFilesCache::False => {
                if pattern.all_files() {
                    AllFilesCache::True
                } else {
                    self.all_files_cache
                }
            }
        };

        self.patterns.push(pattern);
    }

    /// Appends every pattern yielded by `patterns`.
    ///
    /// Unlike [`Self::append`], this invalidates the cache unconditionally: a bulk insert is
    /// assumed to be large enough that re-deriving `all_files` lazily on next read is cheaper
    /// than checking every inserted pattern here.
    pub fn extend(&mut self, patterns: impl IntoIterator<Item = Pattern>) {
        self.patterns.extend(patterns);
        self.all_files_cache = AllFilesCache::Unknown;
    }

    /// Removes the first pattern for which `predicate` returns `true`, returning whether anything
    /// was removed.
    pub fn remove(&mut self, predicate: impl Fn(&Pattern) -> bool) -> bool {
        let Some(index) = self.patterns.iter().position(predicate) else {
            return false;
        };

        self.patterns.remove(index);
        self.all_files_cache = AllFilesCache::Unknown;
        true
    }

    /// Whether this set has no patterns.
    pub fn empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The number of patterns in this set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Iterates over the patterns currently in this set.
    ///
    /// Returns an owned snapshot (a clone of the current pattern list) rather than a borrowing
    /// iterator, so a caller can mutate this set (via [`Self::append`] or [`Self::remove`]) while
    /// still iterating a previous snapshot, matching the "iterate a copy" discipline Ant
    /// implementations use to tolerate set mutation mid-walk.
    pub fn iter(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.patterns.clone().into_iter()
    }

    /// Whether every pattern in this set admits any file name, i.e. whether a caller can skip
    /// building a candidate set at all and treat every file as matched.
    ///
    /// Computed lazily on first call after a mutation and memoized until the next mutation.
    pub fn all_files(&mut self) -> bool {
        if self.all_files_cache == AllFilesCache::Unknown {
            let any = self.patterns.iter().any(Pattern::all_files);
            self.all_files_cache = if any { AllFilesCache::True } else { AllFilesCache::False };
        }

        self.all_files_cache == AllFilesCache::True
    }

    /// Moves every name in `unmatched` that any pattern in this set accepts into `matched`,
    /// stopping early once `unmatched` is empty.
    pub fn match_files(&self, matched: &mut HashSet<String>, unmatched: &mut HashSet<String>) {
        for pattern in self.iter() {
            if unmatched.is_empty() {
                break;
            }
            pattern.match_files(matched, unmatched);
        }
    }

    /// Whether `elements` (directory components followed by a file name) matches any pattern in
    /// this set.
    pub fn match_file(&self, elements: &[String]) -> bool {
        self.patterns.iter().any(|p| p.match_file(elements))
    }
}
