//! A glob pattern engine compatible with Apache Ant's `<fileset>` matching semantics.
//!
//! Given a glob containing `?`, `*` and `**` wildcards, this crate decides two things:
//!
//! * Whether a candidate directory (given as an ordered list of path components, from the root of
//!   a walk down to the candidate) matches the glob's directory portion, and whether a directory
//!   walker should keep descending into it — see [`Pattern::match_directory`] and
//!   [`MatchVerdict`].
//! * Whether a set of candidate file names matches the glob's file name sub-pattern — see
//!   [`Pattern::match_files`] and [`PatternSet::match_files`].
//!
//! Walking the filesystem itself, and any CLI or configuration surface built on top, are outside
//! this crate's scope: it matches paths you hand it, which is what lets it be used against a
//! directory tree before a single `readdir` call is made.
//!
//! # Syntax
//!
//! See [`Pattern`].
//!
//! # Example
//!
//! ```rust
//! use antglob::PatternSet;
//!
//! let mut set = PatternSet::new();
//! set.insert_glob("src/**/*.rs", Default::default()).unwrap();
//!
//! let path = ["src", "pattern", "section.rs"].map(String::from);
//! assert!(set.match_file(&path));
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(unused_crate_dependencies)]

mod error;
mod matcher;
mod pattern;
mod pattern_set;
mod section;
mod verdict;

pub use self::{
    error::PatternError,
    pattern::{CompiledGlob, Pattern, PatternOpts},
    pattern_set::PatternSet,
    verdict::MatchVerdict,
};
