/// The result of matching a directory (expressed as path components) against a [`crate::Pattern`].
///
/// This is deliberately not a plain boolean: a directory walker needs to know not just whether
/// *this* directory matches, but whether it's worth descending into its children at all. Collapsing
/// the three bits down to `bool` would throw away the pruning information that makes the engine
/// useful on large trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchVerdict(u8);

const BIT_MATCH: u8 = 1;
const BIT_ALL_SUBDIRECTORIES: u8 = 2;
const BIT_NO_SUBDIRECTORIES: u8 = 4;

impl MatchVerdict {
    /// This directory does not match, and neither could any of its descendants.
    pub const NO_MATCH: MatchVerdict = MatchVerdict(0);

    /// This directory matches; nothing is claimed about its descendants.
    pub const MATCH: MatchVerdict = MatchVerdict(BIT_MATCH);

    /// This directory matches, and so does every descendant of it.
    pub const MATCH_ALL_SUBDIRECTORIES: MatchVerdict =
        MatchVerdict(BIT_MATCH | BIT_ALL_SUBDIRECTORIES);

    /// This directory matches, but none of its descendants can.
    pub const MATCH_BUT_NO_SUBDIRECTORIES: MatchVerdict =
        MatchVerdict(BIT_MATCH | BIT_NO_SUBDIRECTORIES);

    /// This directory does not match, but unlike [`Self::NO_MATCH`], no descendant can either —
    /// the walker should prune here.
    pub const NO_MATCH_NO_SUBDIRECTORIES: MatchVerdict = MatchVerdict(BIT_NO_SUBDIRECTORIES);

    /// Whether this directory itself matches the pattern.
    pub fn is_match(self) -> bool {
        self.0 & BIT_MATCH != 0
    }

    /// Whether every descendant of this directory is guaranteed to also match.
    pub fn all_subdirectories_match(self) -> bool {
        self.0 & BIT_ALL_SUBDIRECTORIES != 0
    }

    /// Whether no descendant of this directory could possibly match, i.e. whether a walker
    /// should prune this subtree.
    pub fn no_subdirectories_match(self) -> bool {
        self.0 & BIT_NO_SUBDIRECTORIES != 0
    }
}
