/// Configuration for the phrase parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// After the last phrase, report the deepest rule on the active chain
    /// that still misses required parts
    pub report_unfinished_at_end: bool,

    /// Maximum number of rule contexts stored in a diagnostic's trail
    pub max_trail_len: usize,

    /// Enable statistics collection
    pub collect_stats: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            report_unfinished_at_end: false,
            max_trail_len: 64,
            collect_stats: true,
        }
    }
}

/// Statistics collected during parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Number of phrases offered to the active rule parser
    pub phrases_offered: usize,
    /// Phrases absorbed by the grammar's global reference list
    pub global_fallbacks: usize,
    /// Phrases absorbed by an ancestor of the active rule parser
    pub ancestor_fallbacks: usize,
    /// Number of rule parsers instantiated, including failed attempts
    pub parsers_created: usize,
    /// Failed instantiation attempts that were rolled back
    pub rollbacks: usize,
    /// Number of broken content entries recorded
    pub broken_content: usize,
}

impl ParseStats {
    /// Create new empty stats
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phrases_offered: 0,
            global_fallbacks: 0,
            ancestor_fallbacks: 0,
            parsers_created: 0,
            rollbacks: 0,
            broken_content: 0,
        }
    }
}
