//! Edit configuration for rmtrackers.
//!
//! All settings that influence the edit are carried by one value that the
//! caller threads into the pipeline, so no stage reads process-wide flags.

/// Creator string stamped into edited torrents unless overridden.
pub const DEFAULT_CREATED_BY: &str = "rmtrackers";

/// Comment stamped into edited torrents unless overridden.
pub const DEFAULT_COMMENT: &str = "trackers removed with rmtrackers";

/// Settings for a single edit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditConfig {
    /// Log removed trackers and other diagnostics
    pub verbose: bool,
    /// Value written to the `created by` field
    pub created_by: String,
    /// Value written to the `comment` field
    pub comment: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            created_by: DEFAULT_CREATED_BY.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

impl EditConfig {
    /// Returns a copy with verbose diagnostics switched on or off.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns a copy stamping the given creator and comment.
    pub fn with_stamp(mut self, created_by: impl Into<String>, comment: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self.comment = comment.into();
        self
    }
}
