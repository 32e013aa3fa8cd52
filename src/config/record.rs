//! File records and the actions they resolve to.
use super::vars::DEFAULT_ACTION_VAR;

/// One provisioning instruction parsed from a `file` element.
///
/// All three fields are kept as raw strings until provisioning: every field
/// may reference variables, and the action is only pinned to an [`Action`]
/// after the per-record resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path the target will point at (`link`) or be copied from (`copy`).
    pub source: String,
    /// Path that is created, replaced, or deleted.
    pub target: String,
    /// Declared action; defaults to a reference to `$DefaultAction`, so the
    /// variable's value at resolution time governs records that omit it.
    pub action: String,
}

impl FileRecord {
    /// Create an empty record carrying the default-action reference.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: String::new(),
            target: String::new(),
            action: DEFAULT_ACTION_VAR.to_owned(),
        }
    }
}

impl Default for FileRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Filesystem effect a resolved record dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Delete any existing target, then create a symbolic link to the source
    /// (falling back to a copy when the platform refuses the link).
    Link,
    /// Delete any existing target, then copy the source over it.
    Copy,
    /// Delete any existing target; nothing further.
    Delete,
}

impl Action {
    /// Map a resolved action string onto the closed action set,
    /// case-insensitively. Anything else is unresolved and must fail the
    /// record.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("link") {
            Some(Self::Link)
        } else if value.eq_ignore_ascii_case("copy") {
            Some(Self::Copy)
        } else if value.eq_ignore_ascii_case("delete") {
            Some(Self::Delete)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn new_record_defaults_to_default_action_reference() {
        let record = FileRecord::new();
        assert_eq!(record.action, "$DefaultAction");
        assert!(record.source.is_empty());
        assert!(record.target.is_empty());
    }

    #[test]
    fn action_parse_recognizes_the_three_literals() {
        assert_eq!(Action::parse("link"), Some(Action::Link));
        assert_eq!(Action::parse("copy"), Some(Action::Copy));
        assert_eq!(Action::parse("delete"), Some(Action::Delete));
    }

    #[test]
    fn action_parse_is_case_insensitive() {
        assert_eq!(Action::parse("Link"), Some(Action::Link));
        assert_eq!(Action::parse("COPY"), Some(Action::Copy));
        assert_eq!(Action::parse("DeLeTe"), Some(Action::Delete));
    }

    #[test]
    fn action_parse_rejects_everything_else() {
        assert_eq!(Action::parse(""), None);
        assert_eq!(Action::parse("symlink"), None);
        assert_eq!(Action::parse("$DefaultAction"), None);
        assert_eq!(Action::parse("link "), None);
    }
}
