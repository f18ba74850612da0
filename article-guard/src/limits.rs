//! Length limits shared by the field validator and the reason labels.

/// Minimum number of characters an article body must have.
pub const MIN_CONTENT_LENGTH: usize = 120;

/// Maximum number of characters allowed in a title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Maximum number of characters allowed in an article body.
pub const MAX_CONTENT_LENGTH: usize = 1_000_000;

/// Number of characters of a rejected URL echoed back in its violation message.
pub const URL_PREVIEW_LENGTH: usize = 50;
