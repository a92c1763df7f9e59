//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside the selected task.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Checkbox drawn in front of completed tasks.
pub const COMPLETED_MARKER: &str = "[x] ";
/// Checkbox drawn in front of open tasks.
pub const PENDING_MARKER: &str = "[ ] ";
/// Marker appended to the task currently loaded into the input line.
pub const EDITING_MARKER: &str = " ✎";
/// Placeholder shown in an empty input line.
pub const INPUT_PLACEHOLDER: &str = "Enter a task";
