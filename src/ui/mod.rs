//! UI Helpers
//!
//! Front-end state that does not touch the network: the self-resetting
//! feedback flag, the persisted dark-mode preference and date formatting.

mod date;
mod feedback;
mod theme;

pub use date::{format_date_long, parse_date};
pub use feedback::{FeedbackState, DEFAULT_FEEDBACK_DURATION};
pub use theme::{
    DarkMode, FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore,
    DARK_MODE_KEY,
};
