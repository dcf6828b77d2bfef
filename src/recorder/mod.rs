//! Recording channel plumbing shared by capture channels

pub mod channel;

pub use channel::{RecordingChannel, RecordingError, RecordingResult};
