//! Options for running a demo error chain.

use clap::Args;

/// Deepest chain the CLI accepts. Each level is one nested call.
pub const MAX_DEPTH: u16 = 256;

/// Shape of the chain: how deep it goes and what the innermost level reports.
#[derive(Args, Debug, Clone)]
pub struct ChainOptions {
    /// Number of nested levels. Level 1 is the outermost; the deepest level
    /// creates the error and every level above it propagates.
    #[arg(
        long,
        default_value_t = 2,
        value_parser = clap::value_parser!(u16).range(1..=MAX_DEPTH as i64)
    )]
    pub depth: u16,

    /// Error code raised by the deepest level (0 means "no error").
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub code: i32,

    /// Text appended to the error message.
    #[arg(long, default_value = "called by errslot")]
    pub note: String,

    /// Call the outermost level without a destination, discarding the error.
    #[arg(long)]
    pub discard: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            code: -1,
            note: "called by errslot".to_string(),
            discard: false,
        }
    }
}

impl ChainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth(mut self, depth: u16) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_discard(mut self, discard: bool) -> Self {
        self.discard = discard;
        self
    }
}
