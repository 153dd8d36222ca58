//! errslot command-line driver.
//!
//! Builds a chain of nested fallible routines. The deepest level may create
//! an error and every level above forwards it untouched, so the outermost
//! caller sees exactly what the deepest level reported.
pub mod options;

use std::fmt;

use errslot::{
    Domain, Error, ErrorOut, ErrorSlot, Routine, define_domain, err_create_if, err_propagate,
};

pub use options::{ChainOptions, MAX_DEPTH};

define_domain! {
    /// Domain of every error raised by the demo chain.
    pub fn demo_domain => "demo"
}

/// Deepest level: creates the error when the configured code is non-zero.
pub fn raise(level: usize, opts: &ChainOptions, err: ErrorOut<'_>) -> bool {
    Routine::new(err)
        .named("raise")
        .body(|err| {
            err_create_if!(
                err,
                demo_domain(),
                opts.code != 0,
                opts.code,
                "Big error in level {} function: {}",
                level,
                opts.note
            );
            Ok(())
        })
        .finish()
}

/// Intermediate level: runs the next level and forwards its error.
pub fn relay(level: usize, opts: &ChainOptions, err: ErrorOut<'_>) -> bool {
    let mut internal = ErrorSlot::new();
    Routine::new(err)
        .named("relay")
        .body(|err| {
            run_level(level + 1, opts, internal.out());
            err_propagate!(err, internal);
            Ok(())
        })
        .on_failure(|_| tracing::debug!(level, "relay failed"))
        .finish()
}

fn run_level(level: usize, opts: &ChainOptions, err: ErrorOut<'_>) -> bool {
    if level >= usize::from(opts.depth) {
        raise(level, opts, err)
    } else {
        relay(level, opts, err)
    }
}

/// Run the whole chain starting at level 1.
pub fn run_chain(opts: &ChainOptions, err: ErrorOut<'_>) -> bool {
    run_level(1, opts, err)
}

/// What the outermost caller saw in its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub domain: Domain,
    pub code: i32,
    pub message: String,
}

impl From<&Error> for Report {
    fn from(error: &Error) -> Self {
        Self {
            domain: error.domain(),
            code: error.code(),
            message: error.message().to_string(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error:")?;
        writeln!(f, "    Domain: {}", self.domain)?;
        writeln!(f, "    Code: {}", self.code)?;
        write!(f, "    Message: {}", self.message)
    }
}

/// Run the chain the way the binary does and collect the outcome.
///
/// Returns the chain's status and, when an error reached the top, its report.
pub fn run_main(opts: &ChainOptions) -> (bool, Option<Report>) {
    if opts.discard {
        return (run_chain(opts, ErrorOut::discard()), None);
    }

    let mut err = ErrorSlot::new();
    let status = run_chain(opts, err.out());
    let report = err.get().map(Report::from);
    err.clear();
    (status, report)
}
