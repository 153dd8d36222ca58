//! Create, detect and propagate: the three steps a fallible routine is made of.
//!
//! Each step returns a [`Step`]. `Err(Failed)` means "leave the body now and
//! run the failure region", so `?` after a step is the jump to the failure
//! label. The error itself never travels in the `Result`; it lives in a slot.

use std::fmt;
use std::panic::Location;

use crate::{Domain, Error, ErrorOut, ErrorSlot};

/// Marker returned by a step that triggered: control moves to the failure region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Failed;

impl fmt::Display for Failed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("routine failed")
    }
}

/// Outcome of one protocol step.
pub type Step = Result<(), Failed>;

/// Creation: when `condition` holds, report a new error into `out` and fail.
///
/// The message is rendered only when the error is actually created. A false
/// condition allocates nothing and leaves `out` untouched.
///
/// # Panics
/// Panics if `condition` holds and `out` already holds an error, or if
/// `code` is zero.
#[track_caller]
pub fn create_if<'o>(
    out: impl Into<ErrorOut<'o>>,
    domain: Domain,
    condition: bool,
    code: i32,
    message: fmt::Arguments<'_>,
) -> Step {
    if !condition {
        return Ok(());
    }

    let mut out = out.into();
    if let Some(existing) = out.get() {
        panic!(
            "cannot create error in domain {domain} (code {code}): slot already holds \"{existing}\""
        );
    }

    let error = Box::new(Error::from_args(domain, code, message));
    tracing::debug!(
        domain = %domain,
        code,
        location = %Location::caller(),
        "error created"
    );
    out.deliver(error);
    Err(Failed)
}

/// Detection: fail if a callee already populated `slot`.
#[inline]
pub fn detect(slot: &ErrorSlot) -> Step {
    slot.check()
}

/// Propagation: move the error in `source` to `dest` and fail.
///
/// The error moves as-is, with no re-wrapping, and `source` is left empty.
/// A discarding `dest` releases it instead. An empty `source` is a no-op.
///
/// # Panics
/// Panics if `source` holds an error and `dest` already holds one too.
#[track_caller]
pub fn propagate<'o>(dest: impl Into<ErrorOut<'o>>, source: &mut ErrorSlot) -> Step {
    let Some(error) = source.take_boxed() else {
        return Ok(());
    };

    tracing::debug!(
        domain = %error.domain(),
        code = error.code(),
        location = %Location::caller(),
        "error propagated"
    );
    dest.into().deliver(error);
    Err(Failed)
}

/// Create an error and jump to the failure region when a condition holds.
///
/// Expands to [`create_if`] followed by `?`, so it can only be used inside a
/// function or closure returning [`Step`]. The destination is an
/// [`ErrorSlot`] or an [`ErrorOut`] (or a `&mut` to either); it is
/// reborrowed, not moved. The message takes `format!` syntax; a template
/// without arguments is used verbatim.
///
/// ```
/// use errslot::{Domain, ErrorSlot, Step, err_create_if};
///
/// fn check_len(len: usize, err: &mut ErrorSlot) -> Step {
///     let domain = Domain::get_or_create("doc-len");
///     err_create_if!(err, domain, len > 4, -1, "length {} exceeds {}", len, 4);
///     Ok(())
/// }
///
/// let mut err = ErrorSlot::new();
/// assert!(check_len(9, &mut err).is_err());
/// assert_eq!(err.get().unwrap().message(), "length 9 exceeds 4");
/// ```
#[macro_export]
macro_rules! err_create_if {
    ($out:expr, $domain:expr, $condition:expr, $code:expr, $($message:tt)+) => {
        $crate::create_if(
            ($out).out(),
            $domain,
            $condition,
            $code,
            ::std::format_args!($($message)+),
        )?
    };
}

/// Jump to the failure region if a slot (or an [`ErrorOut`](crate::ErrorOut))
/// was populated by a previous call.
#[macro_export]
macro_rules! err_check {
    ($slot:expr) => {
        ($slot).check()?
    };
}

/// Forward the error in a local slot to a destination and jump to the
/// failure region. Does nothing if the local slot is empty.
///
/// The source is an [`ErrorSlot`] binding or a `&mut ErrorSlot`; either way
/// it is reborrowed mutably, so a `source: &mut ErrorSlot` parameter works
/// without being declared `mut`.
#[macro_export]
macro_rules! err_propagate {
    ($dest:expr, $source:expr) => {
        $crate::propagate(($dest).out(), ($source).as_source())?
    };
}
