//! Caller-owned error slots and the output handle routines write into.

use crate::Error;
use crate::protocol::{Failed, Step};

/// A location owned by a caller that holds at most one [`Error`].
///
/// A slot must be empty before anything populates it. Populating a full slot
/// panics instead of overwriting, so the first failure is never lost.
#[derive(Debug, Default)]
pub struct ErrorSlot {
    error: Option<Box<Error>>,
}

impl ErrorSlot {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self { error: None }
    }

    pub fn is_set(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none()
    }

    /// Borrow the held error, if any.
    pub fn get(&self) -> Option<&Error> {
        self.error.as_deref()
    }

    /// Store an error in the slot.
    ///
    /// # Panics
    /// Panics if the slot is already populated.
    #[track_caller]
    pub fn set(&mut self, error: Error) {
        self.set_boxed(Box::new(error));
    }

    /// Take the held error out, leaving the slot empty.
    pub fn take(&mut self) -> Option<Error> {
        self.take_boxed().map(|error| *error)
    }

    /// Release the held error, if any.
    pub fn clear(&mut self) {
        if let Some(error) = self.error.take() {
            tracing::trace!(domain = %error.domain(), code = error.code(), "error cleared");
        }
    }

    /// Fail if the slot is populated. Never touches the held error.
    pub fn check(&self) -> Step {
        if self.is_set() { Err(Failed) } else { Ok(()) }
    }

    /// Borrow this slot as the destination of a fallible call.
    pub fn out(&mut self) -> ErrorOut<'_> {
        ErrorOut::new(self)
    }

    /// Mutable view used by `err_propagate!` so that both an owned slot and
    /// a `&mut ErrorSlot` binding can be named as the source.
    #[doc(hidden)]
    #[inline]
    pub fn as_source(&mut self) -> &mut Self {
        self
    }

    /// Convert into a `Result`, for handing off to `?`-based code.
    pub fn into_result(self) -> crate::Result<()> {
        match self.error {
            Some(error) => Err(*error),
            None => Ok(()),
        }
    }

    #[track_caller]
    pub(crate) fn set_boxed(&mut self, error: Box<Error>) {
        if let Some(existing) = &self.error {
            panic!(
                "error slot already holds \"{existing}\"; refusing to overwrite it with \"{error}\""
            );
        }
        self.error = Some(error);
    }

    pub(crate) fn take_boxed(&mut self) -> Option<Box<Error>> {
        self.error.take()
    }
}

impl From<Error> for ErrorSlot {
    fn from(error: Error) -> Self {
        Self {
            error: Some(Box::new(error)),
        }
    }
}

/// Where a fallible routine reports its error.
///
/// Either borrows a caller's [`ErrorSlot`] or is the "discard" marker for
/// callers that do not want the error. Errors delivered to a discarding
/// handle are released on the spot.
#[derive(Debug)]
pub struct ErrorOut<'a> {
    slot: Option<&'a mut ErrorSlot>,
}

impl<'a> ErrorOut<'a> {
    pub fn new(slot: &'a mut ErrorSlot) -> Self {
        Self { slot: Some(slot) }
    }

    /// A destination that drops every error delivered to it.
    pub fn discard() -> Self {
        Self { slot: None }
    }

    pub fn is_discard(&self) -> bool {
        self.slot.is_none()
    }

    /// Whether the borrowed slot holds an error. Always false when discarding.
    pub fn is_set(&self) -> bool {
        self.slot.as_deref().is_some_and(ErrorSlot::is_set)
    }

    pub fn get(&self) -> Option<&Error> {
        self.slot.as_deref().and_then(ErrorSlot::get)
    }

    pub fn check(&self) -> Step {
        match self.slot.as_deref() {
            Some(slot) => slot.check(),
            None => Ok(()),
        }
    }

    /// Reborrow for passing down to a callee without giving up this handle.
    ///
    /// Shares its name with [`ErrorSlot::out`], so the step macros accept
    /// either a slot or a handle.
    pub fn out(&mut self) -> ErrorOut<'_> {
        ErrorOut {
            slot: self.slot.as_deref_mut(),
        }
    }

    /// Deliver an error: store it, or release it when discarding.
    ///
    /// Returns whether the error was kept.
    #[track_caller]
    pub(crate) fn deliver(&mut self, error: Box<Error>) -> bool {
        match self.slot.as_deref_mut() {
            Some(slot) => {
                slot.set_boxed(error);
                true
            }
            None => {
                tracing::debug!(
                    domain = %error.domain(),
                    code = error.code(),
                    "no destination, error released"
                );
                false
            }
        }
    }
}

impl<'a> From<&'a mut ErrorSlot> for ErrorOut<'a> {
    fn from(slot: &'a mut ErrorSlot) -> Self {
        Self::new(slot)
    }
}

impl<'a> From<Option<&'a mut ErrorSlot>> for ErrorOut<'a> {
    fn from(slot: Option<&'a mut ErrorSlot>) -> Self {
        Self { slot }
    }
}

impl<'a, 'b> From<&'b mut ErrorOut<'a>> for ErrorOut<'b> {
    fn from(out: &'b mut ErrorOut<'a>) -> Self {
        out.out()
    }
}
