//! The calling convention: a body, one failure region, one exit.

use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::ErrorOut;
use crate::protocol::Step;

/// Where a [`Routine`] is in its run.
///
/// `Running -> Failed` when a body step fails, `Running -> Finished` on
/// normal fall-through, `Failed -> Finished` unconditionally. `Finished` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
pub enum RoutineState {
    Running,
    Failed,
    Finished,
}

impl RoutineState {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Drives one fallible routine through body, failure region and finish.
///
/// ```
/// use errslot::{Domain, ErrorOut, ErrorSlot, Routine, err_create_if};
///
/// fn parse_port(raw: &str, err: ErrorOut<'_>) -> bool {
///     let domain = Domain::get_or_create("doc-port");
///     Routine::new(err)
///         .body(|err| {
///             err_create_if!(err, domain, raw.parse::<u16>().is_err(), 1, "bad port '{}'", raw);
///             Ok(())
///         })
///         .finish()
/// }
///
/// let mut err = ErrorSlot::new();
/// assert!(parse_port("8080", err.out()));
/// assert!(!parse_port("http", err.out()));
/// assert_eq!(err.get().unwrap().message(), "bad port 'http'");
/// ```
#[derive(Debug)]
pub struct Routine<'a> {
    out: ErrorOut<'a>,
    state: RoutineState,
    name: &'static str,
}

impl<'a> Routine<'a> {
    /// Start a routine that reports into `out`.
    pub fn new(out: impl Into<ErrorOut<'a>>) -> Self {
        Self {
            out: out.into(),
            state: RoutineState::Running,
            name: "",
        }
    }

    /// Label the routine in trace events.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn state(&self) -> RoutineState {
        self.state
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run a section of the body.
    ///
    /// Skipped once a previous section failed. A failing section moves the
    /// routine to [`RoutineState::Failed`].
    ///
    /// # Panics
    /// Panics if the routine already finished.
    #[track_caller]
    pub fn body<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut ErrorOut<'a>) -> Step,
    {
        match self.state {
            RoutineState::Running => {
                if body(&mut self.out).is_err() {
                    self.transition(RoutineState::Failed);
                }
            }
            RoutineState::Failed => {}
            RoutineState::Finished => panic!("routine '{}' already finished", self.name),
        }
        self
    }

    /// The failure region: runs `cleanup` only if the body failed.
    pub fn on_failure<F>(&mut self, cleanup: F) -> &mut Self
    where
        F: FnOnce(&ErrorOut<'a>),
    {
        if self.state == RoutineState::Failed {
            cleanup(&self.out);
        }
        self
    }

    /// The single exit. Returns `true` on success and `false` on failure.
    ///
    /// A body that fell through while the slot is populated still counts as
    /// a failure, so a `true` result always comes with an empty slot.
    ///
    /// # Panics
    /// Panics if called twice. In debug builds, also panics when the routine
    /// failed but left a real destination empty: `false` must always come
    /// with an error the caller can inspect.
    #[track_caller]
    pub fn finish(&mut self) -> bool {
        let succeeded = match self.state {
            RoutineState::Running if self.out.is_set() => {
                tracing::warn!(
                    routine = self.name,
                    "body completed with a populated error slot, reporting failure"
                );
                false
            }
            RoutineState::Running => true,
            RoutineState::Failed => {
                debug_assert!(
                    self.out.is_discard() || self.out.is_set(),
                    "routine '{}' failed without reporting an error to its destination",
                    self.name
                );
                false
            }
            RoutineState::Finished => panic!("routine '{}' finished twice", self.name),
        };
        self.transition(RoutineState::Finished);
        succeeded
    }

    fn transition(&mut self, next: RoutineState) {
        tracing::trace!(
            routine = self.name,
            from = self.state.as_str(),
            to = next.as_str(),
            "routine state"
        );
        self.state = next;
    }
}
