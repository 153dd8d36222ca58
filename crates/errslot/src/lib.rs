//! # errslot
//!
//! Error slots: create, detect and propagate errors across nested calls while
//! each routine keeps one success path and one shared failure path.
//!
//! ## Design Philosophy
//!
//! - **Domain**: which subsystem an error belongs to, interned once per name
//! - **Error**: a domain, a non-zero code and a message rendered at creation
//! - **ErrorSlot**: a caller-owned place holding at most one error
//! - **Steps**: create, detect and propagate each either fall through or jump
//!   to the failure region (`Err(Failed)`, taken with `?`)
//!
//! ## Usage
//!
//! ```rust
//! use errslot::{ErrorOut, ErrorSlot, Routine, define_domain, err_create_if, err_propagate};
//!
//! define_domain!(fn demo => "demo");
//!
//! fn inner(code: i32, note: &str, err: ErrorOut<'_>) -> bool {
//!     Routine::new(err)
//!         .body(|err| {
//!             err_create_if!(err, demo(), code != 0, code,
//!                 "Big error in level {} function: {}", 2, note);
//!             Ok(())
//!         })
//!         .finish()
//! }
//!
//! fn outer(code: i32, err: ErrorOut<'_>) -> bool {
//!     let mut local = ErrorSlot::new();
//!     Routine::new(err)
//!         .body(|err| {
//!             inner(code, "called by outer", local.out());
//!             err_propagate!(err, local);
//!             Ok(())
//!         })
//!         .finish()
//! }
//!
//! let mut err = ErrorSlot::new();
//! assert!(!outer(-1, err.out()));
//! let error = err.get().unwrap();
//! assert!(error.matches(demo(), -1));
//! assert_eq!(error.message(), "Big error in level 2 function: called by outer");
//! ```
//!
//! ## Principles
//!
//! - A slot is empty before anything populates it; overwriting panics
//! - Every failure point is an explicit step; nothing unwinds implicitly
//! - Propagation moves the error unchanged; a discarding destination drops it
//! - A routine returns `false` exactly when it failed

mod domain;
mod error;
mod protocol;
mod routine;
mod slot;

pub use domain::{Domain, DomainRegistry};
pub use error::Error;
pub use protocol::{Failed, Step, create_if, detect, propagate};
pub use routine::{Routine, RoutineState};
pub use slot::{ErrorOut, ErrorSlot};

/// Result type alias using errslot's Error
pub type Result<T> = std::result::Result<T, Error>;
