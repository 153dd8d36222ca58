//! The error object carried through slots.

use std::fmt;

use crate::Domain;

/// An error: a domain, a domain-scoped code and a rendered message.
///
/// Code `0` is reserved for "no error" and never appears in a constructed
/// error. The message is rendered once, at construction, and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    domain: Domain,
    code: i32,
    message: String,
}

impl Error {
    /// Create a new error.
    ///
    /// # Panics
    /// Panics if `code` is zero.
    #[track_caller]
    pub fn new(domain: Domain, code: i32, message: impl Into<String>) -> Self {
        assert_ne!(
            code, 0,
            "error code 0 is reserved for success (domain {domain})"
        );
        Self {
            domain,
            code,
            message: message.into(),
        }
    }

    /// Create a new error, rendering the message from format arguments.
    ///
    /// # Panics
    /// Panics if `code` is zero.
    #[track_caller]
    pub fn from_args(domain: Domain, code: i32, args: fmt::Arguments<'_>) -> Self {
        Self::new(domain, code, fmt::format(args))
    }

    /// Get the error domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Get the error code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check whether this error has the given domain and code.
    pub fn matches(&self, domain: Domain, code: i32) -> bool {
        self.domain == domain && self.code == code
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, code {})", self.message, self.domain, self.code)
    }
}

impl std::error::Error for Error {}
