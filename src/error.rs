//! Centralised error hierarchy for the **Fia interpreter**.
//!
//! Every pipeline stage (scanner, parser, resolver, interpreter) converts its
//! failure modes into one of the variants defined here.  All of them render in
//! the same user‑facing shape, `On line N, <message>`, so the caller can print
//! diagnostics without caring which stage produced them.
//!
//! The module **does not** print diagnostics itself.  Stages that keep going
//! after an error (scanner, parser, resolver) push into a [`Diagnostics`]
//! list that is threaded through the run and handed back to the caller.

use std::io;
use thiserror::Error;

use log::{debug, info};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FiaError {
    /// Lexical (scanner) error with source line information.
    #[error("On line {line}, {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("On line {line}, {message}")]
    Parse { message: String, line: usize },

    /// Static‑analysis failure (redeclaration, misplaced `return`/`this`, …).
    #[error("On line {line}, {message}")]
    Resolve { message: String, line: usize },

    /// Runtime evaluation error.  Aborts the rest of the current run.
    #[error("On line {line}, {message}")]
    Runtime { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Raised when the print
    /// sink refuses a write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FiaError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        FiaError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        FiaError::Parse { message, line }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", line, message);

        FiaError::Resolve { message, line }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Runtime error: line={}, msg={}", line, message);

        FiaError::Runtime { message, line }
    }

    /// `true` for errors found before execution starts.
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            FiaError::Lex { .. } | FiaError::Parse { .. } | FiaError::Resolve { .. }
        )
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, FiaError>;

/// Ordered list of errors collected during one run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<FiaError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error.  Reporting never stops the caller.
    pub fn report(&mut self, error: FiaError) {
        debug!("Diagnostic reported: {}", error);

        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FiaError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<FiaError> {
        self.errors
    }
}
