//! The `run(text) -> diagnostics` entry point.
//!
//! A [`Fia`] session owns one interpreter, so globals declared by one `run`
//! stay visible to the next; this is what the REPL relies on.  Each call
//! scans, parses and resolves its text independently and only executes it
//! when no lexical, syntax or resolution error was reported.

use std::io::Write;

use log::{debug, info};

use crate::ast::Stmt;
use crate::error::{Diagnostics, FiaError};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::token::Token;

/// Outcome of one [`Fia::run`]: every diagnostic, in the order reported.
#[derive(Debug, Default)]
pub struct Report {
    pub diagnostics: Vec<FiaError>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// A lexical, syntax or resolution error kept the program from running.
    pub fn had_static_error(&self) -> bool {
        self.diagnostics.iter().any(FiaError::is_static)
    }

    pub fn had_runtime_error(&self) -> bool {
        self.diagnostics.iter().any(|e| !e.is_static())
    }

    /// Diagnostics rendered one per line, `On line N, <message>`.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// An interpreter session writing `print` output to `W`.
pub struct Fia<W: Write> {
    interpreter: Interpreter<W>,
}

impl<W: Write> Fia<W> {
    pub fn new(output: W) -> Self {
        info!("Starting Fia session");

        Self {
            interpreter: Interpreter::new(output),
        }
    }

    /// Scan, parse, resolve and, if all of that was clean, execute `source`.
    pub fn run(&mut self, source: &str) -> Report {
        let mut diagnostics = Diagnostics::new();

        let (tokens, lex_errors): (Vec<Token>, Vec<FiaError>) = Scanner::new(source).scan_all();
        for e in lex_errors {
            diagnostics.report(e);
        }

        let statements: Vec<Stmt> = Parser::new(&tokens, &mut diagnostics).parse();

        let locals = Resolver::new(&mut diagnostics).resolve(&statements);

        if diagnostics.has_errors() {
            info!(
                "Skipping execution: {} static error(s)",
                diagnostics.len()
            );

            return Report {
                diagnostics: diagnostics.into_vec(),
            };
        }

        self.interpreter.commit_locals(locals);

        if let Err(e) = self.interpreter.interpret(&statements) {
            debug!("Runtime error ended the run: {}", e);
            diagnostics.report(e);
        }

        Report {
            diagnostics: diagnostics.into_vec(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter<W> {
        &self.interpreter
    }

    pub fn output(&self) -> &W {
        self.interpreter.output()
    }

    pub fn output_mut(&mut self) -> &mut W {
        self.interpreter.output_mut()
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }
}
