use std::{error::Error, fmt, io};

use miette::{Diagnostic, Severity};
use num_bigint::BigInt;

use crate::symbol::Label;

/// Fatal fault raised while running a program. There is no recovery from any of these.
#[derive(Debug)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    /// Source line being executed
    pub line: u32,
    /// Program counter after the faulting instruction was consumed
    pub pc: usize,
}

#[derive(Debug)]
pub enum ErrorKind {
    /// Jack on a register outside `0..=255`.
    CharacterRange(BigInt),
    DivisionByZero,
    /// King run with no matching queen run.
    UnresolvedLabel(Label),
    /// Writing program output failed.
    Output(io::Error),
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, line: u32, pc: usize) -> Self {
        RuntimeError { kind, line, pc }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharacterRange(value) => {
                write!(f, "character code {value} is out of 0..255 range")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::UnresolvedLabel(label) => write!(f, "can't find {label} to go to"),
            Self::Output(e) => write!(f, "failed to write output: {e}"),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on line {} (pc:{})", self.kind, self.line, self.pc)
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ErrorKind::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl Diagnostic for RuntimeError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind {
            ErrorKind::CharacterRange(_) => "runtime::char_range",
            ErrorKind::DivisionByZero => "runtime::div_zero",
            ErrorKind::UnresolvedLabel(_) => "runtime::label",
            ErrorKind::Output(_) => "runtime::output",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: Box<dyn fmt::Display + 'a> = match &self.kind {
            ErrorKind::CharacterRange(_) => {
                Box::new("a jack prints one byte, so its register must hold 0 to 255")
            }
            ErrorKind::DivisionByZero => {
                Box::new("make sure the register used as a clubs operand is not zero")
            }
            ErrorKind::UnresolvedLabel(label) => Box::new(format!(
                "a run of {} king(s) jumps to a run of exactly {} queen(s) of the same suit, \
                 like {label}",
                label.arity, label.arity
            )),
            ErrorKind::Output(_) => return None,
        };
        Some(help)
    }
}
