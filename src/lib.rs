// Parsing
mod lexer;
pub use lexer::tokenize;
mod air;
pub use air::Program;

// Running
mod runtime;
pub use runtime::{jump, put_char, RunEnvironment};
mod eval;
pub use eval::assign;
mod state;
pub use state::{MachineState, Registers};
pub mod output;

mod symbol;
pub use symbol::{Card, Label, LabelTable, Rank, Suit};

mod error;
pub use error::{ErrorKind, RuntimeError};

pub mod env;

/// Printed when the interpreter is not given exactly one file.
pub const USAGE: &str = "usage: ante filename.ante";
