use std::io::Write;

use num_traits::{ToPrimitive, Zero};

use crate::air::Program;
use crate::error::{ErrorKind, RuntimeError};
use crate::eval;
use crate::lexer::tokenize;
use crate::output;
use crate::state::MachineState;
use crate::symbol::{Card, Label, LabelTable, Rank, Suit};

/// A program together with its machine state and the sink its output goes to.
pub struct RunEnvironment<W: Write> {
    program: Program,
    state: MachineState,
    out: W,
    trace: bool,
}

impl<W: Write> RunEnvironment<W> {
    pub fn new(program: Program, out: W) -> Self {
        RunEnvironment {
            program,
            state: MachineState::new(),
            out,
            trace: false,
        }
    }

    /// Tokenize and resolve `src`. This cannot fail; faults only appear while running.
    pub fn from_source(src: &str, out: W) -> Self {
        Self::new(Program::resolve(tokenize(src)), out)
    }

    /// Print every dispatched instruction to stderr.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Program counter has run off the end of the program.
    pub fn is_done(&self) -> bool {
        self.state.pc >= self.program.len()
    }

    /// Run until the end of the program or the first fault. Output is flushed either way.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let mut res = Ok(());
        while !self.is_done() {
            res = self.step();
            if res.is_err() {
                break;
            }
        }
        let flushed = self.out.flush().map_err(|e| self.fault(ErrorKind::Output(e)));
        res.and(flushed)
    }

    /// Fetch and execute one instruction.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        let pc = self.state.pc;
        let Some(&card) = self.program.get(pc) else {
            return Ok(());
        };
        let extent = self.program.extent(pc);
        if self.trace && !matches!(card, Card::Line(_)) {
            let instr: Vec<String> = self
                .program
                .instruction(pc)
                .iter()
                .map(Card::to_string)
                .collect();
            output::trace(self.state.line, pc, &instr.join(" "));
        }
        // PC incremented past the whole instruction before it is performed
        self.state.pc = extent.end;

        let res = match card {
            Card::Line(line) => {
                self.state.line = line;
                Ok(())
            }
            Card::Play { rank, suit } => match rank {
                Rank::King => {
                    let label = Label::new(suit, extent.len());
                    jump(self.program.labels(), &mut self.state, label)
                }
                // Labels are only ever jumped past
                Rank::Queen => Ok(()),
                Rank::Jack => put_char(&mut self.state, suit, &mut self.out),
                Rank::Pip(10) => output::print_decimal(&self.state.reg[suit], &mut self.out)
                    .map_err(ErrorKind::Output),
                _ => eval::assign(&mut self.state.reg, &self.program.cards()[extent]),
            },
        };
        res.map_err(|kind| self.fault(kind))
    }

    fn fault(&self, kind: ErrorKind) -> RuntimeError {
        RuntimeError::new(kind, self.state.line, self.state.pc)
    }
}

/// Jump to `label` if the register of its suit is non-zero.
pub fn jump(labels: &LabelTable, state: &mut MachineState, label: Label) -> Result<(), ErrorKind> {
    if state.reg[label.suit].is_zero() {
        return Ok(());
    }
    match labels.get(label) {
        Some(target) => {
            state.pc = target;
            Ok(())
        }
        None => Err(ErrorKind::UnresolvedLabel(label)),
    }
}

/// Write the register of `suit` as one byte of a UTF-8 character.
pub fn put_char(
    state: &mut MachineState,
    suit: Suit,
    out: &mut impl Write,
) -> Result<(), ErrorKind> {
    let value = &state.reg[suit];
    let Some(byte) = value.to_u8() else {
        return Err(ErrorKind::CharacterRange(value.clone()));
    };
    state.chars.push(byte, out).map_err(ErrorKind::Output)
}
