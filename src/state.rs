use std::ops::{Index, IndexMut};

use num_bigint::BigInt;

use crate::output::CharBuffer;
use crate::symbol::Suit;

/// One unbounded signed register per suit, all starting at zero.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Registers([BigInt; 4]);

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Suit, &BigInt)> {
        Suit::ALL.into_iter().zip(self.0.iter())
    }
}

impl Index<Suit> for Registers {
    type Output = BigInt;

    fn index(&self, suit: Suit) -> &BigInt {
        &self.0[suit.index()]
    }
}

impl IndexMut<Suit> for Registers {
    fn index_mut(&mut self, suit: Suit) -> &mut BigInt {
        &mut self.0[suit.index()]
    }
}

/// Everything a running program can change.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct MachineState {
    /// Index of the next card to dispatch
    pub pc: usize,
    /// Current source line, for diagnostics only
    pub line: u32,
    pub reg: Registers,
    /// Partial character written by jacks
    pub chars: CharBuffer,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }
}
