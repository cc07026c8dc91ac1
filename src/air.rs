use std::ops::Range;

use crate::symbol::{Card, Label, LabelTable, Rank};

/// Finalized program: normalized cards, jump labels, and the extent of the instruction that
/// starts at each card.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Program {
    cards: Vec<Card>,
    labels: LabelTable,
    /// `ends[i]` is one past the last card of the instruction starting at `i`
    ends: Vec<usize>,
}

impl Program {
    /// Normalize ranks, collect queen-run labels and size every instruction in a single
    /// left-to-right pass. Never fails; bad jumps are only found when they are taken.
    pub fn resolve(mut cards: Vec<Card>) -> Self {
        for card in cards.iter_mut() {
            if let Card::Play { rank, .. } = card {
                *rank = rank.normalized();
            }
        }

        let mut labels = LabelTable::new();
        let mut ends = vec![0; cards.len()];
        let mut pc = 0;
        while pc < cards.len() {
            let end = match cards[pc] {
                Card::Line(_) => pc + 1,
                Card::Play { rank, suit } => match rank {
                    Rank::Queen => {
                        let end = run_end(&cards, pc);
                        labels.define(Label::new(suit, end - pc), end);
                        end
                    }
                    Rank::King => run_end(&cards, pc),
                    Rank::Jack | Rank::Pip(10) => pc + 1,
                    _ => statement_end(&cards, pc),
                },
            };
            // Any card inside a run or statement is only reached by dispatching its head
            ends[pc..end].fill(end);
            pc = end;
        }

        Program {
            cards,
            labels,
            ends,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, pc: usize) -> Option<&Card> {
        self.cards.get(pc)
    }

    /// Card range of the instruction dispatched at `pc`.
    pub fn extent(&self, pc: usize) -> Range<usize> {
        pc..self.ends[pc]
    }

    pub fn instruction(&self, pc: usize) -> &[Card] {
        &self.cards[self.extent(pc)]
    }
}

/// End of the run of cards identical to the one at `start`.
fn run_end(cards: &[Card], start: usize) -> usize {
    let mut end = start + 1;
    while end < cards.len() && cards[end] == cards[start] {
        end += 1;
    }
    end
}

/// An assignment runs until the next line marker or face card.
fn statement_end(cards: &[Card], start: usize) -> usize {
    let mut end = start + 1;
    while end < cards.len() && cards[end].is_operand() {
        end += 1;
    }
    end
}
