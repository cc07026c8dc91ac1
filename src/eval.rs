use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::ErrorKind;
use crate::state::Registers;
use crate::symbol::{Card, Rank, Suit};

/// Evaluate one assignment statement and store the result in the register named by the first
/// card's suit.
///
/// The first card gives the starting value. Every following card folds its value in, left to
/// right, with the operator picked by its suit:
///
/// | suit | operator |
/// |------|----------|
/// | ♦    | `+`      |
/// | ♥    | `*`      |
/// | ♠    | `-`      |
/// | ♣    | `/`      |
///
/// An ace stands for the current value of its suit's register; any other card for its rank.
/// Division truncates toward zero. No register changes if the statement faults.
pub fn assign(reg: &mut Registers, operands: &[Card]) -> Result<(), ErrorKind> {
    debug_assert!(
        !operands.is_empty() && operands.iter().all(Card::is_operand),
        "statement must be a non-empty run of operand cards: {operands:?}"
    );
    let Some((first, rest)) = operands.split_first() else {
        return Ok(());
    };
    let Card::Play { suit: target, .. } = *first else {
        return Ok(());
    };

    let mut result = value(reg, first);
    for card in rest {
        let Card::Play { suit, .. } = *card else {
            continue;
        };
        let operand = value(reg, card);
        match suit {
            Suit::Diamonds => result += operand,
            Suit::Hearts => result *= operand,
            Suit::Spades => result -= operand,
            Suit::Clubs => {
                if operand.is_zero() {
                    return Err(ErrorKind::DivisionByZero);
                }
                result /= operand;
            }
        }
    }

    reg[target] = result;
    Ok(())
}

/// Value of a single operand card.
pub fn value(reg: &Registers, card: &Card) -> BigInt {
    debug_assert!(card.is_operand(), "not an operand card: {card}");
    match *card {
        Card::Play {
            rank: Rank::Ace,
            suit,
        } => reg[suit].clone(),
        Card::Play { rank, .. } => rank.pip().map(BigInt::from).unwrap_or_default(),
        Card::Line(_) => BigInt::zero(),
    }
}
