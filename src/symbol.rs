use std::fmt;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

type FxMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// One of the four card suits. Each suit names a register and, inside an expression, an operator.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Suit {
    /// Addition
    Diamonds = 0,
    /// Multiplication
    Hearts,
    /// Subtraction
    Spades,
    /// Integer division
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '♦' => Some(Suit::Diamonds),
            '♥' => Some(Suit::Hearts),
            '♠' => Some(Suit::Spades),
            '♣' => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
            Suit::Clubs => '♣',
        }
    }

    /// Register index for this suit.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Value glyph of a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rank {
    /// Digit glyph as scanned, before normalization. `'1'` stands for the two-character ten.
    Digit(char),
    /// Numeric rank, 2 through 10.
    Pip(u8),
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn from_text(s: &str) -> Option<Self> {
        match s {
            "10" => Some(Rank::Digit('1')),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c @ '2'..='9'), None) => Some(Rank::Digit(c)),
                    _ => None,
                }
            }
        }
    }

    /// Numeric form of a digit rank. Other ranks are returned unchanged.
    pub fn normalized(self) -> Self {
        match self {
            Rank::Digit('1') => Rank::Pip(10),
            Rank::Digit(c) => match c.to_digit(10) {
                Some(n) => Rank::Pip(n as u8),
                None => self,
            },
            rank => rank,
        }
    }

    /// Literal numeric value, if the rank has one.
    pub fn pip(self) -> Option<u8> {
        match self.normalized() {
            Rank::Pip(n) => Some(n),
            _ => None,
        }
    }

    /// Ranks that may take part in an assignment statement.
    pub fn is_operand(self) -> bool {
        matches!(self, Rank::Digit(_) | Rank::Pip(_) | Rank::Ace)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalized() {
            Rank::Pip(n) => write!(f, "{n}"),
            Rank::Jack => write!(f, "J"),
            Rank::Queen => write!(f, "Q"),
            Rank::King => write!(f, "K"),
            Rank::Ace => write!(f, "A"),
            Rank::Digit(c) => write!(f, "{c}"),
        }
    }
}

/// Smallest syntactic unit of a program.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Card {
    /// Start of a source line, carrying the 1-based line number.
    Line(u32),
    Play { rank: Rank, suit: Suit },
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card::Play { rank, suit }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Line(_) => None,
            Card::Play { rank, .. } => Some(*rank),
        }
    }

    pub fn is_operand(&self) -> bool {
        self.rank().is_some_and(Rank::is_operand)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Line(line) => write!(f, "<line {line}>"),
            Card::Play { rank, suit } => write!(f, "{rank}{suit}"),
        }
    }
}

/// Jump target defined by a run of same-suit queens: the suit and the run length.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Label {
    pub suit: Suit,
    pub arity: usize,
}

impl Label {
    pub fn new(suit: Suit, arity: usize) -> Self {
        Label { suit, arity }
    }
}

impl fmt::Display for Label {
    // Written the way it appears in source, e.g. `Q♥Q♥Q♥`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.arity {
            write!(f, "Q{}", self.suit)?;
        }
        Ok(())
    }
}

/// Label -> program index of the instruction following the queen run.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LabelTable(FxMap<Label, usize>);

impl LabelTable {
    pub fn new() -> Self {
        LabelTable(IndexMap::with_hasher(FxBuildHasher::default()))
    }

    /// Later definitions of the same label replace earlier ones.
    pub fn define(&mut self, label: Label, target: usize) {
        self.0.insert(label, target);
    }

    pub fn get(&self, label: Label) -> Option<usize> {
        self.0.get(&label).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
