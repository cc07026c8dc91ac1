use lazy_static::lazy_static;
use regex::Regex;

use crate::symbol::{Card, Rank, Suit};

lazy_static! {
    /// Everything from `#` to the end of the line.
    static ref COMMENT: Regex = Regex::new(r"#.*$").unwrap();
    /// Rank followed by suit. `10` is listed first so it wins over a lone digit.
    static ref CARD: Regex = Regex::new(r"(10|[2-9JQKA])([♦♥♠♣])").unwrap();
}

/// Turn source text into cards, with a [`Card::Line`] marker at the start of every line.
///
/// Characters that are not part of a card are skipped, so this cannot fail.
pub fn tokenize(src: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    for (i, line) in src.split('\n').enumerate() {
        cards.push(Card::Line(i as u32 + 1));
        let line = COMMENT.replace(line, "");
        for caps in CARD.captures_iter(line.trim()) {
            let rank = Rank::from_text(&caps[1]);
            let suit = caps[2].chars().next().and_then(Suit::from_glyph);
            if let (Some(rank), Some(suit)) = (rank, suit) {
                cards.push(Card::new(rank, suit));
            }
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plays(cards: &[Card]) -> Vec<String> {
        cards
            .iter()
            .filter(|card| !matches!(card, Card::Line(_)))
            .map(|card| card.to_string())
            .collect()
    }

    #[test]
    fn marks_every_line() {
        let cards = tokenize("5♦\n\n  # nothing\nJ♦");
        let lines: Vec<u32> = cards
            .iter()
            .filter_map(|card| match card {
                Card::Line(n) => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert_eq!(cards[0], Card::Line(1));
        assert_eq!(cards[1], Card::new(Rank::Digit('5'), Suit::Diamonds));
    }

    #[test]
    fn ten_is_greedy() {
        let cards = tokenize("10♣");
        assert_eq!(cards[1], Card::new(Rank::Digit('1'), Suit::Clubs));
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn strips_comments() {
        let cards = tokenize("K♠ # 5♦ is ignored");
        assert_eq!(plays(&cards), vec!["K♠"]);
    }

    #[test]
    fn skips_unknown_characters() {
        let cards = tokenize("x1♦ 5x♥ Z♠ 9♣,A♥ 11♦");
        assert_eq!(plays(&cards), vec!["9♣", "A♥"]);
        let cards = tokenize("110♦");
        assert_eq!(plays(&cards), vec!["10♦"]);
    }

    #[test]
    fn cards_without_spaces() {
        let cards = tokenize("Q♦Q♦K♥J♠");
        assert_eq!(plays(&cards), vec!["Q♦", "Q♦", "K♥", "J♠"]);
    }

    #[test]
    fn empty_source() {
        assert_eq!(tokenize(""), vec![Card::Line(1)]);
    }
}
