use std::io::{self, Write};

use colored::Colorize;
use num_bigint::BigInt;

use crate::state::Registers;

/// Longest UTF-8 sequence, in bytes.
const MAX_CHAR_LEN: usize = 4;

const REPLACEMENT: &str = "\u{FFFD}";

/// Collects bytes written by jacks until they form a whole UTF-8 character.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct CharBuffer {
    bytes: Vec<u8>,
}

impl CharBuffer {
    pub fn new() -> Self {
        CharBuffer {
            bytes: Vec::with_capacity(MAX_CHAR_LEN),
        }
    }

    /// Bytes still waiting for the rest of their character.
    pub fn pending(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Add a byte, writing the character to `out` once it is complete.
    ///
    /// Bytes that can never become valid UTF-8 are written as one replacement character and
    /// dropped. Whatever follows them is kept and checked again, so at most 3 bytes are ever
    /// pending.
    pub fn push(&mut self, byte: u8, out: &mut impl Write) -> io::Result<()> {
        self.bytes.push(byte);
        loop {
            let (valid, invalid) = match std::str::from_utf8(&self.bytes) {
                Ok(_) => (self.bytes.len(), None),
                Err(e) => (e.valid_up_to(), e.error_len()),
            };
            out.write_all(&self.bytes[..valid])?;
            match invalid {
                Some(len) => {
                    out.write_all(REPLACEMENT.as_bytes())?;
                    self.bytes.drain(..valid + len);
                }
                // Either everything was written or the rest needs more bytes
                None => {
                    self.bytes.drain(..valid);
                    return Ok(());
                }
            }
        }
    }
}

/// Write a register value in decimal.
pub fn print_decimal(value: &BigInt, out: &mut impl Write) -> io::Result<()> {
    write!(out, "{value}")
}

#[derive(Clone, Copy, Debug)]
pub enum MsgColor {
    Green,
    Cyan,
}

/// Status line on stderr, like `   Running program`.
pub fn message(color: MsgColor, left: &str, right: &str) {
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
    };
    eprintln!("{left:>12} {right}");
}

/// Dump all registers to stderr.
pub fn print_registers(reg: &Registers) {
    eprintln!("{}", "------ Registers ------".dimmed());
    for (suit, value) in reg.iter() {
        eprintln!("{suit}: {value:.>19}");
    }
    eprintln!("{}", "-----------------------".dimmed());
}

/// Trace line on stderr for one dispatched instruction.
pub fn trace(line: u32, pc: usize, instr: &str) {
    let pos = format!("{line:>4}:{pc:<5}");
    eprintln!("{} {}", pos.dimmed(), instr.blue());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(bytes: &[u8]) -> (Vec<u8>, CharBuffer) {
        let mut out = Vec::new();
        let mut buf = CharBuffer::new();
        for &b in bytes {
            buf.push(b, &mut out).unwrap();
        }
        (out, buf)
    }

    #[test]
    fn ascii_is_written_immediately() {
        let (out, buf) = feed(b"Hi\n");
        assert_eq!(out, b"Hi\n");
        assert!(buf.is_empty());
    }

    #[test]
    fn multibyte_waits_for_last_byte() {
        let mut out = Vec::new();
        let mut buf = CharBuffer::new();
        buf.push(0xE2, &mut out).unwrap();
        buf.push(0x99, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(buf.pending(), &[0xE2, 0x99]);
        buf.push(0xA0, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "♠");
        assert!(buf.is_empty());
    }

    #[test]
    fn four_byte_character() {
        let (out, buf) = feed("🂡".as_bytes());
        assert_eq!(String::from_utf8(out).unwrap(), "🂡");
        assert!(buf.is_empty());
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        // Stray continuation byte
        let (out, buf) = feed(&[0x80]);
        assert_eq!(String::from_utf8(out).unwrap(), "\u{FFFD}");
        assert!(buf.is_empty());

        // Lead byte followed by ASCII
        let (out, buf) = feed(&[0xC3, b'A']);
        assert_eq!(String::from_utf8(out).unwrap(), "\u{FFFD}A");
        assert!(buf.is_empty());
    }

    #[test]
    fn resyncs_after_bad_lead_byte() {
        // The second C3 starts a fresh sequence
        let (out, buf) = feed(&[0xC3, 0xC3, 0xA9]);
        assert_eq!(String::from_utf8(out).unwrap(), "\u{FFFD}é");
        assert!(buf.is_empty());

        let (out, buf) = feed(&[0xE2, 0x99, 0xC3]);
        assert_eq!(String::from_utf8(out).unwrap(), "\u{FFFD}");
        assert_eq!(buf.pending(), &[0xC3]);
    }

    #[test]
    fn never_holds_a_full_sequence() {
        let mut out = Vec::new();
        let mut buf = CharBuffer::new();
        for &b in &[0xF0, 0x9F, 0x82, 0xF0, 0x9F, 0x82, 0xA1, 0xFF, 0xC3] {
            buf.push(b, &mut out).unwrap();
            assert!(buf.pending().len() < MAX_CHAR_LEN);
        }
        assert_eq!(String::from_utf8(out).unwrap(), "\u{FFFD}🂡\u{FFFD}");
        assert_eq!(buf.pending(), &[0xC3]);
    }

    #[test]
    fn decimal() {
        let mut out = Vec::new();
        print_decimal(&BigInt::from(-42), &mut out).unwrap();
        print_decimal(&BigInt::from(7), &mut out).unwrap();
        assert_eq!(out, b"-427");
    }
}
