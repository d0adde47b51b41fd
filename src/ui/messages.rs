//! User-facing status lines. Errors go to stderr, everything else to stdout.

use ansi_term::{Colour, Style};
use std::fmt;

const MARK_INFO: &str = "i";
const MARK_OK: &str = "✔";
const MARK_WARN: &str = "!";
const MARK_ERR: &str = "✘";

fn mark(colour: Colour, symbol: &str) -> String {
    colour.bold().paint(symbol).to_string()
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", mark(Colour::Blue, MARK_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", mark(Colour::Green, MARK_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", mark(Colour::Yellow, MARK_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", mark(Colour::Red, MARK_ERR), msg);
}

/// Underlined title above a table.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}\n", Style::new().bold().underline().paint(msg.to_string()));
}
