//! Locator Parsing
//!
//! Every text line after the header opens with a bracketed page reference
//! like `[103b]`, `[103b.4]` or `[103xa]` (`x` marks a bis page inserted
//! after its namesake). Parsing is strict: anything not understood maps to
//! a distinct error variant so the caller can report it and skip the line.

use std::fmt;

/// Side of a folio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    fn from_char(c: char) -> Option<Side> {
        match c {
            'a' => Some(Side::A),
            'b' => Some(Side::B),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::A => "a",
            Side::B => "b",
        })
    }
}

/// A fully parsed locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub page: u32,
    pub side: Side,
    /// Duplicated page number in the print, written with an `x` infix
    pub bis: bool,
    /// Line number on the page side; most volumes omit it
    pub line: Option<u32>,
}

/// A locator plus where it sits in its line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocator<'a> {
    pub locator: Locator,
    /// Text between the brackets exactly as written
    pub raw: &'a str,
    /// Byte offset of the body text, just past the closing bracket
    pub body_start: usize,
}

/// Why a locator failed to parse; each variant maps to one format diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No closing bracket anywhere in the line
    UnterminatedBracket,
    /// Bracket content too short to hold a page and a side
    TooShort { raw: String },
    /// The side character is not `a` or `b`
    BadSide { raw: String },
    /// Page digits failed to parse (no line number present)
    BadPage { raw: String },
    /// Page or line digits failed to parse (line number present)
    BadPageOrLine { raw: String },
}

impl LocatorError {
    /// Locator text to reference in the diagnostic; empty when the input
    /// was too mangled to quote as a locator
    pub fn locator_ref(&self) -> &str {
        match self {
            LocatorError::UnterminatedBracket | LocatorError::TooShort { .. } => "",
            LocatorError::BadSide { raw }
            | LocatorError::BadPage { raw }
            | LocatorError::BadPageOrLine { raw } => raw,
        }
    }
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::UnterminatedBracket => write!(f, "cannot find \"]\""),
            LocatorError::TooShort { raw } => {
                write!(f, "cannot understand page indication \"[{raw}]\"")
            }
            LocatorError::BadSide { .. } => write!(f, "cannot understand page side"),
            LocatorError::BadPage { .. } => write!(f, "cannot convert page to integer"),
            LocatorError::BadPageOrLine { .. } => {
                write!(f, "cannot convert page / line to integer")
            }
        }
    }
}

/// Parse the locator opening `line`
pub fn parse_locator(line: &str) -> Result<ParsedLocator<'_>, LocatorError> {
    let close = line.find(']').ok_or(LocatorError::UnterminatedBracket)?;
    // the first char is taken for the opening bracket, whatever it is
    let mut prefix = line[..close].chars();
    prefix.next();
    let raw = prefix.as_str();

    if raw.chars().count() < 2 {
        return Err(LocatorError::TooShort {
            raw: raw.to_string(),
        });
    }

    let locator = match raw.split_once('.') {
        None => {
            let (page_part, side) = split_side(raw)?;
            let (digits, bis) = split_bis(page_part);
            let page = digits.parse().map_err(|_| LocatorError::BadPage {
                raw: raw.to_string(),
            })?;
            Locator {
                page,
                side,
                bis,
                line: None,
            }
        }
        Some((head, line_part)) => {
            let (page_part, side) = split_side(head).map_err(|_| LocatorError::BadSide {
                raw: raw.to_string(),
            })?;
            let (digits, bis) = split_bis(page_part);
            let page = digits.parse().map_err(|_| LocatorError::BadPageOrLine {
                raw: raw.to_string(),
            })?;
            let line_num: u32 = line_part.parse().map_err(|_| LocatorError::BadPageOrLine {
                raw: raw.to_string(),
            })?;
            Locator {
                page,
                side,
                bis,
                // transcribers write zero for an unnumbered line
                line: (line_num != 0).then_some(line_num),
            }
        }
    };

    Ok(ParsedLocator {
        locator,
        raw,
        body_start: close + 1,
    })
}

/// Split off the trailing side letter
fn split_side(part: &str) -> Result<(&str, Side), LocatorError> {
    let (index, last) = part
        .char_indices()
        .next_back()
        .ok_or_else(|| LocatorError::BadSide {
            raw: part.to_string(),
        })?;
    let side = Side::from_char(last).ok_or_else(|| LocatorError::BadSide {
        raw: part.to_string(),
    })?;
    Ok((&part[..index], side))
}

/// Split off a trailing bis marker
fn split_bis(part: &str) -> (&str, bool) {
    match part.strip_suffix('x') {
        Some(rest) => (rest, true),
        None => (part, false),
    }
}
