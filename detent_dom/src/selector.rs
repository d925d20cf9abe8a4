// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple selectors: `tag`, `.class`, `#id`, compounds such as `a.handle.active`,
//! and comma-separated lists of those.
//!
//! Combinators (descendant, child, sibling) and pseudo-classes are not supported;
//! ancestry is handled by [`ElementTree::closest_matching`](crate::ElementTree::closest_matching).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a [`Selector`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector, or one entry of a comma-separated list, is empty.
    #[error("empty selector in `{0}`")]
    Empty(String),
    /// A character that cannot appear in a simple selector.
    #[error("unexpected `{ch}` in selector `{selector}`")]
    Unexpected {
        /// The full selector text.
        selector: String,
        /// The offending character.
        ch: char,
    },
    /// A combinator or other construct this parser does not handle.
    #[error("unsupported selector `{0}`: only tag, class and id compounds are allowed")]
    Unsupported(String),
}

/// One compound selector: an optional tag, an optional id, and any number of classes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    /// Required tag name, compared case-insensitively.
    pub tag: Option<String>,
    /// Required `id` attribute.
    pub id: Option<String>,
    /// Required classes.
    pub classes: Vec<String>,
}

/// A parsed selector list. An element matches if any compound matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let mut compounds = Vec::new();
        for part in text.split(',') {
            compounds.push(parse_compound(text, part.trim())?);
        }
        Ok(Self { compounds })
    }

    /// The compounds of this list, in source order.
    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    /// Test a compound against raw element data.
    pub(crate) fn matches_parts<'a>(
        &self,
        tag: &str,
        id: Option<&str>,
        classes: impl Iterator<Item = &'a str> + Clone,
    ) -> bool {
        self.compounds.iter().any(|c| {
            if let Some(t) = &c.tag
                && !t.eq_ignore_ascii_case(tag)
            {
                return false;
            }
            if let Some(want) = &c.id
                && id != Some(want.as_str())
            {
                return false;
            }
            c.classes
                .iter()
                .all(|want| classes.clone().any(|have| have == want))
        })
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.compounds.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(tag) = &c.tag {
                f.write_str(tag)?;
            }
            if let Some(id) = &c.id {
                write!(f, "#{id}")?;
            }
            for class in &c.classes {
                write!(f, ".{class}")?;
            }
        }
        Ok(())
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn parse_compound(full: &str, part: &str) -> Result<Compound, SelectorError> {
    if part.is_empty() {
        return Err(SelectorError::Empty(full.into()));
    }
    if part.contains(char::is_whitespace) || part.contains(['>', '+', '~', ':', '[']) {
        return Err(SelectorError::Unsupported(full.into()));
    }

    enum Slot {
        Tag,
        Id,
        Class,
    }

    let mut out = Compound::default();
    let mut slot = Slot::Tag;
    let mut buf = String::new();

    let flush = |slot: &Slot, buf: &mut String, out: &mut Compound| -> Result<(), SelectorError> {
        match slot {
            Slot::Tag if buf.is_empty() => {}
            Slot::Tag => out.tag = Some(core::mem::take(buf)),
            // `.` or `#` with nothing after it.
            _ if buf.is_empty() => return Err(SelectorError::Empty(full.into())),
            Slot::Id => out.id = Some(core::mem::take(buf)),
            Slot::Class => out.classes.push(core::mem::take(buf)),
        }
        Ok(())
    };

    for ch in part.chars() {
        match ch {
            '.' => {
                flush(&slot, &mut buf, &mut out)?;
                slot = Slot::Class;
            }
            '#' => {
                flush(&slot, &mut buf, &mut out)?;
                slot = Slot::Id;
            }
            ch if is_ident_char(ch) => buf.push(ch),
            '*' if matches!(slot, Slot::Tag) && buf.is_empty() => {}
            ch => {
                return Err(SelectorError::Unexpected {
                    selector: full.into(),
                    ch,
                });
            }
        }
    }
    flush(&slot, &mut buf, &mut out)?;
    Ok(out)
}
