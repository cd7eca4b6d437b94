//! Line-level parsers for makefile text.
//!
//! Everything in here works on a single physical (or continuation-merged)
//! line and never fails loudly: a line that doesn't match any construct we
//! understand is reported as [`Line::Unrecognized`] and the caller moves on.

use nom::branch::alt;
use nom::bytes::complete::{take_till, take_while, take_while1};
use nom::character::complete::{anychar, char, one_of, satisfy};
use nom::combinator::{opt, recognize, rest, verify};
use nom::sequence::{delimited, pair, preceded, separated_pair, tuple};
use nom::IResult;
use nom_locate::LocatedSpan;

#[cfg(test)]
mod test;

/// Input type for all the parsers in this module
pub(crate) type Span<'a> = LocatedSpan<&'a str>;

/// What kind of construct a single makefile line holds
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Line<'a> {
    /// Empty, whitespace only or a comment
    Blank,
    /// `NAME = value` in any of its `=`, `:=`, `+=`, `?=` spellings
    Assignment { name: &'a str, value: &'a str },
    /// `name: deps...` at the start of a line
    Header(Header<'a>),
    /// An indented line, with the indentation stripped
    Recipe(&'a str),
    /// Nothing we know how to handle
    Unrecognized,
}

/// The interesting parts of a target header line
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Header<'a> {
    pub(crate) name: &'a str,
    pub(crate) dependencies: &'a str,
}

impl<'a> Header<'a> {
    /// Split the dependency text into individual names, in source order
    pub(crate) fn dependencies(&self) -> Vec<String> {
        self.dependencies
            .split_whitespace()
            .map(String::from)
            .collect()
    }
}

/// Decide what the provided line is.
pub(crate) fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Blank;
    }

    if let Ok((_, (name, value))) = assignment(Span::new(trimmed)) {
        return Line::Assignment {
            name: *name.fragment(),
            value: value.fragment().trim(),
        };
    }

    // A header that ends in a backslash is the start of a continuation group,
    // which the extractor collapses before matching it as a header again
    if !ends_with_backslash(line) {
        if let Some(header) = parse_header(line) {
            return Line::Header(header);
        }
    }

    if is_indented(line) {
        return Line::Recipe(line.trim_start_matches(&['\t', ' '][..]));
    }

    Line::Unrecognized
}

/// Match a (possibly continuation-merged) line against the header rule.
/// Indented lines are never headers.
pub(crate) fn parse_header(line: &str) -> Option<Header<'_>> {
    if is_indented(line) {
        return None;
    }

    match target_header(Span::new(line.trim_start())) {
        Ok((_, (name, dependencies))) => Some(Header {
            name: *name.fragment(),
            dependencies: dependencies.fragment().trim(),
        }),
        Err(_) => None,
    }
}

/// Recipe lines start with a tab or at least two spaces
#[inline]
pub(crate) fn is_indented(line: &str) -> bool {
    line.starts_with('\t') || line.starts_with("  ")
}

#[inline]
pub(crate) fn ends_with_backslash(line: &str) -> bool {
    line.ends_with('\\')
}

/// Collapse a run of backslash-continued lines into one logical line.
///
/// `lines[0]` must be the line that started the group. Returns the merged
/// text and the number of physical lines it consumed (always at least one).
pub(crate) fn collapse_continuation<S: AsRef<str>>(lines: &[S]) -> (String, usize) {
    let mut consumed = 0;
    let mut merged = String::new();

    for line in lines {
        let line = line.as_ref();
        if consumed > 0 {
            merged.push(' ');
        }
        merged.push_str(line.trim_end_matches('\\'));
        consumed += 1;

        if !ends_with_backslash(line) {
            break;
        }
    }

    (merged, consumed)
}

/// Matches any run of whitespace, including none at all
fn whitespace(i: Span) -> IResult<Span, Span> {
    take_while(|c: char| c.is_whitespace())(i)
}

fn is_target_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' || c == '/'
}

/// `[A-Z_][A-Z0-9_]*`. Lowercase names never match.
pub(crate) fn variable_name(i: Span) -> IResult<Span, Span> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase() || c == '_'),
        take_while(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'),
    ))(i)
}

/// `NAME [:+?]= value`, returning the name and the untrimmed value
pub(crate) fn assignment(i: Span) -> IResult<Span, (Span, Span)> {
    separated_pair(
        variable_name,
        tuple((whitespace, opt(one_of(":+?")), char('='), whitespace)),
        rest,
    )(i)
}

/// `name : deps`, where the dependency text may not contain an `=`
pub(crate) fn target_header(i: Span) -> IResult<Span, (Span, Span)> {
    separated_pair(
        take_while1(is_target_name_char),
        pair(whitespace, char(':')),
        verify(rest, has_no_equals),
    )(i)
}

fn has_no_equals(dependencies: &Span) -> bool {
    !dependencies.fragment().contains('=')
}

/// `$(NAME)` or `${NAME}`, returning just the name
pub(crate) fn variable_reference(i: Span) -> IResult<Span, Span> {
    preceded(
        char('$'),
        alt((
            delimited(char('('), variable_name, char(')')),
            delimited(char('{'), variable_name, char('}')),
        )),
    )(i)
}

/// Consume one character and everything up to the next `$`
fn skip_to_next_dollar(i: Span) -> IResult<Span, Span> {
    recognize(pair(anychar, take_till(|c: char| c == '$')))(i)
}

/// A variable reference found in some text
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reference<'a> {
    /// The referenced variable's name, e.g. `FOO` for `$(FOO)`
    pub name: &'a str,
    /// Byte offset of the `$`
    pub start: usize,
    /// Byte offset just past the closing delimiter
    pub end: usize,
}

/// Find every variable reference in `text`, left to right, non-overlapping
pub(crate) fn references(text: &str) -> Vec<Reference<'_>> {
    let mut found = Vec::new();
    let mut i = Span::new(text);

    while !i.fragment().is_empty() {
        match variable_reference(i) {
            Ok((remaining, name)) => {
                found.push(Reference {
                    name: *name.fragment(),
                    start: i.location_offset(),
                    end: remaining.location_offset(),
                });
                i = remaining;
            }
            Err(_) => match skip_to_next_dollar(i) {
                Ok((remaining, _)) => i = remaining,
                Err(_) => break,
            },
        }
    }

    found
}
