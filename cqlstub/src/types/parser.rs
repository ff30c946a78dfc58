// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Parser for CQL type signatures
//!
//! Grammar:
//!
//! ```text
//! type := primitive
//!       | 'list<' type '>'
//!       | 'set<' type '>'
//!       | 'map<' type ',' type '>'
//!       | 'tuple<' type (',' type)* '>'
//! ```
//!
//! Each production returns its finished descriptor, so composites collect
//! their children through recursive calls. Whitespace between tokens is
//! tolerated; primitive names are case-sensitive. Nesting is limited to
//! [`MAX_TYPE_DEPTH`] levels so hostile signatures cannot exhaust the stack.

use nom::{
    character::complete::{alpha1, alphanumeric0, char, multispace0},
    combinator::{all_consuming, cut, recognize},
    error::ErrorKind,
    multi::separated_list1,
    sequence::{delimited, pair},
    IResult,
};

use crate::error::{ParseError, ParseResult};
use crate::types::{CqlType, PrimitiveType};

/// Deepest descriptor a signature may describe, counting the outermost type
pub const MAX_TYPE_DEPTH: usize = 64;

/// Parse a type signature such as `map<text,set<int>>`
pub fn parse_type(signature: &str) -> ParseResult<CqlType> {
    match all_consuming(|input| cql_type(input, 1))(signature) {
        Ok((_, ty)) => Ok(ty),
        Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
            let err = err.into_parse_error();
            log::debug!("Rejected type signature '{}': {}", signature, err);
            Err(err)
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::new(
            signature,
            "incomplete type signature",
        )),
    }
}

/// Error carried through the nom combinators
#[derive(Debug)]
struct SignatureError<'a> {
    fragment: &'a str,
    message: String,
}

impl<'a> SignatureError<'a> {
    fn new(fragment: &'a str, message: impl Into<String>) -> Self {
        Self {
            fragment,
            message: message.into(),
        }
    }

    fn into_parse_error(self) -> ParseError {
        let fragment = if self.fragment.is_empty() {
            "<end of input>"
        } else {
            self.fragment
        };
        ParseError::new(fragment, self.message)
    }
}

impl<'a> nom::error::ParseError<&'a str> for SignatureError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Eof => "unexpected trailing input".to_string(),
            other => format!("unexpected input ({})", other.description()),
        };
        Self::new(input, message)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: &'a str, expected: char) -> Self {
        Self::new(input, format!("expected '{}'", expected))
    }
}

type SigResult<'a, T> = IResult<&'a str, T, SignatureError<'a>>;

/// Surround a parser with optional whitespace
fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> SigResult<'a, O>
where
    F: FnMut(&'a str) -> SigResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn type_name(input: &str) -> SigResult<'_, &str> {
    recognize(pair(alpha1, alphanumeric0))(input).map_err(|_: nom::Err<SignatureError<'_>>| {
        nom::Err::Error(SignatureError::new(input, "expected a type name"))
    })
}

fn cql_type(input: &str, depth: usize) -> SigResult<'_, CqlType> {
    let (after_name, name) = ws(type_name)(input)?;

    match name {
        "list" | "set" | "map" | "tuple" => {
            if depth >= MAX_TYPE_DEPTH {
                return Err(nom::Err::Failure(SignatureError::new(
                    name,
                    format!("types nest deeper than {} levels", MAX_TYPE_DEPTH),
                )));
            }
            let (rest, params) = cut(|i| type_parameters(i, depth + 1))(after_name)?;
            let consumed = input[..input.len() - rest.len()].trim();
            let ty = build_composite(name, params)
                .map_err(|message| nom::Err::Failure(SignatureError::new(consumed, message)))?;
            Ok((rest, ty))
        }
        _ => match PrimitiveType::from_name(name) {
            Some(primitive) => Ok((after_name, CqlType::Primitive(primitive))),
            None => Err(nom::Err::Failure(SignatureError::new(
                name,
                format!("unknown type '{}'", name),
            ))),
        },
    }
}

fn type_parameters(input: &str, depth: usize) -> SigResult<'_, Vec<CqlType>> {
    delimited(
        ws(char('<')),
        separated_list1(ws(char(',')), |i| cql_type(i, depth)),
        ws(char('>')),
    )(input)
}

fn build_composite(keyword: &str, mut params: Vec<CqlType>) -> Result<CqlType, String> {
    match (keyword, params.len()) {
        ("tuple", _) => Ok(CqlType::Tuple(params)),
        ("list", 1) => Ok(CqlType::list(params.remove(0))),
        ("set", 1) => Ok(CqlType::set(params.remove(0))),
        ("map", 2) => {
            let value = params.remove(1);
            let key = params.remove(0);
            Ok(CqlType::map(key, value))
        }
        ("map", found) => Err(format!("map takes 2 type parameters, found {}", found)),
        (keyword, found) => Err(format!(
            "{} takes 1 type parameter, found {}",
            keyword, found
        )),
    }
}
