// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Whitespace token reader for checkpoint and work unit text.
//!
//! Everything before the header line is skipped. After it, line breaks are
//! insignificant: the body is a stream of whitespace separated tokens.

use crate::error::{RakeError, Result};
use crate::square::grid::{HEAD_TOKEN, TAIL_TOKEN};
use crate::square::Square;
use std::str::SplitWhitespace;

#[derive(Debug)]
pub struct TokenReader<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> TokenReader<'a> {
    /// A reader positioned just after the first line equal to `header`.
    pub fn after_header(text: &'a str, header: &str) -> Result<Self> {
        let mut rest = text;
        loop {
            let (line, tail) = match rest.split_once('\n') {
                Some((line, tail)) => (line, Some(tail)),
                None => (rest, None),
            };
            if line.trim_end_matches('\r') == header {
                let body = tail.unwrap_or("");
                return Ok(Self {
                    tokens: body.split_whitespace(),
                });
            }
            match tail {
                Some(tail) => rest = tail,
                None => return Err(RakeError::MissingHeader),
            }
        }
    }

    pub fn next_token(&mut self, expected: &'static str) -> Result<&'a str> {
        self.tokens
            .next()
            .ok_or(RakeError::UnexpectedEof { expected })
    }

    pub fn next_i64(&mut self, expected: &'static str) -> Result<i64> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|_| RakeError::BadToken {
            token: token.to_string(),
            expected,
        })
    }

    pub fn next_u64(&mut self, expected: &'static str) -> Result<u64> {
        let value = self.next_i64(expected)?;
        u64::try_from(value).map_err(|_| RakeError::OutOfRange {
            what: expected,
            value,
        })
    }

    /// A non-negative integer below `bound`.
    pub fn next_below(&mut self, bound: usize, expected: &'static str) -> Result<usize> {
        let value = self.next_i64(expected)?;
        match usize::try_from(value) {
            Ok(v) if v < bound => Ok(v),
            _ => Err(RakeError::OutOfRange {
                what: expected,
                value,
            }),
        }
    }

    /// An integer below `bound`, or `-1` for none.
    pub fn next_optional(&mut self, bound: usize, expected: &'static str) -> Result<Option<usize>> {
        let value = self.next_i64(expected)?;
        if value == -1 {
            return Ok(None);
        }
        match usize::try_from(value) {
            Ok(v) if v < bound => Ok(Some(v)),
            _ => Err(RakeError::OutOfRange {
                what: expected,
                value,
            }),
        }
    }

    /// A `0` or `1` flag.
    pub fn next_bit(&mut self, expected: &'static str) -> Result<bool> {
        Ok(self.next_below(2, expected)? == 1)
    }

    /// A square framed by `{` and `}`. Tokens before the opening brace
    /// are skipped, as are any between the last value and the closing one.
    pub fn next_square<const N: usize>(&mut self) -> Result<Square<N>> {
        const EXPECTED: &str = "square";
        let head = HEAD_TOKEN.to_string();
        let tail = TAIL_TOKEN.to_string();
        while self.next_token(EXPECTED)? != head {}

        let mut square = Square::new();
        for r in 0..N {
            for c in 0..N {
                if let Some(value) = self.next_optional(N, EXPECTED)? {
                    square.set(r, c, value as u8);
                }
            }
        }

        while self.next_token(EXPECTED)? != tail {}
        Ok(square)
    }
}
