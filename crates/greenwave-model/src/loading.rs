// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Route loader for the stoplight line protocol.
//!
//! This module turns whitespace-delimited text streams into a validated
//! `Route`. The expected layout is:
//!
//! ```raw
//! L          // speed limit, whole km/h
//! N          // number of stoplights
//! d_1 t_1    // distance in meters, half-cycle duration in seconds
//! ...
//! d_N t_N
//! ```
//!
//! Tokens only need to appear in this order; line breaks are not significant.
//! Comments introduced by `#` run to the end of the line and are ignored.
//! Anything after the last stoplight is ignored as well. Every token is an
//! unsigned integer, so negative or fractional values surface as a parse
//! error pointing at the offending token, and semantic problems (a zero speed
//! limit, a zero duration) are reported by the `RouteBuilder` validation.

use crate::{
    route::{Route, RouteBuilder, RouteError},
    units::{KilometersPerHour, Meters, Seconds},
};
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the route loading process.
#[derive(Debug)]
pub enum RouteLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended before all expected tokens were read.
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The parsed values do not describe a valid route.
    Route(RouteError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "u32").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl Display for RouteLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of input while parsing route"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Route(e) => write!(f, "Invalid route: {e}"),
        }
    }
}

impl std::error::Error for RouteLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::UnexpectedEof => None,
            Self::Parse(e) => Some(e),
            Self::Route(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RouteLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for RouteLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<RouteError> for RouteLoaderError {
    fn from(e: RouteError) -> Self {
        Self::Route(e)
    }
}

/// Loader for routes in the stoplight line protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteLoader;

impl RouteLoader {
    /// Creates a new `RouteLoader`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads a route from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Route, RouteLoaderError> {
        let mut sc = Scanner::new(rdr);

        let speed_limit: u32 = sc.next()?;
        let count: usize = sc.next()?;

        // Cap the reservation, the count is untrusted input
        let mut builder = RouteBuilder::with_capacity(
            KilometersPerHour::new(f64::from(speed_limit)),
            count.min(1024),
        );

        for _ in 0..count {
            let distance: u32 = sc.next()?;
            let duration: u32 = sc.next()?;
            builder.add_stoplight(
                Meters::new(f64::from(distance)),
                Seconds::new(f64::from(duration)),
            );
        }

        Ok(builder.build()?)
    }

    /// Loads a route from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Route, RouteLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a route from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Route, RouteLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a route from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Route, RouteLoaderError> {
        self.from_bufread(s.as_bytes())
    }
}

/// Reads whitespace-delimited tokens from a line-oriented reader.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Reads the next line, dropping any `#` comment. `Ok(false)` on EOF.
    fn fill_line(&mut self) -> Result<bool, RouteLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_line(&mut self.buf)?;
        if let Some(comment) = self.buf.find('#') {
            self.buf.truncate(comment);
        }
        Ok(n > 0)
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, RouteLoaderError>
    where
        T: FromStr,
    {
        loop {
            let rest = &self.buf[self.pos..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                if !self.fill_line()? {
                    return Err(RouteLoaderError::UnexpectedEof);
                }
                continue;
            }

            let start = self.pos + (rest.len() - trimmed.len());
            let len = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            let end = start + len;
            self.pos = end;

            let token = &self.buf[start..end];
            return token.parse::<T>().map_err(|_| {
                RouteLoaderError::Parse(ParseTokenError {
                    token: token.to_owned(),
                    type_name: std::any::type_name::<T>(),
                })
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::StoplightIndex;

    const SMALL_ROUTE: &str = r#"
        50          # speed limit, km/h
        2           # stoplights
        200 10
        1000 30     # far light
    "#;

    #[test]
    fn test_loads_and_maps_correctly() {
        let route = RouteLoader::new().from_str(SMALL_ROUTE).expect("Failed to load");

        assert_eq!(route.num_stoplights(), 2);
        assert!((route.speed_limit().value() - 50.0 / 3.6).abs() < 1e-12);

        let first = route.stoplight(StoplightIndex::new(0));
        assert_eq!(first.distance().value(), 200.0);
        assert_eq!(first.duration().value(), 10.0);

        let second = route.stoplight(StoplightIndex::new(1));
        assert_eq!(second.distance().value(), 1000.0);
        assert_eq!(second.duration().value(), 30.0);
    }

    #[test]
    fn test_tokens_may_span_lines_freely() {
        let route = RouteLoader::new().from_str("36 1 100\n10").unwrap();
        assert_eq!(route.num_stoplights(), 1);
        assert_eq!(route.speed_limit().value(), 10.0);
    }

    #[test]
    fn test_zero_stoplights() {
        let route = RouteLoader::new().from_str("90\n0\n").unwrap();
        assert_eq!(route.num_stoplights(), 0);
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let route = RouteLoader::new().from_str("90\n1\n100 10\n999 999\n").unwrap();
        assert_eq!(route.num_stoplights(), 1);
    }

    #[test]
    fn test_unexpected_eof() {
        let res = RouteLoader::new().from_str("50\n3\n100 10\n200");
        assert!(matches!(res, Err(RouteLoaderError::UnexpectedEof)));

        let res = RouteLoader::new().from_str("");
        assert!(matches!(res, Err(RouteLoaderError::UnexpectedEof)));
    }

    #[test]
    fn test_parse_error_structure() {
        let res = RouteLoader::new().from_str("50 2 garbage 10");
        match res {
            Err(RouteLoaderError::Parse(e)) => {
                assert_eq!(e.token, "garbage");
                assert!(e.type_name.contains("u32"));
            }
            other => panic!("Expected Parse error with context, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_values_are_parse_errors() {
        let res = RouteLoader::new().from_str("50 1 -100 10");
        assert!(matches!(res, Err(RouteLoaderError::Parse(ref e)) if e.token == "-100"));
    }

    #[test]
    fn test_invalid_route_is_reported() {
        let res = RouteLoader::new().from_str("0\n0\n");
        assert!(matches!(
            res,
            Err(RouteLoaderError::Route(RouteError::InvalidSpeedLimit(_)))
        ));

        let res = RouteLoader::new().from_str("50\n1\n100 0\n");
        assert!(matches!(
            res,
            Err(RouteLoaderError::Route(RouteError::InvalidDuration { .. }))
        ));
    }

    #[test]
    fn test_comment_directly_after_token() {
        let route = RouteLoader::new().from_str("36# limit\n1\n100 10#x\n").unwrap();
        assert_eq!(route.num_stoplights(), 1);
    }

    #[test]
    fn test_error_display() {
        let e = RouteLoaderError::Parse(ParseTokenError {
            token: "x".into(),
            type_name: "u32",
        });
        assert_eq!(e.to_string(), "Parse error: Could not parse token 'x' as type u32");
    }
}
