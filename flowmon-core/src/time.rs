use logos::{Lexer, Logos};
use std::{fmt, num::ParseFloatError, ops::Sub, str::FromStr};

/// A point in time, or a span of time, expressed in nanoseconds.
///
/// The flow monitor serializes its times as a number followed by a unit,
/// e.g. `"+2.0906e+09ns"` or `"12345.0 ns"`. Parsing strips the unit
/// (and any whitespace before it) and scales the value to nanoseconds.
/// A value without a unit is taken as nanoseconds.
///
/// ```
/// # use flowmon_core::Nanoseconds;
/// let delay: Nanoseconds = "12345.0 ns".parse().unwrap();
/// assert_eq!(delay.as_f64(), 12345.0);
///
/// let first_tx: Nanoseconds = "+2e+09ns".parse().unwrap();
/// assert_eq!(first_tx.as_f64(), 2_000_000_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Nanoseconds(f64);

impl Nanoseconds {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub const fn new(nanos: f64) -> Self {
        Self(nanos)
    }

    #[inline]
    pub const fn as_f64(self) -> f64 {
        self.0
    }
}

impl Sub for Nanoseconds {
    type Output = Nanoseconds;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Nanoseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Error returned when a time attribute cannot be parsed into [`Nanoseconds`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NanosecondsParseError {
    #[error("unexpected character in time value `{input}'")]
    InvalidToken { input: String },
    #[error("expecting time value to start with a number: `{input}'")]
    MissingValue { input: String },
    #[error("invalid number in time value `{input}'")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("unexpected trailing input in time value `{input}'")]
    TrailingInput { input: String },
}

impl FromStr for Nanoseconds {
    type Err = NanosecondsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex = Lexer::<'_, Token>::new(s);

        let Some(next) = lex.next() else {
            return Err(NanosecondsParseError::MissingValue { input: s.to_owned() });
        };
        let token = next.map_err(|()| NanosecondsParseError::InvalidToken { input: s.to_owned() })?;
        if token != Token::Value {
            return Err(NanosecondsParseError::MissingValue { input: s.to_owned() });
        }
        let number: f64 = lex
            .slice()
            .parse()
            .map_err(|source| NanosecondsParseError::InvalidNumber {
                input: s.to_owned(),
                source,
            })?;

        let nanos = match lex.next() {
            None | Some(Ok(Token::NanoSeconds)) => number,
            Some(Ok(Token::MicroSeconds)) => number * 1e3,
            Some(Ok(Token::MilliSeconds)) => number * 1e6,
            Some(Ok(Token::Seconds)) => number * 1e9,
            Some(Ok(Token::Value)) => {
                return Err(NanosecondsParseError::TrailingInput { input: s.to_owned() });
            }
            Some(Err(())) => {
                return Err(NanosecondsParseError::InvalidToken { input: s.to_owned() });
            }
        };

        if lex.next().is_some() {
            return Err(NanosecondsParseError::TrailingInput { input: s.to_owned() });
        }

        Ok(Self(nanos))
    }
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f]+")] // Ignore this regex pattern between tokens
enum Token {
    #[token("ns")]
    NanoSeconds,
    #[regex("us|μs")]
    MicroSeconds,
    #[token("ms")]
    MilliSeconds,
    #[token("s")]
    Seconds,

    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Value,
}
