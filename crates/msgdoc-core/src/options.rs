//! Rendering options.
//!
//! Three option surfaces drive how comments become documentation:
//!
//! - [`PlacementPolicy`] - which comment block(s) document a field.
//! - [`DescriptionSlice`] - which leading comment blocks describe the type itself.
//! - [`RawAppend`] - whether the original file text is appended verbatim.

use std::{fmt, ops::Range, str::FromStr};

use log::trace;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading option strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option `{option}` in {context} option")]
    Unknown {
        option: String,
        context: &'static str,
    },

    #[error("invalid slice bound `{bound}` in description option")]
    InvalidBound { bound: String },
}

/// How a field's description is chosen among its comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Every block above the declaration.
    UpAll,
    /// The block immediately above the declaration.
    Up,
    /// The inline comment only.
    Right1,
    /// The block starting with the inline comment or immediately below.
    RightDown,
    /// Every block from the inline comment downwards.
    RightDownAll,
}

impl Placement {
    /// All placements in priority order.
    pub const PRIORITY: [Placement; 5] = [
        Placement::UpAll,
        Placement::Up,
        Placement::Right1,
        Placement::RightDown,
        Placement::RightDownAll,
    ];

    /// Returns the option token for this placement.
    pub fn token(&self) -> &'static str {
        match self {
            Placement::UpAll => "up-all",
            Placement::Up => "up",
            Placement::Right1 => "right1",
            Placement::RightDown => "right-down",
            Placement::RightDownAll => "right-down-all",
        }
    }
}

/// Token enabling `| ` quoting of multi-line text.
pub const QUOTE_TOKEN: &str = "quote";

/// A set of whitespace separated field comment tokens.
///
/// Tokens are matched case-insensitively and unrecognized tokens are kept
/// but ignored, so a policy never fails to parse. When several placements
/// are present the one earliest in [`Placement::PRIORITY`] wins.
///
/// # Example
///
/// ```
/// # use msgdoc_core::options::{Placement, PlacementPolicy};
/// let policy: PlacementPolicy = "right-down Up quote".parse().unwrap();
/// assert_eq!(policy.placement(), Some(Placement::Up));
/// assert!(policy.quote());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementPolicy {
    tokens: Vec<String>,
}

impl PlacementPolicy {
    /// Create a policy from an option string.
    pub fn new(option: &str) -> Self {
        let tokens = option
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        Self { tokens }
    }

    /// Returns `true` if `token` is part of the policy.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Returns the effective placement, if any recognized token is present.
    pub fn placement(&self) -> Option<Placement> {
        Placement::PRIORITY
            .into_iter()
            .find(|placement| self.contains(placement.token()))
    }

    /// Returns `true` if multi-line descriptions are quoted.
    pub fn quote(&self) -> bool {
        self.contains(QUOTE_TOKEN)
    }

    /// Returns the raw tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl FromStr for PlacementPolicy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Selection of leading comment blocks used as the type description.
///
/// The option string is a comma separated list of entries. An entry `a:b`
/// selects the half-open block range `a..b`: either bound may be omitted
/// and negative bounds count from the end. The entry `quote` prefixes the
/// description with `| `. Empty entries are ignored and anything else is an
/// [`OptionError`].
///
/// # Example
///
/// ```
/// # use msgdoc_core::options::DescriptionSlice;
/// let slice: DescriptionSlice = "0:-1, quote".parse().unwrap();
/// assert_eq!(slice.range(4), 0..3);
/// assert!(slice.quote());
/// assert!("bogus".parse::<DescriptionSlice>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptionSlice {
    start: Option<i64>,
    end: Option<i64>,
    quote: bool,
}

impl DescriptionSlice {
    /// Create a slice from explicit bounds.
    pub fn new(start: Option<i64>, end: Option<i64>, quote: bool) -> Self {
        Self { start, end, quote }
    }

    /// Returns the start bound.
    pub fn start(&self) -> Option<i64> {
        self.start
    }

    /// Returns the end bound.
    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Returns `true` if the description is quoted.
    pub fn quote(&self) -> bool {
        self.quote
    }

    /// Resolve the bounds against a sequence of `len` blocks.
    ///
    /// The returned range is always within `0..len` and may be empty.
    pub fn range(&self, len: usize) -> Range<usize> {
        let resolve = |bound: Option<i64>, default: usize| -> usize {
            match bound {
                None => default,
                Some(bound) if bound < 0 => {
                    len.saturating_sub(usize::try_from(bound.unsigned_abs()).unwrap_or(usize::MAX))
                }
                Some(bound) => usize::try_from(bound).unwrap_or(usize::MAX).min(len),
            }
        };
        let start = resolve(self.start, 0);
        let end = resolve(self.end, len);
        start..end.max(start)
    }
}

impl FromStr for DescriptionSlice {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut slice = Self::default();
        for entry in s.split(',').map(|entry| entry.trim().to_ascii_lowercase()) {
            if entry.is_empty() {
                continue;
            }
            if let Some((first, second)) = entry.split_once(':') {
                slice.start = parse_bound(first)?;
                slice.end = parse_bound(second)?;
            } else if entry == QUOTE_TOKEN {
                slice.quote = true;
            } else {
                return Err(OptionError::Unknown {
                    option: entry,
                    context: "description",
                });
            }
        }
        trace!(slice:?; "Parsed description option");
        Ok(slice)
    }
}

fn parse_bound(bound: &str) -> Result<Option<i64>, OptionError> {
    let bound = bound.trim();
    if bound.is_empty() {
        return Ok(None);
    }
    bound
        .parse()
        .map(Some)
        .map_err(|_| OptionError::InvalidBound {
            bound: bound.to_string(),
        })
}

/// Where the untouched file text is placed relative to the fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawAppend {
    /// Before the rendered fragments.
    Head,
    /// After the rendered fragments.
    Tail,
}

impl fmt::Display for RawAppend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawAppend::Head => f.write_str("head"),
            RawAppend::Tail => f.write_str("tail"),
        }
    }
}

impl FromStr for RawAppend {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "head" => Ok(RawAppend::Head),
            "tail" => Ok(RawAppend::Tail),
            _ => Err(OptionError::Unknown {
                option: s.trim().to_string(),
                context: "raw",
            }),
        }
    }
}
