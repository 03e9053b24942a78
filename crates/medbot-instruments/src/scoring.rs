use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Text shown when a total score matches no diagnosis rule.
pub const UNDETERMINED_TEXT: &str = "Unable to determine a diagnosis";

/// A parsed score-range specification.
///
/// | Form    | Meaning                 |
/// |---------|-------------------------|
/// | `A-B`   | `A <= score <= B`       |
/// | `<=X`   | `score <= X`            |
/// | `>=Y`   | `score >= Y`            |
/// | other   | never matches           |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeSpec {
    Between { min: i64, max: i64 },
    AtMost { max: i64 },
    AtLeast { min: i64 },
    Unrecognized,
}

impl RangeSpec {
    /// Parse a range string.
    ///
    /// The `<=`/`>=` prefixes are tried before the `A-B` form so that
    /// negative bounds like `<=-2` parse. An input that has the shape of one
    /// of the three forms but non-integer bounds is an error; an input with
    /// none of the shapes is [`RangeSpec::Unrecognized`].
    pub fn parse(raw: &str) -> Result<Self, RangeError> {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix("<=") {
            return Ok(Self::AtMost {
                max: parse_bound(raw, rest)?,
            });
        }
        if let Some(rest) = trimmed.strip_prefix(">=") {
            return Ok(Self::AtLeast {
                min: parse_bound(raw, rest)?,
            });
        }
        // The separator is the first `-` after the leading character, which
        // may itself be the sign of a negative lower bound.
        if let Some((pos, _)) = trimmed.char_indices().skip(1).find(|&(_, c)| c == '-') {
            return Ok(Self::Between {
                min: parse_bound(raw, &trimmed[..pos])?,
                max: parse_bound(raw, &trimmed[pos + 1..])?,
            });
        }
        Ok(Self::Unrecognized)
    }

    pub fn contains(&self, score: i64) -> bool {
        match *self {
            Self::Between { min, max } => (min..=max).contains(&score),
            Self::AtMost { max } => score <= max,
            Self::AtLeast { min } => score >= min,
            Self::Unrecognized => false,
        }
    }

    /// True when no score can ever satisfy the range.
    pub fn is_empty(&self) -> bool {
        match *self {
            Self::Between { min, max } => min > max,
            Self::Unrecognized => true,
            Self::AtMost { .. } | Self::AtLeast { .. } => false,
        }
    }
}

impl FromStr for RangeSpec {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_bound(raw: &str, bound: &str) -> Result<i64, RangeError> {
    let bound = bound.trim();
    bound.parse::<i64>().map_err(|e| RangeError::Malformed {
        range: raw.to_string(),
        reason: format!("bound '{bound}' is not an integer ({e})"),
    })
}

/// One `range -> diagnosis` rule, keeping the range as it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisRule {
    pub(crate) range_text: String,
    pub(crate) range: RangeSpec,
    pub(crate) diagnosis: String,
}

impl DiagnosisRule {
    pub fn new(
        range_text: impl Into<String>,
        diagnosis: impl Into<String>,
    ) -> Result<Self, RangeError> {
        let range_text = range_text.into();
        let range = RangeSpec::parse(&range_text)?;
        Ok(Self {
            range_text,
            range,
            diagnosis: diagnosis.into(),
        })
    }

    /// The range as it was written in the catalog.
    pub fn range_text(&self) -> &str {
        &self.range_text
    }

    pub fn range(&self) -> RangeSpec {
        self.range
    }

    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    pub fn matches(&self, score: i64) -> bool {
        self.range.contains(score)
    }
}

/// Outcome of mapping a total score through a test's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Diagnosis {
    Determined(String),
    /// No rule matched; a defined result, not a failure.
    Undetermined,
}

impl Diagnosis {
    pub fn is_determined(&self) -> bool {
        matches!(self, Self::Determined(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Determined(text) => text,
            Self::Undetermined => UNDETERMINED_TEXT,
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Diagnosis of the first rule, in declared order, whose range holds `score`.
///
/// Overlapping ranges are resolved by position alone.
pub fn evaluate<'a>(
    rules: impl IntoIterator<Item = &'a DiagnosisRule>,
    score: i64,
) -> Diagnosis {
    rules
        .into_iter()
        .find(|rule| rule.matches(score))
        .map(|rule| Diagnosis::Determined(rule.diagnosis.clone()))
        .unwrap_or(Diagnosis::Undetermined)
}
