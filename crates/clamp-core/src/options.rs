//! Clamp options and their defaults.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClampError;

/// Boundaries tried by default, coarsest first.
pub const DEFAULT_SPLIT_ON_CHARS: [&str; 5] = [".", "-", "\u{2013}", "\u{2014}", " "];

/// Default truncation marker, a horizontal ellipsis.
pub const DEFAULT_TRUNCATION_CHAR: &str = "\u{2026}";

/// Delay between deferred steps when `animate` is just switched on.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);

/// How much content to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClampValue", into = "RawClampValue")]
pub enum ClampValue {
    /// A number of lines.
    Lines(u32),
    /// As many lines as the element's current height holds.
    Auto,
    /// A height such as `60px` or `3em`. Only the leading integer is used,
    /// as a pixel height; the unit is ignored.
    Css(String),
}

impl ClampValue {
    /// Whether this is a CSS length, which the native path also writes as
    /// the element's `height`.
    #[must_use]
    pub const fn is_css(&self) -> bool {
        matches!(self, Self::Css(_))
    }
}

impl Default for ClampValue {
    fn default() -> Self {
        Self::Lines(2)
    }
}

impl FromStr for ClampValue {
    type Err = ClampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "auto" {
            return Ok(Self::Auto);
        }
        if s.contains("px") || s.contains("em") {
            return Ok(Self::Css(s.to_string()));
        }
        s.parse::<u32>()
            .map(Self::Lines)
            .map_err(|_| ClampError::InvalidClampValue(s.to_string()))
    }
}

impl fmt::Display for ClampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines(n) => write!(f, "{n}"),
            Self::Auto => f.write_str("auto"),
            Self::Css(value) => f.write_str(value),
        }
    }
}

/// Wire form of [`ClampValue`]: a bare number or a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawClampValue {
    Number(u32),
    Text(String),
}

impl TryFrom<RawClampValue> for ClampValue {
    type Error = ClampError;

    fn try_from(raw: RawClampValue) -> Result<Self, Self::Error> {
        match raw {
            RawClampValue::Number(n) => Ok(Self::Lines(n)),
            RawClampValue::Text(text) => text.parse(),
        }
    }
}

impl From<ClampValue> for RawClampValue {
    fn from(value: ClampValue) -> Self {
        match value {
            ClampValue::Lines(n) => Self::Number(n),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Pacing of truncation steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAnimate", into = "RawAnimate")]
pub enum Animate {
    /// Run every step back to back.
    #[default]
    Off,
    /// Wait [`DEFAULT_STEP_DELAY`] between steps.
    On,
    /// Wait this many milliseconds between steps.
    Millis(u64),
}

impl Animate {
    /// The pause between steps, if any.
    #[must_use]
    pub const fn delay(self) -> Option<Duration> {
        match self {
            Self::Off => None,
            Self::On => Some(DEFAULT_STEP_DELAY),
            Self::Millis(ms) => Some(Duration::from_millis(ms)),
        }
    }
}

/// Wire form of [`Animate`]: `true`/`false` or a number of milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAnimate {
    Flag(bool),
    Millis(u64),
}

impl From<RawAnimate> for Animate {
    fn from(raw: RawAnimate) -> Self {
        match raw {
            RawAnimate::Flag(false) | RawAnimate::Millis(0) => Self::Off,
            RawAnimate::Flag(true) => Self::On,
            RawAnimate::Millis(ms) => Self::Millis(ms),
        }
    }
}

impl From<Animate> for RawAnimate {
    fn from(animate: Animate) -> Self {
        match animate {
            Animate::Off => Self::Flag(false),
            Animate::On => Self::Flag(true),
            Animate::Millis(ms) => Self::Millis(ms),
        }
    }
}

/// Options for one clamp call. Missing fields in a deserialized document
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClampOptions {
    /// Lines (or height) to clamp to.
    pub clamp: ClampValue,
    /// Hand off to the layout engine's own line clamp when it has one.
    pub use_native_clamp: bool,
    /// Boundaries to cut at, coarsest first. Character-by-character
    /// removal follows once these are used up.
    pub split_on_chars: Vec<String>,
    /// Step pacing for [`crate::clamp_deferred`].
    pub animate: Animate,
    /// Marker appended at the cut.
    pub truncation_char: String,
    /// Markup placed between the cut text and the marker.
    #[serde(
        rename = "truncationHTML",
        alias = "truncationHtml",
        skip_serializing_if = "Option::is_none"
    )]
    pub truncation_html: Option<String>,
}

impl Default for ClampOptions {
    fn default() -> Self {
        Self {
            clamp: ClampValue::default(),
            use_native_clamp: true,
            split_on_chars: DEFAULT_SPLIT_ON_CHARS
                .iter()
                .map(ToString::to_string)
                .collect(),
            animate: Animate::Off,
            truncation_char: DEFAULT_TRUNCATION_CHAR.to_string(),
            truncation_html: None,
        }
    }
}
