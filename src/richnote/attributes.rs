//! # Character Attributes
//!
//! An [`AttributeSet`] is the unit of formatting: a sparse mapping from a fixed
//! set of keys to typed values. A key that is absent means "inherit / default",
//! so two sets compare equal exactly when they set the same keys to the same
//! values.
//!
//! Sets are immutable values. Every modifier (`merge`, `with`, `without`)
//! returns a new set and leaves the receiver alone.
//!
//! | Key | Value |
//! |-----|-------|
//! | `bold`, `italic`, `underline`, `strikethrough` | `bool` |
//! | `font_family` | `String` |
//! | `font_size` | positive integer |
//! | `foreground`, `background` | [`Rgb`] |
//! | `alignment` | [`Alignment`] |

use crate::error::{NoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Family the editor falls back to when none is chosen.
pub const DEFAULT_FONT_FAMILY: &str = "Dialog";

/// Toolbar label that stands for [`DEFAULT_FONT_FAMILY`].
pub const SYSTEM_DEFAULT_FONT: &str = "System Default";

/// Foreground of inserted links.
pub const LINK_COLOR: Rgb = Rgb(0, 0, 255);

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = NoteError;

    /// Parses `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || NoteError::InvalidInput(format!("Invalid color: {}", s));
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Alignment {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            _ => Err(NoteError::InvalidInput(format!("Invalid alignment: {}", s))),
        }
    }
}

/// The closed set of formatting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKey {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    FontFamily,
    FontSize,
    Foreground,
    Background,
    Alignment,
}

impl AttrKey {
    pub const ALL: [AttrKey; 9] = [
        AttrKey::Bold,
        AttrKey::Italic,
        AttrKey::Underline,
        AttrKey::Strikethrough,
        AttrKey::FontFamily,
        AttrKey::FontSize,
        AttrKey::Foreground,
        AttrKey::Background,
        AttrKey::Alignment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttrKey::Bold => "bold",
            AttrKey::Italic => "italic",
            AttrKey::Underline => "underline",
            AttrKey::Strikethrough => "strikethrough",
            AttrKey::FontFamily => "font_family",
            AttrKey::FontSize => "font_size",
            AttrKey::Foreground => "foreground",
            AttrKey::Background => "background",
            AttrKey::Alignment => "alignment",
        }
    }
}

/// Runtime representation of a single attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bool(bool),
    Text(String),
    Size(NonZeroU32),
    Color(Rgb),
    Align(Alignment),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Text(v) => write!(f, "{:?}", v),
            AttrValue::Size(v) => write!(f, "{}", v),
            AttrValue::Color(v) => write!(f, "{}", v),
            AttrValue::Align(v) => write!(f, "{}", v),
        }
    }
}

/// A sparse, immutable set of formatting attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<NonZeroU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    foreground: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alignment: Option<Alignment>,
}

impl AttributeSet {
    /// The empty set: every key inherits.
    pub fn new() -> Self {
        Self::default()
    }

    /// The formatting merged onto inserted links: blue and underlined.
    pub fn link() -> Self {
        Self::new().foreground(LINK_COLOR).underline(true)
    }

    /// Returns a new set where every key explicitly set in `overlay` wins over `self`.
    pub fn merge(&self, overlay: &AttributeSet) -> AttributeSet {
        AttributeSet {
            bold: overlay.bold.or(self.bold),
            italic: overlay.italic.or(self.italic),
            underline: overlay.underline.or(self.underline),
            strikethrough: overlay.strikethrough.or(self.strikethrough),
            font_family: overlay
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            font_size: overlay.font_size.or(self.font_size),
            foreground: overlay.foreground.or(self.foreground),
            background: overlay.background.or(self.background),
            alignment: overlay.alignment.or(self.alignment),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == AttributeSet::default()
    }

    pub fn get(&self, key: AttrKey) -> Option<AttrValue> {
        match key {
            AttrKey::Bold => self.bold.map(AttrValue::Bool),
            AttrKey::Italic => self.italic.map(AttrValue::Bool),
            AttrKey::Underline => self.underline.map(AttrValue::Bool),
            AttrKey::Strikethrough => self.strikethrough.map(AttrValue::Bool),
            AttrKey::FontFamily => self.font_family.clone().map(AttrValue::Text),
            AttrKey::FontSize => self.font_size.map(AttrValue::Size),
            AttrKey::Foreground => self.foreground.map(AttrValue::Color),
            AttrKey::Background => self.background.map(AttrValue::Color),
            AttrKey::Alignment => self.alignment.map(AttrValue::Align),
        }
    }

    /// Returns a copy with `key` set to `value`.
    ///
    /// Fails with `InvalidInput` when the value type does not fit the key.
    pub fn with(&self, key: AttrKey, value: AttrValue) -> Result<AttributeSet> {
        let mut next = self.clone();
        match (key, value) {
            (AttrKey::Bold, AttrValue::Bool(v)) => next.bold = Some(v),
            (AttrKey::Italic, AttrValue::Bool(v)) => next.italic = Some(v),
            (AttrKey::Underline, AttrValue::Bool(v)) => next.underline = Some(v),
            (AttrKey::Strikethrough, AttrValue::Bool(v)) => next.strikethrough = Some(v),
            (AttrKey::FontFamily, AttrValue::Text(v)) => {
                next.font_family = Some(resolve_font_family(v))
            }
            (AttrKey::FontSize, AttrValue::Size(v)) => next.font_size = Some(v),
            (AttrKey::Foreground, AttrValue::Color(v)) => next.foreground = Some(v),
            (AttrKey::Background, AttrValue::Color(v)) => next.background = Some(v),
            (AttrKey::Alignment, AttrValue::Align(v)) => next.alignment = Some(v),
            (key, value) => {
                return Err(NoteError::InvalidInput(format!(
                    "{} cannot hold {}",
                    key.name(),
                    value
                )))
            }
        }
        Ok(next)
    }

    /// Returns a copy with `key` removed (back to inherit).
    pub fn without(&self, key: AttrKey) -> AttributeSet {
        let mut next = self.clone();
        match key {
            AttrKey::Bold => next.bold = None,
            AttrKey::Italic => next.italic = None,
            AttrKey::Underline => next.underline = None,
            AttrKey::Strikethrough => next.strikethrough = None,
            AttrKey::FontFamily => next.font_family = None,
            AttrKey::FontSize => next.font_size = None,
            AttrKey::Foreground => next.foreground = None,
            AttrKey::Background => next.background = None,
            AttrKey::Alignment => next.alignment = None,
        }
        next
    }

    /// Iterates the keys that are explicitly set, in [`AttrKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (AttrKey, AttrValue)> + '_ {
        AttrKey::ALL
            .iter()
            .filter_map(move |key| self.get(*key).map(|value| (*key, value)))
    }

    // Infallible builders for the common keys.

    pub fn bold(self, on: bool) -> Self {
        Self {
            bold: Some(on),
            ..self
        }
    }

    pub fn italic(self, on: bool) -> Self {
        Self {
            italic: Some(on),
            ..self
        }
    }

    pub fn underline(self, on: bool) -> Self {
        Self {
            underline: Some(on),
            ..self
        }
    }

    pub fn strikethrough(self, on: bool) -> Self {
        Self {
            strikethrough: Some(on),
            ..self
        }
    }

    /// Sets the font family. "System Default" is stored as [`DEFAULT_FONT_FAMILY`].
    pub fn font_family(self, family: impl Into<String>) -> Self {
        Self {
            font_family: Some(resolve_font_family(family.into())),
            ..self
        }
    }

    /// Sets the font size; a size of zero leaves the key unset.
    pub fn font_size(self, size: u32) -> Self {
        Self {
            font_size: NonZeroU32::new(size).or(self.font_size),
            ..self
        }
    }

    pub fn foreground(self, color: Rgb) -> Self {
        Self {
            foreground: Some(color),
            ..self
        }
    }

    pub fn background(self, color: Rgb) -> Self {
        Self {
            background: Some(color),
            ..self
        }
    }

    pub fn alignment(self, alignment: Alignment) -> Self {
        Self {
            alignment: Some(alignment),
            ..self
        }
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            return f.write_str("default");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(key, value)| format!("{}={}", key.name(), value))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

fn resolve_font_family(family: String) -> String {
    if family.eq_ignore_ascii_case(SYSTEM_DEFAULT_FONT) {
        DEFAULT_FONT_FAMILY.to_string()
    } else {
        family
    }
}

/// Named paragraph styles offered by the editor toolbar.
///
/// Presets replace whatever formatting the range had, rather than merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Normal,
    Title,
    Subtitle,
    Heading1,
    Heading2,
    Heading3,
    Quote,
    Code,
    Highlight,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Normal,
        Preset::Title,
        Preset::Subtitle,
        Preset::Heading1,
        Preset::Heading2,
        Preset::Heading3,
        Preset::Quote,
        Preset::Code,
        Preset::Highlight,
    ];

    pub fn attributes(&self) -> AttributeSet {
        let base = AttributeSet::new();
        match self {
            Preset::Normal => base
                .font_size(12)
                .bold(false)
                .italic(false)
                .font_family(DEFAULT_FONT_FAMILY),
            Preset::Title => base.font_size(28).bold(true),
            Preset::Subtitle => base.font_size(20).italic(true),
            Preset::Heading1 => base.font_size(24).bold(true),
            Preset::Heading2 => base.font_size(18).bold(true),
            Preset::Heading3 => base.font_size(14).bold(true),
            Preset::Quote => base.italic(true).foreground(Rgb(128, 128, 128)),
            Preset::Code => base.font_family("Consolas").background(Rgb(230, 230, 230)),
            Preset::Highlight => base.background(Rgb(255, 255, 0)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Normal => "Normal",
            Preset::Title => "Title",
            Preset::Subtitle => "Subtitle",
            Preset::Heading1 => "Heading 1",
            Preset::Heading2 => "Heading 2",
            Preset::Heading3 => "Heading 3",
            Preset::Quote => "Quote",
            Preset::Code => "Code",
            Preset::Highlight => "Highlight",
        }
    }
}

impl FromStr for Preset {
    type Err = NoteError;

    /// Accepts the display name in any case, with or without separators
    /// ("Heading 1", "heading-1", "heading1").
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| NoteError::InvalidInput(format!("Unknown style preset: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_default_font_maps_to_dialog() {
        let set = AttributeSet::new().font_family("System Default");
        assert_eq!(
            set.get(AttrKey::FontFamily),
            Some(AttrValue::Text("Dialog".into()))
        );

        let keyed = AttributeSet::new()
            .with(AttrKey::FontFamily, AttrValue::Text("system default".into()))
            .unwrap();
        assert_eq!(keyed, set);
        assert_eq!(
            AttributeSet::new().font_family("Georgia").get(AttrKey::FontFamily),
            Some(AttrValue::Text("Georgia".into()))
        );
    }

    #[test]
    fn merge_overlay_wins_on_explicit_keys() {
        let base = AttributeSet::new().bold(true).font_size(12);
        let overlay = AttributeSet::new().bold(false).italic(true);

        let merged = base.merge(&overlay);
        assert_eq!(merged.get(AttrKey::Bold), Some(AttrValue::Bool(false)));
        assert_eq!(merged.get(AttrKey::Italic), Some(AttrValue::Bool(true)));
        assert_eq!(
            merged.get(AttrKey::FontSize),
            NonZeroU32::new(12).map(AttrValue::Size)
        );
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let base = AttributeSet::new().bold(true);
        let overlay = AttributeSet::new().underline(true);
        let _ = base.merge(&overlay);
        assert_eq!(base, AttributeSet::new().bold(true));
        assert_eq!(overlay, AttributeSet::new().underline(true));
    }

    #[test]
    fn merge_with_empty_overlay_is_identity() {
        let base = AttributeSet::new().foreground(Rgb(1, 2, 3));
        assert_eq!(base.merge(&AttributeSet::new()), base);
    }

    #[test]
    fn default_set_has_no_keys() {
        assert!(AttributeSet::new().is_default());
        assert!(!AttributeSet::new().bold(false).is_default());
        assert_eq!(AttributeSet::new().iter().count(), 0);
    }

    #[test]
    fn explicit_false_differs_from_absent() {
        assert_ne!(AttributeSet::new(), AttributeSet::new().bold(false));
    }

    #[test]
    fn with_rejects_mismatched_value_types() {
        let err = AttributeSet::new()
            .with(AttrKey::Bold, AttrValue::Text("yes".into()))
            .unwrap_err();
        assert!(matches!(err, NoteError::InvalidInput(_)));
    }

    #[test]
    fn with_and_without_round_trip_a_key() {
        let set = AttributeSet::new()
            .with(AttrKey::Alignment, AttrValue::Align(Alignment::Center))
            .unwrap();
        assert_eq!(set, AttributeSet::new().alignment(Alignment::Center));
        assert!(set.without(AttrKey::Alignment).is_default());
    }

    #[test]
    fn zero_font_size_is_ignored() {
        assert!(AttributeSet::new().font_size(0).is_default());
    }

    #[test]
    fn rgb_parses_hex() {
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb(255, 128, 0));
        assert_eq!("00ff00".parse::<Rgb>().unwrap(), Rgb(0, 255, 0));
        assert!("#fff".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
        assert_eq!(Rgb(255, 128, 0).to_string(), "#ff8000");
    }

    #[test]
    fn presets_parse_loosely() {
        assert_eq!("Heading 1".parse::<Preset>().unwrap(), Preset::Heading1);
        assert_eq!("heading-2".parse::<Preset>().unwrap(), Preset::Heading2);
        assert_eq!("CODE".parse::<Preset>().unwrap(), Preset::Code);
        assert!("heading 7".parse::<Preset>().is_err());
    }

    #[test]
    fn title_preset_is_large_and_bold() {
        assert_eq!(
            Preset::Title.attributes(),
            AttributeSet::new().font_size(28).bold(true)
        );
    }

    #[test]
    fn serializes_only_present_keys() {
        let set = AttributeSet::new().bold(true).foreground(Rgb(1, 2, 3));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"bold":true,"foreground":[1,2,3]}"#);

        let parsed: AttributeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn rejects_zero_font_size_on_deserialize() {
        assert!(serde_json::from_str::<AttributeSet>(r#"{"font_size":0}"#).is_err());
    }

    #[test]
    fn display_lists_keys() {
        let set = AttributeSet::new().bold(true).alignment(Alignment::Right);
        assert_eq!(set.to_string(), "bold=true alignment=right");
        assert_eq!(AttributeSet::new().to_string(), "default");
    }
}
