//! Narration blocks and the ordered sequence that holds them.
//!
//! - [`Block`]: one narration unit (voice, text, color)
//! - [`BlockStore`]: the sequence, replaced wholesale on every mutation
//! - [`Field`]: the editable fields of a block
//! - [`VOICES`] / [`PALETTE`]: the choices offered by the editor

mod store;

pub use store::{BlockStore, Reorder};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A selectable option: stored value plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Voices a block can be narrated with. The empty value means "not chosen yet".
pub const VOICES: [Choice; 4] = [
    Choice {
        value: "",
        label: "Escolha a voz...",
    },
    Choice {
        value: "voz1",
        label: "Voz 1",
    },
    Choice {
        value: "voz2",
        label: "Voz 2",
    },
    Choice {
        value: "voz3",
        label: "Voz 3",
    },
];

/// Color tags. The first entry is the default for new blocks.
pub const PALETTE: [Choice; 5] = [
    Choice {
        value: "#007BFF",
        label: "Azul",
    },
    Choice {
        value: "#28A745",
        label: "Verde",
    },
    Choice {
        value: "#DC3545",
        label: "Vermelho",
    },
    Choice {
        value: "#FFC107",
        label: "Amarelo",
    },
    Choice {
        value: "#6C757D",
        label: "Cinza",
    },
];

pub const DEFAULT_COLOR: &str = PALETTE[0].value;

/// Placeholder shown in an empty text field.
pub const TEXT_PLACEHOLDER: &str = "Digite o texto narrado...";

/// One narration unit.
///
/// Fields are plain strings: the editor offers [`VOICES`] and [`PALETTE`], but
/// any value is accepted and kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub voice: String,
    pub text: String,
    pub color: String,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            voice: String::new(),
            text: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl Block {
    /// Read a field by name.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Voice => &self.voice,
            Field::Text => &self.text,
            Field::Color => &self.color,
        }
    }

    /// Label of the current voice, or the raw value when it is not one of [`VOICES`].
    pub fn voice_label(&self) -> &str {
        choice_label(&VOICES, &self.voice).unwrap_or(&self.voice)
    }

    /// Label of the current color, or the raw value when it is not in [`PALETTE`].
    pub fn color_label(&self) -> &str {
        choice_label(&PALETTE, &self.color).unwrap_or(&self.color)
    }
}

/// Editable fields of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Voice,
    Text,
    Color,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Text => "text",
            Self::Color => "color",
        }
    }

    /// Options offered for this field; free text has none.
    pub const fn choices(self) -> Option<&'static [Choice]> {
        match self {
            Self::Voice => Some(&VOICES),
            Self::Color => Some(&PALETTE),
            Self::Text => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voice" => Ok(Self::Voice),
            "text" => Ok(Self::Text),
            "color" => Ok(Self::Color),
            other => Err(BlockError::UnknownField(other.to_string())),
        }
    }
}

/// Errors raised by [`BlockStore`] operations.
///
/// Both variants are caller contract violations; the sequence is left
/// untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("block index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown block field {0:?} (expected voice, text or color)")]
    UnknownField(String),
}

fn choice_label<'a>(choices: &'a [Choice], value: &str) -> Option<&'a str> {
    choices.iter().find(|c| c.value == value).map(|c| c.label)
}

/// Step through `choices` from the entry matching `current`.
///
/// Unknown values start from the first entry. Wraps in both directions.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn cycle_choice(choices: &[Choice], current: &str, delta: isize) -> &'static str {
    let len = choices.len();
    if len == 0 {
        return "";
    }
    let next = choices
        .iter()
        .position(|c| c.value == current)
        .map_or(0, |pos| (pos as isize + delta).rem_euclid(len as isize) as usize);
    choices[next].value
}
