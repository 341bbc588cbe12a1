// src/models/palette.rs
//
// The visual palette: every kind crossed with every color.

use super::{ColorToken, ConfettiKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub kind: ConfettiKind,
    pub color: ColorToken,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    visuals: Vec<Visual>,
}

impl Palette {
    /// Kinds are the outer loop, colors the inner one.
    /// Returns `None` when the product would be empty.
    pub fn cross(kinds: &[ConfettiKind], colors: &[ColorToken]) -> Option<Self> {
        if kinds.is_empty() || colors.is_empty() {
            return None;
        }
        let visuals = kinds
            .iter()
            .flat_map(|kind| {
                colors.iter().map(move |color| Visual {
                    kind: kind.clone(),
                    color: *color,
                })
            })
            .collect();
        Some(Self { visuals })
    }

    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }
}
