// src/models/color_token.rs
//
// Abstract color tokens. The renderer maps them to real colors.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Black,
    White,
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Mint,
    Teal,
    Cyan,
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
    // linear rgb components in 0.0..=1.0
    Custom([f32; 3]),
}

impl ColorToken {
    pub fn default_colors() -> Vec<ColorToken> {
        vec![
            ColorToken::Blue,
            ColorToken::Red,
            ColorToken::Green,
            ColorToken::Yellow,
            ColorToken::Pink,
            ColorToken::Purple,
            ColorToken::Orange,
        ]
    }

    /// Components in 0.0..=1.0
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            ColorToken::Black => [0.0, 0.0, 0.0],
            ColorToken::White => [1.0, 1.0, 1.0],
            ColorToken::Gray => [0.56, 0.56, 0.58],
            ColorToken::Red => [1.0, 0.23, 0.19],
            ColorToken::Orange => [1.0, 0.58, 0.0],
            ColorToken::Yellow => [1.0, 0.8, 0.0],
            ColorToken::Green => [0.2, 0.78, 0.35],
            ColorToken::Mint => [0.0, 0.78, 0.75],
            ColorToken::Teal => [0.19, 0.69, 0.78],
            ColorToken::Cyan => [0.2, 0.68, 0.9],
            ColorToken::Blue => [0.0, 0.48, 1.0],
            ColorToken::Indigo => [0.35, 0.34, 0.84],
            ColorToken::Purple => [0.69, 0.32, 0.87],
            ColorToken::Pink => [1.0, 0.18, 0.33],
            ColorToken::Brown => [0.64, 0.52, 0.37],
            ColorToken::Custom([r, g, b]) => [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)],
        }
    }
}
