pub mod color_token;
pub mod confetti_kind;
pub mod palette;

pub use color_token::ColorToken;
pub use confetti_kind::{ConfettiKind, ShapeTag};
pub use palette::{Palette, Visual};
