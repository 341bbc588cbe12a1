// src/render/mod.rs
// Drawing confetti with nannou. The animation core never touches this.

pub mod confetti_renderer;

pub use confetti_renderer::ConfettiRenderer;
