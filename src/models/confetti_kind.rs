// src/models/confetti_kind.rs
//
// The things a confetti piece can look like.
// The core never draws these; the host renderer resolves them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeTag {
    Circle,
    Triangle,
    Square,
    SlimRectangle,
    RoundedCross,
}

impl ShapeTag {
    pub const ALL: [ShapeTag; 5] = [
        ShapeTag::Circle,
        ShapeTag::Triangle,
        ShapeTag::Square,
        ShapeTag::SlimRectangle,
        ShapeTag::RoundedCross,
    ];
}

/// A drawable visual token.
///
/// In `config.toml` a kind is written as a one-key table,
/// e.g. `{ shape = "circle" }` or `{ text = "🎉" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfettiKind {
    Shape(ShapeTag),
    Text(String),
    Icon(String),
    Image(String),
}

impl ConfettiKind {
    pub fn default_kinds() -> Vec<ConfettiKind> {
        ShapeTag::ALL.iter().copied().map(ConfettiKind::Shape).collect()
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, ConfettiKind::Shape(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        kinds: Vec<ConfettiKind>,
    }

    #[test]
    fn test_default_kinds_are_the_five_shapes() {
        let kinds = ConfettiKind::default_kinds();
        assert_eq!(kinds.len(), 5);
        assert!(kinds.iter().all(|k| k.is_shape()));
        assert_eq!(kinds[3], ConfettiKind::Shape(ShapeTag::SlimRectangle));
    }

    #[test]
    fn test_kinds_from_toml() {
        let src = r#"
            kinds = [
                { shape = "rounded_cross" },
                { text = "hi" },
                { icon = "star.fill" },
                { image = "logo" },
            ]
        "#;
        let parsed: Wrapper = toml::from_str(src).unwrap();
        assert_eq!(
            parsed.kinds,
            vec![
                ConfettiKind::Shape(ShapeTag::RoundedCross),
                ConfettiKind::Text("hi".to_string()),
                ConfettiKind::Icon("star.fill".to_string()),
                ConfettiKind::Image("logo".to_string()),
            ]
        );
    }
}
