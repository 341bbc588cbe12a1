// src/animation/easing.rs
//
// Timing curves for particle transitions

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingType {
    Linear,
    EaseInOut,
    EaseIn,
    EaseOut,
    // control points (x1, y1, x2, y2), endpoints fixed at (0,0) and (1,1)
    CubicBezier(f32, f32, f32, f32),
}

impl EasingType {
    /// Fast start, long soft landing. Used for the outward burst.
    pub const EXPLOSION: EasingType = EasingType::CubicBezier(0.1, 0.8, 0.0, 1.0);
    /// Sharply accelerating. Used for the rain.
    pub const FALL: EasingType = EasingType::CubicBezier(0.12, 0.0, 0.39, 0.0);

    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            EasingType::Linear => t,
            EasingType::EaseInOut => ease_in_out(t),
            EasingType::EaseIn => ease_in(t),
            EasingType::EaseOut => ease_out(t),
            EasingType::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

// one coordinate of the curve at parameter s
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

const EPSILON: f32 = 1e-6;

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, it converges in a handful of steps for sane curves
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < EPSILON {
            return bezier(s, y1, y2);
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    // flat spots: fall back to bisection
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..64 {
        let bx = bezier(s, x1, x2);
        if (bx - x).abs() < EPSILON {
            break;
        }
        if bx < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier(s, y1, y2)
}
