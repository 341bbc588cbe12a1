// src/render/confetti_renderer.rs
//
// Draws sampled particle frames with nannou.
// Particle offsets come in screen space (+y down); nannou is +y up.

use crate::animation::ParticleFrame;
use crate::models::{ColorToken, ConfettiKind, ShapeTag};
use log::{info, warn};
use nannou::prelude::*;
use std::collections::HashMap;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 3] = ["", "png", "jpg"];
// keeps an edge-on piece from vanishing entirely
const MIN_FORESHORTENING: f32 = 0.05;

pub struct ConfettiRenderer {
    origin: Point2,
    textures: HashMap<String, wgpu::Texture>,
}

impl ConfettiRenderer {
    pub fn new(origin: Point2) -> Self {
        Self {
            origin,
            textures: HashMap::new(),
        }
    }

    /// Loads a texture for every icon and image kind found in `dir`.
    /// Missing files are reported and drawn as circles later.
    pub fn load_images(&mut self, app: &App, dir: &Path, kinds: &[ConfettiKind]) {
        for kind in kinds {
            let name = match kind {
                ConfettiKind::Icon(name) | ConfettiKind::Image(name) => name,
                _ => continue,
            };
            if self.textures.contains_key(name) {
                continue;
            }
            let found = IMAGE_EXTENSIONS
                .iter()
                .map(|ext| {
                    if ext.is_empty() {
                        dir.join(name)
                    } else {
                        dir.join(format!("{}.{}", name, ext))
                    }
                })
                .find(|path| path.is_file());
            match found {
                Some(path) => match wgpu::Texture::from_path(app, &path) {
                    Ok(texture) => {
                        info!("Loaded confetti image {}", path.display());
                        self.textures.insert(name.clone(), texture);
                    }
                    Err(err) => warn!("Could not load {}: {}", path.display(), err),
                },
                None => warn!(
                    "No image named {} in {}, drawing circles instead",
                    name,
                    dir.display()
                ),
            }
        }
    }

    pub fn draw_frame(&self, draw: &Draw, frame: &ParticleFrame) {
        if frame.opacity <= 0.0 {
            return;
        }
        let size = frame.size;
        let center = to_window(self.origin, frame.offset);
        // screen-space clockwise turns are negative in nannou
        let rotation = -frame.rotation_z;
        let position = rotate_about_anchor(center, frame.anchor, size, rotation);
        let squash = foreshortening(frame.rotation_x);
        let color = to_rgba(frame.visual.color, frame.opacity);

        match &frame.visual.kind {
            ConfettiKind::Shape(tag) => draw_shape(draw, *tag, position, size, squash, rotation, color),
            ConfettiKind::Text(text) => {
                // glyphs can't be given a height, so squash the whole context
                draw.transform(piece_transform(position, rotation, squash))
                    .text(text)
                    .w_h(size * 4.0, size * 2.0)
                    .font_size(size.max(1.0) as u32)
                    .color(color);
            }
            ConfettiKind::Icon(name) | ConfettiKind::Image(name) => match self.textures.get(name) {
                // nannou samples textures without vertex alpha, so these don't fade
                Some(texture) => {
                    draw.texture(texture)
                        .xy(position)
                        .w_h(size, size * squash)
                        .rotate(rotation);
                }
                None => draw_shape(draw, ShapeTag::Circle, position, size, squash, rotation, color),
            },
        }
    }
}

fn draw_shape(
    draw: &Draw,
    tag: ShapeTag,
    position: Point2,
    size: f32,
    squash: f32,
    rotation: f32,
    color: Rgba,
) {
    let height = size * squash;
    match tag {
        ShapeTag::Circle => {
            draw.ellipse()
                .xy(position)
                .w_h(size, height)
                .rotate(rotation)
                .color(color);
        }
        ShapeTag::Triangle => {
            let half_w = size / 2.0;
            let half_h = height / 2.0;
            draw.tri()
                .points(pt2(-half_w, -half_h), pt2(half_w, -half_h), pt2(0.0, half_h))
                .xy(position)
                .rotate(rotation)
                .color(color);
        }
        ShapeTag::Square => {
            draw.rect()
                .xy(position)
                .w_h(size, height)
                .rotate(rotation)
                .color(color);
        }
        ShapeTag::SlimRectangle => {
            draw.rect()
                .xy(position)
                .w_h(size, height / 5.0)
                .rotate(rotation)
                .color(color);
        }
        ShapeTag::RoundedCross => {
            let bar = size / 3.0;
            draw.rect()
                .xy(position)
                .w_h(size, bar * squash)
                .rotate(rotation)
                .color(color);
            draw.rect()
                .xy(position)
                .w_h(bar, height)
                .rotate(rotation)
                .color(color);
        }
    }
}

pub fn to_rgba(color: ColorToken, opacity: f32) -> Rgba {
    let [r, g, b] = color.rgb();
    rgba(r, g, b, opacity.clamp(0.0, 1.0))
}

pub fn to_window(origin: Point2, offset: Vec2) -> Point2 {
    pt2(origin.x + offset.x, origin.y - offset.y)
}

// Where the piece's center lands after turning `rotation` radians about a
// pivot given in unit coordinates of the piece (0,0 is its top-left corner).
pub fn rotate_about_anchor(center: Point2, anchor: Vec2, size: f32, rotation: f32) -> Point2 {
    let pivot = center + vec2((anchor.x - 0.5) * size, (0.5 - anchor.y) * size);
    let arm = center - pivot;
    let (sin, cos) = rotation.sin_cos();
    pivot + vec2(arm.x * cos - arm.y * sin, arm.x * sin + arm.y * cos)
}

// Places a piece drawn around the origin: squashed on y, turned, then moved.
pub fn piece_transform(position: Point2, rotation: f32, squash: f32) -> Mat4 {
    Mat4::from_translation(position.extend(0.0))
        * Mat4::from_rotation_z(rotation)
        * Mat4::from_scale(vec3(1.0, squash, 1.0))
}

pub fn foreshortening(rotation_x: f32) -> f32 {
    rotation_x.cos().abs().max(MIN_FORESHORTENING)
}
