//! Word Cloud Layout
//! Greedy spiral placement shared by the interactive and exported word clouds.

use super::palette::{categorical, Rgb, PASTEL1};
use crate::stats::WordFrequency;

pub const MIN_FONT: f32 = 10.0;
pub const MAX_FONT: f32 = 64.0;

/// Rough glyph metrics relative to the font size.
const CHAR_WIDTH: f32 = 0.58;
const LINE_HEIGHT: f32 = 1.1;

const SPIRAL_STEP: f32 = 0.15;
const SPIRAL_TURNS: f32 = 200.0;

/// A word positioned on the canvas; `x`/`y` is the text centre.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub color: Rgb,
}

impl PlacedWord {
    /// Estimated box as (left, top, right, bottom).
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let (w, h) = text_extent(&self.text, self.font_size);
        (
            self.x - w / 2.0,
            self.y - h / 2.0,
            self.x + w / 2.0,
            self.y + h / 2.0,
        )
    }
}

fn text_extent(text: &str, font_size: f32) -> (f32, f32) {
    (
        text.chars().count() as f32 * font_size * CHAR_WIDTH,
        font_size * LINE_HEIGHT,
    )
}

fn overlaps(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3
}

/// Place words most frequent first along an Archimedean spiral from the
/// centre. Words that do not fit are dropped.
pub fn layout_words(words: &[WordFrequency], width: f32, height: f32) -> Vec<PlacedWord> {
    let Some(max_count) = words.iter().map(|w| w.count).max() else {
        return Vec::new();
    };
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let (cx, cy) = (width / 2.0, height / 2.0);
    let aspect = height / width;
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());

    for (i, word) in words.iter().enumerate() {
        let weight = word.count as f32 / max_count as f32;
        let font_size = MIN_FONT + (MAX_FONT - MIN_FONT) * weight;
        let (w, h) = text_extent(&word.word, font_size);
        if w > width || h > height {
            continue;
        }

        let mut t = 0.0f32;
        while t < SPIRAL_TURNS {
            let x = cx + t * t.cos();
            let y = cy + t * t.sin() * aspect;
            let candidate = PlacedWord {
                text: word.word.clone(),
                x,
                y,
                font_size,
                color: categorical(&PASTEL1, i),
            };
            let b = candidate.bounds();
            let inside = b.0 >= 0.0 && b.1 >= 0.0 && b.2 <= width && b.3 <= height;
            if inside && !placed.iter().any(|p| overlaps(p.bounds(), b)) {
                placed.push(candidate);
                break;
            }
            t += SPIRAL_STEP;
        }
    }

    placed
}
