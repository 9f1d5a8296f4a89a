//! Terminal framebuffer backend
//!
//! Draws the logical play area onto the terminal with half-block
//! characters: every cell carries two vertically stacked pixels, the
//! upper one in the foreground color of `▀` and the lower one in the
//! background color. That doubles the vertical resolution and keeps
//! pixels roughly square in most terminal fonts.
//!
//! Shapes are rasterized by sampling signed distance functions at each
//! pixel center in logical coordinates, padded by half a pixel so
//! features smaller than one cell still show up. Text is a separate
//! cell-resolution layer drawn over the pixels.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Colors, Print, SetColors},
};
use glam::Vec2;

use super::{Color, Surface, TextStyle};
use crate::sim::Rect;

pub struct TermSurface {
    cols: u16,
    rows: u16,
    fb_w: usize,
    fb_h: usize,
    logical: Vec2,
    /// Pixels per logical unit on each axis
    sx: f32,
    sy: f32,
    pixels: Vec<Color>,
    glyphs: Vec<Option<(char, Color)>>,
}

/// Signed distance to a circle
#[inline]
fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to a rectangle with rounded corners
fn sd_rounded_rect(p: Vec2, rect: &Rect, corner: f32) -> f32 {
    let half = Vec2::new(rect.w, rect.h) / 2.0;
    let corner = corner.min(half.x).min(half.y).max(0.0);
    let q = (p - rect.center()).abs() - half + Vec2::splat(corner);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - corner
}

impl TermSurface {
    pub fn new(cols: u16, rows: u16, logical: Vec2) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let fb_w = cols as usize;
        let fb_h = rows as usize * 2;
        Self {
            cols,
            rows,
            fb_w,
            fb_h,
            logical,
            sx: fb_w as f32 / logical.x,
            sy: fb_h as f32 / logical.y,
            pixels: vec![Color::rgb(0, 0, 0); fb_w * fb_h],
            glyphs: vec![None; fb_w * rows as usize],
        }
    }

    /// Half a logical pixel on the coarser axis; shapes are padded by
    /// this much so sub-cell features still land on a sample point
    fn feather(&self) -> f32 {
        0.5 * (1.0 / self.sx).max(1.0 / self.sy)
    }

    /// Paint every framebuffer pixel inside `bounds` whose center
    /// (in logical coordinates) satisfies `sd(p) <= feather`
    fn paint_sdf<F: Fn(Vec2) -> f32>(&mut self, bounds: &Rect, color: Color, sd: F) {
        let feather = self.feather();
        let x0 = ((bounds.left() - feather) * self.sx).floor().max(0.0) as usize;
        let y0 = ((bounds.top() - feather) * self.sy).floor().max(0.0) as usize;
        let x1 = (((bounds.right() + feather) * self.sx).ceil() as usize).min(self.fb_w);
        let y1 = (((bounds.bottom() + feather) * self.sy).ceil() as usize).min(self.fb_h);
        for j in y0..y1 {
            for i in x0..x1 {
                let p = Vec2::new((i as f32 + 0.5) / self.sx, (j as f32 + 0.5) / self.sy);
                if sd(p) <= feather {
                    self.pixels[j * self.fb_w + i] = color;
                }
            }
        }
    }

    /// Flush the frame to the terminal
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let top = self.pixels[(row as usize * 2) * self.fb_w + col as usize];
                let bottom = self.pixels[(row as usize * 2 + 1) * self.fb_w + col as usize];
                match self.glyphs[row as usize * self.fb_w + col as usize] {
                    Some((ch, color)) => {
                        let backdrop = top.lerp(bottom, 0.5);
                        out.queue(SetColors(Colors::new(
                            to_term_color(color),
                            to_term_color(backdrop),
                        )))?;
                        out.queue(Print(ch))?;
                    }
                    None => {
                        out.queue(SetColors(Colors::new(
                            to_term_color(top),
                            to_term_color(bottom),
                        )))?;
                        out.queue(Print('▀'))?;
                    }
                }
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }

    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.fb_w + x]
    }
}

fn to_term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

impl Surface for TermSurface {
    fn size(&self) -> Vec2 {
        self.logical
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.glyphs.fill(None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        let bounds = rect;
        self.paint_sdf(&bounds, color, move |p| {
            sd_rounded_rect(p, &rect, corner_radius)
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32, corner_radius: f32) {
        let bounds = rect.inflate(thickness);
        self.paint_sdf(&bounds, color, move |p| {
            sd_rounded_rect(p, &rect, corner_radius).abs() - thickness / 2.0
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let bounds = Rect::from_center(center, radius * 2.0, radius * 2.0);
        self.paint_sdf(&bounds, color, move |p| sd_circle(p, center, radius));
    }

    fn fill_overlay(&mut self, color: Color, alpha: u8) {
        let t = alpha as f32 / 255.0;
        for pixel in self.pixels.iter_mut() {
            *pixel = pixel.lerp(color, t);
        }
        for glyph in self.glyphs.iter_mut().flatten() {
            glyph.1 = glyph.1.lerp(color, t);
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, _style: TextStyle, color: Color) {
        let row = (pos.y * self.sy / 2.0).round() as isize;
        if row < 0 || row >= self.rows as isize {
            return;
        }
        let start = (pos.x * self.sx).round() as isize;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as isize;
            if col < 0 || col >= self.cols as isize {
                continue;
            }
            self.glyphs[row as usize * self.fb_w + col as usize] = Some((ch, color));
        }
    }

    fn text_size(&self, text: &str, _style: TextStyle) -> Vec2 {
        // One terminal cell per character; styles share the cell font
        Vec2::new(
            text.chars().count() as f32 / self.sx,
            2.0 / self.sy,
        )
    }
}
