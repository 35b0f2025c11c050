// SPDX-License-Identifier: MPL-2.0
//! Annotation engine backed by tiny-skia.
//!
//! Strokes are kept as vector operations on an undo stack and only rasterized
//! when the surface is rendered over a base bitmap. Eraser strokes clear the
//! annotation layer (never the photo underneath).

use crate::application::port::{AnnotationEngine, AnnotationSurface};
use crate::domain::{Bitmap, DrawTool, Point, Rgba};
use tiny_skia::{
    BlendMode, ColorU8, FillRule, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, Transform,
};

/// Creates [`SkiaSurface`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkiaAnnotationEngine;

impl SkiaAnnotationEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationEngine for SkiaAnnotationEngine {
    fn create_surface(&mut self, width: u32, height: u32) -> Box<dyn AnnotationSurface> {
        Box::new(SkiaSurface::new(width, height))
    }
}

/// One recorded stroke with the settings active when it was drawn.
#[derive(Debug, Clone, PartialEq)]
struct StrokeOp {
    tool: DrawTool,
    width: f32,
    stroke_color: Rgba,
    fill_color: Rgba,
    points: Vec<Point>,
}

/// A page's annotation layer.
#[derive(Debug, Clone)]
pub struct SkiaSurface {
    width: u32,
    height: u32,
    tool: DrawTool,
    stroke_width: f32,
    stroke_color: Rgba,
    fill_color: Rgba,
    undo_stack: Vec<StrokeOp>,
    redo_stack: Vec<StrokeOp>,
}

impl SkiaSurface {
    /// Creates an empty surface with a red 5-point pen.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tool: DrawTool::Pen,
            stroke_width: 5.0,
            stroke_color: Rgba::RED,
            fill_color: Rgba::RED,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn tool(&self) -> DrawTool {
        self.tool
    }

    #[must_use]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    #[must_use]
    pub fn stroke_color(&self) -> Rgba {
        self.stroke_color
    }

    /// Rasterizes the visible strokes onto a transparent `width` x `height` layer.
    fn rasterize(&self, width: u32, height: u32) -> Option<Pixmap> {
        let mut layer = Pixmap::new(width, height)?;

        for op in &self.undo_stack {
            let mut paint = Paint::default();
            paint.anti_alias = true;
            if op.tool == DrawTool::Eraser {
                paint.blend_mode = BlendMode::Clear;
            }

            match op.points.as_slice() {
                [] => {}
                [dot] => {
                    let Some(path) = PathBuilder::from_circle(dot.x, dot.y, op.width / 2.0) else {
                        continue;
                    };
                    let c = op.fill_color;
                    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
                    layer.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
                [first, rest @ ..] => {
                    let mut builder = PathBuilder::new();
                    builder.move_to(first.x, first.y);
                    for point in rest {
                        builder.line_to(point.x, point.y);
                    }
                    let Some(path) = builder.finish() else {
                        continue;
                    };
                    let c = op.stroke_color;
                    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
                    let stroke = Stroke {
                        width: op.width,
                        line_cap: LineCap::Round,
                        line_join: LineJoin::Round,
                        ..Stroke::default()
                    };
                    layer.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                }
            }
        }

        Some(layer)
    }
}

impl AnnotationSurface for SkiaSurface {
    fn set_tool(&mut self, tool: DrawTool) {
        self.tool = tool;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    fn add_stroke(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        self.undo_stack.push(StrokeOp {
            tool: self.tool,
            width: self.stroke_width,
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            points: points.to_vec(),
        });
        self.redo_stack.clear();
    }

    fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn undo(&mut self) {
        if let Some(op) = self.undo_stack.pop() {
            self.redo_stack.push(op);
        }
    }

    fn redo(&mut self) {
        if let Some(op) = self.redo_stack.pop() {
            self.undo_stack.push(op);
        }
    }

    fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    fn render(&self, base: &Bitmap) -> Option<Bitmap> {
        let size = IntSize::from_wh(base.width(), base.height())?;

        // tiny-skia works on premultiplied pixels.
        let mut premultiplied = Vec::with_capacity(base.rgba_bytes().len());
        for px in base.rgba_bytes().chunks_exact(4) {
            let color = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            premultiplied.extend_from_slice(&[
                color.red(),
                color.green(),
                color.blue(),
                color.alpha(),
            ]);
        }
        let mut canvas = Pixmap::from_vec(premultiplied, size)?;

        let layer = self.rasterize(base.width(), base.height())?;
        canvas.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        let mut rgba = Vec::with_capacity(canvas.data().len());
        for px in canvas.pixels() {
            let color = px.demultiply();
            rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        Some(Bitmap::from_rgba(base.width(), base.height(), rgba))
    }
}
