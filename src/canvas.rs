//! Drawing target abstraction.
//!
//! Entities never talk to a concrete graphics backend. They describe what to
//! paint through [`Canvas`], which a host implements on top of whatever it has
//! (an HTML canvas bridge, a software rasterizer, a GPU batcher). The
//! [`CommandBuffer`] implementation simply records the calls, which is what
//! the tests and the C ABI snapshot rely on.

use crate::color::Color;

use ultraviolet::Vec2;

/// Current size of the drawable area in pixels.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Inverts each velocity component whose axis has left the surface.
    /// The position itself is left alone and may overshoot for a frame.
    #[inline]
    pub fn bounce(&self, pos: Vec2, vel: &mut Vec2) {
        if pos.x < 0.0 || pos.x > self.width {
            vel.x = -vel.x;
        }
        if pos.y < 0.0 || pos.y > self.height {
            vel.y = -vel.y;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<GradientStop>,
    },
    /// Radial gradient between two concentric circles.
    Radial {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn linear(start: Vec2, end: Vec2, stops: &[(f32, Color)]) -> Self {
        Paint::Linear {
            start,
            end,
            stops: collect_stops(stops),
        }
    }

    pub fn radial(center: Vec2, inner_radius: f32, outer_radius: f32, stops: &[(f32, Color)]) -> Self {
        Paint::Radial {
            center,
            inner_radius,
            outer_radius,
            stops: collect_stops(stops),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

fn collect_stops(stops: &[(f32, Color)]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|&(offset, color)| GradientStop { offset, color })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Self {
            paint: paint.into(),
            width,
        }
    }
}

/// Rotated ellipse.
///
/// Paints are given in world coordinates like every other call. When filling,
/// the backend applies the ellipse's rotation and its `radius_y / radius_x`
/// squash around `center` to the paint as well, so a radial gradient centered
/// on `center` and reaching `radius_x` follows the rim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub radius_x: f32,
    pub radius_y: f32,
    pub rotation: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { control: Vec2, to: Vec2 },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, to: Vec2) -> Self {
        self.segments.push(PathSegment::MoveTo(to));
        self
    }

    pub fn line_to(mut self, to: Vec2) -> Self {
        self.segments.push(PathSegment::LineTo(to));
        self
    }

    pub fn quad_to(mut self, control: Vec2, to: Vec2) -> Self {
        self.segments.push(PathSegment::QuadTo { control, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }
}

/// A 2D drawing target.
///
/// `set_alpha` is a global multiplier that stays in effect until changed,
/// mirroring how immediate-mode canvases handle opacity.
pub trait Canvas {
    fn clear(&mut self, surface: Surface);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke);
    fn fill_ellipse(&mut self, ellipse: Ellipse, paint: &Paint);
    fn stroke_ellipse(&mut self, ellipse: Ellipse, stroke: &Stroke);
    fn fill_path(&mut self, path: &Path, paint: &Paint);
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);
    fn set_alpha(&mut self, alpha: f32);
}

/// One recorded [`Canvas`] call, with the global alpha that was active.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Surface),
    FillRect { origin: Vec2, size: Vec2, paint: Paint, alpha: f32 },
    FillCircle { center: Vec2, radius: f32, paint: Paint, alpha: f32 },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke, alpha: f32 },
    FillEllipse { ellipse: Ellipse, paint: Paint, alpha: f32 },
    StrokeEllipse { ellipse: Ellipse, stroke: Stroke, alpha: f32 },
    FillPath { path: Path, paint: Paint, alpha: f32 },
    StrokePath { path: Path, stroke: Stroke, alpha: f32 },
}

/// Canvas that records every call instead of rasterizing.
#[derive(Debug)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
    alpha: f32,
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            alpha: 1.0,
        }
    }

    /// Drops recorded commands and resets alpha, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.alpha = 1.0;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Canvas for CommandBuffer {
    fn clear(&mut self, surface: Surface) {
        self.commands.push(DrawCommand::Clear(surface));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            paint: paint.clone(),
            alpha: self.alpha,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
            alpha: self.alpha,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
            alpha: self.alpha,
        });
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, paint: &Paint) {
        self.commands.push(DrawCommand::FillEllipse {
            ellipse,
            paint: paint.clone(),
            alpha: self.alpha,
        });
    }

    fn stroke_ellipse(&mut self, ellipse: Ellipse, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeEllipse {
            ellipse,
            stroke: stroke.clone(),
            alpha: self.alpha,
        });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            paint: paint.clone(),
            alpha: self.alpha,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            alpha: self.alpha,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
}
