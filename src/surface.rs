//! Immediate-mode drawing surface the loop renders into.

use cgmath::Vector2;

/// Straight-alpha 8-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// White at `alpha` opacity in [0, 1].
    pub fn white(alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(255, 255, 255, a)
    }
}

/// Line segment between two points.
pub type Segment = [Vector2<f32>; 2];

/// A 2D immediate-mode drawing context sized to the viewport.
pub trait DrawSurface {
    fn clear(&mut self, color: Rgba);

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba);

    /// Stroke every segment in a single draw call with shared styling.
    fn stroke_segments(&mut self, segments: &[Segment], width: f32, color: Rgba);
}

/// One recorded drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Circle {
        center: Vector2<f32>,
        radius: f32,
        color: Rgba,
    },
    Segments {
        segments: Vec<Segment>,
        width: f32,
        color: Rgba,
    },
}

/// Headless surface that keeps the commands of the frames drawn into it.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub commands: Vec<DrawCommand>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands since the last `clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vector2<f32>, f32)> + '_ {
        self.last_frame().iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        self.last_frame()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Segments { segments, .. } => Some(segments.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

impl DrawSurface for FrameRecorder {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_segments(&mut self, segments: &[Segment], width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Segments {
            segments: segments.to_vec(),
            width,
            color,
        });
    }
}
