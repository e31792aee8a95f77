use common::Position;

use crate::{Renderer, Rgb, Surface};

/// Latest known body of the snake in one player slot.
#[derive(Debug, Clone)]
pub struct Snake {
    color: Rgb,
    body: Vec<Position>,
}

impl Snake {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            body: Vec::new(),
        }
    }

    /// Replace the body wholesale with the one from the latest snapshot.
    pub fn update(&mut self, body: &[Position]) {
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    pub fn draw<S: Surface>(&self, renderer: &mut Renderer<S>) {
        for point in &self.body {
            renderer.draw_point(point.x, point.y, self.color);
        }
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}
