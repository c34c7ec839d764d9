/// Debug overlay outlining every live obstacle.

use crate::entities::Frame;
use crate::scheduler::{Behavior, Context, Step};

/// Outline one cell outside an obstacle of `height` x `width`.
pub fn bounding_box(height: i32, width: i32) -> Frame {
    let (height, width) = (height.max(0) as usize, width.max(0) as usize);
    let edge = format!(" {} ", "-".repeat(width));
    let side = format!("|{}|", " ".repeat(width));
    let mut lines = Vec::with_capacity(height + 2);
    lines.push(edge.clone());
    lines.extend(std::iter::repeat(side).take(height));
    lines.push(edge);
    Frame::new("bounding-box", &lines.join("\n"))
}

#[derive(Default)]
pub struct ObstacleOverlay {
    drawn: Vec<(i32, i32, Frame)>,
}

impl ObstacleOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for ObstacleOverlay {
    fn name(&self) -> &'static str {
        "obstacle-overlay"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        for (row, column, frame) in self.drawn.drain(..) {
            ctx.field.draw_frame(row, column, &frame, true);
        }
        for (_, obstacle) in ctx.obstacles.iter() {
            let frame = bounding_box(obstacle.height, obstacle.width);
            self.drawn
                .push((obstacle.top() - 1, obstacle.column - 1, frame));
        }
        for (row, column, frame) in &self.drawn {
            ctx.field.draw_frame(*row, *column, frame, false);
        }
        Step::Running
    }
}
