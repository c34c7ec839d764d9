/// One-shot explosion animation and the final game-over banner.

use std::rc::Rc;

use crate::compute::centred_corner;
use crate::entities::Frame;
use crate::scheduler::{Behavior, Context, Step};

/// Plays its frames centred on a point, each shown for one tick and erased
/// on the next, then finishes.
pub struct Explosion {
    row: i32,
    column: i32,
    frames: Vec<Rc<Frame>>,
    stage: usize,
}

impl Explosion {
    pub fn new(centre_row: f64, centre_column: f64, frames: Vec<Rc<Frame>>) -> Self {
        let (height, width) = frames
            .first()
            .map(|f| (f.height(), f.width()))
            .unwrap_or((0, 0));
        let (row, column) = centred_corner(centre_row, centre_column, height, width);
        Explosion {
            row,
            column,
            frames,
            stage: 0,
        }
    }

    pub fn corner(&self) -> (i32, i32) {
        (self.row, self.column)
    }
}

impl Behavior for Explosion {
    fn name(&self) -> &'static str {
        "explosion"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        let Some(frame) = self.frames.get(self.stage / 2) else {
            return Step::Done;
        };
        let erase = self.stage % 2 == 1;
        ctx.field.draw_frame(self.row, self.column, frame, erase);
        self.stage += 1;
        Step::Running
    }
}

/// Redraws a centred banner every tick and never finishes.
pub struct GameOver {
    frame: Rc<Frame>,
    announced: bool,
}

impl GameOver {
    pub fn new(frame: Rc<Frame>) -> Self {
        GameOver {
            frame,
            announced: false,
        }
    }
}

impl Behavior for GameOver {
    fn name(&self) -> &'static str {
        "game-over"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        if !self.announced {
            log::info!("game over");
            self.announced = true;
        }
        let (height, width) = ctx.field.dimensions();
        let row = height / 2 - self.frame.height() / 2;
        let column = width / 2 - self.frame.width() / 2;
        ctx.field.draw_frame(row, column, &self.frame, false);
        Step::Running
    }
}
