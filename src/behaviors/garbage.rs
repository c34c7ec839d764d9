/// Falling space garbage and the filler that keeps it coming.

use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::behaviors::explosion::Explosion;
use crate::entities::Frame;
use crate::error::{GameError, Result};
use crate::obstacles::{Obstacle, ObstacleId};
use crate::scenario::{garbage_delay_ticks, EpochClock};
use crate::scheduler::{Behavior, Context, Step};

// ── A single piece ────────────────────────────────────────────────────────────

/// Falls straight down at a fractional speed, owning one obstacle.
///
/// The obstacle is registered on the first step and always tracks the row
/// currently on screen. A piece leaves either by falling past the bottom
/// edge or by finding its obstacle marked, in which case it explodes. Either
/// way it removes its obstacle and redraws the field border.
pub struct Garbage {
    frame: Rc<Frame>,
    column: i32,
    row: f64,
    speed: f64,
    obstacle: Option<ObstacleId>,
    drawn: Option<f64>,
    explosion: Vec<Rc<Frame>>,
}

impl Garbage {
    /// `speed` is rows per tick and must be positive, otherwise the piece
    /// would never leave the field.
    pub fn new(frame: Rc<Frame>, column: i32, speed: f64, explosion: Vec<Rc<Frame>>) -> Result<Self> {
        if frame.is_empty() {
            return Err(GameError::EmptyAsset {
                pattern: frame.name().to_string(),
            });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "garbage speed must be positive, got {speed}"
            )));
        }
        Ok(Garbage {
            frame,
            column,
            row: 0.0,
            speed,
            obstacle: None,
            drawn: None,
            explosion,
        })
    }

    /// Row the next draw will use.
    pub fn row(&self) -> f64 {
        self.row
    }

    pub fn obstacle(&self) -> Option<ObstacleId> {
        self.obstacle
    }

    fn register(&mut self, ctx: &mut Context<'_>) -> ObstacleId {
        if let Some(id) = self.obstacle {
            return id;
        }
        let (_, width) = ctx.field.dimensions();
        self.column = self.column.clamp(0, (width - 1).max(0));
        let id = ctx.obstacles.add(Obstacle::new(
            self.row,
            self.column,
            self.frame.height(),
            self.frame.width(),
        ));
        self.obstacle = Some(id);
        id
    }

    fn paint(&self, ctx: &mut Context<'_>, row: f64, negative: bool) {
        ctx.field
            .draw_frame(row.round() as i32, self.column, &self.frame, negative);
    }

    fn finish(&mut self, ctx: &mut Context<'_>, id: ObstacleId) -> Step {
        ctx.obstacles.remove(id);
        ctx.field.draw_border();
        Step::Done
    }
}

impl Behavior for Garbage {
    fn name(&self) -> &'static str {
        "garbage"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        let id = self.register(ctx);

        let last = self.drawn.take();
        if let Some(row) = last {
            self.paint(ctx, row, true);
        }

        if ctx.obstacles.take_mark(id) {
            let row = last.unwrap_or(self.row);
            let centre_row = row + self.frame.height() as f64 / 2.0;
            let centre_column = self.column as f64 + self.frame.width() as f64 / 2.0;
            ctx.spawn(Explosion::new(
                centre_row,
                centre_column,
                self.explosion.clone(),
            ));
            log::debug!("garbage {} destroyed at row {:.1}", self.frame.name(), row);
            return self.finish(ctx, id);
        }

        let row = self.row;
        self.paint(ctx, row, false);
        self.drawn = Some(row);
        if let Some(obstacle) = ctx.obstacles.get_mut(id) {
            obstacle.row = row;
        }

        self.row += self.speed;
        let (height, _) = ctx.field.dimensions();
        if self.row >= height as f64 {
            self.paint(ctx, row, true);
            self.drawn = None;
            return self.finish(ctx, id);
        }
        Step::Running
    }
}

// ── Filler ────────────────────────────────────────────────────────────────────

/// Idles until the garbage epoch, then spawns a random piece every
/// `garbage_delay_ticks(year)` ticks, re-reading the year each time.
pub struct GarbageFiller {
    frames: Vec<Rc<Frame>>,
    explosion: Vec<Rc<Frame>>,
    clock: EpochClock,
    countdown: u32,
    spawned: u64,
}

impl GarbageFiller {
    pub fn new(frames: Vec<Rc<Frame>>, explosion: Vec<Rc<Frame>>, clock: EpochClock) -> Result<Self> {
        if frames.is_empty() {
            return Err(GameError::EmptyAsset {
                pattern: "garbage".into(),
            });
        }
        Ok(GarbageFiller {
            frames,
            explosion,
            clock,
            countdown: 0,
            spawned: 0,
        })
    }

    /// Pieces spawned so far.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    fn pick(&self, ctx: &mut Context<'_>) -> Option<Garbage> {
        let frame = Rc::clone(self.frames.choose(&mut *ctx.rng)?);
        let (_, width) = ctx.field.dimensions();
        let rightmost = (width - 1 - frame.width()).max(1);
        let column = ctx.rng.gen_range(1..=rightmost);
        let speed = ctx.rng.gen_range(1..=4) as f64 / 10.0;
        match Garbage::new(frame, column, speed, self.explosion.clone()) {
            Ok(garbage) => Some(garbage),
            Err(e) => {
                log::warn!("skipping garbage: {e}");
                None
            }
        }
    }
}

impl Behavior for GarbageFiller {
    fn name(&self) -> &'static str {
        "garbage-filler"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        if self.countdown > 0 {
            self.countdown -= 1;
            return Step::Running;
        }
        let Some(delay) = garbage_delay_ticks(self.clock.year()) else {
            return Step::Running;
        };
        if let Some(garbage) = self.pick(ctx) {
            ctx.spawn(garbage);
            self.spawned += 1;
        }
        self.countdown = delay.max(1) - 1;
        Step::Running
    }
}
