/// The player's rocket.
///
/// Two behaviors cooperate through a `SpriteCell`: the `Animator` flips the
/// rocket's frames into the cell, the `Pilot` reads the cell to draw, steer,
/// shoot and detect crashes. When the pilot crashes it stops the cell and the
/// animator winds down on its next resume.

use std::cell::RefCell;
use std::rc::Rc;

use crate::behaviors::bullet::Bullet;
use crate::behaviors::explosion::{Explosion, GameOver};
use crate::compute::{clamp_axis, update_speed};
use crate::entities::{Frame, Point};
use crate::error::{GameError, Result};
use crate::obstacles::ObstacleId;
use crate::scenario::{EpochClock, PLASMA_GUN_YEAR};
use crate::scheduler::{Behavior, Context, Step};

/// Rows per tick of a rocket shot, upward.
pub const BULLET_SPEED: f64 = -2.0;

// ── Shared sprite slot ────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub enum Sprite {
    /// Nothing published yet.
    #[default]
    Pending,
    Showing(Rc<Frame>),
    /// The rocket is gone; no more frames will be published.
    Stopped,
}

/// The rocket's current frame, shared between animator and pilot.
#[derive(Clone, Debug, Default)]
pub struct SpriteCell {
    slot: Rc<RefCell<Sprite>>,
}

impl SpriteCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, and leaves the cell alone, once it has been stopped.
    pub fn publish(&self, frame: Rc<Frame>) -> bool {
        let mut slot = self.slot.borrow_mut();
        if matches!(*slot, Sprite::Stopped) {
            return false;
        }
        *slot = Sprite::Showing(frame);
        true
    }

    pub fn get(&self) -> Sprite {
        self.slot.borrow().clone()
    }

    pub fn current(&self) -> Option<Rc<Frame>> {
        match &*self.slot.borrow() {
            Sprite::Showing(frame) => Some(Rc::clone(frame)),
            _ => None,
        }
    }

    pub fn stop(&self) {
        *self.slot.borrow_mut() = Sprite::Stopped;
    }

    pub fn is_stopped(&self) -> bool {
        matches!(*self.slot.borrow(), Sprite::Stopped)
    }
}

// ── Animator ──────────────────────────────────────────────────────────────────

pub struct Animator {
    frames: Vec<Rc<Frame>>,
    hold: u32,
    next: usize,
    countdown: u32,
    cell: SpriteCell,
    published: u64,
}

impl Animator {
    /// Each frame is held for `hold` ticks. Needs at least one visible
    /// frame and a positive hold.
    pub fn new(frames: Vec<Rc<Frame>>, hold: u32, cell: SpriteCell) -> Result<Self> {
        if frames.is_empty() || frames.iter().any(|f| f.is_empty()) {
            return Err(GameError::EmptyAsset {
                pattern: "rocket".into(),
            });
        }
        if hold == 0 {
            return Err(GameError::InvalidConfig(
                "rocket frame hold must be at least one tick".into(),
            ));
        }
        Ok(Animator {
            frames,
            hold,
            next: 0,
            countdown: 0,
            cell,
            published: 0,
        })
    }

    /// Frames published so far.
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl Behavior for Animator {
    fn name(&self) -> &'static str {
        "rocket-animator"
    }

    fn step(&mut self, _ctx: &mut Context<'_>) -> Step {
        if self.cell.is_stopped() {
            return Step::Done;
        }
        if self.countdown == 0 {
            let frame = Rc::clone(&self.frames[self.next]);
            self.cell.publish(frame);
            self.published += 1;
            self.next = (self.next + 1) % self.frames.len();
            self.countdown = self.hold;
        }
        self.countdown -= 1;
        Step::Running
    }
}

// ── Pilot ─────────────────────────────────────────────────────────────────────

/// Frames the pilot hands to the behaviors it spawns on a crash.
#[derive(Clone, Debug)]
pub struct CrashFrames {
    pub explosion: Vec<Rc<Frame>>,
    pub game_over: Rc<Frame>,
}

pub struct Pilot {
    cell: SpriteCell,
    row: f64,
    column: f64,
    row_speed: f64,
    column_speed: f64,
    drawn: Option<(i32, i32, Rc<Frame>)>,
    clock: EpochClock,
    crash: CrashFrames,
}

impl Pilot {
    pub fn new(cell: SpriteCell, row: f64, column: f64, clock: EpochClock, crash: CrashFrames) -> Self {
        Pilot {
            cell,
            row,
            column,
            row_speed: 0.0,
            column_speed: 0.0,
            drawn: None,
            clock,
            crash,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.row, self.column)
    }

    pub fn speed(&self) -> (f64, f64) {
        (self.row_speed, self.column_speed)
    }

    fn erase(&mut self, ctx: &mut Context<'_>) {
        if let Some((row, column, frame)) = self.drawn.take() {
            ctx.field.draw_frame(row, column, &frame, true);
        }
    }

    fn draw(&mut self, ctx: &mut Context<'_>, frame: Rc<Frame>) {
        let (row, column) = (self.row.round() as i32, self.column.round() as i32);
        ctx.field.draw_frame(row, column, &frame, false);
        self.drawn = Some((row, column, frame));
    }

    /// Obstacles under any cell of the rocket's bounding box.
    fn collisions(&self, ctx: &Context<'_>, frame: &Frame) -> Vec<ObstacleId> {
        let (top, left) = (self.row.round() as i32, self.column.round() as i32);
        let cells: Vec<Point> = (top..top + frame.height())
            .flat_map(|row| (left..left + frame.width()).map(move |column| Point::new(row, column)))
            .collect();
        if !cells.iter().any(|&point| ctx.obstacles.overlaps(point)) {
            return Vec::new();
        }
        ctx.obstacles.hits_any(&cells)
    }

    fn crash_into(&mut self, ctx: &mut Context<'_>, frame: &Frame, hits: Vec<ObstacleId>) {
        for id in hits {
            ctx.obstacles.mark(id);
        }
        self.erase(ctx);

        let centre_row = self.row + frame.height() as f64 / 2.0;
        let centre_column = self.column + frame.width() as f64 / 2.0;
        ctx.spawn(Explosion::new(
            centre_row,
            centre_column,
            self.crash.explosion.clone(),
        ));
        ctx.spawn(GameOver::new(Rc::clone(&self.crash.game_over)));
        self.cell.stop();

        log::info!(
            "rocket crashed at ({:.1}, {:.1}) in {}",
            self.row,
            self.column,
            self.clock.year()
        );
    }

    /// Velocity, clamping and the plasma gun for one tick of input.
    fn fly(&mut self, ctx: &mut Context<'_>, frame: &Frame) {
        let control = ctx.read_control();
        let (height, width) = ctx.field.dimensions();

        self.row_speed = update_speed(self.row_speed, control.rows);
        self.column_speed = update_speed(self.column_speed, control.columns);

        // Each axis clamps on its own, so a diagonal move along a wall still
        // slides. Hitting a wall kills the speed on that axis.
        let row = self.row + self.row_speed;
        self.row = clamp_axis(row, height, frame.height());
        if self.row != row {
            self.row_speed = 0.0;
        }
        let column = self.column + self.column_speed;
        self.column = clamp_axis(column, width, frame.width());
        if self.column != column {
            self.column_speed = 0.0;
        }

        if control.fire && self.clock.year() >= PLASMA_GUN_YEAR {
            ctx.spawn(Bullet::new(
                self.row - 1.0,
                self.column + 2.0,
                BULLET_SPEED,
                0.0,
            ));
        }
    }
}

impl Behavior for Pilot {
    fn name(&self) -> &'static str {
        "rocket-pilot"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        let frame = match self.cell.get() {
            Sprite::Pending => return Step::Running,
            Sprite::Stopped => {
                self.erase(ctx);
                return Step::Done;
            }
            Sprite::Showing(frame) => frame,
        };

        let hits = self.collisions(ctx, &frame);
        if !hits.is_empty() {
            self.crash_into(ctx, &frame, hits);
            return Step::Done;
        }

        // Stars may have drawn over the old position, so erase and redraw
        // every tick even when the rocket does not move.
        self.erase(ctx);
        self.fly(ctx, &frame);
        self.draw(ctx, frame);
        Step::Running
    }
}

// ── Launch ────────────────────────────────────────────────────────────────────

/// Start position: centred horizontally, just above the bottom border.
pub fn launch_position(field_height: i32, field_width: i32, frames: &[Rc<Frame>]) -> (f64, f64) {
    let tallest = frames.iter().map(|f| f.height()).max().unwrap_or(0);
    (
        (field_height - (2 + tallest)).max(1) as f64,
        (field_width / 2) as f64,
    )
}

/// Build the animator/pilot pair for one rocket. The animator must be
/// scheduled before the pilot so a frame is ready on the first tick.
pub fn launch(
    frames: Vec<Rc<Frame>>,
    frame_hold: u32,
    position: (f64, f64),
    clock: EpochClock,
    crash: CrashFrames,
) -> Result<(Animator, Pilot)> {
    let cell = SpriteCell::new();
    let animator = Animator::new(frames, frame_hold, cell.clone())?;
    let pilot = Pilot::new(cell, position.0, position.1, clock, crash);
    Ok((animator, pilot))
}
