/// Cooperative tick scheduler.
///
/// Every live behavior is resumed exactly once per tick, in list order. A
/// behavior does a bounded amount of work and returns; multi-tick waits are
/// countdowns inside the behavior. Behaviors spawned during a tick join the
/// list after the pass and are first resumed on the next tick.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;

use crate::canvas::Canvas;
use crate::entities::Control;
use crate::error::Result;
use crate::obstacles::ObstacleRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Running,
    Done,
}

pub trait Behavior {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Run until the next yield point.
    fn step(&mut self, ctx: &mut Context<'_>) -> Step;
}

// ── Shared state ──────────────────────────────────────────────────────────────

/// Everything behaviors share, owned by the game loop and lent to each
/// behavior for the duration of its step.
pub struct World {
    /// Play field, bordered.
    pub field: Canvas,
    /// One-line status bar under the field.
    pub status: Canvas,
    pub obstacles: ObstacleRegistry,
    /// Input for the current tick, consumed by whoever reads it first.
    pub control: Control,
    pub rng: StdRng,
}

impl World {
    pub fn new(field_height: u16, field_width: u16, rng: StdRng) -> Self {
        let mut field = Canvas::new(field_height, field_width);
        field.draw_border();
        World {
            field,
            status: Canvas::new(1, field_width),
            obstacles: ObstacleRegistry::new(),
            control: Control::default(),
            rng,
        }
    }
}

/// A behavior's view of the world during one step.
pub struct Context<'a> {
    pub field: &'a mut Canvas,
    pub status: &'a mut Canvas,
    pub obstacles: &'a mut ObstacleRegistry,
    pub rng: &'a mut StdRng,
    control: &'a mut Control,
    spawned: &'a mut Vec<Box<dyn Behavior>>,
}

impl<'a> Context<'a> {
    /// Non-blocking: returns the pending input and clears it, so a second
    /// read in the same tick sees no input.
    pub fn read_control(&mut self) -> Control {
        std::mem::take(&mut *self.control)
    }

    /// Queue a new behavior. It starts running on the next tick.
    pub fn spawn<B: Behavior + 'static>(&mut self, behavior: B) {
        log::debug!("spawn {}", behavior.name());
        self.spawned.push(Box::new(behavior));
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub resumed: usize,
    pub completed: usize,
    pub spawned: usize,
}

#[derive(Default)]
pub struct Scheduler {
    live: Vec<Box<dyn Behavior>>,
    ticks: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<B: Behavior + 'static>(&mut self, behavior: B) {
        self.live.push(Box::new(behavior));
    }

    pub fn spawn_boxed(&mut self, behavior: Box<dyn Behavior>) {
        self.live.push(behavior);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Names of the live behaviors, in resume order.
    pub fn names(&self) -> Vec<&'static str> {
        self.live.iter().map(|b| b.name()).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.live.iter().filter(|b| b.name() == name).count()
    }

    /// One full pass: resume, prune finished, admit newly spawned.
    pub fn tick(&mut self, world: &mut World) -> TickReport {
        self.ticks += 1;
        let mut spawned: Vec<Box<dyn Behavior>> = Vec::new();
        let mut finished = vec![false; self.live.len()];

        for (i, behavior) in self.live.iter_mut().enumerate() {
            let mut ctx = Context {
                field: &mut world.field,
                status: &mut world.status,
                obstacles: &mut world.obstacles,
                rng: &mut world.rng,
                control: &mut world.control,
                spawned: &mut spawned,
            };
            if behavior.step(&mut ctx) == Step::Done {
                log::debug!("{} finished on tick {}", behavior.name(), self.ticks);
                finished[i] = true;
            }
        }

        let report = TickReport {
            resumed: finished.len(),
            completed: finished.iter().filter(|&&f| f).count(),
            spawned: spawned.len(),
        };

        let mut flags = finished.into_iter();
        self.live.retain(|_| !flags.next().unwrap_or(false));
        self.live.append(&mut spawned);

        log::trace!(
            "tick {}: resumed {}, completed {}, spawned {}",
            self.ticks,
            report.resumed,
            report.completed,
            report.spawned
        );
        report
    }

    /// Tick until no behavior is left.
    ///
    /// `after_tick` runs once per pass (render, input) and may stop the loop
    /// with an error. Pacing is a fixed sleep; a slow tick makes the loop run
    /// behind rather than skip.
    pub fn run<F>(&mut self, world: &mut World, interval: Duration, mut after_tick: F) -> Result<()>
    where
        F: FnMut(&mut World) -> Result<()>,
    {
        log::info!("scheduler started with {} behaviors", self.live.len());
        while !self.live.is_empty() {
            self.tick(world);
            after_tick(world)?;
            thread::sleep(interval);
        }
        log::info!("scheduler stopped after {} ticks", self.ticks);
        Ok(())
    }
}
