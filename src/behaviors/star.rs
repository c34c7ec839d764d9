/// Blinking stars.
///
/// Each star owns one cell and cycles through the blink phases forever. The
/// phase a star starts in and how long it holds its first phase are random,
/// so the sky never blinks in unison.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::Attr;
use crate::scheduler::{Behavior, Context, Step};

const SYMBOLS: &[char] = &['+', '*', '.', ':'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarPhase {
    Dim,
    Idle,
    Bright,
}

impl StarPhase {
    pub fn attr(self) -> Attr {
        match self {
            StarPhase::Dim => Attr::Dim,
            StarPhase::Idle => Attr::Normal,
            StarPhase::Bright => Attr::Bold,
        }
    }
}

/// (phase, hold in ticks)
pub const BLINK_CYCLE: [(StarPhase, u32); 4] = [
    (StarPhase::Dim, 20),
    (StarPhase::Idle, 3),
    (StarPhase::Bright, 5),
    (StarPhase::Idle, 3),
];

pub struct Star {
    row: i32,
    column: i32,
    symbol: char,
    phase: usize,
    initial_hold: u32,
    countdown: u32,
    started: bool,
}

impl Star {
    /// `offset` picks the starting entry of `BLINK_CYCLE`; the first phase is
    /// held for `initial_hold` ticks instead of its usual duration.
    pub fn new(row: i32, column: i32, symbol: char, offset: usize, initial_hold: u32) -> Self {
        Star {
            row,
            column,
            symbol,
            phase: offset % BLINK_CYCLE.len(),
            initial_hold,
            countdown: 0,
            started: false,
        }
    }

    pub fn phase(&self) -> StarPhase {
        BLINK_CYCLE[self.phase].0
    }

    fn show(&self, ctx: &mut Context<'_>) {
        ctx.field
            .put(self.row, self.column, self.symbol, self.phase().attr());
    }
}

impl Behavior for Star {
    fn name(&self) -> &'static str {
        "star"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        if !self.started {
            self.started = true;
            self.countdown = self.initial_hold;
            self.show(ctx);
        } else if self.countdown == 0 {
            self.phase = (self.phase + 1) % BLINK_CYCLE.len();
            self.countdown = BLINK_CYCLE[self.phase].1;
            self.show(ctx);
        }
        self.countdown = self.countdown.saturating_sub(1);
        Step::Running
    }
}

/// Scatter `count` stars over the interior of a `height` x `width` field.
///
/// Rows and columns come from independently shuffled sequences, cycled, so
/// stars spread out instead of clumping.
pub fn scatter_stars(height: i32, width: i32, count: usize, rng: &mut impl Rng) -> Vec<Star> {
    let mut rows: Vec<i32> = (1..height - 1).collect();
    let mut columns: Vec<i32> = (1..width - 1).collect();
    if rows.is_empty() || columns.is_empty() {
        return Vec::new();
    }
    rows.shuffle(rng);
    columns.shuffle(rng);

    rows.iter()
        .cycle()
        .zip(columns.iter().cycle())
        .take(count)
        .map(|(&row, &column)| {
            let symbol = *SYMBOLS.choose(rng).unwrap_or(&'*');
            let offset = rng.gen_range(0..BLINK_CYCLE.len());
            let initial_hold = rng.gen_range(2..=26);
            Star::new(row, column, symbol, offset, initial_hold)
        })
        .collect()
}
