/// The in-game calendar: one behavior moves the year forward, another shows
/// it on the status line.

use crate::error::{GameError, Result};
use crate::scenario::{caption, EpochClock};
use crate::scheduler::{Behavior, Context, Step};

/// Advances the clock by one year every `ticks_per_year` ticks, forever.
pub struct YearTicker {
    clock: EpochClock,
    ticks_per_year: u32,
    countdown: u32,
}

impl YearTicker {
    pub fn new(clock: EpochClock, ticks_per_year: u32) -> Result<Self> {
        if ticks_per_year == 0 {
            return Err(GameError::InvalidConfig(
                "ticks_per_year must be positive".into(),
            ));
        }
        Ok(YearTicker {
            clock,
            ticks_per_year,
            countdown: ticks_per_year,
        })
    }
}

impl Behavior for YearTicker {
    fn name(&self) -> &'static str {
        "year-ticker"
    }

    fn step(&mut self, _ctx: &mut Context<'_>) -> Step {
        if self.countdown == 0 {
            let year = self.clock.advance();
            match caption(year) {
                "" => log::debug!("year {year}"),
                text => log::info!("year {year}: {text}"),
            }
            self.countdown = self.ticks_per_year;
        }
        self.countdown -= 1;
        Step::Running
    }
}

/// Shows `"<year> <caption>"` centred on the status line, refreshed every
/// `hold` ticks by erasing the old label and drawing the new one.
pub struct YearDisplay {
    clock: EpochClock,
    hold: u32,
    countdown: u32,
    shown: Option<(i32, String)>,
}

impl YearDisplay {
    pub fn new(clock: EpochClock, hold: u32) -> Result<Self> {
        if hold == 0 {
            return Err(GameError::InvalidConfig(
                "year label hold must be positive".into(),
            ));
        }
        Ok(YearDisplay {
            clock,
            hold,
            countdown: 0,
            shown: None,
        })
    }

    pub fn label(year: u32) -> String {
        format!("{} {}", year, caption(year))
    }
}

impl Behavior for YearDisplay {
    fn name(&self) -> &'static str {
        "year-display"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        if self.countdown == 0 {
            let (height, width) = ctx.status.dimensions();
            let row = height / 2;
            if let Some((column, text)) = self.shown.take() {
                ctx.status.draw_text(row, column, &text, true);
            }
            let text = Self::label(self.clock.year());
            let column = width / 2 - text.chars().count() as i32 / 2;
            ctx.status.draw_text(row, column, &text, false);
            self.shown = Some((column, text));
            self.countdown = self.hold;
        }
        self.countdown -= 1;
        Step::Running
    }
}
