/// In-game calendar: the shared year counter and the tables keyed on it.

use std::cell::Cell;
use std::rc::Rc;

/// First year of every run.
pub const START_YEAR: u32 = 1957;
/// First year in which garbage starts falling.
pub const GARBAGE_EPOCH: u32 = 1961;
/// Year from which the rocket may fire.
pub const PLASMA_GUN_YEAR: u32 = 2020;

const CAPTIONS: &[(u32, &str)] = &[
    (1957, "First Artificial Earth's Satellite"),
    (1961, "Gagarin is first human in Space!"),
    (1965, "Leonov was the first person in outer space!"),
    (1969, "Armstrong got on the moon!"),
    (1971, "First orbital space station Salute-1"),
    (1981, "Flight of the Shuttle Columbia"),
    (1998, "ISS start building"),
    (2004, "Opportunity arrived on Mars"),
    (2011, "Messenger launch to Mercury"),
    (2019, "Opportunity sent its last message"),
    (2020, "Take the plasma gun! Shoot the garbage!"),
];

/// Ticks between two garbage spawns in `year`, `None` before the garbage epoch.
pub fn garbage_delay_ticks(year: u32) -> Option<u32> {
    match year {
        y if y < GARBAGE_EPOCH => None,
        y if y < 1969 => Some(20),
        y if y < 1981 => Some(14),
        y if y < 1995 => Some(10),
        y if y < 2010 => Some(8),
        y if y < 2020 => Some(6),
        _ => Some(2),
    }
}

/// Historical caption for an exact year, empty when there is none.
pub fn caption(year: u32) -> &'static str {
    CAPTIONS
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, text)| *text)
        .unwrap_or("")
}

/// The shared, monotonically non-decreasing year counter.
///
/// Cloning hands out another handle to the same counter. Only `advance` moves
/// it, and only forward.
#[derive(Clone, Debug)]
pub struct EpochClock {
    year: Rc<Cell<u32>>,
}

impl EpochClock {
    pub fn new(start: u32) -> Self {
        EpochClock {
            year: Rc::new(Cell::new(start)),
        }
    }

    pub fn year(&self) -> u32 {
        self.year.get()
    }

    pub fn advance(&self) -> u32 {
        let next = self.year.get().saturating_add(1);
        self.year.set(next);
        next
    }
}

impl Default for EpochClock {
    fn default() -> Self {
        EpochClock::new(START_YEAR)
    }
}
