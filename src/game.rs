/// Start-up wiring: builds the world and the initial behavior list.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::FrameSet;
use crate::behaviors::rocket::{self, CrashFrames};
use crate::behaviors::star::scatter_stars;
use crate::behaviors::{Bullet, GarbageFiller, ObstacleOverlay, YearDisplay, YearTicker};
use crate::compute::star_count;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::scenario::EpochClock;
use crate::scheduler::{Scheduler, World};

/// Rows per tick of the opening shot.
const OPENING_SHOT_SPEED: f64 = -0.3;

pub struct Game {
    pub scheduler: Scheduler,
    pub world: World,
    pub clock: EpochClock,
}

impl Game {
    /// Lay out a terminal of `rows` x `columns`: the play field takes every
    /// row but the last, which is the status line.
    pub fn new(config: &GameConfig, frames: &FrameSet, rows: u16, columns: u16) -> Result<Self> {
        config.validate()?;

        let field_height = rows.saturating_sub(1);
        let tallest = frames.rocket.iter().map(|f| f.height()).max().unwrap_or(0);
        let widest = frames.rocket.iter().map(|f| f.width()).max().unwrap_or(0);
        if (field_height as i32) < tallest + 3 || (columns as i32) < widest + 3 {
            return Err(GameError::InvalidConfig(format!(
                "terminal {columns}x{rows} is too small for the rocket"
            )));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = World::new(field_height, columns, rng);
        let clock = EpochClock::new(config.start_year);
        let mut scheduler = Scheduler::new();

        scheduler.spawn(YearTicker::new(clock.clone(), config.ticks_per_year)?);
        scheduler.spawn(YearDisplay::new(clock.clone(), config.ticks_per_year)?);

        let (height, width) = world.field.dimensions();
        let count = star_count(height, width, config.star_density);
        for star in scatter_stars(height, width, count, &mut world.rng) {
            scheduler.spawn(star);
        }

        let crash = CrashFrames {
            explosion: frames.explosion.clone(),
            game_over: Rc::clone(&frames.game_over),
        };
        let position = rocket::launch_position(height, width, &frames.rocket);
        let (animator, pilot) = rocket::launch(
            frames.rocket.clone(),
            config.rocket_frame_ticks,
            position,
            clock.clone(),
            crash,
        )?;
        scheduler.spawn(animator);
        scheduler.spawn(pilot);

        scheduler.spawn(GarbageFiller::new(
            frames.garbage.clone(),
            frames.explosion.clone(),
            clock.clone(),
        )?);

        if config.show_obstacles {
            scheduler.spawn(ObstacleOverlay::new());
        }
        if config.opening_shot {
            scheduler.spawn(Bullet::new(
                (height / 2) as f64,
                (width / 2) as f64,
                OPENING_SHOT_SPEED,
                0.0,
            ));
        }

        log::info!(
            "field {}x{}, {} stars, {} behaviors, starting in {}",
            width,
            height,
            count,
            scheduler.len(),
            clock.year()
        );

        Ok(Game {
            scheduler,
            world,
            clock,
        })
    }
}
