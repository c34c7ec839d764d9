//! Entity behaviors driven by the scheduler.

pub mod bullet;
pub mod explosion;
pub mod garbage;
pub mod overlay;
pub mod rocket;
pub mod star;
pub mod years;

pub use bullet::Bullet;
pub use explosion::{Explosion, GameOver};
pub use garbage::{Garbage, GarbageFiller};
pub use overlay::ObstacleOverlay;
pub use rocket::{Animator, CrashFrames, Pilot, SpriteCell};
pub use star::Star;
pub use years::{YearDisplay, YearTicker};
