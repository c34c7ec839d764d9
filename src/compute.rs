/// Pure movement and layout helpers.
///
/// Nothing in here touches the canvas or the registry; behaviors call these
/// with plain numbers, which keeps the arithmetic testable on its own.

// ── Rocket physics ───────────────────────────────────────────────────────────

/// Speed added per tick while a direction is held.
pub const ACCELERATION: f64 = 1.0;
/// Multiplier applied per tick with no input on an axis.
pub const FADING: f64 = 0.8;
/// Below this a fading speed snaps to rest.
const REST_THRESHOLD: f64 = 0.1;

/// Advance one axis of velocity by one tick of input.
///
/// Holding a direction accelerates, releasing fades toward zero, and
/// pressing the opposite direction decelerates one step at a time.
pub fn update_speed(speed: f64, direction: i32) -> f64 {
    if direction != 0 {
        return speed + direction.signum() as f64 * ACCELERATION;
    }
    let faded = speed * FADING;
    if faded.abs() < REST_THRESHOLD {
        0.0
    } else {
        faded
    }
}

/// Clamp one axis so a sprite of `sprite` cells stays inside a field of
/// `field` cells, one cell clear of the border on each side:
/// `[1, field - sprite - 1]`. A field too small for the sprite pins it to 1.
pub fn clamp_axis(position: f64, field: i32, sprite: i32) -> f64 {
    let upper = ((field - sprite - 1) as f64).max(1.0);
    position.max(1.0).min(upper)
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Number of stars covering `density` of the field, at least one.
pub fn star_count(height: i32, width: i32, density: f64) -> usize {
    let area = (height.max(0) * width.max(0)) as f64;
    ((area * density).round() as usize).max(1)
}

/// Top-left corner that centres a `height` x `width` block on (`row`, `column`).
pub fn centred_corner(row: f64, column: f64, height: i32, width: i32) -> (i32, i32) {
    (
        (row - height as f64 / 2.0).round() as i32,
        (column - width as f64 / 2.0).round() as i32,
    )
}
