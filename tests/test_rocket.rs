use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_garbage::behaviors::rocket::{launch, launch_position, Sprite};
use space_garbage::behaviors::{Animator, CrashFrames, Pilot, SpriteCell};
use space_garbage::canvas::Canvas;
use space_garbage::entities::{Control, Frame};
use space_garbage::obstacles::Obstacle;
use space_garbage::scenario::EpochClock;
use space_garbage::scheduler::{Scheduler, World};
use space_garbage::GameError;

// Field 20 x 40, sprite 2 x 3 → legal rows [1, 17], columns [1, 36].
const HEIGHT: u16 = 20;
const WIDTH: u16 = 40;

fn make_world() -> World {
    World::new(HEIGHT, WIDTH, StdRng::seed_from_u64(42))
}

fn rocket_frames() -> Vec<Rc<Frame>> {
    vec![
        Rc::new(Frame::new("rocket_1", "^^^\n###")),
        Rc::new(Frame::new("rocket_2", "^^^\n#=#")),
    ]
}

fn crash_frames() -> CrashFrames {
    CrashFrames {
        explosion: vec![
            Rc::new(Frame::new("explosion_1", "(*)")),
            Rc::new(Frame::new("explosion_2", " * ")),
        ],
        game_over: Rc::new(Frame::new("gameover", "GAME OVER")),
    }
}

/// Schedule animator then pilot, returning the shared sprite cell.
fn launch_at(scheduler: &mut Scheduler, row: f64, column: f64, clock: EpochClock) -> SpriteCell {
    let cell = SpriteCell::new();
    scheduler.spawn(Animator::new(rocket_frames(), 1, cell.clone()).unwrap());
    scheduler.spawn(Pilot::new(cell.clone(), row, column, clock, crash_frames()));
    cell
}

/// Top-left of the rocket on screen, found by its nose glyphs.
fn find_rocket(canvas: &Canvas) -> Option<(i32, i32)> {
    let (height, width) = canvas.dimensions();
    (0..height)
        .flat_map(|r| (0..width).map(move |c| (r, c)))
        .find(|&(r, c)| canvas.cell(r, c).map(|cell| cell.symbol) == Some('^'))
}

fn tick_with(scheduler: &mut Scheduler, world: &mut World, control: Control) {
    world.control = control;
    scheduler.tick(world);
}

// ── Start-up ──────────────────────────────────────────────────────────────────

#[test]
fn pilot_waits_for_the_first_frame() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    let cell = SpriteCell::new();
    // Pilot first: on tick one there is nothing to fly yet.
    scheduler.spawn(Pilot::new(cell.clone(), 10.0, 20.0, EpochClock::default(), crash_frames()));
    scheduler.spawn(Animator::new(rocket_frames(), 1, cell.clone()).unwrap());

    scheduler.tick(&mut world);
    assert_eq!(find_rocket(&world.field), None);
    assert!(cell.current().is_some());

    scheduler.tick(&mut world);
    assert_eq!(find_rocket(&world.field), Some((10, 20)));
}

#[test]
fn animator_cycles_frames() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    let cell = launch_at(&mut scheduler, 10.0, 20.0, EpochClock::default());

    let mut names = Vec::new();
    for _ in 0..4 {
        scheduler.tick(&mut world);
        names.push(cell.current().map(|f| f.name().to_string()).unwrap_or_default());
    }
    assert_eq!(names, vec!["rocket_1", "rocket_2", "rocket_1", "rocket_2"]);
}

#[test]
fn launch_position_sits_above_the_bottom_border() {
    let frames = rocket_frames();
    assert_eq!(launch_position(20, 40, &frames), (16.0, 20.0));
}

#[test]
fn animator_needs_frames() {
    assert!(matches!(
        Animator::new(Vec::new(), 1, SpriteCell::new()),
        Err(GameError::EmptyAsset { .. })
    ));

    let with_blank = vec![
        Rc::new(Frame::new("rocket_1", "^")),
        Rc::new(Frame::new("rocket_2", "")),
    ];
    assert!(matches!(
        Animator::new(with_blank, 1, SpriteCell::new()),
        Err(GameError::EmptyAsset { .. })
    ));
}

#[test]
fn animator_hold_must_be_positive() {
    assert!(matches!(
        Animator::new(rocket_frames(), 0, SpriteCell::new()),
        Err(GameError::InvalidConfig(_))
    ));
}

#[test]
fn launch_refuses_a_rocket_that_could_never_be_drawn() {
    let result = launch(
        Vec::new(),
        1,
        (10.0, 20.0),
        EpochClock::default(),
        crash_frames(),
    );
    assert!(matches!(result, Err(GameError::EmptyAsset { .. })));
}

#[test]
fn launch_pairs_animator_and_pilot_on_one_sprite() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    let (animator, pilot) = launch(
        rocket_frames(),
        1,
        (10.0, 20.0),
        EpochClock::default(),
        crash_frames(),
    )
    .unwrap();
    scheduler.spawn(animator);
    scheduler.spawn(pilot);

    scheduler.tick(&mut world);
    assert_eq!(find_rocket(&world.field), Some((10, 20)));
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn crash_marks_the_obstacle_and_hands_over_to_explosion_and_game_over() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    let cell = launch_at(&mut scheduler, 10.0, 20.0, EpochClock::default());
    let obstacle = world.obstacles.add(Obstacle::new(10.0, 20, 1, 1));

    let report = scheduler.tick(&mut world);

    assert!(world.obstacles.is_marked(obstacle));
    assert_eq!(report.spawned, 2);
    assert_eq!(scheduler.count("explosion"), 1);
    assert_eq!(scheduler.count("game-over"), 1);
    assert_eq!(scheduler.count("rocket-pilot"), 0);
    assert!(cell.is_stopped());
    assert_eq!(find_rocket(&world.field), None);

    // The animator notices the stop on its next resume and winds down.
    scheduler.tick(&mut world);
    assert_eq!(scheduler.count("rocket-animator"), 0);
    assert!(matches!(cell.get(), Sprite::Stopped));
    assert!(!cell.publish(Rc::clone(&rocket_frames()[0])));
    assert!(cell.current().is_none());
}

#[test]
fn obstacle_elsewhere_is_not_a_crash() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    launch_at(&mut scheduler, 10.0, 20.0, EpochClock::default());
    let obstacle = world.obstacles.add(Obstacle::new(2.0, 2, 2, 2));

    for _ in 0..5 {
        scheduler.tick(&mut world);
    }
    assert!(!world.obstacles.is_marked(obstacle));
    assert_eq!(scheduler.count("rocket-pilot"), 1);
    assert_eq!(scheduler.count("game-over"), 0);
}

#[test]
fn crash_marks_every_obstacle_under_the_sprite_once() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    launch_at(&mut scheduler, 10.0, 20.0, EpochClock::default());
    // one obstacle spans the whole sprite, one covers a single cell
    let wide = world.obstacles.add(Obstacle::new(10.0, 19, 2, 5));
    let small = world.obstacles.add(Obstacle::new(11.0, 21, 1, 1));
    let far = world.obstacles.add(Obstacle::new(2.0, 2, 1, 1));

    scheduler.tick(&mut world);
    assert!(world.obstacles.is_marked(wide));
    assert!(world.obstacles.is_marked(small));
    assert!(!world.obstacles.is_marked(far));
    assert_eq!(world.obstacles.mark_count(), 2);
    assert_eq!(scheduler.count("explosion"), 1);
}

#[test]
fn obstacle_under_any_cell_of_the_sprite_is_a_crash() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    launch_at(&mut scheduler, 10.0, 20.0, EpochClock::default());
    // bottom-right cell of the 2 x 3 sprite
    let obstacle = world.obstacles.add(Obstacle::new(11.0, 22, 1, 1));

    scheduler.tick(&mut world);
    assert!(world.obstacles.is_marked(obstacle));
    assert_eq!(scheduler.count("game-over"), 1);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn rocket_never_leaves_the_clamped_field() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    launch_at(&mut scheduler, 10.0, 20.0, EpochClock::default());

    let up_left = Control {
        rows: -1,
        columns: -1,
        fire: false,
    };
    for _ in 0..20 {
        tick_with(&mut scheduler, &mut world, up_left);
        let (row, column) = find_rocket(&world.field).unwrap();
        assert!((1..=17).contains(&row) && (1..=36).contains(&column));
    }
    assert_eq!(find_rocket(&world.field), Some((1, 1)));

    let down_right = Control {
        rows: 1,
        columns: 1,
        fire: false,
    };
    for _ in 0..30 {
        tick_with(&mut scheduler, &mut world, down_right);
        let (row, column) = find_rocket(&world.field).unwrap();
        assert!((1..=17).contains(&row) && (1..=36).contains(&column));
    }
    assert_eq!(find_rocket(&world.field), Some((17, 36)));
}

#[test]
fn blocked_axis_does_not_cancel_the_other() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    launch_at(&mut scheduler, 1.0, 20.0, EpochClock::default());

    tick_with(
        &mut scheduler,
        &mut world,
        Control {
            rows: -1,
            columns: 1,
            fire: false,
        },
    );
    assert_eq!(find_rocket(&world.field), Some((1, 21)));
}

#[test]
fn released_input_drifts_to_a_stop_without_reversing() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    launch_at(&mut scheduler, 10.0, 5.0, EpochClock::default());

    let right = Control {
        rows: 0,
        columns: 1,
        fire: false,
    };
    let mut columns = Vec::new();
    for _ in 0..3 {
        tick_with(&mut scheduler, &mut world, right);
        columns.push(find_rocket(&world.field).unwrap().1);
    }
    for _ in 0..20 {
        tick_with(&mut scheduler, &mut world, Control::default());
        columns.push(find_rocket(&world.field).unwrap().1);
    }

    assert_eq!(&columns[..3], &[6, 8, 11]);
    assert!(columns.windows(2).all(|w| w[0] <= w[1]), "{columns:?}");
    assert!(columns[3] > columns[2], "still drifting right after release");
    let n = columns.len();
    assert_eq!(columns[n - 1], columns[n - 2], "came to rest");
}

#[test]
fn rocket_redraws_over_stars_every_tick() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    launch_at(&mut scheduler, 10.0, 20.0, EpochClock::default());
    scheduler.tick(&mut world);

    world.field.put(10, 21, '.', space_garbage::entities::Attr::Dim);
    scheduler.tick(&mut world);
    assert_eq!(world.field.cell(10, 21).map(|c| c.symbol), Some('^'));
}

// ── Plasma gun ────────────────────────────────────────────────────────────────

#[test]
fn plasma_gun_needs_the_right_year() {
    let mut world = make_world();
    let mut scheduler = Scheduler::new();
    let clock = EpochClock::new(2019);
    launch_at(&mut scheduler, 10.0, 20.0, clock.clone());

    let fire = Control {
        rows: 0,
        columns: 0,
        fire: true,
    };
    tick_with(&mut scheduler, &mut world, fire);
    assert_eq!(scheduler.count("bullet"), 0);

    clock.advance();
    tick_with(&mut scheduler, &mut world, fire);
    assert_eq!(scheduler.count("bullet"), 1);

    // The shot appears one row above and two columns right of the rocket.
    scheduler.tick(&mut world);
    assert_eq!(world.field.cell(9, 22).map(|c| c.symbol), Some('*'));
}
