/// Plasma shots.
///
/// A shot flashes `*` then `O` at its muzzle, then flies in a straight line
/// until it leaves the field interior or runs into an obstacle. Hitting an
/// obstacle only marks it; the obstacle's owner does the exploding.

use crate::entities::{Attr, Point};
use crate::scheduler::{Behavior, Context, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Flash,
    Glow,
    Flying,
}

pub struct Bullet {
    row: f64,
    column: f64,
    row_speed: f64,
    column_speed: f64,
    stage: Stage,
    drawn: Option<Point>,
}

impl Bullet {
    pub fn new(row: f64, column: f64, row_speed: f64, column_speed: f64) -> Self {
        Bullet {
            row,
            column,
            row_speed,
            column_speed,
            stage: Stage::Flash,
            drawn: None,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.row, self.column)
    }

    fn cell(&self) -> Point {
        Point::new(self.row.round() as i32, self.column.round() as i32)
    }

    fn show(&mut self, ctx: &mut Context<'_>, symbol: char) {
        let at = self.cell();
        ctx.field.put(at.row, at.column, symbol, Attr::Normal);
        self.drawn = Some(at);
    }

    fn symbol(&self) -> char {
        if self.column_speed != 0.0 {
            '-'
        } else {
            '|'
        }
    }
}

impl Behavior for Bullet {
    fn name(&self) -> &'static str {
        "bullet"
    }

    fn step(&mut self, ctx: &mut Context<'_>) -> Step {
        if let Some(at) = self.drawn.take() {
            ctx.field.put(at.row, at.column, ' ', Attr::Normal);
        }

        match self.stage {
            Stage::Flash => {
                self.show(ctx, '*');
                self.stage = Stage::Glow;
                return Step::Running;
            }
            Stage::Glow => {
                self.show(ctx, 'O');
                self.stage = Stage::Flying;
                return Step::Running;
            }
            Stage::Flying => {}
        }

        self.row += self.row_speed;
        self.column += self.column_speed;

        let (height, width) = ctx.field.dimensions();
        let (max_row, max_column) = ((height - 1) as f64, (width - 1) as f64);
        if !(0.0 < self.row && self.row < max_row && 0.0 < self.column && self.column < max_column)
        {
            return Step::Done;
        }

        let hits = ctx.obstacles.hits(self.cell());
        if !hits.is_empty() {
            for id in hits {
                ctx.obstacles.mark(id);
            }
            log::debug!("bullet hit at ({:.1}, {:.1})", self.row, self.column);
            return Step::Done;
        }

        let symbol = self.symbol();
        self.show(ctx, symbol);
        Step::Running
    }
}
