/// Rendering layer. All terminal I/O lives here.
///
/// Behaviors draw into the world's canvases; this module only copies those
/// buffers to the terminal once per tick.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    QueueableCommand,
};
use space_garbage::canvas::{Canvas, Cell};
use space_garbage::entities::Attr;
use space_garbage::scheduler::World;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FIELD: Color = Color::White;
const C_STATUS: Color = Color::Yellow;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: the play field, then the status line below it.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let (field_height, _) = world.field.dimensions();

    out.queue(style::SetForegroundColor(C_FIELD))?;
    draw_canvas(out, &world.field, 0)?;

    out.queue(style::SetForegroundColor(C_STATUS))?;
    draw_canvas(out, &world.status, field_height as u16)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::SetAttribute(Attribute::Reset))?;
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── Canvas rows ───────────────────────────────────────────────────────────────

fn draw_canvas<W: Write>(out: &mut W, canvas: &Canvas, top: u16) -> std::io::Result<()> {
    for (i, row) in canvas.rows().enumerate() {
        out.queue(cursor::MoveTo(0, top + i as u16))?;
        for (attr, text) in runs(row) {
            out.queue(style::SetAttribute(attribute(attr)))?;
            out.queue(Print(text))?;
        }
    }
    Ok(())
}

/// Split a row into maximal runs sharing one attribute.
fn runs(row: &[Cell]) -> Vec<(Attr, String)> {
    let mut runs: Vec<(Attr, String)> = Vec::new();
    for cell in row {
        match runs.last_mut() {
            Some((attr, text)) if *attr == cell.attr => text.push(cell.symbol),
            _ => runs.push((cell.attr, cell.symbol.to_string())),
        }
    }
    runs
}

fn attribute(attr: Attr) -> Attribute {
    match attr {
        Attr::Normal => Attribute::NormalIntensity,
        Attr::Dim => Attribute::Dim,
        Attr::Bold => Attribute::Bold,
    }
}
