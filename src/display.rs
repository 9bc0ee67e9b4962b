//! Rendering layer. All terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! app.  No game logic is performed; this module only translates the
//! scene's draw list (or the menu layout) into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::app::{App, AppState, MenuItem, MenuLayout};
use space_invaders::entities::{PowerUpKind, Rect, SessionState};
use space_invaders::scene::{self, DrawCommand, Viewport};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_PROJECTILE: Color = Color::Red;
const C_RAPID: Color = Color::Cyan;
const C_SHIELD: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::White;
const C_START: Color = Color::Green;
const C_EXIT: Color = Color::Red;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever state the app is in.
pub fn render<W: Write>(out: &mut W, app: &App, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match app.state() {
        AppState::Playing => {
            if let Some(session) = app.session() {
                draw_session(out, session, view)?;
            }
        }
        AppState::Menu | AppState::GameOver => {
            if let Some(layout) = app.menu() {
                draw_menu(out, &layout, app.session(), view)?;
            }
        }
        AppState::Exit => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_session<W: Write>(
    out: &mut W,
    session: &SessionState,
    view: &Viewport,
) -> std::io::Result<()> {
    for command in scene::compose(session) {
        match command {
            DrawCommand::Background(_) => draw_border(out, view)?,
            DrawCommand::Player(bounds) => draw_player(out, &bounds, view)?,
            DrawCommand::Projectile(bounds) => draw_projectile(out, &bounds, view)?,
            DrawCommand::Enemy(bounds) => draw_enemy(out, &bounds, view)?,
            DrawCommand::PowerUp { bounds, kind } => draw_power_up(out, &bounds, kind, view)?,
            DrawCommand::Text { x, y, text } => {
                let (col, row) = view.to_cell(x, y);
                out.queue(cursor::MoveTo(col.max(1), row.max(1)))?;
                out.queue(style::SetForegroundColor(C_SCORE))?;
                out.queue(Print(text))?;
            }
        }
    }

    if session.rapid_fire_active {
        let tag = format!("[! RAPID {:>2}s]", session.rapid_fire_remaining.ceil() as u32);
        let col = view.cols.saturating_sub(tag.chars().count() as u16 + 2);
        out.queue(cursor::MoveTo(col, 1))?;
        out.queue(style::SetForegroundColor(C_RAPID))?;
        out.queue(Print(tag))?;
    }

    draw_controls_hint(out, view)
}

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 1..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Print `glyph` centred inside the cells covered by `bounds`.
fn draw_centered<W: Write>(
    out: &mut W,
    bounds: &Rect,
    glyph: &str,
    color: Color,
    view: &Viewport,
) -> std::io::Result<()> {
    let span = view.span(bounds);
    let len = glyph.chars().count() as u16;
    let col = span.col + span.width.saturating_sub(len) / 2;
    out.queue(cursor::MoveTo(col, span.row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, bounds: &Rect, view: &Viewport) -> std::io::Result<()> {
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let span = view.span(bounds);
    draw_centered(out, bounds, "▲", C_PLAYER, view)?;
    let wing_row = span.row + 1;
    if wing_row < view.rows.saturating_sub(2) {
        let col = (span.col + span.width / 2).saturating_sub(1).max(1);
        out.queue(cursor::MoveTo(col, wing_row))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, bounds: &Rect, view: &Viewport) -> std::io::Result<()> {
    //   «▼»    ← swept-back wings
    //   ╚═╝    ← engine block, when the sprite is two cells tall
    let span = view.span(bounds);
    draw_centered(out, bounds, "«▼»", C_ENEMY, view)?;
    if span.height > 1 && span.row + 1 < view.rows.saturating_sub(2) {
        let col = span.col + span.width.saturating_sub(3) / 2;
        out.queue(cursor::MoveTo(col, span.row + 1))?;
        out.queue(Print("╚═╝"))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, bounds: &Rect, view: &Viewport) -> std::io::Result<()> {
    draw_centered(out, bounds, "║", C_PROJECTILE, view)
}

/// Symbols:
///   !  (cyan): RapidFire
///   ♦  (blue): Shield
fn draw_power_up<W: Write>(
    out: &mut W,
    bounds: &Rect,
    kind: PowerUpKind,
    view: &Viewport,
) -> std::io::Result<()> {
    match kind {
        PowerUpKind::RapidFire => draw_centered(out, bounds, "!", C_RAPID, view),
        PowerUpKind::Shield => draw_centered(out, bounds, "♦", C_SHIELD, view),
    }
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_menu_item<W: Write>(
    out: &mut W,
    item: &MenuItem,
    color: Color,
    view: &Viewport,
) -> std::io::Result<()> {
    draw_centered(out, &item.bounds, item.label, color, view)
}

fn draw_menu<W: Write>(
    out: &mut W,
    layout: &MenuLayout,
    last_session: Option<&SessionState>,
    view: &Viewport,
) -> std::io::Result<()> {
    draw_menu_item(out, &layout.title, C_TITLE, view)?;
    draw_menu_item(out, &layout.start, C_START, view)?;
    draw_menu_item(out, &layout.exit, C_EXIT, view)?;

    if let Some(session) = last_session {
        let line = format!("Final {}", scene::score_text(session.score));
        let (_, row) = view.to_cell(0.0, layout.exit.bounds.y + layout.exit.bounds.h);
        let col = (view.cols / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row + 1))?;
        out.queue(style::SetForegroundColor(C_SCORE))?;
        out.queue(Print(line))?;
    }

    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Click an option   ENTER : Start   Q / ESC : Quit"))?;
    Ok(())
}
