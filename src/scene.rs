//! Turns a session into an ordered draw list.
//!
//! Commands come out back-to-front: background, player, projectiles,
//! enemies, power-ups, then the score line.  A front-end only has to paint
//! them in order.

use crate::entities::{PowerUpKind, Rect, SessionState};

/// Where the score line is anchored, in world units.
pub const SCORE_ANCHOR: (f32, f32) = (10.0, 10.0);

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Background(Rect),
    Player(Rect),
    Projectile(Rect),
    Enemy(Rect),
    PowerUp { bounds: Rect, kind: PowerUpKind },
    Text { x: f32, y: f32, text: String },
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

/// Draw list for one frame of play.
pub fn compose(state: &SessionState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        3 + state.projectiles.len() + state.enemies.len() + state.power_ups.len(),
    );

    commands.push(DrawCommand::Background(state.field()));
    commands.push(DrawCommand::Player(state.player.bounds()));
    commands.extend(
        state
            .projectiles
            .iter()
            .map(|p| DrawCommand::Projectile(p.bounds())),
    );
    commands.extend(state.enemies.iter().map(|e| DrawCommand::Enemy(e.bounds())));
    commands.extend(state.power_ups.iter().map(|p| DrawCommand::PowerUp {
        bounds: p.bounds(),
        kind: p.kind,
    }));

    let (x, y) = SCORE_ANCHOR;
    commands.push(DrawCommand::Text {
        x,
        y,
        text: score_text(state.score),
    });

    commands
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the world-unit play field onto a grid of terminal cells and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_w: f32,
    pub world_h: f32,
}

/// A rectangle snapped to whole cells.  Never narrower or shorter than one
/// cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_w: f32, world_h: f32) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
            world_w,
            world_h,
        }
    }

    fn cell_w(&self) -> f32 {
        self.world_w / self.cols as f32
    }

    fn cell_h(&self) -> f32 {
        self.world_h / self.rows as f32
    }

    /// The cell containing a world point, clamped onto the grid.
    pub fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = (x / self.cell_w()).floor().clamp(0.0, (self.cols - 1) as f32);
        let row = (y / self.cell_h()).floor().clamp(0.0, (self.rows - 1) as f32);
        (col as u16, row as u16)
    }

    /// World coordinates of a cell's centre.
    pub fn to_world(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.cell_w(),
            (row as f32 + 0.5) * self.cell_h(),
        )
    }

    pub fn span(&self, rect: &Rect) -> CellSpan {
        let (col, row) = self.to_cell(rect.x, rect.y);
        let width = (rect.w / self.cell_w()).round().max(1.0) as u16;
        let height = (rect.h / self.cell_h()).round().max(1.0) as u16;
        CellSpan {
            col,
            row,
            width: width.min(self.cols - col),
            height: height.min(self.rows - row),
        }
    }
}
