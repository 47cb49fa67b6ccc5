/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session state.  No game logic is performed; this module only translates
/// state into terminal commands.  The 800×600 simulation space is scaled
/// onto whatever cell grid the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use dodge_arena::entities::{
    Boss, DamageNumber, Item, ItemKind, Particle, ParticleTint, Player, PlayerClass, Projectile,
    ProjectileKind,
};
use dodge_arena::geometry::{ARENA_H, ARENA_W};
use dodge_arena::session::{Difficulty, GameMode, Phase, SessionState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_HIT: Color = Color::Red;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Green;
const C_HUD_HP_LOW: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_WARRIOR: Color = Color::Green;
const C_ROGUE: Color = Color::Cyan;
const C_MAGE: Color = Color::Magenta;
const C_PLAYER_DASH: Color = Color::White;
const C_BOSS_BODY: Color = Color::DarkRed;
const C_BOSS_WEAK: Color = Color::Yellow;
const C_PROJ_STRAIGHT: Color = Color::Red;
const C_PROJ_ZIGZAG: Color = Color::DarkYellow;
const C_PROJ_SPIRAL: Color = Color::Magenta;
const C_PROJ_PLAYER: Color = Color::Cyan;
const C_ITEM_HEART: Color = Color::Magenta;
const C_ITEM_SHIELD: Color = Color::Cyan;
const C_ITEM_ORB: Color = Color::DarkMagenta;
const C_ITEM_BOMB: Color = Color::DarkGrey;
const C_TRAIL_PLAYER: Color = Color::Cyan;
const C_TRAIL_ENEMY: Color = Color::DarkYellow;
const C_DAMAGE_NUM: Color = Color::Yellow;
const C_SHIELD_RING: Color = Color::Cyan;
const C_WEAPON: Color = Color::White;
const C_SPARK: Color = Color::White;
const C_EXPLOSION: Color = Color::Red;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps simulation coordinates onto the playable cell grid inside the
/// border, applying the current camera shake.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    shake: (i32, i32),
}

impl Viewport {
    fn new(width: u16, height: u16, shake: (i32, i32)) -> Self {
        // Rows 0-1 are HUD, row 2 and height-2 the border bars, the last
        // row the controls hint.
        Viewport {
            left: 1,
            top: 3,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(5).max(1),
            shake,
        }
    }

    /// Cell for a simulation point, or None when it falls outside the grid.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let x = x + self.shake.0 as f32;
        let y = y + self.shake.1 as f32;
        let col = (x / ARENA_W as f32 * self.cols as f32) as i32;
        let row = (y / ARENA_H as f32 * self.rows as f32) as i32;
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some((self.left + col as u16, self.top + row as u16))
    }

    /// Like [`cell`](Self::cell) but clamped into the grid, for shapes that
    /// straddle the edge.
    fn cell_clamped(&self, x: f32, y: f32) -> (u16, u16) {
        let x = x + self.shake.0 as f32;
        let y = y + self.shake.1 as f32;
        let col = ((x / ARENA_W as f32 * self.cols as f32) as i32).clamp(0, self.cols as i32 - 1);
        let row = ((y / ARENA_H as f32 * self.rows as f32) as i32).clamp(0, self.rows as i32 - 1);
        (self.left + col as u16, self.top + row as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for the current phase.
pub fn render<W: Write>(out: &mut W, state: &SessionState, now_ms: u64) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;

    match state.phase {
        Phase::ModeSelect => draw_mode_select(out, width, height)?,
        Phase::DifficultySelect => draw_difficulty_select(out, width, height)?,
        Phase::CharacterSelect => draw_character_select(out, width, height)?,
        Phase::Combat | Phase::Paused | Phase::Win | Phase::Lose => {
            draw_arena_frame(out, state, now_ms, width, height)?;
            match state.phase {
                Phase::Paused => draw_pause_overlay(out, width, height)?,
                Phase::Win => draw_end_overlay(out, state, width, height, true)?,
                Phase::Lose => draw_end_overlay(out, state, width, height, false)?,
                _ => {}
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_arena_frame<W: Write>(
    out: &mut W,
    state: &SessionState,
    now_ms: u64,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let vp = Viewport::new(width, height, state.shake_offset);

    draw_border(out, state, now_ms, width, height)?;
    draw_hud(out, state, now_ms, width)?;

    for item in &state.items {
        draw_item(out, &vp, item)?;
    }
    for particle in &state.particles {
        draw_particle(out, &vp, particle)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, &vp, projectile)?;
    }
    if let Some(boss) = &state.boss {
        draw_boss(out, &vp, boss)?;
    }
    if let (Some(player), Some(boss)) = (&state.player, &state.boss) {
        draw_weapon(out, &vp, player, boss, now_ms)?;
    }
    if let Some(player) = &state.player {
        draw_player(out, &vp, state, player, now_ms)?;
    }
    for number in &state.damage_numbers {
        draw_damage_number(out, &vp, number, now_ms)?;
    }
    if state.explosion_active(now_ms) {
        draw_explosion(out, &vp, state.explosion_at)?;
    }
    if state.deflection_active(now_ms) {
        let (x, y) = state.deflection_at;
        if let Some((col, row)) = vp.cell(x, y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_SPARK))?;
            out.queue(Print("✧"))?;
        }
    }

    draw_controls_hint(out, height)?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(
    out: &mut W,
    state: &SessionState,
    now_ms: u64,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let w = width as usize;
    // The whole frame glows red while the damage flash runs.
    let color = if state.hit_flash_active(now_ms) {
        C_BORDER_HIT
    } else {
        C_BORDER
    };
    out.queue(style::SetForegroundColor(color))?;

    out.queue(cursor::MoveTo(0, 2))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 3..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

/// `█` bar of `width` cells, filled in proportion to current/max.
fn bar(current: i32, max: i32, width: usize) -> String {
    let ratio = (current.max(0) as f32 / max.max(1) as f32).min(1.0);
    let filled = (ratio * width as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "─".repeat(width - filled))
}

fn draw_hud<W: Write>(
    out: &mut W,
    state: &SessionState,
    now_ms: u64,
    width: u16,
) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if state.score_multiplier > 1.0 {
        out.queue(Print(format!(
            "Score:{:>6}  x{:.1}",
            state.score, state.score_multiplier
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", state.score)))?;
    }

    // Mode tag — centre
    let mode_str = match state.mode {
        GameMode::Levels => format!("[ LEVEL {} ]", state.level),
        GameMode::Endless => {
            let diff = match state.difficulty {
                Difficulty::Easy => "EASY",
                Difficulty::Medium => "MEDIUM",
                Difficulty::Nightmare => "NIGHTMARE",
            };
            format!("[ ENDLESS {} · {} ]", state.level, diff)
        }
    };
    let mode_color = match state.mode {
        GameMode::Levels => Color::Green,
        GameMode::Endless => match state.difficulty {
            Difficulty::Easy => Color::Green,
            Difficulty::Medium => Color::Yellow,
            Difficulty::Nightmare => Color::Red,
        },
    };
    let mx = (width / 2).saturating_sub(mode_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(mode_color))?;
    out.queue(Print(&mode_str))?;

    // Player health (and shield countdown) — right
    if let Some(player) = &state.player {
        let shield_tag = if state.shield_active(now_ms) {
            let secs = (state.shield_until - now_ms) / 1000 + 1;
            format!("[▣ {}s] ", secs)
        } else {
            String::new()
        };
        let hp_str = format!("HP {} {:>3}", bar(player.health, player.max_health, 10), player.health);
        let total = shield_tag.chars().count() + hp_str.chars().count();
        let rx = width.saturating_sub(total as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        if !shield_tag.is_empty() {
            out.queue(style::SetForegroundColor(C_SHIELD_RING))?;
            out.queue(Print(&shield_tag))?;
        }
        let hp_color = if player.health * 4 <= player.max_health {
            C_HUD_HP_LOW
        } else {
            C_HUD_HP
        };
        out.queue(style::SetForegroundColor(hp_color))?;
        out.queue(Print(&hp_str))?;
    }

    // Boss bar — row 1
    if let Some(boss) = &state.boss {
        let boss_str = format!("BOSS {} {:>3}/{}", bar(boss.health, boss.max_health, 24), boss.health, boss.max_health);
        out.queue(cursor::MoveTo(1, 1))?;
        out.queue(style::SetForegroundColor(C_BOSS_BODY))?;
        out.queue(Print(&boss_str))?;

        let weak_str = if boss.weak_active {
            "WEAK POINT OPEN — STRIKE!"
        } else {
            "weak point closed"
        };
        let weak_color = if boss.weak_active {
            C_BOSS_WEAK
        } else {
            C_HINT
        };
        let wx = width.saturating_sub(weak_str.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(wx, 1))?;
        out.queue(style::SetForegroundColor(weak_color))?;
        out.queue(Print(weak_str))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn class_color(class: PlayerClass) -> Color {
    match class {
        PlayerClass::Warrior => C_WARRIOR,
        PlayerClass::Rogue => C_ROGUE,
        PlayerClass::Mage => C_MAGE,
    }
}

fn draw_player<W: Write>(
    out: &mut W,
    vp: &Viewport,
    state: &SessionState,
    player: &Player,
    now_ms: u64,
) -> std::io::Result<()> {
    let (cx, cy) = player.center();
    let (col, row) = vp.cell_clamped(cx, cy);

    let color = if player.is_dashing(now_ms) {
        C_PLAYER_DASH
    } else if state.hit_flash_active(now_ms) {
        C_BORDER_HIT
    } else {
        class_color(player.class)
    };

    // Shield ring around the body while the pickup lasts.
    if state.shield_active(now_ms) {
        out.queue(style::SetForegroundColor(C_SHIELD_RING))?;
        if col > vp.left {
            out.queue(cursor::MoveTo(col - 1, row))?;
            out.queue(Print("("))?;
        }
        if col + 1 < vp.left + vp.cols {
            out.queue(cursor::MoveTo(col + 1, row))?;
            out.queue(Print(")"))?;
        }
    }

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print("@"))?;
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, vp: &Viewport, boss: &Boss) -> std::io::Result<()> {
    let (c0, r0) = vp.cell_clamped(boss.x as f32, boss.y as f32);
    let (c1, r1) = vp.cell_clamped(
        (boss.x + boss.size) as f32,
        (boss.y + boss.size) as f32,
    );

    out.queue(style::SetForegroundColor(C_BOSS_BODY))?;
    for row in r0..=r1 {
        for col in c0..=c1 {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("█"))?;
        }
    }

    // Exposed core while the weak point is open.
    if boss.weak_active {
        let (bx, by) = boss.center();
        let (col, row) = vp.cell_clamped(bx, by);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BOSS_WEAK))?;
        out.queue(Print("◉"))?;
    }
    Ok(())
}

/// Sparks along the aim line while the swing animation runs.
fn draw_weapon<W: Write>(
    out: &mut W,
    vp: &Viewport,
    player: &Player,
    boss: &Boss,
    now_ms: u64,
) -> std::io::Result<()> {
    if !player.is_swinging(now_ms) {
        return Ok(());
    }
    let (px, py) = player.center();
    let (bx, by) = boss.center();
    let dx = bx - px;
    let dy = by - py;
    let len = (dx * dx + dy * dy).sqrt().max(1.0);
    let reach = player.class.weapon_reach();

    out.queue(style::SetForegroundColor(C_WEAPON))?;
    for step in [0.45_f32, 0.75, 1.0] {
        let x = px + dx / len * reach * step;
        let y = py + dy / len * reach * step;
        if let Some((col, row)) = vp.cell(x, y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(if step >= 1.0 { "✦" } else { "·" }))?;
        }
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    vp: &Viewport,
    projectile: &Projectile,
) -> std::io::Result<()> {
    let (cx, cy) = projectile.center();
    let Some((col, row)) = vp.cell(cx, cy) else {
        return Ok(());
    };
    let (glyph, color) = match projectile.kind {
        ProjectileKind::Straight => ("●", C_PROJ_STRAIGHT),
        ProjectileKind::ZigZag { .. } => ("◆", C_PROJ_ZIGZAG),
        ProjectileKind::Spiral { .. } => ("✦", C_PROJ_SPIRAL),
        ProjectileKind::PlayerFired => ("○", C_PROJ_PLAYER),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_item<W: Write>(out: &mut W, vp: &Viewport, item: &Item) -> std::io::Result<()> {
    let Some((col, row)) = vp.cell(
        item.x as f32 + item.size as f32 / 2.0,
        item.y as f32 + item.size as f32 / 2.0,
    ) else {
        return Ok(());
    };
    let (glyph, color) = match item.kind {
        ItemKind::Heart => ("♥", C_ITEM_HEART),
        ItemKind::Shield => ("▣", C_ITEM_SHIELD),
        ItemKind::Orb => ("◎", C_ITEM_ORB),
        ItemKind::Bomb => ("◉", C_ITEM_BOMB),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_particle<W: Write>(out: &mut W, vp: &Viewport, particle: &Particle) -> std::io::Result<()> {
    let Some((col, row)) = vp.cell(particle.x, particle.y) else {
        return Ok(());
    };
    let color = match particle.tint {
        ParticleTint::PlayerTrail => C_TRAIL_PLAYER,
        ParticleTint::EnemyTrail => C_TRAIL_ENEMY,
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print("·"))?;
    Ok(())
}

fn draw_damage_number<W: Write>(
    out: &mut W,
    vp: &Viewport,
    number: &DamageNumber,
    now_ms: u64,
) -> std::io::Result<()> {
    let Some((col, row)) = vp.cell(number.x, number.y) else {
        return Ok(());
    };
    let color = if number.age_fraction(now_ms) > 0.5 {
        Color::DarkYellow
    } else {
        C_DAMAGE_NUM
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(format!("-{}", number.amount)))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    vp: &Viewport,
    at: (i32, i32),
) -> std::io::Result<()> {
    let (x, y) = (at.0 as f32, at.1 as f32);
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    for (dx, dy) in [(-30.0, 0.0), (30.0, 0.0), (0.0, -25.0), (0.0, 25.0)] {
        if let Some((col, row)) = vp.cell(x + dx, y + dy) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("✶"))?;
        }
    }
    if let Some((col, row)) = vp.cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print("✶"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← ↑ ↓ → : Move   SPACE : Attack   D : Dash   P : Pause   M : Mute   Q : Quit",
    ))?;
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn centered<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_menu_options<W: Write>(
    out: &mut W,
    width: u16,
    start_row: u16,
    options: &[(&str, &str, Color, &str)],
) -> std::io::Result<()> {
    let left = (width / 2).saturating_sub(16);
    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = start_row + i as u16;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<10}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" {}", desc)))?;
    }
    Ok(())
}

fn draw_mode_select<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    centered(out, width, cy.saturating_sub(6), Color::Cyan, "◆  DODGE  ARENA  ◆")?;
    centered(
        out,
        width,
        cy.saturating_sub(4),
        Color::White,
        "Select game mode:",
    )?;
    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Levels", Color::Green, "Four bosses, then victory"),
        ("2", "Endless", Color::Red, "Bosses cycle until you fall"),
    ];
    draw_menu_options(out, width, cy.saturating_sub(2), options)?;
    centered(
        out,
        width,
        cy + 2,
        Color::DarkGrey,
        "1/2 : Choose   Q : Quit",
    )?;
    Ok(())
}

fn draw_difficulty_select<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    centered(out, width, cy.saturating_sub(6), Color::Red, "ENDLESS MODE")?;
    centered(
        out,
        width,
        cy.saturating_sub(4),
        Color::White,
        "Select difficulty:",
    )?;
    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Easy", Color::Green, "Generous items, score x1.0"),
        ("2", "Medium", Color::Yellow, "Even odds, score x1.5"),
        ("3", "Nightmare", Color::Red, "Bombs everywhere, score x2.5"),
    ];
    draw_menu_options(out, width, cy.saturating_sub(2), options)?;
    centered(
        out,
        width,
        cy + 3,
        Color::DarkGrey,
        "1/2/3 : Choose   Q : Quit",
    )?;
    Ok(())
}

fn draw_character_select<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    centered(out, width, cy.saturating_sub(8), Color::Cyan, "Choose your fighter:")?;
    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Warrior", C_WARRIOR, "Heavy hits, slow feet, sturdy"),
        ("2", "Rogue", C_ROGUE, "Fast dash, quick swings, fragile"),
        ("3", "Mage", C_MAGE, "Ranged bolts, no dash, glass"),
    ];
    draw_menu_options(out, width, cy.saturating_sub(6), options)?;

    centered(
        out,
        width,
        cy.saturating_sub(1),
        Color::DarkGrey,
        "Pickups (walk over them):",
    )?;
    let legend: &[(&str, Color, &str)] = &[
        ("♥", C_ITEM_HEART, " Heart  — +10 health"),
        ("▣", C_ITEM_SHIELD, " Shield — 5s immunity"),
        ("◎", C_ITEM_ORB, " Orb    — clears enemy shots"),
        ("◉", C_ITEM_BOMB, " Bomb   — a trap, keep away"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy + i as u16;
        let col = (width / 2).saturating_sub(14);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }
    centered(
        out,
        width,
        cy + 5,
        Color::DarkGrey,
        "Strike while the weak point is open — swings deflect shots!",
    )?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_pause_overlay<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Yellow),
        ("║      PAUSED        ║", Color::Yellow),
        ("╚════════════════════╝", Color::Yellow),
    ];
    for (i, (msg, color)) in lines.iter().enumerate() {
        centered(out, width, cy.saturating_sub(2) + i as u16, *color, msg)?;
    }
    centered(
        out,
        width,
        cy + 2,
        Color::White,
        "P - Resume   R - Restart   Q - Quit",
    )?;
    Ok(())
}

fn draw_end_overlay<W: Write>(
    out: &mut W,
    state: &SessionState,
    width: u16,
    height: u16,
    won: bool,
) -> std::io::Result<()> {
    let summary = state.summary();
    let (box_lines, box_color): (&[&str], Color) = if won {
        (
            &[
                "╔════════════════════╗",
                "║     VICTORY !      ║",
                "╚════════════════════╝",
            ],
            Color::Yellow,
        )
    } else {
        (
            &[
                "╔════════════════════╗",
                "║     YOU  FELL      ║",
                "╚════════════════════╝",
            ],
            Color::Red,
        )
    };

    let cy = height / 2;
    let start = cy.saturating_sub(4);
    for (i, msg) in box_lines.iter().enumerate() {
        centered(out, width, start + i as u16, box_color, msg)?;
    }

    let score_line = format!("Final Score: {:>6}", summary.score);
    centered(out, width, start + 3, Color::Yellow, &score_line)?;

    let detail = match summary.mode {
        GameMode::Levels => {
            if won {
                "All four bosses cleared".to_string()
            } else {
                format!("Fell on level {}", summary.level)
            }
        }
        GameMode::Endless => {
            let diff = match summary.difficulty {
                Difficulty::Easy => "Easy",
                Difficulty::Medium => "Medium",
                Difficulty::Nightmare => "Nightmare",
            };
            format!("Endless ({}) — reached level {}", diff, summary.level)
        }
    };
    centered(out, width, start + 4, Color::DarkGrey, &detail)?;
    centered(out, width, start + 6, Color::White, "R - Menu  Q - Quit")?;
    Ok(())
}
