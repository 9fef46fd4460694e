//! Canvas drawing for the real-time minigames. Wordle is plain DOM.

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::games::pacman::{self, PacmanGame};
use crate::games::pong::{self, PongGame};
use crate::games::tetris::{self, Priority, TetrisGame};
use crate::games::ActiveGame;

const PONG_BG: &str = "#1a0f05";
const PONG_PRIMARY: &str = "#ff8c00";
const PONG_SECONDARY: &str = "#ff4500";
const PONG_TEXT: &str = "#ffd9a0";

pub fn draw(ctx: &CanvasRenderingContext2d, game: &ActiveGame) -> Result<(), JsValue> {
    match game {
        ActiveGame::Pong(g) => draw_pong(ctx, g),
        ActiveGame::Pacman(g) => draw_pacman(ctx, g),
        ActiveGame::Tetris(g) => draw_tetris(ctx, g),
        ActiveGame::Wordle(_) => Ok(()),
    }
}

fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

fn paddle(ctx: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<(), JsValue> {
    let grad = ctx.create_linear_gradient(x, y, x + pong::PADDLE_W, y + pong::PADDLE_H);
    grad.add_color_stop(0.0, PONG_SECONDARY)?;
    grad.add_color_stop(0.5, PONG_PRIMARY)?;
    grad.add_color_stop(1.0, PONG_SECONDARY)?;
    ctx.save();
    ctx.set_shadow_color(PONG_PRIMARY);
    ctx.set_shadow_blur(14.0);
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.fill_rect(x, y, pong::PADDLE_W, pong::PADDLE_H);
    ctx.restore();
    Ok(())
}

pub fn draw_pong(ctx: &CanvasRenderingContext2d, g: &PongGame) -> Result<(), JsValue> {
    let mid = pong::FIELD_W / 2.0;
    ctx.set_fill_style_str(PONG_BG);
    ctx.fill_rect(0.0, 0.0, pong::FIELD_W, pong::FIELD_H);

    let dash = js_sys::Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(5.0));
    ctx.set_line_dash(&dash)?;
    ctx.set_stroke_style_str("rgba(255,140,0,0.45)");
    ctx.set_line_width(2.0);
    line(ctx, mid, 0.0, mid, pong::FIELD_H);
    ctx.set_line_dash(&js_sys::Array::new())?;

    paddle(ctx, pong::PLAYER_PADDLE_X, g.paddle_y)?;
    paddle(ctx, pong::AI_PADDLE_X, g.ai_y)?;

    let r = pong::BALL_RADIUS;
    let grad = ctx.create_radial_gradient(g.ball_x, g.ball_y, 1.0, g.ball_x, g.ball_y, r + 8.0)?;
    grad.add_color_stop(0.0, "rgba(255,245,230,1)")?;
    grad.add_color_stop(0.2, PONG_PRIMARY)?;
    grad.add_color_stop(0.6, PONG_SECONDARY)?;
    grad.add_color_stop(1.0, "rgba(255,69,0,0)")?;
    ctx.save();
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.set_shadow_color(PONG_PRIMARY);
    ctx.set_shadow_blur(18.0);
    circle(ctx, g.ball_x, g.ball_y, r)?;
    ctx.restore();

    ctx.set_fill_style_str(PONG_TEXT);
    ctx.set_text_align("center");
    ctx.set_font("12px monospace");
    ctx.fill_text("You", mid - 35.0, 18.0)?;
    ctx.fill_text("Marty", mid + 25.0, 18.0)?;
    ctx.set_font("24px monospace");
    ctx.fill_text(&g.player_score.to_string(), mid - 35.0, 38.0)?;
    ctx.fill_text(&g.ai_score.to_string(), mid + 25.0, 38.0)?;
    ctx.set_text_align("left");
    Ok(())
}

pub fn draw_pacman(ctx: &CanvasRenderingContext2d, g: &PacmanGame) -> Result<(), JsValue> {
    let cell = pacman::CELL;
    let w = pacman::COLS as f64 * cell;
    let h = pacman::ROWS as f64 * cell;
    ctx.set_fill_style_str("#1a1a2e");
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str("#2a2a5e");
    for y in 0..pacman::ROWS as i32 {
        for x in 0..pacman::COLS as i32 {
            if pacman::is_wall(x, y) {
                ctx.fill_rect(x as f64 * cell, y as f64 * cell, cell, cell);
            }
        }
    }

    ctx.set_fill_style_str("#fcbf49");
    ctx.set_font("12px serif");
    for e in g.emails.iter().filter(|e| !e.eaten) {
        ctx.fill_text("✉", e.x as f64 * cell + 3.0, e.y as f64 * cell + 15.0)?;
    }

    let (cx, cy) = (
        g.px as f64 * cell + cell / 2.0,
        g.py as f64 * cell + cell / 2.0,
    );
    let mouth = if g.mouth_open { 0.25 } else { 0.05 };
    let facing = g.facing();
    ctx.set_fill_style_str("#f7d000");
    ctx.begin_path();
    ctx.arc(
        cx,
        cy,
        cell / 2.0 - 2.0,
        facing + mouth * PI,
        facing + (2.0 - mouth) * PI,
    )?;
    ctx.line_to(cx, cy);
    ctx.fill();

    for ghost in &g.ghosts {
        let gx = ghost.x as f64 * cell + cell / 2.0;
        let gy = ghost.y as f64 * cell + cell / 2.0;
        ctx.set_fill_style_str(ghost.color);
        ctx.begin_path();
        ctx.arc(gx, gy - 2.0, cell / 2.0 - 2.0, PI, 0.0)?;
        ctx.line_to(gx + cell / 2.0 - 2.0, gy + cell / 2.0 - 2.0);
        ctx.line_to(gx - cell / 2.0 + 2.0, gy + cell / 2.0 - 2.0);
        ctx.fill();
        ctx.set_fill_style_str("#fff");
        circle(ctx, gx - 3.0, gy - 4.0, 3.0)?;
        circle(ctx, gx + 3.0, gy - 4.0, 3.0)?;
        ctx.set_fill_style_str("#000");
        circle(ctx, gx - 2.0, gy - 3.0, 1.5)?;
        circle(ctx, gx + 4.0, gy - 3.0, 1.5)?;
        ctx.set_fill_style_str("#fff");
        ctx.set_font("7px monospace");
        ctx.fill_text(ghost.label, gx - 6.0, gy + cell / 2.0 + 6.0)?;
    }

    ctx.set_fill_style_str("#fff");
    ctx.set_font("bold 11px monospace");
    ctx.fill_text(&format!("📧 left: {}", g.emails_left()), 6.0, h - 4.0)?;
    Ok(())
}

fn block(ctx: &CanvasRenderingContext2d, px: f64, py: f64, priority: Priority) {
    let s = tetris::CELL - 1.0;
    let (fill, highlight, shadow) = priority.colors();
    ctx.set_fill_style_str(fill);
    ctx.fill_rect(px, py, s, s);
    ctx.set_fill_style_str(highlight);
    ctx.fill_rect(px, py, s, 3.0);
    ctx.fill_rect(px, py, 3.0, s);
    ctx.set_fill_style_str(shadow);
    ctx.fill_rect(px, py + s - 3.0, s, 3.0);
    ctx.fill_rect(px + s - 3.0, py, 3.0, s);
}

pub fn draw_tetris(ctx: &CanvasRenderingContext2d, g: &TetrisGame) -> Result<(), JsValue> {
    let cell = tetris::CELL;
    let w = tetris::COLS as f64 * cell;
    let h = tetris::ROWS as f64 * cell;
    ctx.set_fill_style_str("#0a0a1a");
    ctx.fill_rect(0.0, 0.0, w, h);

    for (r, row) in g.grid.iter().enumerate() {
        for (c, slot) in row.iter().enumerate() {
            if let Some(p) = slot {
                block(ctx, c as f64 * cell, r as f64 * cell, *p);
            }
        }
    }
    if let Some(piece) = &g.current {
        for (x, y) in piece.cells() {
            if y >= 0 {
                block(ctx, x as f64 * cell, y as f64 * cell, piece.priority);
            }
        }
        ctx.set_fill_style_str("#fff");
        ctx.set_font("bold 9px monospace");
        ctx.fill_text(
            piece.priority.label(),
            (piece.x as f64 + 0.15) * cell,
            (piece.y as f64 + 1.0) * cell - 3.0,
        )?;
    }

    ctx.set_text_align("center");
    if g.in_danger() {
        let band = tetris::DANGER_ROW as f64 * cell;
        ctx.set_fill_style_str("rgba(255,51,51,0.12)");
        ctx.fill_rect(0.0, 0.0, w, band);
        ctx.set_fill_style_str("rgba(255,51,51,0.85)");
        ctx.set_font("bold 11px monospace");
        ctx.fill_text("all yours now...", w / 2.0, band - 6.0)?;
    }

    ctx.set_stroke_style_str("#1a1a3e");
    ctx.set_line_width(1.0);
    for r in 0..=tetris::ROWS {
        line(ctx, 0.0, r as f64 * cell, w, r as f64 * cell);
    }
    for c in 0..=tetris::COLS {
        line(ctx, c as f64 * cell, 0.0, c as f64 * cell, h);
    }

    let left = g.seconds_left();
    ctx.set_font("bold 14px monospace");
    ctx.set_fill_style_str(if left <= 5 { "#ff3333" } else { "#ffffff" });
    ctx.fill_text(&format!("{left}s"), w - 20.0, 18.0)?;

    if let Some(msg) = g.flash() {
        ctx.set_font("bold 10px monospace");
        let tw = ctx.measure_text(msg)?.width() + 12.0;
        ctx.set_fill_style_str("#22c55e");
        ctx.fill_rect(w / 2.0 - tw / 2.0, h - 24.0, tw, 16.0);
        ctx.set_fill_style_str("#000");
        ctx.fill_text(msg, w / 2.0, h - 12.0)?;
    }
    ctx.set_text_align("left");
    Ok(())
}
