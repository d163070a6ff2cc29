//! Logical-space scene drawing
//!
//! Free functions that turn game state into [`Canvas`] calls. Layout numbers
//! are arena units.

use glam::Vec2;

use super::{Canvas, Color, lighten, palette, rgb, scale};
use crate::consts::{ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH};
use crate::sim::{Ball, MatchState, Paddle};

const BACKGROUND_BASE: Color = 0x303050;
const BAND_EVEN: Color = 0x282838;
const BAND_ODD: Color = 0x202030;

/// Text sizes: (glyph size, spacing)
const TITLE_TEXT: (f32, f32) = (1.5, 0.8);
const HEADING_TEXT: (f32, f32) = (1.2, 0.7);
const ITEM_TEXT: (f32, f32) = (0.6, 0.6);
const SCORE_TEXT: (f32, f32) = (0.7, 0.7);
const TIMER_TEXT: (f32, f32) = (0.8, 0.8);
const COUNTDOWN_TEXT: (f32, f32) = (2.0, 1.0);
const BANNER_TEXT: (f32, f32) = (1.2, 0.8);
const TIME_UP_TEXT: (f32, f32) = (0.8, 0.7);

const MARKER_HALF: f32 = 1.2;
const ITEM_GAP: f32 = 9.0;

/// Animated arena background
///
/// Owns its own clock so the pulse keeps moving in every phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backdrop {
    time: f32,
}

impl Backdrop {
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the clock and draw; the light sweep is only shown during play
    pub fn draw(&mut self, canvas: &mut dyn Canvas, dt: f32, sweep: bool) {
        self.time += dt;
        let t = self.time;

        let pulse = 0.5 + 0.5 * (t * 0.5).sin();
        let brightness = 0.4 + 0.4 * pulse;
        canvas.fill_rect(
            Vec2::ZERO,
            Vec2::new(ARENA_HALF_WIDTH, ARENA_HALF_HEIGHT),
            scale(BACKGROUND_BASE, brightness),
        );

        let offset = (t * 0.5).sin() * 20.0;
        for i in 0..=10 {
            let color = if i % 2 == 0 { BAND_EVEN } else { BAND_ODD };
            canvas.fill_rect(
                Vec2::new(0.0, (i - 5) as f32 * 20.0 + offset),
                Vec2::new(60.0, 10.0),
                color,
            );
        }

        if sweep {
            let pulse = 0.5 + 0.5 * (t * 2.0).sin();
            let intensity = 80.0 + 100.0 * pulse;
            let color = rgb(intensity, intensity, 255.0);
            for i in (-50..=50).step_by(10) {
                canvas.fill_rect(Vec2::new(0.0, i as f32), Vec2::new(0.5, 4.0), color);
            }
        }
    }
}

pub fn draw_paddle(canvas: &mut dyn Canvas, paddle: &Paddle) {
    let color = lighten(paddle.color, paddle.flash_level());
    canvas.fill_rect(paddle.pos, paddle.half_size, color);
}

pub fn draw_ball(canvas: &mut dyn Canvas, ball: &Ball) {
    canvas.fill_rect(ball.pos, Vec2::splat(ball.radius), palette::BALL);
}

pub fn draw_scores(canvas: &mut dyn Canvas, left: u32, right: u32) {
    let (size, spacing) = SCORE_TEXT;
    canvas.draw_text(&left.to_string(), Vec2::new(-10.0, 40.0), size, spacing, palette::SCORE);
    canvas.draw_text(&right.to_string(), Vec2::new(10.0, 40.0), size, spacing, palette::SCORE);
}

/// Paddles, ball and score line
pub fn draw_match(canvas: &mut dyn Canvas, state: &MatchState) {
    for paddle in &state.paddles {
        draw_paddle(canvas, paddle);
    }
    draw_ball(canvas, &state.ball);
    let (left, right) = state.scores();
    draw_scores(canvas, left, right);
}

/// Burst under the flash
pub fn draw_effects(canvas: &mut dyn Canvas, state: &MatchState) {
    state.burst.render(canvas);
    state.flash.render(canvas);
}

/// Where a vertical list of plated items sits
#[derive(Debug, Clone, Copy)]
pub struct MenuLayout {
    pub title_y: f32,
    pub title_text: (f32, f32),
    pub start_y: f32,
    pub plate_half: Vec2,
    /// x of the item label
    pub label_x: f32,
    /// x of the value column, when the list has one
    pub value_x: f32,
    pub marker_x: f32,
}

impl MenuLayout {
    pub const MAIN: MenuLayout = MenuLayout {
        title_y: -22.0,
        title_text: TITLE_TEXT,
        start_y: 0.0,
        plate_half: Vec2::new(33.0, 4.0),
        label_x: 0.0,
        value_x: 0.0,
        marker_x: -29.0,
    };

    pub const PAUSED: MenuLayout = MenuLayout {
        title_y: -17.0,
        title_text: HEADING_TEXT,
        ..MenuLayout::MAIN
    };

    pub const SETTINGS: MenuLayout = MenuLayout {
        title_y: -42.0,
        title_text: HEADING_TEXT,
        start_y: -30.0,
        plate_half: Vec2::new(52.0, 4.0),
        label_x: -14.0,
        value_x: 32.0,
        marker_x: -44.0,
    };

    pub fn item_y(&self, index: usize) -> f32 {
        self.start_y + index as f32 * ITEM_GAP
    }
}

/// Title plus a list of `(label, value)` rows with the selected one highlighted
///
/// Empty values are skipped.
pub fn draw_menu(
    canvas: &mut dyn Canvas,
    layout: &MenuLayout,
    title: &str,
    rows: &[(&str, String)],
    selected: usize,
) {
    let (size, spacing) = layout.title_text;
    canvas.draw_text(title, Vec2::new(0.0, layout.title_y), size, spacing, palette::WHITE);

    let (size, spacing) = ITEM_TEXT;
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = layout.item_y(i);
        let color = if i == selected {
            palette::HIGHLIGHT
        } else {
            palette::DIMMED
        };

        canvas.fill_rect(Vec2::new(0.0, y), layout.plate_half, palette::MENU_PLATE);
        canvas.draw_text(label, Vec2::new(layout.label_x, y), size, spacing, color);
        if !value.is_empty() {
            canvas.draw_text(value, Vec2::new(layout.value_x, y), size, spacing, palette::VALUE);
        }
        if i == selected {
            canvas.fill_rect(
                Vec2::new(layout.marker_x, y),
                Vec2::splat(MARKER_HALF),
                palette::WHITE,
            );
        }
    }
}

/// "3", "2", "1" in white, then "GO!" highlighted
pub fn draw_countdown(canvas: &mut dyn Canvas, value: i32) {
    let (size, spacing) = COUNTDOWN_TEXT;
    if value > 0 {
        canvas.draw_text(&value.to_string(), Vec2::ZERO, size, spacing, palette::WHITE);
    } else {
        canvas.draw_text("GO!", Vec2::ZERO, size, spacing, palette::HIGHLIGHT);
    }
}

/// `MM:SS` from whole seconds
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn draw_timer(canvas: &mut dyn Canvas, remaining_secs: u32, warning: bool) {
    let (size, spacing) = TIMER_TEXT;
    let color = if warning {
        palette::WARNING
    } else {
        palette::WHITE
    };
    canvas.draw_text(
        &format_clock(remaining_secs),
        Vec2::new(0.0, -40.0),
        size,
        spacing,
        color,
    );
}

/// "TIME IS UP!" with the result underneath
pub fn draw_time_up(canvas: &mut dyn Canvas, banner: &str, color: Color) {
    let (size, spacing) = TIME_UP_TEXT;
    canvas.draw_text("TIME IS UP!", Vec2::new(0.0, -10.0), size, spacing, palette::WHITE);
    let (size, spacing) = BANNER_TEXT;
    canvas.draw_text(banner, Vec2::ZERO, size, spacing, color);
}
