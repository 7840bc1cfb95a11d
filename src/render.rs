//! 2D canvas rendering
//!
//! Draws whatever `GameState` says. Hit-testing never goes through here;
//! the rotation transform below is presentation only.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::CANVAS_SIZE;
use crate::sim::state::{GameMode, GamePhase, GameState};
use crate::sim::zones::{
    BALL_RADIUS, BALL_Y, CUP_BOTTOM, CUP_SLOTS, CUP_TOP, CUP_WIDTH, TILE_CORNER, Zone,
    cup_center_x,
};

const BOARD_BG: &str = "#1a1a2e";
const CUP_COLOR: &str = "#555";
const BALL_COLOR: &str = "gold";
const GRID_COLOR: &str = "rgba(255,255,255,0.06)";
const METER_TRACK: &str = "rgba(255,255,255,0.12)";
const METER_COLOR: &str = "#ffd166";
const METER_LOW_COLOR: &str = "#ff4d4d";

/// Renders the board onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Take over a canvas: size its backing store for the device pixel
    /// ratio and keep all drawing in logical coordinates.
    pub fn new(canvas: &HtmlCanvasElement, device_pixel_ratio: f64) -> Result<Self, JsValue> {
        let dpr = device_pixel_ratio.max(1.0);
        canvas.set_width((CANVAS_SIZE * dpr) as u32);
        canvas.set_height((CANVAS_SIZE * dpr) as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.scale(dpr, dpr)?;

        Ok(Self { ctx })
    }

    /// Render one frame
    pub fn draw(&self, state: &GameState, reduced_motion: bool) {
        self.clear();

        self.ctx.save();
        if state.rotation != 0.0 && !reduced_motion {
            let c = CANVAS_SIZE / 2.0;
            self.ctx.translate(c, c).ok();
            self.ctx.rotate(state.rotation as f64).ok();
            self.ctx.translate(-c, -c).ok();
        }

        match state.mode {
            GameMode::Sequence => {
                for zone in Zone::ALL {
                    self.draw_zone(zone, state.lit == Some(zone));
                }
                self.draw_grid_lines();
            }
            GameMode::Bonus => {
                self.draw_cups();
                if state.phase == GamePhase::BonusReveal {
                    self.draw_ball(state.ball_cup);
                }
            }
        }
        self.ctx.restore();

        // The meter sits outside the rotated frame
        if state.phase.accepts_input() {
            self.draw_countdown(state.countdown);
        }
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE);
        self.ctx.set_fill_style_str(BOARD_BG);
        self.ctx.fill_rect(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE);
    }

    pub fn draw_zone(&self, zone: Zone, highlighted: bool) {
        let spec = zone.spec();
        let color = if highlighted { spec.highlight } else { spec.color };
        self.ctx.set_fill_style_str(color);
        self.rounded_rect(
            spec.rect.x,
            spec.rect.y,
            spec.rect.w,
            spec.rect.h,
            TILE_CORNER,
        );
        self.ctx.fill();
    }

    pub fn draw_grid_lines(&self) {
        self.ctx.set_stroke_style_str(GRID_COLOR);
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx.move_to(CANVAS_SIZE / 2.0, 40.0);
        self.ctx.line_to(CANVAS_SIZE / 2.0, CANVAS_SIZE - 40.0);
        self.ctx.move_to(40.0, CANVAS_SIZE / 2.0);
        self.ctx.line_to(CANVAS_SIZE - 40.0, CANVAS_SIZE / 2.0);
        self.ctx.stroke();
    }

    fn draw_cups(&self) {
        self.ctx.set_fill_style_str(CUP_COLOR);
        for &x in &CUP_SLOTS {
            self.ctx.begin_path();
            self.ctx.move_to(x, CUP_BOTTOM);
            self.ctx.line_to(x + CUP_WIDTH, CUP_BOTTOM);
            self.ctx.line_to(x + CUP_WIDTH - 10.0, CUP_TOP);
            self.ctx.line_to(x + 10.0, CUP_TOP);
            self.ctx.close_path();
            self.ctx.fill();
        }
    }

    fn draw_ball(&self, cup: usize) {
        let cx = cup_center_x(cup);
        self.ctx.set_fill_style_str(BALL_COLOR);
        self.ctx.begin_path();
        self.ctx.arc(cx, BALL_Y, BALL_RADIUS, 0.0, TAU).ok();
        self.ctx.fill();
    }

    fn draw_countdown(&self, countdown: u32) {
        let track_w = CANVAS_SIZE - 40.0;
        let y = CANVAS_SIZE - 12.0;
        self.ctx.set_fill_style_str(METER_TRACK);
        self.ctx.fill_rect(20.0, y, track_w, 6.0);

        let color = if countdown < 25 { METER_LOW_COLOR } else { METER_COLOR };
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(20.0, y, track_w * countdown as f64 / 100.0, 6.0);
    }

    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        self.ctx.arc_to(x + w, y, x + w, y + h, r).ok();
        self.ctx.arc_to(x + w, y + h, x, y + h, r).ok();
        self.ctx.arc_to(x, y + h, x, y, r).ok();
        self.ctx.arc_to(x, y, x + w, y, r).ok();
        self.ctx.close_path();
    }
}
