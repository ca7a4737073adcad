//! Canvas drawing. Reads the session, never mutates it.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::config::{GROUND_STRIPE, SHIELD_SECS};
use crate::game::player::Player;
use crate::game::world::{Cloud, Obstacle, ObstacleKind, ParticleKind, Powerup, PowerupKind};
use crate::game::{Session, Viewport};
use crate::util::clamp01;

/// Draws one frame. `now_ms` only drives cosmetic motion (mountains, shield pulse).
pub fn draw(ctx: &CanvasRenderingContext2d, session: &Session, now_ms: f64) {
    let vp = session.viewport;
    ctx.clear_rect(0.0, 0.0, vp.width, vp.height);

    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, vp.height);
    sky.add_color_stop(0.0, "#cfe9ff").ok();
    sky.add_color_stop(0.35, "#e9f7ff").ok();
    sky.add_color_stop(1.0, "#eaf6ff").ok();
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, vp.width, vp.height);

    draw_mountains(ctx, vp, now_ms);
    for cloud in &session.clouds {
        draw_cloud(ctx, cloud);
    }
    draw_ground(ctx, vp, session.ground_offset);
    for p in &session.powerups {
        draw_powerup(ctx, p, vp);
    }
    for ob in &session.obstacles {
        draw_obstacle(ctx, ob, vp);
    }
    draw_particles(ctx, session);
    draw_player(ctx, &session.player, vp, now_ms);
    draw_shield_meter(ctx, &session.player);
}

fn round_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).ok();
    ctx.arc_to(x + w, y + h, x, y + h, r).ok();
    ctx.arc_to(x, y + h, x, y, r).ok();
    ctx.arc_to(x, y, x + w, y, r).ok();
    ctx.close_path();
    ctx.fill();
}

fn draw_mountains(ctx: &CanvasRenderingContext2d, vp: Viewport, now_ms: f64) {
    let base_y = vp.ground_y() - 40.0;
    ctx.save();
    ctx.set_fill_style_str("#b6d7ef");
    ctx.begin_path();
    ctx.move_to(0.0, base_y + 40.0);
    let mut x = 0.0;
    while x < vp.width + 80.0 {
        let peak = base_y - 20.0 - ((x + now_ms * 0.0002) / 100.0).sin() * 30.0;
        ctx.line_to(x, peak);
        ctx.line_to(x + 40.0, base_y + 40.0);
        x += 80.0;
    }
    ctx.line_to(vp.width, vp.height);
    ctx.line_to(0.0, vp.height);
    ctx.close_path();
    ctx.fill();
    ctx.restore();
}

fn draw_cloud(ctx: &CanvasRenderingContext2d, c: &Cloud) {
    ctx.save();
    ctx.set_global_alpha(0.9);
    ctx.set_fill_style_str("#ffffff");
    ctx.begin_path();
    for (dx, dy, rx, ry) in [(20.0, 12.0, 26.0, 18.0), (54.0, 10.0, 36.0, 20.0), (88.0, 14.0, 26.0, 18.0)] {
        ctx.ellipse(c.x + dx, c.y + dy, rx * c.scale, ry * c.scale, 0.0, 0.0, PI * 2.0)
            .ok();
    }
    ctx.fill();
    ctx.restore();
}

fn draw_ground(ctx: &CanvasRenderingContext2d, vp: Viewport, offset: f64) {
    let ground = vp.ground_level();
    let y = vp.ground_y();
    ctx.set_fill_style_str("#f1f5f9");
    ctx.fill_rect(0.0, y, vp.width, ground);

    ctx.save();
    ctx.translate(-offset, 0.0).ok();
    let mut i = -GROUND_STRIPE;
    let mut even = true;
    while i < vp.width + 2.0 * GROUND_STRIPE {
        ctx.set_fill_style_str(if even { "#e2e8f0" } else { "#dbeaf6" });
        ctx.fill_rect(i, y + ground * 0.5, 20.0, 6.0);
        i += GROUND_STRIPE;
        even = !even;
    }
    ctx.restore();
}

fn draw_powerup(ctx: &CanvasRenderingContext2d, p: &Powerup, vp: Viewport) {
    let b = p.bounds(vp);
    let (cx, cy) = b.center();
    ctx.save();
    ctx.translate(cx, cy).ok();
    ctx.rotate(p.spin).ok();
    match p.kind {
        PowerupKind::Shield => {
            ctx.set_stroke_style_str("#22c1c3");
            ctx.set_line_width(3.0);
            ctx.begin_path();
            ctx.arc(0.0, 0.0, 12.0, 0.0, PI * 2.0).ok();
            ctx.stroke();
        }
        PowerupKind::Multiplier => {
            ctx.set_fill_style_str("#ffd166");
            for _ in 0..6 {
                ctx.rotate(PI / 3.0).ok();
                ctx.begin_path();
                ctx.move_to(0.0, 0.0);
                ctx.line_to(6.0, 0.0);
                ctx.line_to(10.0, 4.0);
                ctx.close_path();
                ctx.fill();
            }
        }
    }
    ctx.restore();
}

fn draw_obstacle(ctx: &CanvasRenderingContext2d, ob: &Obstacle, vp: Viewport) {
    let b = ob.bounds(vp);
    ctx.save();
    ctx.set_fill_style_str("rgba(0,0,0,0.07)");
    ctx.fill_rect(b.x + 4.0, vp.ground_y() + 4.0, b.w, 6.0);

    match ob.kind {
        ObstacleKind::SmallCactus | ObstacleKind::BigCactus => {
            ctx.set_fill_style_str("#0b6b4a");
            round_rect(ctx, b.x, b.y, b.w, b.h, 6.0);
            ctx.set_fill_style_str("#0a5540");
            ctx.fill_rect(b.x - 6.0, b.y + 8.0, 8.0, 12.0);
            ctx.fill_rect(b.x + b.w - 2.0, b.y + 8.0, 8.0, 12.0);
        }
        ObstacleKind::Bird => {
            let fy = ob.flap.sin() * 6.0;
            ctx.set_fill_style_str("#102a43");
            ctx.begin_path();
            ctx.ellipse(b.x + 18.0, b.y + 12.0 + fy, 12.0, 8.0, 0.0, 0.0, PI * 2.0)
                .ok();
            ctx.fill();
            ctx.begin_path();
            ctx.move_to(b.x + 10.0, b.y + 12.0 + fy);
            ctx.quadratic_curve_to(b.x + 6.0, b.y + 2.0 + fy, b.x + 26.0, b.y + 8.0 + fy);
            ctx.fill();
            ctx.set_fill_style_str("#ffd166");
            ctx.begin_path();
            ctx.move_to(b.x + 30.0, b.y + 12.0 + fy);
            ctx.line_to(b.x + 36.0, b.y + 10.0 + fy);
            ctx.line_to(b.x + 36.0, b.y + 14.0 + fy);
            ctx.close_path();
            ctx.fill();
        }
    }
    ctx.restore();
}

fn draw_particles(ctx: &CanvasRenderingContext2d, session: &Session) {
    for p in &session.particles {
        let alpha = p.fade();
        match p.kind {
            ParticleKind::Dust => {
                ctx.set_fill_style_str(&format!("rgba(20,20,20,{})", 0.12 * alpha));
                ctx.fill_rect(p.x, p.y, 6.0 * alpha, 3.0 * alpha);
            }
            ParticleKind::Spark => {
                ctx.set_fill_style_str(&format!("rgba(255,215,120,{alpha})"));
                ctx.begin_path();
                ctx.arc(p.x, p.y, 2.0 + 2.0 * (1.0 - alpha), 0.0, PI * 2.0).ok();
                ctx.fill();
            }
        }
    }
}

fn draw_player(ctx: &CanvasRenderingContext2d, player: &Player, vp: Viewport, now_ms: f64) {
    let b = player.bounds(vp);
    let w = player.width;
    ctx.save();
    ctx.translate(b.x, b.y).ok();

    ctx.set_fill_style_str("rgba(0,0,0,0.06)");
    ctx.fill_rect(4.0, b.h - 4.0, w - 6.0, 6.0);

    ctx.set_fill_style_str("#164e63");
    round_rect(ctx, 0.0, 0.0, w, b.h - 6.0, 8.0);
    ctx.set_fill_style_str("#1e293b");
    round_rect(ctx, 8.0, (b.h / 2.0).floor(), w - 18.0, (b.h / 2.2).floor() - 6.0, 8.0);

    ctx.set_fill_style_str("#fff");
    ctx.begin_path();
    ctx.arc(w - 18.0, b.h / 4.0, 6.0, 0.0, PI * 2.0).ok();
    ctx.fill();
    ctx.set_fill_style_str("#012a3b");
    ctx.begin_path();
    ctx.arc(w - 17.3, b.h / 4.0, 3.2, 0.0, PI * 2.0).ok();
    ctx.fill();

    ctx.set_fill_style_str("#0ea5a4");
    for i in 0..4 {
        let sx = 6.0 + i as f64 * 12.0;
        ctx.begin_path();
        ctx.move_to(sx, 4.0);
        ctx.line_to(sx + 6.0, -10.0);
        ctx.line_to(sx + 12.0, 4.0);
        ctx.close_path();
        ctx.fill();
    }

    if player.has_shield() {
        let pulse = 0.5 + 0.5 * (now_ms / 120.0).sin();
        ctx.set_stroke_style_str(&format!("rgba(34,193,195,{pulse})"));
        ctx.set_line_width(3.0);
        ctx.stroke_rect(-8.0, -8.0, w + 16.0, b.h + 16.0);
    }
    ctx.restore();
}

fn draw_shield_meter(ctx: &CanvasRenderingContext2d, player: &Player) {
    if !player.has_shield() {
        return;
    }
    ctx.save();
    ctx.set_fill_style_str("rgba(34,193,195,0.12)");
    ctx.fill_rect(12.0, 64.0, 120.0, 10.0);
    ctx.set_fill_style_str("#22c1c3");
    ctx.fill_rect(12.0, 64.0, clamp01(player.shield_secs / SHIELD_SECS) * 120.0, 10.0);
    ctx.set_stroke_style_str("rgba(255,255,255,0.06)");
    ctx.stroke_rect(12.0, 64.0, 120.0, 10.0);
    ctx.restore();
}
