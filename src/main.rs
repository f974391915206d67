//! softrast demo host
//!
//! Owns the window, the frame loop and presentation. Everything drawn comes
//! from the CPU rasterizer; macroquad only blits the finished buffer.
//!
//! Keys:
//! - Space / Tab: next scene
//! - C: backface culling, F: fill, P: projection, B: bounds checking
//! - L: line algorithm of the line sweep
//! - S: save a PNG screenshot
//! - Escape: quit

use macroquad::prelude::*;
use softrast::app::RenderContext;
use softrast::config::load_config_or_default;
use softrast::rasterizer::{HEIGHT, WIDTH};
use softrast::VERSION;
use std::path::PathBuf;

/// Config file looked up when no path is given on the command line
const CONFIG_FILE: &str = "softrast.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("softrast v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn handle_keys(ctx: &mut RenderContext, screenshot_index: &mut u32) {
    if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Tab) {
        let next = ctx.scene.next();
        ctx.set_scene(next);
    }
    if is_key_pressed(KeyCode::C) {
        ctx.config.backface_cull = !ctx.config.backface_cull;
        log::info!("Backface culling: {}", ctx.config.backface_cull);
    }
    if is_key_pressed(KeyCode::F) {
        ctx.config.fill = !ctx.config.fill;
        log::info!("Fill faces: {}", ctx.config.fill);
    }
    if is_key_pressed(KeyCode::P) {
        ctx.config.projection = ctx.config.projection.toggled();
        log::info!("Projection: {}", ctx.config.projection.label());
    }
    if is_key_pressed(KeyCode::B) {
        ctx.config.bounds_check = !ctx.config.bounds_check;
        log::info!("Bounds check: {}", ctx.config.bounds_check);
    }
    if is_key_pressed(KeyCode::L) {
        ctx.config.line_algorithm = ctx.config.line_algorithm.toggled();
        log::info!("Line algorithm: {}", ctx.config.line_algorithm.label());
    }
    if is_key_pressed(KeyCode::S) {
        let path = format!("softrast_{:03}.png", *screenshot_index);
        match ctx.fb.save_png(&path) {
            Ok(()) => *screenshot_index += 1,
            Err(e) => log::error!("Screenshot failed: {}", e),
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = load_config_or_default(&config_path);

    if let Err(e) = config.check_presentable() {
        log::error!("{}", e);
        return;
    }

    let mut ctx = match RenderContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    log::info!("=== softrast v{} === scene: {}", VERSION, ctx.scene.label());

    let mut screenshot_index = 0;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        handle_keys(&mut ctx, &mut screenshot_index);

        // Frame time in milliseconds drives the animation
        let delta_ms = get_frame_time() * 1000.0;
        ctx.advance(delta_ms);
        ctx.render();

        clear_background(Color::from_rgba(0, 0, 0, 255));

        let fb_w = ctx.fb.width() as f32;
        let fb_h = ctx.fb.height() as f32;
        let fb_aspect = fb_w / fb_h;
        let (screen_w, screen_h) = (screen_width(), screen_height());
        let (draw_w, draw_h, draw_x, draw_y) = if fb_aspect > screen_w / screen_h {
            let h = screen_w / fb_aspect;
            (screen_w, h, 0.0, (screen_h - h) * 0.5)
        } else {
            let w = screen_h * fb_aspect;
            (w, screen_h, (screen_w - w) * 0.5, 0.0)
        };

        // Present: BGRA buffer → RGBA texture
        let texture = Texture2D::from_rgba8(
            ctx.fb.width() as u16,
            ctx.fb.height() as u16,
            &ctx.fb.to_rgba_bytes(),
        );
        texture.set_filter(FilterMode::Nearest);

        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        let stats = ctx.last_stats;
        draw_text(
            &format!(
                "{} FPS | {} | {} | cull {} fill {} | drawn {} culled {} skipped {}",
                get_fps(),
                ctx.scene.label(),
                ctx.config.projection.label(),
                ctx.config.backface_cull,
                ctx.config.fill,
                stats.drawn,
                stats.culled,
                stats.skipped,
            ),
            5.0,
            screen_h - 5.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await
    }
}
