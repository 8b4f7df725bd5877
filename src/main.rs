use log::{info, warn};
use sdl2::keyboard::Keycode;
use softcanvas::{
    AppConfig, BitmapFont, Canvas, Color, Display, FpsCounter, InputEvent, RenderTarget,
    GLYPH_SIZE,
};

/// Parse command line arguments, overriding loaded config values.
fn parse_args(config: &mut AppConfig) {
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => config.vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        config.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        config.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            config.width = w;
                            config.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: softcanvas [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W       Set window width (default: 640)");
                println!("  --height H, -h H      Set window height (default: 480)");
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --no-vsync            Disable VSync for uncapped framerate");
                println!("  --help                Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }
}

/// Build a small sprite procedurally: a shaded ball with a translucent rim.
fn make_sprite() -> softcanvas::Result<Canvas> {
    let mut sprite = Canvas::new(32, 32)?;
    sprite.fill_circle(16, 16, 14, Color::rgba(255, 255, 255, 90));
    sprite.fill_circle(16, 16, 11, Color::rgb(220, 60, 60));
    sprite.fill_circle(12, 12, 4, Color::rgba(255, 230, 230, 180));
    sprite.circle(16, 16, 14, Color::rgb(40, 10, 10));
    Ok(sprite)
}

fn main() -> Result<(), String> {
    env_logger::init();

    let mut config = AppConfig::load("softcanvas.json").unwrap_or_else(|e| {
        warn!("no config loaded ({e}); using defaults");
        AppConfig::default()
    });
    parse_args(&mut config);
    info!(
        "starting {}x{} vsync={}",
        config.width, config.height, config.vsync
    );

    let (mut display, texture_creator) =
        Display::with_options(&config.title, config.width, config.height, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)?;
    let mut frame = Canvas::new(config.width as i32, config.height as i32)
        .map_err(|e| e.to_string())?;

    let font = BitmapFont::basic();
    let sprite = make_sprite().map_err(|e| e.to_string())?;
    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = config.show_fps;

    let w = config.width as i32;
    let h = config.height as i32;
    let mut t = 0.0f32;

    'main: loop {
        let (dt, _current_fps, avg_fps) = fps_counter.tick();
        t += dt;

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::F) => show_fps = !show_fps,
                InputEvent::KeyDown(Keycode::S) => {
                    if let Err(e) = config.save("softcanvas.json") {
                        warn!("failed to save config: {e}");
                    } else {
                        info!("config saved to softcanvas.json");
                    }
                },
                _ => {},
            }
        }

        frame.clear(Color::rgb(16, 16, 32));

        // Checkerboard backdrop through the flat fill.
        for cy in 0..(h / 32) {
            for cx in 0..(w / 32) {
                if (cx + cy) % 2 == 0 {
                    frame.fill(cx * 32, cy * 32, 32, 32, Color::rgb(24, 24, 44));
                }
            }
        }

        // A clipped panel of primitives in the top-left quadrant.
        frame.set_clip(8, 8, w / 2 - 16, h / 2 - 16);
        frame.fill_rect(8, 8, w / 2 - 16, h / 2 - 16, Color::rgba(0, 0, 0, 120));
        frame.rect(8, 8, w / 2 - 16, h / 2 - 16, Color::rgb(90, 90, 140));
        let cx = w / 4;
        let cy = h / 4;
        let r = (h / 8) as f32;
        for i in 0..12 {
            let a = t + i as f32 * std::f32::consts::TAU / 12.0;
            let x1 = cx + (a.cos() * r) as i32;
            let y1 = cy + (a.sin() * r) as i32;
            frame.line(cx, cy, x1, y1, Color::rgba(120, 200, 255, 160));
        }
        frame.circle(cx, cy, r as i32 + 4, Color::rgb(120, 200, 255));
        frame.clear_clip();

        // Bouncing sprites exercising the blit family.
        let bx = (w / 2) + ((t * 1.3).sin() * (w as f32 / 5.0)) as i32;
        let by = (h / 2) + ((t * 1.7).cos() * (h as f32 / 5.0)) as i32;
        frame.blit(&sprite, bx, by, 0, 0, 32, 32);
        frame.blit_alpha(&sprite, bx - 40, by + 20, 0, 0, 32, 32, 0.5);
        let pulse = ((t.sin() * 0.5 + 0.5) * 255.0) as u8;
        frame.blit_tint(
            &sprite,
            bx + 40,
            by - 20,
            0,
            0,
            32,
            32,
            Color::rgb(80, pulse, 255),
        );

        frame.draw_text(&font, "softcanvas", 8, h - GLYPH_SIZE * 2 - 4, Color::WHITE);

        if show_fps {
            let ms = fps_counter.avg_frame_time_ms();
            let fps_text = format!("FPS {}  {}ms", avg_fps as u32, ms as u32);
            // Shadowed for visibility over any backdrop.
            frame.draw_text(&font, &fps_text, 9, h - GLYPH_SIZE - 3, Color::BLACK);
            frame.draw_text(&font, &fps_text, 8, h - GLYPH_SIZE - 4, Color::rgb(255, 255, 0));
        }

        display.present(&mut target, &frame)?;
    }

    Ok(())
}
