use std::time::Instant;

use glow::HasContext;

use crate::{abs::App, config::*, error::AppError, scene::Scene};

mod abs;
mod config;
mod error;
mod logger;
mod scene;

fn main() {
    if let Err(e) = logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(-1);
    }
}

fn run() -> Result<(), AppError> {
    let mut app = App::new(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let scene = Scene::new(&app.gl, TEXTURE_PATH)?;

    let start = Instant::now();
    let mut frames: u64 = 0;

    'running: loop {
        scene.render(CLEAR_COLOR, start.elapsed().as_secs_f32());
        app.window.gl_swap_window();
        frames += 1;

        for event in app.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => break 'running,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(..),
                    ..
                } => {
                    let (width, height) = app.window.drawable_size();
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Window closed after {frames} frames in {:.1?}",
        start.elapsed()
    );

    // The GL objects must go before the context and SDL itself.
    drop(scene);
    drop(app);
    Ok(())
}
