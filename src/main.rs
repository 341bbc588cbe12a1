// src/main.rs
use nannou::prelude::*;
use std::process;

use confettivis::{
    animation::{ConfettiCannon, TriggerCounter},
    config::Config,
    controllers::{apply_commands, OscController, OscSender},
    render::ConfettiRenderer,
};

struct Model {
    // Core components:
    cannon: ConfettiCannon,
    trigger: TriggerCounter,

    // Comms components:
    osc_controller: OscController,
    osc_sender: OscSender,

    // Rendering components:
    renderer: ConfettiRenderer,

    // Debug overlay
    debug_flag: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().unwrap_or_else(|err| {
        log::error!("{}", err);
        process::exit(1);
    });

    // Create OSC controller
    let osc_controller = OscController::new(config.osc.rx_port).unwrap_or_else(|err| {
        log::error!("Failed to create OSC Controller: {}", err);
        process::exit(1);
    });
    let osc_sender = OscSender::new(config.osc.rx_port).unwrap_or_else(|err| {
        log::error!("Failed to create OSC Sender: {}", err);
        process::exit(1);
    });

    // Create window
    if let Err(err) = app
        .new_window()
        .title("confettivis")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
    {
        log::error!("Failed to open window: {:?}", err);
        process::exit(1);
    }

    let trigger = TriggerCounter::default();
    let mut cannon = ConfettiCannon::new(trigger.clone(), &config.cannon).unwrap_or_else(|err| {
        log::error!("Invalid [cannon] settings: {}", err);
        process::exit(1);
    });
    cannon.activate();

    let (origin_x, origin_y) = config.window.origin;
    let mut renderer = ConfettiRenderer::new(pt2(origin_x, origin_y));
    if let Some(dir) = config.resolve_image_dir() {
        renderer.load_images(app, &dir, &config.cannon.kinds);
    }

    log::info!(
        "Ready: {} particles per burst, OSC on port {}",
        cannon.config().particle_count,
        config.osc.rx_port
    );

    Model {
        cannon,
        trigger,
        osc_controller,
        osc_sender,
        renderer,
        debug_flag: false,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // fire
        Key::Space => {
            model.trigger.increment();
            model.cannon.sync_trigger();
        }
        // same, through the OSC loopback
        Key::F => model.osc_sender.send_fire(),
        // decreases are ignored by the cannon, handy to check that
        Key::Back => {
            model.trigger.decrement();
            model.cannon.sync_trigger();
        }
        Key::R => model.osc_sender.send_counter(0),
        Key::D => {
            model.debug_flag = !model.debug_flag;
        }
        _ => (),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    // Process OSC messages
    model.osc_controller.process_messages();
    apply_commands(
        model.osc_controller.take_commands(),
        &model.trigger,
        &mut model.cannon,
    );

    model.cannon.update(app.time);
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    for particle in model.cannon.frames() {
        model.renderer.draw_frame(&draw, &particle);
    }

    if model.debug_flag {
        let win = app.window_rect();
        let text = format!(
            "trigger {}  live bursts {}  finished {}  timers {}  fps {:.0}",
            model.trigger.get(),
            model.cannon.live_burst_count(),
            model.cannon.finished_count(),
            model.cannon.pending_timers(),
            app.fps()
        );
        draw.text(&text)
            .x_y(0.0, win.top() - 20.0)
            .w(win.w())
            .color(WHITE);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::warn!("Failed to draw frame: {:?}", err);
    }
}
