#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use fx_core::{
    pointer_channel, Clock, Follower, FrameScheduler, FxConfig, GlitchScheduler, LoopControl,
    ParticleField, TimelineRunner,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod render;
mod reveal;
mod style;
mod targets;

use frame::{CursorGlow, ParticleLayer};
use targets::DomTargets;

/// Engine defaults overridden by `data-fx-*` attributes on the root element
/// and the particle canvas.
fn read_config(document: &web::Document) -> FxConfig {
    let mut config = FxConfig::default();
    if let Some(root) = document.document_element() {
        dom::read_config_overrides(&root, &mut config);
    }
    if let Some(canvas) = document.get_element_by_id(PARTICLE_CANVAS_ID) {
        dom::read_config_overrides(&canvas, &mut config);
    }
    config.sanitized()
}

fn build_particles(
    document: &web::Document,
    config: &FxConfig,
) -> anyhow::Result<Rc<RefCell<ParticleLayer>>> {
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(PARTICLE_CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", PARTICLE_CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let bounds = dom::sync_canvas_to_viewport(&canvas);
    let surface = render::CanvasSurface::new(canvas)?;
    let mut field = ParticleField::new(config.particles, StdRng::from_entropy());
    field.init_for_bounds(bounds);
    log::info!(
        "[particles] {} particles on {}x{}",
        field.len(),
        bounds.width,
        bounds.height
    );
    Ok(Rc::new(RefCell::new(ParticleLayer { field, surface })))
}

// Keep the canvas backing store and the simulation bounds on the viewport.
fn wire_canvas_resize(layer: &Rc<RefCell<ParticleLayer>>) {
    let Some(window) = web::window() else {
        return;
    };
    let layer = layer.clone();
    dom::add_listener(&window, "resize", move |_: web::Event| {
        let mut layer = layer.borrow_mut();
        let bounds = dom::sync_canvas_to_viewport(layer.surface.canvas());
        layer.field.resize(bounds);
    });
}

fn build_cursor_glow(
    document: &web::Document,
    targets: &Rc<RefCell<DomTargets>>,
) -> Option<CursorGlow> {
    let glow = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    glow.set_class_name(CURSOR_GLOW_CLASS);
    document.body()?.append_child(&glow).ok()?;
    Some(CursorGlow {
        target: targets.borrow_mut().register(glow),
        follower: Follower::default(),
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if dom::prefers_reduced_motion() {
        log::info!("reduced motion requested, effects disabled");
        if let Some(loader) = dom::query_one(&document, LOADER_SELECTOR) {
            dom::add_class(&loader, LOADER_DONE_CLASS);
        }
        return Ok(());
    }
    if let Some(root) = document.document_element() {
        dom::add_class(&root, JS_ENABLED_CLASS);
    }

    let config = read_config(&document);
    let targets = Rc::new(RefCell::new(DomTargets::new()));
    let frames = Rc::new(RefCell::new(FrameScheduler::new()));
    let runner = TimelineRunner::new();
    let queue = runner.queue();

    // Logo layers and the glitch loop they feed.
    let intro = targets.borrow_mut().select_intro(&document);
    let glitch = match intro.glitch_targets() {
        Some(layers) => Some(Rc::new(RefCell::new(GlitchScheduler::new(
            config.glitch,
            layers,
            StdRng::from_entropy(),
        )))),
        None => {
            log::warn!("[glitch] logo layers missing, glitch loop disabled");
            None
        }
    };

    // Pointer state and pointer-driven effects.
    let (pointer_writer, pointer) = pointer_channel();
    let pointer_wiring = events::pointer::PointerWiring {
        document: document.clone(),
        targets: targets.clone(),
        frames: frames.clone(),
        queue: queue.clone(),
    };
    events::pointer::wire_pointer_tracking(&pointer_wiring, pointer_writer);
    let magnetic = events::pointer::wire_magnetic(&pointer_wiring);
    events::pointer::wire_card_tilt(&pointer_wiring);
    log::info!("[pointer] {} magnetic elements", magnetic);

    // Scroll reveals and scroll-driven effects share one coalesced trigger.
    let reveal_slot = reveal::wire_reveal(&reveal::RevealWiring {
        document: document.clone(),
        targets: targets.clone(),
        frames: frames.clone(),
        queue: queue.clone(),
        config,
    });
    events::scroll::wire_scroll_effects(
        &events::scroll::ScrollWiring {
            document: document.clone(),
            targets: targets.clone(),
            frames: frames.clone(),
            queue: queue.clone(),
        },
        &[reveal_slot],
    );

    let particles = match build_particles(&document, &config) {
        Ok(layer) => {
            wire_canvas_resize(&layer);
            Some(layer)
        }
        Err(e) => {
            log::warn!("[particles] disabled: {:?}", e);
            None
        }
    };
    let glow = build_cursor_glow(&document, &targets);

    loader::run_loader(loader::LoaderWiring {
        document: document.clone(),
        targets: targets.clone(),
        queue,
        timeline: config.timeline,
        intro,
        glitch: glitch.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        control: LoopControl::new("page"),
        clock: Clock::new(),
        targets,
        frames,
        runner,
        glitch,
        particles,
        glow,
        pointer,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
