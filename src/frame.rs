use crate::render::CanvasSurface;
use crate::targets::DomTargets;
use fx_core::constants::FALLBACK_FRAME_MS;
use fx_core::{
    Clock, FrameScheduler, Follower, GlitchScheduler, LoopControl, ParticleField, PointerReader,
    Property, StyleSink, TargetId, TimelineRunner,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Particle field plus the canvas it draws on.
pub struct ParticleLayer {
    pub field: ParticleField,
    pub surface: CanvasSurface,
}

/// Cursor glow element eased toward the pointer.
pub struct CursorGlow {
    pub target: TargetId,
    pub follower: Follower,
}

/// Everything the page updates once per rendered frame.
pub struct FrameContext {
    pub control: LoopControl,
    pub clock: Clock,
    pub targets: Rc<RefCell<DomTargets>>,
    pub frames: Rc<RefCell<FrameScheduler>>,
    pub runner: TimelineRunner,
    pub glitch: Option<Rc<RefCell<GlitchScheduler>>>,
    pub particles: Option<Rc<RefCell<ParticleLayer>>>,
    pub glow: Option<CursorGlow>,
    pub pointer: PointerReader,
}

impl FrameContext {
    /// Run one frame. Returns false when the loop must not re-request.
    pub fn frame(&mut self) -> bool {
        let now = self.clock.now();
        let Some(dt) = self.control.begin_frame(now) else {
            return false;
        };

        // Coalesced input handlers first so timelines see fresh triggers.
        self.frames.borrow_mut().run_frame();

        {
            let mut targets = self.targets.borrow_mut();
            self.runner.advance(now, &mut *targets);
            if let Some(glitch) = &self.glitch {
                if let Some(variant) = glitch.borrow_mut().poll(now, &mut *targets) {
                    log::debug!("[glitch] {:?}", variant);
                }
            }
            if let (Some(glow), Some(pos)) = (self.glow.as_mut(), self.pointer.position()) {
                let at = glow.follower.step(pos, dt);
                targets.write(glow.target, Property::X, at.x);
                targets.write(glow.target, Property::Y, at.y);
            }
            targets.flush();
        }

        if let Some(layer) = &self.particles {
            let mut layer = layer.borrow_mut();
            let ParticleLayer { field, surface } = &mut *layer;
            field.tick(self.pointer.position(), dt);
            field.render(surface);
        }
        true
    }

    /// Stop the loop and the glitch scheduler. Idempotent.
    pub fn stop(&mut self) {
        self.control.stop();
        if let Some(glitch) = &self.glitch {
            let mut targets = self.targets.borrow_mut();
            glitch.borrow_mut().stop(&mut *targets);
            targets.flush();
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Ask the host for the next frame, falling back to a timer when frame
/// requests are unavailable.
fn request_frame(tick: &Tick, scheduled: &Cell<bool>) {
    if scheduled.get() {
        return;
    }
    let Some(w) = web::window() else {
        return;
    };
    let slot = tick.borrow();
    let Some(cb) = slot.as_ref() else {
        return;
    };
    let f = cb.as_ref().unchecked_ref();
    let ok = w.request_animation_frame(f).is_ok()
        || w
            .set_timeout_with_callback_and_timeout_and_arguments_0(f, FALLBACK_FRAME_MS)
            .is_ok();
    scheduled.set(ok);
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let scheduled = Rc::new(Cell::new(false));

    let tick_clone = tick.clone();
    let scheduled_tick = scheduled.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        scheduled_tick.set(false);
        if frame_ctx_tick.borrow_mut().frame() {
            request_frame(&tick_clone, &scheduled_tick);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &scheduled);

    wire_page_visibility(frame_ctx, tick, scheduled);
}

/// Suspend while the page is hidden, resume on return, stop on unload.
fn wire_page_visibility(frame_ctx: Rc<RefCell<FrameContext>>, tick: Tick, scheduled: Rc<Cell<bool>>) {
    let Some(document) = crate::dom::window_document() else {
        return;
    };
    let doc = document.clone();
    let ctx = frame_ctx.clone();
    crate::dom::add_listener(&document, "visibilitychange", move |_: web::Event| {
        let mut c = ctx.borrow_mut();
        if doc.visibility_state() == web::VisibilityState::Hidden {
            c.control.suspend();
        } else if c.control.resume() {
            drop(c);
            request_frame(&tick, &scheduled);
        }
    });

    if let Some(w) = web::window() {
        crate::dom::add_listener(&w, "pagehide", move |_: web::Event| {
            frame_ctx.borrow_mut().stop();
        });
    }
}
