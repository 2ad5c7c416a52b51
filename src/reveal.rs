//! Scroll-into-view entrances wired to the visibility trigger.

use crate::constants::*;
use crate::dom;
use crate::targets::DomTargets;
use fx_core::constants::SECTION_REVEAL_MARGIN;
use fx_core::{
    card_entrance, post_entrance, post_preset, FrameScheduler, FxConfig, SlotId, TimelineQueue,
    TriggerEntry, VisibilityConfig, VisibilityTrigger,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[derive(Clone)]
pub struct RevealWiring {
    pub document: web::Document,
    pub targets: Rc<RefCell<DomTargets>>,
    pub frames: Rc<RefCell<FrameScheduler>>,
    pub queue: TimelineQueue,
    pub config: FxConfig,
}

/// Register every entrance and return the frame slot that checks them.
pub fn wire_reveal(w: &RevealWiring) -> SlotId {
    let trigger = Rc::new(RefCell::new(VisibilityTrigger::new()));
    let entries = collect_entries(w);
    let count = trigger.borrow_mut().register(entries);
    log::info!("[reveal] observing {} targets", count);

    let observer: Rc<RefCell<Option<web::IntersectionObserver>>> = Rc::new(RefCell::new(None));
    let slot = {
        let trigger = trigger.clone();
        let targets = w.targets.clone();
        let observer = observer.clone();
        w.frames.borrow_mut().register("reveal", move || {
            let fired = trigger.borrow_mut().check_and_fire(&*targets.borrow());
            if let Some(obs) = observer.borrow().as_ref() {
                let targets = targets.borrow();
                for el in fired.iter().filter_map(|t| targets.element(*t)) {
                    obs.unobserve(el);
                }
            }
        })
    };

    match create_observer(&w.frames, slot) {
        Some(obs) => {
            let targets = w.targets.borrow();
            for t in trigger.borrow().pending_targets() {
                if let Some(el) = targets.element(t) {
                    obs.observe(el);
                }
            }
            *observer.borrow_mut() = Some(obs);
        }
        None => {
            trigger.borrow_mut().fire_all();
        }
    }

    // Elements already on screen at load never see a scroll event.
    let frames = w.frames.clone();
    dom::set_timeout(w.config.visibility.settle_delay_ms as i32, move || {
        frames.borrow_mut().request(slot);
    });
    slot
}

fn collect_entries(w: &RevealWiring) -> Vec<TriggerEntry> {
    let mut targets = w.targets.borrow_mut();
    let mut entries = Vec::new();

    for el in dom::query_all(&w.document, REVEAL_SELECTOR) {
        let id = targets.register(el.clone());
        entries.push(TriggerEntry::new(id, &w.config.visibility, move |_| {
            dom::add_class(&el, REVEALED_CLASS)
        }));
    }

    let section = VisibilityConfig {
        threshold: 0.0,
        margin: SECTION_REVEAL_MARGIN.parse().unwrap_or(w.config.visibility.margin),
        ..w.config.visibility
    };

    let cards = targets.select_all(&w.document, CARD_SELECTOR);
    match targets.select_one(&w.document, CARD_SECTION_SELECTOR) {
        Some(s) if !cards.is_empty() => {
            let queue = w.queue.clone();
            entries.push(TriggerEntry::new(s, &section, move |_| {
                log::info!("[reveal] {} cards", cards.len());
                queue.push(card_entrance(&cards));
            }));
        }
        _ => log::debug!("[reveal] no card section"),
    }

    let posts = targets.select_all(&w.document, POST_SELECTOR);
    match targets.select_one(&w.document, POST_SECTION_SELECTOR) {
        Some(s) if !posts.is_empty() => {
            w.queue.push(post_preset(&posts));
            let queue = w.queue.clone();
            let timeline = w.config.timeline;
            entries.push(TriggerEntry::new(s, &section, move |_| {
                log::info!("[reveal] {} posts", posts.len());
                queue.push(post_entrance(&posts, &timeline));
            }));
        }
        _ => log::debug!("[reveal] no post section"),
    }
    entries
}

/// Intersection changes only wake the reveal slot; the trigger itself
/// decides what counts as visible.
fn create_observer(
    frames: &Rc<RefCell<FrameScheduler>>,
    slot: SlotId,
) -> Option<web::IntersectionObserver> {
    let window = web::window()?;
    let supported = js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false);
    if !supported {
        log::warn!("[reveal] IntersectionObserver unavailable");
        return None;
    }
    let frames = frames.clone();
    let callback = Closure::wrap(Box::new(move |_: js_sys::Array, _: web::IntersectionObserver| {
        frames.borrow_mut().request(slot);
    }) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(0.0));
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init);
    callback.forget();
    match observer {
        Ok(obs) => Some(obs),
        Err(e) => {
            log::warn!("[reveal] observer failed: {:?}", e);
            None
        }
    }
}
