use crate::constants::*;
use crate::dom;
use crate::targets::DomTargets;
use fx_core::constants::PARALLAX_DEFAULT_SPEED;
use fx_core::{
    header_slide, parallax_offset, reading_progress, FrameScheduler, HeaderTracker, Property,
    SlotId, StyleSink, TargetId, TimelineQueue,
};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct ScrollWiring {
    pub document: web::Document,
    pub targets: Rc<RefCell<DomTargets>>,
    pub frames: Rc<RefCell<FrameScheduler>>,
    pub queue: TimelineQueue,
}

/// Register the scroll-driven handlers and request them (plus `extra`) on
/// every scroll and resize event.
pub fn wire_scroll_effects(w: &ScrollWiring, extra: &[SlotId]) {
    let mut slots: SmallVec<[SlotId; 4]> = extra.iter().copied().collect();
    slots.extend(progress_slot(w));
    slots.extend(header_slot(w));
    slots.extend(parallax_slot(w));
    log::info!("[scroll] {} handlers", slots.len());

    let Some(window) = web::window() else {
        return;
    };
    for event in ["scroll", "resize"] {
        let frames = w.frames.clone();
        let slots = slots.clone();
        dom::add_listener(&window, event, move |_: web::Event| {
            let mut frames = frames.borrow_mut();
            for slot in &slots {
                frames.request(*slot);
            }
        });
    }
}

/// Reading progress bar, article pages only.
fn progress_slot(w: &ScrollWiring) -> Option<SlotId> {
    dom::query_one(&w.document, ARTICLE_SELECTOR)?;
    let bar = w
        .document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    bar.set_class_name(PROGRESS_BAR_CLASS);
    w.document.body()?.append_child(&bar).ok()?;

    let id = w.targets.borrow_mut().register(bar);
    let targets = w.targets.clone();
    let document = w.document.clone();
    let slot = w.frames.borrow_mut().register("progress", move || {
        let (_, vh) = dom::viewport_size();
        let p = reading_progress(dom::scroll_y(), dom::document_height(&document), vh);
        targets.borrow_mut().write(id, Property::ScaleX, p);
    });
    Some(slot)
}

/// Compact header past the first screenful, hidden while scrolling down.
fn header_slot(w: &ScrollWiring) -> Option<SlotId> {
    let el = dom::query_one(&w.document, HEADER_SELECTOR)?;
    let id = w.targets.borrow_mut().register(el.clone());
    let queue = w.queue.clone();
    let mut tracker = HeaderTracker::default();
    let slot = w.frames.borrow_mut().register("header", move || {
        let update = tracker.update(dom::scroll_y());
        dom::toggle_class(&el, HEADER_SCROLLED_CLASS, update.scrolled);
        if update.changed {
            queue.push_overwrite(header_slide(id, update.hidden));
        }
    });
    Some(slot)
}

fn parallax_slot(w: &ScrollWiring) -> Option<SlotId> {
    let layers: Vec<(TargetId, f32)> = dom::query_all(&w.document, PARALLAX_SELECTOR)
        .into_iter()
        .map(|el| {
            let speed = el
                .get_attribute(PARALLAX_SPEED_ATTR)
                .and_then(|s| s.trim().parse::<f32>().ok())
                .filter(|s| s.is_finite())
                .unwrap_or(PARALLAX_DEFAULT_SPEED);
            (w.targets.borrow_mut().register(el), speed)
        })
        .collect();
    if layers.is_empty() {
        return None;
    }
    let targets = w.targets.clone();
    let slot = w.frames.borrow_mut().register("parallax", move || {
        let y = dom::scroll_y();
        let mut targets = targets.borrow_mut();
        for (id, speed) in &layers {
            targets.write(*id, Property::Y, parallax_offset(y, *speed));
        }
    });
    Some(slot)
}
