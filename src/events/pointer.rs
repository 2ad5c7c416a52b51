use crate::constants::{CARD_SELECTOR, MAGNETIC_SELECTOR};
use crate::dom;
use crate::targets::DomTargets;
use fx_core::constants::HOVER_ENABLE_DELAY_MS;
use fx_core::{
    magnetic_offset, magnetic_release, magnetic_to, tilt_angles, tilt_release, tilt_to,
    FrameScheduler, PointerWriter, Rect, Timeline, TimelineQueue,
};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub document: web::Document,
    pub targets: Rc<RefCell<DomTargets>>,
    pub frames: Rc<RefCell<FrameScheduler>>,
    pub queue: TimelineQueue,
}

/// Forward pointer moves to the shared pointer state, at most once per
/// frame.
pub fn wire_pointer_tracking(w: &PointerWiring, writer: PointerWriter) {
    let latest: Rc<Cell<Option<Vec2>>> = Rc::new(Cell::new(None));
    let latest_slot = latest.clone();
    let slot = w.frames.borrow_mut().register("pointer", move || {
        if let Some(p) = latest_slot.take() {
            writer.set(p.x, p.y);
        }
    });

    let frames = w.frames.clone();
    dom::add_listener(&w.document, "mousemove", move |ev: web::MouseEvent| {
        latest.set(Some(client_pos(&ev)));
        frames.borrow_mut().request(slot);
    });
}

/// Buttons and pagination links lean toward the pointer.
pub fn wire_magnetic(w: &PointerWiring) -> usize {
    let elements = dom::query_all(&w.document, MAGNETIC_SELECTOR);
    for el in &elements {
        let id = w.targets.borrow_mut().register(el.clone());
        wire_hover(
            el,
            &w.queue,
            move |rect, p| magnetic_to(id, magnetic_offset(&rect, p)),
            move || magnetic_release(id),
        );
    }
    elements.len()
}

/// Series cards tilt in 3D once their entrance has had time to finish.
pub fn wire_card_tilt(w: &PointerWiring) {
    let w = w.clone();
    dom::set_timeout(HOVER_ENABLE_DELAY_MS, move || {
        let cards = dom::query_all(&w.document, CARD_SELECTOR);
        for el in &cards {
            let id = w.targets.borrow_mut().register(el.clone());
            wire_hover(
                el,
                &w.queue,
                move |rect, p| tilt_to(id, tilt_angles(&rect, p)),
                move || tilt_release(id),
            );
        }
        log::info!("[pointer] tilt enabled on {} cards", cards.len());
    });
}

fn wire_hover(
    el: &web::HtmlElement,
    queue: &TimelineQueue,
    on_move: impl Fn(Rect, Vec2) -> Timeline + 'static,
    on_leave: impl Fn() -> Timeline + 'static,
) {
    let q = queue.clone();
    let node = el.clone();
    dom::add_listener(el, "mousemove", move |ev: web::MouseEvent| {
        q.push_overwrite(on_move(dom::element_rect(&node), client_pos(&ev)));
    });
    let q = queue.clone();
    dom::add_listener(el, "mouseleave", move |_: web::MouseEvent| {
        q.push_overwrite(on_leave());
    });
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
