use crate::constants::{CONFIG_ATTR_PREFIX, REDUCED_MOTION_QUERY};
use fx_core::{Bounds, FxConfig, Rect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn query_one(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dim(w.inner_width()), dim(w.inner_height()))
}

/// Bounding box in client coordinates.
pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

#[inline]
pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

pub fn document_height(document: &web::Document) -> f32 {
    document
        .document_element()
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0)
}

pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn add_class(el: &web::Element, class: &str) {
    _ = el.class_list().add_1(class);
}

pub fn toggle_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

/// Attach `handler` for `event`, forwarding only events of type `E`.
pub fn add_listener<E>(target: &web::EventTarget, event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("[dom] could not listen for {}", event);
    }
    closure.forget();
}

/// One-shot timer.
pub fn set_timeout(ms: i32, handler: impl FnOnce() + 'static) {
    let Some(w) = web::window() else {
        return;
    };
    let cb = Closure::once_into_js(handler);
    _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
}

/// Repeating timer. The returned handle clears it.
pub fn set_interval(ms: i32, handler: impl FnMut() + 'static) -> Option<i32> {
    let w = web::window()?;
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    let id = w
        .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), ms)
        .ok();
    closure.forget();
    id
}

pub fn clear_interval(id: i32) {
    if let Some(w) = web::window() {
        w.clear_interval_with_handle(id);
    }
}

/// Size the particle canvas backing store to the viewport and report the
/// simulation bounds.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> Bounds {
    let (w, h) = viewport_size();
    canvas.set_width(w.max(1.0) as u32);
    canvas.set_height(h.max(1.0) as u32);
    Bounds::new(w, h)
}

/// Apply `data-fx-*` attributes of `el` on top of `config`.
pub fn read_config_overrides(el: &web::Element, config: &mut FxConfig) {
    for name in el.get_attribute_names().iter() {
        let Some(name) = name.as_string() else {
            continue;
        };
        let Some(key) = name.strip_prefix(CONFIG_ATTR_PREFIX) else {
            continue;
        };
        if let Some(value) = el.get_attribute(&name) {
            log::info!("[config] {} = {}", key, value);
            config.apply_override(key, &value);
        }
    }
}
