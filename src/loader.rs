use crate::constants::*;
use crate::dom;
use crate::style;
use crate::targets::DomTargets;
use fx_core::constants::{LOADER_HIDE_DELAY_MS, LOADER_TICK_MS};
use fx_core::{
    intro_timeline, loader_fade, GlitchScheduler, IntroTargets, LoaderProgress, TimelineConfig,
    TimelineQueue,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct LoaderWiring {
    pub document: web::Document,
    pub targets: Rc<RefCell<DomTargets>>,
    pub queue: TimelineQueue,
    pub timeline: TimelineConfig,
    pub intro: IntroTargets,
    pub glitch: Option<Rc<RefCell<GlitchScheduler>>>,
}

/// Queue the page intro. The glitch loop starts when the logo sequence
/// signals readiness.
pub fn start_intro(w: &LoaderWiring) {
    let glitch = w.glitch.clone();
    w.queue.push(intro_timeline(&w.intro, &w.timeline, move |at| {
        if let Some(glitch) = &glitch {
            glitch.borrow_mut().start(at);
        }
    }));
}

/// Animate the loader to 100%, fade it out and hand over to the intro. Pages
/// without a loader start the intro right away.
pub fn run_loader(w: LoaderWiring) {
    let Some(loader) = dom::query_one(&w.document, LOADER_SELECTOR) else {
        log::info!("[loader] none on page");
        start_intro(&w);
        return;
    };
    let bar = loader
        .query_selector(LOADER_BAR_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    let label = loader.query_selector(LOADER_PERCENT_SELECTOR).ok().flatten();
    let loader_id = w.targets.borrow_mut().register(loader.clone());

    let mut rng = StdRng::from_entropy();
    let mut progress = LoaderProgress::default();
    let mut handed_over = false;
    let interval: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let interval_tick = interval.clone();

    let id = dom::set_interval(LOADER_TICK_MS, move || {
        let percent = progress.step(&mut rng);
        let (width, text) = style::loader_css(percent);
        if let Some(bar) = &bar {
            _ = bar.style().set_property("width", &width);
        }
        if let Some(label) = &label {
            label.set_text_content(Some(&text));
        }
        if !progress.is_done() || handed_over {
            return;
        }
        handed_over = true;
        if let Some(id) = interval_tick.take() {
            dom::clear_interval(id);
        }
        log::info!("[loader] done");

        let w = w.clone();
        let loader = loader.clone();
        dom::set_timeout(LOADER_HIDE_DELAY_MS as i32, move || {
            let wiring = w.clone();
            w.queue.push(loader_fade(loader_id, &w.timeline, move |_| {
                dom::add_class(&loader, LOADER_DONE_CLASS);
                start_intro(&wiring);
            }));
        });
    });
    interval.set(id);
}
