//! DOM side of the engine seams: elements behind `TargetId`s, inline style
//! writes and layout queries.

use crate::constants::*;
use crate::dom;
use crate::style;
use fnv::{FnvHashMap, FnvHashSet};
use fx_core::{
    GeometrySource, IntroTargets, Property, Rect, StyleSink, TargetId, Viewport, VisualState,
};
use smallvec::SmallVec;
use web_sys as web;

/// Registry of animated elements. Writes accumulate in memory and reach the
/// DOM once per frame in [`DomTargets::flush`].
#[derive(Default)]
pub struct DomTargets {
    elements: Vec<web::HtmlElement>,
    states: FnvHashMap<TargetId, VisualState>,
    dirty: FnvHashSet<TargetId>,
}

impl DomTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `el`; registering the same element twice returns the same
    /// handle.
    pub fn register(&mut self, el: web::HtmlElement) -> TargetId {
        if let Some(i) = self.elements.iter().position(|e| *e == el) {
            return TargetId(i as u32);
        }
        self.elements.push(el);
        TargetId(self.elements.len() as u32 - 1)
    }

    pub fn select_one(&mut self, document: &web::Document, selector: &str) -> Option<TargetId> {
        let found = dom::query_one(document, selector).map(|el| self.register(el));
        if found.is_none() {
            log::debug!("[targets] no element for {}", selector);
        }
        found
    }

    pub fn select_all(&mut self, document: &web::Document, selector: &str) -> Vec<TargetId> {
        dom::query_all(document, selector)
            .into_iter()
            .map(|el| self.register(el))
            .collect()
    }

    /// Hero and logo elements for the intro sequence.
    pub fn select_intro(&mut self, document: &web::Document) -> IntroTargets {
        IntroTargets {
            hero: self.select_one(document, HERO_SELECTOR),
            logo_main: self.select_one(document, LOGO_MAIN_SELECTOR),
            logo_cyan: self.select_one(document, LOGO_CYAN_SELECTOR),
            logo_pink: self.select_one(document, LOGO_PINK_SELECTOR),
            sub_bg: self.select_one(document, SUB_BG_SELECTOR),
            sub_text: self.select_one(document, SUB_TEXT_SELECTOR),
            decor_lines: self.select_all(document, DECOR_LINE_SELECTOR),
            hero_desc: self.select_all(document, HERO_DESC_SELECTOR),
            stat_items: self.select_all(document, STAT_ITEM_SELECTOR),
            stat_dividers: self.select_all(document, STAT_DIVIDER_SELECTOR),
            stat_counters: self.select_counters(document),
            side_decor: self.select_all(document, SIDE_DECOR_SELECTOR),
        }
    }

    /// Stat numbers with a parseable count target.
    fn select_counters(&mut self, document: &web::Document) -> Vec<(TargetId, f32)> {
        let mut counters = Vec::new();
        for el in dom::query_all(document, STAT_COUNTER_SELECTOR) {
            let raw = el.get_attribute(STAT_COUNT_ATTR).unwrap_or_default();
            match raw.trim().parse::<f32>() {
                Ok(value) if value.is_finite() => counters.push((self.register(el), value)),
                _ => log::warn!("[targets] bad {}={:?}, counter skipped", STAT_COUNT_ATTR, raw),
            }
        }
        counters
    }

    #[inline]
    pub fn element(&self, target: TargetId) -> Option<&web::HtmlElement> {
        self.elements.get(target.0 as usize)
    }

    fn state_mut(&mut self, target: TargetId) -> &mut VisualState {
        self.dirty.insert(target);
        self.states.entry(target).or_default()
    }

    /// Push pending writes to inline styles. Returns the number of elements
    /// touched.
    pub fn flush(&mut self) -> usize {
        let dirty: SmallVec<[TargetId; 16]> = self.dirty.drain().collect();
        for target in &dirty {
            let Some(el) = self.elements.get(target.0 as usize) else {
                continue;
            };
            let state = self.states.get(target).copied().unwrap_or_default();
            let css = el.style();
            _ = match style::transform_css(&state, TILT_PERSPECTIVE_PX) {
                Some(t) => css.set_property("transform", &t),
                None => css.remove_property("transform").map(|_| ()),
            };
            _ = match style::opacity_css(&state) {
                Some(o) => css.set_property("opacity", &o),
                None => css.remove_property("opacity").map(|_| ()),
            };
            if let Some(text) = style::counter_text(&state) {
                el.set_text_content(Some(&text));
            }
        }
        dirty.len()
    }
}

impl StyleSink for DomTargets {
    fn is_live(&self, target: TargetId) -> bool {
        self.element(target).is_some_and(|el| el.is_connected())
    }

    fn read(&self, target: TargetId, prop: Property) -> f32 {
        self.states
            .get(&target)
            .map(|s| s.get(prop))
            .unwrap_or_else(|| VisualState::default().get(prop))
    }

    fn write(&mut self, target: TargetId, prop: Property, value: f32) {
        if !self.is_live(target) {
            return;
        }
        self.state_mut(target).set(prop, value);
    }

    fn clear(&mut self, target: TargetId, prop: Property) {
        if self.states.contains_key(&target) {
            self.state_mut(target).clear(prop);
        }
    }
}

impl GeometrySource for DomTargets {
    fn viewport(&self) -> Viewport {
        let (w, h) = dom::viewport_size();
        Viewport {
            scroll_y: dom::scroll_y(),
            ..Viewport::new(w, h)
        }
    }

    fn bounds(&self, target: TargetId) -> Option<Rect> {
        self.element(target)
            .filter(|el| el.is_connected())
            .map(|el| dom::element_rect(el))
    }
}
