//! Page timelines built from the engine primitives: the intro (logo) sequence,
//! section entrances, hover responses, header slide and loader fade.
//!
//! Optional elements are `Option`/empty slices; a missing one simply drops
//! its steps, it never aborts the sequence.

use crate::config::TimelineConfig;
use crate::constants::*;
use crate::easing::Easing;
use crate::glitch::GlitchTargets;
use crate::target::{Property, TargetId};
use crate::timeline::{Offset, Timeline};
use crate::tween::TweenSpec;
use glam::Vec2;

/// Elements taking part in the intro sequence.
#[derive(Clone, Debug, Default)]
pub struct IntroTargets {
    pub hero: Option<TargetId>,
    pub logo_main: Option<TargetId>,
    pub logo_cyan: Option<TargetId>,
    pub logo_pink: Option<TargetId>,
    pub sub_bg: Option<TargetId>,
    pub sub_text: Option<TargetId>,
    pub decor_lines: Vec<TargetId>,
    pub hero_desc: Vec<TargetId>,
    pub stat_items: Vec<TargetId>,
    pub stat_dividers: Vec<TargetId>,
    /// Stat numbers and the value each counts up to.
    pub stat_counters: Vec<(TargetId, f32)>,
    pub side_decor: Vec<TargetId>,
}

impl IntroTargets {
    /// Layers for the glitch loop; all three must exist.
    pub fn glitch_targets(&self) -> Option<GlitchTargets> {
        Some(GlitchTargets {
            main: self.logo_main?,
            cyan: self.logo_cyan?,
            pink: self.logo_pink?,
        })
    }
}

/// Logo entrance. `on_ready` runs half a second after the last visible step
/// and is where the host starts the glitch loop; it is only scheduled when
/// every glitch layer exists.
pub fn logo_timeline(
    targets: &IntroTargets,
    config: &TimelineConfig,
    on_ready: impl FnMut(f64) + 'static,
) -> Timeline {
    let ease = config.default_easing;
    let mut tl = Timeline::new("logo");
    let Some(main) = targets.logo_main else {
        log::warn!("[timeline] logo: main layer missing, nothing to play");
        return tl;
    };

    // Resting states the entrance animates out of.
    let at_zero = Offset::Absolute(0.0);
    tl.tween(
        main,
        TweenSpec::set()
            .prop(Property::SkewX, -30.0)
            .prop(Property::Opacity, 0.0),
        at_zero,
    );
    if let Some(bg) = targets.sub_bg {
        tl.tween(bg, TweenSpec::set().prop(Property::ScaleX, 0.0), at_zero);
    }
    for line in &targets.decor_lines {
        tl.tween(*line, TweenSpec::set().prop(Property::ScaleX, 0.0), at_zero);
    }
    for desc in &targets.hero_desc {
        tl.tween(
            *desc,
            TweenSpec::set()
                .prop(Property::Opacity, 0.0)
                .prop(Property::Y, 20.0),
            at_zero,
        );
    }

    // Skew in.
    tl.then(
        main,
        TweenSpec::to(0.3)
            .prop(Property::SkewX, GLITCH_BASE_SKEW_DEG)
            .prop(Property::Opacity, 1.0)
            .ease(ease),
    );

    // Pink flicker.
    if let Some(pink) = targets.logo_pink {
        let flicker = [
            (0.7, -5.0, 0.05),
            (0.0, 0.0, 0.05),
            (0.5, 3.0, 0.04),
            (0.0, 0.0, 0.05),
        ];
        for (opacity, x, duration) in flicker {
            tl.then(
                pink,
                TweenSpec::to(duration)
                    .prop(Property::Opacity, opacity)
                    .prop(Property::X, x),
            );
        }
    }

    // Shake.
    for (x, duration) in [(3.0, 0.02), (-2.0, 0.02), (0.0, 0.03)] {
        tl.then(main, TweenSpec::to(duration).prop(Property::X, x));
    }

    if let Some(bg) = targets.sub_bg {
        tl.tween(
            bg,
            TweenSpec::to(0.4).prop(Property::ScaleX, 1.0).ease(ease),
            Offset::Relative(-0.1),
        );
    }
    if let Some(text) = targets.sub_text {
        tl.tween(
            text,
            TweenSpec::from(0.4)
                .prop(Property::Y, 15.0)
                .prop(Property::Opacity, 0.0)
                .ease(ease)
                .clear_on_complete(),
            Offset::Relative(-0.3),
        );
    }
    if !targets.decor_lines.is_empty() {
        tl.stagger(
            &targets.decor_lines,
            &TweenSpec::to(0.3).prop(Property::ScaleX, 1.0).ease(ease),
            0.0,
            Offset::Relative(-0.1),
        );
    }
    if !targets.hero_desc.is_empty() {
        tl.stagger(
            &targets.hero_desc,
            &TweenSpec::to(0.4)
                .prop(Property::Opacity, 1.0)
                .prop(Property::Y, 0.0),
            0.0,
            Offset::Relative(-0.1),
        );
    }
    if !targets.stat_items.is_empty() {
        tl.stagger(
            &targets.stat_items,
            &TweenSpec::from(0.4)
                .prop(Property::Y, 20.0)
                .prop(Property::Opacity, 0.0)
                .ease(ease)
                .clear_on_complete(),
            config.stagger_interval,
            Offset::Relative(-0.2),
        );
    }
    if !targets.stat_dividers.is_empty() {
        tl.stagger(
            &targets.stat_dividers,
            &TweenSpec::from(0.3)
                .prop(Property::ScaleY, 0.0)
                .prop(Property::Opacity, 0.0)
                .ease(ease)
                .clear_on_complete(),
            config.stagger_interval,
            Offset::Relative(-0.3),
        );
    }

    if targets.glitch_targets().is_some() {
        tl.call(on_ready, Offset::Relative(GLITCH_START_DELAY_SEC));
    } else {
        log::warn!("[timeline] logo: glitch layers missing, loop will not start");
    }
    tl
}

/// Stat numbers count up from their current value to their target, landing
/// on whole numbers throughout.
pub fn stat_counters(counters: &[(TargetId, f32)]) -> Timeline {
    let mut tl = Timeline::new("counters");
    for (target, value) in counters {
        tl.tween(
            *target,
            TweenSpec::to(STAT_COUNT_DURATION_SEC)
                .prop(Property::Counter, value.trunc())
                .ease(Easing::PowerOut(2)),
            Offset::Absolute(0.0),
        );
    }
    tl
}

/// Full page intro: hero shown, logo sequence, side decoration fading in one
/// second before the logo ends, stat numbers counting up.
pub fn intro_timeline(
    targets: &IntroTargets,
    config: &TimelineConfig,
    on_ready: impl FnMut(f64) + 'static,
) -> Timeline {
    let mut master = Timeline::new("intro");
    if let Some(hero) = targets.hero {
        master.tween(
            hero,
            TweenSpec::set().prop(Property::Opacity, 1.0),
            Offset::Absolute(0.0),
        );
    }
    master.add(logo_timeline(targets, config, on_ready), Offset::default());
    if !targets.side_decor.is_empty() {
        master.stagger(
            &targets.side_decor,
            &TweenSpec::to(0.8)
                .prop(Property::Opacity, 1.0)
                .ease(config.default_easing),
            0.0,
            Offset::Relative(-1.0),
        );
    }
    if !targets.stat_counters.is_empty() {
        master.add(
            stat_counters(&targets.stat_counters),
            Offset::Absolute(STAT_COUNT_DELAY_SEC),
        );
    }
    master
}

/// Cards rise into place one after another.
pub fn card_entrance(cards: &[TargetId]) -> Timeline {
    let mut tl = Timeline::new("cards");
    tl.stagger(
        cards,
        &TweenSpec::from(0.8)
            .prop(Property::Y, 60.0)
            .prop(Property::Opacity, 0.0)
            .ease(Easing::PowerOut(3))
            .clear_on_complete(),
        CARD_STAGGER_SEC,
        Offset::Absolute(0.0),
    );
    tl
}

/// Hidden state of list items before their section enters.
pub fn post_preset(posts: &[TargetId]) -> Timeline {
    let mut tl = Timeline::new("posts:preset");
    tl.stagger(
        posts,
        &TweenSpec::set()
            .prop(Property::X, -30.0)
            .prop(Property::Opacity, 0.0),
        0.0,
        Offset::Absolute(0.0),
    );
    tl
}

/// List items slide in from the left.
pub fn post_entrance(posts: &[TargetId], config: &TimelineConfig) -> Timeline {
    let mut tl = Timeline::new("posts");
    tl.stagger(
        posts,
        &TweenSpec::to(0.6)
            .prop(Property::X, 0.0)
            .prop(Property::Opacity, 1.0)
            .ease(Easing::PowerOut(3)),
        config.stagger_interval,
        Offset::Absolute(0.0),
    );
    tl
}

pub fn tilt_to(card: TargetId, angles: (f32, f32)) -> Timeline {
    let mut tl = Timeline::new("tilt");
    tl.then(
        card,
        TweenSpec::to(0.3)
            .prop(Property::RotateX, angles.0)
            .prop(Property::RotateY, angles.1)
            .ease(Easing::PowerOut(2)),
    );
    tl
}

pub fn tilt_release(card: TargetId) -> Timeline {
    let mut tl = Timeline::new("tilt:release");
    tl.then(
        card,
        TweenSpec::to(0.5)
            .prop(Property::RotateX, 0.0)
            .prop(Property::RotateY, 0.0)
            .prop(Property::Y, 0.0)
            .ease(Easing::PowerOut(2))
            .clear_on_complete(),
    );
    tl
}

pub fn magnetic_to(el: TargetId, offset: Vec2) -> Timeline {
    let mut tl = Timeline::new("magnetic");
    tl.then(
        el,
        TweenSpec::to(0.3)
            .prop(Property::X, offset.x)
            .prop(Property::Y, offset.y)
            .ease(Easing::PowerOut(2)),
    );
    tl
}

/// Spring back to rest.
pub fn magnetic_release(el: TargetId) -> Timeline {
    let mut tl = Timeline::new("magnetic:release");
    tl.then(
        el,
        TweenSpec::to(0.5)
            .prop(Property::X, 0.0)
            .prop(Property::Y, 0.0)
            .ease(Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            }),
    );
    tl
}

pub fn header_slide(header: TargetId, hidden: bool) -> Timeline {
    let y = if hidden { HEADER_HIDE_OFFSET } else { 0.0 };
    let mut tl = Timeline::new("header");
    tl.then(header, TweenSpec::to(0.3).prop(Property::Y, y));
    tl
}

/// Fade the loader out, then run `on_done`.
pub fn loader_fade(
    loader: TargetId,
    config: &TimelineConfig,
    on_done: impl FnMut(f64) + 'static,
) -> Timeline {
    let mut tl = Timeline::new("loader");
    tl.then(
        loader,
        TweenSpec::to(0.5)
            .prop(Property::Opacity, 0.0)
            .ease(config.default_easing),
    );
    tl.on_complete(on_done);
    tl
}
