mod page;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Context;
use fx_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use page::{CountingSurface, PreviewPage};

const FPS: f64 = 60.0;
const DEFAULT_SECONDS: f64 = 12.0;
const DEFAULT_SEED: u64 = 2077;
const VIEWPORT: (f32, f32) = (1280.0, 800.0);
const DOCUMENT_HEIGHT: f32 = 3200.0;
const SCROLL_START_SEC: f64 = 4.0;
const SCROLL_SPEED: f32 = 400.0; // px per second

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {}={:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Page elements the preview animates.
struct Scene {
    intro: IntroTargets,
    loader: TargetId,
    header: TargetId,
    glow: TargetId,
    cards: Vec<TargetId>,
    card_section: TargetId,
    posts: Vec<TargetId>,
    post_section: TargetId,
}

impl Scene {
    fn build(sink: &mut MemorySink, page: &mut PreviewPage) -> Self {
        let intro = IntroTargets {
            hero: Some(sink.spawn()),
            logo_main: Some(sink.spawn()),
            logo_cyan: Some(sink.spawn()),
            logo_pink: Some(sink.spawn()),
            sub_bg: Some(sink.spawn()),
            sub_text: Some(sink.spawn()),
            decor_lines: vec![sink.spawn(), sink.spawn()],
            hero_desc: vec![sink.spawn()],
            stat_items: (0..3).map(|_| sink.spawn()).collect(),
            stat_dividers: (0..2).map(|_| sink.spawn()).collect(),
            stat_counters: [128.0, 42.0, 7.0].map(|n| (sink.spawn(), n)).to_vec(),
            side_decor: vec![sink.spawn()],
        };

        let card_section = sink.spawn();
        page.place(card_section, Rect::new(0.0, 1100.0, VIEWPORT.0, 500.0));
        let cards = (0..3)
            .map(|i| {
                let card = sink.spawn();
                page.place(card, Rect::new(80.0 + i as f32 * 400.0, 1180.0, 360.0, 280.0));
                card
            })
            .collect();

        let post_section = sink.spawn();
        page.place(post_section, Rect::new(0.0, 2000.0, VIEWPORT.0, 900.0));
        let posts = (0..6)
            .map(|i| {
                let post = sink.spawn();
                page.place(post, Rect::new(120.0, 2060.0 + i as f32 * 130.0, 1040.0, 110.0));
                post
            })
            .collect();

        Self {
            intro,
            loader: sink.spawn(),
            header: sink.spawn(),
            glow: sink.spawn(),
            cards,
            card_section,
            posts,
            post_section,
        }
    }
}

/// Pointer path: a slow Lissajous sweep across the viewport.
fn pointer_at(t: f64) -> Vec2 {
    let (w, h) = VIEWPORT;
    Vec2::new(
        w * 0.5 + w * 0.35 * (t * 0.7).sin() as f32,
        h * 0.5 + h * 0.3 * (t * 1.1).cos() as f32,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seconds: f64 = env_or("FX_PREVIEW_SECONDS", DEFAULT_SECONDS)?;
    let seed: u64 = env_or("FX_PREVIEW_SEED", DEFAULT_SEED)?;
    let config = FxConfig::default().sanitized();
    log::info!("[preview] {:.1}s at {} fps, seed {}", seconds, FPS, seed);

    let mut sink = MemorySink::new();
    let page = Rc::new(RefCell::new(PreviewPage::new(
        VIEWPORT.0,
        VIEWPORT.1,
        DOCUMENT_HEIGHT,
    )));
    let scene = Scene::build(&mut sink, &mut page.borrow_mut());

    let mut runner = TimelineRunner::new();
    let queue = runner.queue();

    // Glitch loop, started by the logo sequence.
    let glitch_targets = scene
        .intro
        .glitch_targets()
        .context("preview scene has no glitch layers")?;
    let glitch = Rc::new(RefCell::new(GlitchScheduler::new(
        config.glitch,
        glitch_targets,
        StdRng::seed_from_u64(seed),
    )));

    // Section entrances.
    let section_margin: Margin = SECTION_REVEAL_MARGIN.parse()?;
    let section_reveal = VisibilityConfig {
        threshold: 0.0,
        margin: section_margin,
        ..config.visibility
    };
    let reveal = Rc::new(RefCell::new(VisibilityTrigger::new()));
    {
        let q = queue.clone();
        let cards = scene.cards.clone();
        let on_cards = TriggerEntry::new(scene.card_section, &section_reveal, move |_| {
            log::info!("[reveal] cards entered");
            q.push(card_entrance(&cards));
        });
        let q = queue.clone();
        let posts = scene.posts.clone();
        let timeline_config = config.timeline;
        let on_posts = TriggerEntry::new(scene.post_section, &section_reveal, move |_| {
            log::info!("[reveal] posts entered");
            q.push(post_entrance(&posts, &timeline_config));
        });
        reveal.borrow_mut().register([on_cards, on_posts]);
    }
    runner.enqueue(post_preset(&scene.posts));

    // Scroll-driven handlers, coalesced per frame.
    let mut frames = FrameScheduler::new();
    let progress_mark = Rc::new(Cell::new(0u32));
    let progress_slot = {
        let page = page.clone();
        let mark = progress_mark.clone();
        frames.register("progress", move || {
            let p = page.borrow();
            let progress = reading_progress(p.scroll_y(), p.document_height(), VIEWPORT.1);
            let quarter = (progress * 4.0).floor() as u32;
            if quarter > mark.get() {
                mark.set(quarter);
                log::info!("[preview] reading progress {:.0}%", progress * 100.0);
            }
        })
    };
    let header_slot = {
        let page = page.clone();
        let q = queue.clone();
        let header = scene.header;
        let mut tracker = HeaderTracker::default();
        frames.register("header", move || {
            let update = tracker.update(page.borrow().scroll_y());
            if update.changed {
                q.push_overwrite(header_slide(header, update.hidden));
            }
        })
    };
    let reveal_slot = {
        let page = page.clone();
        let reveal = reveal.clone();
        frames.register("reveal", move || {
            reveal.borrow_mut().check_and_fire(&*page.borrow());
        })
    };

    // Loader hands over to the intro.
    let mut loader_rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut loader = LoaderProgress::default();
    let loader_tick = f64::from(LOADER_TICK_MS) / 1000.0;
    let mut next_loader_tick = 0.0;
    let mut fade_at: Option<f64> = None;

    let (pointer, pointer_reader) = pointer_channel();
    let mut particles = ParticleField::new(config.particles, StdRng::seed_from_u64(seed));
    particles.init_for_bounds(page.borrow().bounds_2d());
    let mut surface = CountingSurface::default();
    let mut follower = Follower::default();
    let mut control = LoopControl::new("preview");

    let total = (seconds * FPS).ceil() as u64;
    for frame in 0..=total {
        let now = frame as f64 / FPS;
        let Some(dt) = control.begin_frame(now) else {
            break;
        };

        if fade_at.is_none() && now >= next_loader_tick {
            next_loader_tick += loader_tick;
            loader.step(&mut loader_rng);
            if loader.is_done() {
                fade_at = Some(now + f64::from(LOADER_HIDE_DELAY_MS) / 1000.0);
                log::info!("[preview] loaded at {:.2}s", now);
            }
        }
        if fade_at.is_some_and(|at| now >= at) {
            fade_at = Some(f64::INFINITY);
            let q = queue.clone();
            let intro = scene.intro.clone();
            let timeline_config = config.timeline;
            let glitch = glitch.clone();
            runner.enqueue(loader_fade(scene.loader, &config.timeline, move |_| {
                let glitch = glitch.clone();
                q.push(intro_timeline(&intro, &timeline_config, move |at| {
                    glitch.borrow_mut().start(at);
                }));
            }));
        }

        if now >= SCROLL_START_SEC {
            let y = (now - SCROLL_START_SEC) as f32 * SCROLL_SPEED;
            page.borrow_mut().scroll_to(y);
            for slot in [progress_slot, header_slot, reveal_slot] {
                frames.request(slot);
            }
        }
        frames.run_frame();

        runner.advance(now, &mut sink);
        glitch.borrow_mut().poll(now, &mut sink);

        let at = pointer_at(now);
        pointer.set(at.x, at.y);
        let glow = follower.step(at, dt);
        sink.write(scene.glow, Property::X, glow.x);
        sink.write(scene.glow, Property::Y, glow.y);

        particles.tick(pointer_reader.position(), dt);
        particles.render(&mut surface);
    }
    control.stop();
    glitch.borrow_mut().stop(&mut sink);

    let (wakes, emitted) = glitch.borrow().counters();
    log::info!(
        "[preview] glitch: {} wakes, {} emitted ({:?})",
        wakes,
        emitted,
        glitch.borrow().state()
    );
    log::info!(
        "[preview] particles: {} alive, {} frames, {} circles, {} lines",
        particles.len(),
        surface.frames,
        surface.circles,
        surface.lines
    );
    log::info!(
        "[preview] reveal pending {}, timelines active {}, style writes {}",
        reveal.borrow().pending(),
        runner.active_len(),
        sink.writes
    );
    Ok(())
}
