// Shared tuning constants used by both web and native front-ends.

// Visibility trigger
pub const REVEAL_THRESHOLD: f32 = 0.1; // fraction of the target box that must be visible
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_SETTLE_DELAY_MS: u32 = 50; // one-shot check for elements visible at rest

// Frame scheduling
pub const FALLBACK_FRAME_MS: i32 = 16; // timer polling when no frame request is available
pub const REFERENCE_FRAME_SEC: f32 = 1.0 / 60.0; // particle velocities are expressed per frame
pub const MAX_FRAME_STEPS: f32 = 3.0; // never integrate more than this many frames at once
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp for loop dt after stalls

// Timeline
pub const DEFAULT_STAGGER_SEC: f64 = 0.1;
pub const DEFAULT_EASING: &str = "power2.out";

// Glitch loop
pub const GLITCH_MIN_INTERVAL_SEC: f64 = 2.0;
pub const GLITCH_INTERVAL_RANGE_SEC: f64 = 3.0;
pub const GLITCH_SKIP_PROBABILITY: f64 = 0.6;
pub const GLITCH_BASE_SKEW_DEG: f32 = -8.0; // resting skew of the main logo layer
pub const GLITCH_SKEW_SPREAD_DEG: f32 = 20.0;
pub const GLITCH_FLASH_OPACITY: f32 = 0.6;
pub const GLITCH_FLASH_SPREAD_PX: f32 = 10.0;
pub const GLITCH_JITTER_SPREAD_PX: f32 = 6.0;

// Particle field
pub const PARTICLE_MAX: usize = 50;
pub const PARTICLE_WIDTH_PER_PARTICLE: f32 = 30.0;
pub const PARTICLE_SPEED_SPAN: f32 = 0.3; // velocity components drawn from ±span/2
pub const PARTICLE_SIZE_MIN: f32 = 0.5;
pub const PARTICLE_SIZE_SPAN: f32 = 2.0;
pub const PARTICLE_OPACITY_MIN: f32 = 0.1;
pub const PARTICLE_OPACITY_SPAN: f32 = 0.5;
pub const ATTRACTION_RADIUS: f32 = 150.0;
pub const ATTRACTION_STRENGTH: f32 = 0.02;
pub const CONNECTION_RADIUS: f32 = 120.0;
pub const CONNECTION_MAX_OPACITY: f32 = 0.1;
pub const CONNECTION_LINE_WIDTH: f32 = 0.5;
pub const MIN_BOUND_EXTENT: f32 = 1.0; // degenerate viewports are clamped to this

// Palette (rgb)
pub const PALETTE_CYAN: [u8; 3] = [0, 240, 255];
pub const PALETTE_PINK: [u8; 3] = [255, 42, 109];

// Pointer-driven effects
pub const MAGNETIC_STRENGTH: f32 = 0.3;
pub const TILT_DIVISOR: f32 = 25.0;
pub const FOLLOW_EASE: f32 = 0.08; // per-frame approach factor of the cursor glow

// Scroll-driven effects
pub const HEADER_SCROLLED_AT: f32 = 50.0;
pub const HEADER_HIDE_AFTER: f32 = 200.0;
pub const HEADER_HIDE_OFFSET: f32 = -100.0;
pub const PARALLAX_DEFAULT_SPEED: f32 = 0.5;

// Loader
pub const LOADER_TICK_MS: i32 = 50;
pub const LOADER_MAX_STEP: f32 = 15.0; // percent per tick
pub const LOADER_HIDE_DELAY_MS: u32 = 300;

// Choreography
pub const GLITCH_START_DELAY_SEC: f64 = 0.5; // gap between the logo sequence and the first glitch
pub const CARD_STAGGER_SEC: f64 = 0.15;
pub const STAT_COUNT_DELAY_SEC: f64 = 0.8; // after the intro starts
pub const STAT_COUNT_DURATION_SEC: f64 = 1.5;
pub const SECTION_REVEAL_MARGIN: &str = "0px 0px -20% 0px"; // section enters at 80% of the viewport
pub const HOVER_ENABLE_DELAY_MS: i32 = 2500; // tilt stays off until card entrances are done
