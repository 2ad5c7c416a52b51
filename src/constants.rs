/// Page hooks and web-host tuning.
///
/// Selectors and class names are the contract with the page templates; the
/// numbers tune host behavior only. Engine defaults live in
/// `fx_core::constants`.
// Loader
pub const LOADER_SELECTOR: &str = ".page-loader";
pub const LOADER_BAR_SELECTOR: &str = ".loader-progress";
pub const LOADER_PERCENT_SELECTOR: &str = ".loader-percent";
pub const LOADER_DONE_CLASS: &str = "loaded";

// Hero and logo layers
pub const HERO_SELECTOR: &str = ".hero-section";
pub const LOGO_MAIN_SELECTOR: &str = ".logo-main";
pub const LOGO_CYAN_SELECTOR: &str = ".logo-cyan";
pub const LOGO_PINK_SELECTOR: &str = ".logo-pink";
pub const SUB_BG_SELECTOR: &str = ".sub-bg";
pub const SUB_TEXT_SELECTOR: &str = ".sub-text";
pub const DECOR_LINE_SELECTOR: &str = ".decor-line";
pub const HERO_DESC_SELECTOR: &str = ".hero-desc";
pub const STAT_ITEM_SELECTOR: &str = ".stat-item";
pub const STAT_DIVIDER_SELECTOR: &str = ".stat-divider";
pub const STAT_COUNTER_SELECTOR: &str = ".stat-number[data-count]";
pub const STAT_COUNT_ATTR: &str = "data-count";
pub const SIDE_DECOR_SELECTOR: &str = ".side-decor";

// Sections
pub const CARD_SECTION_SELECTOR: &str = ".series-section";
pub const CARD_SELECTOR: &str = ".series-card";
pub const POST_SECTION_SELECTOR: &str = ".recent-section";
pub const POST_SELECTOR: &str = ".post-item";

// Generic scroll reveal
pub const REVEAL_SELECTOR: &str = ".scroll-animate, .card-animate";
pub const REVEALED_CLASS: &str = "is-visible";

// Scroll effects
pub const HEADER_SELECTOR: &str = ".site-header";
pub const HEADER_SCROLLED_CLASS: &str = "scrolled";
pub const PROGRESS_BAR_CLASS: &str = "progress-bar";
pub const ARTICLE_SELECTOR: &str = ".post-content"; // progress bar only on article pages
pub const PARALLAX_SELECTOR: &str = ".parallax";
pub const PARALLAX_SPEED_ATTR: &str = "data-parallax-speed";

// Pointer effects
pub const MAGNETIC_SELECTOR: &str = ".read-more, .pagination a";
pub const CURSOR_GLOW_CLASS: &str = "cursor-glow";

// Particle canvas
pub const PARTICLE_CANVAS_ID: &str = "particle-canvas";
/// Prefix of `data-*` attributes read as engine overrides.
pub const CONFIG_ATTR_PREFIX: &str = "data-fx-";

// Document state
pub const JS_ENABLED_CLASS: &str = "js-enabled";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Rendering
pub const TILT_PERSPECTIVE_PX: f32 = 1000.0;
