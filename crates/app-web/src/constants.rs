// Frontend-only tuning constants; engine tuning lives in app-core.

// Section hooks in the page markup
pub const BIO_SECTION_ID: &str = "bio-section";
pub const PROJECTS_CONTAINER_SELECTOR: &str = "#projects .container-projects";
pub const WEBGL_CANVAS_ID: &str = "webgl";

// Distortion layer
pub const MEDIA_SELECTOR: &str = ".project-item img";
pub const OBSERVER_MARGIN_PX: i32 = 100; // extends the in-view window on all sides
pub const MIN_FRAME_INTERVAL_SEC: f32 = 1.0 / 60.0; // distortion loop frame-rate cap
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Columns
pub const SPLIT_WORD_SELECTOR: &str = ".splitting .word";
pub const COLUMN_CONTENT_SELECTOR: &str = ".column-content";
pub const PROJECTS_LIST_SELECTOR: &str = "ul";
pub const FRAME_DT_CLAMP_SEC: f32 = 0.1; // a tab restore must not teleport the columns
