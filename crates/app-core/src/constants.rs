// Scroll engine tuning constants shared by every column.

// Responsive breakpoint and resize handling
pub const DESKTOP_BREAKPOINT_PX: f32 = 768.0; // widths above this get the continuous columns
pub const RESIZE_DEBOUNCE_SEC: f32 = 0.2; // resize storms collapse to one transition

// Damped interpolation
pub const SCROLL_LERP: f32 = 0.5; // fraction of the remaining delta consumed per frame
pub const SCROLL_MAX_SPEED: f32 = 160.0; // per-frame displacement clamp in pixels
pub const SETTLE_EPSILON_PX: f32 = 0.1; // below this delta the column counts as settled
pub const VELOCITY_FEEDBACK: f32 = 0.2; // nonlinear acceleration on top of plain lerp
pub const WRAP_VELOCITY_FALLOFF: f32 = 0.5; // velocity multiplier applied at the wrap seam
pub const WRAP_SEED_FACTOR: f32 = 2.0; // content starts this many heights into the buffer

// Wheel input
pub const WHEEL_MAX_DELTA: f32 = 90.0; // raw wheel delta clamp
pub const WHEEL_MULTIPLIER: f32 = 0.8;
pub const WHEEL_TWEEN_SEC: f32 = 0.25; // target transition length per wheel burst
pub const WHEEL_SETTLE_SEC: f32 = 0.15; // quiet period before idle drift resumes

// Shared-state velocity mapping
pub const SHARED_VELOCITY_SCALE: f32 = 0.1; // (target - current) -> published velocity

// Idle drift while no input is in flight
pub const IDLE_DRIFT_PX_PER_SEC: f32 = 30.0;

// Content duplication
pub const COPIES_VIEWPORT_FACTOR: f32 = 8.0; // over-provision for fast scroll velocities
pub const COPIES_MAX: usize = 6; // bounds DOM/GPU cost on very short content
pub const COPIES_MIN: usize = 2; // buffer before and after the seam

// Line distortion
pub const LINE_BASE_AMPLITUDE: f32 = 20.0;
pub const LINE_VELOCITY_MULTIPLIER: f32 = 9.0;
pub const LINE_CULL_MARGIN_PX: f32 = 150.0; // extended viewport window for culling
pub const LINE_RESET_SEC: f32 = 0.3; // ease-out back to neutral after settle

// Velocity bridge into the GPU layer
pub const VELOCITY_SMOOTH_SEC: f32 = 0.2;
pub const VELOCITY_SMOOTH_THRESHOLD: f32 = 0.001; // ignore sub-threshold jitter
