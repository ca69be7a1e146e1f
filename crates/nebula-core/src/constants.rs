use crate::color::Rgb;

// Shared tuning constants for the nebula backdrop (web and native front-ends).

// Field sizes
pub const STAR_COUNT: usize = 300;
pub const MIST_LAYERS: usize = 20;
pub const BEAM_COUNT: usize = 3;

// Clock
pub const TIME_STEP: f32 = 0.01; // global time units added per nominal frame
// Common period of every sin() of t the renderer evaluates; t wraps here.
pub const TIME_PERIOD: f32 = 4.0 * std::f32::consts::PI;
pub const NOMINAL_FPS: f32 = 60.0; // frames per second a step unit represents
pub const MAX_ELAPSED_UNITS: f32 = 4.0; // cap on catch-up after a stalled frame

// Stars
pub const BRIGHT_STAR_PROBABILITY: f32 = 0.02;
pub const STAR_SIZE_SMALL_MAX: f32 = 1.5;
pub const STAR_SIZE_BRIGHT_MAX: f32 = 3.0;
pub const STAR_BASE_ALPHA_MIN: f32 = 0.2;
pub const STAR_BASE_ALPHA_SPAN: f32 = 0.8;
pub const STAR_TWINKLE_RATE_MAX: f32 = 0.05;
pub const TWINKLE_FREQUENCY: f32 = 2.0; // multiplier on t inside the twinkle sine
pub const TWINKLE_AMPLITUDE: f32 = 0.3;
pub const BRIGHT_STAR_MIN_SIZE: f32 = 2.0; // stars larger than this get a halo
pub const HALO_RADIUS_FACTOR: f32 = 4.0;
pub const HALO_ALPHA_FACTOR: f32 = 0.2;
pub const STAR_COLOR: Rgb = Rgb::new(255, 255, 255);
pub const HALO_COLOR: Rgb = Rgb::new(200, 220, 255);

// Mist
pub const MIST_RADIUS_JITTER: f32 = 300.0; // px added on top of width / 4
pub const MIST_RADIUS_WIDTH_DIVISOR: f32 = 4.0;
pub const MIST_ANGULAR_SPEED_SPAN: f32 = 0.002; // signed, centred on zero
pub const MIST_HIGHLIGHT_THRESHOLD: f32 = 0.8; // draws above this are highlights
pub const MIST_ALPHA_HIGHLIGHT: f32 = 0.05;
pub const MIST_ALPHA_BASE: f32 = 0.02;
pub const MIST_MID_STOP: f32 = 0.6;
pub const MIST_MID_ALPHA: f32 = 0.01;
pub const MIST_ROTATION_FACTOR: f32 = 0.5; // drawn rotation relative to heading
pub const MIST_WRAP_MARGIN: f32 = 2.0; // in radii beyond the viewport edge
pub const DRIFT_STEP: f32 = 0.5; // px per nominal frame

// Deep-space palette: navy to cyan with a faint purple
pub const MIST_PALETTE: [Rgb; 6] = [
    Rgb::new(4, 14, 28),     // deepest navy
    Rgb::new(10, 30, 60),    // dark blue
    Rgb::new(30, 60, 100),   // mid blue
    Rgb::new(60, 120, 180),  // soft blue
    Rgb::new(100, 200, 255), // cyan highlight
    Rgb::new(150, 50, 200),  // subtle purple
];

// Beams
pub const BEAM_SPACING: f32 = 300.0; // horizontal px between beam origins
pub const BEAM_ORIGIN_Y: f32 = -100.0; // above the top edge
pub const BEAM_BASE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
pub const BEAM_SWAY_FREQUENCY: f32 = 0.5;
pub const BEAM_SWAY_AMPLITUDE: f32 = 0.2; // radians
pub const BEAM_BASE_WIDTH: f32 = 200.0;
pub const BEAM_WIDTH_AMPLITUDE: f32 = 50.0;
pub const BEAM_LENGTH_FACTOR: f32 = 1.5; // times canvas height, covers the rotated rect
pub const BEAM_TOP: (Rgb, f32) = (Rgb::new(200, 230, 255), 0.03);
pub const BEAM_MID: (Rgb, f32) = (Rgb::new(100, 150, 255), 0.01);

// Background
pub const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
