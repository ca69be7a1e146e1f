// Browser-side constants for the Canvas 2D front-end.

pub const DEFAULT_CANVAS_ID: &str = "nebula-canvas"; // used when mount() gets no id
pub const CONTEXT_2D: &str = "2d";
pub const RESIZE_EVENT: &str = "resize";
pub const MIN_BACKING_DIM: u32 = 1; // canvas backing store never collapses to zero
