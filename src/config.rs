// Configuration file, all engine output in real-world meters (1 unit = 1 meter)
// Configuration records are edited in centimeters, the engine converts on entry

pub const CM_PER_METER: f32 = 100.0;

// Board (panel) thickness, meters
pub const BOARD_THICKNESS: f32 = 0.032;

// Dimension clamp ranges, centimeters
pub const WIDTH_MIN: f32 = 60.0;
pub const WIDTH_MAX: f32 = 320.0;
pub const HEIGHT_MIN: f32 = 180.0;
pub const HEIGHT_MAX: f32 = 280.0;
pub const DEPTH_MIN: f32 = 40.0;
pub const DEPTH_MAX: f32 = 100.0;

pub const FULL_HEIGHT: f32 = 260.0;          // ceiling height when full-height is on
pub const FULL_HEIGHT_RELEASE_CAP: f32 = 240.0; // height cap when full-height is turned off

pub const MAX_COLUMNS: usize = 5;

// Carcass clearances, multiples of the board thickness
pub const INTERIOR_DEPTH_FACTOR: f32 = 1.2;  // back clearance differs from side clearance
pub const INTERIOR_BOTTOM_FACTOR: f32 = 1.1;
pub const MIN_INTERIOR_FACTOR: f32 = 3.0;    // floor for any interior extent
pub const COLUMN_DEPTH_CLEARANCE: f32 = 0.02;
pub const MIN_COLUMN_DEPTH: f32 = 0.08;

// Column layout
pub const SIDE_PANEL_ALLOWANCE: f32 = 1.2;   // x thickness, subtracted from column width
pub const USABLE_WIDTH_FLOOR: f32 = 3.0;     // x thickness
pub const EFFECTIVE_HEIGHT_FACTOR: f32 = 1.5;
pub const FACE_FRAME_RATIO: f32 = 0.08;      // share of usable depth reserved at the front
pub const FACE_FRAME_MAX: f32 = 0.04;
pub const SHELF_LIP_DEPTH: f32 = 0.012;
pub const RAIL_RADIUS: f32 = 0.01;
pub const RAIL_LENGTH_RATIO: f32 = 0.94;
pub const RAIL_FRONT_SETBACK: f32 = 0.05;
pub const RAIL_SUPPORT_SIZE: f32 = 0.03;
pub const SHOE_SHELF_BASE: f32 = 0.12;       // first shoe shelf above the column floor
pub const SHOE_SHELF_STEP: f32 = 0.12;       // share of effective height between shoe shelves
pub const SHOE_SHELF_TILT: f32 = 0.4;        // radians, forward tilt
pub const CUBBY_HEIGHT_RATIO: f32 = 0.8;
pub const EMPHASIS_ACTIVE_SCALE: f32 = 1.05;
pub const EMPHASIS_RESET_SCALE: f32 = 0.82;
pub const EMPHASIS_RATE: f32 = 0.18;         // approach per 60 Hz frame

// Doors
pub const DOOR_GAP: f32 = 0.01;
pub const DOOR_THICKNESS: f32 = 0.02;
pub const DOOR_FACE_OFFSET: f32 = 0.005;
pub const SLIDING_OVERLAP: f32 = 0.03;
pub const HINGED_HANDLE_INSET: f32 = 0.08;
pub const SLIDING_HANDLE_INSET: f32 = 0.12;
pub const DOOR_TRIM_WIDTH: f32 = 0.02;
pub const SLIDING_FRAME_WIDTH: f32 = 0.04;   // stiles and rails around the glass

// Room (showroom) bounds, meters
pub const ROOM_HALF_WIDTH: f32 = 1.6;
pub const ROOM_BACK_WALL: f32 = -1.2;
pub const ROOM_DEPTH: f32 = 4.0;
pub const ROOM_HEIGHT: f32 = 3.0;
pub const WALL_GAP: f32 = 0.01;

// Colors (sRGB hex)
pub const ACCENT_COLOR: &str = "#d9212a";
pub const FALLBACK_CABINET_COLOR: &str = "#d0cec6";
pub const FALLBACK_INTERIOR_COLOR: &str = "#f1ede4";
pub const METAL_COLOR: &str = "#c5c6ce";
pub const FRAME_COLOR: &str = "#c7c9d4";
pub const KNOB_COLOR: &str = "#1f1f1f";
pub const GLASS_COLOR: &str = "#d8e4ec";
pub const GLASS_OPACITY: f32 = 0.6;

// Catalog files read at startup, the compiled-in copies are used when these fail
pub const CATALOG_DIR: &str = "assets/catalog";
pub const MODULE_CATALOG_FILE: &str = "modules.json";
pub const SWATCH_CATALOG_FILE: &str = "swatches.json";
