pub mod frame_log;

pub use frame_log::{load_frame_log, FrameLog, DEFAULT_SKIP, FRAMETIME_DIVISOR, MICROS_PER_SECOND};
