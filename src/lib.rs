pub mod cli;
pub mod loaders;
pub mod parse;
pub mod plot;
pub mod stats;
pub mod viewer;

pub use loaders::{load_frame_log, FrameLog};
pub use plot::{framerate_figure, frametime_figure, Figure};
