pub mod figure;

pub use figure::{
    framerate_figure, frametime_figure, marker_radius, Figure, FigureSize, Series, DEFAULT_DPI,
    FRAMERATE_LABEL, FRAMETIME_LABEL, FRAMETIME_MARKER_SIZE, MIN_MARKER_RADIUS, TIME_LABEL,
};
