use glam::DVec2;

use crate::loaders::FrameLog;
use crate::stats::{framerate, FramerateError};

/// Pixels per figure size unit
pub const DEFAULT_DPI: f64 = 100.0;

/// Scatter marker area in square points for the frametime view
pub const FRAMETIME_MARKER_SIZE: f32 = 0.5;

/// Smallest marker radius in pixels that stays visible on screen
pub const MIN_MARKER_RADIUS: f32 = 1.0;

const POINTS_PER_INCH: f64 = 72.0;

pub const TIME_LABEL: &str = "Time (seconds)";
pub const FRAMETIME_LABEL: &str = "Frametime (ms)";
pub const FRAMERATE_LABEL: &str = "Framerate (FPS)";

/// Figure dimensions in size units (inches)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Logical pixel dimensions at the given resolution
    pub fn pixels(&self, dpi: f64) -> (u32, u32) {
        (
            (self.width * dpi).round() as u32,
            (self.height * dpi).round() as u32,
        )
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::new(6.0, 4.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// Unconnected markers
    Scatter { points: Vec<DVec2>, marker_size: f32 },
    /// Points joined in order
    Line { points: Vec<DVec2> },
}

impl Series {
    pub fn points(&self) -> &[DVec2] {
        match self {
            Series::Scatter { points, .. } | Series::Line { points } => points,
        }
    }

    /// Finite points as `[x, y]` pairs for the plot widget
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points()
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| p.to_array())
            .collect()
    }
}

/// Radius in pixels of a marker whose area is `marker_size` square points
pub fn marker_radius(marker_size: f32, dpi: f64) -> f32 {
    let diameter_pt = marker_size.max(0.0).sqrt() as f64;
    let radius_px = (diameter_pt / 2.0 * dpi / POINTS_PER_INCH) as f32;
    radius_px.max(MIN_MARKER_RADIUS)
}

/// A single chart shown in its own window
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub size: FigureSize,
    pub x_label: String,
    pub y_label: String,
    pub series: Series,
}

impl Figure {
    pub fn new(title: impl Into<String>, series: Series) -> Self {
        Self {
            title: title.into(),
            size: FigureSize::default(),
            x_label: String::new(),
            y_label: String::new(),
            series,
        }
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<DVec2> {
    xs.iter().zip(ys).map(|(&x, &y)| DVec2::new(x, y)).collect()
}

/// Scatter of frametime against playback time
pub fn frametime_figure(log: &FrameLog) -> Figure {
    let series = Series::Scatter {
        points: zip_points(log.time(), log.frametime()),
        marker_size: FRAMETIME_MARKER_SIZE,
    };

    Figure::new("Frametime", series).with_labels(TIME_LABEL, FRAMETIME_LABEL)
}

/// Line of framerate against playback time; fails on a zero frametime
pub fn framerate_figure(log: &FrameLog) -> Result<Figure, FramerateError> {
    let fps = framerate(log.frametime())?;
    let series = Series::Line {
        points: zip_points(log.time(), &fps),
    };

    Ok(Figure::new("Framerate", series).with_labels(TIME_LABEL, FRAMERATE_LABEL))
}
