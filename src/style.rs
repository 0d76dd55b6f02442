use crate::error::PlotError;
use plotters::style::RGBColor;

pub const DEFAULT_WINDOW_SIZE: usize = 1250;
pub const DEFAULT_FIGURE_WIDTH: f64 = 5.2;
pub const DEFAULT_FIGURE_HEIGHT: f64 = 3.;
pub const DEFAULT_DPI: f64 = 100.;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// points per inch, font sizes and line widths are given in points
const POINTS_PER_INCH: f64 = 72.;

/// Where a legend would go if the figure had one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendPosition {
    UpperRight,
}

/// Look of the time error plot, passed explicitly to every plotting call.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// number of samples taken from the head of the column
    pub window_size: usize,
    /// figure width, inches
    pub figure_width: f64,
    /// figure height, inches
    pub figure_height: f64,
    pub dpi: f64,
    pub font_family: String,
    /// points
    pub font_size: f64,
    /// points
    pub line_width: f64,
    pub line_color: RGBColor,
    /// not read by the svg backend, viewers antialias the paths
    pub antialiased: bool,
    pub grid_color: RGBColor,
    pub grid_alpha: f64,
    /// points
    pub grid_width: f64,
    /// not read when rendering, the time error figure has no legend entries
    pub legend_position: LegendPosition,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            figure_width: DEFAULT_FIGURE_WIDTH,
            figure_height: DEFAULT_FIGURE_HEIGHT,
            dpi: DEFAULT_DPI,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 8.,
            line_width: 0.75,
            line_color: RGBColor(0x1f, 0x77, 0xb4),
            antialiased: true,
            grid_color: RGBColor(0x26, 0x26, 0x26),
            grid_alpha: 0.15,
            grid_width: 0.5,
            legend_position: LegendPosition::UpperRight,
        }
    }
}

impl PlotStyle {
    pub fn validate(&self) -> Result<(), PlotError> {
        if self.window_size < 2 {
            return Err(PlotError::InvalidStyle(format!(
                "window size must be at least 2, got {}",
                self.window_size
            )));
        }
        let positive = [
            ("figure width", self.figure_width),
            ("figure height", self.figure_height),
            ("dpi", self.dpi),
            ("font size", self.font_size),
            ("line width", self.line_width),
            ("grid width", self.grid_width),
        ];
        for (name, v) in positive.iter() {
            if !(v.is_finite() && *v > 0.) {
                return Err(PlotError::InvalidStyle(format!(
                    "{} must be positive, got {}",
                    name, v
                )));
            }
        }
        if !(0. ..=1.).contains(&self.grid_alpha) {
            return Err(PlotError::InvalidStyle(format!(
                "grid alpha must be within [0, 1], got {}",
                self.grid_alpha
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(PlotError::InvalidStyle("empty font family".to_string()));
        }
        Ok(())
    }

    /// canvas size in pixels
    pub fn size_px(&self) -> (u32, u32) {
        (
            (self.figure_width * self.dpi).round() as u32,
            (self.figure_height * self.dpi).round() as u32,
        )
    }

    pub fn font_px(&self) -> f64 {
        self.font_size * self.dpi / POINTS_PER_INCH
    }

    pub fn line_px(&self) -> u32 {
        points_to_stroke(self.line_width, self.dpi)
    }

    pub fn grid_px(&self) -> u32 {
        points_to_stroke(self.grid_width, self.dpi)
    }
}

/// stroke widths are whole pixels, never thinner than one
fn points_to_stroke(points: f64, dpi: f64) -> u32 {
    let px = (points * dpi / POINTS_PER_INCH).round() as u32;
    px.max(1)
}
