//! SVG bar chart of a ROAS estimate with asymmetric error whiskers.

use std::path::Path;

use askama::Template;
use tracing::info;

use crate::error::ChartError;

/// 8 x 1 inches at 100 dpi.
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 100;
pub const CAP_SIZE: f64 = 5.0;

const PLOT_LEFT: f64 = 60.0;
const PLOT_RIGHT: f64 = 780.0;
const PLOT_TOP: f64 = 22.0;
const PLOT_BOTTOM: f64 = 68.0;
const BAR_FILL: f64 = 0.8;
const TICK_COUNT: usize = 5;

/// A validated ROAS value with its interval, ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct RoasChart {
    roas: f64,
    ci_lower: f64,
    ci_upper: f64,
}

#[derive(Debug)]
struct Tick {
    x: f64,
    label: String,
}

#[derive(Template)]
#[template(path = "roas_chart.svg", escape = "html")]
struct ChartTemplate<'a> {
    width: u32,
    height: u32,
    title: &'a str,
    x_label: &'a str,
    category: &'a str,
    title_x: f64,
    plot_left: f64,
    plot_right: f64,
    plot_top: f64,
    plot_bottom: f64,
    center_y: f64,
    bar_y: f64,
    bar_width: f64,
    bar_height: f64,
    whisker_from: f64,
    whisker_to: f64,
    cap_top: f64,
    cap_bottom: f64,
    tick_label_y: f64,
    x_label_y: f64,
    ticks: Vec<Tick>,
}

impl RoasChart {
    /// Build a chart for `roas` with bounds `[ci_lower, ci_upper]`.
    ///
    /// The infinite zero-spend sentinel is rejected here.
    pub fn new(roas: f64, ci_lower: f64, ci_upper: f64) -> Result<Self, ChartError> {
        for (field, value) in [("roas", roas), ("ci_lower", ci_lower), ("ci_upper", ci_upper)] {
            if !value.is_finite() {
                return Err(ChartError::NonFinite { field, value });
            }
        }
        if ci_lower > ci_upper {
            return Err(ChartError::InvertedInterval {
                lower: ci_lower,
                upper: ci_upper,
            });
        }
        Ok(Self {
            roas,
            ci_lower,
            ci_upper,
        })
    }

    /// Whisker lengths below and above the bar end.
    pub fn errors(&self) -> (f64, f64) {
        (
            (self.roas - self.ci_lower).max(0.0),
            (self.ci_upper - self.roas).max(0.0),
        )
    }

    /// Right edge of the x axis.
    pub fn axis_max(&self) -> f64 {
        let (_, above) = self.errors();
        let extent = self.roas.max(self.roas + above).max(0.0);
        nice_ceiling(extent * 1.05)
    }

    /// Map a ROAS value onto the horizontal pixel axis.
    pub fn scale(&self, value: f64) -> f64 {
        PLOT_LEFT + value / self.axis_max() * (PLOT_RIGHT - PLOT_LEFT)
    }

    pub fn render(&self) -> Result<String, ChartError> {
        let (below, above) = self.errors();
        let axis_max = self.axis_max();
        let center_y = (PLOT_TOP + PLOT_BOTTOM) / 2.0;
        let bar_height = (PLOT_BOTTOM - PLOT_TOP) * BAR_FILL;
        let step = axis_max / TICK_COUNT as f64;
        let ticks = (0..=TICK_COUNT)
            .map(|i| {
                let value = step * i as f64;
                Tick {
                    x: self.scale(value),
                    label: format_tick(value, step),
                }
            })
            .collect();

        let template = ChartTemplate {
            width: WIDTH,
            height: HEIGHT,
            title: "ROAS with Confidence Interval",
            x_label: "ROAS",
            category: "ROAS",
            title_x: (PLOT_LEFT + PLOT_RIGHT) / 2.0,
            plot_left: PLOT_LEFT,
            plot_right: PLOT_RIGHT,
            plot_top: PLOT_TOP,
            plot_bottom: PLOT_BOTTOM,
            center_y,
            bar_y: center_y - bar_height / 2.0,
            bar_width: self.scale(self.roas.max(0.0)) - PLOT_LEFT,
            bar_height,
            whisker_from: self.scale(self.roas - below),
            whisker_to: self.scale(self.roas + above),
            cap_top: center_y - CAP_SIZE,
            cap_bottom: center_y + CAP_SIZE,
            tick_label_y: PLOT_BOTTOM + 12.0,
            x_label_y: f64::from(HEIGHT) - 5.0,
            ticks,
        };
        Ok(template.render()?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ChartError> {
        let svg = self.render()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, svg)?;
        info!(path = %path.display(), "wrote roas chart");
        Ok(())
    }
}

/// Smallest value of the form {1, 2, 2.5, 5} x 10^k at or above `value`.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    for mantissa in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let candidate = mantissa * magnitude;
        if candidate >= value {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// Label a tick with as many decimals as the tick step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10()).ceil().max(0.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    if decimals == 0 {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
