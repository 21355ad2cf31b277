//! Expression gradient configuration

use crate::domain::ColorBreakpoint;

/// A breakpoint as it appears in the compiled-in defaults.
pub struct BreakpointDefault {
    pub colour: &'static str,
    pub threshold: f64,
    pub stop_position: f64,
}

pub struct GradientConfig {
    /// Default (threshold, colour) anchors, ascending by threshold
    pub breakpoints: &'static [BreakpointDefault],
    /// Colour for zero expression and for desaturated points
    pub neutral_colour: &'static str,
    /// Colour used for everything above `saturation_ceiling`
    pub deep_colour: &'static str,
    pub saturation_ceiling: f64,
    /// Fallback colour for values with no data (NaN / missing)
    pub default_colour: &'static str,
    pub default_alpha: f64,
    /// Alpha of the explicit grey attached to desaturated points
    pub neutral_alpha: f64,
    /// Legend axis colours, light blue to dark blue. One entry per decade.
    pub legend_schema: &'static [&'static str],
    pub legend_min: f64,
    pub legend_min_colour: &'static str,
}

impl GradientConfig {
    pub fn default_breakpoints(&self) -> Vec<ColorBreakpoint> {
        self.breakpoints
            .iter()
            .map(|b| ColorBreakpoint {
                colour: b.colour.to_string(),
                threshold: b.threshold,
                stop_position: b.stop_position,
            })
            .collect()
    }
}

pub const GRADIENT: GradientConfig = GradientConfig {
    breakpoints: &[
        BreakpointDefault {
            colour: "rgb(215, 255, 255)",
            threshold: 0.0,
            stop_position: 0.0,
        },
        BreakpointDefault {
            colour: "rgb(128, 255, 255)",
            threshold: 10.0,
            stop_position: 20.0,
        },
        BreakpointDefault {
            colour: "rgb(0, 85, 225)",
            threshold: 100.0,
            stop_position: 40.0,
        },
        BreakpointDefault {
            colour: "rgb(0, 0, 115)",
            threshold: 10_000.0,
            stop_position: 100.0,
        },
    ],
    neutral_colour: "lightgrey",
    deep_colour: "rgb(0, 0, 115)",
    saturation_ceiling: 9999.0,
    default_colour: "blue",
    default_alpha: 0.65,
    neutral_alpha: 0.65,
    legend_schema: &[
        "#d4e4fb", "#95adde", "#6077bf", "#1151D1", "#35419b", "#0e0573",
    ],
    legend_min: 0.1,
    legend_min_colour: "rgb(215, 255, 255)",
};
