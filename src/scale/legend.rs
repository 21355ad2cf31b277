//! Gradient legend data derived from the colour scale.

use serde::Serialize;

use crate::domain::ExpressionPlotData;
use crate::scale::{AxisStyle, ColorScale};
use crate::utils::maths_utils::{integer_digits, piecewise_linear};

/// One sample along the legend bar.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LegendTick {
    /// 0-100 along the bar
    pub position: f64,
    pub value: f64,
    pub color: String,
}

/// A breakpoint colour pinned to its stop position, for drawing the bar itself.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegendStop {
    pub stop_position: f64,
    pub colour: String,
}

/// `count` evenly spaced samples over [0, 100].
///
/// Each position is mapped to an expression value through the breakpoints'
/// `(stopPosition, threshold)` pairs and coloured exactly like a plot point
/// with that value would be.
pub fn legend_ticks(scale: &ColorScale, count: usize, alpha: f64) -> Vec<LegendTick> {
    let stops: Vec<f64> = scale.breakpoints().iter().map(|b| b.stop_position).collect();
    let thresholds: Vec<f64> = scale.breakpoints().iter().map(|b| b.threshold).collect();

    (0..count)
        .map(|i| {
            let position = if count > 1 {
                100.0 * i as f64 / (count - 1) as f64
            } else {
                0.0
            };
            let value = piecewise_linear(&stops, &thresholds, position);
            let color = scale
                .color_for_value(Some(value), scale.fallback(), alpha)
                .to_string();
            LegendTick {
                position,
                value,
                color,
            }
        })
        .collect()
}

pub fn legend_stops(scale: &ColorScale) -> Vec<LegendStop> {
    scale
        .breakpoints()
        .iter()
        .map(|b| LegendStop {
            stop_position: b.stop_position,
            colour: b.colour.clone(),
        })
        .collect()
}

/// Logarithmic colour axis sized to the largest expression value.
/// The number of decades (and so of schema colours used) follows the number of
/// integer digits of `max`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegendAxis {
    pub min: f64,
    pub max: f64,
    pub logarithmic: bool,
    /// `(fraction of axis, colour)` pairs, ascending
    pub stops: Vec<(f64, String)>,
    pub min_color: String,
    pub max_color: String,
}

impl LegendAxis {
    /// `None` when there is nothing to show (`max` absent, zero or negative).
    pub fn for_max(max: Option<f64>, style: &AxisStyle) -> Option<Self> {
        let max = max.filter(|m| *m > 0.0 && m.is_finite())?;
        let schema = &style.schema;
        let decades = integer_digits(max);
        let used = decades.min(schema.len());
        if used == 0 {
            return None;
        }

        let stops = schema[..used]
            .iter()
            .enumerate()
            .map(|(i, colour)| ((i + 1) as f64 / used as f64, colour.clone()))
            .collect();

        Some(Self {
            min: style.min,
            max: 10f64.powi(decades as i32) - 1.0,
            logarithmic: true,
            stops,
            min_color: style.min_colour.clone(),
            max_color: schema[used - 1].clone(),
        })
    }
}

/// Everything a renderer needs to draw the gradient legend of one plot.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Legend {
    pub axis: LegendAxis,
    pub stops: Vec<LegendStop>,
    pub ticks: Vec<LegendTick>,
}

impl Legend {
    /// `None` when the plot carries no expression data.
    pub fn for_plot(
        plot: &ExpressionPlotData,
        scale: &ColorScale,
        tick_count: usize,
    ) -> Option<Self> {
        if !plot.has_expression() {
            return None;
        }
        let axis = LegendAxis::for_max(plot.max, scale.axis_style())?;
        Some(Self {
            axis,
            stops: legend_stops(scale),
            ticks: legend_ticks(scale, tick_count, scale.default_alpha()),
        })
    }
}
