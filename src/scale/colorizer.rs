//! Per-point decoration of expression series before they are handed to the chart.

use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{ExpressionPoint, HighlightSet, Series};
use crate::scale::ColorScale;
use crate::utils::maths_utils::round10;

/// Decimal places kept on `expressionLevel` for display
const DISPLAY_DECIMALS: i32 = -2;

/// An input point with the colouring overlay applied.
/// Everything the atlas sent is kept in `extra`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ColorizedPoint {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Rounded to two decimals. NaN (serialized as `null`) when unknown.
    #[serde(rename = "expressionLevel")]
    pub expression_level: f64,
    /// Colour-scale lookup key. Only set on highlighted points with expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorv: Option<f64>,
    /// Explicit colour, set whenever the scale must not be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ColorizedPoint {
    /// The colour the renderer should draw: the explicit one, or the scale's
    /// colour for `colorv`.
    pub fn resolved_color(&self, scale: &ColorScale) -> String {
        match &self.color {
            Some(explicit) => explicit.clone(),
            None => scale.paint(self.colorv).to_string(),
        }
    }

    pub fn is_greyed(&self) -> bool {
        self.color.is_some()
    }
}

pub type ColorizedSeries = Series<ColorizedPoint>;

/// Applies rounding and the highlight policy to a list of series.
///
/// Points of selected series with positive expression get a `colorv` key so the
/// chart's colour axis colours them; every other point gets the fixed grey.
/// Input order of series and points is preserved.
pub struct SeriesColorizer<'a> {
    scale: &'a ColorScale,
    highlight: HighlightSet,
    grey: String,
}

impl<'a> SeriesColorizer<'a> {
    pub fn new(scale: &'a ColorScale, highlight: HighlightSet) -> Self {
        let grey = scale.neutral_grey().to_string();
        Self {
            scale,
            highlight,
            grey,
        }
    }

    pub fn scale(&self) -> &ColorScale {
        self.scale
    }

    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    pub fn colorize(&self, series: &[Series]) -> Vec<ColorizedSeries> {
        series
            .par_iter()
            .map(|s| self.colorize_series(s))
            .collect()
    }

    pub fn colorize_series(&self, series: &Series) -> ColorizedSeries {
        let selected = self.highlight.selects(&series.name);
        let data: Vec<ColorizedPoint> = series
            .data
            .iter()
            .map(|p| self.colorize_point(p, selected))
            .collect();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_colorize_summary {
            let greyed = data.iter().filter(|p| p.is_greyed()).count();
            log::debug!(
                "Series {} ({}): {} points, {} greyed",
                series.name,
                if selected { "selected" } else { "dimmed" },
                data.len(),
                greyed
            );
        }

        ColorizedSeries {
            name: series.name.clone(),
            data,
        }
    }

    fn colorize_point(&self, point: &ExpressionPoint, selected: bool) -> ColorizedPoint {
        let level = point.level();
        let rounded = round10(level, DISPLAY_DECIMALS);
        let mut extra = point.extra.clone();
        // The overlay owns both colour keys
        extra.remove("colorv");
        extra.remove("color");

        // NaN fails the comparison, so unknown levels are greyed too
        if selected && level > 0.0 {
            ColorizedPoint {
                extra,
                expression_level: rounded,
                colorv: Some(rounded),
                color: None,
            }
        } else {
            ColorizedPoint {
                extra,
                expression_level: rounded,
                colorv: None,
                color: Some(self.grey.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: &str = "rgba(211, 211, 211, 0.65)";

    fn series(name: &str, levels: &[f64]) -> Series {
        Series {
            name: name.to_string(),
            data: levels.iter().map(|&l| ExpressionPoint::new(l)).collect(),
        }
    }

    fn scale() -> ColorScale {
        ColorScale::default_gradient().unwrap()
    }

    #[test]
    fn empty_highlight_colours_every_expressed_point_by_value() {
        let scale = scale();
        let colorizer = SeriesColorizer::new(&scale, HighlightSet::none());
        let out = colorizer.colorize(&[series("0", &[5.0, 12.345]), series("1", &[0.5])]);

        for point in out.iter().flat_map(|s| &s.data) {
            assert_eq!(point.color, None);
            assert_eq!(point.colorv, Some(point.expression_level));
        }
        assert_eq!(out[0].data[1].expression_level, 12.35);
        assert_eq!(
            out[0].data[0].resolved_color(&scale),
            "rgba(171, 255, 255, 0.65)"
        );
    }

    #[test]
    fn unselected_series_are_greyed() {
        let scale = scale();
        let highlight: HighlightSet = ["A"].into_iter().collect();
        let colorizer = SeriesColorizer::new(&scale, highlight);
        let out = colorizer.colorize(&[series("A", &[5.0]), series("B", &[5.0])]);

        assert_eq!(out[0].name, "A");
        assert_eq!(out[0].data.len(), 1);
        assert_eq!(out[0].data[0].colorv, Some(5.0));
        assert_eq!(out[0].data[0].color, None);

        assert_eq!(out[1].name, "B");
        assert_eq!(out[1].data.len(), 1);
        assert_eq!(out[1].data[0].colorv, None);
        assert_eq!(out[1].data[0].color.as_deref(), Some(GREY));
        assert_eq!(out[1].data[0].expression_level, 5.0);
    }

    #[test]
    fn selected_points_without_expression_are_grey() {
        let scale = scale();
        let colorizer = SeriesColorizer::new(&scale, HighlightSet::none());
        let mut input = series("0", &[0.0, -1.0]);
        input.data.push(ExpressionPoint::default());
        let out = colorizer.colorize_series(&input);

        assert!(out.data.iter().all(|p| p.color.as_deref() == Some(GREY)));
        assert!(out.data.iter().all(|p| p.colorv.is_none()));
        assert!(out.data[2].expression_level.is_nan());
    }

    #[test]
    fn rounds_half_away_from_zero_on_decimal_value() {
        let scale = scale();
        let colorizer = SeriesColorizer::new(&scale, HighlightSet::none());
        let out = colorizer.colorize_series(&series("0", &[1.005, 2.344]));
        assert_eq!(out.data[0].expression_level, 1.01);
        assert_eq!(out.data[0].colorv, Some(1.01));
        assert_eq!(out.data[1].expression_level, 2.34);
    }

    #[test]
    fn keeps_unknown_fields_and_overrides_stale_colours() {
        let scale = scale();
        let highlight: HighlightSet = [1u32].into_iter().collect();
        let colorizer = SeriesColorizer::new(&scale, highlight);
        let point = |raw: Value| -> ExpressionPoint { serde_json::from_value(raw).unwrap() };
        let first = serde_json::json!({
            "name": "cell_9", "x": 3.5, "color": "red", "colorv": 3, "expressionLevel": 7.777
        });
        let second = serde_json::json!({
            "name": "cell_4", "color": "red", "colorv": 3, "expressionLevel": 5
        });

        let dimmed = colorizer.colorize_series(&Series {
            name: "2".to_string(),
            data: vec![point(first)],
        });
        let json = serde_json::to_value(&dimmed.data[0]).unwrap();
        assert_eq!(json["name"], Value::from("cell_9"));
        assert_eq!(json["x"], Value::from(3.5));
        assert_eq!(json["color"], Value::from(GREY));
        assert_eq!(json["expressionLevel"], Value::from(7.78));
        assert!(json.get("colorv").is_none());

        let selected = colorizer.colorize_series(&Series {
            name: "1".to_string(),
            data: vec![point(second)],
        });
        let json = serde_json::to_value(&selected.data[0]).unwrap();
        assert_eq!(json["name"], Value::from("cell_4"));
        assert_eq!(json["colorv"], Value::from(5.0));
        assert!(json.get("color").is_none());
        assert_eq!(
            selected.data[0].resolved_color(&scale),
            scale.paint(Some(5.0)).to_string()
        );
    }

    #[test]
    fn grey_comes_from_the_scale_configuration() {
        use crate::config::{GRADIENT, GradientConfig};

        const FADED: GradientConfig = GradientConfig {
            neutral_alpha: 0.2,
            ..GRADIENT
        };
        let scale = ColorScale::with_config(GRADIENT.default_breakpoints(), &FADED).unwrap();
        let colorizer = SeriesColorizer::new(&scale, HighlightSet::none());
        let out = colorizer.colorize_series(&series("0", &[0.0]));
        assert_eq!(out.data[0].color.as_deref(), Some("rgba(211, 211, 211, 0.2)"));
    }

    #[test]
    fn preserves_series_and_point_order() {
        let scale = scale();
        let colorizer = SeriesColorizer::new(&scale, HighlightSet::none());
        let names = ["3", "1", "2", "0", "10"];
        let input: Vec<Series> = names
            .iter()
            .enumerate()
            .map(|(i, name)| series(name, &vec![i as f64 + 0.5; i + 1]))
            .collect();
        let out = colorizer.colorize(&input);

        let out_names: Vec<&str> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(out_names, names);
        for (i, s) in out.iter().enumerate() {
            assert_eq!(s.data.len(), i + 1);
        }
    }
}
