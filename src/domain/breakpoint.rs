use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One anchor of the expression gradient, as configured by the page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColorBreakpoint {
    /// Any CSS colour spec (`#1151D1`, `rgb(0, 85, 225)`, `lightgrey`, ...)
    pub colour: String,
    pub threshold: f64,
    /// Position (0-100) of this anchor on the legend bar. Not used by interpolation.
    pub stop_position: f64,
}

impl ColorBreakpoint {
    /// Read a breakpoint list from a JSON file (`[{colour, threshold, stopPosition}, ...]`).
    /// Only the shape is checked here; ordering rules are enforced by `ColorScale::new`.
    pub fn load_list(path: &Path) -> Result<Vec<ColorBreakpoint>> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read gradient file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse gradient file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_names() {
        let json = r##"[{"colour": "rgb(215, 255, 255)", "threshold": 0, "stopPosition": 0},
                       {"colour": "#0e0573", "threshold": 10, "stopPosition": 100}]"##;
        let list: Vec<ColorBreakpoint> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].colour, "#0e0573");
        assert_eq!(list[1].stop_position, 100.0);
    }

    #[test]
    fn missing_stop_position_is_rejected() {
        let json = r#"[{"colour": "red", "threshold": 0}]"#;
        assert!(serde_json::from_str::<Vec<ColorBreakpoint>>(json).is_err());
    }
}
