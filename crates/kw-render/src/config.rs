use serde::{Deserialize, Serialize};

/// Presentation settings shared by every display variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per lattice cell.
    pub scale: f32,
    pub foreground: String,
    pub background: String,
    /// Name of the palette colouring primary paths.
    pub palette: String,
    /// Round strand bends in the primary variant.
    pub rounded: bool,
    /// TikZ units are `scale / tikz_scale_divisor` per cell.
    pub tikz_scale_divisor: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 20.0,
            foreground: "white".to_string(),
            background: "darkblue".to_string(),
            palette: "pastel".to_string(),
            rounded: true,
            tikz_scale_divisor: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RenderConfig;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: RenderConfig =
            serde_json::from_str(r#"{"scale": 30.0, "palette": "neon"}"#).expect("valid json");
        assert_eq!(cfg.scale, 30.0);
        assert_eq!(cfg.palette, "neon");
        assert_eq!(cfg.background, "darkblue");
        assert!(cfg.rounded);
    }
}
