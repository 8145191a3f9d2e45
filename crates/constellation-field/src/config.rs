//! Loading [`FieldParams`] overrides from JSON

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::params::FieldParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid field config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field config: {0}")]
    Invalid(String),
}

impl FieldParams {
    /// Parse a JSON object; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: FieldParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_json_str(&text)?;
        log::info!("✓ Loaded field config from {}", path.display());
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("speed", [-self.speed, self.speed]),
            ("radius", self.radius),
            ("alpha", self.alpha),
        ];
        for (name, [lo, hi]) in ranges {
            if !lo.is_finite() || !hi.is_finite() || !(hi - lo).is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} range [{lo}, {hi}] must be finite"
                )));
            }
        }
        let scalars = [
            ("link_distance", self.link_distance),
            ("link_width", self.link_width),
            ("pointer_radius", self.pointer_radius),
            ("pointer_strength", self.pointer_strength),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
        }

        if !(self.speed >= 0.0) {
            return Err(ConfigError::Invalid(format!("speed must be >= 0, got {}", self.speed)));
        }
        if !(self.radius[0] > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "radius lower bound must be > 0, got {}",
                self.radius[0]
            )));
        }
        if !(self.link_distance >= 0.0) || !(self.pointer_radius >= 0.0) {
            return Err(ConfigError::Invalid(
                "link_distance and pointer_radius must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use crate::color::Color;
    use crate::params::{Background, ParticleCount};
    use crate::pointer::PointerMode;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params = FieldParams::from_json_str(r#"{ "link_distance": 120.0 }"#).unwrap();
        assert_eq!(params.link_distance, 120.0);
        assert_eq!(params.count, ParticleCount::Fixed(80));
    }

    #[test]
    fn test_full_json() {
        let json = r##"{
            "count": { "per_width": { "stride": 12.0, "cap": 100 } },
            "boundary": "wrap",
            "pointer": "attract",
            "particle_color": "#ff0000",
            "background": { "gradient": { "top": "#000", "bottom": "#111827" } }
        }"##;
        let params = FieldParams::from_json_str(json).unwrap();
        assert_eq!(params.count, ParticleCount::PerWidth { stride: 12.0, cap: 100 });
        assert_eq!(params.boundary, Boundary::Wrap);
        assert_eq!(params.pointer, PointerMode::Attract);
        assert_eq!(params.particle_color, Color::rgb(1.0, 0.0, 0.0));
        assert!(matches!(params.background, Background::Gradient { .. }));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(matches!(
            FieldParams::from_json_str(r#"{ "particle_color": "cyan" }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            FieldParams::from_json_str(r#"{ "speed": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unsampleable_ranges_are_rejected() {
        for json in [
            r#"{ "speed": 3.0e38 }"#,
            r#"{ "alpha": [-3.0e38, 3.0e38] }"#,
        ] {
            assert!(
                matches!(FieldParams::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = FieldParams::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
