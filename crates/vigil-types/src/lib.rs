use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Colour scheme preference persisted between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The opposite theme; used by the toggle control.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(VigilError::Config(format!("unknown theme '{other}'"))),
        }
    }
}

/// Emitted once per object transition into the detected state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Scene that produced the detection, e.g. `"robot-left"`.
    pub scene: String,
    /// Pool slot of the detected object.
    pub slot: usize,
    /// Object position at the moment of detection.
    pub position: [f32; 3],
    /// Angle between the sweep's forward direction and the object (degrees).
    pub angle_deg: f32,
    /// Distance from the sweep anchor to the object.
    pub distance: f32,
    /// Counter value after this detection was recorded.
    pub count: u64,
}

impl DetectionEvent {
    pub fn new(
        scene: impl Into<String>,
        slot: usize,
        position: [f32; 3],
        angle_deg: f32,
        distance: f32,
        count: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            scene: scene.into(),
            slot,
            position,
            angle_deg,
            distance,
            count,
        }
    }
}

/// Error type shared by every Vigil crate.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VigilError {
    #[error("Asset '{asset}' failed to load: {details}")]
    AssetLoad { asset: String, details: String },

    #[error("Invalid sweep configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_defaults_to_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn theme_toggle_flips_and_returns() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn theme_serializes_lowercase() {
        let json = serde_json::to_string(&Theme::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let back: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(back, Theme::Dark);
    }

    #[test]
    fn theme_from_str_is_case_insensitive() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!("sepia".parse::<Theme>(), Err(VigilError::Config(_))));
    }

    #[test]
    fn detection_event_roundtrip() {
        let event = DetectionEvent::new("robot-left", 3, [20.0, 0.0, 0.0], 0.0, 20.0, 1);
        let json = serde_json::to_string(&event).unwrap();
        let back: DetectionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.id, back.id);
        assert_eq!(back.scene, "robot-left");
        assert_eq!(back.slot, 3);
        assert_eq!(back.count, 1);
    }

    #[test]
    fn vigil_error_display() {
        let err = VigilError::AssetLoad {
            asset: "robot.glb".to_string(),
            details: "404".to_string(),
        };
        assert!(err.to_string().contains("robot.glb"));

        let err2 = VigilError::InvalidConfig("pool_size must be > 0".to_string());
        assert!(err2.to_string().contains("pool_size"));
    }
}
