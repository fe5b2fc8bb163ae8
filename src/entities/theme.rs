use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn map_style(&self) -> &'static str {
        match self {
            Self::Light => "mapbox://styles/mapbox/streets-v11",
            Self::Dark => "mapbox://styles/mapbox/dark-v11",
        }
    }
}
