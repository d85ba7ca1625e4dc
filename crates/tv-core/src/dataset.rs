//! Static registry of the three published datasets.

use std::fmt;

const SOURCE_PREFIX: &str = "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/";

/// Short key used in link ids and in the `?data=` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatasetKey {
    #[default]
    Games,
    Movies,
    KsPledges,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 3] = [DatasetKey::Games, DatasetKey::Movies, DatasetKey::KsPledges];

    /// Strict lookup by key string.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "games" => Some(DatasetKey::Games),
            "movies" => Some(DatasetKey::Movies),
            "ksPledges" => Some(DatasetKey::KsPledges),
            _ => None,
        }
    }

    /// Lookup that falls back to the first dataset for unknown or missing keys.
    pub fn parse_or_default(key: Option<&str>) -> Self {
        key.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKey::Games => "games",
            DatasetKey::Movies => "movies",
            DatasetKey::KsPledges => "ksPledges",
        }
    }

    pub fn dataset(self) -> &'static Dataset {
        match self {
            DatasetKey::Games => &GAMES,
            DatasetKey::Movies => &MOVIES,
            DatasetKey::KsPledges => &KS_PLEDGES,
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata plus the per-dataset presentation profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub key: DatasetKey,
    pub title: &'static str,
    pub description: &'static str,
    file: &'static str,
    /// Class set on the map surface; selects per-dataset CSS.
    pub surface_class: &'static str,
    pub legend_height: f64,
    /// Tooltip is placed at `pointer - offset` so it does not cover the cursor.
    pub tooltip_offset: (f64, f64),
    /// Horizontal distance between legend columns.
    pub legend_spacing: f64,
}

impl Dataset {
    pub fn url(&self) -> String {
        format!("{SOURCE_PREFIX}{}", self.file)
    }
}

static GAMES: Dataset = Dataset {
    key: DatasetKey::Games,
    title: "Video Game Sales",
    description: "Top 100 Video Games Sales Grouped by Platform",
    file: "video-game-sales-data.json",
    surface_class: "games",
    legend_height: 90.0,
    tooltip_offset: (150.0, 80.0),
    legend_spacing: 90.0,
};

static MOVIES: Dataset = Dataset {
    key: DatasetKey::Movies,
    title: "Movies Sales",
    description: "Top 100 Highest Grossing Films Grouped By Genre",
    file: "movie-data.json",
    surface_class: "movies",
    legend_height: 60.0,
    tooltip_offset: (150.0, 100.0),
    legend_spacing: 150.0,
};

static KS_PLEDGES: Dataset = Dataset {
    key: DatasetKey::KsPledges,
    title: "Kickstarter Pledges",
    description: "Top 100 Pledged Kickstarter Campaigns Grouped By Category",
    file: "kickstarter-funding-data.json",
    surface_class: "kickstarter",
    legend_height: 180.0,
    tooltip_offset: (150.0, 125.0),
    legend_spacing: 200.0,
};
