//! Record types for the video game sales table
//!
//! A row describes one release: a title on one platform in one year.
//!
//! ```text
//! GameRecord (typed, before identity repair)
//! ├─ row: ingestion order, 0-based
//! ├─ name / genre: Option<String>
//! └─ platform, year, regional sales, scores, rating
//!
//! Game (cleaned)
//! ├─ name / genre: String
//! └─ ... + total_sales
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub const NAME: &str = "name";
pub const PLATFORM: &str = "platform";
pub const YEAR_OF_RELEASE: &str = "year_of_release";
pub const GENRE: &str = "genre";
pub const NA_SALES: &str = "na_sales";
pub const EU_SALES: &str = "eu_sales";
pub const JP_SALES: &str = "jp_sales";
pub const OTHER_SALES: &str = "other_sales";
pub const CRITIC_SCORE: &str = "critic_score";
pub const USER_SCORE: &str = "user_score";
pub const RATING: &str = "rating";

/// Columns every input file must provide (after header normalization).
pub const REQUIRED_COLUMNS: [&str; 11] = [
    NAME,
    PLATFORM,
    YEAR_OF_RELEASE,
    GENRE,
    NA_SALES,
    EU_SALES,
    JP_SALES,
    OTHER_SALES,
    CRITIC_SCORE,
    USER_SCORE,
    RATING,
];

/// Sales region of the four regional sales columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Na,
    Eu,
    Jp,
    Other,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Na, Region::Eu, Region::Jp, Region::Other];

    /// Name of the sales column for this region.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Region::Na => NA_SALES,
            Region::Eu => EU_SALES,
            Region::Jp => JP_SALES,
            Region::Other => OTHER_SALES,
        }
    }

    fn to_str(self) -> &'static str {
        match self {
            Region::Na => "NA",
            Region::Eu => "EU",
            Region::Jp => "JP",
            Region::Other => "Other",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

/// Regional sales in millions of USD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RegionalSales {
    pub na_sales: f64,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub other_sales: f64,
}

impl RegionalSales {
    #[must_use]
    pub fn get(&self, region: Region) -> f64 {
        match region {
            Region::Na => self.na_sales,
            Region::Eu => self.eu_sales,
            Region::Jp => self.jp_sales,
            Region::Other => self.other_sales,
        }
    }

    pub fn get_mut(&mut self, region: Region) -> &mut f64 {
        match region {
            Region::Na => &mut self.na_sales,
            Region::Eu => &mut self.eu_sales,
            Region::Jp => &mut self.jp_sales,
            Region::Other => &mut self.other_sales,
        }
    }

    /// Sum of the four regions.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.na_sales + self.eu_sales + self.jp_sales + self.other_sales
    }
}

/// Natural identity of a release.
///
/// Two rows with the same key are duplicates; rows that differ only in year
/// are distinct releases.
pub type IdentityKey = (Option<String>, String, Option<i32>);

/// A typed row that has not been through identity repair yet.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    /// Position of the row in the input file (0-based, header excluded)
    pub row: usize,
    pub name: Option<String>,
    pub platform: String,
    pub year_of_release: Option<i32>,
    pub genre: Option<String>,
    pub sales: RegionalSales,
    pub critic_score: Option<f64>,
    pub user_score: Option<f64>,
    pub rating: Option<String>,
}

impl GameRecord {
    #[must_use]
    pub fn identity_key(&self) -> IdentityKey {
        (
            self.name.clone(),
            self.platform.clone(),
            self.year_of_release,
        )
    }
}

/// A cleaned row.
///
/// Serializes to the input schema plus `total_sales`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub name: String,
    pub platform: String,
    pub year_of_release: Option<i32>,
    pub genre: String,
    pub na_sales: f64,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub other_sales: f64,
    pub critic_score: Option<f64>,
    pub user_score: Option<f64>,
    pub rating: Option<String>,
    pub total_sales: f64,
}

impl Game {
    #[must_use]
    pub fn sales(&self, region: Region) -> f64 {
        match region {
            Region::Na => self.na_sales,
            Region::Eu => self.eu_sales,
            Region::Jp => self.jp_sales,
            Region::Other => self.other_sales,
        }
    }
}

/// Categorical column used to group or split the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColumn {
    Platform,
    Genre,
    Rating,
}

impl GroupColumn {
    /// Value of this column for `game`.
    ///
    /// Returns `None` for a missing rating; such rows belong to no group.
    #[must_use]
    pub fn value(self, game: &Game) -> Option<&str> {
        match self {
            GroupColumn::Platform => Some(&game.platform),
            GroupColumn::Genre => Some(&game.genre),
            GroupColumn::Rating => game.rating.as_deref(),
        }
    }

    fn to_str(self) -> &'static str {
        match self {
            GroupColumn::Platform => PLATFORM,
            GroupColumn::Genre => GENRE,
            GroupColumn::Rating => RATING,
        }
    }
}

impl fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

/// Sales figure to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesMetric {
    Total,
    Region(Region),
}

impl SalesMetric {
    #[must_use]
    pub fn value(self, game: &Game) -> f64 {
        match self {
            SalesMetric::Total => game.total_sales,
            SalesMetric::Region(region) => game.sales(region),
        }
    }
}
