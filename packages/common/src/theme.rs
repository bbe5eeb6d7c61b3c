#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

/// Competition category a team registers under.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum Theme {
    #[serde(rename = "Theme 1")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Theme 1"))]
    Theme1,
    #[serde(rename = "Theme 2")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Theme 2"))]
    Theme2,
    #[serde(rename = "Theme 3")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Theme 3"))]
    Theme3,
    #[serde(rename = "Theme 4")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Theme 4"))]
    Theme4,
    #[serde(rename = "Theme 5")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Theme 5"))]
    Theme5,
    #[serde(rename = "Theme 6")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Theme 6"))]
    Theme6,
}

impl Theme {
    /// All themes, in display order.
    pub const ALL: &'static [Theme] = &[
        Self::Theme1,
        Self::Theme2,
        Self::Theme3,
        Self::Theme4,
        Self::Theme5,
        Self::Theme6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theme1 => "Theme 1",
            Self::Theme2 => "Theme 2",
            Self::Theme3 => "Theme 3",
            Self::Theme4 => "Theme 4",
            Self::Theme5 => "Theme 5",
            Self::Theme6 => "Theme 6",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseEnumError;

    /// Surrounding whitespace is ignored; the label itself must match exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|theme| theme.as_str() == trimmed)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                ParseEnumError::new("theme", s, &expected)
            })
    }
}
