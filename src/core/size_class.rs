use serde::{Deserialize, Serialize};

use crate::quantity::energy::GigawattHours;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, derive_more::Display)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    /// Find the size class of a density column header.
    ///
    /// The ` - <Size>` separator wins over a bare substring so that a detail text
    /// mentioning another size does not steal the column.
    #[must_use]
    pub fn detect(header: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| header.contains(&format!(" - {}", size.label())))
            .or_else(|| Self::ALL.into_iter().find(|size| header.contains(size.label())))
    }
}

/// Annual charging energy per vehicle size class.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleSizeEnergy {
    #[serde(rename = "small_gwh")]
    pub small: GigawattHours,

    #[serde(rename = "medium_gwh")]
    pub medium: GigawattHours,

    #[serde(rename = "large_gwh")]
    pub large: GigawattHours,
}

impl VehicleSizeEnergy {
    pub const fn get(&self, size: SizeClass) -> GigawattHours {
        match size {
            SizeClass::Small => self.small,
            SizeClass::Medium => self.medium,
            SizeClass::Large => self.large,
        }
    }

    pub fn total(&self) -> GigawattHours {
        SizeClass::ALL.into_iter().map(|size| self.get(size)).sum()
    }
}
