use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::influencers::Influencer;
use crate::CoreError;

/// Column the influencer table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Username,
    Platform,
    ViewsMedian,
    TotalViews,
    ViewsNow,
    Status,
    CreatedAt,
    /// Any field name this build does not know. Sorting by it keeps the
    /// input order.
    #[serde(other)]
    Unrecognized,
}

impl FromStr for SortField {
    type Err = CoreError;

    /// Accepts the camelCase wire name or a kebab/snake-case form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "username" => Ok(SortField::Username),
            "platform" => Ok(SortField::Platform),
            "viewsmedian" => Ok(SortField::ViewsMedian),
            "totalviews" => Ok(SortField::TotalViews),
            "viewsnow" => Ok(SortField::ViewsNow),
            "status" => Ok(SortField::Status),
            "createdat" => Ok(SortField::CreatedAt),
            _ => Err(CoreError::InvalidSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(CoreError::InvalidSortDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Username,
            direction: SortDirection::Asc,
        }
    }
}

impl SortSpec {
    #[must_use]
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header click: the same field flips asc to desc, anything else
    /// starts ascending on the clicked field.
    #[must_use]
    pub fn toggled(self, field: SortField) -> Self {
        let direction = if self.field == field {
            self.direction.reversed()
        } else {
            SortDirection::Asc
        };
        Self { field, direction }
    }
}

/// Relative order of two records under `spec`.
///
/// `Desc` is the reverse of the `Asc` comparison, so ties stay ties in both
/// directions.
#[must_use]
pub fn compare(a: &Influencer, b: &Influencer, spec: &SortSpec) -> Ordering {
    let ordering = match spec.field {
        SortField::Username => a.username.to_lowercase().cmp(&b.username.to_lowercase()),
        SortField::Platform => a.platform.label().cmp(b.platform.label()),
        SortField::ViewsMedian => a.views_median.cmp(&b.views_median),
        SortField::TotalViews => a.total_views().cmp(&b.total_views()),
        SortField::ViewsNow => a.views_now.cmp(&b.views_now),
        SortField::Status => a.status.rank().cmp(&b.status.rank()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Unrecognized => Ordering::Equal,
    };

    match spec.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Stable sort into a new sequence; the input is left untouched.
pub fn sort_influencers<'a, I>(records: I, spec: &SortSpec) -> Vec<&'a Influencer>
where
    I: IntoIterator<Item = &'a Influencer>,
{
    let mut sorted: Vec<&Influencer> = records.into_iter().collect();
    sorted.sort_by(|a, b| compare(a, b, spec));
    sorted
}

#[cfg(test)]
#[path = "sort_test.rs"]
mod tests;
