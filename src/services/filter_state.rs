//! Filter and sort selection of the history listing.
//!
//! [`FilterState`] is a plain value: every change produces a new state. Date
//! bounds are always held as full instants, whatever form the caller supplied,
//! so the query sent to the backend covers whole periods inclusively.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date_utils::{
    end_of_day, format_backend_datetime, localize, month_bounds, start_of_day, to_local_instant,
};
use crate::models::TypeFilter;
use crate::sort_utils::{SortField, SortOrder};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid entry type: {0}")]
    InvalidType(String),

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(rename = "type")]
    pub entry_type: TypeFilter,
    pub account: Option<i64>,
    pub category: Option<i64>,
    #[serde(with = "instant")]
    pub start_date: DateTime<FixedOffset>,
    #[serde(with = "instant")]
    pub end_date: DateTime<FixedOffset>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

/// Field-by-field update of a [`FilterState`], as it arrives from a query
/// string. Absent fields keep their current value; an empty `account` or
/// `category` clears the selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub account: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

impl FilterState {
    /// Current local calendar month, all types, all accounts and categories,
    /// newest first.
    pub fn initial() -> Self {
        Self::initial_at(Local::now())
    }

    /// Same as [`FilterState::initial`] for the month containing `now`, in
    /// the time zone of `now`.
    ///
    /// Only the initial bounds use that zone. [`FilterState::merge`] still
    /// reads dates without an offset as process-local time.
    pub fn initial_at<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        let (start, end) = month_bounds(now.date_naive());
        let tz = now.timezone();
        Self {
            entry_type: TypeFilter::All,
            account: None,
            category: None,
            start_date: localize(&tz, start),
            end_date: localize(&tz, end),
            sort_field: SortField::Date,
            sort_order: SortOrder::Desc,
        }
    }

    /// Overlay the fields present in `patch`.
    ///
    /// Dates carrying an offset keep it. Naive date-times and bare dates are
    /// read in the process-local zone, with the offset in effect on that day,
    /// not the offset of the current bounds.
    pub fn merge(&self, patch: FilterPatch) -> Result<Self, FilterError> {
        let mut next = self.clone();

        if let Some(raw) = patch.entry_type {
            next.entry_type =
                TypeFilter::from_str(raw.trim()).ok_or(FilterError::InvalidType(raw))?;
        }
        if let Some(raw) = patch.account {
            next.account = parse_id(&raw)?;
        }
        if let Some(raw) = patch.category {
            next.category = parse_id(&raw)?;
        }
        if let Some(raw) = patch.start_date {
            next.start_date = parse_instant(&raw, Bound::Start)?;
        }
        if let Some(raw) = patch.end_date {
            next.end_date = parse_instant(&raw, Bound::End)?;
        }
        if let Some(raw) = patch.sort_field {
            next.sort_field =
                SortField::from_str(raw.trim()).ok_or(FilterError::InvalidSortField(raw))?;
        }
        if let Some(raw) = patch.sort_order {
            next.sort_order =
                SortOrder::from_str(raw.trim()).ok_or(FilterError::InvalidSortOrder(raw))?;
        }

        Ok(next)
    }

    /// Ordered query parameters for the history backend.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(7);
        if self.entry_type != TypeFilter::All {
            params.push(("type", self.entry_type.as_str().to_string()));
        }
        if let Some(account) = self.account {
            params.push(("account", account.to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        params.push(("startDate", format_backend_datetime(&self.start_date)));
        params.push(("endDate", format_backend_datetime(&self.end_date)));
        params.push(("sortField", self.sort_field.as_str().to_string()));
        params.push(("sortOrder", self.sort_order.as_str().to_string()));
        params
    }

    /// [`FilterState::to_query`] as a url-encoded query string.
    pub fn query_string(&self) -> String {
        serde_urlencoded::to_string(self.to_query()).unwrap_or_default()
    }

    pub fn toggle_sort_order(&self) -> Self {
        Self {
            sort_order: self.sort_order.toggle(),
            ..self.clone()
        }
    }

    /// Column header click: flip the order when `field` is already active,
    /// otherwise switch to `field`, newest or largest first.
    pub fn sort_by(&self, field: SortField) -> Self {
        if self.sort_field == field {
            self.toggle_sort_order()
        } else {
            Self {
                sort_field: field,
                sort_order: SortOrder::Desc,
                ..self.clone()
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<Option<i64>, FilterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| FilterError::InvalidId(raw.to_string()))
}

/// Read a date bound as a full instant.
///
/// Accepts RFC 3339 instants as is, naive date-times in local time, and bare
/// dates, which cover the whole day: midnight for a start bound,
/// 23:59:59.999 for an end bound.
fn parse_instant(raw: &str, bound: Bound) -> Result<DateTime<FixedOffset>, FilterError> {
    let trimmed = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(to_local_instant(naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let naive = match bound {
            Bound::Start => start_of_day(date),
            Bound::End => end_of_day(date),
        };
        return Ok(to_local_instant(naive));
    }

    Err(FilterError::InvalidDate(raw.to_string()))
}

/// Serde helpers writing instants as RFC 3339 with millisecond precision.
mod instant {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}
