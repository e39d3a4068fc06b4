//! Shaping of backend aggregates into chart-ready data.
//!
//! The backend only reports periods and categories that saw activity. Charts
//! need one point per period, so every series is rebuilt from the requested
//! range and filled with zeros where the backend was silent. Output order
//! always comes from the range, never from the order of the input map.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::date_utils::{days_in_month, MONTH_NAMES};
use crate::models::SparseAggregate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Invalid year range: start year {start} is after end year {end}")]
    InvalidRange { start: i32, end: i32 },

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
}

/// One period of a dense series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<K> {
    pub key: K,
    pub total: f64,
}

pub type DenseSeries<K> = Vec<SeriesPoint<K>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCost {
    pub name: String,
    pub total: f64,
}

/// A category share joined with its cost.
///
/// `total` is `None` when the backend reported a percentage but no amount for
/// the category. That is "amount unknown", not zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub percentage: f64,
    pub total: Option<f64>,
}

/// Index a sparse map by integer keys. Keys that do not parse are dropped;
/// a repeated key keeps its last value.
fn index_by_number<N>(sparse: &SparseAggregate) -> HashMap<N, f64>
where
    N: std::str::FromStr + std::hash::Hash + Eq,
{
    sparse
        .iter()
        .filter_map(|(key, total)| key.trim().parse::<N>().ok().map(|k| (k, total)))
        .collect()
}

/// One point per day of `month` in `year`, in ascending day order.
///
/// Days outside the month are ignored, so the output length is always the
/// number of days in the month.
pub fn densify_by_day(
    sparse: &SparseAggregate,
    year: i32,
    month: u32,
) -> Result<DenseSeries<u32>, ShapeError> {
    let days = days_in_month(year, month).ok_or(ShapeError::InvalidMonth(month))?;
    let totals: HashMap<u32, f64> = index_by_number(sparse);

    Ok((1..=days)
        .map(|day| SeriesPoint {
            key: day,
            total: totals.get(&day).copied().unwrap_or(0.0),
        })
        .collect())
}

/// Twelve points keyed JANUARY..DECEMBER.
pub fn densify_by_month(sparse: &SparseAggregate) -> DenseSeries<&'static str> {
    let totals: HashMap<String, f64> = sparse
        .iter()
        .map(|(key, total)| (key.trim().to_uppercase(), total))
        .collect();

    MONTH_NAMES
        .iter()
        .map(|&name| SeriesPoint {
            key: name,
            total: totals.get(name).copied().unwrap_or(0.0),
        })
        .collect()
}

/// One point per year from `start_year` to `end_year` inclusive.
///
/// The bounds are never swapped: `start_year > end_year` is an error.
pub fn densify_by_year_range(
    sparse: &SparseAggregate,
    start_year: i32,
    end_year: i32,
) -> Result<DenseSeries<i32>, ShapeError> {
    if start_year > end_year {
        return Err(ShapeError::InvalidRange {
            start: start_year,
            end: end_year,
        });
    }
    let totals: HashMap<i32, f64> = index_by_number(sparse);

    Ok((start_year..=end_year)
        .map(|year| SeriesPoint {
            key: year,
            total: totals.get(&year).copied().unwrap_or(0.0),
        })
        .collect())
}

pub fn to_category_shares(sparse: &SparseAggregate) -> Vec<CategoryShare> {
    sparse
        .iter()
        .map(|(name, percentage)| CategoryShare {
            name: name.to_string(),
            percentage,
        })
        .collect()
}

pub fn to_category_costs(sparse: &SparseAggregate) -> Vec<CategoryCost> {
    sparse
        .iter()
        .map(|(name, total)| CategoryCost {
            name: name.to_string(),
            total,
        })
        .collect()
}

/// Left join of shares with costs on `name`, in share order.
///
/// Costs without a matching share are left out.
pub fn join_share_with_cost(
    shares: &[CategoryShare],
    costs: &[CategoryCost],
) -> Vec<CategoryBreakdown> {
    let cost_by_name: HashMap<&str, f64> = costs
        .iter()
        .map(|cost| (cost.name.as_str(), cost.total))
        .collect();

    shares
        .iter()
        .map(|share| CategoryBreakdown {
            name: share.name.clone(),
            percentage: share.percentage,
            total: cost_by_name.get(share.name.as_str()).copied(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse(pairs: &[(&str, f64)]) -> SparseAggregate {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_densify_by_day_leap_february() {
        let series = densify_by_day(&sparse(&[("1", 20.0), ("15", 5.0)]), 2024, 2).unwrap();

        assert_eq!(series.len(), 29);
        assert_eq!(series[0], SeriesPoint { key: 1, total: 20.0 });
        assert_eq!(series[14], SeriesPoint { key: 15, total: 5.0 });
        let zeros = series.iter().filter(|p| p.total == 0.0).count();
        assert_eq!(zeros, 27);
    }

    #[test]
    fn test_densify_by_day_lengths() {
        let empty = SparseAggregate::new();
        assert_eq!(densify_by_day(&empty, 2023, 2).unwrap().len(), 28);
        assert_eq!(densify_by_day(&empty, 2024, 2).unwrap().len(), 29);
        assert_eq!(densify_by_day(&empty, 2024, 4).unwrap().len(), 30);
        assert_eq!(densify_by_day(&empty, 2024, 12).unwrap().len(), 31);
    }

    #[test]
    fn test_densify_by_day_keys_ascending_and_unique() {
        let input = sparse(&[("30", 1.0), ("3", 2.0), ("17", 3.0)]);
        let series = densify_by_day(&input, 2024, 6).unwrap();
        let keys: Vec<u32> = series.iter().map(|p| p.key).collect();
        assert_eq!(keys, (1..=30).collect::<Vec<u32>>());
        assert_eq!(series[2].total, 2.0);
        assert_eq!(series[16].total, 3.0);
        assert_eq!(series[29].total, 1.0);
    }

    #[test]
    fn test_densify_by_day_ignores_out_of_range_keys() {
        let input = sparse(&[("0", 9.0), ("30", 9.0), ("31", 9.0), ("x", 9.0), ("28", 4.0)]);
        let series = densify_by_day(&input, 2023, 2).unwrap();
        assert_eq!(series.len(), 28);
        assert_eq!(series.iter().map(|p| p.total).sum::<f64>(), 4.0);
    }

    #[test]
    fn test_densify_by_day_rejects_invalid_month() {
        let empty = SparseAggregate::new();
        assert_eq!(
            densify_by_day(&empty, 2024, 13),
            Err(ShapeError::InvalidMonth(13))
        );
        assert_eq!(densify_by_day(&empty, 2024, 0), Err(ShapeError::InvalidMonth(0)));
    }

    #[test]
    fn test_densify_by_month_empty() {
        let series = densify_by_month(&SparseAggregate::new());
        let keys: Vec<&str> = series.iter().map(|p| p.key).collect();
        assert_eq!(keys, MONTH_NAMES.to_vec());
        assert!(series.iter().all(|p| p.total == 0.0));
    }

    #[test]
    fn test_densify_by_month_fills_known_months() {
        let input = sparse(&[("MARCH", 12.0), ("DECEMBER", 3.5)]);
        let series = densify_by_month(&input);
        assert_eq!(series.len(), 12);
        assert_eq!(series[2], SeriesPoint { key: "MARCH", total: 12.0 });
        assert_eq!(series[11].total, 3.5);
        assert_eq!(series[0].total, 0.0);
    }

    #[test]
    fn test_densify_by_year_range_single_year() {
        let input = sparse(&[("2020", 100.0), ("2019", 1.0)]);
        let series = densify_by_year_range(&input, 2020, 2020).unwrap();
        assert_eq!(series, vec![SeriesPoint { key: 2020, total: 100.0 }]);

        let series = densify_by_year_range(&SparseAggregate::new(), 2020, 2020).unwrap();
        assert_eq!(series, vec![SeriesPoint { key: 2020, total: 0.0 }]);
    }

    #[test]
    fn test_densify_by_year_range_length_and_order() {
        let input = sparse(&[("2022", 7.0)]);
        let series = densify_by_year_range(&input, 2018, 2024).unwrap();
        let keys: Vec<i32> = series.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![2018, 2019, 2020, 2021, 2022, 2023, 2024]);
        assert_eq!(series[4].total, 7.0);
    }

    #[test]
    fn test_densify_by_year_range_inverted_bounds() {
        let result = densify_by_year_range(&SparseAggregate::new(), 2021, 2020);
        assert_eq!(
            result,
            Err(ShapeError::InvalidRange {
                start: 2021,
                end: 2020
            })
        );
    }

    #[test]
    fn test_category_projections_keep_input_order() {
        let input = sparse(&[("Rent", 50.0), ("Food", 30.0), ("Fun", 20.0)]);
        let names: Vec<String> = to_category_shares(&input)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Rent", "Food", "Fun"]);

        let costs = to_category_costs(&input);
        assert_eq!(
            costs[1],
            CategoryCost {
                name: "Food".into(),
                total: 30.0
            }
        );
    }

    #[test]
    fn test_join_share_without_cost_is_unknown() {
        let shares = vec![CategoryShare {
            name: "Food".into(),
            percentage: 50.0,
        }];
        let joined = join_share_with_cost(&shares, &[]);
        assert_eq!(
            joined,
            vec![CategoryBreakdown {
                name: "Food".into(),
                percentage: 50.0,
                total: None
            }]
        );
    }

    #[test]
    fn test_join_drops_unmatched_costs() {
        let shares = to_category_shares(&sparse(&[("Food", 60.0), ("Rent", 40.0)]));
        let costs = to_category_costs(&sparse(&[("Rent", 400.0), ("Travel", 90.0)]));
        let joined = join_share_with_cost(&shares, &costs);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].total, None);
        assert_eq!(joined[1].total, Some(400.0));
    }

    #[test]
    fn test_join_keeps_true_zero() {
        let shares = to_category_shares(&sparse(&[("Gifts", 0.0)]));
        let costs = to_category_costs(&sparse(&[("Gifts", 0.0)]));
        assert_eq!(join_share_with_cost(&shares, &costs)[0].total, Some(0.0));
    }
}
