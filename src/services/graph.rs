use serde::Serialize;

use crate::models::{AggregateResponse, SparseAggregate};
use crate::services::aggregation::{
    densify_by_day, densify_by_month, densify_by_year_range, join_share_with_cost,
    to_category_costs, to_category_shares, CategoryBreakdown, DenseSeries, ShapeError,
};

/// Everything a chart page needs for one period: income and outcome series
/// plus the category split of each side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView<K> {
    pub income: DenseSeries<K>,
    pub outcome: DenseSeries<K>,
    pub income_categories: Vec<CategoryBreakdown>,
    pub outcome_categories: Vec<CategoryBreakdown>,
}

fn categories(percentages: &SparseAggregate, costs: &SparseAggregate) -> Vec<CategoryBreakdown> {
    join_share_with_cost(&to_category_shares(percentages), &to_category_costs(costs))
}

fn build<K>(
    response: &AggregateResponse,
    income: DenseSeries<K>,
    outcome: DenseSeries<K>,
) -> GraphView<K> {
    GraphView {
        income,
        outcome,
        income_categories: categories(
            &response.income_category_percentage_list,
            &response.income_category_cost_list,
        ),
        outcome_categories: categories(
            &response.outcome_category_percentage_list,
            &response.outcome_category_cost_list,
        ),
    }
}

/// Day-by-day view of one month.
pub fn daily_view(
    response: &AggregateResponse,
    year: i32,
    month: u32,
) -> Result<GraphView<u32>, ShapeError> {
    let income = densify_by_day(&response.income_list, year, month)?;
    let outcome = densify_by_day(&response.outcome_list, year, month)?;
    Ok(build(response, income, outcome))
}

/// Month-by-month view of one year.
pub fn monthly_view(response: &AggregateResponse) -> GraphView<&'static str> {
    build(
        response,
        densify_by_month(&response.income_list),
        densify_by_month(&response.outcome_list),
    )
}

/// Year-by-year view of an inclusive range.
pub fn yearly_view(
    response: &AggregateResponse,
    start_year: i32,
    end_year: i32,
) -> Result<GraphView<i32>, ShapeError> {
    let income = densify_by_year_range(&response.income_list, start_year, end_year)?;
    let outcome = densify_by_year_range(&response.outcome_list, start_year, end_year)?;
    Ok(build(response, income, outcome))
}
