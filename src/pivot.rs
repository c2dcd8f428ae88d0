use std::collections::HashMap;

use crate::colors::CategoryColors;
use crate::error::DashboardError;
use crate::models::{
    BarChartQuarter, CategoryBreakdown, DoughnutChart, QuarterRow, Record, RowType, SegmentValue,
    SubDataInfo, TableData, Totals,
};
use crate::quarters::QuarterKey;

/// Label of the synthetic summary row/column in the table projection.
const TOTAL_LABEL: &str = "total";

/// Records grouped into (quarter, category) cells, ready to be projected
/// into the bar chart, donut chart and pivoted table.
///
/// Quarters are held chronologically sorted; categories keep the order they
/// were first seen in the data, which is the display order of every
/// projection. Cells for (quarter, category) pairs that never occur in the
/// data read as zero, so all projections stay rectangular.
#[derive(Debug)]
pub struct Pivot {
    quarters: Vec<String>,
    categories: Vec<String>,
    cells: HashMap<String, HashMap<String, Totals>>,
}

impl Pivot {
    /// Group `records` in a single pass. Fails only when a quarter label
    /// cannot be parsed chronologically; empty input is a valid degenerate
    /// case yielding empty projections.
    pub fn build(records: &[Record]) -> Result<Pivot, DashboardError> {
        let mut quarters: Vec<(QuarterKey, String)> = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        let mut cells: HashMap<String, HashMap<String, Totals>> = HashMap::new();

        for record in records {
            if !quarters.iter().any(|(_, label)| label == &record.quarter) {
                let key = QuarterKey::parse(&record.quarter)?;
                quarters.push((key, record.quarter.clone()));
            }
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
            let cell = cells
                .entry(record.quarter.clone())
                .or_default()
                .entry(record.category.clone())
                .or_default();
            cell.count += record.count;
            cell.acv += record.acv;
        }

        quarters.sort_by_key(|(key, _)| *key);

        Ok(Pivot {
            quarters: quarters.into_iter().map(|(_, label)| label).collect(),
            categories,
            cells,
        })
    }

    /// Distinct quarters, chronologically sorted.
    pub fn quarters(&self) -> &[String] {
        &self.quarters
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn cell(&self, quarter: &str, category: &str) -> Totals {
        self.cells
            .get(quarter)
            .and_then(|row| row.get(category))
            .copied()
            .unwrap_or_default()
    }

    fn quarter_totals(&self, quarter: &str) -> Totals {
        let mut totals = Totals::default();
        for category in &self.categories {
            let cell = self.cell(quarter, category);
            totals.count += cell.count;
            totals.acv += cell.acv;
        }
        totals
    }

    /// One column per quarter, one segment per category (zero-filled).
    pub fn bar_chart(&self, colors: &CategoryColors) -> Vec<BarChartQuarter> {
        self.quarters
            .iter()
            .map(|quarter| {
                let values: Vec<SegmentValue> = self
                    .categories
                    .iter()
                    .map(|category| SegmentValue {
                        label: category.clone(),
                        value: self.cell(quarter, category).acv,
                        color: colors.color(category).to_string(),
                    })
                    .collect();
                BarChartQuarter {
                    quarter: quarter.clone(),
                    total: values.iter().map(|segment| segment.value).sum(),
                    values,
                }
            })
            .collect()
    }

    /// Per-category ACV across all quarters plus the grand total.
    pub fn doughnut_chart(&self) -> DoughnutChart {
        let slices: Vec<(String, f64)> = self
            .categories
            .iter()
            .map(|category| {
                let acv = self
                    .quarters
                    .iter()
                    .map(|quarter| self.cell(quarter, category).acv)
                    .sum();
                (category.clone(), acv)
            })
            .collect();
        DoughnutChart {
            total: slices.iter().map(|(_, acv)| acv).sum(),
            slices,
        }
    }

    /// The pivoted table: per-quarter category breakdowns with a synthetic
    /// total row each, plus one grand-total pseudo-quarter across all of
    /// them. Percentages are whole points of the quarter's (or grand) ACV,
    /// zero when the divisor is zero.
    pub fn table_data(&self, colors: &CategoryColors) -> TableData {
        let mut grand = Totals::default();
        let mut grand_by_category = vec![Totals::default(); self.categories.len()];

        let data: Vec<QuarterRow> = self
            .quarters
            .iter()
            .map(|quarter| {
                let totals = self.quarter_totals(quarter);
                let mut data_list = Vec::with_capacity(self.categories.len());
                for (index, category) in self.categories.iter().enumerate() {
                    let cell = self.cell(quarter, category);
                    grand_by_category[index].count += cell.count;
                    grand_by_category[index].acv += cell.acv;
                    data_list.push(CategoryBreakdown {
                        label: category.clone(),
                        total_percentage: percentage(cell.acv, totals.acv),
                        data: cell,
                    });
                }
                grand.count += totals.count;
                grand.acv += totals.acv;
                quarter_row(quarter.clone(), totals, data_list)
            })
            .collect();

        let grand_list: Vec<CategoryBreakdown> = self
            .categories
            .iter()
            .zip(&grand_by_category)
            .map(|(category, totals)| CategoryBreakdown {
                label: category.clone(),
                total_percentage: percentage(totals.acv, grand.acv),
                data: *totals,
            })
            .collect();

        TableData {
            row_types: colors
                .entries()
                .iter()
                .map(|(label, color)| RowType {
                    label: label.clone(),
                    color: color.clone(),
                })
                .collect(),
            total: quarter_row(TOTAL_LABEL.to_string(), grand, grand_list),
            data,
        }
    }
}

fn quarter_row(quarter: String, totals: Totals, data_list: Vec<CategoryBreakdown>) -> QuarterRow {
    QuarterRow {
        quarter,
        sub_data_info: SubDataInfo {
            total_info: CategoryBreakdown {
                label: TOTAL_LABEL.to_string(),
                total_percentage: 100,
                data: totals,
            },
            data_list,
        },
    }
}

fn percentage(part: f64, whole: f64) -> u32 {
    if whole == 0.0 {
        0
    } else {
        (part / whole * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quarter: &str, category: &str, count: u64, acv: f64) -> Record {
        Record {
            count,
            acv,
            quarter: quarter.to_string(),
            category: category.to_string(),
        }
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record("2023-Q3", "Existing Customer", 10, 100.0),
            record("2023-Q3", "New Customer", 5, 50.0),
            record("2023-Q4", "Existing Customer", 20, 200.0),
        ]
    }

    fn colors_for(pivot: &Pivot) -> CategoryColors {
        CategoryColors::assign(pivot.categories())
    }

    #[test]
    fn bar_chart_totals_equal_segment_sums() {
        let pivot = Pivot::build(&sample_records()).unwrap();
        let bars = pivot.bar_chart(&colors_for(&pivot));
        for bar in &bars {
            let sum: f64 = bar.values.iter().map(|v| v.value).sum();
            assert!((bar.total - sum).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn quarters_sort_chronologically() {
        let records = vec![
            record("2024-Q2", "A", 1, 1.0),
            record("2023-Q4", "A", 1, 1.0),
            record("2023-Q3", "A", 1, 1.0),
            record("2024-Q1", "A", 1, 1.0),
        ];
        let pivot = Pivot::build(&records).unwrap();
        assert_eq!(
            pivot.quarters(),
            ["2023-Q3", "2023-Q4", "2024-Q1", "2024-Q2"]
        );
        let bars = pivot.bar_chart(&colors_for(&pivot));
        let order: Vec<&str> = bars.iter().map(|b| b.quarter.as_str()).collect();
        assert_eq!(order, vec!["2023-Q3", "2023-Q4", "2024-Q1", "2024-Q2"]);
    }

    #[test]
    fn every_category_appears_in_every_quarter() {
        let pivot = Pivot::build(&sample_records()).unwrap();
        let colors = colors_for(&pivot);
        for bar in pivot.bar_chart(&colors) {
            let labels: Vec<&str> = bar.values.iter().map(|v| v.label.as_str()).collect();
            assert_eq!(labels, vec!["Existing Customer", "New Customer"]);
        }
        let table = pivot.table_data(&colors);
        for row in &table.data {
            assert_eq!(row.sub_data_info.data_list.len(), 2);
        }
        assert_eq!(pivot.doughnut_chart().slices.len(), 2);
    }

    #[test]
    fn end_to_end_scenario_matches_expected_breakdown() {
        let pivot = Pivot::build(&sample_records()).unwrap();
        let colors = colors_for(&pivot);

        let bars = pivot.bar_chart(&colors);
        assert_eq!(bars[0].quarter, "2023-Q3");
        assert_eq!(bars[0].total, 150.0);
        assert_eq!(bars[0].values[0].value, 100.0);
        assert_eq!(bars[0].values[1].value, 50.0);
        assert_eq!(bars[1].quarter, "2023-Q4");
        assert_eq!(bars[1].total, 200.0);
        assert_eq!(bars[1].values[0].value, 200.0);
        assert_eq!(bars[1].values[1].value, 0.0);

        let table = pivot.table_data(&colors);
        let q3 = &table.data[0].sub_data_info;
        assert_eq!(q3.total_info.data, Totals { count: 15, acv: 150.0 });
        assert_eq!(q3.data_list[0].total_percentage, 67);
        assert_eq!(q3.data_list[1].total_percentage, 33);
        let q4 = &table.data[1].sub_data_info;
        assert_eq!(q4.data_list[0].total_percentage, 100);
        assert_eq!(q4.data_list[1].total_percentage, 0);
        assert_eq!(q4.data_list[1].data, Totals::default());

        let grand = &table.total.sub_data_info;
        assert_eq!(table.total.quarter, "total");
        assert_eq!(grand.total_info.data, Totals { count: 35, acv: 350.0 });
        assert_eq!(grand.total_info.total_percentage, 100);
        assert_eq!(grand.data_list[0].data.acv, 300.0);
        assert_eq!(grand.data_list[0].total_percentage, 86);
        assert_eq!(grand.data_list[1].data.acv, 50.0);
        assert_eq!(grand.data_list[1].total_percentage, 14);
    }

    #[test]
    fn percentages_sum_within_rounding_tolerance() {
        let records = vec![
            record("2024-Q1", "A", 1, 33.0),
            record("2024-Q1", "B", 1, 33.0),
            record("2024-Q1", "C", 1, 34.0),
        ];
        let pivot = Pivot::build(&records).unwrap();
        let table = pivot.table_data(&colors_for(&pivot));
        let sum: u32 = table.data[0]
            .sub_data_info
            .data_list
            .iter()
            .map(|entry| entry.total_percentage)
            .sum();
        assert!((99..=101).contains(&sum));
    }

    #[test]
    fn zero_acv_quarter_yields_zero_percentages() {
        let records = vec![
            record("2024-Q1", "A", 3, 0.0),
            record("2024-Q1", "B", 2, 0.0),
        ];
        let pivot = Pivot::build(&records).unwrap();
        let table = pivot.table_data(&colors_for(&pivot));
        for entry in &table.data[0].sub_data_info.data_list {
            assert_eq!(entry.total_percentage, 0);
        }
    }

    #[test]
    fn grand_total_equals_sum_of_quarter_totals() {
        let pivot = Pivot::build(&sample_records()).unwrap();
        let colors = colors_for(&pivot);
        let bars = pivot.bar_chart(&colors);
        let bar_sum: f64 = bars.iter().map(|bar| bar.total).sum();
        let donut = pivot.doughnut_chart();
        assert!((donut.total - bar_sum).abs() < f64::EPSILON);
        let table = pivot.table_data(&colors);
        assert!((table.total.sub_data_info.total_info.data.acv - bar_sum).abs() < f64::EPSILON);
    }

    #[test]
    fn records_sharing_a_cell_are_summed_not_overwritten() {
        let records = vec![
            record("2024-Q1", "A", 2, 10.0),
            record("2024-Q1", "A", 3, 15.0),
        ];
        let pivot = Pivot::build(&records).unwrap();
        let bars = pivot.bar_chart(&colors_for(&pivot));
        assert_eq!(bars[0].values[0].value, 25.0);
        let table = pivot.table_data(&colors_for(&pivot));
        assert_eq!(
            table.data[0].sub_data_info.data_list[0].data,
            Totals { count: 5, acv: 25.0 }
        );
    }

    #[test]
    fn empty_input_produces_well_formed_empty_projections() {
        let pivot = Pivot::build(&[]).unwrap();
        let colors = colors_for(&pivot);
        assert!(pivot.quarters().is_empty());
        assert!(pivot.categories().is_empty());
        assert!(pivot.bar_chart(&colors).is_empty());
        let donut = pivot.doughnut_chart();
        assert_eq!(donut.total, 0.0);
        assert!(donut.slices.is_empty());
        let table = pivot.table_data(&colors);
        assert!(table.data.is_empty());
        assert!(table.row_types.is_empty());
        assert_eq!(table.total.sub_data_info.total_info.data, Totals::default());
    }

    #[test]
    fn malformed_quarter_label_is_rejected() {
        let records = vec![record("FY23 second half", "A", 1, 1.0)];
        let err = Pivot::build(&records).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedQuarter(_)));
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let records = vec![
            record("2024-Q1", "Zeta", 1, 1.0),
            record("2024-Q1", "Alpha", 1, 1.0),
            record("2023-Q4", "Mid", 1, 1.0),
        ];
        let pivot = Pivot::build(&records).unwrap();
        assert_eq!(pivot.categories(), ["Zeta", "Alpha", "Mid"]);
        let donut = pivot.doughnut_chart();
        let order: Vec<&str> = donut.slices.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);
    }
}
