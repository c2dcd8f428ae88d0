use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One pre-aggregated source row, normalized from the module-specific JSON
/// shapes. Every record belongs to exactly one (quarter, category) cell;
/// rows sharing a cell are summed by the aggregator.
#[derive(Debug, Clone)]
pub struct Record {
    pub count: u64,
    pub acv: f64,
    pub quarter: String,
    pub category: String,
}

/// Summed count/ACV for one cell, one quarter, or the whole data set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub count: u64,
    pub acv: f64,
}

/// One colored segment of a bar-chart column.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentValue {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// One bar-chart column: a quarter with its ACV total and one segment per
/// category (zero-valued segments included so columns stay rectangular).
#[derive(Debug, Clone, Serialize)]
pub struct BarChartQuarter {
    pub quarter: String,
    pub total: f64,
    pub values: Vec<SegmentValue>,
}

/// Donut projection: per-category ACV summed over all quarters plus the
/// grand total. Serializes as the flat map the frontend consumes,
/// `{"total": …, "<category>": …}`, slices in first-seen category order.
#[derive(Debug, Clone)]
pub struct DoughnutChart {
    pub total: f64,
    pub slices: Vec<(String, f64)>,
}

impl Serialize for DoughnutChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slices.len() + 1))?;
        map.serialize_entry("total", &self.total)?;
        for (category, acv) in &self.slices {
            map.serialize_entry(category, acv)?;
        }
        map.end()
    }
}

/// Legend entry tying a table row type (category) to its display color.
#[derive(Debug, Clone, Serialize)]
pub struct RowType {
    #[serde(rename = "type")]
    pub label: String,
    pub color: String,
}

/// One table row: a category's totals within a quarter and its share of the
/// quarter's ACV, rounded to a whole percentage point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    #[serde(rename = "type")]
    pub label: String,
    pub total_percentage: u32,
    pub data: Totals,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDataInfo {
    pub total_info: CategoryBreakdown,
    pub data_list: Vec<CategoryBreakdown>,
}

/// One pivoted table column: a quarter (or the `"total"` pseudo-quarter)
/// with its summary row and per-category breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterRow {
    pub quarter: String,
    pub sub_data_info: SubDataInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub row_types: Vec<RowType>,
    pub total: QuarterRow,
    pub data: Vec<QuarterRow>,
}

/// The full dashboard response: three projections of one aggregation pass,
/// sharing a single category color assignment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub bar_chart: Vec<BarChartQuarter>,
    pub doughnut_chart: DoughnutChart,
    pub table_data: TableData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doughnut_serializes_as_flat_map_in_slice_order() {
        let chart = DoughnutChart {
            total: 150.0,
            slices: vec![
                ("Existing Customer".to_string(), 100.0),
                ("New Customer".to_string(), 50.0),
            ],
        };
        let json = serde_json::to_string(&chart).unwrap();
        assert_eq!(
            json,
            r#"{"total":150.0,"Existing Customer":100.0,"New Customer":50.0}"#
        );
    }

    #[test]
    fn wire_names_are_camel_case() {
        let row = CategoryBreakdown {
            label: "Existing Customer".to_string(),
            total_percentage: 67,
            data: Totals { count: 10, acv: 100.0 },
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "Existing Customer");
        assert_eq!(value["totalPercentage"], 67);
        assert_eq!(value["data"]["count"], 10);
    }
}
