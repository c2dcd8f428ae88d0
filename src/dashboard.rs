use crate::colors::CategoryColors;
use crate::error::DashboardError;
use crate::models::DashboardData;
use crate::modules::Module;
use crate::pivot::Pivot;
use crate::store::RecordStore;

/// Assemble the full dashboard response for one module: a single pivot
/// build and a single color assignment shared across the three views.
pub fn dashboard_data(
    store: &RecordStore,
    module: Module,
) -> Result<DashboardData, DashboardError> {
    let records = store.records(module);
    let pivot = Pivot::build(records)?;
    let colors = CategoryColors::assign(pivot.categories());
    Ok(DashboardData {
        bar_chart: pivot.bar_chart(&colors),
        doughnut_chart: pivot.doughnut_chart(),
        table_data: pivot.table_data(&colors),
    })
}
