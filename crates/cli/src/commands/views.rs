use anyhow::Result;
use physlog_service::DashboardService;
use serde_json::json;

use super::print_json;

pub(crate) fn merged(service: &DashboardService) -> Result<()> {
    let view = service.merged_view();
    print_json(&json!({
        "rows": view.rows,
        "skipped_rows": view.skipped.len(),
        "skipped": view.skipped,
    }))
}

pub(crate) fn chart(service: &DashboardService, subject: &str, test_item: &str) -> Result<()> {
    let chart = service.chart(subject, test_item);
    if !chart.has_data() {
        tracing::warn!(subject, test_item, "no rows for chart");
    }
    print_json(&serde_json::to_value(&chart)?)
}

pub(crate) fn selectors(service: &DashboardService) -> Result<()> {
    print_json(&serde_json::to_value(service.selectors())?)
}
