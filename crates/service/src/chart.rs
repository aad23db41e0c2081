use physlog_core::{
    MSG_NO_DATA, Position, Snapshot, TrendLine, TrendPoint, chart_title, fit_trend, trend_points,
};
use serde::Serialize;

/// Chart for one subject and test item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartView {
    Data {
        title: String,
        subject: String,
        test_item: String,
        points: Vec<TrendPoint>,
        trend: TrendLine,
        skipped_rows: usize,
    },
    /// Nothing matched; not an error.
    NoData {
        title: String,
        subject: String,
        test_item: String,
        message: &'static str,
        skipped_rows: usize,
    },
}

impl ChartView {
    /// Filter the snapshot and fit the trend line when there is data.
    #[must_use]
    pub fn build(snapshot: &Snapshot, subject: &str, test_item: &str) -> Self {
        let series = snapshot.filtered(subject, test_item);
        let title = chart_title(subject, test_item);
        match fit_trend(&series.rows) {
            Some(trend) => Self::Data {
                title,
                subject: subject.to_owned(),
                test_item: test_item.to_owned(),
                points: trend_points(&series.rows),
                trend,
                skipped_rows: series.skipped_rows,
            },
            None => Self::NoData {
                title,
                subject: subject.to_owned(),
                test_item: test_item.to_owned(),
                message: MSG_NO_DATA,
                skipped_rows: series.skipped_rows,
            },
        }
    }

    #[must_use]
    pub fn points(&self) -> &[TrendPoint] {
        match self {
            Self::Data { points, .. } => points,
            Self::NoData { .. } => &[],
        }
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }
}

/// Values for the dashboard's select boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selectors {
    /// Distinct test items in the measurement table.
    pub test_items: Vec<String>,
    /// Distinct subject names that appear in the merged view.
    pub subject_names: Vec<String>,
    /// Every registry name, deduplicated, for the entry form.
    pub registry_names: Vec<String>,
    pub positions: Vec<&'static str>,
}

impl Selectors {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            test_items: snapshot.test_items(),
            subject_names: snapshot.subject_names(),
            registry_names: physlog_core::dedup_registry(&snapshot.registry)
                .into_iter()
                .map(|r| r.local_name.clone())
                .collect(),
            positions: Position::ALL_VARIANTS.iter().map(Position::as_str).collect(),
        }
    }
}
