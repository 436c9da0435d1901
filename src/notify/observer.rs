use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    engine::status::compute_all_statuses,
    error::AppError,
    model::{attendance::DailyAttendance, timesheet::TimesheetRow},
    store::TimesheetStore,
    utils::clock::SharedClock,
};

/// What a dashboard shows: today's entries and every employee's status,
/// stamped with the marker value they were loaded at.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = 1767600764.25)]
    pub marker: f64,

    pub statuses: Vec<DailyAttendance>,

    pub entries: Vec<TimesheetRow>,
}

/// Keeps one session's view of the day in sync with the store, reloading
/// only when the marker moves past what it last saw or the date rolls over.
pub struct DashboardObserver {
    store: TimesheetStore,
    clock: SharedClock,
    last_seen: f64,
    snapshot: Arc<DashboardSnapshot>,
}

impl DashboardObserver {
    /// Loads the initial snapshot.
    pub async fn start(store: TimesheetStore, clock: SharedClock) -> Result<Self, AppError> {
        let last_seen = store.marker().read();
        let snapshot = load_snapshot(&store, clock.today(), last_seen).await?;

        Ok(Self {
            store,
            clock,
            last_seen,
            snapshot: Arc::new(snapshot),
        })
    }

    pub fn last_seen(&self) -> f64 {
        self.last_seen
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.snapshot.clone()
    }

    /// One polling step. Returns the new snapshot when something changed.
    pub async fn poll(&mut self) -> Result<Option<Arc<DashboardSnapshot>>, AppError> {
        let marker = self.store.marker().read();
        let today = self.clock.today();

        if marker <= self.last_seen && today == self.snapshot.date {
            return Ok(None);
        }

        let snapshot = load_snapshot(&self.store, today, marker).await?;

        // only advance once the reload succeeded, so a failed poll is retried
        self.last_seen = marker;
        self.snapshot = Arc::new(snapshot);
        Ok(Some(self.snapshot.clone()))
    }
}

async fn load_snapshot(
    store: &TimesheetStore,
    date: NaiveDate,
    marker: f64,
) -> Result<DashboardSnapshot, AppError> {
    let day = store.day_snapshot(date).await?;
    let statuses = compute_all_statuses(&day.employees, date, &day.entries());

    Ok(DashboardSnapshot {
        date,
        marker,
        statuses,
        entries: day.rows,
    })
}
