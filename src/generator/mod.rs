//! Base dataset generation
//!
//! The dashboard never builds records itself; it asks a [`DataSource`]. The
//! default source is [`MockDataSource`], which synthesizes records from a
//! seedable random generator so tests can pin its output.

pub mod mock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ReportRecord, UserRecord};
use crate::DashboardError;

pub use mock::MockDataSource;

/// Unfiltered records owned by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseDataset {
    pub users: Vec<UserRecord>,
    pub reports: Vec<ReportRecord>,
}

impl BaseDataset {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Supplier of base records
///
/// `refresh` returns a new collection; it must not reorder, add or remove
/// users, only update fields of existing ones.
pub trait DataSource: Send {
    /// Produce the initial dataset
    fn load(&mut self, today: NaiveDate) -> Result<BaseDataset, DashboardError>;

    /// Produce a partially updated copy of `users`
    fn refresh(
        &mut self,
        users: &[UserRecord],
        today: NaiveDate,
    ) -> Result<Vec<UserRecord>, DashboardError>;
}
