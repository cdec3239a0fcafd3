//! Contribution tracking operations

use chrono::{NaiveDate, Utc};
use serde_json::json;

use super::{Contribution, Notes};
use crate::error::Error;

impl<'a> Notes<'a> {
    /// Record activity for a calendar day.
    ///
    /// Calls the `record_contribution` database function, which inserts the
    /// day's row or increments its count in one atomic statement. Two
    /// concurrent calls for the same day can never produce two rows or lose
    /// an increment.
    pub async fn record_contribution(&self, day: NaiveDate) -> Result<Contribution, Error> {
        let rows = self
            .rpc()
            .call("record_contribution", json!({ "day": day }))
            .execute::<Vec<Contribution>>()
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("record_contribution returned no row"))
    }

    /// Record activity for today
    pub async fn record_today(&self) -> Result<Contribution, Error> {
        self.record_contribution(Utc::now().date_naive()).await
    }

    /// List the current user's contributions in a date range, oldest first,
    /// for the activity heatmap
    pub async fn list_contributions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Contribution>, Error> {
        self.table("contributions")
            .select("*")
            .gte("contribution_date", from)
            .lte("contribution_date", to)
            .order("contribution_date", true)
            .execute::<Contribution>()
            .await
    }
}
