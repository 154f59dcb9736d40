pub mod analytics;
pub mod datasets;
pub mod expiry;
pub mod stock;

use chrono::{NaiveDate, Utc};

use crate::errors::ServiceError;

/// Resolve the caller-supplied reference date. Every derivation endpoint
/// accepts `as_of=YYYY-MM-DD` so "today" is injectable; absent means the
/// current UTC date.
pub(crate) fn resolve_as_of(raw: Option<&str>) -> Result<NaiveDate, ServiceError> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(value) => value.parse::<NaiveDate>().map_err(|_| {
            ServiceError::ValidationError(format!(
                "as_of must be a YYYY-MM-DD date, got '{value}'"
            ))
        }),
    }
}
