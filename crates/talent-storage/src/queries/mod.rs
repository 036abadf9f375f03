pub mod aggregation;
pub mod interaction_ops;
pub mod weights_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use talent_core::errors::TalentResult;

use crate::to_storage_err;

/// Fixed-width UTC timestamps so that text comparison orders correctly.
pub(crate) fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(raw: &str) -> TalentResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw:?}: {e}")))
}
