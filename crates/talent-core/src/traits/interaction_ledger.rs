use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::errors::TalentResult;
use crate::models::{InteractionType, RecruiterInteraction, TypeBreakdown};

/// Append-only interaction store. There is deliberately no update or delete.
pub trait IInteractionLedger: Send + Sync {
    fn append(&self, interaction: &RecruiterInteraction) -> TalentResult<()>;

    fn count(&self) -> TalentResult<usize>;
    fn count_since(&self, since: DateTime<Utc>) -> TalentResult<usize>;
    fn count_attributed(&self) -> TalentResult<usize>;

    /// The newest `limit` interactions at or after `since`, returned in
    /// ledger (append) order.
    fn training_window(
        &self,
        since: DateTime<Utc>,
        limit: usize,
    ) -> TalentResult<Vec<RecruiterInteraction>>;

    fn breakdown_by_type(&self) -> TalentResult<BTreeMap<InteractionType, TypeBreakdown>>;
}
