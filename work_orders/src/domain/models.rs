use chrono::{DateTime, Utc};
use models_preservation::work_order::{ProgressEntry, WorkOrder, WorkOrderStatus};
use rust_decimal::Decimal;
use strum::Display;
use thiserror::Error;

use crate::domain::numbering::NumberingError;

/// The actions a vendor (or the system on their behalf) can take against a
/// work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleAction {
    Accept,
    Decline,
    Start,
    Complete,
    AddProgress,
}

#[derive(Debug, Error)]
pub enum WorkOrderError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("action {action} is not allowed while the work order is {current}")]
    InvalidTransition {
        current: WorkOrderStatus,
        action: LifecycleAction,
    },

    #[error("immutable fields cannot be updated: {}", fields.join(", "))]
    ImmutableField { fields: Vec<String> },

    #[error("the work order changed while the write was in flight")]
    Conflict,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Numbering(#[from] NumberingError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// What the store reports back from the two creation writes.
#[derive(Debug)]
pub enum InsertOutcome {
    /// the order row exists; `lines_persisted` is false when the second,
    /// independent line write failed (partial success, not rolled back)
    Created { lines_persisted: bool },
    /// the wo_number unique constraint rejected the row: another creator won
    /// the race for this number
    NumberTaken,
}

/// What the store reports back from a conditional transition write.
#[derive(Debug)]
pub enum TransitionOutcome {
    Applied(WorkOrder),
    /// the row no longer held the expected status at write time
    Conflict,
}

/// Everything a single transition writes: the new status, at most one
/// milestone timestamp, and the log entry recording the move.
///
/// Milestone fields are written with COALESCE semantics so a timestamp that
/// is already set is never overwritten.
#[derive(Debug, Clone)]
pub struct TransitionWrite {
    pub next: WorkOrderStatus,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub note: ProgressEntry,
}

/// Derived cost figures for a set of service lines and a billing frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostQuote {
    /// sum of every line total
    pub total_cost: Decimal,
    /// monthly-normalized sum over the recurring lines only
    pub monthly_sum: Decimal,
    /// what one billing period costs at the chosen frequency
    pub billing_amount: Decimal,
}
