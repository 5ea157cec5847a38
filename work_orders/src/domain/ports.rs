//! The ports the work-order domain requires from the outside world

use chrono::{DateTime, Utc};
use models_preservation::work_order::{
    ProgressEntry, ServiceLine, UpdateWorkOrderRequest, WorkOrder, WorkOrderDetail,
    WorkOrderStatus,
};
use uuid::Uuid;

use crate::domain::models::{InsertOutcome, TransitionOutcome, TransitionWrite};

/// Storage for the work-order aggregate and its dependent rows.
///
/// Transition writes are conditional on the status read by the caller; the
/// store reports [TransitionOutcome::Conflict] when the row moved on since
/// that read instead of applying a lost update.
#[cfg_attr(test, mockall::automock(type Err = anyhow::Error;))]
pub trait WorkOrderStore: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    /// wo_number of the most recently created work order, if any
    fn latest_wo_number(&self) -> impl Future<Output = Result<Option<String>, Self::Err>> + Send;

    /// true when the property exists and belongs to the organization
    fn property_exists(
        &self,
        property_id: Uuid,
        organization_id: Uuid,
    ) -> impl Future<Output = Result<bool, Self::Err>> + Send;

    /// Write the order row, then its line rows. The two writes are
    /// independent; a failed line write is reported through
    /// [InsertOutcome::Created], not rolled back.
    fn insert_work_order(
        &self,
        order: WorkOrder,
        lines: Vec<ServiceLine>,
    ) -> impl Future<Output = Result<InsertOutcome, Self::Err>> + Send;

    fn fetch_work_order(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<WorkOrderDetail>, Self::Err>> + Send;

    fn list_work_orders(
        &self,
        organization_id: Uuid,
        status: Option<WorkOrderStatus>,
    ) -> impl Future<Output = Result<Vec<WorkOrder>, Self::Err>> + Send;

    /// apply a transition only if the row still holds `expected`
    fn apply_transition(
        &self,
        id: Uuid,
        expected: WorkOrderStatus,
        write: TransitionWrite,
    ) -> impl Future<Output = Result<TransitionOutcome, Self::Err>> + Send;

    /// append one progress log entry
    fn append_progress(
        &self,
        entry: ProgressEntry,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;

    /// patch the mutable fields; returns the fresh row, None when absent
    fn update_work_order(
        &self,
        id: Uuid,
        patch: UpdateWorkOrderRequest,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<WorkOrder>, Self::Err>> + Send;

    /// administrative delete; dependent rows go with the order
    fn delete_work_order(&self, id: Uuid)
    -> impl Future<Output = Result<bool, Self::Err>> + Send;
}

/// port for getting the current system time
/// This is useful because the system time is always changing in the real world.
/// Having a trait allows tests to be consistent
pub trait TimeGetter: Send + Sync + 'static {
    /// get the current system time
    fn now(&self) -> DateTime<Utc>;
}
