use chrono::Datelike;
use models_preservation::work_order::{
    AddProgressRequest, CreateWorkOrderRequest, CreatedWorkOrder, ProgressEntry, ServiceLine,
    UpdateWorkOrderRequest, WorkOrder, WorkOrderDetail, WorkOrderStatus,
};
use uuid::Uuid;

use crate::domain::{
    catalog, lifecycle,
    lifecycle::Milestone,
    models::{
        CostQuote, InsertOutcome, LifecycleAction, TransitionOutcome, TransitionWrite,
        WorkOrderError,
    },
    numbering,
    ports::{TimeGetter, WorkOrderStore},
    pricing,
};

#[cfg(test)]
mod tests;

/// struct which handles the work-order operations with abstracted interfaces
/// for mocking
pub struct WorkOrderFlow<S, T> {
    /// the interface for interacting with the db
    store: S,
    /// the interface for reading the clock
    clock: T,
}

impl<S, T> WorkOrderFlow<S, T>
where
    S: WorkOrderStore,
    anyhow::Error: From<S::Err>,
    T: TimeGetter,
{
    pub fn new(store: S, clock: T) -> Self {
        WorkOrderFlow { store, clock }
    }

    /// Assemble, number and persist a new work order.
    ///
    /// Unit prices are snapshotted from the catalog here; later catalog
    /// changes never flow into the stored lines. When two creators race to
    /// the same number the unique constraint rejects one of them and that
    /// creation is retried once with a freshly read sequence.
    #[tracing::instrument(skip(self, req), fields(property_id = %req.property_id))]
    pub async fn create(
        &self,
        req: CreateWorkOrderRequest,
    ) -> Result<CreatedWorkOrder, WorkOrderError> {
        if req.services.is_empty() {
            return Err(WorkOrderError::Validation(
                "at least one service must be selected".to_string(),
            ));
        }
        let mut definitions = Vec::with_capacity(req.services.len());
        for selection in &req.services {
            if selection.quantity < 1 {
                return Err(WorkOrderError::Validation(format!(
                    "quantity for {} must be at least 1",
                    selection.service_id
                )));
            }
            let definition = catalog::lookup(&selection.service_id).ok_or_else(|| {
                WorkOrderError::Validation(format!(
                    "unknown service {:?}",
                    selection.service_id
                ))
            })?;
            definitions.push(definition);
        }

        let property_ok = self
            .store
            .property_exists(req.property_id, req.organization_id)
            .await
            .map_err(anyhow::Error::from)?;
        if !property_ok {
            return Err(WorkOrderError::NotFound("property"));
        }

        let now = self.clock.now();
        let order_id = Uuid::now_v7();
        let lines: Vec<ServiceLine> = req
            .services
            .iter()
            .zip(&definitions)
            .enumerate()
            .map(|(position, (selection, definition))| ServiceLine {
                id: Uuid::now_v7(),
                work_order_id: order_id,
                service_id: definition.id.to_string(),
                service_name: definition.name.to_string(),
                quantity: selection.quantity,
                unit_price: definition.base_price,
                line_total: pricing::line_total(selection.quantity, definition.base_price),
                position: position as i32,
                created_at: now,
            })
            .collect();

        let quote = quote_for(&lines, &definitions, req.billing_frequency);

        let mut retried = false;
        loop {
            let latest = self
                .store
                .latest_wo_number()
                .await
                .map_err(anyhow::Error::from)?;
            let wo_number = numbering::next_wo_number(latest.as_deref(), now.year())?;

            let order = WorkOrder {
                id: order_id,
                wo_number,
                organization_id: req.organization_id,
                property_id: req.property_id,
                created_by: req.created_by.clone(),
                priority: req.priority.unwrap_or_default(),
                status: WorkOrderStatus::New,
                billing_frequency: req.billing_frequency,
                scheduled_date: req.scheduled_date,
                description: req.description.clone(),
                access_instructions: req.access_instructions.clone(),
                assigned_to: None,
                total_cost: quote.total_cost,
                accepted_at: None,
                started_at: None,
                completed_at: None,
                created_at: now,
                updated_at: now,
            };

            match self
                .store
                .insert_work_order(order.clone(), lines.clone())
                .await
                .map_err(anyhow::Error::from)?
            {
                InsertOutcome::Created { lines_persisted } => {
                    if !lines_persisted {
                        tracing::error!(
                            wo_number = %order.wo_number,
                            "work order created without its service lines; flag for reconciliation"
                        );
                    }
                    return Ok(CreatedWorkOrder {
                        order,
                        services: lines,
                        service_lines_persisted: lines_persisted,
                        billing_amount: quote.billing_amount,
                    });
                }
                InsertOutcome::NumberTaken if !retried => {
                    tracing::warn!(
                        wo_number = %order.wo_number,
                        "work order number already taken, regenerating"
                    );
                    retried = true;
                }
                InsertOutcome::NumberTaken => return Err(WorkOrderError::Conflict),
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<WorkOrderDetail, WorkOrderError> {
        self.store
            .fetch_work_order(id)
            .await
            .map_err(anyhow::Error::from)?
            .ok_or(WorkOrderError::NotFound("work order"))
    }

    pub async fn list(
        &self,
        organization_id: Uuid,
        status: Option<WorkOrderStatus>,
    ) -> Result<Vec<WorkOrder>, WorkOrderError> {
        Ok(self
            .store
            .list_work_orders(organization_id, status)
            .await
            .map_err(anyhow::Error::from)?)
    }

    /// Apply a lifecycle action.
    ///
    /// The transition is planned from a fresh read and written back
    /// conditionally on the status that was read; when the row moved in
    /// between, the whole thing is retried once before surfacing a conflict.
    #[tracing::instrument(skip(self, actor, note), fields(%id, %action))]
    pub async fn apply(
        &self,
        id: Uuid,
        action: LifecycleAction,
        actor: String,
        note: Option<String>,
    ) -> Result<WorkOrderDetail, WorkOrderError> {
        let mut retried = false;
        loop {
            let detail = self.get(id).await?;
            let current = detail.order.status;
            let transition = lifecycle::plan(current, action)?;
            let now = self.clock.now();

            let entry = ProgressEntry {
                id: Uuid::now_v7(),
                work_order_id: id,
                created_by: actor.clone(),
                message: note
                    .clone()
                    .unwrap_or_else(|| transition.default_note.to_string()),
                status_at_time: transition.next,
                created_at: now,
            };
            let write = TransitionWrite {
                next: transition.next,
                accepted_at: (transition.milestone == Some(Milestone::Accepted)).then_some(now),
                started_at: (transition.milestone == Some(Milestone::Started)).then_some(now),
                completed_at: (transition.milestone == Some(Milestone::Completed)).then_some(now),
                updated_at: now,
                note: entry,
            };

            match self
                .store
                .apply_transition(id, current, write)
                .await
                .map_err(anyhow::Error::from)?
            {
                TransitionOutcome::Applied(_) => return self.get(id).await,
                TransitionOutcome::Conflict if !retried => {
                    tracing::warn!(%id, "work order changed mid-transition, re-reading");
                    retried = true;
                }
                TransitionOutcome::Conflict => return Err(WorkOrderError::Conflict),
            }
        }
    }

    /// Append a progress note without changing status. Allowed while work is
    /// in progress and, for record keeping, on a completed order.
    pub async fn add_progress(
        &self,
        id: Uuid,
        req: AddProgressRequest,
    ) -> Result<ProgressEntry, WorkOrderError> {
        let detail = self.get(id).await?;
        let current = detail.order.status;
        if !matches!(
            current,
            WorkOrderStatus::InProgress | WorkOrderStatus::Completed
        ) {
            return Err(WorkOrderError::InvalidTransition {
                current,
                action: LifecycleAction::AddProgress,
            });
        }

        let entry = ProgressEntry {
            id: Uuid::now_v7(),
            work_order_id: id,
            created_by: req.created_by,
            message: req.message,
            status_at_time: current,
            created_at: self.clock.now(),
        };
        self.store
            .append_progress(entry.clone())
            .await
            .map_err(anyhow::Error::from)?;
        Ok(entry)
    }

    /// Patch the mutable fields of a work order.
    ///
    /// The raw body is scanned for immutable fields first so the caller gets
    /// every offending field named, then parsed into the typed request
    /// (which rejects fields that simply do not exist).
    pub async fn update(
        &self,
        id: Uuid,
        body: serde_json::Value,
    ) -> Result<WorkOrder, WorkOrderError> {
        let offending = UpdateWorkOrderRequest::immutable_fields_in(&body);
        if !offending.is_empty() {
            return Err(WorkOrderError::ImmutableField { fields: offending });
        }
        let patch: UpdateWorkOrderRequest = serde_json::from_value(body)
            .map_err(|e| WorkOrderError::Validation(format!("invalid update: {e}")))?;
        if patch.is_empty() {
            return Err(WorkOrderError::Validation(
                "no updatable fields provided".to_string(),
            ));
        }

        self.store
            .update_work_order(id, patch, self.clock.now())
            .await
            .map_err(anyhow::Error::from)?
            .ok_or(WorkOrderError::NotFound("work order"))
    }

    /// Administrative delete. Unconditional; dependent service lines and
    /// progress entries are removed with the order.
    pub async fn delete(&self, id: Uuid) -> Result<(), WorkOrderError> {
        let deleted = self
            .store
            .delete_work_order(id)
            .await
            .map_err(anyhow::Error::from)?;
        if deleted {
            Ok(())
        } else {
            Err(WorkOrderError::NotFound("work order"))
        }
    }
}

/// Price a set of lines against their catalog definitions.
fn quote_for(
    lines: &[ServiceLine],
    definitions: &[&'static models_preservation::catalog::ServiceDefinition],
    billing: models_preservation::work_order::BillingFrequency,
) -> CostQuote {
    let total_cost = lines.iter().map(|line| line.line_total).sum();
    let monthly_sum = pricing::recurring_monthly_sum(
        lines
            .iter()
            .zip(definitions)
            .map(|(line, definition)| (line.line_total, definition.frequency)),
    );
    CostQuote {
        total_cost,
        monthly_sum,
        billing_amount: pricing::billing_amount(total_cost, monthly_sum, billing),
    }
}
