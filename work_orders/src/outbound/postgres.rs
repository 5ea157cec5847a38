//! The Postgres implementation of [WorkOrderStore]

use anyhow::Context;
use chrono::{DateTime, Utc};
use models_preservation::work_order::{
    ProgressEntry, ServiceLine, UpdateWorkOrderRequest, WorkOrder, WorkOrderDetail,
    WorkOrderStatus,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::models::{InsertOutcome, TransitionOutcome, TransitionWrite};
use crate::domain::ports::WorkOrderStore;

const WORK_ORDER_COLUMNS: &str = "id, wo_number, organization_id, property_id, created_by, \
     priority, status, billing_frequency, scheduled_date, description, access_instructions, \
     assigned_to, total_cost, accepted_at, started_at, completed_at, created_at, updated_at";

/// the unique constraint backing the numbering sequencer's guarantee
const WO_NUMBER_CONSTRAINT: &str = "work_orders_wo_number_key";

#[derive(Clone)]
pub struct PgWorkOrderStore {
    pool: PgPool,
}

impl PgWorkOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl WorkOrderStore for PgWorkOrderStore {
    type Err = anyhow::Error;

    async fn latest_wo_number(&self) -> Result<Option<String>, Self::Err> {
        sqlx::query_scalar::<_, String>(
            "SELECT wo_number FROM work_orders ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .context("unable to read the most recent work order number")
    }

    async fn property_exists(
        &self,
        property_id: Uuid,
        organization_id: Uuid,
    ) -> Result<bool, Self::Err> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM properties WHERE id = $1 AND organization_id = $2)",
        )
        .bind(property_id)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await
        .context("unable to check the property reference")
    }

    async fn insert_work_order(
        &self,
        order: WorkOrder,
        lines: Vec<ServiceLine>,
    ) -> Result<InsertOutcome, Self::Err> {
        // first write: the order row on its own
        let inserted = sqlx::query(
            "INSERT INTO work_orders (id, wo_number, organization_id, property_id, created_by, \
             priority, status, billing_frequency, scheduled_date, description, \
             access_instructions, assigned_to, total_cost, accepted_at, started_at, \
             completed_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)",
        )
        .bind(order.id)
        .bind(&order.wo_number)
        .bind(order.organization_id)
        .bind(order.property_id)
        .bind(&order.created_by)
        .bind(order.priority)
        .bind(order.status)
        .bind(order.billing_frequency)
        .bind(order.scheduled_date)
        .bind(&order.description)
        .bind(&order.access_instructions)
        .bind(&order.assigned_to)
        .bind(order.total_cost)
        .bind(order.accepted_at)
        .bind(order.started_at)
        .bind(order.completed_at)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await;

        if let Err(sqlx::Error::Database(db)) = &inserted {
            if db.constraint() == Some(WO_NUMBER_CONSTRAINT) {
                return Ok(InsertOutcome::NumberTaken);
            }
        }
        inserted.context("unable to create work order")?;

        // second write: the line rows. There is deliberately no transaction
        // spanning the two writes; a failure here leaves the order in place
        // and is reported as a partial success for the caller to reconcile.
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO work_order_services (id, work_order_id, service_id, service_name, \
             quantity, unit_price, line_total, position, created_at) ",
        );
        builder.push_values(lines.iter(), |mut row, line| {
            row.push_bind(line.id)
                .push_bind(line.work_order_id)
                .push_bind(&line.service_id)
                .push_bind(&line.service_name)
                .push_bind(line.quantity)
                .push_bind(line.unit_price)
                .push_bind(line.line_total)
                .push_bind(line.position)
                .push_bind(line.created_at);
        });

        match builder.build().execute(&self.pool).await {
            Ok(_) => Ok(InsertOutcome::Created {
                lines_persisted: true,
            }),
            Err(e) => {
                tracing::error!(error = ?e, wo_number = %order.wo_number,
                    "work order created but its service lines failed to persist");
                Ok(InsertOutcome::Created {
                    lines_persisted: false,
                })
            }
        }
    }

    async fn fetch_work_order(&self, id: Uuid) -> Result<Option<WorkOrderDetail>, Self::Err> {
        let order = sqlx::query_as::<_, WorkOrder>(&format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("unable to fetch work order")?;

        let Some(order) = order else {
            return Ok(None);
        };

        let services = sqlx::query_as::<_, ServiceLine>(
            "SELECT id, work_order_id, service_id, service_name, quantity, unit_price, \
             line_total, position, created_at \
             FROM work_order_services WHERE work_order_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .context("unable to fetch work order services")?;

        let progress_log = sqlx::query_as::<_, ProgressEntry>(
            "SELECT id, work_order_id, created_by, message, status_at_time, created_at \
             FROM progress_updates WHERE work_order_id = $1 ORDER BY created_at, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .context("unable to fetch progress entries")?;

        Ok(Some(WorkOrderDetail {
            order,
            services,
            progress_log,
        }))
    }

    async fn list_work_orders(
        &self,
        organization_id: Uuid,
        status: Option<WorkOrderStatus>,
    ) -> Result<Vec<WorkOrder>, Self::Err> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE organization_id = "
        ));
        builder.push_bind(organization_id);
        if let Some(status) = status {
            builder.push(" AND status = ");
            builder.push_bind(status);
        }
        builder.push(" ORDER BY created_at DESC");

        builder
            .build_query_as::<WorkOrder>()
            .fetch_all(&self.pool)
            .await
            .context("unable to list work orders")
    }

    async fn apply_transition(
        &self,
        id: Uuid,
        expected: WorkOrderStatus,
        write: TransitionWrite,
    ) -> Result<TransitionOutcome, Self::Err> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("unable to open transaction")?;

        // conditional on the status the caller read; COALESCE keeps a
        // milestone timestamp that is already set
        let updated = sqlx::query_as::<_, WorkOrder>(&format!(
            "UPDATE work_orders SET status = $1, \
             accepted_at = COALESCE(accepted_at, $2), \
             started_at = COALESCE(started_at, $3), \
             completed_at = COALESCE(completed_at, $4), \
             updated_at = $5 \
             WHERE id = $6 AND status = $7 \
             RETURNING {WORK_ORDER_COLUMNS}"
        ))
        .bind(write.next)
        .bind(write.accepted_at)
        .bind(write.started_at)
        .bind(write.completed_at)
        .bind(write.updated_at)
        .bind(id)
        .bind(expected)
        .fetch_optional(&mut *tx)
        .await
        .context("unable to apply transition")?;

        let Some(order) = updated else {
            tx.rollback().await.context("unable to roll back")?;
            return Ok(TransitionOutcome::Conflict);
        };

        insert_progress(&mut tx, &write.note)
            .await
            .context("unable to record the transition log entry")?;

        tx.commit().await.context("unable to commit transition")?;
        Ok(TransitionOutcome::Applied(order))
    }

    async fn append_progress(&self, entry: ProgressEntry) -> Result<(), Self::Err> {
        sqlx::query(
            "INSERT INTO progress_updates (id, work_order_id, created_by, message, \
             status_at_time, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.id)
        .bind(entry.work_order_id)
        .bind(&entry.created_by)
        .bind(&entry.message)
        .bind(entry.status_at_time)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .context("unable to append progress entry")?;
        Ok(())
    }

    async fn update_work_order(
        &self,
        id: Uuid,
        patch: UpdateWorkOrderRequest,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<WorkOrder>, Self::Err> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE work_orders SET updated_at = ");
        builder.push_bind(updated_at);
        if let Some(priority) = patch.priority {
            builder.push(", priority = ");
            builder.push_bind(priority);
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            builder.push(", scheduled_date = ");
            builder.push_bind(scheduled_date);
        }
        if let Some(description) = patch.description {
            builder.push(", description = ");
            builder.push_bind(description);
        }
        if let Some(access_instructions) = patch.access_instructions {
            builder.push(", access_instructions = ");
            builder.push_bind(access_instructions);
        }
        if let Some(assigned_to) = patch.assigned_to {
            builder.push(", assigned_to = ");
            builder.push_bind(assigned_to);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {WORK_ORDER_COLUMNS}"));

        builder
            .build_query_as::<WorkOrder>()
            .fetch_optional(&self.pool)
            .await
            .context("unable to update work order")
    }

    async fn delete_work_order(&self, id: Uuid) -> Result<bool, Self::Err> {
        let result = sqlx::query("DELETE FROM work_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("unable to delete work order")?;
        Ok(result.rows_affected() > 0)
    }
}

async fn insert_progress(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    entry: &ProgressEntry,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO progress_updates (id, work_order_id, created_by, message, \
         status_at_time, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(entry.id)
    .bind(entry.work_order_id)
    .bind(&entry.created_by)
    .bind(&entry.message)
    .bind(entry.status_at_time)
    .bind(entry.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
