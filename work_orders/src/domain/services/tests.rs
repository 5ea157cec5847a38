use chrono::{DateTime, TimeZone, Utc};
use cool_asserts::assert_matches;
use mockall::Sequence;
use models_preservation::work_order::{
    AddProgressRequest, BillingFrequency, CreateWorkOrderRequestBuilder, Priority, ServiceSelection,
};
use rust_decimal_macros::dec;

use crate::domain::ports::MockWorkOrderStore;

use super::*;

struct FixedTime(DateTime<Utc>);

impl TimeGetter for FixedTime {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn flow(store: MockWorkOrderStore) -> WorkOrderFlow<MockWorkOrderStore, FixedTime> {
    WorkOrderFlow::new(store, FixedTime(fixed_now()))
}

fn create_request(services: Vec<ServiceSelection>) -> CreateWorkOrderRequest {
    CreateWorkOrderRequestBuilder::default()
        .organization_id(Uuid::nil())
        .created_by("vendor|pat@example.com".to_string())
        .property_id(Uuid::nil())
        .services(services)
        .billing_frequency(BillingFrequency::Monthly)
        .build()
        .unwrap()
}

fn order_with_status(status: WorkOrderStatus) -> WorkOrder {
    WorkOrder {
        id: Uuid::nil(),
        wo_number: "WO-2025-0042".to_string(),
        organization_id: Uuid::nil(),
        property_id: Uuid::nil(),
        created_by: "bank|sam@example.com".to_string(),
        priority: Priority::Normal,
        status,
        billing_frequency: BillingFrequency::Monthly,
        scheduled_date: None,
        description: None,
        access_instructions: None,
        assigned_to: None,
        total_cost: dec!(350),
        accepted_at: None,
        started_at: None,
        completed_at: None,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

fn detail_with_status(status: WorkOrderStatus) -> WorkOrderDetail {
    WorkOrderDetail {
        order: order_with_status(status),
        services: Vec::new(),
        progress_log: Vec::new(),
    }
}

#[tokio::test]
async fn create_snapshots_prices_and_numbers_the_order() {
    let mut store = MockWorkOrderStore::new();
    store
        .expect_property_exists()
        .times(1)
        .returning(|_, _| Box::pin(async { Ok(true) }));
    store
        .expect_latest_wo_number()
        .times(1)
        .returning(|| Box::pin(async { Ok(Some("WO-2025-0041".to_string())) }));
    store
        .expect_insert_work_order()
        .withf(|order, lines| {
            order.status == WorkOrderStatus::New
                && order.wo_number == "WO-2025-0042"
                && order.total_cost == dec!(350)
                && lines.len() == 2
                && lines[0].unit_price == dec!(100)
                && lines[1].unit_price == dec!(250)
                && lines[0].position == 0
                && lines[1].position == 1
        })
        .times(1)
        .returning(|_, _| {
            Box::pin(async {
                Ok(InsertOutcome::Created {
                    lines_persisted: true,
                })
            })
        });

    // lawn mowing ($100, monthly) x1 plus property securing ($250, one-time)
    // x1, billed monthly
    let created = flow(store)
        .create(create_request(vec![
            ServiceSelection {
                service_id: "lawn_mowing".to_string(),
                quantity: 1,
            },
            ServiceSelection {
                service_id: "property_securing".to_string(),
                quantity: 1,
            },
        ]))
        .await
        .unwrap();

    assert_eq!(created.order.total_cost, dec!(350));
    // the one-time charge stays out of the recurring figure
    assert_eq!(created.billing_amount, dec!(100));
    assert_eq!(created.order.status, WorkOrderStatus::New);
    assert!(created.service_lines_persisted);
    assert_eq!(
        created.order.total_cost,
        created.services.iter().map(|l| l.line_total).sum()
    );
}

#[tokio::test]
async fn create_requires_at_least_one_service() {
    let result = flow(MockWorkOrderStore::new())
        .create(create_request(Vec::new()))
        .await;
    assert_matches!(result, Err(WorkOrderError::Validation(_)));
}

#[tokio::test]
async fn create_rejects_a_zero_quantity() {
    let result = flow(MockWorkOrderStore::new())
        .create(create_request(vec![ServiceSelection {
            service_id: "lawn_mowing".to_string(),
            quantity: 0,
        }]))
        .await;
    assert_matches!(result, Err(WorkOrderError::Validation(message)) => {
        assert!(message.contains("lawn_mowing"));
    });
}

#[tokio::test]
async fn create_rejects_an_unknown_service() {
    let result = flow(MockWorkOrderStore::new())
        .create(create_request(vec![ServiceSelection {
            service_id: "gold_plating".to_string(),
            quantity: 1,
        }]))
        .await;
    assert_matches!(result, Err(WorkOrderError::Validation(message)) => {
        assert!(message.contains("gold_plating"));
    });
}

#[tokio::test]
async fn create_checks_the_property_reference() {
    let mut store = MockWorkOrderStore::new();
    store
        .expect_property_exists()
        .times(1)
        .returning(|_, _| Box::pin(async { Ok(false) }));

    let result = flow(store)
        .create(create_request(vec![ServiceSelection {
            service_id: "lawn_mowing".to_string(),
            quantity: 1,
        }]))
        .await;
    assert_matches!(result, Err(WorkOrderError::NotFound("property")));
}

#[tokio::test]
async fn create_refuses_a_malformed_latest_number() {
    let mut store = MockWorkOrderStore::new();
    store
        .expect_property_exists()
        .returning(|_, _| Box::pin(async { Ok(true) }));
    store
        .expect_latest_wo_number()
        .times(1)
        .returning(|| Box::pin(async { Ok(Some("ORDER-41".to_string())) }));

    let result = flow(store)
        .create(create_request(vec![ServiceSelection {
            service_id: "lawn_mowing".to_string(),
            quantity: 1,
        }]))
        .await;
    assert_matches!(result, Err(WorkOrderError::Numbering(_)));
}

#[tokio::test]
async fn create_retries_once_when_the_number_was_taken() {
    let mut store = MockWorkOrderStore::new();
    let mut seq = Sequence::new();
    store
        .expect_property_exists()
        .returning(|_, _| Box::pin(async { Ok(true) }));
    // first read races with another creator
    store
        .expect_latest_wo_number()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Box::pin(async { Ok(Some("WO-2025-0041".to_string())) }));
    store
        .expect_insert_work_order()
        .withf(|order, _| order.wo_number == "WO-2025-0042")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Box::pin(async { Ok(InsertOutcome::NumberTaken) }));
    // second read sees the winner's row
    store
        .expect_latest_wo_number()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Box::pin(async { Ok(Some("WO-2025-0042".to_string())) }));
    store
        .expect_insert_work_order()
        .withf(|order, _| order.wo_number == "WO-2025-0043")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| {
            Box::pin(async {
                Ok(InsertOutcome::Created {
                    lines_persisted: true,
                })
            })
        });

    let created = flow(store)
        .create(create_request(vec![ServiceSelection {
            service_id: "lawn_mowing".to_string(),
            quantity: 1,
        }]))
        .await
        .unwrap();
    assert_eq!(created.order.wo_number, "WO-2025-0043");
}

#[tokio::test]
async fn a_second_number_collision_surfaces_as_a_conflict() {
    let mut store = MockWorkOrderStore::new();
    store
        .expect_property_exists()
        .returning(|_, _| Box::pin(async { Ok(true) }));
    store
        .expect_latest_wo_number()
        .times(2)
        .returning(|| Box::pin(async { Ok(Some("WO-2025-0041".to_string())) }));
    store
        .expect_insert_work_order()
        .times(2)
        .returning(|_, _| Box::pin(async { Ok(InsertOutcome::NumberTaken) }));

    let result = flow(store)
        .create(create_request(vec![ServiceSelection {
            service_id: "lawn_mowing".to_string(),
            quantity: 1,
        }]))
        .await;
    assert_matches!(result, Err(WorkOrderError::Conflict));
}

#[tokio::test]
async fn a_partial_line_write_is_reported_not_rolled_back() {
    let mut store = MockWorkOrderStore::new();
    store
        .expect_property_exists()
        .returning(|_, _| Box::pin(async { Ok(true) }));
    store
        .expect_latest_wo_number()
        .returning(|| Box::pin(async { Ok(None) }));
    store.expect_insert_work_order().times(1).returning(|_, _| {
        Box::pin(async {
            Ok(InsertOutcome::Created {
                lines_persisted: false,
            })
        })
    });

    let created = flow(store)
        .create(create_request(vec![ServiceSelection {
            service_id: "lawn_mowing".to_string(),
            quantity: 1,
        }]))
        .await
        .unwrap();
    assert_eq!(created.order.wo_number, "WO-2025-0001");
    assert!(!created.service_lines_persisted);
}

#[tokio::test]
async fn accept_from_new_sets_the_milestone_and_logs() {
    let mut store = MockWorkOrderStore::new();
    let mut seq = Sequence::new();
    store
        .expect_fetch_work_order()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Box::pin(async { Ok(Some(detail_with_status(WorkOrderStatus::New))) })
        });
    store
        .expect_apply_transition()
        .withf(|_, expected, write| {
            *expected == WorkOrderStatus::New
                && write.next == WorkOrderStatus::Accepted
                && write.accepted_at == Some(fixed_now())
                && write.started_at.is_none()
                && write.completed_at.is_none()
                && write.note.message == "work order accepted"
                && write.note.status_at_time == WorkOrderStatus::Accepted
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| {
            Box::pin(async {
                Ok(TransitionOutcome::Applied(order_with_status(
                    WorkOrderStatus::Accepted,
                )))
            })
        });
    store
        .expect_fetch_work_order()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Box::pin(async { Ok(Some(detail_with_status(WorkOrderStatus::Accepted))) })
        });

    let detail = flow(store)
        .apply(
            Uuid::nil(),
            LifecycleAction::Accept,
            "vendor|pat@example.com".to_string(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(detail.order.status, WorkOrderStatus::Accepted);
}

#[tokio::test]
async fn start_and_complete_are_rejected_from_new() {
    for action in [LifecycleAction::Start, LifecycleAction::Complete] {
        let mut store = MockWorkOrderStore::new();
        store.expect_fetch_work_order().returning(|_| {
            Box::pin(async { Ok(Some(detail_with_status(WorkOrderStatus::New))) })
        });

        let result = flow(store)
            .apply(Uuid::nil(), action, "vendor|pat@example.com".to_string(), None)
            .await;
        assert_matches!(
            result,
            Err(WorkOrderError::InvalidTransition {
                current: WorkOrderStatus::New,
                ..
            })
        );
    }
}

#[tokio::test]
async fn completed_is_terminal() {
    let mut store = MockWorkOrderStore::new();
    store.expect_fetch_work_order().returning(|_| {
        Box::pin(async { Ok(Some(detail_with_status(WorkOrderStatus::Completed))) })
    });

    // a second complete must fail rather than overwrite completed_at
    let result = flow(store)
        .apply(
            Uuid::nil(),
            LifecycleAction::Complete,
            "vendor|pat@example.com".to_string(),
            None,
        )
        .await;
    assert_matches!(
        result,
        Err(WorkOrderError::InvalidTransition {
            current: WorkOrderStatus::Completed,
            action: LifecycleAction::Complete,
        })
    );
}

#[tokio::test]
async fn a_transition_conflict_is_retried_once_then_surfaced() {
    let mut store = MockWorkOrderStore::new();
    store.expect_fetch_work_order().times(2).returning(|_| {
        Box::pin(async { Ok(Some(detail_with_status(WorkOrderStatus::New))) })
    });
    store
        .expect_apply_transition()
        .times(2)
        .returning(|_, _, _| Box::pin(async { Ok(TransitionOutcome::Conflict) }));

    let result = flow(store)
        .apply(
            Uuid::nil(),
            LifecycleAction::Accept,
            "vendor|pat@example.com".to_string(),
            None,
        )
        .await;
    assert_matches!(result, Err(WorkOrderError::Conflict));
}

#[tokio::test]
async fn progress_notes_are_allowed_in_progress_and_after_completion() {
    for status in [WorkOrderStatus::InProgress, WorkOrderStatus::Completed] {
        let mut store = MockWorkOrderStore::new();
        store.expect_fetch_work_order().returning(move |_| {
            Box::pin(async move { Ok(Some(detail_with_status(status))) })
        });
        store
            .expect_append_progress()
            .withf(move |entry| entry.status_at_time == status)
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let entry = flow(store)
            .add_progress(
                Uuid::nil(),
                AddProgressRequest {
                    created_by: "vendor|pat@example.com".to_string(),
                    message: "lawn mowed, photos uploaded".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(entry.status_at_time, status);
    }
}

#[tokio::test]
async fn progress_notes_are_rejected_before_work_starts() {
    let mut store = MockWorkOrderStore::new();
    store.expect_fetch_work_order().returning(|_| {
        Box::pin(async { Ok(Some(detail_with_status(WorkOrderStatus::New))) })
    });

    let result = flow(store)
        .add_progress(
            Uuid::nil(),
            AddProgressRequest {
                created_by: "vendor|pat@example.com".to_string(),
                message: "too early".to_string(),
            },
        )
        .await;
    assert_matches!(
        result,
        Err(WorkOrderError::InvalidTransition {
            current: WorkOrderStatus::New,
            action: LifecycleAction::AddProgress,
        })
    );
}

#[tokio::test]
async fn update_rejects_immutable_fields_without_touching_the_store() {
    let result = flow(MockWorkOrderStore::new())
        .update(
            Uuid::nil(),
            serde_json::json!({ "wo_number": "WO-2025-9999" }),
        )
        .await;
    assert_matches!(result, Err(WorkOrderError::ImmutableField { fields }) => {
        assert_eq!(fields, ["wo_number"]);
    });
}

#[tokio::test]
async fn update_patches_mutable_fields() {
    let mut store = MockWorkOrderStore::new();
    store
        .expect_update_work_order()
        .withf(|_, patch, _| patch.priority == Some(Priority::High))
        .times(1)
        .returning(|_, _, _| {
            Box::pin(async { Ok(Some(order_with_status(WorkOrderStatus::New))) })
        });

    let order = flow(store)
        .update(Uuid::nil(), serde_json::json!({ "priority": "high" }))
        .await
        .unwrap();
    assert_eq!(order.wo_number, "WO-2025-0042");
}

#[tokio::test]
async fn an_empty_patch_is_a_validation_error() {
    let result = flow(MockWorkOrderStore::new())
        .update(Uuid::nil(), serde_json::json!({}))
        .await;
    assert_matches!(result, Err(WorkOrderError::Validation(_)));
}

#[tokio::test]
async fn deleting_a_missing_work_order_is_not_found() {
    let mut store = MockWorkOrderStore::new();
    store
        .expect_delete_work_order()
        .returning(|_| Box::pin(async { Ok(false) }));

    let result = flow(store).delete(Uuid::nil()).await;
    assert_matches!(result, Err(WorkOrderError::NotFound("work order")));
}
