use crate::catalog::ServiceFrequency;
use crate::work_order::{
    BillingFrequency, Priority, UpdateWorkOrderRequest, WorkOrderStatus,
};
use cool_asserts::assert_matches;

#[test]
fn status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(WorkOrderStatus::InProgress).unwrap(),
        serde_json::json!("in_progress")
    );
    assert_eq!(WorkOrderStatus::InProgress.to_string(), "in_progress");
}

#[test]
fn billing_frequency_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_value(BillingFrequency::OneTime).unwrap(),
        serde_json::json!("one-time")
    );
    let parsed: BillingFrequency = serde_json::from_str("\"one-time\"").unwrap();
    assert_matches!(parsed, BillingFrequency::OneTime);
}

#[test]
fn priority_defaults_to_normal() {
    assert_matches!(Priority::default(), Priority::Normal);
}

#[test]
fn one_time_and_as_needed_are_not_recurring() {
    assert!(!ServiceFrequency::OneTime.is_recurring());
    assert!(!ServiceFrequency::AsNeeded.is_recurring());
    assert!(ServiceFrequency::Monthly.is_recurring());
    assert!(ServiceFrequency::Quarterly.is_recurring());
}

#[test]
fn update_request_reports_every_immutable_field() {
    let body = serde_json::json!({
        "wo_number": "WO-2025-9999",
        "created_by": "someone-else",
        "priority": "high"
    });
    let offending = UpdateWorkOrderRequest::immutable_fields_in(&body);
    assert_eq!(offending, vec!["wo_number".to_string(), "created_by".to_string()]);
}

#[test]
fn update_request_rejects_unknown_fields() {
    let body = serde_json::json!({ "total_cost": "999.00" });
    let parsed = serde_json::from_value::<UpdateWorkOrderRequest>(body);
    assert!(parsed.is_err());
}

#[test]
fn update_request_detects_empty_patch() {
    let parsed: UpdateWorkOrderRequest = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(parsed.is_empty());

    let parsed: UpdateWorkOrderRequest =
        serde_json::from_value(serde_json::json!({ "priority": "emergency" })).unwrap();
    assert!(!parsed.is_empty());
}
