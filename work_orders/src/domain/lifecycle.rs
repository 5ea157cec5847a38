//! The legal status moves and their side effects.
//!
//! `new -> accepted -> in_progress -> completed`, with `declined` reachable
//! only from `new`. Nothing skips forward and the terminal states never
//! transition again. Progress notes are not transitions; the service layer
//! allows them while a work order is in progress or, for record keeping,
//! after completion.

use models_preservation::work_order::WorkOrderStatus;

use crate::domain::models::{LifecycleAction, WorkOrderError};

/// The milestone timestamp a transition sets, if any. Each is written at
/// most once over the life of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Accepted,
    Started,
    Completed,
}

/// What applying an action from a given status would do.
#[derive(Debug, Clone, Copy)]
pub struct TransitionPlan {
    pub next: WorkOrderStatus,
    pub milestone: Option<Milestone>,
    /// log message used when the caller does not supply a note
    pub default_note: &'static str,
}

/// Plan a transition, or reject it without touching anything.
pub fn plan(
    current: WorkOrderStatus,
    action: LifecycleAction,
) -> Result<TransitionPlan, WorkOrderError> {
    match (current, action) {
        (WorkOrderStatus::New, LifecycleAction::Accept) => Ok(TransitionPlan {
            next: WorkOrderStatus::Accepted,
            milestone: Some(Milestone::Accepted),
            default_note: "work order accepted",
        }),
        (WorkOrderStatus::New, LifecycleAction::Decline) => Ok(TransitionPlan {
            next: WorkOrderStatus::Declined,
            milestone: None,
            default_note: "work order declined",
        }),
        (WorkOrderStatus::Accepted, LifecycleAction::Start) => Ok(TransitionPlan {
            next: WorkOrderStatus::InProgress,
            milestone: Some(Milestone::Started),
            default_note: "work started",
        }),
        (WorkOrderStatus::InProgress, LifecycleAction::Complete) => Ok(TransitionPlan {
            next: WorkOrderStatus::Completed,
            milestone: Some(Milestone::Completed),
            default_note: "work completed",
        }),
        _ => Err(WorkOrderError::InvalidTransition { current, action }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;

    #[test]
    fn the_happy_path_is_accept_start_complete() {
        let accepted = plan(WorkOrderStatus::New, LifecycleAction::Accept).unwrap();
        assert_eq!(accepted.next, WorkOrderStatus::Accepted);
        assert_eq!(accepted.milestone, Some(Milestone::Accepted));

        let started = plan(WorkOrderStatus::Accepted, LifecycleAction::Start).unwrap();
        assert_eq!(started.next, WorkOrderStatus::InProgress);
        assert_eq!(started.milestone, Some(Milestone::Started));

        let completed = plan(WorkOrderStatus::InProgress, LifecycleAction::Complete).unwrap();
        assert_eq!(completed.next, WorkOrderStatus::Completed);
        assert_eq!(completed.milestone, Some(Milestone::Completed));
    }

    #[test]
    fn decline_is_only_reachable_from_new_and_sets_no_milestone() {
        let declined = plan(WorkOrderStatus::New, LifecycleAction::Decline).unwrap();
        assert_eq!(declined.next, WorkOrderStatus::Declined);
        assert_eq!(declined.milestone, None);

        assert_matches!(
            plan(WorkOrderStatus::Accepted, LifecycleAction::Decline),
            Err(WorkOrderError::InvalidTransition { .. })
        );
    }

    #[test]
    fn nothing_skips_forward() {
        assert_matches!(
            plan(WorkOrderStatus::New, LifecycleAction::Start),
            Err(WorkOrderError::InvalidTransition {
                current: WorkOrderStatus::New,
                action: LifecycleAction::Start,
            })
        );
        assert_matches!(
            plan(WorkOrderStatus::New, LifecycleAction::Complete),
            Err(WorkOrderError::InvalidTransition { .. })
        );
        assert_matches!(
            plan(WorkOrderStatus::Accepted, LifecycleAction::Complete),
            Err(WorkOrderError::InvalidTransition { .. })
        );
    }

    #[test]
    fn terminal_states_never_move_again() {
        for action in [
            LifecycleAction::Accept,
            LifecycleAction::Decline,
            LifecycleAction::Start,
            LifecycleAction::Complete,
        ] {
            assert_matches!(
                plan(WorkOrderStatus::Completed, action),
                Err(WorkOrderError::InvalidTransition { .. })
            );
            assert_matches!(
                plan(WorkOrderStatus::Declined, action),
                Err(WorkOrderError::InvalidTransition { .. })
            );
        }
    }
}
