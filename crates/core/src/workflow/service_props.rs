//! Property-based tests for WorkflowService.

use chrono::{Days, NaiveDate};
use mfo_shared::types::ManagerId;
use proptest::prelude::*;

use crate::auth::Capabilities;
use crate::status::PaymentStatusName;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{ApprovalDecision, ApprovalState};

fn arb_state() -> impl Strategy<Value = ApprovalState> {
    prop_oneof![
        Just(ApprovalState::Pending),
        Just(ApprovalState::Approved),
        Just(ApprovalState::Rejected),
    ]
}

fn arb_decision() -> impl Strategy<Value = ApprovalDecision> {
    prop_oneof![Just(ApprovalDecision::Approve), Just(ApprovalDecision::Reject)]
}

fn arb_manager() -> impl Strategy<Value = ManagerId> {
    (1i32..1_000_000).prop_map(ManagerId::new)
}

/// Role codenames that may or may not include the approval capability.
fn arb_capabilities() -> impl Strategy<Value = Capabilities> {
    (any::<bool>(), any::<bool>(), prop::collection::vec("[a-z_]{3,20}", 0..4)).prop_map(
        |(superuser, approver, mut codenames)| {
            codenames.retain(|c| c != "approve_transaction");
            if approver {
                codenames.push("approve_transaction".to_string());
            }
            Capabilities::new(superuser, codenames)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Only a pending transaction accepts a decision, and only from a capable actor.
    #[test]
    fn prop_decide_outcome_matrix(
        state in arb_state(),
        decision in arb_decision(),
        actor in arb_manager(),
        caps in arb_capabilities(),
    ) {
        let result = WorkflowService::decide(state, decision, actor, &caps);
        let capable = caps.is_superuser() || caps.codenames().iter().any(|c| c == "approve_transaction");

        match (capable, state) {
            (false, _) => prop_assert!(
                matches!(result, Err(WorkflowError::PermissionDenied { .. })),
                "expected PermissionDenied"
            ),
            (true, ApprovalState::Pending) => {
                let action = result.unwrap();
                prop_assert_eq!(action.new_state, decision.target_state());
                prop_assert_eq!(action.approved_by, actor);
                prop_assert!(action.new_state.is_terminal());
            }
            (true, decided) => prop_assert_eq!(
                result,
                Err(WorkflowError::AlreadyProcessed { state: decided })
            ),
        }
    }

    /// Applying any second decision after the first fails with AlreadyProcessed.
    #[test]
    fn prop_second_decision_rejected(
        first in arb_decision(),
        second in arb_decision(),
        actor in arb_manager(),
    ) {
        let caps = Capabilities::superuser();
        let action = WorkflowService::decide(ApprovalState::Pending, first, actor, &caps).unwrap();
        let again = WorkflowService::decide(action.new_state, second, actor, &caps);
        prop_assert_eq!(again, Err(WorkflowError::AlreadyProcessed { state: action.new_state }));
    }

    /// Late payments are overdue, everything else is paid.
    #[test]
    fn prop_payment_status(offset in -400i64..400) {
        let due = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let paid_on = if offset >= 0 {
            due.checked_add_days(Days::new(offset.unsigned_abs())).unwrap()
        } else {
            due.checked_sub_days(Days::new(offset.unsigned_abs())).unwrap()
        };

        let expected = if offset > 0 { PaymentStatusName::Overdue } else { PaymentStatusName::Paid };
        prop_assert_eq!(WorkflowService::payment_status_for(paid_on, due), expected);
    }
}
