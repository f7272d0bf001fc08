use rust_decimal_macros::dec;

use super::common::*;
use crate::workflows::expense::{
    CheckPredicate, DecisionCheck, DecisionChecks, DepartmentBudgets, ExpenseRequest,
};

#[test]
fn default_checks_pass_every_request() {
    let checks = DecisionChecks::default();
    let request = request(dec!(15000));

    for check in DecisionCheck::ALL {
        assert!(checks.run(check, &request), "{check} should pass by default");
    }
}

#[test]
fn replacing_one_check_leaves_the_others_untouched() {
    let checks = checks_failing(DecisionCheck::Policy);
    let request = request(dec!(10));

    for check in DecisionCheck::ALL {
        assert_eq!(checks.run(check, &request), check != DecisionCheck::Policy);
    }
}

#[test]
fn checks_can_inspect_the_request() {
    let checks = DecisionChecks::default().with_check(
        DecisionCheck::Receipt,
        |request: &ExpenseRequest| request.purpose() != "Unreceipted cash",
    );
    let unreceipted =
        ExpenseRequest::new("sam", dec!(20), "Unreceipted cash", "Sales").expect("valid");

    assert!(!checks.run(DecisionCheck::Receipt, &unreceipted));
    assert!(checks.run(DecisionCheck::Receipt, &request(dec!(20))));
}

#[test]
fn department_budgets_cover_known_departments_only() {
    let budgets = DepartmentBudgets::new()
        .with_budget("Engineering", dec!(400))
        .with_budget("Sales", dec!(50));

    assert!(budgets.passes(&request(dec!(400))));
    assert!(!budgets.passes(&request(dec!(400.01))));

    let marketing = ExpenseRequest::new("kai", dec!(1), "Flyers", "Marketing").expect("valid");
    assert!(!budgets.passes(&marketing));
    assert_eq!(budgets.remaining("Sales"), Some(dec!(50)));
}

#[test]
fn check_labels_are_human_readable() {
    assert_eq!(DecisionCheck::StrategicAlignment.to_string(), "strategic alignment");
    assert_eq!(DecisionCheck::BoardApproval.label(), "board approval");
}
