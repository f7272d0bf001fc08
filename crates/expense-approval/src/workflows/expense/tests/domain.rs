use rust_decimal_macros::dec;

use crate::workflows::expense::{ExpenseRequest, RequestError};

#[test]
fn new_trims_and_keeps_fields() {
    let request = ExpenseRequest::new("  alex  ", dec!(42.50), " Team lunch ", "Design ")
        .expect("valid request");

    assert_eq!(request.requester(), "alex");
    assert_eq!(request.amount(), dec!(42.50));
    assert_eq!(request.purpose(), "Team lunch");
    assert_eq!(request.department(), "Design");
}

#[test]
fn zero_amount_is_allowed() {
    assert!(ExpenseRequest::new("alex", dec!(0), "Free sample", "Design").is_ok());
}

#[test]
fn negative_amount_fails_at_construction() {
    let err = ExpenseRequest::new("alex", dec!(-0.01), "Refund", "Design").expect_err("negative");
    assert_eq!(err, RequestError::NegativeAmount(dec!(-0.01)));
}

#[test]
fn blank_fields_fail_at_construction() {
    assert_eq!(
        ExpenseRequest::new(" ", dec!(1), "Snacks", "Design"),
        Err(RequestError::MissingField("requester"))
    );
    assert_eq!(
        ExpenseRequest::new("alex", dec!(1), "", "Design"),
        Err(RequestError::MissingField("purpose"))
    );
    assert_eq!(
        ExpenseRequest::new("alex", dec!(1), "Snacks", "\t"),
        Err(RequestError::MissingField("department"))
    );
}

#[test]
fn deserialization_validates_payloads() {
    let request: ExpenseRequest = serde_json::from_str(
        r#"{"requester":"alex","amount":"350.00","purpose":"Monitor","department":"Design"}"#,
    )
    .expect("valid payload");
    assert_eq!(request.amount(), dec!(350));

    let negative = serde_json::from_str::<ExpenseRequest>(
        r#"{"requester":"alex","amount":"-5","purpose":"Monitor","department":"Design"}"#,
    );
    assert!(negative.is_err());

    let garbled = serde_json::from_str::<ExpenseRequest>(
        r#"{"requester":"alex","amount":"lots","purpose":"Monitor","department":"Design"}"#,
    );
    assert!(garbled.is_err());
}
