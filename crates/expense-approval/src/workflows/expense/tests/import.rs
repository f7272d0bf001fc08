use rust_decimal_macros::dec;

use crate::workflows::expense::{parse_requests, ImportError, RequestError};

#[test]
fn parses_rows_in_order() {
    let csv = "\
requester,amount,purpose,department
alex, 50.00 ,Taxi,Sales
sam,2500.00,Trade show booth,Marketing
";

    let requests = parse_requests(csv.as_bytes()).expect("csv parses");

    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].requester(), "alex");
    assert_eq!(requests[0].amount(), dec!(50));
    assert_eq!(requests[1].department(), "Marketing");
}

#[test]
fn invalid_rows_report_their_position() {
    let csv = "\
requester,amount,purpose,department
alex,50.00,Taxi,Sales
sam,-12,Refund,Sales
";

    match parse_requests(csv.as_bytes()) {
        Err(ImportError::InvalidRow { row, source }) => {
            assert_eq!(row, 2);
            assert_eq!(source, RequestError::NegativeAmount(dec!(-12)));
        }
        other => panic!("expected invalid row, got {other:?}"),
    }
}

#[test]
fn missing_amount_is_reported_as_missing_field() {
    let csv = "requester,amount,purpose,department\nalex,,Taxi,Sales\n";

    match parse_requests(csv.as_bytes()) {
        Err(ImportError::InvalidRow { row: 1, source }) => {
            assert_eq!(source, RequestError::MissingField("amount"))
        }
        other => panic!("expected missing amount, got {other:?}"),
    }
}

#[test]
fn header_only_file_yields_no_requests() {
    let requests =
        parse_requests("requester,amount,purpose,department\n".as_bytes()).expect("parses");
    assert!(requests.is_empty());
}
