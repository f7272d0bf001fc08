use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::{ExpenseRequest, ExpenseRequestDraft, RequestError};

/// Failure while importing expense requests from CSV.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to open expense file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed expense CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    InvalidRow { row: usize, source: RequestError },
}

/// Parse `requester,amount,purpose,department` rows into validated requests.
///
/// Row numbers in errors are 1-based and exclude the header line.
pub fn parse_requests<R: Read>(reader: R) -> Result<Vec<ExpenseRequest>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut requests = Vec::new();

    for (index, record) in csv_reader.deserialize::<ExpenseRequestDraft>().enumerate() {
        let draft = record?;
        let request = ExpenseRequest::try_from(draft).map_err(|source| ImportError::InvalidRow {
            row: index + 1,
            source,
        })?;
        requests.push(request);
    }

    Ok(requests)
}

pub fn load_requests(path: impl AsRef<Path>) -> Result<Vec<ExpenseRequest>, ImportError> {
    let file = File::open(path)?;
    parse_requests(file)
}
