use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::manager::{ManagerError, Outcome};
use crate::{Amount, Operation};

/// Errors that can occur when reading csv input
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open csv file: {0}")]
    Open(csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized operation type '{op_type}'")]
    UnrecognizedType { line: usize, op_type: String },

    #[error("line {line}: create missing discount")]
    MissingDiscount { line: usize },

    #[error("line {line}: apply missing amount")]
    MissingAmount { line: usize },

    #[error("line {line}: apply amount '{value}' is not a finite number")]
    NonFiniteAmount { line: usize, value: f64 },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    code: String,
    discount: Option<u32>,
    amount: Option<f64>,
}

#[derive(Debug, Default, Serialize)]
struct OutputRow {
    r#type: &'static str,
    code: String,
    discount: Option<String>,
    amount: Option<String>,
    final_amount: Option<String>,
    applied: Option<bool>,
    error: Option<String>,
}

/// Read operations from a csv file
pub fn read_operations(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Operation, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            match row.r#type.as_str() {
                "create" => Ok(Operation::Create {
                    code: row.code,
                    discount: row.discount.ok_or(CsvError::MissingDiscount { line })?,
                }),
                "apply" => {
                    let value = row.amount.ok_or(CsvError::MissingAmount { line })?;
                    if !value.is_finite() {
                        return Err(CsvError::NonFiniteAmount { line, value });
                    }
                    Ok(Operation::Apply {
                        code: row.code,
                        amount: Amount::from_float(value),
                    })
                }
                other => Err(CsvError::UnrecognizedType {
                    line,
                    op_type: other.to_string(),
                }),
            }
        }))
}

fn output_row(operation: &Operation, result: &Result<Outcome, ManagerError>) -> OutputRow {
    let mut row = match operation {
        Operation::Create { code, discount } => OutputRow {
            r#type: "create",
            code: code.clone(),
            discount: Some(discount.to_string()),
            ..Default::default()
        },
        Operation::Apply { code, amount } => OutputRow {
            r#type: "apply",
            code: code.clone(),
            amount: Some(amount.to_string()),
            ..Default::default()
        },
    };

    match result {
        Ok(Outcome::Created(_)) => {}
        Ok(Outcome::Applied(r)) => {
            row.discount = Some(r.discount.to_string());
            row.final_amount = Some(r.final_amount.to_string());
            row.applied = Some(r.applied);
        }
        Err(e) => row.error = Some(e.to_string()),
    }
    row
}

/// Write operation results in csv format
pub fn write_results<'a, W: io::Write>(
    writer: W,
    results: impl IntoIterator<Item = &'a (Operation, Result<Outcome, ManagerError>)>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for (operation, result) in results {
        writer.serialize(output_row(operation, result))?;
    }

    writer.flush()?;
    Ok(())
}
