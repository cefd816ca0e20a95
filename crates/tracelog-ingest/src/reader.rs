//! CSV parsing of decoded upload text.

use std::io::Cursor;

use polars::prelude::*;

use crate::error::{LoadError, Result};

/// Parse decoded CSV text into a DataFrame.
///
/// The first row is the header. Column types are inferred over the whole
/// file so a late non-numeric value cannot fail the parse.
pub fn read_frame(source_name: &str, text: String) -> Result<DataFrame> {
    if text.trim().is_empty() {
        return Err(LoadError::Empty {
            source_name: source_name.to_string(),
        });
    }

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| LoadError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

    validate_frame_shape(&mut df, source_name)?;
    Ok(df)
}

/// Name blank header cells `Unnamed: {position}`; warn on very wide inputs.
///
/// An exported index column has no header, so a leading blank name is common.
fn validate_frame_shape(df: &mut DataFrame, source_name: &str) -> Result<()> {
    if df.width() > 500 {
        tracing::warn!(
            source = source_name,
            columns = df.width(),
            "Trace log has more than 500 columns - may impact performance"
        );
    }

    let blank = df
        .get_column_names()
        .iter()
        .filter(|name| name.trim().is_empty())
        .count();
    if blank > 0 {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                if name.trim().is_empty() {
                    format!("Unnamed: {index}")
                } else {
                    name.to_string()
                }
            })
            .collect();
        tracing::debug!(source = source_name, blank, "named blank header cells");
        df.set_column_names(names)?;
    }

    Ok(())
}
