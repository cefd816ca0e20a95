//! CSV export of canonical tables and row subsets.

use std::io::Write;

use tracelog_model::{CanonicalTable, Record};

use crate::error::ExportError;

/// Write `records` under `columns` as CSV. Missing cells are written empty.
pub fn write_records<'a, W, I>(columns: &[String], records: I, writer: W) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns)?;
    for record in records {
        csv_writer.write_record(record.cells().iter().map(ToString::to_string))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(table: &CanonicalTable, writer: W) -> Result<(), ExportError> {
    write_records(table.columns(), table.records(), writer)
}

pub fn to_csv_bytes(table: &CanonicalTable) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn exports_timestamps_and_blanks() {
        let input = b"DateTime,Model,QRresult\n2025/01/05 10:00,M1,OK\nbad,,NG\n";
        let normalized = normalize("in.csv", input).unwrap();
        let bytes = to_csv_bytes(&normalized.table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "DateTime,Model,QRresult\n2025-01-05 10:00:00,M1,OK\nbad,,NG\n"
        );
    }
}
