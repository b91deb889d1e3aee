use crate::domain::model::{Contact, CsvRow};
use crate::utils::error::{EtlError, Result};
use std::io::Read;

/// Comma delimited, double-quote quoted, header row required.
///
/// The reader is flexible so that a short row reaches the mapper and is
/// reported with its row number instead of as a bare length mismatch.
pub fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

/// Streams the data rows after the header as keyed rows.
pub fn rows<R: Read>(
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
) -> impl Iterator<Item = Result<CsvRow>> {
    reader
        .into_records()
        .enumerate()
        .map(move |(i, record)| {
            let record = record?;
            Ok(CsvRow::from_record(i + 1, &headers, &record))
        })
}

fn field(row: &CsvRow, name: &str) -> Result<String> {
    row.get(name)
        .map(str::to_string)
        .ok_or_else(|| EtlError::MalformedRow {
            row: row.index,
            field: name.to_string(),
        })
}

/// Projects exactly `realName`, `home-number` and `mobile-number`.
/// Values are copied verbatim: no trimming, empty cells allowed.
pub fn contact_from_row(row: &CsvRow) -> Result<Contact> {
    Ok(Contact {
        real_name: field(row, "realName")?,
        home_number: field(row, "home-number")?,
        mobile_number: field(row, "mobile-number")?,
    })
}

/// Maps every row in input order. The first row that cannot be mapped
/// aborts the whole run.
pub fn contacts_from_rows<I>(rows: I) -> Result<Vec<Contact>>
where
    I: IntoIterator<Item = Result<CsvRow>>,
{
    let mut contacts = Vec::new();

    for row in rows {
        let row = row?;
        let contact = contact_from_row(&row)?;
        tracing::debug!("{}", contact);
        contacts.push(contact);
    }

    Ok(contacts)
}
