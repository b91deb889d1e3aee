use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 一筆聯絡人，每個 CSV 資料列產生一筆
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub real_name: String,
    pub home_number: String,
    pub mobile_number: String,
}

impl Contact {
    pub fn new(
        real_name: impl Into<String>,
        home_number: impl Into<String>,
        mobile_number: impl Into<String>,
    ) -> Self {
        Self {
            real_name: real_name.into(),
            home_number: home_number.into(),
            mobile_number: mobile_number.into(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact: {}", self.real_name)
    }
}

/// Name written into the `name` attribute of the `<phonebook>` element.
///
/// Only emptiness is rejected; the value is otherwise used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhonebookName(String);

impl PhonebookName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(EtlError::InvalidConfigValueError {
                field: "phonebook_name".to_string(),
                value: name,
                reason: "Phonebook name cannot be empty".to_string(),
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhonebookName {
    type Error = EtlError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PhonebookName> for String {
    fn from(name: PhonebookName) -> Self {
        name.0
    }
}

impl fmt::Display for PhonebookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A CSV data row keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    /// 1-based data row number, header excluded
    pub index: usize,
    pub data: HashMap<String, String>,
}

impl CsvRow {
    /// Pairs header names with cells. Short rows simply lack the trailing
    /// keys; on duplicate header names the last column wins.
    pub fn from_record(
        index: usize,
        headers: &csv::StringRecord,
        record: &csv::StringRecord,
    ) -> Self {
        let mut data = HashMap::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(record.iter()) {
            data.insert(header.to_string(), cell.to_string());
        }
        Self { index, data }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.data.get(field).map(String::as_str)
    }
}

/// Input whose header row passed the column check. The data rows have not
/// been read yet; the underlying reader is released when this is dropped.
pub struct ValidatedInput<'a> {
    rows: Box<dyn Iterator<Item = Result<CsvRow>> + 'a>,
}

impl<'a> ValidatedInput<'a> {
    pub fn new<I>(rows: I) -> Self
    where
        I: Iterator<Item = Result<CsvRow>> + 'a,
    {
        Self {
            rows: Box::new(rows),
        }
    }

    pub fn into_rows(self) -> Box<dyn Iterator<Item = Result<CsvRow>> + 'a> {
        self.rows
    }
}

impl fmt::Debug for ValidatedInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedInput").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPhonebook {
    pub contact_count: usize,
    pub xml: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_display() {
        let contact = Contact::new("Jane Doe", "12345", "67890");
        assert_eq!(contact.to_string(), "Contact: Jane Doe");
    }

    #[test]
    fn test_phonebook_name_rejects_only_empty() {
        assert!(PhonebookName::new("").is_err());
        assert_eq!(PhonebookName::new(" ").unwrap().as_str(), " ");
        assert_eq!(
            PhonebookName::new("Family & Friends").unwrap().as_str(),
            "Family & Friends"
        );
    }

    #[test]
    fn test_row_from_short_record() {
        let headers = csv::StringRecord::from(vec!["realName", "home-number", "mobile-number"]);
        let record = csv::StringRecord::from(vec!["Jane Doe", "12345"]);
        let row = CsvRow::from_record(1, &headers, &record);

        assert_eq!(row.get("realName"), Some("Jane Doe"));
        assert_eq!(row.get("home-number"), Some("12345"));
        assert_eq!(row.get("mobile-number"), None);
    }
}
