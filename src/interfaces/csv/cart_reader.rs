use crate::domain::cart::LineDetails;
use crate::error::{OrderError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of a cart file:
/// `menu_id,quantity,student,room,delivery_date,customizations,notes`.
///
/// Customizations are separated by `;` within their column.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartLineRecord {
    pub menu_id: u32,
    pub quantity: i32,
    pub student: String,
    pub room: String,
    pub delivery_date: NaiveDate,
    #[serde(default, deserialize_with = "split_customizations")]
    pub customizations: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CartLineRecord {
    pub fn details(&self) -> LineDetails {
        let details = LineDetails::new(&self.student, &self.room, self.delivery_date)
            .with_customizations(self.customizations.iter().cloned());
        match &self.notes {
            Some(notes) => details.with_notes(notes),
            None => details,
        }
    }
}

fn split_customizations<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .split(';')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect())
}

/// Reads cart lines from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<CartLineRecord>`.
/// It handles whitespace trimming and missing trailing columns automatically.
pub struct CartLineReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CartLineReader<R> {
    /// Creates a new `CartLineReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes cart lines.
    pub fn lines(self) -> impl Iterator<Item = Result<CartLineRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(OrderError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "menu_id, quantity, student, room, delivery_date, customizations, notes\n\
                    4, 3, Tim Serrano, Room 420, 2025-10-02, Extra Kewpie Mayo Sauce, \n\
                    1, 2, Eroh Chae, Room 01, 2025-10-20, No Wasabi; Extra Ginger, Cut in half";
        let reader = CartLineReader::new(data.as_bytes());
        let results: Vec<Result<CartLineRecord>> = reader.lines().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.menu_id, 4);
        assert_eq!(first.customizations, vec!["Extra Kewpie Mayo Sauce"]);
        assert_eq!(first.notes, None);

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.customizations, vec!["No Wasabi", "Extra Ginger"]);
        assert_eq!(second.details().notes.as_deref(), Some("Cut in half"));
        assert_eq!(
            second.delivery_date,
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
        );
    }

    #[test]
    fn test_missing_optional_columns() {
        let data = "menu_id,quantity,student,room,delivery_date\n2,1,Tim,Room 420,2025-10-02";
        let results: Vec<Result<CartLineRecord>> =
            CartLineReader::new(data.as_bytes()).lines().collect();
        let line = results[0].as_ref().unwrap();
        assert!(line.customizations.is_empty());
        assert_eq!(line.notes, None);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "menu_id,quantity,student,room,delivery_date\nabc,1,Tim,Room 420,2025-10-02\n1,1,Tim,Room 420,not-a-date";
        let results: Vec<Result<CartLineRecord>> =
            CartLineReader::new(data.as_bytes()).lines().collect();

        assert!(results[0].is_err());
        assert!(results[1].is_err());
    }
}
