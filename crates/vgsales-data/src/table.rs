//! Raw and cleaned tables
//!
//! [`RawTable`] holds the CSV input exactly as read: header names and string
//! fields. [`GameTable`] holds cleaned [`Game`] rows and is never mutated
//! once built; filtering produces a new table.

use std::{io, path::Path};

use csv::StringRecord;

use crate::{
    error::SchemaError,
    record::{self, Game},
};

const TOTAL_SALES: &str = "total_sales";

/// CSV input as read, before any cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl RawTable {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    /// Reads a CSV document with a header row.
    pub fn from_reader<R>(reader: R) -> Result<Self, SchemaError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        Self::read_all(&mut reader)
    }

    /// Reads a CSV file with a header row.
    pub fn from_path<P>(path: P) -> Result<Self, SchemaError>
    where
        P: AsRef<Path>,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        Self::read_all(&mut reader)
    }

    fn read_all<R>(reader: &mut csv::Reader<R>) -> Result<Self, SchemaError>
    where
        R: io::Read,
    {
        let headers = reader.headers()?.iter().map(str::to_owned).collect();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers, rows })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces the header names, keeping every row.
    #[must_use]
    pub fn with_headers(self, headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: self.rows,
        }
    }

    /// Position of the column named exactly `column`.
    pub fn column_index(&self, column: &'static str) -> Result<usize, SchemaError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or(SchemaError::MissingColumn { column })
    }
}

/// Cleaned table of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameTable {
    games: Vec<Game>,
}

impl GameTable {
    #[must_use]
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Game> {
        self.games.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Returns a new table with the rows matching `pred`.
    #[must_use]
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&Game) -> bool,
    {
        Self {
            games: self.games.iter().filter(|g| pred(g)).cloned().collect(),
        }
    }

    /// Writes the table as CSV with a header row.
    pub fn write_csv<W>(&self, writer: W) -> Result<(), csv::Error>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        if self.games.is_empty() {
            // serialize() only emits the header along with the first row
            writer.write_record(record::REQUIRED_COLUMNS.iter().chain(&[TOTAL_SALES]))?;
        }
        for game in &self.games {
            writer.serialize(game)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a GameTable {
    type Item = &'a Game;
    type IntoIter = std::slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, critic_score: Option<f64>) -> Game {
        Game {
            name: name.to_owned(),
            platform: "PS4".to_owned(),
            year_of_release: Some(2015),
            genre: "Action".to_owned(),
            na_sales: 1.5,
            eu_sales: 0.25,
            jp_sales: 0.0,
            other_sales: 0.03,
            critic_score,
            user_score: None,
            rating: Some("M".to_owned()),
            total_sales: 1.78,
        }
    }

    #[test]
    fn test_read_headers_and_rows() {
        let csv = "Name,Platform\nFoo,PS4\n\"Bar, Baz\",PC\n";
        let table = RawTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.headers(), ["Name", "Platform"]);
        assert_eq!(table.len(), 2);
        assert_eq!(&table.rows()[1][0], "Bar, Baz");
    }

    #[test]
    fn test_ragged_row_is_schema_error() {
        let csv = "name,platform\nFoo,PS4,extra\n";
        let err = RawTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SchemaError::Csv(_)));
    }

    #[test]
    fn test_column_index() {
        let table = RawTable::new(vec!["name".to_owned(), "platform".to_owned()], vec![]);
        assert_eq!(table.column_index("platform").unwrap(), 1);
        assert!(matches!(
            table.column_index("genre"),
            Err(SchemaError::MissingColumn { column: "genre" })
        ));
    }

    #[test]
    fn test_write_csv_leaves_missing_values_empty() {
        let table = GameTable::new(vec![game("Foo", None), game("Bar", Some(85.0))]);
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let written = RawTable::from_reader(out.as_slice()).unwrap();
        assert_eq!(
            written.headers().join(","),
            "name,platform,year_of_release,genre,na_sales,eu_sales,jp_sales,other_sales,critic_score,user_score,rating,total_sales"
        );
        let foo = &written.rows()[0];
        assert_eq!(&foo[0], "Foo");
        assert_eq!(&foo[2], "2015");
        assert_eq!(&foo[8], "");
        assert_eq!(&foo[9], "");
        assert_eq!(&foo[10], "M");
        let bar = &written.rows()[1];
        assert_eq!(bar[8].parse::<f64>().unwrap(), 85.0);
        assert_eq!(bar[11].parse::<f64>().unwrap(), 1.78);
    }

    #[test]
    fn test_write_empty_table_keeps_header() {
        let mut out = Vec::new();
        GameTable::default().write_csv(&mut out).unwrap();
        let table = RawTable::from_reader(out.as_slice()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 12);
        assert_eq!(table.headers()[11], "total_sales");
    }

    #[test]
    fn test_filter_is_non_destructive() {
        let table = GameTable::new(vec![game("Foo", None), game("Bar", Some(85.0))]);
        let scored = table.filter(|g| g.critic_score.is_some());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored.games()[0].name, "Bar");
        assert_eq!(table.len(), 2);
    }
}
