use super::dto::{CommerzbankRecord, CommerzbankRow};
use crate::config::ImportConfig;
use crate::errors::StatementResult;
use crate::parsers::traits::Parser;
use csv::ReaderBuilder;

/// Splits a Commerzbank CSV export into raw rows.
///
/// Rows are validated one by one: a short or garbled row comes back as an
/// error in its [`CommerzbankRow`] and does not stop the rest of the file.
pub struct CommerzbankParser {
    delimiter: u8,
    has_header: bool,
}

impl CommerzbankParser {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            has_header: config.has_header,
        }
    }
}

impl Default for CommerzbankParser {
    fn default() -> Self {
        Self::new(&ImportConfig::default())
    }
}

impl Parser for CommerzbankParser {
    type Output = CommerzbankRow;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        let has_csv_extension = filename
            .map(|name| name.to_lowercase().ends_with(".csv"))
            .unwrap_or(false);

        let first_line = content.lines().next().unwrap_or("");
        let looks_like_export = first_line.contains("Buchungstag") && first_line.contains("Buchungstext");

        match filename {
            Some(_) => has_csv_extension && looks_like_export,
            None => looks_like_export,
        }
    }

    fn parse(&self, content: &str) -> StatementResult<Vec<Self::Output>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.has_header)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(content.as_bytes());

        if self.has_header {
            reader.headers()?;
        }

        let rows = reader
            .records()
            .map(|result| match result {
                Ok(record) => CommerzbankRow {
                    line: record.position().map_or(0, |p| p.line()),
                    record: CommerzbankRecord::try_from(&record),
                },
                Err(e) => CommerzbankRow {
                    line: e.position().map_or(0, |p| p.line()),
                    record: Err(e.into()),
                },
            })
            .collect();

        Ok(rows)
    }
}
