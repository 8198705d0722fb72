//! Tabular record boundary
//!
//! The normalizers only need to read named cells and the pipeline only needs
//! to append named columns. [`RawRecord`] is the read side; [`Dataset`] is a
//! small in-memory table that offers both, plus delimited-text I/O behind the
//! `csv` feature.

use std::collections::{BTreeMap, HashMap};

use crate::error::DatasetError;

/// Read-only access to one record's cells by column name.
///
/// Empty cells read as missing.
pub trait RawRecord {
    fn get(&self, column: &str) -> Option<&str>;
}

impl RawRecord for HashMap<String, String> {
    fn get(&self, column: &str) -> Option<&str> {
        HashMap::get(self, column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl RawRecord for BTreeMap<String, String> {
    fn get(&self, column: &str) -> Option<&str> {
        BTreeMap::get(self, column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl<R: RawRecord + ?Sized> RawRecord for &R {
    fn get(&self, column: &str) -> Option<&str> {
        (**self).get(column)
    }
}

/// Ordered rows over named columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// One row of a [`Dataset`]
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of this row in its dataset
    pub fn index(&self) -> usize {
        self.index
    }
}

impl RawRecord for Row<'_> {
    fn get(&self, column: &str) -> Option<&str> {
        self.dataset.cell(self.index, column)
    }
}

impl Dataset {
    /// Create an empty dataset with the given header
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; empty strings are stored as missing
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<(), DatasetError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let row: Vec<Option<String>> = cells
            .into_iter()
            .map(|c| c.map(Into::into).filter(|s: &String| !s.is_empty()))
            .collect();
        if row.len() != self.columns.len() {
            return Err(DatasetError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Read one cell; missing column, row, or value all read as `None`
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then_some(Row {
            dataset: self,
            index,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.rows.len()).map(move |index| Row {
            dataset: self,
            index,
        })
    }

    /// Every value of one column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>, DatasetError> {
        let col = self
            .column_index(name)
            .ok_or_else(|| DatasetError::ColumnNotFound(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r[col].as_deref()).collect())
    }

    /// Append (or replace) a named column
    pub fn set_column(
        &mut self,
        name: &str,
        values: Vec<Option<String>>,
    ) -> Result<(), DatasetError> {
        if values.len() != self.rows.len() {
            return Err(DatasetError::LengthMismatch {
                name: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        let values = values
            .into_iter()
            .map(|v| v.filter(|s| !s.is_empty()));

        match self.column_index(name) {
            Some(col) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[col] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(feature = "csv")]
mod delimited {
    use std::io::{Read, Write};
    use std::path::Path;

    use super::Dataset;
    use crate::error::DatasetError;

    impl Dataset {
        /// Read delimited text with a header row
        pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, DatasetError> {
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .has_headers(true)
                .from_reader(reader);

            let headers = reader.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
            let mut dataset = Dataset::new(headers);

            for result in reader.records() {
                let record = result?;
                dataset.push_row(record.iter().map(Some))?;
            }

            tracing::debug!(
                rows = dataset.len(),
                columns = dataset.columns.len(),
                "read delimited dataset"
            );
            Ok(dataset)
        }

        /// Read a tab-separated file
        pub fn from_tsv_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
            let file = std::fs::File::open(path)?;
            Self::from_reader(std::io::BufReader::new(file), b'\t')
        }

        /// Write delimited text with a header row; missing cells are empty
        pub fn to_writer<W: Write>(&self, writer: W, delimiter: u8) -> Result<(), DatasetError> {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(writer);

            writer.write_record(&self.columns)?;
            for row in &self.rows {
                writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}
