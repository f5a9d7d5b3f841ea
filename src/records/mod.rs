use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Context, Result};
use crate::fetch::decode::value_to_string;

pub mod render;

/// A flat field → value mapping in field order.
pub type Record = Map<String, Value>;

/// Labelled values describing one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series(Record);

impl Series {
    pub fn new(values: Record) -> Self {
        Self(values)
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_record(self) -> Record {
        self.0
    }
}

/// Rows sharing one column schema. Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Project records onto a fixed schema; absent fields become `null`, extras are dropped.
    pub fn with_columns<I>(columns: &[&str], records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(*column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows,
        }
    }

    /// Build a table whose columns are every key seen, in order of first appearance.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let records: Vec<Record> = records.into_iter().collect();
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }

        let borrowed: Vec<&str> = columns.iter().map(String::as_str).collect();
        Self::with_columns(&borrowed, records)
    }

    /// Two-column table from `(label, value)` pairs.
    pub fn from_pairs<I>(label_column: &str, value_column: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            columns: vec![label_column.to_string(), value_column.to_string()],
            rows: pairs
                .into_iter()
                .map(|(label, value)| vec![Value::String(label), value])
                .collect(),
        }
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

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row).and_then(|cells| cells.get(idx))
    }

    pub fn column(&self, column: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|name| name == column)?;
        Some(self.rows.iter().map(|cells| &cells[idx]).collect())
    }

    /// One row rebuilt as a record keyed by column name.
    pub fn record(&self, row: usize) -> Option<Record> {
        let cells = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .cloned()
                .zip(cells.iter().cloned())
                .collect(),
        )
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(value_to_string))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Persist the table so it can be opened in a spreadsheet.
    pub fn save_csv<P: AsRef<Path>>(&self, file_path: P) -> Result<()> {
        let path = file_path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
        self.write_csv(file)
    }
}

/// Product output tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum Normalized {
    Record(Record),
    Table(Table),
    Series(Series),
    /// Pass-through payloads that keep the provider's structure.
    Raw(Value),
}

impl Normalized {
    /// Tabular view for export; records and series become `field`/`value` rows.
    pub fn to_table(&self) -> Option<Table> {
        match self {
            Normalized::Table(table) => Some(table.clone()),
            Normalized::Record(record) => Some(pairs_table(record.clone())),
            Normalized::Series(series) => Some(pairs_table(series.clone().into_record())),
            Normalized::Raw(Value::Array(items)) => {
                let records: Option<Vec<Record>> = items
                    .iter()
                    .map(|item| item.as_object().cloned())
                    .collect();
                records.map(Table::from_records)
            }
            Normalized::Raw(Value::Object(map)) => Some(pairs_table(map.clone())),
            Normalized::Raw(_) => None,
        }
    }
}

impl From<Record> for Normalized {
    fn from(record: Record) -> Self {
        Normalized::Record(record)
    }
}

impl From<Table> for Normalized {
    fn from(table: Table) -> Self {
        Normalized::Table(table)
    }
}

impl From<Series> for Normalized {
    fn from(series: Series) -> Self {
        Normalized::Series(series)
    }
}

impl From<Value> for Normalized {
    fn from(value: Value) -> Self {
        Normalized::Raw(value)
    }
}

fn pairs_table(record: Record) -> Table {
    Table::from_pairs("field", "value", record)
}
