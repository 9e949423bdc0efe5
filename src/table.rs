//! CSV ingestion
//!
//! Reads a delimited file into Arrow record batches and hands numeric columns
//! to the reducer as [`Grid`]s. The reducer never sees the file format.

use crate::errors::{GridStatsError, Result};
use crate::grid::{DType, Grid};
use arrow_array::cast::AsArray;
use arrow_array::types::Float64Type;
use arrow_array::{Array, RecordBatch};
use arrow_csv::reader::Format;
use arrow_csv::ReaderBuilder;
use arrow_schema::{DataType, SchemaRef};
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Records sampled when inferring column types
const SCHEMA_INFERENCE_RECORDS: usize = 100;

/// Options controlling how a CSV file is parsed
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub has_header: bool,
    pub delimiter: u8,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
        }
    }
}

impl TableOptions {
    fn format(self) -> Format {
        Format::default()
            .with_header(self.has_header)
            .with_delimiter(self.delimiter)
    }
}

/// A parsed CSV table
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

fn numeric_dtype(data_type: &DataType) -> Option<DType> {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => Some(DType::Integer),
        DataType::Float16 | DataType::Float32 | DataType::Float64 => Some(DType::Float),
        _ => None,
    }
}

impl Table {
    /// Read a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid CSV.
    pub fn from_path<P: AsRef<Path>>(path: P, options: TableOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_reader(BufReader::new(file), options)?;

        info!(
            path = %path.as_ref().display(),
            rows = table.num_rows(),
            columns = table.schema.fields().len(),
            "loaded table"
        );
        Ok(table)
    }

    /// Read CSV from any seekable source. The source is read twice: once to
    /// infer column types and once to parse.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is not valid CSV.
    pub fn from_reader<R: Read + Seek>(mut reader: R, options: TableOptions) -> Result<Self> {
        let (schema, _) = options
            .format()
            .infer_schema(&mut reader, Some(SCHEMA_INFERENCE_RECORDS))?;
        reader.rewind()?;

        let schema: SchemaRef = Arc::new(schema);
        let csv_reader = ReaderBuilder::new(schema.clone())
            .with_header(options.has_header)
            .with_delimiter(options.delimiter)
            .build(reader)?;

        let batches = csv_reader.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { schema, batches })
    }

    /// Column names in file order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// One-dimensional grid holding the named column.
    ///
    /// Nulls become NaN, which makes an integer column a float grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridStatsError::ColumnNotFound`] for an unknown name and
    /// [`GridStatsError::NonNumericColumn`] for a column that is not numeric.
    pub fn column(&self, name: &str) -> Result<Grid> {
        let index = self
            .schema
            .index_of(name)
            .map_err(|_| GridStatsError::ColumnNotFound {
                column: name.to_string(),
            })?;
        let (values, dtype) = self.column_values(index)?;
        Ok(Grid::with_dtype(Array1::from_vec(values).into_dyn(), dtype))
    }

    /// Two-dimensional grid (rows × numeric columns), skipping columns that
    /// are not numeric.
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be cast to floating point.
    pub fn numeric_grid(&self) -> Result<Grid> {
        let mut columns = Vec::new();
        let mut dtype = DType::Integer;

        for (index, field) in self.schema.fields().iter().enumerate() {
            if numeric_dtype(field.data_type()).is_none() {
                continue;
            }
            let (values, column_dtype) = self.column_values(index)?;
            if column_dtype == DType::Float {
                dtype = DType::Float;
            }
            columns.push(values);
        }

        let rows = self.num_rows();
        let data = Array2::from_shape_fn((rows, columns.len()), |(r, c)| columns[c][r]);
        Ok(Grid::with_dtype(data.into_dyn(), dtype))
    }

    fn column_values(&self, index: usize) -> Result<(Vec<f64>, DType)> {
        let field = self.schema.field(index);
        let mut dtype =
            numeric_dtype(field.data_type()).ok_or_else(|| GridStatsError::NonNumericColumn {
                column: field.name().clone(),
                data_type: field.data_type().to_string(),
            })?;

        let mut values = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            let column = arrow_cast::cast::cast(batch.column(index), &DataType::Float64)?;
            let floats = column.as_primitive::<Float64Type>();
            if floats.null_count() > 0 {
                dtype = DType::Float;
            }
            values.extend(floats.iter().map(|value| value.unwrap_or(f64::NAN)));
        }
        Ok((values, dtype))
    }
}
