//! Immutable rectangular numeric grids
//!
//! A [`Grid`] is built once, from literal rows or parsed CSV values, and is only
//! read afterwards. Values are held as `f64` while the numeric domain the grid
//! was built from is kept in [`DType`] so integer inputs can be reported as
//! integers.

use crate::errors::{GridStatsError, Result};
use ndarray::{Array1, ArrayD, ArrayViewD, IxDyn};
use serde::Serialize;
use std::fmt;

/// Numeric domain shared by every element of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Integer,
    Float,
}

impl DType {
    /// Get the string representation of the domain
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element types a grid can be built from.
pub trait GridValue: Copy {
    /// Domain recorded for grids of this element type.
    const DTYPE: DType;

    fn to_f64(self) -> f64;
}

macro_rules! impl_grid_value {
    ($dtype:expr => $($t:ty),+) => {
        $(
            impl GridValue for $t {
                const DTYPE: DType = $dtype;

                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )+
    };
}

impl_grid_value!(DType::Integer => i8, i16, i32, i64, u8, u16, u32, u64);
impl_grid_value!(DType::Float => f32, f64);

/// Immutable rectangular collection of numbers
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: ArrayD<f64>,
    dtype: DType,
}

impl Grid {
    /// Create a one-dimensional grid from a sequence of values.
    pub fn from_vec<T: GridValue>(values: Vec<T>) -> Self {
        let data: Vec<f64> = values.into_iter().map(GridValue::to_f64).collect();
        Self {
            data: Array1::from_vec(data).into_dyn(),
            dtype: T::DTYPE,
        }
    }

    /// Create a two-dimensional grid (rows × columns) from literal rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridStatsError::RaggedRows`] if any row differs in length from
    /// the first one.
    pub fn from_rows<T: GridValue>(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n_cols {
                return Err(GridStatsError::RaggedRows {
                    row,
                    expected: n_cols,
                    found: values.len(),
                });
            }
            data.extend(values.into_iter().map(GridValue::to_f64));
        }

        Ok(Self {
            data: ArrayD::from_shape_vec(IxDyn(&[n_rows, n_cols]), data)?,
            dtype: T::DTYPE,
        })
    }

    /// Create a grid of arbitrary rank from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`GridStatsError::Shape`] if `values` does not fill `shape`.
    pub fn from_shape_vec<T: GridValue>(shape: &[usize], values: Vec<T>) -> Result<Self> {
        let data: Vec<f64> = values.into_iter().map(GridValue::to_f64).collect();
        Ok(Self {
            data: ArrayD::from_shape_vec(IxDyn(shape), data)?,
            dtype: T::DTYPE,
        })
    }

    /// Wrap an existing array, declaring its numeric domain.
    #[must_use]
    pub fn with_dtype(data: ArrayD<f64>, dtype: DType) -> Self {
        Self { data, dtype }
    }

    #[must_use]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of dimensions (the grid's rank)
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the underlying array.
    #[must_use]
    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }

    /// Copy the elements out in row-major order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }
}
