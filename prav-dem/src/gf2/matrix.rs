//! Dense bit matrix over GF(2).
//!
//! Rows are stored back to back in a single owned `Vec<u64>`, each row
//! occupying `words_per_row` words. Entry `(r, c)` lives in bit `c % 64` of
//! word `r * words_per_row + c / 64`. Row addition is a word-wise XOR, so
//! eliminating one pivot touches `cols / 64` words per row instead of `cols`
//! individual entries.
//!
//! ```text
//! row 0: [w0 w1 .. wk]
//! row 1: [w0 w1 .. wk]
//! ...
//! ```

use crate::error::{DemError, Result};

/// Dense matrix over GF(2).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gf2Matrix {
    rows: usize,
    cols: usize,
    words_per_row: usize,
    data: Vec<u64>,
}

impl Gf2Matrix {
    /// Create an all-zero matrix of the given shape.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let words_per_row = cols.div_ceil(64);
        Self {
            rows,
            cols,
            words_per_row,
            data: vec![0; rows * words_per_row],
        }
    }

    /// Build a matrix from `0`/`1` rows.
    ///
    /// Fails with [`DemError::InvalidArgument`] if the rows have different
    /// lengths or contain anything other than `0` and `1`. An empty slice
    /// gives a `0 x 0` matrix.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut matrix = Self::zeros(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(DemError::InvalidArgument(format!(
                    "matrix rows must have the same length, row {r} has {} entries but row 0 has {cols}",
                    row.len()
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                matrix.set(r, c, check_binary(value)?);
            }
        }
        Ok(matrix)
    }

    /// Build a `rows x columns.len()` matrix whose columns are the given
    /// `0`/`1` vectors.
    ///
    /// `rows` is explicit so that a matrix without columns still has a shape.
    pub fn from_columns<C: AsRef<[u8]>>(rows: usize, columns: &[C]) -> Result<Self> {
        let mut matrix = Self::zeros(rows, columns.len());
        for (c, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            if column.len() != rows {
                return Err(DemError::InvalidArgument(format!(
                    "column {c} has {} entries, expected {rows}",
                    column.len()
                )));
            }
            for (r, &value) in column.iter().enumerate() {
                matrix.set(r, c, check_binary(value)?);
            }
        }
        Ok(matrix)
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read entry `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is outside the matrix.
    #[inline]
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> bool {
        assert!(r < self.rows && c < self.cols, "entry ({r}, {c}) out of bounds");
        (self.data[r * self.words_per_row + c / 64] >> (c % 64)) & 1 == 1
    }

    /// Write entry `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is outside the matrix.
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: bool) {
        assert!(r < self.rows && c < self.cols, "entry ({r}, {c}) out of bounds");
        let word = &mut self.data[r * self.words_per_row + c / 64];
        let mask = 1u64 << (c % 64);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Row `r` as a `0`/`1` vector.
    #[must_use]
    pub fn row(&self, r: usize) -> Vec<u8> {
        (0..self.cols).map(|c| u8::from(self.get(r, c))).collect()
    }

    /// All rows as `0`/`1` vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows).map(|r| self.row(r)).collect()
    }

    /// Compute `self · x (mod 2)`.
    pub fn mul_vec(&self, x: &[u8]) -> Result<Vec<u8>> {
        if x.len() != self.cols {
            return Err(DemError::InvalidArgument(format!(
                "vector has {} entries but the matrix has {} columns",
                x.len(),
                self.cols
            )));
        }
        let mut packed = vec![0u64; self.words_per_row];
        for (c, &value) in x.iter().enumerate() {
            if check_binary(value)? {
                packed[c / 64] |= 1 << (c % 64);
            }
        }
        Ok((0..self.rows)
            .map(|r| {
                let parity = self
                    .row_words(r)
                    .iter()
                    .zip(&packed)
                    .fold(0u32, |acc, (a, b)| acc ^ (a & b).count_ones());
                (parity & 1) as u8
            })
            .collect())
    }

    /// Append `b` as an extra last column, giving `[self | b]`.
    pub fn augment(&self, b: &[u8]) -> Result<Self> {
        if b.len() != self.rows {
            return Err(DemError::InvalidArgument(format!(
                "vector has {} entries but the matrix has {} rows",
                b.len(),
                self.rows
            )));
        }
        let mut out = Self::zeros(self.rows, self.cols + 1);
        for r in 0..self.rows {
            let src = self.row_words(r);
            let start = r * out.words_per_row;
            out.data[start..start + src.len()].copy_from_slice(src);
            out.set(r, self.cols, check_binary(b[r])?);
        }
        Ok(out)
    }

    #[inline]
    fn row_words(&self, r: usize) -> &[u64] {
        let start = r * self.words_per_row;
        &self.data[start..start + self.words_per_row]
    }

    /// Swap rows `a` and `b`.
    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let w = self.words_per_row;
        for k in 0..w {
            self.data.swap(a * w + k, b * w + k);
        }
    }

    /// `row[dst] ^= row[src]`.
    #[inline]
    pub(crate) fn xor_row_into(&mut self, src: usize, dst: usize) {
        let w = self.words_per_row;
        for k in 0..w {
            let v = self.data[src * w + k];
            self.data[dst * w + k] ^= v;
        }
    }
}

pub(crate) fn check_binary(value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(DemError::InvalidArgument(format!(
            "GF(2) entries must be 0 or 1, but {v} was given"
        ))),
    }
}
