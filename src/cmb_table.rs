//! Counting distinct combinations of integer values
//!
//! [`CmbTable`] is the cross-tabulation behind [`crate::raster::combine`]. Every distinct
//! key, a fixed-length vector of integers, is assigned an id when first seen. Ids are
//! handed out densely starting at 1 and never change afterwards.

use std::collections::HashMap;

use crate::errors::{GdalError, Result};

#[derive(Debug, Clone, Copy)]
struct CmbEntry {
    id: u64,
    count: u64,
}

/// One row of a [`CmbTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmbRow {
    pub cmbid: u64,
    pub count: u64,
    pub key: Vec<i32>,
}

/// A [`CmbTable`] laid out by column, one column per variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmbFrame {
    pub cmbid: Vec<u64>,
    pub count: Vec<u64>,
    pub columns: Vec<(String, Vec<i32>)>,
}

impl CmbFrame {
    pub fn column(&self, name: &str) -> Option<&[i32]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_slice())
    }

    pub fn n_rows(&self) -> usize {
        self.cmbid.len()
    }
}

#[derive(Debug, Clone)]
pub struct CmbTable {
    key_len: usize,
    var_names: Vec<String>,
    entries: HashMap<Vec<i32>, CmbEntry>,
    last_id: u64,
}

impl CmbTable {
    /// Creates an empty table for keys of `key_len` values.
    ///
    /// `var_names` names the key positions. An empty slice yields `V1..Vn`.
    pub fn new<S: AsRef<str>>(key_len: usize, var_names: &[S]) -> Result<CmbTable> {
        if key_len == 0 {
            return Err(GdalError::BadArgument(
                "key length must be at least 1".to_string(),
            ));
        }
        let var_names = if var_names.is_empty() {
            (1..=key_len).map(|i| format!("V{i}")).collect()
        } else if var_names.len() == key_len {
            var_names.iter().map(|n| n.as_ref().to_string()).collect()
        } else {
            return Err(GdalError::BadArgument(format!(
                "{} variable names given for a key of length {key_len}",
                var_names.len()
            )));
        };
        Ok(CmbTable {
            key_len,
            var_names,
            entries: HashMap::new(),
            last_id: 0,
        })
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// Number of distinct combinations seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> u64 {
        self.entries.values().map(|e| e.count).sum()
    }

    /// Adds `incr` to the count of `key` and returns its id.
    pub fn update(&mut self, key: &[i32], incr: u64) -> Result<u64> {
        if key.len() != self.key_len {
            return Err(GdalError::BadArgument(format!(
                "key of length {} does not match table key length {}",
                key.len(),
                self.key_len
            )));
        }
        if let Some(entry) = self.entries.get_mut(key) {
            entry.count += incr;
            return Ok(entry.id);
        }
        self.last_id += 1;
        self.entries.insert(
            key.to_vec(),
            CmbEntry {
                id: self.last_id,
                count: incr,
            },
        );
        Ok(self.last_id)
    }

    /// Updates from a column-major matrix with `key_len` rows, one key per column.
    ///
    /// Returns the id of every column.
    pub fn update_from_matrix(&mut self, matrix: &[i32], incr: u64) -> Result<Vec<u64>> {
        if matrix.len() % self.key_len != 0 {
            return Err(GdalError::BadArgument(format!(
                "matrix of {} values does not have {} rows",
                matrix.len(),
                self.key_len
            )));
        }
        matrix
            .chunks_exact(self.key_len)
            .map(|key| self.update(key, incr))
            .collect()
    }

    /// Updates from a matrix with `key_len` columns, given row by row, one key per row.
    ///
    /// Returns the id of every row.
    pub fn update_from_matrix_by_row<R: AsRef<[i32]>>(
        &mut self,
        rows: &[R],
        incr: u64,
    ) -> Result<Vec<u64>> {
        if let Some(row) = rows.iter().find(|r| r.as_ref().len() != self.key_len) {
            return Err(GdalError::BadArgument(format!(
                "matrix row of {} values does not match table key length {}",
                row.as_ref().len(),
                self.key_len
            )));
        }
        rows.iter().map(|row| self.update(row.as_ref(), incr)).collect()
    }

    /// Rows ordered by id.
    pub fn as_rows(&self) -> Vec<CmbRow> {
        let mut rows = self
            .entries
            .iter()
            .map(|(key, e)| CmbRow {
                cmbid: e.id,
                count: e.count,
                key: key.clone(),
            })
            .collect::<Vec<_>>();
        rows.sort_unstable_by_key(|r| r.cmbid);
        rows
    }

    /// Columns `cmbid`, `count` and one per variable, ordered by id.
    pub fn as_data_frame(&self) -> CmbFrame {
        let rows = self.as_rows();
        let columns = self
            .var_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), rows.iter().map(|r| r.key[i]).collect()))
            .collect();
        CmbFrame {
            cmbid: rows.iter().map(|r| r.cmbid).collect(),
            count: rows.iter().map(|r| r.count).collect(),
            columns,
        }
    }
}
