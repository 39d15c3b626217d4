use std::ops::{Deref, Index, IndexMut};

use nalgebra::Vector3;

use crate::{Error, Result};

/// Column layout of a LiDAR point record: `[timestamp, x, y, z, intensity,
/// ...]`. Columns past `INTENSITY` pass through the pipeline untouched.
pub mod column {
    pub const TIMESTAMP: usize = 0;
    pub const X: usize = 1;
    pub const Y: usize = 2;
    pub const Z: usize = 3;
    pub const INTENSITY: usize = 4;
    /// Smallest width holding every column the labeler reads.
    pub const REQUIRED: usize = INTENSITY + 1;
}

/// Row-major table of point records, each row `width` values long.
///
/// Row order is the identity of a point: row `i` of any table derived from
/// this one describes the same point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    storage: Vec<f64>,
    width: usize,
}

impl PointTable {
    pub fn try_from_vec(storage: Vec<f64>, width: usize) -> Result<Self> {
        if width > 0 && storage.len() % width == 0 {
            Ok(PointTable { storage, width })
        } else {
            Err(Error::InvalidShape {
                len: storage.len(),
                width,
            })
        }
    }

    /// An empty table that still remembers its column count.
    #[inline]
    pub fn empty(width: usize) -> Self {
        PointTable {
            storage: Vec::new(),
            width,
        }
    }

    /// Builds a table from rows that must all share one width.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let width = match rows.first() {
            Some(row) => row.as_ref().len(),
            None => return Err(Error::InvalidShape { len: 0, width: 0 }),
        };
        let mut storage = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::InvalidShape {
                    len: storage.len() + row.len(),
                    width,
                });
            }
            storage.extend_from_slice(row);
        }
        Self::try_from_vec(storage, width)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.storage.len() / self.width
        }
    }

    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        &self.storage[index * self.width..(index + 1) * self.width]
    }

    #[inline]
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.storage.chunks_exact(self.width.max(1))
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(move |row| row[index])
    }

    /// Fails unless every column the labeler reads is present.
    pub fn check_columns(&self) -> Result<()> {
        if self.width < column::REQUIRED {
            return Err(Error::MissingColumns {
                required: column::REQUIRED,
                actual: self.width,
            });
        }
        Ok(())
    }

    /// Position of every row, in row order.
    pub fn coords(&self) -> Vec<Vector3<f64>> {
        { self.rows() }
            .map(|row| Vector3::new(row[column::X], row[column::Y], row[column::Z]))
            .collect()
    }

    pub fn intensities(&self) -> Vec<f64> {
        self.column(column::INTENSITY).collect()
    }

    /// Returns a new table with `values` appended as the last column.
    pub fn append_column(&self, values: &[f64]) -> Result<Self> {
        if values.len() != self.height() {
            return Err(Error::InvalidShape {
                len: values.len(),
                width: 1,
            });
        }

        let width = self.width + 1;
        let mut storage = Vec::with_capacity(self.height() * width);
        for (row, &value) in self.rows().zip(values) {
            storage.extend_from_slice(row);
            storage.push(value);
        }
        Ok(PointTable { storage, width })
    }
}

impl Deref for PointTable {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

impl Index<(usize, usize)> for PointTable {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.storage[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for PointTable {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.storage[row * self.width + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PointTable {
        PointTable::from_rows(&[
            [0.0, 1.0, 2.0, 3.0, 0.5, 7.0],
            [0.1, -1.0, -2.0, -3.0, 0.25, 8.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_shape() {
        let table = table();
        assert_eq!(table.width(), 6);
        assert_eq!(table.height(), 2);
        assert_eq!(table[(1, column::Y)], -2.0);
        assert_eq!(table.coords()[0], Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(table.intensities(), vec![0.5, 0.25]);

        assert_eq!(
            PointTable::try_from_vec(vec![0.0; 7], 5),
            Err(Error::InvalidShape { len: 7, width: 5 })
        );
        assert_eq!(PointTable::empty(5).height(), 0);
    }

    #[test]
    fn test_append_column() {
        let labeled = table().append_column(&[1.0, 0.0]).unwrap();
        assert_eq!(labeled.width(), 7);
        assert_eq!(labeled.row(0), &[0.0, 1.0, 2.0, 3.0, 0.5, 7.0, 1.0]);
        assert_eq!(labeled.row(1), &[0.1, -1.0, -2.0, -3.0, 0.25, 8.0, 0.0]);

        assert!(table().append_column(&[1.0]).is_err());
    }

    #[test]
    fn test_check_columns() {
        let narrow = PointTable::from_rows(&[[0.0, 1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(
            narrow.check_columns(),
            Err(Error::MissingColumns {
                required: 5,
                actual: 4
            })
        );
        assert!(table().check_columns().is_ok());
    }
}
