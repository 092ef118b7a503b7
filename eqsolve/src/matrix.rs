use crate::{Error, vector::Vector};

/// Dense row-major matrix.
/// Every row has the same length. The row count is fixed at creation,
/// only augmentation can add columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matrix {
    rows: Vec<Vector>,
    /// Stored separately so a matrix with zero rows still knows its width.
    num_cols: usize,
}

impl Matrix {
    /// A `rows` x `cols` matrix of zeroes.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![Vector::zeros(cols); rows],
            num_cols: cols,
        }
    }

    /// Build a matrix from its rows.
    /// Fails if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        let num_cols = rows.first().map(Vec::len).unwrap_or_default();
        if let Some(ragged) = rows.iter().find(|row| row.len() != num_cols) {
            return Err(Error::DimensionMismatch {
                expected: num_cols,
                actual: ragged.len(),
            });
        }
        Ok(Self {
            rows: rows.into_iter().map(Vector::from).collect(),
            num_cols,
        })
    }

    /// An n x 1 matrix holding `column`.
    pub fn from_column(column: &Vector) -> Self {
        Self {
            rows: column.iter().map(|&v| Vector::from([v])).collect(),
            num_cols: 1,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.num_cols
    }

    /// `(rows, cols)`
    pub fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Same number of rows as columns?
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Read a single entry.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Copy out column `col`.
    pub fn column(&self, col: usize) -> Vector {
        self.rows.iter().map(|row| row[col]).collect()
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &Vector> {
        self.rows.iter()
    }

    /// Append `column` as a new rightmost column.
    pub fn augment_vector(&mut self, column: &Vector) -> Result<(), Error> {
        self.check_same_rows(column.len())?;
        for (row, &v) in self.rows.iter_mut().zip(column.iter()) {
            *row = row.iter().copied().chain([v]).collect();
        }
        self.num_cols += 1;
        Ok(())
    }

    /// Append all of `other`'s columns to the right of this matrix.
    pub fn augment(&mut self, other: &Matrix) -> Result<(), Error> {
        self.check_same_rows(other.rows())?;
        for (row, extra) in self.rows.iter_mut().zip(other.rows.iter()) {
            *row = row.iter().chain(extra.iter()).copied().collect();
        }
        self.num_cols += other.cols();
        Ok(())
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// A new matrix with rows and columns exchanged.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols(), self.rows());
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                out.rows[j][i] = v;
            }
        }
        out
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, Error> {
        if self.cols() != rhs.rows() {
            return Err(Error::DimensionMismatch {
                expected: self.cols(),
                actual: rhs.rows(),
            });
        }
        let mut out = Matrix::zeros(self.rows(), rhs.cols());
        for (i, row) in self.rows.iter().enumerate() {
            for j in 0..rhs.cols() {
                out.rows[i][j] = row
                    .iter()
                    .zip(rhs.rows.iter())
                    .map(|(&a, rhs_row)| a * rhs_row[j])
                    .sum();
            }
        }
        Ok(out)
    }

    fn check_same_rows(&self, other_rows: usize) -> Result<(), Error> {
        if self.rows() != other_rows {
            return Err(Error::DimensionMismatch {
                expected: self.rows(),
                actual: other_rows,
            });
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Matrix {
    type Output = Vector;

    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row]
    }
}

impl std::ops::IndexMut<usize> for Matrix {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        &mut self.rows[row]
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<_> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(f64::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}
