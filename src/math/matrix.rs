use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major matrix. `data[r]` is row `r`, every row has `cols` entries.
///
/// Shapes are fixed at construction; the in-place methods below write into
/// existing storage and never grow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Independent uniform samples from `[-range, range]`.
    pub fn random_uniform<R: Rng + ?Sized>(rows: usize, cols: usize, range: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for row in res.data.iter_mut() {
            for x in row.iter_mut() {
                *x = rng.gen_range(-range..=range);
            }
        }

        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        self.transpose_into(&mut res);
        res
    }

    /// Writes the transpose of `self` into `out`, which must already be
    /// `cols x rows`. Nothing is written when the shape is wrong.
    pub fn transpose_into(&self, out: &mut Matrix) -> bool {
        if out.rows != self.cols || out.cols != self.rows {
            return false;
        }

        for i in 0..out.rows {
            for j in 0..out.cols {
                out.data[i][j] = self.data[j][i];
            }
        }

        true
    }

    /// True when `data` agrees with the `rows`/`cols` header.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    /// Copies `other` element-wise into `self` when the shapes agree.
    pub fn copy_from(&mut self, other: &Matrix) -> bool {
        if self.rows != other.rows || self.cols != other.cols || !other.is_well_formed() {
            return false;
        }
        for (dst, src) in self.data.iter_mut().zip(other.data.iter()) {
            dst.copy_from_slice(src);
        }
        true
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r]
    }

    /// Builds a matrix from rows. Ragged input is truncated to the shortest row.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.iter().map(Vec::len).min().unwrap_or(0);
        let data: Vec<Vec<f64>> = data
            .into_iter()
            .map(|mut row| { row.truncate(cols); row })
            .collect();
        Matrix {
            rows: data.len(),
            cols,
            data
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn transpose_swaps_shape_and_entries() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!((t.rows, t.cols), (3, 2));
        assert_eq!(t.data, vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    }

    #[test]
    fn transpose_twice_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(r, c) in &[(1, 1), (1, 5), (4, 1), (3, 7)] {
            let m = Matrix::random_uniform(r, c, 1.0, &mut rng);
            assert_eq!(m.transpose().transpose(), m);
        }
    }

    #[test]
    fn transpose_into_rejects_wrong_shape() {
        let m = Matrix::zeros(2, 3);
        let mut out = Matrix::zeros(2, 3);
        assert!(!m.transpose_into(&mut out));
        let mut out = Matrix::zeros(3, 2);
        assert!(m.transpose_into(&mut out));
    }

    #[test]
    fn random_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = Matrix::random_uniform(8, 8, 0.5, &mut rng);
        assert!(m.data.iter().flatten().all(|x| (-0.5..=0.5).contains(x)));
    }

    #[test]
    fn copy_from_refuses_ragged_source() {
        let mut dst = Matrix::zeros(1, 2);
        let ragged = Matrix { rows: 1, cols: 2, data: vec![vec![1.0]] };
        assert!(!ragged.is_well_formed());
        assert!(!dst.copy_from(&ragged));
        assert_eq!(dst, Matrix::zeros(1, 2));
        assert!(dst.copy_from(&Matrix::from_data(vec![vec![3.0, 4.0]])));
        assert_eq!(dst.data, vec![vec![3.0, 4.0]]);
    }

    #[test]
    fn from_data_truncates_ragged_rows() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!((m.rows, m.cols), (2, 1));
        assert_eq!(Matrix::from_data(vec![]).cols, 0);
    }
}
