use crate::array::Array;
use crate::error::EzgradError;
use num_traits::Float;

impl<F: Float> Array<F> {
    /// 2-D matrix product `self @ other`.
    ///
    /// Both operands must be rank 2 and `self.shape()[1] == other.shape()[0]`.
    pub fn matmul(&self, other: &Array<F>) -> Result<Array<F>, EzgradError> {
        if self.rank() != 2 || other.rank() != 2 || self.shape()[1] != other.shape()[0] {
            return Err(EzgradError::MatmulShapeMismatch {
                shape1: self.shape().to_vec(),
                shape2: other.shape().to_vec(),
            });
        }
        let (m, k) = (self.shape()[0], self.shape()[1]);
        let n = other.shape()[1];
        let a = self.data();
        let b = other.data();
        let mut out = vec![F::zero(); m * n];
        for i in 0..m {
            for p in 0..k {
                let a_ip = a[i * k + p];
                for j in 0..n {
                    out[i * n + j] = out[i * n + j] + a_ip * b[p * n + j];
                }
            }
        }
        Array::new(out, vec![m, n])
    }

    /// Transpose of a rank-2 array.
    pub fn transpose(&self) -> Result<Array<F>, EzgradError> {
        if self.rank() != 2 {
            return Err(EzgradError::RankMismatch {
                operation: "transpose".to_string(),
                expected: 2,
                actual: self.rank(),
            });
        }
        let (rows, cols) = (self.shape()[0], self.shape()[1]);
        let src = self.data();
        let mut out = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                out.push(src[i * cols + j]);
            }
        }
        Array::new(out, vec![cols, rows])
    }
}
