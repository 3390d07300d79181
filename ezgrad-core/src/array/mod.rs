// src/array/mod.rs

use crate::error::EzgradError;
use num_traits::Float;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt;

pub mod broadcast_utils;
mod linalg;

pub use broadcast_utils::broadcast_shapes;

/// A dense, row-major, multi-dimensional array of floats.
///
/// This is the array payload of the engine. Storage is always contiguous and
/// owned; every operation produces a fresh `Array`. A rank-0 array (empty
/// shape) holds exactly one element and plays the role of a scalar, e.g. the
/// output of [`Array::sum_all`].
#[derive(Clone, Debug, PartialEq)]
pub struct Array<F> {
    data: Vec<F>,
    shape: Vec<usize>,
}

impl<F: Float> Array<F> {
    /// Creates an array from row-major data and a shape.
    ///
    /// Fails with `ArrayCreationError` if `data.len()` does not match the
    /// number of elements implied by `shape`.
    pub fn new(data: Vec<F>, shape: Vec<usize>) -> Result<Self, EzgradError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(EzgradError::ArrayCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Array { data, shape })
    }

    /// Rank-0 array holding `value`.
    pub fn scalar(value: F) -> Self {
        Array {
            data: vec![value],
            shape: vec![],
        }
    }

    pub fn full(shape: &[usize], value: F) -> Self {
        Array {
            data: vec![value; shape.iter().product()],
            shape: shape.to_vec(),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, F::zero())
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, F::one())
    }

    /// Builds a 2-D array from a slice of equally long rows.
    pub fn from_rows(rows: &[Vec<F>]) -> Result<Self, EzgradError> {
        let cols = rows.first().map_or(0, Vec::len);
        let data: Vec<F> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Array::new(data, vec![rows.len(), cols])
    }

    /// Array of `shape` filled with samples of `N(0, std²)`.
    pub fn randn<R: Rng + ?Sized>(shape: &[usize], std: F, rng: &mut R) -> Self
    where
        StandardNormal: Distribution<F>,
    {
        let numel = shape.iter().product();
        let data = (0..numel)
            .map(|_| {
                let z: F = StandardNormal.sample(rng);
                z * std
            })
            .collect();
        Array {
            data,
            shape: shape.to_vec(),
        }
    }

    // --- Accessors ---

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Row-major view of the elements.
    pub fn data(&self) -> &[F] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<F> {
        self.data
    }

    /// Element at the given multi-dimensional index, `None` if out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<F> {
        if index.len() != self.shape.len() {
            return None;
        }
        let strides = broadcast_utils::calculate_strides(&self.shape);
        let mut offset = 0;
        for ((&i, &dim), &stride) in index.iter().zip(self.shape.iter()).zip(strides.iter()) {
            if i >= dim {
                return None;
            }
            offset += i * stride;
        }
        self.data.get(offset).copied()
    }

    /// The single element of a one-element array.
    pub fn item(&self) -> Option<F> {
        if self.data.len() == 1 {
            Some(self.data[0])
        } else {
            None
        }
    }

    // --- Elementwise helpers ---

    pub fn map<Op: Fn(F) -> F>(&self, op: Op) -> Array<F> {
        Array {
            data: self.data.iter().map(|&x| op(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Sum of every element as a rank-0 array.
    pub fn sum_all(&self) -> Array<F> {
        Array::scalar(self.data.iter().fold(F::zero(), |acc, &x| acc + x))
    }

    pub fn contains_zero(&self) -> bool {
        self.data.iter().any(|x| x.is_zero())
    }
}

impl<F: Float + fmt::Display> fmt::Display for Array<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shape.is_empty() {
            return write!(f, "{}", self.data[0]);
        }
        write!(f, "[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "] shape={:?}", self.shape)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
