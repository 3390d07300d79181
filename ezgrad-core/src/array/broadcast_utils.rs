use crate::array::Array;
use crate::error::EzgradError;
use num_traits::Float;

/// Computes the broadcast shape of two shapes, NumPy style.
///
/// Shapes are aligned on their trailing dimensions; each pair of dimensions
/// must be equal or one of them must be 1.
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> Result<Vec<usize>, EzgradError> {
    let rank = shape1.len().max(shape2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        let d1 = dim_from_end(shape1, rank - 1 - i);
        let d2 = dim_from_end(shape2, rank - 1 - i);
        result[i] = match (d1, d2) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => {
                return Err(EzgradError::BroadcastError {
                    shape1: shape1.to_vec(),
                    shape2: shape2.to_vec(),
                })
            }
        };
    }
    Ok(result)
}

// Dimension `offset` positions from the end, 1 if the shape is too short.
fn dim_from_end(shape: &[usize], offset: usize) -> usize {
    if offset < shape.len() {
        shape[shape.len() - 1 - offset]
    } else {
        1
    }
}

/// Contiguous row-major strides for `shape`.
pub(crate) fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut acc = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = acc;
        acc *= shape[i];
    }
    strides
}

/// Strides that read an array of `shape` as if it had `out_shape`.
///
/// Broadcast dimensions (size 1, or missing leading dimensions) get stride 0,
/// so the same element is revisited along them. Assumes the shapes were
/// already validated with [`broadcast_shapes`].
pub(crate) fn broadcast_strides(shape: &[usize], out_shape: &[usize]) -> Vec<usize> {
    let own = calculate_strides(shape);
    let rank_diff = out_shape.len() - shape.len();
    (0..out_shape.len())
        .map(|dim| {
            if dim < rank_diff {
                0
            } else {
                let d = dim - rank_diff;
                if shape[d] == 1 && out_shape[dim] != 1 {
                    0
                } else {
                    own[d]
                }
            }
        })
        .collect()
}

/// Walks every linear index of `out_shape` and yields the matching physical
/// offset into each strided input.
pub(crate) struct BroadcastIter<'a> {
    out_shape: &'a [usize],
    strides: Vec<Vec<usize>>,
    coords: Vec<usize>,
    remaining: usize,
    offsets: Vec<usize>,
}

impl<'a> BroadcastIter<'a> {
    pub(crate) fn new(out_shape: &'a [usize], input_shapes: &[&[usize]]) -> Self {
        let strides: Vec<Vec<usize>> = input_shapes
            .iter()
            .map(|s| broadcast_strides(s, out_shape))
            .collect();
        let numel = out_shape.iter().product();
        BroadcastIter {
            out_shape,
            offsets: vec![0; strides.len()],
            strides,
            coords: vec![0; out_shape.len()],
            remaining: numel,
        }
    }
}

impl Iterator for BroadcastIter<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.offsets.clone();

        // Odometer increment, carrying the offsets along.
        for dim in (0..self.out_shape.len()).rev() {
            self.coords[dim] += 1;
            for (offset, strides) in self.offsets.iter_mut().zip(self.strides.iter()) {
                *offset += strides[dim];
            }
            if self.coords[dim] < self.out_shape[dim] {
                break;
            }
            for (offset, strides) in self.offsets.iter_mut().zip(self.strides.iter()) {
                *offset -= strides[dim] * self.coords[dim];
            }
            self.coords[dim] = 0;
        }
        Some(current)
    }
}

impl<F: Float> Array<F> {
    /// Applies `op` elementwise over the broadcast of `self` and `other`.
    pub(crate) fn zip_broadcast<Op>(&self, other: &Array<F>, op: Op) -> Result<Array<F>, EzgradError>
    where
        Op: Fn(F, F) -> F,
    {
        let out_shape = broadcast_shapes(&self.shape, &other.shape)?;
        let a = self.data();
        let b = other.data();
        let data: Vec<F> = BroadcastIter::new(&out_shape, &[&self.shape, &other.shape])
            .map(|offsets| op(a[offsets[0]], b[offsets[1]]))
            .collect();
        Array::new(data, out_shape)
    }

    /// Materialises `self` broadcast to `target_shape`.
    pub fn broadcast_to(&self, target_shape: &[usize]) -> Result<Array<F>, EzgradError> {
        let out_shape = broadcast_shapes(&self.shape, target_shape)?;
        if out_shape != target_shape {
            return Err(EzgradError::BroadcastError {
                shape1: self.shape.clone(),
                shape2: target_shape.to_vec(),
            });
        }
        let src = self.data();
        let data: Vec<F> = BroadcastIter::new(&out_shape, &[&self.shape])
            .map(|offsets| src[offsets[0]])
            .collect();
        Array::new(data, out_shape)
    }

    /// Reduces a gradient to `target_shape` by summing along broadcast dimensions.
    ///
    /// Inverse of [`Array::broadcast_to`]: `target_shape` must broadcast to
    /// `self.shape()`.
    pub fn reduce_to_shape(&self, target_shape: &[usize]) -> Result<Array<F>, EzgradError> {
        if self.shape == target_shape {
            return Ok(self.clone());
        }
        let compatible = target_shape.len() <= self.shape.len()
            && broadcast_shapes(target_shape, &self.shape)
                .map(|s| s == self.shape)
                .unwrap_or(false);
        if !compatible {
            return Err(EzgradError::ReduceShapeError {
                from: self.shape.clone(),
                to: target_shape.to_vec(),
            });
        }
        let mut out = vec![F::zero(); target_shape.iter().product()];
        let src = self.data();
        for (i, offsets) in BroadcastIter::new(&self.shape, &[target_shape]).enumerate() {
            out[offsets[0]] = out[offsets[0]] + src[i];
        }
        Array::new(out, target_shape.to_vec())
    }
}
