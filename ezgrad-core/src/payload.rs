//! # Payloads
//!
//! The engine is generic over what a node carries. Two families implement
//! [`Payload`]:
//!
//! - plain floats (`f32`, `f64`): the scalar variant,
//! - [`Array<F>`](crate::array::Array): the array variant, with NumPy-style
//!   broadcasting for elementwise operations.
//!
//! Operations in [`crate::ops`] are written once against this trait.

use crate::array::Array;
use crate::error::EzgradError;
use num_traits::Float;
use std::fmt::{Debug, Display};

/// Value type carried by graph nodes and their gradients.
///
/// Gradients always have the same type (and shape) as the value they belong
/// to. Binary methods return `Result` because array shapes may be
/// incompatible; scalar implementations never fail.
pub trait Payload: Clone + Debug + PartialEq + 'static {
    /// Element type; also the type of a `pow` exponent.
    type Elem: Float + Debug + Display + 'static;

    /// Shape of the payload; empty for scalars.
    fn shape(&self) -> Vec<usize>;

    /// Additive identity shaped like `self`.
    fn zeros_like(&self) -> Self;

    /// Multiplicative identity shaped like `self`.
    fn ones_like(&self) -> Self;

    fn add_elems(&self, rhs: &Self) -> Result<Self, EzgradError>;
    fn sub_elems(&self, rhs: &Self) -> Result<Self, EzgradError>;
    fn mul_elems(&self, rhs: &Self) -> Result<Self, EzgradError>;
    /// Elementwise division. Does not check for zero divisors; see
    /// [`Payload::contains_zero`].
    fn div_elems(&self, rhs: &Self) -> Result<Self, EzgradError>;

    fn negate(&self) -> Self;
    /// Multiplies every element by a constant.
    fn scale(&self, factor: Self::Elem) -> Self;
    fn pow_elems(&self, exponent: Self::Elem) -> Self;
    fn relu(&self) -> Self;
    /// 1 where the element is strictly positive, 0 elsewhere.
    fn relu_mask(&self) -> Self;

    fn matmul(&self, rhs: &Self) -> Result<Self, EzgradError>;
    fn transpose(&self) -> Result<Self, EzgradError>;

    /// Sum of all elements, as a scalar-shaped payload.
    fn sum_all(&self) -> Self;

    /// Expands a scalar-shaped payload to `shape`.
    fn broadcast_to(&self, shape: &[usize]) -> Result<Self, EzgradError>;

    /// Sums a broadcast gradient back down to `shape`.
    fn reduce_to_shape(&self, shape: &[usize]) -> Result<Self, EzgradError>;

    fn contains_zero(&self) -> bool;

    /// Flat row-major copy of the elements.
    fn to_elems(&self) -> Vec<Self::Elem>;

    /// Rebuilds a payload of `shape` from flat elements.
    fn from_elems(elems: Vec<Self::Elem>, shape: &[usize]) -> Result<Self, EzgradError>;
}

macro_rules! impl_scalar_payload {
    ($t:ty) => {
        impl Payload for $t {
            type Elem = $t;

            fn shape(&self) -> Vec<usize> {
                vec![]
            }

            fn zeros_like(&self) -> Self {
                0.0
            }

            fn ones_like(&self) -> Self {
                1.0
            }

            fn add_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                Ok(self + rhs)
            }

            fn sub_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                Ok(self - rhs)
            }

            fn mul_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                Ok(self * rhs)
            }

            fn div_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                Ok(self / rhs)
            }

            fn negate(&self) -> Self {
                -*self
            }

            fn scale(&self, factor: $t) -> Self {
                self * factor
            }

            fn pow_elems(&self, exponent: $t) -> Self {
                Float::powf(*self, exponent)
            }

            fn relu(&self) -> Self {
                if *self > 0.0 {
                    *self
                } else {
                    0.0
                }
            }

            fn relu_mask(&self) -> Self {
                if *self > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }

            fn matmul(&self, _rhs: &Self) -> Result<Self, EzgradError> {
                Err(EzgradError::RankMismatch {
                    operation: "matmul".to_string(),
                    expected: 2,
                    actual: 0,
                })
            }

            fn transpose(&self) -> Result<Self, EzgradError> {
                Err(EzgradError::RankMismatch {
                    operation: "transpose".to_string(),
                    expected: 2,
                    actual: 0,
                })
            }

            fn sum_all(&self) -> Self {
                *self
            }

            fn broadcast_to(&self, shape: &[usize]) -> Result<Self, EzgradError> {
                if shape.iter().product::<usize>() == 1 {
                    Ok(*self)
                } else {
                    Err(EzgradError::BroadcastError {
                        shape1: vec![],
                        shape2: shape.to_vec(),
                    })
                }
            }

            fn reduce_to_shape(&self, shape: &[usize]) -> Result<Self, EzgradError> {
                if shape.iter().product::<usize>() == 1 {
                    Ok(*self)
                } else {
                    Err(EzgradError::ReduceShapeError {
                        from: vec![],
                        to: shape.to_vec(),
                    })
                }
            }

            fn contains_zero(&self) -> bool {
                *self == 0.0
            }

            fn to_elems(&self) -> Vec<$t> {
                vec![*self]
            }

            fn from_elems(elems: Vec<$t>, shape: &[usize]) -> Result<Self, EzgradError> {
                match elems.as_slice() {
                    [x] if shape.is_empty() => Ok(*x),
                    _ => Err(EzgradError::ArrayCreationError {
                        data_len: elems.len(),
                        shape: shape.to_vec(),
                    }),
                }
            }
        }
    };
}

impl_scalar_payload!(f32);
impl_scalar_payload!(f64);

macro_rules! impl_array_payload {
    ($t:ty) => {
        impl Payload for Array<$t> {
            type Elem = $t;

            fn shape(&self) -> Vec<usize> {
                Array::shape(self).to_vec()
            }

            fn zeros_like(&self) -> Self {
                Array::zeros(Array::shape(self))
            }

            fn ones_like(&self) -> Self {
                Array::ones(Array::shape(self))
            }

            fn add_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                self.zip_broadcast(rhs, |a, b| a + b)
            }

            fn sub_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                self.zip_broadcast(rhs, |a, b| a - b)
            }

            fn mul_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                self.zip_broadcast(rhs, |a, b| a * b)
            }

            fn div_elems(&self, rhs: &Self) -> Result<Self, EzgradError> {
                self.zip_broadcast(rhs, |a, b| a / b)
            }

            fn negate(&self) -> Self {
                self.map(|x| -x)
            }

            fn scale(&self, factor: $t) -> Self {
                self.map(|x| x * factor)
            }

            fn pow_elems(&self, exponent: $t) -> Self {
                self.map(|x| Float::powf(x, exponent))
            }

            fn relu(&self) -> Self {
                self.map(|x| if x > 0.0 { x } else { 0.0 })
            }

            fn relu_mask(&self) -> Self {
                self.map(|x| if x > 0.0 { 1.0 } else { 0.0 })
            }

            fn matmul(&self, rhs: &Self) -> Result<Self, EzgradError> {
                Array::matmul(self, rhs)
            }

            fn transpose(&self) -> Result<Self, EzgradError> {
                Array::transpose(self)
            }

            fn sum_all(&self) -> Self {
                Array::sum_all(self)
            }

            fn broadcast_to(&self, shape: &[usize]) -> Result<Self, EzgradError> {
                Array::broadcast_to(self, shape)
            }

            fn reduce_to_shape(&self, shape: &[usize]) -> Result<Self, EzgradError> {
                Array::reduce_to_shape(self, shape)
            }

            fn contains_zero(&self) -> bool {
                Array::contains_zero(self)
            }

            fn to_elems(&self) -> Vec<$t> {
                self.data().to_vec()
            }

            fn from_elems(elems: Vec<$t>, shape: &[usize]) -> Result<Self, EzgradError> {
                Array::new(elems, shape.to_vec())
            }
        }
    };
}

impl_array_payload!(f32);
impl_array_payload!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_payload_basics() {
        let x = 3.0f64;
        assert_eq!(Payload::shape(&x), Vec::<usize>::new());
        assert_eq!(x.zeros_like(), 0.0);
        assert_eq!(x.ones_like(), 1.0);
        assert_eq!(x.div_elems(&2.0).unwrap(), 1.5);
        assert_eq!(x.pow_elems(2.0), 9.0);
        assert_eq!((-x).relu(), 0.0);
        assert_eq!(x.relu_mask(), 1.0);
        assert!(0.0f64.contains_zero());
        assert!(x.matmul(&x).is_err());
    }

    #[test]
    fn test_scalar_broadcast_and_reduce() {
        let g = 2.0f32;
        assert_eq!(g.broadcast_to(&[]).unwrap(), 2.0);
        assert!(g.broadcast_to(&[3]).is_err());
        assert_eq!(g.reduce_to_shape(&[]).unwrap(), 2.0);
    }

    #[test]
    fn test_scalar_elems_roundtrip_shape_check() {
        assert_eq!(f64::from_elems(vec![4.0], &[]).unwrap(), 4.0);
        assert!(f64::from_elems(vec![4.0, 5.0], &[]).is_err());
    }

    #[test]
    fn test_array_payload_delegates() {
        let a = Array::new(vec![-1.0f64, 2.0], vec![2]).unwrap();
        assert_eq!(Payload::shape(&a), vec![2]);
        assert_eq!(a.relu().data(), &[0.0, 2.0]);
        assert_eq!(a.relu_mask().data(), &[0.0, 1.0]);
        assert_eq!(a.negate().data(), &[1.0, -2.0]);
        assert_eq!(a.pow_elems(2.0).data(), &[1.0, 4.0]);
        assert_eq!(Payload::sum_all(&a).item(), Some(1.0));
        let b = Array::new(vec![3.0f64], vec![1]).unwrap();
        assert_eq!(a.mul_elems(&b).unwrap().data(), &[-3.0, 6.0]);
    }
}
