//! Mixing plain values with `Var`s.
//!
//! A bare value on either side of `+ - * /` is wrapped into a fresh leaf of
//! the other operand's graph, then the usual `_op` function runs. For array
//! payloads a bare float is wrapped as a rank-0 array and broadcast.

use crate::array::Array;
use crate::autograd::Var;
use crate::error::EzgradError;
use crate::ops::arithmetic::{add_op, div_op, mul_op, sub_op};
use std::ops::{Add, Div, Mul, Sub};

macro_rules! impl_literal_op {
    ($payload:ty, $lit:ty, $wrap:expr, $trait:ident, $method:ident, $op_fn:ident) => {
        impl<'g> $trait<$lit> for Var<'g, $payload> {
            type Output = Result<Var<'g, $payload>, EzgradError>;

            fn $method(self, rhs: $lit) -> Self::Output {
                let rhs = self.graph().leaf(($wrap)(rhs));
                $op_fn(self, rhs)
            }
        }

        impl<'g> $trait<Var<'g, $payload>> for $lit {
            type Output = Result<Var<'g, $payload>, EzgradError>;

            fn $method(self, rhs: Var<'g, $payload>) -> Self::Output {
                let lhs = rhs.graph().leaf(($wrap)(self));
                $op_fn(lhs, rhs)
            }
        }
    };
}

macro_rules! impl_literal_ops {
    ($payload:ty, $lit:ty, $wrap:expr) => {
        impl_literal_op!($payload, $lit, $wrap, Add, add, add_op);
        impl_literal_op!($payload, $lit, $wrap, Sub, sub, sub_op);
        impl_literal_op!($payload, $lit, $wrap, Mul, mul, mul_op);
        impl_literal_op!($payload, $lit, $wrap, Div, div, div_op);
    };
}

impl_literal_ops!(f32, f32, |v: f32| v);
impl_literal_ops!(f64, f64, |v: f64| v);
impl_literal_ops!(Array<f32>, Array<f32>, |v: Array<f32>| v);
impl_literal_ops!(Array<f64>, Array<f64>, |v: Array<f64>| v);
impl_literal_ops!(Array<f32>, f32, Array::scalar);
impl_literal_ops!(Array<f64>, f64, Array::scalar);

#[cfg(test)]
mod tests {
    use crate::array::Array;
    use crate::autograd::Graph;
    use crate::error::EzgradError;
    use approx::assert_relative_eq;

    #[test]
    fn test_literal_on_the_right() -> Result<(), EzgradError> {
        let graph = Graph::<f64>::new();
        let x = graph.leaf(3.0);
        let y = (x + 1.0)?;
        assert_eq!(y.value(), 4.0);
        // The literal became a leaf of the same graph.
        assert_eq!(graph.len(), 3);
        y.backward()?;
        assert_eq!(x.grad(), Some(1.0));
        Ok(())
    }

    #[test]
    fn test_literal_on_the_left() -> Result<(), EzgradError> {
        let graph = Graph::<f64>::new();
        let x = graph.leaf(4.0);
        let y = (2.0 / x)?;
        assert_eq!(y.value(), 0.5);
        y.backward()?;
        assert_relative_eq!(x.grad().unwrap_or_default(), -2.0 / 16.0, epsilon = 1e-12);

        let z = (10.0 - x)?;
        assert_eq!(z.value(), 6.0);
        let w = (3.0 * x)?;
        assert_eq!(w.value(), 12.0);
        Ok(())
    }

    #[test]
    fn test_literal_division_by_zero() {
        let graph = Graph::<f32>::new();
        let x = graph.leaf(1.0);
        assert!(matches!(x / 0.0, Err(EzgradError::DivisionByZero { .. })));
    }

    #[test]
    fn test_float_literal_broadcasts_over_array() -> Result<(), EzgradError> {
        let graph = Graph::new();
        let x = graph.leaf(Array::new(vec![1.0f64, 2.0, 3.0], vec![3])?);
        let y = (x * 2.0)?;
        assert_eq!(y.value().data(), &[2.0, 4.0, 6.0]);
        y.backward()?;
        assert_eq!(x.grad().map(|g| g.data().to_vec()), Some(vec![2.0, 2.0, 2.0]));

        let offset = Array::new(vec![1.0f64, 1.0, 1.0], vec![3])?;
        let z = (offset - x)?;
        assert_eq!(z.value().data(), &[0.0, -1.0, -2.0]);
        Ok(())
    }
}
