//! Core scalar and product traits for trimv.

use crate::matrix::view::{MatView, VecView, VecViewMut};
use num_complex::Complex;
use num_traits::{Float, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul};

/// Complex conjugation; the identity for real scalars.
pub trait Conjugate: Copy {
    /// Return the complex conjugate of `self`.
    fn conj(self) -> Self;

    /// Conjugate only when `conj` is set.
    #[inline(always)]
    fn conj_if(self, conj: bool) -> Self {
        if conj { self.conj() } else { self }
    }
}

impl Conjugate for f32 {
    #[inline(always)]
    fn conj(self) -> Self {
        self
    }
}

impl Conjugate for f64 {
    #[inline(always)]
    fn conj(self) -> Self {
        self
    }
}

impl<T: Float> Conjugate for Complex<T> {
    #[inline(always)]
    fn conj(self) -> Self {
        Complex::new(self.re, -self.im)
    }
}

/// Element type usable as a matrix, vector or result entry.
pub trait Scalar:
    Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Zero
    + Add<Output = Self>
    + AddAssign
    + Mul<Output = Self>
    + Conjugate
{
}

impl<T> Scalar for T where
    T: Copy
        + Send
        + Sync
        + Debug
        + PartialEq
        + Zero
        + Add<Output = T>
        + AddAssign
        + Mul<Output = T>
        + Conjugate
{
}

/// Result type of multiplying a `Self` entry by an `R` entry.
///
/// `f64 x f64 -> f64`, `f64 x Complex<f64> -> Complex<f64>` and so on. The
/// output must absorb further factors of either operand type so that
/// `alpha * x[i] * a[j, i]` stays in the output type.
pub trait ScalarProduct<R: Scalar>: Scalar {
    type Output: Scalar
        + Mul<Self, Output = <Self as ScalarProduct<R>>::Output>
        + Mul<R, Output = <Self as ScalarProduct<R>>::Output>;

    /// `self * rhs` in the promoted type.
    fn mul_rhs(self, rhs: R) -> <Self as ScalarProduct<R>>::Output;
}

impl<L, R, O> ScalarProduct<R> for L
where
    L: Scalar + Mul<R, Output = O>,
    R: Scalar,
    O: Scalar + Mul<L, Output = O> + Mul<R, Output = O>,
{
    type Output = O;

    #[inline(always)]
    fn mul_rhs(self, rhs: R) -> O {
        self * rhs
    }
}

/// Shorthand for the promoted result scalar of `L x R`.
pub type Product<L, R> = <L as ScalarProduct<R>>::Output;

/// Dense matrix-vector product: `res += alpha * op(A) * op(x)`.
///
/// No triangular restriction. The triangular kernel delegates its
/// rectangular remainders to an implementation of this trait.
pub trait Gemv<L, R>
where
    L: ScalarProduct<R>,
    R: Scalar,
{
    /// Accumulate `alpha * conj?(lhs) * conj?(rhs)` into `res`.
    ///
    /// `rhs.len()` must equal `lhs.ncols()` and `res.len()` must equal
    /// `lhs.nrows()`.
    fn gemv(
        &self,
        lhs: MatView<'_, L>,
        conj_lhs: bool,
        rhs: VecView<'_, R>,
        conj_rhs: bool,
        res: VecViewMut<'_, Product<L, R>>,
        alpha: Product<L, R>,
    );
}
