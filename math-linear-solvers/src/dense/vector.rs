//! Dense vector
//!
//! A growable, index-addressable sequence of `f64` with element-wise
//! arithmetic and norms. Binary operations require equal lengths and
//! divisions refuse zero divisors; the `try_*` methods report these as
//! [`SolverError`] while the std operator impls panic with the same message.

use crate::error::{Result, SolverError};
use ndarray::{Array1, ArrayView1};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Dense vector of `f64` values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector {
    values: Vec<f64>,
}

impl Vector {
    /// Create an empty vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty vector with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Create a vector of `len` zeros
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, 0.0)
    }

    /// Create a vector of `len` copies of `value`
    pub fn filled(len: usize, value: f64) -> Self {
        Self {
            values: vec![value; len],
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no elements
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of allocated elements
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Reserve room for at least `additional` more elements
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    /// Checked element access
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Checked mutable element access
    pub fn get_mut(&mut self, index: usize) -> Option<&mut f64> {
        self.values.get_mut(index)
    }

    /// First element, if any
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Last element, if any
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Append an element
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Remove and return the last element
    pub fn pop(&mut self) -> Option<f64> {
        self.values.pop()
    }

    /// Remove all elements
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Resize to `len` elements, zero-filling new slots
    pub fn resize(&mut self, len: usize) {
        self.values.resize(len, 0.0);
    }

    /// Resize to `len` elements, filling new slots with `value`
    pub fn resize_with_value(&mut self, len: usize, value: f64) {
        self.values.resize(len, value);
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: f64) {
        self.values.fill(value);
    }

    /// Iterate over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Iterate mutably over the elements
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, f64> {
        self.values.iter_mut()
    }

    /// Elements as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Elements as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Borrow as an ndarray view
    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.values.as_slice())
    }

    /// Copy into an owned ndarray
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_vec(self.values.clone())
    }

    /// Take the underlying storage
    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    fn check_len(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(SolverError::DimensionMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Result<Vector> {
        self.check_len(other)?;
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    fn zip_assign(&mut self, other: &Vector, f: impl Fn(&mut f64, f64)) -> Result<()> {
        self.check_len(other)?;
        for (a, &b) in self.values.iter_mut().zip(other.values.iter()) {
            f(a, b);
        }
        Ok(())
    }

    /// Element-wise sum
    pub fn try_add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise difference
    pub fn try_sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Element-wise product
    pub fn try_mul(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Element-wise quotient, refusing any zero divisor
    pub fn try_div(&self, other: &Vector) -> Result<Vector> {
        self.check_len(other)?;
        other.check_nonzero()?;
        self.zip_with(other, |a, b| a / b)
    }

    /// In-place element-wise sum
    pub fn try_add_assign(&mut self, other: &Vector) -> Result<()> {
        self.zip_assign(other, |a, b| *a += b)
    }

    /// In-place element-wise difference
    pub fn try_sub_assign(&mut self, other: &Vector) -> Result<()> {
        self.zip_assign(other, |a, b| *a -= b)
    }

    /// In-place element-wise product
    pub fn try_mul_assign(&mut self, other: &Vector) -> Result<()> {
        self.zip_assign(other, |a, b| *a *= b)
    }

    /// In-place element-wise quotient, refusing any zero divisor
    ///
    /// Nothing is modified when an error is returned.
    pub fn try_div_assign(&mut self, other: &Vector) -> Result<()> {
        self.check_len(other)?;
        other.check_nonzero()?;
        self.zip_assign(other, |a, b| *a /= b)
    }

    /// Multiply every element by `factor`
    pub fn scale(&self, factor: f64) -> Vector {
        self.values.iter().map(|&v| v * factor).collect()
    }

    /// Multiply every element by `factor` in place
    pub fn scale_in_place(&mut self, factor: f64) {
        for v in &mut self.values {
            *v *= factor;
        }
    }

    /// Divide every element by `divisor`
    pub fn try_div_scalar(&self, divisor: f64) -> Result<Vector> {
        if divisor == 0.0 {
            return Err(SolverError::ZeroDivision);
        }
        Ok(self.values.iter().map(|&v| v / divisor).collect())
    }

    /// Divide every element by `divisor` in place
    pub fn try_div_scalar_assign(&mut self, divisor: f64) -> Result<()> {
        if divisor == 0.0 {
            return Err(SolverError::ZeroDivision);
        }
        for v in &mut self.values {
            *v /= divisor;
        }
        Ok(())
    }

    /// `self += alpha * x`
    pub fn axpy(&mut self, alpha: f64, x: &Vector) -> Result<()> {
        self.zip_assign(x, |a, b| *a += alpha * b)
    }

    /// Dot product
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_len(other)?;
        Ok(self.view().dot(&other.view()))
    }

    /// ℓ∞-norm: `max |v_i|`
    pub fn linf_norm(&self) -> f64 {
        self.values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// ℓ1-norm: `Σ |v_i|`
    pub fn l1_norm(&self) -> f64 {
        self.values.iter().map(|v| v.abs()).sum()
    }

    /// ℓ2-norm: `sqrt(Σ |v_i|²)`
    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// ℓp-norm: `(Σ |v_i|^p)^(1/p)`
    pub fn lp_norm(&self, p: f64) -> f64 {
        self.values
            .iter()
            .map(|v| v.abs().powf(p))
            .sum::<f64>()
            .powf(1.0 / p)
    }

    /// Scale to unit ℓ2 length. A zero vector is left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.l2_norm();
        if length != 0.0 {
            self.scale_in_place(1.0 / length);
        }
        self
    }

    /// Copy scaled to unit ℓ2 length (zero vectors are copied unchanged)
    pub fn normalized(&self) -> Vector {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Replace every element by its absolute value
    pub fn abs_in_place(&mut self) -> &mut Self {
        for v in &mut self.values {
            *v = v.abs();
        }
        self
    }

    /// Copy holding the absolute values
    pub fn abs(&self) -> Vector {
        self.values.iter().map(|v| v.abs()).collect()
    }

    fn check_nonzero(&self) -> Result<()> {
        if self.values.contains(&0.0) {
            return Err(SolverError::ZeroDivision);
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl From<&[f64]> for Vector {
    fn from(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(values: [f64; N]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }
}

impl From<Array1<f64>> for Vector {
    fn from(array: Array1<f64>) -> Self {
        array.iter().copied().collect()
    }
}

impl From<Vector> for Array1<f64> {
    fn from(v: Vector) -> Self {
        Array1::from_vec(v.values)
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for Vector {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", significant(*v, 6))?;
        }
        write!(f, "]")
    }
}

/// Round to `digits` significant digits for display.
fn significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        // Near the subnormal range the scale factor overflows
        let precision = (digits - 1).max(0) as usize;
        return format!("{value:.precision$e}").parse().unwrap_or(value);
    }
    scaled.round() / factor
}

fn expect_ok<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| panic!("Vector: {e}"))
}

// Operator impls panic where the `try_*` forms would return an error.

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(mut self) -> Vector {
        self.scale_in_place(-1.0);
        self
    }
}

impl Add for &Vector {
    type Output = Vector;

    /// # Panics
    ///
    /// Panics if the lengths differ.
    fn add(self, rhs: &Vector) -> Vector {
        expect_ok(self.try_add(rhs))
    }
}

impl Sub for &Vector {
    type Output = Vector;

    /// # Panics
    ///
    /// Panics if the lengths differ.
    fn sub(self, rhs: &Vector) -> Vector {
        expect_ok(self.try_sub(rhs))
    }
}

impl Mul for &Vector {
    type Output = Vector;

    /// # Panics
    ///
    /// Panics if the lengths differ.
    fn mul(self, rhs: &Vector) -> Vector {
        expect_ok(self.try_mul(rhs))
    }
}

impl Div for &Vector {
    type Output = Vector;

    /// # Panics
    ///
    /// Panics if the lengths differ or `rhs` holds a zero.
    fn div(self, rhs: &Vector) -> Vector {
        expect_ok(self.try_div(rhs))
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        expect_ok(self.try_add_assign(rhs))
    }
}

impl SubAssign<&Vector> for Vector {
    fn sub_assign(&mut self, rhs: &Vector) {
        expect_ok(self.try_sub_assign(rhs))
    }
}

impl MulAssign<&Vector> for Vector {
    fn mul_assign(&mut self, rhs: &Vector) {
        expect_ok(self.try_mul_assign(rhs))
    }
}

impl DivAssign<&Vector> for Vector {
    fn div_assign(&mut self, rhs: &Vector) {
        expect_ok(self.try_div_assign(rhs))
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        rhs.scale(self)
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_in_place(rhs);
    }
}

impl Div<f64> for &Vector {
    type Output = Vector;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div(self, rhs: f64) -> Vector {
        expect_ok(self.try_div_scalar(rhs))
    }
}

impl DivAssign<f64> for Vector {
    fn div_assign(&mut self, rhs: f64) {
        expect_ok(self.try_div_scalar_assign(rhs))
    }
}
