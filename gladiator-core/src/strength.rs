//! StrengthVector - one team's allocation of combat strength

use std::fmt;
use std::ops::{Div, DivAssign, Index, IndexMut, Mul, MulAssign};

use serde::{Deserialize, Serialize};

use crate::error::{GladiatorError, Result};

/// Fixed-length vector of combat strengths, one entry per gladiator.
///
/// The length never changes after construction. Element-wise arithmetic
/// requires both operands to have the same length and reports
/// [`GladiatorError::LengthMismatch`] otherwise; scalar arithmetic goes
/// through the regular `*` and `/` operators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct StrengthVector {
    elems: Vec<f64>,
}

macro_rules! elementwise {
    ($name:ident, $assign_name:ident, $op:tt) => {
        /// Element-wise operation returning a new vector
        pub fn $name(&self, other: &StrengthVector) -> Result<StrengthVector> {
            let mut res = self.clone();
            res.$assign_name(other)?;
            Ok(res)
        }

        /// Element-wise operation applied in place
        pub fn $assign_name(&mut self, other: &StrengthVector) -> Result<&mut Self> {
            self.check_same_length(other)?;
            for (x, y) in self.elems.iter_mut().zip(&other.elems) {
                *x $op *y;
            }
            Ok(self)
        }
    };
}

impl StrengthVector {
    /// Zero-filled vector of `len` gladiators
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(GladiatorError::InvalidLength(len));
        }
        Ok(Self { elems: vec![0.0; len] })
    }

    /// Wrap existing strengths
    pub fn from_vec(elems: Vec<f64>) -> Result<Self> {
        if elems.is_empty() {
            return Err(GladiatorError::InvalidLength(0));
        }
        Ok(Self { elems })
    }

    /// `len` gladiators sharing `total` equally
    pub fn uniform(len: usize, total: f64) -> Result<Self> {
        let mut team = Self::new(len)?;
        team.elems.fill(total / len as f64);
        Ok(team)
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// False for any constructed vector, since construction rejects length 0
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.elems.iter().sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.elems
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.elems.iter()
    }

    /// Write the strengths to stdout, space separated
    pub fn print(&self) {
        println!("{}", self);
    }

    elementwise!(try_add, try_add_assign, +=);
    elementwise!(try_sub, try_sub_assign, -=);
    elementwise!(try_mul, try_mul_assign, *=);
    elementwise!(try_div, try_div_assign, /=);

    fn check_same_length(&self, other: &StrengthVector) -> Result<()> {
        if self.len() != other.len() {
            return Err(GladiatorError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }
}

impl Index<usize> for StrengthVector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.elems[i]
    }
}

impl IndexMut<usize> for StrengthVector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.elems[i]
    }
}

impl MulAssign<f64> for StrengthVector {
    fn mul_assign(&mut self, a: f64) {
        self.elems.iter_mut().for_each(|x| *x *= a);
    }
}

impl DivAssign<f64> for StrengthVector {
    fn div_assign(&mut self, a: f64) {
        self.elems.iter_mut().for_each(|x| *x /= a);
    }
}

impl Mul<f64> for StrengthVector {
    type Output = StrengthVector;

    fn mul(mut self, a: f64) -> StrengthVector {
        self *= a;
        self
    }
}

impl Mul<f64> for &StrengthVector {
    type Output = StrengthVector;

    fn mul(self, a: f64) -> StrengthVector {
        self.clone() * a
    }
}

impl Div<f64> for StrengthVector {
    type Output = StrengthVector;

    fn div(mut self, a: f64) -> StrengthVector {
        self /= a;
        self
    }
}

impl Div<f64> for &StrengthVector {
    type Output = StrengthVector;

    fn div(self, a: f64) -> StrengthVector {
        self.clone() / a
    }
}

impl TryFrom<Vec<f64>> for StrengthVector {
    type Error = GladiatorError;

    fn try_from(elems: Vec<f64>) -> Result<Self> {
        Self::from_vec(elems)
    }
}

impl From<StrengthVector> for Vec<f64> {
    fn from(team: StrengthVector) -> Vec<f64> {
        team.elems
    }
}

impl<'a> IntoIterator for &'a StrengthVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}

impl fmt::Display for StrengthVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in self.elems.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}
