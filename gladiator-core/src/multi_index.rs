//! Odometer over a box of per-axis bounds

use crate::error::{GladiatorError, Result};

/// Enumerates every coordinate tuple of `dims` exactly once.
///
/// Axis 0 is the least significant digit. The counter starts at the zero
/// tuple; [`MultiIndex::advance`] returns `false` once every axis has wrapped
/// back to zero, so the zero tuple is seen at both ends of a sweep and the
/// caller handles the first pass itself.
#[derive(Clone, Debug)]
pub struct MultiIndex {
    dims: Vec<usize>,
    elems: Vec<usize>,
    cardinality: usize,
}

impl MultiIndex {
    pub fn new(dims: Vec<usize>) -> Result<Self> {
        let cardinality = checked_volume(&dims)?;
        let elems = vec![0; dims.len()];
        Ok(Self {
            dims,
            elems,
            cardinality,
        })
    }

    /// Step to the next tuple with carry. Returns `false` when exhausted.
    pub fn advance(&mut self) -> bool {
        let mut first_not_max = 0;
        while first_not_max < self.dims.len()
            && self.elems[first_not_max] + 1 == self.dims[first_not_max]
        {
            self.elems[first_not_max] = 0;
            first_not_max += 1;
        }

        if first_not_max == self.dims.len() {
            return false;
        }
        self.elems[first_not_max] += 1;
        true
    }

    pub fn index(&self) -> &[usize] {
        &self.elems
    }

    pub fn index_mut(&mut self) -> &mut [usize] {
        &mut self.elems
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of tuples in a full sweep
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }
}

/// Number of cells in the box `dims`, or an error for a zero bound or a
/// count that does not fit in `usize`
pub(crate) fn checked_volume(dims: &[usize]) -> Result<usize> {
    if let Some(axis) = dims.iter().position(|&d| d == 0) {
        return Err(GladiatorError::InvalidDimension { axis, bound: 0 });
    }
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| GladiatorError::TableTooLarge {
            dims: dims.to_vec(),
        })
}
