//! Flattened row-major tensor addressed by coordinate slices

use std::ops::{Index, IndexMut};

use crate::error::{GladiatorError, Result};
use crate::multi_index::checked_volume;

/// Dense `f64` array over the box `dims`, last axis varying fastest.
///
/// Coordinates are checked: a slice of the wrong rank or an out-of-range
/// coordinate panics, the same way slice indexing does.
#[derive(Clone, Debug)]
pub struct DenseArray {
    dims: Vec<usize>,
    strides: Vec<usize>,
    elems: Vec<f64>,
}

impl DenseArray {
    /// Zero-filled array.
    ///
    /// Fails with `TableTooLarge` when the cell count overflows or the buffer
    /// cannot be reserved.
    pub fn new(dims: Vec<usize>) -> Result<Self> {
        let len = checked_volume(&dims)?;

        let mut elems: Vec<f64> = Vec::new();
        if elems.try_reserve_exact(len).is_err() {
            return Err(GladiatorError::TableTooLarge { dims });
        }
        elems.resize(len, 0.0);

        let mut strides = vec![1; dims.len()];
        for axis in (0..dims.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * dims[axis + 1];
        }

        Ok(Self {
            dims,
            strides,
            elems,
        })
    }

    /// Flat offset of `coords`
    pub fn offset(&self, coords: &[usize]) -> usize {
        assert_eq!(
            coords.len(),
            self.dims.len(),
            "coordinate rank {} does not match array rank {}",
            coords.len(),
            self.dims.len()
        );

        coords
            .iter()
            .zip(&self.dims)
            .zip(&self.strides)
            .map(|((&c, &d), &stride)| {
                assert!(c < d, "coordinate {} out of bounds for axis of size {}", c, d);
                c * stride
            })
            .sum()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }
}

impl Index<&[usize]> for DenseArray {
    type Output = f64;

    fn index(&self, coords: &[usize]) -> &f64 {
        &self.elems[self.offset(coords)]
    }
}

impl IndexMut<&[usize]> for DenseArray {
    fn index_mut(&mut self, coords: &[usize]) -> &mut f64 {
        let offset = self.offset(coords);
        &mut self.elems[offset]
    }
}
