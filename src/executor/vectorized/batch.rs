//! Row batch with a shared selection vector.

use crate::catalog::Schema;
use crate::config::{PredicateConfig, MAX_BATCH_CAPACITY};
use crate::error::{PredicateError, Result};

use super::column::ColumnVector;

/// Column-major batch of rows filtered in place by predicates.
///
/// When `selected_in_use` is false the batch denotes rows `0..size`. When it
/// is true it denotes `selected[0..size]`, which is strictly increasing.
/// The selection buffer is allocated once at capacity and never grows.
#[derive(Debug, Clone)]
pub struct RowBatch<'a> {
    columns: Vec<ColumnVector<'a>>,
    selected: Vec<u16>,
    selected_in_use: bool,
    size: usize,
}

impl<'a> RowBatch<'a> {
    /// Creates a batch with one zeroed column per schema field.
    ///
    /// The batch starts with `size == capacity` and no active selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` exceeds what a `u16` selection vector
    /// can address.
    pub fn new(schema: &Schema, capacity: usize) -> Result<Self> {
        if capacity > MAX_BATCH_CAPACITY {
            return Err(PredicateError::InvalidBatchCapacity {
                capacity,
                max: MAX_BATCH_CAPACITY,
            });
        }
        let columns = schema
            .fields()
            .iter()
            .map(|field| ColumnVector::new(field.field_type, capacity))
            .collect();
        Ok(RowBatch {
            columns,
            selected: vec![0; capacity],
            selected_in_use: false,
            size: capacity,
        })
    }

    /// Creates a batch sized by `config.batch_capacity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured capacity is out of range.
    pub fn with_config(schema: &Schema, config: &PredicateConfig) -> Result<Self> {
        Self::new(schema, config.batch_capacity)
    }

    /// Returns the number of rows the batch can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.selected.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns a column by index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn column(&self, index: usize) -> &ColumnVector<'a> {
        &self.columns[index]
    }

    /// Returns a column by index for in-place updates.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn column_mut(&mut self, index: usize) -> &mut ColumnVector<'a> {
        &mut self.columns[index]
    }

    /// Returns the active selection, `selected[0..size]`.
    ///
    /// Only meaningful while [`Self::selected_in_use`] is true.
    #[must_use]
    pub fn selected(&self) -> &[u16] {
        &self.selected[..self.size]
    }

    /// Returns the whole selection buffer, sized at capacity.
    pub fn selected_mut(&mut self) -> &mut [u16] {
        &mut self.selected
    }

    /// Returns the current logical row count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sets the logical row count.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the batch capacity.
    pub fn set_size(&mut self, size: usize) {
        assert!(
            size <= self.capacity(),
            "batch size {size} exceeds capacity {}",
            self.capacity()
        );
        self.size = size;
    }

    /// Returns true if the selection vector is authoritative.
    #[must_use]
    pub fn selected_in_use(&self) -> bool {
        self.selected_in_use
    }

    /// Sets whether the selection vector is authoritative.
    pub fn set_selected_in_use(&mut self, in_use: bool) {
        self.selected_in_use = in_use;
    }

    /// Restores the batch to all `capacity` rows with no selection.
    pub fn reset(&mut self) {
        self.size = self.capacity();
        self.selected_in_use = false;
    }

    /// Iterates the logical rows of the batch in order.
    pub fn selected_rows(&self) -> impl Iterator<Item = usize> + '_ {
        let explicit = self.selected_in_use.then(|| self.selected());
        let implicit = (!self.selected_in_use).then_some(0..self.size);
        explicit
            .into_iter()
            .flatten()
            .map(|&row| usize::from(row))
            .chain(implicit.into_iter().flatten())
    }

    /// Splits the batch into a read-only column and a mutable selection view.
    ///
    /// This is the entry point predicates use to filter in place.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn column_with_selection(&mut self, index: usize) -> (&ColumnVector<'a>, Selection<'_>) {
        let column = &self.columns[index];
        let selection = Selection {
            selected: &mut self.selected,
            size: &mut self.size,
            in_use: &mut self.selected_in_use,
        };
        (column, selection)
    }
}

/// Mutable view of a batch's selection state.
#[derive(Debug)]
pub struct Selection<'b> {
    selected: &'b mut [u16],
    size: &'b mut usize,
    in_use: &'b mut bool,
}

impl Selection<'_> {
    /// Returns the current logical row count.
    #[must_use]
    pub fn size(&self) -> usize {
        *self.size
    }

    /// Keeps the logical rows for which `keep(row)` returns true.
    ///
    /// Surviving rows are compacted to the front of the selection buffer in
    /// their original order and the selection is marked in use, even when
    /// every row survives. Nothing is allocated.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize) -> bool,
    {
        let size = *self.size;
        let mut w = 0;
        if *self.in_use {
            debug_assert!(
                self.selected[..size].windows(2).all(|pair| pair[0] < pair[1]),
                "selection vector is not strictly increasing"
            );
            for k in 0..size {
                let row = self.selected[k];
                if keep(usize::from(row)) {
                    self.selected[w] = row;
                    w += 1;
                }
            }
        } else {
            for row in 0..size {
                if keep(row) {
                    self.selected[w] = row as u16;
                    w += 1;
                }
            }
            *self.in_use = true;
        }
        *self.size = w;
    }
}
