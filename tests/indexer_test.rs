//! Indexers with more than one index parameter.

use std::sync::{Arc, RwLock};

use quack::prelude::*;
use quack::{AdapterCache, SynthesisError, INDEXER};

#[quack::interface]
trait Grid {
    #[quack(index_get)]
    fn cell(&self, row: usize, col: usize) -> f64;

    #[quack(index_set)]
    fn set_cell(&self, row: usize, col: usize, value: f64);

    #[quack(get = "Rows")]
    fn rows(&self) -> usize;
}

#[quack::interface]
trait SignedGrid {
    #[quack(index_get)]
    fn cell(&self, row: i32, col: i32) -> f64;
}

struct Matrix {
    rows: usize,
    cols: usize,
    cells: RwLock<Vec<f64>>,
}

#[quack::shape]
impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            cells: RwLock::new(vec![0.0; rows * cols]),
        }
    }

    #[quack(index_get)]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.cells.read().unwrap()[row * self.cols + col]
    }

    #[quack(index_set)]
    pub fn put(&self, row: usize, col: usize, value: f64) {
        self.cells.write().unwrap()[row * self.cols + col] = value;
    }

    #[quack(get = "Rows")]
    pub fn rows(&self) -> usize {
        self.rows
    }
}

#[test]
fn test_write_through_adapter_visible_directly() {
    let matrix = Arc::new(Matrix::new(2, 3));
    let grid = matrix.adapt::<dyn Grid>().unwrap();

    grid.set_cell(1, 2, 4.5);

    assert_eq!(matrix.at(1, 2), 4.5);
    assert_eq!(grid.cell(1, 2), 4.5);
}

#[test]
fn test_write_directly_visible_through_adapter() {
    let matrix = Arc::new(Matrix::new(2, 2));
    let grid = matrix.adapt::<dyn Grid>().unwrap();

    matrix.put(0, 1, -1.0);

    assert_eq!(grid.cell(0, 1), -1.0);
    assert_eq!(grid.rows(), 2);
}

#[test]
fn test_indexer_members_use_item_names() {
    let matrix = Matrix::new(1, 1);
    let names: Vec<&str> = matrix.shape().members().iter().map(|m| m.sig().name()).collect();
    assert_eq!(names, ["get_Item", "set_Item", "get_Rows"]);

    let properties = <dyn Grid>::info().properties();
    let item = properties.iter().find(|p| p.name() == INDEXER).unwrap();
    assert!(item.is_indexer());
    assert_eq!(item.index_params().len(), 2);
    assert!(item.getter().is_some() && item.setter().is_some());
}

#[test]
fn test_index_types_must_match() {
    let cache = AdapterCache::new();
    let err = Arc::new(Matrix::new(1, 1))
        .adapt_in::<dyn SignedGrid>(&cache)
        .unwrap_err();

    assert!(matches!(err.kind(), SynthesisError::UnresolvedMember { member, .. } if member.starts_with("get_Item")));
    assert!(cache.is_empty());
}
