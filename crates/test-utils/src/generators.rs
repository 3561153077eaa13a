//! Synthetic grid generators with predictable, verifiable patterns.

/// Creates a test grid with predictable values.
///
/// Each cell value is `col * 1000 + row`, so reads and crops can be checked
/// cell by cell: `grid[row * width + col] == col * 1000 + row`.
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a zero grid with a marked rectangular region of 1.0 values.
///
/// The region spans columns `[col0, col1)` and rows `[row0, row1)`. Used to
/// verify that rotated polygons keep bounding rotated content.
pub fn create_marked_grid(
    width: usize,
    height: usize,
    col0: usize,
    row0: usize,
    col1: usize,
    row1: usize,
) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for row in row0..row1.min(height) {
        for col in col0..col1.min(width) {
            data[row * width + col] = 1.0;
        }
    }
    data
}
