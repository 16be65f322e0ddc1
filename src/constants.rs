/// Base address reported for a segment that did not fit in memory.
pub const UNALLOCATED: i64 = -1;

/// Minimum column width used when rendering a history grid.
pub const GRID_CELL_WIDTH: usize = 3;

/// Separator between values in reference strings and segment size lists.
pub const LIST_SEPARATOR: char = ',';
