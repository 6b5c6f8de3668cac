//! Fixed board geometry: the 27 units and the per-cell peer sets.
//!
//! All tables are computed at compile time; the rest of the workspace
//! consults them instead of recomputing row/column/box membership.

/// Number of cells on the board.
pub const CELL_COUNT: usize = 81;

/// Number of units (9 rows + 9 columns + 9 boxes).
pub const UNIT_COUNT: usize = 27;

/// Number of peers of any cell.
pub const PEER_COUNT: usize = 20;

/// Converts `(row, col)` into a linear cell index.
#[must_use]
#[inline]
pub const fn cell_at(row: usize, col: usize) -> usize {
    row * 9 + col
}

/// Returns the row (0-8) of a cell index.
#[must_use]
#[inline]
pub const fn row_of(cell: usize) -> usize {
    cell / 9
}

/// Returns the column (0-8) of a cell index.
#[must_use]
#[inline]
pub const fn col_of(cell: usize) -> usize {
    cell % 9
}

/// Returns the box (0-8, left to right, top to bottom) of a cell index.
#[must_use]
#[inline]
pub const fn box_of(cell: usize) -> usize {
    (row_of(cell) / 3) * 3 + col_of(cell) / 3
}

/// The 27 units: rows at indices 0-8, columns at 9-17, boxes at 18-26.
///
/// Each unit lists its 9 cell indices in ascending order.
pub const UNITS: [[usize; 9]; UNIT_COUNT] = build_units();

/// Row units only (`UNITS[0..9]` by construction).
pub const ROWS: [[usize; 9]; 9] = split_units(0);

/// Column units only (`UNITS[9..18]` by construction).
pub const COLS: [[usize; 9]; 9] = split_units(9);

/// Box units only (`UNITS[18..27]` by construction).
pub const BOXES: [[usize; 9]; 9] = split_units(18);

/// For every cell, the 20 peers sharing a row, column or box with it,
/// in ascending order.
pub const PEERS: [[usize; PEER_COUNT]; CELL_COUNT] = build_peers();

const fn build_units() -> [[usize; 9]; UNIT_COUNT] {
    let mut units = [[0; 9]; UNIT_COUNT];
    let mut i = 0;
    while i < 9 {
        let mut j = 0;
        while j < 9 {
            units[i][j] = cell_at(i, j);
            units[i + 9][j] = cell_at(j, i);
            let base_row = (i / 3) * 3;
            let base_col = (i % 3) * 3;
            units[i + 18][j] = cell_at(base_row + j / 3, base_col + j % 3);
            j += 1;
        }
        i += 1;
    }
    units
}

const fn split_units(offset: usize) -> [[usize; 9]; 9] {
    let units = build_units();
    let mut out = [[0; 9]; 9];
    let mut i = 0;
    while i < 9 {
        out[i] = units[offset + i];
        i += 1;
    }
    out
}

const fn build_peers() -> [[usize; PEER_COUNT]; CELL_COUNT] {
    let mut peers = [[0; PEER_COUNT]; CELL_COUNT];
    let mut cell = 0;
    while cell < CELL_COUNT {
        let mut n = 0;
        let mut other = 0;
        while other < CELL_COUNT {
            if other != cell
                && (row_of(other) == row_of(cell)
                    || col_of(other) == col_of(cell)
                    || box_of(other) == box_of(cell))
            {
                peers[cell][n] = other;
                n += 1;
            }
            other += 1;
        }
        assert!(n == PEER_COUNT);
        cell += 1;
    }
    peers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_cover_every_cell_three_times() {
        let mut seen = [0usize; CELL_COUNT];
        for unit in &UNITS {
            for &cell in unit {
                seen[cell] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 3));
    }

    #[test]
    fn test_unit_ordering() {
        assert_eq!(UNITS[0], [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(UNITS[9], [0, 9, 18, 27, 36, 45, 54, 63, 72]);
        assert_eq!(UNITS[18], [0, 1, 2, 9, 10, 11, 18, 19, 20]);
        assert_eq!(UNITS[26], [60, 61, 62, 69, 70, 71, 78, 79, 80]);
    }

    #[test]
    fn test_peers_are_symmetric() {
        for cell in 0..CELL_COUNT {
            for &peer in &PEERS[cell] {
                assert!(PEERS[peer].contains(&cell), "{peer} missing peer {cell}");
            }
        }
    }

    #[test]
    fn test_peers_of_center() {
        let peers = PEERS[40];
        assert_eq!(peers.len(), PEER_COUNT);
        assert!(peers.contains(&36)); // same row
        assert!(peers.contains(&4)); // same column
        assert!(peers.contains(&30)); // same box
        assert!(!peers.contains(&40));
    }

    #[test]
    fn test_coordinate_round_trip() {
        for row in 0..9 {
            for col in 0..9 {
                let cell = cell_at(row, col);
                assert_eq!(row_of(cell), row);
                assert_eq!(col_of(cell), col);
            }
        }
        assert_eq!(box_of(cell_at(4, 4)), 4);
        assert_eq!(box_of(cell_at(8, 0)), 6);
    }
}
