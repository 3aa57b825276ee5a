//! Column-clustered positioned-row strategy: clusters cell x-coordinates
//! across rows and assigns each cell to the nearest column centroid.

use super::{cluster_x_positions, nearest_centroid, Grid, PositionedRow};

/// Build a candidate grid from rows carrying per-cell x-positions.
pub fn try_build(rows: &[PositionedRow]) -> Option<Grid> {
    let eligible: Vec<&PositionedRow> = rows.iter().filter(|r| r.cells.len() >= 2).collect();
    if eligible.len() < 2 {
        return None;
    }

    let all_positions: Vec<f32> = eligible.iter().flat_map(|r| r.x_positions.iter().copied()).collect();
    let centroids = cluster_x_positions(&all_positions);
    if centroids.len() < 2 {
        return None;
    }

    let grid_rows: Vec<Vec<String>> = eligible
        .iter()
        .map(|row| {
            let mut cells = vec![String::new(); centroids.len()];
            for (cell, &x) in row.cells.iter().zip(row.x_positions.iter()) {
                let idx = nearest_centroid(x, &centroids);
                if cells[idx].is_empty() {
                    cells[idx] = cell.clone();
                } else {
                    cells[idx] = format!("{} {}", cells[idx], cell);
                }
            }
            cells
        })
        .collect();

    Some(Grid::new(grid_rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str], xs: &[f32]) -> PositionedRow {
        PositionedRow {
            cells: cells.iter().map(|s| s.to_string()).collect(),
            x_positions: xs.to_vec(),
        }
    }

    #[test]
    fn test_positioned_clustering() {
        let rows = vec![
            row(&["Name", "Age"], &[10.0, 200.0]),
            row(&["Alice", "30"], &[12.0, 205.0]),
            row(&["Bob", "25"], &[8.0, 198.0]),
        ];
        let grid = try_build(&rows).unwrap();
        assert_eq!(grid.cols, 2);
        assert_eq!(grid.rows.len(), 3);
    }

    #[test]
    fn test_too_few_rows() {
        let rows = vec![row(&["Name", "Age"], &[10.0, 200.0])];
        assert!(try_build(&rows).is_none());
    }
}
