//! Bordered-table strategy: pipe-delimited rows (`|` or `¦`).

use super::Grid;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SEPARATOR_ONLY: Regex = Regex::new(r"^[\s|:\-¦]+$").unwrap();
}

/// Build a candidate grid from pipe-delimited lines, or `None` if the lines
/// don't look like a bordered table.
pub fn try_build(lines: &[&str]) -> Option<Grid> {
    let candidate_lines: Vec<&str> = lines
        .iter()
        .filter(|l| (l.contains('|') || l.contains('¦')) && !RE_SEPARATOR_ONLY.is_match(l))
        .copied()
        .collect();

    if candidate_lines.len() < 2 {
        return None;
    }

    let rows: Vec<Vec<String>> = candidate_lines
        .iter()
        .map(|line| {
            let mut cells: Vec<String> = line
                .split(['|', '¦'])
                .map(|c| c.trim().to_string())
                .collect();
            if cells.first().is_some_and(|c| c.is_empty()) {
                cells.remove(0);
            }
            if cells.last().is_some_and(|c| c.is_empty()) {
                cells.pop();
            }
            cells
        })
        .collect();

    let max_pipes = candidate_lines
        .iter()
        .map(|l| l.matches(['|', '¦']).count())
        .max()
        .unwrap_or(0);
    if max_pipes < 2 {
        return None;
    }

    let mut grid = Grid::new(rows);
    grid.score_bonus = 2.0;
    Some(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bordered_table() {
        let lines = vec!["| Name | Age |", "| --- | --- |", "| Alice | 30 |", "| Bob | 25 |"];
        let grid = try_build(&lines).unwrap();
        assert_eq!(grid.cols, 2);
        assert_eq!(grid.rows.len(), 3);
    }

    #[test]
    fn test_rejects_too_few_pipe_lines() {
        let lines = vec!["| Name | Age |", "not a table line"];
        assert!(try_build(&lines).is_none());
    }
}
