//! ASCII whitespace-aligned table strategy: split each line on runs of
//! whitespace into cells, using the modal cell count as the target column
//! count.

use super::Grid;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref RE_WIDE_GAP: Regex = Regex::new(r" {3,}").unwrap();
    static ref RE_NARROW_GAP: Regex = Regex::new(r" {2,}").unwrap();
}

fn split_line(line: &str, re: &Regex) -> Vec<String> {
    re.split(line.trim()).map(|c| c.trim().to_string()).collect()
}

fn mode_and_coverage(counts: &[usize]) -> (usize, f32) {
    let non_empty: Vec<usize> = counts.iter().copied().filter(|&c| c > 0).collect();
    if non_empty.is_empty() {
        return (0, 0.0);
    }
    let mut tally: HashMap<usize, usize> = HashMap::new();
    for &c in &non_empty {
        *tally.entry(c).or_insert(0) += 1;
    }
    let (&mode, &mode_count) = tally.iter().max_by_key(|&(_, count)| *count).unwrap();
    (mode, mode_count as f32 / non_empty.len() as f32)
}

fn build_with_separator(lines: &[&str], re: &Regex) -> Option<Grid> {
    let split: Vec<Vec<String>> = lines.iter().map(|l| split_line(l, re)).collect();
    let counts: Vec<usize> = split.iter().map(|r| r.len()).collect();
    let (mode, coverage) = mode_and_coverage(&counts);

    if mode < 2 || coverage < 0.6 {
        return None;
    }

    let rows: Vec<Vec<String>> = split
        .into_iter()
        .map(|mut cells| {
            if cells.len() > mode {
                let overflow: Vec<String> = cells.split_off(mode - 1);
                cells.push(overflow.join(" "));
            }
            while cells.len() < mode {
                cells.push(String::new());
            }
            cells
        })
        .collect();

    Some(Grid::new(rows))
}

/// Build a candidate grid from whitespace-delimited lines, or `None` if the
/// lines don't exhibit a consistent column count.
pub fn try_build(lines: &[&str]) -> Option<Grid> {
    build_with_separator(lines, &RE_WIDE_GAP).or_else(|| build_with_separator(lines, &RE_NARROW_GAP))
}
