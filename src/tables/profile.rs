//! GridProfile: deterministic per-cell classification and the scoring /
//! acceptance gate that decides whether a [`super::Grid`] is really a
//! table.

use super::Grid;
use crate::textstats::{is_numeric_cell, is_prose_fragment, is_sentence_cell, is_short_token};

/// Per-row score contribution. Locked against [`crate::config::ScoringWeights`]
/// by `config`'s `test_weights_lock_to_module_constants`.
pub const ROW_COUNT_WEIGHT: f32 = 1.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const COL_COUNT_WEIGHT: f32 = 0.8;
/// See [`ROW_COUNT_WEIGHT`].
pub const SHORT_TOKEN_WEIGHT: f32 = 3.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const NUMERIC_WEIGHT: f32 = 2.0;

/// Sentence-ratio penalty tiers: above 0.8 the heavier weight applies, above
/// 0.4 the lighter one, otherwise no penalty.
const SENTENCE_RATIO_HIGH: f32 = 0.8;
const SENTENCE_RATIO_MID: f32 = 0.4;
/// See [`ROW_COUNT_WEIGHT`].
pub const SENTENCE_PENALTY_HIGH: f32 = 4.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const SENTENCE_PENALTY_MID: f32 = 2.0;

/// Prose-fragment-ratio penalty tiers.
const PROSE_RATIO_HIGH: f32 = 0.5;
const PROSE_RATIO_MID: f32 = 0.3;
const PROSE_RATIO_LOW: f32 = 0.15;
/// See [`ROW_COUNT_WEIGHT`].
pub const PROSE_PENALTY_HIGH: f32 = 6.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const PROSE_PENALTY_MID: f32 = 3.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const PROSE_PENALTY_LOW: f32 = 1.5;

/// Flat penalty when both sentence and prose ratios read heavily prose-like
/// and the grid's tabular ratio doesn't compensate.
const COMBINED_PENALTY_RATIO_GATE: f32 = 0.6;
const COMBINED_PENALTY_TABULAR_GATE: f32 = 0.3;
/// See [`ROW_COUNT_WEIGHT`].
pub const COMBINED_PROSE_PENALTY: f32 = 5.0;

/// Average-cell-length penalty tiers.
const AVG_LEN_HIGH: f32 = 80.0;
const AVG_LEN_MID: f32 = 50.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const AVG_LEN_PENALTY_HIGH: f32 = 4.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const AVG_LEN_PENALTY_MID: f32 = 2.0;

/// Max-cell-length penalty gate.
const MAX_LEN_GATE: usize = 100;
/// See [`ROW_COUNT_WEIGHT`].
pub const MAX_LEN_PENALTY: f32 = 2.0;

/// Bonus for a dense, row/column-rich grid with little prose.
const DENSE_GRID_MIN_ROWS: usize = 4;
const DENSE_GRID_MIN_COLS: usize = 3;
const DENSE_GRID_MAX_PROSE_RATIO: f32 = 0.3;
/// See [`ROW_COUNT_WEIGHT`].
pub const DENSE_GRID_BONUS: f32 = 2.0;
/// See [`ROW_COUNT_WEIGHT`].
pub const UNIFORM_ROWS_BONUS: f32 = 1.5;
const DENSITY_BONUS_GATE: f32 = 0.6;
/// See [`ROW_COUNT_WEIGHT`].
pub const DENSITY_BONUS: f32 = 1.0;

/// Cell-level statistics derived deterministically from a [`Grid`].
#[derive(Debug, Clone)]
pub struct GridProfile {
    /// Row count.
    pub n_rows: usize,
    /// Column count.
    pub n_cols: usize,
    /// Count of non-empty (after trim) cells.
    pub non_empty: usize,
    /// Count of short-token cells.
    pub short_token: usize,
    /// Count of numeric cells.
    pub numeric: usize,
    /// Count of sentence cells.
    pub sentence: usize,
    /// Count of prose-fragment cells.
    pub prose_fragment: usize,
    /// Mean cell length in characters.
    pub avg_len: f32,
    /// Max cell length in characters.
    pub max_len: usize,
    /// `non_empty / (n_rows * n_cols)`.
    pub density: f32,
    /// Whether every row has an equal cell count (trivially true: `Grid`
    /// pads every row to `cols`, so this reflects pre-padding uniformity —
    /// callers should check row length before padding if they need this).
    pub uniform_rows: bool,
}

impl GridProfile {
    /// Compute a profile from a grid.
    pub fn compute(grid: &Grid) -> Self {
        let n_rows = grid.rows.len();
        let n_cols = grid.cols;
        let cells: Vec<&str> = grid.rows.iter().flatten().map(|s| s.trim()).collect();
        let non_empty_cells: Vec<&str> = cells.iter().filter(|c| !c.is_empty()).copied().collect();
        let non_empty = non_empty_cells.len();

        let short_token = non_empty_cells.iter().filter(|c| is_short_token(c)).count();
        let numeric = non_empty_cells.iter().filter(|c| is_numeric_cell(c)).count();
        let sentence = non_empty_cells.iter().filter(|c| is_sentence_cell(c)).count();
        let prose_fragment = non_empty_cells.iter().filter(|c| is_prose_fragment(c)).count();

        let total_len: usize = non_empty_cells.iter().map(|c| c.chars().count()).sum();
        let avg_len = if non_empty > 0 { total_len as f32 / non_empty as f32 } else { 0.0 };
        let max_len = non_empty_cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);

        let total_cells = (n_rows * n_cols).max(1);
        let density = non_empty as f32 / total_cells as f32;

        let uniform_rows = grid.rows.windows(2).all(|w| w[0].len() == w[1].len());

        Self {
            n_rows,
            n_cols,
            non_empty,
            short_token,
            numeric,
            sentence,
            prose_fragment,
            avg_len,
            max_len,
            density,
            uniform_rows,
        }
    }

    fn sentence_ratio(&self) -> f32 {
        if self.non_empty == 0 { 0.0 } else { self.sentence as f32 / self.non_empty as f32 }
    }

    fn prose_fragment_ratio(&self) -> f32 {
        if self.non_empty == 0 { 0.0 } else { self.prose_fragment as f32 / self.non_empty as f32 }
    }

    fn tabular_ratio(&self) -> f32 {
        if self.non_empty == 0 { 0.0 } else { (self.short_token + self.numeric) as f32 / self.non_empty as f32 }
    }

    /// Compute the score, given the producing strategy's fixed bonus.
    pub fn score(&self, strategy_bonus: f32) -> f32 {
        let non_empty = self.non_empty.max(1) as f32;
        let sentence_ratio = self.sentence_ratio();
        let prose_fragment_ratio = self.prose_fragment_ratio();

        let mut score = strategy_bonus;
        score += ROW_COUNT_WEIGHT * self.n_rows as f32;
        score += COL_COUNT_WEIGHT * self.n_cols as f32;
        score += SHORT_TOKEN_WEIGHT * (self.short_token as f32 / non_empty);
        score += NUMERIC_WEIGHT * (self.numeric as f32 / non_empty);

        let sentence_penalty_weight = if sentence_ratio > SENTENCE_RATIO_HIGH {
            SENTENCE_PENALTY_HIGH
        } else if sentence_ratio > SENTENCE_RATIO_MID {
            SENTENCE_PENALTY_MID
        } else {
            0.0
        };
        score -= sentence_penalty_weight * sentence_ratio;

        let prose_penalty_weight = if prose_fragment_ratio > PROSE_RATIO_HIGH {
            PROSE_PENALTY_HIGH
        } else if prose_fragment_ratio > PROSE_RATIO_MID {
            PROSE_PENALTY_MID
        } else if prose_fragment_ratio > PROSE_RATIO_LOW {
            PROSE_PENALTY_LOW
        } else {
            0.0
        };
        score -= prose_penalty_weight * prose_fragment_ratio;

        if sentence_ratio.max(prose_fragment_ratio) > COMBINED_PENALTY_RATIO_GATE
            && self.tabular_ratio() < COMBINED_PENALTY_TABULAR_GATE
        {
            score -= COMBINED_PROSE_PENALTY;
        }

        score -= if self.avg_len > AVG_LEN_HIGH {
            AVG_LEN_PENALTY_HIGH
        } else if self.avg_len > AVG_LEN_MID {
            AVG_LEN_PENALTY_MID
        } else {
            0.0
        };

        if self.max_len > MAX_LEN_GATE {
            score -= MAX_LEN_PENALTY;
        }

        if self.n_rows >= DENSE_GRID_MIN_ROWS
            && self.n_cols >= DENSE_GRID_MIN_COLS
            && prose_fragment_ratio < DENSE_GRID_MAX_PROSE_RATIO
        {
            score += DENSE_GRID_BONUS;
        }

        if self.uniform_rows {
            score += UNIFORM_ROWS_BONUS;
        }

        if self.density >= DENSITY_BONUS_GATE {
            score += DENSITY_BONUS;
        }

        score
    }
}

/// The acceptance gate from the table-detector scoring rules: every
/// condition must hold for a profile to be accepted as a real table.
pub fn accept(profile: &GridProfile, score: f32) -> bool {
    if profile.n_rows < 2 || profile.n_cols < 2 {
        return false;
    }
    if profile.density < 0.25 {
        return false;
    }

    let tabular_ratio = profile.tabular_ratio();
    let sentence_ratio = profile.sentence_ratio();
    let prose_fragment_ratio = profile.prose_fragment_ratio();

    if !(profile.avg_len <= 60.0 || tabular_ratio >= 0.5) {
        return false;
    }
    if !((profile.max_len <= 80 || profile.avg_len <= 40.0) || tabular_ratio >= 0.4) {
        return false;
    }

    if sentence_ratio >= 0.4 && tabular_ratio < 0.5 {
        return false;
    }

    let short_token_ratio = if profile.non_empty == 0 {
        0.0
    } else {
        profile.short_token as f32 / profile.non_empty as f32
    };
    if short_token_ratio < 0.15 && profile.numeric == 0 {
        if !(profile.n_rows >= 4 && profile.n_cols >= 3 && profile.avg_len <= 30.0) {
            return false;
        }
    }

    let _ = prose_fragment_ratio;
    score >= 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Grid;

    #[test]
    fn test_accepts_numeric_table() {
        let grid = Grid::new(vec![
            vec!["Name".into(), "Revenue".into()],
            vec!["Acme".into(), "1,234".into()],
            vec!["Globex".into(), "5,678".into()],
            vec!["Initech".into(), "910".into()],
        ]);
        let profile = GridProfile::compute(&grid);
        let score = profile.score(0.0);
        assert!(accept(&profile, score), "score was {score}");
    }

    #[test]
    fn test_rejects_prose_paragraph() {
        let grid = Grid::new(vec![
            vec!["The committee reviewed the proposal thoroughly and agreed it was sound.".into()],
            vec!["They will report back to the board next month with recommendations.".into()],
        ]);
        let profile = GridProfile::compute(&grid);
        let score = profile.score(0.0);
        assert!(!accept(&profile, score));
    }
}
