//! Central engine configuration.
//!
//! Bundles the toggles exposed on the CLI (`--no-tables`, `--preserve-layout`,
//! …) plus the scoring constants the layout and table heuristics are tuned
//! against, so a reader can find every tunable in one place instead of
//! hunting through each module.

/// Behavior toggles for one conversion run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Run the Table Detector over `potential-table` blocks.
    pub enable_tables: bool,
    /// Run the Math Tokenizer over prose blocks.
    pub enable_math: bool,
    /// Run the Cross-Page Normalizer's header/footer removal.
    pub remove_headers_footers: bool,
    /// Run the Cross-Page Normalizer's hyphenation repair.
    pub fix_hyphenation: bool,
    /// Preserve blank-line runs verbatim instead of collapsing them.
    pub preserve_layout: bool,
    /// Emit code blocks as fenced ` ``` ` blocks; when `false`, code lines
    /// are emitted verbatim with no fence.
    pub fence_code: bool,
    /// Invoke the OCR adapter for pages with near-empty glyph extraction.
    pub ocr: bool,
    /// ISO language code passed to the OCR adapter.
    pub language: String,
    /// Password to unlock an encrypted document, if any.
    pub password: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_tables: true,
            enable_math: true,
            remove_headers_footers: true,
            fix_hyphenation: true,
            preserve_layout: false,
            fence_code: true,
            ocr: false,
            language: "eng".to_string(),
            password: None,
        }
    }
}

/// The numeric constants the layout and table heuristics are scored
/// against. Not currently wired to be runtime-tunable (every production
/// caller uses [`ScoringWeights::default`]); it exists so the constants
/// scattered across `layout::column_detector`, `layout::block_grouper`,
/// `layout::body_size`, and `tables::profile` have one documented home and
/// a test that catches accidental drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// [`crate::layout::column_detector::GAP_DENSITY_RATIO`]-equivalent.
    pub column_gap_density_ratio: f32,
    /// [`crate::layout::column_detector::MIN_GAP_WIDTH_RATIO`]-equivalent.
    pub column_min_gap_width_ratio: f32,
    /// [`crate::layout::column_detector::MIN_COLUMN_WIDTH_RATIO`]-equivalent.
    pub column_min_width_ratio: f32,
    /// [`crate::layout::block_grouper::MAX_GAP_FONT_SIZE_RATIO`]-equivalent.
    pub block_max_gap_font_size_ratio: f32,
    /// [`crate::layout::body_size::LEVEL_1_RATIO`]-equivalent.
    pub heading_level_1_ratio: f32,
    /// [`crate::layout::body_size::LEVEL_2_RATIO`]-equivalent.
    pub heading_level_2_ratio: f32,
    /// [`crate::layout::body_size::LEVEL_3_RATIO`]-equivalent.
    pub heading_level_3_ratio: f32,
    /// Minimum GridProfile score for a candidate grid to be accepted.
    pub table_score_accept_threshold: f32,
    /// [`crate::tables::profile::ROW_COUNT_WEIGHT`]-equivalent.
    pub table_row_count_weight: f32,
    /// [`crate::tables::profile::COL_COUNT_WEIGHT`]-equivalent.
    pub table_col_count_weight: f32,
    /// [`crate::tables::profile::SHORT_TOKEN_WEIGHT`]-equivalent.
    pub table_short_token_weight: f32,
    /// [`crate::tables::profile::NUMERIC_WEIGHT`]-equivalent.
    pub table_numeric_weight: f32,
    /// [`crate::tables::profile::SENTENCE_PENALTY_HIGH`]-equivalent.
    pub table_sentence_penalty_high: f32,
    /// [`crate::tables::profile::SENTENCE_PENALTY_MID`]-equivalent.
    pub table_sentence_penalty_mid: f32,
    /// [`crate::tables::profile::PROSE_PENALTY_HIGH`]-equivalent.
    pub table_prose_penalty_high: f32,
    /// [`crate::tables::profile::PROSE_PENALTY_MID`]-equivalent.
    pub table_prose_penalty_mid: f32,
    /// [`crate::tables::profile::PROSE_PENALTY_LOW`]-equivalent.
    pub table_prose_penalty_low: f32,
    /// [`crate::tables::profile::COMBINED_PROSE_PENALTY`]-equivalent.
    pub table_combined_prose_penalty: f32,
    /// [`crate::tables::profile::AVG_LEN_PENALTY_HIGH`]-equivalent.
    pub table_avg_len_penalty_high: f32,
    /// [`crate::tables::profile::AVG_LEN_PENALTY_MID`]-equivalent.
    pub table_avg_len_penalty_mid: f32,
    /// [`crate::tables::profile::MAX_LEN_PENALTY`]-equivalent.
    pub table_max_len_penalty: f32,
    /// [`crate::tables::profile::DENSE_GRID_BONUS`]-equivalent.
    pub table_dense_grid_bonus: f32,
    /// [`crate::tables::profile::UNIFORM_ROWS_BONUS`]-equivalent.
    pub table_uniform_rows_bonus: f32,
    /// [`crate::tables::profile::DENSITY_BONUS`]-equivalent.
    pub table_density_bonus: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            column_gap_density_ratio: 0.2,
            column_min_gap_width_ratio: 0.03,
            column_min_width_ratio: 0.20,
            block_max_gap_font_size_ratio: 2.5,
            heading_level_1_ratio: 1.5,
            heading_level_2_ratio: 1.25,
            heading_level_3_ratio: 1.1,
            table_score_accept_threshold: 2.0,
            table_row_count_weight: 1.0,
            table_col_count_weight: 0.8,
            table_short_token_weight: 3.0,
            table_numeric_weight: 2.0,
            table_sentence_penalty_high: 4.0,
            table_sentence_penalty_mid: 2.0,
            table_prose_penalty_high: 6.0,
            table_prose_penalty_mid: 3.0,
            table_prose_penalty_low: 1.5,
            table_combined_prose_penalty: 5.0,
            table_avg_len_penalty_high: 4.0,
            table_avg_len_penalty_mid: 2.0,
            table_max_len_penalty: 2.0,
            table_dense_grid_bonus: 2.0,
            table_uniform_rows_bonus: 1.5,
            table_density_bonus: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::body_size::{LEVEL_1_RATIO, LEVEL_2_RATIO, LEVEL_3_RATIO};
    use crate::tables::profile;

    /// Guards against the documented constants drifting silently out of
    /// sync with the ones actually compiled into each module.
    #[test]
    fn test_weights_lock_to_module_constants() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.heading_level_1_ratio, LEVEL_1_RATIO);
        assert_eq!(weights.heading_level_2_ratio, LEVEL_2_RATIO);
        assert_eq!(weights.heading_level_3_ratio, LEVEL_3_RATIO);

        assert_eq!(weights.table_row_count_weight, profile::ROW_COUNT_WEIGHT);
        assert_eq!(weights.table_col_count_weight, profile::COL_COUNT_WEIGHT);
        assert_eq!(weights.table_short_token_weight, profile::SHORT_TOKEN_WEIGHT);
        assert_eq!(weights.table_numeric_weight, profile::NUMERIC_WEIGHT);
        assert_eq!(weights.table_sentence_penalty_high, profile::SENTENCE_PENALTY_HIGH);
        assert_eq!(weights.table_sentence_penalty_mid, profile::SENTENCE_PENALTY_MID);
        assert_eq!(weights.table_prose_penalty_high, profile::PROSE_PENALTY_HIGH);
        assert_eq!(weights.table_prose_penalty_mid, profile::PROSE_PENALTY_MID);
        assert_eq!(weights.table_prose_penalty_low, profile::PROSE_PENALTY_LOW);
        assert_eq!(weights.table_combined_prose_penalty, profile::COMBINED_PROSE_PENALTY);
        assert_eq!(weights.table_avg_len_penalty_high, profile::AVG_LEN_PENALTY_HIGH);
        assert_eq!(weights.table_avg_len_penalty_mid, profile::AVG_LEN_PENALTY_MID);
        assert_eq!(weights.table_max_len_penalty, profile::MAX_LEN_PENALTY);
        assert_eq!(weights.table_dense_grid_bonus, profile::DENSE_GRID_BONUS);
        assert_eq!(weights.table_uniform_rows_bonus, profile::UNIFORM_ROWS_BONUS);
        assert_eq!(weights.table_density_bonus, profile::DENSITY_BONUS);
    }

    #[test]
    fn test_default_config_enables_everything() {
        let config = EngineConfig::default();
        assert!(config.enable_tables);
        assert!(config.enable_math);
        assert!(!config.preserve_layout);
    }
}
