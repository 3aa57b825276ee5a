//! Header/footer detection by Jaccard similarity over normalized
//! first-N/last-N-lines-per-page sets (§4.8).

use std::collections::HashSet;

/// Only the first/last N lines of each page are considered as header/footer
/// candidates.
const CANDIDATE_LINES_PER_PAGE: usize = 3;
/// Clustering and removal similarity threshold.
const SIMILARITY_THRESHOLD: f32 = 0.8;
/// A pattern must recur on at least this fraction of pages to be removed.
const PAGE_COVERAGE_THRESHOLD: f32 = 0.5;

fn normalize_line(line: &str) -> String {
    let digits_replaced: String = line
        .chars()
        .map(|c| if c.is_ascii_digit() { '#' } else { c })
        .collect();
    let collapsed = digits_replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

fn word_set(normalized: &str) -> HashSet<&str> {
    normalized.split_whitespace().collect()
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

/// Remove lines across all pages that match a recurring header/footer
/// pattern.
pub fn remove_headers_and_footers(pages: Vec<String>) -> Vec<String> {
    let page_count = pages.len();
    if page_count == 0 {
        return pages;
    }

    let mut candidates: Vec<String> = Vec::new();
    for page in &pages {
        let lines: Vec<&str> = page.lines().collect();
        let tail_start = lines.len().saturating_sub(CANDIDATE_LINES_PER_PAGE);
        let head = lines.iter().take(CANDIDATE_LINES_PER_PAGE);
        let tail = lines.iter().skip(tail_start);

        // Head and tail windows overlap on short pages; dedupe per page so
        // a single physical line isn't counted twice toward coverage.
        let mut seen_on_page: HashSet<String> = HashSet::new();
        for line in head.chain(tail) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let normalized = normalize_line(trimmed);
            if seen_on_page.insert(normalized.clone()) {
                candidates.push(normalized);
            }
        }
    }

    let mut clusters: Vec<Vec<String>> = Vec::new();
    for candidate in candidates {
        let candidate_words = word_set(&candidate);
        if let Some(cluster) = clusters.iter_mut().find(|cluster| {
            let rep_words = word_set(&cluster[0]);
            jaccard(&rep_words, &candidate_words) >= SIMILARITY_THRESHOLD
        }) {
            cluster.push(candidate);
        } else {
            clusters.push(vec![candidate]);
        }
    }

    let patterns: Vec<String> = clusters
        .into_iter()
        .filter(|cluster| cluster.len() as f32 / page_count as f32 >= PAGE_COVERAGE_THRESHOLD)
        .map(|cluster| cluster[0].clone())
        .collect();

    if patterns.is_empty() {
        return pages;
    }

    pages
        .into_iter()
        .map(|page| {
            let lines: Vec<&str> = page.lines().collect();
            let tail_start = lines.len().saturating_sub(CANDIDATE_LINES_PER_PAGE);
            lines
                .iter()
                .enumerate()
                .filter(|&(i, line)| {
                    let in_candidate_window = i < CANDIDATE_LINES_PER_PAGE || i >= tail_start;
                    if !in_candidate_window {
                        return true;
                    }
                    let normalized = normalize_line(line.trim());
                    let words = word_set(&normalized);
                    !patterns.iter().any(|p| jaccard(&word_set(p), &words) >= SIMILARITY_THRESHOLD)
                })
                .map(|(_, line)| *line)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_repeating_footer() {
        let pages = vec![
            "Title\nBody text one\nPage 1 of 3".to_string(),
            "Body text two\nPage 2 of 3".to_string(),
            "Body text three\nPage 3 of 3".to_string(),
        ];
        let result = remove_headers_and_footers(pages);
        for page in &result {
            assert!(!page.contains("Page"));
        }
    }

    #[test]
    fn test_keeps_unique_content() {
        let pages = vec![
            "Unique heading one\nBody one".to_string(),
            "Unique heading two\nBody two".to_string(),
            "Unique heading three\nBody three".to_string(),
        ];
        let result = remove_headers_and_footers(pages.clone());
        assert_eq!(result, pages);
    }

    #[test]
    fn test_removes_repeating_footer_beyond_first_three_lines() {
        let pages = vec![
            "Title\nIntro line one\nBody line one\nBody line two\nBody line three\nPage 1".to_string(),
            "Title\nIntro line two\nBody line four\nBody line five\nBody line six\nPage 2".to_string(),
            "Title\nIntro line three\nBody line seven\nBody line eight\nBody line nine\nPage 3".to_string(),
        ];
        let result = remove_headers_and_footers(pages);
        for page in &result {
            assert!(!page.lines().any(|l| l.trim().starts_with("Page")));
        }
    }
}
