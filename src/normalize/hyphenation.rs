//! Hyphenation repair (§4.8): hard-hyphen line-break joins, soft hyphens,
//! and en-dash line-break joins.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_HARD_HYPHEN_BREAK: Regex = Regex::new(r"(\p{L})-\n\s*(\p{L})").unwrap();
    static ref RE_EN_DASH_BREAK: Regex = Regex::new(r"(\p{L})\u{2013}\n\s*(\p{L})").unwrap();
}

/// Join `word-\n word` into `wordword`, strip soft hyphens (U+00AD), and
/// join `word–\n word` (en-dash) the same way.
pub fn repair(text: &str) -> String {
    let no_soft_hyphens = text.replace('\u{00ad}', "");
    let hard_joined = RE_HARD_HYPHEN_BREAK.replace_all(&no_soft_hyphens, "$1$2");
    RE_EN_DASH_BREAK.replace_all(&hard_joined, "$1$2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_hyphen_join() {
        assert_eq!(repair("reconstruc-\ntion"), "reconstruction");
    }

    #[test]
    fn test_soft_hyphen_stripped() {
        assert_eq!(repair("recon\u{00ad}struction"), "reconstruction");
    }

    #[test]
    fn test_en_dash_join() {
        assert_eq!(repair("recon\u{2013}\nstruction"), "reconstruction");
    }
}
