//! String similarity on a 0-100 scale.

/// Lowercase, turn every non-alphanumeric character into a space, trim.
pub fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().collect::<String>()
            } else {
                " ".to_string()
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split on whitespace, sort, rejoin with single spaces.
fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Normalized Indel similarity: `200 * LCS / (len_a + len_b)`.
///
/// Lengths count Unicode scalar values. Two empty strings are identical
/// (100); one empty string against a non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    // Integer numerator keeps exact boundaries exact (14/20 → 70.0).
    (200 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Token-sort ratio: normalize both strings, sort their words, then `ratio`.
/// "lost card" and "card lost" compare as identical.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sort_tokens(&normalize(a)), &sort_tokens(&normalize(b)))
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  How do I apply for a PAN-card?  "), "how do i apply for a pan card");
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize("Aadhaar"), "aadhaar");
    }

    #[test]
    fn test_lcs() {
        let a: Vec<char> = "abcbdab".chars().collect();
        let b: Vec<char> = "bdcaba".chars().collect();
        assert_eq!(lcs_len(&a, &b), 4);
        assert_eq!(lcs_len(&a, &[]), 0);
    }

    #[test]
    fn test_ratio_edges() {
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("abc", "abc"), 100.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_ratio_exact_seventy() {
        // LCS 7 over 10 + 10 chars
        assert_eq!(ratio("abcdefghij", "abcdefgxyz"), 70.0);
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        // 'é' is two bytes but one char: LCS 3 over 4 + 4 → 75
        assert_eq!(ratio("café", "cafe"), 75.0);
    }

    #[test]
    fn test_token_sort_ignores_word_order_and_case() {
        assert_eq!(token_sort_ratio("card lost", "lost card"), 100.0);
        assert_eq!(token_sort_ratio("Lost CARD!", "lost card"), 100.0);
        assert_eq!(token_sort_ratio("match a card", "card a match"), 100.0);
    }

    #[test]
    fn test_token_sort_known_scores() {
        let stored = "how to apply for pan card";
        let close = token_sort_ratio("how do I apply for a PAN card", stored);
        assert!(close > 81.0 && close < 82.0, "got {close}");
        assert_eq!(token_sort_ratio("what is the weather today", stored), 36.0);
        assert_eq!(token_sort_ratio("lost my aadhaar card", stored), 40.0);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        let pairs = [("kitten", "sitting"), ("flaw", "lawn"), ("pan card", "card pan apply")];
        for (a, b) in pairs {
            assert_eq!(ratio(a, b), ratio(b, a));
            assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
        }
    }
}
