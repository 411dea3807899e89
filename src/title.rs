use super::*;

/// Lowercases, turns punctuation into spaces and collapses whitespace.
#[must_use]
pub fn normalize(title: &str) -> String {
  let lowered = title.to_lowercase();

  let spaced = re::NON_WORD.replace_all(&lowered, " ");

  re::WHITESPACE_RUNS
    .replace_all(&spaced, " ")
    .trim()
    .to_string()
}

/// `2 * lcs / (len(a) + len(b))` over the characters of both normalized
/// titles.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
  let a = normalize(a).chars().collect::<Vec<char>>();
  let b = normalize(b).chars().collect::<Vec<char>>();

  if a.is_empty() || b.is_empty() {
    return 0.0;
  }

  let total = a.len() + b.len();

  (2 * longest_common_subsequence(&a, &b)) as f64 / total as f64
}

#[must_use]
pub fn titles_similar(a: &str, b: &str, threshold: f64) -> bool {
  if normalize(a).is_empty() || normalize(b).is_empty() {
    return false;
  }

  similarity(a, b) >= threshold
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
  let mut previous = vec![0; b.len() + 1];
  let mut current = vec![0; b.len() + 1];

  for &left in a {
    for (j, &right) in b.iter().enumerate() {
      current[j + 1] = if left == right {
        previous[j] + 1
      } else {
        current[j].max(previous[j + 1])
      };
    }

    std::mem::swap(&mut previous, &mut current);
  }

  previous[b.len()]
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  #[test]
  fn normalize_strips_punctuation_and_case() {
    assert_eq!(
      normalize("  Spaceflight: Effects\ton  BONE-loss! "),
      "spaceflight effects on bone loss"
    );
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("?!"), "");
  }

  #[test]
  fn identical_titles_score_one() {
    for title in ["Alpha Study", "x", "Microgravity & the Heart"] {
      assert_eq!(similarity(title, title), 1.0);
    }
  }

  #[test]
  fn empty_side_scores_zero() {
    assert_eq!(similarity("", "x"), 0.0);
    assert_eq!(similarity("x", ""), 0.0);
    assert_eq!(similarity("...", "x"), 0.0);
  }

  #[test]
  fn similarity_is_symmetric() {
    let pairs = [
      ("Alpha Study", "Alpha Stdy"),
      ("Bone loss in mice", "Mice lose bone"),
      ("Unrelated Paper", "Alpha Study"),
    ];

    for (a, b) in pairs {
      assert_eq!(similarity(a, b), similarity(b, a));
    }
  }

  #[test]
  fn near_duplicate_titles_clear_default_threshold() {
    let score = similarity("Alpha Stdy", "Alpha Study");

    assert!(score > 0.95 && score < 0.96, "score was {score}");
    assert!(titles_similar("Alpha Stdy", "Alpha Study", 0.90));
  }

  #[test]
  fn unrelated_titles_fall_below_threshold() {
    assert!(similarity("Alpha Study", "Unrelated Paper") < 0.5);
    assert!(!titles_similar("Alpha Study", "Unrelated Paper", 0.90));
  }

  #[test]
  fn empty_titles_are_never_similar() {
    for threshold in [0.0, 0.5, 1.0] {
      assert!(!titles_similar("", "Anything", threshold));
      assert!(!titles_similar("Anything", "  ", threshold));
    }
  }

  #[test]
  fn punctuation_differences_do_not_matter() {
    assert!(titles_similar(
      "Bone Loss: A Review.",
      "bone loss - a review",
      1.0
    ));
  }
}
