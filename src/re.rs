use super::*;

macro_rules! re {
  ($pat:expr) => {
    LazyLock::new(|| Regex::new($pat).unwrap())
  };
}

pub(crate) static ARTICLE_PATH: LazyLock<Regex> =
  re!(r"(?i)/articles/PMC\d+");

pub(crate) static IDENTIFIER: LazyLock<Regex> = re!(r"(?i)PMC\d+");

pub(crate) static MARKER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!("(?i){}", regex::escape(MARKER_PHRASE))).unwrap()
});

pub(crate) static NON_WORD: LazyLock<Regex> = re!(r"[^\w\s]");

pub(crate) static REFERENCE_LINK: LazyLock<Regex> =
  re!(r"(?i)/pmc/articles/PMC\d+");

pub(crate) static WHITESPACE_RUNS: LazyLock<Regex> = re!(r"\s+");
