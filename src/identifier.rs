use super::*;

/// Which match wins when a string carries more than one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
  /// Catalog links: the first identifier in the string.
  First,
  /// Reference links: the last identifier in the string.
  Last,
}

/// An uppercase document identifier such as `PMC1234567`.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  #[must_use]
  pub fn extract(text: &str, mode: ExtractionMode) -> Option<Self> {
    let mut matches = re::IDENTIFIER.find_iter(text);

    let found = match mode {
      ExtractionMode::First => matches.next(),
      ExtractionMode::Last => matches.last(),
    }?;

    Some(Self(found.as_str().to_ascii_uppercase()))
  }
}

impl Display for Identifier {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identifiers cited by a single reference entry.
///
/// Links pointing at `/pmc/articles/PMC…` win; the last identifier in each
/// href is taken. Without any such link the entry's text is searched instead.
#[must_use]
pub fn reference_identifiers<N: MarkupNode>(reference: &N) -> Vec<Identifier> {
  let mut found = Vec::new();

  for node in reference.descendants() {
    if !matches!(node.name(), "a" | "ext-link") {
      continue;
    }

    let Some(href) = node.attribute("href") else {
      continue;
    };

    if !re::REFERENCE_LINK.is_match(href) {
      continue;
    }

    if let Some(identifier) = Identifier::extract(href, ExtractionMode::Last)
      && !found.contains(&identifier)
    {
      found.push(identifier);
    }
  }

  if found.is_empty() {
    for m in re::IDENTIFIER.find_iter(&reference.text()) {
      let identifier = Identifier(m.as_str().to_ascii_uppercase());

      if !found.contains(&identifier) {
        found.push(identifier);
      }
    }
  }

  found
}
