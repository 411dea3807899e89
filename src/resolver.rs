use super::*;

const LINK_ELEMENTS: &[&str] = &["a", "area", "ext-link"];

const MAX_SIBLINGS: usize = 6;

const MARKER_SNIPPET_LIMIT: usize = 400;

const NEIGHBOR_SNIPPET_LIMIT: usize = 600;

/// How a winner is chosen among the links found next to a marker.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
  /// Prefer a link whose path names an article identifier, falling back to
  /// the first link.
  #[default]
  PreferredPmc,
  /// Take the first link in encounter order.
  FirstCandidate,
}

impl Ranking {
  fn tier(self) -> &'static str {
    match self {
      Self::PreferredPmc => "preferred_pmc",
      Self::FirstCandidate => "first_candidate",
    }
  }
}

impl Display for Ranking {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.tier())
  }
}

/// Where, relative to the marker element, the link was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
  Inside,
  InSibling,
  InParent,
}

impl Location {
  fn suffix(self) -> &'static str {
    match self {
      Self::Inside => "inside",
      Self::InSibling => "in_sibling",
      Self::InParent => "in_parent",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  Found {
    target: String,
    ranking: Ranking,
    location: Location,
    snippet: String,
  },
  PhraseNotFound,
  NoValidAnchor {
    snippet: String,
  },
}

impl Resolution {
  #[must_use]
  pub fn reason(&self) -> String {
    match self {
      Self::Found {
        ranking, location, ..
      } => format!("{}_{}", ranking.tier(), location.suffix()),
      Self::PhraseNotFound => "phrase_not_found".into(),
      Self::NoValidAnchor { .. } => REASON_NO_VALID_ANCHOR.into(),
    }
  }

  #[must_use]
  pub fn snippet(&self) -> Option<&str> {
    match self {
      Self::Found { snippet, .. } | Self::NoValidAnchor { snippet } => {
        Some(snippet.as_str())
      }
      Self::PhraseNotFound => None,
    }
  }

  #[must_use]
  pub fn target(&self) -> Option<&str> {
    match self {
      Self::Found { target, .. } => Some(target.as_str()),
      _ => None,
    }
  }
}

/// Finds the replacement link a correction notice points at.
#[derive(Debug, Clone)]
pub struct Resolver {
  origin: Url,
  ranking: Ranking,
}

impl Resolver {
  #[must_use]
  pub fn new(origin: Url, ranking: Ranking) -> Self {
    Self { origin, ranking }
  }

  /// Parses `markup` and searches it for a correction target.
  #[must_use]
  pub fn resolve(&self, markup: &str, base_url: &str) -> Resolution {
    let document = Document::parse(markup);
    self.resolve_from(&document.root(), base_url)
  }

  /// Searches the tree under `root`: inside each marker element, then its
  /// following siblings, then its parent. Links back to `base_url` are never
  /// returned.
  #[must_use]
  pub fn resolve_from<N: MarkupNode>(
    &self,
    root: &N,
    base_url: &str,
  ) -> Resolution {
    let markers = find_marker_elements(root);

    let Some(first_marker) = markers.first() else {
      return Resolution::PhraseNotFound;
    };

    let page = normalize_url(base_url);

    for marker in &markers {
      let marker_text = marker.text();

      if let Some(target) = self.pick(self.candidates(marker, &page)) {
        return self.found(
          target,
          Location::Inside,
          truncate(&marker_text, MARKER_SNIPPET_LIMIT),
        );
      }

      let mut sibling = marker.next_sibling();

      for _ in 0..MAX_SIBLINGS {
        let Some(current) = sibling else {
          break;
        };

        if let Some(target) = self.pick(self.candidates(&current, &page)) {
          return self.found(
            target,
            Location::InSibling,
            truncate(
              &format!("{marker_text} | {}", current.text()),
              NEIGHBOR_SNIPPET_LIMIT,
            ),
          );
        }

        sibling = current.next_sibling();
      }

      if let Some(parent) = marker.parent()
        && let Some(target) = self.pick(self.candidates(&parent, &page))
      {
        return self.found(
          target,
          Location::InParent,
          truncate(&parent.text(), NEIGHBOR_SNIPPET_LIMIT),
        );
      }
    }

    Resolution::NoValidAnchor {
      snippet: truncate(&first_marker.text(), MARKER_SNIPPET_LIMIT),
    }
  }

  fn candidates<N: MarkupNode>(&self, element: &N, page: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    for node in std::iter::once(element.clone()).chain(element.descendants()) {
      if !LINK_ELEMENTS.contains(&node.name()) {
        continue;
      }

      let Some(resolved) =
        node.attribute("href").and_then(|href| self.resolve_href(href))
      else {
        continue;
      };

      if !page.is_empty() && normalize_url(&resolved) == page {
        continue;
      }

      if !candidates.contains(&resolved) {
        candidates.push(resolved);
      }
    }

    candidates
  }

  fn found(
    &self,
    target: String,
    location: Location,
    snippet: String,
  ) -> Resolution {
    Resolution::Found {
      target,
      ranking: self.ranking,
      location,
      snippet,
    }
  }

  fn pick(&self, candidates: Vec<String>) -> Option<String> {
    match self.ranking {
      Ranking::PreferredPmc => {
        let preferred = candidates.iter().position(|candidate| {
          let path = Url::parse(candidate)
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| candidate.clone());

          re::ARTICLE_PATH.is_match(&path)
        });

        candidates.into_iter().nth(preferred.unwrap_or(0))
      }
      Ranking::FirstCandidate => candidates.into_iter().next(),
    }
  }

  fn resolve_href(&self, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
      return None;
    }

    // Root-relative and protocol-relative hrefs both stay on the origin.
    if href.starts_with('/') {
      let origin = self.origin.origin().ascii_serialization();

      return Url::parse(&format!("{origin}{href}"))
        .ok()
        .map(String::from);
    }

    Some(href.to_string())
  }
}

/// Scheme, host and path only, lowercased, without a trailing slash.
#[must_use]
pub fn normalize_url(url: &str) -> String {
  let url = url.trim();

  if url.is_empty() {
    return String::new();
  }

  match Url::parse(url) {
    Ok(parsed) => {
      let authority = match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
      };

      format!(
        "{}://{}{}",
        parsed.scheme(),
        authority,
        parsed.path().trim_end_matches('/')
      )
      .to_lowercase()
    }
    Err(_) => url
      .split(['#', '?'])
      .next()
      .unwrap_or_default()
      .trim_end_matches('/')
      .to_lowercase(),
  }
}

fn truncate(text: &str, limit: usize) -> String {
  text.chars().take(limit).collect()
}
