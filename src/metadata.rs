use super::*;

static SELECTOR_ARTICLE_TITLE: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("article-title").unwrap());

static SELECTOR_HEADING: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("h1").unwrap());

static SELECTOR_META: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("meta").unwrap());

static SELECTOR_TITLE: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("title").unwrap());

const TITLE_KEYS: [&str; 4] =
  ["dc:title", "citation_title", "og:title", "title"];

/// The `<article-title>` of a structured metadata response.
pub(crate) fn title_from_metadata_xml(xml: &str) -> Option<String> {
  let document = Document::parse(xml);

  document
    .first(&SELECTOR_ARTICLE_TITLE)
    .map(|title| MarkupNode::text(&title))
    .filter(|title| !title.is_empty())
}

/// Title of a page: meta tags first, then `<title>`, then the first `<h1>`.
pub(crate) fn title_from_page(html: &str) -> Option<String> {
  let document = Document::parse(html);

  let values = collect_meta_values(&document);

  pick_meta_value(&values, &TITLE_KEYS)
    .or_else(|| {
      document
        .first(&SELECTOR_TITLE)
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
    })
    .or_else(|| {
      document
        .first(&SELECTOR_HEADING)
        .map(|heading| MarkupNode::text(&heading))
        .filter(|heading| !heading.is_empty())
    })
}

fn collect_meta_values(document: &Document) -> BTreeMap<String, String> {
  let mut values = BTreeMap::new();

  for element in document.select(&SELECTOR_META) {
    let content = element.value().attr("content").unwrap_or_default().trim();

    if content.is_empty() {
      continue;
    }

    let attributes =
      [element.value().attr("name"), element.value().attr("property")];

    for raw_keys in attributes.into_iter().flatten() {
      for raw_key in raw_keys.split_whitespace() {
        let key = normalize_meta_key(raw_key);

        if !key.is_empty() {
          values.entry(key).or_insert_with(|| content.to_string());
        }
      }
    }
  }

  values
}

fn normalize_meta_key(raw: &str) -> String {
  raw
    .trim()
    .chars()
    .filter(|ch| !ch.is_whitespace())
    .map(|ch| {
      if ch == '.' {
        ':'
      } else {
        ch.to_ascii_lowercase()
      }
    })
    .collect()
}

fn pick_meta_value(
  values: &BTreeMap<String, String>,
  keys: &[&str],
) -> Option<String> {
  keys
    .iter()
    .find_map(|key| values.get(&normalize_meta_key(key)))
    .cloned()
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  #[test]
  fn dublin_core_title_wins_in_any_case() {
    let html = r#"<html><head>
      <meta property="og:title" content="Open Graph">
      <meta name="DC.Title" content="Dublin Core">
      <title>Page</title>
    </head><body><h1>Heading</h1></body></html>"#;

    assert_eq!(title_from_page(html).as_deref(), Some("Dublin Core"));
  }

  #[test]
  fn citation_title_beats_open_graph() {
    let html = r#"<head>
      <meta property="og:title" content="Open Graph">
      <meta name="citation_title" content="Bone &amp; muscle loss">
    </head>"#;

    assert_eq!(
      title_from_page(html).as_deref(),
      Some("Bone & muscle loss")
    );
  }

  #[test]
  fn empty_meta_content_falls_through_to_title_tag() {
    let html = r#"<head><meta name="citation_title" content="  ">
      <title> Page Title </title></head>"#;

    assert_eq!(title_from_page(html).as_deref(), Some("Page Title"));
  }

  #[test]
  fn heading_is_last_resort() {
    assert_eq!(
      title_from_page("<body><h1>Spaceflight <em>and</em> sleep</h1></body>")
        .as_deref(),
      Some("Spaceflight and sleep")
    );
    assert_eq!(title_from_page("<body><p>nothing</p></body>"), None);
  }

  #[test]
  fn metadata_xml_title_flattens_markup() {
    let xml = r#"<?xml version="1.0"?>
      <pmc-articleset><article><front><article-meta><title-group>
      <article-title>Effects of <italic>microgravity</italic> on bone</article-title>
      </title-group></article-meta></front></article></pmc-articleset>"#;

    assert_eq!(
      title_from_metadata_xml(xml).as_deref(),
      Some("Effects of microgravity on bone")
    );
    assert_eq!(title_from_metadata_xml("<error>none</error>"), None);
  }

  #[test]
  fn meta_content_is_not_decoded_twice() {
    let html = r#"<head><meta name="citation_title"
      content="Use of &amp;lt;i&amp;gt; tags &amp;amp; more"></head>"#;

    assert_eq!(
      title_from_page(html).as_deref(),
      Some("Use of &lt;i&gt; tags &amp; more")
    );
  }
}
