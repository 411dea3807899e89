use super::*;

pub const MARKER_PHRASE: &str = "This corrects the article";

/// Elements whose visible text contains the marker phrase, in document order.
///
/// Only the innermost match along each branch is reported; the enclosing
/// containers are what the resolver's parent tier covers.
#[must_use]
pub fn find_marker_elements<N: MarkupNode>(root: &N) -> Vec<N> {
  let mut markers = Vec::new();

  if contains_marker(root) {
    collect_innermost(root, &mut markers);
  }

  markers
}

/// A cheap check over the raw markup, used before any parsing.
#[must_use]
pub fn page_contains_marker(markup: &str) -> bool {
  re::MARKER.is_match(markup)
}

fn collect_innermost<N: MarkupNode>(node: &N, markers: &mut Vec<N>) {
  let matching_children = node
    .children()
    .into_iter()
    .filter(contains_marker)
    .collect::<Vec<N>>();

  if matching_children.is_empty() {
    markers.push(node.clone());
    return;
  }

  for child in &matching_children {
    collect_innermost(child, markers);
  }
}

fn contains_marker<N: MarkupNode>(node: &N) -> bool {
  !matches!(node.name(), "noscript" | "script" | "style" | "template")
    && re::MARKER.is_match(&node.text())
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  fn marker_ids(markup: &str) -> Vec<String> {
    let document = Document::parse(markup);

    find_marker_elements(&document.root())
      .iter()
      .map(|node| {
        MarkupNode::attribute(node, "id")
          .unwrap_or(MarkupNode::name(node))
          .to_string()
      })
      .collect()
  }

  #[test]
  fn no_marker_yields_empty_sequence() {
    assert!(marker_ids("<p>Nothing to see</p>").is_empty());
  }

  #[test]
  fn reports_innermost_element_case_insensitively() {
    assert_eq!(
      marker_ids(
        r#"<section id="outer"><div id="box"><p id="note">this CORRECTS the article
        <a href="/x">here</a></p></div></section>"#
      ),
      vec!["note"]
    );
  }

  #[test]
  fn phrase_split_across_inline_children_matches_parent() {
    assert_eq!(
      marker_ids(
        r#"<div id="note"><b>This corrects</b> <i>the article</i></div>"#
      ),
      vec!["note"]
    );
  }

  #[test]
  fn multiple_markers_come_back_in_document_order() {
    assert_eq!(
      marker_ids(
        r#"<div><p id="first">This corrects the article A</p></div>
        <div><p id="second">This corrects the article B</p></div>"#
      ),
      vec!["first", "second"]
    );
  }

  #[test]
  fn script_text_is_not_visible() {
    assert!(
      marker_ids("<script>var s = 'This corrects the article';</script>")
        .is_empty()
    );
  }

  #[test]
  fn raw_check_ignores_case() {
    assert!(page_contains_marker("<p>THIS corrects THE article</p>"));
    assert!(!page_contains_marker("<p>This corrected the article</p>"));
  }
}
