use super::*;

const INVISIBLE_ELEMENTS: &[&str] =
  &["noscript", "script", "style", "template"];

/// The handful of tree operations the marker search needs.
///
/// Implemented for `scraper::ElementRef`; any other markup tree can plug into
/// the locator and resolver by implementing it.
pub trait MarkupNode: Clone {
  fn attribute(&self, name: &str) -> Option<&str>;

  /// Element children in document order.
  fn children(&self) -> Vec<Self>;

  fn name(&self) -> &str;

  /// The next element sibling, skipping text and comment nodes.
  fn next_sibling(&self) -> Option<Self>;

  /// The enclosing element, if any.
  fn parent(&self) -> Option<Self>;

  /// Visible text with each text node trimmed and joined by a single space.
  fn text(&self) -> String;

  /// All element descendants in document order, excluding `self`.
  fn descendants(&self) -> Vec<Self> {
    let mut descendants = Vec::new();

    let mut stack = self.children();
    stack.reverse();

    while let Some(node) = stack.pop() {
      let mut children = node.children();
      children.reverse();
      stack.extend(children);
      descendants.push(node);
    }

    descendants
  }
}

impl MarkupNode for ElementRef<'_> {
  fn attribute(&self, name: &str) -> Option<&str> {
    self.value().attr(name)
  }

  fn children(&self) -> Vec<Self> {
    let node: ego_tree::NodeRef<'_, Node> = **self;
    node.children().filter_map(ElementRef::wrap).collect()
  }

  fn name(&self) -> &str {
    self.value().name()
  }

  fn next_sibling(&self) -> Option<Self> {
    let node: ego_tree::NodeRef<'_, Node> = **self;
    node.next_siblings().find_map(ElementRef::wrap)
  }

  fn parent(&self) -> Option<Self> {
    let node: ego_tree::NodeRef<'_, Node> = **self;
    node.parent().and_then(ElementRef::wrap)
  }

  fn text(&self) -> String {
    let mut parts = Vec::new();
    collect_visible_text(**self, &mut parts);
    parts.join(" ")
  }
}

fn collect_visible_text<'a>(
  node: ego_tree::NodeRef<'a, Node>,
  parts: &mut Vec<&'a str>,
) {
  for child in node.children() {
    match child.value() {
      Node::Text(text) => {
        let trimmed = text.trim();

        if !trimmed.is_empty() {
          parts.push(trimmed);
        }
      }
      Node::Element(element)
        if !INVISIBLE_ELEMENTS.contains(&element.name()) =>
      {
        collect_visible_text(child, parts);
      }
      _ => {}
    }
  }
}
