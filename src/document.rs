use super::*;

/// A parsed page or metadata response.
pub(crate) struct Document {
  html: Html,
}

impl Document {
  pub(crate) fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
    self.html.select(selector).next()
  }

  pub(crate) fn parse(markup: &str) -> Self {
    Self {
      html: Html::parse_document(markup),
    }
  }

  pub(crate) fn root(&self) -> ElementRef<'_> {
    self.html.root_element()
  }

  pub(crate) fn select<'a>(
    &'a self,
    selector: &'a Selector,
  ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    self.html.select(selector)
  }
}
