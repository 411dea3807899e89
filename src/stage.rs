use super::*;

mod correct_links;
mod deduplicate;

pub use {correct_links::CorrectLinksStage, deduplicate::DeduplicateStage};

pub(crate) trait Stage {
  fn run(&mut self, context: &mut Context<'_>) -> Result;
}

#[cfg(test)]
pub(crate) mod tests {
  use {
    super::*,
    std::{cell::Cell, collections::HashMap},
  };

  /// Pages and titles served from memory; unknown urls answer 404.
  #[derive(Default)]
  pub(crate) struct FakeWeb {
    pages: HashMap<String, String>,
    requests: Cell<usize>,
    titles: HashMap<String, String>,
  }

  impl FakeWeb {
    pub(crate) fn requests(&self) -> usize {
      self.requests.get()
    }

    pub(crate) fn run_stage(
      &self,
      mut stage: impl Stage,
      rows: Vec<CatalogRow>,
    ) -> (Vec<CatalogRow>, Report) {
      let options = RelinkOptions::builder()
        .delay(Duration::ZERO)
        .origin(Url::parse("https://pmc.example").unwrap())
        .build();

      let report = Report {
        input: "in.csv".into(),
        output: "out.csv".into(),
        dry_run: true,
        url_column: "Link".into(),
        title_column: Some("Title".into()),
        title_threshold: options.title_threshold,
        ranking: options.ranking,
        counts: Counts {
          total_rows: rows.len(),
          ..Counts::default()
        },
        note: None,
        duplicate_groups: Vec::new(),
        decisions: Vec::new(),
      };

      let mut context = Context::new(rows, report, &options, self, self);

      stage.run(&mut context).unwrap();

      context.into_parts()
    }

    pub(crate) fn with_page(mut self, url: &str, markup: &str) -> Self {
      self.pages.insert(url.to_string(), markup.to_string());
      self
    }

    pub(crate) fn with_title(mut self, url: &str, title: &str) -> Self {
      self.titles.insert(url.to_string(), title.to_string());
      self
    }
  }

  impl Fetch for FakeWeb {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
      self.requests.set(self.requests.get() + 1);
      self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
  }

  impl TitleLookup for FakeWeb {
    fn title(&self, url: &str) -> Option<String> {
      self.titles.get(url).cloned()
    }
  }
}
