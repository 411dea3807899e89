use super::*;

/// State threaded through the stages of one run.
pub(crate) struct Context<'a> {
  fetcher: &'a dyn Fetch,
  options: &'a RelinkOptions,
  report: Report,
  resolver: Resolver,
  rows: Vec<CatalogRow>,
  titles: &'a dyn TitleLookup,
}

impl<'a> Context<'a> {
  pub(crate) fn fetch(&self, url: &str) -> Result<String, FetchError> {
    self.fetcher.fetch(url)
  }

  pub(crate) fn into_parts(self) -> (Vec<CatalogRow>, Report) {
    (self.rows, self.report)
  }

  pub(crate) fn new(
    rows: Vec<CatalogRow>,
    report: Report,
    options: &'a RelinkOptions,
    fetcher: &'a dyn Fetch,
    titles: &'a dyn TitleLookup,
  ) -> Self {
    Self {
      fetcher,
      options,
      report,
      resolver: Resolver::new(options.origin.clone(), options.ranking),
      rows,
      titles,
    }
  }

  pub(crate) fn options(&self) -> &RelinkOptions {
    self.options
  }

  pub(crate) fn record(&mut self, decision: Decision) {
    self.report.record(decision);
  }

  pub(crate) fn report_mut(&mut self) -> &mut Report {
    &mut self.report
  }

  pub(crate) fn resolver(&self) -> &Resolver {
    &self.resolver
  }

  pub(crate) fn set_rows(&mut self, rows: Vec<CatalogRow>) {
    self.rows = rows;
  }

  pub(crate) fn take_rows(&mut self) -> Vec<CatalogRow> {
    mem::take(&mut self.rows)
  }

  pub(crate) fn title(&self, url: &str) -> Option<String> {
    self.titles.title(url)
  }
}
