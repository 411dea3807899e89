use super::*;

/// Runs duplicate reconciliation and link correction over a catalog.
pub struct Relink<S> {
  options: RelinkOptions,
  source: S,
}

impl Relink<HttpClient> {
  /// A runner that talks to the network.
  pub fn http(options: RelinkOptions) -> Result<Self> {
    let client = HttpClient::new(&options)?;
    Self::new(client, options)
  }
}

impl<S: Fetch + TitleLookup> Relink<S> {
  pub fn new(source: S, options: RelinkOptions) -> Result<Self> {
    options.validate()?;
    Ok(Self { options, source })
  }

  #[must_use]
  pub fn options(&self) -> &RelinkOptions {
    &self.options
  }

  /// Processes every row of `catalog`, leaving the surviving rows with their
  /// current links in it. The catalog is written to `output` unless the run
  /// is a dry run.
  pub fn run(&self, catalog: &mut Catalog, output: &Path) -> Result<Report> {
    let report = Report::new(catalog, output, &self.options);

    info!(
      input = %catalog.path().display(),
      rows = catalog.rows().len(),
      url_column = catalog.url_column(),
      title_column = catalog.title_column(),
      dry_run = self.options.dry_run,
      "starting run"
    );

    let context = Context::new(
      catalog.rows().to_vec(),
      report,
      &self.options,
      &self.source,
      &self.source,
    );

    let (rows, mut report) =
      Pipeline::with_default_stages(context).run()?.into_parts();

    report.counts.final_rows = rows.len();

    catalog.replace_rows(rows);

    if self.options.dry_run {
      info!("dry run, catalog not written");
    } else {
      catalog.save(output)?;
      info!(output = %output.display(), "catalog written");
    }

    Ok(report)
  }
}
