use super::*;

/// Rewrites the link of every row whose page is a correction notice to the
/// article the notice points at.
pub struct CorrectLinksStage;

impl Stage for CorrectLinksStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let mut rows = context.take_rows();

    for row in &mut rows {
      Self::correct(context, row);
    }

    context.set_rows(rows);

    Ok(())
  }
}

impl CorrectLinksStage {
  fn correct(context: &mut Context<'_>, row: &mut CatalogRow) {
    let Some(link) = row.link.clone() else {
      context.record(Decision::new(
        Phase::Correction,
        row,
        Action::Skipped,
        "missing_link",
      ));
      return;
    };

    let markup = match context.fetch(&link) {
      Ok(markup) => markup,
      Err(error) => {
        context.record(
          Decision::new(
            Phase::Correction,
            row,
            Action::Error,
            REASON_FETCH_FAILED,
          )
          .with_evidence(Evidence {
            status: Some(error.status()),
            ..Evidence::default()
          }),
        );
        return;
      }
    };

    let resolution = context.resolver().resolve(&markup, &link);

    let evidence = Evidence {
      snippet: resolution.snippet().map(str::to_string),
      ..Evidence::default()
    };

    let decision = match resolution.target() {
      Some(target)
        if Self::is_http_url(target)
          && normalize_url(target) != normalize_url(&link) =>
      {
        let decision = Decision::new(
          Phase::Correction,
          row,
          Action::Corrected,
          resolution.reason(),
        )
        .with_evidence(Evidence {
          corrected_url: Some(target.to_string()),
          ..evidence
        });

        row.link = Some(target.to_string());

        decision
      }
      Some(target) => Decision::new(
        Phase::Correction,
        row,
        Action::Kept,
        resolution.reason(),
      )
      .with_evidence(Evidence {
        found_url: Some(target.to_string()),
        ..evidence
      }),
      None => Decision::new(
        Phase::Correction,
        row,
        Action::Kept,
        resolution.reason(),
      )
      .with_evidence(evidence),
    };

    context.record(decision);
  }

  fn is_http_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
  }
}
