use super::*;

/// Drops duplicate-identifier rows whose recorded title no longer matches the
/// live document.
///
/// Only rows whose identifier appears at least twice are looked at; a lone
/// row cannot tell title drift apart from an intentional update.
pub struct DeduplicateStage;

impl Stage for DeduplicateStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let rows = context.take_rows();

    let mut groups = Self::identifier_groups(&rows);

    let report = context.report_mut();

    report.counts.unique_identifiers = groups.len();

    groups.retain(|_, positions| positions.len() > 1);

    report.counts.duplicate_groups = groups.len();

    report.duplicate_groups = groups
      .iter()
      .map(|(identifier, positions)| DuplicateGroup {
        identifier: identifier.clone(),
        rows: positions
          .iter()
          .map(|&position| rows[position].index)
          .collect(),
        urls: positions
          .iter()
          .filter_map(|&position| rows[position].link.clone())
          .collect(),
      })
      .collect();

    if groups.is_empty() {
      report.note = Some(NOTE_NO_DUPLICATES.to_string());
    }

    let mut deleted = HashSet::new();

    for (identifier, positions) in &groups {
      debug!(%identifier, rows = positions.len(), "checking duplicate group");

      for &position in positions {
        let row = &rows[position];

        if Self::is_stale(context, row, identifier) {
          deleted.insert(row.index);
        }
      }
    }

    context.set_rows(
      rows
        .into_iter()
        .filter(|row| !deleted.contains(&row.index))
        .collect(),
    );

    Ok(())
  }
}

impl DeduplicateStage {
  /// Positions of the rows carrying each identifier, ordered by identifier.
  fn identifier_groups(
    rows: &[CatalogRow],
  ) -> BTreeMap<Identifier, Vec<usize>> {
    let mut groups = BTreeMap::<Identifier, Vec<usize>>::new();

    for (position, row) in rows.iter().enumerate() {
      if let Some(identifier) = row
        .link
        .as_deref()
        .and_then(|link| Identifier::extract(link, ExtractionMode::First))
      {
        groups.entry(identifier).or_default().push(position);
      }
    }

    groups
  }

  fn is_stale(
    context: &mut Context<'_>,
    row: &CatalogRow,
    identifier: &Identifier,
  ) -> bool {
    let evidence = Evidence {
      identifier: Some(identifier.clone()),
      ..Evidence::default()
    };

    let decision = |action, reason: &str| {
      Decision::new(Phase::Duplicate, row, action, reason)
    };

    let (Some(link), Some(recorded_title)) =
      (row.link.as_deref(), row.title.as_deref())
    else {
      context.record(
        decision(Action::Skipped, "missing_data").with_evidence(evidence),
      );
      return false;
    };

    let markup = match context.fetch(link) {
      Ok(markup) => markup,
      Err(error) => {
        context.record(
          decision(Action::Error, REASON_FETCH_FAILED).with_evidence(Evidence {
            status: Some(error.status()),
            ..evidence
          }),
        );
        return false;
      }
    };

    if page_contains_marker(&markup) {
      context.record(
        decision(Action::Skipped, "correction_page").with_evidence(evidence),
      );
      return false;
    }

    let Some(fetched_title) = context.title(link) else {
      context.record(
        decision(Action::Error, "title_fetch_failed").with_evidence(evidence),
      );
      return false;
    };

    let threshold = context.options().title_threshold;

    let stale = !titles_similar(recorded_title, &fetched_title, threshold);

    let evidence = Evidence {
      recorded_title: Some(recorded_title.to_string()),
      similarity: Some(similarity(recorded_title, &fetched_title)),
      fetched_title: Some(fetched_title),
      threshold: Some(threshold),
      ..evidence
    };

    let (action, reason) = if stale {
      (Action::Deleted, "title_mismatch")
    } else {
      (Action::Kept, "title_matched")
    };

    context.record(decision(action, reason).with_evidence(evidence));

    stale
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::stage::tests::FakeWeb, pretty_assertions::assert_eq};

  fn row(index: usize, link: &str, title: Option<&str>) -> CatalogRow {
    CatalogRow {
      index,
      link: Some(link.to_string()),
      title: title.map(str::to_string),
      fields: Vec::new(),
    }
  }

  fn run(web: &FakeWeb, rows: Vec<CatalogRow>) -> (Vec<usize>, Report) {
    let (rows, report) = web.run_stage(DeduplicateStage, rows);
    (rows.iter().map(|row| row.index).collect(), report)
  }

  #[test]
  fn near_identical_titles_keep_both_rows() {
    let web = FakeWeb::default()
      .with_page("https://x/PMC1", "<h1>Alpha Study</h1>")
      .with_page("https://x/PMC1-alt", "<h1>Alpha Study</h1>")
      .with_title("https://x/PMC1", "Alpha Study")
      .with_title("https://x/PMC1-alt", "Alpha Study");

    let (kept, report) = run(
      &web,
      vec![
        row(0, "https://x/PMC1", Some("Alpha Study")),
        row(1, "https://x/PMC1-alt", Some("Alpha Stdy")),
      ],
    );

    assert_eq!(kept, vec![0, 1]);
    assert_eq!(report.counts.duplicate_groups, 1);

    let decisions = report.phase(Phase::Duplicate).collect::<Vec<_>>();

    assert_eq!(decisions.len(), 2);
    assert!(decisions.iter().all(|d| d.action == Action::Kept));
    assert!(decisions[1].evidence.similarity.unwrap() > 0.95);
  }

  #[test]
  fn mismatched_title_deletes_only_that_row() {
    let web = FakeWeb::default()
      .with_page("https://x/PMC1", "<h1>Alpha Study</h1>")
      .with_page("https://x/PMC1-alt", "<h1>Unrelated Paper</h1>")
      .with_title("https://x/PMC1", "Alpha Study")
      .with_title("https://x/PMC1-alt", "Unrelated Paper");

    let (kept, report) = run(
      &web,
      vec![
        row(0, "https://x/PMC1", Some("Alpha Study")),
        row(1, "https://x/PMC1-alt", Some("Alpha Stdy")),
      ],
    );

    assert_eq!(kept, vec![0]);

    let deleted = report
      .phase(Phase::Duplicate)
      .find(|decision| decision.action == Action::Deleted)
      .expect("a deletion");

    assert_eq!(deleted.row_index, 1);
    assert_eq!(deleted.reason, "title_mismatch");
    assert_eq!(deleted.evidence.recorded_title.as_deref(), Some("Alpha Stdy"));
    assert_eq!(
      deleted.evidence.fetched_title.as_deref(),
      Some("Unrelated Paper")
    );
    assert_eq!(deleted.evidence.threshold, Some(0.90));
    assert_eq!(report.counts.deletions, 1);
  }

  #[test]
  fn singleton_rows_are_never_examined() {
    let web = FakeWeb::default();

    let (kept, report) = run(
      &web,
      vec![
        row(0, "https://x/PMC1", Some("Whatever")),
        row(1, "https://x/PMC2", Some("Something else")),
        row(2, "https://x/no-identifier", None),
      ],
    );

    assert_eq!(kept, vec![0, 1, 2]);
    assert!(report.decisions.is_empty());
    assert!(report.duplicate_groups.is_empty());
    assert_eq!(report.counts.unique_identifiers, 2);
    assert_eq!(
      report.note.as_deref(),
      Some("no_duplicate_identifiers_found")
    );
    assert_eq!(web.requests(), 0);
  }

  #[test]
  fn correction_pages_are_never_deleted() {
    let web = FakeWeb::default()
      .with_page("https://x/PMC1", "<h1>Alpha Study</h1>")
      .with_page(
        "https://x/PMC1/erratum",
        "<p>This corrects the article <a href=\"/articles/PMC1\">x</a></p>",
      )
      .with_title("https://x/PMC1", "Alpha Study")
      .with_title("https://x/PMC1/erratum", "Correction: Alpha Study");

    let (kept, report) = run(
      &web,
      vec![
        row(0, "https://x/PMC1", Some("Alpha Study")),
        row(1, "https://x/PMC1/erratum", Some("Alpha Study")),
      ],
    );

    assert_eq!(kept, vec![0, 1]);

    let skipped = report
      .phase(Phase::Duplicate)
      .find(|decision| decision.row_index == 1)
      .unwrap();

    assert_eq!(skipped.action, Action::Skipped);
    assert_eq!(skipped.reason, "correction_page");
  }

  #[test]
  fn failures_and_gaps_keep_rows() {
    let web =
      FakeWeb::default().with_page("https://x/PMC3-b", "<p>no title</p>");

    let (kept, report) = run(
      &web,
      vec![
        row(0, "https://x/PMC3-a", Some("Gamma")),
        row(1, "https://x/PMC3-b", Some("Gamma")),
        row(2, "https://x/PMC3-c", None),
      ],
    );

    assert_eq!(kept, vec![0, 1, 2]);

    let outcomes = report
      .phase(Phase::Duplicate)
      .map(|decision| {
        (decision.row_index, decision.action, decision.reason.as_str())
      })
      .collect::<Vec<_>>();

    assert_eq!(
      outcomes,
      vec![
        (0, Action::Error, "fetch_failed"),
        (1, Action::Error, "title_fetch_failed"),
        (2, Action::Skipped, "missing_data"),
      ]
    );
    assert_eq!(report.counts.fetch_failures, 1);
    assert_eq!(
      report.decisions[0].evidence.status.as_deref(),
      Some("err:status 404")
    );
  }

  #[test]
  fn groups_are_visited_in_identifier_order() {
    let web = FakeWeb::default();

    let (_, report) = run(
      &web,
      vec![
        row(0, "https://x/PMC9", Some("a")),
        row(1, "https://x/pmc2", Some("b")),
        row(2, "https://x/PMC9?v=2", Some("c")),
        row(3, "https://x/PMC2/", Some("d")),
      ],
    );

    assert_eq!(
      report
        .decisions
        .iter()
        .map(|decision| decision.row_index)
        .collect::<Vec<_>>(),
      vec![1, 3, 0, 2]
    );
    assert_eq!(report.counts.duplicate_groups, 2);
  }

  #[test]
  fn inventory_lists_groups_even_when_every_row_fails() {
    let web = FakeWeb::default();

    let (kept, report) = run(
      &web,
      vec![
        row(0, "https://x/PMC5", Some("a")),
        row(1, "https://x/PMC8", Some("b")),
        row(2, "https://x/pmc5/v2", Some("c")),
        row(3, "https://x/PMC6", Some("d")),
      ],
    );

    assert_eq!(kept, vec![0, 1, 2, 3]);
    assert_eq!(report.counts.unique_identifiers, 3);
    assert_eq!(report.counts.duplicate_groups, 1);
    assert_eq!(report.note, None);
    assert_eq!(
      report.duplicate_groups,
      vec![DuplicateGroup {
        identifier: Identifier::extract("PMC5", ExtractionMode::First)
          .unwrap(),
        rows: vec![0, 2],
        urls: vec!["https://x/PMC5".into(), "https://x/pmc5/v2".into()],
      }]
    );
    assert!(
      report
        .phase(Phase::Duplicate)
        .all(|decision| decision.action == Action::Error)
    );
  }
}
