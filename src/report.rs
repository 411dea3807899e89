use super::*;

pub(crate) const REASON_FETCH_FAILED: &str = "fetch_failed";

pub(crate) const REASON_NO_VALID_ANCHOR: &str = "phrase_found_no_valid_anchor";

pub(crate) const NOTE_NO_DUPLICATES: &str = "no_duplicate_identifiers_found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  Duplicate,
  Correction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
  Deleted,
  Corrected,
  Kept,
  Skipped,
  Error,
}

impl Display for Action {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Deleted => "deleted",
      Self::Corrected => "corrected",
      Self::Kept => "kept",
      Self::Skipped => "skipped",
      Self::Error => "error",
    })
  }
}

/// Whatever supported a decision; absent fields are omitted from the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub identifier: Option<Identifier>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub recorded_title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fetched_title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub similarity: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub threshold: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub corrected_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub found_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub snippet: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
}

/// One outcome for one row in one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
  pub phase: Phase,
  pub row_index: usize,
  pub original_url: Option<String>,
  pub action: Action,
  pub reason: String,
  #[serde(flatten)]
  pub evidence: Evidence,
}

impl Decision {
  pub(crate) fn new(
    phase: Phase,
    row: &CatalogRow,
    action: Action,
    reason: impl Into<String>,
  ) -> Self {
    Self {
      phase,
      row_index: row.index,
      original_url: row.link.clone(),
      action,
      reason: reason.into(),
      evidence: Evidence::default(),
    }
  }

  pub(crate) fn with_evidence(self, evidence: Evidence) -> Self {
    Self { evidence, ..self }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
  pub total_rows: usize,
  pub unique_identifiers: usize,
  pub duplicate_groups: usize,
  pub deletions: usize,
  pub corrections: usize,
  pub fetch_failures: usize,
  pub unresolved_phrases: usize,
  pub final_rows: usize,
}

/// Rows sharing one identifier, as found before any deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
  pub identifier: Identifier,
  pub rows: Vec<usize>,
  pub urls: Vec<String>,
}

/// The audit record of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
  pub input: PathBuf,
  pub output: PathBuf,
  pub dry_run: bool,
  pub url_column: String,
  pub title_column: Option<String>,
  pub title_threshold: f64,
  pub ranking: Ranking,
  pub counts: Counts,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
  #[serde(default)]
  pub duplicate_groups: Vec<DuplicateGroup>,
  pub decisions: Vec<Decision>,
}

/// The short form printed by the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
  pub input: PathBuf,
  pub output: PathBuf,
  pub dry_run: bool,
  pub url_column: String,
  pub title_column: Option<String>,
  #[serde(flatten)]
  pub counts: Counts,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
  pub duplicate_groups: Vec<DuplicateGroup>,
}

impl Report {
  pub(crate) fn new(
    catalog: &Catalog,
    output: &Path,
    options: &RelinkOptions,
  ) -> Self {
    Self {
      input: catalog.path().to_path_buf(),
      output: output.to_path_buf(),
      dry_run: options.dry_run,
      url_column: catalog.url_column().to_string(),
      title_column: catalog.title_column().map(str::to_string),
      title_threshold: options.title_threshold,
      ranking: options.ranking,
      counts: Counts {
        total_rows: catalog.rows().len(),
        ..Counts::default()
      },
      note: None,
      duplicate_groups: Vec::new(),
      decisions: Vec::new(),
    }
  }

  /// Decisions for one phase, in the order they were made.
  pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &Decision> {
    self
      .decisions
      .iter()
      .filter(move |decision| decision.phase == phase)
  }

  pub(crate) fn record(&mut self, decision: Decision) {
    let row = decision.row_index;
    let url = decision.original_url.as_deref().unwrap_or_default();
    let reason = decision.reason.as_str();

    match decision.action {
      Action::Deleted => {
        self.counts.deletions += 1;
        info!(row, url, reason, "deleted duplicate row");
      }
      Action::Corrected => {
        self.counts.corrections += 1;
        info!(
          row,
          url,
          corrected = decision.evidence.corrected_url.as_deref(),
          reason,
          "corrected link"
        );
      }
      Action::Error => {
        if decision.reason == REASON_FETCH_FAILED {
          self.counts.fetch_failures += 1;
        }

        warn!(
          row,
          url,
          reason,
          status = decision.evidence.status.as_deref(),
          "row failed"
        );
      }
      Action::Kept | Action::Skipped => {
        if decision.reason == REASON_NO_VALID_ANCHOR {
          self.counts.unresolved_phrases += 1;
        }

        debug!(row, url, action = %decision.action, reason);
      }
    }

    self.decisions.push(decision);
  }

  #[must_use]
  pub fn summary(&self) -> Summary {
    Summary {
      input: self.input.clone(),
      output: self.output.clone(),
      dry_run: self.dry_run,
      url_column: self.url_column.clone(),
      title_column: self.title_column.clone(),
      counts: self.counts,
      note: self.note.clone(),
      duplicate_groups: self.duplicate_groups.clone(),
    }
  }

  pub fn write(&self, path: &Path) -> Result {
    let json = serde_json::to_string_pretty(self)?;

    fs::write(path, json).map_err(|source| Error::ReportWrite {
      path: path.to_path_buf(),
      source,
    })
  }
}
