use super::*;

/// One catalog entry. Identity is `index`, its position in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
  pub index: usize,
  pub link: Option<String>,
  pub title: Option<String>,
  pub fields: Vec<String>,
}

/// A CSV catalog with its link column and optional title column detected.
#[derive(Debug, Clone)]
pub struct Catalog {
  headers: Vec<String>,
  path: PathBuf,
  rows: Vec<CatalogRow>,
  title_column: Option<usize>,
  url_column: usize,
}

impl Catalog {
  /// Builds a catalog from already-split records. The link column is the
  /// first one where any cell mentions `http`; the title column is the first
  /// header mentioning `title`.
  pub fn from_records(
    path: impl Into<PathBuf>,
    headers: Vec<String>,
    records: Vec<Vec<String>>,
  ) -> Result<Self> {
    let path = path.into();

    let Some(url_column) = (0..headers.len()).find(|&column| {
      records.iter().any(|record| {
        record
          .get(column)
          .is_some_and(|cell| cell.to_ascii_lowercase().contains("http"))
      })
    }) else {
      return Err(Error::MissingUrlColumn { path });
    };

    let title_column = headers
      .iter()
      .position(|header| header.to_lowercase().contains("title"));

    let rows = records
      .into_iter()
      .enumerate()
      .map(|(index, fields)| CatalogRow {
        index,
        link: cell(&fields, Some(url_column)),
        title: cell(&fields, title_column),
        fields,
      })
      .collect();

    Ok(Self {
      headers,
      path,
      rows,
      title_column,
      url_column,
    })
  }

  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Err(Error::InputNotFound {
        path: path.to_path_buf(),
      });
    }

    let read_error = |source| Error::CatalogRead {
      path: path.to_path_buf(),
      source,
    };

    let mut reader = csv::ReaderBuilder::new()
      .flexible(true)
      .from_path(path)
      .map_err(read_error)?;

    let headers = reader
      .headers()
      .map_err(read_error)?
      .iter()
      .map(str::to_string)
      .collect();

    let records = reader
      .records()
      .map(|record| {
        record.map(|record| record.iter().map(str::to_string).collect())
      })
      .collect::<Result<Vec<Vec<String>>, csv::Error>>()
      .map_err(read_error)?;

    Self::from_records(path, headers, records)
  }

  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }

  pub(crate) fn replace_rows(&mut self, rows: Vec<CatalogRow>) {
    self.rows = rows;
  }

  #[must_use]
  pub fn rows(&self) -> &[CatalogRow] {
    &self.rows
  }

  /// Writes headers and surviving rows, with each row's current link in the
  /// link column.
  pub fn save(&self, path: &Path) -> Result {
    let write_error = |source| Error::CatalogWrite {
      path: path.to_path_buf(),
      source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_error)?;

    writer.write_record(&self.headers).map_err(write_error)?;

    for row in &self.rows {
      let mut fields = row.fields.clone();

      if let Some(field) = fields.get_mut(self.url_column) {
        *field = row.link.clone().unwrap_or_default();
      }

      writer.write_record(&fields).map_err(write_error)?;
    }

    writer
      .flush()
      .map_err(|error| write_error(csv::Error::from(error)))
  }

  #[must_use]
  pub fn title_column(&self) -> Option<&str> {
    self
      .title_column
      .and_then(|column| self.headers.get(column))
      .map(String::as_str)
  }

  #[must_use]
  pub fn url_column(&self) -> &str {
    self
      .headers
      .get(self.url_column)
      .map(String::as_str)
      .unwrap_or_default()
  }
}

fn cell(fields: &[String], column: Option<usize>) -> Option<String> {
  column
    .and_then(|column| fields.get(column))
    .map(|value| value.trim())
    .filter(|value| !value.is_empty())
    .map(str::to_string)
}
