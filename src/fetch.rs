use {super::*, reqwest::blocking::Client};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  #[error("status {0}")]
  Status(u16),
  #[error("{0}")]
  Transport(String),
}

impl FetchError {
  /// The `err:<detail>` form recorded in the report.
  #[must_use]
  pub fn status(&self) -> String {
    format!("err:{self}")
  }
}

/// Retrieves the markup behind a link.
pub trait Fetch {
  fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Looks up the authoritative title of the document behind a link.
pub trait TitleLookup {
  fn title(&self, url: &str) -> Option<String>;
}

/// Blocking HTTP collaborator. Every request, successful or not, is followed
/// by the configured pacing delay.
#[derive(Debug, Clone)]
pub struct HttpClient {
  api_key: Option<String>,
  client: Client,
  delay: Duration,
  metadata_endpoint: Url,
  metadata_timeout: Duration,
}

impl HttpClient {
  fn get(
    &self,
    request: reqwest::blocking::RequestBuilder,
  ) -> Result<String, FetchError> {
    let result = request
      .send()
      .map_err(|error| FetchError::Transport(error.to_string()))
      .and_then(|response| {
        let status = response.status();

        if !status.is_success() {
          return Err(FetchError::Status(status.as_u16()));
        }

        response
          .text()
          .map_err(|error| FetchError::Transport(error.to_string()))
      });

    if !self.delay.is_zero() {
      thread::sleep(self.delay);
    }

    result
  }

  fn metadata_xml(&self, identifier: &Identifier) -> Option<String> {
    let mut request = self
      .client
      .get(self.metadata_endpoint.clone())
      .timeout(self.metadata_timeout)
      .query(&[("db", "pmc"), ("id", identifier.as_str()), ("retmode", "xml")]);

    if let Some(api_key) = &self.api_key {
      request = request.query(&[("api_key", api_key.as_str())]);
    }

    match self.get(request) {
      Ok(xml) => Some(xml),
      Err(error) => {
        debug!(%identifier, %error, "metadata lookup failed");
        None
      }
    }
  }

  pub fn new(options: &RelinkOptions) -> Result<Self> {
    let client = Client::builder()
      .user_agent(options.user_agent.clone())
      .timeout(options.request_timeout)
      .build()?;

    Ok(Self {
      api_key: options.api_key.clone(),
      client,
      delay: options.delay,
      metadata_endpoint: options.metadata_endpoint.clone(),
      metadata_timeout: options.metadata_timeout,
    })
  }
}

impl Fetch for HttpClient {
  fn fetch(&self, url: &str) -> Result<String, FetchError> {
    debug!(url, "fetching");
    self.get(self.client.get(url))
  }
}

impl TitleLookup for HttpClient {
  fn title(&self, url: &str) -> Option<String> {
    if let Some(identifier) = Identifier::extract(url, ExtractionMode::First)
      && let Some(title) = self
        .metadata_xml(&identifier)
        .as_deref()
        .and_then(metadata::title_from_metadata_xml)
    {
      return Some(title);
    }

    self
      .fetch(url)
      .ok()
      .as_deref()
      .and_then(metadata::title_from_page)
  }
}
