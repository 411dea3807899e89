use super::*;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(340);

pub const DEFAULT_METADATA_ENDPOINT: &str =
  "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

pub const DEFAULT_ORIGIN: &str = "https://pmc.ncbi.nlm.nih.gov";

pub const DEFAULT_TITLE_THRESHOLD: f64 = 0.90;

pub const DEFAULT_USER_AGENT: &str =
  "Mozilla/5.0 (compatible; PMC-Link-Fixer/1.4)";

#[derive(Debug, Clone)]
pub struct RelinkOptions {
  pub api_key: Option<String>,
  pub delay: Duration,
  pub dry_run: bool,
  pub metadata_endpoint: Url,
  pub metadata_timeout: Duration,
  pub origin: Url,
  pub ranking: Ranking,
  pub request_timeout: Duration,
  pub title_threshold: f64,
  pub user_agent: String,
}

impl Default for RelinkOptions {
  fn default() -> Self {
    Self {
      api_key: None,
      delay: DEFAULT_DELAY,
      dry_run: true,
      metadata_endpoint: Url::parse(DEFAULT_METADATA_ENDPOINT).unwrap(),
      metadata_timeout: Duration::from_secs(30),
      origin: Url::parse(DEFAULT_ORIGIN).unwrap(),
      ranking: Ranking::default(),
      request_timeout: Duration::from_secs(20),
      title_threshold: DEFAULT_TITLE_THRESHOLD,
      user_agent: DEFAULT_USER_AGENT.to_string(),
    }
  }
}

impl RelinkOptions {
  #[must_use]
  pub fn builder() -> RelinkOptionsBuilder {
    RelinkOptionsBuilder::default()
  }

  pub(crate) fn validate(&self) -> Result {
    if !(0.0..=1.0).contains(&self.title_threshold) {
      return Err(Error::InvalidThreshold(self.title_threshold));
    }

    Ok(())
  }
}

#[derive(Default)]
pub struct RelinkOptionsBuilder {
  inner: RelinkOptions,
}

impl RelinkOptionsBuilder {
  #[must_use]
  pub fn api_key(self, api_key: Option<String>) -> Self {
    Self {
      inner: RelinkOptions {
        api_key,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn build(self) -> RelinkOptions {
    self.inner
  }

  #[must_use]
  pub fn delay(self, delay: Duration) -> Self {
    Self {
      inner: RelinkOptions {
        delay,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn dry_run(self, dry_run: bool) -> Self {
    Self {
      inner: RelinkOptions {
        dry_run,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn metadata_endpoint(self, metadata_endpoint: Url) -> Self {
    Self {
      inner: RelinkOptions {
        metadata_endpoint,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn origin(self, origin: Url) -> Self {
    Self {
      inner: RelinkOptions {
        origin,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn ranking(self, ranking: Ranking) -> Self {
    Self {
      inner: RelinkOptions {
        ranking,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn request_timeout(self, request_timeout: Duration) -> Self {
    Self {
      inner: RelinkOptions {
        request_timeout,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn title_threshold(self, title_threshold: f64) -> Self {
    Self {
      inner: RelinkOptions {
        title_threshold,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
    Self {
      inner: RelinkOptions {
        user_agent: user_agent.into(),
        ..self.inner
      },
    }
  }
}
