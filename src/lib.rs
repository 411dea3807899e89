use {
  context::Context,
  document::Document,
  pipeline::Pipeline,
  report::{NOTE_NO_DUPLICATES, REASON_FETCH_FAILED, REASON_NO_VALID_ANCHOR},
  regex::Regex,
  scraper::{ElementRef, Html, Node, Selector},
  serde::{Deserialize, Serialize},
  stage::{CorrectLinksStage, DeduplicateStage, Stage},
  std::{
    collections::{BTreeMap, HashSet},
    fmt::{self, Display, Formatter},
    fs, mem,
    path::{Path, PathBuf},
    sync::LazyLock,
    thread,
    time::Duration,
  },
  tracing::{debug, info, warn},
  url::Url,
};

pub use crate::{
  catalog::{Catalog, CatalogRow},
  error::Error,
  fetch::{Fetch, FetchError, HttpClient, TitleLookup},
  identifier::{ExtractionMode, Identifier, reference_identifiers},
  locator::{MARKER_PHRASE, find_marker_elements, page_contains_marker},
  node::MarkupNode,
  options::{
    DEFAULT_DELAY, DEFAULT_METADATA_ENDPOINT, DEFAULT_ORIGIN,
    DEFAULT_TITLE_THRESHOLD, DEFAULT_USER_AGENT, RelinkOptions,
    RelinkOptionsBuilder,
  },
  relink::Relink,
  report::{
    Action, Counts, Decision, DuplicateGroup, Evidence, Phase, Report, Summary,
  },
  resolver::{Location, Ranking, Resolution, Resolver, normalize_url},
  title::{normalize, similarity, titles_similar},
};

mod catalog;
mod context;
mod document;
mod error;
mod fetch;
mod identifier;
mod locator;
mod metadata;
mod node;
mod options;
mod pipeline;
mod re;
mod relink;
mod report;
mod resolver;
mod stage;
mod title;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
