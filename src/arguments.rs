use super::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RankingArgument {
  PreferredPmc,
  FirstCandidate,
}

impl From<RankingArgument> for Ranking {
  fn from(ranking: RankingArgument) -> Self {
    match ranking {
      RankingArgument::PreferredPmc => Ranking::PreferredPmc,
      RankingArgument::FirstCandidate => Ranking::FirstCandidate,
    }
  }
}

#[derive(Parser)]
#[command(name = "relink")]
#[command(
  about = "Fix correction-notice links and stale duplicate rows in a catalog",
  long_about = None
)]
pub(crate) struct Arguments {
  #[arg(
    long,
    value_name = "SECONDS",
    default_value = "0.34",
    value_parser = parse_delay,
    help = "Pause after every request"
  )]
  delay: Duration,
  #[arg(
    long,
    conflicts_with = "write",
    help = "Only produce the report (default)"
  )]
  dry_run: bool,
  #[arg(
    short,
    long,
    value_name = "FILE",
    help = "Path to the catalog CSV to process"
  )]
  input: PathBuf,
  #[arg(
    long,
    env = "NCBI_API_KEY",
    hide_env_values = true,
    help = "API key for the NCBI metadata service"
  )]
  ncbi_api_key: Option<String>,
  #[arg(
    long,
    value_name = "URL",
    default_value = DEFAULT_ORIGIN,
    help = "Origin that root-relative links are resolved against"
  )]
  origin: Url,
  #[arg(
    short,
    long,
    value_name = "FILE",
    default_value = "fixed_output.csv",
    help = "Where to write the fixed catalog"
  )]
  output: PathBuf,
  #[arg(
    long,
    value_enum,
    default_value_t = RankingArgument::PreferredPmc,
    help = "How to choose between links found near a correction notice"
  )]
  ranking: RankingArgument,
  #[arg(
    long,
    value_name = "FILE",
    default_value = "change_report.json",
    help = "Where to write the JSON audit report"
  )]
  report: PathBuf,
  #[arg(
    long,
    value_name = "RATIO",
    default_value_t = DEFAULT_TITLE_THRESHOLD,
    value_parser = parse_threshold,
    help = "Minimum title similarity (0-1) for a duplicate row to be kept"
  )]
  title_threshold: f64,
  #[arg(
    short,
    long,
    action = ArgAction::Count,
    help = "Log more detail to stderr"
  )]
  verbose: u8,
  #[arg(long, help = "Write the fixed catalog to the output path")]
  write: bool,
}

impl Arguments {
  fn init_tracing(&self) {
    let level = match self.verbose {
      0 => "error",
      1 => "info",
      2 => "debug",
      _ => "trace",
    };

    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::try_from_default_env()
          .unwrap_or_else(|_| EnvFilter::new(level)),
      )
      .with_writer(io::stderr)
      .init();
  }

  fn options(&self) -> RelinkOptions {
    RelinkOptions::builder()
      .api_key(self.ncbi_api_key.clone())
      .delay(self.delay)
      .dry_run(self.dry_run || !self.write)
      .origin(self.origin.clone())
      .ranking(self.ranking.into())
      .title_threshold(self.title_threshold)
      .build()
  }

  pub(crate) fn run(self) -> Result {
    self.init_tracing();

    let mut catalog = Catalog::load(&self.input)?;

    let report = Relink::http(self.options())
      .context("failed to set up http client")?
      .run(&mut catalog, &self.output)?;

    report.write(&self.report)?;

    println!("Report summary:");
    println!("{}", serde_json::to_string_pretty(&report.summary())?);

    Ok(())
  }
}

fn parse_delay(value: &str) -> Result<Duration, String> {
  let seconds = value
    .parse::<f64>()
    .map_err(|error| format!("`{value}` is not a number: {error}"))?;

  Duration::try_from_secs_f64(seconds).map_err(|error| {
    format!("delay must be a non-negative number of seconds: {error}")
  })
}

fn parse_threshold(value: &str) -> Result<f64, String> {
  let threshold = value
    .parse::<f64>()
    .map_err(|error| format!("`{value}` is not a number: {error}"))?;

  if !(0.0..=1.0).contains(&threshold) {
    return Err(format!(
      "threshold must be between 0.0 and 1.0, got {threshold}"
    ));
  }

  Ok(threshold)
}
