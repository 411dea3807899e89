use {
  anyhow::Context,
  arguments::Arguments,
  clap::{ArgAction, Parser, ValueEnum},
  relink::{
    Catalog, DEFAULT_ORIGIN, DEFAULT_TITLE_THRESHOLD, Ranking, Relink,
    RelinkOptions,
  },
  std::{io, path::PathBuf, process, time::Duration},
  tracing_subscriber::EnvFilter,
  url::Url,
};

mod arguments;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn main() {
  if let Err(error) = Arguments::parse().run() {
    eprintln!("error: {error:#}");
    process::exit(1);
  }
}
