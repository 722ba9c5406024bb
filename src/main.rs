//! `warcit`: convert local directories, files and zip archives into WARC
//! files.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use warcit_config::{Config, ExistingPolicy, error::Result as ConfigResult, parse_names, parse_overrides};
use warcit_convert::Converter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL prefix prepended to every resource path
    url_prefix: String,
    /// Directories, files, zip archives or paths inside zip archives
    /// (`site.zip/www.example.com/`)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file name; `.warc`/`.warc.gz` is appended if missing
    #[arg(short, long)]
    name: Option<String>,
    /// Directory to write the output file into
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Append to an existing output file
    #[arg(short, long, conflicts_with = "overwrite")]
    append: bool,
    /// Overwrite an existing output file
    #[arg(short, long)]
    overwrite: bool,
    /// Write uncompressed records
    #[arg(long)]
    no_gzip: bool,
    /// Do not write a leading warcinfo record
    #[arg(long)]
    no_warcinfo: bool,
    /// Do not sniff content to determine mime types
    #[arg(long)]
    no_magic: bool,
    /// Use this timestamp (`2010-12-26T10:11:12` or `20101226101112`) for
    /// every record
    #[arg(short = 'd', long = "fixed-dt")]
    fixed_dt: Option<String>,
    /// Comma-separated index file names; empty disables directory aliases
    #[arg(long)]
    index_files: Option<String>,
    /// Comma-separated `GLOB=MIME` rules, matched against the full source path
    #[arg(long)]
    mime_overrides: Vec<String>,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Report every record written
    #[arg(short, long)]
    verbose: bool,
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, env = "WARCIT_CONFIG")]
    config: Option<PathBuf>,
}
impl Args {
    fn level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::ERROR,
            (_, true) => Level::DEBUG,
            _ => Level::INFO,
        }
    }

    /// Layer command-line flags over the loaded configuration.
    fn apply(&self, config: &mut Config) -> ConfigResult<()> {
        if let Some(name) = &self.name {
            config.name = Some(name.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if self.append {
            config.existing = ExistingPolicy::Append;
        }
        if self.overwrite {
            config.existing = ExistingPolicy::Overwrite;
        }
        config.gzip &= !self.no_gzip;
        config.warcinfo &= !self.no_warcinfo;
        config.magic &= !self.no_magic;
        if let Some(date) = &self.fixed_dt {
            config.fixed_date = Some(date.clone());
        }
        if let Some(names) = &self.index_files {
            config.index_files = parse_names(names);
        }
        if !self.mime_overrides.is_empty() {
            let mut rules = Vec::new();
            for list in &self.mime_overrides {
                rules.extend(parse_overrides(list)?);
            }
            config.mime_overrides = rules;
        }
        Ok(())
    }

    /// Whether several inputs would all be written to the one named output.
    fn shares_named_output(&self, config: &Config) -> bool {
        config.name.is_some() && self.inputs.len() > 1
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_max_level(args.level())
        .init();

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", *err);
            tracing::debug!("{err:?}");
            return ExitCode::FAILURE;
        },
    };
    if let Err(err) = args.apply(&mut config) {
        tracing::error!("{}", *err);
        return ExitCode::FAILURE;
    }
    if args.shares_named_output(&config) {
        tracing::error!("An output name can only be used with a single input, {} given", args.inputs.len());
        return ExitCode::FAILURE;
    }

    let converter = Converter::new(config);
    let mut status = ExitCode::SUCCESS;
    for input in &args.inputs {
        if let Err(err) = converter.run(&args.url_prefix, input) {
            tracing::error!("{}", *err);
            tracing::debug!("{err:?}");
            if err.is_fatal() {
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
