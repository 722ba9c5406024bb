//! One conversion run: input target in, WARC file out.

use crate::dedup::{DedupTable, DigestEntry, RecordDecision};
use crate::error::{ErrorKind, Result};
use crate::mime::{MagicSniffer, MimeResolver, Sniffer};
use crate::url::UrlMapper;
use exn::{OptionExt, ResultExt};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};
use tracing::instrument;
use warcit_compress::Compression;
use warcit_config::{Config, ExistingPolicy};
use warcit_warc::date::WarcDate;
use warcit_warc::{PayloadDigest, RecordId, RecordWriter, RefersTo, Sha1Base32, WarcRecord};

const SOFTWARE: &str = concat!("warcit ", env!("CARGO_PKG_VERSION"));
const FORMAT: &str = "WARC File Format 1.0";

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunResult {
    /// Non-`warcinfo` records appended; an index file and its directory alias
    /// count as two.
    pub written: usize,
    pub output: PathBuf,
}

/// Converts input targets into WARC files according to a [`Config`].
///
/// Every call to [`run`](Self::run) starts with fresh deduplication state.
pub struct Converter {
    config: Config,
    sniffer: Box<dyn Sniffer>,
    digester: Box<dyn PayloadDigest>,
}
impl Converter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sniffer: Box::new(MagicSniffer),
            digester: Box::new(Sha1Base32),
        }
    }

    /// Replace the built-in magic-byte sniffer. Ignored when sniffing is
    /// disabled in the configuration.
    pub fn with_sniffer(mut self, sniffer: impl Sniffer + 'static) -> Self {
        self.sniffer = Box::new(sniffer);
        self
    }

    pub fn with_digester(mut self, digester: impl PayloadDigest + 'static) -> Self {
        self.digester = Box::new(digester);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert everything `input` resolves to into records under `prefix`.
    ///
    /// # Errors
    ///
    /// - [`InvalidInputPath`](ErrorKind::InvalidInputPath) if `input` does not
    ///   resolve; no output file is created.
    /// - [`OutputExists`](ErrorKind::OutputExists) if the output file exists
    ///   under the `error` policy; the file is left untouched.
    /// - [`Source`](ErrorKind::Source) or [`Write`](ErrorKind::Write) on I/O
    ///   failure mid-run, which may leave a truncated trailing record.
    #[instrument(skip(self), fields(output, written))]
    pub fn run(&self, prefix: &str, input: &str) -> Result<RunResult> {
        let mut source =
            warcit_source::resolve(input).or_raise(|| ErrorKind::InvalidInputPath(input.to_string()))?;
        let resources = source.list().or_raise(|| ErrorKind::Source)?;
        tracing::debug!(source = source.name(), count = resources.len(), "Enumerated resources");

        let mime = MimeResolver::new(&self.config.mime_overrides, self.config.magic.then_some(&*self.sniffer))?;
        let mapper = UrlMapper::new(prefix, &self.config.index_files);
        let fixed_date = self.fixed_date()?;
        let compression = self.config.compression();

        let output = self.output_path(input, compression)?;
        tracing::Span::current().record("output", tracing::field::display(output.display()));
        let file = self.open_output(&output, compression)?;
        let mut writer = RecordWriter::new(BufWriter::new(file), compression);

        if self.config.warcinfo {
            let record = WarcRecord::Warcinfo {
                record_id: RecordId::new(),
                date: fixed_date.unwrap_or_else(WarcDate::now),
                filename: output.file_name().map(|name| name.to_string_lossy().into_owned()),
                fields: vec![
                    ("software".to_string(), SOFTWARE.to_string()),
                    ("format".to_string(), FORMAT.to_string()),
                    ("source".to_string(), input.to_string()),
                    ("url-prefix".to_string(), mapper.prefix().to_string()),
                ],
            };
            writer.write(&record).or_raise(|| ErrorKind::Write)?;
        }

        let mut table = DedupTable::new();
        let mut written = 0;
        for resource in &resources {
            let payload = source.read(resource).or_raise(|| ErrorKind::Source)?;
            let date = fixed_date.unwrap_or_else(|| WarcDate::from(resource.modified));
            let digest = self.digester.digest(&payload);
            let target_uri = mapper.map(&resource.relative_path);
            let alias = mapper.alias(&resource.relative_path);

            let record = match table.classify(&digest, &target_uri, date) {
                RecordDecision::Emit(entry) => {
                    tracing::debug!("Writing {target_uri} at {date} from {}", resource.source_path);
                    WarcRecord::Content {
                        record_id: entry.record_id,
                        content_type: mime.resolve(resource, &payload),
                        target_uri,
                        date,
                        digest: digest.clone(),
                        payload,
                    }
                },
                RecordDecision::Refer(entry) => revisit(target_uri, date, &digest, entry),
            };
            writer.write(&record).or_raise(|| ErrorKind::Write)?;
            written += 1;

            if let Some(alias) = alias {
                // The payload was registered just above, so this always refers back.
                let (RecordDecision::Refer(entry) | RecordDecision::Emit(entry)) = table.classify(&digest, &alias, date);
                writer.write(&revisit(alias, date, &digest, entry)).or_raise(|| ErrorKind::Write)?;
                written += 1;
            }
        }
        writer.finish().or_raise(|| ErrorKind::Write)?;

        tracing::Span::current().record("written", written);
        tracing::info!("Wrote {written} resources to {}", output.display());
        Ok(RunResult { written, output })
    }

    fn fixed_date(&self) -> Result<Option<WarcDate>> {
        self.config
            .fixed_date
            .as_deref()
            .map(str::parse::<WarcDate>)
            .transpose()
            .or_raise(|| ErrorKind::InvalidConfig("fixed date must look like 2010-12-26T10:11:12".to_string()))
    }

    /// Explicit name, or the input's last path component, with the `.warc`
    /// suffix for `compression` completed; placed in the output directory.
    fn output_path(&self, input: &str, compression: Compression) -> Result<PathBuf> {
        let name = match &self.config.name {
            Some(name) => name.clone(),
            None => derive_name(input)?,
        };
        let name = complete_suffix(&name, compression);
        Ok(match &self.config.output_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        })
    }

    fn open_output(&self, path: &Path, compression: Compression) -> Result<File> {
        let mut options = OpenOptions::new();
        match self.config.existing {
            ExistingPolicy::Error => options.write(true).create_new(true),
            ExistingPolicy::Append => {
                check_append_target(path, compression);
                options.append(true).create(true)
            },
            ExistingPolicy::Overwrite => options.write(true).create(true).truncate(true),
        };
        let opened = options.open(path);
        if let Err(err) = &opened
            && err.kind() == std::io::ErrorKind::AlreadyExists
        {
            exn::bail!(ErrorKind::OutputExists(path.to_path_buf()));
        }
        opened.or_raise(|| ErrorKind::Write)
    }
}

fn revisit(target_uri: String, date: WarcDate, digest: &str, original: DigestEntry) -> WarcRecord {
    tracing::debug!("Writing revisit {target_uri} -> {}", original.target_uri);
    WarcRecord::Revisit {
        record_id: RecordId::new(),
        target_uri,
        date,
        digest: digest.to_string(),
        refers_to: RefersTo {
            record_id: Some(original.record_id),
            target_uri: original.target_uri,
            date: original.date,
        },
    }
}

fn derive_name(input: &str) -> Result<String> {
    let path = Path::new(input);
    if let Some(name) = path.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }
    // `.`, `..` and friends name nothing until made absolute.
    path.canonicalize()
        .ok()
        .and_then(|absolute| absolute.file_name().map(|name| name.to_string_lossy().into_owned()))
        .ok_or_raise(|| {
            ErrorKind::InvalidConfig(format!("cannot derive an output name from \"{input}\", set one explicitly"))
        })
}

fn complete_suffix(name: &str, compression: Compression) -> String {
    let full = format!(".warc{}", compression.extension());
    if name.ends_with(&full) {
        name.to_string()
    } else if name.ends_with(".warc") {
        format!("{name}{}", compression.extension())
    } else {
        format!("{name}{full}")
    }
}

/// Warn when the file about to be appended to does not start the way records
/// in the chosen compression mode would.
fn check_append_target(path: &Path, compression: Compression) {
    let mut head = [0u8; 2];
    let Ok(read) = File::open(path).and_then(|mut file| file.read(&mut head)) else {
        return;
    };
    if read > 0 && !compression.check_magic_bytes(&head[..read]) {
        tracing::warn!(
            path = %path.display(),
            expected = %compression,
            found = %Compression::from_magic_bytes(&head[..read]),
            "Appending to a file with different compression"
        );
    }
}
