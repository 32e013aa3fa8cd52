//! Streaming configuration loader with include recursion.
//!
//! Documents are traversed once with a streaming element reader and never
//! retained; every recognized element mutates the shared [`Config`] as it is
//! encountered. Element and attribute names are matched case-insensitively,
//! unrecognized elements are ignored, and `include` failures are reported and
//! counted without aborting the including document.
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};

use super::Config;
use super::record::FileRecord;
use crate::error::ConfigError;

/// Recursive document loader accumulating into a shared [`Config`].
///
/// Created per top-level [`Config::load`] call; the include chain it tracks
/// is what turns the original's unbounded include recursion into a reported
/// [`ConfigError::IncludeCycle`].
#[derive(Debug)]
pub(crate) struct Loader<'a> {
    config: &'a mut Config,
    /// Canonicalized paths of documents currently being loaded, outermost
    /// first.
    chain: Vec<PathBuf>,
}

impl<'a> Loader<'a> {
    pub(crate) fn new(config: &'a mut Config) -> Self {
        Self {
            config,
            chain: Vec::new(),
        }
    }

    /// Load one document, recursing into its includes.
    pub(crate) fn load(&mut self, path: &Path) -> Result<(), ConfigError> {
        // Canonicalization may fail for a document that does not exist; the
        // raw path still participates in cycle detection and the open call
        // below reports the real error.
        let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.chain.contains(&canonical) {
            return Err(ConfigError::IncludeCycle {
                path: path.to_path_buf(),
            });
        }

        self.chain.push(canonical);
        let result = self.load_document(path);
        self.chain.pop();
        result
    }

    fn load_document(&mut self, path: &Path) -> Result<(), ConfigError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        tracing::debug!("loading configuration document {}", path.display());

        let mut reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(element) | Event::Empty(element)) => {
                    self.element(path, &element)?;
                }
                Ok(Event::Eof) => break,
                // Text nodes, end elements, comments, and processing
                // instructions carry no configuration.
                Ok(_) => {}
                Err(err) => return Err(parse_error(path, &err)),
            }
            buf.clear();
        }
        Ok(())
    }

    fn element(&mut self, path: &Path, element: &BytesStart<'_>) -> Result<(), ConfigError> {
        let name = element.local_name();
        let name = name.as_ref();
        if name.eq_ignore_ascii_case(b"localvar") {
            self.localvar(path, element)
        } else if name.eq_ignore_ascii_case(b"file") {
            self.file_record(path, element)
        } else if name.eq_ignore_ascii_case(b"include") {
            self.include(path, element)
        } else {
            // Unrecognized elements are ignored for forward compatibility.
            Ok(())
        }
    }

    fn localvar(&mut self, path: &Path, element: &BytesStart<'_>) -> Result<(), ConfigError> {
        let mut name = String::new();
        let mut value = String::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|err| parse_error(path, &err))?;
            let key = attr.key.local_name();
            if key.as_ref().eq_ignore_ascii_case(b"name") {
                name = attr_text(path, &attr)?;
            } else if key.as_ref().eq_ignore_ascii_case(b"value") {
                value = attr_text(path, &attr)?;
            }
        }
        tracing::debug!("variable {name} = {value}");
        self.config.vars.declare_or_set(&name, &value);
        Ok(())
    }

    fn file_record(&mut self, path: &Path, element: &BytesStart<'_>) -> Result<(), ConfigError> {
        let mut record = FileRecord::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|err| parse_error(path, &err))?;
            let key = attr.key.local_name();
            if key.as_ref().eq_ignore_ascii_case(b"source") {
                record.source = attr_text(path, &attr)?;
            } else if key.as_ref().eq_ignore_ascii_case(b"target") {
                record.target = attr_text(path, &attr)?;
            } else if key.as_ref().eq_ignore_ascii_case(b"action") {
                record.action = attr_text(path, &attr)?;
            }
        }
        self.config.records.push(record);
        Ok(())
    }

    fn include(&mut self, path: &Path, element: &BytesStart<'_>) -> Result<(), ConfigError> {
        let mut file = None;
        for attr in element.attributes() {
            let attr = attr.map_err(|err| parse_error(path, &err))?;
            if attr.key.local_name().as_ref().eq_ignore_ascii_case(b"file") {
                file = Some(attr_text(path, &attr)?);
            }
        }

        if let Some(file) = file {
            // A failed include never aborts the including document; it is
            // reported here and reflected in the final exit status.
            if let Err(err) = self.load(&PathBuf::from(&file)) {
                tracing::error!("unable to load included configuration: {err}");
                self.config.note_load_failure();
            }
        }
        Ok(())
    }
}

fn attr_text(path: &Path, attr: &Attribute<'_>) -> Result<String, ConfigError> {
    attr.unescape_value()
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| parse_error(path, &err))
}

fn parse_error(path: &Path, err: &impl fmt::Display) -> ConfigError {
    ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
