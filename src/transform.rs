use serde_derive::Deserialize;
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;
use zip::result::ZipError;

use crate::ir::class::ClassMap;
use crate::ir::module::Member;
use crate::ir::platform::ClassPath;
use crate::parser;
use crate::parser::ParseError;
use crate::pass::inline_fields;
use crate::pass::inline_fields::{Mode, Options, Report};

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub platform: Vec<PathBuf>,
    pub mode: Mode,
    pub strict: bool,
    pub keep: BTreeSet<Member>,
}

pub type Bytes = Box<[u8]>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("cannot read archive: {0}")]
    Zip(#[from] ZipError),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("cannot write report: {0}")]
    Report(#[from] toml::ser::Error),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Usage(String),
}

impl Config {
    pub fn new(path: PathBuf) -> Config {
        Config {
            inputs: vec![path],
            ..Config::default()
        }
    }

    pub fn options(&self) -> Options {
        Options {
            mode: self.mode,
            strict: self.strict,
            keep: self.keep.clone(),
        }
    }
}

pub fn transform_files(data: Vec<Bytes>, platform: Vec<Bytes>, config: &Config) -> Result<(ClassMap, Report), Error> {
    let mut classes = ClassMap::new();
    for buf in data {
        let (name, parsed) = parser::parse(&buf)?;
        if classes.contains_key(&name) {
            warn!(class = %name, "duplicate class in input, keeping the first");
            continue;
        }
        let class = parser::transform(parsed)?;
        classes.insert(name, class);
    }
    let mut path = ClassPath::defaults();
    for buf in platform {
        let (name, parsed) = parser::parse(&buf)?;
        let (_, header) = parser::header(parsed)?;
        path.insert(name, header);
    }
    let report = inline_fields::apply(&mut classes, &path, &config.options());
    Ok((classes, report))
}
