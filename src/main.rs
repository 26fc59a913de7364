use clap::clap_app;
use std::fs::File;
use std::io;
use std::io::{Read, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use zip::read::ZipArchive;

use classinline::transform;
use classinline::transform::{Bytes, Config, Error};

fn read_boxed<T: Read>(mut reader: T) -> io::Result<Bytes> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf.into_boxed_slice())
}

fn load_input(out: &mut Vec<Bytes>, path: &Path) -> Result<(), Error> {
    let file = File::open(path)?;
    let ext = path.extension();
    if ext == Some("class".as_ref()) {
        out.push(read_boxed(file)?);
        return Ok(());
    }
    let mut zip = ZipArchive::new(file)?;
    for index in 0..zip.len() {
        let zfile = zip.by_index(index)?;
        if zfile.name().ends_with(".class") {
            out.push(read_boxed(zfile)?);
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<Config, Error> {
    let ext = path.extension();
    if ext == Some("class".as_ref()) || ext == Some("jar".as_ref()) {
        return Ok(Config::new(path.to_owned()));
    }
    let file = File::open(path)?;
    let data = read_boxed(file)?;
    Ok(toml::from_slice(&data)?)
}

fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let matches = clap_app!(classinline =>
        (about: "Reports which field accessors can be inlined; class files are not rewritten")
        (@arg input: +required "Input class, jar or config")
        (@arg output: "Report file name")
        (@arg mode: --mode +takes_value "Classification mode: snapshot or progressive")
        (@arg strict: --strict "Treat unresolved ancestors as overriding every method")
    )
    .get_matches();
    let cfgname = matches.value_of_os("input").ok_or_else(|| Error::Usage("missing input".into()))?;
    let mut config = load_config(Path::new(cfgname))?;
    if let Some(mode) = matches.value_of("mode") {
        config.mode = mode.parse().map_err(Error::Usage)?;
    }
    config.strict |= matches.is_present("strict");
    let mut data = Vec::new();
    for name in &config.inputs {
        load_input(&mut data, name)?;
    }
    let mut platform = Vec::new();
    for name in &config.platform {
        load_input(&mut platform, name)?;
    }
    let (_, report) = transform::transform_files(data, platform, &config)?;
    let text = toml::to_string(&report)?;
    match matches.value_of_os("output") {
        Some(path) => File::create(path)?.write_all(text.as_bytes())?,
        None => io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}
