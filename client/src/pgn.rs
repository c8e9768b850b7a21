use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use common::FsExt;
use flate2::read::GzDecoder;
use log::info;
use replay::{GameRecord, PgnGames};
use serde::Serialize;

/// Reads every game of a PGN file. Files ending in `.gz` are decompressed on the fly.
pub fn read_records(path: &str) -> Result<Vec<GameRecord>> {
    let path = path.relative_to_cwd()?;
    let file = File::open(&path).with_context(|| format!("Failed to open PGN file {:?}", path))?;

    let reader: Box<dyn Read> = if path.is_gzip() {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let records = PgnGames::new(BufReader::new(reader))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Failed to read {:?}", path))?;

    info!("Read {} games from {:?}", records.len(), path);

    Ok(records)
}

/// Name of a cohort taken from its file name, without extensions.
pub fn cohort_name(path: &str) -> String {
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    match file_name.split_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    }
}

pub fn open_output(out: Option<&str>) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            let path = path.relative_to_cwd()?;
            let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn write_json_lines<'a, T, I>(writer: &mut dyn Write, values: I) -> Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut written = 0;
    for value in values {
        serde_json::to_writer(&mut *writer, value)?;
        writeln!(writer)?;
        written += 1;
    }

    writer.flush()?;

    Ok(written)
}
