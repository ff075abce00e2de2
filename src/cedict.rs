//! CC-CEDICT dictionary source: one-shot download with a local cache, gzip
//! line iteration, and the single-character entry parser.
//!
//! Dictionary lines look like
//!   你 你 [ni3] /you (informal, as opposed to courteous 您[nin2])/
//! Only single-hanzi headwords become entries; everything else is skipped as
//! expected noise in bulk dictionary data.

use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use flate2::read::GzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DICTIONARY_URL: &str =
  "http://www.mdbg.net/chindict/export/cedict/cedict_1_0_ts_utf-8_mdbg.txt.gz";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
  pub trad: char,
  pub simp: char,
  pub pinyin: String,
  pub gloss: String,
}

static ENTRY_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(\w) (\w) \[(.*)\] /(.*)/").unwrap());

/// Parse one raw dictionary line into a single-hanzi entry, or None for
/// anything that isn't one.
///
/// The headword substring before the first " [" must be exactly three scalar
/// values (hanzi, space, hanzi). Multi-character headwords are deliberately
/// excluded: the deck covers characters, not words. The gloss runs from the
/// first slash to the last, so it may itself contain slashes.
pub fn parse_line(line: &str) -> Option<Entry> {
  if !line.contains('[') {
    return None;
  }
  let head = line.split_once(" [").map_or(line, |(h, _)| h);
  if head.chars().count() != 3 {
    return None;
  }
  let cap = ENTRY_RE.captures(line)?;
  Some(Entry {
    trad: cap[1].chars().next()?,
    simp: cap[2].chars().next()?,
    pinyin: cap[3].to_string(),
    gloss: cap[4].to_string(),
  })
}

/// Fetch the dictionary once, keeping the compressed copy on disk. An
/// existing cache file short-circuits the fetch; a transport failure is fatal
/// for the run.
pub fn download(cache: &Path) -> anyhow::Result<()> {
  if cache.exists() {
    log::info!("Using cached dictionary at {}", cache.display());
    return Ok(());
  }
  log::info!("Downloading {}", DICTIONARY_URL);
  let resp = reqwest::blocking::get(DICTIONARY_URL)
    .and_then(|r| r.error_for_status())
    .with_context(|| format!("fetching {}", DICTIONARY_URL))?;
  let body = resp.bytes().context("reading dictionary response body")?;
  fs::write(cache, &body).with_context(|| format!("writing {}", cache.display()))?;
  Ok(())
}

/// Read every single-hanzi entry out of the gzipped dictionary cache, in
/// file order.
pub fn read_entries(cache: &Path) -> anyhow::Result<Vec<Entry>> {
  let file = File::open(cache).with_context(|| format!("opening {}", cache.display()))?;
  let reader = BufReader::new(GzDecoder::new(file));
  let mut rv = Vec::new();
  let mut skipped = 0usize;
  for line in reader.lines() {
    let line = line.context("reading dictionary line")?;
    match parse_line(&line) {
      Some(ent) => rv.push(ent),
      None => skipped += 1,
    }
  }
  log::debug!("{} dictionary lines skipped", skipped);
  log::info!("{} single-hanzi entries loaded", rv.len());
  Ok(rv)
}
