//! Deck assembly and the flat-file sinks.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use crate::cedict::Entry;
use crate::corpus::HanziCounter;
use crate::pinyin;

/// Entries whose simplified form made the frequency cut, most frequent
/// character first. The sort is stable, so entries tied on count keep their
/// dictionary order.
pub fn assemble(entries: Vec<Entry>, top: &HashMap<char, u64>) -> Vec<Entry> {
  let mut rv: Vec<Entry> =
    entries.into_iter().filter(|ent| top.contains_key(&ent.simp)).collect();
  rv.sort_by_key(|ent| Reverse(top[&ent.simp]));
  rv
}

/// One flashcard record: decoded pinyin and gloss, a tab, then the hanzi
/// (both forms, comma separated, when they differ).
pub fn format_line(ent: &Entry) -> Result<String, pinyin::DecodeError> {
  let mut rv = format!("{}, {}\t", pinyin::decode(&ent.pinyin)?, ent.gloss);
  if ent.simp == ent.trad {
    rv.push(ent.simp);
  } else {
    rv.push(ent.trad);
    rv.push_str(", ");
    rv.push(ent.simp);
  }
  Ok(rv)
}

/// Write the deck, BOM first so spreadsheet importers detect UTF-8. Returns
/// the number of lines written; a pinyin decode failure aborts the run.
pub fn write_deck(path: &Path, entries: &[Entry]) -> anyhow::Result<usize> {
  let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
  let mut out = BufWriter::new(file);
  out.write_all("\u{feff}".as_bytes())?;
  let mut written = 0usize;
  for ent in entries {
    let line =
      format_line(ent).with_context(|| format!("decoding pinyin for {}", ent.simp))?;
    log::debug!("{} {:?}", written, line);
    writeln!(out, "{}", line)?;
    written += 1;
  }
  out.flush()?;
  Ok(written)
}

/// The alternate run mode: every counted character with rank and count,
/// most frequent first.
pub fn write_frequency_report(path: &Path, counter: &HanziCounter) -> anyhow::Result<usize> {
  let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
  let mut out = BufWriter::new(file);
  let mut written = 0usize;
  for (rank, (hanzi, count)) in counter.most_common().into_iter().enumerate() {
    writeln!(out, "{}. {} {}", rank + 1, hanzi, count)?;
    written += 1;
  }
  out.flush()?;
  Ok(written)
}
