//! Character frequency over a directory of plain-text corpus files.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

/// Characters that would pollute the ranking: full-width punctuation, the
/// ideographic space, and 一, whose count as a numeral/particle dwarfs
/// everything else.
pub const IGNORED_CHARACTERS: [char; 10] =
  ['：', '”', '“', '\u{3000}', '一', '。', '，', '！', '、', '…'];

/// Default cap on how many distinct hanzi make it into a deck.
pub const FLASHCARD_HANZI_MAX: usize = 3500;

struct Tally {
  count: u64,
  first_seen: usize,
}

/// Occurrence counts for qualifying characters. Ties in `most_common` break
/// by first-encountered order, so the same corpus always ranks the same way.
pub struct HanziCounter {
  counts: HashMap<char, Tally>,
  ignored: Vec<char>,
}

impl HanziCounter {
  pub fn new() -> HanziCounter {
    HanziCounter::with_ignored(&IGNORED_CHARACTERS)
  }

  /// Tests inject their own ignore set through this.
  pub fn with_ignored(ignored: &[char]) -> HanziCounter {
    HanziCounter { counts: HashMap::new(), ignored: ignored.to_vec() }
  }

  /// A character counts iff it is outside the Latin-1 range (a coarse
  /// is-probably-hanzi filter) and not on the ignore list.
  fn qualifies(&self, c: char) -> bool {
    c as u32 > 256 && !self.ignored.contains(&c)
  }

  pub fn feed(&mut self, text: &str) {
    for c in text.chars() {
      if self.qualifies(c) {
        let next = self.counts.len();
        let tally = self.counts.entry(c).or_insert(Tally { count: 0, first_seen: next });
        tally.count += 1;
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  /// All counted characters, most frequent first.
  pub fn most_common(&self) -> Vec<(char, u64)> {
    let mut rv: Vec<(char, &Tally)> = self.counts.iter().map(|(&c, t)| (c, t)).collect();
    rv.sort_by_key(|&(_, t)| (Reverse(t.count), t.first_seen));
    rv.into_iter().map(|(c, t)| (c, t.count)).collect()
  }

  /// The `cap` most frequent characters, as the lookup map the deck joins
  /// against.
  pub fn top(&self, cap: usize) -> HashMap<char, u64> {
    self.most_common().into_iter().take(cap).collect()
  }
}

/// Feed every .txt file under `dir` through the counter, in sorted path
/// order. A missing or empty directory is a warning, not an error: the deck
/// just comes out empty. Returns the number of files read.
pub fn scan_corpus(dir: &Path, counter: &mut HanziCounter) -> anyhow::Result<usize> {
  if !dir.is_dir() {
    log::warn!("corpus directory {} not found", dir.display());
    return Ok(0);
  }
  let mut paths = Vec::new();
  for res in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
    let path = res?.path();
    if path.extension().map_or(false, |ext| ext == "txt") {
      paths.push(path);
    }
  }
  paths.sort();
  if paths.is_empty() {
    log::warn!("no .txt files under {}", dir.display());
  }
  for path in &paths {
    log::info!("Opening {}", path.display());
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    counter.feed(&text);
  }
  Ok(paths.len())
}
