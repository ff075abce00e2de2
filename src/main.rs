//! Build hanzi flashcard decks from CC-CEDICT and a text corpus.
//!
//! The default run downloads (or reuses) the gzipped CC-CEDICT export, ranks
//! every character found in corpus/*.txt by frequency, and writes one
//! flashcard line per single-hanzi dictionary entry whose character made the
//! cut. With -f it writes a character frequency report instead.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use getopts::Options;

mod cedict;
mod corpus;
mod flashcards;
mod pinyin;

enum Mode {
  Flashcards,
  FrequencyReport,
}

struct Config {
  mode: Mode,
  corpus_dir: PathBuf,
  dict_cache: PathBuf,
  output: PathBuf,
  max_hanzi: usize,
}

fn usage(program: &str, opts: &Options) -> String {
  opts.usage(&format!("Usage: {} [options]", program))
}

/// None means help was printed and there is nothing to run.
fn parse_args(args: &[String]) -> anyhow::Result<Option<Config>> {
  let mut opts = Options::new();
  opts.optflag("f", "frequency", "write a character frequency report instead of flashcards");
  opts.optopt("c", "corpus", "corpus directory (default: corpus)", "DIR");
  opts.optopt("d", "dict", "dictionary cache path (default: dict.txt.gz)", "FILE");
  opts.optopt(
    "n",
    "max-hanzi",
    &format!("frequency cap on deck size (default: {})", corpus::FLASHCARD_HANZI_MAX),
    "N",
  );
  opts.optopt("o", "output", "output path (default: flashcards.txt / hanzi_frequency.txt)", "FILE");
  opts.optflag("h", "help", "print this help");

  let matches = match opts.parse(&args[1..]) {
    Ok(m) => m,
    Err(e) => bail!("{}\n{}", e, usage(&args[0], &opts)),
  };
  if matches.opt_present("h") {
    print!("{}", usage(&args[0], &opts));
    return Ok(None);
  }

  let mode = if matches.opt_present("f") { Mode::FrequencyReport } else { Mode::Flashcards };
  let max_hanzi = match matches.opt_str("n") {
    Some(s) => s.parse().map_err(|_| anyhow!("-n expects a number, got {:?}", s))?,
    None => corpus::FLASHCARD_HANZI_MAX,
  };
  let output = matches.opt_str("o").map(PathBuf::from).unwrap_or_else(|| {
    PathBuf::from(match mode {
      Mode::Flashcards => "flashcards.txt",
      Mode::FrequencyReport => "hanzi_frequency.txt",
    })
  });
  Ok(Some(Config {
    mode,
    corpus_dir: matches.opt_str("c").map_or_else(|| PathBuf::from("corpus"), PathBuf::from),
    dict_cache: matches.opt_str("d").map_or_else(|| PathBuf::from("dict.txt.gz"), PathBuf::from),
    output,
    max_hanzi,
  }))
}

fn run(config: &Config) -> anyhow::Result<()> {
  let mut counter = corpus::HanziCounter::new();
  corpus::scan_corpus(&config.corpus_dir, &mut counter)?;
  if counter.is_empty() {
    log::warn!("empty corpus: the output will have no entries");
  }

  match config.mode {
    Mode::FrequencyReport => {
      let written = flashcards::write_frequency_report(&config.output, &counter)?;
      println!("Wrote {} lines to {}", written, config.output.display());
    }
    Mode::Flashcards => {
      cedict::download(&config.dict_cache)?;
      let entries = cedict::read_entries(&config.dict_cache)?;
      let deck = flashcards::assemble(entries, &counter.top(config.max_hanzi));
      let written = flashcards::write_deck(&config.output, &deck)?;
      println!("Wrote {} entries to {}", written, config.output.display());
    }
  }
  Ok(())
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let args: Vec<String> = env::args().collect();
  match parse_args(&args)? {
    Some(config) => run(&config),
    None => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(list: &[&str]) -> Vec<String> {
    let mut rv = vec!["hanzi_flashcards".to_string()];
    rv.extend(list.iter().map(|s| s.to_string()));
    rv
  }

  #[test]
  fn defaults_select_flashcard_mode() {
    let config = parse_args(&args(&[])).unwrap().unwrap();
    assert!(matches!(config.mode, Mode::Flashcards));
    assert_eq!(config.output, PathBuf::from("flashcards.txt"));
    assert_eq!(config.corpus_dir, PathBuf::from("corpus"));
    assert_eq!(config.dict_cache, PathBuf::from("dict.txt.gz"));
    assert_eq!(config.max_hanzi, corpus::FLASHCARD_HANZI_MAX);
  }

  #[test]
  fn frequency_flag_switches_mode_and_default_output() {
    let config = parse_args(&args(&["-f"])).unwrap().unwrap();
    assert!(matches!(config.mode, Mode::FrequencyReport));
    assert_eq!(config.output, PathBuf::from("hanzi_frequency.txt"));
  }

  #[test]
  fn options_override_defaults() {
    let config =
      parse_args(&args(&["-c", "texts", "-n", "100", "-o", "out.txt"])).unwrap().unwrap();
    assert_eq!(config.corpus_dir, PathBuf::from("texts"));
    assert_eq!(config.max_hanzi, 100);
    assert_eq!(config.output, PathBuf::from("out.txt"));
  }

  #[test]
  fn help_short_circuits() {
    assert!(parse_args(&args(&["-h"])).unwrap().is_none());
  }

  #[test]
  fn bad_cap_is_rejected() {
    assert!(parse_args(&args(&["-n", "lots"])).is_err());
  }
}
