//! Numbered-tone pinyin to diacritic form: "ni3 hao3" becomes "nǐ hǎo".
//!
//! Each syllable ends at its tone digit. Digits 1-4 are consumed and applied
//! as a mark over the right vowel; 0 and 5 mean neutral tone and just end the
//! syllable. The keyboard shorthand "u:" becomes ü.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
  /// A ':' is only valid immediately after a 'u' (the ü shorthand). Anywhere
  /// else the field is malformed and the whole decode is abandoned rather
  /// than producing a corrupted card.
  #[error("stray ':' at character {pos}: no preceding 'u'")]
  StrayColon { pos: usize },
}

fn is_vowel(c: char) -> bool {
  matches!(c, 'a' | 'o' | 'e' | 'i' | 'u' | 'v' | 'ü')
}

fn toned_char(c: char, tone: usize) -> char {
  let data = [
    ['ā', 'á', 'ǎ', 'à', 'a'],
    ['ē', 'é', 'ě', 'è', 'e'],
    ['ī', 'í', 'ǐ', 'ì', 'i'],
    ['ō', 'ó', 'ǒ', 'ò', 'o'],
    ['ū', 'ú', 'ǔ', 'ù', 'u'],
    ['ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü'],
  ];

  // 'v' is the keyboard stand-in for 'ü'
  let plain = if c == 'v' { 'ü' } else { c };
  for row in data.iter() {
    if row[4] == plain {
      return row[tone - 1];
    }
  }
  c
}

/// First maximal run of vowel letters in the syllable buffer, as
/// (start, length) in chars.
fn vowel_run(syl: &[char]) -> Option<(usize, usize)> {
  let start = syl.iter().position(|&c| is_vowel(c))?;
  let len = syl[start..].iter().take_while(|&&c| is_vowel(c)).count();
  Some((start, len))
}

fn mark_every(syl: &mut [char], vowel: char, tone: usize) {
  for c in syl.iter_mut() {
    if *c == vowel {
      *c = toned_char(vowel, tone);
    }
  }
}

/// Apply a 1-4 tone to the buffered syllable.
///
/// A single-vowel run takes the mark directly. In longer runs "a" wins, then
/// "o", then "e"; a syllable ending in "ui" marks the "i" and one ending in
/// "iu" marks the "u". The two leftover cases keep the legacy behavior so
/// regenerated decks match old ones: no vowel at all appends the raw digit,
/// and a cluster no rule covers appends a literal '!'.
fn apply_tone(syl: &mut Vec<char>, tone: usize) {
  match vowel_run(syl) {
    None => syl.push((b'0' + tone as u8) as char),
    Some((start, 1)) => syl[start] = toned_char(syl[start], tone),
    Some(_) => {
      if syl.contains(&'a') {
        mark_every(syl, 'a', tone);
      } else if syl.contains(&'o') {
        mark_every(syl, 'o', tone);
      } else if syl.contains(&'e') {
        mark_every(syl, 'e', tone);
      } else if syl.ends_with(&['u', 'i']) {
        mark_every(syl, 'i', tone);
      } else if syl.ends_with(&['i', 'u']) {
        mark_every(syl, 'u', tone);
      } else {
        syl.push('!');
      }
    }
  }
}

/// Decode a whole pinyin field: any number of syllables, each optionally
/// terminated by a tone digit. Input is lower-cased. Characters that are not
/// letters, tone digits, or ':' (spaces, apostrophes) flush the current
/// syllable and pass through unchanged.
pub fn decode(raw: &str) -> Result<String, DecodeError> {
  let mut rv = String::new();
  let mut syl: Vec<char> = Vec::new();
  for (pos, c) in raw.to_lowercase().chars().enumerate() {
    match c {
      'a'..='z' | 'ü' => syl.push(c),
      ':' => {
        if syl.last() != Some(&'u') {
          return Err(DecodeError::StrayColon { pos });
        }
        syl.pop();
        syl.push('ü');
      }
      '0'..='5' => {
        let tone = (c as usize - '0' as usize) % 5;
        if tone != 0 {
          apply_tone(&mut syl, tone);
        }
        rv.extend(syl.drain(..));
      }
      _ => {
        rv.extend(syl.drain(..));
        rv.push(c);
      }
    }
  }
  rv.extend(syl.drain(..));
  Ok(rv)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_vowel_takes_the_mark() {
    assert_eq!(decode("ni3").unwrap(), "nǐ");
    assert_eq!(decode("ma1").unwrap(), "mā");
    assert_eq!(decode("le4").unwrap(), "lè");
    assert_eq!(decode("bu2").unwrap(), "bú");
  }

  #[test]
  fn umlaut_shorthand_matches_literal_umlaut() {
    assert_eq!(decode("nu:3").unwrap(), "nǚ");
    assert_eq!(decode("nü3").unwrap(), "nǚ");
    assert_eq!(decode("lu:4").unwrap(), "lǜ");
  }

  #[test]
  fn v_is_an_umlaut_stand_in() {
    assert_eq!(decode("nv3").unwrap(), "nǚ");
  }

  #[test]
  fn neutral_tone_leaves_vowels_plain() {
    assert_eq!(decode("ma5").unwrap(), "ma");
    assert_eq!(decode("ma0").unwrap(), "ma");
    assert_eq!(decode("lu:5").unwrap(), "lü");
  }

  #[test]
  fn plain_text_only_gets_lowercased() {
    assert_eq!(decode("hao").unwrap(), "hao");
    assert_eq!(decode("Hao").unwrap(), "hao");
  }

  #[test]
  fn syllable_delimiters_survive() {
    assert_eq!(decode("ni3 hao3").unwrap(), "nǐ hǎo");
    assert_eq!(decode("xi1'an1").unwrap(), "xī'ān");
  }

  #[test]
  fn a_beats_o_in_clusters() {
    assert_eq!(decode("hao3").unwrap(), "hǎo");
  }

  #[test]
  fn ui_marks_the_i() {
    assert_eq!(decode("dui4").unwrap(), "duì");
  }

  #[test]
  fn iu_marks_the_u() {
    assert_eq!(decode("jiu3").unwrap(), "jiǔ");
  }

  #[test]
  fn o_then_e_take_the_mark_when_no_a() {
    assert_eq!(decode("zhong1").unwrap(), "zhōng");
    assert_eq!(decode("guo2").unwrap(), "guó");
    assert_eq!(decode("xie4").unwrap(), "xiè");
    assert_eq!(decode("lu:e4").unwrap(), "lüè");
  }

  #[test]
  fn uppercase_input_is_normalized() {
    assert_eq!(decode("NI3 HAO3").unwrap(), "nǐ hǎo");
    assert_eq!(decode("NU:3").unwrap(), "nǚ");
  }

  #[test]
  fn stray_colon_is_a_hard_error() {
    assert_eq!(decode("n:i3"), Err(DecodeError::StrayColon { pos: 1 }));
    assert_eq!(decode(":a"), Err(DecodeError::StrayColon { pos: 0 }));
    assert_eq!(decode("nu::3"), Err(DecodeError::StrayColon { pos: 3 }));
  }

  // The two tests below pin down legacy fallbacks, not tone rules anyone
  // intended. Changing them would silently alter regenerated decks.

  #[test]
  fn vowelless_syllable_keeps_the_raw_digit() {
    assert_eq!(decode("ng4").unwrap(), "ng4");
    assert_eq!(decode("m2").unwrap(), "m2");
  }

  #[test]
  fn unmatched_vowel_cluster_gets_a_bang() {
    assert_eq!(decode("vu1").unwrap(), "vu!");
  }
}
