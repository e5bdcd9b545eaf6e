//! Verse Meter Checking
//!
//! Canonical verse runs seven syllables to the line of verse. The checker
//! counts syllables between tsheg boundaries and reports a verse of six or
//! eight syllables directly following a clean seven. State survives line
//! breaks because a verse may start on one file line and close on the next;
//! the report is anchored at the verse start, not at the line that closed it.

use super::variants::TSHEG;

/// Syllable count of the canonical meter
pub const METER: u32 = 7;

/// Loanword transcriptions pronounced as two syllables
const TWO_SYLLABLE_LOANWORDS: [&str; 6] = ["བཛྲ", "པདྨ", "པདྨའི", "སིདྡྷི", "པའམ", "ཀརྨ"];

/// Contracted suffix adding one syllable to the count
const EXTRA_SYLLABLE_SUFFIX: &str = "འོ";

/// Letters and dependent signs (U+0F40..=U+0F83) and subjoined letters
/// (U+0F90..=U+0FBC)
fn is_syllable_char(c: char) -> bool {
    matches!(c, '\u{0F40}'..='\u{0F83}' | '\u{0F90}'..='\u{0FBC}')
}

/// Annotation characters the meter ignores: correction markers, pagination
/// digits and sides, and the `{T..}` sigla
fn is_transparent(c: char) -> bool {
    matches!(c, '#' | '{' | '}' | '[' | ']' | 'T' | '0'..='9' | 'a' | 'b' | '.')
}

fn syllable_weight(syllable: &str) -> u32 {
    let mut weight = 1;
    if TWO_SYLLABLE_LOANWORDS.contains(&syllable) {
        weight += 1;
    }
    if syllable.ends_with(EXTRA_SYLLABLE_SUFFIX) {
        weight += 1;
    }
    weight
}

/// Where the open verse began, kept so the report can point at the start
#[derive(Debug, Clone, PartialEq)]
pub struct VerseAnchor {
    /// Raw locator of the line the verse started on
    pub locator: String,
    /// One-based file line the verse started on
    pub file_line: u32,
    /// Resolved body text of that line
    pub body: String,
    /// Byte offset of the verse's first syllable char within `body`
    pub char_pos: usize,
}

impl VerseAnchor {
    /// Anchor line with `***` inserted at the verse start
    pub fn highlighted_body(&self) -> String {
        format!(
            "{}***{}",
            &self.body[..self.char_pos],
            &self.body[self.char_pos..]
        )
    }
}

/// A completed verse deviating from the established meter
#[derive(Debug, Clone, PartialEq)]
pub struct MeterDeviation {
    pub count: u32,
    pub anchor: VerseAnchor,
}

/// Verse progress carried across the lines of one volume
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerseState {
    /// Syllables counted so far in the open verse
    count: u32,
    /// Count of the previous completed verse
    prev_count: u32,
    /// `None` while no verse is open
    anchor: Option<VerseAnchor>,
    /// Text of the syllable currently being read, possibly spanning a
    /// line break
    syllable: String,
}

impl VerseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one line of resolved body text
    ///
    /// `after_tsheg` and `in_break` reset at every line start; the verse
    /// anchor, the syllable counts and the partial syllable text carry over.
    pub fn scan_line(&mut self, body: &str, locator: &str, file_line: u32) -> Vec<MeterDeviation> {
        let mut deviations = Vec::new();
        let mut after_tsheg = false;
        let mut in_break = false;

        for (idx, c) in body.char_indices() {
            if is_transparent(c) {
                continue;
            }
            if is_syllable_char(c) {
                if self.anchor.is_none() {
                    self.anchor = Some(VerseAnchor {
                        locator: locator.to_string(),
                        file_line,
                        body: body.to_string(),
                        char_pos: idx,
                    });
                    self.count = 0;
                }
                if !after_tsheg && !in_break {
                    self.syllable.push(c);
                    continue;
                }
                if after_tsheg && !in_break {
                    self.close_syllable();
                }
                self.syllable.clear();
                self.syllable.push(c);
                after_tsheg = false;
                in_break = false;
            } else if c == TSHEG && !after_tsheg && !in_break {
                after_tsheg = true;
            } else if !in_break {
                // verse terminator: shad, space or any other opaque sign
                if self.anchor.is_some() {
                    self.close_syllable();
                    if let Some(deviation) = self.close_verse() {
                        deviations.push(deviation);
                    }
                }
                in_break = true;
            }
            // everything between a terminator and the next syllable
            // char belongs to the break and is absorbed
        }
        deviations
    }

    fn close_syllable(&mut self) {
        self.count += syllable_weight(&self.syllable);
        self.syllable.clear();
    }

    /// Close the open verse, comparing it against the previous one
    fn close_verse(&mut self) -> Option<MeterDeviation> {
        let anchor = self.anchor.take()?;
        let count = self.count;
        let prev = self.prev_count;
        self.prev_count = count;
        self.count = 0;
        self.syllable.clear();
        if prev == METER && (count == METER - 1 || count == METER + 1) {
            Some(MeterDeviation { count, anchor })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(lines: &[&str]) -> Vec<MeterDeviation> {
        let mut state = VerseState::new();
        let mut all = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            all.extend(state.scan_line(line, &format!("1a.{}", i + 1), i as u32 + 2));
        }
        all
    }

    // seven one-count syllables closed by a shad
    const SEVEN: &str = "ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ།";

    #[test]
    fn test_clean_meter_is_silent() {
        assert!(scan_all(&[SEVEN, SEVEN, SEVEN]).is_empty());
    }

    #[test]
    fn test_eight_after_seven_is_reported() {
        let eight = "ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉ།";
        let deviations = scan_all(&[SEVEN, eight]);
        assert_eq!(deviations.len(), 1);
        assert_eq!(deviations[0].count, 8);
        assert_eq!(deviations[0].anchor.file_line, 3);
    }

    #[test]
    fn test_six_after_seven_is_reported() {
        let six = "ཀ་ཁ་ག་ང་ཅ་ཆ།";
        let deviations = scan_all(&[SEVEN, six]);
        assert_eq!(deviations.len(), 1);
        assert_eq!(deviations[0].count, 6);
    }

    #[test]
    fn test_deviation_needs_an_established_meter() {
        // eight first: nothing to compare against
        let eight = "ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉ།";
        assert!(scan_all(&[eight, SEVEN]).is_empty());
    }

    #[test]
    fn test_two_verses_on_one_line() {
        let line = format!("{SEVEN} ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉ།");
        let deviations = scan_all(&[&line]);
        assert_eq!(deviations.len(), 1);
        assert_eq!(deviations[0].count, 8);
    }

    #[test]
    fn test_loanword_counts_double() {
        // five plain syllables plus vajra = seven
        let with_loanword = "བཛྲ་ཀ་ཁ་ག་ང་ཅ།";
        assert!(scan_all(&[with_loanword, SEVEN]).is_empty());
        // and it can push a seemingly fine verse to eight
        let overweight = "བཛྲ་ཀ་ཁ་ག་ང་ཅ་ཆ།";
        let deviations = scan_all(&[SEVEN, overweight]);
        assert_eq!(deviations.len(), 1);
        assert_eq!(deviations[0].count, 8);
    }

    #[test]
    fn test_contracted_suffix_counts_extra() {
        // six written syllables, the last ends in the contracted suffix
        let contracted = "ཀ་ཁ་ག་ང་ཅ་ཆའོ།";
        assert!(scan_all(&[contracted, SEVEN]).is_empty());
    }

    #[test]
    fn test_verse_spanning_a_line_break() {
        let deviations = scan_all(&[SEVEN, "ཀ་ཁ་ག་ང", "་ཅ་ཆ་ཇ་ཉ།"]);
        assert_eq!(deviations.len(), 1);
        assert_eq!(deviations[0].count, 8);
        // anchored where the verse started, not where it closed
        assert_eq!(deviations[0].anchor.file_line, 3);
        assert_eq!(deviations[0].anchor.locator, "1a.2");
    }

    #[test]
    fn test_anchor_highlight_marks_verse_start() {
        let line = format!("{SEVEN} ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉ།");
        let deviations = scan_all(&[&line]);
        let highlight = deviations[0].anchor.highlighted_body();
        assert!(highlight.contains("***ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉ།"));
        assert!(highlight.starts_with(SEVEN));
    }

    #[test]
    fn test_transparent_chars_do_not_break_verses() {
        // pagination debris inside the verse neither counts nor terminates
        let with_debris = "ཀ་ཁ་ག་[12b]ང་ཅ་ཆ་ཇ།";
        assert!(scan_all(&[SEVEN, with_debris, SEVEN]).is_empty());
    }

    #[test]
    fn test_terminator_without_open_verse_is_inert() {
        let prev = VerseState::new();
        let mut state = prev.clone();
        assert!(state.scan_line("། །", "1a", 2).is_empty());
        assert_eq!(state, prev);
    }

    #[test]
    fn test_double_shad_closes_once() {
        let seven_double = "ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ།།";
        let eight = "ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉ།";
        let deviations = scan_all(&[seven_double, eight]);
        assert_eq!(deviations.len(), 1);
    }
}
