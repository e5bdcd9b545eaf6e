//! Validation Engine
//!
//! Per-line orchestration around the per-volume [`ParseState`]. Each line
//! runs through locator parsing, ordering checks against the previous
//! valid locator, the rule catalog, variant resolution and the optional
//! verse meter check; every finding goes straight to the report.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::parser::lines::normalized_lines;
use crate::parser::locator::{parse_locator, Locator, ParsedLocator, Side};
use crate::report::{Category, Diagnostic, Report};
use crate::rules::RuleCatalog;
use crate::validation::variants::{resolve_variants, VariantChoice};
use crate::validation::verses::{VerseState, METER};

/// Accepted opening punctuation after a correction marker
const ACCEPTED_OPENINGS: [&str; 3] = ["༄༅༅། །", "༄༅། །", "༄། །"];

/// Core options supplied by the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Resolve variant groups to the corrected alternative instead of
    /// the printed one
    pub fix_errors: bool,
    /// Keep literal bracket error indications in the body text
    pub keep_errors_indications: bool,
    /// Run the verse meter checker
    pub check_verses: bool,
}

impl Options {
    fn variant_choice(&self) -> VariantChoice {
        if self.fix_errors {
            VariantChoice::Corrected
        } else {
            VariantChoice::Original
        }
    }
}

/// Totals for one validated volume
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeSummary {
    /// Text lines seen, header included
    pub lines: u32,
    /// Distinct (page, side) pairs seen
    pub pages: u32,
}

/// Identity of the volume under validation, carried into every diagnostic
#[derive(Debug, Clone, Copy)]
struct VolumeContext<'a> {
    volume: u32,
    short_name: &'a str,
}

/// Mutable state threaded through the lines of one volume
///
/// Skipped (malformed) lines leave the state untouched, so the next line
/// is always compared against the last valid locator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseState {
    page: u32,
    side: Side,
    line: Option<u32>,
    page_seq: u32,
    verse: VerseState,
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseState {
    /// State after consuming the header line: page 1, side a, line unknown
    pub fn new() -> Self {
        Self {
            page: 1,
            side: Side::A,
            line: None,
            page_seq: 1,
            verse: VerseState::new(),
        }
    }

    /// Running (page, side) sequence index, for pagination references
    pub fn page_seq(&self) -> u32 {
        self.page_seq
    }

    fn apply(&mut self, locator: &Locator) {
        if locator.page != self.page || locator.side != self.side {
            self.page_seq += 1;
        }
        self.page = locator.page;
        self.side = locator.side;
        self.line = locator.line;
    }
}

/// Validates volumes against a rule catalog
pub struct Validator<'a> {
    catalog: &'a RuleCatalog,
    options: Options,
}

impl<'a> Validator<'a> {
    pub fn new(catalog: &'a RuleCatalog, options: Options) -> Self {
        Self { catalog, options }
    }

    /// Validate one volume's full content, appending findings to `report`
    ///
    /// The first line is the volume header: it initializes the parse
    /// state and is never itself validated.
    pub fn validate_volume<W: Write>(
        &self,
        content: &str,
        volume: u32,
        short_name: &str,
        report: &mut Report<W>,
    ) -> io::Result<VolumeSummary> {
        let ctx = VolumeContext { volume, short_name };
        let mut state = ParseState::new();
        let mut lines = 0;
        for (index, line) in normalized_lines(content).enumerate() {
            let file_line = index as u32 + 1;
            lines = file_line;
            if file_line == 1 {
                continue;
            }
            self.validate_line(line, file_line, &mut state, ctx, report)?;
        }
        Ok(VolumeSummary {
            lines,
            pages: state.page_seq(),
        })
    }

    fn validate_line<W: Write>(
        &self,
        line: &str,
        file_line: u32,
        state: &mut ParseState,
        ctx: VolumeContext<'_>,
        report: &mut Report<W>,
    ) -> io::Result<()> {
        let parsed = match parse_locator(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                return emit(
                    report,
                    ctx,
                    err.locator_ref(),
                    file_line,
                    Category::Format,
                    &err.to_string(),
                    None,
                );
            }
        };

        report_ordering(state, &parsed, file_line, ctx, report)?;
        state.apply(&parsed.locator);

        // orthographic rules see the full raw line, locator included
        for rule in self.catalog.iter() {
            for hit in rule.scan(line) {
                emit(
                    report,
                    ctx,
                    parsed.raw,
                    file_line,
                    rule.category,
                    &rule.message,
                    hit.excerpt.as_deref(),
                )?;
            }
        }

        let body = &line[parsed.body_start..];
        if body.is_empty() {
            return Ok(());
        }

        self.check_correction_marker(body, &parsed, file_line, ctx, report)?;

        let body = if self.options.keep_errors_indications {
            Cow::Borrowed(body)
        } else {
            Cow::Owned(body.replace(['[', ']'], ""))
        };

        let resolution = resolve_variants(&body, self.options.variant_choice());
        for _ in 0..resolution.tsheg_mismatches {
            emit(
                report,
                ctx,
                parsed.raw,
                file_line,
                Category::Format,
                "༺ཚེག་དང་གུག་རྟགས་མི་འགྲིག་པ།༻ tsheg not matching in parenthesis",
                None,
            )?;
        }
        if resolution.spurious_parenthesis {
            emit(
                report,
                ctx,
                parsed.raw,
                file_line,
                Category::Format,
                "༺གུག་རྟགས་ཆད་པའི་སྐྱོན།༻ spurious parenthesis",
                None,
            )?;
        }

        if self.options.check_verses {
            for deviation in state.verse.scan_line(&resolution.text, parsed.raw, file_line) {
                let message = format!(
                    "verse has {} syllables while previous one has {METER}",
                    deviation.count
                );
                emit(
                    report,
                    ctx,
                    &deviation.anchor.locator,
                    deviation.anchor.file_line,
                    Category::Verses,
                    &message,
                    Some(&deviation.anchor.highlighted_body()),
                )?;
            }
        }
        Ok(())
    }

    /// A `{T..}` correction marker must close, and the text after the
    /// closing delimiter must open one of the accepted ways
    fn check_correction_marker<W: Write>(
        &self,
        body: &str,
        parsed: &ParsedLocator<'_>,
        file_line: u32,
        ctx: VolumeContext<'_>,
        report: &mut Report<W>,
    ) -> io::Result<()> {
        if !body.contains("{T") {
            return Ok(());
        }
        let close = body.find('}');
        if close.is_none() {
            emit(
                report,
                ctx,
                parsed.raw,
                file_line,
                Category::Format,
                "missing closing \"}\"",
                None,
            )?;
        }
        // without a closing delimiter the opening check runs from the
        // body start
        let after = &body[close.map_or(0, |i| i + 1)..];
        if !ACCEPTED_OPENINGS.iter().any(|o| after.starts_with(o)) {
            let context: String = after.chars().take(4).collect();
            let message = format!(
                "༺དབུ་འཁྱུད་ཆད་པའི་སྐྱོན།༻ possible wrong beginning of text: \"{context}\" \
                 should be \"༄༅༅། །\", \"༄༅། །\" or \"༄། །\""
            );
            emit(
                report,
                ctx,
                parsed.raw,
                file_line,
                Category::Punctuation,
                &message,
                None,
            )?;
        }
        Ok(())
    }
}

/// Ordering checks against the previous valid locator
///
/// Page and side findings carry no locator reference; line-number
/// findings reference the current one. All applicable checks report,
/// none short-circuits another.
fn report_ordering<W: Write>(
    state: &ParseState,
    parsed: &ParsedLocator<'_>,
    file_line: u32,
    ctx: VolumeContext<'_>,
    report: &mut Report<W>,
) -> io::Result<()> {
    let new = &parsed.locator;

    if new.page != state.page && Some(new.page) != state.page.checked_add(1) {
        let message = format!(
            "༺ཤོག་གྲངས་ཀྱི་སྐྱོན།༻ leap in page numbers from {} to {}",
            state.page, new.page
        );
        emit(
            report,
            ctx,
            "",
            file_line,
            Category::PageNumbering,
            &message,
            None,
        )?;
    }
    if new.page == state.page && state.side == Side::B && new.side == Side::A {
        emit(
            report,
            ctx,
            "",
            file_line,
            Category::PageNumbering,
            "༺ཤོག་ངོའི་སྐྱོན།༻ going backward in page sides",
            None,
        )?;
    }
    if Some(new.page) == state.page.checked_add(1)
        && (new.side == Side::B || state.side == Side::A)
    {
        emit(
            report,
            ctx,
            "",
            file_line,
            Category::PageNumbering,
            "༺ཤོག་ངོའི་སྐྱོན།༻ leap in page sides",
            None,
        )?;
    }
    if let (Some(old), Some(current)) = (state.line, new.line) {
        if current != old && Some(current) != old.checked_add(1) {
            let message =
                format!("༺ཐིག་གྲངས་ཀྱི་སྐྱོན།༻ leap in line numbers from {old} to {current}");
            emit(
                report,
                ctx,
                parsed.raw,
                file_line,
                Category::PageNumbering,
                &message,
                None,
            )?;
        }
    }
    Ok(())
}

fn emit<W: Write>(
    report: &mut Report<W>,
    ctx: VolumeContext<'_>,
    locator: &str,
    file_line: u32,
    category: Category,
    message: &str,
    excerpt: Option<&str>,
) -> io::Result<()> {
    report.write(&Diagnostic {
        locator,
        file_line,
        volume: ctx.volume,
        short_name: ctx.short_name,
        category,
        message,
        excerpt,
    })
}
