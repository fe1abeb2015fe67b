//! Reader for blocks of per-species cohort selection lines.
//!
//! Each line names a species followed by either a keyword (`All`,
//! `Youngest`, `AllExceptYoungest`, `Oldest`, `AllExceptOldest`, `1/N`) or a
//! list of ages and age ranges:
//!
//! ```text
//! PinuSyl   All
//! PinuBan   10 20-40 60
//! AbieBals  1/3
//! ```
//!
//! A block ends at end of input or at a line whose first word is one of the
//! caller's terminator keywords.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::application::error::{AtLine, ParseError, ParseErrorKind, ParseResult};
use crate::application::tokens::{parse_age_or_range, LineCursor};
use crate::domain::{AgeSet, CohortSelector, Species, SpeciesCohortSelectors, SpeciesDataset};
use crate::infrastructure::traits::LineSource;

/// Shown in place of a terminator when a block ends at end of input.
const END_OF_INPUT: &str = "end of input";

/// Parses species lines into [`SpeciesCohortSelectors`].
#[derive(Clone, Copy)]
pub struct CohortSpecificationReader<'a> {
    dataset: &'a dyn SpeciesDataset,
    keywords: bool,
}

impl<'a> CohortSpecificationReader<'a> {
    /// Reader with selector keywords enabled.
    pub fn new(dataset: &'a dyn SpeciesDataset) -> Self {
        Self {
            dataset,
            keywords: true,
        }
    }

    /// Enable or disable selector keywords. When disabled, keyword tokens
    /// are read as ages and rejected.
    pub fn with_keywords(mut self, enabled: bool) -> Self {
        self.keywords = enabled;
        self
    }

    pub fn keywords_enabled(&self) -> bool {
        self.keywords
    }

    /// Read one block into a fresh map.
    pub fn read<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
        terminators: &[&str],
    ) -> ParseResult<SpeciesCohortSelectors> {
        let mut selectors = SpeciesCohortSelectors::new();
        self.read_block(lines, terminators, &mut selectors)?;
        Ok(selectors)
    }

    /// Read species lines until end of input or a terminator line, adding
    /// one selector per species to `selectors`.
    ///
    /// The terminator line is left unread. Duplicate species are detected
    /// within this call only.
    #[instrument(level = "debug", skip(self, lines, selectors))]
    pub fn read_block<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
        terminators: &[&str],
        selectors: &mut SpeciesCohortSelectors,
    ) -> ParseResult<()> {
        let mut first_lines: HashMap<Species, usize> = HashMap::new();

        while let Some(line) = lines.current_line() {
            let line_number = lines.line_number();
            let mut cursor = LineCursor::new(line);
            let Some(name) = cursor.read_word() else {
                lines.advance();
                continue;
            };
            if terminators.contains(&name) {
                trace!("read_block: terminator {} on line {}", name, line_number);
                break;
            }

            let species = self
                .dataset
                .get(name)
                .ok_or_else(|| ParseErrorKind::UnknownSpecies {
                    name: name.to_string(),
                })
                .at_line(line_number)?;
            if let Some(&first_line) = first_lines.get(&species) {
                return Err(ParseError::new(
                    line_number,
                    ParseErrorKind::DuplicateSpecies {
                        name: name.to_string(),
                        first_line,
                    },
                ));
            }

            let selector = self.read_selector(&mut cursor, name).at_line(line_number)?;
            debug!("line {}: {} -> {}", line_number, species, selector);

            first_lines.insert(species.clone(), line_number);
            selectors.insert(species, selector);
            lines.advance();
        }

        if first_lines.is_empty() {
            let found = lines
                .leading_token()
                .map(|token| format!("\"{}\"", token))
                .unwrap_or_else(|| END_OF_INPUT.to_string());
            return Err(ParseError::new(
                lines.line_number(),
                ParseErrorKind::EmptyBlock { found },
            ));
        }
        Ok(())
    }

    /// Read what follows the species name on a line.
    fn read_selector(
        &self,
        cursor: &mut LineCursor<'_>,
        species: &str,
    ) -> Result<CohortSelector, ParseErrorKind> {
        let first = cursor
            .read_word()
            .ok_or_else(|| ParseErrorKind::MissingSelector {
                species: species.to_string(),
            })?;

        if self.keywords {
            if let Some(selector) = CohortSelector::from_keyword(first)? {
                if !cursor.is_exhausted() {
                    return Err(ParseErrorKind::UnexpectedTrailingData {
                        keyword: first.to_string(),
                        text: cursor.rest().to_string(),
                    });
                }
                return Ok(selector);
            }
        }

        let mut ages = AgeSet::new();
        let mut word = Some(first);
        while let Some(text) = word {
            ages.add(parse_age_or_range(text)?, text)?;
            word = cursor.read_word();
        }
        Ok(ages.into_selector())
    }
}
