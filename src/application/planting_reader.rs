//! Reader for the list of species planted after a harvest.
//!
//! ```text
//! Plant PinuSyl (500) PinuBan AbieBals(1200)
//! ```
//!
//! Each species may carry a planting density in parentheses.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::application::error::{AtLine, ParseErrorKind, ParseResult};
use crate::application::tokens::LineCursor;
use crate::domain::{PlantingEntry, PlantingList, SpeciesDataset};
use crate::infrastructure::traits::LineSource;

/// Upper bound for planting densities unless configured otherwise.
pub const MAX_DENSITY: u32 = 100_000;

/// Keyword introducing a planting line.
pub const PLANT_KEYWORD: &str = "Plant";

/// Parses planting lists into [`PlantingList`].
#[derive(Clone, Copy)]
pub struct PlantingListReader<'a> {
    dataset: &'a dyn SpeciesDataset,
    max_density: u32,
}

impl<'a> PlantingListReader<'a> {
    pub fn new(dataset: &'a dyn SpeciesDataset) -> Self {
        Self {
            dataset,
            max_density: MAX_DENSITY,
        }
    }

    pub fn with_max_density(mut self, max_density: u32) -> Self {
        self.max_density = max_density;
        self
    }

    pub fn max_density(&self) -> u32 {
        self.max_density
    }

    /// Read an optional planting line introduced by `keyword`.
    ///
    /// Returns `Ok(None)` without consuming anything when the current line
    /// does not start with `keyword`.
    pub fn read<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
        keyword: &str,
    ) -> ParseResult<Option<PlantingList>> {
        let Some(line) = lines.current_line() else {
            return Ok(None);
        };
        let line_number = lines.line_number();
        let mut cursor = LineCursor::new(line);
        if cursor.read_word() != Some(keyword) {
            return Ok(None);
        }
        let list = self.read_list(cursor.rest(), line_number)?;
        lines.advance();
        Ok(Some(list))
    }

    /// Parse the species list itself (the text after the keyword).
    #[instrument(level = "debug", skip(self))]
    pub fn read_list(&self, text: &str, line_number: usize) -> ParseResult<PlantingList> {
        let mut cursor = LineCursor::new(text);
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        while let Some(name) = read_species_name(&mut cursor) {
            let species = self
                .dataset
                .get(name)
                .ok_or_else(|| ParseErrorKind::UnknownSpecies {
                    name: name.to_string(),
                })
                .at_line(line_number)?;
            if !seen.insert(species.clone()) {
                return Err(ParseErrorKind::DuplicatePlantingSpecies {
                    name: name.to_string(),
                })
                .at_line(line_number);
            }
            let density = self.read_density(&mut cursor).at_line(line_number)?;
            debug!("plant {} density={:?}", species, density);
            entries.push(PlantingEntry { species, density });
        }

        if entries.is_empty() {
            return Err(ParseErrorKind::EmptyPlantingList).at_line(line_number);
        }
        Ok(PlantingList::from_entries(entries))
    }

    /// Read a parenthesized density if one follows; `Ok(None)` otherwise.
    fn read_density(&self, cursor: &mut LineCursor<'_>) -> Result<Option<u32>, ParseErrorKind> {
        cursor.skip_whitespace();
        if cursor.peek() != Some('(') {
            return Ok(None);
        }
        let start = cursor.position();
        cursor.bump();

        // The value runs to the closing paren or end of line.
        let value = cursor.read_while(|c| c != ')').trim();
        if value.is_empty() {
            cursor.bump();
            return Err(ParseErrorKind::MissingDensityValue {
                text: cursor.consumed_since(start).to_string(),
            });
        }
        let density: i64 = value
            .parse()
            .map_err(|_| ParseErrorKind::MalformedDensity {
                text: value.to_string(),
            })?;
        let density = u32::try_from(density)
            .ok()
            .filter(|&d| d <= self.max_density)
            .ok_or_else(|| ParseErrorKind::DensityOutOfRange {
                text: value.to_string(),
                max: self.max_density,
            })?;

        if cursor.peek() != Some(')') {
            return Err(ParseErrorKind::UnterminatedDensity {
                text: cursor.consumed_since(start).trim_end().to_string(),
            });
        }
        cursor.bump();
        Ok(Some(density))
    }
}

/// Species names end at whitespace or at the `(` of a density.
/// A stray `(` is read as part of a (non-existent) name.
fn read_species_name<'a>(cursor: &mut LineCursor<'a>) -> Option<&'a str> {
    cursor.skip_whitespace();
    let name = match cursor.peek() {
        Some('(') => cursor.read_while(|c| !c.is_whitespace()),
        _ => cursor.read_while(|c| !c.is_whitespace() && c != '('),
    };
    (!name.is_empty()).then_some(name)
}
