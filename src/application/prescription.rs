//! Reader for harvest prescriptions: cohort removal, planting and repeats.
//!
//! ```text
//! Prescription   SelectiveThinning
//! CohortsRemoved SpeciesList
//!     PinuSyl    1/2
//!     PinuBan    AllExceptYoungest
//! Plant          PinuSyl (500)
//! SingleRepeat   10
//! CohortsRemoved SpeciesList
//!     PinuSyl    All
//! ```
//!
//! A repeat without its own `CohortsRemoved` line repeats the primary removal.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU16;

use tracing::{debug, instrument};

use crate::application::cohort_reader::CohortSpecificationReader;
use crate::application::error::{ParseError, ParseErrorKind, ParseResult};
use crate::application::planting_reader::{PlantingListReader, PLANT_KEYWORD};
use crate::application::tokens::LineCursor;
use crate::config::ParserSettings;
use crate::domain::{
    CohortSelector, HasAge, PlantingList, Species, SpeciesCohortSelectors, SpeciesDataset,
};
use crate::infrastructure::traits::LineSource;

pub const PRESCRIPTION_KEYWORD: &str = "Prescription";
pub const COHORTS_REMOVED_KEYWORD: &str = "CohortsRemoved";
pub const SINGLE_REPEAT_KEYWORD: &str = "SingleRepeat";
pub const MULTIPLE_REPEAT_KEYWORD: &str = "MultipleRepeat";
pub const CLEAR_CUT: &str = "ClearCut";
pub const SPECIES_LIST: &str = "SpeciesList";

/// Which cohorts a harvest removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CohortRemoval {
    /// Every cohort of every species.
    ClearCut,
    SpeciesList(SpeciesCohortSelectors),
}

impl CohortRemoval {
    /// Cohorts of `species` removed by this harvest.
    pub fn select<'a, C: HasAge>(&self, species: &Species, cohorts: &'a [C]) -> Vec<&'a C> {
        match self {
            CohortRemoval::ClearCut => CohortSelector::All.select(cohorts),
            CohortRemoval::SpeciesList(selectors) => selectors.select(species, cohorts),
        }
    }
}

impl fmt::Display for CohortRemoval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CohortRemoval::ClearCut => f.write_str(CLEAR_CUT),
            CohortRemoval::SpeciesList(_) => f.write_str(SPECIES_LIST),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKind {
    /// One additional harvest after the interval.
    Single,
    /// The harvest recurs every interval.
    Multiple,
}

impl RepeatKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            RepeatKind::Single => SINGLE_REPEAT_KEYWORD,
            RepeatKind::Multiple => MULTIPLE_REPEAT_KEYWORD,
        }
    }
}

/// Repeat harvest following the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatHarvest {
    pub kind: RepeatKind,
    /// Years between harvests.
    pub interval: NonZeroU16,
    /// `None` repeats the primary removal.
    pub removal: Option<CohortRemoval>,
    pub planting: Option<PlantingList>,
}

/// Cohort removal and planting of one prescription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSpec {
    pub removal: CohortRemoval,
    pub planting: Option<PlantingList>,
    pub repeat: Option<RepeatHarvest>,
}

impl HarvestSpec {
    /// Removal applied by the repeat harvest, if there is one.
    pub fn repeat_removal(&self) -> Option<&CohortRemoval> {
        self.repeat
            .as_ref()
            .map(|repeat| repeat.removal.as_ref().unwrap_or(&self.removal))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub name: String,
    /// Line of the `Prescription` keyword.
    pub line: usize,
    pub harvest: HarvestSpec,
}

/// Parses prescriptions by combining the cohort and planting readers.
#[derive(Clone, Copy)]
pub struct PrescriptionReader<'a> {
    cohorts: CohortSpecificationReader<'a>,
    planting: PlantingListReader<'a>,
}

impl<'a> PrescriptionReader<'a> {
    pub fn new(dataset: &'a dyn SpeciesDataset, settings: &ParserSettings) -> Self {
        Self {
            cohorts: CohortSpecificationReader::new(dataset).with_keywords(settings.keywords),
            planting: PlantingListReader::new(dataset).with_max_density(settings.max_density),
        }
    }

    /// Read prescriptions until end of input. At least one is required and
    /// names must be unique.
    #[instrument(level = "debug", skip_all)]
    pub fn read_all<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
    ) -> ParseResult<Vec<Prescription>> {
        let mut first_lines: HashMap<String, usize> = HashMap::new();
        let mut prescriptions = Vec::new();

        loop {
            let prescription = self.read_prescription(lines)?;
            if let Some(&first_line) = first_lines.get(&prescription.name) {
                return Err(ParseError::new(
                    prescription.line,
                    ParseErrorKind::DuplicatePrescription {
                        name: prescription.name,
                        first_line,
                    },
                ));
            }
            first_lines.insert(prescription.name.clone(), prescription.line);
            prescriptions.push(prescription);
            if lines.at_end() {
                break;
            }
        }

        debug!("read_all: {} prescriptions", prescriptions.len());
        Ok(prescriptions)
    }

    /// Read `Prescription <name>` and the harvest that follows, up to the
    /// next `Prescription` line or end of input.
    pub fn read_prescription<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
    ) -> ParseResult<Prescription> {
        let (line, name) = expect_value(lines, PRESCRIPTION_KEYWORD)?;
        lines.advance();
        debug!("prescription {} on line {}", name, line);
        let harvest = self.read_harvest(lines, &[PRESCRIPTION_KEYWORD])?;
        Ok(Prescription {
            name,
            line,
            harvest,
        })
    }

    /// Read a harvest that ends at end of input or at a line starting with
    /// one of `end_keywords`.
    pub fn read_harvest<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
        end_keywords: &[&str],
    ) -> ParseResult<HarvestSpec> {
        let terminators: Vec<&str> = [
            PLANT_KEYWORD,
            SINGLE_REPEAT_KEYWORD,
            MULTIPLE_REPEAT_KEYWORD,
        ]
        .into_iter()
        .chain(end_keywords.iter().copied())
        .collect();
        let removal = self.read_removal(lines, &terminators)?;
        let planting = self.planting.read(lines, PLANT_KEYWORD)?;
        let repeat = self.read_repeat(lines, end_keywords)?;

        if let Some(found) = lines.leading_token() {
            if !end_keywords.contains(&found) {
                let expected = end_keywords
                    .first()
                    .copied()
                    .unwrap_or("end of input")
                    .to_string();
                return Err(ParseError::new(
                    lines.line_number(),
                    ParseErrorKind::ExpectedKeyword {
                        expected,
                        found: found.to_string(),
                    },
                ));
            }
        }

        Ok(HarvestSpec {
            removal,
            planting,
            repeat,
        })
    }

    fn read_removal<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
        terminators: &[&str],
    ) -> ParseResult<CohortRemoval> {
        let (line, method) = expect_value(lines, COHORTS_REMOVED_KEYWORD)?;
        match method.as_str() {
            CLEAR_CUT => {
                lines.advance();
                Ok(CohortRemoval::ClearCut)
            }
            SPECIES_LIST => {
                lines.advance();
                let selectors = self.cohorts.read(lines, terminators)?;
                Ok(CohortRemoval::SpeciesList(selectors))
            }
            _ => Err(ParseError::new(
                line,
                ParseErrorKind::UnknownRemovalMethod { text: method },
            )),
        }
    }

    fn read_repeat<L: LineSource + ?Sized>(
        &self,
        lines: &mut L,
        end_keywords: &[&str],
    ) -> ParseResult<Option<RepeatHarvest>> {
        let kind = match lines.leading_token() {
            Some(SINGLE_REPEAT_KEYWORD) => RepeatKind::Single,
            Some(MULTIPLE_REPEAT_KEYWORD) => RepeatKind::Multiple,
            _ => return Ok(None),
        };
        let (line, text) = expect_value(lines, kind.keyword())?;
        let interval = text
            .parse::<u16>()
            .ok()
            .and_then(NonZeroU16::new)
            .ok_or_else(|| {
                ParseError::new(line, ParseErrorKind::InvalidRepeatInterval { text })
            })?;
        lines.advance();

        let removal = if lines.leading_token() == Some(COHORTS_REMOVED_KEYWORD) {
            let terminators: Vec<&str> = std::iter::once(PLANT_KEYWORD)
                .chain(end_keywords.iter().copied())
                .collect();
            Some(self.read_removal(lines, &terminators)?)
        } else {
            None
        };
        let planting = self.planting.read(lines, PLANT_KEYWORD)?;

        Ok(Some(RepeatHarvest {
            kind,
            interval,
            removal,
            planting,
        }))
    }
}

/// Read a `<keyword> <value>` line without consuming it.
fn expect_value<L: LineSource + ?Sized>(
    lines: &L,
    keyword: &str,
) -> ParseResult<(usize, String)> {
    let line_number = lines.line_number();
    let Some(line) = lines.current_line() else {
        return Err(ParseError::new(
            line_number,
            ParseErrorKind::UnexpectedEndOfInput {
                expected: keyword.to_string(),
            },
        ));
    };

    let mut cursor = LineCursor::new(line);
    let found = cursor.read_word().unwrap_or_default();
    if found != keyword {
        return Err(ParseError::new(
            line_number,
            ParseErrorKind::ExpectedKeyword {
                expected: keyword.to_string(),
                found: found.to_string(),
            },
        ));
    }
    let value = cursor.read_word().ok_or_else(|| {
        ParseError::new(
            line_number,
            ParseErrorKind::MissingValue {
                keyword: keyword.to_string(),
            },
        )
    })?;
    if !cursor.is_exhausted() {
        return Err(ParseError::new(
            line_number,
            ParseErrorKind::UnexpectedTrailingData {
                keyword: value.to_string(),
                text: cursor.rest().to_string(),
            },
        ));
    }
    Ok((line_number, value.to_string()))
}
