//! Tests for PlantingListReader: species names and optional densities.

use rstest::{fixture, rstest};

use harvest_spec::application::{ParseErrorKind, PlantingListReader, MAX_DENSITY, PLANT_KEYWORD};
use harvest_spec::domain::{SpeciesDataset, SpeciesList};
use harvest_spec::infrastructure::{LineSource, TextLines};
use harvest_spec::util::testing;

#[fixture]
fn species() -> SpeciesList {
    testing::init_test_setup();
    SpeciesList::new(["PinuSyl", "PinuBan", "10"]).expect("species list")
}

fn read_err(species: &SpeciesList, text: &str) -> ParseErrorKind {
    PlantingListReader::new(species)
        .read_list(text, 7)
        .expect_err("planting list should fail")
        .kind
}

#[rstest]
fn given_species_with_and_without_density_when_reading_then_densities_kept_in_order(
    species: SpeciesList,
) {
    // Arrange
    let mut lines = TextLines::new("Plant PinuSyl (500) PinuBan\n");
    let reader = PlantingListReader::new(&species);

    // Act
    let list = reader
        .read(&mut lines, PLANT_KEYWORD)
        .expect("planting parses")
        .expect("plant line present");

    // Assert
    let entries: Vec<(&str, Option<u32>)> = list
        .iter()
        .map(|entry| (entry.species.name(), entry.density))
        .collect();
    assert_eq!(entries, vec![("PinuSyl", Some(500)), ("PinuBan", None)]);
    assert!(lines.at_end());
}

#[rstest]
fn given_numeric_species_name_glued_to_density_when_reading_then_name_ends_at_paren(
    species: SpeciesList,
) {
    // Act
    let list = PlantingListReader::new(&species)
        .read_list("10(500)", 1)
        .unwrap();

    // Assert
    let ten = species.get("10").unwrap();
    assert_eq!(list.density(&ten), Some(500));
    assert_eq!(list.len(), 1);
}

#[rstest]
fn given_zero_density_when_reading_then_distinct_from_missing(species: SpeciesList) {
    let list = PlantingListReader::new(&species)
        .read_list("PinuSyl(0) PinuBan", 1)
        .unwrap();

    assert_eq!(list.entries()[0].density, Some(0));
    assert_eq!(list.entries()[1].density, None);
    assert_eq!(list.entries()[0].to_string(), "PinuSyl (0)");
}

#[rstest]
fn given_other_keyword_when_reading_then_nothing_consumed(species: SpeciesList) {
    // Arrange
    let mut lines = TextLines::new("SingleRepeat 10\n");

    // Act
    let result = PlantingListReader::new(&species)
        .read(&mut lines, PLANT_KEYWORD)
        .unwrap();

    // Assert
    assert!(result.is_none());
    assert_eq!(lines.leading_token(), Some("SingleRepeat"));
}

#[rstest]
#[case("PinuSyl ()", ParseErrorKind::MissingDensityValue { text: "()".to_string() })]
#[case("PinuSyl (abc)", ParseErrorKind::MalformedDensity { text: "abc".to_string() })]
#[case("PinuSyl (2.5)", ParseErrorKind::MalformedDensity { text: "2.5".to_string() })]
#[case("PinuSyl (-5)", ParseErrorKind::DensityOutOfRange { text: "-5".to_string(), max: MAX_DENSITY })]
#[case("PinuSyl (100001)", ParseErrorKind::DensityOutOfRange { text: "100001".to_string(), max: MAX_DENSITY })]
#[case("PinuSyl (500", ParseErrorKind::UnterminatedDensity { text: "(500".to_string() })]
#[case("PinuSyl (5 00)", ParseErrorKind::MalformedDensity { text: "5 00".to_string() })]
#[case("PinuSyl ( 12 ", ParseErrorKind::UnterminatedDensity { text: "( 12".to_string() })]
fn given_bad_density_when_reading_then_specific_error(
    species: SpeciesList,
    #[case] text: &str,
    #[case] expected: ParseErrorKind,
) {
    assert_eq!(read_err(&species, text), expected);
}

#[rstest]
fn given_upper_bound_density_when_reading_then_accepted(species: SpeciesList) {
    let list = PlantingListReader::new(&species)
        .read_list("PinuSyl (100000)", 1)
        .unwrap();

    assert_eq!(list.entries()[0].density, Some(MAX_DENSITY));
}

#[rstest]
fn given_species_listed_twice_when_reading_then_duplicate_planting_species(
    species: SpeciesList,
) {
    assert_eq!(
        read_err(&species, "PinuSyl PinuBan(20) PinuSyl"),
        ParseErrorKind::DuplicatePlantingSpecies {
            name: "PinuSyl".to_string()
        }
    );
}

#[rstest]
fn given_unknown_species_when_reading_then_error_carries_line(species: SpeciesList) {
    // Act
    let err = PlantingListReader::new(&species)
        .read_list("PinuSyl Larix(40)", 7)
        .unwrap_err();

    // Assert
    assert_eq!(err.line, 7);
    assert_eq!(
        err.to_string(),
        "line 7: unknown species: \"Larix\""
    );
}

#[rstest]
fn given_plant_keyword_alone_when_reading_then_empty_planting_list(species: SpeciesList) {
    let mut lines = TextLines::new("Plant   >> nothing yet\n");

    let err = PlantingListReader::new(&species)
        .read(&mut lines, PLANT_KEYWORD)
        .unwrap_err();

    assert_eq!(err.line, 1);
    assert_eq!(err.kind, ParseErrorKind::EmptyPlantingList);
}
