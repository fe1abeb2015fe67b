//! Tree rendering of parsed prescriptions for `show`

use termtree::Tree;

use crate::application::{CohortRemoval, Prescription, RepeatHarvest};
use crate::domain::PlantingList;

pub trait ToTree {
    fn to_tree(&self) -> Tree<String>;
}

impl ToTree for Prescription {
    fn to_tree(&self) -> Tree<String> {
        let mut tree = Tree::new(format!("{} (line {})", self.name, self.line));
        tree.push(self.harvest.removal.to_tree());
        if let Some(planting) = &self.harvest.planting {
            tree.push(planting.to_tree());
        }
        if let Some(repeat) = &self.harvest.repeat {
            tree.push(repeat.to_tree());
        }
        tree
    }
}

impl ToTree for CohortRemoval {
    fn to_tree(&self) -> Tree<String> {
        let root = format!("CohortsRemoved {}", self);
        match self {
            CohortRemoval::ClearCut => Tree::new(root),
            CohortRemoval::SpeciesList(selectors) => Tree::new(root).with_leaves(
                selectors
                    .iter()
                    .map(|(species, selector)| format!("{species}: {selector}")),
            ),
        }
    }
}

impl ToTree for PlantingList {
    fn to_tree(&self) -> Tree<String> {
        Tree::new("Plant".to_string()).with_leaves(self.iter().map(|entry| entry.to_string()))
    }
}

impl ToTree for RepeatHarvest {
    fn to_tree(&self) -> Tree<String> {
        let mut tree = Tree::new(format!("{} {}", self.kind.keyword(), self.interval));
        match &self.removal {
            Some(removal) => tree.push(removal.to_tree()),
            None => tree.push(Tree::new("CohortsRemoved (primary)".to_string())),
        };
        if let Some(planting) = &self.planting {
            tree.push(planting.to_tree());
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PrescriptionReader;
    use crate::config::ParserSettings;
    use crate::domain::SpeciesList;
    use crate::infrastructure::TextLines;

    #[test]
    fn given_prescription_when_rendered_then_tree_lists_selectors_and_planting() {
        // Arrange
        let dataset = SpeciesList::new(["PinuSyl", "PinuBan"]).unwrap();
        let text = "Prescription Thin\n\
                    CohortsRemoved SpeciesList\n\
                    PinuSyl 10 20-30\n\
                    Plant PinuBan (500)\n\
                    SingleRepeat 10\n";
        let mut lines = TextLines::new(text);
        let prescriptions = PrescriptionReader::new(&dataset, &ParserSettings::default())
            .read_all(&mut lines)
            .unwrap();

        // Act
        let rendered = prescriptions[0].to_tree().to_string();

        // Assert
        assert!(rendered.starts_with("Thin (line 1)"));
        assert!(rendered.contains("CohortsRemoved SpeciesList"));
        assert!(rendered.contains("PinuSyl: 10 20-30"));
        assert!(rendered.contains("PinuBan (500)"));
        assert!(rendered.contains("SingleRepeat 10"));
        assert!(rendered.contains("CohortsRemoved (primary)"));
    }
}
