//! Move option panel

use maison_protocol::{MoveCategory, MoveOption};

/// The player's options for the coming turn, partitioned into the
/// two category groups the UI renders. Either group may be empty,
/// but the partition always has exactly these two groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovePanel {
    pub attacks: Vec<MoveOption>,
    pub switches: Vec<MoveOption>,
}

impl MovePanel {
    /// Partition options by category, preserving server order within
    /// each group.
    pub fn partition(options: &[MoveOption]) -> Self {
        let mut panel = Self::default();
        for option in options {
            match option.category {
                MoveCategory::Attack => panel.attacks.push(option.clone()),
                MoveCategory::Switch => panel.switches.push(option.clone()),
            }
        }
        panel
    }

    pub fn len(&self) -> usize {
        self.attacks.len() + self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty() && self.switches.is_empty()
    }

    /// Option at a flat index, attacks first then switches. Used by
    /// front-ends that move a single focus across both groups.
    pub fn get(&self, index: usize) -> Option<&MoveOption> {
        if index < self.attacks.len() {
            self.attacks.get(index)
        } else {
            self.switches.get(index - self.attacks.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(category: MoveCategory, key: &str, label: &str) -> MoveOption {
        MoveOption {
            category,
            key: key.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn partitions_into_two_groups() {
        let options = vec![
            option(MoveCategory::Attack, "0", "Tackle"),
            option(MoveCategory::Switch, "0", "Ivysaur"),
            option(MoveCategory::Attack, "1", "Water Gun"),
        ];

        let panel = MovePanel::partition(&options);
        assert_eq!(panel.attacks.len(), 2);
        assert_eq!(panel.switches.len(), 1);
        assert_eq!(panel.attacks[0].label, "Tackle");
        assert_eq!(panel.attacks[1].label, "Water Gun");
        assert_eq!(panel.switches[0].label, "Ivysaur");
    }

    #[test]
    fn empty_groups_are_legal() {
        let options = vec![option(MoveCategory::Attack, "0", "Tackle")];
        let panel = MovePanel::partition(&options);
        assert!(panel.switches.is_empty());
        assert!(!panel.is_empty());

        let none = MovePanel::partition(&[]);
        assert!(none.is_empty());
        assert_eq!(none.len(), 0);
    }

    #[test]
    fn flat_index_spans_both_groups() {
        let options = vec![
            option(MoveCategory::Attack, "0", "Tackle"),
            option(MoveCategory::Switch, "1", "Ivysaur"),
        ];
        let panel = MovePanel::partition(&options);

        assert_eq!(panel.get(0).unwrap().label, "Tackle");
        assert_eq!(panel.get(1).unwrap().label, "Ivysaur");
        assert!(panel.get(2).is_none());
    }
}
