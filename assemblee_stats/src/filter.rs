//! Selection of deputies by department, sex and political party.

use log::debug;
use std::collections::HashSet;

use crate::model::*;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DepartmentSelection {
    All,
    /// A department label, as returned by [Deputy::departement].
    Only(String),
}

impl DepartmentSelection {
    pub fn parse(s: &str) -> DepartmentSelection {
        match s.trim() {
            "" | "all" => DepartmentSelection::All,
            x => DepartmentSelection::Only(x.to_string()),
        }
    }

    fn matches(&self, deputy: &Deputy) -> bool {
        match self {
            DepartmentSelection::All => true,
            DepartmentSelection::Only(label) => deputy.departement() == *label,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SexSelection {
    Female,
    Male,
    Both,
}

impl SexSelection {
    pub fn parse(s: &str) -> Option<SexSelection> {
        match s.trim().to_lowercase().as_str() {
            "both" => Some(SexSelection::Both),
            x => Sex::parse(x).map(|sex| match sex {
                Sex::Female => SexSelection::Female,
                Sex::Male => SexSelection::Male,
            }),
        }
    }

    pub fn sexes(&self) -> Vec<Sex> {
        match self {
            SexSelection::Female => vec![Sex::Female],
            SexSelection::Male => vec![Sex::Male],
            SexSelection::Both => vec![Sex::Female, Sex::Male],
        }
    }
}

/// The criteria chosen by a user to narrow down the list of deputies.
///
/// A deputy is selected when it matches the three criteria at once.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DeputySelection {
    pub department: DepartmentSelection,
    pub sex: SexSelection,
    /// Abbreviations of the accepted parties.
    pub parties: Vec<String>,
}

impl DeputySelection {
    /// A selection that accepts every deputy of the given parties.
    pub fn everyone(parties: &[PoliticalParty]) -> DeputySelection {
        DeputySelection {
            department: DepartmentSelection::All,
            sex: SexSelection::Both,
            parties: party_choices(parties),
        }
    }
}

pub fn filter_deputies<'a>(deputies: &'a [Deputy], selection: &DeputySelection) -> Vec<&'a Deputy> {
    let sexes = selection.sex.sexes();
    let parties: HashSet<&str> = selection.parties.iter().map(|p| p.as_str()).collect();
    let res: Vec<&Deputy> = deputies
        .iter()
        .filter(|d| selection.department.matches(d))
        .filter(|d| sexes.contains(&d.sex))
        .filter(|d| parties.contains(d.party.as_str()))
        .collect();
    debug!(
        "filter_deputies: {} of {} deputies selected by {:?}",
        res.len(),
        deputies.len(),
        selection
    );
    res
}

/// The names that can be picked among the filtered deputies, ordered by sex
/// then name. Homonyms appear once.
pub fn selectable_deputies(filtered: &[&Deputy]) -> Vec<String> {
    let mut sorted: Vec<(Sex, String)> = filtered.iter().map(|d| (d.sex, d.full_name())).collect();
    sorted.sort();
    let mut seen: HashSet<String> = HashSet::new();
    sorted
        .into_iter()
        .filter_map(|(_, name)| {
            if seen.insert(name.clone()) {
                Some(name)
            } else {
                None
            }
        })
        .collect()
}

/// The department labels, ordered by department code.
pub fn department_choices(deputies: &[Deputy]) -> Vec<String> {
    let mut sorted: Vec<&Deputy> = deputies.iter().collect();
    sorted.sort_by(|a, b| a.department_code.cmp(&b.department_code));
    let mut seen: HashSet<String> = HashSet::new();
    sorted
        .iter()
        .map(|d| d.departement())
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

/// The party abbreviations, in the order of the parties table.
pub fn party_choices(parties: &[PoliticalParty]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    parties
        .iter()
        .filter(|p| seen.insert(p.abbreviation.as_str()))
        .map(|p| p.abbreviation.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn codes(deputies: &[&Deputy]) -> Vec<String> {
        deputies.iter().map(|d| d.code.clone()).collect()
    }

    #[test]
    fn everyone_selects_the_whole_table() {
        let assembly = small_assembly();
        let selection = DeputySelection::everyone(&assembly.parties);
        let res = filter_deputies(&assembly.deputies, &selection);
        assert_eq!(res.len(), assembly.deputies.len());
    }

    #[test]
    fn criteria_are_combined() {
        let assembly = small_assembly();
        let selection = DeputySelection {
            department: DepartmentSelection::parse("Paris (75)"),
            sex: SexSelection::Male,
            parties: vec!["LAREM".to_string(), "REP".to_string()],
        };
        let res = filter_deputies(&assembly.deputies, &selection);
        assert_eq!(codes(&res), vec!["PA2", "PA5"]);
    }

    #[test]
    fn empty_selection_is_valid() {
        let assembly = small_assembly();
        let selection = DeputySelection {
            department: DepartmentSelection::parse("Gironde (33)"),
            sex: SexSelection::Both,
            parties: vec!["REP".to_string()],
        };
        let res = filter_deputies(&assembly.deputies, &selection);
        assert!(res.is_empty());
        assert!(selectable_deputies(&res).is_empty());
    }

    #[test]
    fn sex_selection() {
        assert_eq!(SexSelection::parse("both"), Some(SexSelection::Both));
        assert_eq!(SexSelection::parse("Female"), Some(SexSelection::Female));
        assert_eq!(SexSelection::parse("other"), None);
        assert_eq!(SexSelection::Both.sexes(), vec![Sex::Female, Sex::Male]);
    }

    #[test]
    fn selectable_names_are_ordered_by_sex_then_name() {
        let assembly = small_assembly();
        let all: Vec<&Deputy> = assembly.deputies.iter().collect();
        assert_eq!(
            selectable_deputies(&all),
            vec![
                "Anne Martin",
                "Claire Petit",
                "Bernard Durand",
                "David Moreau",
                "Eric Blanc"
            ]
        );
    }

    #[test]
    fn departments_are_ordered_by_code() {
        let assembly = small_assembly();
        assert_eq!(
            department_choices(&assembly.deputies),
            vec!["Gironde (33)", "Paris (75)"]
        );
        assert_eq!(
            party_choices(&assembly.parties),
            vec!["LAREM", "REP", "FI"]
        );
    }
}
