//! The organs (committees, study groups, ...) a deputy belongs to.

use log::debug;
use std::collections::{HashMap, HashSet};

use crate::model::*;

/// The organs of a deputy, without the organs of the excluded types.
///
/// Organs that only differ by their code are reported once, in the order of
/// the memberships.
pub fn deputy_organs(
    deputy_code: &str,
    memberships: &[DeputyOrganMembership],
    organs: &[Organ],
    excluded: &[OrganType],
) -> Vec<Organ> {
    let mut organs_by_code: HashMap<&str, Vec<&Organ>> = HashMap::new();
    for o in organs.iter() {
        organs_by_code.entry(o.code.as_str()).or_default().push(o);
    }

    let mut seen: HashSet<(&str, &OrganType)> = HashSet::new();
    let mut res: Vec<Organ> = Vec::new();
    for m in memberships.iter().filter(|m| m.deputy_code == deputy_code) {
        let joined = match organs_by_code.get(m.organ_code.as_str()) {
            Some(x) => x,
            None => {
                debug!(
                    "deputy_organs: {}: no organ with code {}",
                    deputy_code, m.organ_code
                );
                continue;
            }
        };
        for o in joined.iter() {
            if excluded.contains(&o.organ_type) {
                continue;
            }
            if seen.insert((o.name.as_str(), &o.organ_type)) {
                res.push((*o).clone());
            }
        }
    }
    debug!("deputy_organs: {}: {} organs", deputy_code, res.len());
    res
}

/// The standing committee of a deputy. Every deputy sits in exactly one.
pub fn home_committee<'a>(deputy_code: &str, organs: &'a [Organ]) -> Result<&'a Organ, StatsErrors> {
    let committees: Vec<&Organ> = organs
        .iter()
        .filter(|o| o.organ_type == OrganType::Committee)
        .collect();
    match committees.as_slice() {
        [] => Err(StatsErrors::MissingHomeCommittee(deputy_code.to_string())),
        [c] => Ok(*c),
        _ => Err(StatsErrors::MultipleHomeCommittees {
            deputy: deputy_code.to_string(),
            committees: committees.iter().map(|c| c.name.clone()).collect(),
        }),
    }
}

pub fn study_groups(organs: &[Organ]) -> Vec<&Organ> {
    organs
        .iter()
        .filter(|o| o.organ_type == OrganType::StudyGroup)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn administrative_organs_are_excluded() {
        let assembly = small_assembly();
        let res = deputy_organs(
            "PA1",
            &assembly.memberships,
            &assembly.organs,
            &OrganType::ADMINISTRATIVE,
        );
        let types: Vec<&str> = res.iter().map(|o| o.organ_type.code()).collect();
        assert_eq!(types, vec!["COMPER", "GE", "GE"]);
        assert_eq!(
            home_committee("PA1", &res).map(|o| o.code.as_str()),
            Ok("O1")
        );
        assert_eq!(study_groups(&res).len(), 2);
    }

    #[test]
    fn no_exclusion_keeps_everything() {
        let assembly = small_assembly();
        let res = deputy_organs("PA1", &assembly.memberships, &assembly.organs, &[]);
        assert_eq!(res.len(), 4);
    }

    #[test]
    fn identical_rows_are_reported_once() {
        let organs = vec![
            organ("O1", "Commission des finances", "COMPER"),
            organ("O1bis", "Commission des finances", "COMPER"),
            organ("O2", "Groupe d'études vigne", "GE"),
        ];
        let memberships = vec![
            member("PA1", "O1"),
            member("PA1", "O1"),
            member("PA1", "O1bis"),
            member("PA1", "O2"),
            member("PA1", "O404"),
        ];
        let res = deputy_organs("PA1", &memberships, &organs, &OrganType::ADMINISTRATIVE);
        let codes: Vec<&str> = res.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["O1", "O2"]);
        assert!(home_committee("PA1", &res).is_ok());
    }

    #[test]
    fn missing_committee_is_an_error() {
        let assembly = small_assembly();
        let res = deputy_organs(
            "PA3",
            &assembly.memberships,
            &assembly.organs,
            &OrganType::ADMINISTRATIVE,
        );
        assert_eq!(res.len(), 1);
        assert_eq!(
            home_committee("PA3", &res),
            Err(StatsErrors::MissingHomeCommittee("PA3".to_string()))
        );
    }

    #[test]
    fn several_committees_is_an_error() {
        let assembly = small_assembly();
        let res = deputy_organs(
            "PA4",
            &assembly.memberships,
            &assembly.organs,
            &OrganType::ADMINISTRATIVE,
        );
        assert!(matches!(
            home_committee("PA4", &res),
            Err(StatsErrors::MultipleHomeCommittees { committees, .. }) if committees.len() == 2
        ));
    }

    #[test]
    fn deputy_without_membership() {
        let assembly = small_assembly();
        let res = deputy_organs(
            "PA5",
            &assembly.memberships,
            &assembly.organs,
            &OrganType::ADMINISTRATIVE,
        );
        assert!(res.is_empty());
        assert!(study_groups(&res).is_empty());
    }
}
