// A small, consistent assembly shared by the unit tests.

use std::sync::Arc;

use crate::*;

pub const FIXTURE_YEAR: i32 = 2020;

#[allow(clippy::too_many_arguments)]
pub fn deputy(
    code: &str,
    first_name: &str,
    family_name: &str,
    sex: Sex,
    date_of_birth: &str,
    department: (&str, &str),
    party: &str,
    activity: &str,
) -> Deputy {
    Deputy {
        code: code.to_string(),
        first_name: first_name.to_string(),
        family_name: family_name.to_string(),
        sex,
        date_of_birth: date_of_birth.to_string(),
        age: age_from_birth_date(date_of_birth, FIXTURE_YEAR),
        department: department.0.to_string(),
        department_code: department.1.to_string(),
        circumscription: None,
        party: party.to_string(),
        activity: activity.to_string(),
    }
}

pub fn party(abbreviation: &str, members: u64) -> PoliticalParty {
    PoliticalParty {
        abbreviation: abbreviation.to_string(),
        name: format!("Parti {}", abbreviation),
        members,
        color: "grey".to_string(),
    }
}

pub fn organ(code: &str, name: &str, organ_type: &str) -> Organ {
    Organ {
        code: code.to_string(),
        name: name.to_string(),
        organ_type: OrganType::from_code(organ_type),
    }
}

pub fn member(deputy_code: &str, organ_code: &str) -> DeputyOrganMembership {
    DeputyOrganMembership {
        deputy_code: deputy_code.to_string(),
        organ_code: organ_code.to_string(),
    }
}

pub fn event(code: &str, votes_for: u64, voters: u64, required: u64) -> VoteEvent {
    VoteEvent {
        code: code.to_string(),
        date: Some(VoteDate {
            year: 2019,
            month: 7,
            day: 14,
        }),
        votes_for,
        voters,
        required,
        requesters: vec![],
    }
}

pub fn record(event: &str, deputy: &str, flags: VoteFlags) -> VoteRecord {
    VoteRecord {
        event: event.to_string(),
        deputy: deputy.to_string(),
        flags,
        cause: NO_CAUSE.to_string(),
    }
}

pub fn in_favor() -> VoteFlags {
    VoteFlags {
        in_favor: 1.0,
        ..VoteFlags::default()
    }
}

pub fn against() -> VoteFlags {
    VoteFlags {
        against: 1.0,
        ..VoteFlags::default()
    }
}

pub fn abstention() -> VoteFlags {
    VoteFlags {
        abstention: 1.0,
        ..VoteFlags::default()
    }
}

pub fn absent() -> VoteFlags {
    VoteFlags {
        absent: 1.0,
        ..VoteFlags::default()
    }
}

pub fn by_delegation() -> VoteFlags {
    VoteFlags {
        by_delegation: 1.0,
        ..VoteFlags::default()
    }
}

pub fn small_assembly() -> Assembly {
    let paris = ("Paris", "75");
    let gironde = ("Gironde", "33");
    Assembly {
        deputies: Arc::new(vec![
            deputy("PA1", "Anne", "Martin", Sex::Female, "1970-05-01", paris, "LAREM", "Cadre"),
            deputy("PA2", "Bernard", "Durand", Sex::Male, "1960-01-01", paris, "REP", "Avocat"),
            deputy("PA3", "Claire", "Petit", Sex::Female, "1980-02-03", gironde, "LAREM", "Cadre"),
            deputy("PA4", "David", "Moreau", Sex::Male, "inconnue", gironde, "FI", "Enseignant"),
            deputy("PA5", "Eric", "Blanc", Sex::Male, "1975-11-30", paris, "LAREM", "Avocat"),
        ]),
        parties: Arc::new(vec![party("LAREM", 3), party("REP", 1), party("FI", 1)]),
        organs: Arc::new(vec![
            organ("O1", "Commission des finances", "COMPER"),
            organ("O2", "Groupe d'études vigne", "GE"),
            organ("O3", "Groupe d'études mer", "GE"),
            organ("O4", "Groupe La République en Marche", "GP"),
            organ("O5", "Commission des lois", "COMPER"),
        ]),
        memberships: Arc::new(vec![
            member("PA1", "O1"),
            member("PA1", "O2"),
            member("PA1", "O3"),
            member("PA1", "O4"),
            member("PA2", "O5"),
            member("PA3", "O2"),
            member("PA4", "O1"),
            member("PA4", "O5"),
        ]),
        vote_events: Arc::new(vec![event("V1", 101, 200, 101), event("V2", 100, 200, 101)]),
        vote_records: Arc::new(vec![
            record("V1", "PA1", in_favor()),
            record("V1", "PA2", against()),
            record("V1", "PA3", in_favor()),
            record("V1", "PA5", abstention()),
            record("V2", "PA1", against()),
            record("V2", "PA2", absent()),
            record("V2", "PA3", by_delegation()),
            record("V2", "PA5", in_favor()),
        ]),
    }
}
