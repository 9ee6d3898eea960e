// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The value used for the cause of a vote record when none was recorded.
pub const NO_CAUSE: &str = "none";

/// The sex of a deputy, as written in the deputies table.
///
/// The ordering (female first) is the display ordering of the deputy lists.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn parse(s: &str) -> Option<Sex> {
        match s.trim().to_lowercase().as_str() {
            "female" => Some(Sex::Female),
            "male" => Some(Sex::Male),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }

    /// The salutation used in front of the full name.
    pub fn title(&self) -> &'static str {
        match self {
            Sex::Female => "Mme.",
            Sex::Male => "Mr.",
        }
    }
}

/// An elected member of the National Assembly.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Deputy {
    pub code: String,
    pub first_name: String,
    pub family_name: String,
    pub sex: Sex,
    /// As found in the source, usually `YYYY-MM-DD`.
    pub date_of_birth: String,
    /// Computed by the loader against the date of the load. `None` when the
    /// date of birth could not be read.
    pub age: Option<i32>,
    pub department: String,
    /// Department number. Kept as text because of Corsica (`2A`, `2B`).
    pub department_code: String,
    pub circumscription: Option<String>,
    /// Abbreviation of the political party.
    pub party: String,
    pub activity: String,
}

impl Deputy {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }

    pub fn title(&self) -> &'static str {
        self.sex.title()
    }

    /// The label of the department, as shown in the selection lists.
    pub fn departement(&self) -> String {
        format!("{} ({})", self.department, self.department_code)
    }
}

/// The age in `current_year` of someone born at `date_of_birth`.
///
/// Only the year (the first four characters) of the date is considered.
pub fn age_from_birth_date(date_of_birth: &str, current_year: i32) -> Option<i32> {
    let year = date_of_birth.trim().get(0..4)?.parse::<i32>().ok()?;
    Some(current_year - year)
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PoliticalParty {
    pub abbreviation: String,
    pub name: String,
    /// The official number of members. This is used as the denominator of the
    /// per-party statistics, it is not recomputed from the deputies.
    pub members: u64,
    pub color: String,
}

/// The category of an organ of the Assembly.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub enum OrganType {
    /// `COMPER`: a standing committee.
    Committee,
    /// `GE`: a study group.
    StudyGroup,
    /// `GA`
    FriendshipGroup,
    /// `PARPOL`
    PoliticalParty,
    /// `ASSEMBLEE`
    Assembly,
    /// `GP`
    ParliamentaryGroup,
    Other(String),
}

impl OrganType {
    /// The organ types that are not shown with the memberships of a deputy.
    pub const ADMINISTRATIVE: [OrganType; 4] = [
        OrganType::FriendshipGroup,
        OrganType::PoliticalParty,
        OrganType::Assembly,
        OrganType::ParliamentaryGroup,
    ];

    pub fn from_code(code: &str) -> OrganType {
        match code.trim() {
            "COMPER" => OrganType::Committee,
            "GE" => OrganType::StudyGroup,
            "GA" => OrganType::FriendshipGroup,
            "PARPOL" => OrganType::PoliticalParty,
            "ASSEMBLEE" => OrganType::Assembly,
            "GP" => OrganType::ParliamentaryGroup,
            x => OrganType::Other(x.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            OrganType::Committee => "COMPER",
            OrganType::StudyGroup => "GE",
            OrganType::FriendshipGroup => "GA",
            OrganType::PoliticalParty => "PARPOL",
            OrganType::Assembly => "ASSEMBLEE",
            OrganType::ParliamentaryGroup => "GP",
            OrganType::Other(x) => x.as_str(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Organ {
    pub code: String,
    pub name: String,
    pub organ_type: OrganType,
}

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct DeputyOrganMembership {
    pub deputy_code: String,
    pub organ_code: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct VoteDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// A roll-call vote (scrutin).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteEvent {
    pub code: String,
    /// `None` when the date in the source is not a valid calendar date.
    pub date: Option<VoteDate>,
    pub votes_for: u64,
    pub voters: u64,
    pub required: u64,
    /// The requesters of the vote, as (field, value). The field names are
    /// stripped from their `demandeur ` prefix. Every field of the source is
    /// present, with an empty value when the cell is empty.
    pub requesters: Vec<(String, String)>,
}

impl VoteEvent {
    /// Percentage (0-100) of the voters who voted for the motion.
    pub fn percentage_in_favor(&self) -> Option<f64> {
        if self.voters == 0 {
            None
        } else {
            Some(100.0 * self.votes_for as f64 / self.voters as f64)
        }
    }

    /// Reaching the required number of votes is enough.
    pub fn accepted(&self) -> bool {
        self.votes_for >= self.required
    }
}

/// The outcome indicators of one vote record.
///
/// At most one of them is expected to be non-zero for a given record.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct VoteFlags {
    pub in_favor: f64,
    pub against: f64,
    pub abstention: f64,
    /// Present but not voting (`non votants`).
    pub absent: f64,
    pub by_delegation: f64,
}

/// The participation of one deputy to one vote event.
#[derive(PartialEq, Debug, Clone)]
pub struct VoteRecord {
    pub event: String,
    pub deputy: String,
    pub flags: VoteFlags,
    /// [NO_CAUSE] when the source does not provide one.
    pub cause: String,
}

// ******** Output data structures *********

/// Sums of the outcome indicators over a set of vote records.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct OutcomeCounts {
    pub in_favor: f64,
    pub against: f64,
    pub abstention: f64,
    pub absent: f64,
    pub by_delegation: f64,
    /// Number of records.
    pub votes: u64,
}

impl OutcomeCounts {
    pub fn add_record(&mut self, flags: &VoteFlags) {
        self.in_favor += flags.in_favor;
        self.against += flags.against;
        self.abstention += flags.abstention;
        self.absent += flags.absent;
        self.by_delegation += flags.by_delegation;
        self.votes += 1;
    }

    /// Every sum divided by the same denominator.
    ///
    /// The caller is responsible for the denominator not being zero.
    pub fn rates_over(&self, denominator: f64) -> OutcomeRates {
        OutcomeRates {
            in_favor: self.in_favor / denominator,
            against: self.against / denominator,
            abstention: self.abstention / denominator,
            absent: self.absent / denominator,
            by_delegation: self.by_delegation / denominator,
        }
    }
}

impl std::ops::AddAssign for OutcomeCounts {
    fn add_assign(&mut self, rhs: OutcomeCounts) {
        self.in_favor += rhs.in_favor;
        self.against += rhs.against;
        self.abstention += rhs.abstention;
        self.absent += rhs.absent;
        self.by_delegation += rhs.by_delegation;
        self.votes += rhs.votes;
    }
}

/// Rates between 0 and 1 for each outcome.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct OutcomeRates {
    pub in_favor: f64,
    pub against: f64,
    pub abstention: f64,
    pub absent: f64,
    pub by_delegation: f64,
}

impl OutcomeRates {
    pub fn total(&self) -> f64 {
        self.in_favor + self.against + self.abstention + self.absent + self.by_delegation
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct DeputyVotingStats {
    pub deputy: String,
    pub counts: OutcomeCounts,
    /// Outcomes relative to the votes of the deputy. `None` when the deputy
    /// has no vote record.
    pub rates: Option<OutcomeRates>,
    /// Share of all the vote events in which the deputy has a record.
    pub participation_rate: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct PartyVotingStats {
    pub party: String,
    pub members: u64,
    pub counts: OutcomeCounts,
    /// Outcomes relative to (members x vote events).
    pub rates: OutcomeRates,
    pub participation_rate: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct GlobalVotingStats {
    pub counts: OutcomeCounts,
    pub rates: Option<OutcomeRates>,
    pub num_events: usize,
    pub num_deputies: usize,
    pub participation_rate: f64,
}

/// Errors caused by datasets that are not consistent with each other.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StatsErrors {
    UnknownDeputy { deputy: String, event: String },
    UnknownVoteEvent { event: String, deputy: String },
    UnknownParty(String),
    MissingHomeCommittee(String),
    MultipleHomeCommittees { deputy: String, committees: Vec<String> },
}

impl Error for StatsErrors {}

impl Display for StatsErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsErrors::UnknownDeputy { deputy, event } => write!(
                f,
                "vote record for event {} references unknown deputy {}",
                event, deputy
            ),
            StatsErrors::UnknownVoteEvent { event, deputy } => write!(
                f,
                "vote record for deputy {} references unknown vote event {}",
                deputy, event
            ),
            StatsErrors::UnknownParty(p) => write!(f, "unknown political party {}", p),
            StatsErrors::MissingHomeCommittee(d) => {
                write!(f, "deputy {} is not a member of any committee", d)
            }
            StatsErrors::MultipleHomeCommittees { deputy, committees } => write!(
                f,
                "deputy {} is a member of several committees: {:?}",
                deputy, committees
            ),
        }
    }
}
