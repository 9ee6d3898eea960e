/*!
Statistics over the open datasets of the French National Assembly.

The crate works on tables that have already been loaded in memory (see the
[manual] for the expected inputs). It does not perform any I/O:

* [filter] selects deputies by department, sex and political party,
* [membership] lists the committees and study groups of a deputy,
* [aggregate] computes the voting participation of deputies and parties,
* [demographics] describes the composition of the political parties.

```
use std::sync::Arc;
use assemblee_stats::*;

let assembly = Assembly {
    vote_records: Arc::new(vec![VoteRecord {
        event: "V1".to_string(),
        deputy: "PA1".to_string(),
        flags: VoteFlags { in_favor: 1.0, ..VoteFlags::default() },
        cause: NO_CAUSE.to_string(),
    }]),
    ..Assembly::default()
};
let table = aggregate::VoteTable::new(&assembly.vote_records);
assert_eq!(table.deputy_stats("PA1").participation_rate, 1.0);
```
*/
mod model;

pub mod aggregate;
pub mod demographics;
pub mod filter;
pub mod manual;
pub mod membership;

#[cfg(test)]
mod fixtures;

use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

pub use crate::model::*;

/// All the tables of one snapshot of the datasets.
///
/// The tables are shared: an `Assembly` is cheap to clone and is never
/// modified once built.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub deputies: Arc<Vec<Deputy>>,
    pub parties: Arc<Vec<PoliticalParty>>,
    pub organs: Arc<Vec<Organ>>,
    pub memberships: Arc<Vec<DeputyOrganMembership>>,
    pub vote_events: Arc<Vec<VoteEvent>>,
    pub vote_records: Arc<Vec<VoteRecord>>,
}

impl Assembly {
    pub fn deputy_by_code(&self, code: &str) -> Option<&Deputy> {
        self.deputies.iter().find(|d| d.code == code)
    }

    /// The first deputy with this full name.
    pub fn deputy_by_name(&self, full_name: &str) -> Option<&Deputy> {
        self.deputies.iter().find(|d| d.full_name() == full_name)
    }

    pub fn party(&self, abbreviation: &str) -> Option<&PoliticalParty> {
        self.parties.iter().find(|p| p.abbreviation == abbreviation)
    }

    /// Checks that every vote record points to a known deputy and a known vote event.
    pub fn check_vote_records(&self) -> Result<(), StatsErrors> {
        let deputies: HashSet<&str> = self.deputies.iter().map(|d| d.code.as_str()).collect();
        let events: HashSet<&str> = self.vote_events.iter().map(|e| e.code.as_str()).collect();
        for r in self.vote_records.iter() {
            if !deputies.contains(r.deputy.as_str()) {
                return Err(StatsErrors::UnknownDeputy {
                    deputy: r.deputy.clone(),
                    event: r.event.clone(),
                });
            }
            if !events.contains(r.event.as_str()) {
                return Err(StatsErrors::UnknownVoteEvent {
                    event: r.event.clone(),
                    deputy: r.deputy.clone(),
                });
            }
        }
        debug!(
            "check_vote_records: {} records checked",
            self.vote_records.len()
        );
        Ok(())
    }

    /// The vote records, checked and indexed for aggregation.
    pub fn vote_table(&self) -> Result<aggregate::VoteTable, StatsErrors> {
        self.check_vote_records()?;
        let table = aggregate::VoteTable::new(&self.vote_records);
        info!(
            "vote table: {} records, {} events, {} deputies",
            self.vote_records.len(),
            table.num_events(),
            table.num_deputies()
        );
        Ok(table)
    }
}
