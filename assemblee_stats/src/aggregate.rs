//! Voting participation of deputies, of political parties and of the whole assembly.

use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

use crate::model::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct DeputyId(u32);

#[derive(PartialEq, Debug, Clone)]
struct RecordInternal {
    deputy: DeputyId,
    flags: VoteFlags,
}

/// The vote records, with deputies replaced by dense ids.
#[derive(Debug, Clone)]
pub struct VoteTable {
    records: Vec<RecordInternal>,
    deputy_ids: HashMap<String, DeputyId>,
    // Indexed by DeputyId
    deputy_codes: Vec<String>,
    num_events: usize,
}

impl VoteTable {
    /// Indexes the records as they are. See [crate::Assembly::vote_table] for
    /// a version that checks them against the other tables.
    pub fn new(records: &[VoteRecord]) -> VoteTable {
        let mut deputy_ids: HashMap<String, DeputyId> = HashMap::new();
        let mut deputy_codes: Vec<String> = Vec::new();
        let mut events: HashSet<&str> = HashSet::new();
        let mut internal: Vec<RecordInternal> = Vec::with_capacity(records.len());
        for r in records.iter() {
            let deputy = *deputy_ids.entry(r.deputy.clone()).or_insert_with(|| {
                deputy_codes.push(r.deputy.clone());
                DeputyId((deputy_codes.len() - 1) as u32)
            });
            events.insert(r.event.as_str());
            internal.push(RecordInternal {
                deputy,
                flags: r.flags,
            });
        }
        debug!(
            "VoteTable::new: {} records, {} deputies, {} events",
            internal.len(),
            deputy_codes.len(),
            events.len()
        );
        VoteTable {
            records: internal,
            deputy_ids,
            deputy_codes,
            num_events: events.len(),
        }
    }

    /// The number of distinct vote events found in the records.
    pub fn num_events(&self) -> usize {
        self.num_events
    }

    /// The number of distinct deputies found in the records.
    pub fn num_deputies(&self) -> usize {
        self.deputy_codes.len()
    }

    /// The voting behavior of one deputy over all of its votes.
    ///
    /// A deputy without any vote record is not an error: it has no rates and
    /// a participation of zero.
    pub fn deputy_stats(&self, deputy_code: &str) -> DeputyVotingStats {
        let mut counts = OutcomeCounts::default();
        if let Some(did) = self.deputy_ids.get(deputy_code) {
            for r in self.records.iter().filter(|r| r.deputy == *did) {
                counts.add_record(&r.flags);
            }
        }
        let (rates, participation_rate) = if counts.votes == 0 {
            debug!("deputy_stats: {}: no vote record", deputy_code);
            (None, 0.0)
        } else {
            (
                Some(counts.rates_over(counts.votes as f64)),
                counts.votes as f64 / self.num_events as f64,
            )
        };
        DeputyVotingStats {
            deputy: deputy_code.to_string(),
            counts,
            rates,
            participation_rate,
        }
    }

    /// The voting behavior of the members of each party.
    ///
    /// The sums are divided by (official number of members x number of vote
    /// events): this is the average engagement of the members over the whole
    /// calendar, not the behavior of the party in the votes it took part in.
    /// Parties that are not in `parties` are dropped. The result is sorted by
    /// decreasing participation.
    pub fn party_stats(
        &self,
        deputies: &[Deputy],
        parties: &[PoliticalParty],
    ) -> Vec<PartyVotingStats> {
        let party_by_code: HashMap<&str, &str> = deputies
            .iter()
            .map(|d| (d.code.as_str(), d.party.as_str()))
            .collect();
        // Indexed by DeputyId
        let party_of: Vec<Option<&str>> = self
            .deputy_codes
            .iter()
            .map(|code| party_by_code.get(code.as_str()).cloned())
            .collect();

        let mut by_party: HashMap<&str, OutcomeCounts> = HashMap::new();
        let mut unmatched: u64 = 0;
        for r in self.records.iter() {
            match party_of[r.deputy.0 as usize] {
                Some(p) => by_party.entry(p).or_default().add_record(&r.flags),
                None => unmatched += 1,
            }
        }
        if unmatched > 0 {
            warn!(
                "party_stats: {} vote records without a known deputy were skipped",
                unmatched
            );
        }

        let mut res: Vec<PartyVotingStats> = Vec::new();
        for (party, counts) in by_party.into_iter() {
            let pp = match parties.iter().find(|pp| pp.abbreviation == party) {
                Some(pp) => pp,
                None => {
                    warn!("party_stats: party {} is not in the parties table", party);
                    continue;
                }
            };
            let denominator = pp.members as f64 * self.num_events as f64;
            let (rates, participation_rate) = if denominator > 0.0 {
                (
                    counts.rates_over(denominator),
                    counts.votes as f64 / denominator,
                )
            } else {
                warn!("party_stats: party {} has no member", party);
                (OutcomeRates::default(), 0.0)
            };
            res.push(PartyVotingStats {
                party: party.to_string(),
                members: pp.members,
                counts,
                rates,
                participation_rate,
            });
        }
        res.sort_by(|a, b| {
            b.participation_rate
                .total_cmp(&a.participation_rate)
                .then_with(|| a.party.cmp(&b.party))
        });
        for p in res.iter() {
            info!(
                "party_stats: {} ({} members): participation {:.4}",
                p.party, p.members, p.participation_rate
            );
        }
        res
    }

    /// The behavior of the whole assembly, used as a baseline.
    pub fn global_stats(&self) -> GlobalVotingStats {
        let mut counts = OutcomeCounts::default();
        for r in self.records.iter() {
            counts.add_record(&r.flags);
        }
        let num_events = self.num_events;
        let num_deputies = self.num_deputies();
        let (rates, participation_rate) = if counts.votes == 0 {
            (None, 0.0)
        } else {
            (
                Some(counts.rates_over(counts.votes as f64)),
                counts.votes as f64 / (num_events as f64 * num_deputies as f64),
            )
        };
        GlobalVotingStats {
            counts,
            rates,
            num_events,
            num_deputies,
            participation_rate,
        }
    }
}
