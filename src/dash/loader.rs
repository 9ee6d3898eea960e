use crate::dash::{cache::TableCache, io_csv::*, *};

/// Loads the six tables of an [Assembly], reusing the tables whose file did
/// not change since the previous load.
pub struct AssemblyLoader {
    paths: DataPaths,
    deputies: TableCache<Deputy>,
    parties: TableCache<PoliticalParty>,
    organs: TableCache<Organ>,
    memberships: TableCache<DeputyOrganMembership>,
    vote_events: TableCache<VoteEvent>,
    vote_records: TableCache<VoteRecord>,
}

impl AssemblyLoader {
    pub fn new(paths: DataPaths) -> AssemblyLoader {
        AssemblyLoader {
            paths,
            deputies: TableCache::new(),
            parties: TableCache::new(),
            organs: TableCache::new(),
            memberships: TableCache::new(),
            vote_events: TableCache::new(),
            vote_records: TableCache::new(),
        }
    }

    /// The ages of the deputies are computed for `today`.
    pub fn load(&mut self, today: NaiveDate) -> BDashResult<Assembly> {
        let deputies =
            self.deputies
                .get_or_load(&self.paths.deputies, Some(today), |p| read_deputies(p, today))?;
        let parties = self
            .parties
            .get_or_load(&self.paths.parties, None, read_parties)?;
        let organs = self
            .organs
            .get_or_load(&self.paths.organs, None, read_organs)?;
        let memberships =
            self.memberships
                .get_or_load(&self.paths.memberships, None, read_memberships)?;
        let vote_events =
            self.vote_events
                .get_or_load(&self.paths.vote_events, None, read_vote_events)?;
        let vote_records =
            self.vote_records
                .get_or_load(&self.paths.vote_records, None, read_vote_records)?;
        info!(
            "load: {} deputies, {} parties, {} organs, {} memberships, {} vote events, {} vote records",
            deputies.len(),
            parties.len(),
            organs.len(),
            memberships.len(),
            vote_events.len(),
            vote_records.len()
        );
        Ok(Assembly {
            deputies,
            parties,
            organs,
            memberships,
            vote_events,
            vote_records,
        })
    }

    /// Forgets all the tables: the next load reads every file again.
    pub fn clear(&mut self) {
        self.deputies.clear();
        self.parties.clear();
        self.organs.clear();
        self.memberships.clear();
        self.vote_events.clear();
        self.vote_records.clear();
    }

    /// The number of tables that were parsed since the creation of the loader.
    pub fn cache_misses(&self) -> usize {
        self.deputies.misses()
            + self.parties.misses()
            + self.organs.misses()
            + self.memberships.misses()
            + self.vote_events.misses()
            + self.vote_records.misses()
    }

    pub fn cache_hits(&self) -> usize {
        self.deputies.hits()
            + self.parties.hits()
            + self.organs.hits()
            + self.memberships.hits()
            + self.vote_events.hits()
            + self.vote_records.hits()
    }
}
