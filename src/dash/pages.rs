// Assembly of the JSON documents of the three pages.

use assemblee_stats::aggregate::VoteTable;
use assemblee_stats::demographics::*;
use assemblee_stats::membership::*;
use serde_json::json;

use crate::dash::*;

/// The settings that change the content of the pages.
#[derive(PartialEq, Debug, Clone)]
pub struct PageSettings {
    pub excluded_organ_types: Vec<OrganType>,
    pub age_histogram_bins: usize,
    pub portrait_directory: Option<PathBuf>,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            excluded_organ_types: OrganType::ADMINISTRATIVE.to_vec(),
            age_histogram_bins: DEFAULT_AGE_BINS,
            portrait_directory: None,
        }
    }
}

/// The two parties shown side by side on the parties page.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartyComparison {
    pub party1: String,
    pub party2: String,
}

impl PartyComparison {
    /// Both parties default to the party of the first deputy.
    pub fn resolve(
        assembly: &Assembly,
        party1: Option<&str>,
        party2: Option<&str>,
    ) -> DashResult<PartyComparison> {
        let default_party = assembly.deputies.first().map(|d| d.party.as_str());
        let mut picked: Vec<String> = Vec::new();
        for p in [party1, party2] {
            let abbreviation = match p.or(default_party) {
                Some(x) => x,
                None => whatever!("No deputy found, cannot choose a party to compare"),
            };
            if assembly.party(abbreviation).is_none() {
                return Err(DashError::Stats {
                    source: StatsErrors::UnknownParty(abbreviation.to_string()),
                });
            }
            picked.push(abbreviation.to_string());
        }
        Ok(PartyComparison {
            party2: picked.pop().unwrap_or_default(),
            party1: picked.pop().unwrap_or_default(),
        })
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// A rate between 0 and 1 as a percentage.
fn pct(rate: f64) -> f64 {
    round2(100.0 * rate)
}

fn rates_js(rates: &OutcomeRates) -> JSValue {
    json!({
        "inFavor": pct(rates.in_favor),
        "against": pct(rates.against),
        "abstention": pct(rates.abstention),
        "absent": pct(rates.absent),
        "byDelegation": pct(rates.by_delegation),
    })
}

fn counts_js(counts: &OutcomeCounts) -> JSValue {
    json!({
        "inFavor": counts.in_favor,
        "against": counts.against,
        "abstention": counts.abstention,
        "absent": counts.absent,
        "byDelegation": counts.by_delegation,
        "votes": counts.votes,
    })
}

fn organ_js(organ: &Organ) -> JSValue {
    json!({
        "code": organ.code,
        "name": organ.name,
        "type": organ.organ_type.code(),
    })
}

fn sex_selection_label(sex: &SexSelection) -> &'static str {
    match sex {
        SexSelection::Both => "both",
        SexSelection::Female => Sex::Female.label(),
        SexSelection::Male => Sex::Male.label(),
    }
}

fn global_js(table: &VoteTable) -> JSValue {
    let global = table.global_stats();
    json!({
        "numEvents": global.num_events,
        "numDeputies": global.num_deputies,
        "counts": counts_js(&global.counts),
        "rates": global.rates.as_ref().map(rates_js),
        "participationRate": pct(global.participation_rate),
    })
}

fn deputy_js(assembly: &Assembly, deputy: &Deputy) -> JSValue {
    let party = assembly.party(&deputy.party);
    json!({
        "code": deputy.code,
        "title": deputy.title(),
        "firstName": deputy.first_name,
        "familyName": deputy.family_name,
        "fullName": deputy.full_name(),
        "sex": deputy.sex.label(),
        "dateOfBirth": deputy.date_of_birth,
        "age": deputy.age,
        "departement": deputy.departement(),
        "circumscription": deputy.circumscription,
        "party": deputy.party,
        "partyName": party.map(|p| p.name.clone()),
        "partyColor": party.map(|p| p.color.clone()),
        "activity": deputy.activity,
    })
}

fn portrait_path(deputy: &Deputy, settings: &PageSettings) -> Option<String> {
    let dir = settings.portrait_directory.as_ref()?;
    let p = dir.join(format!("{}.jpg", deputy.code));
    if p.exists() {
        Some(p.display().to_string())
    } else {
        debug!("portrait_path: no portrait for {} in {:?}", deputy.code, dir);
        None
    }
}

/// The biography, the organs and the votes of one deputy, picked among the
/// deputies of the selection.
pub fn deputy_page(
    assembly: &Assembly,
    table: &VoteTable,
    selection: &DeputySelection,
    deputy: Option<&str>,
    settings: &PageSettings,
) -> BDashResult<JSValue> {
    let filtered = filter_deputies(&assembly.deputies, selection);
    let names = selectable_deputies(&filtered);
    let chosen: Option<&Deputy> = match deputy {
        Some(name) => Some(
            filtered
                .iter()
                .find(|d| d.full_name() == name)
                .copied()
                .context(UnknownDeputyNameSnafu { name })?,
        ),
        None => names
            .first()
            .and_then(|name| filtered.iter().find(|d| d.full_name() == *name))
            .copied(),
    };

    let department = match &selection.department {
        DepartmentSelection::All => "all".to_string(),
        DepartmentSelection::Only(x) => x.clone(),
    };
    let mut page = json!({
        "page": "deputy",
        "selection": {
            "departement": department,
            "sex": sex_selection_label(&selection.sex),
            "parties": selection.parties,
        },
        "departementChoices": department_choices(&assembly.deputies),
        "partyChoices": party_choices(&assembly.parties),
        "selectableDeputies": names,
        "assemblyVoting": global_js(table),
        "deputy": JSValue::Null,
        "organs": [],
        "homeCommittee": JSValue::Null,
        "studyGroups": [],
        "portrait": JSValue::Null,
        "voting": JSValue::Null,
    });

    let d = match chosen {
        Some(d) => d,
        None => {
            warn!("deputy_page: no deputy in the selection {:?}", selection);
            return Ok(page);
        }
    };
    info!("deputy_page: {} ({})", d.full_name(), d.code);

    let organs = deputy_organs(
        &d.code,
        &assembly.memberships,
        &assembly.organs,
        &settings.excluded_organ_types,
    );
    let home = match home_committee(&d.code, &organs) {
        Ok(c) => organ_js(c),
        Err(e) => {
            warn!("deputy_page: {}", e);
            json!({ "error": e.to_string() })
        }
    };
    let stats = table.deputy_stats(&d.code);

    page["deputy"] = deputy_js(assembly, d);
    page["organs"] = JSValue::Array(organs.iter().map(organ_js).collect());
    page["homeCommittee"] = home;
    page["studyGroups"] = JSValue::Array(study_groups(&organs).into_iter().map(organ_js).collect());
    page["portrait"] = json!(portrait_path(d, settings));
    page["voting"] = json!({
        "counts": counts_js(&stats.counts),
        "rates": stats.rates.as_ref().map(rates_js),
        "participationRate": pct(stats.participation_rate),
    });
    Ok(page)
}

fn party_voting_js(stats: &PartyVotingStats) -> JSValue {
    json!({
        "party": stats.party,
        "members": stats.members,
        "counts": counts_js(&stats.counts),
        "rates": rates_js(&stats.rates),
        "participationRate": pct(stats.participation_rate),
    })
}

fn women_share_js(share: &WomenShare) -> JSValue {
    json!({
        "party": share.party,
        "female": share.female,
        "male": share.male,
        "total": share.total(),
        "femaleShare": pct(share.female_share),
    })
}

fn party_js(
    assembly: &Assembly,
    abbreviation: &str,
    sizes: &[PartySize],
    voting: &[PartyVotingStats],
    women: &[WomenShare],
    settings: &PageSettings,
) -> JSValue {
    let members: Vec<&Deputy> = assembly
        .deputies
        .iter()
        .filter(|d| d.party == abbreviation)
        .collect();
    let size = sizes.iter().find(|s| s.party == abbreviation);
    let histogram: Vec<JSValue> = age_histogram(&members, settings.age_histogram_bins)
        .iter()
        .map(|b| {
            json!({
                "lower": round2(b.lower),
                "upper": round2(b.upper),
                "count": b.count,
                "percentage": pct(b.probability),
            })
        })
        .collect();
    let activities: Vec<JSValue> = activity_repartition(&members)
        .into_iter()
        .map(|(activity, count)| json!({ "activity": activity, "count": count }))
        .collect();
    let party = assembly.party(abbreviation);
    json!({
        "abbreviation": abbreviation,
        "name": party.map(|p| p.name.clone()),
        "color": party.map(|p| p.color.clone()),
        "officialMembers": party.map(|p| p.members),
        "deputies": size.map(|s| s.deputies).unwrap_or(0),
        "share": round2(size.map(|s| s.share).unwrap_or(0.0)),
        "ageHistogram": histogram,
        "womenShare": women.iter().find(|w| w.party == abbreviation).map(women_share_js),
        "activities": activities,
        "voting": voting.iter().find(|v| v.party == abbreviation).map(party_voting_js),
    })
}

/// Two parties side by side, and the rankings of all the parties.
pub fn parties_page(
    assembly: &Assembly,
    table: &VoteTable,
    party1: Option<&str>,
    party2: Option<&str>,
    settings: &PageSettings,
) -> BDashResult<JSValue> {
    let comparison = PartyComparison::resolve(assembly, party1, party2)?;
    info!("parties_page: {:?}", comparison);
    let sizes = party_sizes(&assembly.deputies);
    let voting = table.party_stats(&assembly.deputies, &assembly.parties);
    let women = women_share_by_party(&assembly.deputies);

    let member_counts: Vec<JSValue> = sizes
        .iter()
        .map(|s| {
            json!({
                "party": s.party,
                "deputies": s.deputies,
                "share": round2(s.share),
            })
        })
        .collect();
    Ok(json!({
        "page": "parties",
        "party1": party_js(assembly, &comparison.party1, &sizes, &voting, &women, settings),
        "party2": party_js(assembly, &comparison.party2, &sizes, &voting, &women, settings),
        "memberCounts": member_counts,
        "participationRanking": voting.iter().map(party_voting_js).collect::<Vec<JSValue>>(),
        "womenRanking": women.iter().map(women_share_js).collect::<Vec<JSValue>>(),
        "assemblyVoting": global_js(table),
    }))
}

/// Every vote event, in the order of the table.
pub fn votes_page(assembly: &Assembly) -> JSValue {
    let events: Vec<JSValue> = assembly
        .vote_events
        .iter()
        .map(|e| {
            let requesters: serde_json::Map<String, JSValue> = e
                .requesters
                .iter()
                .map(|(field, value)| {
                    let v = if value.is_empty() {
                        JSValue::Null
                    } else {
                        json!(value)
                    };
                    (field.clone(), v)
                })
                .collect();
            json!({
                "code": e.code,
                "date": e.date.map(|d| format!("{:04}-{:02}-{:02}", d.year, d.month, d.day)),
                "year": e.date.map(|d| d.year),
                "month": e.date.map(|d| d.month),
                "day": e.date.map(|d| d.day),
                "votesFor": e.votes_for,
                "voters": e.voters,
                "required": e.required,
                "percentageInFavor": e.percentage_in_favor().map(round2),
                "accepted": e.accepted(),
                "requesters": requesters,
            })
        })
        .collect();
    let accepted = assembly.vote_events.iter().filter(|e| e.accepted()).count();
    info!(
        "votes_page: {} vote events, {} accepted",
        events.len(),
        accepted
    );
    json!({
        "page": "votes",
        "numEvents": events.len(),
        "numAccepted": accepted,
        "voteEvents": events,
    })
}
