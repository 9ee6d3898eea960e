use crate::dash::*;

/// The directory of the datasets when neither the command line nor the
/// configuration gives one.
pub const DEFAULT_DATA_DIRECTORY: &str = "data";

pub const DEFAULT_DEPUTIES_FILE: &str = "df_dep.csv";
pub const DEFAULT_VOTE_EVENTS_FILE: &str = "df_vote_descr.csv";
pub const DEFAULT_VOTE_RECORDS_FILE: &str = "df_vote_total.csv";
pub const DEFAULT_PARTIES_FILE: &str = "df_polpar.csv";
pub const DEFAULT_ORGANS_FILE: &str = "df_organs.csv";
pub const DEFAULT_MEMBERSHIPS_FILE: &str = "df_deputies_in_organs.csv";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFiles {
    pub deputies: Option<String>,
    #[serde(rename = "voteEvents")]
    pub vote_events: Option<String>,
    #[serde(rename = "voteRecords")]
    pub vote_records: Option<String>,
    pub parties: Option<String>,
    pub organs: Option<String>,
    pub memberships: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashConfig {
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    pub files: Option<DataFiles>,
    #[serde(rename = "excludedOrganTypes")]
    pub excluded_organ_types: Option<Vec<String>>,
    #[serde(rename = "ageHistogramBins")]
    pub age_histogram_bins: Option<usize>,
    #[serde(rename = "portraitDirectory")]
    pub portrait_directory: Option<String>,
}

impl DashConfig {
    pub fn excluded_organ_types(&self) -> Vec<OrganType> {
        match &self.excluded_organ_types {
            Some(codes) => codes.iter().map(|c| OrganType::from_code(c)).collect(),
            None => OrganType::ADMINISTRATIVE.to_vec(),
        }
    }

    pub fn age_histogram_bins(&self) -> DashResult<usize> {
        match self.age_histogram_bins {
            None => Ok(assemblee_stats::demographics::DEFAULT_AGE_BINS),
            Some(0) => whatever!("ageHistogramBins must be at least 1"),
            Some(x) => Ok(x),
        }
    }
}

/// The location of every dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DataPaths {
    pub deputies: PathBuf,
    pub vote_events: PathBuf,
    pub vote_records: PathBuf,
    pub parties: PathBuf,
    pub organs: PathBuf,
    pub memberships: PathBuf,
}

impl DataPaths {
    pub fn resolve(data_dir: &Path, files: Option<&DataFiles>) -> DataPaths {
        let empty = DataFiles::default();
        let files = files.unwrap_or(&empty);
        let pick = |x: &Option<String>, default: &str| -> PathBuf {
            data_dir.join(x.as_deref().unwrap_or(default))
        };
        DataPaths {
            deputies: pick(&files.deputies, DEFAULT_DEPUTIES_FILE),
            vote_events: pick(&files.vote_events, DEFAULT_VOTE_EVENTS_FILE),
            vote_records: pick(&files.vote_records, DEFAULT_VOTE_RECORDS_FILE),
            parties: pick(&files.parties, DEFAULT_PARTIES_FILE),
            organs: pick(&files.organs, DEFAULT_ORGANS_FILE),
            memberships: pick(&files.memberships, DEFAULT_MEMBERSHIPS_FILE),
        }
    }
}

pub fn read_config(path: &str) -> BDashResult<DashConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}
