use log::{debug, info, warn};

use assemblee_stats::filter::*;
use assemblee_stats::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dash::config_reader::*;
use crate::dash::loader::AssemblyLoader;
use crate::dash::pages::*;

pub mod cache;
pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod loader;
pub mod pages;

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Column {column:?} is missing in {path}"))]
    MissingColumn { path: String, column: String },
    #[snafu(display("Line {lineno} of {path}: invalid value {value:?} in column {column:?}"))]
    InvalidField {
        path: String,
        lineno: usize,
        column: String,
        value: String,
    },
    #[snafu(display("Cannot access file {path}"))]
    FileMetadata {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Inconsistent datasets"))]
    Stats { source: StatsErrors },
    #[snafu(display("No deputy named {name:?} in the current selection"))]
    UnknownDeputyName { name: String },
    #[snafu(display("The output differs from the reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type DashResult<T> = Result<T, DashError>;

pub type BDashResult<T> = Result<T, Box<DashError>>;

/// What the user asked to see.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum PageRequest {
    /// Biography, organs and votes of one deputy.
    Deputy {
        department: DepartmentSelection,
        sex: SexSelection,
        // Empty means all the parties
        parties: Vec<String>,
        deputy: Option<String>,
    },
    /// Comparison of two political parties.
    Parties {
        party1: Option<String>,
        party2: Option<String>,
    },
    /// All the vote events.
    Votes,
}

fn validate_args(args: &Args) -> DashResult<PageRequest> {
    let res = match args.page.as_deref().unwrap_or("deputy") {
        "deputy" => {
            let sex_s = args.sex.clone().unwrap_or_else(|| "both".to_string());
            let sex = match SexSelection::parse(&sex_s) {
                Some(x) => x,
                None => {
                    whatever!(
                        "Cannot understand sex selection {:?} (expected both, female or male)",
                        sex_s
                    )
                }
            };
            PageRequest::Deputy {
                department: DepartmentSelection::parse(
                    args.departement.as_deref().unwrap_or("all"),
                ),
                sex,
                parties: args.party.clone(),
                deputy: args.deputy.clone(),
            }
        }
        "parties" => PageRequest::Parties {
            party1: args.party1.clone(),
            party2: args.party2.clone(),
        },
        "votes" => PageRequest::Votes,
        x => {
            whatever!(
                "Unknown page {:?} (expected deputy, parties or votes)",
                x
            )
        }
    };
    Ok(res)
}

/// Finds the directory of the datasets: the command line wins over the
/// configuration, which is relative to the configuration file.
fn resolve_data_dir(args: &Args, config: &DashConfig) -> PathBuf {
    if let Some(d) = args.data_dir.clone() {
        return PathBuf::from(d);
    }
    let config_dir: Option<PathBuf> = args
        .config
        .as_ref()
        .and_then(|c| Path::new(c).parent().map(|p| p.to_path_buf()));
    match (config_dir, config.data_directory.clone()) {
        (Some(root), Some(d)) => root.join(d),
        (None, Some(d)) => PathBuf::from(d),
        (Some(root), None) => root,
        (None, None) => PathBuf::from(DEFAULT_DATA_DIRECTORY),
    }
}

/// Builds the JSON document of the requested page.
pub fn build_page(
    assembly: &Assembly,
    request: &PageRequest,
    settings: &PageSettings,
) -> BDashResult<JSValue> {
    match request {
        PageRequest::Deputy {
            department,
            sex,
            parties,
            deputy,
        } => {
            let selection = DeputySelection {
                department: department.clone(),
                sex: *sex,
                parties: if parties.is_empty() {
                    party_choices(&assembly.parties)
                } else {
                    parties.clone()
                },
            };
            let table = assembly.vote_table().context(StatsSnafu {})?;
            deputy_page(assembly, &table, &selection, deputy.as_deref(), settings)
        }
        PageRequest::Parties { party1, party2 } => {
            let table = assembly.vote_table().context(StatsSnafu {})?;
            parties_page(
                assembly,
                &table,
                party1.as_deref(),
                party2.as_deref(),
                settings,
            )
        }
        PageRequest::Votes => Ok(votes_page(assembly)),
    }
}

fn write_output(out: Option<&str>, contents: &str) -> BDashResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", contents);
        }
        Some(path) => {
            info!("Writing output to {:?}", path);
            fs::write(path, contents).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js: &str) -> BDashResult<()> {
    let contents =
        fs::read_to_string(reference_path).context(OpeningJsonSnafu {
            path: reference_path,
        })?;
    let reference: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty_js {
        warn!("Found differences with the reference summary");
        print_diff(pretty_reference.as_str(), pretty_js, "\n");
        return Err(Box::new(DashError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    Ok(())
}

/// A validated request, with the loader that keeps the tables between two
/// renderings of the page.
pub struct Session {
    request: PageRequest,
    settings: PageSettings,
    loader: AssemblyLoader,
}

impl Session {
    pub fn new(args: &Args) -> BDashResult<Session> {
        let config = match args.config.as_deref() {
            Some(p) => read_config(p)?,
            None => DashConfig::default(),
        };
        debug!("config: {:?}", config);
        let request = validate_args(args)?;
        info!("request: {:?}", request);

        let data_dir = resolve_data_dir(args, &config);
        let settings = PageSettings {
            excluded_organ_types: config.excluded_organ_types(),
            age_histogram_bins: config.age_histogram_bins()?,
            portrait_directory: config
                .portrait_directory
                .as_ref()
                .map(|d| data_dir.join(d)),
        };
        let paths = DataPaths::resolve(&data_dir, config.files.as_ref());
        Ok(Session {
            request,
            settings,
            loader: AssemblyLoader::new(paths),
        })
    }

    /// Loads the datasets and writes the page. Nothing is written when no
    /// dataset changed since the previous call, and false is returned.
    pub fn refresh(&mut self, args: &Args, today: NaiveDate) -> BDashResult<bool> {
        let misses = self.loader.cache_misses();
        let assembly = self.loader.load(today)?;
        debug!(
            "refresh: cache hits: {} misses: {}",
            self.loader.cache_hits(),
            self.loader.cache_misses()
        );
        if self.loader.cache_misses() == misses {
            return Ok(false);
        }

        let js = build_page(&assembly, &self.request, &self.settings)?;
        let pretty_js = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
        write_output(args.out.as_deref(), &pretty_js)?;

        if let Some(reference_path) = args.reference.as_deref() {
            check_reference(reference_path, &pretty_js)?;
        }
        Ok(true)
    }
}

/// Loads the datasets and produces the page requested on the command line.
pub fn run(args: &Args) -> BDashResult<()> {
    match args.watch {
        Some(seconds) => watch(args, Duration::from_secs(seconds)),
        None => run_at(args, chrono::Local::now().date_naive()),
    }
}

/// Same as [run], with the date used to compute the ages.
pub fn run_at(args: &Args, today: NaiveDate) -> BDashResult<()> {
    let mut session = Session::new(args)?;
    session.refresh(args, today)?;
    Ok(())
}

/// Writes the page again each time a dataset changes. Errors are logged and
/// the tables are read again from scratch at the next check.
fn watch(args: &Args, period: Duration) -> BDashResult<()> {
    let mut session = Session::new(args)?;
    loop {
        match session.refresh(args, chrono::Local::now().date_naive()) {
            Ok(true) => info!("watch: page written"),
            Ok(false) => debug!("watch: no dataset changed"),
            Err(e) => {
                warn!("watch: {}", e);
                session.loader.clear();
            }
        }
        thread::sleep(period);
    }
}

#[cfg(test)]
pub(crate) fn test_data_dir() -> String {
    format!("{}/tests/data", env!("CARGO_MANIFEST_DIR"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            config: None,
            data_dir: Some(test_data_dir()),
            page: None,
            departement: None,
            sex: None,
            party: vec![],
            deputy: None,
            party1: None,
            party2: None,
            out: None,
            reference: None,
            watch: None,
            verbose: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
    }

    #[test]
    fn default_page_is_the_deputy_page() {
        let request = validate_args(&args()).unwrap();
        assert_eq!(
            request,
            PageRequest::Deputy {
                department: DepartmentSelection::All,
                sex: SexSelection::Both,
                parties: vec![],
                deputy: None
            }
        );
    }

    #[test]
    fn invalid_arguments() {
        let mut a = args();
        a.page = Some("charts".to_string());
        assert!(validate_args(&a).is_err());
        let mut a = args();
        a.sex = Some("unknown".to_string());
        assert!(validate_args(&a).is_err());
    }

    #[test]
    fn data_directory_resolution() {
        let mut a = args();
        a.data_dir = None;
        assert_eq!(
            resolve_data_dir(&a, &DashConfig::default()),
            PathBuf::from(DEFAULT_DATA_DIRECTORY)
        );
        a.config = Some("/srv/assemblee/config.json".to_string());
        let config = DashConfig {
            data_directory: Some("csv".to_string()),
            ..DashConfig::default()
        };
        assert_eq!(
            resolve_data_dir(&a, &config),
            PathBuf::from("/srv/assemblee/csv")
        );
        a.data_dir = Some("elsewhere".to_string());
        assert_eq!(resolve_data_dir(&a, &config), PathBuf::from("elsewhere"));
    }

    #[test]
    fn votes_page_matches_reference() {
        let mut a = args();
        a.page = Some("votes".to_string());
        a.out = Some(
            std::env::temp_dir()
                .join("assemblee_votes_page.json")
                .display()
                .to_string(),
        );
        a.reference = Some(format!("{}/votes_expected_summary.json", test_data_dir()));
        run_at(&a, today()).unwrap();
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        let mut a = args();
        a.page = Some("parties".to_string());
        a.out = Some(
            std::env::temp_dir()
                .join("assemblee_parties_page.json")
                .display()
                .to_string(),
        );
        a.reference = Some(format!("{}/votes_expected_summary.json", test_data_dir()));
        let res = run_at(&a, today());
        assert!(matches!(
            res.map_err(|e| *e),
            Err(DashError::ReferenceMismatch { .. })
        ));
    }

    #[test]
    fn deputy_page_from_configuration() {
        let mut a = args();
        a.data_dir = None;
        a.config = Some(format!("{}/config.json", test_data_dir()));
        a.deputy = Some("Anne Martin".to_string());
        a.out = Some(
            std::env::temp_dir()
                .join("assemblee_deputy_page.json")
                .display()
                .to_string(),
        );
        run_at(&a, today()).unwrap();
        let written = fs::read_to_string(a.out.unwrap()).unwrap();
        let js: JSValue = serde_json::from_str(&written).unwrap();
        assert_eq!(js["deputy"]["code"], "PA1");
        assert_eq!(js["deputy"]["age"], 50);
    }

    #[test]
    fn unchanged_datasets_are_not_rendered_again() {
        let mut a = args();
        a.page = Some("votes".to_string());
        let out = std::env::temp_dir().join("assemblee_session_votes.json");
        a.out = Some(out.display().to_string());
        let mut session = Session::new(&a).unwrap();
        assert!(session.refresh(&a, today()).unwrap());
        assert_eq!(session.loader.cache_misses(), 6);
        fs::remove_file(&out).unwrap();
        assert!(!session.refresh(&a, today()).unwrap());
        assert_eq!(session.loader.cache_hits(), 6);
        assert!(!out.exists());
        // The ages depend on the day: the page is written again.
        let later = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        assert!(session.refresh(&a, later).unwrap());
        assert!(out.exists());
    }

    #[test]
    fn missing_data_directory() {
        let mut a = args();
        a.data_dir = Some("/nonexistent/assemblee".to_string());
        assert!(run_at(&a, today()).is_err());
    }
}
