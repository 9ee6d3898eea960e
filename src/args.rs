use clap::Parser;

/// Explore the deputies, the votes and the political parties of the French National Assembly.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file. It describes where the datasets are located.
    /// See the manual of the assemblee_stats library for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory) The directory containing the CSV datasets. Setting this option overrides the
    /// directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// (default deputy) The page to produce: deputy, parties or votes.
    #[clap(short, long, value_parser)]
    pub page: Option<String>,

    /// (default all) deputy page: the department, as displayed in the list of departments,
    /// for example "Paris (75)".
    #[clap(long, value_parser)]
    pub departement: Option<String>,

    /// (default both) deputy page: both, female or male.
    #[clap(long, value_parser)]
    pub sex: Option<String>,

    /// (repeatable, default all the parties) deputy page: the abbreviation of a political party
    /// to select.
    #[clap(long, value_parser)]
    pub party: Vec<String>,

    /// (full name) deputy page: the deputy to describe. Defaults to the first deputy of the selection.
    #[clap(long, value_parser)]
    pub deputy: Option<String>,

    /// (abbreviation) parties page: the first party to compare.
    #[clap(long, value_parser)]
    pub party1: Option<String>,

    /// (abbreviation) parties page: the second party to compare.
    #[clap(long, value_parser)]
    pub party2: Option<String>,

    /// (file path, 'stdout' or empty) Where the page is written, in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a page in JSON format. If provided, the program
    /// checks that the produced page matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (seconds, optional) Keeps running and writes the page again each time one of the datasets
    /// changes. The datasets are checked at the given interval.
    #[clap(short, long, value_parser)]
    pub watch: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
