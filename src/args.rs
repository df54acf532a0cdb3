use clap::Parser;

/// This is a winner tabulation program for classical voting rules.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the valuation matrix: one row per agent and one
    /// numeric cell per alternative.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default xlsx) The type of the input: 'xlsx' or 'json'.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// The voting rule to apply: plurality, veto, borda, harmonic, stv, range, score or
    /// dictatorship.
    #[clap(short, long, value_parser)]
    pub rule: String,

    /// (default max) The tie-break policy: 'max', 'min' or 'agent:<id>'.
    #[clap(short, long, value_parser)]
    pub tiebreak: Option<String>,

    /// (comma-separated numbers) The score vector for the generic 'score' rule. Its
    /// length must equal the number of alternatives in the input.
    #[clap(long, value_parser)]
    pub scores: Option<String>,

    /// The deciding agent for the 'dictatorship' rule.
    #[clap(long, value_parser)]
    pub agent: Option<u32>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing an expected summary in JSON format. If
    /// provided, tallywin will check that the tabulated output matches the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first
    /// worksheet is read when unspecified.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
