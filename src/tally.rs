use log::{info, warn};

use social_choice::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

#[derive(Debug, Snafu)]
pub enum TallyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No readable worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Voting failure: {source}"))]
    Voting { source: VotingError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Rule {
    Plurality,
    Veto,
    Borda,
    Harmonic,
    Stv,
    Range,
    Score,
    Dictatorship,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct Summary {
    rule: String,
    tiebreak: String,
    #[serde(rename = "numAgents")]
    num_agents: usize,
    #[serde(rename = "numAlternatives")]
    num_alternatives: usize,
    winner: u32,
}

pub mod matrix_reader {
    use super::{
        EmptyExcelSnafu, OpeningExcelSnafu, OpeningJsonSnafu, ParsingJsonSnafu, TallyResult,
    };
    use calamine::{open_workbook, Reader, Xlsx};
    use log::debug;
    use serde_json::Value as JSValue;
    use snafu::prelude::*;
    use std::fs;

    /// Reads a valuation matrix from an Excel workbook. Every cell of the
    /// worksheet must be numeric.
    pub fn read_excel_matrix(
        path: String,
        worksheet: &Option<String>,
    ) -> TallyResult<Vec<Vec<f64>>> {
        let mut workbook: Xlsx<_> =
            open_workbook(path.clone()).context(OpeningExcelSnafu { path: path.clone() })?;
        let wrange = match worksheet {
            Some(name) => workbook.worksheet_range(name),
            None => workbook.worksheet_range_at(0),
        }
        .context(EmptyExcelSnafu { path: path.clone() })?
        .context(OpeningExcelSnafu { path })?;

        let mut res: Vec<Vec<f64>> = Vec::new();
        for row in wrange.rows() {
            debug!("read_excel_matrix: row: {:?}", row);
            let mut cells: Vec<f64> = Vec::new();
            for elt in row {
                cells.push(read_cell_calamine(elt)?);
            }
            res.push(cells);
        }
        Ok(res)
    }

    fn read_cell_calamine(cell: &calamine::DataType) -> TallyResult<f64> {
        match cell {
            calamine::DataType::Float(f) => Ok(*f),
            calamine::DataType::Int(i) => Ok(*i as f64),
            _ => whatever!(
                "read_cell_calamine: expected a numeric cell, got {:?}",
                cell
            ),
        }
    }

    /// Reads a valuation matrix from a JSON file holding a 2-D array of
    /// numbers.
    pub fn read_json_matrix(path: String) -> TallyResult<Vec<Vec<f64>>> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
        let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        let rows = match js.as_array() {
            Some(rows) => rows,
            None => whatever!("read_json_matrix: expected a top-level array of rows"),
        };
        let mut res: Vec<Vec<f64>> = Vec::new();
        for row in rows {
            let cells = match row.as_array() {
                Some(cells) => cells,
                None => whatever!("read_json_matrix: expected every row to be an array"),
            };
            let mut r: Vec<f64> = Vec::new();
            for cell in cells {
                match cell.as_f64() {
                    Some(f) => r.push(f),
                    None => whatever!("read_json_matrix: expected a number, got {:?}", cell),
                }
            }
            res.push(r);
        }
        Ok(res)
    }
}

fn parse_rule(name: &str) -> TallyResult<Rule> {
    match name {
        "plurality" => Ok(Rule::Plurality),
        "veto" => Ok(Rule::Veto),
        "borda" => Ok(Rule::Borda),
        "harmonic" => Ok(Rule::Harmonic),
        "stv" => Ok(Rule::Stv),
        "range" => Ok(Rule::Range),
        "score" => Ok(Rule::Score),
        "dictatorship" => Ok(Rule::Dictatorship),
        x => whatever!("Unknown voting rule {:?}", x),
    }
}

fn parse_tie_break(arg: &Option<String>) -> TallyResult<TieBreakRule> {
    match arg.as_deref() {
        None | Some("max") => Ok(TieBreakRule::Max),
        Some("min") => Ok(TieBreakRule::Min),
        Some(s) => {
            if let Some(id) = s.strip_prefix("agent:") {
                match id.parse::<u32>() {
                    Ok(x) if x >= 1 => Ok(TieBreakRule::AgentPriority(Agent(x))),
                    _ => whatever!("Cannot parse the agent identifier in tie-break {:?}", s),
                }
            } else {
                whatever!("Cannot use tie-break mode {:?}", s)
            }
        }
    }
}

fn parse_scores(arg: &Option<String>) -> TallyResult<Vec<f64>> {
    let s = match arg {
        Some(s) => s,
        None => whatever!("The 'score' rule needs a --scores vector"),
    };
    let mut res: Vec<f64> = Vec::new();
    for part in s.split(',') {
        match part.trim().parse::<f64>() {
            Ok(x) => res.push(x),
            Err(_) => whatever!("Cannot parse score {:?}", part),
        }
    }
    Ok(res)
}

fn run_on_profile<F>(matrix: &[Vec<f64>], f: F) -> TallyResult<Alternative>
where
    F: FnOnce(&Profile) -> Result<Alternative, VotingError>,
{
    let profile = Profile::from_valuations(matrix).context(VotingSnafu {})?;
    f(&profile).context(VotingSnafu {})
}

fn build_summary(args: &Args, matrix: &[Vec<f64>], winner: Alternative) -> Summary {
    Summary {
        rule: args.rule.clone(),
        tiebreak: args.tiebreak.clone().unwrap_or_else(|| "max".to_string()),
        num_agents: matrix.len(),
        num_alternatives: matrix.first().map(|r| r.len()).unwrap_or(0),
        winner: winner.0,
    }
}

fn read_summary(path: String) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

pub fn run_tally(args: &Args) -> TallyResult<()> {
    let matrix = match args.input_type.as_deref() {
        None | Some("xlsx") => {
            matrix_reader::read_excel_matrix(args.input.clone(), &args.excel_worksheet_name)?
        }
        Some("json") => matrix_reader::read_json_matrix(args.input.clone())?,
        Some(x) => whatever!("Unknown input type {:?}", x),
    };
    info!(
        "run_tally: read {} agent rows of {} alternatives",
        matrix.len(),
        matrix.first().map(|r| r.len()).unwrap_or(0)
    );

    let rule = parse_rule(args.rule.as_str())?;
    let tie_break = parse_tie_break(&args.tiebreak)?;

    let winner = match rule {
        Rule::Range => range_voting(&matrix, tie_break).context(VotingSnafu {})?,
        Rule::Plurality => run_on_profile(&matrix, |p| plurality(p, tie_break))?,
        Rule::Veto => run_on_profile(&matrix, |p| veto(p, tie_break))?,
        Rule::Borda => run_on_profile(&matrix, |p| borda(p, tie_break))?,
        Rule::Harmonic => run_on_profile(&matrix, |p| harmonic(p, tie_break))?,
        Rule::Stv => run_on_profile(&matrix, |p| stv(p, tie_break))?,
        Rule::Score => {
            let scores = parse_scores(&args.scores)?;
            run_on_profile(&matrix, |p| scoring_rule(p, &scores, tie_break))?
        }
        Rule::Dictatorship => {
            let agent = match args.agent {
                Some(x) if x >= 1 => Agent(x),
                _ => whatever!("The 'dictatorship' rule needs --agent <id>"),
            };
            run_on_profile(&matrix, |p| dictatorship(p, agent))?
        }
    };
    info!("run_tally: winner: alternative {}", winner.0);

    let summary = build_summary(args, &matrix, winner);
    // Going through a Value normalizes the key order, so the string can be
    // compared against a reference summary read from disk.
    let summary_js = serde_json::to_value(&summary).context(ParsingJsonSnafu {})?;
    let pretty_js = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js),
        Some(path) => {
            fs::write(path, &pretty_js).context(WritingSummarySnafu {
                path: path.to_string(),
            })?;
            info!("run_tally: summary written to {}", path);
        }
    }

    // The reference summary, if provided for comparison.
    if let Some(reference_p) = args.reference.clone() {
        let reference = read_summary(reference_p)?;
        let pretty_ref =
            serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_ref != pretty_js {
            warn!("Found differences with the reference summary");
            print_diff(pretty_ref.as_str(), pretty_js.as_ref(), "\n");
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}
