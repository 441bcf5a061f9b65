//! Subcommands and their execution against a knowledge base
//!
//! Input is normalized here before it reaches the engine: area names are
//! trimmed, lowercased and have spaces replaced by underscores, and lists of
//! names may be given as separate arguments or comma separated.

use crate::render::{
    answer_message, display_list, display_name, group_thousands, Format, Report,
};
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use smartcity_core::{Area, AreaName, CityError, Metric, Service};
use smartcity_query::{Answer, Constraint, KnowledgeBase};
use std::io::{BufRead, Write};

/// Knowledge base commands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every area with its metrics and needed services
    List,

    /// Show one area in detail
    Show {
        /// Area name
        area: String,
    },

    /// Check whether an area needs a service (waste, traffic, energy)
    CheckService {
        /// Area name
        area: String,
        /// Service to check
        service: String,
    },

    /// Suggest areas whose metric exceeds a threshold
    Suggest {
        /// Metric to compare (pollution, traffic, energy, waste)
        need: String,
        /// Threshold; unparsable input counts as 0
        #[arg(allow_hyphen_values = true)]
        threshold: String,
    },

    /// Find clean areas with pollution below a threshold
    Clean {
        /// Pollution threshold
        #[arg(allow_negative_numbers = true)]
        threshold: i64,
    },

    /// Total population of the given areas
    Sum {
        /// Area names, as separate arguments or comma separated
        #[arg(required = true)]
        areas: Vec<String>,
    },

    /// Unify over the full area tuple, optionally binding the name
    Unify {
        /// Bind the area name
        #[arg(long)]
        area: Option<String>,
    },

    /// Compare two or more areas side by side
    Compare {
        /// Area names, as separate arguments or comma separated
        #[arg(required = true)]
        areas: Vec<String>,
    },

    /// Evaluate a quantified statement over all areas
    Quantify {
        /// Quantifier
        #[arg(value_enum)]
        quantifier: Quantifier,
        /// Metric to quantify over
        #[arg(value_enum)]
        category: Category,
        /// Threshold
        #[arg(allow_negative_numbers = true)]
        threshold: i64,
    },

    /// Assert a new area fact for this session
    Add(AddArgs),

    /// Evaluate goals in order, e.g. `suggest_by_traffic(50, L)`
    Query {
        /// Goals in predicate syntax
        #[arg(required = true)]
        goals: Vec<String>,
    },

    /// Read goals line by line from standard input
    Shell,
}

/// `forall` or `exists`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Quantifier {
    /// Every area is below the threshold
    Universal,
    /// Some area is above the threshold
    Existential,
}

/// Metrics the quantifier command exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Category {
    /// Pollution level
    Pollution,
    /// Traffic level
    Traffic,
}

impl Category {
    fn metric(self) -> Metric {
        match self {
            Category::Pollution => Metric::Pollution,
            Category::Traffic => Metric::Traffic,
        }
    }
}

/// Fields of a new area fact
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Area name
    #[arg(long)]
    pub name: String,
    /// Number of residents
    #[arg(long, default_value_t = 0)]
    pub population: u64,
    /// Pollution level
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub pollution: i64,
    /// Traffic level
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub traffic: i64,
    /// Energy usage level
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub energy: i64,
    /// Waste level
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub waste: i64,
}

/// Split, trim and normalize area names; blanks are dropped
pub fn parse_names(raw: &[String]) -> Vec<AreaName> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .filter(|part| !part.trim().is_empty())
        .map(AreaName::normalize)
        .collect()
}

/// Integer input that falls back to 0
pub fn lenient_threshold(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn list(kb: &KnowledgeBase) -> Report {
    let names: Vec<AreaName> = kb.list_areas().into_iter().map(|a| a.name).collect();
    let message = if names.is_empty() {
        "No areas in the knowledge base.".to_string()
    } else {
        format!("{} area(s) in the knowledge base", names.len())
    };
    Report::message(message).with_areas(kb.compare(&names))
}

fn show(kb: &KnowledgeBase, area: &str) -> Result<Report> {
    let name = AreaName::normalize(area);
    let detail = kb.area_detail(name.as_str())?;
    Ok(Report::message(display_name(&name)).with_areas([detail]))
}

fn check_service(kb: &KnowledgeBase, area: &str, service: &str) -> Result<Report> {
    let name = AreaName::normalize(area);
    let service: Service = service.trim().to_lowercase().parse()?;
    let message = if kb.needs_service(name.as_str(), service) {
        format!("{} needs the {service} service.", display_name(&name))
    } else {
        format!(
            "{} does NOT (currently) need the {service} service.",
            display_name(&name)
        )
    };
    let detail = kb.area_detail(name.as_str()).ok();
    Ok(Report::message(message).with_areas(detail))
}

fn suggest(kb: &KnowledgeBase, need: &str, threshold: &str) -> Report {
    let need = need.trim().to_lowercase();
    let threshold = lenient_threshold(threshold);
    let Ok(metric) = need.parse::<Metric>() else {
        return Report::message("Unknown need type.");
    };
    let names = kb.suggest_by(metric, threshold);
    let message = if names.is_empty() {
        format!("No areas match {need} > {threshold}.")
    } else {
        format!(
            "Found {} area(s) with {need} level above {threshold}",
            names.len()
        )
    };
    Report::message(message).with_areas(kb.compare(&names))
}

fn clean(kb: &KnowledgeBase, threshold: i64) -> Report {
    let names = kb.areas_with_pollution_below(threshold);
    let message = if names.is_empty() {
        format!("No areas with pollution below {threshold}.")
    } else {
        format!(
            "Found {} clean area(s) with pollution below {threshold}",
            names.len()
        )
    };
    Report::message(message).with_areas(kb.compare(&names))
}

fn sum(kb: &KnowledgeBase, raw: &[String]) -> Result<Report> {
    let names = parse_names(raw);
    if names.is_empty() {
        return Ok(Report::message("Provide at least one area (comma separated)."));
    }
    let summed = kb
        .sum_population(&names)
        .and_then(|total| Ok((total, kb.population_breakdown(&names)?)));
    match summed {
        Ok((total, breakdown)) => Ok(Report::message(format!(
            "Total population for {} is {}.",
            display_list(&names),
            group_thousands(total)
        ))
        .with_breakdown(breakdown)
        .with_total(total)),
        Err(CityError::MissingArea { name }) => {
            tracing::debug!(%name, "Population sum aborted");
            Ok(Report::message(
                "Could not compute total — make sure all areas exist in knowledge base.",
            ))
        }
        Err(err) => Err(err.into()),
    }
}

fn unify(kb: &KnowledgeBase, area: Option<&str>) -> Result<Report> {
    let constraints: Vec<Constraint> = area
        .map(AreaName::normalize)
        .filter(|name| !name.is_empty())
        .map(Constraint::name)
        .into_iter()
        .collect();
    let areas = kb.unify(&constraints)?;
    let message = if areas.is_empty() {
        "No results found.".to_string()
    } else {
        format!("Found {} area(s) matching your query", areas.len())
    };
    let names: Vec<AreaName> = areas.into_iter().map(|a| a.name).collect();
    Ok(Report::message(message).with_areas(kb.compare(&names)))
}

fn compare(kb: &KnowledgeBase, raw: &[String]) -> Report {
    let names = parse_names(raw);
    if names.len() < 2 {
        return Report::message("Please provide at least 2 areas to compare");
    }
    let compared = kb.compare(&names);
    let message = if compared.is_empty() {
        "None of the given areas are in the knowledge base.".to_string()
    } else {
        format!("Comparing {} area(s)", compared.len())
    };
    Report::message(message).with_areas(compared)
}

fn quantify(
    kb: &KnowledgeBase,
    quantifier: Quantifier,
    category: Category,
    threshold: i64,
) -> Report {
    let metric = category.metric();
    let (holds, statement) = match quantifier {
        Quantifier::Universal => (
            kb.forall_below(metric, threshold),
            format!("All areas have {metric} below {threshold}."),
        ),
        Quantifier::Existential => (
            kb.exists_above(metric, threshold),
            format!("There exists at least one area with {metric} above {threshold}."),
        ),
    };
    let message = if holds {
        format!("✅ {statement}")
    } else {
        format!("❌ Not true: {statement}")
    };
    Report::message(message).with_answer(Answer::Truth(holds))
}

fn add(kb: &KnowledgeBase, args: &AddArgs) -> Result<Report> {
    let name = AreaName::normalize(&args.name);
    let area = Area::new(
        name.clone(),
        args.population,
        args.pollution,
        args.traffic,
        args.energy,
        args.waste,
    );
    let message = match kb.assert_area(area)? {
        None => format!("Added {} to the knowledge base.", display_name(&name)),
        Some(_) => format!("Replaced {} in the knowledge base.", display_name(&name)),
    };
    let detail = kb.area_detail(name.as_str())?;
    Ok(Report::message(message).with_areas([detail]))
}

/// Evaluate one goal and describe its answer
pub fn goal_report(kb: &KnowledgeBase, goal: &str) -> Result<Report> {
    let answer = kb.query(goal)?;
    let report = Report::message(answer_message(&answer));
    let report = match &answer {
        Answer::Areas(areas) => {
            let names: Vec<AreaName> = areas.iter().map(|a| a.name.clone()).collect();
            report.with_areas(kb.compare(&names))
        }
        Answer::Names(names) => report.with_areas(kb.compare(names)),
        Answer::Total(total) => report.with_total(*total),
        _ => report,
    };
    Ok(report.with_answer(answer))
}

fn emit<W: Write>(out: &mut W, report: &Report, format: Format) -> Result<()> {
    writeln!(out, "{}", report.render(format)?)?;
    Ok(())
}

/// Cut a trailing `%` comment, ignoring `%` inside quoted atoms
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '%' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Evaluate goals from `input` until end of input or `halt`
///
/// Blank lines are skipped and `%` starts a comment that runs to the end
/// of the line. A failing goal is reported and
/// the shell moves on to the next line.
pub fn shell<R: BufRead, W: Write>(
    kb: &KnowledgeBase,
    input: R,
    out: &mut W,
    format: Format,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let goal = strip_comment(&line).trim();
        if goal.is_empty() {
            continue;
        }
        if matches!(goal.trim_end_matches('.'), "halt" | "quit" | "exit") {
            break;
        }
        let report = match goal_report(kb, goal) {
            Ok(report) => report,
            Err(err) => Report::message(format!("Error: {err}")),
        };
        emit(out, &report, format)?;
    }
    Ok(())
}

/// Run `command`, writing its reports to `out`
pub fn run<R: BufRead, W: Write>(
    kb: &KnowledgeBase,
    command: &Command,
    input: R,
    out: &mut W,
    format: Format,
) -> Result<()> {
    tracing::debug!(?command, "Running command");
    let report = match command {
        Command::List => list(kb),
        Command::Show { area } => show(kb, area)?,
        Command::CheckService { area, service } => check_service(kb, area, service)?,
        Command::Suggest { need, threshold } => suggest(kb, need, threshold),
        Command::Clean { threshold } => clean(kb, *threshold),
        Command::Sum { areas } => sum(kb, areas)?,
        Command::Unify { area } => unify(kb, area.as_deref())?,
        Command::Compare { areas } => compare(kb, areas),
        Command::Quantify {
            quantifier,
            category,
            threshold,
        } => quantify(kb, *quantifier, *category, *threshold),
        Command::Add(args) => add(kb, args)?,
        Command::Query { goals } => {
            for goal in goals {
                emit(out, &goal_report(kb, goal)?, format)?;
            }
            return Ok(());
        }
        Command::Shell => return shell(kb, input, out, format),
    };
    emit(out, &report, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_splits_and_normalizes() {
        let raw = vec!["Downtown, North Side".to_string(), " ,suburb ".to_string()];
        assert_eq!(
            parse_names(&raw),
            vec![
                AreaName::new("downtown"),
                AreaName::new("north_side"),
                AreaName::new("suburb"),
            ]
        );
        assert!(parse_names(&[" , ".to_string()]).is_empty());
    }

    #[test]
    fn test_lenient_threshold() {
        assert_eq!(lenient_threshold(" 50 "), 50);
        assert_eq!(lenient_threshold("-5"), -5);
        assert_eq!(lenient_threshold("high"), 0);
        assert_eq!(lenient_threshold(""), 0);
    }

    #[test]
    fn test_category_metric() {
        assert_eq!(Category::Pollution.metric(), Metric::Pollution);
        assert_eq!(Category::Traffic.metric(), Metric::Traffic);
    }
}
