//! Report rendering
//!
//! Every command produces a [`Report`]: a one-line message, optional area
//! rows and an optional total. Reports print either as aligned text or as one
//! JSON object per line.

use serde::Serialize;
use smartcity_core::{AreaName, Service};
use smartcity_query::{Answer, AreaDetail};
use std::fmt;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per report
    Json,
}

/// Title-case display form of an area name (`north_side` → `North Side`)
///
/// A letter starts a word unless it directly follows another letter.
pub fn display_name(name: &AreaName) -> String {
    let mut out = String::with_capacity(name.as_str().len());
    let mut previous_is_letter = false;
    for c in name.as_str().chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

/// `70000` → `70,000`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(d);
    }
    out
}

/// Display names joined with `, `
pub fn display_list(names: &[AreaName]) -> String {
    names
        .iter()
        .map(display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn service_list(services: &[Service]) -> String {
    services
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One area in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaRow {
    /// Title-cased name
    pub display_name: String,
    /// Stored fact and needed services
    #[serde(flatten)]
    pub detail: AreaDetail,
}

impl From<AreaDetail> for AreaRow {
    fn from(detail: AreaDetail) -> Self {
        Self {
            display_name: display_name(&detail.area.name),
            detail,
        }
    }
}

impl fmt::Display for AreaRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let area = &self.detail.area;
        write!(
            f,
            "{:<18} population {:>10}  pollution {:>3}  traffic {:>3}  energy {:>3}  waste {:>3}",
            self.display_name,
            group_thousands(area.population),
            area.pollution,
            area.traffic,
            area.energy,
            area.waste,
        )?;
        if !self.detail.services_needed.is_empty() {
            write!(f, "  needs: {}", service_list(&self.detail.services_needed))?;
        }
        Ok(())
    }
}

/// One area's share of a population total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationRow {
    /// Title-cased name
    pub display_name: String,
    /// Area key
    pub name: AreaName,
    /// Number of residents
    pub population: u64,
}

impl fmt::Display for PopulationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<18} population {:>10}",
            self.display_name,
            group_thousands(self.population)
        )
    }
}

/// The outcome of one command or goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Summary line
    pub message: String,
    /// Areas the message refers to
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub areas: Vec<AreaRow>,
    /// Per-area populations behind a total
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<PopulationRow>,
    /// Aggregated population
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Structured answer for goal queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
}

impl Report {
    /// A report with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            areas: Vec::new(),
            breakdown: Vec::new(),
            total: None,
            answer: None,
        }
    }

    /// Attach area rows
    pub fn with_areas(mut self, details: impl IntoIterator<Item = AreaDetail>) -> Self {
        self.areas = details.into_iter().map(AreaRow::from).collect();
        self
    }

    /// Attach per-area populations
    pub fn with_breakdown(mut self, breakdown: impl IntoIterator<Item = (AreaName, u64)>) -> Self {
        self.breakdown = breakdown
            .into_iter()
            .map(|(name, population)| PopulationRow {
                display_name: display_name(&name),
                name,
                population,
            })
            .collect();
        self
    }

    /// Attach a population total
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Attach a goal answer
    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answer = Some(answer);
        self
    }

    /// Serialize in the requested format
    pub fn render(&self, format: Format) -> serde_json::Result<String> {
        match format {
            Format::Text => Ok(self.to_string()),
            Format::Json => serde_json::to_string(self),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for row in &self.areas {
            write!(f, "\n  {row}")?;
        }
        for row in &self.breakdown {
            write!(f, "\n  {row}")?;
        }
        Ok(())
    }
}

/// Message for a goal answer
pub fn answer_message(answer: &Answer) -> String {
    match answer {
        Answer::Areas(areas) if areas.is_empty() => "No results found.".to_string(),
        Answer::Areas(areas) => format!("Found {} area(s) matching your query", areas.len()),
        Answer::Names(names) if names.is_empty() => "L = [].".to_string(),
        Answer::Names(names) => format!(
            "L = [{}].",
            names
                .iter()
                .map(AreaName::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Answer::Services(services) if services.is_empty() => "No services needed.".to_string(),
        Answer::Services(services) => format!("Needs: {}.", service_list(services)),
        Answer::Truth(true) => "true.".to_string(),
        Answer::Truth(false) => "false.".to_string(),
        Answer::Total(total) => format!("Sum = {total}."),
        Answer::Asserted { replaced: None } => "Asserted.".to_string(),
        Answer::Asserted { replaced: Some(old) } => {
            format!("Asserted, replacing the previous fact for {}.", old.name)
        }
    }
}
