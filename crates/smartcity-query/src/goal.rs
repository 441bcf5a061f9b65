//! Goal vocabulary
//!
//! Clients may phrase queries in the knowledge base's predicate syntax:
//!
//! ```text
//! area(downtown, Pop, Poll, Traffic, Energy, Waste)
//! unify_city(Name, Pop, 80, Traffic, Energy, Waste)
//! can_service(downtown, waste)        can_service(downtown, S)
//! suggest_by_traffic(50, L)           areas_with_pollution_below(30, L)
//! areas_with_energy_below(40, L)
//! sum_population([downtown, suburb], Sum)
//! forall_pollution_below(100)         exists_traffic_above(85)
//! assertz(area(harbor, 8000, 45, 40, 55, 35))
//! ```
//!
//! Only this fixed vocabulary is understood; there are no user-defined
//! clauses. Variables start with an uppercase letter or `_`. Output
//! arguments (`L`, `Sum`) may be given or omitted but must be unbound.

use logos::Logos;
use serde::Serialize;
use smartcity_core::{
    Area, AreaName, CityError, Direction, Field, FieldValue, Metric, Result, Service,
};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::unify::Constraint;

/// Positional fields of an `area/6` fact
const AREA_FIELDS: [Field; 6] = [
    Field::Name,
    Field::Population,
    Field::Metric(Metric::Pollution),
    Field::Metric(Metric::Traffic),
    Field::Metric(Metric::Energy),
    Field::Metric(Metric::Waste),
];

/// Variable names used when rendering unbound `area/6` positions
const AREA_VARIABLES: [&str; 6] = ["Name", "Pop", "Poll", "Traffic", "Energy", "Waste"];

/// A parsed query against the knowledge base
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Goal {
    /// `area/6`, `unify_city/6`: every fact matching the bound positions
    Unify(Vec<Constraint>),
    /// `can_service(N, S)` with both arguments bound
    CanService {
        /// Area to test
        name: AreaName,
        /// Service to test
        service: Service,
    },
    /// `can_service(N, S)` with `S` unbound: every service `N` needs
    ServicesNeeded {
        /// Area to test
        name: AreaName,
    },
    /// `suggest_by_<metric>/2`, `areas_with_<metric>_below/2`
    Collect {
        /// Compared metric
        metric: Metric,
        /// Comparison direction
        direction: Direction,
        /// Threshold
        threshold: i64,
    },
    /// `sum_population/2`
    SumPopulation(Vec<AreaName>),
    /// `forall_<metric>_below/1`
    ForallBelow {
        /// Compared metric
        metric: Metric,
        /// Threshold
        threshold: i64,
    },
    /// `exists_<metric>_above/1`
    ExistsAbove {
        /// Compared metric
        metric: Metric,
        /// Threshold
        threshold: i64,
    },
    /// `assertz(area(...))`
    Assert(Area),
}

/// The solution of a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Matching area facts
    Areas(Vec<Area>),
    /// Matching area names
    Names(Vec<AreaName>),
    /// Needed services
    Services(Vec<Service>),
    /// Truth value of a boolean predicate
    Truth(bool),
    /// Aggregated population
    Total(u64),
    /// Assertion accepted
    Asserted {
        /// Fact replaced under the overwrite policy
        replaced: Option<Area>,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Terms
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Atom(String),
    Var(String),
    Int(i64),
    List(Vec<Term>),
    Compound(String, Vec<Term>),
}

impl Term {
    fn describe(&self) -> String {
        match self {
            Term::Atom(a) => format!("atom `{a}`"),
            Term::Var(v) => format!("variable `{v}`"),
            Term::Int(n) => format!("integer `{n}`"),
            Term::List(_) => "list".to_string(),
            Term::Compound(f, args) => format!("term `{f}/{}`", args.len()),
        }
    }
}

/// Goal tokens. Whitespace and `%` line comments are skipped.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"%[^\n]*")]
enum Token {
    #[token("(")]
    Open,
    #[token(")")]
    Close,
    #[token("[")]
    OpenList,
    #[token("]")]
    CloseList,
    #[token(",")]
    Comma,
    #[token(".")]
    End,
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok(), priority = 10)]
    Int(i64),
    // A leading digit is allowed so normalized names like `7th_ave` stay one atom
    #[regex(r"[\p{L}\p{N}_]+", |lex| lex.slice().to_string())]
    Ident(String),
    #[regex(r"'([^']|'')*'", |lex| unquote(lex.slice()))]
    Quoted(String),
}

fn unquote(slice: &str) -> String {
    slice[1..slice.len() - 1].replace("''", "'")
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => f.write_str("("),
            Token::Close => f.write_str(")"),
            Token::OpenList => f.write_str("["),
            Token::CloseList => f.write_str("]"),
            Token::Comma => f.write_str(","),
            Token::End => f.write_str("."),
            Token::Int(n) => write!(f, "{n}"),
            Token::Ident(ident) => f.write_str(ident),
            Token::Quoted(atom) => f.write_str(&format_atom(atom)),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(CityError::invalid_query(format!(
                    "invalid token `{}`",
                    lexer.slice()
                )))
            }
        }
    }
    Ok(tokens)
}

struct TermParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl TermParser {
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Comma separated terms up to `close`
    fn sequence(&mut self, close: Token) -> Result<Vec<Term>> {
        let mut items = Vec::new();
        if self.peek() == Some(&close) {
            self.advance();
            return Ok(items);
        }
        loop {
            items.push(self.term()?);
            match self.advance() {
                Some(Token::Comma) => continue,
                Some(token) if token == close => return Ok(items),
                Some(token) => {
                    return Err(CityError::invalid_query(format!(
                        "expected `,` or `{close}`, found `{token}`"
                    )))
                }
                None => return Err(CityError::invalid_query("unbalanced brackets")),
            }
        }
    }

    fn term(&mut self) -> Result<Term> {
        match self.advance() {
            Some(Token::Int(n)) => Ok(Term::Int(n)),
            Some(Token::OpenList) => Ok(Term::List(self.sequence(Token::CloseList)?)),
            Some(Token::Quoted(atom)) => Ok(Term::Atom(atom)),
            Some(Token::Ident(ident)) => {
                if self.peek() == Some(&Token::Open) {
                    self.advance();
                    let args = self.sequence(Token::Close)?;
                    Ok(Term::Compound(ident, args))
                } else if ident.starts_with(|c: char| c.is_uppercase() || c == '_') {
                    Ok(Term::Var(ident))
                } else {
                    Ok(Term::Atom(ident))
                }
            }
            Some(token) => Err(CityError::invalid_query(format!("unexpected `{token}`"))),
            None => Err(CityError::invalid_query("empty goal")),
        }
    }
}

fn parse_term(input: &str) -> Result<Term> {
    let mut parser = TermParser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let term = parser.term()?;
    if parser.peek() == Some(&Token::End) {
        parser.advance();
    }
    if let Some(token) = parser.peek() {
        return Err(CityError::invalid_query(format!(
            "unexpected `{token}` after goal"
        )));
    }
    Ok(term)
}

// ─────────────────────────────────────────────────────────────────────────────
// Goal interpretation
// ─────────────────────────────────────────────────────────────────────────────

fn atom(term: Term, role: &str) -> Result<String> {
    match term {
        Term::Atom(a) => Ok(a),
        other => Err(CityError::invalid_query(format!(
            "{role} must be an atom, found {}",
            other.describe()
        ))),
    }
}

fn integer(term: Term, role: &str) -> Result<i64> {
    match term {
        Term::Int(n) => Ok(n),
        other => Err(CityError::invalid_query(format!(
            "{role} must be an integer, found {}",
            other.describe()
        ))),
    }
}

fn arity(functor: &str, args: &[Term], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min} to {max}")
        };
        return Err(CityError::invalid_query(format!(
            "`{functor}` takes {expected} arguments, got {}",
            args.len()
        )));
    }
    Ok(())
}

/// Optional trailing output argument; it must be an unbound variable
fn output(args: &mut Vec<Term>, inputs: usize) -> Result<()> {
    if args.len() > inputs {
        match args.pop() {
            Some(Term::Var(_)) => {}
            Some(other) => {
                return Err(CityError::invalid_query(format!(
                    "output argument must be unbound, found {}",
                    other.describe()
                )))
            }
            None => {}
        }
    }
    Ok(())
}

fn threshold_goal(
    functor: &str,
    mut args: Vec<Term>,
    metric: Metric,
    direction: Direction,
) -> Result<Goal> {
    arity(functor, &args, 1, 2)?;
    output(&mut args, 1)?;
    let threshold = integer(args.remove(0), "threshold")?;
    Ok(Goal::Collect {
        metric,
        direction,
        threshold,
    })
}

fn quantifier_goal(functor: &str, mut args: Vec<Term>) -> Result<i64> {
    arity(functor, &args, 1, 1)?;
    integer(args.remove(0), "threshold")
}

fn unify_goal(functor: &str, args: Vec<Term>) -> Result<Goal> {
    arity(functor, &args, 0, AREA_FIELDS.len())?;
    let mut seen = HashSet::new();
    let mut constraints = Vec::new();

    for (field, arg) in AREA_FIELDS.into_iter().zip(args) {
        let value = match arg {
            Term::Var(var) => {
                if !var.starts_with('_') && !seen.insert(var.clone()) {
                    return Err(CityError::invalid_query(format!(
                        "variable `{var}` bound to more than one field"
                    )));
                }
                continue;
            }
            Term::Atom(a) => FieldValue::Name(AreaName::new(a)),
            Term::Int(n) => FieldValue::from(n),
            other => {
                return Err(CityError::invalid_query(format!(
                    "field `{field}` cannot be bound to {}",
                    other.describe()
                )))
            }
        };
        let constraint = Constraint { field, value };
        constraint.check()?;
        constraints.push(constraint);
    }

    Ok(Goal::Unify(constraints))
}

fn assert_goal(mut args: Vec<Term>) -> Result<Goal> {
    arity("assertz", &args, 1, 1)?;
    let (functor, fields) = match args.remove(0) {
        Term::Compound(functor, fields) => (functor, fields),
        other => {
            return Err(CityError::invalid_query(format!(
                "can only assert area facts, found {}",
                other.describe()
            )))
        }
    };
    if functor != "area" {
        return Err(CityError::invalid_query(format!(
            "can only assert area facts, found `{functor}`"
        )));
    }
    arity("area", &fields, 6, 6)?;

    let mut fields = fields.into_iter();
    let mut next = |role: &str| -> Result<Term> {
        fields
            .next()
            .ok_or_else(|| CityError::invalid_query(format!("missing {role}")))
    };
    let name = atom(next("name")?, "name")?;
    let population = integer(next("population")?, "population")?;
    let population = u64::try_from(population).map_err(|_| {
        CityError::invalid_query(format!("population cannot be negative, got {population}"))
    })?;
    let pollution = integer(next("pollution")?, "pollution")?;
    let traffic = integer(next("traffic")?, "traffic")?;
    let energy = integer(next("energy")?, "energy")?;
    let waste = integer(next("waste")?, "waste")?;

    Ok(Goal::Assert(Area::new(
        name, population, pollution, traffic, energy, waste,
    )))
}

impl Goal {
    fn from_term(term: Term) -> Result<Self> {
        let (functor, mut args) = match term {
            Term::Compound(functor, args) => (functor, args),
            Term::Atom(functor) => (functor, Vec::new()),
            other => {
                return Err(CityError::invalid_query(format!(
                    "goal must be a predicate, found {}",
                    other.describe()
                )))
            }
        };

        match functor.as_str() {
            "area" | "unify_city" => unify_goal(&functor, args),
            "can_service" => {
                arity(&functor, &args, 2, 2)?;
                let service = args.remove(1);
                let name = AreaName::new(atom(args.remove(0), "area")?);
                match service {
                    Term::Var(_) => Ok(Goal::ServicesNeeded { name }),
                    other => Ok(Goal::CanService {
                        name,
                        service: atom(other, "service")?.parse()?,
                    }),
                }
            }
            "sum_population" => {
                arity(&functor, &args, 1, 2)?;
                output(&mut args, 1)?;
                let names = match args.remove(0) {
                    Term::List(items) => items
                        .into_iter()
                        .map(|item| atom(item, "area").map(AreaName::new))
                        .collect::<Result<Vec<_>>>()?,
                    other => {
                        return Err(CityError::invalid_query(format!(
                            "`sum_population` takes a list of areas, found {}",
                            other.describe()
                        )))
                    }
                };
                Ok(Goal::SumPopulation(names))
            }
            "assertz" | "assert" => assert_goal(args),
            other => {
                if let Some(metric) = other.strip_prefix("suggest_by_") {
                    threshold_goal(other, args, metric.parse()?, Direction::Above)
                } else if let Some(metric) = other
                    .strip_prefix("areas_with_")
                    .and_then(|rest| rest.strip_suffix("_below"))
                {
                    threshold_goal(other, args, metric.parse()?, Direction::Below)
                } else if let Some(metric) = other
                    .strip_prefix("forall_")
                    .and_then(|rest| rest.strip_suffix("_below"))
                {
                    Ok(Goal::ForallBelow {
                        metric: metric.parse()?,
                        threshold: quantifier_goal(other, args)?,
                    })
                } else if let Some(metric) = other
                    .strip_prefix("exists_")
                    .and_then(|rest| rest.strip_suffix("_above"))
                {
                    Ok(Goal::ExistsAbove {
                        metric: metric.parse()?,
                        threshold: quantifier_goal(other, args)?,
                    })
                } else {
                    Err(CityError::invalid_query(format!(
                        "unknown predicate `{other}/{}`",
                        args.len()
                    )))
                }
            }
        }
    }
}

impl FromStr for Goal {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self> {
        Goal::from_term(parse_term(s)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn format_atom(atom: &str) -> String {
    let plain = atom.chars().all(|c| c.is_alphanumeric() || c == '_')
        && (atom.starts_with(|c: char| c.is_lowercase())
            || (atom.starts_with(|c: char| c.is_ascii_digit())
                && !atom.chars().all(|c| c.is_ascii_digit())));
    if plain {
        atom.to_string()
    } else {
        format!("'{}'", atom.replace('\'', "''"))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Unify(constraints) => {
                let slots: Vec<String> = AREA_FIELDS
                    .iter()
                    .zip(AREA_VARIABLES)
                    .map(|(field, var)| {
                        constraints
                            .iter()
                            .rev()
                            .find(|c| c.field == *field)
                            .map(|c| match &c.value {
                                FieldValue::Name(name) => format_atom(name.as_str()),
                                FieldValue::Integer(n) => n.to_string(),
                            })
                            .unwrap_or_else(|| var.to_string())
                    })
                    .collect();
                write!(f, "unify_city({})", slots.join(", "))
            }
            Goal::CanService { name, service } => {
                write!(f, "can_service({}, {service})", format_atom(name.as_str()))
            }
            Goal::ServicesNeeded { name } => {
                write!(f, "can_service({}, S)", format_atom(name.as_str()))
            }
            Goal::Collect {
                metric,
                direction: Direction::Above,
                threshold,
            } => write!(f, "suggest_by_{metric}({threshold}, L)"),
            Goal::Collect {
                metric,
                direction: Direction::Below,
                threshold,
            } => write!(f, "areas_with_{metric}_below({threshold}, L)"),
            Goal::SumPopulation(names) => {
                let names: Vec<String> = names.iter().map(|n| format_atom(n.as_str())).collect();
                write!(f, "sum_population([{}], Sum)", names.join(", "))
            }
            Goal::ForallBelow { metric, threshold } => {
                write!(f, "forall_{metric}_below({threshold})")
            }
            Goal::ExistsAbove { metric, threshold } => {
                write!(f, "exists_{metric}_above({threshold})")
            }
            Goal::Assert(area) => write!(
                f,
                "assertz(area({}, {}, {}, {}, {}, {}))",
                format_atom(area.name.as_str()),
                area.population,
                area.pollution,
                area.traffic,
                area.energy,
                area.waste
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn goal(text: &str) -> Goal {
        text.parse().unwrap()
    }

    #[test]
    fn test_area_lookup_binds_name() {
        assert_eq!(
            goal("area(downtown, Pop, Poll, Traffic, Energy, Waste)"),
            Goal::Unify(vec![Constraint::name("downtown")])
        );
        assert_eq!(
            goal("area(downtown)"),
            Goal::Unify(vec![Constraint::name("downtown")])
        );
    }

    #[test]
    fn test_unify_city_without_bindings() {
        assert_eq!(goal("unify_city"), Goal::Unify(Vec::new()));
        assert_eq!(
            goal("unify_city(Name, Pop, Poll, Traffic, Energy, Waste)."),
            Goal::Unify(Vec::new())
        );
    }

    #[test]
    fn test_unify_city_binds_metric_position() {
        assert_eq!(
            goal("unify_city(N, _, 80, _, _, W)"),
            Goal::Unify(vec![Constraint::new(Field::Metric(Metric::Pollution), 80i64)])
        );
    }

    #[test]
    fn test_repeated_variable_rejected() {
        assert_matches!(
            "unify_city(N, P, X, X, E, W)".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
    }

    #[test]
    fn test_can_service_forms() {
        assert_eq!(
            goal("can_service(downtown, waste)"),
            Goal::CanService {
                name: AreaName::new("downtown"),
                service: Service::Waste
            }
        );
        assert_eq!(
            goal("can_service(downtown, S)"),
            Goal::ServicesNeeded {
                name: AreaName::new("downtown")
            }
        );
        assert_matches!(
            "can_service(downtown, pollution)".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
    }

    #[test]
    fn test_collection_goals() {
        assert_eq!(
            goal("suggest_by_traffic(50, L)"),
            Goal::Collect {
                metric: Metric::Traffic,
                direction: Direction::Above,
                threshold: 50
            }
        );
        assert_eq!(
            goal("areas_with_pollution_below(-3)"),
            Goal::Collect {
                metric: Metric::Pollution,
                direction: Direction::Below,
                threshold: -3
            }
        );
        assert_matches!(
            "suggest_by_noise(50, L)".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
        assert_matches!(
            "suggest_by_waste(50, [a])".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
    }

    #[test]
    fn test_sum_population_list() {
        assert_eq!(
            goal("sum_population([downtown, 'north_side', downtown], Sum)"),
            Goal::SumPopulation(vec![
                AreaName::new("downtown"),
                AreaName::new("north_side"),
                AreaName::new("downtown"),
            ])
        );
        assert_eq!(goal("sum_population([])"), Goal::SumPopulation(Vec::new()));
        assert_matches!(
            "sum_population(downtown, Sum)".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
    }

    #[test]
    fn test_quantifier_goals() {
        assert_eq!(
            goal("forall_pollution_below(100)"),
            Goal::ForallBelow {
                metric: Metric::Pollution,
                threshold: 100
            }
        );
        assert_eq!(
            goal("exists_energy_above(85)"),
            Goal::ExistsAbove {
                metric: Metric::Energy,
                threshold: 85
            }
        );
    }

    #[test]
    fn test_assertz() {
        assert_eq!(
            goal("assertz(area(harbor, 8000, 45, 40, 55, 35))"),
            Goal::Assert(Area::new("harbor", 8_000, 45, 40, 55, 35))
        );
        assert_matches!(
            "assertz(area(harbor, -1, 45, 40, 55, 35))".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
        assert_matches!(
            "assertz(area(harbor, 1, 2))".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
        assert_matches!(
            "assertz(road(a, b))".parse::<Goal>(),
            Err(CityError::InvalidQuery { .. })
        );
    }

    #[test]
    fn test_malformed_text() {
        for text in [
            "",
            "area(",
            "area(downtown))",
            "area(downtown) extra",
            "'unterminated",
            "area(down$town)",
            "mystery(1)",
            "42",
            "suggest_by_waste(99999999999999999999)",
        ] {
            assert_matches!(
                text.parse::<Goal>(),
                Err(CityError::InvalidQuery { .. }),
                "{text}"
            );
        }
    }

    #[test]
    fn test_display_parses_back() {
        for text in [
            "unify_city(downtown, Pop, Poll, Traffic, Energy, Waste)",
            "can_service('North Side', energy)",
            "suggest_by_waste(60, L)",
            "areas_with_pollution_below(30, L)",
            "sum_population([downtown, suburb], Sum)",
            "forall_traffic_below(95)",
            "exists_pollution_above(10)",
            "assertz(area(harbor, 8000, 45, 40, 55, 35))",
            "sum_population([7th_ave, '2024'], Sum)",
        ] {
            let parsed = goal(text);
            assert_eq!(parsed.to_string(), text);
            assert_eq!(goal(&parsed.to_string()), parsed);
        }
    }

    #[test]
    fn test_below_collection_renders_for_every_metric() {
        for metric in Metric::ALL {
            let collect = Goal::Collect {
                metric,
                direction: Direction::Below,
                threshold: 5,
            };
            let text = collect.to_string();
            assert_eq!(text, format!("areas_with_{metric}_below(5, L)"));
            assert_eq!(goal(&text), collect);
        }
    }

    #[test]
    fn test_digit_led_names_are_single_atoms() {
        assert_eq!(
            goal("sum_population([7th_ave, downtown], Sum)"),
            Goal::SumPopulation(vec![AreaName::new("7th_ave"), AreaName::new("downtown")])
        );
        assert_eq!(
            goal("areas_with_pollution_below(-30)"),
            Goal::Collect {
                metric: Metric::Pollution,
                direction: Direction::Below,
                threshold: -30
            }
        );
    }

    #[test]
    fn test_errors_quote_source_tokens() {
        assert_matches!(
            "sum_population([downtown suburb], Sum)".parse::<Goal>(),
            Err(CityError::InvalidQuery { reason })
                if reason == "expected `,` or `]`, found `suburb`"
        );
        assert_matches!(
            "forall_pollution_below(10))".parse::<Goal>(),
            Err(CityError::InvalidQuery { reason }) if reason == "unexpected `)` after goal"
        );
        assert_matches!(
            "exists_traffic_above(1 ? 2)".parse::<Goal>(),
            Err(CityError::InvalidQuery { reason }) if reason == "invalid token `?`"
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            goal("forall_traffic_below(95). % every district"),
            Goal::ForallBelow {
                metric: Metric::Traffic,
                threshold: 95
            }
        );
        assert_eq!(
            goal("can_service('50% zone', waste) % quoted percent is kept"),
            Goal::CanService {
                name: AreaName::new("50% zone"),
                service: Service::Waste
            }
        );
    }
}
