//! Commands driven end to end against in-memory knowledge bases.

#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]

use clap::Parser;
use smartcity_cli::{run, Command, Format};
use smartcity_core::{Area, EngineConfig};
use smartcity_query::KnowledgeBase;
use std::io::Cursor;
use std::path::PathBuf;

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: Command,
}

fn kb() -> KnowledgeBase {
    KnowledgeBase::with_areas(
        &EngineConfig::default(),
        [
            Area::new("downtown", 50_000, 80, 90, 60, 70),
            Area::new("suburb", 20_000, 20, 30, 40, 25),
            Area::new("north_side", 15_000, 40, 75, 50, 30),
        ],
    )
    .unwrap()
}

fn exec_with_input(kb: &KnowledgeBase, args: &[&str], input: &str, format: Format) -> String {
    let cli = TestCli::try_parse_from(std::iter::once("smartcity").chain(args.iter().copied()))
        .unwrap();
    let mut out = Vec::new();
    run(kb, &cli.command, Cursor::new(input.to_string()), &mut out, format).unwrap();
    String::from_utf8(out).unwrap()
}

fn exec(kb: &KnowledgeBase, args: &[&str]) -> String {
    exec_with_input(kb, args, "", Format::Text)
}

fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or_default()
}

#[test]
fn suggest_reports_matches_with_details() {
    let kb = kb();
    let out = exec(&kb, &["suggest", "traffic", "50"]);
    assert_eq!(first_line(&out), "Found 2 area(s) with traffic level above 50");
    assert!(out.contains("Downtown"));
    assert!(out.contains("North Side"));

    let out = exec(&kb, &["suggest", "waste", "90"]);
    assert_eq!(first_line(&out), "No areas match waste > 90.");

    let out = exec(&kb, &["suggest", "Noise", "10"]);
    assert_eq!(first_line(&out), "Unknown need type.");
}

#[test]
fn suggest_treats_bad_threshold_as_zero() {
    let out = exec(&kb(), &["suggest", "pollution", "lots"]);
    assert_eq!(first_line(&out), "Found 3 area(s) with pollution level above 0");
}

#[test]
fn check_service_normalizes_the_area() {
    let kb = kb();
    let out = exec(&kb, &["check-service", "North Side", "Traffic"]);
    assert_eq!(first_line(&out), "North Side needs the traffic service.");

    let out = exec(&kb, &["check-service", "suburb", "waste"]);
    assert_eq!(
        first_line(&out),
        "Suburb does NOT (currently) need the waste service."
    );

    let cli = TestCli::try_parse_from(["smartcity", "check-service", "suburb", "parking"]).unwrap();
    let result = run(&kb, &cli.command, Cursor::new(String::new()), &mut Vec::new(), Format::Text);
    assert!(result.is_err());
}

#[test]
fn sum_formats_total_or_explains_failure() {
    let kb = kb();
    let out = exec(&kb, &["sum", "downtown, suburb"]);
    assert_eq!(
        first_line(&out),
        "Total population for Downtown, Suburb is 70,000."
    );

    let rows: Vec<&str> = out.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("  Downtown"));
    assert!(rows[0].ends_with("50,000"));
    assert!(rows[1].ends_with("20,000"));

    let json = exec_with_input(&kb, &["sum", "suburb,downtown"], "", Format::Json);
    let value: serde_json::Value = serde_json::from_str(json.trim()).unwrap();
    assert_eq!(value["total"], 70_000);
    assert_eq!(value["breakdown"][0]["name"], "suburb");
    assert_eq!(value["breakdown"][1]["population"], 50_000);

    let out = exec(&kb, &["sum", "downtown", "atlantis"]);
    assert_eq!(
        first_line(&out),
        "Could not compute total — make sure all areas exist in knowledge base."
    );

    let out = exec(&kb, &["sum", " , "]);
    assert_eq!(first_line(&out), "Provide at least one area (comma separated).");
}

#[test]
fn clean_and_unify() {
    let kb = kb();
    let out = exec(&kb, &["clean", "50"]);
    assert_eq!(
        first_line(&out),
        "Found 2 clean area(s) with pollution below 50"
    );
    assert_eq!(
        first_line(&exec(&kb, &["clean", "10"])),
        "No areas with pollution below 10."
    );

    assert_eq!(
        first_line(&exec(&kb, &["unify"])),
        "Found 3 area(s) matching your query"
    );
    assert_eq!(
        first_line(&exec(&kb, &["unify", "--area", "Downtown"])),
        "Found 1 area(s) matching your query"
    );
    assert_eq!(
        first_line(&exec(&kb, &["unify", "--area", "atlantis"])),
        "No results found."
    );
}

#[test]
fn compare_needs_two_names() {
    let kb = kb();
    assert_eq!(
        first_line(&exec(&kb, &["compare", "downtown"])),
        "Please provide at least 2 areas to compare"
    );
    let out = exec(&kb, &["compare", "downtown,atlantis,suburb"]);
    assert_eq!(first_line(&out), "Comparing 2 area(s)");
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn quantify_states_the_result() {
    let kb = kb();
    assert_eq!(
        first_line(&exec(&kb, &["quantify", "universal", "pollution", "100"])),
        "✅ All areas have pollution below 100."
    );
    assert_eq!(
        first_line(&exec(&kb, &["quantify", "existential", "traffic", "95"])),
        "❌ Not true: There exists at least one area with traffic above 95."
    );
}

#[test]
fn query_goals_see_earlier_assertions() {
    let kb = kb();
    let out = exec(
        &kb,
        &[
            "query",
            "assertz(area(harbor, 9500, 55, 65, 70, 62))",
            "suggest_by_energy(65, L)",
            "sum_population([harbor, suburb], Sum)",
        ],
    );
    let lines: Vec<&str> = out.lines().filter(|l| !l.starts_with("  ")).collect();
    assert_eq!(lines, vec!["Asserted.", "L = [harbor].", "Sum = 29500."]);
}

#[test]
fn add_rejects_duplicates_by_default() {
    let kb = kb();
    let out = exec(
        &kb,
        &["add", "--name", "Old Town", "--population", "7000", "--waste", "65"],
    );
    assert_eq!(first_line(&out), "Added Old Town to the knowledge base.");
    assert!(kb.lookup_area("old_town").is_some());

    let cli = TestCli::try_parse_from(["smartcity", "add", "--name", "old town"]).unwrap();
    let result = run(&kb, &cli.command, Cursor::new(String::new()), &mut Vec::new(), Format::Text);
    assert!(result.is_err());
}

#[test]
fn shell_reads_goals_until_halt() {
    let kb = kb();
    let input = "% comment\n\ncan_service(downtown, waste)\nbogus(\nexists_traffic_above(85).\nhalt.\nforall_pollution_below(0)\n";
    let out = exec_with_input(&kb, &["shell"], input, Format::Text);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "true.");
    assert!(lines[1].starts_with("Error: Invalid query"));
    assert_eq!(lines[2], "true.");
}

#[test]
fn shell_ignores_trailing_comments() {
    let kb = kb();
    let input = "exists_traffic_above(85). % busy roads\nassertz(area('a%b', 1, 1, 1, 1, 1)). % quoted\nhalt. % bye\ncan_service(downtown, waste)\n";
    let out = exec_with_input(&kb, &["shell"], input, Format::Text);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["true.", "Asserted."]);
    assert!(kb.lookup_area("a%b").is_some());
}

#[test]
fn json_output_carries_structured_answers() {
    let kb = kb();
    let out = exec_with_input(
        &kb,
        &["query", "can_service(downtown, S)"],
        "",
        Format::Json,
    );
    let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(value["answer"]["kind"], "services");
    assert_eq!(value["answer"]["value"], serde_json::json!(["waste", "traffic"]));

    let out = exec_with_input(&kb, &["show", "downtown"], "", Format::Json);
    let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(value["areas"][0]["display_name"], "Downtown");
    assert_eq!(value["areas"][0]["population"], 50_000);
}

#[test]
fn shipped_config_loads_the_seed_file() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../smartcity.toml");
    let config = EngineConfig::load_from_file(&path).unwrap();
    config.validate().unwrap();
    let kb = KnowledgeBase::from_config(&config).unwrap();
    assert!(kb.lookup_area("downtown").is_some());
    assert!(kb.lookup_area("suburb").is_some());
    assert_eq!(
        kb.sum_population(&["downtown".into(), "suburb".into()]),
        Ok(70_000)
    );
}
