use std::io::{self, BufRead, Write};
use std::sync::Arc;

use hive_planner_lib::catalog::BuildingCatalog;
use hive_planner_lib::clock::SystemClock;
use hive_planner_lib::command::{execute_json, execute_json_batch, CommandResponse};
use hive_planner_lib::harness::TestHarness;
use hive_planner_lib::state::{EditorSettings, PlanLibrary};
use hive_planner_lib::validation::validate_plan;
use shared::HivePlan;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hive_planner=info,hive_planner_lib=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let settings = EditorSettings::load();
    let catalog = Arc::new(BuildingCatalog::hive_defaults());
    let plans: Vec<HivePlan> = parse_plan_arg(&catalog).into_iter().collect();
    let library = PlanLibrary::from_plans(plans, None, settings, catalog, Arc::new(SystemClock));
    let mut harness = TestHarness::from_library(library);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = if line.starts_with('[') {
            execute_json_batch(&mut harness, line)
                .and_then(|responses| serde_json::to_string(&responses).map_err(|e| e.to_string()))
        } else {
            execute_json(&mut harness, line)
                .and_then(|response| serde_json::to_string(&response).map_err(|e| e.to_string()))
        };
        let output = output.unwrap_or_else(|e| error_line(&e));

        if writeln!(stdout, "{output}").and_then(|()| stdout.flush()).is_err() {
            break;
        }
    }
}

fn error_line(message: &str) -> String {
    let response = CommandResponse {
        success: false,
        error: Some(message.to_string()),
        data: None,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

fn parse_plan_arg(catalog: &BuildingCatalog) -> Option<HivePlan> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--plan" && i + 1 < args.len() {
            let path = &args[i + 1];
            let json = match std::fs::read_to_string(path) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to read plan file {path}: {e}");
                    return None;
                }
            };
            let plan = match serde_json::from_str::<HivePlan>(&json) {
                Ok(plan) => plan,
                Err(e) => {
                    tracing::error!("Failed to parse plan JSON from {path}: {e}");
                    return None;
                }
            };
            let problems = validate_plan(&plan, catalog);
            if !problems.is_empty() {
                for problem in &problems {
                    tracing::error!("{path}: {problem}");
                }
                return None;
            }
            tracing::info!("Loaded plan from {path} ({} objects)", plan.objects.len());
            return Some(plan);
        }
        i += 1;
    }
    None
}
