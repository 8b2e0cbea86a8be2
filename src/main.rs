// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Rapu CLI - Hybrid UI + REST API Test Automation Harness
//!
//! Runs the bundled demonstration suite and prints per-case status.

use std::env;
use std::process::ExitCode;

use rapu::{CaseKind, CaseResult, ConfigHandle, Harness};

// Cases are keyed by thread; a current-thread runtime keeps every await on
// the thread that owns the session.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rapu=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("run") | None => run_suite(Selection::All).await,
        Some("api") => run_suite(Selection::Api).await,
        Some("ui") => run_suite(Selection::Ui).await,
        Some("hybrid") => run_suite(Selection::Hybrid).await,
        Some("--help") | Some("-h") | Some("help") => {
            print_usage();
            ExitCode::SUCCESS
        }
        Some("--version") | Some("-v") | Some("version") => {
            println!("rapu {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Rapu - Hybrid UI + REST API Test Automation Harness

USAGE:
    rapu <COMMAND>

COMMANDS:
    run         Run the full demonstration suite (default)
    api         Run only the API demonstration cases
    ui          Run only the UI demonstration cases
    hybrid      Run only the hybrid demonstration cases
    help        Show this help message
    version     Show version information

CONFIGURATION:
    Settings are read from config/application-{{env}}.toml (env from RAPU_ENV,
    default "qa") and config/framework.yml. UI and hybrid cases need a
    WebDriver server listening at the configured webdriver_url.
"#
    );
}

#[derive(Clone, Copy, PartialEq)]
enum Selection {
    All,
    Api,
    Ui,
    Hybrid,
}

impl Selection {
    fn includes(&self, kind: CaseKind) -> bool {
        match self {
            Selection::All => true,
            Selection::Api => kind == CaseKind::Api,
            Selection::Ui => kind == CaseKind::Ui,
            Selection::Hybrid => kind == CaseKind::Hybrid,
        }
    }
}

async fn run_suite(selection: Selection) -> ExitCode {
    let config = ConfigHandle::load("config");
    let harness = Harness::new(config);

    println!("Rapu Test Execution");
    println!("===================");

    let mut results = Vec::new();

    if selection.includes(CaseKind::Api) {
        results.push(api_get_demo(&harness).await);
        results.push(api_post_demo(&harness).await);
    }
    if selection.includes(CaseKind::Ui) {
        results.push(ui_navigation_demo(&harness).await);
    }
    if selection.includes(CaseKind::Hybrid) {
        results.push(hybrid_demo(&harness).await);
    }

    for result in &results {
        print_result(result);
    }

    let summary = harness.finish().await;
    println!("\nSummary: {}", summary);
    if let Some(ref path) = summary.report_path {
        println!("Report: {}", path.display());
    }

    if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_result(result: &CaseResult) {
    println!(
        "[{}] {} ({}ms)",
        result.outcome, result.name, result.duration_ms
    );
    if let Some(ref error) = result.error {
        println!("       {}", error);
    }
}

async fn api_get_demo(harness: &Harness) -> CaseResult {
    harness
        .run_case(
            "api_get_resource",
            "GET a known resource and validate its shape",
            CaseKind::Api,
            |ctx| async move {
                ctx.step("send GET /posts/1");
                let response = ctx.api().get("/posts/1").await?;

                ctx.ensure_eq(response.status_code(), 200, "status code")?;
                ctx.ensure(response.body_len() > 0, "body is not empty")?;

                if let Some(id) = response.extract("/id") {
                    ctx.data("resource id", &id);
                }
                Ok(())
            },
        )
        .await
}

async fn api_post_demo(harness: &Harness) -> CaseResult {
    harness
        .run_case(
            "api_create_resource",
            "POST a resource and validate the echo",
            CaseKind::Api,
            |ctx| async move {
                let body = serde_json::json!({
                    "title": "rapu demo",
                    "body": "created by the demonstration suite",
                    "userId": 1,
                });

                ctx.step("send POST /posts");
                let response = ctx.api().post("/posts", &body).await?;

                ctx.ensure(
                    response.is_success(),
                    "creation reported success",
                )?;
                ctx.ensure(response.contains("rapu demo"), "echo contains title")
            },
        )
        .await
}

async fn ui_navigation_demo(harness: &Harness) -> CaseResult {
    harness
        .run_case(
            "ui_open_base_url",
            "Open the base URL and verify the page loads",
            CaseKind::Ui,
            |ctx| async move {
                ctx.step("open base URL");
                let session = ctx.open_base_url().await?;
                session.wait_for_page_load().await?;

                let title = session.title().await?;
                ctx.data("page title", &title);
                ctx.ensure(!title.is_empty(), "page has a title")
            },
        )
        .await
}

async fn hybrid_demo(harness: &Harness) -> CaseResult {
    harness
        .run_case(
            "hybrid_ui_api_correlation",
            "Fetch a resource over the API, then verify the UI is reachable",
            CaseKind::Hybrid,
            |ctx| async move {
                ctx.step("fetch resource over API");
                let response = ctx.api().get("/posts/1").await?;
                ctx.ensure_eq(response.status_code(), 200, "API status code")?;
                let title = response.extract("/title").unwrap_or_default();
                ctx.data("api title", &title);

                ctx.step("open base URL in browser");
                let session = ctx.open_base_url().await?;
                session.wait_for_page_load().await?;

                let url = session.current_url().await?;
                ctx.data("browser url", &url);
                ctx.ensure(!url.is_empty(), "browser reports a current URL")?;
                ctx.ensure(!title.is_empty(), "API resource has a title")
            },
        )
        .await
}
