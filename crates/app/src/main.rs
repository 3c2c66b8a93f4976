//! Postline binary.
//!
//! Usage: `postline [PROJECT_FILE] [--send REQUEST]`
//!
//! Lists the project's requests with their resolved URLs. Without a project
//! file the first-run sample project is used. `--send` executes one request,
//! named by id or by name, and prints the response.

use clap::Parser;
use postline::{App, CliArgs, init_tracing};
use postline_application::{ProjectStore, RequestEvent};
use postline_domain::{ClientSettings, parse_id};
use postline_infrastructure::{ReqwestHttpClient, SettingsRepository};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    init_tracing();

    let settings = match SettingsRepository::new().load().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Could not load settings, using defaults");
            ClientSettings::default()
        }
    };

    let mut app = match &args.project {
        Some(path) => {
            let mut app = App::with_settings(settings, ProjectStore::new())?;
            app.load_project_from(path).await?;
            if let Some(first) = app.list_environments().first().map(|e| e.id) {
                app.set_active_environment(Some(first))?;
            }
            app
        }
        None => App::with_settings(settings, ProjectStore::with_sample_data())?,
    };

    print_project(&app);

    if let Some(target) = args.send {
        let request_id = find_request(&app, &target)
            .ok_or_else(|| format!("no request matches {target}"))?;
        send(&mut app, request_id).await?;
    }

    Ok(())
}

fn print_project(app: &App<ReqwestHttpClient>) {
    if let Some(env) = app.active_environment() {
        println!("environment: {} ({} variables)", env.name, env.variable_count());
    }
    for group in app.list_groups() {
        println!("{}", group.name);
        for request in &group.requests {
            let url = app
                .preview_url(request.id)
                .map_or_else(|_| request.url.clone(), |r| r.resolved);
            println!("  {} {}  {}", request.method, request.name, url);
        }
    }
}

fn find_request(app: &App<ReqwestHttpClient>, target: &str) -> Option<Uuid> {
    if let Ok(id) = parse_id(target) {
        return app.store().find_request(id).map(|r| r.id);
    }
    app.list_groups()
        .iter()
        .flat_map(|g| &g.requests)
        .find(|r| r.name == target)
        .map(|r| r.id)
}

async fn send(
    app: &mut App<ReqwestHttpClient>,
    request_id: Uuid,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut event = Some(app.send(request_id)?);
    if matches!(event, Some(RequestEvent::InFlight { .. })) {
        event = app.next_event().await;
    }

    match event {
        Some(RequestEvent::Completed { response, .. }) => {
            println!(
                "{} {}  {:.3}s  {} bytes",
                response.status_code.unwrap_or_default(),
                response.reason_phrase(),
                response.elapsed_seconds().unwrap_or_default(),
                response.size_bytes.unwrap_or_default()
            );
            for header in &response.headers {
                println!("{}: {}", header.key, header.value);
            }
            println!();
            println!("{}", response.body);
        }
        Some(RequestEvent::Failed { kind, message, .. }) => {
            println!("{}: {message}", kind.title());
            for suggestion in kind.suggestions() {
                println!("  - {suggestion}");
            }
        }
        Some(RequestEvent::Cancelled { .. }) => println!("cancelled"),
        Some(RequestEvent::InFlight { .. }) | None => {}
    }
    Ok(())
}
