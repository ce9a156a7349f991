use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    controller::{DashboardPage, EmployeePage, FetchState},
    session::SessionContext,
    sign_in,
    view::{SortDirection, SortField},
    HttpEmployeeApi,
};

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "ems-console",
    about = "Terminal front-end for the employee management API"
)]
struct Args {
    /// Base URL of the API server, e.g. http://localhost:8080
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List employees with local search, sort, and pagination
    List {
        /// Case-insensitive match against name, email, department, or role
        #[arg(long, default_value = "")]
        search: String,
        /// Sort field: id, firstName, lastName, email, department, role,
        /// salary, dateOfJoining, dateOfBirth, status
        #[arg(long, default_value = "id")]
        sort: String,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show aggregated workforce statistics
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();

    let server_url = args.server_url.unwrap_or(settings.server_url);
    let username = args.username.or(settings.username);
    let password = args.password.or(settings.password);

    let session = Arc::new(SessionContext::new());
    let api = Arc::new(HttpEmployeeApi::new(server_url, session.clone()));

    match (username, password) {
        (Some(username), Some(password)) => {
            sign_in(api.as_ref(), &session, &username, &password).await?;
            tracing::info!(username = %username, "signed in");
        }
        _ => {
            tracing::warn!("no credentials configured; requests are sent unauthenticated");
        }
    }

    match args.command {
        Command::List {
            search,
            sort,
            desc,
            page,
        } => run_list(api, &search, &sort, desc, page).await,
        Command::Dashboard => run_dashboard(api).await,
    }
}

async fn run_list(
    api: Arc<HttpEmployeeApi>,
    search: &str,
    sort: &str,
    desc: bool,
    page_number: usize,
) -> Result<()> {
    let sort_field: SortField = sort.parse().map_err(anyhow::Error::msg)?;
    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let mut page = EmployeePage::new(api);
    page.fetch().await;
    if let FetchState::Error { message } = page.fetch_state() {
        bail!("failed to load employees: {message}");
    }

    page.set_search(search);
    page.set_sort(sort_field, direction);
    page.set_page(page_number);

    let view = page.visible();
    if view.rows.is_empty() {
        if page.records().is_empty() {
            println!("No employees found.");
        } else {
            println!("No employees match your search.");
        }
        return Ok(());
    }

    println!(
        "{:>5}  {:<24} {:<30} {:<16} {:<18} {:>12}  {:<12} {:<8}",
        "ID", "NAME", "EMAIL", "DEPARTMENT", "ROLE", "SALARY", "JOINED", "STATUS"
    );
    for row in &view.rows {
        println!(
            "{:>5}  {:<24} {:<30} {:<16} {:<18} {:>12.2}  {:<12} {:<8}",
            row.id.0,
            format!("{} {}", row.first_name, row.last_name),
            row.email,
            row.department,
            row.role,
            row.salary,
            row.date_of_joining.to_string(),
            format!("{:?}", row.status).to_uppercase(),
        );
    }
    println!(
        "page {}/{} ({} matching of {} total)",
        view.page,
        view.total_pages,
        view.total_filtered,
        page.records().len()
    );

    Ok(())
}

async fn run_dashboard(api: Arc<HttpEmployeeApi>) -> Result<()> {
    let mut dashboard = DashboardPage::new(api);
    dashboard.fetch().await;
    if let FetchState::Error { message } = dashboard.fetch_state() {
        bail!("failed to load dashboard: {message}");
    }
    let Some(stats) = dashboard.stats() else {
        bail!("dashboard returned no data");
    };

    println!("Total employees:      {}", stats.total_employees);
    println!("New hires this month: {}", stats.new_hires_this_month);

    if !stats.department_stats.is_empty() {
        println!("\nEmployees by department:");
        for dept in &stats.department_stats {
            match dept.percentage {
                Some(pct) => println!(
                    "  {:<20} {:>4}  ({pct:.1}%)",
                    dept.department_name, dept.employee_count
                ),
                None => println!("  {:<20} {:>4}", dept.department_name, dept.employee_count),
            }
        }
    }

    if !stats.recent_hires.is_empty() {
        println!("\nRecent hires:");
        for hire in &stats.recent_hires {
            println!(
                "  {} {} ({}, joined {})",
                hire.first_name, hire.last_name, hire.department, hire.date_of_joining
            );
        }
    }

    for (label, events) in [
        ("Upcoming birthdays", &stats.upcoming_birthdays),
        ("Upcoming anniversaries", &stats.upcoming_anniversaries),
    ] {
        if events.is_empty() {
            continue;
        }
        println!("\n{label}:");
        for event in events {
            let when = if event.days_until == 0 {
                "today".to_string()
            } else {
                format!("in {} days", event.days_until)
            };
            println!("  {} ({}) {}", event.employee_name, event.date, when);
        }
    }

    Ok(())
}
