mod display;
mod error;
mod form;
mod parser;
mod planner;
mod web;

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use display::{print_plan, write_roster_to_file};
use parser::load_members_from_path;
use planner::Planner;

const USAGE: &str = "usage: meeting-planner <availability.csv> [monday-out] [wednesday-out]\n       meeting-planner web [port] [submissions.csv]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Check if we should run in web mode
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let submissions_csv = args
            .get(3)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("submissions.csv"));
        let password = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string()); // Default password, change this!

        println!("Starting web server on port {}...", port);
        println!("Access the site at http://localhost:{}", port);

        web::start_server(port, password, submissions_csv).await?;
        return Ok(());
    }

    // CLI mode: one input source, two output destinations, all explicit
    let Some(csv_path) = args.get(1) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let monday_out = args.get(2).map(String::as_str).unwrap_or("monday-roster.txt");
    let wednesday_out = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("wednesday-roster.txt");

    println!("Loading availability from {}...", csv_path);
    let members = load_members_from_path(csv_path)?;
    println!("Loaded {} members", members.len());

    let planner = Planner::new(members);
    let plan = planner.plan()?;

    print_plan(&plan);

    write_roster_to_file(&plan.monday, monday_out)?;
    write_roster_to_file(&plan.wednesday, wednesday_out)?;
    println!("\nMonday roster saved as {}", monday_out);
    println!("Wednesday roster saved as {}", wednesday_out);

    Ok(())
}
