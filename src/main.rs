// ==========================================
// EventFab Element Import - CLI Entry
// ==========================================
// Commands:
//   preview <file> [--db <path>]
//   import <file> --project <id> [--db <path>]
//   template <path>
// ==========================================

use eventfab_import::config::ConfigManager;
use eventfab_import::importer::{
    ElementImporter, ElementImporterImpl, ImportTemplate, UniversalFileParser,
};
use eventfab_import::domain::ImportReport;
use eventfab_import::repository::ElementImportRepositoryImpl;
use std::path::PathBuf;
use std::process;

struct Args {
    command: String,
    path: PathBuf,
    project: Option<String>,
    db: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut args = std::env::args().skip(1);
    let command = args.next()?;
    let path = PathBuf::from(args.next()?);

    let mut project = None;
    let mut db = None;
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--project" => project = Some(args.next()?),
            "--db" => db = Some(PathBuf::from(args.next()?)),
            _ => return None,
        }
    }

    Some(Args {
        command,
        path,
        project,
        db,
    })
}

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("  eventfab-import preview <file> [--db <path>]");
    eprintln!("  eventfab-import import <file> --project <id> [--db <path>]");
    eprintln!("  eventfab-import template <path>");
    process::exit(2);
}

/// Database under the user data dir unless --db overrides it.
fn default_db_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("eventfab").join("eventfab.db")
}

fn print_report(report: &ImportReport) {
    for element in &report.elements {
        println!(
            "  {} {} ({}) - {} materials",
            element.id,
            element.name,
            element.category,
            element.particulars.len()
        );
    }
    for warning in &report.warnings {
        println!("  WARNING row {}: {}", warning.row, warning.message);
    }
    for error in &report.errors {
        println!("  ERROR   row {}: {}", error.row, error.message);
    }
    println!(
        "{} elements, {} materials, {} errors, {} warnings",
        report.stats.total_elements,
        report.stats.total_materials,
        report.stats.total_errors,
        report.stats.total_warnings
    );
}

#[tokio::main]
async fn main() {
    eventfab_import::logging::init();

    tracing::info!("{} v{}", eventfab_import::APP_NAME, eventfab_import::VERSION);

    let args = match parse_args() {
        Some(args) => args,
        None => usage(),
    };

    if args.command == "template" {
        if let Err(e) = ImportTemplate::write(&args.path) {
            tracing::error!(error = %e, "template write failed");
            process::exit(1);
        }
        println!("Template written to {}", args.path.display());
        return;
    }

    let db_path = args.db.clone().unwrap_or_else(default_db_path);
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!(error = %e, "could not create database directory");
            process::exit(1);
        }
    }
    let db_path_str = db_path.display().to_string();
    tracing::info!(db = %db_path_str, "using database");

    let repo = match ElementImportRepositoryImpl::new(&db_path_str) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!(error = %e, "could not open database");
            process::exit(1);
        }
    };
    let config = match ConfigManager::new(&db_path_str) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "could not open configuration");
            process::exit(1);
        }
    };

    let importer = ElementImporterImpl::new(repo, config, Box::new(UniversalFileParser::new()));

    match args.command.as_str() {
        "preview" => match importer.preview_from_file(&args.path).await {
            Ok(report) => {
                print_report(&report);
                if !report.is_clean() {
                    process::exit(1);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "preview failed");
                process::exit(1);
            }
        },
        "import" => {
            let project_id = match args.project.as_deref() {
                Some(project_id) => project_id,
                None => usage(),
            };
            match importer.import_from_file(&args.path, project_id).await {
                Ok(outcome) => {
                    print_report(&outcome.report);
                    println!(
                        "Batch {}: persisted {} elements in {} ms",
                        outcome.batch.batch_id,
                        outcome.persisted_elements,
                        outcome.elapsed_time.as_millis()
                    );
                    if !outcome.report.is_clean() {
                        process::exit(1);
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "import failed");
                    process::exit(1);
                }
            }
        }
        _ => usage(),
    }
}
