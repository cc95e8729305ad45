mod api;
mod commands;
mod config;
mod editor;
mod errors;
mod models;
mod render;
mod session;

use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::session::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(api_url = %config.api_url, "folio v{}", env!("CARGO_PKG_VERSION"));

    let api = ApiClient::new(config.api_url.clone());
    let store = FileStore::new(config.session_path());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args, &api, &store).await {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: &[String], api: &ApiClient, store: &FileStore) -> Result<(), AppError> {
    let mut words = args.iter().map(String::as_str);

    match words.next() {
        Some("login") => commands::login(api, store).await,
        Some("logout") => commands::logout(store),
        Some("whoami") => commands::whoami(api, store).await,

        Some("new") => {
            let path = words.next().unwrap_or("resume.json");
            commands::resume_new(Path::new(path))
        }
        Some("render") => {
            let Some(path) = words.next() else {
                return usage();
            };
            commands::resume_render(Path::new(path), words.next().map(Path::new))
        }

        Some("resumes") => match (words.next(), words.next(), words.next()) {
            (Some("list"), None, _) => commands::resume_list(api, store).await,
            (Some("show"), Some(id), _) => commands::resume_show(api, store, id).await,
            (Some("push"), Some(path), id) => {
                commands::resume_push(api, store, Path::new(path), id).await
            }
            (Some("delete"), Some(id), _) => commands::resume_delete(api, store, id).await,
            (Some("pdf"), Some(id), out) => {
                commands::resume_pdf(api, store, id, out.map(Path::new)).await
            }
            _ => usage(),
        },

        Some("blogs") => match (words.next(), words.next()) {
            (Some("list"), search) => commands::blog_list(api, search.map(String::from)).await,
            (Some("delete"), Some(id)) => commands::blog_delete(api, store, id).await,
            _ => usage(),
        },

        Some("projects") => match (words.next(), words.next()) {
            (Some("list"), search) => commands::project_list(api, search.map(String::from)).await,
            (Some("delete"), Some(id)) => commands::project_delete(api, store, id).await,
            _ => usage(),
        },

        Some("stats") => commands::stats(api, store).await,

        _ => usage(),
    }
}

fn usage() -> Result<(), AppError> {
    eprintln!(
        "usage: folio <command>

  login | logout | whoami
  new [file]                 write a blank resume draft
  render <file> [out.pdf]    render a draft locally
  resumes list
  resumes show <id>
  resumes push <file> [id]   validate and save (update when id given)
  resumes delete <id>
  resumes pdf <id> [out.pdf] download the server-rendered PDF
  blogs list [search] | blogs delete <id>
  projects list [search] | projects delete <id>
  stats"
    );
    Ok(())
}

/// User-facing error report. Validation failures list every annotated field;
/// everything else is a single line.
fn report(error: &AppError) {
    if let AppError::Validation(fields) = error {
        eprintln!("error: {error}");
        for field in fields {
            eprintln!("  {}: {}", field.field, field.message);
        }
        return;
    }
    eprintln!("error: {error}");
}
