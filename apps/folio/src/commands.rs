//! CLI command implementations. Each command is one user action: gather
//! input, make at most one backend call per mutation, report the outcome.
//! Failed calls leave local state (draft files, stored session) untouched.

use std::path::{Path, PathBuf};

use inquire::{Password, PasswordDisplayMode, Text};
use tracing::{debug, info};

use crate::api::{ApiClient, BlogQuery, ProjectQuery};
use crate::editor::validate::validate_resume;
use crate::editor::ResumeDraft;
use crate::errors::AppError;
use crate::models::resume::CreateResumeInput;
use crate::render;
use crate::session::{token_is_expired, SessionContext, SessionStore};

// ── auth ────────────────────────────────────────────────────────────────────

pub async fn login(api: &ApiClient, store: &dyn SessionStore) -> Result<(), AppError> {
    let email = Text::new("Email:").prompt()?;
    let password = Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let tokens = api.login(&email, &password).await?;

    let user = match tokens.user {
        Some(user) => Some(user),
        // Older backend versions return tokens only; fetch the profile.
        None => Some(api.me(&tokens.access_token).await?),
    };

    let session = SessionContext {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user,
    };
    store.save(&session)?;

    let name = session
        .user
        .as_ref()
        .map(|u| u.name.as_str())
        .unwrap_or(email.as_str());
    println!("Logged in as {name}");
    Ok(())
}

pub fn logout(store: &dyn SessionStore) -> Result<(), AppError> {
    store.clear()?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(api: &ApiClient, store: &dyn SessionStore) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    match &session.user {
        Some(user) => println!("{} <{}> ({:?})", user.name, user.email, user.role),
        None => println!("logged in (no cached profile)"),
    }
    Ok(())
}

/// Loads the stored session, refreshing the access token when its expiry
/// claim has passed. A failed refresh drops the session; the stored tokens
/// are dead weight at that point.
pub async fn ensure_session(
    api: &ApiClient,
    store: &dyn SessionStore,
) -> Result<SessionContext, AppError> {
    let Some(mut session) = store.load()? else {
        return Err(AppError::Unauthorized);
    };

    if token_is_expired(&session.access_token) {
        debug!("access token expired, attempting refresh");
        let tokens = match api.refresh(&session.refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) => {
                info!("token refresh failed: {e}");
                store.clear()?;
                return Err(AppError::Unauthorized);
            }
        };
        session.access_token = tokens.access_token;
        session.refresh_token = tokens.refresh_token;
        if let Some(user) = tokens.user {
            session.user = Some(user);
        }
        store.save(&session)?;
    }

    Ok(session)
}

// ── resumes ─────────────────────────────────────────────────────────────────

/// Writes a blank draft (one placeholder entry per section) for editing.
pub fn resume_new(path: &Path) -> Result<(), AppError> {
    let input = ResumeDraft::new().to_input();
    std::fs::write(path, serde_json::to_string_pretty(&input)?)?;
    println!("Wrote blank resume draft to {}", path.display());
    Ok(())
}

pub async fn resume_list(api: &ApiClient, store: &dyn SessionStore) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    let resumes = api.list_resumes(&session.access_token).await?;
    if resumes.is_empty() {
        println!("No resumes saved");
        return Ok(());
    }
    for resume in resumes {
        println!(
            "{}  {}  (updated {})",
            resume.id,
            resume.title,
            resume.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub async fn resume_show(
    api: &ApiClient,
    store: &dyn SessionStore,
    id: &str,
) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    let resume = api.get_resume(id, &session.access_token).await?;
    println!("{}", serde_json::to_string_pretty(&resume)?);
    Ok(())
}

/// Validates a draft file and creates it (or updates `id`) on the backend.
/// Validation failure blocks the request entirely; the file is never
/// modified either way.
pub async fn resume_push(
    api: &ApiClient,
    store: &dyn SessionStore,
    path: &Path,
    id: Option<&str>,
) -> Result<(), AppError> {
    let input = read_draft(path)?;

    let errors = validate_resume(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let session = ensure_session(api, store).await?;
    let saved = match id {
        Some(id) => api.update_resume(id, &input, &session.access_token).await?,
        None => api.create_resume(&input, &session.access_token).await?,
    };
    println!("Saved resume {} ({})", saved.id, saved.title);
    Ok(())
}

pub async fn resume_delete(
    api: &ApiClient,
    store: &dyn SessionStore,
    id: &str,
) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    api.delete_resume(id, &session.access_token).await?;
    println!("Deleted resume {id}");
    Ok(())
}

/// Downloads the backend's server-rendered PDF for a saved resume.
pub async fn resume_pdf(
    api: &ApiClient,
    store: &dyn SessionStore,
    id: &str,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    let resume = api.get_resume(id, &session.access_token).await?;
    let bytes = api.download_resume_pdf(id, &session.access_token).await?;

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(render::download_filename(&resume.title)));
    std::fs::write(&path, &bytes)?;
    println!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Renders a draft file locally. No network round-trip and no validation:
/// the renderer substitutes the sentinel for anything missing.
pub fn resume_render(path: &Path, output: Option<&Path>) -> Result<(), AppError> {
    let input = read_draft(path)?;
    let bytes = render::render_pdf(&input);

    let out = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(render::download_filename(&input.title)));
    std::fs::write(&out, &bytes)?;
    println!("Wrote {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

fn read_draft(path: &Path) -> Result<CreateResumeInput, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

// ── blogs / projects ────────────────────────────────────────────────────────

pub async fn blog_list(api: &ApiClient, search: Option<String>) -> Result<(), AppError> {
    let query = BlogQuery {
        search,
        ..BlogQuery::default()
    };
    let page = api.list_blogs(&query).await?;
    for blog in &page.data {
        let marker = if blog.published { "published" } else { "draft" };
        println!("{}  {}  [{marker}]", blog.id, blog.title);
    }
    println!(
        "page {}/{} ({} total)",
        page.pagination.current_page, page.pagination.total_pages, page.pagination.total_items
    );
    Ok(())
}

pub async fn blog_delete(
    api: &ApiClient,
    store: &dyn SessionStore,
    id: &str,
) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    api.delete_blog(id, &session.access_token).await?;
    println!("Deleted blog {id}");
    Ok(())
}

pub async fn project_list(api: &ApiClient, search: Option<String>) -> Result<(), AppError> {
    let query = ProjectQuery {
        search,
        ..ProjectQuery::default()
    };
    let page = api.list_projects(&query).await?;
    for project in &page.data {
        println!("{}  {}  [{:?}]", project.id, project.title, project.status);
    }
    println!(
        "page {}/{} ({} total)",
        page.pagination.current_page, page.pagination.total_pages, page.pagination.total_items
    );
    Ok(())
}

pub async fn project_delete(
    api: &ApiClient,
    store: &dyn SessionStore,
    id: &str,
) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    api.delete_project(id, &session.access_token).await?;
    println!("Deleted project {id}");
    Ok(())
}

// ── dashboard ───────────────────────────────────────────────────────────────

pub async fn stats(api: &ApiClient, store: &dyn SessionStore) -> Result<(), AppError> {
    let session = ensure_session(api, store).await?;
    let token = &session.access_token;

    let blogs = api.blog_stats(token).await?;
    let projects = api.project_stats(token).await?;
    let resumes = api.resume_stats(token).await?;

    println!(
        "blogs:    {} total, {} published, {} draft, {} views",
        blogs.total, blogs.published, blogs.draft, blogs.total_views
    );
    println!(
        "projects: {} total, {} completed, {} in progress, {} archived",
        projects.total, projects.completed, projects.in_progress, projects.archived
    );
    println!("resumes:  {} total", resumes.total);

    // User analytics are admin-only; skip quietly for regular accounts.
    if session.is_admin() {
        let users = api.user_stats(token).await?;
        println!("users:    {} total, {} verified", users.total, users.verified);
    }
    Ok(())
}
