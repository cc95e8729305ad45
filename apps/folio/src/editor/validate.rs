//! Submit-time validation.
//!
//! Nothing here runs while the user types; the model accepts any state. A
//! draft is checked once, right before it is serialized and sent; any failure
//! blocks the request and annotates the exact field, so validation errors
//! never reach the network.
//!
//! Field paths use dotted/indexed form (`experience[1].position`) so the
//! caller can point at the offending row.

use crate::models::blog::CreateBlogInput;
use crate::models::project::CreateProjectInput;
use crate::models::resume::CreateResumeInput;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn validate_resume(input: &CreateResumeInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(&mut errors, "title", &input.title, "Title is required");
    max_len(&mut errors, "title", &input.title, 100);

    require(
        &mut errors,
        "personalInfo.fullName",
        &input.personal_info.full_name,
        "Full name is required",
    );
    require(
        &mut errors,
        "personalInfo.email",
        &input.personal_info.email,
        "Email is required",
    );
    if !input.personal_info.email.is_empty() && !is_email(&input.personal_info.email) {
        errors.push(FieldError::new("personalInfo.email", "Invalid email address"));
    }
    url_if_present(&mut errors, "personalInfo.website", &input.personal_info.website);
    url_if_present(&mut errors, "personalInfo.linkedin", &input.personal_info.linkedin);
    url_if_present(&mut errors, "personalInfo.github", &input.personal_info.github);

    for (i, exp) in input.experience.iter().enumerate() {
        require(
            &mut errors,
            format!("experience[{i}].position"),
            &exp.position,
            "Position is required",
        );
        require(
            &mut errors,
            format!("experience[{i}].company"),
            &exp.company,
            "Company is required",
        );
        require(
            &mut errors,
            format!("experience[{i}].startDate"),
            &exp.start_date,
            "Start date is required",
        );
    }

    for (i, edu) in input.education.iter().enumerate() {
        require(
            &mut errors,
            format!("education[{i}].degree"),
            &edu.degree,
            "Degree is required",
        );
        require(
            &mut errors,
            format!("education[{i}].institution"),
            &edu.institution,
            "Institution is required",
        );
        require(
            &mut errors,
            format!("education[{i}].startDate"),
            &edu.start_date,
            "Start date is required",
        );
    }

    for (i, skill) in input.skills.iter().enumerate() {
        require(
            &mut errors,
            format!("skills[{i}].name"),
            &skill.name,
            "Skill name is required",
        );
        require(
            &mut errors,
            format!("skills[{i}].category"),
            &skill.category,
            "Category is required",
        );
    }

    errors
}

pub fn validate_blog(input: &CreateBlogInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(&mut errors, "title", &input.title, "Title is required");
    max_len(&mut errors, "title", &input.title, 200);
    require(&mut errors, "content", &input.content, "Content is required");

    if let Some(excerpt) = &input.excerpt {
        max_len(&mut errors, "excerpt", excerpt, 500);
    }
    if let Some(seo_title) = &input.seo_title {
        max_len(&mut errors, "seoTitle", seo_title, 60);
    }
    if let Some(seo_description) = &input.seo_description {
        max_len(&mut errors, "seoDescription", seo_description, 160);
    }
    if let Some(cover) = &input.cover_image {
        url_if_present(&mut errors, "coverImage", cover);
    }

    errors
}

pub fn validate_project(input: &CreateProjectInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(&mut errors, "title", &input.title, "Title is required");
    max_len(&mut errors, "title", &input.title, 100);
    require(
        &mut errors,
        "description",
        &input.description,
        "Description is required",
    );
    max_len(&mut errors, "description", &input.description, 500);

    if let Some(url) = &input.live_url {
        url_if_present(&mut errors, "liveUrl", url);
    }
    if let Some(url) = &input.github_url {
        url_if_present(&mut errors, "githubUrl", url);
    }

    errors
}

// ── helpers ─────────────────────────────────────────────────────────────────

fn require(errors: &mut Vec<FieldError>, field: impl Into<String>, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

fn max_len(errors: &mut Vec<FieldError>, field: &str, value: &str, limit: usize) {
    if value.chars().count() > limit {
        errors.push(FieldError::new(
            field,
            format!("Must be at most {limit} characters"),
        ));
    }
}

/// Shallow well-formedness check: one `@` with a dot somewhere after it.
/// The backend owns real address validation.
fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

/// Optional URL fields accept the empty string; anything else must be http(s).
fn url_if_present(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        errors.push(FieldError::new(field, "Invalid URL"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{default_template, Experience, PersonalInfo, Skill};

    fn make_valid_input() -> CreateResumeInput {
        CreateResumeInput {
            title: "Junior Dev Resume".to_string(),
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                ..PersonalInfo::default()
            },
            experience: vec![Experience {
                position: "Intern".to_string(),
                company: "Acme".to_string(),
                start_date: "2023-06".to_string(),
                ..Experience::default()
            }],
            education: vec![],
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: "Intermediate".to_string(),
                category: "Backend".to_string(),
            }],
            projects: vec![],
            template: default_template(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_resume(&make_valid_input()).is_empty());
    }

    #[test]
    fn test_missing_required_field_annotates_path() {
        let mut input = make_valid_input();
        input.experience[0].position.clear();
        let errors = validate_resume(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "experience[0].position");
    }

    #[test]
    fn test_title_over_limit_fails() {
        let mut input = make_valid_input();
        input.title = "x".repeat(101);
        let errors = validate_resume(&input);
        assert!(errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn test_bad_email_fails() {
        let mut input = make_valid_input();
        input.personal_info.email = "not-an-email".to_string();
        let errors = validate_resume(&input);
        assert!(errors.iter().any(|e| e.field == "personalInfo.email"));
    }

    #[test]
    fn test_empty_optional_url_is_accepted() {
        let input = make_valid_input();
        // website/linkedin/github are empty in the fixture
        assert!(validate_resume(&input).is_empty());
    }

    #[test]
    fn test_non_http_url_fails() {
        let mut input = make_valid_input();
        input.personal_info.website = "ftp://example.com".to_string();
        let errors = validate_resume(&input);
        assert!(errors.iter().any(|e| e.field == "personalInfo.website"));
    }

    #[test]
    fn test_blog_limits() {
        let blog = CreateBlogInput {
            title: "t".repeat(201),
            content: "body".to_string(),
            seo_title: Some("s".repeat(61)),
            ..CreateBlogInput::default()
        };
        let errors = validate_blog(&blog);
        assert!(errors.iter().any(|e| e.field == "title"));
        assert!(errors.iter().any(|e| e.field == "seoTitle"));
    }

    #[test]
    fn test_project_requires_description() {
        let project = CreateProjectInput {
            title: "Folio".to_string(),
            ..CreateProjectInput::default()
        };
        let errors = validate_project(&project);
        assert!(errors.iter().any(|e| e.field == "description"));
    }
}
