//! Deterministic resume rendering: line-cursor layout into positioned text
//! operations, then serialization to PDF bytes.

pub mod layout;
pub mod pdf;

pub use layout::{render, RenderedDocument, SENTINEL};

use crate::models::resume::CreateResumeInput;

/// Lays out and serializes in one step. Never fails: missing values render
/// as the sentinel placeholder.
pub fn render_pdf(input: &CreateResumeInput) -> Vec<u8> {
    pdf::write_pdf(&layout::render(input))
}

/// Download name for a rendered resume: the title with each whitespace run
/// collapsed to a single underscore, plus the fixed extension.
pub fn download_filename(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 4);
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
                in_whitespace = true;
            }
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    name.push_str(".pdf");
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{default_template, Experience, PersonalInfo, Skill};

    fn make_input() -> CreateResumeInput {
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
                end_date: "2024-01".to_string(),
                current: true,
                ..Experience::default()
            }],
            education: vec![],
            skills: vec![Skill {
                name: "Rust".to_string(),
                ..Skill::default()
            }],
            projects: vec![],
            template: default_template(),
        }
    }

    #[test]
    fn test_download_filename_replaces_whitespace_runs() {
        assert_eq!(download_filename("Junior Dev Resume"), "Junior_Dev_Resume.pdf");
        assert_eq!(download_filename("a  b\tc"), "a_b_c.pdf");
        assert_eq!(download_filename("one"), "one.pdf");
    }

    #[test]
    fn test_render_pdf_end_to_end() {
        let bytes = render_pdf(&make_input());
        assert!(bytes.starts_with(b"%PDF-"));
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("Intern"));
        assert!(raw.contains("Present"));
        assert!(!raw.contains("2024-01"));
    }

    #[test]
    fn test_render_pdf_is_byte_deterministic() {
        let input = make_input();
        assert_eq!(render_pdf(&input), render_pdf(&input));
    }
}
