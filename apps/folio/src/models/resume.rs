//! Resume document model — the canonical in-memory shape of one resume and
//! the wire types exchanged with the backend.
//!
//! Serialization matches the backend's camelCase JSON. All entry types derive
//! `Default`, and a defaulted entry is the "blank placeholder" the editor
//! appends: every field at its zero value, except that entry kinds carrying
//! achievements start with a single empty achievement line.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton contact block. Name and email are the only required fields;
/// requiredness is enforced at submission time, never here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// When set, the renderer shows "Present" and ignores `end_date`. The
    /// stored `end_date` string is retained, not cleared.
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            position: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
            achievements: vec![String::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub gpa: String,
    pub achievements: Vec<String>,
}

impl Default for Education {
    fn default() -> Self {
        Self {
            degree: String::new(),
            field: String::new(),
            institution: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            gpa: String::new(),
            achievements: vec![String::new()],
        }
    }
}

/// Level and category are free text, not enums: the backend imposes no
/// vocabulary and the grouping key is whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub level: String,
    pub category: String,
}

/// Portfolio project attached to a resume. Present on the wire and in saved
/// records; the resume form does not edit these and the client renderer does
/// not draw them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: String,
    pub github: String,
    pub highlights: Vec<String>,
}

/// A saved resume as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<ResumeProject>,
    #[serde(default = "default_template")]
    pub template: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

/// Body of POST /api/resumes — a resume minus id, timestamps, and owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeInput {
    pub title: String,
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<ResumeProject>,
    #[serde(default = "default_template")]
    pub template: String,
}

pub fn default_template() -> String {
    "modern".to_string()
}

impl From<&Resume> for CreateResumeInput {
    /// A saved record viewed as a submittable body, which is what the
    /// renderer and the update path both consume.
    fn from(resume: &Resume) -> Self {
        CreateResumeInput {
            title: resume.title.clone(),
            personal_info: resume.personal_info.clone(),
            experience: resume.experience.clone(),
            education: resume.education.clone(),
            skills: resume.skills.clone(),
            projects: resume.projects.clone(),
            template: resume.template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_experience_has_one_empty_achievement() {
        let exp = Experience::default();
        assert_eq!(exp.achievements, vec![String::new()]);
        assert!(!exp.current);
        assert!(exp.position.is_empty());
    }

    #[test]
    fn test_blank_education_has_one_empty_achievement() {
        let edu = Education::default();
        assert_eq!(edu.achievements.len(), 1);
        assert!(edu.gpa.is_empty());
    }

    #[test]
    fn test_create_input_serializes_camel_case() {
        let input = CreateResumeInput {
            title: "My Resume".to_string(),
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                ..PersonalInfo::default()
            },
            experience: vec![Experience::default()],
            education: vec![],
            skills: vec![],
            projects: vec![],
            template: default_template(),
        };

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["personalInfo"]["fullName"], "Ada Lovelace");
        assert_eq!(json["template"], "modern");
        assert!(json["experience"][0]["startDate"].is_string());
    }

    #[test]
    fn test_resume_deserializes_with_missing_sections() {
        // The backend omits empty sections; they must default to empty vecs.
        let json = r#"{
            "id": "abc123",
            "title": "Backend Resume",
            "personalInfo": { "fullName": "A", "email": "a@b.c" },
            "template": "modern",
            "createdAt": "2024-03-01T00:00:00Z",
            "updatedAt": "2024-03-01T00:00:00Z",
            "userId": "u1"
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
        assert_eq!(resume.personal_info.email, "a@b.c");
    }
}
