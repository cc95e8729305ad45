//! The resume being edited.
//!
//! `ResumeDraft` owns the aggregate for one editing session and is the single
//! layer that enforces the editing invariants: the keep-at-least-one floor on
//! experience/education/skills, and duplicate suppression for skill names
//! added through the tag flow. The sequence operations themselves
//! (`editor::ops`) stay guard-free so callers with their own policy can reuse
//! them.
//!
//! Mutations are replace-on-write: a touched sequence is swapped for a new
//! `Vec` in which only the edited entry was copied. The draft lives only in
//! memory; the persisted copy is whatever the backend last accepted.
#![allow(dead_code)]

use std::sync::Arc;

use thiserror::Error;

use crate::editor::ops;
use crate::models::resume::{
    default_template, CreateResumeInput, Education, Experience, PersonalInfo, Resume,
    ResumeProject, Skill,
};

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    /// The floor: experience, education, and skills always keep one entry so
    /// the form has something to render. Achievements have no floor.
    #[error("at least one {0} entry is required")]
    LastEntry(&'static str),
}

#[derive(Debug, Clone)]
pub struct ResumeDraft {
    pub title: String,
    pub personal_info: PersonalInfo,
    pub experience: Vec<Arc<Experience>>,
    pub education: Vec<Arc<Education>>,
    pub skills: Vec<Arc<Skill>>,
    /// Carried through from a hydrated record; not edited by this form.
    pub projects: Vec<ResumeProject>,
    pub template: String,
}

impl Default for ResumeDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeDraft {
    /// A fresh draft: default title and one blank placeholder per section.
    pub fn new() -> Self {
        Self {
            title: "My Resume".to_string(),
            personal_info: PersonalInfo::default(),
            experience: vec![Arc::new(Experience::default())],
            education: vec![Arc::new(Education::default())],
            skills: vec![Arc::new(Skill::default())],
            projects: Vec::new(),
            template: default_template(),
        }
    }

    /// Hydrates a draft from a saved record for editing. Sections the backend
    /// returned empty get their blank placeholder back so the form always has
    /// a row to show.
    pub fn from_resume(resume: &Resume) -> Self {
        fn seq_or_blank<T: Clone + Default>(entries: &[T]) -> Vec<Arc<T>> {
            if entries.is_empty() {
                vec![Arc::new(T::default())]
            } else {
                entries.iter().cloned().map(Arc::new).collect()
            }
        }

        Self {
            title: resume.title.clone(),
            personal_info: resume.personal_info.clone(),
            experience: seq_or_blank(&resume.experience),
            education: seq_or_blank(&resume.education),
            skills: seq_or_blank(&resume.skills),
            projects: resume.projects.clone(),
            template: resume.template.clone(),
        }
    }

    // ── experience ──────────────────────────────────────────────────────────

    pub fn add_experience(&mut self) {
        self.experience = ops::append(&self.experience);
    }

    pub fn remove_experience(&mut self, index: usize) -> Result<(), DraftError> {
        if self.experience.len() <= 1 {
            return Err(DraftError::LastEntry("experience"));
        }
        self.experience = ops::remove_at(&self.experience, index);
        Ok(())
    }

    pub fn update_experience(&mut self, index: usize, apply: impl FnOnce(&mut Experience)) {
        self.experience = ops::update_at(&self.experience, index, apply);
    }

    pub fn add_achievement(&mut self, exp_index: usize) {
        self.update_experience(exp_index, |e| e.achievements.push(String::new()));
    }

    pub fn update_achievement(&mut self, exp_index: usize, ach_index: usize, value: &str) {
        self.update_experience(exp_index, |e| {
            if let Some(slot) = e.achievements.get_mut(ach_index) {
                *slot = value.to_string();
            }
        });
    }

    pub fn remove_achievement(&mut self, exp_index: usize, ach_index: usize) {
        self.update_experience(exp_index, |e| {
            if ach_index < e.achievements.len() {
                e.achievements.remove(ach_index);
            }
        });
    }

    // ── education ───────────────────────────────────────────────────────────

    pub fn add_education(&mut self) {
        self.education = ops::append(&self.education);
    }

    pub fn remove_education(&mut self, index: usize) -> Result<(), DraftError> {
        if self.education.len() <= 1 {
            return Err(DraftError::LastEntry("education"));
        }
        self.education = ops::remove_at(&self.education, index);
        Ok(())
    }

    pub fn update_education(&mut self, index: usize, apply: impl FnOnce(&mut Education)) {
        self.education = ops::update_at(&self.education, index, apply);
    }

    pub fn add_education_achievement(&mut self, edu_index: usize) {
        self.update_education(edu_index, |e| e.achievements.push(String::new()));
    }

    pub fn remove_education_achievement(&mut self, edu_index: usize, ach_index: usize) {
        self.update_education(edu_index, |e| {
            if ach_index < e.achievements.len() {
                e.achievements.remove(ach_index);
            }
        });
    }

    // ── skills ──────────────────────────────────────────────────────────────

    pub fn add_skill(&mut self) {
        self.skills = ops::append(&self.skills);
    }

    /// Tag-flow skill add: appends a skill with the given name unless an
    /// identical name (exact, case-sensitive) already exists. Returns whether
    /// the sequence grew.
    pub fn add_skill_named(&mut self, name: &str) -> bool {
        if name.is_empty() || self.skills.iter().any(|s| s.name == name) {
            return false;
        }
        let mut next = self.skills.to_vec();
        next.push(Arc::new(Skill {
            name: name.to_string(),
            ..Skill::default()
        }));
        self.skills = next;
        true
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<(), DraftError> {
        if self.skills.len() <= 1 {
            return Err(DraftError::LastEntry("skill"));
        }
        self.skills = ops::remove_at(&self.skills, index);
        Ok(())
    }

    pub fn update_skill(&mut self, index: usize, apply: impl FnOnce(&mut Skill)) {
        self.skills = ops::update_at(&self.skills, index, apply);
    }

    // ── submission ──────────────────────────────────────────────────────────

    /// Snapshots the draft into the POST body. The draft itself is left
    /// untouched so a failed save keeps every in-progress edit.
    pub fn to_input(&self) -> CreateResumeInput {
        CreateResumeInput {
            title: self.title.clone(),
            personal_info: self.personal_info.clone(),
            experience: self.experience.iter().map(|e| (**e).clone()).collect(),
            education: self.education.iter().map(|e| (**e).clone()).collect(),
            skills: self.skills.iter().map(|s| (**s).clone()).collect(),
            projects: self.projects.clone(),
            template: self.template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_saved_resume() -> Resume {
        Resume {
            id: "r1".to_string(),
            title: "Saved".to_string(),
            personal_info: PersonalInfo::default(),
            experience: vec![Experience {
                position: "Engineer".to_string(),
                ..Experience::default()
            }],
            education: vec![],
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: "Expert".to_string(),
                category: "Backend".to_string(),
            }],
            projects: vec![],
            template: "modern".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn test_new_draft_has_one_placeholder_per_section() {
        let draft = ResumeDraft::new();
        assert_eq!(draft.experience.len(), 1);
        assert_eq!(draft.education.len(), 1);
        assert_eq!(draft.skills.len(), 1);
        assert_eq!(draft.title, "My Resume");
    }

    #[test]
    fn test_remove_last_entry_is_refused() {
        let mut draft = ResumeDraft::new();
        assert_eq!(
            draft.remove_skill(0),
            Err(DraftError::LastEntry("skill"))
        );
        assert_eq!(draft.skills.len(), 1);
    }

    #[test]
    fn test_remove_with_two_entries_succeeds() {
        let mut draft = ResumeDraft::new();
        draft.add_skill();
        assert_eq!(draft.skills.len(), 2);
        draft.remove_skill(0).unwrap();
        assert_eq!(draft.skills.len(), 1);
    }

    #[test]
    fn test_update_experience_shares_untouched_entries() {
        let mut draft = ResumeDraft::new();
        draft.add_experience();
        let before = draft.experience.clone();

        draft.update_experience(1, |e| e.position = "Intern".to_string());

        assert!(Arc::ptr_eq(&before[0], &draft.experience[0]));
        assert_eq!(draft.experience[1].position, "Intern");
    }

    #[test]
    fn test_current_flag_keeps_stored_end_date() {
        let mut draft = ResumeDraft::new();
        draft.update_experience(0, |e| e.end_date = "2024-01".to_string());
        draft.update_experience(0, |e| e.current = true);

        // The flag only changes what the renderer surfaces.
        assert!(draft.experience[0].current);
        assert_eq!(draft.experience[0].end_date, "2024-01");
    }

    #[test]
    fn test_add_skill_named_suppresses_exact_duplicate() {
        let mut draft = ResumeDraft::new();
        assert!(draft.add_skill_named("React"));
        let len = draft.skills.len();
        assert!(!draft.add_skill_named("React"));
        assert_eq!(draft.skills.len(), len);
        // Case matters.
        assert!(draft.add_skill_named("react"));
    }

    #[test]
    fn test_achievement_ops_have_no_floor() {
        let mut draft = ResumeDraft::new();
        assert_eq!(draft.experience[0].achievements.len(), 1);
        draft.remove_achievement(0, 0);
        assert!(draft.experience[0].achievements.is_empty());

        draft.add_achievement(0);
        draft.update_achievement(0, 0, "Shipped the thing");
        assert_eq!(draft.experience[0].achievements[0], "Shipped the thing");
    }

    #[test]
    fn test_hydrate_restores_placeholders_for_empty_sections() {
        let saved = make_saved_resume();
        let draft = ResumeDraft::from_resume(&saved);
        assert_eq!(draft.experience[0].position, "Engineer");
        // education was empty server-side; the form still needs a row.
        assert_eq!(draft.education.len(), 1);
        assert_eq!(draft.skills[0].name, "Rust");
    }

    #[test]
    fn test_to_input_snapshots_without_consuming_draft() {
        let mut draft = ResumeDraft::new();
        draft.title = "Junior Dev Resume".to_string();
        draft.update_experience(0, |e| e.company = "Acme".to_string());

        let input = draft.to_input();
        assert_eq!(input.title, "Junior Dev Resume");
        assert_eq!(input.experience[0].company, "Acme");

        // Draft still editable after snapshot.
        draft.update_experience(0, |e| e.company = "Other".to_string());
        assert_eq!(input.experience[0].company, "Acme");
    }
}
