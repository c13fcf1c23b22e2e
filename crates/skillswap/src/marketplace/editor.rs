use serde::{Deserialize, Serialize};

use super::domain::{Profile, SkillKind, Visibility};
use super::repository::Notification;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("skill label must not be blank")]
    Blank,
    #[error("'{label}' is already in the {kind} skills")]
    Duplicate { kind: SkillKind, label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("profile is not in edit mode")]
    NotEditing,
    #[error(transparent)]
    Skill(#[from] SkillError),
}

impl Profile {
    /// Appends a trimmed label unless it is blank or already present.
    pub fn add_skill(&mut self, kind: SkillKind, label: &str) -> Result<(), SkillError> {
        push_unique(self.skills_mut(kind), kind, label)
    }

    /// Removes every exact match. Returns whether anything was removed.
    pub fn remove_skill(&mut self, kind: SkillKind, label: &str) -> bool {
        let skills = self.skills_mut(kind);
        let before = skills.len();
        skills.retain(|existing| existing != label);
        skills.len() != before
    }

    /// Rebuilds a skill list under the same rules as [`Profile::add_skill`].
    /// On error the current list is left untouched.
    pub fn replace_skills(&mut self, kind: SkillKind, labels: &[String]) -> Result<(), SkillError> {
        let mut staged = Vec::with_capacity(labels.len());
        for label in labels {
            push_unique(&mut staged, kind, label)?;
        }
        *self.skills_mut(kind) = staged;
        Ok(())
    }
}

fn push_unique(skills: &mut Vec<String>, kind: SkillKind, label: &str) -> Result<(), SkillError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(SkillError::Blank);
    }
    if skills.iter().any(|existing| existing == label) {
        return Err(SkillError::Duplicate {
            kind,
            label: label.to_string(),
        });
    }
    skills.push(label.to_string());
    Ok(())
}

/// Partial overwrite of the owner-editable fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub skills_offered: Option<Vec<String>>,
    #[serde(default)]
    pub skills_wanted: Option<Vec<String>>,
}

impl ProfileUpdate {
    fn apply_fields(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(location) = &self.location {
            profile.location = location.clone();
        }
        if let Some(bio) = &self.bio {
            profile.bio = bio.clone();
        }
        if let Some(availability) = &self.availability {
            profile.availability = availability.clone();
        }
        if let Some(visibility) = self.visibility {
            profile.visibility = visibility;
        }
    }
}

/// Owner-side edit session. Changes land on a draft and reach the saved copy on [`finish`].
///
/// [`finish`]: ProfileEditor::finish
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    saved: Profile,
    draft: Option<Profile>,
}

impl ProfileEditor {
    pub fn new(profile: Profile) -> Self {
        Self {
            saved: profile,
            draft: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn begin(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    /// The draft while editing, otherwise the saved profile.
    pub fn current(&self) -> &Profile {
        self.draft.as_ref().unwrap_or(&self.saved)
    }

    pub fn saved(&self) -> &Profile {
        &self.saved
    }

    fn draft_mut(&mut self) -> Result<&mut Profile, EditorError> {
        self.draft.as_mut().ok_or(EditorError::NotEditing)
    }

    /// Applies every field of `update` or, on a skill error, none of them.
    pub fn apply(&mut self, update: &ProfileUpdate) -> Result<(), EditorError> {
        let mut staged = self.draft_mut()?.clone();
        if let Some(labels) = &update.skills_offered {
            staged.replace_skills(SkillKind::Offered, labels)?;
        }
        if let Some(labels) = &update.skills_wanted {
            staged.replace_skills(SkillKind::Wanted, labels)?;
        }
        update.apply_fields(&mut staged);
        *self.draft_mut()? = staged;
        Ok(())
    }

    pub fn set_visibility(&mut self, visibility: Visibility) -> Result<(), EditorError> {
        self.draft_mut()?.visibility = visibility;
        Ok(())
    }

    pub fn add_skill(&mut self, kind: SkillKind, label: &str) -> Result<(), EditorError> {
        self.draft_mut()?.add_skill(kind, label)?;
        Ok(())
    }

    pub fn remove_skill(&mut self, kind: SkillKind, label: &str) -> Result<bool, EditorError> {
        Ok(self.draft_mut()?.remove_skill(kind, label))
    }

    /// Leaves edit mode, promoting the draft to the saved copy.
    pub fn finish(&mut self) -> Result<&Profile, EditorError> {
        let draft = self.draft.take().ok_or(EditorError::NotEditing)?;
        self.saved = draft;
        Ok(&self.saved)
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

pub(crate) fn saved_notification() -> Notification {
    Notification::new(
        "Profile Updated",
        "Your profile has been successfully updated.",
    )
}
