use std::sync::Arc;

use tracing::{debug, info};

use super::{MarketplaceError, RecordRef};
use crate::marketplace::directory::{self, BrowseResult, DirectoryQuery, SkillCatalog};
use crate::marketplace::domain::{Profile, SkillKind, UserId};
use crate::marketplace::editor::{self, ProfileEditor, ProfileUpdate};
use crate::marketplace::repository::{Notifier, ProfileRepository};

/// Browse and profile-editing operations over the profile store.
pub struct DirectoryService<P, N> {
    profiles: Arc<P>,
    notifier: Arc<N>,
}

impl<P, N> DirectoryService<P, N>
where
    P: ProfileRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(profiles: Arc<P>, notifier: Arc<N>) -> Self {
        Self { profiles, notifier }
    }

    fn public_profiles(&self) -> Result<Vec<Profile>, MarketplaceError> {
        let mut profiles = self.profiles.profiles()?;
        profiles.retain(Profile::is_public);
        Ok(profiles)
    }

    /// Public profiles matching `query`, with "showing N of M" counters.
    pub fn browse(&self, query: &DirectoryQuery) -> Result<BrowseResult, MarketplaceError> {
        let listed = self.public_profiles()?;
        let profiles: Vec<Profile> = query.apply(&listed).into_iter().cloned().collect();
        debug!(
            query = %query.text,
            skill = ?query.skill_tag(),
            matches = profiles.len(),
            "directory browse"
        );

        Ok(BrowseResult {
            showing: profiles.len(),
            total: listed.len(),
            profiles,
        })
    }

    pub fn skills(&self, popular_limit: usize) -> Result<SkillCatalog, MarketplaceError> {
        let listed = self.public_profiles()?;
        Ok(SkillCatalog {
            skills: directory::skill_catalog(&listed),
            popular: directory::popular_skills(&listed, popular_limit),
        })
    }

    pub fn profile(&self, id: UserId) -> Result<Profile, MarketplaceError> {
        self.profiles
            .fetch_profile(id)?
            .ok_or(MarketplaceError::NotFound(RecordRef::Profile(id)))
    }

    /// Opens an edit session on the stored profile.
    pub fn edit(&self, id: UserId) -> Result<ProfileEditor, MarketplaceError> {
        let mut editor = ProfileEditor::new(self.profile(id)?);
        editor.begin();
        Ok(editor)
    }

    /// Closes the session and writes the draft back to the store.
    pub fn save(&self, editor: &mut ProfileEditor) -> Result<Profile, MarketplaceError> {
        let saved = editor.finish()?.clone();
        self.profiles.update_profile(saved.clone())?;
        info!(user_id = %saved.id, "profile saved");
        self.notifier.notify(editor::saved_notification())?;
        Ok(saved)
    }

    pub fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, MarketplaceError> {
        let mut editor = self.edit(id)?;
        editor.apply(update)?;
        self.save(&mut editor)
    }

    pub fn add_skill(
        &self,
        id: UserId,
        kind: SkillKind,
        label: &str,
    ) -> Result<Profile, MarketplaceError> {
        let mut editor = self.edit(id)?;
        editor.add_skill(kind, label)?;
        self.save(&mut editor)
    }

    pub fn remove_skill(
        &self,
        id: UserId,
        kind: SkillKind,
        label: &str,
    ) -> Result<Profile, MarketplaceError> {
        let mut editor = self.edit(id)?;
        if !editor.remove_skill(kind, label)? {
            editor.cancel();
            return Ok(editor.saved().clone());
        }
        self.save(&mut editor)
    }
}
