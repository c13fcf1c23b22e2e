//! Profile search for the browse view.
//!
//! Everything here is a pure function over borrowed profiles so it can be re-run on every
//! keystroke without touching the store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::Profile;

/// Number of skills surfaced as quick filters when the caller does not ask for a limit.
pub const DEFAULT_POPULAR_SKILLS: usize = 8;

/// Free-text query plus an optional exact skill tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default, rename = "q")]
    pub text: String,
    #[serde(default)]
    pub skill: Option<String>,
}

impl DirectoryQuery {
    pub fn new(text: impl Into<String>, skill: Option<String>) -> Self {
        Self {
            text: text.into(),
            skill,
        }
    }

    /// Skill tag with the empty string treated as "no tag".
    pub fn skill_tag(&self) -> Option<&str> {
        self.skill.as_deref().filter(|tag| !tag.is_empty())
    }

    pub fn apply<'a, I>(&self, profiles: I) -> Vec<&'a Profile>
    where
        I: IntoIterator<Item = &'a Profile>,
    {
        filter(profiles, &self.text, self.skill_tag())
    }
}

/// Keeps profiles whose name, location or an offered skill contains `query`
/// (case-insensitive) and, when `skill_tag` is set, that offer exactly that skill.
/// Relative order is preserved.
pub fn filter<'a, I>(profiles: I, query: &str, skill_tag: Option<&str>) -> Vec<&'a Profile>
where
    I: IntoIterator<Item = &'a Profile>,
{
    let needle = query.to_lowercase();
    let tag = skill_tag.filter(|tag| !tag.is_empty());

    profiles
        .into_iter()
        .filter(|profile| matches_text(profile, &needle) && matches_tag(profile, tag))
        .collect()
}

fn matches_text(profile: &Profile, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    contains_folded(&profile.name, needle)
        || contains_folded(&profile.location, needle)
        || profile
            .skills_offered
            .iter()
            .any(|skill| contains_folded(skill, needle))
}

fn matches_tag(profile: &Profile, tag: Option<&str>) -> bool {
    match tag {
        None => true,
        Some(tag) => profile.skills_offered.iter().any(|skill| skill == tag),
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Sorted, de-duplicated union of offered and wanted skills.
pub fn skill_catalog<'a, I>(profiles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Profile>,
{
    profiles
        .into_iter()
        .flat_map(|profile| profile.skills_offered.iter().chain(&profile.skills_wanted))
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Leading entries of the catalog, used as one-click filters.
pub fn popular_skills<'a, I>(profiles: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a Profile>,
{
    let mut catalog = skill_catalog(profiles);
    catalog.truncate(limit);
    catalog
}

/// Clicking the selected tag again clears the filter; any other tag replaces it.
pub fn toggle_tag(current: Option<&str>, tag: &str) -> Option<String> {
    match current {
        Some(selected) if selected == tag => None,
        _ => Some(tag.to_string()),
    }
}

/// Browse response: the visible page plus the "showing N of M" counters.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult {
    pub showing: usize,
    pub total: usize,
    pub profiles: Vec<Profile>,
}

impl BrowseResult {
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Skill listing used to populate the tag filter.
#[derive(Debug, Clone, Serialize)]
pub struct SkillCatalog {
    pub skills: Vec<String>,
    pub popular: Vec<String>,
}
