//! Demo data loaded into the store at startup.

use chrono::NaiveDate;

use super::domain::{
    AccountStatus, Profile, Report, ReportId, ReportStatus, UserAccount, UserId, Visibility,
};
use super::memory::MarketplaceStore;
use super::repository::{AccountRepository, ProfileRepository, ReportRepository, RepositoryError};

/// Member whose profile the demo treats as "my profile".
pub const DEMO_OWNER: UserId = UserId(7);

/// Member flagged by the seeded reports.
pub const DEMO_FLAGGED_USER: UserId = UserId(8);

fn skills(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn profile(
    id: u32,
    name: &str,
    location: &str,
    rating: f32,
    offered: &[&str],
    wanted: &[&str],
    availability: &str,
    completed_swaps: u32,
) -> Profile {
    Profile {
        id: UserId(id),
        name: name.to_string(),
        location: location.to_string(),
        bio: String::new(),
        rating,
        skills_offered: skills(offered),
        skills_wanted: skills(wanted),
        availability: availability.to_string(),
        completed_swaps,
        visibility: Visibility::Public,
    }
}

pub fn profiles() -> Vec<Profile> {
    let mut owner = profile(
        7,
        "Alex Johnson",
        "San Francisco, CA",
        4.9,
        &["React", "UI/UX Design", "Python"],
        &["Machine Learning", "Data Science", "Mobile Development"],
        "Weekends and evenings",
        8,
    );
    owner.bio =
        "Passionate developer and designer looking to expand my skills through collaboration."
            .to_string();

    let mut flagged = profile(
        8,
        "Spam User",
        "Unknown",
        2.1,
        &["Crypto Trading"],
        &[],
        "Anytime",
        2,
    );
    flagged.visibility = Visibility::Private;

    vec![
        profile(
            1,
            "Sarah Chen",
            "New York, NY",
            4.9,
            &["React", "TypeScript", "UI/UX Design"],
            &["Machine Learning", "Data Science"],
            "Weekends",
            15,
        ),
        profile(
            2,
            "Marcus Rodriguez",
            "San Francisco, CA",
            4.8,
            &["Python", "Machine Learning", "Data Analysis"],
            &["Web Development", "React"],
            "Evenings",
            12,
        ),
        profile(
            3,
            "Emily Johnson",
            "Austin, TX",
            5.0,
            &["Photography", "Video Editing", "Adobe Creative Suite"],
            &["Web Design", "Branding"],
            "Flexible",
            8,
        ),
        profile(
            4,
            "David Kim",
            "Seattle, WA",
            4.7,
            &["Mobile Development", "Flutter", "iOS"],
            &["Backend Development", "DevOps"],
            "Weekdays after 6PM",
            20,
        ),
        profile(
            5,
            "Lisa Patel",
            "Boston, MA",
            4.9,
            &["Digital Marketing", "SEO", "Content Strategy"],
            &["Analytics", "Social Media Management"],
            "Weekends",
            18,
        ),
        profile(
            6,
            "Alex Thompson",
            "Chicago, IL",
            4.6,
            &["3D Modeling", "Animation", "Blender"],
            &["Game Development", "Unity"],
            "Evenings and weekends",
            10,
        ),
        owner,
        flagged,
    ]
}

fn account(profile: &Profile, email: &str, joined_on: NaiveDate, report_count: u32) -> UserAccount {
    UserAccount {
        id: profile.id,
        name: profile.name.clone(),
        email: email.to_string(),
        status: AccountStatus::Active,
        joined_on,
        completed_swaps: profile.completed_swaps,
        rating: profile.rating,
        report_count,
    }
}

pub fn accounts() -> Vec<UserAccount> {
    let joined = [
        ("sarah@example.com", date(2024, 1, 15), 0),
        ("marcus@example.com", date(2024, 2, 1), 1),
        ("emily@example.com", date(2024, 2, 12), 0),
        ("david@example.com", date(2024, 2, 20), 0),
        ("lisa@example.com", date(2024, 2, 28), 0),
        ("alex.t@example.com", date(2024, 3, 2), 0),
        ("alex@example.com", date(2024, 3, 5), 0),
        ("spam@example.com", date(2024, 3, 10), 5),
    ];

    profiles()
        .iter()
        .zip(joined)
        .map(|(profile, (email, joined_on, reports))| account(profile, email, joined_on, reports))
        .collect()
}

pub fn reports() -> Vec<Report> {
    vec![
        Report {
            id: ReportId(1),
            reported_user: DEMO_FLAGGED_USER,
            reported_by: Some(UserId(1)),
            reason: "Inappropriate skill descriptions".to_string(),
            description:
                "User is posting fake skills and inappropriate content in skill descriptions."
                    .to_string(),
            filed_on: date(2024, 3, 15),
            status: ReportStatus::Pending,
        },
        Report {
            id: ReportId(2),
            reported_user: UserId(2),
            reported_by: None,
            reason: "No-show for scheduled swap".to_string(),
            description: "User didn't show up for the scheduled skill swap session.".to_string(),
            filed_on: date(2024, 3, 14),
            status: ReportStatus::Pending,
        },
    ]
}

/// Store pre-populated with the demo members and reports.
pub fn demo_store() -> Result<MarketplaceStore, RepositoryError> {
    let store = MarketplaceStore::default();
    for profile in profiles() {
        store.insert_profile(profile)?;
    }
    for account in accounts() {
        store.insert_account(account)?;
    }
    for report in reports() {
        store.insert_report(report)?;
    }
    Ok(store)
}
