use crate::infra::build_services;
use clap::{Args, Subcommand};
use skillswap::error::AppError;
use skillswap::marketplace::directory::toggle_tag;
use skillswap::marketplace::seed::{DEMO_FLAGGED_USER, DEMO_OWNER};
use skillswap::marketplace::{
    AccountView, BrowseResult, DirectoryQuery, ExportKind, MarketplaceError, Notification,
    NotificationLog, PlatformStats, ProfileUpdate, Report, ReportId, SkillKind, UserId,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct BrowseArgs {
    /// Case-insensitive text matched against name, location, and offered skills
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Only list members offering exactly this skill
    #[arg(long)]
    pub(crate) skill: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum AdminCommand {
    /// List accounts, optionally filtered by name or email
    Users {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// List moderation reports
    Reports {
        /// Only show reports awaiting a decision
        #[arg(long)]
        pending: bool,
    },
    /// Show platform totals
    Stats,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// user_activity, swap_statistics, moderation_log, or platform_analytics
    pub(crate) kind: String,
    /// Write the CSV to this path instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let (services, _) = build_services(true)?;
    let query = DirectoryQuery::new(args.query, args.skill);
    let result = services.directory.browse(&query)?;
    print!("{}", render_browse(&result));
    Ok(())
}

pub(crate) fn run_admin(command: AdminCommand) -> Result<(), AppError> {
    let (services, _) = build_services(true)?;
    let output = match command {
        AdminCommand::Users { query } => render_users(&services.moderation.users(&query)?),
        AdminCommand::Reports { pending } => {
            let reports = if pending {
                services.moderation.pending_reports()?
            } else {
                services.moderation.reports()?
            };
            render_reports(&reports, &services.moderation.users("")?)
        }
        AdminCommand::Stats => render_stats(&services.moderation.stats()?),
    };
    print!("{output}");
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let kind = args
        .kind
        .parse::<ExportKind>()
        .map_err(MarketplaceError::from)?;
    let (services, notifications) = build_services(true)?;
    let document = services.moderation.export(kind)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, document.body.as_bytes())?;
            if let Some(notification) = notifications.last() {
                print!("{}", render_notification(&notification));
            }
            println!("Saved to {}", path.display());
        }
        None => print!("{}", document.body),
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let (services, notifications) = build_services(true)?;

    println!("SkillSwap marketplace demo");

    println!("\nBrowse: everyone");
    print!(
        "{}",
        render_browse(&services.directory.browse(&DirectoryQuery::default())?)
    );

    println!("\nBrowse: offering React");
    let react = DirectoryQuery::new("", Some("React".to_string()));
    print!("{}", render_browse(&services.directory.browse(&react)?));

    println!("\nBrowse: React tag clicked again");
    let cleared = DirectoryQuery::new("", toggle_tag(react.skill_tag(), "React"));
    print!("{}", render_browse(&services.directory.browse(&cleared)?));

    println!("\nBrowse: \"underwater basket weaving\"");
    let nothing = DirectoryQuery::new("underwater basket weaving", None);
    print!("{}", render_browse(&services.directory.browse(&nothing)?));

    println!("\nProfile editing");
    let mut editor = services.directory.edit(DEMO_OWNER)?;
    editor
        .apply(&ProfileUpdate {
            availability: Some("Weekday mornings".to_string()),
            ..ProfileUpdate::default()
        })
        .map_err(MarketplaceError::from)?;
    editor
        .add_skill(SkillKind::Wanted, "Rust")
        .map_err(MarketplaceError::from)?;
    if let Err(err) = editor.add_skill(SkillKind::Offered, "React") {
        println!("  Rejected: {err}");
    }
    let saved = services.directory.save(&mut editor)?;
    println!(
        "  {} now wants: {}",
        saved.name,
        saved.skills(SkillKind::Wanted).join(", ")
    );
    print_last(&notifications);

    println!("\nModeration");
    let banned = services.moderation.ban(DEMO_FLAGGED_USER)?;
    println!(
        "  {} is now {}",
        banned.account.name,
        banned.moderation_status.label()
    );
    print_last(&notifications);

    let approved = services.moderation.approve(ReportId(1))?;
    println!("  Report #{} {}", approved.id, approved.status);
    print_last(&notifications);

    let rejected = services.moderation.reject(ReportId(2))?;
    println!("  Report #{} {}", rejected.id, rejected.status);
    print_last(&notifications);

    if let Err(err) = services.moderation.approve(ReportId(1)) {
        println!("  Second decision on report #1 refused: {err}");
    }

    let unbanned = services.moderation.unban(DEMO_FLAGGED_USER)?;
    println!(
        "  {} is now {}",
        unbanned.account.name,
        unbanned.moderation_status.label()
    );
    print_last(&notifications);

    println!();
    print!("{}", render_stats(&services.moderation.stats()?));

    println!();
    services
        .moderation
        .broadcast("Scheduled maintenance on Sunday at 02:00 UTC.")?;
    print_last(&notifications);

    println!();
    let document = services.moderation.export(ExportKind::PlatformAnalytics)?;
    println!("{}", document.filename);
    print!("{}", document.body);
    print_last(&notifications);

    Ok(())
}

fn print_last(notifications: &NotificationLog) {
    if let Some(notification) = notifications.last() {
        print!("{}", render_notification(&notification));
    }
}

pub(crate) fn render_notification(notification: &Notification) -> String {
    format!("  [{}] {}\n", notification.title, notification.description)
}

pub(crate) fn render_browse(result: &BrowseResult) -> String {
    let mut out = String::new();
    if result.is_empty() {
        let _ = writeln!(out, "No results found");
        let _ = writeln!(out, "Try adjusting your search or filters");
        return out;
    }

    let _ = writeln!(out, "Showing {} of {} people", result.showing, result.total);
    for profile in &result.profiles {
        let _ = writeln!(
            out,
            "- [{}] {} ({}) rating {:.1}, {} swaps",
            profile.initials(),
            profile.name,
            profile.location,
            profile.rating,
            profile.completed_swaps
        );
        let _ = writeln!(
            out,
            "    offers: {}",
            profile.skills(SkillKind::Offered).join(", ")
        );
        let _ = writeln!(
            out,
            "    wants:  {}",
            profile.skills(SkillKind::Wanted).join(", ")
        );
        let _ = writeln!(out, "    available: {}", profile.availability);
    }
    out
}

pub(crate) fn render_users(users: &[AccountView]) -> String {
    let mut out = String::new();
    if users.is_empty() {
        let _ = writeln!(out, "No users match");
        return out;
    }
    for view in users {
        let account = &view.account;
        let _ = writeln!(
            out,
            "#{:<3} {:<18} {:<28} {:<9} joined {} | {} swaps | {} reports",
            account.id,
            account.name,
            account.email,
            view.moderation_status.label(),
            account.joined_on,
            account.completed_swaps,
            account.report_count
        );
    }
    out
}

/// Reports with member names resolved from `accounts`; unknown ids fall back to `user N`.
pub(crate) fn render_reports(reports: &[Report], accounts: &[AccountView]) -> String {
    let mut out = String::new();
    if reports.is_empty() {
        let _ = writeln!(out, "No reports");
        return out;
    }

    let names: BTreeMap<UserId, &str> = accounts
        .iter()
        .map(|view| (view.account.id, view.account.name.as_str()))
        .collect();
    let display_name = |id: UserId| {
        names
            .get(&id)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("user {id}"))
    };

    for report in reports {
        let reporter = report
            .reported_by
            .map(display_name)
            .unwrap_or_else(|| "Anonymous".to_string());
        let _ = writeln!(
            out,
            "#{} [{}] Report against {}: {}",
            report.id,
            report.status,
            display_name(report.reported_user),
            report.reason
        );
        let _ = writeln!(out, "    Reported by {} on {}", reporter, report.filed_on);
        let _ = writeln!(out, "    {}", report.description);
    }
    out
}

pub(crate) fn render_stats(stats: &PlatformStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Platform statistics");
    let _ = writeln!(out, "  Total users:     {}", stats.total_users);
    let _ = writeln!(out, "  Active users:    {}", stats.active_users);
    let _ = writeln!(out, "  Banned users:    {}", stats.banned_users);
    let _ = writeln!(out, "  Flagged users:   {}", stats.flagged_users);
    let _ = writeln!(out, "  Pending reports: {}", stats.pending_reports);
    let _ = writeln!(out, "  Completed swaps: {}", stats.completed_swaps);
    out
}
