//! Command-line front end over JSON collection files.
//!
//! Each subcommand drives the same library paths a UI shell would: `list`
//! mounts a [`ManagedList`] (or, for read-only kinds, a bare [`ListState`])
//! and prints its view model; `audit` runs the audit filter; `can` evaluates
//! a role's permissions.
//!
//! ```text
//! coursedesk list courses --query rust
//! coursedesk audit --action delete --from 2024-01-01 --search alice
//! coursedesk can --role Editor courses delete
//! ```
//!
//! Collections are read from `<data_dir>/<kind>.json` unless `--file` is
//! given. Files may hold a bare array, a `{ "data": [...] }` envelope, or the
//! store format written by [`JsonFileService`].

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

use coursedesk::app::{ListState, ManagedList, SearchKeys};
use coursedesk::domain::{
    filter_logs, ActionTag, AuditAction, AuditLogEntry, AuditResource, Badge, Category, ConsoleError, Course,
    DateBound, FilterCriteria, Identified, LeaderboardEntry, ResourceTag, Role, Searchable,
};
use coursedesk::infrastructure::store_path;
use coursedesk::service::{envelope, JsonFileService, ResourceService, Storable};
use coursedesk::ui::views::{AuditLogView, BadgeView, CategoryView, CourseView, LeaderboardView, RoleView};
use coursedesk::ui::{mapper, ListViewModel};
use coursedesk::{Config, Result};

#[derive(Parser)]
#[command(
    name = "coursedesk",
    version,
    about = "Inspect e-learning admin collections from JSON files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Override a configuration key (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value, global = true)]
    overrides: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a collection, optionally filtered by a search query.
    List(ListArgs),

    /// Filter audit logs by action, resource, date range, and free text.
    Audit(AuditArgs),

    /// Check whether a role may perform an action on a resource.
    ///
    /// Exits with status 0 when allowed and 1 when denied.
    Can(CanArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Courses,
    Categories,
    Badges,
    Roles,
    AuditLogs,
    Leaderboards,
}

impl Kind {
    const fn store_name(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Categories => "categories",
            Self::Badges => "badges",
            Self::Roles => "roles",
            Self::AuditLogs => "audit_logs",
            Self::Leaderboards => "leaderboards",
        }
    }
}

#[derive(Args)]
struct ListArgs {
    /// Collection to print.
    #[arg(value_enum)]
    kind: Kind,

    /// Case-insensitive search query.
    #[arg(short, long)]
    query: Option<String>,

    /// Read this file instead of the data directory.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct AuditArgs {
    /// Only this action (`create`, `delete`, `login`, ...).
    #[arg(long)]
    action: Option<AuditAction>,

    /// Only this resource kind (`course`, `role`, ...).
    #[arg(long)]
    resource: Option<AuditResource>,

    /// Earliest date, `YYYY-MM-DD` or RFC 3339 (inclusive).
    #[arg(long, value_parser = parse_date_bound)]
    from: Option<DateBound>,

    /// Latest date, `YYYY-MM-DD` or RFC 3339 (inclusive).
    #[arg(long, value_parser = parse_date_bound)]
    to: Option<DateBound>,

    /// Free text matched against user, action, and resource.
    #[arg(short, long)]
    search: Option<String>,

    /// Read this file instead of the data directory.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct CanArgs {
    /// Role name (case-insensitive) or numeric id.
    #[arg(long)]
    role: String,

    /// Resource tag (`courses`, `audit_logs`, ...).
    resource: ResourceTag,

    /// Action tag (`create`, `read`, `update`, `delete`, `approve`, `export`).
    action: ActionTag,

    /// Read roles from this file instead of the data directory.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}

fn parse_date_bound(s: &str) -> std::result::Result<DateBound, String> {
    DateBound::parse(s).ok_or_else(|| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got `{s}`"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), &cli.overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = coursedesk::initialize(&config) {
        eprintln!("warning: tracing disabled: {e}");
    }

    let outcome = match cli.command {
        Command::List(args) => run_list(args, &config).await.map(|()| ExitCode::SUCCESS),
        Command::Audit(args) => run_audit(args, &config).map(|()| ExitCode::SUCCESS),
        Command::Can(args) => run_can(args, &config).await,
    };

    outcome.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {e}");
        ExitCode::from(2)
    })
}

fn load_config(path: Option<&Path>, overrides: &[(String, String)]) -> Result<Config> {
    let base = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let overrides: BTreeMap<String, String> = overrides.iter().cloned().collect();
    Ok(base.merged_with(&overrides))
}

async fn run_list(args: ListArgs, config: &Config) -> Result<()> {
    let path = args.file.unwrap_or_else(|| store_path(config, args.kind.store_name()));
    let query = args.query.unwrap_or_default();

    match args.kind {
        Kind::Courses => {
            let keys = SearchKeys::new(["title", "description", "category", "instructor", "status"]);
            list_managed::<Course>(&path, "Courses", "courses", keys, &query, config).await
        }
        Kind::Categories => {
            let keys = SearchKeys::new(["name", "description"]);
            list_managed::<Category>(&path, "Categories", "categories", keys, &query, config).await
        }
        Kind::Badges => {
            let keys = SearchKeys::new(["name", "description", "criteria"]);
            list_managed::<Badge>(&path, "Badges", "badges", keys, &query, config).await
        }
        Kind::Roles => {
            let keys = SearchKeys::new(["name", "description", "permissions", "kind"]);
            list_managed::<Role>(&path, "Roles", "roles", keys, &query, config).await
        }
        Kind::AuditLogs => {
            let entries: Vec<AuditLogEntry> = read_records(&path)?;
            let views = entries.iter().map(mapper::audit_log_view).collect();
            let keys = SearchKeys::new(["user", "action", "resource", "details"]);
            print_read_only("Audit Logs", "audit logs", views, keys, &query);
            Ok(())
        }
        Kind::Leaderboards => {
            let entries: Vec<LeaderboardEntry> = read_records(&path)?;
            let views = mapper::leaderboard_views(&entries);
            print_read_only("Leaderboard", "rankings", views, SearchKeys::new(["user"]), &query);
            Ok(())
        }
    }
}

async fn list_managed<R>(
    path: &Path,
    title: &str,
    noun: &str,
    keys: SearchKeys<R::View>,
    query: &str,
    config: &Config,
) -> Result<()>
where
    R: Storable,
    R::View: Row,
{
    let service = JsonFileService::<R>::open(path)?;
    let mut list = ManagedList::new(service, title, noun, keys, config);
    list.mount().await?;
    list.set_query(query);
    print_viewmodel(&list.compute_viewmodel());
    Ok(())
}

fn print_read_only<V: Row>(title: &str, noun: &str, views: Vec<V>, keys: SearchKeys<V>, query: &str) {
    let mut state = ListState::new(title, noun, keys);
    let dropped = state.replace_all(views);
    if dropped > 0 {
        tracing::warn!(dropped = dropped, "duplicate ids in file");
    }
    state.query = query.to_string();
    print_viewmodel(&state.compute_viewmodel());
}

fn run_audit(args: AuditArgs, config: &Config) -> Result<()> {
    let path = args.file.unwrap_or_else(|| store_path(config, Kind::AuditLogs.store_name()));
    let logs: Vec<AuditLogEntry> = read_records(&path)?;

    let criteria = FilterCriteria {
        action: args.action,
        resource: args.resource,
        start_date: args.from,
        end_date: args.to,
        search: args.search,
    };

    let matched = filter_logs(&logs, &criteria);
    println!("Audit Logs ({} of {})", matched.len(), logs.len());
    if matched.is_empty() {
        println!("No matching audit logs");
        return Ok(());
    }

    print_line(AuditLogView::HEADERS.iter().map(ToString::to_string));
    for log in matched {
        print_line(mapper::audit_log_view(log).cells());
    }
    Ok(())
}

async fn run_can(args: CanArgs, config: &Config) -> Result<ExitCode> {
    let path = args.file.unwrap_or_else(|| store_path(config, Kind::Roles.store_name()));
    let roles = JsonFileService::<Role>::open(path)?
        .list()
        .await
        .map_err(|e| ConsoleError::Fetch(e.user_message(&config.error_fallback)))?;

    let wanted_id = args.role.parse::<u64>().ok();
    let role = roles
        .iter()
        .find(|r| Some(r.id) == wanted_id || r.name.eq_ignore_ascii_case(&args.role))
        .ok_or_else(|| ConsoleError::Config(format!("no role named `{}`", args.role)))?;

    let allowed = role.can_perform(args.resource, args.action);
    println!(
        "{}: {} {} on {}",
        role.name,
        if allowed { "may" } else { "may not" },
        args.action,
        args.resource
    );
    Ok(if allowed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConsoleError::Storage(format!("cannot read {}: {e}", path.display())))?;
    let mut value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| ConsoleError::Storage(format!("failed to parse JSON: {e}")))?;

    if let Some(records) = value.get_mut("records").map(serde_json::Value::take) {
        value = records;
    }
    envelope::unwrap_list(value).map_err(|e| ConsoleError::Storage(e.to_string()))
}

fn print_viewmodel<V: Row>(vm: &ListViewModel<V>) {
    println!("{}", vm.header.title);
    if let Some(error) = vm.error.as_deref().filter(|_| vm.empty_state.is_none()) {
        println!("! {error}");
    }
    if let Some(empty) = &vm.empty_state {
        println!("{}", empty.message);
        return;
    }

    print_line(V::HEADERS.iter().map(ToString::to_string));
    for row in &vm.rows {
        print_line(row.item.cells());
    }
}

fn print_line(cells: impl IntoIterator<Item = String>) {
    println!("{}", cells.into_iter().collect::<Vec<_>>().join("\t"));
}

/// Tab-separated rendering of a display shape.
trait Row: Identified + Searchable + Clone {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl Row for CourseView {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Category", "Instructor", "Status", "Price", "Enrolled", "Rating"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.category.clone(),
            self.instructor.clone(),
            self.status.clone(),
            self.price.clone(),
            self.enrollments.to_string(),
            self.rating.clone(),
        ]
    }
}

impl Row for CategoryView {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Description", "Courses", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            self.course_count.to_string(),
            self.created.clone(),
        ]
    }
}

impl Row for BadgeView {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Criteria", "Points", "Awarded"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.criteria.clone(),
            self.points.to_string(),
            self.awarded.to_string(),
        ]
    }
}

impl Row for RoleView {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Type", "Users", "Permissions"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.kind.clone(),
            self.user_count.to_string(),
            self.permission_summary.clone(),
        ]
    }
}

impl Row for AuditLogView {
    const HEADERS: &'static [&'static str] = &["Time", "User", "Action", "Resource", "Ref", "Details"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.user.clone(),
            self.action.clone(),
            self.resource.clone(),
            self.resource_ref.clone(),
            self.details.clone(),
        ]
    }
}

impl Row for LeaderboardView {
    const HEADERS: &'static [&'static str] = &["Rank", "User", "Points", "Courses", "Badges"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.rank.clone(),
            self.user.clone(),
            self.points.to_string(),
            self.completed_courses.to_string(),
            self.badges.to_string(),
        ]
    }
}
