use crate::infra::{load_desk, InMemoryBulkDispatcher};
use chrono::{Local, NaiveDate};
use clap::Args;
use fundmatch::config::AppConfig;
use fundmatch::error::AppError;
use fundmatch::workflows::funder::applications::{
    ApplicationView, BulkAction, GrantFilter, SectorFilter, SelectionSet, SortDirection, SortKey,
    StatusFilter, ViewChange, ViewState,
};
use fundmatch::workflows::funder::grants::GrantView;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ApplicationListArgs {
    /// Case-insensitive search over company name, grant title and sector
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Status label to keep, e.g. "Under Review"
    #[arg(long)]
    pub(crate) status: Option<StatusFilter>,
    /// Exact grant title to keep
    #[arg(long)]
    pub(crate) grant: Option<String>,
    /// Sector to keep (case-insensitive)
    #[arg(long)]
    pub(crate) sector: Option<String>,
    /// Column to sort by, e.g. amount or submittedDate
    #[arg(long)]
    pub(crate) sort: Option<SortKey>,
    /// Sort direction (asc or desc). Defaults to asc when --sort is given.
    #[arg(long)]
    pub(crate) direction: Option<SortDirection>,
    /// Page to show (1-based)
    #[arg(long)]
    pub(crate) page: Option<NonZeroUsize>,
    /// Rows per page. Defaults to FUNDMATCH_PAGE_SIZE.
    #[arg(long)]
    pub(crate) page_size: Option<NonZeroUsize>,
    /// Application export to read instead of the configured source
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Application export to read instead of the built-in sample data
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Reporting date for grant deadlines (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Rows per page for the demo table
    #[arg(long)]
    pub(crate) page_size: Option<NonZeroUsize>,
}

pub(crate) fn run_application_list(args: ApplicationListArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(csv) = args.csv.clone() {
        config.desk.records_csv = Some(csv);
    }

    let desk = load_desk(&config.desk, Arc::new(InMemoryBulkDispatcher::default()))?;
    let requested = list_view(&args, desk.default_view());
    let (view, result) = desk.query_clamped(&requested);

    if view.current_page != requested.current_page {
        println!(
            "Page {} is past the end of the results; showing page 1",
            requested.current_page
        );
    }
    render_table(&view, &result, None);
    Ok(())
}

fn list_view(args: &ApplicationListArgs, mut view: ViewState) -> ViewState {
    if let Some(size) = args.page_size {
        view = view.apply(ViewChange::PageSize(size));
    }
    if let Some(term) = &args.search {
        view = view.apply(ViewChange::Search(term.clone()));
    }
    if let Some(status) = &args.status {
        view = view.apply(ViewChange::Status(status.clone()));
    }
    if let Some(grant) = &args.grant {
        view = view.apply(ViewChange::Grant(GrantFilter::from(grant.as_str())));
    }
    if let Some(sector) = &args.sector {
        view = view.apply(ViewChange::Sector(SectorFilter::from(sector.as_str())));
    }
    match (args.sort, args.direction) {
        (Some(key), direction) => {
            view.sort_key = key;
            view.sort_direction = direction.unwrap_or(SortDirection::Ascending);
        }
        (None, Some(direction)) => view.sort_direction = direction,
        (None, None) => {}
    }
    if let Some(page) = args.page {
        view = view.apply(ViewChange::GoToPage(page));
    }
    view
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        csv,
        today,
        page_size,
    } = args;

    let mut config = AppConfig::load()?;
    if csv.is_some() {
        config.desk.records_csv = csv;
    }
    if let Some(size) = page_size {
        config.desk.page_size = size;
    }
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let dispatcher = Arc::new(InMemoryBulkDispatcher::default());
    let desk = load_desk(&config.desk, dispatcher.clone())?;

    println!("Funder application desk demo");
    if config.desk.records_csv.is_some() {
        println!("Data source: application CSV export");
    } else {
        println!("Data source: built-in sample applications");
    }

    println!("\nActive grants (as of {})", today);
    for grant in desk.active_grants() {
        render_grant(&grant, today);
    }
    println!("- Committed across all grants: ${}", desk.total_allocated());

    println!("\nFilter menus");
    println!("- Grants: {}", desk.grant_options().join(", "));
    println!("- Sectors: {}", desk.sector_options().join(", "));

    println!("\nAll applications, newest first");
    let (view, result) = desk.query_clamped(&desk.default_view());
    render_table(&view, &result, None);

    println!("\nSearch \"tech\", largest requests first");
    let tech = desk
        .default_view()
        .apply(ViewChange::Search("tech".to_string()))
        .apply(ViewChange::SortBy(SortKey::Amount))
        .apply(ViewChange::SortBy(SortKey::Amount));
    let (view, result) = desk.query_clamped(&tech);

    let mut selection = SelectionSet::new();
    selection.toggle_all(&result.visible_ids());
    render_table(&view, &result, Some(&selection));

    println!(
        "\nApproving {} selected application(s) on this page",
        selection.len()
    );
    match desk.bulk_action(BulkAction::Approve, &selection) {
        Ok(receipt) => match serde_json::to_string_pretty(&receipt) {
            Ok(json) => println!("  Receipt:\n{}", json),
            Err(err) => println!("  Receipt unavailable: {}", err),
        },
        Err(err) => println!("  Bulk action failed, selection kept: {}", err),
    }

    let requests = dispatcher.requests();
    if requests.is_empty() {
        println!("  Bulk handler: nothing dispatched");
    } else {
        println!("  Bulk handler log:");
        for request in requests {
            let ids: Vec<&str> = request
                .application_ids
                .iter()
                .map(|id| id.as_str())
                .collect();
            println!("    - {} -> {}", request.action, ids.join(", "));
        }
    }

    Ok(())
}

fn render_grant(grant: &GrantView, today: NaiveDate) {
    let summary = &grant.summary;
    let days_left = (summary.deadline - today).num_days();
    let deadline_note = if days_left >= 0 {
        format!("{} days left", days_left)
    } else {
        format!("closed {} days ago", -days_left)
    };
    println!(
        "- {} ({}) | {} | ${}-${} | {} applications | {}% allocated | deadline {} ({})",
        summary.title,
        summary.issuer,
        grant.status_label,
        summary.amount_min,
        summary.amount_max,
        summary.applications,
        grant.allocation_percentage,
        summary.deadline,
        deadline_note
    );
}

fn render_table(
    view: &ViewState,
    result: &ApplicationView<'_>,
    selection: Option<&SelectionSet>,
) {
    println!(
        "Page {} of {} | {} matching application(s) | sorted by {} ({})",
        view.current_page,
        result.total_pages,
        result.total_matches,
        view.sort_key.as_str(),
        view.sort_direction.as_str()
    );

    if result.page.is_empty() {
        println!("  No applications match the current filters");
        return;
    }

    for record in &result.page {
        let marker = match selection {
            Some(selection) if selection.is_selected(&record.id) => "[x] ",
            Some(_) => "[ ] ",
            None => "",
        };
        println!(
            "  {}#{} {} | {} | {} | {} | {} ({}) | {} | score {} | submitted {} | reviewer {}",
            marker,
            record.id,
            record.company_name,
            record.grant_title,
            record.sector,
            record.amount,
            record.status,
            record.priority,
            record.stage,
            record.score,
            record.submitted_date,
            record.reviewer.as_deref().unwrap_or("unassigned")
        );
    }
}
