use std::sync::Arc;

use super::common::*;
use crate::workflows::funder::applications::domain::{ApplicationId, ApplicationStatus};
use crate::workflows::funder::applications::repository::{
    BulkAction, DispatchError, RecordSource, SourceError,
};
use crate::workflows::funder::applications::selection::SelectionSet;
use crate::workflows::funder::applications::service::{ApplicationDeskService, DeskServiceError};
use crate::workflows::funder::applications::view_state::ViewChange;
use crate::workflows::funder::import::CsvRecordSource;
use crate::workflows::funder::SampleRecords;

#[test]
fn bulk_action_dispatches_selected_ids_and_clears_selection() {
    let (service, dispatcher) = build_service();
    let selection = SelectionSet::from_ids(app_ids(&["2", "7"]));

    let receipt = service
        .bulk_action(BulkAction::Approve, &selection)
        .expect("dispatch succeeds");

    assert_eq!(receipt.action, BulkAction::Approve);
    assert_eq!(receipt.dispatched, app_ids(&["2", "7"]));
    assert!(receipt.selection.is_empty());

    let requests = dispatcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].action, BulkAction::Approve);
    assert_eq!(requests[0].application_ids, app_ids(&["2", "7"]));
}

#[test]
fn bulk_action_requires_a_selection() {
    let (service, dispatcher) = build_service();

    let err = service
        .bulk_action(BulkAction::Export, &SelectionSet::new())
        .expect_err("empty selection rejected");

    assert!(matches!(err, DeskServiceError::EmptySelection));
    assert!(dispatcher.requests().is_empty());
}

#[test]
fn bulk_action_rejects_unknown_ids_before_dispatching() {
    let (service, dispatcher) = build_service();
    let selection = SelectionSet::from_ids(app_ids(&["1", "99"]));

    let err = service
        .bulk_action(BulkAction::Reject, &selection)
        .expect_err("unknown id rejected");

    assert!(matches!(err, DeskServiceError::UnknownApplication(id) if id.as_str() == "99"));
    assert!(dispatcher.requests().is_empty());
}

#[test]
fn dispatcher_failure_is_surfaced() {
    let service = offline_service();
    let selection = SelectionSet::from_ids(app_ids(&["3"]));

    let err = service
        .bulk_action(BulkAction::Reject, &selection)
        .expect_err("offline dispatcher");

    assert!(matches!(
        err,
        DeskServiceError::Dispatch(DispatchError::Transport(_))
    ));
}

#[test]
fn query_uses_configured_page_size() {
    let (service, _) = build_service();
    let dispatcher = Arc::new(MemoryDispatcher::default());
    let narrow = ApplicationDeskService::load(&SampleRecords, dispatcher, portfolio(), page(3))
        .expect("service loads");

    assert_eq!(service.query(&service.default_view()).page.len(), 8);

    let view = narrow.query(&narrow.default_view());
    assert_eq!(view.page.len(), 3);
    assert_eq!(view.total_pages, 3);
}

#[test]
fn query_clamped_falls_back_to_first_page() {
    let (service, _) = build_service();
    let stale = service
        .default_view()
        .apply(ViewChange::PageSize(page(2)))
        .apply(ViewChange::GoToPage(page(4)));
    let narrowed = stale.apply(ViewChange::Search("green".to_string()));
    let narrowed = narrowed.apply(ViewChange::GoToPage(page(3)));

    let (still_valid, view) = service.query_clamped(&stale);
    assert_eq!(still_valid, stale);
    assert_eq!(view.page.len(), 2);

    let (rendered, view) = service.query_clamped(&narrowed);
    assert_eq!(rendered.current_page.get(), 1);
    assert_eq!(view.total_matches, 3);
    assert_eq!(ids(&view.page), vec!["5", "2"]);
}

#[test]
fn filter_options_come_from_loaded_records() {
    let (service, _) = build_service();

    assert_eq!(service.grant_options().len(), 3);
    assert_eq!(service.sector_options().len(), 5);
    assert_eq!(
        service.status_options(),
        vec![
            ApplicationStatus::PendingReview,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ]
    );
}

#[test]
fn active_grants_carry_allocation_percentages() {
    let (service, _) = build_service();

    let grants = service.active_grants();

    assert_eq!(grants.len(), 2);
    assert_eq!(grants[0].summary.title, "Tech Innovation Grant 2024");
    assert_eq!(grants[0].allocation_percentage, 30);
    assert_eq!(grants[1].allocation_percentage, 20);
    assert_eq!(grants[1].status_label, "Open");
}

#[test]
fn grant_lookup_covers_the_whole_portfolio() {
    let (service, _) = build_service();

    let upcoming = service.grant("3").expect("upcoming grant is listed");
    assert_eq!(upcoming.summary.title, "Healthcare Innovation Fund");
    assert_eq!(upcoming.status_label, "Upcoming");
    assert!(service.grant("42").is_none());
    assert_eq!(service.total_allocated(), 950_000);
}

#[test]
fn load_propagates_source_errors() {
    let source = CsvRecordSource::from_string(
        "ID,Company Name,Grant Title,Sector,Status\n1,A,B,C,Approved\n1,D,E,F,Rejected\n",
    );

    let result =
        ApplicationDeskService::load(&source, Arc::new(MemoryDispatcher::default()), portfolio(), page(10));

    assert!(matches!(
        result,
        Err(DeskServiceError::Source(SourceError::DuplicateId(ref id))) if *id == ApplicationId::new("1")
    ));
}

#[test]
fn load_accepts_trait_object_sources() {
    let source: Box<dyn RecordSource> = Box::new(SampleRecords);

    let service = ApplicationDeskService::load(
        source.as_ref(),
        Arc::new(MemoryDispatcher::default()),
        portfolio(),
        page(10),
    )
    .expect("service loads");

    assert_eq!(service.records().len(), 8);
}
