mod support;

use std::collections::HashSet;

use stayview::app::auth::{AuthSession, ModalState, ResetLinkStatus};
use stayview::app::catalog::LoadStatus;
use stayview::app::navigation::NavEvent;
use stayview::app::HeaderVariant;
use stayview::backend::BackendRequest;
use stayview::domain::{AuthFailureReason, ListingId};
use stayview::{Config, Event, Route};

use support::{
    favorite_click, go_to_login, home, listing_ids, nav, session, session_with, submit_login, KNOWN_EMAIL,
    KNOWN_PASSWORD,
};

#[test]
fn whitespace_search_issues_no_request() {
    let mut session = home(6);
    session.dispatch(&Event::SearchFocused);
    session.dispatch(&Event::SearchTextChanged {
        text: "   \t".to_string(),
    });
    session.dispatch(&Event::SearchSubmitted);

    assert_eq!(session.outstanding(), 0);
    assert!(!session.view().header.search_bar.can_submit);
    assert_eq!(session.view().header.variant, HeaderVariant::SearchFocused);
}

#[test]
fn search_replaces_grid_with_matches() {
    let mut session = home(6);
    session.dispatch(&Event::SearchTextChanged {
        text: "  hoi an ".to_string(),
    });
    session.dispatch(&Event::SearchSubmitted);

    let posted: Vec<_> = session.outbox().cloned().collect();
    assert!(matches!(
        &posted[..],
        [BackendRequest::FetchListings { query: Some(q), cursor: None, .. }] if q == "hoi an"
    ));

    session.settle();
    assert_eq!(listing_ids(&session), vec!["2", "4", "6"]);
    assert_eq!(session.view().header.variant, HeaderVariant::Default);
}

#[test]
fn double_load_more_keeps_one_request_outstanding() {
    let mut session = home(10);
    assert_eq!(session.state().catalog().len(), 4);

    session.dispatch(&Event::ShowMoreClicked);
    session.dispatch(&Event::ShowMoreClicked);
    assert_eq!(session.outstanding(), 1);
    assert!(!session.view().catalog.show_more.enabled);

    session.settle();
    assert_eq!(session.state().catalog().len(), 8);
}

#[test]
fn paging_to_the_end_hides_show_more_without_duplicates() {
    let mut session = home(10);
    for _ in 0..5 {
        session.dispatch(&Event::ShowMoreClicked);
        session.settle();
    }

    let ids = listing_ids(&session);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), 10);
    assert_eq!(unique.len(), ids.len());
    assert!(!session.state().catalog().has_more());
    assert!(!session.view().catalog.show_more.visible);
}

#[test]
fn favorite_click_never_navigates() {
    let mut session = home(4);
    session.dispatch(&favorite_click("2"));

    assert_eq!(session.route(), &Route::Home);
    assert_eq!(session.history(), &[Route::Home]);
    assert!(session.state().favorites().is_favorited(&ListingId::new("2")));

    session.settle();
    assert!(session.backend().is_favorite(&ListingId::new("2")));
    assert_eq!(session.route(), &Route::Home);
}

#[test]
fn even_number_of_favorite_clicks_restores_membership() {
    let mut session = home(4);
    for _ in 0..4 {
        session.dispatch(&favorite_click("3"));
    }
    session.settle();

    assert!(!session.state().favorites().is_favorited(&ListingId::new("3")));
    assert!(!session.backend().is_favorite(&ListingId::new("3")));
}

#[test]
fn rejected_favorite_is_reverted_with_notice() {
    let mut session = home(4);
    session.backend_mut().set_reject_favorites(true);
    session.dispatch(&favorite_click("1"));
    session.settle();

    assert!(!session.state().favorites().is_favorited(&ListingId::new("1")));
    let notice = session.view().notice.expect("notice");
    assert_eq!(notice.listing, ListingId::new("1"));

    session.dispatch(&Event::NoticeDismissed);
    assert!(session.view().notice.is_none());
}

#[test]
fn local_favorites_issue_no_requests() {
    let config = Config {
        sync_favorites: false,
        ..Config::default()
    };
    let mut session = session_with(&config, 4);
    session.dispatch(&favorite_click("1"));

    assert_eq!(session.outstanding(), 0);
    assert!(session.state().favorites().is_favorited(&ListingId::new("1")));
}

#[test]
fn card_body_click_opens_property_page() {
    let mut session = home(4);
    session.dispatch(&Event::CardClicked {
        listing: ListingId::new("3"),
        target: stayview::app::navigation::CardTarget::Body,
    });

    assert_eq!(session.route().path(), "/property/3");
    assert!(session.view().header.tabs[0].active);
}

#[test]
fn unknown_user_stays_on_login() {
    let mut session = session(4);
    go_to_login(&mut session);
    submit_login(&mut session, "unknown.user+e2e@example.com", "123456");
    session.settle();

    assert_eq!(
        session.state().auth().session(),
        AuthSession::Failed {
            reason: AuthFailureReason::UnknownUser
        }
    );
    assert_eq!(session.route(), &Route::Login);
}

#[test]
fn wrong_password_shows_invalid_credentials_message() {
    let mut session = session(4);
    go_to_login(&mut session);
    submit_login(&mut session, KNOWN_EMAIL, "wrong-password");
    session.settle();

    assert_eq!(
        session.state().auth().session(),
        AuthSession::Failed {
            reason: AuthFailureReason::InvalidCredentials
        }
    );
    assert_eq!(session.route(), &Route::Login);

    let message = session.view().login.expect("login view").message.expect("message").to_lowercase();
    assert!(
        ["invalid credentials", "login failed", "user not found"]
            .iter()
            .any(|needle| message.contains(needle)),
        "{message}"
    );
}

#[test]
fn valid_login_leaves_login_route() {
    let mut session = session(4);
    go_to_login(&mut session);
    submit_login(&mut session, KNOWN_EMAIL, KNOWN_PASSWORD);
    assert!(session.state().auth().is_submitting());
    assert!(!session.view().login.expect("login view").submit_enabled);

    session.settle();
    assert!(!session.route().is_login());
    assert!(session.view().login.is_none());
    assert!(session.view().header.signed_in);
}

#[test]
fn failed_login_can_be_retried() {
    let mut session = session(4);
    go_to_login(&mut session);
    submit_login(&mut session, KNOWN_EMAIL, "nope");
    session.settle();
    submit_login(&mut session, KNOWN_EMAIL, KNOWN_PASSWORD);
    session.settle();

    assert_eq!(session.route(), &Route::Home);
}

#[test]
fn unreachable_backend_reports_network_error() {
    let mut session = session(4);
    session.backend_mut().set_unreachable(true);
    go_to_login(&mut session);
    submit_login(&mut session, KNOWN_EMAIL, KNOWN_PASSWORD);
    session.settle();

    assert_eq!(
        session.state().auth().session(),
        AuthSession::Failed {
            reason: AuthFailureReason::NetworkError
        }
    );
}

#[test]
fn login_response_after_leaving_is_ignored() {
    let mut session = session(4);
    go_to_login(&mut session);
    submit_login(&mut session, KNOWN_EMAIL, KNOWN_PASSWORD);
    session.dispatch(&nav(NavEvent::ExperiencesTabClick));
    session.settle();

    assert_eq!(session.route(), &Route::Tours);
    assert!(!session.view().header.signed_in);
}

#[test]
fn reset_modal_round_trip_leaves_session_alone() {
    let mut session = session(4);
    go_to_login(&mut session);
    session.dispatch(&nav(NavEvent::ForgotPasswordLinkClick));

    let modal = session.view().login.expect("login view").reset_modal.expect("modal");
    assert_eq!(modal.action_label, "Send reset link");

    session.dispatch(&Event::ResetModalClosed);
    assert_eq!(session.state().auth().modal(), ModalState::Closed);
    assert_eq!(session.state().auth().session(), AuthSession::Anonymous);
    assert_eq!(session.route(), &Route::Login);
    assert_eq!(session.history(), &[Route::Home, Route::Login]);
}

#[test]
fn reset_link_is_acknowledged() {
    let mut session = session(4);
    go_to_login(&mut session);
    session.dispatch(&nav(NavEvent::ForgotPasswordLinkClick));
    session.dispatch(&Event::ResetLinkRequested {
        email: KNOWN_EMAIL.to_string(),
    });
    session.settle();

    assert_eq!(
        session.state().auth().reset_status(),
        &ResetLinkStatus::Sent {
            email: KNOWN_EMAIL.to_string()
        }
    );
    assert_eq!(session.backend().reset_requests(), &[KNOWN_EMAIL.to_string()]);
}

#[test]
fn failed_page_keeps_loaded_listings_and_retries() {
    let mut session = home(10);
    session.backend_mut().set_unreachable(true);
    session.dispatch(&Event::ShowMoreClicked);
    session.settle();

    assert_eq!(session.state().catalog().len(), 4);
    assert!(matches!(session.state().catalog().status(), LoadStatus::Failed(_)));
    assert!(session.view().catalog.error.is_some());

    session.backend_mut().set_unreachable(false);
    session.dispatch(&Event::RetryClicked);
    session.settle();
    assert_eq!(session.state().catalog().len(), 8);
    assert!(session.view().catalog.error.is_none());
}

#[test]
fn show_more_after_failed_search_continues_previous_results() {
    let mut session = home(10);
    session.backend_mut().set_unreachable(true);
    session.dispatch(&Event::SearchTextChanged {
        text: "Hoi An".to_string(),
    });
    session.dispatch(&Event::SearchSubmitted);
    session.settle();
    assert!(matches!(session.state().catalog().status(), LoadStatus::Failed(_)));
    assert_eq!(session.state().catalog().query(), None);

    session.backend_mut().set_unreachable(false);
    session.dispatch(&Event::ShowMoreClicked);
    let posted: Vec<_> = session.outbox().cloned().collect();
    assert!(matches!(
        &posted[..],
        [BackendRequest::FetchListings { query: None, cursor: Some(_), .. }]
    ));

    session.settle();
    assert_eq!(listing_ids(&session), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    assert!(session
        .view()
        .catalog
        .cards
        .iter()
        .all(|card| card.highlight_ranges.is_empty()));
}

#[test]
fn header_tabs_follow_route() {
    let mut session = home(2);
    session.dispatch(&nav(NavEvent::ExperiencesTabClick));
    let tabs = session.view().header.tabs;
    assert!(!tabs[0].active);
    assert!(tabs[1].active);

    session.dispatch(&nav(NavEvent::LogoClick));
    assert_eq!(session.route(), &Route::Home);
    assert!(session.view().header.tabs[0].active);
}

#[test]
fn view_model_serializes_to_json() {
    let session = home(2);
    let json = serde_json::to_value(session.view()).expect("json");
    assert_eq!(json["route"], "/");
    assert_eq!(json["catalog"]["cards"][0]["href"], "/property/1");
    assert_eq!(json["header"]["variant"], "default");
}
