use stayview::app::navigation::{CardTarget, NavEvent};
use stayview::backend::{FixtureAccount, FixtureBackend};
use stayview::domain::{ListingId, PropertyListing};
use stayview::{initialize, Config, Event, Session};

pub const KNOWN_EMAIL: &str = "23520449@gm.uit.edu.vn";
pub const KNOWN_PASSWORD: &str = "correct-horse";

pub fn listings(count: usize) -> Vec<PropertyListing> {
    (1..=count)
        .map(|n| {
            let mut listing = PropertyListing::new(n.to_string(), format!("Stay {n}"));
            listing.location = if n % 2 == 0 { "Hoi An" } else { "Da Lat" }.to_string();
            listing.price_label = format!("${} / night", 40 + n);
            listing.images = vec![format!("https://img.example.com/{n}.jpg")];
            listing
        })
        .collect()
}

pub fn backend(count: usize) -> FixtureBackend {
    FixtureBackend::new(
        listings(count),
        vec![FixtureAccount {
            email: KNOWN_EMAIL.to_string(),
            password: KNOWN_PASSWORD.to_string(),
        }],
    )
    .with_page_size(4)
}

pub fn session(count: usize) -> Session<FixtureBackend> {
    Session::new(initialize(&Config::default()), backend(count))
}

pub fn session_with(config: &Config, count: usize) -> Session<FixtureBackend> {
    Session::new(initialize(config), backend(count))
}

/// Session on `/` with the first page loaded.
pub fn home(count: usize) -> Session<FixtureBackend> {
    let mut session = session(count);
    session.dispatch(&Event::CatalogRequested);
    session.settle();
    session
}

pub fn go_to_login(session: &mut Session<FixtureBackend>) {
    session.dispatch(&Event::RouteChanged {
        path: "/login".to_string(),
    });
}

pub fn submit_login(session: &mut Session<FixtureBackend>, email: &str, password: &str) {
    session.dispatch(&Event::LoginSubmitted {
        email: email.to_string(),
        password: password.to_string(),
    });
}

pub fn favorite_click(listing: &str) -> Event {
    Event::CardClicked {
        listing: ListingId::new(listing),
        target: CardTarget::FavoriteButton,
    }
}

pub fn nav(event: NavEvent) -> Event {
    Event::Nav { event }
}

pub fn listing_ids(session: &Session<FixtureBackend>) -> Vec<String> {
    session
        .state()
        .catalog()
        .listings()
        .iter()
        .map(|listing| listing.id.as_str().to_string())
        .collect()
}
