//! End-to-end search flows: key events in, web requests out, responses back
//! in any order.

use moviesearch::domain::FailureKind;
use moviesearch::search::{Notification, SessionStatus};
use moviesearch::service::{start_lookup, HttpTransport, MovieLookupService, TmdbLookup};
use moviesearch::ui::{BodyView, MessageTone};
use moviesearch::{handle_event, Action, AppState, Config, Event};
use serde_json::json;
use std::cell::RefCell;
use std::collections::BTreeMap;

type Context = BTreeMap<String, String>;

/// Stands in for the Zellij host: records requests instead of sending them.
#[derive(Debug, Default)]
struct FakeHost {
    sent: RefCell<Vec<(String, Context)>>,
}

impl HttpTransport for FakeHost {
    fn get(&self, url: &str, _headers: BTreeMap<String, String>, context: Context) {
        self.sent.borrow_mut().push((url.to_string(), context));
    }
}

struct Plugin {
    state: AppState,
    service: TmdbLookup<FakeHost>,
}

impl Plugin {
    fn new(token: Option<&str>) -> Self {
        let config = Config {
            tmdb_token: token.map(String::from),
            ..Config::default()
        };
        Self {
            state: moviesearch::initialize(&config),
            service: config.lookup_service(FakeHost::default()),
        }
    }

    /// Handles an event the way the plugin shim does, including immediate
    /// lookup failures.
    fn dispatch(&mut self, event: Event) -> (bool, Vec<Action>) {
        let (render, actions) = handle_event(&mut self.state, &event).unwrap();
        for action in &actions {
            if let Action::Lookup(request) = action {
                if let Some(outcome) = start_lookup(&self.service, request) {
                    self.dispatch(Event::LookupResolved {
                        request: request.clone(),
                        outcome,
                    });
                }
            }
        }
        (render, actions)
    }

    fn search(&mut self, text: &str) {
        self.dispatch(Event::FocusSearch);
        for c in text.chars() {
            self.dispatch(Event::Char(c));
        }
        self.dispatch(Event::Submit);
    }

    fn take_sent(&self) -> Vec<(String, Context)> {
        self.service.transport().sent.borrow_mut().drain(..).collect()
    }

    fn respond(&mut self, context: &Context, status: u16, body: &serde_json::Value) -> (bool, Vec<Action>) {
        let (request, outcome) = self
            .service
            .resolve(status, body.to_string().as_bytes(), context)
            .expect("lookup context");
        self.dispatch(Event::LookupResolved { request, outcome })
    }

    fn titles(&self) -> Vec<String> {
        self.state
            .session
            .page()
            .map(|page| page.movies.iter().map(|m| m.title.clone()).collect())
            .unwrap_or_default()
    }
}

fn page_body(page: u32, total_pages: u32, titles: &[&str]) -> serde_json::Value {
    let results: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "id": 1000 * u64::from(page) + i as u64,
                "title": title,
                "overview": null,
                "release_date": "1989-06-23",
                "poster_path": "/poster.jpg",
                "backdrop_path": null,
                "vote_average": 7.1,
            })
        })
        .collect();
    json!({
        "page": page,
        "results": results,
        "total_pages": total_pages,
        "total_results": u64::from(total_pages) * 20,
    })
}

#[test]
fn latest_query_wins_when_responses_arrive_out_of_order() {
    let mut plugin = Plugin::new(Some("token"));

    plugin.search("batman");
    plugin.search("superman");
    let sent = plugin.take_sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].0.contains("query=batman&page=1"));
    assert!(sent[1].0.contains("query=superman&page=1"));

    let (render, _) = plugin.respond(&sent[1].1, 200, &page_body(1, 1, &["Superman"]));
    assert!(render);
    assert_eq!(plugin.titles(), ["Superman"]);

    let (render, actions) = plugin.respond(&sent[0].1, 200, &page_body(1, 1, &["Batman"]));
    assert!(!render);
    assert!(actions.is_empty());
    assert_eq!(plugin.titles(), ["Superman"]);
}

#[test]
fn paging_back_before_a_page_loads_discards_it() {
    let mut plugin = Plugin::new(Some("token"));

    plugin.search("alien");
    let first = plugin.take_sent();
    plugin.respond(&first[0].1, 200, &page_body(1, 3, &["Alien", "Aliens"]));

    plugin.dispatch(Event::NextPage);
    plugin.dispatch(Event::PrevPage);
    let sent = plugin.take_sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].0.contains("page=2"));
    assert!(sent[1].0.contains("page=1"));

    let (render, _) = plugin.respond(&sent[0].1, 200, &page_body(2, 3, &["Alien 3"]));
    assert!(!render);
    assert_eq!(plugin.state.session.status(), SessionStatus::Loading);

    plugin.respond(&sent[1].1, 200, &page_body(1, 3, &["Alien", "Aliens"]));
    assert_eq!(plugin.titles(), ["Alien", "Aliens"]);

    let (render, actions) = plugin.dispatch(Event::GoToPage(9));
    assert!(!render);
    assert!(actions.is_empty());
    assert!(plugin.take_sent().is_empty());
}

#[test]
fn missing_token_fails_without_a_request() {
    let mut plugin = Plugin::new(None);

    plugin.search("heat");

    assert!(plugin.take_sent().is_empty());
    assert_eq!(
        plugin.state.session.status(),
        SessionStatus::Failed(FailureKind::Configuration)
    );
    assert_eq!(plugin.state.toast, Some(Notification::Failure));

    let vm = plugin.state.compute_viewmodel(30, 100);
    match vm.body {
        BodyView::Message(info) => {
            assert_eq!(info.tone, MessageTone::Error);
            assert!(info.message.contains("tmdb_token"));
        }
        other => panic!("expected error panel, got {other:?}"),
    }
}

#[test]
fn empty_result_notifies_once() {
    let mut plugin = Plugin::new(Some("token"));

    plugin.search("zzzzzz");
    let sent = plugin.take_sent();
    let body = page_body(1, 0, &[]);

    let (_, actions) = plugin.respond(&sent[0].1, 200, &body);
    assert_eq!(actions, vec![Action::ScheduleToastExpiry { seconds: 3.0 }]);
    assert_eq!(plugin.state.session.status(), SessionStatus::Empty);

    let (render, actions) = plugin.respond(&sent[0].1, 200, &body);
    assert!(!render);
    assert!(actions.is_empty());

    let (render, _) = plugin.dispatch(Event::ToastExpired);
    assert!(render);
    assert_eq!(plugin.state.toast, None);
}

#[test]
fn upstream_errors_show_the_generic_panel() {
    let mut plugin = Plugin::new(Some("expired"));

    plugin.search("heat");
    let sent = plugin.take_sent();
    plugin.respond(
        &sent[0].1,
        401,
        &json!({ "status_code": 7, "status_message": "Invalid API key", "success": false }),
    );

    assert_eq!(
        plugin.state.session.status(),
        SessionStatus::Failed(FailureKind::Service)
    );
    let vm = plugin.state.compute_viewmodel(30, 100);
    match vm.body {
        BodyView::Message(info) => assert!(!info.message.contains("Invalid API key")),
        other => panic!("expected error panel, got {other:?}"),
    }
}

#[test]
fn details_open_for_the_highlighted_movie() {
    let mut plugin = Plugin::new(Some("token"));

    plugin.search("batman");
    let sent = plugin.take_sent();
    plugin.respond(&sent[0].1, 200, &page_body(1, 1, &["Batman", "Batman Returns"]));

    plugin.dispatch(Event::CursorDown);
    plugin.dispatch(Event::OpenSelected);
    let selected = plugin.state.session.selected_movie().map(|m| m.title.clone());
    assert_eq!(selected.as_deref(), Some("Batman Returns"));

    let details = plugin.state.compute_viewmodel(30, 100).details.expect("details");
    assert_eq!(details.title, "Batman Returns");
    assert_eq!(details.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/poster.jpg"));
    assert_eq!(details.backdrop_url, None);

    plugin.dispatch(Event::CloseDetails);
    assert!(plugin.state.session.selected_movie().is_none());
}

#[test]
fn unrelated_responses_are_ignored() {
    let plugin = Plugin::new(Some("token"));
    assert!(plugin.service.resolve(200, b"{}", &Context::new()).is_none());
}
