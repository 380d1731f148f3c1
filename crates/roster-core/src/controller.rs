//! [`PageFetchController`] — owns paging and filter state and decides when to
//! fetch.
//!
//! The controller is sans-IO. Every operation that may change the fetch key
//! `(page, filter, epoch, page_size)` returns the [`FetchRequest`] to issue,
//! or `None` when the key is unchanged. The caller runs the request (see
//! [`crate::fetch::execute`]) and feeds the [`FetchOutcome`] back through
//! [`PageFetchController::apply`], which ignores outcomes for anything but
//! the most recently issued request.

use crate::{
  Error, Result,
  fetch::{FetchError, FetchOutcome, FetchQuery, FetchRequest, RequestEpoch, RequestToken},
  page::{self, PageCommit, PageInput},
  player::Player,
  query::{ActiveFilter, FilterFields, build_filter},
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where the latest fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
  /// Nothing issued yet.
  Idle,
  Loading { token: RequestToken },
  Loaded { token: RequestToken },
  Failed { token: RequestToken, error: FetchError },
}

/// What presentation reads: the rows plus the loading and error flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchView<'a> {
  /// Last successfully fetched page; kept across loading and failure.
  pub items:   &'a [Player],
  pub loading: bool,
  pub error:   Option<FetchError>,
}

// ─── Controller ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct FetchKey {
  page:      u32,
  filter:    ActiveFilter,
  epoch:     RequestEpoch,
  page_size: u32,
}

/// Paging and filtering state machine for the roster browser.
#[derive(Debug, Clone)]
pub struct PageFetchController {
  page:       u32,
  page_size:  u32,
  filter:     ActiveFilter,
  epoch:      RequestEpoch,
  page_input: PageInput,

  /// Key of the most recently issued request.
  issued:     Option<FetchKey>,
  /// Token of the most recently issued request; only its outcome is applied.
  latest:     Option<RequestToken>,

  items:      Vec<Player>,
  status:     FetchStatus,
}

impl PageFetchController {
  /// A controller on page 1 with no filter. Nothing is fetched until
  /// [`mount`](Self::mount).
  pub fn new(page_size: u32) -> Result<Self> {
    if page_size == 0 {
      return Err(Error::ZeroPageSize);
    }
    Ok(Self {
      page: 1,
      page_size,
      filter: ActiveFilter::default(),
      epoch: RequestEpoch::default(),
      page_input: PageInput::new(1),
      issued: None,
      latest: None,
      items: Vec::new(),
      status: FetchStatus::Idle,
    })
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn page(&self) -> u32 { self.page }

  pub fn page_size(&self) -> u32 { self.page_size }

  pub fn filter(&self) -> &ActiveFilter { &self.filter }

  pub fn epoch(&self) -> RequestEpoch { self.epoch }

  pub fn status(&self) -> FetchStatus { self.status }

  pub fn items(&self) -> &[Player] { &self.items }

  /// Current text of the page-number input.
  pub fn page_input(&self) -> &str { self.page_input.text() }

  pub fn is_loading(&self) -> bool { matches!(self.status, FetchStatus::Loading { .. }) }

  pub fn error(&self) -> Option<FetchError> {
    match self.status {
      FetchStatus::Failed { error, .. } => Some(error),
      _ => None,
    }
  }

  pub fn view(&self) -> FetchView<'_> {
    FetchView {
      items:   &self.items,
      loading: self.is_loading(),
      error:   self.error(),
    }
  }

  /// Heuristic: the last page fetched was full.
  pub fn has_next_page(&self) -> bool { page::has_next_page(self.items.len(), self.page_size) }

  pub fn can_go_previous(&self) -> bool { self.page > 1 }

  /// Next is offered only after a successful full page; after a failure the
  /// retained rows belong to an earlier page.
  pub fn can_go_next(&self) -> bool { self.error().is_none() && self.has_next_page() }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Issue the initial fetch.
  pub fn mount(&mut self) -> Option<FetchRequest> { self.sync() }

  /// Advance one page, if the last fetch suggests there is one.
  pub fn next_page(&mut self) -> Option<FetchRequest> {
    if !self.can_go_next() {
      return None;
    }
    self.page = self.page.checked_add(1)?;
    self.sync()
  }

  /// Go back one page; a no-op on page 1.
  pub fn previous_page(&mut self) -> Option<FetchRequest> {
    if !self.can_go_previous() {
      return None;
    }
    self.page -= 1;
    self.sync()
  }

  /// Jump to `page`. Jumping to the current page issues nothing.
  pub fn set_page(&mut self, page: u32) -> Result<Option<FetchRequest>> {
    if page == 0 {
      return Err(Error::ZeroPage);
    }
    self.page = page;
    Ok(self.sync())
  }

  // ── Page-number input ─────────────────────────────────────────────────────

  /// Mutable access to the in-progress page-number edit.
  pub fn page_input_mut(&mut self) -> &mut PageInput { &mut self.page_input }

  /// Commit the page-number edit (on blur or Enter).
  ///
  /// Invalid or unchanged input is reverted and issues nothing.
  pub fn commit_page_input(&mut self) -> Option<FetchRequest> {
    match self.page_input.commit(self.page) {
      PageCommit::Changed(page) => {
        self.page = page;
        self.sync()
      }
      PageCommit::Reverted => None,
    }
  }

  /// Abandon the page-number edit.
  pub fn revert_page_input(&mut self) { self.page_input.mirror(self.page); }

  // ── Filter ────────────────────────────────────────────────────────────────

  /// Apply the editor fields as the new filter, starting again from page 1.
  ///
  /// Always issues a request, even if the resulting filter is unchanged.
  pub fn submit(&mut self, fields: &FilterFields) -> Option<FetchRequest> {
    self.page = 1;
    self.filter = build_filter(fields);
    self.epoch.bump();
    self.sync()
  }

  /// Reset the editor fields and drop the filter.
  ///
  /// Always issues a request. The current page is kept.
  pub fn clear(&mut self, fields: &mut FilterFields) -> Option<FetchRequest> {
    fields.clear();
    self.filter = ActiveFilter::default();
    self.epoch.bump();
    self.sync()
  }

  // ── Completion ────────────────────────────────────────────────────────────

  /// Apply a finished fetch. Returns `false` if the outcome was stale and
  /// ignored.
  pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
    let FetchOutcome { token, result } = outcome;
    if self.latest != Some(token) {
      tracing::debug!(
        token = token.get(),
        latest = self.latest.map(RequestToken::get),
        "discarding stale fetch outcome"
      );
      return false;
    }

    self.status = match result {
      Ok(items) => {
        self.items = items;
        FetchStatus::Loaded { token }
      }
      Err(error) => FetchStatus::Failed { token, error },
    };
    true
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn key(&self) -> FetchKey {
    FetchKey {
      page:      self.page,
      filter:    self.filter.clone(),
      epoch:     self.epoch,
      page_size: self.page_size,
    }
  }

  /// Issue a request if the fetch key moved since the last one.
  fn sync(&mut self) -> Option<FetchRequest> {
    let key = self.key();
    if self.issued.as_ref() == Some(&key) {
      self.page_input.mirror(self.page);
      return None;
    }

    let token = self.latest.map_or_else(RequestToken::first, RequestToken::next);
    let query = if key.filter.is_empty() {
      FetchQuery::List { page: key.page, page_size: key.page_size }
    } else {
      FetchQuery::Search(key.filter.search_params(key.page, key.page_size))
    };

    self.latest = Some(token);
    self.issued = Some(key);
    self.page_input.mirror(self.page);
    self.status = FetchStatus::Loading { token };

    Some(FetchRequest { token, query })
  }
}

#[cfg(test)]
mod tests {
  use std::{
    collections::VecDeque,
    sync::Mutex,
  };

  use super::*;
  use crate::{
    fetch::execute,
    player::{Country, Position},
    query::SearchParams,
    source::PlayerSource,
  };

  // ── Scripted source ──────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("scripted failure")]
  struct ScriptedError;

  #[derive(Debug, Clone, PartialEq, Eq)]
  enum Call {
    List(u32, u32),
    Search(SearchParams),
  }

  type Reply = Result<Option<Vec<Player>>, ScriptedError>;

  /// Records every call and answers from a queue (empty page when drained).
  #[derive(Default)]
  struct ScriptedSource {
    calls:   Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Reply>>,
  }

  impl ScriptedSource {
    fn reply(&self, reply: Reply) { self.replies.lock().unwrap().push_back(reply); }

    fn calls(&self) -> Vec<Call> { self.calls.lock().unwrap().clone() }

    fn next_reply(&self) -> Reply {
      self.replies.lock().unwrap().pop_front().unwrap_or(Ok(Some(Vec::new())))
    }
  }

  impl PlayerSource for ScriptedSource {
    type Error = ScriptedError;

    async fn list(&self, page: u32, page_size: u32) -> Reply {
      self.calls.lock().unwrap().push(Call::List(page, page_size));
      self.next_reply()
    }

    async fn search<'a>(&'a self, params: &'a SearchParams) -> Reply {
      self.calls.lock().unwrap().push(Call::Search(params.clone()));
      self.next_reply()
    }

    async fn countries(&self) -> Result<Vec<Country>, ScriptedError> { Ok(Vec::new()) }
  }

  fn players(n: usize) -> Vec<Player> {
    (0..n)
      .map(|i| Player {
        player_id:   i as i64 + 1,
        playername:  format!("Player {i}"),
        teamname:    Some("Rovers".into()),
        position:    "MID".into(),
        nationality: Some("Brazil".into()),
        age:         Some(24),
      })
      .collect()
  }

  /// Run `request` (which must exist) and apply the outcome.
  async fn run(
    ctl: &mut PageFetchController,
    src: &ScriptedSource,
    request: Option<FetchRequest>,
  ) -> bool {
    let request = request.expect("a request to be issued");
    let outcome = execute(src, request).await;
    ctl.apply(outcome)
  }

  // ── Construction ─────────────────────────────────────────────────────────

  #[test]
  fn zero_page_size_is_rejected() {
    assert!(matches!(PageFetchController::new(0), Err(Error::ZeroPageSize)));
  }

  #[test]
  fn starts_idle_on_page_one() {
    let ctl = PageFetchController::new(10).unwrap();
    assert_eq!(ctl.page(), 1);
    assert_eq!(ctl.page_input(), "1");
    assert_eq!(ctl.status(), FetchStatus::Idle);
    assert!(ctl.filter().is_empty());
    assert!(!ctl.can_go_previous());
  }

  // ── Scenarios ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn initial_full_page_enables_next_only() {
    let src = ScriptedSource::default();
    src.reply(Ok(Some(players(10))));
    let mut ctl = PageFetchController::new(10).unwrap();

    let request = ctl.mount();
    assert!(ctl.view().loading);
    assert!(run(&mut ctl, &src, request).await);

    assert_eq!(src.calls(), vec![Call::List(1, 10)]);
    assert!(ctl.has_next_page());
    assert!(!ctl.can_go_previous());
    let view = ctl.view();
    assert_eq!(view.items.len(), 10);
    assert!(!view.loading);
    assert_eq!(view.error, None);
  }

  #[tokio::test]
  async fn short_page_disables_next() {
    let src = ScriptedSource::default();
    src.reply(Ok(Some(players(3))));
    let mut ctl = PageFetchController::new(10).unwrap();

    let request = ctl.mount();
    run(&mut ctl, &src, request).await;

    assert!(!ctl.has_next_page());
    assert_eq!(ctl.next_page(), None);
    assert_eq!(ctl.page(), 1);
  }

  #[tokio::test]
  async fn exactly_full_last_page_reports_a_phantom_next() {
    let src = ScriptedSource::default();
    src.reply(Ok(Some(players(10))));
    src.reply(Ok(Some(Vec::new())));
    let mut ctl = PageFetchController::new(10).unwrap();

    let request = ctl.mount();
    run(&mut ctl, &src, request).await;
    assert!(ctl.has_next_page());

    let request = ctl.next_page();
    run(&mut ctl, &src, request).await;
    assert_eq!(ctl.page(), 2);
    assert!(ctl.items().is_empty());
    assert!(!ctl.has_next_page());
    assert!(ctl.can_go_previous());
  }

  #[tokio::test]
  async fn submit_name_searches_from_page_one() {
    let src = ScriptedSource::default();
    src.reply(Ok(Some(players(10))));
    src.reply(Ok(Some(players(10))));
    let mut ctl = PageFetchController::new(10).unwrap();

    let request = ctl.mount();
    run(&mut ctl, &src, request).await;
    let request = ctl.next_page();
    run(&mut ctl, &src, request).await;
    assert_eq!(ctl.page(), 2);

    let fields = FilterFields { name: "Smith".into(), ..Default::default() };
    let request = ctl.submit(&fields);
    assert_eq!(ctl.page(), 1);
    assert_eq!(ctl.filter().name(), Some("Smith"));
    run(&mut ctl, &src, request).await;

    let expected = SearchParams {
      name:        Some("Smith".into()),
      position:    None,
      nationality: None,
      team:        None,
      page:        1,
      page_size:   10,
    };
    assert_eq!(src.calls().last(), Some(&Call::Search(expected)));
  }

  #[tokio::test]
  async fn submit_with_empty_fields_lists() {
    let src = ScriptedSource::default();
    let mut ctl = PageFetchController::new(10).unwrap();
    let request = ctl.submit(&FilterFields { name: "   ".into(), ..Default::default() });
    run(&mut ctl, &src, request).await;
    assert_eq!(src.calls(), vec![Call::List(1, 10)]);
  }

  #[tokio::test]
  async fn resubmitting_same_filter_fetches_exactly_once_more() {
    let src = ScriptedSource::default();
    let mut ctl = PageFetchController::new(10).unwrap();
    let fields = FilterFields { position: Some(Position::Def), ..Default::default() };

    let request = ctl.submit(&fields);
    run(&mut ctl, &src, request).await;
    let epoch = ctl.epoch();

    let request = ctl.submit(&fields);
    assert!(request.is_some());
    assert!(ctl.epoch() > epoch);
    run(&mut ctl, &src, request).await;

    assert_eq!(src.calls().len(), 2);
    assert_eq!(src.calls()[0], src.calls()[1]);
  }

  #[tokio::test]
  async fn failure_keeps_previous_items() {
    let src = ScriptedSource::default();
    src.reply(Ok(Some(players(10))));
    src.reply(Err(ScriptedError));
    let mut ctl = PageFetchController::new(10).unwrap();

    let request = ctl.mount();
    run(&mut ctl, &src, request).await;
    let request = ctl.next_page();
    run(&mut ctl, &src, request).await;

    let view = ctl.view();
    assert_eq!(view.error, Some(FetchError::FetchFailed));
    assert_eq!(view.error.unwrap().to_string(), "Error fetching players.");
    assert!(!view.loading);
    assert_eq!(view.items.len(), 10);
  }

  #[tokio::test]
  async fn failure_disables_next_until_a_page_loads() {
    let src = ScriptedSource::default();
    src.reply(Ok(Some(players(10))));
    src.reply(Err(ScriptedError));
    src.reply(Ok(Some(players(10))));
    let mut ctl = PageFetchController::new(10).unwrap();

    let request = ctl.mount();
    run(&mut ctl, &src, request).await;
    let request = ctl.next_page();
    run(&mut ctl, &src, request).await;

    assert_eq!(ctl.page(), 2);
    assert!(ctl.has_next_page());
    assert!(!ctl.can_go_next());
    assert_eq!(ctl.next_page(), None);
    assert_eq!(ctl.page(), 2);

    let request = ctl.previous_page();
    run(&mut ctl, &src, request).await;
    assert_eq!(ctl.page(), 1);
    assert!(ctl.can_go_next());
  }

  #[tokio::test]
  async fn next_page_stops_at_the_last_representable_page() {
    let src = ScriptedSource::default();
    src.reply(Ok(Some(players(10))));
    let mut ctl = PageFetchController::new(10).unwrap();

    ctl.page_input_mut().set_text(u32::MAX.to_string());
    let request = ctl.commit_page_input();
    run(&mut ctl, &src, request).await;
    assert_eq!(ctl.page(), u32::MAX);
    assert!(ctl.can_go_next());

    assert_eq!(ctl.next_page(), None);
    assert_eq!(ctl.page(), u32::MAX);
    assert_eq!(ctl.page_input(), u32::MAX.to_string());
  }

  #[tokio::test]
  async fn missing_body_is_an_empty_page() {
    let src = ScriptedSource::default();
    src.reply(Ok(None));
    let mut ctl = PageFetchController::new(10).unwrap();

    let request = ctl.mount();
    run(&mut ctl, &src, request).await;

    assert_eq!(ctl.error(), None);
    assert!(ctl.items().is_empty());
    assert!(matches!(ctl.status(), FetchStatus::Loaded { .. }));
  }

  #[tokio::test]
  async fn clear_resets_fields_and_lists_again() {
    let src = ScriptedSource::default();
    let mut ctl = PageFetchController::new(10).unwrap();
    let mut fields = FilterFields {
      name:        "Smith".into(),
      team:        "4".into(),
      position:    Some(Position::Fwd),
      nationality: Some(Country { country_id: Some(3), countryname: "Chile".into() }),
    };

    let request = ctl.submit(&fields);
    run(&mut ctl, &src, request).await;

    let request = ctl.clear(&mut fields);
    run(&mut ctl, &src, request).await;

    assert_eq!(fields, FilterFields::default());
    assert!(ctl.filter().is_empty());
    assert_eq!(src.calls().last(), Some(&Call::List(1, 10)));
  }

  #[tokio::test]
  async fn clear_without_filter_still_refetches() {
    let src = ScriptedSource::default();
    let mut ctl = PageFetchController::new(10).unwrap();
    let request = ctl.mount();
    run(&mut ctl, &src, request).await;

    let request = ctl.clear(&mut FilterFields::default());
    assert!(request.is_some());
    run(&mut ctl, &src, request).await;
    assert_eq!(src.calls(), vec![Call::List(1, 10), Call::List(1, 10)]);
  }

  // ── Page input ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn invalid_page_entry_reverts_without_fetching() {
    let src = ScriptedSource::default();
    let mut ctl = PageFetchController::new(10).unwrap();
    let request = ctl.mount();
    run(&mut ctl, &src, request).await;

    for bad in ["0", "-3", "ten", "1"] {
      ctl.page_input_mut().set_text(bad);
      assert_eq!(ctl.commit_page_input(), None, "{bad:?} issued a fetch");
      assert_eq!(ctl.page(), 1);
      assert_eq!(ctl.page_input(), "1");
    }
    assert_eq!(src.calls().len(), 1);
  }

  #[tokio::test]
  async fn valid_page_entry_jumps() {
    let src = ScriptedSource::default();
    let mut ctl = PageFetchController::new(10).unwrap();
    let request = ctl.mount();
    run(&mut ctl, &src, request).await;

    ctl.page_input_mut().set_text("7");
    let request = ctl.commit_page_input();
    assert_eq!(ctl.page(), 7);
    run(&mut ctl, &src, request).await;
    assert_eq!(src.calls().last(), Some(&Call::List(7, 10)));
  }

  #[test]
  fn revert_discards_the_edit() {
    let mut ctl = PageFetchController::new(10).unwrap();
    ctl.page_input_mut().set_text("42");
    ctl.revert_page_input();
    assert_eq!(ctl.page_input(), "1");
  }

  #[test]
  fn page_change_resets_the_input_mirror() {
    let mut ctl = PageFetchController::new(10).unwrap();
    ctl.mount();
    ctl.page_input_mut().set_text("9");
    ctl.set_page(3).unwrap();
    assert_eq!(ctl.page_input(), "3");
  }

  #[test]
  fn set_page_to_current_page_issues_nothing() {
    let mut ctl = PageFetchController::new(10).unwrap();
    ctl.mount();
    assert_eq!(ctl.set_page(1).unwrap(), None);
    assert!(matches!(ctl.set_page(0), Err(Error::ZeroPage)));
  }

  #[test]
  fn previous_on_first_page_is_a_no_op() {
    let mut ctl = PageFetchController::new(10).unwrap();
    ctl.mount();
    assert_eq!(ctl.previous_page(), None);
    assert_eq!(ctl.page(), 1);
  }

  // ── Staleness ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn stale_outcome_is_discarded() {
    let src = ScriptedSource::default();
    let mut ctl = PageFetchController::new(2).unwrap();

    // Page 1 comes back full so page 2 can be requested.
    let first = ctl.mount().unwrap();
    let outcome = execute(&src, first.clone()).await;
    assert!(ctl.apply(FetchOutcome { result: Ok(players(2)), ..outcome }));

    let slow = ctl.set_page(2).unwrap().unwrap();
    let fast = ctl.set_page(3).unwrap().unwrap();
    assert!(fast.token > slow.token);

    // The newer request resolves first.
    assert!(ctl.apply(FetchOutcome { token: fast.token, result: Ok(players(1)) }));
    // The superseded one arrives late and must not overwrite it.
    assert!(!ctl.apply(FetchOutcome { token: slow.token, result: Ok(players(2)) }));
    assert!(!ctl.apply(FetchOutcome { token: first.token, result: Err(FetchError::FetchFailed) }));

    assert_eq!(ctl.items().len(), 1);
    assert_eq!(ctl.status(), FetchStatus::Loaded { token: fast.token });
  }

  #[test]
  fn tokens_increase_per_issued_request() {
    let mut ctl = PageFetchController::new(10).unwrap();
    let a = ctl.mount().unwrap();
    let b = ctl.submit(&FilterFields::default()).unwrap();
    let c = ctl.set_page(4).unwrap().unwrap();
    assert!(a.token < b.token && b.token < c.token);
    assert_eq!(ctl.status(), FetchStatus::Loading { token: c.token });
  }
}
