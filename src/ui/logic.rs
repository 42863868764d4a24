//! Business logic (Update/Dispatch)
//!
//! The dispatch entry point and the operation methods it fans out to.
//! Network calls are awaited here, one at a time, so a second submission
//! cannot start while one is still in flight.

use tracing::error;

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction, Notice};
use crate::models::{DonationDraft, FormField};

impl App {
    /// Core dispatch; returns true when the app should quit
    pub async fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartDonation => self.start_donation(),
            Action::StartSearch => self.start_search(),
            Action::FetchDetails => self.fetch_details().await,
            Action::StartCancelDonation => self.start_cancel_donation(),

            Action::NextField => self.focus_next_field(),
            Action::CycleKind => self.cycle_kind(),
            Action::Cancel => self.cancel(),

            Action::Submit => match &self.mode {
                AppMode::Donating => self.submit_donation().await,
                AppMode::Details => self.submit_update().await,
                AppMode::Searching => self.mode = AppMode::Browse,
                AppMode::Confirm(ConfirmAction::CancelDonation(id)) => {
                    let id = *id;
                    self.execute_cancel(id).await;
                }
                AppMode::Browse => {}
            },

            Action::Input(c) => self.push_char(c),
            Action::DeleteChar => self.pop_char(),
        }
        false
    }

    // ============ Navigation ============

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.display_list.len() {
            self.selected_index += 1;
        }
    }

    // ============ Mode entry points ============

    pub fn start_donation(&mut self) {
        self.mode = AppMode::Donating;
        self.focus = FormField::Isbn;
        self.notice = None;
    }

    pub fn start_search(&mut self) {
        self.mode = AppMode::Searching;
        self.notice = None;
    }

    pub fn start_cancel_donation(&mut self) {
        if let Some(id) = self.highlighted().and_then(|d| d.id) {
            self.mode = AppMode::Confirm(ConfirmAction::CancelDonation(id));
        }
    }

    // ============ Field editing ============
    //
    // Two explicit edit targets: the donation form edits the draft, the
    // details dialog edits the selected record. Neither ever touches the
    // other one.

    fn push_char(&mut self, c: char) {
        match self.mode {
            AppMode::Donating => self.edit_draft(|s| s.push(c)),
            AppMode::Details => self.edit_selected(|s| s.push(c)),
            AppMode::Searching => {
                self.search_term.push(c);
                self.refresh_display_list();
            }
            _ => {}
        }
    }

    fn pop_char(&mut self) {
        match self.mode {
            AppMode::Donating => self.edit_draft(|s| {
                s.pop();
            }),
            AppMode::Details => self.edit_selected(|s| {
                s.pop();
            }),
            AppMode::Searching => {
                self.search_term.pop();
                self.refresh_display_list();
            }
            _ => {}
        }
    }

    fn edit_draft(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(value) = self.draft.field_mut(self.focus) {
            edit(value);
        }
    }

    fn edit_selected(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(value) = self
            .selected
            .as_mut()
            .and_then(|d| d.field_mut(self.focus))
        {
            edit(value);
        }
    }

    pub fn focus_next_field(&mut self) {
        if matches!(self.mode, AppMode::Donating | AppMode::Details) {
            self.focus = self.focus.next();
        }
    }

    /// Cycle the donation type when its field is focused
    pub fn cycle_kind(&mut self) {
        if self.focus != FormField::Kind {
            return;
        }
        match self.mode {
            AppMode::Donating => self.draft.kind = self.draft.kind.cycle(),
            AppMode::Details => {
                if let Some(selected) = self.selected.as_mut() {
                    selected.kind = selected.kind.cycle();
                }
            }
            _ => {}
        }
    }

    // ============ Create ============

    pub async fn submit_donation(&mut self) {
        if !self.draft.is_complete() {
            self.notice = Some(Notice::IncompleteDraft);
            return;
        }

        match self.api.create(&self.draft).await {
            Ok(created) => {
                self.donations.push(created);
                self.draft = DonationDraft::default();
                self.mode = AppMode::Browse;
                self.refresh_display_list();
                self.notice = Some(Notice::Created);
            }
            Err(e) => {
                error!(error = %e, "Failed to create donation");
                self.notice = Some(Notice::CreateFailed);
            }
        }
    }

    // ============ Lookup ============

    pub async fn fetch_details(&mut self) {
        let donation_id = self.search_term.trim().to_string();
        if donation_id.is_empty() {
            self.notice = Some(Notice::EmptyLookupId);
            return;
        }

        match self.api.fetch(&donation_id).await {
            Ok(Some(donation)) => {
                self.selected = Some(donation);
                self.focus = FormField::Isbn;
                self.mode = AppMode::Details;
                self.notice = None;
            }
            Ok(None) => self.notice = Some(Notice::NotFound),
            Err(e) => {
                error!(donation_id = %donation_id, error = %e, "Failed to retrieve donation");
                self.notice = Some(Notice::LookupFailed);
            }
        }
    }

    // ============ Update ============

    pub async fn submit_update(&mut self) {
        let Some(selected) = self.selected.clone() else {
            self.notice = Some(Notice::NoSelection);
            return;
        };
        let Some(identifier) = selected.update_identifier() else {
            self.notice = Some(Notice::MissingIdentifier);
            return;
        };

        match self.api.update(&identifier, &selected).await {
            Ok(()) => {
                // Sync the edited copy back into the cached list
                if let Some(entry) = self
                    .donations
                    .iter_mut()
                    .find(|d| d.id.is_some() && d.id == selected.id)
                {
                    *entry = selected;
                }
                self.refresh_display_list();
                self.notice = Some(Notice::Updated);
            }
            Err(e) => {
                error!(identifier = %identifier, error = %e, "Failed to update donation");
                self.notice = Some(Notice::UpdateFailed);
            }
        }
    }

    // ============ Delete ============

    pub async fn execute_cancel(&mut self, id: i64) {
        self.mode = AppMode::Browse;
        match self.api.delete(id).await {
            Ok(()) => {
                self.donations.retain(|d| d.id != Some(id));
                self.refresh_display_list();
                self.notice = Some(Notice::Deleted);
            }
            Err(e) => {
                error!(id, error = %e, "Failed to delete donation");
                self.notice = Some(Notice::DeleteFailed);
            }
        }
    }

    // ============ Generic ============

    /// Leave the current mode; closing the details dialog drops the
    /// selected record, leaving the search flow drops the filter term
    pub fn cancel(&mut self) {
        match self.mode {
            AppMode::Details => self.selected = None,
            AppMode::Searching => {
                self.search_term.clear();
                self.refresh_display_list();
            }
            _ => {}
        }
        self.mode = AppMode::Browse;
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DonationApi;
    use crate::config::Config;
    use crate::models::{Donation, DonationKind};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer) -> App {
        let config = Config {
            server_url: server.uri(),
            timeout_secs: 5,
        };
        App::new(DonationApi::new(&config).expect("Failed to build client"))
    }

    fn dune() -> Donation {
        Donation {
            id: Some(1),
            donation_id: "D1".to_string(),
            isbn: "123".to_string(),
            book_name: "Dune".to_string(),
            author: "Herbert".to_string(),
            kind: DonationKind::Book,
        }
    }

    fn dune_json() -> serde_json::Value {
        serde_json::to_value(dune()).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_with_blank_term_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.search_term = "   ".to_string();
        app.fetch_details().await;

        assert_eq!(app.notice, Some(Notice::EmptyLookupId));
        assert_eq!(app.mode, AppMode::Browse);
    }

    #[tokio::test]
    async fn test_lookup_trims_term_and_opens_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/donations/D1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(dune_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.search_term = "  D1  ".to_string();
        app.fetch_details().await;

        assert_eq!(app.mode, AppMode::Details);
        assert_eq!(app.selected, Some(dune()));
    }

    #[tokio::test]
    async fn test_lookup_of_unknown_id_keeps_dialog_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/donations/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.search_term = "nope".to_string();
        app.fetch_details().await;

        assert_eq!(app.notice, Some(Notice::NotFound));
        assert_eq!(app.mode, AppMode::Browse);
        assert!(app.selected.is_none());
    }

    #[tokio::test]
    async fn test_create_appends_record_and_resets_draft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/donations"))
            .respond_with(ResponseTemplate::new(201).set_body_json(dune_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.mode = AppMode::Donating;
        app.draft.isbn = "123".to_string();
        app.draft.book_name = "Dune".to_string();
        app.draft.author = "Herbert".to_string();
        app.draft.kind = DonationKind::Book;
        app.submit_donation().await;

        assert_eq!(app.donations, vec![dune()]);
        assert_eq!(app.draft, DonationDraft::default());
        assert_eq!(app.mode, AppMode::Browse);
        assert_eq!(app.notice, Some(Notice::Created));
        assert_eq!(
            app.highlighted().unwrap().summary_line(),
            "Dune by Herbert (Book) - ISBN: 123"
        );
    }

    #[tokio::test]
    async fn test_incomplete_draft_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.mode = AppMode::Donating;
        app.draft.isbn = "123".to_string();
        app.submit_donation().await;

        assert_eq!(app.notice, Some(Notice::IncompleteDraft));
        assert!(app.donations.is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_leaves_state_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/donations"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.mode = AppMode::Donating;
        app.draft.isbn = "123".to_string();
        app.draft.book_name = "Dune".to_string();
        app.draft.author = "Herbert".to_string();
        app.submit_donation().await;

        assert!(app.donations.is_empty());
        assert_eq!(app.mode, AppMode::Donating);
        assert_eq!(app.draft.book_name, "Dune");
        assert_eq!(app.notice, Some(Notice::CreateFailed));
    }

    #[tokio::test]
    async fn test_update_without_selection_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.submit_update().await;

        assert_eq!(app.notice, Some(Notice::NoSelection));
    }

    #[tokio::test]
    async fn test_update_without_identifier_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.selected = Some(Donation {
            id: None,
            donation_id: String::new(),
            ..dune()
        });
        app.submit_update().await;

        assert_eq!(app.notice, Some(Notice::MissingIdentifier));
    }

    #[tokio::test]
    async fn test_update_prefers_lookup_key_and_syncs_list() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/donations/D1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.donations = vec![dune()];
        app.refresh_display_list();
        app.mode = AppMode::Details;
        app.selected = Some(Donation {
            book_name: "Dune Messiah".to_string(),
            ..dune()
        });
        app.submit_update().await;

        assert_eq!(app.notice, Some(Notice::Updated));
        assert_eq!(app.donations[0].book_name, "Dune Messiah");
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/donations/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.donations = vec![dune()];
        app.refresh_display_list();

        app.execute_cancel(1).await;
        assert!(app.donations.iter().all(|d| d.id != Some(1)));
        assert_eq!(app.notice, Some(Notice::Deleted));

        // Repeating the delete of an absent id changes nothing visible
        app.execute_cancel(1).await;
        assert!(app.donations.is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_record() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/donations/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.donations = vec![dune()];
        app.refresh_display_list();
        app.execute_cancel(1).await;

        assert_eq!(app.donations.len(), 1);
        assert_eq!(app.notice, Some(Notice::DeleteFailed));
    }

    #[tokio::test]
    async fn test_edits_target_draft_or_selected_never_both() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);

        // Details dialog open: edits land on the selected record only
        app.selected = Some(dune());
        app.mode = AppMode::Details;
        app.focus = FormField::Author;
        app.dispatch(Action::Input('!')).await;
        assert_eq!(app.selected.as_ref().unwrap().author, "Herbert!");
        assert_eq!(app.draft, DonationDraft::default());

        // Donation form open: edits land on the draft only
        app.mode = AppMode::Donating;
        app.dispatch(Action::Input('x')).await;
        assert_eq!(app.draft.author, "x");
        assert_eq!(app.selected.as_ref().unwrap().author, "Herbert!");
    }

    #[tokio::test]
    async fn test_kind_cycles_only_when_focused() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        app.mode = AppMode::Donating;

        app.focus = FormField::Isbn;
        app.dispatch(Action::CycleKind).await;
        assert_eq!(app.draft.kind, DonationKind::Unspecified);

        app.focus = FormField::Kind;
        app.dispatch(Action::CycleKind).await;
        assert_eq!(app.draft.kind, DonationKind::Cash);
        app.dispatch(Action::CycleKind).await;
        assert_eq!(app.draft.kind, DonationKind::Book);
    }

    #[tokio::test]
    async fn test_closing_details_clears_selection() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        app.selected = Some(dune());
        app.mode = AppMode::Details;

        app.dispatch(Action::Cancel).await;
        assert_eq!(app.mode, AppMode::Browse);
        assert!(app.selected.is_none());
    }

    #[tokio::test]
    async fn test_typing_in_search_filters_live() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        app.donations = vec![
            dune(),
            Donation {
                id: Some(2),
                book_name: "Animal Farm".to_string(),
                ..dune()
            },
        ];
        app.refresh_display_list();
        assert_eq!(app.display_list.len(), 2);

        app.dispatch(Action::StartSearch).await;
        for c in "farm".chars() {
            app.dispatch(Action::Input(c)).await;
        }
        assert_eq!(app.display_list, vec![1]);

        // Esc drops the filter
        app.dispatch(Action::Cancel).await;
        assert_eq!(app.display_list.len(), 2);
    }
}
