//! App state definition (Model)
//!
//! The application state struct and its related enums

use crate::api::DonationApi;
use crate::models::{Donation, DonationDraft, FormField};

/// Application state
pub struct App {
    pub api: DonationApi,
    /// Cached copies of the server-owned donation records
    pub donations: Vec<Donation>,
    /// Draft of the donation form, reset only after a successful submit
    pub draft: DonationDraft,
    /// Doubles as the list filter and the lookup key for "get details"
    pub search_term: String,
    /// Copy of the record shown in the details dialog; cleared on close
    pub selected: Option<Donation>,
    pub mode: AppMode,
    pub focus: FormField,
    pub selected_index: usize,
    /// Indices into `donations` after applying the search filter
    pub display_list: Vec<usize>,
    pub notice: Option<Notice>,
}

/// Application mode
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Browse,
    /// The donation form dialog is open; edits target the draft
    Donating,
    /// The search term is being edited; the list filters live
    Searching,
    /// The details dialog is open; edits target the selected record
    Details,
    Confirm(ConfirmAction),
}

/// Pending confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    /// Cancel (delete) the donation with this server row key
    CancelDonation(i64),
}

/// Outcome of an operation, decoupled from how it is presented
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    Created,
    Updated,
    Deleted,
    NotFound,
    EmptyLookupId,
    IncompleteDraft,
    NoSelection,
    MissingIdentifier,
    CreateFailed,
    LookupFailed,
    UpdateFailed,
    DeleteFailed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::Created | Notice::Updated | Notice::Deleted => NoticeLevel::Success,
            Notice::NotFound
            | Notice::EmptyLookupId
            | Notice::IncompleteDraft
            | Notice::NoSelection
            | Notice::MissingIdentifier => NoticeLevel::Warning,
            Notice::CreateFailed
            | Notice::LookupFailed
            | Notice::UpdateFailed
            | Notice::DeleteFailed => NoticeLevel::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Created => "Donation created successfully",
            Notice::Updated => "Donation updated successfully",
            Notice::Deleted => "Donation deleted successfully",
            Notice::NotFound => "Donation not found.",
            Notice::EmptyLookupId => "Please enter a valid donation ID.",
            Notice::IncompleteDraft => "ISBN, book name and author are required.",
            Notice::NoSelection => "No donation selected for update",
            Notice::MissingIdentifier => "Invalid donation ID for update",
            Notice::CreateFailed => "Error creating donation",
            Notice::LookupFailed => "Error retrieving donation by ID",
            Notice::UpdateFailed => "Error updating donation",
            Notice::DeleteFailed => "Error deleting donation",
        }
    }
}

impl App {
    /// Create a new application instance
    pub fn new(api: DonationApi) -> Self {
        Self {
            api,
            donations: Vec::new(),
            draft: DonationDraft::default(),
            search_term: String::new(),
            selected: None,
            mode: AppMode::Browse,
            focus: FormField::Isbn,
            selected_index: 0,
            display_list: Vec::new(),
            notice: None,
        }
    }

    /// Recompute the filtered display list
    pub fn refresh_display_list(&mut self) {
        self.display_list = self
            .donations
            .iter()
            .enumerate()
            .filter(|(_, d)| d.matches(&self.search_term))
            .map(|(i, _)| i)
            .collect();

        // Keep the selection index valid
        if self.display_list.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.display_list.len() {
            self.selected_index = self.display_list.len() - 1;
        }
    }

    /// The list entry currently highlighted in browse mode
    pub fn highlighted(&self) -> Option<&Donation> {
        self.display_list
            .get(self.selected_index)
            .and_then(|&i| self.donations.get(i))
    }
}
