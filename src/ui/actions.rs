//! Action enum (Intent)
//!
//! User interactions expressed as explicit, semantic actions

/// User action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // Entry points for specific flows
    StartDonation,
    StartSearch,
    FetchDetails,
    StartCancelDonation,

    // Form / generic interaction
    NextField, // Tab
    CycleKind, // Left / Right on the donation-type field
    Cancel,    // Esc / n
    Submit,    // Enter / y
    Input(char),
    DeleteChar, // Backspace
}
