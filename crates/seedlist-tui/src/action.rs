//! Action enum: all user-initiated intents and internal events.

use seedlist_core::models::ItemKind;
use seedlist_core::recommend::TargetKind;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SearchPanel,
    ResultsList,
    SeedsPanel,
    TargetsPanel,
    PlaylistPanel,
    LogPanel,
    HelpOverlay,
    AlertOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Search ───────────────────────────────────────────────────────────────
    StartEditing,
    StopEditing,
    QueryChanged(String),
    SubmitSearch,
    SelectSearchType(String),
    ToggleSearchType,

    // ── Seeds ────────────────────────────────────────────────────────────────
    AddSeed(usize), // index into the result list
    RemoveSeed(ItemKind, String),

    // ── Playlist ─────────────────────────────────────────────────────────────
    GetPlaylist,
    SavePlaylist,
    ClearPlaylist,
    NudgeTarget(TargetKind, bool), // true = up

    // ── Links ────────────────────────────────────────────────────────────────
    Navigate(String),
    ActivateSessionLink,
    OpenSavedPlaylist,
    CopySavedPlaylist,
    CopyToClipboard(String),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    DismissAlert,

    // ── System ───────────────────────────────────────────────────────────────
    Reload,
    Quit,
    Noop,
}
