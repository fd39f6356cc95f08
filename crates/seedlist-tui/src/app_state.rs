//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read it; only the App event loop writes to it.

use std::path::PathBuf;

use seedlist_core::config::Config;
use tracing::warn;

use crate::bootstrap::{Mount, Session};
use crate::container::AppContainer;
use crate::widgets::link_button::LinkButton;
use crate::widgets::status_bar::InputMode;

pub struct AppState {
    pub config: Config,

    // ── Session ─────────────────────────────────────────────────────────────
    pub session: Session,
    /// Login or logout link, injected into the header by the bootstrap.
    pub session_link: Option<LinkButton>,
    /// Mounted only for an authenticated session.
    pub container: Option<AppContainer>,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,

    // ── Logs ────────────────────────────────────────────────────────────────
    /// Cached tail of the log file (refreshed periodically by App).
    pub tui_log_lines: Vec<String>,
    pub tui_log_path: PathBuf,
}

impl AppState {
    pub fn new(config: Config, tui_log_path: PathBuf) -> Self {
        Self {
            config,
            session: Session::Checking,
            session_link: None,
            container: None,
            input_mode: InputMode::Normal,
            tui_log_lines: Vec::new(),
            tui_log_path,
        }
    }

    pub fn container(&self) -> Option<&AppContainer> {
        self.container.as_ref()
    }

    /// Apply a bootstrap decision.  An already-mounted container survives a
    /// re-check that is still authenticated, and one that could not reach the
    /// backend at all.
    pub fn apply_mount(&mut self, mount: Mount, container: impl FnOnce() -> AppContainer) {
        if mount.session == Session::Failed && self.container.is_some() {
            warn!("session re-check failed, keeping the current workspace");
            self.session = Session::Failed;
            return;
        }
        self.session = mount.session;
        self.session_link = mount.link;
        if !mount.mount_container {
            self.container = None;
        } else if self.container.is_none() {
            self.container = Some(container());
        }
    }

    pub fn alert(&self) -> Option<&str> {
        self.container().and_then(|c| c.alert())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::mount;
    use seedlist_core::api::{AuthStatus, StatusCode};
    use seedlist_core::recommend::Targets;

    fn state() -> AppState {
        AppState::new(Config::resolve(false).unwrap(), PathBuf::from("/tmp/x.log"))
    }

    #[test]
    fn test_mount_and_unmount() {
        let mut s = state();
        let config = s.config.clone();
        s.apply_mount(mount(&config, Ok(AuthStatus::Authenticated)), || {
            AppContainer::new(Targets::default())
        });
        assert!(s.container().is_some());
        assert_eq!(s.session, Session::Authenticated);

        s.apply_mount(
            mount(&config, Ok(AuthStatus::Unauthenticated(StatusCode::UNAUTHORIZED))),
            AppContainer::default,
        );
        assert!(s.container().is_none());
        assert_eq!(
            s.session_link.as_ref().map(|l| l.label()),
            Some("Login with Spotify")
        );
    }

    #[test]
    fn test_recheck_keeps_container() {
        let mut s = state();
        let config = s.config.clone();
        s.apply_mount(
            mount(&config, Ok(AuthStatus::Authenticated)),
            AppContainer::default,
        );
        if let Some(c) = s.container.as_mut() {
            c.set_query("kept");
        }
        s.apply_mount(
            mount(&config, Ok(AuthStatus::Authenticated)),
            AppContainer::default,
        );
        assert_eq!(s.container().map(|c| c.query()), Some("kept"));
    }

    #[test]
    fn test_failed_recheck_keeps_workspace() {
        let mut s = state();
        let config = s.config.clone();
        s.apply_mount(
            mount(&config, Ok(AuthStatus::Authenticated)),
            AppContainer::default,
        );
        if let Some(c) = s.container.as_mut() {
            c.set_query("kept");
        }
        let err = seedlist_core::api::ApiError::MissingField {
            url: "x".into(),
            field: "artists",
        };
        s.apply_mount(mount(&config, Err(err)), AppContainer::default);
        assert_eq!(s.session, Session::Failed);
        assert_eq!(s.container().map(|c| c.query()), Some("kept"));
        assert_eq!(s.session_link.as_ref().map(|l| l.label()), Some("Logout"));
    }

    #[test]
    fn test_failed_first_check_mounts_nothing() {
        let mut s = state();
        let config = s.config.clone();
        let err = seedlist_core::api::ApiError::MissingField {
            url: "x".into(),
            field: "artists",
        };
        s.apply_mount(mount(&config, Err(err)), AppContainer::default);
        assert!(s.container().is_none());
        assert!(s.session_link.is_none());
    }
}
