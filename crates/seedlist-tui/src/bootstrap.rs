//! Startup auth check: decides what the header shows and whether the
//! AppContainer is mounted.

use tracing::{error, info, warn};

use seedlist_core::api::{ApiClient, ApiError, AuthStatus};
use seedlist_core::config::Config;

use crate::widgets::link_button::LinkButton;

pub const UNREACHABLE_MESSAGE: &str = "Unable to fetch server :(";
pub const GENERIC_MESSAGE: &str = "Something went wrong...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Checking,
    Authenticated,
    Anonymous,
    /// The auth check itself failed.
    Failed,
}

/// What the bootstrap decided to mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub session: Session,
    pub link: Option<LinkButton>,
    pub mount_container: bool,
}

/// Two-entry mapping from a failed auth check to a fixed message.
pub fn failure_message(err: &ApiError) -> &'static str {
    if err.is_connect() {
        UNREACHABLE_MESSAGE
    } else {
        GENERIC_MESSAGE
    }
}

/// Turn the auth check result into a mount decision.  A failure is only
/// logged: no link, no container.
pub fn mount(config: &Config, result: Result<AuthStatus, ApiError>) -> Mount {
    match result {
        Ok(AuthStatus::Authenticated) => {
            info!("session authenticated");
            Mount {
                session: Session::Authenticated,
                link: Some(LinkButton::new("Logout", config.logout_url())),
                mount_container: true,
            }
        }
        Ok(AuthStatus::Unauthenticated(status)) => {
            info!("not logged in ({})", status);
            Mount {
                session: Session::Anonymous,
                link: Some(LinkButton::new("Login with Spotify", config.login_url())),
                mount_container: false,
            }
        }
        Err(e) => {
            error!("auth check failed: {}", e);
            warn!("{}", failure_message(&e));
            Mount {
                session: Session::Failed,
                link: None,
                mount_container: false,
            }
        }
    }
}

pub async fn bootstrap(api: &ApiClient, config: &Config) -> Mount {
    mount(config, api.check_auth().await)
}
