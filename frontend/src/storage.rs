use crate::models::SessionUser;

const SESSION_KEY: &str = "user";

/// Where the logged-in profile lives between page loads.
pub trait SessionStore {
    fn load(&self) -> Option<SessionUser>;
    fn save(&self, user: &SessionUser);
    fn clear(&self);
}

/// Browser local storage, one JSON blob under `user`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserSession;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl SessionStore for BrowserSession {
    fn load(&self) -> Option<SessionUser> {
        let raw = local_storage()?.get_item(SESSION_KEY).ok().flatten()?;
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(%err, "stored session is unreadable, ignoring it");
                None
            }
        }
    }

    fn save(&self, user: &SessionUser) {
        if let (Some(storage), Ok(raw)) = (local_storage(), serde_json::to_string(user)) {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}
