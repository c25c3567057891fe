use super::identifiers::StaffUid;
use serde::{Deserialize, Serialize};

const DEFAULT_DISPLAY_NAME: &str = "User";

/// Identity of the signed-in staff member, as issued by the external
/// identity provider. Passed explicitly to every component that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffSession {
    uid: StaffUid,
    display_name: Option<String>,
    email: Option<String>,
}

impl StaffSession {
    #[must_use]
    pub fn new(uid: StaffUid) -> Self {
        Self {
            uid,
            display_name: None,
            email: None,
        }
    }

    /// Builds a session from optional provider claims. `None` when there is no
    /// subject, i.e. nobody is signed in.
    #[must_use]
    pub fn from_claims(
        uid: Option<String>,
        display_name: Option<String>,
        email: Option<String>,
    ) -> Option<Self> {
        let uid = uid
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())?;

        Some(Self {
            uid: StaffUid::new(uid),
            display_name: display_name.filter(|value| !value.trim().is_empty()),
            email: email.filter(|value| !value.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub const fn uid(&self) -> &StaffUid {
        &self.uid
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}
