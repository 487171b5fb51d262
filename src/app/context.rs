// InternDesk - app/context.rs
//
// Who the client is acting as. Built once at the composition root (main.rs)
// and handed to the fetch worker, which passes it into every loader and
// action explicitly. Nothing reads the current user from global state.

use crate::platform::api::PortalApi;
use crate::platform::config::AppConfig;
use crate::util::error::ApiError;

/// Identity of the signed-in company user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Company user id; also the actor id recorded on status changes.
    pub user_id: String,
    /// Company the user acts for.
    pub company_id: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, company_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            company_id: company_id.into(),
        }
    }
}

/// Identity as far as the CLI and config could resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextResolution {
    /// Both ids known.
    Complete(SessionContext),
    /// User known, company must be looked up from the user's profile.
    NeedsCompany { user_id: String },
    /// No user id anywhere.
    MissingUser,
}

/// Merge CLI overrides with config values. CLI wins.
pub fn resolve(
    cli_user: Option<String>,
    cli_company: Option<String>,
    config: &AppConfig,
) -> ContextResolution {
    let user = cli_user
        .filter(|s| !s.trim().is_empty())
        .or_else(|| config.user_id.clone());
    let company = cli_company
        .filter(|s| !s.trim().is_empty())
        .or_else(|| config.company_id.clone());

    match (user, company) {
        (Some(user_id), Some(company_id)) => {
            ContextResolution::Complete(SessionContext::new(user_id, company_id))
        }
        (Some(user_id), None) => ContextResolution::NeedsCompany { user_id },
        (None, _) => ContextResolution::MissingUser,
    }
}

/// Look up the company a user belongs to through their company profile.
pub fn discover_company(api: &dyn PortalApi, user_id: &str) -> Result<SessionContext, ApiError> {
    let profile = api.fetch_company_profile(user_id)?;
    if profile.id.trim().is_empty() {
        return Err(ApiError::MissingPayload {
            endpoint: format!("companies/by-user/{user_id}"),
        });
    }
    tracing::info!(company = %profile.id, "Company resolved from user profile");
    Ok(SessionContext::new(user_id, profile.id))
}
