use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::v1::extractors::{Authentication, SecurityContext};
use crate::services::auth::{Authority, Principal};

fn authority_labels(principal: &Principal) -> Vec<String> {
    principal
        .authorities()
        .iter()
        .map(Authority::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub identity: String,
    pub authorities: Vec<String>,
    pub authenticated_at: DateTime<Utc>,
}

impl From<&Authentication> for PrincipalResponse {
    fn from(auth: &Authentication) -> Self {
        Self {
            identity: auth.principal().identity().to_owned(),
            authorities: authority_labels(auth.principal()),
            authenticated_at: auth.authenticated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub identity: Option<String>,
    pub authorities: Vec<String>,
}

impl From<&SecurityContext> for SessionResponse {
    fn from(ctx: &SecurityContext) -> Self {
        match ctx.principal() {
            Some(p) => Self {
                authenticated: true,
                identity: Some(p.identity().to_owned()),
                authorities: authority_labels(p),
            },
            None => Self {
                authenticated: false,
                identity: None,
                authorities: Vec::new(),
            },
        }
    }
}
