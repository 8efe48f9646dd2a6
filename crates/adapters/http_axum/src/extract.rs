//! Request extractors shared by the resource handlers.

use axum::extract::{FromRef, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use assetdesk_domain::page::PageOptions;

use crate::error::{ApiError, envelope};
use crate::state::PaginationLimits;

/// `page` / `per_page` query parameters, checked against
/// [`PaginationLimits`].
///
/// Missing parameters take their defaults; unparsable values, `page = 0`,
/// `per_page = 0` and `per_page` above the limit are rejected with `400`.
#[derive(Debug, Clone, Copy)]
pub struct Paging(pub PageOptions);

impl<S> FromRequestParts<S> for Paging
where
    PaginationLimits: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(page) = Query::<PageOptions>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| envelope(rejection.status(), rejection.body_text()))?;
        let limits = PaginationLimits::from_ref(state);
        page.validate(limits.max_per_page)
            .map_err(|err| ApiError::from(err).into_response())?;
        Ok(Self(page))
    }
}
