//! Request extractors whose rejections render as Problem bodies
//!
//! axum's own `Json`, `Query` and `Path` reject with plain text. These wrappers
//! keep axum's status codes and messages but answer with the same
//! `{success: false, error, ...}` shape as every other failure.

use super::error::Problem;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};

/// JSON request body
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

/// Query string parameters
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

/// Path parameters
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

fn rejected(status: StatusCode, title: &str, detail: String) -> Problem {
    tracing::warn!(status = status.as_u16(), %detail, "request could not be read");
    Problem::new(status, title).with_detail(detail)
}

impl From<JsonRejection> for Problem {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.status(), "Invalid Request Body", rejection.body_text())
    }
}

impl From<QueryRejection> for Problem {
    fn from(rejection: QueryRejection) -> Self {
        rejected(rejection.status(), "Invalid Query Parameters", rejection.body_text())
    }
}

impl From<PathRejection> for Problem {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.status(), "Invalid Path Parameter", rejection.body_text())
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(value))
    }
}

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(PathParam(value))
    }
}
