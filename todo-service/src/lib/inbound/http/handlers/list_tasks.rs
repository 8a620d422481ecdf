use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedOwner;
use crate::inbound::http::router::AppState;
use crate::task::models::PageRequest;
use crate::task::models::TaskPage;
use crate::task::ports::TaskServicePort;

pub async fn list_tasks<AS, TS>(
    State(state): State<AppState<AS, TS>>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Query(query): Query<ListTasksQuery>,
) -> Result<ApiSuccess<ListTasksResponseData>, ApiError>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    state
        .task_service
        .list(owner.owner_id, query.into())
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Pagination query; `pageSize` is accepted as an alias of `page_size`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksQuery {
    page: Option<i64>,
    #[serde(alias = "pageSize")]
    page_size: Option<i64>,
}

impl From<ListTasksQuery> for PageRequest {
    fn from(query: ListTasksQuery) -> Self {
        PageRequest::new(query.page, query.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTasksResponseData {
    pub items: Vec<TaskData>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

impl From<&TaskPage> for ListTasksResponseData {
    fn from(page: &TaskPage) -> Self {
        Self {
            items: page.items.iter().map(TaskData::from).collect(),
            page: page.page.page(),
            page_size: page.page.page_size(),
            total: page.total,
        }
    }
}
