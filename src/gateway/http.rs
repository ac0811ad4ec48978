use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{FetchError, FetchResult};
use crate::gateway::traits::{
    BranchGateway, CompanyGateway, DepartmentGateway, EmployeeGateway, Gateway,
};
use crate::model::{
    Branch, Company, CompanyLicense, Department, Employee, EmployeeProfile, Id, Page, PageRequest,
};

/// HTTP implementation of the entity fetch gateway.
///
/// Thin wrapper over `reqwest::Client`: one GET per operation, no retries,
/// 404 mapped to `Ok(None)` for single-entity reads.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> FetchResult<Self> {
        Self::new(config.api.base_url.clone(), config.api.timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Single-entity read: 404 is a regular outcome, not an error.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> FetchResult<Option<T>> {
        let response = self.client.get(self.url(path)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.json().await.map_err(|err| FetchError::Decode {
                    path: path.to_string(),
                    detail: err.to_string(),
                })?;
                Ok(Some(body))
            }
            status => Err(FetchError::Unexpected {
                status: status.as_u16(),
                path: path.to_string(),
            }),
        }
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> FetchResult<Page<T>> {
        log::debug!("GET {} {:?}", path, query);
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Unexpected {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        response.json().await.map_err(|err| FetchError::Decode {
            path: path.to_string(),
            detail: err.to_string(),
        })
    }

    fn page_query(request: &PageRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("pageNumber", request.page_number.to_string()),
            ("pageSize", request.page_size.to_string()),
        ];
        // `search` is omitted entirely when no filter is active.
        if let Some(search) = &request.search {
            query.push(("search", search.clone()));
        }
        query
    }

    fn ids_query(ids: &[Id]) -> Vec<(&'static str, String)> {
        ids.iter().map(|id| ("id", id.to_string())).collect()
    }
}

#[async_trait::async_trait]
impl CompanyGateway for HttpGateway {
    async fn get_company(&self) -> FetchResult<Option<Company>> {
        self.get_optional("companies/current").await
    }

    async fn get_license(&self) -> FetchResult<Option<CompanyLicense>> {
        self.get_optional("companies/current/license").await
    }

    async fn get_profile(&self) -> FetchResult<Option<EmployeeProfile>> {
        self.get_optional("employees/profile").await
    }
}

#[async_trait::async_trait]
impl BranchGateway for HttpGateway {
    async fn get_branch(&self, id: Id) -> FetchResult<Option<Branch>> {
        self.get_optional(&format!("branches/{id}")).await
    }

    async fn list_branches(&self, request: &PageRequest) -> FetchResult<Page<Branch>> {
        self.get_page("branches", &Self::page_query(request)).await
    }

    async fn get_branches_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Branch>> {
        self.get_page("branches", &Self::ids_query(ids)).await
    }
}

#[async_trait::async_trait]
impl DepartmentGateway for HttpGateway {
    async fn get_department(&self, id: Id) -> FetchResult<Option<Department>> {
        self.get_optional(&format!("departments/{id}")).await
    }

    async fn list_departments(&self, request: &PageRequest) -> FetchResult<Page<Department>> {
        self.get_page("departments", &Self::page_query(request))
            .await
    }

    async fn get_departments_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Department>> {
        self.get_page("departments", &Self::ids_query(ids)).await
    }
}

#[async_trait::async_trait]
impl EmployeeGateway for HttpGateway {
    async fn get_employee(&self, id: Id) -> FetchResult<Option<Employee>> {
        self.get_optional(&format!("employees/{id}")).await
    }

    async fn list_employees(&self, request: &PageRequest) -> FetchResult<Page<Employee>> {
        self.get_page("employees", &Self::page_query(request)).await
    }

    async fn get_employees_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Employee>> {
        self.get_page("employees", &Self::ids_query(ids)).await
    }
}

impl Gateway for HttpGateway {}
