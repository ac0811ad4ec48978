use crate::error::FetchResult;
use crate::model::{
    Branch, Company, CompanyLicense, Department, Employee, EmployeeProfile, Id, Page, PageRequest,
};

/// Singleton-per-tenant reads feeding the flow step deriver.
#[async_trait::async_trait]
pub trait CompanyGateway: Send + Sync {
    async fn get_company(&self) -> FetchResult<Option<Company>>;
    async fn get_license(&self) -> FetchResult<Option<CompanyLicense>>;
    async fn get_profile(&self) -> FetchResult<Option<EmployeeProfile>>;
}

#[async_trait::async_trait]
pub trait BranchGateway: Send + Sync {
    /// `Ok(None)` means the branch does not exist (HTTP 404).
    async fn get_branch(&self, id: Id) -> FetchResult<Option<Branch>>;
    async fn list_branches(&self, request: &PageRequest) -> FetchResult<Page<Branch>>;
    /// Batched lookup, used to avoid N individual round-trips.
    async fn get_branches_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Branch>>;
}

#[async_trait::async_trait]
pub trait DepartmentGateway: Send + Sync {
    async fn get_department(&self, id: Id) -> FetchResult<Option<Department>>;
    async fn list_departments(&self, request: &PageRequest) -> FetchResult<Page<Department>>;
    async fn get_departments_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Department>>;
}

#[async_trait::async_trait]
pub trait EmployeeGateway: Send + Sync {
    async fn get_employee(&self, id: Id) -> FetchResult<Option<Employee>>;
    async fn list_employees(&self, request: &PageRequest) -> FetchResult<Page<Employee>>;
    async fn get_employees_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Employee>>;
}

/// The full entity fetch surface consumed by the resolver, denormalizer and
/// flow handlers. All operations are single-attempt and side-effect-free
/// beyond the network call itself.
pub trait Gateway:
    CompanyGateway + BranchGateway + DepartmentGateway + EmployeeGateway + Send + Sync
{
}
