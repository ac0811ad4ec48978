use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashSet};

use crate::error::{EntityKind, FetchError, FetchResult};
use crate::gateway::traits::{
    BranchGateway, CompanyGateway, DepartmentGateway, EmployeeGateway, Gateway,
};
use crate::model::{
    total_pages, Branch, Company, CompanyLicense, Department, Employee, EmployeeProfile, Id, Page,
    PageRequest,
};

#[derive(Debug, Default)]
struct MemoryData {
    company: Option<Company>,
    license: Option<CompanyLicense>,
    profile: Option<EmployeeProfile>,
    branches: BTreeMap<Id, Branch>,
    departments: BTreeMap<Id, Department>,
    employees: BTreeMap<Id, Employee>,
    /// Entities whose reads fail with a server error, for failure-path tests.
    failing: HashSet<(EntityKind, Id)>,
}

/// In-process gateway backed by fixture data. Used by tests and the seed
/// module; also records batched-lookup calls so tests can assert request
/// counts instead of guessing at them.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    data: RwLock<MemoryData>,
    batches: Mutex<Vec<(EntityKind, Vec<Id>)>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_company(&self, company: Company) {
        self.data.write().company = Some(company);
    }

    pub fn clear_company(&self) {
        self.data.write().company = None;
    }

    pub fn set_license(&self, license: CompanyLicense) {
        self.data.write().license = Some(license);
    }

    pub fn set_profile(&self, profile: EmployeeProfile) {
        self.data.write().profile = Some(profile);
    }

    pub fn clear_profile(&self) {
        self.data.write().profile = None;
    }

    pub fn upsert_branch(&self, branch: Branch) {
        self.data.write().branches.insert(branch.id, branch);
    }

    pub fn upsert_department(&self, department: Department) {
        self.data
            .write()
            .departments
            .insert(department.id, department);
    }

    pub fn upsert_employee(&self, employee: Employee) {
        self.data.write().employees.insert(employee.id, employee);
    }

    pub fn remove_employee(&self, id: Id) {
        self.data.write().employees.remove(&id);
    }

    /// Make every read of the given entity fail with a server error.
    pub fn break_entity(&self, kind: EntityKind, id: Id) {
        self.data.write().failing.insert((kind, id));
    }

    /// Batched-by-id calls issued so far for one entity kind, in order.
    pub fn batch_calls(&self, kind: EntityKind) -> Vec<Vec<Id>> {
        self.batches
            .lock()
            .iter()
            .filter(|(batch_kind, _)| *batch_kind == kind)
            .map(|(_, ids)| ids.clone())
            .collect()
    }

    fn check_failing(&self, kind: EntityKind, id: Id) -> FetchResult<()> {
        if self.data.read().failing.contains(&(kind, id)) {
            return Err(FetchError::Unexpected {
                status: 500,
                path: format!("{kind}/{id}"),
            });
        }
        Ok(())
    }

    fn record_batch(&self, kind: EntityKind, ids: &[Id]) {
        self.batches.lock().push((kind, ids.to_vec()));
    }

    fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Page<T> {
        let total_items = items.len() as u64;
        let start = request.page_number.saturating_sub(1) as usize * request.page_size as usize;
        let page_items = items
            .into_iter()
            .skip(start)
            .take(request.page_size as usize)
            .collect();
        Page {
            items: page_items,
            page_number: request.page_number,
            page_size: request.page_size,
            total_items,
            total_pages: total_pages(total_items, request.page_size),
        }
    }

    fn batch_page<T>(items: Vec<T>) -> Page<T> {
        let total_items = items.len() as u64;
        Page {
            items,
            page_number: 1,
            page_size: total_items.max(1) as u32,
            total_items,
            total_pages: 1,
        }
    }

    fn matches(search: Option<&str>, name: &str) -> bool {
        match search {
            None => true,
            Some(term) => name.to_lowercase().contains(&term.to_lowercase()),
        }
    }
}

#[async_trait::async_trait]
impl CompanyGateway for MemoryGateway {
    async fn get_company(&self) -> FetchResult<Option<Company>> {
        Ok(self.data.read().company.clone())
    }

    async fn get_license(&self) -> FetchResult<Option<CompanyLicense>> {
        Ok(self.data.read().license.clone())
    }

    async fn get_profile(&self) -> FetchResult<Option<EmployeeProfile>> {
        Ok(self.data.read().profile.clone())
    }
}

#[async_trait::async_trait]
impl BranchGateway for MemoryGateway {
    async fn get_branch(&self, id: Id) -> FetchResult<Option<Branch>> {
        self.check_failing(EntityKind::Branch, id)?;
        Ok(self.data.read().branches.get(&id).cloned())
    }

    async fn list_branches(&self, request: &PageRequest) -> FetchResult<Page<Branch>> {
        let items: Vec<Branch> = self
            .data
            .read()
            .branches
            .values()
            .filter(|branch| Self::matches(request.search.as_deref(), &branch.name))
            .cloned()
            .collect();
        Ok(Self::paginate(items, request))
    }

    async fn get_branches_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Branch>> {
        self.record_batch(EntityKind::Branch, ids);
        let data = self.data.read();
        let items: Vec<Branch> = ids
            .iter()
            .filter_map(|id| data.branches.get(id).cloned())
            .collect();
        Ok(Self::batch_page(items))
    }
}

#[async_trait::async_trait]
impl DepartmentGateway for MemoryGateway {
    async fn get_department(&self, id: Id) -> FetchResult<Option<Department>> {
        self.check_failing(EntityKind::Department, id)?;
        Ok(self.data.read().departments.get(&id).cloned())
    }

    async fn list_departments(&self, request: &PageRequest) -> FetchResult<Page<Department>> {
        let items: Vec<Department> = self
            .data
            .read()
            .departments
            .values()
            .filter(|department| Self::matches(request.search.as_deref(), &department.name))
            .cloned()
            .collect();
        Ok(Self::paginate(items, request))
    }

    async fn get_departments_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Department>> {
        self.record_batch(EntityKind::Department, ids);
        let data = self.data.read();
        let items: Vec<Department> = ids
            .iter()
            .filter_map(|id| data.departments.get(id).cloned())
            .collect();
        Ok(Self::batch_page(items))
    }
}

#[async_trait::async_trait]
impl EmployeeGateway for MemoryGateway {
    async fn get_employee(&self, id: Id) -> FetchResult<Option<Employee>> {
        self.check_failing(EntityKind::Employee, id)?;
        Ok(self.data.read().employees.get(&id).cloned())
    }

    async fn list_employees(&self, request: &PageRequest) -> FetchResult<Page<Employee>> {
        let items: Vec<Employee> = self
            .data
            .read()
            .employees
            .values()
            .filter(|employee| Self::matches(request.search.as_deref(), &employee.display_name()))
            .cloned()
            .collect();
        Ok(Self::paginate(items, request))
    }

    async fn get_employees_by_ids(&self, ids: &[Id]) -> FetchResult<Page<Employee>> {
        self.record_batch(EntityKind::Employee, ids);
        let data = self.data.read();
        let items: Vec<Employee> = ids
            .iter()
            .filter_map(|id| data.employees.get(id).cloned())
            .collect();
        Ok(Self::batch_page(items))
    }
}

impl Gateway for MemoryGateway {}
