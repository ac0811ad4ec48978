use std::collections::HashSet;

use crate::error::{EntityKind, FetchError, FetchResult};
use crate::gateway::Gateway;
use crate::model::{Branch, Department, Employee, Id, ResolvedDepartment, ResolvedEmployee};

/// Hard ceiling on department ancestry resolution. Real trees are a handful
/// of levels deep; anything past this is corrupt data.
pub const MAX_ANCESTRY_DEPTH: usize = 16;

/// Resolves one entity's foreign-key references into nested objects.
///
/// Employee references are one hop only; the department parent chain is the
/// single place true recursion occurs, bounded by a visited set and
/// `MAX_ANCESTRY_DEPTH`. A failed or missing secondary reference leaves the
/// field unresolved; only the primary entity is fatal.
pub struct Resolver;

impl Resolver {
    /// Fetch an employee by id and resolve its references. A missing primary
    /// entity propagates as `FetchError::NotFound`.
    pub async fn fetch_employee<G: Gateway + ?Sized>(
        gateway: &G,
        id: Id,
    ) -> FetchResult<ResolvedEmployee> {
        let employee = gateway
            .get_employee(id)
            .await?
            .ok_or_else(|| FetchError::not_found(EntityKind::Employee, id))?;
        Ok(Self::resolve_employee(gateway, employee).await)
    }

    /// Resolve an already-fetched employee. Branch, department and manager
    /// lookups are independent and run concurrently; end-to-end latency is
    /// bounded by the slowest single reference.
    pub async fn resolve_employee<G: Gateway + ?Sized>(
        gateway: &G,
        employee: Employee,
    ) -> ResolvedEmployee {
        let (branch, department, manager) = tokio::join!(
            Self::lookup_branch(gateway, employee.assigned_branch_id),
            Self::lookup_department(gateway, employee.assigned_department_id),
            Self::lookup_manager(gateway, employee.reports_to_id),
        );
        ResolvedEmployee {
            employee,
            branch,
            department,
            manager,
        }
    }

    pub async fn fetch_department<G: Gateway + ?Sized>(
        gateway: &G,
        id: Id,
    ) -> FetchResult<ResolvedDepartment> {
        let department = gateway
            .get_department(id)
            .await?
            .ok_or_else(|| FetchError::not_found(EntityKind::Department, id))?;
        Ok(Self::resolve_department(gateway, department).await)
    }

    /// Resolve a department's manager (one hop) and its full parent chain.
    pub async fn resolve_department<G: Gateway + ?Sized>(
        gateway: &G,
        department: Department,
    ) -> ResolvedDepartment {
        let (manager, ancestry) = tokio::join!(
            Self::lookup_manager(gateway, department.manager_id),
            Self::resolve_ancestry(gateway, department.id, department.parent_department_id),
        );
        ResolvedDepartment {
            department,
            manager,
            ancestry,
        }
    }

    /// Walk the parent chain until a root department is reached. Inherently
    /// sequential: each level needs the previous level's parent id. An id
    /// that reappears in the same walk means the backing data is corrupt;
    /// the chain is truncated there and the partial ancestry returned.
    async fn resolve_ancestry<G: Gateway + ?Sized>(
        gateway: &G,
        start_id: Id,
        mut next: Option<Id>,
    ) -> Vec<Department> {
        let mut visited: HashSet<Id> = HashSet::from([start_id]);
        let mut ancestry = Vec::new();
        while let Some(parent_id) = next {
            if !visited.insert(parent_id) {
                log::warn!(
                    "department parent chain of {start_id} loops back to {parent_id}; truncating ancestry"
                );
                break;
            }
            if ancestry.len() >= MAX_ANCESTRY_DEPTH {
                log::warn!(
                    "department parent chain of {start_id} exceeds depth {MAX_ANCESTRY_DEPTH}; truncating ancestry"
                );
                break;
            }
            match gateway.get_department(parent_id).await {
                Ok(Some(parent)) => {
                    next = parent.parent_department_id;
                    ancestry.push(parent);
                }
                Ok(None) => {
                    log::warn!("parent department {parent_id} referenced by chain of {start_id} is missing");
                    break;
                }
                Err(err) => {
                    log::warn!("parent department {parent_id} left unresolved: {err}");
                    break;
                }
            }
        }
        ancestry
    }

    async fn lookup_branch<G: Gateway + ?Sized>(gateway: &G, id: Option<Id>) -> Option<Branch> {
        let id = id?;
        match gateway.get_branch(id).await {
            Ok(found) => {
                if found.is_none() {
                    log::warn!("assigned branch {id} is missing; leaving reference unresolved");
                }
                found
            }
            Err(err) => {
                log::warn!("branch {id} left unresolved: {err}");
                None
            }
        }
    }

    async fn lookup_department<G: Gateway + ?Sized>(
        gateway: &G,
        id: Option<Id>,
    ) -> Option<Department> {
        let id = id?;
        match gateway.get_department(id).await {
            Ok(found) => {
                if found.is_none() {
                    log::warn!("assigned department {id} is missing; leaving reference unresolved");
                }
                found
            }
            Err(err) => {
                log::warn!("department {id} left unresolved: {err}");
                None
            }
        }
    }

    /// One hop: the manager's own references are never expanded.
    async fn lookup_manager<G: Gateway + ?Sized>(gateway: &G, id: Option<Id>) -> Option<Employee> {
        let id = id?;
        match gateway.get_employee(id).await {
            Ok(found) => {
                if found.is_none() {
                    log::warn!("manager {id} is missing; leaving reference unresolved");
                }
                found
            }
            Err(err) => {
                log::warn!("manager {id} left unresolved: {err}");
                None
            }
        }
    }
}
