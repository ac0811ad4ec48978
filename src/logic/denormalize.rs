use itertools::Itertools;
use std::collections::HashMap;

use crate::gateway::Gateway;
use crate::model::{
    Branch, Department, Employee, Id, Page, ResolvedDepartment, ResolvedEmployee,
};

/// Expands a just-fetched catalog page into denormalized rows.
///
/// Computes the minimal distinct set of secondary ids across the page,
/// issues at most one batched lookup per referenced type (none at all for an
/// empty id set), and merges results back per row by id lookup. The output
/// always has the input page's row count and row order; a row whose
/// reference cannot be resolved keeps the field absent, it is never dropped.
pub struct Denormalizer;

impl Denormalizer {
    pub async fn employee_page<G: Gateway + ?Sized>(
        gateway: &G,
        page: Page<Employee>,
    ) -> Page<ResolvedEmployee> {
        let branch_ids = Self::distinct_ids(page.items.iter().map(|e| e.assigned_branch_id));
        let department_ids =
            Self::distinct_ids(page.items.iter().map(|e| e.assigned_department_id));
        let manager_ids = Self::distinct_ids(page.items.iter().map(|e| e.reports_to_id));

        let (branches, departments, managers) = tokio::join!(
            Self::batch_branches(gateway, &branch_ids),
            Self::batch_departments(gateway, &department_ids),
            Self::batch_employees(gateway, &manager_ids),
        );

        page.map(|employee| {
            let branch = employee
                .assigned_branch_id
                .and_then(|id| branches.get(&id).cloned());
            let department = employee
                .assigned_department_id
                .and_then(|id| departments.get(&id).cloned());
            let manager = employee
                .reports_to_id
                .and_then(|id| managers.get(&id).cloned());
            ResolvedEmployee {
                employee,
                branch,
                department,
                manager,
            }
        })
    }

    /// List-view denormalization: manager and direct parent only. The full
    /// ancestry trail is a single-department concern, not a list concern.
    pub async fn department_page<G: Gateway + ?Sized>(
        gateway: &G,
        page: Page<Department>,
    ) -> Page<ResolvedDepartment> {
        let manager_ids = Self::distinct_ids(page.items.iter().map(|d| d.manager_id));
        let parent_ids = Self::distinct_ids(page.items.iter().map(|d| d.parent_department_id));

        let (managers, parents) = tokio::join!(
            Self::batch_employees(gateway, &manager_ids),
            Self::batch_departments(gateway, &parent_ids),
        );

        page.map(|department| {
            let manager = department.manager_id.and_then(|id| managers.get(&id).cloned());
            let ancestry = department
                .parent_department_id
                .and_then(|id| parents.get(&id).cloned())
                .into_iter()
                .collect();
            ResolvedDepartment {
                department,
                manager,
                ancestry,
            }
        })
    }

    fn distinct_ids(ids: impl Iterator<Item = Option<Id>>) -> Vec<Id> {
        ids.flatten().unique().collect()
    }

    async fn batch_branches<G: Gateway + ?Sized>(
        gateway: &G,
        ids: &[Id],
    ) -> HashMap<Id, Branch> {
        if ids.is_empty() {
            return HashMap::new();
        }
        match gateway.get_branches_by_ids(ids).await {
            Ok(page) => page.items.into_iter().map(|b| (b.id, b)).collect(),
            Err(err) => {
                log::warn!("branch batch lookup failed; rows stay unembellished: {err}");
                HashMap::new()
            }
        }
    }

    async fn batch_departments<G: Gateway + ?Sized>(
        gateway: &G,
        ids: &[Id],
    ) -> HashMap<Id, Department> {
        if ids.is_empty() {
            return HashMap::new();
        }
        match gateway.get_departments_by_ids(ids).await {
            Ok(page) => page.items.into_iter().map(|d| (d.id, d)).collect(),
            Err(err) => {
                log::warn!("department batch lookup failed; rows stay unembellished: {err}");
                HashMap::new()
            }
        }
    }

    async fn batch_employees<G: Gateway + ?Sized>(
        gateway: &G,
        ids: &[Id],
    ) -> HashMap<Id, Employee> {
        if ids.is_empty() {
            return HashMap::new();
        }
        match gateway.get_employees_by_ids(ids).await {
            Ok(page) => page.items.into_iter().map(|e| (e.id, e)).collect(),
            Err(err) => {
                log::warn!("employee batch lookup failed; rows stay unembellished: {err}");
                HashMap::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;
    use crate::gateway::{DepartmentGateway, EmployeeGateway, MemoryGateway};
    use crate::model::PageRequest;

    fn department(id: Id, name: &str, parent: Option<Id>, manager: Option<Id>) -> Department {
        Department {
            id,
            name: name.to_string(),
            parent_department_id: parent,
            manager_id: manager,
            created_at: None,
            updated_at: None,
        }
    }

    fn employee(id: Id, name: &str, branch: Option<Id>, manager: Option<Id>) -> Employee {
        Employee {
            id,
            first_name: name.to_string(),
            last_name: "Ng".to_string(),
            full_name: format!("{name} Ng"),
            assigned_branch_id: branch,
            assigned_department_id: None,
            reports_to_id: manager,
            draft: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn department_page_issues_one_batch_per_referenced_type() {
        let gateway = MemoryGateway::new();
        gateway.upsert_employee(employee(100, "Mira", None, None));
        gateway.upsert_employee(employee(101, "Tomas", None, None));
        gateway.upsert_department(department(1, "Operations", None, Some(100)));
        gateway.upsert_department(department(2, "Logistics", Some(1), Some(100)));
        gateway.upsert_department(department(3, "Fleet", Some(1), Some(101)));
        gateway.upsert_department(department(4, "Stores", Some(1), None));

        let page = gateway
            .list_departments(&PageRequest::first(10))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 4);

        let resolved = Denormalizer::department_page(&gateway, page).await;
        assert_eq!(resolved.items.len(), 4);

        // 2 distinct manager ids, 1 distinct parent id: exactly one batched
        // lookup each, never 4 individual manager fetches.
        let manager_batches = gateway.batch_calls(EntityKind::Employee);
        assert_eq!(manager_batches.len(), 1);
        assert_eq!(manager_batches[0].len(), 2);
        let parent_batches = gateway.batch_calls(EntityKind::Department);
        assert_eq!(parent_batches.len(), 1);
        assert_eq!(parent_batches[0], vec![1]);
    }

    #[tokio::test]
    async fn rows_with_unresolvable_references_are_kept_in_order() {
        let gateway = MemoryGateway::new();
        gateway.upsert_branch(crate::model::Branch {
            id: 1,
            name: "Harbor".to_string(),
            timezone_id: "Etc/UTC".to_string(),
            address: None,
            created_at: None,
            updated_at: None,
        });
        gateway.upsert_employee(employee(10, "Ena", Some(1), Some(999)));
        gateway.upsert_employee(employee(11, "Bo", Some(2), None)); // branch 2 deleted
        gateway.upsert_employee(employee(12, "Cal", None, Some(10)));

        let page = gateway
            .list_employees(&PageRequest::first(10))
            .await
            .unwrap();
        let input_ids: Vec<Id> = page.items.iter().map(|e| e.id).collect();

        let resolved = Denormalizer::employee_page(&gateway, page).await;
        let output_ids: Vec<Id> = resolved.items.iter().map(|r| r.employee.id).collect();
        assert_eq!(input_ids, output_ids);

        assert_eq!(resolved.items[0].branch.as_ref().map(|b| b.id), Some(1));
        assert!(resolved.items[0].manager.is_none()); // 999 deleted
        assert!(resolved.items[1].branch.is_none()); // 2 deleted
        assert_eq!(resolved.items[2].manager.as_ref().map(|m| m.id), Some(10));
    }

    #[tokio::test]
    async fn empty_reference_sets_skip_the_batch_call_entirely() {
        let gateway = MemoryGateway::new();
        gateway.upsert_employee(employee(10, "Ena", None, None));
        gateway.upsert_employee(employee(11, "Bo", None, None));

        let page = gateway
            .list_employees(&PageRequest::first(10))
            .await
            .unwrap();
        let resolved = Denormalizer::employee_page(&gateway, page).await;
        assert_eq!(resolved.items.len(), 2);

        assert!(gateway.batch_calls(EntityKind::Branch).is_empty());
        assert!(gateway.batch_calls(EntityKind::Department).is_empty());
        assert!(gateway.batch_calls(EntityKind::Employee).is_empty());
    }

    #[tokio::test]
    async fn page_metadata_survives_denormalization() {
        let gateway = MemoryGateway::new();
        for id in 1..=7 {
            gateway.upsert_employee(employee(id, &format!("E{id}"), None, None));
        }
        let page = gateway
            .list_employees(&PageRequest::first(5))
            .await
            .unwrap();
        let resolved = Denormalizer::employee_page(&gateway, page).await;
        assert_eq!(resolved.page_number, 1);
        assert_eq!(resolved.total_items, 7);
        assert_eq!(resolved.total_pages, 2);
    }
}
