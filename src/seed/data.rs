use crate::gateway::MemoryGateway;
use crate::model::{
    Branch, Company, CompanyLicense, Department, Employee, EmployeeProfile, Id, PostalAddress,
};

fn branch(id: Id, name: &str, timezone_id: &str, address: Option<PostalAddress>) -> Branch {
    Branch {
        id,
        name: name.to_string(),
        timezone_id: timezone_id.to_string(),
        address,
        created_at: None,
        updated_at: None,
    }
}

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

fn employee(
    id: Id,
    first: &str,
    last: &str,
    branch: Option<Id>,
    department: Option<Id>,
    manager: Option<Id>,
) -> Employee {
    Employee {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        full_name: format!("{first} {last}"),
        assigned_branch_id: branch,
        assigned_department_id: department,
        reports_to_id: manager,
        draft: false,
        created_at: None,
        updated_at: None,
    }
}

/// Load a small fully onboarded tenant into the gateway: a licensed company,
/// three branches, a department tree and a short management chain. Used by
/// the integration tests and handy for demos against the in-memory gateway.
pub fn load_sample_data(gateway: &MemoryGateway) {
    gateway.set_company(Company {
        id: 1,
        name: "Cascadia Outfitters".to_string(),
        country_code: "US".to_string(),
        created_at: None,
        updated_at: None,
    });
    gateway.set_license(CompanyLicense {
        id: 1,
        plan: "standard".to_string(),
        acquired_at: None,
    });
    gateway.set_profile(EmployeeProfile {
        id: 1,
        employee_id: 100,
        company_id: 1,
    });

    gateway.upsert_branch(branch(
        10,
        "Portland HQ",
        "America/Los_Angeles",
        Some(PostalAddress {
            line1: "310 Alder St".to_string(),
            line2: None,
            city: "Portland".to_string(),
            subdivision: Some("OR".to_string()),
            postal_code: "97204".to_string(),
            country_code: "US".to_string(),
        }),
    ));
    gateway.upsert_branch(branch(
        11,
        "Seattle Branch",
        "America/Los_Angeles",
        None,
    ));
    gateway.upsert_branch(branch(12, "Anchorage Branch", "America/Anchorage", None));

    gateway.upsert_department(department(20, "Operations", None, Some(100)));
    gateway.upsert_department(department(21, "Logistics", Some(20), Some(101)));
    gateway.upsert_department(department(22, "Fleet", Some(21), Some(101)));
    gateway.upsert_department(department(23, "Retail", None, Some(102)));

    gateway.upsert_employee(employee(100, "Mara", "Voss", Some(10), Some(20), None));
    gateway.upsert_employee(employee(
        101,
        "Tomas",
        "Reed",
        Some(10),
        Some(21),
        Some(100),
    ));
    gateway.upsert_employee(employee(
        102,
        "Iris",
        "Kane",
        Some(11),
        Some(23),
        Some(100),
    ));
    gateway.upsert_employee(employee(
        103,
        "Noa",
        "Berg",
        Some(12),
        Some(22),
        Some(101),
    ));
    gateway.upsert_employee(employee(
        104,
        "Cal",
        "Ostrom",
        Some(12),
        Some(22),
        Some(101),
    ));
}
