//! Core data models for the staff directory
//!
//! This module contains the decoded directory types and re-exports the
//! network client that produces them.

pub mod directory;

pub use directory::{DirectoryClient, DirectoryError};

use serde::{Deserialize, Serialize};

/// The top-level decoded directory record
///
/// Produced only by decoding a successful network response; never
/// constructed incrementally. The wire format uses snake_case field names,
/// which map one-to-one onto the Rust fields. Every field is required:
/// a body missing any of them fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company name
    pub name: String,
    /// Employees in wire order
    pub employees: Vec<Employee>,
}

/// One person record within a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee name
    pub name: String,
    /// Contact phone number, as sent by the server
    pub phone_number: String,
    /// Skill labels; may be empty but must be present on the wire
    pub skills: Vec<String>,
}

impl Company {
    /// Employees sorted lexicographically ascending by name
    ///
    /// The sort is stable: employees sharing a name keep their wire-order
    /// relative positions.
    pub fn sorted_employees(&self) -> Vec<Employee> {
        let mut employees = self.employees.clone();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        employees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, phone: &str, skills: &[&str]) -> Employee {
        Employee {
            name: name.to_string(),
            phone_number: phone.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_decode_company_from_wire_format() {
        let body = r#"{
            "name": "Acme",
            "employees": [
                {"name": "Bob", "phone_number": "+1", "skills": ["go"]}
            ]
        }"#;

        let company: Company = serde_json::from_str(body).expect("Should decode valid body");

        assert_eq!(company.name, "Acme");
        assert_eq!(company.employees, vec![employee("Bob", "+1", &["go"])]);
    }

    #[test]
    fn test_decode_allows_empty_skills() {
        let body = r#"{
            "name": "Acme",
            "employees": [
                {"name": "Ann", "phone_number": "+2", "skills": []}
            ]
        }"#;

        let company: Company = serde_json::from_str(body).expect("Should decode valid body");

        assert!(company.employees[0].skills.is_empty());
    }

    #[test]
    fn test_decode_fails_on_missing_required_field() {
        // phone_number is absent
        let body = r#"{
            "name": "Acme",
            "employees": [
                {"name": "Bob", "skills": ["go"]}
            ]
        }"#;

        let result: Result<Company, _> = serde_json::from_str(body);

        assert!(result.is_err(), "Missing required field should fail decode");
    }

    #[test]
    fn test_decode_fails_on_missing_employees() {
        let body = r#"{"name": "Acme"}"#;

        let result: Result<Company, _> = serde_json::from_str(body);

        assert!(result.is_err());
    }

    #[test]
    fn test_decode_is_idempotent() {
        let body = r#"{
            "name": "Acme",
            "employees": [
                {"name": "Bob", "phone_number": "+1", "skills": ["go", "rust"]},
                {"name": "Ann", "phone_number": "+2", "skills": []}
            ]
        }"#;

        let first: Company = serde_json::from_str(body).expect("First decode");
        let second: Company = serde_json::from_str(body).expect("Second decode");

        assert_eq!(first, second, "Same body must decode to equal values");
    }

    #[test]
    fn test_sorted_employees_orders_by_name_ascending() {
        let company = Company {
            name: "Acme".to_string(),
            employees: vec![
                employee("Carol", "+3", &[]),
                employee("Ann", "+1", &["rust"]),
                employee("Bob", "+2", &["go"]),
            ],
        };

        let sorted = company.sorted_employees();

        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Carol"]);
    }

    #[test]
    fn test_sorted_employees_is_stable_on_name_ties() {
        let company = Company {
            name: "Acme".to_string(),
            employees: vec![
                employee("Bob", "+9", &["second-on-wire-last"]),
                employee("Ann", "+1", &[]),
                employee("Bob", "+2", &["first-on-wire-first"]),
            ],
        };

        // Wire order among the two Bobs: "+9" before "+2"
        let sorted = company.sorted_employees();

        assert_eq!(sorted[0].name, "Ann");
        assert_eq!(sorted[1].phone_number, "+9");
        assert_eq!(sorted[2].phone_number, "+2");
    }

    #[test]
    fn test_sorted_employees_does_not_mutate_wire_order() {
        let company = Company {
            name: "Acme".to_string(),
            employees: vec![employee("Zed", "+1", &[]), employee("Ann", "+2", &[])],
        };

        let _ = company.sorted_employees();

        assert_eq!(company.employees[0].name, "Zed", "Original order preserved");
    }
}
