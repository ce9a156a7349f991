//! Draft validation for the employee form. Pure function of the draft;
//! every violated field is reported, no short-circuiting.

use std::collections::BTreeMap;
use std::fmt;

use shared::domain::EmployeeDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Salary,
    Department,
    Role,
    DateOfJoining,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Salary => "salary",
            Field::Department => "department",
            Field::Role => "role",
            Field::DateOfJoining => "dateOfJoining",
        };
        f.write_str(name)
    }
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

pub fn validate(draft: &EmployeeDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.first_name.trim().is_empty() {
        errors.insert(Field::FirstName, "First name is required");
    }
    if draft.last_name.trim().is_empty() {
        errors.insert(Field::LastName, "Last name is required");
    }

    let email = draft.email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_plausible_email(email) {
        errors.insert(Field::Email, "Email is invalid");
    }

    match draft.salary {
        Some(salary) if salary > 0.0 => {}
        _ => {
            errors.insert(Field::Salary, "Valid salary is required");
        }
    }

    if draft.department.trim().is_empty() {
        errors.insert(Field::Department, "Department is required");
    }
    if draft.role.trim().is_empty() {
        errors.insert(Field::Role, "Role is required");
    }
    if draft.date_of_joining.is_none() {
        errors.insert(Field::DateOfJoining, "Date of joining is required");
    }

    errors
}

/// Basic `local@domain.tld` shape. Real validation belongs to the backend;
/// this only catches obviously malformed input before a network round-trip.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::domain::EmployeeDraft;

    use super::*;

    fn complete_draft() -> EmployeeDraft {
        EmployeeDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            salary: Some(90_000.0),
            department: "Engineering".into(),
            role: "Engineer".into(),
            date_of_joining: NaiveDate::from_ymd_opt(2024, 1, 15),
            date_of_birth: None,
            status: Default::default(),
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(validate(&complete_draft()).is_empty());
    }

    #[test]
    fn reports_every_violated_field_without_short_circuit() {
        let draft = EmployeeDraft {
            first_name: "".into(),
            email: "bad".into(),
            salary: Some(0.0),
            date_of_joining: None,
            ..complete_draft()
        };

        let errors = validate(&draft);
        assert_eq!(errors.get(&Field::FirstName), Some(&"First name is required"));
        assert_eq!(errors.get(&Field::Email), Some(&"Email is invalid"));
        assert_eq!(errors.get(&Field::Salary), Some(&"Valid salary is required"));
        assert_eq!(
            errors.get(&Field::DateOfJoining),
            Some(&"Date of joining is required")
        );
        // Fields that were filled in stay clean.
        assert!(!errors.contains_key(&Field::LastName));
        assert!(!errors.contains_key(&Field::Department));
        assert!(!errors.contains_key(&Field::Role));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn whitespace_only_text_fails_required() {
        let draft = EmployeeDraft {
            department: "   ".into(),
            role: "\t".into(),
            ..complete_draft()
        };
        let errors = validate(&draft);
        assert_eq!(errors.get(&Field::Department), Some(&"Department is required"));
        assert_eq!(errors.get(&Field::Role), Some(&"Role is required"));
    }

    #[test]
    fn email_shape_checks() {
        for bad in ["plainaddress", "@nodomain.com", "a@b", "a b@c.d", "a@.com"] {
            let draft = EmployeeDraft {
                email: bad.into(),
                ..complete_draft()
            };
            assert_eq!(
                validate(&draft).get(&Field::Email),
                Some(&"Email is invalid"),
                "expected {bad:?} to be rejected"
            );
        }
        let draft = EmployeeDraft {
            email: "first.last@sub.example.co".into(),
            ..complete_draft()
        };
        assert!(!validate(&draft).contains_key(&Field::Email));
    }

    #[test]
    fn negative_and_missing_salary_fail() {
        for salary in [None, Some(-1.0), Some(0.0)] {
            let draft = EmployeeDraft {
                salary,
                ..complete_draft()
            };
            assert!(validate(&draft).contains_key(&Field::Salary));
        }
    }
}
