//! Collection view engine: derives the filtered, sorted, paginated slice of
//! the record list from ephemeral UI state. Entirely local; no network.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use shared::domain::{Employee, EmployeeStatus};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
    FirstName,
    LastName,
    Email,
    Department,
    Role,
    Salary,
    DateOfJoining,
    DateOfBirth,
    Status,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Id => "id",
            SortField::FirstName => "firstName",
            SortField::LastName => "lastName",
            SortField::Email => "email",
            SortField::Department => "department",
            SortField::Role => "role",
            SortField::Salary => "salary",
            SortField::DateOfJoining => "dateOfJoining",
            SortField::DateOfBirth => "dateOfBirth",
            SortField::Status => "status",
        };
        f.write_str(name)
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "firstName" => Ok(SortField::FirstName),
            "lastName" => Ok(SortField::LastName),
            "email" => Ok(SortField::Email),
            "department" => Ok(SortField::Department),
            "role" => Ok(SortField::Role),
            "salary" => Ok(SortField::Salary),
            "dateOfJoining" => Ok(SortField::DateOfJoining),
            "dateOfBirth" => Ok(SortField::DateOfBirth),
            "status" => Ok(SortField::Status),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            page: 1,
        }
    }
}

impl ViewState {
    pub fn page(&self) -> usize {
        self.page
    }

    /// Any change to the search term returns the user to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Selecting the active field flips direction; selecting a new field
    /// sorts it ascending. Either way the page resets.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = match self.sort_direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Ascending;
        }
        self.page = 1;
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort_field = field;
        self.sort_direction = direction;
        self.page = 1;
    }

    /// Stores the requested page (1-based); `derive` clamps it against the
    /// filtered count.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// The UI-facing projection of the record list for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPage {
    pub rows: Vec<Employee>,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// The page actually shown after clamping into `[1, total_pages]`.
    pub page: usize,
}

pub fn derive(records: &[Employee], state: &ViewState) -> CollectionPage {
    let mut filtered: Vec<&Employee> = records
        .iter()
        .filter(|record| matches_search(record, &state.search))
        .collect();

    // Stable sort keeps ties in filtered order for both directions; the
    // direction flips the comparator sign only.
    filtered.sort_by(|a, b| {
        let ordering = compare_field(a, b, state.sort_field);
        match state.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(PAGE_SIZE).max(1);
    let page = state.page.clamp(1, total_pages);

    let start = (page - 1) * PAGE_SIZE;
    let rows = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    CollectionPage {
        rows,
        total_filtered,
        total_pages,
        page,
    }
}

fn matches_search(record: &Employee, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [
        &record.first_name,
        &record.last_name,
        &record.email,
        &record.department,
        &record.role,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn compare_field(a: &Employee, b: &Employee, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.0.cmp(&b.id.0),
        SortField::FirstName => cmp_text(&a.first_name, &b.first_name),
        SortField::LastName => cmp_text(&a.last_name, &b.last_name),
        SortField::Email => cmp_text(&a.email, &b.email),
        SortField::Department => cmp_text(&a.department, &b.department),
        SortField::Role => cmp_text(&a.role, &b.role),
        SortField::Salary => a.salary.total_cmp(&b.salary),
        SortField::DateOfJoining => a.date_of_joining.cmp(&b.date_of_joining),
        // Absent birth dates coerce low (empty-string semantics), in both
        // directions, rather than being forced to one end.
        SortField::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
        SortField::Status => status_rank(a.status).cmp(&status_rank(b.status)),
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn status_rank(status: EmployeeStatus) -> u8 {
    match status {
        EmployeeStatus::Active => 0,
        EmployeeStatus::Inactive => 1,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::domain::{EmployeeId, EmployeeStatus};

    use super::*;

    fn employee(id: i64, first: &str, last: &str, department: &str) -> Employee {
        Employee {
            id: EmployeeId(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            salary: 50_000.0 + id as f64,
            department: department.to_string(),
            role: "Engineer".to_string(),
            date_of_joining: NaiveDate::from_ymd_opt(2024, 1, (id % 28 + 1) as u32)
                .expect("valid date"),
            date_of_birth: None,
            status: EmployeeStatus::Active,
        }
    }

    fn roster(count: i64) -> Vec<Employee> {
        (1..=count)
            .map(|id| employee(id, &format!("First{id}"), &format!("Last{id}"), "Eng"))
            .collect()
    }

    #[test]
    fn empty_search_is_a_no_op_filter() {
        let records = roster(7);
        let page = derive(&records, &ViewState::default());
        assert_eq!(page.total_filtered, 7);
        assert_eq!(page.rows.len(), 7);
    }

    #[test]
    fn search_matches_any_searchable_field_case_insensitively() {
        let records = vec![
            employee(1, "Ada", "Lovelace", "Research"),
            employee(2, "Grace", "Hopper", "Navy"),
            employee(3, "Alan", "Turing", "research"),
        ];
        let mut state = ViewState::default();
        state.set_search("RESEARCH");

        let page = derive(&records, &state);
        assert_eq!(page.total_filtered, 2);
        for row in &page.rows {
            assert!(row.department.to_lowercase().contains("research"));
        }

        // Excluded records contain the term in none of the fields.
        state.set_search("hopper");
        let page = derive(&records, &state);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].id, EmployeeId(2));
    }

    #[test]
    fn sorting_is_idempotent() {
        let records = vec![
            employee(3, "carol", "Zeta", "Eng"),
            employee(1, "Bob", "alpha", "Eng"),
            employee(2, "Alice", "Midway", "Eng"),
        ];
        let mut state = ViewState::default();
        state.set_sort(SortField::FirstName, SortDirection::Ascending);

        let first = derive(&records, &state);
        let second = derive(&records, &state);
        assert_eq!(first, second);

        let ids: Vec<i64> = first.rows.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn toggling_active_field_reverses_order_exactly() {
        let records = roster(5);
        let mut state = ViewState::default();
        state.toggle_sort(SortField::Salary);
        assert_eq!(state.sort_direction, SortDirection::Ascending);

        let ascending: Vec<i64> = derive(&records, &state).rows.iter().map(|r| r.id.0).collect();

        state.toggle_sort(SortField::Salary);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        let descending: Vec<i64> =
            derive(&records, &state).rows.iter().map(|r| r.id.0).collect();

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn selecting_new_field_resets_to_ascending_and_page_one() {
        let mut state = ViewState::default();
        state.toggle_sort(SortField::Email);
        state.toggle_sort(SortField::Email);
        assert_eq!(state.sort_direction, SortDirection::Descending);

        state.set_page(3);
        state.toggle_sort(SortField::LastName);
        assert_eq!(state.sort_field, SortField::LastName);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn search_change_resets_page() {
        let mut state = ViewState::default();
        state.set_page(4);
        state.set_search("a");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn absent_birth_dates_sort_low_in_both_directions() {
        let mut with_dob = employee(1, "Ada", "Lovelace", "Eng");
        with_dob.date_of_birth = NaiveDate::from_ymd_opt(1990, 6, 1);
        let without_dob = employee(2, "Grace", "Hopper", "Eng");
        let records = vec![with_dob, without_dob];

        let mut state = ViewState::default();
        state.set_sort(SortField::DateOfBirth, SortDirection::Ascending);
        let page = derive(&records, &state);
        assert_eq!(page.rows[0].id, EmployeeId(2));

        state.set_sort(SortField::DateOfBirth, SortDirection::Descending);
        let page = derive(&records, &state);
        assert_eq!(page.rows[0].id, EmployeeId(1));
    }

    #[test]
    fn total_pages_is_at_least_one_even_when_empty() {
        let mut state = ViewState::default();
        state.set_search("matches nothing");
        let page = derive(&roster(3), &state);
        assert_eq!(page.total_filtered, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn twelve_records_paginate_ten_then_two() {
        let records = roster(12);
        let mut state = ViewState::default();

        let page = derive(&records, &state);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 1);

        state.set_page(2);
        let page = derive(&records, &state);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn out_of_range_page_clamps_to_last_page() {
        let records = roster(12);
        let mut state = ViewState::default();
        state.set_page(99);
        let page = derive(&records, &state);
        assert_eq!(page.page, 2);
        assert_eq!(page.rows.len(), 2);
    }

    #[test]
    fn ties_preserve_filtered_order() {
        // Same department for everyone: sorting by it must keep input order.
        let records = vec![
            employee(5, "Eve", "E", "Eng"),
            employee(2, "Bob", "B", "Eng"),
            employee(9, "Ada", "A", "Eng"),
        ];
        let mut state = ViewState::default();
        state.set_sort(SortField::Department, SortDirection::Descending);
        let ids: Vec<i64> = derive(&records, &state).rows.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }
}
