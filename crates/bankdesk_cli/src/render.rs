//! Terminal table rendering for record lists.
//!
//! Column order mirrors the entry forms; employee and customer tables show
//! the branch name next to the raw branch id.

use bankdesk_core::{Branch, Contact, Customer, Employee};
use chrono::DateTime;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

const DATE_FORMAT: &str = "%Y-%m-%d";
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn branch_table(branches: &[Branch]) -> Table {
    let mut table = new_table(&["ID", "Name", "Address", "City", "State", "Postal Code"]);
    for branch in branches {
        table.add_row(vec![
            branch.id.to_string(),
            branch.name.clone(),
            branch.address.clone(),
            branch.city.clone(),
            branch.state.clone(),
            branch.postal_code.clone(),
        ]);
    }
    table
}

pub fn employee_table(employees: &[Employee]) -> Table {
    let mut table = new_table(&[
        "ID",
        "Name",
        "Date of Birth",
        "Phone",
        "Email",
        "Position",
        "Branch",
    ]);
    for employee in employees {
        table.add_row(vec![
            employee.id.to_string(),
            employee.name.clone(),
            employee.date_of_birth.format(DATE_FORMAT).to_string(),
            employee.phone.clone(),
            employee.email.clone(),
            employee.position.clone(),
            branch_label(employee.branch_id, employee.branch_name.as_deref()),
        ]);
    }
    table
}

pub fn customer_table(customers: &[Customer]) -> Table {
    let mut table = new_table(&[
        "ID",
        "Name",
        "Date of Birth",
        "Phone",
        "Email",
        "Address",
        "Branch",
    ]);
    for customer in customers {
        table.add_row(vec![
            customer.id.to_string(),
            customer.name.clone(),
            customer.date_of_birth.format(DATE_FORMAT).to_string(),
            customer.phone.clone(),
            customer.email.clone(),
            customer.address.clone(),
            branch_label(customer.branch_id, customer.branch_name.as_deref()),
        ]);
    }
    table
}

pub fn contact_table(contacts: &[Contact]) -> Table {
    let mut table = new_table(&[
        "ID", "Name", "Gender", "Phone", "Email", "Address", "Created",
    ]);
    for contact in contacts {
        table.add_row(vec![
            contact.id.to_string(),
            contact.name.clone(),
            optional_cell(contact.gender.as_deref()),
            optional_cell(contact.phone.as_deref()),
            optional_cell(contact.email.as_deref()),
            optional_cell(contact.address.as_deref()),
            created_label(contact.created_at),
        ]);
    }
    table
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn branch_label(id: i64, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{name} (#{id})"),
        None => format!("#{id}"),
    }
}

fn optional_cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn created_label(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format(CREATED_FORMAT).to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::{branch_label, branch_table, contact_table, created_label};
    use bankdesk_core::{Branch, Contact};

    #[test]
    fn branch_table_lists_every_row() {
        let rows = vec![Branch {
            id: 1,
            name: "Elm St".to_string(),
            address: "123 Elm".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62704".to_string(),
        }];
        let rendered = branch_table(&rows).to_string();
        assert!(rendered.contains("Postal Code"));
        assert!(rendered.contains("Springfield"));
    }

    #[test]
    fn contact_table_marks_missing_values() {
        let rows = vec![Contact {
            id: 3,
            name: "Ada Byron".to_string(),
            gender: None,
            phone: Some("555-0100".to_string()),
            email: None,
            address: None,
            created_at: 0,
        }];
        let rendered = contact_table(&rows).to_string();
        assert!(rendered.contains("555-0100"));
        assert!(rendered.contains("1970-01-01 00:00"));
    }

    #[test]
    fn labels_fall_back_to_raw_values() {
        assert_eq!(branch_label(4, Some("Maple")), "Maple (#4)");
        assert_eq!(branch_label(4, None), "#4");
        assert_eq!(created_label(i64::MAX), i64::MAX.to_string());
    }
}
