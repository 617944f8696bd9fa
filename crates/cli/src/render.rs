//! Plain-text rendering of directory tables and dashboard state

use std::fmt::Write;

use doctorfinder_core::{Dashboard, DirectoryPage, NavLinks};
use doctorfinder_domain::{Doctor, SessionState, User};

const DOCTOR_HEADERS: [&str; 5] = ["Name", "Specialty", "Services", "Location", "Availability"];
const USER_HEADERS: [&str; 2] = ["Name", "Email"];

fn table(title: &str, headers: &[&str], rows: &[Vec<String>], placeholder: Option<&str>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let header: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    let _ = writeln!(out, "{}", line(&header));
    match placeholder {
        Some(placeholder) => {
            let _ = writeln!(out, "{}", placeholder);
        }
        None => {
            for row in rows {
                let _ = writeln!(out, "{}", line(row));
            }
        }
    }
    out
}

fn doctor_row(doctor: &Doctor) -> Vec<String> {
    vec![
        doctor.name.clone(),
        doctor.specialty.clone(),
        doctor.services.clone(),
        doctor.location.clone(),
        doctor.availability.clone(),
    ]
}

fn user_row(user: &User) -> Vec<String> {
    vec![user.name.clone(), user.email.clone()]
}

/// Both directory tables, with the empty-table placeholder rows.
pub fn directory(page: &DirectoryPage) -> String {
    let doctors: Vec<Vec<String>> = page.doctors.iter().map(doctor_row).collect();
    let users: Vec<Vec<String>> = page.users.iter().map(user_row).collect();

    let mut out = table("Doctors", &DOCTOR_HEADERS, &doctors, page.doctors_placeholder());
    out.push('\n');
    out.push_str(&table("Users", &USER_HEADERS, &users, page.users_placeholder()));
    out
}

pub fn doctor(doctor: &Doctor) -> String {
    format!("Added doctor {} (id {}): {}", doctor.name, doctor.id, doctor.specialty)
}

pub fn user(user: &User) -> String {
    format!("Added user {} (id {}): {}", user.name, user.id, user.email)
}

/// Session summary with the navigation links a signed-in or signed-out
/// visitor would see.
pub fn session(state: &SessionState) -> String {
    let links = NavLinks::for_state(state).labels().join(" | ");
    match &state.identity {
        Some(identity) => format!("Signed in as {} ({})\n{}", identity.email, identity.uid, links),
        None if state.loading => links,
        None => format!("Not signed in\n{}", links),
    }
}

pub fn dashboard(view: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome, {}", view.display_name);

    let _ = writeln!(out, "Symptoms:");
    if view.symptoms.is_empty() {
        let _ = writeln!(out, "  (none selected)");
    }
    for symptom in view.symptoms.iter() {
        let _ = writeln!(out, "  - {} [{}]", symptom.label(), symptom);
    }

    if view.address.is_complete() {
        let _ = writeln!(out, "Address: {}", view.address);
    } else {
        let _ = writeln!(out, "Address: (not set)");
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use doctorfinder_domain::{Address, Identity, Symptom};

    use super::*;

    fn sample_doctor() -> Doctor {
        Doctor {
            id: 7,
            name: "Dr. Gregory House".into(),
            email: "house@example.com".into(),
            specialty: "Diagnostics".into(),
            services: "Everything".into(),
            location: "Princeton".into(),
            availability: "Weekdays".into(),
            created_at: Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_directory_shows_placeholders() {
        let rendered = directory(&DirectoryPage::default());

        assert!(rendered.contains("No doctors found"));
        assert!(rendered.contains("No users found"));
    }

    #[test]
    fn directory_rows_are_column_aligned() {
        let page = DirectoryPage { doctors: vec![sample_doctor()], ..DirectoryPage::default() };

        let rendered = directory(&page);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Doctors");
        assert!(lines[1].starts_with(&format!("{:<17}  Specialty", "Name")));
        assert!(lines[2].starts_with("Dr. Gregory House  Diagnostics"));
    }

    #[test]
    fn session_lists_links_for_each_state() {
        assert_eq!(session(&SessionState::initial()), "Loading...");
        assert_eq!(session(&SessionState::resolved(None)), "Not signed in\nLog In | Sign Up");

        let signed_in = SessionState::resolved(Some(Identity::new("uid-1", "jane@example.com")));
        assert_eq!(session(&signed_in), "Signed in as jane@example.com (uid-1)\nDashboard | Log Out");
    }

    #[test]
    fn dashboard_lists_labels_and_address() {
        let view = Dashboard {
            display_name: "Jane Doe".into(),
            symptoms: [Symptom::SoreThroat].into_iter().collect(),
            address: Address {
                street: "1 Main St".into(),
                city: "Springfield".into(),
                state: "IL".into(),
                zip_code: "62701".into(),
            },
            ..Dashboard::default()
        };

        let rendered = dashboard(&view);

        assert!(rendered.starts_with("Welcome, Jane Doe\n"));
        assert!(rendered.contains("  - Sore Throat [sore-throat]"));
        assert!(rendered.contains("Address: 1 Main St, Springfield, IL 62701"));
    }

    #[test]
    fn dashboard_without_profile_data() {
        let rendered = dashboard(&Dashboard::default());

        assert!(rendered.contains("(none selected)"));
        assert!(rendered.contains("Address: (not set)"));
    }
}
