//! Human-readable rendering of a [`ReuseReport`].
//!
//! `render_lines` produces the plain report, one entry per output line; this is
//! what gets persisted. `style_lines` decorates section titles for a terminal.
use colored::*;

use crate::analyze::ReuseReport;

const SUMMARY_TITLE: &str = "-- Password Reuse Summary --";
const BLAST_RADIUS_TITLE: &str = "-- Blast Radius: # Additional Accounts That Can Be Compromised if a Single Account is Compromised --";
const SHARED_TITLE: &str = "-- List of Users and Their Shared Passwords --";
const NOTE_LINE: &str = "(Note: Analysis excludes disabled users and users with empty passwords)";

pub const EMPTY_INPUT_NOTICE: &str = "No credential records found in input";

pub fn render_lines(report: &ReuseReport) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(11 + report.shared_groups.len());
    out.push(SUMMARY_TITLE.to_string());
    out.push(NOTE_LINE.to_string());
    out.push(format!(
        "# Users with the exact SAME or SIMILAR password as another user: {} out of {}",
        report.users_with_reused_passwords, report.total_users
    ));
    out.push(format!(
        "% Users with the exact SAME or SIMILAR password as another user: {:.3}",
        report.reused_percentage
    ));
    out.push(format!(
        "{} password(s) are being used by these {} users",
        report.unique_reused_passwords, report.users_with_reused_passwords
    ));
    out.push(String::new());

    out.push(BLAST_RADIUS_TITLE.to_string());
    out.push(format!(
        "Worst case password reuse blast radius: {}",
        report.worst_case_blast_radius
    ));
    out.push(format!(
        "Average password reuse blast radius (equal to 0 when everyone has a unique, dissimilar password): {:.3}",
        report.average_blast_radius
    ));
    out.push(String::new());

    out.push(SHARED_TITLE.to_string());
    for group in &report.shared_groups {
        out.push(format!(
            "Password Hash: {} is used by users: {}",
            group.hash,
            group.users.join(", ")
        ));
    }
    out
}

/// Report emitted when the dump contained no usable records.
pub fn render_empty_lines() -> Vec<String> {
    vec![SUMMARY_TITLE.to_string(), EMPTY_INPUT_NOTICE.to_string()]
}

fn is_section_title(line: &str) -> bool {
    line.starts_with("-- ") && line.ends_with(" --")
}

pub fn style_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            if is_section_title(line) {
                line.bold().cyan().to_string()
            } else if line.starts_with("Password Hash: ") {
                line.yellow().to_string()
            } else {
                line.clone()
            }
        })
        .collect()
}
