use std::fmt::Write;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use frontdesk::model::{Guest, GuestlistStatus, Member, MembershipStatus};
use unicode_width::UnicodeWidthStr;

use crate::workflow::Report;

const COLUMN_GAP: &str = "  ";

/// Print a plain-text representation of the report.
pub(crate) fn print_plain(report: &Report) {
	print!("{}", format_plain(report));
}

/// Print the JSON representation of the report.
pub(crate) fn print_json(report: &Report) -> Result<()> {
	println!("{}", format_json(report)?);
	Ok(())
}

pub(crate) fn format_json(report: &Report) -> Result<String> {
	Ok(serde_json::to_string_pretty(report)?)
}

pub(crate) fn format_plain(report: &Report) -> String {
	match report {
		Report::Workspace {
			venue,
			role,
			workspace,
		} => format!("{venue}: {workspace} workspace (signed in as {})\n", role.as_str()),
		Report::Suggestions {
			query,
			members,
			notices,
		} => {
			let mut out = String::new();
			for notice in notices {
				let _ = writeln!(out, "! {notice}");
			}
			if members.is_empty() {
				let _ = writeln!(out, "No suggestions for '{query}'");
			} else {
				out.push_str(&member_table(members));
			}
			out
		}
		Report::Members { members } if members.is_empty() => "No members found\n".to_string(),
		Report::Members { members } => member_table(members),
		Report::Registered { member, guest } => {
			let mut out = format!("Registered {} ({})\n", member.full_name(), member.id);
			if let Some(guest) = guest {
				let _ = writeln!(
					out,
					"Added to guestlist {} as guest {}",
					guest.guestlist_id, guest.id
				);
			}
			out
		}
		Report::MemberUpdated { member } => format!(
			"Updated {} ({}, {})\n",
			member.full_name(),
			member.id,
			status_word(member.membership_status)
		),
		Report::CheckedIn { member, check_in } => format!(
			"Checked in {} at {} (check-in {})\n",
			member.full_name(),
			clock(check_in.check_in_time),
			check_in.id
		),
		Report::CheckedOut { check_in } => format!(
			"Checked out {} at {}\n",
			check_in.id,
			check_in
				.check_out_time
				.map(clock)
				.unwrap_or_else(|| "-".to_string())
		),
		Report::Guest { guest } => format!(
			"{} is {} ({})\n",
			guest.full_name(),
			if guest.checked_in {
				"checked in"
			} else {
				"not checked in"
			},
			guest.id
		),
		Report::Occupancy { venue, count } => format!("{venue}: {count} in venue\n"),
		Report::CheckIns { check_ins } if check_ins.is_empty() => {
			"No check-ins today\n".to_string()
		}
		Report::CheckIns { check_ins } => render_table(
			&["TIME", "NAME", "MEMBER", "ID"],
			check_ins
				.iter()
				.map(|entry| {
					vec![
						clock(entry.check_in_time),
						format!("{} {}", entry.first_name, entry.last_name),
						entry.member_id.clone(),
						entry.id.clone(),
					]
				})
				.collect(),
		),
		Report::Guestlists { guestlists } if guestlists.is_empty() => {
			"No guestlists\n".to_string()
		}
		Report::Guestlists { guestlists } => render_table(
			&["DATE", "NAME", "STATUS", "ID"],
			guestlists
				.iter()
				.map(|list| {
					vec![
						list.date.to_string(),
						list.name.clone(),
						guestlist_status_word(list.status).to_string(),
						list.id.clone(),
					]
				})
				.collect(),
		),
		Report::Guestlist { guestlist, guests } => {
			let mut out = format!("{} ({})\n", guestlist.name, guestlist.date);
			if let Some(notes) = &guestlist.notes {
				let _ = writeln!(out, "{notes}");
			}
			if guests.is_empty() {
				out.push_str("No guests\n");
			} else {
				out.push_str(&guest_table(guests));
			}
			out
		}
	}
}

fn member_table(members: &[Member]) -> String {
	render_table(
		&["NAME", "EMAIL", "PHONE", "LAST VISIT", "ID"],
		members
			.iter()
			.map(|member| {
				vec![
					member.full_name(),
					member.email.clone(),
					member.phone.clone(),
					member
						.last_visit
						.map(|at| at.with_timezone(&Local).format("%Y-%m-%d").to_string())
						.unwrap_or_else(|| "never".to_string()),
					member.id.clone(),
				]
			})
			.collect(),
	)
}

fn guest_table(guests: &[Guest]) -> String {
	render_table(
		&["NAME", "IN", "MEMBER", "ID"],
		guests
			.iter()
			.map(|guest| {
				vec![
					guest.full_name(),
					if guest.checked_in { "yes" } else { "no" }.to_string(),
					guest.member_id.clone().unwrap_or_else(|| "-".to_string()),
					guest.id.clone(),
				]
			})
			.collect(),
	)
}

/// Left-aligned columns sized by display width, so names with wide or
/// combining characters still line up.
fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
	let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
	for row in &rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.width());
		}
	}

	let mut out = String::new();
	let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
	for row in std::iter::once(&header_cells).chain(&rows) {
		let last = row.len().saturating_sub(1);
		let mut line = String::new();
		for (index, (cell, width)) in row.iter().zip(&widths).enumerate() {
			line.push_str(cell);
			if index < last {
				line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
				line.push_str(COLUMN_GAP);
			}
		}
		let _ = writeln!(out, "{}", line.trim_end());
	}
	out
}

fn clock(at: DateTime<Utc>) -> String {
	at.with_timezone(&Local).format("%H:%M").to_string()
}

fn status_word(status: MembershipStatus) -> &'static str {
	match status {
		MembershipStatus::Active => "active",
		MembershipStatus::Inactive => "inactive",
	}
}

fn guestlist_status_word(status: GuestlistStatus) -> &'static str {
	match status {
		GuestlistStatus::Active => "active",
		GuestlistStatus::Completed => "completed",
		GuestlistStatus::Cancelled => "cancelled",
	}
}
