use std::io::Write;

use anyhow::{bail, Result};
use roster_core::prelude::*;
use tracing::info;

use crate::cli::Command;

pub fn run(roster: &mut Roster, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Add { id, name, age, course } => {
            roster.add(StudentRecord::new(id.clone(), name, age, course))?;
            info!(id = %id, "Student added");
            writeln!(out, "Added student {}", id)?;
        }
        Command::Update { id, name, age, course } => {
            let update = RecordUpdate { name, age, course };
            if update.is_empty() {
                bail!("nothing to update: pass --name, --age or --course");
            }
            if roster.update(&id, update)? {
                writeln!(out, "Updated student {}", id)?;
            } else {
                writeln!(out, "No student with id {}", id)?;
            }
        }
        Command::Delete { id } => match roster.delete(&id)? {
            0 => writeln!(out, "No student with id {}", id)?,
            removed => writeln!(out, "Deleted {} record(s) with id {}", removed, id)?,
        },
        Command::List { search, course } => {
            let view = roster.view(&search, &CourseFilter::from(course));
            print_table(&view.rows, out)?;
        }
        Command::Courses => {
            for course in roster.store().distinct_courses() {
                writeln!(out, "{}", course)?;
            }
        }
    }
    Ok(())
}

const HEADERS: [&str; 4] = ["ID", "Name", "Age", "Course"];

fn print_table(rows: &[StudentRecord], out: &mut impl Write) -> Result<()> {
    let cells: Vec<[&str; 4]> = rows
        .iter()
        .map(|r| [r.id.as_str(), r.name.as_str(), r.age.as_str(), r.course.as_str()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&HEADERS, &widths, out)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    for row in &cells {
        write_row(row, &widths, out)?;
    }
    Ok(())
}

fn write_row(row: &[&str; 4], widths: &[usize; 4], out: &mut impl Write) -> Result<()> {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn roster() -> (Roster, Arc<MemorySerializer>) {
        let serializer = Arc::new(MemorySerializer::with_records(vec![
            StudentRecord::new("1", "Amy", "20", "Math"),
            StudentRecord::new("2", "Bo", "21", "CS"),
        ]));
        (Roster::with_serializer(Arc::clone(&serializer)).unwrap(), serializer)
    }

    fn run_to_string(roster: &mut Roster, command: Command) -> String {
        let mut out = Vec::new();
        run(roster, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_prints_filtered_table() {
        let (mut roster, _) = roster();
        let text = run_to_string(
            &mut roster,
            Command::List { search: String::new(), course: "CS".into() },
        );
        assert_eq!(text, "ID  Name  Age  Course\n--  ----  ---  ------\n2   Bo    21   CS\n");
    }

    #[test]
    fn add_then_courses() {
        let (mut roster, saved) = roster();
        run_to_string(
            &mut roster,
            Command::Add {
                id: "3".into(),
                name: "Cy".into(),
                age: "22".into(),
                course: "Art".into(),
            },
        );
        assert_eq!(saved.saved().unwrap().len(), 3);

        let text = run_to_string(&mut roster, Command::Courses);
        assert_eq!(text, "All\nArt\nCS\nMath\n");
    }

    #[test]
    fn add_with_empty_field_fails() {
        let (mut roster, _) = roster();
        let err = run(
            &mut roster,
            Command::Add {
                id: "3".into(),
                name: String::new(),
                age: "22".into(),
                course: "Art".into(),
            },
            &mut Vec::new(),
        )
        .unwrap_err();
        let err = err.downcast::<roster_core::Error>().unwrap();
        assert!(err.is_user_error());
        assert_eq!(roster.store().len(), 2);
    }

    #[test]
    fn update_and_delete_report_misses() {
        let (mut roster, _) = roster();
        let text = run_to_string(
            &mut roster,
            Command::Update { id: "9".into(), name: Some("X".into()), age: None, course: None },
        );
        assert_eq!(text, "No student with id 9\n");

        let text = run_to_string(&mut roster, Command::Delete { id: "1".into() });
        assert_eq!(text, "Deleted 1 record(s) with id 1\n");

        let empty = Command::Update { id: "2".into(), name: None, age: None, course: None };
        assert!(run(&mut roster, empty, &mut Vec::new()).is_err());
    }
}
