//! Console rendering of records and the grading scale.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gpacalc_core::model::AcademicRecord;
use gpacalc_core::report::{self, format_credit, RecordSummary};
use gpacalc_core::scale::GRADE_SCALE;

/// Print a record snapshot in the requested format.
pub fn print_record(record: &AcademicRecord, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(record)?),
        "markdown" | "md" => print!("{}", report::to_markdown(record)),
        "text" => print!("{}", record_text(record)),
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown)"),
    }
    Ok(())
}

/// Print the grading scale in the requested format.
pub fn print_scale(format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&GRADE_SCALE)?),
        "markdown" | "md" => print!("{}", report::scale_to_markdown()),
        "text" => {
            let mut table = Table::new();
            table.set_header(vec!["Grade", "Grade Point", "Marks Range", "Performance"]);
            for option in &GRADE_SCALE {
                table.add_row(vec![
                    Cell::new(option.grade),
                    Cell::new(format!("{:.2}", option.point)),
                    Cell::new(format!("{}%", option.range_label)),
                    Cell::new(option.performance()),
                ]);
            }
            println!("{table}");
        }
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown)"),
    }
    Ok(())
}

fn record_text(record: &AcademicRecord) -> String {
    let summary = RecordSummary::from_record(record);
    let mut out = String::new();

    out.push_str(&format!(
        "CGPA {:.2} ({}) | Credits {} | Semesters {} | {}%\n",
        summary.cgpa,
        summary.standing,
        format_credit(summary.total_credits),
        summary.total_semesters,
        summary.percentage
    ));
    if let Some(message) = summary.progress_message() {
        out.push_str(message);
        out.push('\n');
    }

    for (index, semester) in record.semesters.iter().enumerate() {
        let count = semester.courses.len();
        out.push_str(&format!(
            "\n{}. {} [{}] - {} course{} • GPA {:.2}\n",
            index + 1,
            semester.name,
            semester.id,
            count,
            if count == 1 { "" } else { "s" },
            semester.gpa
        ));

        if semester.courses.is_empty() {
            out.push_str("   No courses yet.\n");
            continue;
        }

        let mut table = Table::new();
        table.set_header(vec!["#", "Id", "Course", "Credits", "Grade", "Points"]);
        for (position, course) in semester.courses.iter().enumerate() {
            table.add_row(vec![
                Cell::new(position + 1),
                Cell::new(&course.id),
                Cell::new(&course.name),
                Cell::new(format_credit(course.credit)),
                Cell::new(if course.grade.is_empty() { "-" } else { course.grade.as_str() }),
                Cell::new(format!("{:.2}", course.grade_point)),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    out
}
