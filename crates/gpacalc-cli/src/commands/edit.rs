//! Commands that edit the record.

use anyhow::Result;

use gpacalc_core::model::CourseField;
use gpacalc_core::store::StateStore;
use gpacalc_storage::GpacalcConfig;

use super::render::print_record;
use super::{resolve_course, resolve_semester, ChangeTracker, Context};

pub fn add_semester(ctx: &Context) -> Result<()> {
    let (config, mut store, tracker) = ctx.open()?;
    store.add_semester();
    finish(ctx, &config, &store, &tracker)
}

pub fn add_course(
    ctx: &Context,
    semester_key: &str,
    name: Option<String>,
    credit: Option<String>,
    grade: Option<String>,
) -> Result<()> {
    let (config, mut store, tracker) = ctx.open()?;
    let Some(semester_id) = resolve_semester(store.record(), semester_key) else {
        eprintln!("No semester matching '{semester_key}'; nothing changed.");
        return Ok(());
    };
    let Some(course_id) = store.add_course(&semester_id) else {
        return finish(ctx, &config, &store, &tracker);
    };

    let fields = [
        (CourseField::Name, name),
        (CourseField::Credit, credit),
        (CourseField::Grade, grade),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            store.update_course_field(&semester_id, &course_id, field, &value);
        }
    }

    finish(ctx, &config, &store, &tracker)
}

pub fn update_course(
    ctx: &Context,
    semester_key: &str,
    course_key: &str,
    field: &str,
    value: &str,
) -> Result<()> {
    let field = field.parse::<CourseField>().map_err(anyhow::Error::msg)?;
    let (config, mut store, tracker) = ctx.open()?;
    let Some((semester_id, course_id)) = resolve_pair(&store, semester_key, course_key) else {
        return Ok(());
    };

    store.update_course_field(&semester_id, &course_id, field, value);
    finish(ctx, &config, &store, &tracker)
}

pub fn delete_course(ctx: &Context, semester_key: &str, course_key: &str) -> Result<()> {
    let (config, mut store, tracker) = ctx.open()?;
    let Some((semester_id, course_id)) = resolve_pair(&store, semester_key, course_key) else {
        return Ok(());
    };

    store.delete_course(&semester_id, &course_id);
    finish(ctx, &config, &store, &tracker)
}

pub fn delete_semester(ctx: &Context, semester_key: &str) -> Result<()> {
    let (config, mut store, tracker) = ctx.open()?;
    let Some(semester_id) = resolve_semester(store.record(), semester_key) else {
        eprintln!("No semester matching '{semester_key}'; nothing changed.");
        return Ok(());
    };

    if !store.delete_semester(&semester_id) {
        eprintln!("Cannot delete the only remaining semester.");
    }
    finish(ctx, &config, &store, &tracker)
}

pub fn clear(ctx: &Context, confirmed: bool) -> Result<()> {
    anyhow::ensure!(
        confirmed,
        "clearing erases every semester and course and cannot be undone; re-run with --yes"
    );
    let (_config, mut store, _tracker) = ctx.open()?;
    store.clear_all();
    eprintln!("All data has been cleared.");
    print_record(store.record(), &ctx.format)
}

fn resolve_pair(store: &StateStore, semester_key: &str, course_key: &str) -> Option<(String, String)> {
    let Some(semester_id) = resolve_semester(store.record(), semester_key) else {
        eprintln!("No semester matching '{semester_key}'; nothing changed.");
        return None;
    };
    let Some(course_id) = resolve_course(store.record(), &semester_id, course_key) else {
        eprintln!("No course matching '{course_key}' in that semester; nothing changed.");
        return None;
    };
    Some((semester_id, course_id))
}

fn finish(
    ctx: &Context,
    config: &GpacalcConfig,
    store: &StateStore,
    tracker: &ChangeTracker,
) -> Result<()> {
    if tracker.changed() {
        eprintln!("Saved to: {}", config.data_file.display());
    } else {
        eprintln!("Nothing changed.");
    }
    print_record(store.record(), &ctx.format)
}
