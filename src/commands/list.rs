//! List the doors of the calendar

use anyhow::Result;

use crate::calendar::{self, Clock, Day};
use crate::Advent;

/// State of one day as seen from today
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStatus {
    pub day: Day,
    pub open: bool,
    /// Title when the source file loads, the error message when it does not
    pub content: Option<Result<String, String>>,
}

/// Collect the status of every day
pub fn collect(advent: &Advent, today: Option<u32>) -> Result<Vec<DayStatus>> {
    let current_day = advent.clock(today)?.current_day();
    let bypass = advent.config.bypass_lock();
    let loader = advent.loader();
    let present = loader.scan();

    Ok(Day::all()
        .map(|day| DayStatus {
            day,
            open: calendar::validate(i64::from(day.get()), current_day, bypass),
            content: present.contains(&day).then(|| {
                loader
                    .load(day)
                    .map(|payload| payload.title)
                    .map_err(|e| e.to_string())
            }),
        })
        .collect())
}

/// Print the calendar
pub fn run(advent: &Advent, today: Option<u32>) -> Result<()> {
    let statuses = collect(advent, today)?;
    let written = statuses.iter().filter(|s| s.content.is_some()).count();

    println!("Days ({} of {} written):", written, statuses.len());
    for status in statuses {
        let state = if status.open { "open  " } else { "locked" };
        match status.content {
            Some(Ok(title)) => println!("  {:>2} [{}] {}", status.day, state, title),
            Some(Err(e)) => println!("  {:>2} [{}] (broken: {})", status.day, state, e),
            None => println!("  {:>2} [{}] (missing)", status.day, state),
        }
    }

    Ok(())
}
