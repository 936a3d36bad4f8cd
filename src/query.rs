//! Query and filter recorded session events.

use std::path::Path;

use crate::events::{Event, EventLogger};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilters {
    pub event_type: Option<String>,
    pub week_range: Option<(u32, u32)>,
    pub warnings_only: bool,
}

/// Load events from a saved log and filter them
pub fn query_events(file: &Path, filters: &QueryFilters) -> std::io::Result<Vec<Event>> {
    let logger = EventLogger::load_from_file(file)?;
    Ok(filter_events(logger.get_events(), filters))
}

pub fn filter_events(events: &[Event], filters: &QueryFilters) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            if let Some(ref event_type) = filters.event_type {
                let wanted = event_type.to_lowercase().replace('-', "_");
                if !event.event_type.name().contains(&wanted) {
                    return false;
                }
            }

            if let Some((start, end)) = filters.week_range {
                if event.week < start || event.week > end {
                    return false;
                }
            }

            !filters.warnings_only || event.event_type.is_warning()
        })
        .cloned()
        .collect()
}

/// Format query results for display
pub fn format_query_results(events: &[Event], verbose: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("Found {} events\n", events.len()));

    for event in events {
        if verbose {
            output.push_str(&format!(
                "{} {} {}\n",
                event.timestamp.format("%H:%M:%S%.3f"),
                event.event_type.name(),
                event
            ));
        } else {
            output.push_str(&format!("{}\n", event));
        }
    }

    output
}
