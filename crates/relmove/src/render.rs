//! Plain-text rendering of selections, plans and folder lists

use crate::messages::Messages;
use relmove_batch::{MovePlan, SelectionState};

fn check_mark(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Numbered selection table, as shown before every prompt
pub fn render_selection(state: &SelectionState, target_folder: &str, messages: &Messages) -> String {
    let mut lines = vec![messages.title.to_string()];
    if let Some(seed) = state.file_infos().first() {
        lines.push(messages.description_line(&seed.file, target_folder));
    }
    lines.push(format!(
        "{}: {}  {}: {}",
        messages.related_select,
        messages.switch(state.related_select()),
        messages.cascade,
        messages.switch(state.cascade())
    ));
    lines.push(format!("     {}  ({})", messages.file_name, messages.reference_info));

    lines.extend(state.file_infos().iter().enumerate().map(|(index, info)| {
        format!(
            "{:>3} {} {}  ({})",
            index + 1,
            check_mark(state.is_selected(&info.file)),
            info.file,
            messages.reference_label(info.reference_info())
        )
    }));

    lines.push(messages.stats_line(state.summary()));
    lines.push(messages.help.to_string());
    terminate(lines)
}

/// Dry-run listing; `[x]` marks the initial selection
pub fn render_plan(plan: &MovePlan, messages: &Messages) -> String {
    let mut lines = Vec::with_capacity(plan.moves.len() + 1);
    if let Some(seed) = plan.moves.first() {
        lines.push(messages.plan_line(&seed.file, &plan.target_folder));
    }

    for planned in &plan.moves {
        let mut line = format!(
            "  {} {} -> {}  ({})",
            check_mark(planned.selected),
            planned.file,
            planned.destination,
            messages.reference_label(planned.reference)
        );
        if planned.destination_exists {
            line.push_str(&format!(" [{}]", messages.destination_exists));
        }
        lines.push(line);
    }
    terminate(lines)
}

/// Join lines, each ending in a newline
fn terminate(lines: Vec<String>) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One folder per line
pub fn render_folders(folders: &[String], messages: &Messages) -> String {
    if folders.is_empty() {
        return format!("{}\n", messages.no_folders);
    }
    terminate(folders.to_vec())
}
