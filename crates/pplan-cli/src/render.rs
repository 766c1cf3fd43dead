//! Text rendering of tracker state and events.

use pplan_core::{Event, ProgressPhase, ProgressTracker, UiConfig};

pub const TITLE: &str = "🎯 P's Plan: a minimal daily plan. Collect J points and level up!";

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// The status board: level, points, progress to next level, and checklist.
pub fn status_board(tracker: &ProgressTracker, ui: &UiConfig) -> String {
    let state = tracker.state();
    let mut lines = vec![format!("🌟 Lv. {}   💎 {} P", state.level(), state.points())];

    let remaining = format!("{} P to next level", tracker.points_to_next_level());
    if ui.show_progress_bar {
        let width = usize::try_from(ui.progress_bar_width).unwrap_or(usize::MAX);
        lines.push(format!(
            "{} {remaining}",
            progress_bar(tracker.level_progress(), width)
        ));
    } else {
        lines.push(remaining);
    }

    lines.push(format!(
        "📝 Today's minimum plan ({}/{})",
        state.completed_count(),
        state.tasks().len()
    ));
    for (i, task) in state.tasks().iter().enumerate() {
        let mark = if task.completed() { "x" } else { " " };
        lines.push(format!(
            "  {}. [{mark}] {} (+{} P)",
            i + 1,
            task.name(),
            task.reward()
        ));
    }

    if tracker.phase() == ProgressPhase::CompletedAwarded {
        lines.push("You've completed today's plan. Start a new plan tomorrow!".to_string());
    }
    lines.join("\n")
}

/// One-line message for events worth announcing; toggles only show on the board.
pub fn event_message(event: &Event, ui: &UiConfig) -> Option<String> {
    match event {
        Event::PointsAwarded { points_gained, .. } => Some(if ui.celebrate {
            format!("🎉 All tasks done! Great job! +{points_gained} P")
        } else {
            format!("All tasks done. +{points_gained} P")
        }),
        Event::LeveledUp { level, .. } => Some(format!("✨ Level up! You are now Lv. {level}!")),
        Event::DayReset { .. } => {
            Some("🔄 A new day has started. Take on today's plan!".to_string())
        }
        Event::TaskToggled { .. } | Event::StateSnapshot { .. } => None,
    }
}
