/// Progress line formatting
use audic_core::PlaybackState;

/// Format seconds as `m:ss`, or `h:mm:ss` past one hour
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// One-line status, e.g. `1:05 / 3:20`
pub fn progress_line(state: &PlaybackState) -> String {
    match state.duration {
        Some(duration) if duration > 0 => format!(
            "{} / {}",
            format_time(state.current_time),
            format_time(duration)
        ),
        _ => format_time(state.current_time),
    }
}
