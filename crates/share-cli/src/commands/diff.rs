//! Unified diff output for dry runs

use colored::Colorize;
use share_core::ConfigPreview;
use similar::TextDiff;

/// Render a preview as a unified diff, or `None` when nothing would change.
pub fn unified(preview: &ConfigPreview, path: &str) -> Option<String> {
    if preview.is_unchanged() {
        return None;
    }
    let diff = TextDiff::from_lines(&preview.before, &preview.after);
    Some(
        diff.unified_diff()
            .context_radius(3)
            .header(&format!("a/{}", path), &format!("b/{}", path))
            .to_string(),
    )
}

/// Print a dry-run preview with colored additions and removals.
pub fn print_preview(preview: &ConfigPreview, path: &str) {
    let Some(diff) = unified(preview, path) else {
        println!("{} No changes to {}", "OK".green().bold(), path);
        return;
    };

    println!("{} Would change {}:", "[dry-run]".yellow().bold(), path);
    println!();
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}
