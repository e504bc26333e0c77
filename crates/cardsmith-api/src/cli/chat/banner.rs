//! Welcome banner display for chat sessions.

use console::style;

/// Print the banner at the start of a chat session.
///
/// Shows the assistant's greeting, the provider/model pair that will design
/// the card, and the short session ID.
pub fn print_welcome_banner(greeting: &str, provider: &str, model: &str, session_id: &str) {
    println!();
    println!("  {} {}", style("*").cyan().bold(), style("Cardsmith").cyan().bold());
    println!("  {}", style(greeting).green().bold());
    println!();
    println!("  {}  {} / {}", style("Model:").bold(), style(provider).dim(), style(model).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Paste image URLs any time; type 'done' to start the design").dim()
    );
    println!("  {}", style("---").dim());
}
