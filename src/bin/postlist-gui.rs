#![cfg(feature = "gui")]
//! Desktop list view entrypoint.

fn main() {
    if let Err(err) = postlist::gui::run() {
        eprintln!("postlist gui failed: {}", err);
        std::process::exit(1);
    }
}
