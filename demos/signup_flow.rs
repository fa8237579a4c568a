//! Signup Flow Example
//!
//! Walks through a signup form session against the real GitHub API:
//! - field validation on change and on blur
//! - error state updated after every interaction
//! - whole-form validation on submit
//!
//! Run with `cargo run --example signup_flow -- <username>`.
//! Set `RUST_LOG=signup_validation=debug` to see every lookup.

use signup_validation::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_errors(store: &SignupStore) {
    for field in Field::ALL {
        let message = store.state().errors.message(field);
        if message.is_empty() {
            println!("  {:<16} ok", field);
        } else {
            println!("  {:<16} {}", field, message);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = std::env::args().nth(1).unwrap_or_else(|| "torvalds".to_string());

    let config = ValidationConfig::default();
    let engine = FormValidation::signup(&config, GitHubDirectory::new(&config.directory)?);
    let mut store = SignupStore::new();

    println!("=== Typing into the form ===");
    store
        .interact(&engine, Field::Username, username.as_str(), Trigger::Change)
        .await;
    store
        .interact(&engine, Field::Username, username.as_str(), Trigger::Blur)
        .await;
    store
        .interact(&engine, Field::Password, "abc", Trigger::Change)
        .await;
    store
        .interact(&engine, Field::ConfirmPassword, "abd", Trigger::Change)
        .await;
    print_errors(&store);

    println!("\n=== Fixing the passwords ===");
    store
        .interact(&engine, Field::Password, "abcd", Trigger::Change)
        .await;
    store
        .interact(&engine, Field::ConfirmPassword, "abcd", Trigger::Change)
        .await;
    print_errors(&store);

    println!("\n=== Submitting ===");
    match store.submit(&engine).await {
        Submission::Accepted(view_model) => {
            println!("  signup accepted for {}", view_model.username);
        }
        Submission::Rejected(form) => {
            for (field, outcome) in form.failures() {
                println!("  {:<16} [{}] {}", field, outcome.kind(), outcome.message());
            }
        }
    }

    Ok(())
}
