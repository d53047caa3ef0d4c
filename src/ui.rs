// UI layer: provides a simple interactive menu using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::{BookClient, SearchMode};
use crate::store::CredentialStore;
use anyhow::Result;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};

/// A login interaction ends after this many failed attempts.
pub const MAX_LOGIN_ATTEMPTS: usize = 5;

/// Main interactive menu. Receives the credential store and the book
/// search client and runs a simple select loop until the user chooses
/// "Exit".
///
/// Note: `Select::interact()` is keyboard-driven: you can use arrow keys
/// and Enter to choose an option.
pub fn main_menu(mut store: CredentialStore, api: BookClient) -> Result<()> {
    loop {
        let items = vec!["Register", "Login", "Forgot password", "Exit"];
        // `Select` shows a keyboard-navigable list in the terminal.
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                // Registration flow collects fields and calls the store.
                handle_register(&mut store)?;
            }
            1 => {
                // A successful login flows straight into one book search.
                if handle_login(&store)? {
                    handle_book_search(&api)?;
                }
            }
            2 => {
                handle_forgot_password(&mut store)?;
            }
            3 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Collect registration fields and call `CredentialStore::register`.
/// Duplicate emails and policy failures come back as store errors and
/// are printed, never propagated.
fn handle_register(store: &mut CredentialStore) -> Result<()> {
    // `Input::interact_text()` prompts the user for input and returns it.
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    // `Password` hides input in the terminal.
    let password: String = Password::new()
        .with_prompt("Password (at least 8 characters with uppercase, lowercase, digit, and special character)")
        .interact()?;
    let question: String = Input::new()
        .with_prompt("Security question")
        .interact_text()?;
    let answer: String = Input::new()
        .with_prompt("Answer to your security question")
        .interact_text()?;

    match store.register(&email, &password, &question, &answer) {
        Ok(()) => println!("Registration successful!"),
        Err(e) => println!("Registration failed: {}", e),
    }
    Ok(())
}

/// Prompt for credentials and check them against the store, up to
/// [`MAX_LOGIN_ATTEMPTS`] times. Returns whether the login succeeded.
fn handle_login(store: &CredentialStore) -> Result<bool> {
    run_login_attempts(store, || {
        let email: String = Input::new().with_prompt("Email").interact_text()?;
        let password: String = Password::new().with_prompt("Password").interact()?;
        Ok((email, password))
    })
}

/// Drive the login attempt loop. Prompting is injected so the attempt
/// cap can be exercised without a terminal.
fn run_login_attempts<F>(store: &CredentialStore, mut prompt: F) -> Result<bool>
where
    F: FnMut() -> Result<(String, String)>,
{
    for attempt in 1..=MAX_LOGIN_ATTEMPTS {
        let (email, password) = prompt()?;
        if store.check_login(&email, &password) {
            println!("Login successful!");
            return Ok(true);
        }
        println!(
            "Invalid credentials. {} attempts left.",
            MAX_LOGIN_ATTEMPTS - attempt
        );
    }
    println!("Too many failed login attempts.");
    Ok(false)
}

/// Password recovery flow: surface the stored security question, check
/// the answer and take a new password. All failures are printed messages.
fn handle_forgot_password(store: &mut CredentialStore) -> Result<()> {
    let email: String = Input::new()
        .with_prompt("Registered email")
        .interact_text()?;
    // Look up the question first so unknown emails fail before any
    // further prompting.
    let Some(question) = store.security_question(&email).map(str::to_owned) else {
        println!("Email not found.");
        return Ok(());
    };

    println!("Security question: {}", question);
    let answer: String = Input::new().with_prompt("Answer").interact_text()?;
    let new_password: String = Password::new().with_prompt("New password").interact()?;

    match store.reset_password(&email, &answer, &new_password) {
        Ok(()) => println!("Password reset successful!"),
        Err(e) => println!("Password reset failed: {}", e),
    }
    Ok(())
}

/// Book search flow: collect a query and a mode, run the one network
/// call behind a spinner, and print up to five summarized records.
fn handle_book_search(api: &BookClient) -> Result<()> {
    let query: String = Input::new()
        .with_prompt("Book title/author/ISBN")
        .interact_text()?;
    let modes = vec!["Title", "Author", "ISBN"];
    let mode = match Select::new().items(&modes).default(0).interact()? {
        0 => SearchMode::Title,
        1 => SearchMode::Author,
        _ => SearchMode::Isbn,
    };

    // indicatif spinner while the blocking request runs.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Searching...");

    let result = api.search(&query, mode);
    spinner.finish_and_clear();

    match result {
        Ok(docs) if docs.is_empty() => println!("No books found."),
        Ok(docs) => {
            for doc in &docs {
                println!("Title: {}", doc.title());
                println!("Author(s): {}", doc.authors());
                println!("First Published: {}", doc.first_publish_year());
                println!("ISBN: {}", doc.isbn());
                println!("{}", "-".repeat(40));
            }
        }
        Err(e) => println!("Error fetching data from Open Library: {}", e),
    }
    Ok(())
}
