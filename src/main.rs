//! Command-line front end.
//!
//! A thin stand-in for the app's screens: each subcommand builds the
//! dependency container, drives one session operation, and prints the
//! observable state it settles into. No business logic lives here.

use std::env;
use std::process::ExitCode;

use taskdeck::config::Config;
use taskdeck::deps::Deps;
use taskdeck::session::{
    AssistantSession, AuthSession, OperationState, ProfileSession, TaskSession,
};
use taskdeck::types::Task;
use taskdeck::validation;

const USAGE: &str = "\
taskdeck - task-management client

Usage:
  taskdeck login <email> <password>
  taskdeck register <name> <email> <whatsapp> <password> <confirm>
  taskdeck whoami
  taskdeck tasks
  taskdeck add <title> <description> [reminder \"YYYY-MM-DD HH:MM\"]
  taskdeck edit <id> <title> <description> [reminder \"YYYY-MM-DD HH:MM\"]
  taskdeck done <id> | undone <id>
  taskdeck rm <id>
  taskdeck clear-tasks
  taskdeck chat <text…>
  taskdeck logout
  taskdeck delete-account
";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprint!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("taskdeck: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let deps = match Deps::new(&config) {
        Ok(deps) => deps,
        Err(e) => {
            eprintln!("taskdeck: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ok = match (command, &args[1..]) {
        ("login", [email, password]) => login(&deps, email, password).await,
        ("register", [name, email, whatsapp, password, confirm]) => {
            register(&deps, name, email, whatsapp, password, confirm).await
        }
        ("whoami", []) => whoami(&deps),
        ("tasks", []) => list_tasks(&deps).await,
        ("add", [title, description]) => add_task(&deps, title, description, "").await,
        ("add", [title, description, reminder]) => {
            add_task(&deps, title, description, reminder).await
        }
        ("edit", [id, title, description]) => edit_task(&deps, id, title, description, None).await,
        ("edit", [id, title, description, reminder]) => {
            edit_task(&deps, id, title, description, Some(reminder.as_str())).await
        }
        ("done", [id]) => set_status(&deps, id, true).await,
        ("undone", [id]) => set_status(&deps, id, false).await,
        ("rm", [id]) => remove_task(&deps, id).await,
        ("clear-tasks", []) => clear_tasks(&deps).await,
        ("chat", rest) if !rest.is_empty() => chat(&deps, &rest.join(" ")).await,
        ("logout", []) => logout(&deps).await,
        ("delete-account", []) => delete_account(&deps).await,
        _ => {
            eprint!("{}", USAGE);
            false
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn login(deps: &Deps, email: &str, password: &str) -> bool {
    let auth = AuthSession::new(deps);
    auth.login(email, password).await;
    match &*auth.login_state().borrow() {
        OperationState::Success => {
            if let Some(user) = deps.store.current_user() {
                println!("Signed in as {} <{}>", user.name, user.email);
            }
            true
        }
        OperationState::Error(message) => {
            eprintln!("Login failed: {}", message);
            false
        }
        _ => false,
    }
}

async fn register(
    deps: &Deps,
    name: &str,
    email: &str,
    whatsapp: &str,
    password: &str,
    confirm: &str,
) -> bool {
    let auth = AuthSession::new(deps);
    auth.register(name, email, whatsapp, password, confirm).await;
    match &*auth.register_state().borrow() {
        OperationState::Success => {
            println!("Account created. Sign in with: taskdeck login {} …", email);
            true
        }
        OperationState::Error(message) => {
            eprintln!("Registration failed: {}", message);
            false
        }
        _ => false,
    }
}

fn whoami(deps: &Deps) -> bool {
    match deps.store.current_user() {
        Some(user) => {
            println!(
                "{} <{}> whatsapp {} since {}",
                user.name, user.email, user.whatsapp, user.date
            );
            true
        }
        None => {
            eprintln!("Not signed in.");
            false
        }
    }
}

async fn list_tasks(deps: &Deps) -> bool {
    let session = TaskSession::new(deps);
    session.load_tasks();
    session.flush().await;

    if let Some(message) = session.error().borrow().as_deref() {
        eprintln!("{}", message);
        return false;
    }

    let tasks = session.tasks().borrow().clone();
    if tasks.is_empty() {
        println!("No tasks.");
    }
    for task in &tasks {
        print_task(task);
    }
    true
}

async fn add_task(deps: &Deps, title: &str, description: &str, reminder: &str) -> bool {
    if !reminder.is_empty() {
        if let Err(e) = validation::validate_reminder(reminder) {
            eprintln!("{}", e);
            return false;
        }
    }

    let session = TaskSession::new(deps);
    session.create_task(title, description, reminder);
    session.flush().await;
    report_operation(&session, "Task created.")
}

async fn edit_task(
    deps: &Deps,
    id: &str,
    title: &str,
    description: &str,
    reminder: Option<&str>,
) -> bool {
    if let Some(reminder) = reminder {
        if let Err(e) = validation::validate_reminder(reminder) {
            eprintln!("{}", e);
            return false;
        }
    }

    let session = TaskSession::new(deps);
    let Some(task) = find_task(&session, id).await else {
        return false;
    };

    session.update_task(task.id, title, description, reminder, task.completed);
    session.flush().await;
    report_operation(&session, "Task updated.")
}

async fn set_status(deps: &Deps, id: &str, completed: bool) -> bool {
    let session = TaskSession::new(deps);
    let Some(task) = find_task(&session, id).await else {
        return false;
    };

    session.update_task_status(&task, completed);
    session.flush().await;

    if let Some(message) = session.error().borrow().as_deref() {
        eprintln!("{}", message);
        return false;
    }
    println!("{} {}", if completed { "Done:" } else { "Pending:" }, task.title);
    true
}

async fn remove_task(deps: &Deps, id: &str) -> bool {
    let session = TaskSession::new(deps);
    let Some(task) = find_task(&session, id).await else {
        return false;
    };

    session.delete_task(&task);
    session.flush().await;

    if let Some(message) = session.error().borrow().as_deref() {
        eprintln!("{}", message);
        return false;
    }
    println!("Deleted: {}", task.title);
    true
}

async fn clear_tasks(deps: &Deps) -> bool {
    let profile = ProfileSession::new(deps);
    profile.delete_all_user_tasks().await;
    match &*profile.tasks_deletion_state().borrow() {
        OperationState::Success => {
            println!("All tasks deleted.");
            true
        }
        OperationState::Error(message) => {
            eprintln!("{}", message);
            false
        }
        _ => false,
    }
}

async fn chat(deps: &Deps, prompt: &str) -> bool {
    let session = AssistantSession::new(deps);
    session.send(prompt).await;
    if let Some(reply) = session.messages().borrow().iter().rev().find(|m| !m.from_user) {
        println!("{}", reply.text);
    }
    true
}

async fn logout(deps: &Deps) -> bool {
    let session = TaskSession::new(deps);
    session.logout();
    session.flush().await;
    println!("Signed out.");
    true
}

async fn delete_account(deps: &Deps) -> bool {
    let profile = ProfileSession::new(deps);
    profile.delete_current_user().await;
    match &*profile.account_deletion_state().borrow() {
        OperationState::Success => {
            println!("Account deleted.");
            true
        }
        OperationState::Error(message) => {
            eprintln!("{}", message);
            false
        }
        _ => false,
    }
}

async fn find_task(session: &TaskSession, id: &str) -> Option<Task> {
    let Ok(id) = id.parse::<i64>() else {
        eprintln!("Not a task id: {}", id);
        return None;
    };

    session.load_tasks();
    session.flush().await;
    if let Some(message) = session.error().borrow().as_deref() {
        eprintln!("{}", message);
        return None;
    }

    let task = session.tasks().borrow().iter().find(|t| t.id == id).cloned();
    if task.is_none() {
        eprintln!("No task with id {}", id);
    }
    task
}

fn report_operation(session: &TaskSession, success_message: &str) -> bool {
    match &*session.operation_state().borrow() {
        OperationState::Success => {
            println!("{}", success_message);
            true
        }
        OperationState::Error(message) => {
            eprintln!("{}", message);
            false
        }
        _ => false,
    }
}

fn print_task(task: &Task) {
    let marker = if task.completed { "x" } else { " " };
    let reminder = task
        .reminder
        .as_deref()
        .filter(|r| !r.is_empty())
        .map(|r| format!("  ({})", r))
        .unwrap_or_default();
    println!("[{}] #{} {}: {}{}", marker, task.id, task.title, task.description, reminder);
}
