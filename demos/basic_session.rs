//! Demo: Basic to-do session
//!
//! This demo walks through adding, editing, completing, filtering and
//! deleting tasks with the in-memory TaskStore.
//!
//! Run with: cargo run --example basic_session

use chrono::NaiveDate;
use eyre::Result;
use todostore::{Priority, PriorityFilter, Query, Renderer, SortKey, StatusFilter, TaskFields, TaskStore};

fn main() -> Result<()> {
    let renderer = Renderer::new(false);
    let mut store = TaskStore::new();

    println!("TodoStore Basic Session");
    println!("=======================\n");

    // CREATE
    println!("1. ADD - Creating tasks...");
    let milk = store.add(TaskFields::new("Buy milk"))?;
    let bills = store.add(
        TaskFields::new("Pay bills")
            .description("Electricity and water")
            .priority(Priority::High)
            .due(NaiveDate::from_ymd_opt(2024, 1, 1)),
    )?;
    store.add(
        TaskFields::new("Book dentist")
            .priority(Priority::Medium)
            .due(NaiveDate::from_ymd_opt(2023, 12, 15)),
    )?;
    println!("{}\n", renderer.view(&store.query(&Query::default())));

    // VALIDATION
    println!("2. VALIDATION - Adding a blank title...");
    match store.add(TaskFields::new("   ")) {
        Ok(_) => println!("   Unexpectedly accepted!\n"),
        Err(e) => println!("   Rejected: {}\n", e),
    }

    // UPDATE
    println!("3. UPDATE - Renaming task #{}...", milk.id);
    store.update(milk.id, TaskFields::new("Buy oat milk").priority(Priority::Medium))?;
    println!("{}\n", renderer.task(store.get(milk.id)?));

    // SORT
    println!("4. SORT - By priority:");
    let view = store.query(&Query::new(StatusFilter::All, PriorityFilter::All, SortKey::Priority));
    println!("{}\n", renderer.view(&view));

    println!("5. SORT - By due date (undated last):");
    let view = store.query(&Query::new(StatusFilter::All, PriorityFilter::All, SortKey::DueDate));
    println!("{}\n", renderer.view(&view));

    // TOGGLE + FILTER
    println!("6. TOGGLE - Completing task #{}...", bills.id);
    store.toggle(bills.id)?;
    let done = store.query(&Query::new(StatusFilter::Completed, PriorityFilter::All, SortKey::Created));
    println!("{}\n", renderer.view(&done));

    // DELETE
    println!("7. DELETE - Removing task #{}...", bills.id);
    store.delete(bills.id)?;
    match store.toggle(bills.id) {
        Ok(_) => println!("   Still there?!\n"),
        Err(e) => println!("   Follow-up toggle: {}\n", e),
    }

    println!("{}", renderer.stats(&store.stats()));

    Ok(())
}
