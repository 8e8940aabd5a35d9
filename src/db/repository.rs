//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Every mutating call commits before its future resolves.

use std::future::Future;

use chrono::NaiveDate;

use crate::db::{
    DbResult,
    models::{Id, NewToDo, NewWorkout, ToDo, Workout},
};

/// Repository for Workout operations.
pub trait WorkoutRepository: Send + Sync {
    /// Validate and insert a workout, returning it with its assigned id.
    fn create(&self, workout: &NewWorkout) -> impl Future<Output = DbResult<Workout>> + Send;

    /// Get a workout by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Workout>> + Send;

    /// List workouts in insertion order, optionally only those on `date`.
    fn list(&self, date: Option<NaiveDate>) -> impl Future<Output = DbResult<Vec<Workout>>> + Send;

    /// Delete a workout by ID.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for ToDo operations.
pub trait ToDoRepository: Send + Sync {
    /// Validate and insert a to-do. New to-dos are never completed.
    fn create(&self, todo: &NewToDo) -> impl Future<Output = DbResult<ToDo>> + Send;

    /// Get a to-do by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<ToDo>> + Send;

    /// List to-dos in insertion order, optionally only those on `date`.
    fn list(&self, date: Option<NaiveDate>) -> impl Future<Output = DbResult<Vec<ToDo>>> + Send;

    /// Set the completion flag, leaving every other field untouched.
    fn set_completed(
        &self,
        id: Id,
        completed: bool,
    ) -> impl Future<Output = DbResult<ToDo>> + Send;

    /// Delete a to-do by ID.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
///
/// Repositories are exposed through associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Workouts<'a>: WorkoutRepository
    where
        Self: 'a;
    type ToDos<'a>: ToDoRepository
    where
        Self: 'a;

    /// Create any missing tables. Safe to call repeatedly.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Round-trip a trivial query to confirm the store is reachable.
    fn ping(&self) -> impl Future<Output = DbResult<()>> + Send;

    fn workouts(&self) -> Self::Workouts<'_>;

    fn todos(&self) -> Self::ToDos<'_>;
}
