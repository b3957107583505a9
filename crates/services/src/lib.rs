#![forbid(unsafe_code)]

pub mod app_services;
pub mod checklist_store;
pub mod error;
pub mod progress_service;

pub use app_services::AppServices;
pub use checklist_store::{ChecklistStore, ProgressEvent, SubscriptionId};
pub use error::{AppServicesError, ProgressServiceError};
pub use progress_service::{PROGRESS_STORAGE_KEY, ProgressService};
