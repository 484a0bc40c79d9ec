//! Domain rules for orderdesk: error taxonomy, roles, order statuses, input
//! validation, pagination math, and the upload store.

pub mod accounts;
pub mod error;
pub mod order_status;
pub mod orders;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod upload;
