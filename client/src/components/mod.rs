//! Reusable UI components shared by route pages.

pub mod navbar;
pub mod protected_route;
