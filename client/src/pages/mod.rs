//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control is declared per page with `ProtectedRoute`.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod signup;
