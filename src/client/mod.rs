//! Typed client adapter for the POS API: the logic behind the employee and
//! admin screens, without any rendering.

pub mod api;
pub mod error;
pub mod gate;
pub mod http;
mod in_flight;
pub mod orders;
pub mod poller;
pub mod prompt;
pub mod reports;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use api::PosApi;
pub use error::{AuthError, ClientError, ClientResult, DeskError};
pub use gate::{AuthGate, Screen};
pub use http::HttpApi;
pub use orders::OrderDesk;
pub use poller::Poller;
pub use prompt::{LogToaster, Prompter, Toaster};
pub use reports::{ReportDesk, ReportView};
pub use session::{FileSessionStore, MemorySessionStore, SessionManager, SessionStore};
