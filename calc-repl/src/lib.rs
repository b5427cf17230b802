//! An interactive, step-by-step calculus calculator.
//!
//! [`run_session`] drives one session: it reads the user's answers through a [`Prompter`] and
//! writes the narrated steps of the chosen computation to any [`Write`](std::io::Write)r.

pub mod error;
pub mod prompt;
pub mod session;

pub use error::SessionError;
pub use prompt::{EditorPrompter, LinePrompter, Prompter};
pub use session::run_session;
