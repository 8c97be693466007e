//! Mock transport for testing code built on the Jira REST client
//!
//! `MockTransport` answers requests from canned responses instead of making
//! HTTP calls, and keeps a log of every request it received so tests can
//! assert on what was (or was not) sent.
//!
//! ```
//! use jira_core::Method;
//! use jira_mock::MockTransport;
//!
//! let mock = MockTransport::new()
//!     .respond(Method::Get, "issue/DEMO-1", 200, serde_json::json!({"key": "DEMO-1"}));
//! assert_eq!(mock.call_count(), 0);
//! ```

mod transport;

pub use transport::{MockTransport, ResponseMapping};
