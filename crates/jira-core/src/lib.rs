pub mod error;
pub mod events;
pub mod params;
pub mod status;
pub mod transport;

pub use error::{JiraError, ParameterError, Result, Violation};
pub use events::{EventListener, RequestEvent};
pub use params::{validate, Parameters, Rule, RuleSet, ValueKind};
pub use status::{classify, interpret, StatusClass};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
