//! ferret - list filtering and service-call plumbing for UI applications
//!
//! Two loosely related subsystems bundled in one library:
//!
//! - A filterable list model that owns a base list and the filtered view a
//!   display surface renders, with snapshot/restore across suspends.
//! - An async service-call task that executes a described HTTP call off the
//!   owner's thread with bounded retry and structured failure reporting.
//!
//! # Architecture
//!
//! - [`core::list`] - Base/visible list pair, filter publishing, snapshots
//! - [`core::service`] - Declarative call descriptors and URL construction
//! - [`core::task`] - Retry loop, response parsing, event delivery
//! - [`core::error`] - Failure taxonomy with stable machine-readable codes
//! - [`search`] - Host surface trait and ready-made filter predicates
//! - [`net`] - Connectivity probing consulted before each call
//! - [`text`] - Empty-state label templating helpers
//!
//! # Filtering example
//!
//! ```
//! use ferret::search::{substring_filter, SearchHost};
//! use ferret::FilterableList;
//!
//! struct Surface {
//!     empty_label: String,
//! }
//!
//! impl SearchHost for Surface {
//!     fn show_all_on_empty(&self) -> bool {
//!         false
//!     }
//!     fn no_results_template(&self) -> &str {
//!         "No matches for \"{query}\"."
//!     }
//!     fn empty_list_text(&self) -> &str {
//!         "Nothing here yet."
//!     }
//!     fn set_empty_label(&mut self, label: String) {
//!         self.empty_label = label;
//!     }
//!     fn data_changed(&mut self) {}
//!     fn data_invalidated(&mut self) {}
//! }
//!
//! let mut surface = Surface {
//!     empty_label: String::new(),
//! };
//! let mut list = FilterableList::new(
//!     vec!["alpha".to_string(), "beta".to_string()],
//!     substring_filter(String::as_str),
//! );
//!
//! list.filter("be", &mut surface);
//! assert_eq!(list.visible(), ["beta".to_string()]);
//! ```
//!
//! # Service-call example
//!
//! ```no_run
//! use ferret::{CallEvent, JsonParser, Method, Service, ServiceCallTask};
//!
//! # async fn demo() -> ferret::Result<()> {
//! let service = Service::new("https://api.example.com/widgets", Method::Get)
//!     .param("page", "1")
//!     .constant_param("key", "abc123");
//!
//! let mut handle = ServiceCallTask::new(service, JsonParser::<Vec<String>>::new())
//!     .max_attempts(3)
//!     .spawn();
//!
//! while let Some(event) = handle.recv().await {
//!     match event {
//!         CallEvent::Progress(update) => {
//!             eprintln!("retrying: attempt {}", update.attempt);
//!         }
//!         CallEvent::Finished(outcome) => {
//!             let widgets = outcome?;
//!             println!("{} widgets", widgets.len());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod core;
pub mod net;
pub mod search;
pub mod text;

// Re-export commonly used types
pub use crate::core::error::{CallError, ParseError, Result};
pub use crate::core::list::{FilterFn, FilterRequest, FilterableList, ListSnapshot};
pub use crate::core::service::{Method, Service};
pub use crate::core::task::{
    CallEvent, CallHandle, FnParser, JsonParser, ProgressUpdate, ResponseParser, ServiceCallTask,
};
pub use crate::net::Connectivity;
pub use crate::search::SearchHost;
