pub mod app;
pub mod carousel;
pub mod engine;
pub mod form;
pub mod menu;
pub mod navigation;
pub mod scheduler;
pub mod scroll;
pub mod validator;

pub use crate::domain::event::{Effect, Event, Step, TimerKind};
pub use crate::domain::model::{FormKind, PageLayout};
pub use crate::domain::ports::{Clock, SubmissionBackend, SubmissionReceipt};
pub use crate::utils::error::Result;
