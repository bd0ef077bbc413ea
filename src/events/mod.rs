//! # Events Module
//!
//! Progress reporting for the cloning pipeline.
//!
//! ## Design
//! The pipeline emits events through a channel so any front end can
//! render progress without the library printing anything itself.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::File(FileEvent::Updated { target }) = event {
//!             println!("updated {}", target.display());
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
