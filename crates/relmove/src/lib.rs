//! # relmove
//!
//! Command-line host for moving a note into another vault folder together
//! with the files it links to.
//!
//! - [`settings`] layers defaults, a YAML file and `RELMOVE_*` variables
//! - [`logging`] installs the tracing subscriber
//! - [`messages`] holds the English and Chinese presentation strings
//! - [`prompt`] drives the selection from a line-based terminal
//! - [`app`] runs the `move`, `plan` and `folders` commands
//!
//! ```no_run
//! use relmove::app::App;
//! use relmove::settings::{load_config, with_vault};
//! use relmove_batch::AutoConfirm;
//! use std::path::Path;
//!
//! # async fn example() -> relmove_core::Result<()> {
//! let config = with_vault(load_config(None)?, Path::new("~/notes"))?;
//! let app = App::open(config).await?;
//! let report = app
//!     .move_file("inbox/idea.md", "projects", &app.options(), &AutoConfirm)
//!     .await;
//! println!("{}", report.notice(app.messages()));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod logging;
pub mod messages;
pub mod prompt;
pub mod render;
pub mod settings;

pub use app::{App, MoveReport};
pub use messages::Messages;
pub use prompt::TerminalPrompt;
