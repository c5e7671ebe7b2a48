//! Output formatting for CLI results

pub mod console;
pub mod json;
pub mod paged;
pub mod table;

pub use self::console::{Console, StdConsole};
pub use self::paged::{run_paged, run_paged_plain};

/// How a listing is delivered to the user.
///
/// The modes are mutually exclusive and all sit on the same page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect every page and print one JSON document
    Json,
    /// Print a table per page and ask before fetching the next one
    Interactive,
    /// Print a table per page without asking
    FetchAll,
}

impl OutputMode {
    /// `--json` wins over `--fetch-all`; neither means interactive paging.
    pub fn from_flags(json: bool, fetch_all: bool) -> Self {
        if json {
            OutputMode::Json
        } else if fetch_all {
            OutputMode::FetchAll
        } else {
            OutputMode::Interactive
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputMode::Json
    }
}
