pub mod analyze;
pub mod dit;
pub mod export;
pub mod io;
pub mod loader;
pub mod present;
pub mod report;
pub mod table;

pub mod prelude {
    pub use crate::analyze::{ReuseReport, analyze};
    pub use crate::loader::load;
    pub use crate::table::CredentialTable;
}
