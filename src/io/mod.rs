pub mod export;
pub mod import;

pub use export::{Exporter, LedgerSnapshot};
pub use import::{Script, ScriptError, ScriptLine, ScriptStep, load_snapshot, read_script, run_script};
