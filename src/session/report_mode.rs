//! One-shot report execution

use crate::config::Settings;
use crate::events::now_timestamp;
use crate::listing::ListView;
use crate::logging::init_console_logger;
use crate::model::Snapshot;
use crate::print_cmd_warn;
use crate::report::render_report;
use crate::workers::refresher::load_guarded;
use std::error::Error;

/// Runs a single load cycle and prints the report to stdout.
///
/// Degraded resources are reported as warnings; they never fail the command.
pub async fn run_report_mode(settings: Settings, view: ListView) -> Result<(), Box<dyn Error>> {
    init_console_logger();
    let source = settings.feed_source()?;

    let snapshot = match load_guarded(source).await {
        Ok((snapshot, report)) => {
            for (resource, e) in report.degraded() {
                print_cmd_warn!(resource.file_name(), "{}", e);
            }
            snapshot
        }
        Err(e) => {
            print_cmd_warn!("Refresh failed", "{}", e);
            Snapshot::empty(now_timestamp())
        }
    };

    print!("{}", render_report(&snapshot, view));
    Ok(())
}
