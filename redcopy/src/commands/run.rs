// redcopy/src/commands/run.rs
//
// USE CASE: Run the bulk load.

use super::{build_orchestrator, report_failure};
use crate::cli::TaskArgs;

pub async fn execute(args: TaskArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    println!("⚙️  Loading transfer task...");
    let transfer = match build_orchestrator(&args).await? {
        Ok(transfer) => transfer,
        Err(e) => report_failure(&e),
    };

    let spec = transfer.spec();
    println!(
        "   {} <- {} ({})",
        spec.target(),
        spec.data_source,
        spec.operation
    );

    match transfer.run().await {
        Ok(()) => {
            println!("\n✨ SUCCESS! Transfer finished in {:.2?}", start.elapsed());
            Ok(())
        }
        Err(e) => report_failure(&e),
    }
}
