// redcopy/src/commands/plan.rs
//
// USE CASE: Dry run. Prints what `run` would submit, secrets redacted.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;

use super::{build_orchestrator, report_failure};
use crate::cli::{OutputFormat, TaskArgs};

pub async fn execute(args: TaskArgs, format: OutputFormat) -> anyhow::Result<()> {
    let transfer = match build_orchestrator(&args).await? {
        Ok(transfer) => transfer,
        Err(e) => report_failure(&e),
    };

    let statement = match transfer.plan() {
        Ok(statement) => statement,
        Err(e) => report_failure(&e),
    };
    let summary = transfer.summary();

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "transfer": summary,
                "statement": statement.redacted(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            let autocommit = summary.autocommit.to_string();
            let options = summary.copy_options.join(" ");

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Field", "Value"]);
            table.add_row(vec!["target", summary.target.as_str()]);
            table.add_row(vec!["source", summary.source.as_str()]);
            table.add_row(vec!["warehouse_conn_id", summary.warehouse_conn_id.as_str()]);
            table.add_row(vec!["aws_conn_id", summary.aws_conn_id.as_str()]);
            table.add_row(vec!["verify", summary.verify.as_str()]);
            table.add_row(vec!["operation", summary.operation.as_str()]);
            table.add_row(vec!["autocommit", autocommit.as_str()]);
            table.add_row(vec!["copy_options", options.as_str()]);

            println!("\n📋 Transfer plan");
            println!("{table}");
            println!("\n{}", statement);
        }
    }

    Ok(())
}
