use serde_json::{json, Value};

use crate::checks::CheckReport;
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output check reports; returns how many failed
pub fn output_reports(output_format: &OutputFormat, reports: &[CheckReport]) -> anyhow::Result<usize> {
    let failed = reports.iter().filter(|r| !r.success).count();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "success": failed == 0,
                "passed": reports.len() - failed,
                "failed": failed,
                "checks": reports,
            }))?);
        }
        OutputFormat::Text => {
            for report in reports {
                if report.success {
                    let detail = report
                        .outcome
                        .as_ref()
                        .and_then(|o| o.detail.clone())
                        .unwrap_or_default();
                    println!("✓ {} ({}ms) {}", report.name, report.duration_ms, detail);
                    if let Some(path) = report.outcome.as_ref().and_then(|o| o.screenshot.as_ref()) {
                        println!("  screenshot: {}", path.display());
                    }
                } else {
                    println!(
                        "✗ {} ({}ms) {}",
                        report.name,
                        report.duration_ms,
                        report.error.as_deref().unwrap_or("failed")
                    );
                }
            }
            println!("{} passed, {} failed", reports.len() - failed, failed);
        }
    }

    Ok(failed)
}
