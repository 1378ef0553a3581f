use anyhow::{anyhow, Result};
use seedhub::{
    seed::{locate_header_row, REQUIRED_COLUMNS},
    workbook::{SeedWorkbook, XlsxWorkbook},
};
use std::{collections::HashSet, env, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// Print what the seed pipeline would see in each sheet of a workbook:
/// header row, normalized headers and missing identity columns.
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Usage: inspect_seed_hub <WORKBOOK>"))?;

    let mut workbook = XlsxWorkbook::open(&path)?;
    println!("{}", path.display());

    for sheet in workbook.sheet_names() {
        let rows = match workbook.sheet_rows(&sheet) {
            Ok(rows) => rows,
            Err(e) => {
                println!("  [{}] unreadable: {}", sheet, e);
                continue;
            }
        };

        match locate_header_row(&sheet, &rows) {
            Ok(header) => {
                let present: HashSet<&str> = header.named().collect();
                let missing: Vec<&str> = REQUIRED_COLUMNS
                    .iter()
                    .copied()
                    .filter(|c| !present.contains(c))
                    .collect();
                println!(
                    "  [{}] header row {} ({} data rows)",
                    sheet,
                    header.index + 1,
                    rows.len() - header.index - 1
                );
                println!("      columns: {}", header.headers.join(", "));
                if missing.is_empty() {
                    println!("      qualifies");
                } else {
                    println!("      missing: {}", missing.join(", "));
                }
            }
            Err(e) => println!("  [{}] {}", sheet, e),
        }
    }

    Ok(())
}
