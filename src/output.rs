use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ResultItem;

pub fn print_results(items: &[ResultItem]) {
    println!("\nGoods Names and Prices:");
    for item in items {
        println!("{}: {}", item.name, item.price);
    }
    println!("\nExtracted {} items", items.len());
}

/// Persist the items based on the output path's extension. Unsupported
/// extensions and write failures are warnings only; the console output
/// already produced stands either way.
pub fn write_results(items: &[ResultItem], output_path: &str) {
    let result = match Path::new(output_path).extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(items, output_path),
        Some("txt") => write_txt(items, output_path),
        _ => {
            eprintln!("Unsupported file extension. Use .csv or .txt");
            return;
        }
    };

    match result {
        Ok(()) => println!("Results saved to {}", output_path),
        Err(e) => eprintln!("Failed to write to output file: {:#}", e),
    }
}

fn write_csv(items: &[ResultItem], output_path: &str) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("failed to create output file: {}", output_path))?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(["name", "price"])?;
    for item in items {
        writer.serialize(item)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_txt(items: &[ResultItem], output_path: &str) -> Result<()> {
    let mut contents = String::new();
    for item in items {
        contents.push_str(&format!("{}: {}\n", item.name, item.price));
    }
    std::fs::write(output_path, contents)
        .with_context(|| format!("failed to create output file: {}", output_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_items() -> Vec<ResultItem> {
        vec![
            ResultItem {
                name: "MSI GeForce RTX 5070".to_string(),
                price: "$599.99".to_string(),
            },
            ResultItem {
                name: "ASUS Dual RTX 5070".to_string(),
                price: "$619.00".to_string(),
            },
        ]
    }

    fn scratch_path(file_name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pricefinder-{}-{}", std::process::id(), file_name));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn csv_output_has_a_header_and_one_row_per_item() {
        let path = scratch_path("items.csv");
        let items = sample_items();
        write_results(&items, path.to_str().unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), items.len() + 1);
        assert_eq!(lines[0], "name,price");
        assert_eq!(lines[1], "MSI GeForce RTX 5070,$599.99");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn csv_output_for_no_items_is_just_the_header() {
        let path = scratch_path("empty.csv");
        write_results(&[], path.to_str().unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().collect::<Vec<_>>(), vec!["name,price"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn txt_output_has_one_name_price_line_per_item() {
        let path = scratch_path("items.txt");
        let items = sample_items();
        write_results(&items, path.to_str().unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), items.len());
        assert_eq!(lines[0], "MSI GeForce RTX 5070: $599.99");
        assert_eq!(lines[1], "ASUS Dual RTX 5070: $619.00");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unsupported_extension_writes_nothing() {
        let path = scratch_path("items.xyz");
        write_results(&sample_items(), path.to_str().unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn write_failure_does_not_panic_or_propagate() {
        let path = std::env::temp_dir()
            .join("pricefinder-does-not-exist")
            .join("items.csv");
        write_results(&sample_items(), path.to_str().unwrap());
        assert!(!path.exists());
    }
}
