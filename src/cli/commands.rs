use crate::analyzers::TableAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{RefugeError, Result};
use crate::fetch::{FetchPipeline, Persisted};
use crate::processors::clean_table;
use crate::readers::TableReader;
use crate::settings::FetchSettings;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use std::sync::Arc;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Fetch {
            config,
            base_url,
            output_file,
            per_page,
            clean,
        } => {
            let mut settings = FetchSettings::load(config.as_deref())?;
            if let Some(base_url) = base_url {
                settings = settings.with_base_url(base_url);
            }
            if let Some(per_page) = per_page {
                settings = settings.with_per_page(per_page);
            }
            if let Some(output_file) = output_file {
                settings = settings.with_output_file(output_file);
            }

            println!("Fetching restroom data...");
            println!("Endpoint: {}", settings.base_url);
            println!("Output file: {}", settings.output_file.display());

            let pipeline = FetchPipeline::new(&settings)?;
            let mut writer = CsvWriter::new(&settings.output_file);

            let progress = ProgressReporter::new_spinner("Fetching restrooms...", cli.verbose);
            let report = pipeline.run(&mut writer, Some(&progress)).await;
            progress.finish_with_message(&format!("Fetched {} records", report.records_fetched));

            println!("\n{}", report.summary());

            match &report.persisted {
                Persisted::Written(rows) => {
                    println!(
                        "Successfully saved {} restrooms to {}",
                        rows,
                        writer.path().display()
                    );
                }
                Persisted::NothingToSave => {
                    println!("No restrooms were fetched. Please try again later.");
                    return Ok(());
                }
                Persisted::Failed(source) => {
                    return Err(RefugeError::Persist {
                        path: writer.path().to_path_buf(),
                        source: Arc::clone(source),
                    });
                }
            }

            if clean {
                let clean_report = clean_table(writer.path())?;
                println!("\n{}", clean_report.summary());
            }
        }

        Commands::Clean { file } => {
            println!("Cleaning restroom table: {}", file.display());

            let report = clean_table(&file)?;

            println!("\n{}", report.summary());
            println!(
                "Successfully updated CSV file with {} restrooms",
                report.rows_kept
            );
        }

        Commands::Info { file, sample } => {
            println!("Analyzing restroom table: {}", file.display());

            let stats = TableAnalyzer::new().analyze(&file)?;
            println!("\n{}", stats.summary());

            if stats.is_clean() {
                println!("✅ Every row has usable coordinates");
            } else {
                println!(
                    "⚠️  {} rows would be removed by `clean`",
                    stats.missing_coordinates
                );
            }

            if sample > 0 {
                println!("\nSample Rows (showing up to {} rows):", sample);
                match TableReader::with_limit(sample).read_rows(&file) {
                    Ok(rows) => {
                        for (i, row) in rows.iter().enumerate() {
                            println!(
                                "{}. {} | {} | {}, {}",
                                i + 1,
                                row.name,
                                row.address,
                                row.latitude,
                                row.longitude
                            );
                        }
                    }
                    Err(e) => println!("Error reading sample rows: {}", e),
                }
            }
        }
    }

    Ok(())
}
