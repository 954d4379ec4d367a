//! Polarwatch CLI
//!
//! Command-line client for a running Polarwatch server:
//! - Show the latest temperatures and which pole is warmer
//! - Print the history table and chart series
//! - Check status
//! - Export the history window

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polarwatch-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the Polarwatch dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8085", global = true)]
    pub api_url: String,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the latest temperature for each location
    Latest,

    /// Show which location is warmer at the latest reading
    Compare,

    /// Print the history table, oldest first
    Table,

    /// Print the chart series with the trend line
    Chart,

    /// Show server status
    Status,

    /// Export the history window
    Export {
        /// Export format (csv, json, ndjson)
        #[arg(long, default_value = "csv")]
        export_format: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Latest => {
            let data = fetch(&client, &cli.api_url, "/api/v1/latest").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
                return Ok(());
            }

            match data["timestamp"].as_str() {
                Some(ts) => {
                    println!("Latest reading at {}", ts);
                    println!("  Arctic:     {}", text_field(&data["arctic"]));
                    println!("  Antarctica: {}", text_field(&data["antarctic"]));
                }
                None => println!("No readings yet"),
            }
        }

        Commands::Compare => {
            let data = fetch(&client, &cli.api_url, "/api/v1/comparison").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else if let Some(text) = data["text"].as_str() {
                println!("{}", text);
            } else {
                println!("No readings yet");
            }
        }

        Commands::Table => {
            let data = fetch(&client, &cli.api_url, "/api/v1/table").await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                "csv" => print_csv(&data),
                _ => print_table(&data),
            }
        }

        Commands::Chart => {
            let data = fetch(&client, &cli.api_url, "/api/v1/chart").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else if data.is_null() {
                println!("No readings yet");
            } else {
                print_chart(&data);
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await
                .with_context(|| format!("could not reach {}", cli.api_url))?;

            if !response.status().is_success() {
                eprintln!("Server returned {}", response.status());
                std::process::exit(1);
            }

            let health: serde_json::Value = response.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&health)?);
                return Ok(());
            }

            println!("Polarwatch Status");
            println!("=================");
            println!("Status:      {}", health["status"].as_str().unwrap_or("-"));
            println!("Version:     {}", health["version"].as_str().unwrap_or("-"));
            println!(
                "Uptime:      {}",
                format_duration(health["uptime_seconds"].as_u64().unwrap_or(0))
            );
            println!(
                "Readings:    {} / {}",
                health["readings"].as_u64().unwrap_or(0),
                health["capacity"].as_u64().unwrap_or(0)
            );
            println!("Ticks:       {}", health["sequence"].as_u64().unwrap_or(0));
            println!(
                "Last:        {}",
                health["last_reading"].as_str().unwrap_or("-")
            );
            println!(
                "WebSockets:  {}",
                health["ws_connections"].as_u64().unwrap_or(0)
            );
        }

        Commands::Export {
            export_format,
            output,
        } => {
            let url = format!(
                "{}/api/v1/export?format={}",
                cli.api_url, export_format
            );

            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Export failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let data = response.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", data);
                }
            }
        }

        Commands::Config { output } => {
            let config = polarwatch::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn fetch(
    client: &reqwest::Client,
    api_url: &str,
    path: &str,
) -> anyhow::Result<serde_json::Value> {
    let response = client
        .get(format!("{}{}", api_url, path))
        .send()
        .await
        .with_context(|| format!("could not reach {}", api_url))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        anyhow::bail!("request to {} failed ({}): {}", path, status, text);
    }

    Ok(response.json().await?)
}

fn text_field(value: &serde_json::Value) -> &str {
    value["text"].as_str().unwrap_or("-")
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn format_temp(value: &serde_json::Value) -> String {
    value
        .as_f64()
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Same rendering as the server's CSV export: whole degrees keep `.0`
fn format_csv_temp(value: &serde_json::Value) -> String {
    match value.as_f64() {
        Some(v) if v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn print_table(data: &serde_json::Value) {
    let rows = match data["rows"].as_array() {
        Some(r) => r,
        None => {
            println!("No data");
            return;
        }
    };

    if rows.is_empty() {
        println!("No readings yet");
        return;
    }

    // Header
    println!("{:<20} | {:<10} | {:<10}", "Timestamp", "Arctic", "Antarctica");
    println!("{}", "-".repeat(46));

    for row in rows {
        println!(
            "{:<20} | {:<10} | {:<10}",
            row["timestamp"].as_str().unwrap_or("-"),
            format_temp(&row["arctic_temp"]),
            format_temp(&row["antarctic_temp"]),
        );
    }
}

fn print_csv(data: &serde_json::Value) {
    let rows = match data["rows"].as_array() {
        Some(r) => r,
        None => return,
    };

    println!("timestamp,arctic_temp,antarctic_temp");
    for row in rows {
        println!(
            "{},{},{}",
            row["timestamp"].as_str().unwrap_or_default(),
            format_csv_temp(&row["arctic_temp"]),
            format_csv_temp(&row["antarctic_temp"]),
        );
    }
}

fn print_chart(data: &serde_json::Value) {
    let labels = data["labels"].as_array().cloned().unwrap_or_default();
    let datasets = data["datasets"].as_array().cloned().unwrap_or_default();
    let trend = &data["trend"];

    println!("{}", data["title"].as_str().unwrap_or("Temperature"));
    println!();

    print!("{:<20}", "Time");
    for dataset in &datasets {
        print!(" | {:<22}", dataset["label"].as_str().unwrap_or("-"));
    }
    if !trend.is_null() {
        print!(" | {:<22}", trend["label"].as_str().unwrap_or("Trend"));
    }
    println!();

    let columns = datasets.len() + usize::from(!trend.is_null());
    println!("{}", "-".repeat(20 + columns * 25));

    for (i, label) in labels.iter().enumerate() {
        print!("{:<20}", label.as_str().unwrap_or("-"));
        for dataset in &datasets {
            print!(" | {:<22}", format_temp(&dataset["data"][i]));
        }
        if !trend.is_null() {
            print!(" | {:<22}", format_temp(&trend["data"][i]));
        }
        println!();
    }

    if let (Some(slope), Some(intercept)) = (trend["slope"].as_f64(), trend["intercept"].as_f64()) {
        println!();
        println!("Trend: y = {:.3}x + {:.3}", slope, intercept);
    }
}
