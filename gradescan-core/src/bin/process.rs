use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::info;

use gradescan_core::grade::roster::sort_roster;
use gradescan_core::ocr::vision::decode_vision_json;
use gradescan_core::pipeline::processor::{process_free_text, process_recognized};
use gradescan_core::{GradingScale, PipelineConfig, SheetConfig, Student};

#[derive(Parser)]
#[command(name = "process")]
#[command(about = "Grade-sheet processing tool")]
struct Args {
    #[arg(
        long,
        conflicts_with = "free_text",
        help = "Saved vision-provider JSON response"
    )]
    vision: Option<String>,

    #[arg(long, help = "Saved free-text provider response")]
    free_text: Option<String>,

    #[arg(long, help = "Roster JSON file (array of students)")]
    roster: String,

    #[arg(
        long,
        default_value = "10,8.5,7.5,6.5,5",
        help = "Comma-separated grading-scale labels"
    )]
    scale: String,

    #[arg(long, help = "Probe the status columns (M/A/E)")]
    status: bool,

    #[arg(long, help = "Re-sort the roster by last name, first name")]
    sort: bool,
}

fn read_file(path: &str) -> Result<String, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Input file not found: {}", path).into());
    }
    Ok(fs::read_to_string(path)?)
}

fn load_roster(path: &str, sort: bool) -> Result<Vec<Student>, Box<dyn Error>> {
    let raw = read_file(path)?;
    let mut roster: Vec<Student> = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to decode roster {}: {}", path, e))?;

    if sort {
        sort_roster(&mut roster);
    }

    info!("Loaded {} students from {}", roster.len(), path);
    Ok(roster)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let roster = load_roster(&args.roster, args.sort)?;
    let scale = GradingScale::new(args.scale.split(',').map(|s| s.trim().to_string()).collect())?;

    let sheet = SheetConfig {
        roster,
        scale,
        status_enabled: args.status,
    };
    let config = PipelineConfig::default();

    let grades = match (&args.vision, &args.free_text) {
        (Some(path), _) => {
            info!("Processing vision response from {}", path);
            let text_objects = decode_vision_json(&read_file(path)?)?;
            info!("Decoded {} text fragments", text_objects.len());
            process_recognized(&text_objects, &sheet, &config)
        }
        (None, Some(path)) => {
            info!("Processing free-text response from {}", path);
            process_free_text(&read_file(path)?, &sheet)
        }
        (None, None) => {
            return Err("Provide either --vision or --free-text".into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&grades)?);

    info!("Processed {} grade entries", grades.len());
    Ok(())
}
