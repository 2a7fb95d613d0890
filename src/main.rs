use clap::Parser;
use colored::Colorize;
use hr_sheet_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                let reason = match signal {
                    Ok(()) => "Processing interrupted by user".to_string(),
                    Err(e) => format!("Failed to listen for CTRL+C: {}", e),
                };
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(hr_sheet_processor::Error::processing_interrupted(reason))
            }
        }
    });

    match result {
        Ok(stats) => {
            if stats.files_failed > 0 {
                eprintln!(
                    "{} {}",
                    "Warning:".bright_yellow().bold(),
                    stats.summary_line()
                );
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("HR Sheet Processor - attendance and appraisal spreadsheet parser");
    println!("=================================================================");
    println!();
    println!("Turn HR attendance exports and PMS appraisal workbooks into");
    println!("per-employee records (human-readable or JSON).");
    println!();
    println!("USAGE:");
    println!("    hr-sheet-processor <COMMAND> <PATHS>... [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    attendance  Parse attendance exports (--variant plain|monthly|weekly)");
    println!("    pms         Parse PMS appraisal workbooks into KRA/Goal scores");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    hr-sheet-processor attendance Sales_Jan.xlsx");
    println!("    hr-sheet-processor attendance exports/ --variant weekly --format json");
    println!("    hr-sheet-processor pms Q1_reviews.xlsx --department Sales -o q1.json --format json");
    println!();
    println!("For more information on a specific command, use:");
    println!("    hr-sheet-processor <COMMAND> --help");
}
