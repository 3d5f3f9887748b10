use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use simulator::{run_simulation, SimulationConfig, SimulationResult};

const USAGE: &str = "Usage: vmsim <trace-file> [--tlb-entries N] [--num-frames N] [--policy LRU|SecondChance]";

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SimulationConfig, String> {
    let mut trace_file: Option<PathBuf> = None;
    let mut tlb_entries = 16;
    let mut num_frames = 64;
    let mut policy = "LRU".to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tlb-entries" => {
                let value = args.next().ok_or("--tlb-entries requires a value")?;
                tlb_entries = value
                    .parse()
                    .map_err(|_| format!("invalid value for --tlb-entries: '{}'", value))?;
            }
            "--num-frames" => {
                let value = args.next().ok_or("--num-frames requires a value")?;
                num_frames = value
                    .parse()
                    .map_err(|_| format!("invalid value for --num-frames: '{}'", value))?;
            }
            "--policy" => {
                policy = args.next().ok_or("--policy requires a value")?;
            }
            _ if arg.starts_with("--") => {
                return Err(format!("unknown option: '{}'", arg));
            }
            _ => {
                if trace_file.is_some() {
                    return Err(format!("unexpected argument: '{}'", arg));
                }
                trace_file = Some(PathBuf::from(arg));
            }
        }
    }

    let trace_file = trace_file.ok_or("missing trace file argument")?;

    Ok(SimulationConfig {
        tlb_entries,
        num_frames,
        policy,
        addresses: None,
        trace_file: Some(trace_file),
    })
}

fn print_report(config: &SimulationConfig, result: &SimulationResult) {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("Memory Simulator - Access Statistics");
    println!("{}", rule);
    println!("Replacement policy:   {}", config.policy);
    println!("TLB entries:          {}", config.tlb_entries);
    println!("Number of frames:     {}", config.num_frames);
    println!("{}", "-".repeat(60));
    println!("TLB hits:             {}", result.statistics.tlb_hits);
    println!("TLB misses:           {}", result.statistics.tlb_misses);
    println!("Page faults:          {}", result.statistics.page_faults);
    println!("{}", rule);

    if !result.logs.is_empty() {
        println!("Diagnostics:");
        for line in &result.logs {
            println!("  {}", line);
        }
    }
}

fn main() -> ExitCode {
    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("vmsim: {}", msg);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run_simulation(&config) {
        Ok(result) => {
            print_report(&config, &result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("vmsim: {}", err);
            ExitCode::FAILURE
        }
    }
}
