use std::path::PathBuf;

use cachesim::{trace::load_trace, CacheConfig, Config, Simulator};
use clap::Parser;
use eyre::{eyre, Result};

/// replay a memory trace against a set associative cache with fifo eviction
#[derive(Parser, Debug)]
#[command(name = "cachesim", version)]
struct Args {
    /// number of set index bits, the cache has 2^s sets
    #[arg(short = 's')]
    set_index_bits: Option<u32>,
    /// number of lines per set
    #[arg(short = 'E')]
    associativity: Option<usize>,
    /// number of block offset bits, blocks are 2^b bytes
    #[arg(short = 'b')]
    block_offset_bits: Option<u32>,
    /// trace file to replay
    #[arg(short = 't')]
    trace: Option<PathBuf>,
    /// print the outcome of every instruction
    #[arg(short = 'v')]
    verbose: bool,
    /// toml config file, flags given on the command line win over it
    #[arg(long)]
    config: Option<String>,
    /// save the final report as json
    #[arg(long)]
    report: Option<PathBuf>,
}

fn resolve_config(args: Args) -> Result<Config> {
    let base = args
        .config
        .as_deref()
        .map(Config::from_config_file)
        .transpose()?;
    let base_cache = base.as_ref().map(|config| config.cache);
    let missing = |flag: &str| eyre!("missing -{flag} and no config file provides it");
    let cache = CacheConfig {
        set_index_bits: args
            .set_index_bits
            .or(base_cache.map(|c| c.set_index_bits))
            .ok_or_else(|| missing("s"))?,
        associativity: args
            .associativity
            .or(base_cache.map(|c| c.associativity))
            .ok_or_else(|| missing("E"))?,
        block_offset_bits: args
            .block_offset_bits
            .or(base_cache.map(|c| c.block_offset_bits))
            .ok_or_else(|| missing("b"))?,
    };
    let (base_trace, base_verbose, base_report) = match base {
        Some(config) => (config.trace, config.verbose, config.report),
        None => (None, false, None),
    };
    Ok(Config {
        cache,
        trace: args.trace.or(base_trace),
        verbose: args.verbose || base_verbose,
        report: args.report.or(base_report),
    })
}

fn main() -> Result<()> {
    cachesim::init_tracing();
    let config = resolve_config(Args::parse())?;
    config.show_config()?;
    let trace = config
        .trace
        .as_ref()
        .ok_or_else(|| eyre!("missing -t and no config file provides a trace"))?;

    let simulator = Simulator::new(config.cache)?;
    let instructions = load_trace(trace)?;
    let report = if config.verbose {
        let (report, outcomes) = simulator.run_verbose(&instructions);
        for outcome in outcomes {
            println!("{outcome}");
        }
        report
    } else {
        simulator.run(&instructions)
    };
    println!("{report}");

    if let Some(path) = &config.report {
        report.save(path)?;
        tracing::info!("report saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_flags_only() {
        let args = Args::parse_from(["cachesim", "-s", "4", "-E", "1", "-b", "4", "-t", "yi.trace"]);
        let config = resolve_config(args).unwrap();
        assert_eq!(config.cache, CacheConfig::new(4, 1, 4));
        assert_eq!(config.trace, Some(PathBuf::from("yi.trace")));
        assert!(!config.verbose);
    }

    #[test]
    fn test_missing_geometry() {
        let args = Args::parse_from(["cachesim", "-s", "4", "-b", "4", "-t", "yi.trace"]);
        let err = resolve_config(args).unwrap_err();
        assert!(err.to_string().contains("-E"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "trace = \"a.trace\"\n[cache]\nset_index_bits = 2\nassociativity = 4\nblock_offset_bits = 3\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let args = Args::parse_from(["cachesim", "--config", path, "-E", "2", "-v"]);
        let config = resolve_config(args).unwrap();
        assert_eq!(config.cache, CacheConfig::new(2, 2, 3));
        assert_eq!(config.trace, Some(PathBuf::from("a.trace")));
        assert!(config.verbose);
    }
}
