pub mod cache;
pub mod config;
pub mod error;
pub mod report;
pub mod simulator;
pub mod trace;
pub(self) mod test_utils;

pub use config::{CacheConfig, Config};
pub use error::SimError;
pub use report::{InstructionOutcome, Report};
pub use simulator::Simulator;
pub use trace::{AccessKind, Instruction};

use tracing_subscriber::EnvFilter;

/// install the global subscriber, `RUST_LOG` overrides the default `info` level
///
/// logs go to stderr so the report on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .unwrap_or_default();
}

/// replay `instructions` against a fresh cache built from `config`
pub fn simulate<'a>(
    config: CacheConfig,
    instructions: impl IntoIterator<Item = &'a Instruction>,
) -> Result<Report, SimError> {
    Ok(Simulator::new(config)?.run(instructions))
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn test_simulate() {
        test_utils::init();
        let text = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n";
        let instructions = trace::parse_trace(text).unwrap();
        let report = simulate(CacheConfig::new(6, 2, 2), &instructions).unwrap();
        assert_eq!(report.to_string(), "hits: 3, misses: 6, evictions: 2");
    }

    #[test]
    fn test_simulate_rejects_config() {
        let instructions: Vec<Instruction> = vec![];
        let err = simulate(CacheConfig::new(6, 0, 2), &instructions).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
