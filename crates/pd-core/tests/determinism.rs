//! Determinism verification tests
//!
//! Identical seed and parameters must produce byte-identical output.

use pd_core::{CsvReporter, LibcRand, RandomSource, RngKind, SimConfig, SimRng, Simulation};

fn run_csv(config: &SimConfig) -> String {
    let mut sim = Simulation::from_config(config.clone()).unwrap();
    let mut reporter = CsvReporter::new(Vec::new());
    sim.run(&mut reporter).unwrap();
    String::from_utf8(reporter.into_inner().unwrap()).unwrap()
}

/// Two runs with the default configuration produce identical bytes
#[test]
fn test_default_run_is_reproducible() {
    let config = SimConfig::default();
    assert_eq!(run_csv(&config), run_csv(&config));
}

/// Noise draws are part of the stream; noisy runs must also repeat exactly
#[test]
fn test_noisy_run_is_reproducible() {
    let config = SimConfig::default().with_noise(0.05).with_steps(200);
    assert_eq!(run_csv(&config), run_csv(&config));
}

/// The glibc-compatible stream is reproducible too
#[test]
fn test_libc_run_is_reproducible() {
    let config = SimConfig {
        rng: RngKind::Libc,
        ..SimConfig::default().with_noise(0.01)
    };
    assert_eq!(run_csv(&config), run_csv(&config));
}

/// Different seeds give different trajectories
#[test]
fn test_different_seeds_differ() {
    let a = run_csv(&SimConfig::default().with_noise(0.05).with_seed(42));
    let b = run_csv(&SimConfig::default().with_noise(0.05).with_seed(43));
    assert_ne!(a, b);
}

/// Independent simulations interleaved step by step do not influence each other
#[test]
fn test_interleaved_simulations_are_independent() {
    let config = SimConfig::default().with_noise(0.02).with_steps(50);

    let mut solo = Simulation::new(config.clone(), SimRng::new(9)).unwrap();
    let solo_records: Vec<_> = (0..50).map(|_| solo.step()).collect();

    let mut a = Simulation::new(config.clone(), SimRng::new(9)).unwrap();
    let mut b = Simulation::new(config, SimRng::new(10)).unwrap();
    let mut interleaved = Vec::new();
    for _ in 0..50 {
        interleaved.push(a.step());
        b.step();
    }

    assert_eq!(solo_records, interleaved);
    assert_eq!(solo.population(), a.population());
}

/// The engine consumes the stream in a fixed order, so an identical stream
/// handed over directly gives the same result as one built from config
#[test]
fn test_injected_libc_stream_matches_config() {
    let config = SimConfig {
        rng: RngKind::Libc,
        steps: 20,
        ..SimConfig::default()
    };
    let mut from_config = Simulation::from_config(config.clone()).unwrap();
    let mut injected = Simulation::new(config, LibcRand::new(42)).unwrap();
    for _ in 0..20 {
        assert_eq!(from_config.step(), injected.step());
    }
    assert_eq!(
        from_config.rng_mut().uniform_real(),
        injected.rng_mut().uniform_real()
    );
}

fn libc_config(noise: f64) -> SimConfig {
    SimConfig {
        rng: RngKind::Libc,
        ..SimConfig::default().with_noise(noise)
    }
}

/// With the glibc stream and seed 42 the run matches the C program's output,
/// which pins the network, strategy, noise and imitation draw order
#[test]
fn test_libc_run_matches_c_output_without_noise() {
    let csv = run_csv(&libc_config(0.0));
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 503);
    assert_eq!(lines[0], "time,cooperation");
    assert_eq!(lines[1], "0,0.470000");
    assert_eq!(lines[2], "1,0.185000");
    assert_eq!(lines[3], "2,0.107500");
    assert_eq!(lines[501], "#FINAL_STRATEGIES");
    assert_eq!(lines[502], "0.000000,1.000000,0.000000,0.000000");
}

#[test]
fn test_libc_run_matches_c_output_with_noise() {
    let csv = run_csv(&libc_config(0.05));
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[1], "0,0.500000");
    assert_eq!(lines[2], "1,0.237500");
    assert_eq!(lines.last().copied(), Some("0.000000,0.000000,1.000000,0.000000"));
}
