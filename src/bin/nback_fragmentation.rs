//! N-Back Fragmentation: Where Does a Memory Trace Live?
//!
//! This binary demonstrates the fragmentation analysis on an N-back memory
//! task. A random bit stream is presented one bit per step; an agent state
//! must retain the last three inputs to solve the task. Two agents are
//! compared:
//!
//! 1. **Register agent**: each lag is stored verbatim in its own state
//!    variable (plus distractor noise channels). Every memory trace should
//!    be readable from a single variable.
//!
//! 2. **Smeared agent**: each lag is XOR-masked against a private random
//!    key held in another state variable. The trace exists only jointly,
//!    so the smallest informative partition doubles in size.
//!
//! ## Protocol
//!
//! 1. Generate the input stream and both agent state series
//! 2. Run the threshold search per lag feature on each agent
//! 3. Build the fragmentation map for the smeared agent

use frag_info_dynamics::{
    fragmentation_map, fragmentation_set, FeatureRange, Normalization, PartitionCatalog,
    ThresholdReference,
};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution};

/// Task horizon and memory depth.
const N_STEPS: usize = 4000;
const N_BACK: usize = 3;

fn main() {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Information Fragmentation: N-Back Memory Traces");
    println!("═══════════════════════════════════════════════════════════════\n");

    let mut rng = StdRng::seed_from_u64(20260805);
    let coin = Bernoulli::new(0.5).unwrap();

    // Input stream, one bit per step
    let stream: Vec<u32> = (0..N_STEPS + N_BACK)
        .map(|_| coin.sample(&mut rng) as u32)
        .collect();

    // Features at step t: the inputs 1, 2 and 3 steps back
    let features = Array2::from_shape_fn((N_STEPS, N_BACK), |(t, lag)| {
        stream[t + N_BACK - (lag + 1)]
    });
    let feature_ranges: Vec<FeatureRange> =
        (0..N_BACK).map(FeatureRange::single).collect();

    // Register agent: [x(t-1), x(t-2), x(t-3), noise, noise]
    let noise: Vec<u32> = (0..2 * N_STEPS)
        .map(|_| coin.sample(&mut rng) as u32)
        .collect();
    let register_source = Array2::from_shape_fn((N_STEPS, N_BACK + 2), |(t, var)| {
        if var < N_BACK {
            stream[t + N_BACK - (var + 1)]
        } else {
            noise[2 * t + (var - N_BACK)]
        }
    });

    // Smeared agent: [x(t-1) XOR k1, k1, x(t-2) XOR k2, k2, x(t-3) XOR k3, k3]
    let keys: Vec<u32> = (0..N_BACK * N_STEPS)
        .map(|_| coin.sample(&mut rng) as u32)
        .collect();
    let smeared_source = Array2::from_shape_fn((N_STEPS, 2 * N_BACK), |(t, var)| {
        let lag = var / 2;
        let key = keys[N_BACK * t + lag];
        if var % 2 == 0 {
            stream[t + N_BACK - (lag + 1)] ^ key
        } else {
            key
        }
    });

    println!("Task Parameters:");
    println!("  steps = {}", N_STEPS);
    println!("  memory depth = {}", N_BACK);
    println!("  register agent state width = {}", register_source.ncols());
    println!("  smeared agent state width = {}", smeared_source.ncols());

    let mut catalog = PartitionCatalog::new();
    let threshold = 0.99;

    println!("\n───────────────────────────────────────────────────────────────");
    println!("  Threshold Search (threshold = {:.2} x feature entropy)", threshold);
    println!("───────────────────────────────────────────────────────────────\n");

    for (name, source) in [
        ("register agent", &register_source),
        ("smeared agent", &smeared_source),
    ] {
        let results = fragmentation_set(
            source,
            &features,
            &feature_ranges,
            threshold,
            ThresholdReference::Feature,
            None,
            &mut catalog,
        )
        .expect("series are aligned by construction");

        println!("{}:", name);
        for (lag, result) in results.iter().enumerate() {
            match result.partition_size {
                Some(size) => println!(
                    "  lag {}: smallest informative partition = {} variable(s), ratio = {:.4}",
                    lag + 1,
                    size,
                    result.max_entropy_ratio
                ),
                None => println!(
                    "  lag {}: no partition reaches the threshold, ratio = {:.4}",
                    lag + 1,
                    result.max_entropy_ratio
                ),
            }
        }
        println!();
    }

    println!("───────────────────────────────────────────────────────────────");
    println!("  Fragmentation Map, Smeared Agent (pairs, \"feature\" norm)");
    println!("───────────────────────────────────────────────────────────────\n");

    let map = fragmentation_map(
        &features,
        &smeared_source,
        &feature_ranges,
        Some(2),
        Normalization::Feature,
        &mut catalog,
    )
    .expect("series are aligned by construction");

    print!("{:>12}", "partition");
    for lag in 0..N_BACK {
        print!("{:>10}", format!("lag {}", lag + 1));
    }
    println!();

    for (col, partition) in map.partitions.iter().enumerate() {
        print!("{:>12}", format_partition(partition));
        for row in 0..map.n_features() {
            print!("{:>10.4}", map.cell(row, col));
        }
        println!();
    }

    println!();
    for row in 0..map.n_features() {
        println!(
            "lag {}: H(feature) = {:.4}, max shared with state = {:.4}",
            row + 1,
            map.feature_entropy(row),
            map.max_shared_entropy(row)
        );
    }

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  Analysis Complete");
    println!("═══════════════════════════════════════════════════════════════");
}

fn format_partition(partition: &[usize]) -> String {
    let indices: Vec<String> = partition.iter().map(|i| i.to_string()).collect();
    format!("{{{}}}", indices.join(","))
}
