use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::error;
use rand::{rngs::StdRng, SeedableRng};

use rs_barnes_hut::particles::{mac_tuning_sweep, Quadtree, WorkerRange};
use rs_barnes_hut::utils::{
    BarnesHutError, SolverConfig, TreeSpec, DEFAULT_DOMAIN_SIZE, DEFAULT_FAR_FIELD_LIMIT,
    DEFAULT_MASS_RANGE, DEFAULT_SEED, GRAVITATIONAL_CONSTANT,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Total number of particles.
    #[arg(default_value_t = 100_000)]
    particles: usize,

    /// Height of the quadtree (4^(height-1) cells).
    #[arg(default_value_t = 6)]
    height: usize,

    /// Number of workers the cells are split across. Each worker runs its own process.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Rank of this worker, in 0..workers.
    #[arg(short, long, default_value_t = 0)]
    rank: usize,

    /// Far-field limit of the multipole acceptance criterion.
    #[arg(short, long, default_value_t = DEFAULT_FAR_FIELD_LIMIT)]
    far_field_limit: f64,

    /// Seed of the particle generator.
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Merge every cell and run the brute-force reference instead of Barnes-Hut.
    #[arg(long, default_value_t = false)]
    naive: bool,

    /// Print the M2P error against l/d for a source cell of `particles` particles.
    #[arg(long, default_value_t = false)]
    tune_mac: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = if args.tune_mac {
        tune(&args);
        Ok(())
    } else if args.naive {
        bench_naive(&args)
    } else {
        bench_tree(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn spec(args: &Args) -> TreeSpec {
    TreeSpec::new(
        args.height,
        (args.particles, args.particles),
        DEFAULT_MASS_RANGE,
        (0.0, DEFAULT_DOMAIN_SIZE),
        (0.0, DEFAULT_DOMAIN_SIZE),
    )
}

fn bench_tree(args: &Args) -> Result<(), BarnesHutError> {
    let spec = spec(args);
    spec.validate()?;
    // Reject a bad split before spending time on the build.
    if let Some(workers) = args.workers {
        WorkerRange::for_rank(spec.nb_cells(), args.rank, workers)?;
    }

    match args.workers {
        Some(workers) => println!(
            "# Benching barnes-hut like method, w/ work on cells distributed across {} workers \
             (this is rank {}), done in parallel, with vectorized operators",
            workers, args.rank
        ),
        None => println!(
            "# Benching barnes-hut like method, cells in parallel with vectorized operators, \
             but not distributed"
        ),
    }
    println!("{} particles, tree of height {}", args.particles, args.height);

    let config = SolverConfig::new(None, Some(args.far_field_limit), None);
    let mut rng = StdRng::seed_from_u64(args.seed);

    let start = Instant::now();
    let mut tree = Quadtree::init_with_config(&spec, config, &mut rng)?;
    let build_time = start.elapsed().as_secs_f64();

    let start = Instant::now();
    tree.compute_multipoles();
    let multipole_time = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let stats = match args.workers {
        Some(workers) => tree.compute_forces_distributed(args.far_field_limit, args.rank, workers)?,
        None => tree.compute_forces(args.far_field_limit)?,
    };
    let interaction_time = start.elapsed().as_secs_f64();

    println!(
        "#Nb of particles, Quadtree height, Quadtree building time, multipole computation time, \
         interaction computation time (seconds)\n{} {} {:e} {:e} {:e}",
        args.particles, args.height, build_time, multipole_time, interaction_time
    );
    println!(
        "# M2P: {}, P2P_ext: {}, P2P_in: {}\n",
        stats.m2p, stats.p2p_ext, stats.p2p_in
    );
    Ok(())
}

fn bench_naive(args: &Args) -> Result<(), BarnesHutError> {
    let spec = spec(args);
    println!("# Benching naive method, all particles in one cell, scalar operators");
    println!("{} particles", args.particles);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let start = Instant::now();
    let tree = Quadtree::init(&spec, &mut rng)?;
    let mut cell = tree.merged_cell();
    let build_time = start.elapsed().as_secs_f64();

    let start = Instant::now();
    cell.p2p_in_ref(GRAVITATIONAL_CONSTANT);
    let interaction_time = start.elapsed().as_secs_f64();

    println!(
        "#Nb of particles, building time, interaction computation time (seconds)\n{} {:e} {:e}\n",
        cell.len(),
        build_time,
        interaction_time
    );
    Ok(())
}

fn tune(args: &Args) {
    println!(
        "# Tuning the MAC. Force exerted by a cell on another cell of {} particles. \
         M2P vs P2P_ext reference.\n",
        args.particles
    );
    println!("# l/d Relative errors(min, 1st quartile, median, 3rd quartile, max)");
    for sample in mac_tuning_sweep(args.particles, args.seed, GRAVITATIONAL_CONSTANT) {
        let s = sample.stats;
        println!(
            "{:e} {:e} {:e} {:e} {:e} {:e}",
            sample.width_over_distance, s.min, s.first_quartile, s.median, s.third_quartile, s.max
        );
    }
}
