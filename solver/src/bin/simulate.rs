use anyhow::{bail, Context, Result};
use tracing::info;

use hatdraw::env_config::{init_rayon_threads, init_tracing};
use hatdraw::{exact_probability, run_experiment, Composition, Criterion, ExperimentConfig, Pool};

const USAGE: &str = "Usage: hatdraw-simulate --pool COUNTS --expect COUNTS [--draws N] [--trials N] [--seed S] [--sequential] [--exact] [--json]";

struct Args {
    composition: Composition,
    criterion: Criterion,
    draws: usize,
    trials: u64,
    seed: Option<u64>,
    sequential: bool,
    exact: bool,
    json: bool,
}

fn print_help() {
    println!("{}", USAGE);
    println!();
    println!("Options:");
    println!("  --pool COUNTS      Pool contents, e.g. \"black=6,red=4,green=3\"");
    println!("  --expect COUNTS    Minimum drawn per label, e.g. \"red=2,green=1\" (default: none)");
    println!("  --draws N          Tokens drawn per trial (default: 1)");
    println!("  --trials N         Number of trials (default: 10000)");
    println!("  --seed S           RNG seed (default: random)");
    println!("  --sequential       Run trials on the calling thread only");
    println!("  --exact            Also print the exact hypergeometric probability");
    println!("  --json             Print the full result as JSON");
    println!();
    println!("Environment: HATDRAW_THREADS / RAYON_NUM_THREADS, RUST_LOG");
}

/// Value following flag `args[*i]`, advancing `i`.
fn next_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} requires a value", flag))
}

fn parse_args() -> Result<Option<Args>> {
    let args: Vec<String> = std::env::args().collect();
    let mut composition: Option<Composition> = None;
    let mut criterion = Criterion::default();
    let mut draws = 1usize;
    let mut trials = 10_000u64;
    let mut seed: Option<u64> = None;
    let mut sequential = false;
    let mut exact = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pool" => {
                let v = next_value(&args, &mut i)?;
                composition = Some(v.parse().with_context(|| format!("invalid --pool '{}'", v))?);
            }
            "--expect" => {
                let v = next_value(&args, &mut i)?;
                criterion = v.parse().with_context(|| format!("invalid --expect '{}'", v))?;
            }
            "--draws" => {
                let v = next_value(&args, &mut i)?;
                draws = v.parse().with_context(|| format!("invalid --draws '{}'", v))?;
            }
            "--trials" => {
                let v = next_value(&args, &mut i)?;
                trials = v.parse().with_context(|| format!("invalid --trials '{}'", v))?;
            }
            "--seed" => {
                let v = next_value(&args, &mut i)?;
                seed = Some(v.parse().with_context(|| format!("invalid --seed '{}'", v))?);
            }
            "--sequential" => sequential = true,
            "--exact" => exact = true,
            "--json" => json = true,
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => bail!("unknown argument: {}\n{}", other, USAGE),
        }
        i += 1;
    }

    let composition = composition.with_context(|| format!("--pool is required\n{}", USAGE))?;
    Ok(Some(Args {
        composition,
        criterion,
        draws,
        trials,
        seed,
        sequential,
        exact,
        json,
    }))
}

fn main() -> Result<()> {
    init_tracing();
    let Some(args) = parse_args()? else {
        return Ok(());
    };
    if !args.sequential {
        init_rayon_threads()?;
    }

    let pool = Pool::new(&args.composition);
    info!(pool_size = pool.len(), labels = pool.labels().len(), "pool built");

    let config = ExperimentConfig {
        draw_count: args.draws,
        trials: args.trials,
        seed: args.seed,
        parallel: !args.sequential,
    };
    let result = run_experiment(&pool, &args.criterion, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "P = {:.4}  ({} / {} trials, 95% CI [{:.4}, {:.4}], seed {})",
            result.probability,
            result.successes,
            result.trials,
            result.confidence_95.lower,
            result.confidence_95.upper,
            result.seed
        );
        println!("Mean drawn per trial:");
        for (label, mean) in &result.mean_drawn {
            println!("  {:<12} {:.3}", label, mean);
        }
        println!("Elapsed: {:.1} ms", result.elapsed.as_secs_f64() * 1e3);
    }

    if args.exact {
        let exact = exact_probability(&args.composition, &args.criterion, args.draws as u64);
        println!(
            "Exact P = {:.6}  (simulation off by {:+.4})",
            exact,
            result.probability - exact
        );
    }

    Ok(())
}
