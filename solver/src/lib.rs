//! # hatdraw — drawing tokens from a hat
//!
//! Estimates, by repeated simulation, the probability that drawing a fixed
//! number of tokens without replacement from a pool of labeled tokens yields
//! at least a required number of each of some labels.
//!
//! | Piece | Module | Description |
//! |-------|--------|-------------|
//! | Composition | [`composition`] | Validated label → count mapping |
//! | Pool | [`pool`] | Mutable multiset; uniform draws without replacement |
//! | Criterion | [`criterion`] | Per-label minimum counts defining a success |
//! | Experiment | [`simulation`] | N independent trials → success rate |
//! | Exact answer | [`analytic`] | Multivariate hypergeometric probability |
//!
//! ```no_run
//! use hatdraw::{probability, Composition, Criterion, Pool};
//!
//! let pool = Pool::new(&"black=6,red=4,green=3".parse::<Composition>()?);
//! let criterion: Criterion = "red=2,green=1".parse()?;
//! let p = probability(&pool, &criterion, 5, 10_000)?;
//! assert!((0.0..=1.0).contains(&p));
//! # Ok::<(), hatdraw::Error>(())
//! ```

pub mod analytic;
pub mod composition;
pub mod criterion;
pub mod env_config;
pub mod error;
pub mod pool;
pub mod simulation;

pub use analytic::exact_probability;
pub use composition::Composition;
pub use criterion::Criterion;
pub use error::{Error, Result};
pub use pool::Pool;
pub use simulation::{probability, run_experiment, ExperimentConfig, ExperimentResult};
