use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use structopt::StructOpt;

use indexed_pq::{IndexedPriorityQueue, QueueError};

type Value = OrderedFloat<f64>;

///indexed priority queue demo
///
/// Pushes n uniform [0, 1) values into a queue of fixed capacity, pins the extremes
/// to logical indices 0 and 1 with insert, then pops everything back out.
#[rustfmt::skip]
#[derive(StructOpt, Debug)]
#[structopt(name = "ipq")]
struct Args {
    ///number of logical indices
    #[structopt(long, short, default_value = "16")]
    capacity: usize,

    ///random values to push
    #[structopt(short, default_value = "14")]
    n:        usize,

    ///explicitly set seed
    #[structopt(short)]
    seed:     Option<u64>,

    ///pop the largest value first
    #[structopt(long)]
    max:      bool,

    ///how many popped values to print
    #[structopt(short, default_value = "16")]
    tail:     usize,

    ///debug logging
    #[structopt(short, long)]
    verbose:  bool,
}

fn run(args: &Args, prng: &mut SmallRng) -> Result<Vec<Value>, QueueError> {
    let less: fn(&Value, &Value) -> bool = if args.max {
        |a: &Value, b: &Value| a > b
    } else {
        |a: &Value, b: &Value| a < b
    };
    let mut queue = IndexedPriorityQueue::with_comparator(args.capacity, less);

    for _ in 0..args.n {
        let value: f64 = prng.gen();
        let position = queue.push(OrderedFloat(value))?;
        debug!("pushed {:.10} at {}", value, position);
    }

    let (first, last) = if args.max { (1.0, 0.0) } else { (0.0, 1.0) };
    queue.insert(0, OrderedFloat(first))?;
    queue.insert(1, OrderedFloat(last))?;

    info!("popping {} of {} values", queue.len(), queue.capacity());
    Ok(queue.into_sorted_vec())
}

fn main() {
    let args = Args::from_args();

    let mut log_builder = env_logger::builder();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Trace);
        debug!("arguments: {:#?}", args);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut prng: SmallRng = SeedableRng::seed_from_u64(seed);

    match run(&args, &mut prng) {
        Ok(popped) => {
            let ordered = popped
                .iter()
                .tuple_windows()
                .all(|(a, b)| if args.max { a >= b } else { a <= b });
            assert!(ordered, "Values popped out of order, seed: {}", seed);

            let skip = popped.len().saturating_sub(args.tail);
            for (i, value) in popped.iter().enumerate().skip(skip) {
                println!("{:>4}: {:.10}", i, value.0);
            }
            println!("seed: {}", seed);
        }
        Err(error) => {
            eprintln!("Error: {}, seed: {}", error, seed);
            std::process::exit(1);
        }
    }
}
