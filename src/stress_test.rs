use itertools::Itertools;
use ordered_float::OrderedFloat;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{IndexedPriorityQueue, QueueError};

// release
#[cfg(not(debug_assertions))]
const STEPS: usize = 200_000;

// debug
#[cfg(debug_assertions)]
const STEPS: usize = 20_000;

fn seeded() -> SmallRng {
    let seed = rand::thread_rng().gen();

    // if the test fails, it will be printed out
    println!("Using seed: {}", seed);

    SeedableRng::seed_from_u64(seed)
}

fn uniform(prng: &mut SmallRng, n: usize) -> Vec<OrderedFloat<f64>> {
    (0..n).map(|_| OrderedFloat(prng.gen::<f64>())).collect()
}

fn drain<F>(mut queue: IndexedPriorityQueue<OrderedFloat<f64>, F>) -> Vec<f64>
where
    F: Fn(&OrderedFloat<f64>, &OrderedFloat<f64>) -> bool,
{
    let mut popped = Vec::new();
    while !queue.is_empty() {
        popped.push(queue.pop().expect("non-empty queue refused to pop").0);
        queue.check_invariants();
    }

    assert_eq!(queue.pop(), Err(QueueError::Empty));
    popped
}

fn sorted(values: &[OrderedFloat<f64>]) -> Vec<f64> {
    values.iter().sorted().map(|value| value.0).collect()
}

#[test]
fn pinned_extremes_overwrite_first_pushes() {
    let mut prng = seeded();
    let values = uniform(&mut prng, 14);

    let mut queue = IndexedPriorityQueue::new(16);
    for (i, &value) in values.iter().enumerate() {
        assert_eq!(queue.push(value), Ok(i));
    }

    // logical 0 and 1 were taken by the first two pushes
    queue.insert(0, OrderedFloat(0.0)).unwrap();
    queue.insert(1, OrderedFloat(1.0)).unwrap();
    assert_eq!(queue.len(), 14);

    let mut expected = vec![0.0];
    expected.extend(sorted(&values[2..]));
    expected.push(1.0);

    assert_eq!(drain(queue), expected);
}

#[test]
fn pinned_extremes_in_free_slots() {
    let mut prng = seeded();
    let values = uniform(&mut prng, 14);

    let mut queue = IndexedPriorityQueue::new(16);
    for &value in &values {
        queue.push(value).unwrap();
    }
    queue.insert(14, OrderedFloat(0.0)).unwrap();
    queue.insert(15, OrderedFloat(1.0)).unwrap();
    assert_eq!(queue.len(), 16);

    let mut expected = vec![0.0];
    expected.extend(sorted(&values));
    expected.push(1.0);

    assert_eq!(drain(queue), expected);
}

#[test]
fn max_queue_pops_descending() {
    let mut prng = seeded();
    let values = uniform(&mut prng, 100);

    let mut queue =
        IndexedPriorityQueue::with_comparator(100, |a: &OrderedFloat<f64>, b: &OrderedFloat<f64>| {
            a > b
        });
    for &value in &values {
        queue.push(value).unwrap();
    }

    let popped = drain(queue);
    assert_eq!(popped.len(), 100);
    assert!(popped.iter().tuple_windows().all(|(a, b)| a >= b));
}

/// Random operations against a plain array of optional values
#[test]
fn random_operations_match_model() {
    const CAPACITY: usize = 32;

    let mut prng = seeded();
    let mut queue = IndexedPriorityQueue::new(CAPACITY);
    let mut model: Vec<Option<u16>> = vec![None; CAPACITY];

    for _ in 0..STEPS {
        let value: u16 = prng.gen_range(0, 1000);

        match prng.gen_range(0, 5) {
            0 => {
                let position = prng.gen_range(0, CAPACITY + 2);
                match queue.insert(position, value) {
                    Ok(()) => model[position] = Some(value),
                    Err(error) => {
                        assert!(position >= CAPACITY);
                        assert_eq!(error, QueueError::OutOfRange { position, capacity: CAPACITY });
                    }
                }
            }
            1 => match model.iter().position(Option::is_none) {
                Some(lowest) => {
                    assert_eq!(queue.push(value), Ok(lowest));
                    model[lowest] = Some(value);
                }
                None => assert_eq!(queue.push(value), Err(QueueError::CapacityExhausted { capacity: CAPACITY })),
            },
            2 => match model.iter().flatten().min() {
                Some(&min) => {
                    let (position, popped) = queue.pop_entry().expect("model is not empty");
                    assert_eq!(popped, min);
                    assert_eq!(model[position], Some(popped));
                    model[position] = None;
                }
                None => assert_eq!(queue.pop_entry(), Err(QueueError::Empty)),
            },
            3 => {
                let position = prng.gen_range(0, CAPACITY);
                match model[position].take() {
                    Some(expected) => assert_eq!(queue.remove(position), Ok(expected)),
                    None => assert_eq!(queue.remove(position), Err(QueueError::InvalidPosition { position })),
                }
            }
            _ => {
                let position = prng.gen_range(0, CAPACITY + 2);
                let expected = model.get(position).copied().flatten();
                assert_eq!(queue.get(position).ok().copied(), expected);
                assert_eq!(queue.contains(position), expected.is_some());
            }
        }

        queue.check_invariants();
        assert_eq!(queue.len(), model.iter().flatten().count());
        assert_eq!(queue.peek().copied(), model.iter().flatten().min().copied());
    }
}
