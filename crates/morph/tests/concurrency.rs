use morph::{Adapt, Adapter, AdapterConfig, Map, MapExt, Mapper, MapperConfig};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

#[derive(Debug, Default, Clone, morph::Model)]
struct Order {
    id: u64,
    total: f64,
}

#[derive(Debug, Default, Clone, morph::Model)]
struct OrderDto {
    id: u64,
    total: String,
}

#[morph::view]
trait OrderView {
    fn id(&self) -> u64;
    fn total(&self) -> f64;
}

/// Runs `f` on `THREADS` threads released at the same time.
fn race<R: Send + 'static>(f: impl Fn(usize) -> R + Send + Sync + 'static) -> Vec<R> {
    let f = Arc::new(f);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let f = f.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                f(i)
            })
        })
        .collect();

    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

// ---------------------------------------------------------------------------
// First use from many threads
// ---------------------------------------------------------------------------

#[test]
fn mapper_is_configured_once() {
    let configured = Arc::new(AtomicUsize::new(0));
    let counted = configured.clone();

    let mapper = Arc::new(Mapper::new(
        move |config: &mut MapperConfig<Order, OrderDto>| {
            counted.fetch_add(1, Ordering::SeqCst);
            let _ = config;
        },
    ));

    let totals = race({
        let mapper = mapper.clone();
        move |i| {
            let order = Order {
                id: i as u64,
                total: 1.5,
            };
            mapper.map_new(&order).unwrap().total
        }
    });

    assert_eq!(configured.load(Ordering::SeqCst), 1);
    assert!(totals.iter().all(|total| total == "1.5"));
    mapper.validate().unwrap();
}

#[test]
fn adapter_is_configured_once() {
    let configured = Arc::new(AtomicUsize::new(0));
    let counted = configured.clone();

    let adapter = Arc::new(Adapter::<Order, dyn OrderView>::new(
        move |config: &mut AdapterConfig<Order>| {
            counted.fetch_add(1, Ordering::SeqCst);
            let _ = config;
        },
    ));

    let ids = race({
        let adapter = adapter.clone();
        move |i| {
            let view = adapter
                .create(Arc::new(Order {
                    id: i as u64,
                    total: 0.0,
                }))
                .unwrap();
            view.id()
        }
    });

    let mut ids = ids;
    ids.sort();
    assert_eq!(ids, (0..THREADS as u64).collect::<Vec<_>>());
    assert_eq!(configured.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_configuration_is_shared() {
    let mapper = Arc::new(Mapper::new(|config: &mut MapperConfig<Order, OrderDto>| {
        config.member("missing").by_ignoring();
    }));

    let errors = race({
        let mapper = mapper.clone();
        move |_| mapper.validate().unwrap_err()
    });

    assert!(errors.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
}
