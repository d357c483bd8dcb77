//! Adapter cache behavior: one synthesis per pair, concurrent first use.

use std::any::TypeId;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use quack::prelude::*;
use quack::{Adapter, AdapterCache};

#[quack::interface]
trait Reading {
    fn read(&self) -> u32;
}

#[quack::interface]
trait Resettable {
    fn reset(&self);
}

struct Sensor {
    value: AtomicU32,
}

#[quack::shape]
impl Sensor {
    pub fn new(value: u32) -> Self {
        Sensor {
            value: AtomicU32::new(value),
        }
    }

    pub fn read(&self) -> u32 {
        self.value.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::SeqCst);
    }
}

struct Gauge;

#[quack::shape(implements(Reading))]
impl Gauge {
    pub fn read(&self) -> u32 {
        100
    }
}

impl Reading for Gauge {
    fn read(&self) -> u32 {
        100
    }
}

fn adapter_of(reading: &Arc<dyn Reading>) -> &Adapter<dyn Reading> {
    reading.as_any().downcast_ref::<Adapter<dyn Reading>>().unwrap()
}

#[test]
fn test_second_value_of_same_type_reuses_adapter_type() {
    let cache = AdapterCache::new();
    let first = Arc::new(Sensor::new(1)).adapt_in::<dyn Reading>(&cache).unwrap();
    let second = Arc::new(Sensor::new(2)).adapt_in::<dyn Reading>(&cache).unwrap();

    assert_eq!(first.read(), 1);
    assert_eq!(second.read(), 2);
    assert_eq!(cache.synthesized(), 1);
    assert_eq!(cache.len(), 1);
    assert!(std::ptr::eq(adapter_of(&first).adapter_type(), adapter_of(&second).adapter_type()));
}

#[test]
fn test_each_interface_is_its_own_entry() {
    let cache = AdapterCache::new();
    let sensor = Arc::new(Sensor::new(5));

    sensor.adapt_in::<dyn Reading>(&cache).unwrap();
    sensor.adapt_in::<dyn Resettable>(&cache).unwrap().reset();

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.synthesized(), 2);
    assert_eq!(sensor.read(), 0);
}

#[test]
fn test_declared_implementation_is_not_cached() {
    let cache = AdapterCache::new();
    let gauge = Arc::new(Gauge);
    let reading = gauge.adapt_in::<dyn Reading>(&cache).unwrap();

    assert_eq!(reading.read(), 100);
    assert!(cache.is_empty());
    assert!(reading.as_any().downcast_ref::<Gauge>().is_some());
}

#[test]
fn test_concurrent_first_use_publishes_one_entry() {
    let cache = AdapterCache::new();

    let readings: Vec<Arc<dyn Reading>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..16u32)
            .map(|i| {
                let cache = &cache;
                scope.spawn(move || Arc::new(Sensor::new(i)).adapt_in::<dyn Reading>(cache).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(cache.len(), 1);
    assert!((1..=16).contains(&cache.synthesized()));

    let published = adapter_of(&readings[0]).adapter_type();
    for (i, reading) in readings.iter().enumerate() {
        assert_eq!(reading.read(), i as u32);
        assert!(std::ptr::eq(adapter_of(reading).adapter_type(), published));
    }
}

#[test]
fn test_global_cache_holds_the_pair() {
    let sensor = Arc::new(Sensor::new(3));
    let reading = quack::adapt::<dyn Reading>(Arc::clone(&sensor).into_object()).unwrap();

    assert_eq!(reading.read(), 3);
    assert!(AdapterCache::global().contains(&(sensor.shape().key(), TypeId::of::<dyn Reading>())));
}
