use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn pool_has_requested_threads() {
    let pool = ThreadPool::new(3).unwrap();
    assert_eq!(pool.thread_count(), 3);
}

#[test]
fn zero_concurrency_uses_hardware() {
    let pool = ThreadPool::new(0).unwrap();
    assert!(pool.thread_count() >= 1);
}

#[test]
fn task_group_runs_every_task() {
    let pool = ThreadPool::new(4).unwrap();
    let count = AtomicUsize::new(0);
    let errors = pool.task_group(|group| {
        for _ in 0..100 {
            group.spawn(|| {
                count.fetch_add(1, Ordering::Relaxed);
                Ok(())
            });
        }
    });
    assert!(errors.is_empty());
    assert_eq!(count.load(Ordering::Relaxed), 100);
}

#[test]
fn failures_do_not_stop_siblings() {
    let pool = ThreadPool::new(2).unwrap();
    let count = AtomicUsize::new(0);
    let errors = pool.task_group(|group| {
        for i in 0..10 {
            let count = &count;
            group.spawn(move || {
                count.fetch_add(1, Ordering::Relaxed);
                if i % 3 == 0 {
                    return Err(format_error!("task {i} failed"));
                }
                Ok(())
            });
        }
    });
    assert_eq!(count.load(Ordering::Relaxed), 10);
    assert_eq!(errors.len(), 4);
    let combined = Error::from(errors);
    for i in [0, 3, 6, 9] {
        assert!(combined.message().contains(&format!("task {i} failed")));
    }
}

#[test]
fn unwinds_are_collected() {
    let pool = ThreadPool::new(2).unwrap();
    let errors = pool.task_group(|group| {
        group.spawn(|| Error::new("thrown").throw());
        group.spawn(|| Ok(()));
    });
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "thrown");
}

#[test]
fn single_thread_pool_does_not_deadlock() {
    let pool = ThreadPool::new(1).unwrap();
    let count = AtomicUsize::new(0);
    let errors = pool.task_group(|group| {
        for _ in 0..16 {
            group.spawn(|| {
                count.fetch_add(1, Ordering::Relaxed);
                Ok(())
            });
        }
    });
    assert!(errors.is_empty());
    assert_eq!(count.load(Ordering::Relaxed), 16);
}

#[test]
fn for_each_visits_all_items() {
    let pool = ThreadPool::new(3).unwrap();
    let items: Vec<usize> = (0..20).collect();
    let sum = AtomicUsize::new(0);
    let errors = pool.for_each(&items, |n| {
        sum.fetch_add(*n, Ordering::Relaxed);
        if *n == 7 {
            Err(Error::new("seven"))
        } else {
            Ok(())
        }
    });
    assert_eq!(sum.load(Ordering::Relaxed), 190);
    assert_eq!(errors, vec![Error::new("seven")]);
}

#[test]
fn group_body_runs_on_calling_thread() {
    let pool = ThreadPool::new(2).unwrap();
    let caller = std::thread::current().id();
    let mut body_thread = None;
    let task_threads = Mutex::new(Vec::new());
    let errors = pool.task_group(|group| {
        body_thread = Some(std::thread::current().id());
        for _ in 0..8 {
            group.spawn(|| {
                task_threads.lock().push(std::thread::current().id());
                Ok(())
            });
        }
    });
    assert!(errors.is_empty());
    assert_eq!(body_thread, Some(caller));
    assert_eq!(task_threads.lock().len(), 8);
}
