//! Concurrency Tests
//!
//! Function calls from many threads while configuration is replaced.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;
use tfjq::ProviderState;

#[test]
fn concurrent_calls_agree() {
    let executor = create_executor();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let executor = executor.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let input = format!(r#"{{"n":{}}}"#, i);
                (0..25)
                    .map(|_| exec(&executor, ".n, .n", &input).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = format!("[{},{}]", i, i);
        for out in handle.join().unwrap() {
            assert_eq!(out, expected);
        }
    }
}

#[test]
fn configure_races_calls_without_partial_state() {
    let provider = Arc::new(FunctionProvider::new());
    let executor = executor_for(provider.clone());
    let barrier = Arc::new(Barrier::new(5));

    let configurer = {
        let executor = executor.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            for i in 0..50 {
                let jq = if i % 2 == 0 { Some("def f: 1;") } else { None };
                executor
                    .execute(Request::ConfigureProvider { config: config(jq) })
                    .unwrap();
            }
        })
    };

    let callers: Vec<_> = (0..4)
        .map(|_| {
            let executor = executor.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    assert_eq!(exec(&executor, "[.[] * 2]", "[1,2]").unwrap(), "[2,4]");
                    let Response::GetFunctions(resp) =
                        executor.execute(Request::GetFunctions).unwrap()
                    else {
                        panic!("expected GetFunctions response");
                    };
                    assert!(resp.functions.contains_key("exec"));
                }
            })
        })
        .collect();

    configurer.join().unwrap();
    for caller in callers {
        caller.join().unwrap();
    }
    assert_eq!(provider.state(), ProviderState::Configured);
}
